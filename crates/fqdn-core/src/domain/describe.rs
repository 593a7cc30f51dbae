//! Rendering of field values for violation reports.
//!
//! The rendered string is user facing, so the format is fixed:
//!
//! | Value                         | Rendering                                        |
//! |-------------------------------|--------------------------------------------------|
//! | null                          | `null`                                           |
//! | bool / integer                | `true`, `42`                                     |
//! | string                        | `"shop.example.com"`                             |
//! | timestamp                     | `2024-05-01 10:00:00`                            |
//! | reference, no identifiers     | `object("Catalog")`                              |
//! | reference with identifiers    | `object("Catalog") identified by (id => 3)`      |
//!
//! Identifier values that are themselves references collapse to
//! `object("Class")`.

use crate::domain::value_objects::{FieldValue, ObjectRef};

const PRETTY_DATE: &str = "%Y-%m-%d %H:%M:%S";

/// Render a value, expanding object references into their identifiers.
pub fn describe(value: &FieldValue) -> String {
    match value {
        FieldValue::Reference(object) => describe_reference(object),
        scalar => format_scalar(scalar),
    }
}

fn describe_reference(object: &ObjectRef) -> String {
    if object.identifiers.is_empty() {
        return format!("object(\"{}\")", object.class);
    }

    let identifiers = object
        .identifiers
        .iter()
        .map(|(field, id)| {
            let id = match id {
                FieldValue::Reference(inner) => format!("object(\"{}\")", inner.class),
                scalar => format_scalar(scalar),
            };
            format!("{field} => {id}")
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!("object(\"{}\") identified by ({})", object.class, identifiers)
}

fn format_scalar(value: &FieldValue) -> String {
    match value {
        FieldValue::Null => "null".into(),
        FieldValue::Bool(b) => b.to_string(),
        FieldValue::Integer(i) => i.to_string(),
        FieldValue::Timestamp(ts) => ts.format(PRETTY_DATE).to_string(),
        FieldValue::Text(s) => format!("\"{s}\""),
        FieldValue::Reference(object) => format!("object(\"{}\")", object.class),
    }
}
