//! Uniqueness service - is a field value already held by another record?

use tracing::{debug, instrument};

use crate::{
    application::ports::Repository,
    domain::{FieldValue, RecordId, Uniqueness},
    error::FqdnResult,
};

/// Checks one field against a repository.
pub struct UniquenessChecker {
    field: String,
    repository: Box<dyn Repository>,
}

impl UniquenessChecker {
    pub fn new(field: impl Into<String>, repository: Box<dyn Repository>) -> Self {
        Self {
            field: field.into(),
            repository,
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// Look `value` up and decide whether it is unique.
    ///
    /// The value is unique when no record holds it, or when the only record
    /// holding it is `self_identity` (a record being updated matches itself).
    /// Records not yet stored pass `None`. Callers skip null values unless
    /// they opt into checking them.
    #[instrument(skip_all, fields(field = %self.field))]
    pub fn check_unique(
        &self,
        value: &FieldValue,
        self_identity: Option<&RecordId>,
    ) -> FqdnResult<Uniqueness> {
        let matches = self.repository.find_by(&self.field, value)?;
        debug!(count = matches.count(), "Repository lookup finished");

        let unique = match matches.count() {
            0 => true,
            1 => self_identity.is_some_and(|me| matches.first() == Some(me)),
            _ => false,
        };

        if unique {
            Ok(Uniqueness::Unique)
        } else {
            debug!(first = ?matches.first(), "Value already used");
            Ok(Uniqueness::conflict(value.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::{always, eq};

    use super::*;
    use crate::application::{ApplicationError, ports::MockRepository};
    use crate::domain::{Matches, ObjectRef};
    use crate::error::FqdnError;

    fn checker_returning(ids: &[&str]) -> UniquenessChecker {
        let matches: Matches = ids.iter().map(|id| RecordId::new(*id)).collect();
        let mut repository = MockRepository::new();
        repository
            .expect_find_by()
            .with(eq("fqdn"), always())
            .times(1)
            .return_once(move |_, _| Ok(matches));
        UniquenessChecker::new("fqdn", Box::new(repository))
    }

    fn shop() -> FieldValue {
        FieldValue::text("shop.example.com")
    }

    #[test]
    fn no_match_is_unique() {
        let checker = checker_returning(&[]);
        assert!(checker.check_unique(&shop(), None).unwrap().is_unique());
    }

    #[test]
    fn only_self_is_unique() {
        let checker = checker_returning(&["7"]);
        let me = RecordId::new("7");
        assert!(checker.check_unique(&shop(), Some(&me)).unwrap().is_unique());
    }

    #[test]
    fn single_other_record_conflicts() {
        let checker = checker_returning(&["8"]);
        let me = RecordId::new("7");
        let result = checker.check_unique(&shop(), Some(&me)).unwrap();
        assert_eq!(result, Uniqueness::conflict(shop()));
    }

    #[test]
    fn unsaved_record_conflicts_with_any_match() {
        let checker = checker_returning(&["8"]);
        assert!(!checker.check_unique(&shop(), None).unwrap().is_unique());
    }

    #[test]
    fn two_matches_conflict_even_when_one_is_self() {
        let checker = checker_returning(&["7", "8"]);
        let me = RecordId::new("7");
        assert!(!checker.check_unique(&shop(), Some(&me)).unwrap().is_unique());
    }

    #[test]
    fn conflict_renders_references() {
        let value = FieldValue::Reference(ObjectRef::new("Domain").with_identifier("id", 3_i64));
        let checker = checker_returning(&["1", "2"]);

        match checker.check_unique(&value, None).unwrap() {
            Uniqueness::Conflict { rendered, .. } => {
                assert_eq!(rendered, "object(\"Domain\") identified by (id => 3)");
            }
            Uniqueness::Unique => panic!("expected a conflict"),
        }
    }

    #[test]
    fn repository_errors_propagate() {
        let mut repository = MockRepository::new();
        repository.expect_find_by().return_once(|_, _| {
            Err(ApplicationError::RepositoryUnavailable {
                reason: "offline".into(),
            }
            .into())
        });
        let checker = UniquenessChecker::new("fqdn", Box::new(repository));

        assert!(matches!(
            checker.check_unique(&shop(), None),
            Err(FqdnError::Application(ApplicationError::RepositoryUnavailable { .. }))
        ));
    }
}
