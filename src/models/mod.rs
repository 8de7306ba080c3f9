//! Domain models: entity rows, wire representations, and query types

pub mod author;
pub mod book;
pub mod genre;
pub mod lender;
pub mod library;
pub mod query;
pub mod user;
pub mod validate;

/// The six entity kinds managed by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Genre,
    Author,
    Book,
    Lender,
    Library,
}

/// How a kind leaves the catalog: flipping the `deleted` flag or a hard
/// row removal. Books are the only hard-deleted kind; Authors expose no
/// delete operation at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionPolicy {
    Soft,
    Hard,
}

impl EntityKind {
    pub fn deletion_policy(self) -> Option<DeletionPolicy> {
        match self {
            EntityKind::Book => Some(DeletionPolicy::Hard),
            EntityKind::Author => None,
            EntityKind::User
            | EntityKind::Genre
            | EntityKind::Lender
            | EntityKind::Library => Some(DeletionPolicy::Soft),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deletion_policy_per_kind() {
        assert_eq!(EntityKind::Book.deletion_policy(), Some(DeletionPolicy::Hard));
        assert_eq!(EntityKind::Author.deletion_policy(), None);
        assert_eq!(EntityKind::User.deletion_policy(), Some(DeletionPolicy::Soft));
        assert_eq!(EntityKind::Genre.deletion_policy(), Some(DeletionPolicy::Soft));
        assert_eq!(EntityKind::Lender.deletion_policy(), Some(DeletionPolicy::Soft));
        assert_eq!(EntityKind::Library.deletion_policy(), Some(DeletionPolicy::Soft));
    }
}
