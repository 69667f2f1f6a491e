//! Record identity.
//!
//! Records are compared across snapshots by identity only. Value equality is
//! never used to decide whether two records are "the same object"; the engine
//! learns about value changes from mutation notifications.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

/// Bound satisfied by record identity types.
///
/// Identities must be stable for the lifetime of a record, hashable for
/// lookups and totally ordered so that unordered identity sets can be
/// processed deterministically.
pub trait Identity: Clone + Eq + Ord + Hash + Debug {}

impl<T: Clone + Eq + Ord + Hash + Debug> Identity for T {}

/// A record with a stable identity.
pub trait Record {
    /// The identity type (primary key equivalent).
    type Id: Identity;

    /// Returns the identity of this record.
    fn id(&self) -> Self::Id;
}

impl<R: Record + ?Sized> Record for Rc<R> {
    type Id = R::Id;

    #[inline]
    fn id(&self) -> Self::Id {
        (**self).id()
    }
}

/// Collects the identities of a sequence of records, preserving order.
pub fn ids_of<R: Record>(records: &[R]) -> Vec<R::Id> {
    records.iter().map(Record::id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: u32,
        text: &'static str,
    }

    impl Record for Note {
        type Id = u32;

        fn id(&self) -> u32 {
            self.id
        }
    }

    #[test]
    fn test_record_id() {
        let note = Note { id: 3, text: "a" };
        assert_eq!(note.id(), 3);
    }

    #[test]
    fn test_rc_record_id() {
        let note = Rc::new(Note { id: 9, text: "b" });
        assert_eq!(Record::id(&note), 9);
    }

    #[test]
    fn test_identity_ignores_value() {
        let before = Note { id: 1, text: "draft" };
        let after = Note { id: 1, text: "final" };
        assert_ne!(before, after);
        assert_eq!(before.id(), after.id());
    }

    #[test]
    fn test_ids_of_preserves_order() {
        let notes = vec![
            Note { id: 5, text: "x" },
            Note { id: 2, text: "y" },
            Note { id: 8, text: "z" },
        ];
        assert_eq!(ids_of(&notes), vec![5, 2, 8]);
    }
}
