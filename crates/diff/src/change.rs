//! Change records.
//!
//! A `ChangeRecord` describes what happened to one object during a batch. It
//! carries two index pairs: the plain pair refers to the before/after
//! snapshots, the progressive pair refers to the mirrored array at the moment
//! the record is applied.

use core::fmt;

/// The kind of structural change reported for an object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChangeKind {
    /// The object entered the arranged sequence.
    Insert = 1,
    /// The object left the arranged sequence.
    Delete = 2,
    /// The object changed position (its value may also have changed).
    Move = 3,
    /// The object kept its position but its value changed.
    Update = 4,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChangeKind::Insert => "insert",
            ChangeKind::Delete => "delete",
            ChangeKind::Move => "move",
            ChangeKind::Update => "update",
        };
        f.write_str(name)
    }
}

/// One change of a batch, with both plain and progressive indexes.
///
/// Shape by kind:
/// - `Insert`: `index` and `progressive_index` are `None`
/// - `Delete`: `new_index` and `progressive_new_index` are `None`
/// - `Move`/`Update`: all four are `Some` once linearized (`Update` has
///   `index == new_index`)
#[derive(Clone, Debug, PartialEq)]
pub struct ChangeRecord<R> {
    /// The changed object. Deletes carry the pre-batch value, every other
    /// kind carries the post-batch value.
    pub object: R,
    /// The kind of change.
    pub kind: ChangeKind,
    /// Position in the before snapshot.
    pub index: Option<usize>,
    /// Position in the after snapshot.
    pub new_index: Option<usize>,
    /// Position in the mirror just before this record is applied.
    pub progressive_index: Option<usize>,
    /// Position in the mirror just after this record is applied.
    pub progressive_new_index: Option<usize>,
}

impl<R> ChangeRecord<R> {
    /// Creates an insertion at `new_index`.
    #[inline]
    pub fn insert(object: R, new_index: usize) -> Self {
        Self::raw(object, ChangeKind::Insert, None, Some(new_index))
    }

    /// Creates a deletion from `index`.
    #[inline]
    pub fn delete(object: R, index: usize) -> Self {
        Self::raw(object, ChangeKind::Delete, Some(index), None)
    }

    /// Creates a move from `index` to `new_index`.
    #[inline]
    pub fn moved(object: R, index: usize, new_index: usize) -> Self {
        Self::raw(object, ChangeKind::Move, Some(index), Some(new_index))
    }

    /// Creates an in-place update at `index`.
    #[inline]
    pub fn update(object: R, index: usize) -> Self {
        Self::raw(object, ChangeKind::Update, Some(index), Some(index))
    }

    fn raw(object: R, kind: ChangeKind, index: Option<usize>, new_index: Option<usize>) -> Self {
        Self {
            object,
            kind,
            index,
            new_index,
            progressive_index: None,
            progressive_new_index: None,
        }
    }

    /// Returns the change relative to the before/after snapshots.
    #[inline]
    pub fn change(&self) -> Change<'_, R> {
        Change {
            object: &self.object,
            kind: self.kind,
            index: self.index,
            new_index: self.new_index,
        }
    }

    /// Returns the change relative to the mirror at application time.
    #[inline]
    pub fn progressive_change(&self) -> Change<'_, R> {
        Change {
            object: &self.object,
            kind: self.kind,
            index: self.progressive_index,
            new_index: self.progressive_new_index,
        }
    }

    /// Returns true once progressive indexes have been assigned.
    pub fn is_linearized(&self) -> bool {
        match self.kind {
            ChangeKind::Insert => self.progressive_new_index.is_some(),
            ChangeKind::Delete => self.progressive_index.is_some(),
            ChangeKind::Move | ChangeKind::Update => {
                self.progressive_index.is_some() && self.progressive_new_index.is_some()
            }
        }
    }
}

/// A borrowed view of one index pair of a `ChangeRecord`.
///
/// This is what observers receive: `ChangeRecord::change` for snapshot
/// indexes, `ChangeRecord::progressive_change` for application indexes.
#[derive(Debug, PartialEq)]
pub struct Change<'a, R> {
    /// The changed object.
    pub object: &'a R,
    /// The kind of change.
    pub kind: ChangeKind,
    /// Original index, `None` for inserts.
    pub index: Option<usize>,
    /// New index, `None` for deletes.
    pub new_index: Option<usize>,
}

impl<R> Clone for Change<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Change<'_, R> {}
