//! Filter and sort projection.
//!
//! `project` derives the arranged sequence from the fetched sequence. It is a
//! pure function: the same inputs always give the same output, and equal
//! elements keep their fetched order.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cmp::Ordering;

/// In-memory filter applied to fetched records.
pub type Predicate<R> = Rc<dyn Fn(&R) -> bool>;

/// In-memory ordering applied to filtered records.
pub type Comparator<R> = Rc<dyn Fn(&R, &R) -> Ordering>;

/// Wraps a closure as a `Predicate`.
pub fn predicate<R, F>(f: F) -> Predicate<R>
where
    F: Fn(&R) -> bool + 'static,
{
    Rc::new(f)
}

/// Wraps a closure as a `Comparator`.
pub fn comparator<R, F>(f: F) -> Comparator<R>
where
    F: Fn(&R, &R) -> Ordering + 'static,
{
    Rc::new(f)
}

/// Sort direction of a `SortDescriptor`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// One sort key with a direction.
///
/// Several descriptors are combined with `sort_comparator`; later
/// descriptors only break ties left by earlier ones.
pub struct SortDescriptor<R> {
    compare: Comparator<R>,
    order: SortOrder,
}

impl<R> Clone for SortDescriptor<R> {
    fn clone(&self) -> Self {
        Self {
            compare: Rc::clone(&self.compare),
            order: self.order,
        }
    }
}

impl<R: 'static> SortDescriptor<R> {
    /// Creates a descriptor from an ascending comparison and a direction.
    pub fn new<F>(compare: F, order: SortOrder) -> Self
    where
        F: Fn(&R, &R) -> Ordering + 'static,
    {
        Self {
            compare: Rc::new(compare),
            order,
        }
    }

    /// Creates a descriptor ordering by an extracted key.
    pub fn by_key<K, F>(key: F, order: SortOrder) -> Self
    where
        K: Ord,
        F: Fn(&R) -> K + 'static,
    {
        Self::new(move |a, b| key(a).cmp(&key(b)), order)
    }

    /// Ascending order by key.
    pub fn asc<K: Ord, F: Fn(&R) -> K + 'static>(key: F) -> Self {
        Self::by_key(key, SortOrder::Asc)
    }

    /// Descending order by key.
    pub fn desc<K: Ord, F: Fn(&R) -> K + 'static>(key: F) -> Self {
        Self::by_key(key, SortOrder::Desc)
    }
}

impl<R> SortDescriptor<R> {
    /// Returns the direction of this descriptor.
    #[inline]
    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// Compares two records according to this descriptor.
    pub fn compare(&self, a: &R, b: &R) -> Ordering {
        let cmp = (self.compare)(a, b);
        match self.order {
            SortOrder::Asc => cmp,
            SortOrder::Desc => cmp.reverse(),
        }
    }
}

/// Folds descriptors into a single comparator.
///
/// Returns `None` for an empty list, which leaves the fetched order intact.
pub fn sort_comparator<R: 'static>(descriptors: Vec<SortDescriptor<R>>) -> Option<Comparator<R>> {
    if descriptors.is_empty() {
        return None;
    }
    Some(Rc::new(move |a: &R, b: &R| {
        for descriptor in &descriptors {
            let cmp = descriptor.compare(a, b);
            if cmp != Ordering::Equal {
                return cmp;
            }
        }
        Ordering::Equal
    }))
}

/// Filters `fetched` by `predicate`, then stably sorts by `comparator`.
pub fn project<R: Clone>(
    fetched: &[R],
    predicate: Option<&Predicate<R>>,
    comparator: Option<&Comparator<R>>,
) -> Vec<R> {
    let mut arranged: Vec<R> = match predicate {
        Some(predicate) => fetched.iter().filter(|r| predicate(*r)).cloned().collect(),
        None => fetched.to_vec(),
    };
    if let Some(comparator) = comparator {
        // sort_by is stable: ties keep their fetched order
        arranged.sort_by(|a, b| comparator(a, b));
    }
    arranged
}
