//! Fetched results controller.
//!
//! `FetchedResultsController` keeps the arranged view of one fetch request
//! and turns every mutation notification of its source into a `ChangeBatch`
//! delivered to its observers.
//!
//! One batch cycle:
//!
//! 1. the fetched sequence is updated from the notification
//! 2. filter and sort derive the next arranged sequence
//! 3. the change batch is classified and linearized against the current one
//! 4. observers receive the batch while the current snapshot is still in place
//! 5. the next snapshot is committed

use crate::config::{ControllerOptions, FetchRequest, RearrangePolicy};
use crate::dispatch::BatchDispatcher;
use crate::mutation::MutationNotification;
use crate::observer::{Observer, ObserverId, ObserverRegistry};
use crate::source::{DataSource, SourceId};
use alloc::format;
use alloc::vec::Vec;
use hashbrown::HashSet;
use tabula_core::{Error, Record, Result};
use tabula_diff::{index_by_identity, project, sort_comparator, ChangeBatch, Comparator, Predicate, Snapshot, SortDescriptor};

/// Arranged view over the records of a data source.
pub struct FetchedResultsController<S: DataSource> {
    source: S,
    request: Option<FetchRequest<S::Record>>,
    /// In-memory filter applied on top of the fetch
    filter: Option<Predicate<S::Record>>,
    /// In-memory ordering applied on top of the fetch
    comparator: Option<Comparator<S::Record>>,
    options: ControllerOptions,
    snapshot: Snapshot<S::Record>,
    fetched: bool,
    observers: ObserverRegistry<S::Record>,
}

impl<S: DataSource> FetchedResultsController<S> {
    /// Creates a controller over `source`. Nothing is fetched until
    /// `perform_fetch` is called.
    pub fn new(source: S, request: Option<FetchRequest<S::Record>>) -> Self {
        Self {
            source,
            request,
            filter: None,
            comparator: None,
            options: ControllerOptions::default(),
            snapshot: Snapshot::empty(),
            fetched: false,
            observers: ObserverRegistry::new(),
        }
    }

    /// Sets the dispatch policies.
    pub fn with_options(mut self, options: ControllerOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the data source.
    #[inline]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the fetch request.
    #[inline]
    pub fn fetch_request(&self) -> Option<&FetchRequest<S::Record>> {
        self.request.as_ref()
    }

    /// Returns the dispatch policies.
    #[inline]
    pub fn options(&self) -> ControllerOptions {
        self.options
    }

    /// Returns the in-memory filter.
    #[inline]
    pub fn filter_predicate(&self) -> Option<&Predicate<S::Record>> {
        self.filter.as_ref()
    }

    /// Returns the in-memory ordering.
    #[inline]
    pub fn sort_comparator(&self) -> Option<&Comparator<S::Record>> {
        self.comparator.as_ref()
    }

    /// Returns true once a fetch has succeeded.
    #[inline]
    pub fn has_fetched(&self) -> bool {
        self.fetched
    }

    /// Executes the fetch request and replaces the current state.
    ///
    /// No batch is dispatched. On failure the previous state is kept; a
    /// source returning the same identity twice fails with `Error::Source`.
    pub fn perform_fetch(&mut self) -> Result<()> {
        match self.fetch_snapshot() {
            Ok(snapshot) => {
                tracing::debug!(
                    fetched = snapshot.fetched().len(),
                    arranged = snapshot.count(),
                    "performed fetch"
                );
                self.snapshot = snapshot;
                self.fetched = true;
                Ok(())
            }
            Err(error) => {
                tracing::warn!(%error, "fetch rejected");
                Err(error)
            }
        }
    }

    fn fetch_snapshot(&self) -> Result<Snapshot<S::Record>> {
        let request = self.request.as_ref().ok_or(Error::MissingFetchRequest)?;
        request.validate()?;
        let records = self.source.fetch(request)?;
        index_by_identity(&records).map_err(|error| Error::source(format!("fetch returned {error}")))?;
        let fetched = request.apply(&records);
        let arranged = project(&fetched, self.filter.as_ref(), self.comparator.as_ref());
        Snapshot::new(fetched, arranged)
    }

    /// Replaces the in-memory filter and re-arranges.
    ///
    /// Under `RearrangePolicy::Silent` the returned batch is empty and
    /// observers hear nothing; under `Dispatch` the change runs through a full
    /// batch cycle.
    pub fn set_filter_predicate(&mut self, predicate: Option<Predicate<S::Record>>) -> Result<ChangeBatch<S::Record>> {
        self.filter = predicate;
        self.rearrange()
    }

    /// Replaces the in-memory ordering and re-arranges.
    ///
    /// See `set_filter_predicate` for how observers are informed.
    pub fn set_sort_comparator(&mut self, comparator: Option<Comparator<S::Record>>) -> Result<ChangeBatch<S::Record>> {
        self.comparator = comparator;
        self.rearrange()
    }

    /// Orders by sort descriptors, compared in sequence. An empty list keeps
    /// the fetched order.
    pub fn set_sort_descriptors(&mut self, descriptors: Vec<SortDescriptor<S::Record>>) -> Result<ChangeBatch<S::Record>>
    where
        S::Record: 'static,
    {
        self.set_sort_comparator(sort_comparator(descriptors))
    }

    fn rearrange(&mut self) -> Result<ChangeBatch<S::Record>> {
        if !self.fetched {
            return Ok(ChangeBatch::new());
        }
        let fetched = self.snapshot.fetched().to_vec();
        match self.options.rearrange {
            RearrangePolicy::Silent => {
                let arranged = project(&fetched, self.filter.as_ref(), self.comparator.as_ref());
                self.snapshot = Snapshot::new(fetched, arranged)?;
                tracing::debug!(arranged = self.snapshot.count(), "re-arranged without dispatch");
                Ok(ChangeBatch::new())
            }
            RearrangePolicy::Dispatch => self.run_batch(fetched, &HashSet::new()),
        }
    }

    /// Runs one batch cycle for a mutation of the source.
    ///
    /// Returns the dispatched batch. Before the first fetch there is nothing
    /// to compare against and the batch is empty.
    pub fn apply_mutation(
        &mut self,
        notification: &MutationNotification<SourceId<S>>,
    ) -> Result<ChangeBatch<S::Record>> {
        if !self.fetched {
            return Ok(ChangeBatch::new());
        }
        let fetched = self.next_fetched(notification);
        self.run_batch(fetched, &notification.updated)
    }

    /// Brings the fetched sequence up to date with `notification`.
    fn next_fetched(&self, notification: &MutationNotification<SourceId<S>>) -> Vec<S::Record> {
        let current = self.snapshot.fetched();
        let matches = |record: &S::Record| self.request.as_ref().map_or(true, |r| r.matches(record));

        let mut present = HashSet::with_capacity(current.len());
        let mut next = Vec::with_capacity(current.len() + notification.inserted.len());
        for record in current {
            let id = record.id();
            if notification.deleted.contains(&id) {
                present.insert(id);
                continue;
            }
            if notification.updated.contains(&id) || notification.inserted.contains(&id) {
                if let Some(fresh) = self.source.lookup(&id).filter(|fresh| matches(fresh)) {
                    next.push(fresh);
                }
            } else {
                next.push(record.clone());
            }
            present.insert(id);
        }

        let mut arrivals: Vec<&SourceId<S>> = notification
            .inserted
            .iter()
            .chain(notification.updated.iter())
            .filter(|id| !present.contains(*id) && !notification.deleted.contains(*id))
            .collect();
        arrivals.sort();
        arrivals.dedup();
        for id in arrivals {
            if let Some(fresh) = self.source.lookup(id).filter(|fresh| matches(fresh)) {
                next.push(fresh);
            }
        }

        next.sort_by(|a, b| self.source.source_order(a, b));
        match &self.request {
            Some(request) => request.apply(&next),
            None => next,
        }
    }

    fn run_batch(
        &mut self,
        fetched: Vec<S::Record>,
        updated: &HashSet<SourceId<S>>,
    ) -> Result<ChangeBatch<S::Record>> {
        let arranged = project(&fetched, self.filter.as_ref(), self.comparator.as_ref());
        let next = Snapshot::new(fetched, arranged)?;
        let batch = ChangeBatch::compute(self.snapshot.arranged(), next.arranged(), updated)?;

        tracing::debug!(
            changes = batch.len(),
            observers = self.observers.len(),
            "dispatching change batch"
        );
        BatchDispatcher::new(self.observers.as_slice(), &self.snapshot).dispatch(&batch, self.options.empty_batch);

        self.snapshot = next;
        tracing::debug!(arranged = self.snapshot.count(), "committed snapshot");
        Ok(batch)
    }

    /// Records as returned by the fetch request.
    #[inline]
    pub fn fetched_objects(&self) -> &[S::Record] {
        self.snapshot.fetched()
    }

    /// Records after the in-memory filter and ordering.
    #[inline]
    pub fn arranged_objects(&self) -> &[S::Record] {
        self.snapshot.arranged()
    }

    /// Returns the arranged object at `index`.
    pub fn object_at(&self, index: usize) -> Result<&S::Record> {
        self.snapshot.object_at(index)
    }

    /// Returns the arranged objects at `indexes`, in the order given.
    pub fn objects_at<I>(&self, indexes: I) -> Result<Vec<&S::Record>>
    where
        I: IntoIterator<Item = usize>,
    {
        self.snapshot.objects_at(indexes)
    }

    /// Returns the arranged position of the object with identity `id`.
    #[inline]
    pub fn index_of(&self, id: &SourceId<S>) -> Option<usize> {
        self.snapshot.index_of(id)
    }

    /// Returns the number of arranged objects.
    #[inline]
    pub fn count(&self) -> usize {
        self.snapshot.count()
    }

    /// Returns the committed snapshot.
    #[inline]
    pub fn snapshot(&self) -> &Snapshot<S::Record> {
        &self.snapshot
    }

    /// Registers an observer for subsequent batches.
    pub fn add_observer(&mut self, observer: Observer<S::Record>) -> ObserverId {
        self.observers.register(observer)
    }

    /// Removes an observer. Returns false if it was not registered.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.observers.unregister(id)
    }

    /// Returns the number of registered observers.
    #[inline]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

impl<S: DataSource + Clone> FetchedResultsController<S> {
    /// Returns an unfetched controller with the same source, fetch request,
    /// filter, ordering and options, and no observers.
    pub fn duplicate(&self) -> Self {
        Self {
            source: self.source.clone(),
            request: self.request.clone(),
            filter: self.filter.clone(),
            comparator: self.comparator.clone(),
            options: self.options,
            snapshot: Snapshot::empty(),
            fetched: false,
            observers: ObserverRegistry::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EmptyBatchPolicy;
    use crate::source::MemorySource;
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::vec;
    use core::cell::RefCell;
    use tabula_diff::{predicate, ChangeKind};

    #[derive(Clone, Debug, PartialEq)]
    struct Item {
        id: char,
        rank: i32,
        label: &'static str,
    }

    impl Record for Item {
        type Id = char;

        fn id(&self) -> char {
            self.id
        }
    }

    fn item(id: char, rank: i32) -> Item {
        Item { id, rank, label: "" }
    }

    type Source = Rc<MemorySource<Item>>;

    fn make_source(items: Vec<Item>) -> Source {
        Rc::new(MemorySource::with_records("Item", items).unwrap())
    }

    fn make_controller(source: &Source) -> FetchedResultsController<Source> {
        let request = FetchRequest::new("Item").with_sort_descriptors(vec![SortDescriptor::asc(|i: &Item| i.rank)]);
        FetchedResultsController::new(source.clone(), Some(request))
    }

    fn ids(items: &[Item]) -> String {
        items.iter().map(|i| i.id).collect()
    }

    fn notify(controller: &mut FetchedResultsController<Source>, source: &Source) -> ChangeBatch<Item> {
        controller.apply_mutation(&source.take_notification()).unwrap()
    }

    #[test]
    fn test_perform_fetch() {
        let source = make_source(vec![item('B', 2), item('A', 1), item('C', 3)]);
        let mut controller = make_controller(&source);
        assert!(!controller.has_fetched());
        assert_eq!(controller.count(), 0);

        controller.perform_fetch().unwrap();
        assert!(controller.has_fetched());
        assert_eq!(ids(controller.arranged_objects()), "ABC");
        assert_eq!(controller.object_at(1).unwrap().id, 'B');
        assert_eq!(controller.index_of(&'C'), Some(2));
        assert!(matches!(
            controller.object_at(3),
            Err(Error::IndexOutOfBounds { index: 3, len: 3 })
        ));
    }

    #[test]
    fn test_perform_fetch_errors() {
        let source = make_source(vec![item('A', 1)]);

        let mut missing = FetchedResultsController::new(source.clone(), None);
        assert_eq!(missing.perform_fetch(), Err(Error::MissingFetchRequest));

        let mut invalid = FetchedResultsController::new(source.clone(), Some(FetchRequest::new("")));
        assert!(matches!(invalid.perform_fetch(), Err(Error::InvalidFetchRequest { .. })));

        let mut unknown = FetchedResultsController::new(source, Some(FetchRequest::new("Folder")));
        let error = unknown.perform_fetch().unwrap_err();
        assert!(error.is_fetch_error());
        assert!(!unknown.has_fetched());
    }

    /// Hands back a fixed list, repeats included.
    struct FixedSource(Vec<Item>);

    impl DataSource for FixedSource {
        type Record = Item;

        fn fetch(&self, _request: &FetchRequest<Item>) -> Result<Vec<Item>> {
            Ok(self.0.clone())
        }

        fn lookup(&self, id: &char) -> Option<Item> {
            self.0.iter().find(|i| i.id == *id).cloned()
        }
    }

    #[test]
    fn test_perform_fetch_rejects_repeated_identity() {
        let source = FixedSource(vec![item('A', 1), item('B', 2), item('A', 3)]);
        let mut controller = FetchedResultsController::new(source, Some(FetchRequest::new("Item")));

        let error = controller.perform_fetch().unwrap_err();
        assert!(matches!(error, Error::Source { .. }));
        assert!(error.is_fetch_error());
        assert!(!controller.has_fetched());
        assert_eq!(controller.count(), 0);
    }

    #[test]
    fn test_arrivals_keep_source_order() {
        // Without a sort the fetched order is the source's identity order
        let source = make_source(vec![item('B', 0), item('C', 0)]);
        let mut controller = FetchedResultsController::new(source.clone(), Some(FetchRequest::new("Item")));
        controller.perform_fetch().unwrap();
        source.insert(item('A', 0)).unwrap();
        notify(&mut controller, &source);
        assert_eq!(ids(controller.fetched_objects()), "ABC");

        let mut fresh = controller.duplicate();
        fresh.perform_fetch().unwrap();
        assert_eq!(controller.fetched_objects(), fresh.fetched_objects());
        assert_eq!(controller.arranged_objects(), fresh.arranged_objects());

        // Records tied on rank fall back to source order too
        let source = make_source(vec![item('B', 0), item('C', 1)]);
        let mut controller = make_controller(&source);
        controller.perform_fetch().unwrap();
        source.insert(item('A', 0)).unwrap();
        notify(&mut controller, &source);
        assert_eq!(ids(controller.arranged_objects()), "ABC");

        let mut fresh = controller.duplicate();
        fresh.perform_fetch().unwrap();
        assert_eq!(controller.arranged_objects(), fresh.arranged_objects());
    }

    #[test]
    fn test_perform_fetch_is_silent() {
        let source = make_source(vec![item('A', 1)]);
        let mut controller = make_controller(&source);
        let calls = Rc::new(RefCell::new(0));
        let calls_clone = calls.clone();
        controller.add_observer(Observer::<Item>::new().on_will_begin(move |_| *calls_clone.borrow_mut() += 1));

        controller.perform_fetch().unwrap();
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn test_mutation_before_fetch_is_empty() {
        let source = make_source(vec![item('A', 1)]);
        let mut controller = make_controller(&source);
        source.insert(item('B', 2)).unwrap();
        assert!(notify(&mut controller, &source).is_empty());
        assert_eq!(controller.count(), 0);
    }

    #[test]
    fn test_mixed_scenario() {
        let source = make_source(vec![item('A', 0), item('B', 1), item('C', 2), item('D', 3)]);
        let mut controller = make_controller(&source);
        controller.perform_fetch().unwrap();

        source.delete(&'B');
        source.update(item('D', -1));
        source.update(Item { id: 'C', rank: 2, label: "edited" });
        let batch = notify(&mut controller, &source);

        let summary: Vec<_> = batch
            .iter()
            .map(|r| (r.object.id, r.kind, r.progressive_index, r.progressive_new_index))
            .collect();
        assert_eq!(
            summary,
            vec![
                ('B', ChangeKind::Delete, Some(1), None),
                ('D', ChangeKind::Move, Some(2), Some(0)),
                ('A', ChangeKind::Move, Some(1), Some(1)),
                ('C', ChangeKind::Update, Some(2), Some(2)),
            ]
        );
        assert_eq!(ids(controller.arranged_objects()), "DAC");
        assert_eq!(controller.object_at(2).unwrap().label, "edited");
    }

    #[test]
    fn test_inserts_into_empty() {
        let source = make_source(vec![]);
        let mut controller = make_controller(&source);
        controller.perform_fetch().unwrap();

        source.insert(item('Y', 2)).unwrap();
        source.insert(item('X', 1)).unwrap();
        let batch = notify(&mut controller, &source);

        let summary: Vec<_> = batch
            .iter()
            .map(|r| (r.object.id, r.kind, r.new_index, r.progressive_new_index))
            .collect();
        assert_eq!(
            summary,
            vec![
                ('X', ChangeKind::Insert, Some(0), Some(0)),
                ('Y', ChangeKind::Insert, Some(1), Some(1)),
            ]
        );
    }

    #[test]
    fn test_observers_see_pre_batch_snapshot() {
        let source = make_source(vec![item('A', 0), item('B', 1), item('C', 2)]);
        let mut controller = make_controller(&source);
        controller.perform_fetch().unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();
        controller.add_observer(Observer::<Item>::new().on_change(move |snapshot: &Snapshot<Item>, change| {
            let before = change.index.map(|i| snapshot.object_at(i).unwrap().id);
            seen_clone.borrow_mut().push((snapshot.count(), change.object.id, before));
        }));

        source.delete(&'A');
        source.insert(item('D', 3)).unwrap();
        notify(&mut controller, &source);

        // B and C shift up, which makes them moves
        assert_eq!(
            *seen.borrow(),
            vec![(3, 'A', Some('A')), (3, 'B', Some('B')), (3, 'C', Some('C')), (3, 'D', None)]
        );
        assert_eq!(ids(controller.arranged_objects()), "BCD");
    }

    #[test]
    fn test_callback_precedence() {
        let source = make_source(vec![item('A', 0), item('B', 1)]);
        let mut controller = make_controller(&source);
        controller.perform_fetch().unwrap();

        let log = Rc::new(RefCell::new(Vec::new()));
        let (l1, l2, l3) = (log.clone(), log.clone(), log.clone());
        controller.add_observer(
            Observer::<Item>::new()
                .on_change(|_, _| panic!("single change callback must not run"))
                .on_progressive_change(move |_, change, progressive| {
                    l1.borrow_mut().push((change.object.id, progressive.new_index));
                })
                .on_did_end(|_| panic!("signal end callback must not run"))
                .on_end_changes(move |_, changes| l2.borrow_mut().push(('#', Some(changes.len()))))
                .on_will_begin(move |_| l3.borrow_mut().push(('^', None))),
        );

        source.update(item('A', 5));
        notify(&mut controller, &source);

        assert_eq!(
            *log.borrow(),
            vec![('^', None), ('B', Some(0)), ('A', Some(1)), ('#', Some(2))]
        );
    }

    #[test]
    fn test_empty_batch_policy() {
        let source = make_source(vec![item('A', 0)]);
        let calls = Rc::new(RefCell::new(0));

        let mut quiet = make_controller(&source);
        let mut loud = make_controller(&source).with_options(ControllerOptions::new().empty_batch(EmptyBatchPolicy::Notify));
        for controller in [&mut quiet, &mut loud] {
            let calls_clone = calls.clone();
            controller.add_observer(Observer::<Item>::new().on_did_end(move |_| *calls_clone.borrow_mut() += 1));
            controller.perform_fetch().unwrap();
        }

        let nothing = MutationNotification::new();
        assert!(quiet.apply_mutation(&nothing).unwrap().is_empty());
        assert_eq!(*calls.borrow(), 0);
        assert!(loud.apply_mutation(&nothing).unwrap().is_empty());
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_mutation_outside_fetch_predicate() {
        let source = make_source(vec![item('A', 0), item('B', 1)]);
        let request = FetchRequest::new("Item")
            .with_predicate(|i: &Item| i.rank >= 0)
            .with_sort_descriptors(vec![SortDescriptor::asc(|i: &Item| i.rank)]);
        let mut controller = FetchedResultsController::new(source.clone(), Some(request));
        controller.perform_fetch().unwrap();

        // B leaves the fetch, Z never enters it, C does
        source.update(item('B', -1));
        source.insert(item('Z', -5)).unwrap();
        source.insert(item('C', 2)).unwrap();
        let batch = notify(&mut controller, &source);

        assert_eq!(batch.count_of(ChangeKind::Delete), 1);
        assert_eq!(batch.count_of(ChangeKind::Insert), 1);
        assert_eq!(ids(controller.fetched_objects()), "AC");

        // B matches again
        source.update(item('B', 1));
        notify(&mut controller, &source);
        assert_eq!(ids(controller.fetched_objects()), "ABC");
    }

    #[test]
    fn test_filter_change_silent_by_default() {
        let source = make_source(vec![item('A', 0), item('B', 1), item('C', 2)]);
        let mut controller = make_controller(&source);
        controller.perform_fetch().unwrap();
        controller.add_observer(Observer::<Item>::new().on_will_begin(|_| panic!("no batch expected")));

        let batch = controller
            .set_filter_predicate(Some(predicate(|i: &Item| i.id != 'B')))
            .unwrap();
        assert!(batch.is_empty());
        assert_eq!(ids(controller.arranged_objects()), "AC");
        assert_eq!(ids(controller.fetched_objects()), "ABC");
    }

    #[test]
    fn test_sort_change_dispatched() {
        let source = make_source(vec![item('A', 0), item('B', 1), item('C', 2)]);
        let mut controller =
            make_controller(&source).with_options(ControllerOptions::new().rearrange(RearrangePolicy::Dispatch));
        controller.perform_fetch().unwrap();

        let mirror = Rc::new(RefCell::new(vec!['A', 'B', 'C']));
        let mirror_clone = mirror.clone();
        controller.add_observer(Observer::<Item>::new().on_progressive_change(move |_, _, p| {
            let mut mirror = mirror_clone.borrow_mut();
            if let Some(index) = p.index {
                mirror.remove(index);
            }
            if let Some(new_index) = p.new_index {
                mirror.insert(new_index, p.object.id);
            }
        }));

        let batch = controller
            .set_sort_descriptors(vec![SortDescriptor::desc(|i: &Item| i.rank)])
            .unwrap();
        assert_eq!(batch.count_of(ChangeKind::Move), 2);
        assert_eq!(ids(controller.arranged_objects()), "CBA");
        assert_eq!(*mirror.borrow(), vec!['C', 'B', 'A']);
    }

    #[test]
    fn test_remove_observer() {
        let source = make_source(vec![]);
        let mut controller = make_controller(&source);
        let id = controller.add_observer(Observer::<Item>::new());
        assert_eq!(controller.observer_count(), 1);
        assert!(controller.remove_observer(id));
        assert!(!controller.remove_observer(id));
        assert_eq!(controller.observer_count(), 0);
    }

    #[test]
    fn test_duplicate() {
        let source = make_source(vec![item('A', 0), item('B', 1)]);
        let mut controller = make_controller(&source)
            .with_options(ControllerOptions::new().empty_batch(EmptyBatchPolicy::Notify));
        controller.set_filter_predicate(Some(predicate(|i: &Item| i.id == 'B'))).unwrap();
        controller.add_observer(Observer::<Item>::new());
        controller.perform_fetch().unwrap();

        let mut copy = controller.duplicate();
        assert!(!copy.has_fetched());
        assert_eq!(copy.observer_count(), 0);
        assert_eq!(copy.count(), 0);
        assert_eq!(copy.options(), controller.options());

        copy.perform_fetch().unwrap();
        assert_eq!(ids(copy.arranged_objects()), "B");
    }
}
