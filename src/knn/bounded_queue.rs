use crate::error::{Result, SpatialIndexError};

/// One stored element, its priority, and its insertion order among equal priorities.
#[derive(Debug, Clone, PartialEq)]
struct Entry<T> {
    element: T,
    priority: f64,
    order: u64,
}

/// A priority queue whose number of elements is bounded.
///
/// Elements are kept in ascending priority order, ties broken first-in first-out. When an enqueue
/// pushes the queue over capacity, the element with the maximum priority (latest among ties) is
/// ejected, which may be the element that was just enqueued. After any sequence of enqueues the
/// queue therefore holds the `capacity` elements with the smallest priorities seen so far.
///
/// ```
/// use spatial_index::knn::BoundedPriorityQueue;
///
/// let mut queue = BoundedPriorityQueue::new(2).unwrap();
/// queue.enqueue("a", 5.).unwrap();
/// queue.enqueue("b", 1.).unwrap();
/// queue.enqueue("c", 3.).unwrap();
/// assert_eq!(queue.into_vec(), vec!["b", "c"]);
/// ```
#[derive(Debug, Clone)]
pub struct BoundedPriorityQueue<T> {
    entries: Vec<Entry<T>>,
    capacity: usize,
    /// Order assigned to the next plain enqueue.
    next_order: u64,
    /// Incremented on every structural change; checked by [`Cursor`].
    modifications: u64,
}

impl<T> BoundedPriorityQueue<T> {
    /// Create a new queue holding at most `capacity` elements.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(SpatialIndexError::InvalidCapacity(capacity));
        }
        Ok(Self {
            entries: Vec::with_capacity(capacity + 1),
            capacity,
            next_order: 0,
            modifications: 0,
        })
    }

    /// Insert `element` with the given priority, ejecting the maximum priority element if the
    /// queue overflows.
    ///
    /// Priorities must be non-negative and not NaN.
    pub fn enqueue(&mut self, element: T, priority: f64) -> Result<()> {
        let order = self.next_order;
        self.enqueue_ordered(element, priority, order)
    }

    /// Insert `element`, ranking it by `(priority, order)` instead of by arrival.
    ///
    /// Queries pass each point's insertion sequence number here so that equally distant points
    /// rank by when they were inserted into the index, whatever order the traversal visits them.
    pub(crate) fn enqueue_ordered(&mut self, element: T, priority: f64, order: u64) -> Result<()> {
        // Also rejects NaN
        if !(priority >= 0.0) {
            return Err(SpatialIndexError::InvalidPriority(priority));
        }

        let index = self
            .entries
            .partition_point(|e| (e.priority, e.order) <= (priority, order));
        self.entries.insert(
            index,
            Entry {
                element,
                priority,
                order,
            },
        );
        if self.entries.len() > self.capacity {
            self.entries.pop();
        }
        // Later plain enqueues stay behind everything already queued
        self.next_order = self.next_order.max(order.saturating_add(1));
        self.modifications = self.modifications.wrapping_add(1);
        Ok(())
    }

    /// Remove and return the minimum priority element.
    pub fn dequeue(&mut self) -> Option<T> {
        if self.entries.is_empty() {
            return None;
        }
        self.modifications = self.modifications.wrapping_add(1);
        Some(self.entries.remove(0).element)
    }

    /// The minimum priority element.
    pub fn first(&self) -> Option<&T> {
        self.entries.first().map(|e| &e.element)
    }

    /// The maximum priority element.
    pub fn last(&self) -> Option<&T> {
        self.entries.last().map(|e| &e.element)
    }

    /// The priority of the maximum priority element.
    pub fn last_priority(&self) -> Option<f64> {
        self.entries.last().map(|e| e.priority)
    }

    /// Whether `element` is held by the queue. O(n).
    pub fn contains(&self, element: &T) -> bool
    where
        T: PartialEq,
    {
        self.entries.iter().any(|e| &e.element == element)
    }

    /// The number of elements held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the queue holds no elements.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the queue holds `capacity` elements.
    pub fn is_full(&self) -> bool {
        self.entries.len() == self.capacity
    }

    /// The maximum number of elements held.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate elements in ascending priority order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator + '_ {
        self.entries.iter().map(|e| &e.element)
    }

    /// Iterate `(element, priority)` pairs in ascending priority order.
    pub fn iter_with_priority(
        &self,
    ) -> impl DoubleEndedIterator<Item = (&T, f64)> + ExactSizeIterator + '_ {
        self.entries.iter().map(|e| (&e.element, e.priority))
    }

    /// A detached, fail-fast cursor over the current contents.
    ///
    /// Unlike [`iter`][Self::iter], the cursor does not borrow the queue between steps. Any
    /// enqueue or dequeue after the cursor was created makes every subsequent
    /// [`Cursor::next`] fail with [`SpatialIndexError::ConcurrentModification`].
    pub fn cursor(&self) -> Cursor {
        Cursor {
            position: 0,
            expected_modifications: self.modifications,
        }
    }

    /// Consume the queue, returning its elements in ascending priority order.
    pub fn into_vec(self) -> Vec<T> {
        self.entries.into_iter().map(|e| e.element).collect()
    }
}

impl<T> IntoIterator for BoundedPriorityQueue<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

/// A one-shot, fail-fast position into a [`BoundedPriorityQueue`].
///
/// The cursor remembers the queue's modification count at creation and rechecks it on every
/// step.
#[derive(Debug, Clone)]
pub struct Cursor {
    position: usize,
    expected_modifications: u64,
}

impl Cursor {
    /// Advance the cursor, returning the next element in ascending priority order or `None` once
    /// the contents are exhausted.
    pub fn next<'a, T>(&mut self, queue: &'a BoundedPriorityQueue<T>) -> Result<Option<&'a T>> {
        if queue.modifications != self.expected_modifications {
            return Err(SpatialIndexError::ConcurrentModification);
        }
        let item = queue.entries.get(self.position).map(|e| &e.element);
        if item.is_some() {
            self.position += 1;
        }
        Ok(item)
    }
}
