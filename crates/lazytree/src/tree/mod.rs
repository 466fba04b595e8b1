use crate::{Error, Span, Value};
use core::{cmp, fmt, ops::RangeBounds};
use log::{debug, trace};

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

cfg_profiler! {
    mod stats;
    pub use stats::{OpStats, Stats};
    use minstant::Instant;
    use stats::Op;
}

/// Heap index of the root node
const ROOT: usize = 1;

/// Number of heap slots reserved for an array of `len` values: `2 * 2^(ceil(log2(len)) + 1)`
#[inline]
const fn heap_capacity(len: usize) -> usize {
    2 * (len.next_power_of_two() << 1)
}

/// A node of the implicit heap covering the positions of `span`
#[derive(Default, Debug, Clone, Copy)]
struct Node<T: Value> {
    span: Span,
    sum: T::Sum,
    min: T,
    /// Every position of `span` equals this value but the children have not been told yet.
    ///
    /// Never set on leaves.
    pending: Option<T>,
}

/// An array-backed segment tree answering range sum and range minimum queries
/// under range-assignment updates.
///
/// Nodes live in an implicit binary heap with the root at index `1` and the
/// children of node `v` at `2v` and `2v + 1`. Each node caches the sum and minimum
/// of its range. A range update stops at nodes whose range it fully covers and
/// marks them with a pending value; the pending value is pushed one level down
/// only when a later query or update needs to look inside that node.
///
/// Queries take `&mut self` since they may push pending values down.
///
/// # Example
///
/// ```
/// use lazytree::SegmentTree;
///
/// let mut tree = SegmentTree::new(&[5u32, 3, 8, 1]).unwrap();
/// assert_eq!(tree.range_min(..), Ok(1));
///
/// tree.update(1..3, 0).unwrap();
/// assert_eq!(tree.range_sum(..), Ok(6));
/// assert_eq!(tree.range_min(2..), Ok(0));
/// assert_eq!(tree.to_vec(), vec![5, 0, 0, 1]);
/// ```
///
/// With the `serde` feature the tree is serialized as its current values and
/// rebuilt through [SegmentTree::from_vec] when deserialized.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound = "T: Value", into = "Vec<T>", try_from = "Vec<T>")
)]
#[derive(Clone)]
pub struct SegmentTree<T: Value> {
    /// Private copy of the input array.
    ///
    /// Only leaf positions and the leftmost position of lazily changed nodes are
    /// kept current. Use [SegmentTree::to_vec] to observe the logical array.
    values: Vec<T>,
    heap: Vec<Node<T>>,
    #[cfg(feature = "profiler")]
    stats: Stats,
    /// Heap nodes visited by the running operation
    #[cfg(feature = "profiler")]
    visits: u64,
}

impl<T: Value> SegmentTree<T> {
    /// Builds a tree over a copy of the given values
    ///
    /// Returns [Error::Empty] if `values` is empty.
    pub fn new(values: &[T]) -> Result<Self, Error> {
        Self::from_vec(values.to_vec())
    }

    /// Builds a tree that takes ownership of the given values
    ///
    /// Returns [Error::Empty] if `values` is empty.
    pub fn from_vec(values: Vec<T>) -> Result<Self, Error> {
        if values.is_empty() {
            return Err(Error::Empty);
        }
        let len = values.len();
        let capacity = heap_capacity(len);
        let mut heap = Vec::with_capacity(capacity);
        heap.resize(capacity, Node::default());

        let mut tree = Self {
            values,
            heap,
            #[cfg(feature = "profiler")]
            stats: Stats::default(),
            #[cfg(feature = "profiler")]
            visits: 0,
        };
        #[cfg(feature = "profiler")]
        let start = tree.begin_op();
        tree.build(ROOT, 0, len);
        #[cfg(feature = "profiler")]
        tree.end_op(Op::Build, start);
        debug!("built segment tree over {len} values using {capacity} heap slots");
        Ok(tree)
    }

    /// Returns the number of values in the tree
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the tree holds no values
    ///
    /// A constructed tree always holds at least one value.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the number of heap slots allocated for nodes
    #[inline]
    pub fn capacity(&self) -> usize {
        self.heap.len()
    }

    /// Returns the sum of all values in `O(1)`
    #[inline]
    pub fn sum(&self) -> T::Sum {
        self.heap[ROOT].sum
    }

    /// Returns the minimum of all values in `O(1)`
    #[inline]
    pub fn min(&self) -> T {
        self.heap[ROOT].min
    }

    /// Returns the sum of the values within `range`
    ///
    /// Fails with [Error::InvalidRange] if the range is empty or out of bounds.
    pub fn range_sum<R>(&mut self, range: R) -> Result<T::Sum, Error>
    where
        R: RangeBounds<usize>,
    {
        let query = Span::from_range(range, self.len())?;
        #[cfg(feature = "profiler")]
        let start = self.begin_op();
        let sum = self.sum_at(ROOT, &query);
        #[cfg(feature = "profiler")]
        self.end_op(Op::RangeSum, start);
        Ok(sum)
    }

    /// Returns the minimum of the values within `range`
    ///
    /// Fails with [Error::InvalidRange] if the range is empty or out of bounds.
    pub fn range_min<R>(&mut self, range: R) -> Result<T, Error>
    where
        R: RangeBounds<usize>,
    {
        let query = Span::from_range(range, self.len())?;
        #[cfg(feature = "profiler")]
        let start = self.begin_op();
        let min = self.min_at(ROOT, &query);
        #[cfg(feature = "profiler")]
        self.end_op(Op::RangeMin, start);
        Ok(min)
    }

    /// Assigns `value` to every position within `range`
    ///
    /// Fails with [Error::InvalidRange] if the range is empty or out of bounds,
    /// in which case the tree is left untouched.
    pub fn update<R>(&mut self, range: R, value: T) -> Result<(), Error>
    where
        R: RangeBounds<usize>,
    {
        let span = Span::from_range(range, self.len())?;
        trace!("assigning {:?} to {}..={}", value, span.from(), span.to());
        #[cfg(feature = "profiler")]
        let start = self.begin_op();
        self.update_at(ROOT, &span, value);
        #[cfg(feature = "profiler")]
        self.end_op(Op::Update, start);
        Ok(())
    }

    /// Returns the value at `index`
    #[inline]
    pub fn get(&mut self, index: usize) -> Result<T, Error> {
        self.range_min(index..=index)
    }

    /// Assigns `value` to the position at `index`
    #[inline]
    pub fn set(&mut self, index: usize, value: T) -> Result<(), Error> {
        self.update(index..=index, value)
    }

    /// Returns the current values of the array
    ///
    /// Pushes every pending value down to the leaves first, which costs `O(n)`.
    pub fn to_vec(&mut self) -> Vec<T> {
        self.reconcile_all();
        self.values.clone()
    }

    /// Consumes the tree and returns the current values of the array
    pub fn into_vec(mut self) -> Vec<T> {
        self.reconcile_all();
        self.values
    }

    /// Returns latency and node-visit stats of the tree operations
    #[cfg(feature = "profiler")]
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    #[cfg(feature = "profiler")]
    #[inline]
    fn begin_op(&mut self) -> Instant {
        self.visits = 0;
        Instant::now()
    }

    #[cfg(feature = "profiler")]
    #[inline]
    fn end_op(&mut self, op: Op, start: Instant) {
        let visits = self.visits;
        self.stats.op_mut(op).record(start.elapsed(), visits);
    }

    #[inline(always)]
    fn visit(&mut self) {
        #[cfg(feature = "profiler")]
        {
            self.visits += 1;
        }
    }

    fn reconcile_all(&mut self) {
        #[cfg(feature = "profiler")]
        let start = self.begin_op();
        self.reconcile(ROOT);
        #[cfg(feature = "profiler")]
        self.end_op(Op::Reconcile, start);
        debug!("reconciled {} values", self.len());
    }

    fn build(&mut self, v: usize, from: usize, size: usize) {
        self.visit();
        let span = Span::new_unchecked(from, from + size - 1);
        if size == 1 {
            let value = self.values[from];
            self.heap[v] = Node {
                span,
                sum: value.lift(),
                min: value,
                pending: None,
            };
        } else {
            let half = size / 2;
            self.build(2 * v, from, half);
            self.build(2 * v + 1, from + half, size - half);
            self.heap[v].span = span;
            self.pull(v);
        }
    }

    /// Recomputes the aggregates of `v` from its children
    #[inline]
    fn pull(&mut self, v: usize) {
        let (left, right) = (self.heap[2 * v], self.heap[2 * v + 1]);
        let node = &mut self.heap[v];
        node.sum = left.sum + right.sum;
        node.min = cmp::min(left.min, right.min);
    }

    /// Makes every position of node `v` logically equal to `value`
    #[inline]
    fn change(&mut self, v: usize, value: T) {
        let node = &mut self.heap[v];
        if !node.span.is_unit() {
            node.pending = Some(value);
        }
        node.sum = value.scale(node.span.len());
        node.min = value;
        self.values[node.span.from()] = value;
    }

    /// Pushes the pending value of `v` one level down
    #[inline]
    fn propagate(&mut self, v: usize) {
        if let Some(value) = self.heap[v].pending {
            trace!("propagating {:?} below node {}", value, v);
            self.change(2 * v, value);
            self.change(2 * v + 1, value);
            self.heap[v].pending = None;
        }
    }

    fn sum_at(&mut self, v: usize, query: &Span) -> T::Sum {
        self.visit();
        let node = self.heap[v];
        match node.pending {
            Some(value) if node.span.contains(query) => value.scale(query.len()),
            _ if query.contains(&node.span) => node.sum,
            _ if node.span.intersects(query) => {
                self.propagate(v);
                self.sum_at(2 * v, query) + self.sum_at(2 * v + 1, query)
            }
            _ => T::ZERO,
        }
    }

    fn min_at(&mut self, v: usize, query: &Span) -> T {
        self.visit();
        let node = self.heap[v];
        match node.pending {
            Some(value) if node.span.contains(query) => value,
            _ if query.contains(&node.span) => node.min,
            _ if node.span.intersects(query) => {
                self.propagate(v);
                cmp::min(self.min_at(2 * v, query), self.min_at(2 * v + 1, query))
            }
            _ => T::MAX,
        }
    }

    fn update_at(&mut self, v: usize, span: &Span, value: T) {
        self.visit();
        let node = self.heap[v];
        if span.contains(&node.span) {
            self.change(v, value);
        } else if !node.span.is_unit() && node.span.intersects(span) {
            self.propagate(v);
            self.update_at(2 * v, span, value);
            self.update_at(2 * v + 1, span, value);
            self.pull(v);
        }
    }

    fn reconcile(&mut self, v: usize) {
        self.visit();
        if self.heap[v].span.is_unit() {
            return;
        }
        self.propagate(v);
        self.reconcile(2 * v);
        self.reconcile(2 * v + 1);
    }
}

impl<T: Value> fmt::Debug for SegmentTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentTree")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("sum", &self.sum())
            .field("min", &self.min())
            .finish()
    }
}

impl<T: Value> TryFrom<&[T]> for SegmentTree<T> {
    type Error = Error;

    fn try_from(values: &[T]) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl<T: Value> TryFrom<Vec<T>> for SegmentTree<T> {
    type Error = Error;

    fn try_from(values: Vec<T>) -> Result<Self, Self::Error> {
        Self::from_vec(values)
    }
}

impl<T: Value> From<SegmentTree<T>> for Vec<T> {
    fn from(tree: SegmentTree<T>) -> Self {
        tree.into_vec()
    }
}
