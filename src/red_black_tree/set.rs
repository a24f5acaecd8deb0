use crate::error::{Error, InvariantViolation, Result};
use crate::red_black_tree::iter::{RedBlackSetIntoIter, RedBlackSetIter};
use crate::red_black_tree::{rank, tree};
use log::{debug, error, trace};
use serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;
use std::marker::PhantomData;
use std::ops::{Bound, Index, RangeBounds};
use std::result;

/// An ordered set or multiset implemented using a red black tree whose nodes track the size of
/// their subtrees.
///
/// A red black tree is a self-balancing binary search tree. Every node is colored red or black,
/// no red node has a red child, and every path from a node down to an empty subtree passes through
/// the same number of black nodes. Together these keep the height of the tree within a factor of
/// two of the optimum.
///
/// Because every node also knows how many values its subtree holds, the set can fetch, remove and
/// find the position of a value by its rank in sorted order in `O(log N)` time.
///
/// Values inserted with `insert` are rejected if an equal value is already present. Values inserted
/// with `insert_multi` are always added, after any equal values already in the set.
///
/// # Examples
///
/// ```
/// use ranked_collections::red_black_tree::RedBlackSet;
///
/// let mut set = RedBlackSet::new();
/// set.insert(0);
/// set.insert(3);
/// set.insert_multi(3);
///
/// assert_eq!(set.len(), 3);
/// assert_eq!(set.get(1), Ok(&3));
/// assert_eq!(set.rank(&3), Some(1));
///
/// assert_eq!(set.first(), Some(&0));
/// assert_eq!(set.ceil(&2), Some(&3));
///
/// assert!(set.remove(&0));
/// assert!(!set.remove(&1));
/// assert_eq!(set.remove_by_index(1), Ok(3));
/// ```
#[derive(Clone)]
pub struct RedBlackSet<T> {
    tree: tree::Tree<T>,
}

impl<T> RedBlackSet<T> {
    /// Constructs a new, empty `RedBlackSet<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::new();
    /// ```
    pub fn new() -> Self {
        RedBlackSet { tree: None }
    }

    /// Inserts a value into the set. If an equal value already exists in the set, the set is left
    /// unchanged and `false` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// assert!(set.insert(1));
    /// assert!(!set.insert(1));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool
    where
        T: Ord,
    {
        let inserted = tree::insert(&mut self.tree, value, false);
        if !inserted {
            trace!("rejected insert of a value already in the set");
        }
        inserted
    }

    /// Inserts a value into the set even if equal values already exist. The new value is placed
    /// after all equal values in sorted order. Always returns `true`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// assert!(set.insert_multi(1));
    /// assert!(set.insert_multi(1));
    /// assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &1]);
    /// ```
    pub fn insert_multi(&mut self, value: T) -> bool
    where
        T: Ord,
    {
        tree::insert(&mut self.tree, value, true)
    }

    /// Removes a value from the set. Returns `true` if a value was removed. If the set holds
    /// several values equal to `value`, one of them is removed; use `remove_by_index` to choose
    /// which.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert!(set.remove(&1));
    /// assert!(!set.remove(&1));
    /// ```
    pub fn remove<V>(&mut self, value: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let removed = tree::remove(&mut self.tree, value).is_some();
        if !removed {
            trace!("remove found no matching value");
        }
        removed
    }

    /// Removes the value at a particular index in sorted order and returns it.
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfRange` if `index` is not less than the length of the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_collections::Error;
    /// use ranked_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(5);
    /// set.insert(3);
    /// assert_eq!(set.remove_by_index(1), Ok(5));
    /// assert_eq!(set.remove_by_index(1), Err(Error::OutOfRange { index: 1, len: 1 }));
    /// ```
    pub fn remove_by_index(&mut self, index: usize) -> Result<T> {
        let len = self.len();
        tree::remove_at(&mut self.tree, index).ok_or_else(|| out_of_range(index, len))
    }

    /// Removes and returns the smallest value in the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(2);
    /// assert_eq!(set.pop_first(), Some(1));
    /// assert_eq!(set.pop_first(), Some(2));
    /// assert_eq!(set.pop_first(), None);
    /// ```
    pub fn pop_first(&mut self) -> Option<T> {
        tree::remove_at(&mut self.tree, 0)
    }

    /// Removes and returns the largest value in the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(2);
    /// assert_eq!(set.pop_last(), Some(2));
    /// assert_eq!(set.pop_last(), Some(1));
    /// assert_eq!(set.pop_last(), None);
    /// ```
    pub fn pop_last(&mut self) -> Option<T> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        tree::remove_at(&mut self.tree, len - 1)
    }

    /// Checks if a value exists in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains<V>(&self, value: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::get(&self.tree, value).is_some()
    }

    /// Returns a reference to the value at a particular index in sorted order.
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfRange` if `index` is not less than the length of the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_collections::Error;
    /// use ranked_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(3);
    /// set.insert(1);
    /// assert_eq!(set.get(0), Ok(&1));
    /// assert_eq!(set.get(1), Ok(&3));
    /// assert_eq!(set.get(2), Err(Error::OutOfRange { index: 2, len: 2 }));
    /// ```
    pub fn get(&self, index: usize) -> Result<&T> {
        rank::select(&self.tree, index).ok_or_else(|| out_of_range(index, self.len()))
    }

    /// Returns the index in sorted order of the first value equal to `value`, or `None` if no such
    /// value exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert_multi(2);
    /// set.insert_multi(2);
    /// assert_eq!(set.rank(&2), Some(1));
    /// assert_eq!(set.rank(&3), None);
    /// ```
    pub fn rank<V>(&self, value: &V) -> Option<usize>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        rank::rank(&self.tree, value)
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        rank::len(&self.tree)
    }

    /// Returns `true` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.tree.is_none()
    }

    /// Clears the set, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(2);
    /// set.clear();
    /// assert_eq!(set.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree = None;
    }

    /// Returns a value in the set that is less than or equal to a particular value. Returns `None`
    /// if such a value does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.floor(&0), None);
    /// assert_eq!(set.floor(&2), Some(&1));
    /// ```
    pub fn floor<V>(&self, value: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::floor(&self.tree, value)
    }

    /// Returns a value in the set that is greater than or equal to a particular value. Returns
    /// `None` if such a value does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.ceil(&0), Some(&1));
    /// assert_eq!(set.ceil(&2), None);
    /// ```
    pub fn ceil<V>(&self, value: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::ceil(&self.tree, value)
    }

    /// Returns the first value of the set in sorted order, which is its minimum. Returns `None` if
    /// the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.first(), Some(&1));
    /// ```
    pub fn first(&self) -> Option<&T> {
        tree::min(&self.tree)
    }

    /// Returns the last value of the set in sorted order, which is its maximum. Returns `None` if
    /// the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.last(), Some(&3));
    /// ```
    pub fn last(&self) -> Option<&T> {
        tree::max(&self.tree)
    }

    /// Returns an iterator over the set. The iterator will yield values using in-order traversal,
    /// or reverse in-order traversal when reversed.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    ///
    /// assert_eq!(set.iter().rev().collect::<Vec<&u32>>(), vec![&3, &1]);
    /// ```
    pub fn iter(&self) -> RedBlackSetIter<'_, T> {
        RedBlackSetIter::new(&self.tree)
    }

    /// Returns an iterator over the values whose indices in sorted order fall in `range`. Unbounded
    /// ends run to the start or the end of the set.
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfRange` if the range ends past the length of the set, and
    /// `Error::InvalidRange` if it starts after it ends.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_collections::Error;
    /// use ranked_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = vec![5, 1, 4, 2, 3].into_iter().collect();
    /// assert_eq!(
    ///     set.range_by_index(1..3).unwrap().collect::<Vec<&u32>>(),
    ///     vec![&2, &3],
    /// );
    /// assert_eq!(
    ///     set.range_by_index(3..).unwrap().rev().collect::<Vec<&u32>>(),
    ///     vec![&5, &4],
    /// );
    /// assert_eq!(
    ///     set.range_by_index(..6).err(),
    ///     Some(Error::OutOfRange { index: 6, len: 5 }),
    /// );
    /// ```
    pub fn range_by_index<R>(&self, range: R) -> Result<RedBlackSetIter<'_, T>>
    where
        R: RangeBounds<usize>,
    {
        let (start, end) = resolve_range(&range, self.len())?;
        Ok(RedBlackSetIter::with_range(&self.tree, start, end))
    }

    /// Removes the values whose indices in sorted order fall in `range` and returns them in
    /// sorted order. The set is left unchanged if the range is rejected.
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfRange` if the range ends past the length of the set, and
    /// `Error::InvalidRange` if it starts after it ends.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set: RedBlackSet<u32> = vec![5, 1, 4, 2, 3].into_iter().collect();
    /// assert_eq!(set.remove_range(1..=2), Ok(vec![2, 3]));
    /// assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &4, &5]);
    /// ```
    pub fn remove_range<R>(&mut self, range: R) -> Result<Vec<T>>
    where
        R: RangeBounds<usize>,
    {
        let (start, end) = resolve_range(&range, self.len())?;
        let mut removed = Vec::with_capacity(end - start);
        for index in (start..end).rev() {
            if let Some(value) = tree::remove_at(&mut self.tree, index) {
                removed.push(value);
            }
        }
        removed.reverse();
        Ok(removed)
    }

    /// Retains only the values for which `keep` returns `true`. `keep` is called once for every
    /// value, in sorted order, and equal values that survive keep their relative order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set: RedBlackSet<u32> = (0..10).collect();
    /// set.retain(|value| value % 3 == 0);
    /// assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&0, &3, &6, &9]);
    /// ```
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        let mut index = 0;
        loop {
            let kept = match rank::select(&self.tree, index) {
                Some(value) => keep(value),
                None => break,
            };
            if kept {
                index += 1;
            } else {
                tree::remove_at(&mut self.tree, index);
            }
        }
    }

    /// Inserts every value of an iterator into the set, keeping duplicates.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.extend_multi(vec![2, 1, 2]);
    /// assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &2, &2]);
    /// ```
    pub fn extend_multi<I>(&mut self, iter: I)
    where
        T: Ord,
        I: IntoIterator<Item = T>,
    {
        for value in iter {
            self.insert_multi(value);
        }
    }

    /// Checks the red black, ordering and size invariants of the underlying tree. Returns the
    /// number of black nodes on every path from the root to an empty subtree.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = (0..100).collect();
    /// assert!(set.validate().is_ok());
    /// ```
    pub fn validate(&self) -> result::Result<usize, InvariantViolation>
    where
        T: Ord,
    {
        tree::validate(&self.tree).map_err(|violation| {
            error!("red black tree invariant violated: {}", violation);
            violation
        })
    }
}

impl<T> RedBlackSet<T>
where
    T: Clone + Ord,
{
    /// Returns a new set with every distinct value that is in either set.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_collections::red_black_tree::RedBlackSet;
    ///
    /// let a: RedBlackSet<u32> = vec![1, 2].into_iter().collect();
    /// let b: RedBlackSet<u32> = vec![2, 3].into_iter().collect();
    /// assert_eq!(a.union(&b).iter().collect::<Vec<&u32>>(), vec![&1, &2, &3]);
    /// ```
    pub fn union(&self, other: &Self) -> Self {
        self.iter().chain(other.iter()).cloned().collect()
    }

    /// Returns a new set with the distinct values of this set that are not in `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_collections::red_black_tree::RedBlackSet;
    ///
    /// let a: RedBlackSet<u32> = vec![1, 2].into_iter().collect();
    /// let b: RedBlackSet<u32> = vec![2, 3].into_iter().collect();
    /// assert_eq!(a.difference(&b).iter().collect::<Vec<&u32>>(), vec![&1]);
    /// ```
    pub fn difference(&self, other: &Self) -> Self {
        self.iter()
            .filter(|value| !other.contains(*value))
            .cloned()
            .collect()
    }

    /// Returns a new set with the values that are in both sets.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_collections::red_black_tree::RedBlackSet;
    ///
    /// let a: RedBlackSet<u32> = vec![1, 2].into_iter().collect();
    /// let b: RedBlackSet<u32> = vec![2, 3].into_iter().collect();
    /// assert_eq!(a.intersection(&b).iter().collect::<Vec<&u32>>(), vec![&2]);
    /// ```
    pub fn intersection(&self, other: &Self) -> Self {
        let mut ret = RedBlackSet::new();
        let mut self_iter = self.iter().peekable();
        let mut other_iter = other.iter().peekable();
        loop {
            let order = match (self_iter.peek(), other_iter.peek()) {
                (Some(a), Some(b)) => a.cmp(b),
                _ => break,
            };
            match order {
                Ordering::Less => {
                    self_iter.next();
                },
                Ordering::Greater => {
                    other_iter.next();
                },
                Ordering::Equal => {
                    if let Some(value) = self_iter.next() {
                        ret.insert(value.clone());
                    }
                    other_iter.next();
                },
            }
        }
        ret
    }

    /// Returns a new set with the values that are in exactly one of the two sets.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_collections::red_black_tree::RedBlackSet;
    ///
    /// let a: RedBlackSet<u32> = vec![1, 2].into_iter().collect();
    /// let b: RedBlackSet<u32> = vec![2, 3].into_iter().collect();
    /// assert_eq!(
    ///     a.symmetric_difference(&b).iter().collect::<Vec<&u32>>(),
    ///     vec![&1, &3],
    /// );
    /// ```
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        let mut ret = RedBlackSet::new();
        let mut self_iter = self.iter().peekable();
        let mut other_iter = other.iter().peekable();
        loop {
            let order = match (self_iter.peek(), other_iter.peek()) {
                (Some(a), Some(b)) => a.cmp(b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => break,
            };
            let next = match order {
                Ordering::Less => self_iter.next(),
                Ordering::Greater => other_iter.next(),
                Ordering::Equal => {
                    self_iter.next();
                    other_iter.next();
                    continue;
                },
            };
            if let Some(value) = next {
                ret.insert(value.clone());
            }
        }
        ret
    }
}

fn out_of_range(index: usize, len: usize) -> Error {
    debug!("index {} out of range for length {}", index, len);
    Error::OutOfRange { index, len }
}

fn invalid_range(start: usize, end: usize) -> Error {
    debug!("index range starts at {} but ends at {}", start, end);
    Error::InvalidRange { start, end }
}

// Turns `range` into half-open `(start, end)` positions with `start <= end <= len`.
fn resolve_range<R>(range: &R, len: usize) -> Result<(usize, usize)>
where
    R: RangeBounds<usize>,
{
    let end = match range.end_bound() {
        Bound::Included(&end) => end.checked_add(1),
        Bound::Excluded(&end) => Some(end),
        Bound::Unbounded => Some(len),
    }
    .ok_or_else(|| out_of_range(usize::max_value(), len))?;
    let start = match range.start_bound() {
        Bound::Included(&start) => Some(start),
        Bound::Excluded(&start) => start.checked_add(1),
        Bound::Unbounded => Some(0),
    }
    .ok_or_else(|| invalid_range(usize::max_value(), end))?;

    if start > end {
        return Err(invalid_range(start, end));
    }
    if end > len {
        return Err(out_of_range(end, len));
    }
    Ok((start, end))
}

impl<T> IntoIterator for RedBlackSet<T> {
    type IntoIter = RedBlackSetIntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        RedBlackSetIntoIter::new(self.tree)
    }
}

impl<'a, T> IntoIterator for &'a RedBlackSet<T>
where
    T: 'a,
{
    type IntoIter = RedBlackSetIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Default for RedBlackSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for RedBlackSet<T>
where
    T: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T> Extend<&'a T> for RedBlackSet<T>
where
    T: 'a + Copy + Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = &'a T>,
    {
        self.extend(iter.into_iter().cloned());
    }
}

impl<T> FromIterator<T> for RedBlackSet<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = RedBlackSet::new();
        set.extend(iter);
        set
    }
}

/// Indexes into the set by rank.
///
/// # Panics
///
/// Panics if `index` is not less than the length of the set.
impl<T> Index<usize> for RedBlackSet<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        match self.get(index) {
            Ok(value) => value,
            Err(err) => panic!("{}", err),
        }
    }
}

impl<T> fmt::Debug for RedBlackSet<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> PartialEq for RedBlackSet<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T> Eq for RedBlackSet<T> where T: Eq {}

// Shorter sets order first; sets of equal length compare their values in sorted order.
impl<T> PartialOrd for RedBlackSet<T>
where
    T: Ord,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for RedBlackSet<T>
where
    T: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.iter().cmp(other.iter()))
    }
}

impl<T> Hash for RedBlackSet<T>
where
    T: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for value in self {
            value.hash(state);
        }
    }
}

impl<T> Serialize for RedBlackSet<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

struct RedBlackSetVisitor<T> {
    marker: PhantomData<T>,
}

impl<'de, T> Visitor<'de> for RedBlackSetVisitor<T>
where
    T: Deserialize<'de> + Ord,
{
    type Value = RedBlackSet<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> result::Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut set = RedBlackSet::new();
        while let Some(value) = seq.next_element()? {
            set.insert_multi(value);
        }
        Ok(set)
    }
}

// Deserializing keeps duplicates so that a multiset survives a round trip.
impl<'de, T> Deserialize<'de> for RedBlackSet<T>
where
    T: Deserialize<'de> + Ord,
{
    fn deserialize<D>(deserializer: D) -> result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(RedBlackSetVisitor {
            marker: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::RedBlackSet;
    use crate::error::Error;
    use crate::red_black_tree::RedBlackSetIter;
    use serde_test::{assert_de_tokens, assert_tokens, Token};
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn contents(set: &RedBlackSet<u32>) -> Vec<u32> {
        set.iter().cloned().collect()
    }

    fn range(iter: RedBlackSetIter<'_, u32>) -> Vec<u32> {
        iter.cloned().collect()
    }

    #[test]
    fn test_len_empty() {
        let set: RedBlackSet<u32> = RedBlackSet::new();
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_is_empty() {
        let set: RedBlackSet<u32> = RedBlackSet::new();
        assert!(set.is_empty());
    }

    #[test]
    fn test_first_last_empty() {
        let set: RedBlackSet<u32> = RedBlackSet::new();
        assert_eq!(set.first(), None);
        assert_eq!(set.last(), None);
    }

    #[test]
    fn test_insert() {
        let mut set = RedBlackSet::new();
        assert!(set.insert(1));
        assert!(set.contains(&1));
    }

    #[test]
    fn test_insert_rejected() {
        let mut set = RedBlackSet::new();
        assert!(set.insert(1));
        assert!(!set.insert(1));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_multiset_sequence() {
        let mut set = RedBlackSet::new();
        assert!(set.insert(2));
        assert_eq!(contents(&set), vec![2]);
        assert!(!set.insert(2));
        assert_eq!(contents(&set), vec![2]);
        assert!(set.insert_multi(2));
        assert_eq!(contents(&set), vec![2, 2]);
        assert!(set.insert_multi(1));
        assert_eq!(contents(&set), vec![1, 2, 2]);
        assert!(set.insert_multi(1));
        assert_eq!(contents(&set), vec![1, 1, 2, 2]);
        assert!(set.remove(&1));
        assert_eq!(contents(&set), vec![1, 2, 2]);
        assert!(set.remove(&2));
        assert_eq!(contents(&set), vec![1, 2]);
        assert!(set.validate().is_ok());
    }

    #[test]
    fn test_remove() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        assert!(set.remove(&1));
        assert!(!set.contains(&1));
    }

    #[test]
    fn test_get_out_of_range() {
        let mut set = RedBlackSet::new();
        assert_eq!(set.get(0), Err(Error::OutOfRange { index: 0, len: 0 }));
        assert_eq!(
            set.remove_by_index(0),
            Err(Error::OutOfRange { index: 0, len: 0 }),
        );
        set.insert(1);
        assert_eq!(set.get(0), Ok(&1));
        assert_eq!(set.get(1), Err(Error::OutOfRange { index: 1, len: 1 }));
        assert_eq!(
            set.get(usize::max_value()),
            Err(Error::OutOfRange {
                index: usize::max_value(),
                len: 1,
            }),
        );
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_index() {
        let set: RedBlackSet<u32> = vec![3, 1, 2].into_iter().collect();
        assert_eq!(set[0], 1);
        assert_eq!(set[2], 3);
    }

    #[test]
    #[should_panic(expected = "index out of range")]
    fn test_index_out_of_range() {
        let set: RedBlackSet<u32> = RedBlackSet::new();
        let _ = set[0];
    }

    #[test]
    fn test_range_by_index() {
        let set: RedBlackSet<u32> = (0..10).map(|i| i * 10).collect();

        assert_eq!(range(set.range_by_index(2..5).unwrap()), vec![20, 30, 40]);
        assert_eq!(range(set.range_by_index(2..=5).unwrap()), vec![20, 30, 40, 50]);
        assert_eq!(range(set.range_by_index(..2).unwrap()), vec![0, 10]);
        assert_eq!(range(set.range_by_index(8..).unwrap()), vec![80, 90]);
        assert_eq!(range(set.range_by_index(..).unwrap()), contents(&set));
        assert_eq!(range(set.range_by_index(4..4).unwrap()), Vec::<u32>::new());
        assert_eq!(range(set.range_by_index(10..).unwrap()), Vec::<u32>::new());
        assert_eq!(set.range_by_index(3..7).unwrap().len(), 4);
        assert_eq!(
            set.range_by_index(3..7).unwrap().rev().cloned().collect::<Vec<u32>>(),
            vec![60, 50, 40, 30],
        );
    }

    #[test]
    fn test_range_by_index_rejected() {
        let set: RedBlackSet<u32> = (0..10).collect();
        assert_eq!(
            set.range_by_index(5..11).err(),
            Some(Error::OutOfRange { index: 11, len: 10 }),
        );
        assert_eq!(
            set.range_by_index(..=10).err(),
            Some(Error::OutOfRange { index: 11, len: 10 }),
        );
        assert_eq!(
            set.range_by_index(11..).err(),
            Some(Error::InvalidRange { start: 11, end: 10 }),
        );
        assert_eq!(
            set.range_by_index(6..3).err(),
            Some(Error::InvalidRange { start: 6, end: 3 }),
        );
        assert_eq!(
            set.range_by_index(..=usize::max_value()).err(),
            Some(Error::OutOfRange {
                index: usize::max_value(),
                len: 10,
            }),
        );

        let empty: RedBlackSet<u32> = RedBlackSet::new();
        assert_eq!(empty.range_by_index(..).unwrap().next(), None);
        assert_eq!(
            empty.range_by_index(0..1).err(),
            Some(Error::OutOfRange { index: 1, len: 0 }),
        );
    }


    #[test]
    fn test_remove_range() {
        let mut set: RedBlackSet<u32> = (0..10).collect();
        assert_eq!(set.remove_range(2..5), Ok(vec![2, 3, 4]));
        assert_eq!(contents(&set), vec![0, 1, 5, 6, 7, 8, 9]);
        assert_eq!(set.remove_range(3..3), Ok(vec![]));
        assert_eq!(set.remove_range(5..), Ok(vec![8, 9]));
        assert_eq!(set.remove_range(..1), Ok(vec![0]));
        assert_eq!(contents(&set), vec![1, 5, 6, 7]);
        assert!(set.validate().is_ok());
        assert_eq!(set.remove_range(..), Ok(vec![1, 5, 6, 7]));
        assert!(set.is_empty());
        assert_eq!(set.remove_range(..), Ok(vec![]));
    }

    #[test]
    fn test_remove_range_rejected_leaves_set_unchanged() {
        let mut set: RedBlackSet<u32> = (0..5).collect();
        assert_eq!(
            set.remove_range(3..6),
            Err(Error::OutOfRange { index: 6, len: 5 }),
        );
        assert_eq!(
            set.remove_range(6..),
            Err(Error::InvalidRange { start: 6, end: 5 }),
        );
        assert_eq!(contents(&set), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_remove_range_with_duplicates() {
        let mut set = RedBlackSet::new();
        set.extend_multi(vec![2, 1, 2, 2, 3, 1]);
        assert_eq!(set.remove_range(1..4), Ok(vec![1, 2, 2]));
        assert_eq!(contents(&set), vec![1, 2, 3]);
        assert!(set.validate().is_ok());
    }

    #[test]
    fn test_retain() {
        let mut set: RedBlackSet<u32> = (0..100).collect();
        let mut seen = Vec::new();
        set.retain(|value| {
            seen.push(*value);
            value % 7 == 0
        });
        assert_eq!(seen, (0..100).collect::<Vec<u32>>());
        assert_eq!(contents(&set), (0..100).filter(|v| v % 7 == 0).collect::<Vec<u32>>());
        assert!(set.validate().is_ok());

        set.retain(|_| true);
        assert_eq!(set.len(), 15);
        set.retain(|_| false);
        assert!(set.is_empty());
        set.retain(|_| panic!("called on an empty set"));
    }

    #[test]
    fn test_retain_with_duplicates() {
        let mut set = RedBlackSet::new();
        set.extend_multi(vec![3, 1, 3, 2, 1, 3]);
        let mut count = 0;
        set.retain(|value| {
            count += 1;
            *value != 1
        });
        assert_eq!(count, 6);
        assert_eq!(contents(&set), vec![2, 3, 3, 3]);
        assert!(set.validate().is_ok());
    }

    #[test]
    fn test_pop_first_last() {
        let mut set: RedBlackSet<u32> = vec![3, 1, 2].into_iter().collect();
        assert_eq!(set.pop_first(), Some(1));
        assert_eq!(set.pop_last(), Some(3));
        assert_eq!(set.pop_last(), Some(2));
        assert_eq!(set.pop_last(), None);
        assert_eq!(set.pop_first(), None);
    }

    #[test]
    fn test_first_last() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        set.insert(3);
        set.insert(5);

        assert_eq!(set.first(), Some(&1));
        assert_eq!(set.last(), Some(&5));
    }

    #[test]
    fn test_first_last_on_owned_sets() {
        let a: RedBlackSet<u32> = vec![5, 6].into_iter().collect();
        let b: RedBlackSet<u32> = vec![1].into_iter().collect();
        assert_eq!(a.first(), Some(&5));
        assert_eq!(b.last(), Some(&1));
        // `Ord::min` compares whole sets, shorter first
        assert_eq!(contents(&a.clone().min(b.clone())), vec![1]);
        assert_eq!(contents(&a.max(b)), vec![5, 6]);
    }

    #[test]
    fn test_floor_ceil() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        set.insert(3);
        set.insert(5);

        assert_eq!(set.floor(&0), None);
        assert_eq!(set.floor(&2), Some(&1));
        assert_eq!(set.floor(&4), Some(&3));
        assert_eq!(set.floor(&6), Some(&5));

        assert_eq!(set.ceil(&0), Some(&1));
        assert_eq!(set.ceil(&2), Some(&3));
        assert_eq!(set.ceil(&4), Some(&5));
        assert_eq!(set.ceil(&6), None);
    }

    #[test]
    fn test_into_iter() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        set.insert(5);
        set.insert(3);

        assert_eq!(set.into_iter().collect::<Vec<u32>>(), vec![1, 3, 5]);
    }

    #[test]
    fn test_iter() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        set.insert(5);
        set.insert(3);

        assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &3, &5]);
        assert_eq!(set.iter().rev().collect::<Vec<&u32>>(), vec![&5, &3, &1]);
    }

    #[test]
    fn test_extend() {
        let mut set = RedBlackSet::new();
        set.extend(vec![2, 1, 2]);
        assert_eq!(contents(&set), vec![1, 2]);
        set.extend(&[3, 3]);
        assert_eq!(contents(&set), vec![1, 2, 3]);
        set.extend_multi(vec![3, 1]);
        assert_eq!(contents(&set), vec![1, 1, 2, 3, 3]);
    }

    #[test]
    fn test_clear() {
        let mut set: RedBlackSet<u32> = (0..10).collect();
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.iter().next(), None);
    }

    #[test]
    fn test_set_algebra() {
        let a: RedBlackSet<u32> = vec![1, 2, 3, 9].into_iter().collect();
        let b: RedBlackSet<u32> = vec![2, 3, 4].into_iter().collect();

        assert_eq!(contents(&a.union(&b)), vec![1, 2, 3, 4, 9]);
        assert_eq!(contents(&a.difference(&b)), vec![1, 9]);
        assert_eq!(contents(&a.intersection(&b)), vec![2, 3]);
        assert_eq!(contents(&a.symmetric_difference(&b)), vec![1, 4, 9]);
    }

    #[test]
    fn test_comparison() {
        let mut a: RedBlackSet<u32> = vec![1, 2, 3, 9].into_iter().collect();
        let b: RedBlackSet<u32> = vec![9, 3, 2, 1].into_iter().collect();
        assert_eq!(a, b);
        assert!(a <= b && a >= b);

        a.remove(&3);
        assert!(a < b);
        assert!(a != b);

        a.clear();
        let mut c = RedBlackSet::new();
        assert_eq!(a, c);
        c.insert(1);
        assert!(c > a);

        let shorter: RedBlackSet<u32> = vec![2].into_iter().collect();
        let longer: RedBlackSet<u32> = vec![0, 1].into_iter().collect();
        assert!(shorter < longer);
    }

    #[test]
    fn test_hash() {
        fn hash_of(set: &RedBlackSet<u32>) -> u64 {
            let mut hasher = DefaultHasher::new();
            set.hash(&mut hasher);
            hasher.finish()
        }

        let a: RedBlackSet<u32> = vec![1, 2, 3].into_iter().collect();
        let b: RedBlackSet<u32> = vec![3, 2, 1].into_iter().collect();
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_debug() {
        let set: RedBlackSet<u32> = vec![2, 1].into_iter().collect();
        assert_eq!(format!("{:?}", set), "{1, 2}");
    }

    #[test]
    fn test_clone() {
        let set: RedBlackSet<u32> = (0..20).collect();
        let mut clone = set.clone();
        clone.remove(&0);
        assert_eq!(set.len(), 20);
        assert_eq!(clone.len(), 19);
        assert!(clone.validate().is_ok());
    }

    #[test]
    fn test_serde_tokens() {
        let mut set: RedBlackSet<u32> = RedBlackSet::new();
        set.insert_multi(2);
        set.insert_multi(1);
        set.insert_multi(2);
        assert_tokens(
            &set,
            &[
                Token::Seq { len: Some(3) },
                Token::U32(1),
                Token::U32(2),
                Token::U32(2),
                Token::SeqEnd,
            ],
        );
    }

    #[test]
    fn test_deserialize_keeps_duplicates() {
        let mut set: RedBlackSet<u32> = RedBlackSet::new();
        set.extend_multi(vec![1, 1, 3]);
        assert_de_tokens(
            &set,
            &[
                Token::Seq { len: Some(3) },
                Token::U32(3),
                Token::U32(1),
                Token::U32(1),
                Token::SeqEnd,
            ],
        );
        assert_de_tokens(
            &RedBlackSet::<u32>::new(),
            &[Token::Seq { len: Some(0) }, Token::SeqEnd],
        );
    }
}
