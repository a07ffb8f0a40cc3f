//! Generic doubly-linked sequence.
//!
//! Nodes live in an index arena: each slot holds an optional node with `prev`/`next` indices,
//! and vacated slots are recycled through a free list. End operations are O(1); predicate scans
//! and interior inserts are O(n). Node indices never leave this module.

/// Index of a slot in the arena.
type Link = Option<usize>;

#[derive(Debug, Clone)]
struct Node<T> {
    item: T,
    prev: Link,
    next: Link,
}

/// An ordered sequence with cheap access at both ends.
///
/// Operations on an empty list return `None` rather than failing. The list does not enforce
/// uniqueness of any key; callers that need it must check before inserting.
#[derive(Clone)]
pub struct OrderedList<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    head: Link,
    tail: Link,
    len: usize,
}

impl<T> Default for OrderedList<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }
}

impl<T> OrderedList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts `item` before the current head.
    pub fn add_first(&mut self, item: T) {
        let next = self.head;
        self.link_between(item, None, next);
    }

    /// Inserts `item` after the current tail.
    pub fn add_last(&mut self, item: T) {
        let prev = self.tail;
        self.link_between(item, prev, None);
    }

    pub fn remove_first(&mut self) -> Option<T> {
        self.unlink(self.head?)
    }

    pub fn remove_last(&mut self) -> Option<T> {
        self.unlink(self.tail?)
    }

    /// Removes and returns the first item, scanning head to tail, for which `pred` holds.
    pub fn remove_by(&mut self, pred: impl FnMut(&T) -> bool) -> Option<T> {
        let idx = self.position(pred)?;
        self.unlink(idx)
    }

    /// Inserts `item` immediately before the first item for which `pred` holds, or at the tail
    /// if no item matches.
    pub fn insert_before_first(&mut self, pred: impl FnMut(&T) -> bool, item: T) {
        match self.position(pred) {
            Some(at) => {
                let prev = self.node(at).and_then(|n| n.prev);
                self.link_between(item, prev, Some(at));
            }
            None => self.add_last(item),
        }
    }

    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|idx| self.node(idx)).map(|n| &n.item)
    }

    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|idx| self.node(idx)).map(|n| &n.item)
    }

    /// The item immediately before the tail, if the list holds at least two items.
    pub fn back_prev(&self) -> Option<&T> {
        self.tail
            .and_then(|idx| self.node(idx))
            .and_then(|n| n.prev)
            .and_then(|idx| self.node(idx))
            .map(|n| &n.item)
    }

    /// Head-to-tail iterator. Reverse it for tail-to-head.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Drops every item. Slots are released, so capacity is not retained.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    fn node(&self, idx: usize) -> Option<&Node<T>> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, idx: usize) -> Option<&mut Node<T>> {
        self.slots.get_mut(idx).and_then(Option::as_mut)
    }

    fn position(&self, mut pred: impl FnMut(&T) -> bool) -> Option<usize> {
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            let node = self.node(idx)?;
            if pred(&node.item) {
                return Some(idx);
            }
            cursor = node.next;
        }
        None
    }

    fn alloc(&mut self, node: Node<T>) -> usize {
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    /// Allocates a node between `prev` and `next`, which must be adjacent (or absent at an end).
    fn link_between(&mut self, item: T, prev: Link, next: Link) {
        let idx = self.alloc(Node { item, prev, next });

        match prev.and_then(|p| self.node_mut(p)) {
            Some(p) => p.next = Some(idx),
            None => self.head = Some(idx),
        }
        match next.and_then(|n| self.node_mut(n)) {
            Some(n) => n.prev = Some(idx),
            None => self.tail = Some(idx),
        }

        self.len += 1;
    }

    fn unlink(&mut self, idx: usize) -> Option<T> {
        let node = self.slots.get_mut(idx)?.take()?;

        match node.prev.and_then(|p| self.node_mut(p)) {
            Some(p) => p.next = node.next,
            None => self.head = node.next,
        }
        match node.next.and_then(|n| self.node_mut(n)) {
            Some(n) => n.prev = node.prev,
            None => self.tail = node.prev,
        }

        self.free.push(idx);
        self.len -= 1;
        Some(node.item)
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for OrderedList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for OrderedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add_last(item);
        }
    }
}

impl<T> FromIterator<T> for OrderedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<'a, T> IntoIterator for &'a OrderedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing iterator over an [`OrderedList`].
pub struct Iter<'a, T> {
    list: &'a OrderedList<T>,
    front: Link,
    back: Link,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.node(self.front?)?;
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.node(self.back?)?;
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.item)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_operations_return_none() {
        let mut list: OrderedList<u32> = OrderedList::new();
        assert!(list.is_empty());
        assert_eq!(list.remove_first(), None);
        assert_eq!(list.remove_last(), None);
        assert_eq!(list.remove_by(|_| true), None);
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        assert_eq!(list.back_prev(), None);
        assert_eq!(list.iter().count(), 0);
    }

    #[test]
    fn single_element_removal_collapses_to_empty() {
        let mut list = OrderedList::new();
        list.add_last("a");
        assert_eq!(list.front(), list.back());
        assert_eq!(list.remove_last(), Some("a"));
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);

        list.add_first("b");
        assert_eq!(list.remove_first(), Some("b"));
        assert!(list.is_empty());
    }

    #[test]
    fn ends_are_maintained() {
        let mut list = OrderedList::new();
        list.add_last(2);
        list.add_last(3);
        list.add_first(1);
        assert_eq!(list.to_vec(), vec![1, 2, 3]);
        assert_eq!(list.front(), Some(&1));
        assert_eq!(list.back(), Some(&3));
        assert_eq!(list.back_prev(), Some(&2));
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn interior_removal_relinks_neighbours() {
        let mut list: OrderedList<i32> = (1..=5).collect();
        assert_eq!(list.remove_by(|&x| x == 3), Some(3));
        assert_eq!(list.len(), 4);
        assert_eq!(list.to_vec(), vec![1, 2, 4, 5]);
        let reversed: Vec<i32> = list.iter().rev().copied().collect();
        assert_eq!(reversed, vec![5, 4, 2, 1]);
    }

    #[test]
    fn remove_by_takes_first_match_only() {
        let mut list: OrderedList<(char, u8)> = vec![('a', 1), ('b', 2), ('a', 3)]
            .into_iter()
            .collect();
        assert_eq!(list.remove_by(|(k, _)| *k == 'a'), Some(('a', 1)));
        assert_eq!(list.to_vec(), vec![('b', 2), ('a', 3)]);
        assert_eq!(list.remove_by(|(k, _)| *k == 'z'), None);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn removing_head_and_tail_by_predicate() {
        let mut list: OrderedList<i32> = (1..=3).collect();
        assert_eq!(list.remove_by(|&x| x == 1), Some(1));
        assert_eq!(list.front(), Some(&2));
        assert_eq!(list.remove_by(|&x| x == 3), Some(3));
        assert_eq!(list.back(), Some(&2));
        assert_eq!(list.back_prev(), None);
    }

    #[test]
    fn insert_before_first_match_or_append() {
        let mut list: OrderedList<i32> = vec![10, 20, 30].into_iter().collect();
        list.insert_before_first(|&x| x > 15, 15);
        assert_eq!(list.to_vec(), vec![10, 15, 20, 30]);
        list.insert_before_first(|&x| x > 5, 5);
        assert_eq!(list.to_vec(), vec![5, 10, 15, 20, 30]);
        assert_eq!(list.front(), Some(&5));
        list.insert_before_first(|&x| x > 100, 99);
        assert_eq!(list.back(), Some(&99));
        assert_eq!(list.len(), 6);
    }

    #[test]
    fn vacated_slots_are_reused() {
        let mut list = OrderedList::new();
        for i in 0..4 {
            list.add_last(i);
        }
        list.remove_first();
        list.remove_first();
        list.add_last(4);
        list.add_last(5);
        assert_eq!(list.slots.len(), 4);
        assert_eq!(list.to_vec(), vec![2, 3, 4, 5]);
    }

    #[test]
    fn iterator_meets_in_the_middle() {
        let list: OrderedList<i32> = (1..=4).collect();
        let mut iter = list.iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next_back(), Some(&3));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn clear_empties_the_list() {
        let mut list: OrderedList<i32> = (1..=3).collect();
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        list.add_last(7);
        assert_eq!(list.to_vec(), vec![7]);
    }
}
