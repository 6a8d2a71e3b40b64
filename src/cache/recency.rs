//! Recency List Module
//!
//! Intrusive doubly-linked list over a slot arena, ordered from most recently
//! used (front) to least recently used (back).
//!
//! Nodes never move once inserted, so callers can keep a [`Handle`] to a node
//! and unlink or promote it in O(1). Each slot carries a generation counter
//! that is bumped when the slot is freed, so a handle to a removed node can
//! never reach whatever later reuses the slot.

// == Handle ==
/// Stable reference to a node in a [`RecencyList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    index: usize,
    generation: u64,
}

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<usize>,
    next: Option<usize>,
}

#[derive(Debug)]
struct Slot<T> {
    generation: u64,
    node: Option<Node<T>>,
}

// == Recency List ==
/// Access-ordered list with O(1) push-front, unlink, promote and pop-back.
#[derive(Debug)]
pub struct RecencyList<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> RecencyList<T> {
    // == Constructor ==
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    // == Length ==
    /// Returns the number of linked nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Push Front ==
    /// Links a new node at the front (most recently used) and returns its handle.
    pub fn push_front(&mut self, value: T) -> Handle {
        let node = Node {
            value,
            prev: None,
            next: self.head,
        };

        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index].node = Some(node);
                index
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                self.slots.len() - 1
            }
        };

        match self.head {
            Some(old_head) => self.link_mut(old_head).prev = Some(index),
            None => self.tail = Some(index),
        }
        self.head = Some(index);
        self.len += 1;

        Handle {
            index,
            generation: self.slots[index].generation,
        }
    }

    // == Access ==
    /// Returns the value behind `handle`, or None if the handle is stale.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.slot(handle).map(|node| &node.value)
    }

    /// Returns the least recently used value without unlinking it.
    pub fn back(&self) -> Option<&T> {
        self.tail
            .and_then(|index| self.slots[index].node.as_ref())
            .map(|node| &node.value)
    }

    // == Move To Front ==
    /// Promotes the node behind `handle` to most recently used.
    ///
    /// Returns false if the handle is stale.
    pub fn move_to_front(&mut self, handle: Handle) -> bool {
        if self.slot(handle).is_none() {
            return false;
        }
        if self.head == Some(handle.index) {
            return true;
        }

        self.unlink(handle.index);

        let old_head = self.head;
        {
            let node = self.link_mut(handle.index);
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(old_head) => self.link_mut(old_head).prev = Some(handle.index),
            None => self.tail = Some(handle.index),
        }
        self.head = Some(handle.index);
        true
    }

    // == Remove ==
    /// Unlinks the node behind `handle` and returns its value.
    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        self.slot(handle)?;
        self.unlink(handle.index);
        Some(self.release(handle.index))
    }

    // == Pop Back ==
    /// Unlinks and returns the least recently used value.
    pub fn pop_back(&mut self) -> Option<T> {
        let index = self.tail?;
        self.unlink(index);
        Some(self.release(index))
    }

    // == Clear ==
    /// Drops every node and invalidates all outstanding handles.
    pub fn clear(&mut self) {
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free.push(index);
        }
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    // == Iteration ==
    /// Iterates values from most to least recently used.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.head,
        }
    }

    fn slot(&self, handle: Handle) -> Option<&Node<T>> {
        self.slots
            .get(handle.index)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    // Only called with indices reachable from head/tail or a validated handle.
    fn link_mut(&mut self, index: usize) -> &mut Node<T> {
        match self.slots[index].node.as_mut() {
            Some(node) => node,
            None => unreachable!("linked slot {index} is vacant"),
        }
    }

    fn unlink(&mut self, index: usize) {
        let (prev, next) = {
            let node = self.link_mut(index);
            (node.prev.take(), node.next.take())
        };

        match prev {
            Some(prev) => self.link_mut(prev).next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.link_mut(next).prev = prev,
            None => self.tail = prev,
        }
    }

    fn release(&mut self, index: usize) -> T {
        let slot = &mut self.slots[index];
        let node = match slot.node.take() {
            Some(node) => node,
            None => unreachable!("released slot {index} is vacant"),
        };
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(index);
        self.len -= 1;
        node.value
    }
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Front-to-back iterator over a [`RecencyList`].
pub struct Iter<'a, T> {
    list: &'a RecencyList<T>,
    current: Option<usize>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.slots[self.current?].node.as_ref()?;
        self.current = node.next;
        Some(&node.value)
    }
}
