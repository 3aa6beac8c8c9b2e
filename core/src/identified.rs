//! Ordered collections with unique element identity
//!
//! [`IdentifiedVec`] keeps elements in display order while guaranteeing that
//! no two elements share an id. It is the state shape [`for_each`] routes
//! child actions into, and it carries the offset-based editing operations a
//! list view produces (remove at offsets, move offsets to a target).
//!
//! [`for_each`]: crate::composition::for_each

use std::collections::BTreeSet;
use std::fmt::Debug;
use std::hash::Hash;

/// A value with a stable identity
pub trait Identifiable {
    /// Identity type
    type Id: Clone + Eq + Hash + Debug;

    /// The element's identity
    fn id(&self) -> Self::Id;
}

/// Action addressed to one element of an [`IdentifiedVec`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IdentifiedAction<Id, Action> {
    /// Forward `action` to the element identified by `id`
    Element {
        /// Target element
        id: Id,
        /// Action for that element's reducer
        action: Action,
    },
}

impl<Id, Action> IdentifiedAction<Id, Action> {
    /// Build an element action
    #[must_use]
    pub const fn element(id: Id, action: Action) -> Self {
        Self::Element { id, action }
    }
}

/// Ordered collection of uniquely identified elements
///
/// Lookups are linear; the collection targets screen-sized lists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentifiedVec<T> {
    elements: Vec<T>,
}

impl<T> Default for IdentifiedVec<T> {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
        }
    }
}

impl<T: Identifiable> IdentifiedVec<T> {
    /// Create an empty collection
    #[must_use]
    pub const fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// Build a collection from elements, keeping the first occurrence of each id
    #[must_use]
    pub fn from_elements(elements: impl IntoIterator<Item = T>) -> Self {
        let mut vec = Self::new();
        for element in elements {
            vec.push(element);
        }
        vec
    }

    /// Number of elements
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the collection is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Elements in order
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    /// Iterate elements in order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    /// Iterate elements mutably in order
    ///
    /// Callers must not change an element's id through this iterator.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.elements.iter_mut()
    }

    /// Ids in order
    #[must_use]
    pub fn ids(&self) -> Vec<T::Id> {
        self.elements.iter().map(Identifiable::id).collect()
    }

    /// First element
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.elements.first()
    }

    /// Element at `offset`
    #[must_use]
    pub fn get_index(&self, offset: usize) -> Option<&T> {
        self.elements.get(offset)
    }

    /// Offset of the element with `id`
    #[must_use]
    pub fn index_of(&self, id: &T::Id) -> Option<usize> {
        self.elements.iter().position(|e| &e.id() == id)
    }

    /// Whether an element with `id` is present
    #[must_use]
    pub fn contains(&self, id: &T::Id) -> bool {
        self.index_of(id).is_some()
    }

    /// Element with `id`
    #[must_use]
    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.elements.iter().find(|e| &e.id() == id)
    }

    /// Mutable element with `id`
    pub fn get_mut(&mut self, id: &T::Id) -> Option<&mut T> {
        self.elements.iter_mut().find(|e| &e.id() == id)
    }

    /// Append `element`; returns false (and leaves the collection unchanged)
    /// when its id is already present
    pub fn push(&mut self, element: T) -> bool {
        if self.contains(&element.id()) {
            return false;
        }
        self.elements.push(element);
        true
    }

    /// Keep only elements matching `keep`
    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) {
        self.elements.retain(keep);
    }

    /// Remove the elements at `offsets`, returning them in order
    ///
    /// Offsets past the end are ignored.
    pub fn remove_at_offsets(&mut self, offsets: &BTreeSet<usize>) -> Vec<T> {
        let mut removed = Vec::with_capacity(offsets.len());
        for &offset in offsets.iter().rev() {
            if offset < self.elements.len() {
                removed.push(self.elements.remove(offset));
            }
        }
        removed.reverse();
        removed
    }

    /// Move the elements at `offsets` so they land before the element that
    /// was at `destination` prior to the move
    ///
    /// `destination` is an offset into the pre-move list and may equal
    /// `len()` to move to the end. Moved elements keep their relative order.
    /// Offsets past the end are ignored and `destination` is clamped.
    pub fn move_elements(&mut self, offsets: &BTreeSet<usize>, destination: usize) {
        let len = self.elements.len();
        let destination = destination.min(len);
        let valid: BTreeSet<usize> = offsets.iter().copied().filter(|&o| o < len).collect();
        if valid.is_empty() {
            return;
        }

        let insert_at = destination - valid.iter().filter(|&&o| o < destination).count();

        let mut moving = Vec::with_capacity(valid.len());
        let mut remaining = Vec::with_capacity(len - valid.len());
        for (offset, element) in std::mem::take(&mut self.elements).into_iter().enumerate() {
            if valid.contains(&offset) {
                moving.push(element);
            } else {
                remaining.push(element);
            }
        }

        let tail = remaining.split_off(insert_at);
        remaining.extend(moving);
        remaining.extend(tail);
        self.elements = remaining;
    }

    /// Consume the collection, returning elements in order
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.elements
    }
}

impl<T: Identifiable> FromIterator<T> for IdentifiedVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_elements(iter)
    }
}

impl<'a, T> IntoIterator for &'a IdentifiedVec<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<T> IntoIterator for IdentifiedVec<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<T> std::ops::Index<usize> for IdentifiedVec<T> {
    type Output = T;

    fn index(&self, offset: usize) -> &T {
        &self.elements[offset]
    }
}
