#![forbid(unsafe_code)]

//! Host component tree and read-only registry snapshots.
//!
//! The host mutates a [`ComponentTree`] as the application changes. Each
//! render pass takes a [`RegistrySnapshot`] and resolves tour targets
//! against it; the snapshot holds only weak handles, so elements removed
//! after the snapshot was taken simply stop resolving.
//!
//! # Invariants
//!
//! 1. Snapshot order equals tree insertion order.
//! 2. `find_by_name` returns the first handle whose name matches; an empty
//!    name matches nothing.
//! 3. `generation` increments by exactly 1 on every tree mutation.

use std::rc::Rc;

use ahash::AHashMap;

use crate::element::{ElementHandle, UiElement};

/// Host-owned set of constructible elements.
#[derive(Debug, Default)]
pub struct ComponentTree {
    elements: Vec<Rc<UiElement>>,
    generation: u64,
}

impl ComponentTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element and return the owning `Rc`.
    pub fn insert(&mut self, element: UiElement) -> Rc<UiElement> {
        let element = Rc::new(element);
        self.elements.push(Rc::clone(&element));
        self.generation += 1;
        element
    }

    /// Remove every element with the given name.
    ///
    /// Returns the number of elements removed.
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.elements.len();
        self.elements.retain(|el| el.name() != name);
        let removed = before - self.elements.len();
        if removed > 0 {
            self.generation += 1;
        }
        removed
    }

    /// Rename the first element called `old`.
    ///
    /// The element is re-created under the new name with the same kind (and
    /// therefore the same mount slots). Handles taken before the rename go
    /// stale. Returns `false` if no element had that name.
    pub fn rename(&mut self, old: &str, new: impl Into<String>) -> bool {
        let Some(pos) = self.elements.iter().position(|el| el.name() == old) else {
            return false;
        };
        let kind = self.elements[pos].kind().clone();
        self.elements[pos] = Rc::new(UiElement::new(new, kind));
        self.generation += 1;
        true
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the tree is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Mutation counter.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Take a read-only snapshot for one render pass.
    #[must_use]
    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            entries: self.elements.iter().map(UiElement::handle).collect(),
            generation: self.generation,
        }
    }
}

/// Ordered, read-only view of all elements at one point in time.
#[derive(Debug, Clone, Default)]
pub struct RegistrySnapshot {
    entries: Vec<ElementHandle>,
    generation: u64,
}

impl FromIterator<ElementHandle> for RegistrySnapshot {
    fn from_iter<I: IntoIterator<Item = ElementHandle>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
            generation: 0,
        }
    }
}

impl RegistrySnapshot {
    /// Snapshot with no elements.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Tag the snapshot with a host generation for dirty checking.
    #[must_use]
    pub fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    /// Generation of the tree this snapshot was taken from.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// First element whose declared name equals `name`.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&ElementHandle> {
        if name.is_empty() {
            return None;
        }
        self.entries.iter().find(|handle| handle.name() == name)
    }

    /// Names declared by more than one element, in first-seen order.
    ///
    /// Lookups resolve such names to the first element; this list is the
    /// diagnostic for authoring tools.
    #[must_use]
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut counts: AHashMap<&str, usize> = AHashMap::with_capacity(self.entries.len());
        let mut order = Vec::new();
        for handle in &self.entries {
            let count = counts.entry(handle.name()).or_insert(0);
            *count += 1;
            if *count == 2 {
                order.push(handle.name());
            }
        }
        order
    }

    /// Iterate handles in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = &ElementHandle> {
        self.entries.iter()
    }

    /// Number of handles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the snapshot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementCategory, extract_ref};
    use crate::node::{NodeId, NodeRef, Rect, RefSlot};

    fn node(id: u64) -> NodeRef {
        NodeRef::new(NodeId(id), Rect::new(1, 1, 4, 1))
    }

    #[test]
    fn find_by_name_hits_and_misses() {
        let mut tree = ComponentTree::new();
        tree.insert(UiElement::grid("btn1", RefSlot::mounted(node(1))));
        tree.insert(UiElement::hook("modal1", RefSlot::new()));
        let snap = tree.snapshot();

        let hit = snap.find_by_name("modal1").expect("modal1 registered");
        assert_eq!(hit.category(), ElementCategory::HookBased);
        assert!(snap.find_by_name("missing").is_none());
    }

    #[test]
    fn empty_name_matches_nothing() {
        let mut tree = ComponentTree::new();
        tree.insert(UiElement::other(""));
        assert!(tree.snapshot().find_by_name("").is_none());
    }

    #[test]
    fn first_match_wins_on_duplicates() {
        let mut tree = ComponentTree::new();
        tree.insert(UiElement::grid("btn", RefSlot::mounted(node(1))));
        tree.insert(UiElement::grid("btn", RefSlot::mounted(node(2))));
        tree.insert(UiElement::other("x"));
        tree.insert(UiElement::other("x"));
        tree.insert(UiElement::other("x"));
        let snap = tree.snapshot();

        let first = snap.find_by_name("btn").expect("btn registered");
        assert_eq!(extract_ref(first), Some(node(1)));
        assert_eq!(snap.duplicate_names(), vec!["btn", "x"]);
    }

    #[test]
    fn generation_tracks_mutations() {
        let mut tree = ComponentTree::new();
        assert_eq!(tree.generation(), 0);
        tree.insert(UiElement::other("a"));
        assert_eq!(tree.generation(), 1);
        assert_eq!(tree.remove("nope"), 0);
        assert_eq!(tree.generation(), 1);
        assert_eq!(tree.remove("a"), 1);
        assert_eq!(tree.generation(), 2);
        assert!(tree.is_empty());
    }

    #[test]
    fn removed_element_goes_stale_in_old_snapshot() {
        let mut tree = ComponentTree::new();
        let slot = RefSlot::mounted(node(4));
        drop(tree.insert(UiElement::grid("btn", slot)));
        let snap = tree.snapshot();
        tree.remove("btn");

        let handle = snap.find_by_name("btn").expect("still listed in snapshot");
        assert!(!handle.is_alive());
        assert_eq!(extract_ref(handle), None);
        assert!(tree.snapshot().find_by_name("btn").is_none());
    }

    #[test]
    fn rename_keeps_slot() {
        let mut tree = ComponentTree::new();
        tree.insert(UiElement::grid("old", RefSlot::mounted(node(6))));
        assert!(tree.rename("old", "new"));
        assert!(!tree.rename("old", "newer"));

        let snap = tree.snapshot();
        assert!(snap.find_by_name("old").is_none());
        let handle = snap.find_by_name("new").expect("renamed");
        assert_eq!(extract_ref(handle), Some(node(6)));
        assert_eq!(snap.generation(), tree.generation());
    }

    #[test]
    fn from_iter_preserves_order() {
        let a = Rc::new(UiElement::other("a"));
        let b = Rc::new(UiElement::other("b"));
        let snap: RegistrySnapshot = [b.handle(), a.handle()].into_iter().collect();
        let names: Vec<_> = snap.iter().map(ElementHandle::name).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(snap.len(), 2);
        assert_eq!(snap.with_generation(9).generation(), 9);
    }
}
