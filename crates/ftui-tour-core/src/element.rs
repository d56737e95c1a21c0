#![forbid(unsafe_code)]

//! Element model: named UI elements tagged by category.
//!
//! The host application owns every [`UiElement`] behind an `Rc`. Tours only
//! ever see [`ElementHandle`]s, which hold a weak reference plus the category
//! tag recorded when the handle was taken.
//!
//! # Extraction
//!
//! [`extract_ref`] selects the retrieval path from the handle's tag:
//!
//! | Tag          | Path                                            |
//! |--------------|-------------------------------------------------|
//! | `GridPlaced` | inner component slot                            |
//! | `HookBased`  | hook slot                                       |
//! | `Other`      | none                                            |
//!
//! If the tag disagrees with the element's runtime shape, the shape's own
//! path is asked instead (grid first, hook as fallback).
//!
//! A handle whose element has been dropped yields `None`. Nothing here panics.

use std::fmt;
use std::rc::{Rc, Weak};

use crate::node::{NodeRef, RefSlot};

/// Closed set of element categories that can carry a tour target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementCategory {
    /// Element placed on the layout grid; its ref lives on the inner component.
    GridPlaced,
    /// Headless element mounted through a hook; owns its ref directly.
    HookBased,
    /// Anything else (temporary state, data queries). Never has a ref.
    Other,
}

impl ElementCategory {
    /// Stable lowercase label used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GridPlaced => "grid",
            Self::HookBased => "hook",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ElementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability of producing the currently rendered node.
pub trait LiveReference {
    /// The node this element is currently rendered as, if any.
    fn live_reference(&self) -> Option<NodeRef>;
}

/// A grid cell. The component inside it may or may not expose a ref.
#[derive(Debug, Clone, Default)]
pub struct GridItem {
    comp: Option<RefSlot>,
}

impl GridItem {
    /// Grid cell whose component exposes the given slot.
    #[must_use]
    pub fn new(comp: RefSlot) -> Self {
        Self { comp: Some(comp) }
    }

    /// Grid cell whose component exposes no ref.
    #[must_use]
    pub fn without_ref() -> Self {
        Self { comp: None }
    }

    /// The inner component's slot.
    #[must_use]
    pub fn comp_slot(&self) -> Option<&RefSlot> {
        self.comp.as_ref()
    }
}

impl LiveReference for GridItem {
    fn live_reference(&self) -> Option<NodeRef> {
        self.comp.as_ref().and_then(RefSlot::current)
    }
}

/// A hook-mounted element.
#[derive(Debug, Clone, Default)]
pub struct HookItem {
    slot: RefSlot,
}

impl HookItem {
    /// Hook element backed by the given slot.
    #[must_use]
    pub fn new(slot: RefSlot) -> Self {
        Self { slot }
    }

    /// The element's slot.
    #[must_use]
    pub fn slot(&self) -> &RefSlot {
        &self.slot
    }
}

impl LiveReference for HookItem {
    fn live_reference(&self) -> Option<NodeRef> {
        self.slot.current()
    }
}

/// Runtime shape of an element.
#[derive(Debug, Clone)]
pub enum ElementKind {
    /// Grid-placed element.
    GridPlaced(GridItem),
    /// Hook-based element.
    HookBased(HookItem),
    /// Element without a rendered node.
    Other,
}

impl ElementKind {
    /// Category matching this shape.
    #[must_use]
    pub const fn category(&self) -> ElementCategory {
        match self {
            Self::GridPlaced(_) => ElementCategory::GridPlaced,
            Self::HookBased(_) => ElementCategory::HookBased,
            Self::Other => ElementCategory::Other,
        }
    }

    fn as_grid(&self) -> Option<&GridItem> {
        match self {
            Self::GridPlaced(item) => Some(item),
            _ => None,
        }
    }

    fn as_hook(&self) -> Option<&HookItem> {
        match self {
            Self::HookBased(item) => Some(item),
            _ => None,
        }
    }
}

impl LiveReference for ElementKind {
    fn live_reference(&self) -> Option<NodeRef> {
        match self {
            Self::GridPlaced(item) => item.live_reference(),
            Self::HookBased(item) => item.live_reference(),
            Self::Other => None,
        }
    }
}

/// A named element owned by the host application.
#[derive(Debug, Clone)]
pub struct UiElement {
    name: String,
    kind: ElementKind,
}

impl UiElement {
    /// Create an element.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Grid-placed element whose inner component exposes `slot`.
    #[must_use]
    pub fn grid(name: impl Into<String>, slot: RefSlot) -> Self {
        Self::new(name, ElementKind::GridPlaced(GridItem::new(slot)))
    }

    /// Hook-based element backed by `slot`.
    #[must_use]
    pub fn hook(name: impl Into<String>, slot: RefSlot) -> Self {
        Self::new(name, ElementKind::HookBased(HookItem::new(slot)))
    }

    /// Element with no rendered node.
    #[must_use]
    pub fn other(name: impl Into<String>) -> Self {
        Self::new(name, ElementKind::Other)
    }

    /// Declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runtime shape.
    #[must_use]
    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// Category derived from the runtime shape.
    #[must_use]
    pub fn category(&self) -> ElementCategory {
        self.kind.category()
    }

    /// Take a weak handle tagged with this element's own category.
    #[must_use]
    pub fn handle(self: &Rc<Self>) -> ElementHandle {
        ElementHandle::tagged(self, self.category())
    }
}

/// Weak, category-tagged reference to a host element.
///
/// The name is copied at snapshot time so lookups do not need to upgrade.
#[derive(Debug, Clone)]
pub struct ElementHandle {
    name: String,
    category: ElementCategory,
    element: Weak<UiElement>,
}

impl ElementHandle {
    /// Handle with an explicit category tag.
    ///
    /// Hosts that classify elements from their own metadata use this; the tag
    /// may then disagree with the element's runtime shape.
    #[must_use]
    pub fn tagged(element: &Rc<UiElement>, category: ElementCategory) -> Self {
        Self {
            name: element.name.clone(),
            category,
            element: Rc::downgrade(element),
        }
    }

    /// Declared name at snapshot time.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Category tag.
    #[must_use]
    pub fn category(&self) -> ElementCategory {
        self.category
    }

    /// Whether the host still owns the element.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.element.strong_count() > 0
    }

    /// Upgrade to the live element.
    #[must_use]
    pub fn upgrade(&self) -> Option<Rc<UiElement>> {
        self.element.upgrade()
    }
}

/// Live node for a handle, following the path its category tag selects.
///
/// When the tag's path does not fit the element's runtime shape, the shape's
/// own path is used instead.
#[must_use]
pub fn extract_ref(handle: &ElementHandle) -> Option<NodeRef> {
    let element = handle.upgrade()?;
    let kind = element.kind();
    let tagged = match handle.category() {
        ElementCategory::GridPlaced => kind.as_grid().map(LiveReference::live_reference),
        ElementCategory::HookBased => kind.as_hook().map(LiveReference::live_reference),
        ElementCategory::Other => return None,
    };
    match tagged {
        Some(node) => node,
        None => {
            tracing::trace!(
                message = "tour.extract.fallback",
                element = handle.name(),
                tag = handle.category().as_str(),
                shape = kind.category().as_str()
            );
            kind.live_reference()
        }
    }
}
