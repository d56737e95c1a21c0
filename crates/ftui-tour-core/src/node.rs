#![forbid(unsafe_code)]

//! Rendered node identities and the mount slots that expose them.
//!
//! A [`RefSlot`] is written by the host when an element mounts or unmounts
//! and read by the tour when it needs something to point at. Reads never
//! panic: a slot that is mid-write reads as empty.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Identity of one rendered node in the host tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node:{}", self.0)
    }
}

/// Cell-space bounds of a rendered node.
///
/// Origin is top-left; `right()` and `bottom()` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u16,
    /// Top edge (inclusive).
    pub y: u16,
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl Rect {
    /// Create new bounds.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Whether the bounds cover no cells.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether a cell lies inside the bounds.
    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// A live reference to a rendered node.
///
/// This is what a resolved tour step points at. It is a value snapshot of the
/// node as mounted at resolution time; the next materialization pass reads
/// the slot again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeRef {
    /// Node identity.
    pub id: NodeId,
    /// Bounds at the time the node was mounted or last laid out.
    pub bounds: Rect,
}

impl NodeRef {
    /// Create a node reference.
    #[must_use]
    pub const fn new(id: NodeId, bounds: Rect) -> Self {
        Self { id, bounds }
    }
}

/// Shared mount slot for an element's rendered node.
///
/// Cloning a `RefSlot` yields another handle to the same slot, so the host
/// can keep one half for writing while the element keeps the other.
#[derive(Clone, Default)]
pub struct RefSlot {
    current: Rc<RefCell<Option<NodeRef>>>,
}

impl fmt::Debug for RefSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefSlot")
            .field("current", &self.current())
            .finish()
    }
}

impl RefSlot {
    /// Create an empty (unmounted) slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot that is already mounted.
    #[must_use]
    pub fn mounted(node: NodeRef) -> Self {
        let slot = Self::new();
        slot.attach(node);
        slot
    }

    /// Record the node this slot now points at.
    pub fn attach(&self, node: NodeRef) {
        *self.current.borrow_mut() = Some(node);
    }

    /// Clear the slot after the node unmounts.
    pub fn detach(&self) {
        self.current.borrow_mut().take();
    }

    /// Current node, if mounted.
    ///
    /// Returns `None` while the slot is borrowed for writing.
    #[must_use]
    pub fn current(&self) -> Option<NodeRef> {
        self.current.try_borrow().ok().and_then(|node| *node)
    }

    /// Whether both handles point at the same slot.
    #[must_use]
    pub fn same_slot(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.current, &other.current)
    }
}
