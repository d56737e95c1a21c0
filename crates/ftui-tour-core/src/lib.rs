#![forbid(unsafe_code)]

//! Tour core: element registry, live node references, and target lookup.
//!
//! # Role in FrankenTUI
//! `ftui-tour-core` is the leaf layer of the guided-tour building block. It
//! knows nothing about steps or overlays; it answers two questions for the
//! step materializer in `ftui-tour`:
//!
//! - **Which element is named X?** [`RegistrySnapshot::find_by_name`]
//! - **What node is it rendered as right now?** [`extract_ref`]
//!
//! # How it fits in the system
//! The host owns a [`ComponentTree`] and hands out a [`RegistrySnapshot`] per
//! render pass. Snapshots hold weak, category-tagged [`ElementHandle`]s, so a
//! tour never keeps an element alive and never fails when one disappears.

pub mod element;
pub mod node;
pub mod registry;

pub use element::{
    ElementCategory, ElementHandle, ElementKind, GridItem, HookItem, LiveReference, UiElement,
    extract_ref,
};
pub use node::{NodeId, NodeRef, Rect, RefSlot};
pub use registry::{ComponentTree, RegistrySnapshot};
