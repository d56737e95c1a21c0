#![forbid(unsafe_code)]

//! Guided tours for FrankenTUI applications.
//!
//! A tour is a list of authored [`StepConfig`]s, each naming a target element
//! plus the content to show next to it. On every render pass the tour
//! resolves those names against a [`RegistrySnapshot`] of the host's
//! elements, builds [`StepDescriptor`]s, and hands them to an opaque
//! [`TourRenderer`] together with the open flag and display options.
//!
//! # Key Components
//!
//! - [`materialize`] - steps + registry snapshot to descriptors, order-preserving
//! - [`TourComp`] - open/closed state, `startTour`, renderer feed
//! - [`Observable`] - reactive cells shared with the host
//! - [`Exposing`] - fields and methods registered with the host
//! - [`TourConfig`] - configuration as data (JSON, TOML)
//!
//! # Example
//!
//! ```
//! use ftui_tour::{RenderProps, StepConfig, TourComp, TourRenderer, TourState};
//! use ftui_tour_core::{ComponentTree, NodeId, NodeRef, Rect, RefSlot, UiElement};
//!
//! struct Log(Vec<Option<NodeRef>>);
//! impl TourRenderer for Log {
//!     fn render(&mut self, props: RenderProps<'_>) {
//!         self.0 = props.steps.iter().map(|s| s.target).collect();
//!     }
//! }
//!
//! let node = NodeRef::new(NodeId(1), Rect::new(0, 0, 10, 1));
//! let mut tree = ComponentTree::new();
//! tree.insert(UiElement::grid("btn1", RefSlot::mounted(node)));
//!
//! let comp = TourComp::new(vec![StepConfig::new("btn1")], Default::default());
//! comp.start_tour();
//! assert_eq!(comp.state(), TourState::Open);
//!
//! let mut log = Log(Vec::new());
//! comp.view(&tree.snapshot(), &mut log);
//! assert_eq!(log.0, vec![Some(node)]);
//! ```

pub mod config;
pub mod error;
pub mod expose;
pub mod materialize;
pub mod reactive;
pub mod runtime;
pub mod step;

pub use config::{OptionsConfig, TourConfig};
pub use error::{ConfigError, Result, TourError};
pub use expose::{Exposing, MethodConfig, NameConfig, ParamConfig, START_TOUR};
pub use ftui_tour_core::RegistrySnapshot;
pub use materialize::{StepDescriptor, TargetResolution, materialize, resolve_target};
pub use reactive::{Observable, Subscription};
pub use runtime::{
    DisplayOptions, IndicatorsRender, RenderProps, TourComp, TourControl, TourRenderer, TourState,
};
pub use step::{CoverImage, Placement, StepConfig, TourType, TrustedMarkup};
