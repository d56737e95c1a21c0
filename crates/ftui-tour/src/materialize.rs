#![forbid(unsafe_code)]

//! Step materialization: authored steps to renderer-ready descriptors.
//!
//! # Invariants
//!
//! 1. `materialize(steps, _).len() == steps.len()`, in the same order.
//! 2. A step whose target cannot be resolved keeps its place with
//!    `target: None`.
//! 3. Empty `placement`/`type` strings become `None` (renderer default).
//! 4. Title and description markup is passed through untouched.
//! 5. No side effects besides tracing; the output depends only on the two
//!    inputs and the mount slots they reach.

use ftui_tour_core::{NodeRef, RegistrySnapshot, extract_ref};

use crate::step::{CoverImage, Placement, StepConfig, TourType, TrustedMarkup};

/// A step ready for the tour renderer. Rebuilt on every pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDescriptor {
    /// Node to highlight, if the target resolved.
    pub target: Option<NodeRef>,
    /// Title markup.
    pub title: TrustedMarkup,
    /// Description markup.
    pub description: TrustedMarkup,
    /// Show the directional pointer.
    pub arrow: bool,
    /// Tooltip placement; `None` leaves it to the renderer.
    pub placement: Option<Placement>,
    /// Dim the background.
    pub mask: bool,
    /// Cover image, if the author set one.
    pub cover: Option<CoverImage>,
    /// Visual variant; `None` leaves it to the renderer.
    pub step_type: Option<TourType>,
}

/// How a step's target name resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetResolution {
    /// The step names no target.
    Unnamed,
    /// No element has that name.
    NotFound,
    /// The element exists but has no live node (unmounted, removed, or a
    /// category without nodes).
    Detached,
    /// The element is rendered as this node.
    Resolved(NodeRef),
}

impl TargetResolution {
    /// The resolved node, if any.
    #[must_use]
    pub fn node(self) -> Option<NodeRef> {
        match self {
            Self::Resolved(node) => Some(node),
            _ => None,
        }
    }

    /// Label used in trace output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unnamed => "unnamed",
            Self::NotFound => "not_found",
            Self::Detached => "detached",
            Self::Resolved(_) => "resolved",
        }
    }
}

/// Resolve a target name against a registry snapshot.
#[must_use]
pub fn resolve_target(target: &str, registry: &RegistrySnapshot) -> TargetResolution {
    if target.is_empty() {
        return TargetResolution::Unnamed;
    }
    let Some(handle) = registry.find_by_name(target) else {
        return TargetResolution::NotFound;
    };
    match extract_ref(handle) {
        Some(node) => TargetResolution::Resolved(node),
        None => TargetResolution::Detached,
    }
}

impl StepDescriptor {
    /// Merge a step with its resolved target.
    #[must_use]
    pub fn from_step(step: &StepConfig, target: Option<NodeRef>) -> Self {
        Self {
            target,
            title: step.title.clone(),
            description: step.description.clone(),
            arrow: step.arrow,
            placement: Placement::parse(&step.placement),
            mask: step.mask,
            cover: CoverImage::from_url(step.cover.as_deref()),
            step_type: TourType::parse(&step.step_type),
        }
    }
}

/// Build renderer-ready descriptors for every step, in order.
#[must_use]
pub fn materialize(steps: &[StepConfig], registry: &RegistrySnapshot) -> Vec<StepDescriptor> {
    let span = tracing::debug_span!(
        "tour.materialize",
        steps = steps.len(),
        registry = registry.len(),
        resolved = tracing::field::Empty
    );
    let _guard = span.enter();

    let duplicates = registry.duplicate_names();
    if !duplicates.is_empty() {
        tracing::debug!(
            message = "tour.registry.duplicate_names",
            count = duplicates.len(),
            names = ?duplicates
        );
    }

    let mut resolved = 0_usize;
    let descriptors: Vec<StepDescriptor> = steps
        .iter()
        .enumerate()
        .map(|(index, step)| {
            let outcome = resolve_target(&step.target, registry);
            tracing::trace!(
                message = "tour.step.resolve",
                step = index,
                target = step.target.as_str(),
                outcome = outcome.as_str()
            );
            let node = outcome.node();
            if node.is_some() {
                resolved += 1;
            }
            StepDescriptor::from_step(step, node)
        })
        .collect();

    span.record("resolved", resolved);
    descriptors
}
