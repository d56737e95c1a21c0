#![forbid(unsafe_code)]

//! Tour runtime adapter: open/closed state and the renderer boundary.
//!
//! # State machine
//!
//! ```text
//!            start_tour() / set_open(true)
//!   Closed ─────────────────────────────────▶ Open
//!     ▲                                        │
//!     └────────────────────────────────────────┘
//!      TourControl::close() / set_open(false)
//! ```
//!
//! The state lives in the `open` [`Observable`], which the host shares. A
//! close coming from the renderer goes through [`TourControl::close`], so the
//! host sees the same `false` it would see after writing the cell itself.
//!
//! The renderer is opaque: it receives [`RenderProps`] on every pass and owns
//! layout, animation, and the current step index. It reports index changes
//! back through [`TourControl::change`].

use std::fmt;
use std::rc::Rc;

use ftui_tour_core::RegistrySnapshot;

use crate::materialize::{StepDescriptor, materialize};
use crate::reactive::{Observable, Subscription};
use crate::step::{Placement, StepConfig, TourType};

/// Observable tour state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourState {
    /// Overlay hidden. Initial state.
    Closed,
    /// Overlay shown.
    Open,
}

impl TourState {
    /// State for an `open` flag.
    #[must_use]
    pub const fn from_open(open: bool) -> Self {
        if open { Self::Open } else { Self::Closed }
    }

    /// Whether this is [`TourState::Open`].
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// Tour-wide display options passed through to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Show the directional pointer.
    pub arrow: bool,
    /// Suppress pointer interaction with the highlighted target.
    pub disabled_interaction: bool,
    /// Dim the background.
    pub mask: bool,
    /// Default tooltip placement; `None` leaves it to the renderer.
    pub placement: Option<Placement>,
    /// Default visual variant; `None` leaves it to the renderer.
    pub tour_type: Option<TourType>,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            arrow: true,
            disabled_interaction: false,
            mask: true,
            placement: None,
            tour_type: None,
        }
    }
}

/// Custom step-count renderer: `(current, total) -> text`.
///
/// `current` is zero-based.
#[derive(Clone)]
pub struct IndicatorsRender(Rc<dyn Fn(usize, usize) -> String>);

impl IndicatorsRender {
    /// Wrap a custom indicator callback.
    #[must_use]
    pub fn new(render: impl Fn(usize, usize) -> String + 'static) -> Self {
        Self(Rc::new(render))
    }

    /// Render the indicator for a position.
    #[must_use]
    pub fn render(&self, current: usize, total: usize) -> String {
        (self.0)(current, total)
    }
}

impl Default for IndicatorsRender {
    fn default() -> Self {
        Self::new(|current, total| format!("{} / {}", current + 1, total))
    }
}

impl fmt::Debug for IndicatorsRender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IndicatorsRender").field(&"<fn>").finish()
    }
}

/// Callbacks the renderer uses to report back.
#[derive(Debug, Clone)]
pub struct TourControl {
    open: Observable<bool>,
    current: Observable<usize>,
}

impl TourControl {
    /// The user dismissed the overlay.
    pub fn close(&self) {
        if self.open.get() {
            tracing::debug!(message = "tour.close.requested", source = "renderer");
        }
        self.open.set(false);
    }

    /// The renderer moved to another step.
    pub fn change(&self, current: usize) {
        self.current.set(current);
    }

    /// Whether the tour is currently open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.get()
    }
}

/// Everything the renderer receives for one pass.
#[derive(Debug)]
pub struct RenderProps<'a> {
    /// Materialized steps, in authored order.
    pub steps: &'a [StepDescriptor],
    /// Whether the overlay is shown.
    pub open: bool,
    /// Last step index the renderer reported.
    pub current: usize,
    /// Close and step-change callbacks.
    pub control: TourControl,
    /// Step-count renderer.
    pub indicators: &'a IndicatorsRender,
    /// Tour-wide display options.
    pub options: &'a DisplayOptions,
}

impl RenderProps<'_> {
    /// Indicator text for the current position.
    #[must_use]
    pub fn indicator(&self) -> String {
        self.indicators.render(self.current, self.steps.len())
    }
}

/// The opaque tour renderer.
pub trait TourRenderer {
    /// Draw (or hide) the tour for this pass.
    fn render(&mut self, props: RenderProps<'_>);
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PassStamp {
    config_version: u64,
    open_version: u64,
    current_version: u64,
    steps: Vec<StepDescriptor>,
}

/// The guided-tour component.
///
/// Owns the authored steps and display options, plus the reactive cells the
/// host binds to: `open`, `current`, `value`, and `defaultValue`.
pub struct TourComp {
    steps: Vec<StepConfig>,
    options: DisplayOptions,
    indicators: IndicatorsRender,
    config_version: u64,
    open: Observable<bool>,
    current: Observable<usize>,
    value: Observable<String>,
    default_value: Observable<String>,
    last_pass: Option<PassStamp>,
    _transitions: Subscription,
}

impl fmt::Debug for TourComp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TourComp")
            .field("steps", &self.steps.len())
            .field("options", &self.options)
            .field("state", &self.state())
            .field("current", &self.current.get())
            .finish_non_exhaustive()
    }
}

impl Default for TourComp {
    fn default() -> Self {
        Self::new(Vec::new(), DisplayOptions::default())
    }
}

impl TourComp {
    /// Create a closed tour.
    #[must_use]
    pub fn new(steps: Vec<StepConfig>, options: DisplayOptions) -> Self {
        let open = Observable::new(false);
        let transitions = open.subscribe(|open| {
            if *open {
                tracing::debug!(message = "tour.open");
            } else {
                tracing::debug!(message = "tour.close");
            }
        });
        Self {
            steps,
            options,
            indicators: IndicatorsRender::default(),
            config_version: 0,
            open,
            current: Observable::new(0),
            value: Observable::default(),
            default_value: Observable::default(),
            last_pass: None,
            _transitions: transitions,
        }
    }

    /// Open the tour. This is the exposed `startTour` action.
    pub fn start_tour(&self) {
        self.open.set(true);
    }

    /// Set the open flag from outside.
    pub fn set_open(&self, open: bool) {
        self.open.set(open);
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> TourState {
        TourState::from_open(self.open.get())
    }

    /// Last step index reported by the renderer.
    #[must_use]
    pub fn current(&self) -> usize {
        self.current.get()
    }

    /// Authored steps.
    #[must_use]
    pub fn steps(&self) -> &[StepConfig] {
        &self.steps
    }

    /// Replace the authored steps.
    pub fn set_steps(&mut self, steps: Vec<StepConfig>) {
        self.steps = steps;
        self.config_version += 1;
    }

    /// Display options.
    #[must_use]
    pub fn options(&self) -> &DisplayOptions {
        &self.options
    }

    /// Replace the display options.
    pub fn set_options(&mut self, options: DisplayOptions) {
        self.options = options;
        self.config_version += 1;
    }

    /// Replace the step-count renderer.
    pub fn set_indicators_render(&mut self, indicators: IndicatorsRender) {
        self.indicators = indicators;
        self.config_version += 1;
    }

    /// The shared `open` cell.
    #[must_use]
    pub fn open_cell(&self) -> &Observable<bool> {
        &self.open
    }

    /// The shared `current` cell.
    #[must_use]
    pub fn current_cell(&self) -> &Observable<usize> {
        &self.current
    }

    /// The shared `value` cell.
    #[must_use]
    pub fn value_cell(&self) -> &Observable<String> {
        &self.value
    }

    /// The shared `defaultValue` cell.
    #[must_use]
    pub fn default_value_cell(&self) -> &Observable<String> {
        &self.default_value
    }

    /// Callbacks handed to the renderer.
    #[must_use]
    pub fn control(&self) -> TourControl {
        TourControl {
            open: self.open.clone(),
            current: self.current.clone(),
        }
    }

    /// Materialize the steps against `registry`.
    #[must_use]
    pub fn descriptors(&self, registry: &RegistrySnapshot) -> Vec<StepDescriptor> {
        materialize(&self.steps, registry)
    }

    /// Run one render pass unconditionally.
    pub fn view(&self, registry: &RegistrySnapshot, renderer: &mut dyn TourRenderer) {
        let steps = self.descriptors(registry);
        self.feed(&steps, renderer);
    }

    /// Run a render pass only if something the renderer sees has changed
    /// since the last pass made through this method.
    ///
    /// Returns whether the renderer was called.
    pub fn view_if_changed(
        &mut self,
        registry: &RegistrySnapshot,
        renderer: &mut dyn TourRenderer,
    ) -> bool {
        let stamp = PassStamp {
            config_version: self.config_version,
            open_version: self.open.version(),
            current_version: self.current.version(),
            steps: self.descriptors(registry),
        };
        if self.last_pass.as_ref() == Some(&stamp) {
            return false;
        }
        self.feed(&stamp.steps, renderer);
        self.last_pass = Some(stamp);
        true
    }

    fn feed(&self, steps: &[StepDescriptor], renderer: &mut dyn TourRenderer) {
        renderer.render(RenderProps {
            steps,
            open: self.open.get(),
            current: self.current.get(),
            control: self.control(),
            indicators: &self.indicators,
            options: &self.options,
        });
    }
}
