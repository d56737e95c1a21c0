#![forbid(unsafe_code)]

//! Structured log events emitted while materializing and running a tour.
//!
//! Resolution failures are normal authoring states: they must show up as
//! TRACE events with a structured `outcome`, never as WARN or ERROR. State
//! propagation runs inside a TRACE `tour.state.delta` span.
//!
//! Run:
//!   cargo test -p ftui-tour --test tracing_materialize_events

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use ftui_tour::{Observable, StepConfig, TourComp, materialize};
use ftui_tour_core::{ComponentTree, NodeId, NodeRef, Rect, RefSlot, UiElement};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    fields: HashMap<String, String>,
}

impl CapturedEvent {
    fn message(&self) -> Option<&str> {
        self.fields.get("message").map(String::as_str)
    }
}

#[derive(Default)]
struct FieldVisitor(HashMap<String, String>);

impl tracing::field::Visit for FieldVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.insert(field.name().to_owned(), value.to_owned());
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0
            .insert(field.name().to_owned(), format!("{value:?}").trim_matches('"').to_owned());
    }
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S: tracing::Subscriber> Layer<S> for EventCapture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        self.events
            .lock()
            .expect("event capture lock")
            .push(CapturedEvent {
                level: *event.metadata().level(),
                fields: visitor.0,
            });
    }
}

fn capture(run: impl FnOnce()) -> Vec<CapturedEvent> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(EventCapture {
        events: Arc::clone(&events),
    });
    tracing::subscriber::with_default(subscriber, run);
    let captured = events.lock().expect("event capture lock").clone();
    captured
}

struct SpanCapture {
    spans: Arc<Mutex<Vec<(&'static str, tracing::Level)>>>,
}

impl<S: tracing::Subscriber> Layer<S> for SpanCapture {
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: Context<'_, S>,
    ) {
        let meta = attrs.metadata();
        self.spans
            .lock()
            .expect("span capture lock")
            .push((meta.name(), *meta.level()));
    }
}

fn node(id: u64) -> NodeRef {
    NodeRef::new(NodeId(id), Rect::new(0, 0, 4, 1))
}

#[test]
fn each_step_logs_its_outcome_at_trace() {
    let mut tree = ComponentTree::new();
    tree.insert(UiElement::grid("btn1", RefSlot::mounted(node(1))));
    tree.insert(UiElement::grid("table1", RefSlot::new()));
    let steps = vec![
        StepConfig::new("btn1"),
        StepConfig::new("table1"),
        StepConfig::new("ghost"),
        StepConfig::new(""),
    ];

    let events = capture(|| {
        let out = materialize(&steps, &tree.snapshot());
        assert_eq!(out.len(), 4);
    });

    let outcomes: Vec<_> = events
        .iter()
        .filter(|e| e.message() == Some("tour.step.resolve"))
        .map(|e| {
            assert_eq!(e.level, tracing::Level::TRACE);
            e.fields.get("outcome").cloned().unwrap_or_default()
        })
        .collect();
    assert_eq!(outcomes, vec!["resolved", "detached", "not_found", "unnamed"]);

    assert!(
        events
            .iter()
            .all(|e| e.level != tracing::Level::WARN && e.level != tracing::Level::ERROR)
    );
}

#[test]
fn duplicate_names_are_reported_once_per_pass() {
    let mut tree = ComponentTree::new();
    tree.insert(UiElement::grid("btn1", RefSlot::mounted(node(1))));
    tree.insert(UiElement::grid("btn1", RefSlot::mounted(node(2))));

    let events = capture(|| {
        let out = materialize(&[StepConfig::new("btn1")], &tree.snapshot());
        assert_eq!(out[0].target, Some(node(1)));
    });

    let dupes: Vec<_> = events
        .iter()
        .filter(|e| e.message() == Some("tour.registry.duplicate_names"))
        .collect();
    assert_eq!(dupes.len(), 1);
    assert_eq!(dupes[0].level, tracing::Level::DEBUG);
}

#[test]
fn open_and_close_transitions_log_at_debug() {
    let comp = TourComp::default();
    let events = capture(|| {
        comp.start_tour();
        comp.control().close();
    });

    let messages: Vec<_> = events
        .iter()
        .filter(|e| e.level == tracing::Level::DEBUG)
        .filter_map(CapturedEvent::message)
        .collect();
    assert_eq!(
        messages,
        vec!["tour.open", "tour.close.requested", "tour.close"]
    );
}

#[test]
fn unknown_placement_is_debug_not_error() {
    let events = capture(|| {
        let out = materialize(
            &[StepConfig::new("x").placement("diagonal")],
            &ComponentTree::new().snapshot(),
        );
        assert!(out[0].placement.is_none());
    });

    let unknown = events
        .iter()
        .find(|e| e.message() == Some("tour.option.unknown"))
        .expect("unknown option logged");
    assert_eq!(unknown.level, tracing::Level::DEBUG);
    assert_eq!(unknown.fields.get("value").map(String::as_str), Some("diagonal"));
}

#[test]
fn state_propagation_span_is_trace() {
    let spans = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(SpanCapture {
        spans: Arc::clone(&spans),
    });

    tracing::subscriber::with_default(subscriber, || {
        let open = Observable::new(false);
        let _sub = open.subscribe(|_| {});
        open.set(true);
        // Unchanged value: no notification, no span.
        open.set(true);
    });

    let deltas: Vec<_> = spans
        .lock()
        .expect("span capture lock")
        .iter()
        .filter(|(name, _)| *name == "tour.state.delta")
        .map(|(_, level)| *level)
        .collect();
    assert_eq!(deltas, vec![tracing::Level::TRACE]);
}
