#![forbid(unsafe_code)]

//! Structured log events emitted by reference extraction.
//!
//! A category tag that disagrees with the element's shape is a recoverable
//! condition: it must appear as a TRACE `tour.extract.fallback` event with
//! the tag and shape recorded, and nothing above TRACE.
//!
//! Run:
//!   cargo test -p ftui-tour-core --test tracing_extract_events

use std::collections::HashMap;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use ftui_tour_core::{
    ElementCategory, ElementHandle, NodeId, NodeRef, Rect, RefSlot, UiElement, extract_ref,
};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    fields: HashMap<String, String>,
}

impl CapturedEvent {
    fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
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

fn node(id: u64) -> NodeRef {
    NodeRef::new(NodeId(id), Rect::new(0, 0, 6, 1))
}

fn fallbacks(events: &[CapturedEvent]) -> Vec<&CapturedEvent> {
    events
        .iter()
        .filter(|e| e.field("message") == Some("tour.extract.fallback"))
        .collect()
}

#[test]
fn mismatched_tag_logs_fallback_at_trace() {
    let el = Rc::new(UiElement::grid("btn1", RefSlot::mounted(node(2))));
    let handle = ElementHandle::tagged(&el, ElementCategory::HookBased);

    let events = capture(|| {
        assert_eq!(extract_ref(&handle), Some(node(2)));
    });

    let fallback = fallbacks(&events);
    assert_eq!(fallback.len(), 1);
    assert_eq!(fallback[0].level, tracing::Level::TRACE);
    assert_eq!(fallback[0].field("element"), Some("btn1"));
    assert_eq!(fallback[0].field("tag"), Some("hook"));
    assert_eq!(fallback[0].field("shape"), Some("grid"));
    assert!(events.iter().all(|e| e.level == tracing::Level::TRACE));
}

#[test]
fn matching_tag_logs_nothing() {
    let grid = Rc::new(UiElement::grid("btn1", RefSlot::mounted(node(1))));
    let hook = Rc::new(UiElement::hook("modal1", RefSlot::new()));

    let events = capture(|| {
        assert_eq!(extract_ref(&grid.handle()), Some(node(1)));
        assert_eq!(extract_ref(&hook.handle()), None);
    });

    assert!(fallbacks(&events).is_empty());
}

#[test]
fn other_tag_never_falls_back() {
    let el = Rc::new(UiElement::hook("drawer1", RefSlot::mounted(node(3))));
    let handle = ElementHandle::tagged(&el, ElementCategory::Other);

    let events = capture(|| {
        assert_eq!(extract_ref(&handle), None);
    });

    assert!(fallbacks(&events).is_empty());
}
