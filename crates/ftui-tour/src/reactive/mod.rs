#![forbid(unsafe_code)]

//! Reactive state cells shared between the host and the tour.

pub mod observable;

pub use observable::{Observable, Subscription};
