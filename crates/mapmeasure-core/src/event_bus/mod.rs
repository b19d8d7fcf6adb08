//! # Event Bus Module
//!
//! Decoupled notifications from the measurement tools to their host view.
//!
//! ## Overview
//!
//! - The tool controller publishes typed [`MapEvent`]s as sessions start,
//!   finalize or get cancelled
//! - Hosts subscribe with a category filter and react (refresh a counter,
//!   log, replay)
//! - Dispatch is synchronous and single-threaded
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mapmeasure_core::event_bus::{EventBus, EventCategory, EventFilter, MapEvent};
//!
//! let bus = EventBus::new();
//! let subscription = bus.subscribe(
//!     EventFilter::Categories(vec![EventCategory::Measurement]),
//!     |event| println!("{}", event.description()),
//! );
//!
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
