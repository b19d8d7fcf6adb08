//! Event Bus implementation.
//!
//! The measurement tools live on the UI thread, so the bus is
//! single-threaded: handlers are plain `Fn` closures and may capture `Rc`
//! state. Handlers are allowed to publish or (un)subscribe while being
//! dispatched. Handlers run in the order they subscribed.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::rc::Rc;

use super::events::{EventCategory, MapEvent};

/// Handle returned by [`EventBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub#{}", self.0)
    }
}

/// Which events a subscriber wants
#[derive(Debug, Clone, Default)]
pub enum EventFilter {
    #[default]
    All,
    /// Any event whose category is listed
    Categories(Vec<EventCategory>),
}

impl EventFilter {
    pub fn matches(&self, event: &MapEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Categories(categories) => categories.contains(&event.category()),
        }
    }
}

type EventHandler = Rc<dyn Fn(&MapEvent)>;

struct Subscriber {
    filter: EventFilter,
    handler: EventHandler,
}

/// History settings for an [`EventBus`]
#[derive(Debug, Clone)]
pub struct EventBusConfig {
    /// Record published events for later inspection
    pub enable_history: bool,
    /// Oldest events are dropped beyond this many
    pub max_history_size: usize,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            enable_history: false,
            max_history_size: 256,
        }
    }
}

/// Publish/subscribe hub for [`MapEvent`]s
pub struct EventBus {
    subscribers: RefCell<BTreeMap<SubscriptionId, Subscriber>>,
    next_id: Cell<u64>,
    history: RefCell<VecDeque<MapEvent>>,
    config: EventBusConfig,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_config(EventBusConfig::default())
    }

    pub fn with_config(config: EventBusConfig) -> Self {
        Self {
            subscribers: RefCell::new(BTreeMap::new()),
            next_id: Cell::new(0),
            history: RefCell::new(VecDeque::new()),
            config,
        }
    }

    /// Deliver `event` to every matching subscriber.
    ///
    /// Returns how many handlers ran.
    pub fn publish(&self, event: MapEvent) -> usize {
        tracing::trace!("{}", event.description());

        if self.config.enable_history {
            self.record(&event);
        }

        // Snapshot so handlers can touch the bus re-entrantly.
        let targets: Vec<EventHandler> = self
            .subscribers
            .borrow()
            .values()
            .filter(|s| s.filter.matches(&event))
            .map(|s| Rc::clone(&s.handler))
            .collect();

        for handler in &targets {
            handler(&event);
        }
        targets.len()
    }

    pub fn subscribe<F>(&self, filter: EventFilter, handler: F) -> SubscriptionId
    where
        F: Fn(&MapEvent) + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.subscribers.borrow_mut().insert(
            id,
            Subscriber {
                filter,
                handler: Rc::new(handler),
            },
        );
        tracing::debug!("Subscription {} added", id);
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.subscribers.borrow_mut().remove(&id).is_some();
        if removed {
            tracing::debug!("Subscription {} removed", id);
        }
        removed
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    /// Recorded events, oldest first. Empty unless history is enabled.
    pub fn history(&self) -> Vec<MapEvent> {
        self.history.borrow().iter().cloned().collect()
    }

    pub fn clear_history(&self) {
        self.history.borrow_mut().clear();
    }

    pub fn config(&self) -> &EventBusConfig {
        &self.config
    }

    fn record(&self, event: &MapEvent) {
        let mut history = self.history.borrow_mut();
        history.push_back(event.clone());
        while history.len() > self.config.max_history_size {
            history.pop_front();
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .field("config", &self.config)
            .finish()
    }
}
