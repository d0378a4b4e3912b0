//! Single-consumer dispatch.
//!
//! Server events, timer ticks and local input all land on one FIFO queue.
//! [`Dispatcher::drain`] handles them one at a time; each handler runs to
//! completion and its notifications reach the sink only after it returns, so
//! a sink can never re-enter the engine mid-transition.

use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::{EngineError, Event, Notification, ReconciliationEngine};

/// Consumer of outbound notifications (renderer, network sender, recorder).
pub trait NotificationSink {
    fn deliver(&mut self, notification: Notification);
}

impl NotificationSink for Vec<Notification> {
    fn deliver(&mut self, notification: Notification) {
        self.push(notification);
    }
}

/// A local event the engine refused.
#[derive(Debug, Clone, PartialEq)]
pub struct Refusal {
    pub event: Event,
    pub error: EngineError,
}

#[derive(Debug)]
pub struct Dispatcher {
    engine: ReconciliationEngine,
    queue: VecDeque<Event>,
}

impl Dispatcher {
    pub fn new(engine: ReconciliationEngine) -> Self {
        Self {
            engine,
            queue: VecDeque::new(),
        }
    }

    pub fn engine(&self) -> &ReconciliationEngine {
        &self.engine
    }

    pub fn enqueue(&mut self, event: Event) {
        self.queue.push_back(event);
    }

    pub fn queued_events(&self) -> usize {
        self.queue.len()
    }

    /// Handle everything queued so far, in arrival order. Refused local
    /// events are logged and returned; they do not stop the drain.
    pub fn drain(&mut self, sink: &mut dyn NotificationSink) -> Vec<Refusal> {
        let mut refusals = Vec::new();
        while let Some(event) = self.queue.pop_front() {
            if let Err(error) = self.step(event.clone(), sink) {
                refusals.push(Refusal { event, error });
            }
        }
        refusals
    }

    /// Enqueue one event and drain.
    ///
    /// # Errors
    /// The first refusal produced by the drain, if any.
    pub fn dispatch(
        &mut self,
        event: Event,
        sink: &mut dyn NotificationSink,
    ) -> Result<(), EngineError> {
        self.enqueue(event);
        match self.drain(sink).into_iter().next() {
            Some(r) => Err(r.error),
            None => Ok(()),
        }
    }

    fn step(&mut self, event: Event, sink: &mut dyn NotificationSink) -> Result<(), EngineError> {
        let name = event.name();
        match self.engine.handle(event) {
            Ok(notifications) => {
                debug!(event = name, count = notifications.len(), "delivered");
                for n in notifications {
                    sink.deliver(n);
                }
                Ok(())
            }
            Err(error) => {
                warn!(event = name, %error, "local event refused");
                Err(error)
            }
        }
    }
}
