use std::sync::Mutex;

use crate::models::StepEvent;

/// Receives pipeline progress events as they happen.
pub trait IProgressSink: Send + Sync {
    fn emit(&self, event: &StepEvent);
}

/// Discards every event.
#[derive(Debug, Default)]
pub struct NoopProgressSink;

impl IProgressSink for NoopProgressSink {
    fn emit(&self, _event: &StepEvent) {}
}

/// Buffers events for callers that poll instead of stream.
#[derive(Debug, Default)]
pub struct CollectingProgressSink {
    events: Mutex<Vec<StepEvent>>,
}

impl CollectingProgressSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all buffered events.
    pub fn drain(&self) -> Vec<StepEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl IProgressSink for CollectingProgressSink {
    fn emit(&self, event: &StepEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PipelineStep;

    #[test]
    fn collecting_sink_drains_in_order() {
        let sink = CollectingProgressSink::new();
        sink.emit(&StepEvent::started(PipelineStep::Routing));
        sink.emit(&StepEvent::complete(PipelineStep::Routing, "qa"));

        let events = sink.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].detail.as_deref(), Some("qa"));
        assert!(sink.drain().is_empty());
    }
}
