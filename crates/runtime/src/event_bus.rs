use crate::frame::Frame;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EventKind {
    SeriesIngested,
    ClaimsIngested,
    AnnotationSpawned,
    AnnotationRetired,
    PlacementFallback,
}

/// Traceable record of something the tick loop or an ingest did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub frame_index: u64,
    pub kind: EventKind,
    pub message: String,
}

/// Append-only log of [`Event`]s, drained by the host between ticks.
#[derive(Debug, Default)]
pub struct EventBus {
    events: Vec<Event>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, frame_index: u64, kind: EventKind, message: impl Into<String>) {
        self.events.push(Event {
            frame_index,
            kind,
            message: message.into(),
        });
    }

    pub fn emit_at(&mut self, frame: Frame, kind: EventKind, message: impl Into<String>) {
        self.emit(frame.index, kind, message);
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }

    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}
