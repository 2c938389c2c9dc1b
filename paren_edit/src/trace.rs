//! Structured decision trace
//!
//! Decisions are logged as typed events, not text. The trace is an
//! in-memory ring the host reads or drains; there is no I/O and no global
//! logger.

use std::collections::VecDeque;

use crate::classify::EditAction;

/// Upper bound on retained events; the oldest are dropped first
const TRACE_CAPACITY: usize = 256;

/// A single traced decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEvent {
    /// Classifier selected an action
    ActionSelected(EditAction),
    /// Arity wrap found too few siblings and degraded to a bare-word wrap
    ArityFallback { requested: usize },
    /// Toggle invocation routed to undo; `restored` is false on the no-op
    UndoToggled { restored: bool },
    /// Unwrap rejected; the buffer was left untouched
    EditRejected,
}

/// Bounded in-memory trace of editor decisions
#[derive(Debug, Default)]
pub struct DecisionTrace {
    events: VecDeque<TraceEvent>,
}

impl DecisionTrace {
    pub fn new() -> Self {
        Self {
            events: VecDeque::new(),
        }
    }

    pub fn push(&mut self, event: TraceEvent) {
        if self.events.len() == TRACE_CAPACITY {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    pub fn events(&self) -> impl Iterator<Item = &TraceEvent> {
        self.events.iter()
    }

    pub fn last(&self) -> Option<&TraceEvent> {
        self.events.back()
    }

    /// Drains all retained events
    pub fn take(&mut self) -> Vec<TraceEvent> {
        self.events.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
