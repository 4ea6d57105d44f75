use std::sync::Mutex;

use cid_core::{ISolverObserver, SolverEvent};

use super::events;

/// Forwards every solver event to `tracing` at warn level. The default observer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ISolverObserver for TracingObserver {
    fn on_event(&self, event: &SolverEvent) {
        match event {
            SolverEvent::DistributionReplaced { variable } => events::distribution_replaced(variable),
            SolverEvent::InsufficientRecall {
                decision,
                earlier_decision,
                utility,
            } => events::insufficient_recall(decision, earlier_decision, utility),
            SolverEvent::AllActionsOptimal { decision, context } => {
                events::all_actions_optimal(decision, context)
            }
        }
    }
}

/// Keeps every event in memory, in arrival order.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<SolverEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events seen so far.
    pub fn events(&self) -> Vec<SolverEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Number of events named `name` (see [`SolverEvent::name`]).
    pub fn count(&self, name: &str) -> usize {
        self.events().iter().filter(|e| e.name() == name).count()
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

impl ISolverObserver for RecordingObserver {
    fn on_event(&self, event: &SolverEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
