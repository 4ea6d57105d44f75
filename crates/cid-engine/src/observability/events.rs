//! Structured log events for solver operations.
//!
//! Each function emits a `tracing` event with structured fields.

use cid_core::Context;

/// Log a distribution being attached to a node.
pub fn distribution_attached(variable: &str, kind: &str) {
    tracing::debug!(
        event = "distribution_attached",
        variable = %variable,
        kind = %kind,
        "distribution attached"
    );
}

/// Log a distribution being replaced.
pub fn distribution_replaced(variable: &str) {
    tracing::warn!(
        event = "distribution_replaced",
        variable = %variable,
        "replacing existing distribution"
    );
}

/// Log a materialization left pending until a parent's states are known.
pub fn materialization_deferred(variable: &str) {
    tracing::debug!(
        event = "materialization_deferred",
        variable = %variable,
        "materialization deferred until parent states are known"
    );
}

/// Log a recall failure.
pub fn insufficient_recall(decision: &str, earlier_decision: &str, utility: &str) {
    tracing::warn!(
        event = "insufficient_recall",
        decision = %decision,
        earlier_decision = %earlier_decision,
        utility = %utility,
        "insufficient recall"
    );
}

/// Log a context in which no action had a defined expected utility.
pub fn all_actions_optimal(decision: &str, context: &Context) {
    tracing::warn!(
        event = "all_actions_optimal",
        decision = %decision,
        context = %context,
        "zero probability context, all actions deemed optimal"
    );
}

/// Log a decision rule computed by the solver.
pub fn decision_solved(decision: &str, contexts: usize) {
    tracing::info!(
        event = "decision_solved",
        decision = %decision,
        contexts = contexts,
        "decision rule computed"
    );
}
