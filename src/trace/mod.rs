//! Optional search instrumentation.
//!
//! A tracer is an explicitly passed collaborator that receives every node
//! expansion and every evaluated action, purely for external debugging and
//! visualization. It is write-only from the engine's perspective: the engine
//! never reads tracer state back, and tracing must not affect search
//! results.

use std::fmt::Debug;

use log::debug;

use crate::game::GameState;
use crate::score::Score;

/// Observes a search as it runs.
pub trait SearchTracer<S: GameState> {
    /// Called once per expanded node, with the actions about to be explored
    /// in their original sorted order.
    fn on_actions_enumerated(&mut self, _state: &S, _actions: &[S::Action]) {}

    /// Called after an action's subtree has resolved. `score` is the worth
    /// of taking `action` from `state`, seen by the player to move at
    /// `state` (already reversed from the child's perspective).
    fn on_action_evaluated(
        &mut self,
        _state: &S,
        _action: &S::Action,
        _child: &S,
        _score: &Score<S::Eval>,
    ) {
    }
}

/// A tracer that does nothing; the default collaborator.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpTracer;

impl<S: GameState> SearchTracer<S> for NoOpTracer {}

/// A tracer that writes every event to the `log` facade at debug level.
///
/// Useful when an engine pick looks wrong and you suspect the domain's
/// scoring: run the search once with `RUST_LOG=debug` and read the
/// evaluation transcript.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogTracer;

impl<S> SearchTracer<S> for LogTracer
where
    S: GameState + Debug,
{
    fn on_actions_enumerated(&mut self, state: &S, actions: &[S::Action]) {
        debug!("expand {:?}: {} actions {:?}", state, actions.len(), actions);
    }

    fn on_action_evaluated(
        &mut self,
        state: &S,
        action: &S::Action,
        child: &S,
        score: &Score<S::Eval>,
    ) {
        debug!(
            "evaluated {:?} -> {:?} = {:?} (child {:?})",
            state, action, score, child
        );
    }
}
