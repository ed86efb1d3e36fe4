//! Resumable alpha-beta search.
//!
//! Deep trees searched under a wall-clock budget must be able to stop
//! mid-traversal and pick up later from exactly the same point, without
//! re-deriving already-explored subtrees. To get there, the recursive
//! descent of the synchronous engine is reified: each ply in progress is a
//! frame holding the position, the not-yet-tried actions, the current
//! alpha-beta window, and the best candidate so far. When the budget
//! expires, the root-to-leaf chain of frames is frozen into a
//! [`PausedSearch`]; resuming rebuilds the chain and continues the
//! alpha-beta loop at the exact action index where it stopped.
//!
//! Suspension is cooperative, at action boundaries of the deepest active
//! ply. The deadline is consulted only after an action's subtree resolves,
//! so every invocation completes at least one leaf — repeated resumption
//! with a zero budget still terminates. There is no timeout enforcement
//! inside a single action's subtree; callers needing tighter latency bounds
//! must bound the search depth accordingly.
//!
//! A search that runs to completion, across any number of pauses or none,
//! returns the identical action and score as [`best_action`] on the same
//! inputs.
//!
//! [`best_action`]: super::best_action

use std::fmt;
use std::time::{Duration, Instant};

use log::debug;
use smallvec::SmallVec;

use crate::game::GameState;
use crate::score::Score;
use crate::trace::{NoOpTracer, SearchTracer};

use super::SearchResult;

/// Which side a ply belongs to: the caller the search is computed for, or
/// the opponent. Alternates every ply starting from `Invoker` at the root.
///
/// Bookkeeping only: scores are always kept from the mover's perspective,
/// so the engine never branches on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    Invoker,
    Opponent,
}

impl Turn {
    pub fn other(self) -> Turn {
        match self {
            Turn::Invoker => Turn::Opponent,
            Turn::Opponent => Turn::Invoker,
        }
    }
}

type ActionList<A> = SmallVec<[A; 8]>;

/// A search to run, with an optional per-invocation wall-clock budget.
pub struct Request<S: GameState> {
    root: S,
    depth: u32,
    budget: Option<Duration>,
}

impl<S: GameState> Request<S> {
    /// Search `depth` plies deep from `root`.
    pub fn new(root: S, depth: u32) -> Self {
        Self {
            root,
            depth,
            budget: None,
        }
    }

    /// Search the whole game tree from `root`.
    pub fn unbounded(root: S) -> Self {
        Self::new(root, u32::MAX)
    }

    /// Limit each invocation to roughly `budget` of wall-clock time. The
    /// budget applies to [`begin`] and to every subsequent [`resume`] of the
    /// snapshots it produces.
    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = Some(budget);
        self
    }
}

/// The outcome of one engine invocation.
pub enum Response<S: GameState> {
    /// The search ran to completion; the result is exactly what the
    /// synchronous engine would have returned.
    Resolved(SearchResult<S>),
    /// The budget expired mid-traversal. Resume the snapshot to continue,
    /// or drop it to cancel the search.
    Paused(PausedSearch<S>),
}

/// A suspended search, frozen at the exact point of suspension.
pub struct PausedSearch<S: GameState> {
    root_frame: Frame<S>,
    budget: Option<Duration>,
    fraction_completed: f64,
}

impl<S: GameState> PausedSearch<S> {
    /// Estimated share of the whole search already resolved, in `[0, 1]`.
    ///
    /// Non-decreasing across the sequence of snapshots produced by one
    /// logical search, which makes it safe to drive a progress bar.
    pub fn fraction_completed(&self) -> f64 {
        self.fraction_completed
    }

    /// Replace the wall-clock budget applied to subsequent resumptions.
    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = Some(budget);
        self
    }
}

impl<S: GameState> fmt::Debug for PausedSearch<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PausedSearch")
            .field("fraction_completed", &self.fraction_completed)
            .field("budget", &self.budget)
            .finish()
    }
}

/// One ply of an in-progress search.
///
/// Invariant: when `child` is present, `remaining[0]` is the action that
/// produced it; the action is popped only once its subtree resolves.
/// `base` and `span` locate this frame's share of the whole search inside
/// `[0, 1]`: the root spans everything, and each child owns an equal slice
/// of its parent's span, which keeps the completion estimate monotone.
struct Frame<S: GameState> {
    state: S,
    depth: u32,
    alpha: Score<S::Eval>,
    beta: Score<S::Eval>,
    turn: Turn,
    best_action: Option<S::Action>,
    best_score: Score<S::Eval>,
    remaining: ActionList<S::Action>,
    total: usize,
    base: f64,
    span: f64,
    child: Option<Box<Frame<S>>>,
}

impl<S: GameState> Frame<S> {
    fn resolved_actions(&self) -> usize {
        self.total - self.remaining.len()
    }

    fn current_fraction(&self) -> f64 {
        self.base + (self.resolved_actions() as f64 / self.total as f64) * self.span
    }
}

enum StepOutcome<S: GameState> {
    Resolved { result: SearchResult<S>, state: S },
    Paused(Frame<S>),
}

/// Starts a search. Returns `Resolved` if it finishes within the request's
/// budget (or the request has none), `Paused` otherwise.
pub fn begin<S: GameState>(request: Request<S>) -> Response<S> {
    begin_traced(request, &mut NoOpTracer)
}

/// Same as [`begin`], reporting events to `tracer`.
pub fn begin_traced<S, T>(request: Request<S>, tracer: &mut T) -> Response<S>
where
    S: GameState,
    T: SearchTracer<S>,
{
    let deadline = request.budget.map(|budget| Instant::now() + budget);
    let outcome = descend(
        request.root,
        request.depth,
        Score::Min,
        Score::Max,
        Turn::Invoker,
        0.0,
        1.0,
        deadline,
        tracer,
    );
    finish(outcome, request.budget)
}

/// Continues a paused search from its snapshot. Completed subtrees are not
/// re-derived; the alpha-beta loop picks up at the exact action where it
/// stopped.
pub fn resume<S: GameState>(paused: PausedSearch<S>) -> Response<S> {
    resume_traced(paused, &mut NoOpTracer)
}

/// Same as [`resume`], reporting events to `tracer`. Re-entered frames do
/// not fire `on_actions_enumerated` again.
pub fn resume_traced<S, T>(paused: PausedSearch<S>, tracer: &mut T) -> Response<S>
where
    S: GameState,
    T: SearchTracer<S>,
{
    let deadline = paused.budget.map(|budget| Instant::now() + budget);
    let outcome = run_frame(paused.root_frame, deadline, tracer);
    finish(outcome, paused.budget)
}

fn finish<S: GameState>(outcome: StepOutcome<S>, budget: Option<Duration>) -> Response<S> {
    match outcome {
        StepOutcome::Resolved { result, .. } => Response::Resolved(result),
        StepOutcome::Paused(root_frame) => {
            let mut deepest = &root_frame;
            while let Some(child) = deepest.child.as_deref() {
                deepest = child;
            }
            let fraction_completed = deepest.current_fraction();
            debug!(
                "search paused at {:.4} complete, deepest ply turn {:?}",
                fraction_completed, deepest.turn
            );
            Response::Paused(PausedSearch {
                root_frame,
                budget,
                fraction_completed,
            })
        }
    }
}

/// Enters a ply for the first time: scores terminals immediately, otherwise
/// enumerates the actions and runs the frame.
#[allow(clippy::too_many_arguments)]
fn descend<S, T>(
    state: S,
    depth: u32,
    alpha: Score<S::Eval>,
    beta: Score<S::Eval>,
    turn: Turn,
    base: f64,
    span: f64,
    deadline: Option<Instant>,
    tracer: &mut T,
) -> StepOutcome<S>
where
    S: GameState,
    T: SearchTracer<S>,
{
    // Terminals never pause; they resolve in place, scored for their own
    // mover, unreversed.
    if depth == 0 || !state.has_moves() {
        let score = state.score();
        return StepOutcome::Resolved {
            result: SearchResult {
                action: None,
                score,
            },
            state,
        };
    }

    let actions = state.sorted_actions();
    tracer.on_actions_enumerated(&state, &actions);
    let total = actions.len();

    run_frame(
        Frame {
            state,
            depth,
            alpha,
            beta,
            turn,
            best_action: None,
            best_score: Score::Min,
            remaining: ActionList::from_vec(actions),
            total,
            base,
            span,
            child: None,
        },
        deadline,
        tracer,
    )
}

/// The alpha-beta loop of one ply, resumable between actions.
fn run_frame<S, T>(mut frame: Frame<S>, deadline: Option<Instant>, tracer: &mut T) -> StepOutcome<S>
where
    S: GameState,
    T: SearchTracer<S>,
{
    while !frame.remaining.is_empty() {
        let child_outcome = match frame.child.take() {
            // Resuming: continue the in-progress child instead of rebuilding
            // its subtree from scratch.
            Some(saved) => run_frame(*saved, deadline, tracer),
            None => {
                let action = &frame.remaining[0];
                let child_state = frame.state.create_child(action);
                let child_span = frame.span / frame.total as f64;
                descend(
                    child_state,
                    frame.depth - 1,
                    frame.beta.reversed(),
                    frame.alpha.reversed(),
                    frame.turn.other(),
                    frame.current_fraction(),
                    child_span,
                    deadline,
                    tracer,
                )
            }
        };

        match child_outcome {
            StepOutcome::Paused(child) => {
                frame.child = Some(Box::new(child));
                return StepOutcome::Paused(frame);
            }
            StepOutcome::Resolved {
                result,
                state: child_state,
            } => {
                let action = frame.remaining.remove(0);
                let score = result.score.reversed();
                tracer.on_action_evaluated(&frame.state, &action, &child_state, &score);

                if frame.best_action.is_none() || score.is_greater_than(&frame.best_score) {
                    frame.best_score = score;
                    frame.best_action = Some(action);
                }

                frame.alpha = Score::max(frame.alpha.clone(), frame.best_score.clone());
                if frame.alpha.is_greater_or_equal(&frame.beta) {
                    // Cutoff: the unexamined actions cannot change the
                    // result. The candidate found so far stands.
                    break;
                }

                if !frame.remaining.is_empty() && deadline_expired(deadline) {
                    return StepOutcome::Paused(frame);
                }
            }
        }
    }

    StepOutcome::Resolved {
        result: SearchResult {
            action: frame.best_action,
            score: frame.best_score,
        },
        state: frame.state,
    }
}

fn deadline_expired(deadline: Option<Instant>) -> bool {
    deadline.map_or(false, |deadline| Instant::now() >= deadline)
}
