//! Synchronous alpha-beta negamax search.
//!
//! # Core Algorithm
//!
//! Alpha-beta pruning is an optimization of minimax search that maintains a
//! window [alpha, beta] of scores that can still matter. Branches proven to
//! fall outside the window are cut off without affecting the final result:
//! the algorithm returns the same action and score as a full-width search
//! while exploring fewer nodes.
//!
//! The negamax formulation keeps every score from the point of view of the
//! player to move and reverses it once per ply, so a single maximizing loop
//! serves both sides. Descending into a child swaps and reverses the window
//! (`new_alpha = beta.reversed()`, `new_beta = alpha.reversed()`).

use log::debug;

use crate::game::GameState;
use crate::score::Score;
use crate::trace::{NoOpTracer, SearchTracer};

/// Search configuration parameters.
struct SearchConfig {
    depth: u32,
}

/// Statistics collected during search.
#[derive(Default)]
struct SearchStats {
    position_count: usize,
    leaf_count: usize,
    cutoff_count: usize,
}

/// Depth configuration and counters for one or more searches.
///
/// Counters accumulate across calls; use
/// [`reset_stats`](SearchContext::reset_stats) between searches when
/// measuring a single run.
pub struct SearchContext {
    config: SearchConfig,
    stats: SearchStats,
}

impl SearchContext {
    /// A context that searches `depth` plies deep.
    pub fn new(depth: u32) -> Self {
        Self {
            config: SearchConfig { depth },
            stats: SearchStats::default(),
        }
    }

    /// A context with no depth limit: recursion terminates only where the
    /// game has no further moves. Suitable for small game trees.
    pub fn unbounded() -> Self {
        Self::new(u32::MAX)
    }

    pub fn search_depth(&self) -> u32 {
        self.config.depth
    }

    /// Positions visited, terminal and interior alike.
    pub fn searched_position_count(&self) -> usize {
        self.stats.position_count
    }

    /// Positions scored directly (depth exhausted or no moves).
    pub fn leaf_count(&self) -> usize {
        self.stats.leaf_count
    }

    /// Times the alpha-beta window closed with actions still unexamined.
    pub fn cutoff_count(&self) -> usize {
        self.stats.cutoff_count
    }

    pub fn reset_stats(&mut self) {
        self.stats = SearchStats::default();
    }
}

/// The outcome of a search: the winning first-ply action and its score from
/// the root mover's perspective.
///
/// `action` is `None` only when the root position itself was terminal — no
/// legal moves, or a zero depth budget.
pub struct SearchResult<S: GameState> {
    pub action: Option<S::Action>,
    pub score: Score<S::Eval>,
}

impl<S: GameState> Clone for SearchResult<S> {
    fn clone(&self) -> Self {
        Self {
            action: self.action.clone(),
            score: self.score.clone(),
        }
    }
}

impl<S: GameState> std::fmt::Debug for SearchResult<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchResult")
            .field("action", &self.action)
            .field("score", &self.score)
            .finish()
    }
}

/// Computes the optimal move from `root`.
///
/// Pure and total given a well-formed [`GameState`] implementation: a root
/// with no legal moves yields `(None, root.score())` rather than an error,
/// and contract violations by the domain (non-deterministic move order, a
/// cycle of positions) are domain defects, not conditions the engine
/// detects or recovers from.
pub fn best_action<S: GameState>(context: &mut SearchContext, root: &S) -> SearchResult<S> {
    best_action_traced(context, root, &mut NoOpTracer)
}

/// Same as [`best_action`], reporting every expansion and evaluation to
/// `tracer`.
pub fn best_action_traced<S, T>(
    context: &mut SearchContext,
    root: &S,
    tracer: &mut T,
) -> SearchResult<S>
where
    S: GameState,
    T: SearchTracer<S>,
{
    debug!("alpha-beta search to depth {}", context.search_depth());
    let depth = context.search_depth();
    negamax(context, root, depth, Score::Min, Score::Max, tracer)
}

fn negamax<S, T>(
    context: &mut SearchContext,
    state: &S,
    depth: u32,
    mut alpha: Score<S::Eval>,
    beta: Score<S::Eval>,
    tracer: &mut T,
) -> SearchResult<S>
where
    S: GameState,
    T: SearchTracer<S>,
{
    context.stats.position_count += 1;

    // Terminal: score the position for its own mover, unreversed. The caller
    // one ply up reverses it.
    if depth == 0 || !state.has_moves() {
        context.stats.leaf_count += 1;
        return SearchResult {
            action: None,
            score: state.score(),
        };
    }

    let actions = state.sorted_actions();
    tracer.on_actions_enumerated(state, &actions);

    let mut best_action = None;
    let mut best_score = Score::Min;

    for (index, action) in actions.iter().enumerate() {
        let child = state.create_child(action);
        let child_result = negamax(
            context,
            &child,
            depth - 1,
            beta.reversed(),
            alpha.reversed(),
            tracer,
        );
        let score = child_result.score.reversed();
        tracer.on_action_evaluated(state, action, &child, &score);

        // First candidate or strictly greater; never replace on ties, so the
        // earliest of equals wins.
        if best_action.is_none() || score.is_greater_than(&best_score) {
            best_score = score;
            best_action = Some(action.clone());
        }

        alpha = Score::max(alpha, best_score.clone());
        if alpha.is_greater_or_equal(&beta) {
            if index + 1 < actions.len() {
                context.stats.cutoff_count += 1;
            }
            break;
        }
    }

    SearchResult {
        action: best_action,
        score: best_score,
    }
}
