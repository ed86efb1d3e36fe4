//! Domain contract for adversarial search.
//!
//! A game plugs into the engine by implementing [`GameState`] for its
//! position type: a termination test, legal moves in a fixed deterministic
//! order, and a pure transition function. The engine owns everything else.

use std::fmt::Debug;

use crate::score::{Evaluation, Score};

/// One position of a deterministic, perfect-information, two-player
/// zero-sum game.
///
/// The root position is supplied by the caller; every other position is
/// derived on demand through [`create_child`](GameState::create_child) and
/// discarded once its subtree has been explored. The engine keeps no
/// references to positions after a search returns.
///
/// Positions are never mutated by the engine, so unrelated searches may run
/// on separate threads without synchronization as long as each has its own
/// state graph.
pub trait GameState: Sized {
    /// An opaque legal-move token. The engine never inspects it beyond
    /// handing it back to [`create_child`](GameState::create_child) and
    /// returning the winning one to the caller. `Debug` is required only so
    /// instrumentation can print it.
    type Action: Clone + Debug;

    /// The domain's score payload.
    type Eval: Evaluation;

    /// Whether the player to move has any legal moves.
    fn has_moves(&self) -> bool;

    /// The worth of this position *to the player to move* — not a globally
    /// absolute value. The engine reverses it once per ply on the way back
    /// up the tree.
    fn score(&self) -> Score<Self::Eval>;

    /// All legal moves, in a fixed deterministic order.
    ///
    /// The order matters twice over. It is the tie-break order: of two
    /// score-equal candidates the engine keeps the one that appeared
    /// earlier and never replaces on ties. And it is the move-ordering
    /// hook: putting the best guess first materially increases alpha-beta
    /// cutoffs. Ordering affects speed, never correctness.
    fn sorted_actions(&self) -> Vec<Self::Action>;

    /// The position reached by applying `action` to this one. Must be pure:
    /// the same (state, action) pair always yields an equivalent child.
    fn create_child(&self, action: &Self::Action) -> Self;
}
