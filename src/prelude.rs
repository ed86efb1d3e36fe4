//! Common types re-exported for convenience.

pub use crate::game::GameState;
pub use crate::score::{Evaluation, Score};
pub use crate::search::{
    begin, begin_traced, best_action, best_action_traced, resume, resume_traced, PausedSearch,
    Request, Response, SearchContext, SearchResult, Turn,
};
pub use crate::trace::{LogTracer, NoOpTracer, SearchTracer};
