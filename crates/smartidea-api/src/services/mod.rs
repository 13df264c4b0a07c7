//! Request-independent services used by the handlers.

pub mod fallback;
pub mod generation;
pub mod prompts;
pub mod trends;

pub use generation::{is_masked, Orchestrator};
pub use trends::{load_related_queries, RelatedQueries};
