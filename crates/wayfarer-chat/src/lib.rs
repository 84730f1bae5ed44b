//! Conversational core of the Wayfarer travel-planning backend.
//!
//! Each chat turn runs the same pipeline: the session parser mines the
//! user utterance for trip parameters, the model client produces reply
//! text (live or canned), the extraction engine mines that text for
//! structured travel entities, and the enricher attaches flight and
//! hotel offers when the session is complete enough to book.

pub mod enrich;
pub mod error;
pub mod extract;
pub mod model;
pub mod orchestrator;
pub mod parser;

pub use enrich::Enricher;
pub use error::ChatError;
pub use extract::{Extraction, ExtractionEngine};
pub use model::{CannedResponder, CompletionProvider, HttpCompletionProvider, ModelClient};
pub use orchestrator::TurnOrchestrator;
pub use parser::SessionParser;
