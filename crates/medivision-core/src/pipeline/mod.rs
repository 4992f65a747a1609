//! Request/response pipeline.
//!
//! Control flow for one analysis:
//! prompt assembly → gateway stream → accumulation → ledger.

pub mod accumulator;
pub mod analysis;
pub mod gateway;
pub mod ledger;
pub mod prompt;
pub mod render;

pub use accumulator::{accumulate, Accumulated, StreamOutcome};
pub use ledger::{calculate_cost, estimate_tokens, generate_title, History};
pub use prompt::{PromptPart, PromptRequest};
