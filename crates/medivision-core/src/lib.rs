//! # MediVision Core
//!
//! The request/response pipeline behind the MediVision assistant.
//!
//! ```text
//! medivision-core/src/
//! ├── pipeline/
//! │   ├── prompt.rs       # prompt parts, system prompt, styles, regeneration
//! │   ├── gateway/        # ModelGateway trait + Gemini HTTP client
//! │   ├── accumulator.rs  # drains a chunk stream into a growing buffer
//! │   ├── ledger.rs       # token/cost estimates, history titles, capped history
//! │   ├── render.rs       # icon annotation of finished lines, code sections
//! │   └── analysis.rs     # one end-to-end analysis per call
//! ├── session.rs          # per-session context (usage, history, feedback, key)
//! ├── security.rs         # session-keyed API key encryption
//! ├── export.rs           # Markdown report export
//! ├── media.rs            # image intake and format sniffing
//! └── modules/            # config persistence, logging setup
//! ```
//!
//! There is no process-wide state: every pipeline call takes the
//! [`SessionContext`] it mutates.

#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::print_stdout,
        clippy::float_cmp,
        clippy::unwrap_used,
        clippy::expect_used
    )
)]

pub mod error;
pub mod export;
pub mod media;
pub mod modules;
pub mod pipeline;
pub mod security;
pub mod session;

// Re-export commonly used types
pub use error::{AppError, AppResult};
pub use pipeline::analysis::{regenerate, run_analysis, AnalysisReport, AnalysisRequest};
pub use pipeline::gateway::{GeminiClient, GenerativeModel, ModelGateway};
pub use session::SessionContext;
