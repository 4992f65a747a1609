//! Configuration types and selection enums.

mod app;
mod enums;

pub use app::{AppConfig, CostRates, GenerationSettings, DEFAULT_API_BASE_URL, HARM_CATEGORIES};
pub use enums::{ImageFormat, InputMode};
