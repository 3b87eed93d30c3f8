//! Gemini API adapter: grounded travel queries and citation normalization.

pub(crate) mod client;
pub(crate) mod grounding;
pub(crate) mod types;

pub use client::{GeminiClient, GeminiError, GuideClient};
pub use types::{GuideResponse, Source};
