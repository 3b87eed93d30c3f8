//! Conversation layer: input validation, loading gate, transcript and terminal rendering.

pub(crate) mod render;
pub(crate) mod repl;
mod session;

pub use session::ChatSession;
