use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tracing::{error, info};

use crate::gemini::{GuideClient, Source};

pub const CONNECTION_ERROR_NOTICE: &str =
    "I'm having trouble connecting to the satellite uplink (network error). Please try again.";

pub const SAMPLE_QUERIES: &[&str] = &[
    "What's the weather like in Marrakech this week?",
    "Best time to visit Kyoto",
    "Entry fee for the Louvre today",
    "Hidden food spots in Lisbon",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub id: u64,
    pub role: Role,
    pub text: String,
    pub sources: Vec<Source>,
    pub is_error: bool,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SendError {
    #[error("message must not be empty")]
    EmptyInput,
    #[error("a question is already being answered")]
    Busy,
}

/// One conversation: a transcript plus a gate allowing a single outstanding query.
///
/// The adapter keeps no conversation state; every turn is sent on its own.
pub struct ChatSession<C> {
    client: C,
    messages: Mutex<Vec<ChatMessage>>,
    next_id: AtomicU64,
    loading: AtomicBool,
}

/// Holds the loading gate; dropping it reopens the session on every exit path.
struct LoadingGuard<'a>(&'a AtomicBool);

impl<'a> LoadingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<C: GuideClient> ChatSession<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            messages: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            loading: AtomicBool::new(false),
        }
    }

    #[cfg(test)]
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.lock_messages().clone()
    }

    /// Sends one question and returns the reply appended to the transcript.
    ///
    /// Adapter failures never surface here: they are logged and replaced by
    /// an error message carrying [`CONNECTION_ERROR_NOTICE`].
    pub async fn send(&self, text: &str) -> Result<ChatMessage, SendError> {
        if text.trim().is_empty() {
            return Err(SendError::EmptyInput);
        }
        let _guard = LoadingGuard::acquire(&self.loading).ok_or(SendError::Busy)?;

        self.push(Role::User, text.to_string(), Vec::new(), false);

        let reply = match self.client.query(text).await {
            Ok(response) => {
                info!(sources = response.sources.len(), "answer received");
                self.push(Role::Model, response.text, response.sources, false)
            }
            Err(e) => {
                error!(error = %e, "query failed");
                self.push(
                    Role::Model,
                    CONNECTION_ERROR_NOTICE.to_string(),
                    Vec::new(),
                    true,
                )
            }
        };
        Ok(reply)
    }

    fn push(&self, role: Role, text: String, sources: Vec<Source>, is_error: bool) -> ChatMessage {
        let message = ChatMessage {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            role,
            text,
            sources,
            is_error,
        };
        self.lock_messages().push(message.clone());
        message
    }

    fn lock_messages(&self) -> std::sync::MutexGuard<'_, Vec<ChatMessage>> {
        // The transcript is only ever appended to, so a poisoned lock still holds valid data.
        self.messages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
