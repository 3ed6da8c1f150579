//! Chat conversation scoped to a set of papers.

use crate::client::ExplorerClient;
use crate::error::ClientResult;
use crate::models::ChatMessage;

/// A conversation with the AI about a fixed set of papers.
///
/// The transcript grows only on successful exchanges: a failed send leaves the
/// history exactly as it was, so a retry resends the same context.
#[derive(Debug, Clone)]
pub struct ChatSession {
    pmids: Vec<String>,
    history: Vec<ChatMessage>,
}

impl ChatSession {
    /// Start a conversation about the given papers.
    #[must_use]
    pub fn new(pmids: Vec<String>) -> Self {
        Self { pmids, history: Vec::new() }
    }

    /// Papers this conversation is scoped to.
    #[must_use]
    pub fn pmids(&self) -> &[String] {
        &self.pmids
    }

    /// The transcript so far, oldest first.
    #[must_use]
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Send a message and return the assistant's reply.
    ///
    /// The accumulated history is sent with the message; on success both turns
    /// are appended to the transcript.
    ///
    /// # Errors
    ///
    /// Returns the facade error; the transcript is left unchanged.
    pub async fn send(&mut self, client: &ExplorerClient, message: &str) -> ClientResult<String> {
        let response = client.chat(&self.pmids, message, &self.history).await?;
        let reply = response.response;

        self.history.push(ChatMessage::user(message));
        self.history.push(ChatMessage::assistant(reply.clone()));

        Ok(reply)
    }
}
