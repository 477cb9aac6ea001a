//! Message/state contract of the in-app financial coach chat.
//!
//! The reply generator behind it is a pluggable [`responder::Responder`];
//! this module only owns the conversation state around it.

pub mod responder;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CoreError;
use responder::Responder;

/// How a chat entry is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
    Suggestion,
    Insight,
}

/// One chat entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub text: String,
    /// `true` for the user's own messages, `false` for the coach
    pub from_user: bool,
    pub timestamp: DateTime<Utc>,
    pub kind: MessageKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightCategory {
    Spending,
    Saving,
    Investing,
    Budgeting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightPriority {
    High,
    Medium,
    Low,
}

/// A generated observation about the user's finances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialInsight {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: InsightCategory,
    pub priority: InsightPriority,
    /// Whether the UI offers a follow-up action for it
    pub actionable: bool,
}

/// Greeting the conversation is seeded with (and reset to).
pub const GREETING: &str = "Hi! I'm your financial coach. I'm here to help you \
make better financial decisions. How can I assist you today?";

const QUICK_SUGGESTIONS: [&str; 4] = [
    "How can I save more money?",
    "What should I invest in?",
    "Help me create a budget",
    "Analyze my spending patterns",
];

/// Conversation state for one session.
///
/// Seeded with the greeting; `clear_chat` returns to exactly that
/// state. The typing flag is raised while a reply is being produced
/// and always lowered afterwards, success or failure.
pub struct Assistant {
    responder: Box<dyn Responder>,
    messages: Vec<Message>,
    insights: Vec<FinancialInsight>,
    typing: bool,
}

impl std::fmt::Debug for Assistant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assistant")
            .field("messages", &self.messages.len())
            .field("insights", &self.insights.len())
            .field("typing", &self.typing)
            .finish()
    }
}

impl Assistant {
    pub fn new(responder: Box<dyn Responder>) -> Self {
        Self {
            responder,
            messages: vec![Self::greeting_message()],
            insights: Vec::new(),
            typing: false,
        }
    }

    fn greeting_message() -> Message {
        Message {
            id: Uuid::new_v4(),
            text: GREETING.to_string(),
            from_user: false,
            timestamp: Utc::now(),
            kind: MessageKind::Text,
        }
    }

    // ── State accessors ─────────────────────────────────────────────

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub fn insights(&self) -> &[FinancialInsight] {
        &self.insights
    }

    #[must_use]
    pub fn is_typing(&self) -> bool {
        self.typing
    }

    /// Canned prompts the UI offers as one-tap inputs.
    #[must_use]
    pub fn quick_suggestions(&self) -> &'static [&'static str] {
        &QUICK_SUGGESTIONS
    }

    // ── Operations ──────────────────────────────────────────────────

    /// Append a message without involving the responder. Returns the
    /// new message's id.
    pub fn add_message(
        &mut self,
        text: impl Into<String>,
        from_user: bool,
        kind: MessageKind,
    ) -> Uuid {
        let message = Message {
            id: Uuid::new_v4(),
            text: text.into(),
            from_user,
            timestamp: Utc::now(),
            kind,
        };
        let id = message.id;
        self.messages.push(message);
        id
    }

    /// Record the user's message, then the coach's reply.
    pub async fn send_message(&mut self, text: impl Into<String>) -> Result<(), CoreError> {
        let text = text.into();
        self.add_message(text.clone(), true, MessageKind::Text);

        self.typing = true;
        let reply = self.responder.reply(&text, &self.messages).await;
        self.typing = false;

        self.add_message(reply?, false, MessageKind::Text);
        Ok(())
    }

    /// Refresh the insight set from the responder.
    pub fn generate_insights(&mut self) {
        self.insights = self.responder.insights();
    }

    /// Reset the conversation to the greeting-only state. Insights are
    /// kept.
    pub fn clear_chat(&mut self) {
        self.messages = vec![Self::greeting_message()];
        self.typing = false;
    }
}
