use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

use super::{FinancialInsight, InsightCategory, InsightPriority, Message};
use crate::errors::CoreError;

/// Produces the coach's side of the conversation.
///
/// The scripted implementation below stands in for a real inference
/// backend; swap in another implementation at construction time.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Responder: Send + Sync {
    /// Reply to `text`, given the conversation so far (which already
    /// includes the user's message).
    async fn reply(&self, text: &str, history: &[Message]) -> Result<String, CoreError>;

    /// Current insight set for the user.
    fn insights(&self) -> Vec<FinancialInsight> {
        Vec::new()
    }
}

const DEFAULT_SCRIPT: [&str; 4] = [
    "That's a great question! Based on your spending patterns, I'd recommend \
     focusing on reducing your dining out expenses by 20%. This could save you \
     about 15,000 monthly.",
    "I've analyzed your financial data. You're doing well with savings! Consider \
     investing 30% of your monthly surplus in low-risk index funds.",
    "Let me help you create a budget. Based on your income, I suggest the \
     50/30/20 rule: 50% needs, 30% wants, 20% savings and investments.",
    "Your spending analysis shows you spend most on transportation and food. \
     Here are some tips to optimize these categories...",
];

/// Cycles through a fixed reply script, one line per message.
///
/// Deterministic: replies come back in script order, wrapping around,
/// regardless of the input.
pub struct ScriptedResponder {
    replies: Vec<String>,
    next: AtomicUsize,
}

impl ScriptedResponder {
    pub fn new() -> Self {
        Self::with_replies(DEFAULT_SCRIPT.iter().map(|s| s.to_string()).collect())
    }

    pub fn with_replies(replies: Vec<String>) -> Self {
        Self {
            replies,
            next: AtomicUsize::new(0),
        }
    }
}

impl Default for ScriptedResponder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Responder for ScriptedResponder {
    async fn reply(&self, _text: &str, _history: &[Message]) -> Result<String, CoreError> {
        if self.replies.is_empty() {
            return Err(CoreError::Validation("Reply script is empty".into()));
        }
        let idx = self.next.fetch_add(1, Ordering::Relaxed) % self.replies.len();
        Ok(self.replies[idx].clone())
    }

    fn insights(&self) -> Vec<FinancialInsight> {
        vec![
            FinancialInsight {
                id: Uuid::new_v4(),
                title: "High Dining Expenses".into(),
                description: "You spent 25% more on dining out this month compared to last month."
                    .into(),
                category: InsightCategory::Spending,
                priority: InsightPriority::High,
                actionable: true,
            },
            FinancialInsight {
                id: Uuid::new_v4(),
                title: "Savings Goal Progress".into(),
                description: "You're 80% towards your monthly savings goal. Great job!".into(),
                category: InsightCategory::Saving,
                priority: InsightPriority::Medium,
                actionable: false,
            },
            FinancialInsight {
                id: Uuid::new_v4(),
                title: "Investment Opportunity".into(),
                description: "Consider diversifying your portfolio with some tech stocks.".into(),
                category: InsightCategory::Investing,
                priority: InsightPriority::Medium,
                actionable: true,
            },
        ]
    }
}
