//! Prompt text and canned replies for market commentary
//!
//! - `system`: the assistant persona sent with question answers
//! - `user`: user-turn builders for questions and market summaries

mod system;
mod user;

pub use system::*;
pub use user::*;

/// Reply when the provider fails to answer a question
pub const APOLOGY: &str = "I apologize, but I'm having trouble processing your request right now. Please try again in a moment.";

/// Reply when there is no usable quote data to summarize
pub const SUMMARY_UNAVAILABLE: &str =
    "Unable to generate market summary due to data unavailability.";

/// Suggested opening questions for chat front ends
pub const QUICK_QUESTIONS: [&str; 3] = [
    "What's your market outlook?",
    "Which stock should I buy today?",
    "What are the current market risks?",
];
