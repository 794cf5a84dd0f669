//! Text-generation provider layer for market-insight
//!
//! This crate provides a small, provider-agnostic surface for single-turn
//! text generation. It includes:
//!
//! - Message types for the user turn and the assistant reply
//! - Completion request/response types
//! - Provider trait for LLM implementations
//! - The Anthropic Messages API provider (behind the `anthropic` feature)

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;

// Re-export main types
pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LLMError, Result};
pub use messages::{ContentBlock, Message, MessageContent, Role};
pub use provider::LLMProvider;

// Provider implementations (feature-gated)
#[cfg(feature = "anthropic")]
pub mod providers;
