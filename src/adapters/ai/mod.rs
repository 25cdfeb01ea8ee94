//! Reasoning service adapters.

mod mock_provider;
mod openai_provider;

pub use mock_provider::MockReasoningService;
pub use openai_provider::{OpenAiConfig, OpenAiReasoningService};
