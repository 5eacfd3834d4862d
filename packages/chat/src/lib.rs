// ABOUTME: Chat message history for the Financial Advisor API
// ABOUTME: Stores user and advisor turns and serves recent history windows

pub mod storage;
pub mod types;

pub use storage::ChatStorage;
pub use types::{ChatMessage, ChatMessageCreate, NewChatMessage};
