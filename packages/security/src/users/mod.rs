// ABOUTME: User management module
// ABOUTME: Provides types and storage for user accounts and preferences

pub mod storage;
pub mod types;


pub use types::*;
