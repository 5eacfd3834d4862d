// ABOUTME: Password hashing and user account management for the Financial Advisor API
// ABOUTME: Provides Argon2 password helpers and SQLite-backed user storage

pub mod password;
pub mod users;

// Re-export main types for convenience
pub use password::{hash_password, verify_password, PasswordError};
pub use users::storage::UserStorage;
pub use users::{User, UserCreateInput, UserPreferences, UserPreferencesUpdate, UserUpdateInput};
