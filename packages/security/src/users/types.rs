// ABOUTME: User type definitions
// ABOUTME: Structures for user accounts, create/update inputs and preferences

use chrono::{DateTime, Utc};
use finadvisor_core::DEFAULT_CURRENCY;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub profile_image: Option<String>,
    pub preferences: UserPreferences,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub theme: String,
    pub currency: String,
    pub notifications: bool,
    pub language: String,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            notifications: true,
            language: "en".to_string(),
        }
    }
}

impl UserPreferences {
    /// Overlay the fields present in `update` onto these preferences.
    pub fn merge(&mut self, update: UserPreferencesUpdate) {
        if let Some(theme) = update.theme {
            self.theme = theme;
        }
        if let Some(currency) = update.currency {
            self.currency = currency;
        }
        if let Some(notifications) = update.notifications {
            self.notifications = notifications;
        }
        if let Some(language) = update.language {
            self.language = language;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPreferencesUpdate {
    pub theme: Option<String>,
    pub currency: Option<String>,
    pub notifications: Option<bool>,
    pub language: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserCreateInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
    pub profile_image: Option<String>,
}

impl UserCreateInput {
    pub fn validate(&self) -> Result<(), String> {
        if self.username.trim().is_empty() {
            return Err("Username must not be empty".to_string());
        }
        validate_email(&self.email)?;
        if self.password.is_empty() {
            return Err("Password must not be empty".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdateInput {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub profile_image: Option<String>,
    pub preferences: Option<UserPreferencesUpdate>,
}

impl UserUpdateInput {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        Ok(())
    }
}

/// Minimal shape check: one `@` with a non-empty local part and a dotted domain.
pub fn validate_email(email: &str) -> Result<(), String> {
    let invalid = || Err(format!("Invalid email address: {}", email));

    let Some((local, domain)) = email.trim().split_once('@') else {
        return invalid();
    };
    if local.is_empty() || domain.contains('@') || email.contains(char::is_whitespace) {
        return invalid();
    }
    let dotted = domain
        .split('.')
        .collect::<Vec<_>>();
    if dotted.len() < 2 || dotted.iter().any(|part| part.is_empty()) {
        return invalid();
    }
    Ok(())
}
