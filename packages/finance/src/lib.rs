// ABOUTME: Personal finance entries for the Financial Advisor API
// ABOUTME: Entry storage plus the India-specific financial summary aggregator

pub mod storage;
pub mod summary;
pub mod types;

pub use storage::FinancialStorage;
pub use summary::{emergency_fund_status, estimate_tax, summarize, EmergencyFundStatus, FinancialSummary};
pub use types::{EntryCategory, FinancialEntry, FinancialEntryCreate, FinancialEntryUpdate};
