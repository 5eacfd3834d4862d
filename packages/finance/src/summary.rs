// ABOUTME: Financial summary aggregation over a user's entries
// ABOUTME: Totals, breakdowns, trailing-month savings, emergency fund rating and Indian tax estimates

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{EntryCategory, FinancialEntry};

/// Length of the trailing window used for monthly figures.
pub const MONTHLY_WINDOW_DAYS: i64 = 30;

/// Upper bound of each slab and its marginal rate. The last slab is open-ended.
const TAX_SLABS: [(f64, f64); 7] = [
    (250_000.0, 0.00),
    (500_000.0, 0.05),
    (750_000.0, 0.10),
    (1_000_000.0, 0.15),
    (1_250_000.0, 0.20),
    (1_500_000.0, 0.25),
    (f64::INFINITY, 0.30),
];

const PPF_RATE: f64 = 0.10;
const PPF_ANNUAL_CAP: f64 = 150_000.0;
const EPF_RATE: f64 = 0.12;
const NPS_RATE: f64 = 0.10;
const INSURANCE_RATE: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmergencyFundStatus {
    Excellent,
    Good,
    #[serde(rename = "Needs improvement")]
    NeedsImprovement,
    Critical,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub total_investments: f64,
    pub total_assets: f64,
    pub total_liabilities: f64,
    pub net_worth: f64,
    pub overall_savings: f64,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub monthly_savings: f64,
    pub yearly_savings: f64,
    pub emergency_fund_status: EmergencyFundStatus,
    pub investment_allocation: BTreeMap<String, f64>,
    pub expense_breakdown: BTreeMap<String, f64>,
    pub income_breakdown: BTreeMap<String, f64>,
    pub tax_estimate: f64,
    pub ppf_contribution: f64,
    pub epf_contribution: f64,
    pub nps_contribution: f64,
    pub insurance_premium: f64,
}

/// Aggregate a user's entries as of `now`. Entries with an unrecognised
/// category are skipped.
pub fn summarize(entries: &[FinancialEntry], now: DateTime<Utc>) -> FinancialSummary {
    let window_start = now - Duration::days(MONTHLY_WINDOW_DAYS);

    let mut total_income = 0.0;
    let mut total_expenses = 0.0;
    let mut total_investments = 0.0;
    let mut total_assets = 0.0;
    let mut total_liabilities = 0.0;
    let mut monthly_income = 0.0;
    let mut monthly_expenses = 0.0;

    let mut income_breakdown = BTreeMap::new();
    let mut expense_breakdown = BTreeMap::new();
    let mut investment_allocation = BTreeMap::new();

    for entry in entries {
        let Some(category) = entry.parsed_category() else {
            continue;
        };
        let in_window = entry.date >= window_start;

        match category {
            EntryCategory::Income => {
                total_income += entry.amount;
                add_to(&mut income_breakdown, &entry.entry_type, entry.amount);
                if in_window {
                    monthly_income += entry.amount;
                }
            }
            EntryCategory::Expense => {
                total_expenses += entry.amount;
                add_to(&mut expense_breakdown, &entry.entry_type, entry.amount);
                if in_window {
                    monthly_expenses += entry.amount;
                }
            }
            EntryCategory::Investment => {
                total_investments += entry.amount;
                add_to(&mut investment_allocation, &entry.entry_type, entry.amount);
            }
            EntryCategory::Asset => total_assets += entry.amount,
            EntryCategory::Liability => total_liabilities += entry.amount,
        }
    }

    let monthly_savings = monthly_income - monthly_expenses;

    FinancialSummary {
        total_income,
        total_expenses,
        total_investments,
        total_assets,
        total_liabilities,
        net_worth: total_assets - total_liabilities,
        overall_savings: total_income - total_expenses,
        monthly_income,
        monthly_expenses,
        monthly_savings,
        yearly_savings: monthly_savings * 12.0,
        emergency_fund_status: emergency_fund_status(total_assets, monthly_expenses),
        investment_allocation,
        expense_breakdown,
        income_breakdown,
        tax_estimate: estimate_tax(total_income),
        ppf_contribution: (total_income * PPF_RATE).min(PPF_ANNUAL_CAP),
        epf_contribution: total_income * EPF_RATE,
        nps_contribution: total_income * NPS_RATE,
        insurance_premium: total_income * INSURANCE_RATE,
    }
}

/// Months of expenses covered by assets, bucketed.
pub fn emergency_fund_status(total_assets: f64, monthly_expenses: f64) -> EmergencyFundStatus {
    if monthly_expenses <= 0.0 {
        return EmergencyFundStatus::Unknown;
    }

    let ratio = total_assets / monthly_expenses;
    if ratio >= 6.0 {
        EmergencyFundStatus::Excellent
    } else if ratio >= 3.0 {
        EmergencyFundStatus::Good
    } else if ratio >= 1.0 {
        EmergencyFundStatus::NeedsImprovement
    } else {
        EmergencyFundStatus::Critical
    }
}

/// Progressive tax on annual income using the slab table.
pub fn estimate_tax(income: f64) -> f64 {
    let mut tax = 0.0;
    let mut lower = 0.0;

    for (upper, rate) in TAX_SLABS {
        if income <= lower {
            break;
        }
        tax += (income.min(upper) - lower) * rate;
        lower = upper;
    }

    tax
}

fn add_to(map: &mut BTreeMap<String, f64>, key: &str, amount: f64) {
    *map.entry(key.to_string()).or_insert(0.0) += amount;
}
