// 📜 Account Policy - Business rules as data
// Age limit, transfer cap and disallowed account type, loadable from JSON

use anyhow::{Context, Result};
use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Accounts cannot be opened more than this many years in the past
pub const MAX_ACCOUNT_AGE_YEARS: u32 = 80;

/// Maximum amount per transfer between accounts with different holders
pub const TRANSFER_LIMIT: f64 = 500.0;

/// Account type rejected at construction (case-sensitive)
pub const DISALLOWED_ACCOUNT_TYPE: &str = "Checking";

// ============================================================================
// POLICY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountPolicy {
    /// Oldest allowed opening date, in calendar years before now
    #[serde(default = "default_max_account_age_years")]
    pub max_account_age_years: u32,

    /// Cap on transfers between different holders
    #[serde(default = "default_transfer_limit")]
    pub transfer_limit: f64,

    #[serde(default = "default_disallowed_account_type")]
    pub disallowed_account_type: String,
}

fn default_max_account_age_years() -> u32 {
    MAX_ACCOUNT_AGE_YEARS
}

fn default_transfer_limit() -> f64 {
    TRANSFER_LIMIT
}

fn default_disallowed_account_type() -> String {
    DISALLOWED_ACCOUNT_TYPE.to_string()
}

impl AccountPolicy {
    /// Load policy from JSON file (missing fields fall back to defaults)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read policy file: {:?}", path.as_ref()))?;

        let policy: AccountPolicy = serde_json::from_str(&content)
            .context("Failed to parse policy JSON")?;

        Ok(policy)
    }

    /// Earliest opening date accepted at `now`
    ///
    /// Subtracts calendar years, so Feb 29 clamps to Feb 28 in non-leap years.
    pub fn earliest_opening_date(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_months(Months::new(self.max_account_age_years.saturating_mul(12)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    pub fn is_disallowed_type(&self, account_type: &str) -> bool {
        account_type == self.disallowed_account_type
    }
}

impl Default for AccountPolicy {
    fn default() -> Self {
        AccountPolicy {
            max_account_age_years: MAX_ACCOUNT_AGE_YEARS,
            transfer_limit: TRANSFER_LIMIT,
            disallowed_account_type: DISALLOWED_ACCOUNT_TYPE.to_string(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
