// 💳 Account Entity - Validated balance with guarded transitions
//
// Identity (number, holder, type, opening date) is fixed at construction.
// Only the balance changes, and only through credit, debit and transfer.
//
// Rules enforced:
// - Construction rejects "Checking" accounts, dates outside [now - 80y, now],
//   non-numeric account numbers and negative or non-finite opening balances
// - Balance never goes negative
// - Transfers between different holders are capped; same-holder transfers are refused

use crate::error::{AccountError, AccountResult};
use crate::policy::AccountPolicy;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::{self, Write};

// ============================================================================
// ACCOUNT ENTITY
// ============================================================================

/// Account Entity
///
/// Fields are private: an `Account` can only be obtained through the
/// validating constructors, so every instance satisfies the invariants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Account {
    // ========================================================================
    // IDENTITY (never changes)
    // ========================================================================
    /// Digits only, e.g. "12345"
    account_number: String,

    /// Compared by exact string equality for transfer rules
    holder_name: String,

    /// Free-form type ("Savings", ...), never the disallowed type
    account_type: String,

    date_opened: DateTime<Utc>,

    // ========================================================================
    // STATE (mutated by credit/debit/transfer)
    // ========================================================================
    balance: f64,

    // ========================================================================
    // RULES
    // ========================================================================
    #[serde(skip)]
    policy: AccountPolicy,
}

impl Account {
    /// Open an account under the default policy, validated against the current time
    pub fn new(
        account_number: impl Into<String>,
        initial_balance: f64,
        holder_name: impl Into<String>,
        account_type: impl Into<String>,
        date_opened: DateTime<Utc>,
    ) -> AccountResult<Self> {
        Self::with_policy(
            account_number,
            initial_balance,
            holder_name,
            account_type,
            date_opened,
            AccountPolicy::default(),
            Utc::now(),
        )
    }

    /// Open an account under an explicit policy and clock reading
    ///
    /// Checks run in a fixed order and the first failure wins:
    /// 1. account type
    /// 2. opening date too old
    /// 3. opening date in the future
    /// 4. account number format
    /// 5. negative or non-finite initial balance
    pub fn with_policy(
        account_number: impl Into<String>,
        initial_balance: f64,
        holder_name: impl Into<String>,
        account_type: impl Into<String>,
        date_opened: DateTime<Utc>,
        policy: AccountPolicy,
        now: DateTime<Utc>,
    ) -> AccountResult<Self> {
        let account_number = account_number.into();
        let account_type = account_type.into();

        if policy.is_disallowed_type(&account_type) {
            return Err(rejected(
                "open",
                &account_number,
                AccountError::AccountTypeNotAllowed { account_type },
            ));
        }

        if date_opened < policy.earliest_opening_date(now) {
            return Err(rejected(
                "open",
                &account_number,
                AccountError::OpenedTooLongAgo {
                    max_years: policy.max_account_age_years,
                },
            ));
        }

        if date_opened > now {
            return Err(rejected("open", &account_number, AccountError::OpenedInFuture));
        }

        if !is_valid_account_number(&account_number) {
            return Err(rejected(
                "open",
                &account_number,
                AccountError::InvalidAccountNumber {
                    account_number: account_number.clone(),
                },
            ));
        }

        if initial_balance < 0.0 {
            return Err(rejected(
                "open",
                &account_number,
                AccountError::NegativeInitialBalance { initial_balance },
            ));
        }

        if !initial_balance.is_finite() {
            return Err(rejected(
                "open",
                &account_number,
                AccountError::NonFiniteInitialBalance { initial_balance },
            ));
        }

        let account = Account {
            account_number,
            holder_name: holder_name.into(),
            account_type,
            date_opened,
            balance: initial_balance,
            policy,
        };

        tracing::debug!(
            account_number = %account.account_number,
            account_type = %account.account_type,
            balance = account.balance,
            "account opened"
        );

        Ok(account)
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn holder_name(&self) -> &str {
        &self.holder_name
    }

    pub fn account_type(&self) -> &str {
        &self.account_type
    }

    pub fn date_opened(&self) -> DateTime<Utc> {
        self.date_opened
    }

    pub fn policy(&self) -> &AccountPolicy {
        &self.policy
    }

    /// Current balance
    pub fn balance(&self) -> f64 {
        self.balance
    }

    // ========================================================================
    // MUTATIONS
    // ========================================================================

    /// Add `amount` to the balance (no upper bound)
    pub fn credit(&mut self, amount: f64) -> AccountResult<()> {
        if amount < 0.0 {
            return Err(self.rejected("credit", AccountError::NegativeCredit { amount }));
        }

        if !amount.is_finite() {
            return Err(self.rejected("credit", AccountError::NonFiniteCredit { amount }));
        }

        self.balance += amount;
        tracing::debug!(account_number = %self.account_number, amount, balance = self.balance, "credited");
        Ok(())
    }

    /// Remove `amount` from the balance, refusing to go below zero
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn debit(&mut self, amount: f64) -> AccountResult<()> {
        if amount < 0.0 {
            return Err(self.rejected("debit", AccountError::NegativeDebit { amount }));
        }

        // Positive form, so NaN is refused as well
        if !(amount <= self.balance) {
            return Err(self.rejected(
                "debit",
                AccountError::InsufficientBalanceForDebit {
                    balance: self.balance,
                    amount,
                },
            ));
        }

        self.balance -= amount;
        tracing::debug!(account_number = %self.account_number, amount, balance = self.balance, "debited");
        Ok(())
    }

    /// Move `amount` from this account to `target`
    ///
    /// Order of checks:
    /// 1. insufficient balance (before any holder rule)
    /// 2. different holders and amount above the transfer limit
    /// 3. same holder, for any amount (including zero and negative)
    /// 4. debit self, then credit target; debit errors propagate unchanged
    ///
    /// A negative amount between different holders therefore fails inside
    /// `debit` with `NegativeDebit`, while between equal holders it fails
    /// with `SameHolderTransfer`.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn transfer(&mut self, target: &mut Account, amount: f64) -> AccountResult<()> {
        // Positive form, so NaN is refused as well
        if !(self.balance >= amount) {
            return Err(self.rejected(
                "transfer",
                AccountError::InsufficientBalanceForTransfer {
                    balance: self.balance,
                    amount,
                },
            ));
        }

        let same_holder = self.holder_name == target.holder_name;

        if !same_holder && amount > self.policy.transfer_limit {
            return Err(self.rejected(
                "transfer",
                AccountError::TransferLimitExceeded {
                    limit: self.policy.transfer_limit,
                    amount,
                },
            ));
        }

        if same_holder {
            return Err(self.rejected(
                "transfer",
                AccountError::SameHolderTransfer {
                    holder_name: self.holder_name.clone(),
                },
            ));
        }

        // Debit fails closed, so the credit never runs on a rejected debit
        self.debit(amount)?;
        target.credit(amount)?;

        tracing::debug!(
            from = %self.account_number,
            to = %target.account_number,
            amount,
            "transfer completed"
        );
        Ok(())
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// Interest on the current balance; `rate` is not validated
    pub fn calculate_interest(&self, rate: f64) -> f64 {
        self.balance * rate
    }

    /// Statement line without terminator
    ///
    /// Example: "Account Number: 12345, Balance: 1000"
    pub fn statement_line(&self) -> String {
        format!(
            "Account Number: {}, Balance: {}",
            self.account_number, self.balance
        )
    }

    /// Write the statement line (plus newline) to `out`
    pub fn print_statement<W: Write>(&self, out: &mut W) -> io::Result<()> {
        // TODO: list recent transactions once a transaction log exists
        writeln!(out, "{}", self.statement_line())
    }

    fn rejected(&self, operation: &str, error: AccountError) -> AccountError {
        rejected(operation, &self.account_number, error)
    }
}

fn rejected(operation: &str, account_number: &str, error: AccountError) -> AccountError {
    tracing::warn!(
        operation,
        account_number,
        kind = error.kind().as_str(),
        "{}",
        error
    );
    error
}

/// Digits only, and must fit a signed 64-bit integer
fn is_valid_account_number(account_number: &str) -> bool {
    !account_number.is_empty()
        && account_number.bytes().all(|b| b.is_ascii_digit())
        && account_number.parse::<i64>().is_ok()
}

// ============================================================================
// TESTS
// ============================================================================
