// ⚠️ Account Errors - Two kinds, one variant per rejection
//
// Validation = malformed or out-of-policy input, raised before any state change
// Domain     = business rule violated by an otherwise well-formed operation

use serde::Serialize;
use thiserror::Error;

// ============================================================================
// ERROR KIND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// Bad input (negative amounts, bad account number, disallowed type, bad date)
    Validation,

    /// Business rule violation (insufficient funds, transfer limit, same holder)
    Domain,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "Validation",
            ErrorKind::Domain => "Domain",
        }
    }
}

// ============================================================================
// ACCOUNT ERROR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AccountError {
    // ------------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------------
    #[error("account type not allowed.")]
    AccountTypeNotAllowed { account_type: String },

    #[error("account cannot be opened more than {max_years} years ago.")]
    OpenedTooLongAgo { max_years: u32 },

    #[error("date opened cannot be in the future.")]
    OpenedInFuture,

    #[error("account number must contain only numbers.")]
    InvalidAccountNumber { account_number: String },

    #[error("initial balance cannot be negative.")]
    NegativeInitialBalance { initial_balance: f64 },

    #[error("initial balance must be a finite number.")]
    NonFiniteInitialBalance { initial_balance: f64 },

    // ------------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------------
    #[error("amount to be credited cannot be negative.")]
    NegativeCredit { amount: f64 },

    #[error("amount to be credited must be a finite number.")]
    NonFiniteCredit { amount: f64 },

    #[error("amount to be debited cannot be negative.")]
    NegativeDebit { amount: f64 },

    #[error("insufficient balance for debit.")]
    InsufficientBalanceForDebit { balance: f64, amount: f64 },

    #[error("insufficient balance for transfer")]
    InsufficientBalanceForTransfer { balance: f64, amount: f64 },

    #[error("transfer amount exceeds maximum limit for different account owners.")]
    TransferLimitExceeded { limit: f64, amount: f64 },

    #[error("transfer not permitted to same-holder account")]
    SameHolderTransfer { holder_name: String },
}

impl AccountError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::AccountTypeNotAllowed { .. }
            | AccountError::OpenedTooLongAgo { .. }
            | AccountError::OpenedInFuture
            | AccountError::InvalidAccountNumber { .. }
            | AccountError::NegativeInitialBalance { .. }
            | AccountError::NonFiniteInitialBalance { .. }
            | AccountError::NegativeCredit { .. }
            | AccountError::NonFiniteCredit { .. }
            | AccountError::NegativeDebit { .. } => ErrorKind::Validation,

            AccountError::InsufficientBalanceForDebit { .. }
            | AccountError::InsufficientBalanceForTransfer { .. }
            | AccountError::TransferLimitExceeded { .. }
            | AccountError::SameHolderTransfer { .. } => ErrorKind::Domain,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    pub fn is_domain(&self) -> bool {
        self.kind() == ErrorKind::Domain
    }
}

pub type AccountResult<T> = Result<T, AccountError>;

// ============================================================================
// TESTS
// ============================================================================
