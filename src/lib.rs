// Bank Account - Core Library
// Exposes all modules for use in the CLI and tests

pub mod entities;
pub mod error;
pub mod policy;

// Re-export commonly used types
pub use entities::Account;
pub use error::{AccountError, AccountResult, ErrorKind};
pub use policy::{
    AccountPolicy, DISALLOWED_ACCOUNT_TYPE, MAX_ACCOUNT_AGE_YEARS, TRANSFER_LIMIT,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
