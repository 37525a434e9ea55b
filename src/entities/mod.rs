// Entity Models
//
// Account is the only entity: fixed identity, mutable balance,
// every transition validated before it is applied.

pub mod account;

pub use account::Account;
