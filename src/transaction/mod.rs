//! Transactions: the income and expenses recorded by each user.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the request schema for creating one
//! - The store trait and its SQLite implementation
//! - The user-scoped service functions and their HTTP endpoints

mod domain;
mod endpoints;
mod service;
mod store;

pub use domain::{
    AmountInput, NewTransaction, Transaction, TransactionId, TransactionPayload, TransactionType,
};
pub use endpoints::{create_transaction_endpoint, get_transactions_endpoint};
pub use service::{create_transaction, list_transactions};
pub use store::{SQLiteTransactionStore, TransactionStore};
