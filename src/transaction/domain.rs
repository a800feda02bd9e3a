//! Core transaction domain types and the request schema for creating transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, auth::UserId};

/// Database identifier for a transaction.
pub type TransactionId = i64;

/// Whether a transaction brought money in or sent it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    /// Money earned, e.g. a salary payment.
    Income,
    /// Money spent, e.g. groceries.
    Expense,
}

impl TransactionType {
    /// The canonical upper-case name used in JSON and the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "INCOME",
            TransactionType::Expense => "EXPENSE",
        }
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    /// Parse a transaction type, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.eq_ignore_ascii_case("INCOME") {
            Ok(TransactionType::Income)
        } else if s.eq_ignore_ascii_case("EXPENSE") {
            Ok(TransactionType::Expense)
        } else {
            Err(Error::InvalidInput(format!(
                "type must be INCOME or EXPENSE, got \"{s}\""
            )))
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;

        text.parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}

/// An expense or income recorded by a user.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The user who owns the transaction.
    pub user_id: UserId,
    /// The amount of money spent or earned. Always positive, the direction is given by `kind`.
    pub amount: f64,
    /// Whether the money was earned or spent.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// The name of the category the transaction was filed under.
    ///
    /// This is a copy of the name, so it survives the category being deleted.
    pub category: String,
    /// A text description of what the transaction was for.
    pub description: Option<String>,
    /// When the transaction happened, in UTC.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [NewTransaction] for discoverability.
    pub fn build(
        amount: f64,
        kind: TransactionType,
        category: &str,
        date: OffsetDateTime,
    ) -> NewTransaction {
        NewTransaction {
            amount,
            kind,
            category: category.to_owned(),
            description: None,
            date,
        }
    }
}

/// The validated fields of a transaction that has not been stored yet.
///
/// The owning user is supplied separately when the transaction is stored, so
/// that it can only ever come from the session.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// The positive, finite amount of the transaction.
    pub amount: f64,
    /// Whether the money was earned or spent.
    pub kind: TransactionType,
    /// The non-empty category name.
    pub category: String,
    /// An optional description, `None` rather than an empty string.
    pub description: Option<String>,
    /// When the transaction happened.
    pub date: OffsetDateTime,
}

impl NewTransaction {
    /// Set the description for the transaction.
    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }
}

/// The JSON body for creating a transaction.
///
/// Every field is optional here so that missing fields are reported by
/// [validate_transaction_input](crate::validation::validate_transaction_input)
/// rather than by the JSON parser. Any `userId` field sent by the client is
/// ignored.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct TransactionPayload {
    /// The amount as a JSON number or a numeric string.
    pub amount: Option<AmountInput>,
    /// "INCOME" or "EXPENSE".
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// The category name.
    pub category: Option<String>,
    /// An optional description.
    pub description: Option<String>,
    /// An RFC 3339 date-time or a `YYYY-MM-DD` date.
    pub date: Option<String>,
}

/// An amount as sent by the client, which may be a number or a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    /// A JSON number, e.g. `50`.
    Number(f64),
    /// A JSON string, e.g. `"50.00"`.
    Text(String),
}
