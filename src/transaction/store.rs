//! Defines the transaction store trait and its SQLite implementation.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, Row};
use time::UtcOffset;

use crate::{
    Error,
    auth::UserId,
    db::CreateTable,
    transaction::{NewTransaction, Transaction},
};

/// Creates and retrieves a user's transactions.
///
/// Every operation is scoped to a single user, implementations must never
/// return another user's transactions.
pub trait TransactionStore {
    /// Store a new transaction owned by `user_id`, returning it with its generated ID.
    fn create(&self, user_id: &UserId, transaction: NewTransaction) -> Result<Transaction, Error>;

    /// Get the transactions owned by `user_id`, newest first.
    ///
    /// If `limit` is set, only the `limit` newest transactions are returned.
    fn get_by_user(&self, user_id: &UserId, limit: Option<u32>) -> Result<Vec<Transaction>, Error>;
}

/// Creates and retrieves transactions to/from a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new transaction store with a SQLite database.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Create a transaction in the database.
    ///
    /// The date is converted to UTC so that dates sort correctly.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn create(&self, user_id: &UserId, transaction: NewTransaction) -> Result<Transaction, Error> {
        let connection = self.lock()?;

        let transaction = connection
            .prepare(
                "INSERT INTO \"transaction\" (user_id, amount, type, category, description, date)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 RETURNING id, user_id, amount, type, category, description, date",
            )?
            .query_row(
                (
                    user_id.as_str(),
                    transaction.amount,
                    transaction.kind,
                    transaction.category,
                    transaction.description,
                    transaction.date.to_offset(UtcOffset::UTC),
                ),
                map_transaction_row,
            )?;

        Ok(transaction)
    }

    /// Retrieve the transactions owned by `user_id`, newest first.
    ///
    /// Transactions with the same date are ordered by most recently created.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn get_by_user(&self, user_id: &UserId, limit: Option<u32>) -> Result<Vec<Transaction>, Error> {
        // A negative limit means no limit in SQLite.
        let limit = limit.map(i64::from).unwrap_or(-1);

        self.lock()?
            .prepare(
                "SELECT id, user_id, amount, type, category, description, date
                 FROM \"transaction\"
                 WHERE user_id = :user_id
                 ORDER BY date DESC, id DESC
                 LIMIT :limit",
            )?
            .query_map(
                rusqlite::named_params! {
                    ":user_id": user_id.as_str(),
                    ":limit": limit,
                },
                map_transaction_row,
            )?
            .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
            .collect()
    }
}

impl CreateTable for SQLiteTransactionStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute_batch(
            "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                amount REAL NOT NULL CHECK (amount > 0),
                type TEXT NOT NULL CHECK (type IN ('INCOME', 'EXPENSE')),
                category TEXT NOT NULL CHECK (category <> ''),
                description TEXT,
                date TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_transaction_user_date ON \"transaction\"(user_id, date);",
        )?;

        Ok(())
    }
}

/// Map a database row to a Transaction.
fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_user_id: String = row.get(1)?;
    let amount = row.get(2)?;
    let kind = row.get(3)?;
    let category = row.get(4)?;
    let description = row.get(5)?;
    let date = row.get(6)?;

    Ok(Transaction {
        id,
        user_id: UserId::new(&raw_user_id),
        amount,
        kind,
        category,
        description,
        date,
    })
}
