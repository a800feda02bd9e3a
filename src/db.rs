/*! This module defines how the application's database schema is created. */

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{Error, category::SQLiteCategoryStore, transaction::SQLiteTransactionStore};

/// A trait for adding an object schema to a database.
pub trait CreateTable {
    /// Create a table for the model.
    ///
    /// Implementations must be idempotent so that the schema can be applied on every start up.
    ///
    /// # Errors
    /// Returns an error if there is an SQL error.
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error>;
}

/// Create the all of the database tables for the application.
///
/// The tables are created in a single exclusive transaction, so either all
/// of the tables are created or none of them are.
///
/// # Errors
/// Returns an [Error::SqlError] if there was an error creating the tables.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    SQLiteCategoryStore::create_table(&transaction)?;
    SQLiteTransactionStore::create_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
