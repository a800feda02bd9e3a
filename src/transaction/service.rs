//! Transaction operations scoped to the signed in user.

use time::OffsetDateTime;

use crate::{
    Error,
    auth::UserId,
    transaction::{Transaction, TransactionPayload, TransactionStore},
    validation::validate_transaction_input,
};

/// List the transactions owned by `user_id`, newest first.
///
/// # Errors
/// Returns an [Error::Unauthenticated] if there is no user, or an internal
/// error if the store fails.
pub fn list_transactions(
    store: &impl TransactionStore,
    user_id: Option<&UserId>,
    limit: Option<u32>,
) -> Result<Vec<Transaction>, Error> {
    let user_id = user_id.ok_or(Error::Unauthenticated)?;

    store.get_by_user(user_id, limit)
}

/// Validate `payload` and store it as a new transaction owned by `user_id`.
///
/// A missing date defaults to the current time.
///
/// # Errors
/// Returns an [Error::Unauthenticated] if there is no user, an
/// [Error::InvalidInput] if `payload` is invalid, or an internal error if the
/// store fails. Nothing is stored when an error is returned.
pub fn create_transaction(
    store: &impl TransactionStore,
    user_id: Option<&UserId>,
    payload: TransactionPayload,
) -> Result<Transaction, Error> {
    let user_id = user_id.ok_or(Error::Unauthenticated)?;
    let new_transaction = validate_transaction_input(payload, OffsetDateTime::now_utc())?;

    let transaction = store.create(user_id, new_transaction)?;
    tracing::debug!(
        "Created transaction {} for user {user_id}",
        transaction.id
    );

    Ok(transaction)
}

#[cfg(test)]
mod transaction_service_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use time::{Duration, OffsetDateTime};

    use crate::{
        Error,
        auth::UserId,
        db::initialize,
        transaction::{
            AmountInput, SQLiteTransactionStore, TransactionPayload, TransactionStore,
            TransactionType,
        },
    };

    use super::{create_transaction, list_transactions};

    fn get_test_store() -> SQLiteTransactionStore {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        SQLiteTransactionStore::new(Arc::new(Mutex::new(connection)))
    }

    fn food_expense(amount: f64) -> TransactionPayload {
        TransactionPayload {
            amount: Some(AmountInput::Number(amount)),
            kind: Some("EXPENSE".to_owned()),
            category: Some("Food".to_owned()),
            ..Default::default()
        }
    }

    #[test]
    fn list_requires_user() {
        let store = get_test_store();

        let result = list_transactions(&store, None, None);

        assert_eq!(result, Err(Error::Unauthenticated));
    }

    #[test]
    fn create_requires_user() {
        let store = get_test_store();

        let result = create_transaction(&store, None, food_expense(50.0));

        assert_eq!(result, Err(Error::Unauthenticated));
    }

    #[test]
    fn create_then_list_returns_new_transaction_first() {
        let store = get_test_store();
        let user_id = UserId::new("user_1");
        create_transaction(
            &store,
            Some(&user_id),
            TransactionPayload {
                date: Some("2020-01-01".to_owned()),
                ..food_expense(10.0)
            },
        )
        .unwrap();

        let created = create_transaction(&store, Some(&user_id), food_expense(50.0)).unwrap();
        let listed = list_transactions(&store, Some(&user_id), None).unwrap();

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0], created);
        assert_eq!(listed[0].amount, 50.0);
        assert_eq!(listed[0].kind, TransactionType::Expense);
        assert_eq!(listed[0].category, "Food");
    }

    #[test]
    fn create_defaults_date_to_now() {
        let store = get_test_store();
        let user_id = UserId::new("user_1");

        let created = create_transaction(&store, Some(&user_id), food_expense(50.0)).unwrap();

        assert!((OffsetDateTime::now_utc() - created.date).abs() < Duration::seconds(5));
    }

    #[test]
    fn create_without_amount_persists_nothing() {
        let store = get_test_store();
        let user_id = UserId::new("user_1");
        let payload = TransactionPayload {
            amount: None,
            ..food_expense(0.0)
        };

        let result = create_transaction(&store, Some(&user_id), payload);

        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert_eq!(store.get_by_user(&user_id, None).unwrap(), vec![]);
    }
}
