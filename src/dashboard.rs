//! The dashboard summary: a user's totals and where their money went.

use axum::{
    Json,
    extract::{FromRef, State},
};
use serde::Serialize;

use crate::{
    AppState, Error,
    aggregation::{CategoryTotal, Totals, compute_totals, expenses_by_category, format_currency},
    auth::UserId,
    extract::CurrentUser,
    transaction::{SQLiteTransactionStore, TransactionStore},
};

/// The totals formatted for display, e.g. "$12.30".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedTotals {
    /// The formatted income total.
    pub income: String,
    /// The formatted expense total.
    pub expense: String,
    /// The formatted net balance.
    pub net: String,
}

impl From<&Totals> for FormattedTotals {
    fn from(totals: &Totals) -> Self {
        Self {
            income: format_currency(totals.income),
            expense: format_currency(totals.expense),
            net: format_currency(totals.net),
        }
    }
}

/// An overview of all of a user's transactions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// The income, expense and net totals.
    pub totals: Totals,
    /// The totals as currency strings.
    pub formatted: FormattedTotals,
    /// How many transactions the totals cover.
    pub transaction_count: usize,
    /// The expense total for each category, largest first.
    pub expenses_by_category: Vec<CategoryTotal>,
}

/// Summarise every transaction owned by `user_id`.
///
/// # Errors
/// Returns an [Error::Unauthenticated] if there is no user, or an internal
/// error if the store fails.
pub fn summarize(store: &impl TransactionStore, user_id: Option<&UserId>) -> Result<Summary, Error> {
    let user_id = user_id.ok_or(Error::Unauthenticated)?;

    let transactions = store.get_by_user(user_id, None)?;
    let totals = compute_totals(&transactions);

    Ok(Summary {
        formatted: FormattedTotals::from(&totals),
        totals,
        transaction_count: transactions.len(),
        expenses_by_category: expenses_by_category(&transactions),
    })
}

/// The state needed for the summary endpoint.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The store for reading the user's transactions.
    pub store: SQLiteTransactionStore,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.transaction_store(),
        }
    }
}

/// Get the dashboard summary for the current user.
pub async fn get_summary_endpoint(
    State(state): State<DashboardState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<Summary>, Error> {
    summarize(&state.store, user_id.as_ref()).map(Json)
}

#[cfg(test)]
mod summarize_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{
        Error,
        aggregation::{CategoryTotal, Totals},
        auth::UserId,
        db::initialize,
        transaction::{SQLiteTransactionStore, Transaction, TransactionStore, TransactionType},
    };

    use super::{FormattedTotals, summarize};

    fn get_store() -> SQLiteTransactionStore {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        SQLiteTransactionStore::new(Arc::new(Mutex::new(connection)))
    }

    #[test]
    fn requires_user() {
        assert_eq!(summarize(&get_store(), None), Err(Error::Unauthenticated));
    }

    #[test]
    fn empty_summary_is_zero() {
        let summary = summarize(&get_store(), Some(&UserId::new("user_1"))).unwrap();

        assert_eq!(summary.totals, Totals::default());
        assert_eq!(
            summary.formatted,
            FormattedTotals {
                income: "$0.00".to_owned(),
                expense: "$0.00".to_owned(),
                net: "$0.00".to_owned(),
            }
        );
        assert_eq!(summary.transaction_count, 0);
        assert!(summary.expenses_by_category.is_empty());
    }

    #[test]
    fn summarises_only_the_users_transactions() {
        let store = get_store();
        let user_id = UserId::new("user_1");
        let date = datetime!(2025-10-05 12:00:00 UTC);
        store
            .create(
                &user_id,
                Transaction::build(1000.0, TransactionType::Income, "Salary", date),
            )
            .unwrap();
        store
            .create(
                &user_id,
                Transaction::build(50.0, TransactionType::Expense, "Food", date),
            )
            .unwrap();
        store
            .create(
                &UserId::new("user_2"),
                Transaction::build(999.0, TransactionType::Expense, "Food", date),
            )
            .unwrap();

        let summary = summarize(&store, Some(&user_id)).unwrap();

        assert_eq!(
            summary.totals,
            Totals {
                income: 1000.0,
                expense: 50.0,
                net: 950.0
            }
        );
        assert_eq!(summary.formatted.net, "$950.00");
        assert_eq!(summary.transaction_count, 2);
        assert_eq!(
            summary.expenses_by_category,
            vec![CategoryTotal {
                category: "Food".to_owned(),
                total: 50.0
            }]
        );
    }
}

#[cfg(test)]
mod summary_endpoint_tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use crate::{
        endpoints,
        test_utils::{get_test_server, log_in},
    };

    #[tokio::test]
    async fn returns_summary_for_current_user() {
        let server = get_test_server();
        let session = log_in(&server, "user_1").await;
        for body in [
            json!({ "amount": 1000, "type": "INCOME", "category": "Salary" }),
            json!({ "amount": "50", "type": "EXPENSE", "category": "Food" }),
        ] {
            server
                .post(endpoints::TRANSACTIONS)
                .add_cookie(session.clone())
                .json(&body)
                .await
                .assert_status(StatusCode::CREATED);
        }

        let response = server.get(endpoints::SUMMARY).add_cookie(session).await;

        response.assert_status_ok();
        let summary: Value = response.json();
        assert_eq!(
            summary["totals"],
            json!({ "income": 1000.0, "expense": 50.0, "net": 950.0 })
        );
        assert_eq!(summary["formatted"]["expense"], "$50.00");
        assert_eq!(summary["transactionCount"], 2);
        assert_eq!(
            summary["expensesByCategory"],
            json!([{ "category": "Food", "total": 50.0 }])
        );
    }

    #[tokio::test]
    async fn anonymous_request_is_unauthorized() {
        let server = get_test_server();

        let response = server.get(endpoints::SUMMARY).await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        response.assert_json(&json!({ "error": "authentication required" }));
    }
}
