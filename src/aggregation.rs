//! Totals and breakdowns derived from a user's transactions.

use std::{collections::HashMap, sync::OnceLock};

use numfmt::{Formatter, Precision};
use serde::Serialize;

use crate::transaction::{Transaction, TransactionType};

/// The income, expenses and net balance over a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    /// The sum of all income amounts.
    pub income: f64,
    /// The sum of all expense amounts.
    pub expense: f64,
    /// `income - expense`.
    pub net: f64,
}

/// Sum the income and expenses in `transactions`.
///
/// Amounts that are not finite are counted as zero.
pub fn compute_totals(transactions: &[Transaction]) -> Totals {
    let (income, expense) = transactions
        .iter()
        .filter(|transaction| transaction.amount.is_finite())
        .fold((0.0, 0.0), |(income, expense), transaction| {
            match transaction.kind {
                TransactionType::Income => (income + transaction.amount, expense),
                TransactionType::Expense => (income, expense + transaction.amount),
            }
        });

    Totals {
        income,
        expense,
        net: income - expense,
    }
}

/// The total spent in one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// The category name as recorded on the transactions.
    pub category: String,
    /// The sum of the expense amounts in the category.
    pub total: f64,
}

/// Sum the expenses in `transactions` by category name.
///
/// The result is sorted from the largest total to the smallest, with ties
/// ordered by category name.
pub fn expenses_by_category(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: HashMap<&str, f64> = HashMap::new();

    for transaction in transactions {
        if transaction.kind == TransactionType::Expense && transaction.amount.is_finite() {
            *totals.entry(transaction.category.as_str()).or_insert(0.0) += transaction.amount;
        }
    }

    let mut totals: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_owned(),
            total,
        })
        .collect();

    totals.sort_by(|a, b| {
        b.total
            .total_cmp(&a.total)
            .then_with(|| a.category.cmp(&b.category))
    });

    totals
}

/// Format a number as a dollar amount with two decimal places, e.g. "$12.30".
///
/// Negative numbers are formatted as "-$12.30". Values that are not finite,
/// or that round to zero cents, are formatted as "$0.00".
pub fn format_currency(number: f64) -> String {
    if !number.is_finite() || number.abs() < 0.005 {
        return "$0.00".to_owned();
    }

    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| currency_formatter("$"));

    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| currency_formatter("-$"));

    let formatted_string = if number < 0.0 {
        negative_fmt.fmt_string(number.abs())
    } else {
        positive_fmt.fmt_string(number)
    };

    pad_cents(formatted_string)
}

fn currency_formatter(prefix: &str) -> Formatter {
    Formatter::currency(prefix)
        .and_then(|formatter| formatter.separator(None))
        .expect("currency prefixes are short ASCII strings")
        .precision(Precision::Decimals(2))
}

/// numfmt omits trailing zeros in the decimal places, so "12.30" is rendered
/// as "12.3" and "12.00" as "12". Put them back.
///
/// Very large numbers come out of numfmt in scientific notation and are left as is.
fn pad_cents(mut formatted_string: String) -> String {
    if formatted_string.contains('e') {
        return formatted_string;
    }

    match formatted_string.find('.') {
        Some(point) => {
            let decimal_places = formatted_string.len() - point - 1;

            for _ in decimal_places..2 {
                formatted_string.push('0');
            }
        }
        None => formatted_string.push_str(".00"),
    }

    formatted_string
}

/// Format an amount that may be missing, treating a missing amount as zero.
pub fn format_optional_currency(number: Option<f64>) -> String {
    format_currency(number.unwrap_or(0.0))
}

#[cfg(test)]
mod compute_totals_tests {
    use time::macros::datetime;

    use crate::{
        auth::UserId,
        transaction::{Transaction, TransactionType},
    };

    use super::{Totals, compute_totals};

    fn transaction(amount: f64, kind: TransactionType) -> Transaction {
        Transaction {
            id: 1,
            user_id: UserId::new("user_1"),
            amount,
            kind,
            category: "Misc".to_owned(),
            description: None,
            date: datetime!(2025-10-05 12:00:00 UTC),
        }
    }

    #[test]
    fn empty_input_is_zero() {
        assert_eq!(compute_totals(&[]), Totals::default());
    }

    #[test]
    fn sums_income_and_expenses() {
        let transactions = [
            transaction(1000.0, TransactionType::Income),
            transaction(50.0, TransactionType::Expense),
            transaction(25.5, TransactionType::Expense),
        ];

        let totals = compute_totals(&transactions);

        assert_eq!(
            totals,
            Totals {
                income: 1000.0,
                expense: 75.5,
                net: 924.5
            }
        );
    }

    #[test]
    fn net_is_income_minus_expense() {
        let transactions = [
            transaction(12.34, TransactionType::Expense),
            transaction(0.01, TransactionType::Income),
            transaction(99.99, TransactionType::Expense),
            transaction(7.5, TransactionType::Income),
        ];

        let totals = compute_totals(&transactions);

        assert_eq!(totals.net, totals.income - totals.expense);
        assert!(totals.net < 0.0);
    }

    #[test]
    fn non_finite_amounts_count_as_zero() {
        let transactions = [
            transaction(f64::NAN, TransactionType::Income),
            transaction(f64::INFINITY, TransactionType::Expense),
            transaction(10.0, TransactionType::Income),
        ];

        let totals = compute_totals(&transactions);

        assert_eq!(
            totals,
            Totals {
                income: 10.0,
                expense: 0.0,
                net: 10.0
            }
        );
    }
}


#[cfg(test)]
mod format_currency_tests {
    use super::{format_currency, format_optional_currency};

    #[test]
    fn formats_two_decimal_places() {
        assert_eq!(format_currency(12.3), "$12.30");
        assert_eq!(format_currency(12.0), "$12.00");
        assert_eq!(format_currency(0.5), "$0.50");
        assert_eq!(format_currency(0.0), "$0.00");
    }

    #[test]
    fn formats_without_thousands_separator() {
        assert_eq!(format_currency(1234.5), "$1234.50");
        assert_eq!(format_currency(1_000_000.0), "$1000000.00");
    }

    #[test]
    fn formats_negative_numbers() {
        assert_eq!(format_currency(-12.3), "-$12.30");
        assert_eq!(format_currency(-1234.5), "-$1234.50");
        assert_eq!(format_currency(-0.001), "$0.00");
    }

    #[test]
    fn formats_huge_finite_numbers() {
        for number in [1e307, f64::MAX] {
            let formatted = format_currency(number);

            assert!(formatted.starts_with('$'), "got {formatted}");
            assert!(!formatted.contains("inf"), "got {formatted}");
        }

        let formatted = format_currency(-1e307);
        assert!(formatted.starts_with("-$"), "got {formatted}");
        assert!(!formatted.contains("inf"), "got {formatted}");
    }

    #[test]
    fn formats_non_finite_as_zero() {
        assert_eq!(format_currency(f64::NAN), "$0.00");
        assert_eq!(format_currency(f64::INFINITY), "$0.00");
        assert_eq!(format_currency(f64::NEG_INFINITY), "$0.00");
    }

    #[test]
    fn formats_missing_as_zero() {
        assert_eq!(format_optional_currency(None), "$0.00");
        assert_eq!(format_optional_currency(Some(5.0)), "$5.00");
    }
}
