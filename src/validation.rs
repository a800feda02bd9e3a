//! Checks request payloads and turns them into validated domain values.

use time::{
    Date, OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339,
    macros::format_description,
};

use crate::{
    Error,
    category::{CategoryName, CategoryPayload},
    transaction::{AmountInput, NewTransaction, Transaction, TransactionPayload, TransactionType},
};

/// Amounts must be strictly less than this, so that totals over any realistic
/// number of transactions stay finite.
pub const MAX_AMOUNT: f64 = 1e12;

/// Validate the body of a create transaction request.
///
/// `amount` may be a JSON number or a numeric string and must be a finite,
/// positive number less than [MAX_AMOUNT]. `type` must be INCOME or EXPENSE, ignoring case.
/// `category` must not be blank. A blank `description` is dropped. `date` may
/// be an RFC 3339 date-time or a `YYYY-MM-DD` date and defaults to `now`.
///
/// # Errors
/// Returns an [Error::InvalidInput] describing the first field that is
/// missing or malformed.
pub fn validate_transaction_input(
    payload: TransactionPayload,
    now: OffsetDateTime,
) -> Result<NewTransaction, Error> {
    let amount = parse_amount(payload.amount)?;

    let kind: TransactionType = payload
        .kind
        .as_deref()
        .filter(|kind| !kind.trim().is_empty())
        .ok_or_else(|| Error::InvalidInput("type is required".to_owned()))?
        .parse()?;

    let category = payload
        .category
        .as_deref()
        .map(str::trim)
        .filter(|category| !category.is_empty())
        .ok_or_else(|| Error::InvalidInput("category is required".to_owned()))?;

    let description = payload
        .description
        .as_deref()
        .map(str::trim)
        .filter(|description| !description.is_empty())
        .map(str::to_owned);

    let date = match payload.date.as_deref().map(str::trim) {
        Some(date) if !date.is_empty() => parse_date(date)?,
        _ => now,
    };

    Ok(
        Transaction::build(amount, kind, category, date.to_offset(UtcOffset::UTC))
            .description(description),
    )
}

/// Validate the body of a create category request.
///
/// # Errors
/// Returns an [Error::InvalidInput] if the name is missing or blank.
pub fn validate_category_input(payload: CategoryPayload) -> Result<CategoryName, Error> {
    match payload.name {
        Some(name) => CategoryName::new(&name),
        None => Err(Error::InvalidInput("Category name cannot be empty".to_owned())),
    }
}

fn parse_amount(amount: Option<AmountInput>) -> Result<f64, Error> {
    let amount = match amount {
        None => return Err(Error::InvalidInput("amount is required".to_owned())),
        Some(AmountInput::Number(amount)) => amount,
        Some(AmountInput::Text(text)) => {
            let text = text.trim();

            if text.is_empty() {
                return Err(Error::InvalidInput("amount is required".to_owned()));
            }

            text.parse::<f64>()
                .map_err(|_| Error::InvalidInput("amount must be a number".to_owned()))?
        }
    };

    if !(amount.is_finite() && amount > 0.0) {
        return Err(Error::InvalidInput(
            "amount must be a positive number".to_owned(),
        ));
    }

    if amount >= MAX_AMOUNT {
        return Err(Error::InvalidInput(format!(
            "amount must be less than {MAX_AMOUNT}"
        )));
    }

    Ok(amount)
}

fn parse_date(text: &str) -> Result<OffsetDateTime, Error> {
    if let Ok(date_time) = OffsetDateTime::parse(text, &Rfc3339) {
        return Ok(date_time);
    }

    Date::parse(text, format_description!("[year]-[month]-[day]"))
        .map(|date| date.midnight().assume_utc())
        .map_err(|_| {
            Error::InvalidInput(format!(
                "date must be an RFC 3339 date-time or a YYYY-MM-DD date, got \"{text}\""
            ))
        })
}
