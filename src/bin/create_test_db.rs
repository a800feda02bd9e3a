use std::error::Error;
use std::path::Path;
use std::process::exit;
use std::sync::{Arc, Mutex};

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use moneytracker::{
    CategoryName, CategoryStore, SQLiteCategoryStore, SQLiteTransactionStore, Transaction,
    TransactionStore, TransactionType, UserId, initialize_db,
};

/// A utility for creating a test database for the moneytracker API server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// The user that owns the sample data.
    #[arg(long, short, default_value = "test-user")]
    user_id: String,
}

const CATEGORIES: [&str; 5] = ["Salary", "Groceries", "Rent", "Transport", "Fun"];

/// (days ago, amount, type, category, description)
const TRANSACTIONS: [(i64, f64, TransactionType, &str, &str); 8] = [
    (1, 3200.0, TransactionType::Income, "Salary", "Monthly pay"),
    (2, 84.35, TransactionType::Expense, "Groceries", "Weekly shop"),
    (3, 1450.0, TransactionType::Expense, "Rent", ""),
    (5, 23.5, TransactionType::Expense, "Transport", "Train pass top up"),
    (9, 61.2, TransactionType::Expense, "Groceries", "Weekly shop"),
    (12, 45.0, TransactionType::Expense, "Fun", "Concert tickets"),
    (20, 150.0, TransactionType::Income, "Salary", "Expense reimbursement"),
    (31, 3200.0, TransactionType::Income, "Salary", "Monthly pay"),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    let conn = Arc::new(Mutex::new(conn));
    let category_store = SQLiteCategoryStore::new(conn.clone());
    let transaction_store = SQLiteTransactionStore::new(conn);
    let user_id = UserId::new(&args.user_id);

    println!("Creating categories for {user_id}...");

    for name in CATEGORIES {
        category_store.create(&user_id, CategoryName::new(name)?)?;
    }

    println!("Creating transactions for {user_id}...");

    let now = OffsetDateTime::now_utc();

    for (days_ago, amount, kind, category, description) in TRANSACTIONS {
        let description = (!description.is_empty()).then(|| description.to_owned());

        transaction_store.create(
            &user_id,
            Transaction::build(amount, kind, category, now - Duration::days(days_ago))
                .description(description),
        )?;
    }

    println!("Success!");

    Ok(())
}
