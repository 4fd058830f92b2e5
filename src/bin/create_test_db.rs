use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use rust_decimal::Decimal;

use ledgerline::{Category, Transaction, UserId, create_transaction, initialize_db};

/// A utility for creating a test database for the REST API server of ledgerline.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// The user that owns the demo transactions.
    #[arg(long, short, default_value = "test_user")]
    user_id: String,
}

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

    let user_id = UserId::new(&args.user_id)?;

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating transactions for {user_id}...");

    let demo_transactions = [
        ("Paycheck", Decimal::new(1000, 0), "income"),
        ("Rent", Decimal::new(400, 0), "expense"),
        ("Groceries", Decimal::new(8675, 2), "expense"),
        ("Freelance work", Decimal::new(25050, 2), "income"),
        ("Coffee", Decimal::new(450, 2), "expense"),
        ("Moved to savings", Decimal::new(100, 0), "transfer"),
    ];

    for (title, amount, category) in demo_transactions {
        create_transaction(
            Transaction::build(user_id.clone(), title, amount, Category::from(category)),
            &conn,
        )?;
    }

    println!("Success!");

    Ok(())
}
