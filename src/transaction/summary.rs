//! Aggregates a user's transactions into their balance, income and expenses.

use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Error, UserId, transaction::Category, transaction::core::parse_amount};

/// The totals over all of a user's transactions.
///
/// The sums are kept as exact decimals and only converted to JSON numbers when
/// serialized, so `balance == income - expenses` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Income minus expenses.
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    /// The sum of all income amounts.
    #[serde(with = "rust_decimal::serde::float")]
    pub income: Decimal,
    /// The sum of all expense amounts.
    #[serde(with = "rust_decimal::serde::float")]
    pub expenses: Decimal,
}

impl Summary {
    /// Add a single transaction to the totals.
    ///
    /// The totals are left unchanged if the transaction cannot be added.
    ///
    /// # Errors
    /// Returns [Error::AmountOverflow] if any of the totals would overflow.
    pub fn add(&mut self, category: &Category, amount: Decimal) -> Result<(), Error> {
        let balance = self
            .balance
            .checked_add(category.contribution(amount))
            .ok_or(Error::AmountOverflow)?;

        let (income, expenses) = match category {
            Category::Income => (
                self.income
                    .checked_add(amount)
                    .ok_or(Error::AmountOverflow)?,
                self.expenses,
            ),
            Category::Expense => (
                self.income,
                self.expenses
                    .checked_add(amount)
                    .ok_or(Error::AmountOverflow)?,
            ),
            Category::Other(_) => (self.income, self.expenses),
        };

        *self = Summary {
            balance,
            income,
            expenses,
        };

        Ok(())
    }
}

/// Compute the summary of all transactions owned by `user_id`.
///
/// A user without any transactions gets a summary of all zeros.
///
/// # Errors
/// This function will return a:
/// - [Error::SqlError] if there is an SQL error or a stored amount is not a valid decimal,
/// - or [Error::AmountOverflow] if the totals are too large to represent.
pub fn get_summary(user_id: &UserId, connection: &Connection) -> Result<Summary, Error> {
    let mut statement = connection.prepare(
        "SELECT category, amount FROM \"transaction\"
         WHERE user_id = :user_id AND category IN ('income', 'expense')",
    )?;

    let rows = statement.query_map(&[(":user_id", user_id.as_str())], |row| {
        let category: String = row.get(0)?;
        let amount = parse_amount(row.get(1)?, 1)?;

        Ok((Category::from(category), amount))
    })?;

    let mut summary = Summary::default();

    for row in rows {
        let (category, amount) = row?;
        summary.add(&category, amount)?;
    }

    Ok(summary)
}
