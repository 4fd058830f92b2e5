//! The category tag attached to every transaction.

use std::fmt::Display;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What kind of money movement a transaction records.
///
/// Only income and expenses count towards a user's balance. Any other tag is
/// kept verbatim so it round-trips through the database and the API, but it
/// does not change the balance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    /// Money earned, stored as `"income"`.
    Income,
    /// Money spent, stored as `"expense"`.
    Expense,
    /// Any other tag, e.g. `"transfer"`.
    Other(String),
}

impl Category {
    /// The tag used for income in the database and API.
    pub const INCOME: &'static str = "income";
    /// The tag used for expenses in the database and API.
    pub const EXPENSE: &'static str = "expense";

    /// The tag as it is stored and shown to clients.
    pub fn as_str(&self) -> &str {
        match self {
            Category::Income => Self::INCOME,
            Category::Expense => Self::EXPENSE,
            Category::Other(tag) => tag,
        }
    }

    /// The amount this transaction adds to the balance.
    ///
    /// Income adds `amount`, expenses subtract it, and everything else adds
    /// zero. The stored sign of `amount` is not inspected.
    pub fn contribution(&self, amount: Decimal) -> Decimal {
        match self {
            Category::Income => amount,
            Category::Expense => -amount,
            Category::Other(_) => Decimal::ZERO,
        }
    }
}

impl From<&str> for Category {
    fn from(tag: &str) -> Self {
        match tag {
            Self::INCOME => Category::Income,
            Self::EXPENSE => Category::Expense,
            other => Category::Other(other.to_owned()),
        }
    }
}

impl From<String> for Category {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            Self::INCOME => Category::Income,
            Self::EXPENSE => Category::Expense,
            _ => Category::Other(tag),
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(tag) => tag,
            known => known.as_str().to_owned(),
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
