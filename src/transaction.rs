//! Defines the transaction model shown in the recent transactions list and
//! used as the input to category aggregation.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Whether money came in, went out, or moved between the user's accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money earned, e.g. a salary.
    Income,
    /// Money spent.
    Expense,
    /// Money moved between two of the user's own accounts.
    Transfer,
}

impl TransactionKind {
    /// The sign shown in front of the amount in transaction lists.
    ///
    /// Transfers leave the account they are listed under, so they read as
    /// outgoing like expenses.
    pub fn sign(self) -> &'static str {
        match self {
            TransactionKind::Income => "+",
            TransactionKind::Expense | TransactionKind::Transfer => "-",
        }
    }
}

/// The category a transaction is filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique key of the category.
    pub id: String,
    /// The display name, e.g. "Alimentation".
    pub name: String,
    /// An emoji shown next to the name.
    pub icon: String,
    /// A CSS colour used for the category in charts.
    pub color: String,
}

impl Category {
    /// Create a new category.
    pub fn new(id: &str, name: &str, icon: &str, color: &str) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            icon: icon.to_owned(),
            color: color.to_owned(),
        }
    }
}

/// An income, expense or transfer.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique key of the transaction.
    pub id: String,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The magnitude of the transaction. The direction is given by `kind`.
    pub amount: f64,
    /// Whether this is income, an expense or a transfer.
    pub kind: TransactionKind,
    /// The category the transaction belongs to.
    pub category: Category,
    /// The name of the account the transaction was made from.
    pub account: String,
    /// When the transaction happened.
    pub date: OffsetDateTime,
    /// Free-form labels, possibly empty.
    pub tags: Vec<String>,
}

impl Transaction {
    /// Start building a transaction.
    ///
    /// The account defaults to "Compte courant" and the transaction has no
    /// tags until [TransactionBuilder::tags] is called.
    pub fn build(
        id: &str,
        amount: f64,
        kind: TransactionKind,
        category: Category,
        date: OffsetDateTime,
    ) -> TransactionBuilder {
        TransactionBuilder {
            transaction: Transaction {
                id: id.to_owned(),
                description: String::new(),
                amount: amount.abs(),
                kind,
                category,
                account: "Compte courant".to_owned(),
                date,
                tags: Vec::new(),
            },
        }
    }
}

/// A builder for [Transaction] with defaults for the optional fields.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionBuilder {
    transaction: Transaction,
}

impl TransactionBuilder {
    /// Set the description.
    pub fn description(mut self, description: &str) -> Self {
        self.transaction.description = description.to_owned();
        self
    }

    /// Set the account name.
    pub fn account(mut self, account: &str) -> Self {
        self.transaction.account = account.to_owned();
        self
    }

    /// Set the tags.
    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.transaction.tags = tags.iter().map(|tag| (*tag).to_owned()).collect();
        self
    }

    /// Build the transaction.
    pub fn finalise(self) -> Transaction {
        self.transaction
    }
}
