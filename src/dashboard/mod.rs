//! Dashboard module
//!
//! Provides an overview page with headline stats, the balance history,
//! spending by category and the most recent transactions. The chart cards
//! can be re-rendered on their own with different view settings.

mod cards;
mod charts;
mod handlers;
mod transactions;
mod view_state;

pub use handlers::{get_balance_chart, get_dashboard_page, get_spending_chart};
