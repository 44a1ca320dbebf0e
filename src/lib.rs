//! FlowTrack is a personal finance dashboard.
//!
//! The library aggregates spending by category for charts, slices the daily
//! balance history into trailing windows and formats amounts, percentages
//! and dates in French conventions. A small web server renders the
//! dashboard as HTML pages with htmx partials for the chart cards.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod balance;
mod dashboard;
mod endpoints;
mod error;
pub mod format;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod source;
mod spending;
mod stats;
mod timezone;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use balance::{BalanceSeries, BalanceSnapshot, Window, balance_series, filter_by_window};
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use source::{DashboardSource, SampleDashboardSource};
pub use spending::{
    CategorySpending, DEFAULT_MAX_BUCKETS, OTHERS_ID, OTHERS_NAME, aggregate_by_category, rank,
    to_chart_buckets,
};
pub use stats::{DashboardStats, Trend};
pub use timezone::get_local_offset;
pub use transaction::{Category, Transaction, TransactionBuilder, TransactionKind};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`. If a signal handler cannot be
/// installed the error is logged and only the other signal is waited for.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => tracing::debug!("Received ctrl+c signal."),
            Err(error) => {
                tracing::error!("failed to install Ctrl+C handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
                tracing::debug!("Received terminate signal.");
            }
            Err(error) => {
                tracing::error!("failed to install terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    handle.graceful_shutdown(Some(Duration::from_secs(1)));
}
