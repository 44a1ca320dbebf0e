//! Implements a struct that holds the state of the server.

use std::sync::Arc;

use crate::source::DashboardSource;

/// The state of the server.
#[derive(Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "Europe/Paris".
    pub local_timezone: String,

    /// Where the dashboard gets its data from.
    pub source: Arc<dyn DashboardSource>,
}

impl AppState {
    /// Create a new [AppState].
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Europe/Paris".
    /// It is checked on each request so that a bad setting shows an error page.
    pub fn new(local_timezone: &str, source: impl DashboardSource + 'static) -> Self {
        Self {
            local_timezone: local_timezone.to_owned(),
            source: Arc::new(source),
        }
    }
}
