//! The URIs served by the app.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The dashboard page.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The balance history card, for htmx swaps.
pub const DASHBOARD_BALANCE_CHART: &str = "/dashboard/balance-chart";
/// The spending by category card, for htmx swaps.
pub const DASHBOARD_SPENDING_CHART: &str = "/dashboard/spending-chart";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// Append a query string to `endpoint`.
///
/// An empty query leaves `endpoint` unchanged.
pub fn with_query(endpoint: &str, query: &str) -> String {
    if query.is_empty() {
        endpoint.to_owned()
    } else {
        format!("{endpoint}?{query}")
    }
}
