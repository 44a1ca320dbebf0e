//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - The handler for the full dashboard page
//! - The htmx handlers that swap in one chart card with new view settings
//! - The state used by the handlers

use std::sync::Arc;

use axum::{
    extract::{FromRef, Query, RawQuery, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_htmx::HxRequest;
use maud::{Markup, html};
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    balance::{BalanceSeries, balance_series, filter_by_window},
    dashboard::{
        cards::{
            TOP_CATEGORIES, balance_card, balance_controls, spending_card, spending_controls,
            stats_cards_view,
        },
        transactions::{RECENT_TRANSACTIONS, recent_transactions_view},
        view_state::{DashboardQuery, ViewState},
    },
    endpoints,
    html::{ECHARTS_SCRIPT, HeadElement, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    source::DashboardSource,
    spending::{CategorySpending, DEFAULT_MAX_BUCKETS, rank, to_chart_buckets},
    timezone::local_now,
};

/// The state needed for displaying the dashboard page.
#[derive(Clone)]
pub struct DashboardState {
    /// Where the dashboard data comes from.
    pub source: Arc<dyn DashboardSource>,
    /// The local timezone as a canonical timezone name, e.g. "Europe/Paris".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            source: state.source.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Display a page with an overview of the user's finances.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, Error> {
    let view = ViewState::try_from(query)?;
    let now = local_now(&state.local_timezone)?;
    let today = now.date();
    let source = state.source.as_ref();

    let stats = source
        .stats(today)
        .inspect_err(|error| tracing::error!("could not get dashboard stats: {error}"))?;
    let series = balance_series_for(source, view, now)?;
    let (buckets, top_categories) = spending_for(source, now)?;
    let transactions = source
        .recent_transactions(today, RECENT_TRANSACTIONS)
        .inspect_err(|error| tracing::error!("could not get recent transactions: {error}"))?;

    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();
    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            header
            {
                h1 class="text-2xl font-bold" { "Tableau de bord" }
                p class="text-sm text-gray-600 dark:text-gray-400 mt-1"
                {
                    "Vue d'ensemble de vos finances"
                }
            }

            (stats_cards_view(&stats))

            div class="grid grid-cols-1 lg:grid-cols-3 gap-6"
            {
                div class="lg:col-span-2" { (balance_card(view, &series)) }
                (spending_card(view, &buckets, &top_categories))
            }

            (recent_transactions_view(&transactions, now))
        }
    };

    let head = [HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned())];

    Ok(base("Tableau de bord", &head, &content).into_response())
}

/// Render the balance card for the view settings in the query.
///
/// The spending card's toggles are swapped in out of band so they link to
/// the new balance settings. Requests that do not come from htmx are
/// redirected to the full page with the same settings.
pub async fn get_balance_chart(
    State(state): State<DashboardState>,
    HxRequest(is_htmx_request): HxRequest,
    RawQuery(raw_query): RawQuery,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, Error> {
    if !is_htmx_request {
        return Ok(redirect_to_dashboard(raw_query));
    }

    let view = ViewState::try_from(query)?;
    let now = local_now(&state.local_timezone)?;
    let series = balance_series_for(state.source.as_ref(), view, now)?;

    Ok(partial_view(balance_card(view, &series), spending_controls(view, true)).into_response())
}

/// Render the spending card for the view settings in the query.
///
/// See [get_balance_chart].
pub async fn get_spending_chart(
    State(state): State<DashboardState>,
    HxRequest(is_htmx_request): HxRequest,
    RawQuery(raw_query): RawQuery,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, Error> {
    if !is_htmx_request {
        return Ok(redirect_to_dashboard(raw_query));
    }

    let view = ViewState::try_from(query)?;
    let now = local_now(&state.local_timezone)?;
    let (buckets, top_categories) = spending_for(state.source.as_ref(), now)?;

    Ok(partial_view(
        spending_card(view, &buckets, &top_categories),
        balance_controls(view, true),
    )
    .into_response())
}

fn redirect_to_dashboard(raw_query: Option<String>) -> Response {
    let query = raw_query.unwrap_or_default();

    Redirect::to(&endpoints::with_query(endpoints::DASHBOARD_VIEW, &query)).into_response()
}

fn partial_view(card: Markup, out_of_band_controls: Markup) -> Markup {
    html! {
        (card)
        (out_of_band_controls)
    }
}

fn balance_series_for(
    source: &dyn DashboardSource,
    view: ViewState,
    now: OffsetDateTime,
) -> Result<BalanceSeries, Error> {
    let history = source
        .balance_history(now.date())
        .inspect_err(|error| tracing::error!("could not get balance history: {error}"))?;

    Ok(balance_series(&filter_by_window(&history, view.window, now)))
}

/// The chart buckets and the largest categories for the current month.
fn spending_for(
    source: &dyn DashboardSource,
    now: OffsetDateTime,
) -> Result<(Vec<CategorySpending>, Vec<CategorySpending>), Error> {
    let spending = source
        .category_spending(now.date())
        .inspect_err(|error| tracing::error!("could not get category spending: {error}"))?;

    let buckets = to_chart_buckets(&spending, DEFAULT_MAX_BUCKETS)?;
    let mut top_categories = rank(&spending);
    top_categories.truncate(TOP_CATEGORIES);

    Ok((buckets, top_categories))
}
