//! Card components for the dashboard.
//!
//! Provides:
//! - The four headline stats cards with trend indicators
//! - The balance history card with period and style toggles
//! - The spending by category card with its chart and top categories

use maud::{Markup, html};

use crate::{
    balance::{BalanceSeries, Window},
    dashboard::{
        charts::{DashboardChart, balance_chart, chart_view, spending_chart},
        view_state::{BalanceStyle, SpendingChartKind, ViewState},
    },
    endpoints::{self, with_query},
    format::{CurrencyFormat, PercentageFormat, format_currency, format_percentage},
    html::{
        CARD_STYLE, MUTED_TEXT_STYLE, TOGGLE_ACTIVE_STYLE, TOGGLE_INACTIVE_STYLE, card,
        empty_state,
    },
    spending::CategorySpending,
    stats::{DashboardStats, Trend},
};

/// The element ID of the balance history card.
pub(super) const BALANCE_CARD_ID: &str = "balance-card";
/// The element ID of the spending by category card.
pub(super) const SPENDING_CARD_ID: &str = "spending-card";
const BALANCE_CONTROLS_ID: &str = "balance-controls";
const SPENDING_CONTROLS_ID: &str = "spending-controls";

/// The number of categories listed under the spending chart.
pub(super) const TOP_CATEGORIES: usize = 5;

/// A whole euro amount that keeps the minus sign of overdrawn balances
/// and negative savings.
fn whole_euros(amount: f64) -> String {
    let format = CurrencyFormat::default()
        .whole_units()
        .show_sign(amount < 0.0);

    format_currency(amount, &format)
}

struct StatsCard<'a> {
    title: &'a str,
    icon: &'a str,
    value: f64,
    change: f64,
    is_expense: bool,
}

/// Renders the row of headline stats cards.
pub(super) fn stats_cards_view(stats: &DashboardStats) -> Markup {
    let cards = [
        StatsCard {
            title: "Solde total",
            icon: "👛",
            value: stats.total_balance,
            change: stats.balance_change,
            is_expense: false,
        },
        StatsCard {
            title: "Revenus du mois",
            icon: "📈",
            value: stats.monthly_income,
            change: stats.income_change,
            is_expense: false,
        },
        StatsCard {
            title: "Dépenses du mois",
            icon: "📉",
            value: stats.monthly_expenses,
            change: stats.expense_change,
            is_expense: true,
        },
        StatsCard {
            title: "Épargne du mois",
            icon: "🐷",
            value: stats.monthly_savings,
            change: stats.savings_change,
            is_expense: false,
        },
    ];

    html! {
        section id="stats" class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-6"
        {
            @for stats_card in &cards {
                (stats_card_view(stats_card))
            }
        }
    }
}

fn stats_card_view(stats_card: &StatsCard) -> Markup {
    let trend = Trend::of(stats_card.change, stats_card.is_expense);
    let (trend_name, trend_style, arrow) = match trend {
        Trend::Up => ("up", "text-green-600 dark:text-green-400", "↗"),
        Trend::Down => ("down", "text-red-600 dark:text-red-400", "↘"),
        Trend::Neutral => ("neutral", "text-gray-500 dark:text-gray-400", "→"),
    };
    let change = format_percentage(stats_card.change, &PercentageFormat::default().show_sign(true));

    html! {
        div class=(CARD_STYLE) data-trend=(trend_name)
        {
            div class="flex items-center justify-between"
            {
                h3 class=(MUTED_TEXT_STYLE) { (stats_card.title) }
                span aria-hidden="true" { (stats_card.icon) }
            }

            p class="stat-value mt-2 text-2xl font-bold tabular-nums" { (whole_euros(stats_card.value)) }

            p class={ "mt-1 text-xs " (trend_style) }
            {
                span aria-hidden="true" { (arrow) " " }
                span class="stat-change" { (change) }
                " par rapport au mois dernier"
            }
        }
    }
}

/// A button group that switches one part of the view state.
///
/// Each button links to the full page so it works without JavaScript, and
/// htmx swaps only the card at `target_id` when it is available.
fn toggle_group<T: Copy + PartialEq>(
    id: &str,
    options: &[T],
    selected: T,
    label: impl Fn(T) -> &'static str,
    apply: impl Fn(T) -> ViewState,
    partial_endpoint: &str,
    target_id: &str,
) -> Markup {
    html! {
        div id=(id) class="toggle-group flex rounded-lg border border-gray-200 dark:border-gray-700 p-1"
        {
            @for option in options {
                @let query = apply(*option).to_query();
                @let is_selected = *option == selected;
                a
                    href=(with_query(endpoints::DASHBOARD_VIEW, &query))
                    hx-get=(with_query(partial_endpoint, &query))
                    hx-target={ "#" (target_id) }
                    hx-swap="outerHTML"
                    hx-push-url=(with_query(endpoints::DASHBOARD_VIEW, &query))
                    class=(if is_selected { TOGGLE_ACTIVE_STYLE } else { TOGGLE_INACTIVE_STYLE })
                    aria-current=[is_selected.then_some("true")]
                {
                    (label(*option))
                }
            }
        }
    }
}

/// The balance card's toggles.
///
/// With `out_of_band` set they replace the toggles already on the page, so
/// that their links pick up a change made in the spending card.
pub(super) fn balance_controls(view: ViewState, out_of_band: bool) -> Markup {
    html! {
        div
            id=(BALANCE_CONTROLS_ID)
            class="flex flex-wrap gap-2"
            hx-swap-oob=[out_of_band.then_some("true")]
        {
            (toggle_group(
                "period-toggle",
                &Window::ALL,
                view.window,
                Window::label,
                |window| view.with_window(window),
                endpoints::DASHBOARD_BALANCE_CHART,
                BALANCE_CARD_ID,
            ))
            (toggle_group(
                "style-toggle",
                &BalanceStyle::ALL,
                view.balance_style,
                BalanceStyle::label,
                |style| view.with_balance_style(style),
                endpoints::DASHBOARD_BALANCE_CHART,
                BALANCE_CARD_ID,
            ))
        }
    }
}

/// The spending card's toggles, see [balance_controls].
pub(super) fn spending_controls(view: ViewState, out_of_band: bool) -> Markup {
    html! {
        div
            id=(SPENDING_CONTROLS_ID)
            hx-swap-oob=[out_of_band.then_some("true")]
        {
            (toggle_group(
                "chart-toggle",
                &SpendingChartKind::ALL,
                view.spending_chart,
                SpendingChartKind::label,
                |kind| view.with_spending_chart(kind),
                endpoints::DASHBOARD_SPENDING_CHART,
                SPENDING_CARD_ID,
            ))
        }
    }
}

/// Renders the balance history card.
pub(super) fn balance_card(view: ViewState, series: &BalanceSeries) -> Markup {
    let body = if series.is_empty() {
        empty_state(
            "📈",
            "Aucune donnée",
            "L'historique de votre solde apparaîtra ici.",
        )
    } else {
        let chart = DashboardChart::new("balance-chart", &balance_chart(series, view.balance_style));
        chart_view(&chart)
    };

    card(
        BALANCE_CARD_ID,
        "Évolution du solde",
        Some(balance_controls(view, false)),
        body,
    )
}

/// Renders the spending by category card.
///
/// `buckets` are drawn in the chart and `top_categories` are listed below
/// it. With no spending the card shows an empty state instead.
pub(super) fn spending_card(
    view: ViewState,
    buckets: &[CategorySpending],
    top_categories: &[CategorySpending],
) -> Markup {
    let body = if buckets.is_empty() {
        empty_state(
            "📊",
            "Aucune dépense",
            "Vos dépenses par catégorie apparaîtront ici une fois que vous aurez ajouté des transactions.",
        )
    } else {
        let chart =
            DashboardChart::new("spending-chart", &spending_chart(buckets, view.spending_chart));

        html! {
            div class="space-y-6"
            {
                (chart_view(&chart))

                div class="space-y-1"
                {
                    h3 class="text-sm font-medium mb-3" { "Top catégories" }

                    ol id="top-categories"
                    {
                        @for (index, category) in top_categories.iter().enumerate() {
                            (category_item(index + 1, category))
                        }
                    }
                }
            }
        }
    };

    card(
        SPENDING_CARD_ID,
        "Dépenses par catégorie",
        Some(spending_controls(view, false)),
        body,
    )
}

fn category_item(rank: usize, category: &CategorySpending) -> Markup {
    let percentage = format_percentage(category.percentage, &PercentageFormat::default());
    let bar_width = category.percentage.clamp(0.0, 100.0);

    html! {
        li class="flex items-center gap-3 p-3 rounded-xl hover:bg-gray-50 dark:hover:bg-gray-700"
        {
            span
                class="flex h-6 w-6 items-center justify-center rounded-full
                    bg-gray-100 dark:bg-gray-700 text-xs font-medium"
            {
                (rank)
            }

            span
                class="flex h-10 w-10 items-center justify-center rounded-lg"
                style={ "background-color: " (category.color) }
                aria-hidden="true"
            {
                (category.icon)
            }

            div class="flex-1 min-w-0"
            {
                div class="flex items-center justify-between"
                {
                    span class="category-name text-sm font-medium truncate" { (category.name) }
                    span class="category-amount text-sm font-semibold tabular-nums" { (whole_euros(category.amount)) }
                }

                div class="flex items-center justify-between mt-1"
                {
                    div class="flex items-center gap-2"
                    {
                        div class="w-16 bg-gray-200 dark:bg-gray-700 rounded-full h-1.5"
                        {
                            div
                                class="h-1.5 rounded-full"
                                style={ "width: " (format!("{bar_width:.1}")) "%; background-color: " (category.color) }
                            {}
                        }
                        span class="text-xs text-gray-500 dark:text-gray-400" { (percentage) }
                    }

                    span class="text-xs text-gray-500 dark:text-gray-400"
                    {
                        (category.transaction_count) " transactions"
                    }
                }
            }
        }
    }
}
