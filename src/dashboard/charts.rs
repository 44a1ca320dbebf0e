//! Chart generation and rendering for the dashboard.
//!
//! Charts are built as ECharts options with charming and rendered as a
//! container div followed by the script that initialises it. The script runs
//! both on first page load and when htmx swaps a card in.

use charming::{
    Chart,
    component::{Axis, Grid, Legend},
    datatype::DataPointItem,
    element::{
        AreaStyle, AxisLabel, AxisPointer, AxisPointerType, AxisType, Color, ItemStyle,
        JsFunction, LineStyle, LineStyleType, Tooltip, Trigger,
    },
    series::{Line, Pie, bar},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    balance::BalanceSeries,
    dashboard::view_state::{BalanceStyle, SpendingChartKind},
    spending::CategorySpending,
};

const BALANCE_COLOR: &str = "#6366F1";
const INCOME_COLOR: &str = "#10B981";
const EXPENSES_COLOR: &str = "#EF4444";

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

impl DashboardChart {
    pub fn new(id: &'static str, chart: &Chart) -> Self {
        Self {
            id,
            options: chart.to_string(),
        }
    }
}

/// Renders the container for `chart` and the script that draws into it.
pub(super) fn chart_view(chart: &DashboardChart) -> Markup {
    html!(
        div
            id=(chart.id)
            class="chart min-h-[320px] w-full"
        {}

        script { (chart_script(chart)) }
    )
}

/// Generates JavaScript initialization code for a chart.
///
/// Supports dark mode and responsive resizing. If the document is still
/// loading the chart is drawn on `DOMContentLoaded`, otherwise immediately.
fn chart_script(chart: &DashboardChart) -> PreEscaped<String> {
    // A "</script>" inside the options would end the script element early.
    let options = chart.options.replace("</", "<\\/");

    PreEscaped(format!(
        r#"(function() {{
            const render = () => {{
                const chartDom = document.getElementById("{id}");
                if (!chartDom) return;
                echarts.getInstanceByDom(chartDom)?.dispose();

                const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                const theme = darkModeMediaQuery.matches ? 'dark' : null;
                const chart = echarts.init(chartDom, theme, {{ locale: 'FR' }});
                const option = {options};
                option.backgroundColor = 'transparent';
                chart.setOption(option);

                window.addEventListener('resize', () => chart.resize());
            }};

            if (document.readyState === 'loading') {{
                document.addEventListener('DOMContentLoaded', render);
            }} else {{
                render();
            }}
        }})();"#,
        id = chart.id,
    ))
}

/// The balance history over the selected window.
pub(super) fn balance_chart(series: &BalanceSeries, style: BalanceStyle) -> Chart {
    let chart = Chart::new()
        .tooltip(axis_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(series.labels.clone()),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        );

    match style {
        BalanceStyle::Area => chart.color(vec![Color::from(BALANCE_COLOR)]).series(
            Line::new()
                .name("Solde")
                .smooth(true)
                .show_symbol(false)
                .area_style(AreaStyle::new())
                .data(series.balances.clone()),
        ),
        BalanceStyle::Line => chart
            .color(vec![
                Color::from(BALANCE_COLOR),
                Color::from(INCOME_COLOR),
                Color::from(EXPENSES_COLOR),
            ])
            .legend(Legend::new().bottom(0))
            .series(
                Line::new()
                    .name("Solde")
                    .smooth(true)
                    .data(series.balances.clone()),
            )
            .series(
                Line::new()
                    .name("Revenus")
                    .smooth(true)
                    .show_symbol(false)
                    .line_style(LineStyle::new().type_(LineStyleType::Dashed))
                    .data(series.incomes.clone()),
            )
            .series(
                Line::new()
                    .name("Dépenses")
                    .smooth(true)
                    .show_symbol(false)
                    .line_style(LineStyle::new().type_(LineStyleType::Dashed))
                    .data(series.expenses.clone()),
            ),
    }
}

/// Spending per chart bucket, drawn in each category's colour.
pub(super) fn spending_chart(buckets: &[CategorySpending], kind: SpendingChartKind) -> Chart {
    match kind {
        SpendingChartKind::Pie => Chart::new()
            .tooltip(item_tooltip())
            .series(
                Pie::new()
                    .name("Dépenses")
                    .radius(vec!["40%", "70%"])
                    .data(spending_data_points(buckets)),
            ),
        SpendingChartKind::Bar => Chart::new()
            .tooltip(axis_tooltip())
            .grid(
                Grid::new()
                    .left("3%")
                    .right("4%")
                    .bottom("3%")
                    .contain_label(true),
            )
            .x_axis(
                Axis::new().type_(AxisType::Category).data(
                    buckets
                        .iter()
                        .map(|bucket| bucket.name.clone())
                        .collect(),
                ),
            )
            .y_axis(
                Axis::new()
                    .type_(AxisType::Value)
                    .axis_label(AxisLabel::new().formatter(currency_formatter())),
            )
            .series(
                bar::Bar::new()
                    .name("Dépenses")
                    .data(spending_data_points(buckets)),
            ),
    }
}

fn spending_data_points(buckets: &[CategorySpending]) -> Vec<DataPointItem> {
    buckets
        .iter()
        .map(|bucket| {
            DataPointItem::new(bucket.amount)
                .name(bucket.name.as_str())
                .item_style(ItemStyle::new().color(bucket.color.as_str()))
        })
        .collect()
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('fr-FR', {
              style: 'currency',
              currency: 'EUR',
              minimumFractionDigits: 0,
              maximumFractionDigits: 0
            });
            return (number || number === 0) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values along an axis
fn axis_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Line))
}

/// Creates a tooltip configuration for currency values of single items, e.g. pie slices
fn item_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Item)
        .value_formatter(currency_formatter())
}

#[cfg(test)]
mod tests {
    use crate::{
        balance::BalanceSeries,
        dashboard::view_state::{BalanceStyle, SpendingChartKind},
        spending::CategorySpending,
    };

    use super::{DashboardChart, balance_chart, chart_view, spending_chart};

    fn create_test_series() -> BalanceSeries {
        BalanceSeries {
            labels: vec!["14 oct.".to_owned(), "15 oct.".to_owned()],
            balances: vec![4100.0, 4250.5],
            incomes: vec![0.0, 3200.0],
            expenses: vec![87.45, 15.99],
        }
    }

    fn create_test_bucket(name: &str, amount: f64, color: &str) -> CategorySpending {
        CategorySpending {
            id: name.to_lowercase(),
            name: name.to_owned(),
            amount,
            percentage: 50.0,
            color: color.to_owned(),
            icon: "?".to_owned(),
            transaction_count: 1,
        }
    }

    #[test]
    fn area_style_draws_only_the_balance() {
        let options = balance_chart(&create_test_series(), BalanceStyle::Area).to_string();

        assert!(options.contains("Solde"));
        assert!(options.contains("areaStyle"));
        assert!(!options.contains("Revenus"));
    }

    #[test]
    fn line_style_adds_income_and_expenses() {
        let options = balance_chart(&create_test_series(), BalanceStyle::Line).to_string();

        assert!(options.contains("Solde"));
        assert!(options.contains("Revenus"));
        assert!(options.contains("Dépenses"));
        assert!(options.contains("15 oct."));
    }

    #[test]
    fn spending_chart_uses_category_colours() {
        let buckets = vec![
            create_test_bucket("Alimentation", 450.3, "#EF4444"),
            create_test_bucket("Autres", 220.95, "#9CA3AF"),
        ];

        for kind in SpendingChartKind::ALL {
            let options = spending_chart(&buckets, kind).to_string();

            assert!(options.contains("#EF4444"), "{kind:?} is missing a colour");
            assert!(options.contains("#9CA3AF"), "{kind:?} is missing a colour");
            assert!(options.contains("Alimentation"));
        }
    }

    #[test]
    fn chart_view_escapes_closing_tags_in_options() {
        let chart = DashboardChart {
            id: "test-chart",
            options: r#"{"name":"</script><b>"}"#.to_owned(),
        };

        let markup = chart_view(&chart).into_string();

        assert!(markup.contains(r#"id="test-chart""#));
        assert!(!markup.contains("</script><b>"));
        assert!(markup.contains(r#"<\/script><b>"#));
    }
}
