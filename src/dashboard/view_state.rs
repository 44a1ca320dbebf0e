//! The dashboard's view state: which period and chart styles are selected.
//!
//! The state lives in the query string, so every link and htmx request
//! carries the full state and the render functions stay stateless.

use std::str::FromStr;

use serde::Deserialize;

use crate::{Error, balance::Window};

/// The raw query parameters of the dashboard routes.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// The balance history window, e.g. "90d".
    pub period: Option<String>,
    /// The spending chart kind, "pie" or "bar".
    pub chart: Option<String>,
    /// The balance chart style, "area" or "line".
    pub style: Option<String>,
}

/// How spending by category is charted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpendingChartKind {
    #[default]
    Pie,
    Bar,
}

impl SpendingChartKind {
    pub const ALL: [SpendingChartKind; 2] = [SpendingChartKind::Pie, SpendingChartKind::Bar];

    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::Pie => "pie",
            Self::Bar => "bar",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pie => "Secteurs",
            Self::Bar => "Barres",
        }
    }
}

impl FromStr for SpendingChartKind {
    type Err = Error;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_query_value() == tag)
            .ok_or_else(|| Error::UnknownChartKind(tag.to_owned()))
    }
}

/// How the balance history is drawn.
///
/// The area style shows the balance alone, the line style adds daily income
/// and expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BalanceStyle {
    #[default]
    Area,
    Line,
}

impl BalanceStyle {
    pub const ALL: [BalanceStyle; 2] = [BalanceStyle::Area, BalanceStyle::Line];

    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::Area => "area",
            Self::Line => "line",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Area => "Aire",
            Self::Line => "Courbes",
        }
    }
}

impl FromStr for BalanceStyle {
    type Err = Error;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|style| style.as_query_value() == tag)
            .ok_or_else(|| Error::UnknownBalanceStyle(tag.to_owned()))
    }
}

/// The validated selection that the dashboard is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    pub window: Window,
    pub spending_chart: SpendingChartKind,
    pub balance_style: BalanceStyle,
}

impl ViewState {
    pub fn with_window(self, window: Window) -> Self {
        Self { window, ..self }
    }

    pub fn with_spending_chart(self, spending_chart: SpendingChartKind) -> Self {
        Self {
            spending_chart,
            ..self
        }
    }

    pub fn with_balance_style(self, balance_style: BalanceStyle) -> Self {
        Self {
            balance_style,
            ..self
        }
    }

    /// The query string that reproduces this state, without the leading "?".
    pub fn to_query(self) -> String {
        format!(
            "period={}&chart={}&style={}",
            self.window.as_query_value(),
            self.spending_chart.as_query_value(),
            self.balance_style.as_query_value()
        )
    }
}

impl TryFrom<DashboardQuery> for ViewState {
    type Error = Error;

    /// Missing or empty parameters take their default, unknown values are
    /// rejected.
    fn try_from(query: DashboardQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            window: parse_or_default(query.period.as_deref())?,
            spending_chart: parse_or_default(query.chart.as_deref())?,
            balance_style: parse_or_default(query.style.as_deref())?,
        })
    }
}

fn parse_or_default<T>(value: Option<&str>) -> Result<T, Error>
where
    T: FromStr<Err = Error> + Default,
{
    match value {
        None | Some("") => Ok(T::default()),
        Some(value) => value.parse(),
    }
}

#[cfg(test)]
mod tests {
    use axum::{extract::Query, http::Uri};

    use crate::{
        Error,
        balance::Window,
        endpoints::{DASHBOARD_VIEW, with_query},
    };

    use super::{BalanceStyle, DashboardQuery, SpendingChartKind, ViewState};

    fn query(period: Option<&str>, chart: Option<&str>, style: Option<&str>) -> DashboardQuery {
        DashboardQuery {
            period: period.map(str::to_owned),
            chart: chart.map(str::to_owned),
            style: style.map(str::to_owned),
        }
    }

    #[test]
    fn missing_parameters_use_defaults() {
        let view = ViewState::try_from(query(None, Some(""), None)).unwrap();

        assert_eq!(view, ViewState::default());
        assert_eq!(view.window, Window::ThirtyDays);
        assert_eq!(view.spending_chart, SpendingChartKind::Pie);
        assert_eq!(view.balance_style, BalanceStyle::Area);
    }

    #[test]
    fn parses_every_parameter() {
        let view = ViewState::try_from(query(Some("1y"), Some("bar"), Some("line"))).unwrap();

        assert_eq!(
            view,
            ViewState {
                window: Window::OneYear,
                spending_chart: SpendingChartKind::Bar,
                balance_style: BalanceStyle::Line,
            }
        );
    }

    #[test]
    fn rejects_unknown_period() {
        let result = ViewState::try_from(query(Some("7d"), None, None));

        assert_eq!(result, Err(Error::UnknownWindow("7d".to_owned())));
    }

    #[test]
    fn rejects_unknown_chart() {
        let result = ViewState::try_from(query(None, Some("donut"), None));

        assert_eq!(result, Err(Error::UnknownChartKind("donut".to_owned())));
    }

    #[test]
    fn rejects_unknown_style() {
        let result = ViewState::try_from(query(None, None, Some("bubble")));

        assert_eq!(result, Err(Error::UnknownBalanceStyle("bubble".to_owned())));
    }

    #[test]
    fn query_round_trips_through_the_query_parser() {
        let view = ViewState::default()
            .with_window(Window::NinetyDays)
            .with_spending_chart(SpendingChartKind::Bar);
        let uri: Uri = with_query(DASHBOARD_VIEW, &view.to_query()).parse().unwrap();

        let Query(parsed) = Query::<DashboardQuery>::try_from_uri(&uri).unwrap();

        assert_eq!(view.to_query(), "period=90d&chart=bar&style=area");
        assert_eq!(ViewState::try_from(parsed), Ok(view));
    }

    #[test]
    fn every_state_round_trips_through_the_query_parser() {
        for window in Window::ALL {
            for spending_chart in SpendingChartKind::ALL {
                for balance_style in BalanceStyle::ALL {
                    let view = ViewState {
                        window,
                        spending_chart,
                        balance_style,
                    };
                    let uri: Uri = with_query(DASHBOARD_VIEW, &view.to_query()).parse().unwrap();

                    let Query(parsed) = Query::<DashboardQuery>::try_from_uri(&uri).unwrap();

                    assert_eq!(ViewState::try_from(parsed), Ok(view));
                }
            }
        }
    }
}
