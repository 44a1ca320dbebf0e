//! Balance history: dated snapshots and the trailing windows used to chart them.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use time::{Date, Duration, OffsetDateTime};

use crate::{Error, format::format_day_month};

/// The account balance, income and expenses recorded for one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    /// The day the snapshot was taken. Unique within a series.
    pub date: Date,
    /// The balance at the end of the day. May be negative.
    pub balance: f64,
    /// Money earned on the day.
    pub income: f64,
    /// Money spent on the day.
    pub expenses: f64,
}

/// A trailing time interval ending now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Window {
    /// The last 30 days.
    #[default]
    ThirtyDays,
    /// The last 90 days.
    NinetyDays,
    /// The last 365 days.
    OneYear,
}

impl Window {
    /// All windows, shortest first.
    pub const ALL: [Window; 3] = [Window::ThirtyDays, Window::NinetyDays, Window::OneYear];

    /// The number of days the window reaches back.
    pub fn days(self) -> i64 {
        match self {
            Self::ThirtyDays => 30,
            Self::NinetyDays => 90,
            Self::OneYear => 365,
        }
    }

    /// The tag used for the window in URLs.
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::ThirtyDays => "30d",
            Self::NinetyDays => "90d",
            Self::OneYear => "1y",
        }
    }

    /// The label shown on the period selector.
    pub fn label(self) -> &'static str {
        match self {
            Self::ThirtyDays => "30 jours",
            Self::NinetyDays => "3 mois",
            Self::OneYear => "1 an",
        }
    }
}

impl FromStr for Window {
    type Err = Error;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Window::ALL
            .into_iter()
            .find(|window| window.as_query_value() == tag)
            .ok_or_else(|| Error::UnknownWindow(tag.to_owned()))
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query_value())
    }
}

/// Keep the snapshots that fall inside `window` as measured back from `now`.
///
/// The cutoff keeps the time of day of `now`, and each snapshot counts as
/// midnight of its date in `now`'s offset. A snapshot dated exactly
/// `window.days()` ago is therefore dropped unless `now` is midnight.
///
/// The result preserves the input order and may be empty.
pub fn filter_by_window(
    snapshots: &[BalanceSnapshot],
    window: Window,
    now: OffsetDateTime,
) -> Vec<BalanceSnapshot> {
    let cutoff = now - Duration::days(window.days());

    snapshots
        .iter()
        .filter(|snapshot| snapshot.date.midnight().assume_offset(now.offset()) >= cutoff)
        .copied()
        .collect()
}

/// Snapshots split into columns for a chart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BalanceSeries {
    /// The x-axis label of each snapshot, e.g. "15 oct.".
    pub labels: Vec<String>,
    /// End of day balances.
    pub balances: Vec<f64>,
    /// Daily income.
    pub incomes: Vec<f64>,
    /// Daily expenses.
    pub expenses: Vec<f64>,
}

impl BalanceSeries {
    /// Whether the series has no points.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Split `snapshots` into chart columns, in input order.
pub fn balance_series(snapshots: &[BalanceSnapshot]) -> BalanceSeries {
    let mut series = BalanceSeries::default();

    for snapshot in snapshots {
        series.labels.push(format_day_month(snapshot.date));
        series.balances.push(snapshot.balance);
        series.incomes.push(snapshot.income);
        series.expenses.push(snapshot.expenses);
    }

    series
}
