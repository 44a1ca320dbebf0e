//! Headline figures for the dashboard stats cards.

use serde::Serialize;
use time::{Date, Duration};

use crate::balance::BalanceSnapshot;

/// The length of the "month" the stats cards report on.
const PERIOD_DAYS: i64 = 30;

/// Whether a change is good, bad or neither for the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    /// The change is good news.
    Up,
    /// The change is bad news.
    Down,
    /// Nothing changed.
    Neutral,
}

impl Trend {
    /// Classify a percentage change.
    ///
    /// Spending less is good, so for expenses a negative change is [Trend::Up].
    pub fn of(change: f64, is_expense: bool) -> Self {
        if change == 0.0 {
            return Self::Neutral;
        }

        let is_good = if is_expense { change < 0.0 } else { change > 0.0 };

        if is_good { Self::Up } else { Self::Down }
    }
}

/// The four headline figures with their change from the previous period.
///
/// Changes are percentages, e.g. `12.5` for a 12.5% increase.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// The most recent balance.
    pub total_balance: f64,
    /// Income over the last 30 days.
    pub monthly_income: f64,
    /// Expenses over the last 30 days.
    pub monthly_expenses: f64,
    /// Income minus expenses over the last 30 days.
    pub monthly_savings: f64,
    /// Change of the latest balance since the end of the previous period.
    pub balance_change: f64,
    /// Change of income from the previous period.
    pub income_change: f64,
    /// Change of expenses from the previous period.
    pub expense_change: f64,
    /// Change of savings from the previous period.
    pub savings_change: f64,
}

#[derive(Default)]
struct PeriodTotals {
    income: f64,
    expenses: f64,
}

impl PeriodTotals {
    fn savings(&self) -> f64 {
        self.income - self.expenses
    }
}

impl DashboardStats {
    /// Work out the stats for the 30 days up to and including `today`,
    /// compared with the 30 days before that.
    ///
    /// Snapshots after `today` are ignored. The balance change compares the
    /// latest balance with the last balance of the previous period.
    pub fn from_history(history: &[BalanceSnapshot], today: Date) -> Self {
        let current_start = today - Duration::days(PERIOD_DAYS - 1);
        let previous_start = current_start - Duration::days(PERIOD_DAYS);

        let mut current = PeriodTotals::default();
        let mut previous = PeriodTotals::default();
        let mut latest: Option<&BalanceSnapshot> = None;
        let mut previous_latest: Option<&BalanceSnapshot> = None;

        for snapshot in history.iter().filter(|snapshot| snapshot.date <= today) {
            let totals = if snapshot.date >= current_start {
                &mut current
            } else if snapshot.date >= previous_start {
                &mut previous
            } else {
                continue;
            };
            totals.income += snapshot.income;
            totals.expenses += snapshot.expenses;
        }

        for snapshot in history {
            if snapshot.date <= today && latest.is_none_or(|latest| snapshot.date > latest.date) {
                latest = Some(snapshot);
            }

            if snapshot.date < current_start
                && previous_latest.is_none_or(|latest| snapshot.date > latest.date)
            {
                previous_latest = Some(snapshot);
            }
        }

        let total_balance = latest.map_or(0.0, |snapshot| snapshot.balance);
        let previous_balance = previous_latest.map_or(0.0, |snapshot| snapshot.balance);

        Self {
            total_balance,
            monthly_income: current.income,
            monthly_expenses: current.expenses,
            monthly_savings: current.savings(),
            balance_change: percentage_change(previous_balance, total_balance),
            income_change: percentage_change(previous.income, current.income),
            expense_change: percentage_change(previous.expenses, current.expenses),
            savings_change: percentage_change(previous.savings(), current.savings()),
        }
    }
}

/// The change from `previous` to `current` as a percentage of `previous`.
///
/// Zero if `previous` is zero.
fn percentage_change(previous: f64, current: f64) -> f64 {
    if previous == 0.0 {
        0.0
    } else {
        (current - previous) / previous.abs() * 100.0
    }
}
