//! Defines where the dashboard gets its data from, and an in-memory sample
//! source used until a real backend exists.

use time::{Date, Duration, OffsetDateTime, Time};

use crate::{
    Error,
    balance::BalanceSnapshot,
    spending::{CategorySpending, aggregate_by_category},
    stats::DashboardStats,
    transaction::{Category, Transaction, TransactionKind},
};

/// Supplies the data shown on the dashboard.
///
/// Every method is given the current local date so that implementations do
/// not need to read the clock themselves.
pub trait DashboardSource: Send + Sync {
    /// The daily balance history, oldest first.
    fn balance_history(&self, today: Date) -> Result<Vec<BalanceSnapshot>, Error>;

    /// Spending per category for the current month, in any order.
    fn category_spending(&self, today: Date) -> Result<Vec<CategorySpending>, Error>;

    /// The `limit` most recent transactions, newest first.
    fn recent_transactions(&self, today: Date, limit: usize) -> Result<Vec<Transaction>, Error>;

    /// The headline figures for the stats cards.
    ///
    /// Defaults to working them out from [DashboardSource::balance_history].
    fn stats(&self, today: Date) -> Result<DashboardStats, Error> {
        let history = self.balance_history(today)?;

        Ok(DashboardStats::from_history(&history, today))
    }
}

/// The number of days of history the sample source generates.
const SAMPLE_HISTORY_DAYS: i64 = 365;
const SAMPLE_OPENING_BALANCE: f64 = 2000.0;

/// Deterministic sample data for demos and tests.
///
/// The same `today` always gives the same data.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleDashboardSource;

impl SampleDashboardSource {
    /// Create a new sample source.
    pub fn new() -> Self {
        Self
    }

    /// This month's transactions, newest first.
    fn month_transactions(&self, today: Date) -> Vec<Transaction> {
        SAMPLE_TRANSACTIONS
            .iter()
            .map(|sample| sample.to_transaction(today))
            .collect()
    }
}

impl DashboardSource for SampleDashboardSource {
    fn balance_history(&self, today: Date) -> Result<Vec<BalanceSnapshot>, Error> {
        let mut balance = SAMPLE_OPENING_BALANCE;

        let history = (0..SAMPLE_HISTORY_DAYS)
            .map(|day| {
                let income = round_to_cents(60.0 + ((day * 37) % 101) as f64 * 2.0);
                let expenses = round_to_cents(80.0 + ((day * 53) % 71) as f64 * 2.1);
                balance = round_to_cents(balance + income - expenses);

                BalanceSnapshot {
                    date: today - Duration::days(SAMPLE_HISTORY_DAYS - 1 - day),
                    balance,
                    income,
                    expenses,
                }
            })
            .collect();

        Ok(history)
    }

    fn category_spending(&self, today: Date) -> Result<Vec<CategorySpending>, Error> {
        Ok(aggregate_by_category(&self.month_transactions(today)))
    }

    fn recent_transactions(&self, today: Date, limit: usize) -> Result<Vec<Transaction>, Error> {
        let mut transactions = self.month_transactions(today);
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        transactions.truncate(limit);

        Ok(transactions)
    }
}

fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[derive(Clone, Copy)]
enum SampleCategory {
    Food,
    Transport,
    Housing,
    Entertainment,
    Health,
    Shopping,
    Salary,
    Savings,
}

impl SampleCategory {
    fn category(self) -> Category {
        match self {
            Self::Food => Category::new("food", "Alimentation", "🛒", "#EF4444"),
            Self::Transport => Category::new("transport", "Transport", "⛽", "#F59E0B"),
            Self::Housing => Category::new("housing", "Logement", "🏠", "#3B82F6"),
            Self::Entertainment => {
                Category::new("entertainment", "Divertissement", "🎬", "#8B5CF6")
            }
            Self::Health => Category::new("health", "Santé", "🏥", "#10B981"),
            Self::Shopping => Category::new("shopping", "Shopping", "🛍️", "#EC4899"),
            Self::Salary => Category::new("salary", "Salaire", "💼", "#10B981"),
            Self::Savings => Category::new("savings", "Épargne", "🏦", "#6366F1"),
        }
    }
}

struct SampleTransaction {
    days_ago: i64,
    hour: u8,
    description: &'static str,
    amount: f64,
    kind: TransactionKind,
    category: SampleCategory,
    account: &'static str,
    tags: &'static [&'static str],
}

impl SampleTransaction {
    fn to_transaction(&self, today: Date) -> Transaction {
        let time = Time::from_hms(self.hour, 0, 0).unwrap_or(Time::MIDNIGHT);
        let date: OffsetDateTime =
            (today - Duration::days(self.days_ago)).with_time(time).assume_utc();
        let id = format!("sample-{}-{}", self.days_ago, self.hour);

        Transaction::build(&id, self.amount, self.kind, self.category.category(), date)
            .description(self.description)
            .account(self.account)
            .tags(self.tags)
            .finalise()
    }
}

const CHECKING: &str = "Compte courant";

const fn expense(
    days_ago: i64,
    hour: u8,
    description: &'static str,
    amount: f64,
    category: SampleCategory,
) -> SampleTransaction {
    SampleTransaction {
        days_ago,
        hour,
        description,
        amount,
        kind: TransactionKind::Expense,
        category,
        account: CHECKING,
        tags: &[],
    }
}

const fn tagged(
    mut transaction: SampleTransaction,
    tags: &'static [&'static str],
) -> SampleTransaction {
    transaction.tags = tags;
    transaction
}

const SAMPLE_TRANSACTIONS: [SampleTransaction; 25] = [
    tagged(
        expense(0, 9, "Courses Carrefour", 87.45, SampleCategory::Food),
        &["courses", "alimentaire"],
    ),
    SampleTransaction {
        days_ago: 1,
        hour: 8,
        description: "Salaire",
        amount: 3200.00,
        kind: TransactionKind::Income,
        category: SampleCategory::Salary,
        account: CHECKING,
        tags: &[],
    },
    expense(2, 18, "Essence Total", 65.20, SampleCategory::Transport),
    tagged(
        expense(3, 20, "Netflix", 15.99, SampleCategory::Entertainment),
        &["abonnement"],
    ),
    SampleTransaction {
        days_ago: 4,
        hour: 10,
        description: "Virement épargne",
        amount: 500.00,
        kind: TransactionKind::Transfer,
        category: SampleCategory::Savings,
        account: "Livret A",
        tags: &[],
    },
    expense(5, 12, "Boulangerie Paul", 12.40, SampleCategory::Food),
    tagged(
        expense(6, 19, "Cinéma Pathé", 24.00, SampleCategory::Entertainment),
        &["sortie"],
    ),
    tagged(
        expense(7, 8, "Pass Navigo", 86.40, SampleCategory::Transport),
        &["abonnement"],
    ),
    expense(8, 17, "Pharmacie", 23.70, SampleCategory::Health),
    expense(9, 11, "Courses Monoprix", 64.85, SampleCategory::Food),
    expense(10, 9, "Assurance habitation", 32.00, SampleCategory::Housing),
    expense(11, 14, "Zara", 59.90, SampleCategory::Shopping),
    expense(12, 18, "Courses Lidl", 48.30, SampleCategory::Food),
    tagged(
        expense(13, 20, "Restaurant Le Petit Zinc", 56.00, SampleCategory::Entertainment),
        &["sortie"],
    ),
    expense(14, 10, "Médecin généraliste", 26.50, SampleCategory::Health),
    expense(15, 16, "Péage A6", 18.60, SampleCategory::Transport),
    expense(16, 9, "Électricité EDF", 64.00, SampleCategory::Housing),
    expense(17, 15, "Courses Carrefour", 92.10, SampleCategory::Food),
    expense(18, 11, "Fnac", 34.99, SampleCategory::Shopping),
    expense(20, 7, "Loyer", 750.00, SampleCategory::Housing),
    expense(22, 18, "Essence Total", 61.30, SampleCategory::Transport),
    expense(24, 13, "Marché", 27.60, SampleCategory::Food),
    tagged(
        expense(26, 21, "Spotify", 10.99, SampleCategory::Entertainment),
        &["abonnement"],
    ),
    expense(28, 10, "Dentiste", 45.00, SampleCategory::Health),
    expense(29, 12, "Courses Carrefour", 79.20, SampleCategory::Food),
];

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        spending::{DEFAULT_MAX_BUCKETS, to_chart_buckets},
        transaction::TransactionKind,
    };

    use super::{DashboardSource, SAMPLE_HISTORY_DAYS, SampleDashboardSource};

    #[test]
    fn history_covers_one_year_ending_today() {
        let today = date!(2024 - 10 - 19);

        let history = SampleDashboardSource::new().balance_history(today).unwrap();

        assert_eq!(history.len(), SAMPLE_HISTORY_DAYS as usize);
        assert_eq!(history.last().map(|s| s.date), Some(today));
        assert!(history.windows(2).all(|pair| pair[0].date < pair[1].date));
    }

    #[test]
    fn history_is_deterministic() {
        let source = SampleDashboardSource::new();
        let today = date!(2024 - 10 - 19);

        assert_eq!(
            source.balance_history(today).unwrap(),
            source.balance_history(today).unwrap()
        );
    }

    #[test]
    fn category_spending_only_counts_expenses() {
        let spending = SampleDashboardSource::new()
            .category_spending(date!(2024 - 10 - 19))
            .unwrap();

        assert_eq!(spending.len(), 6);
        assert!(spending.iter().all(|record| record.id != "salary"));
        assert!(spending.iter().all(|record| record.id != "savings"));

        let total: f64 = spending.iter().map(|record| record.percentage).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn sample_spending_needs_an_others_bucket() {
        let spending = SampleDashboardSource::new()
            .category_spending(date!(2024 - 10 - 19))
            .unwrap();

        let buckets = to_chart_buckets(&spending, DEFAULT_MAX_BUCKETS).unwrap();

        assert_eq!(buckets.len(), DEFAULT_MAX_BUCKETS);
        assert!(buckets.last().is_some_and(|bucket| bucket.is_others()));
    }

    #[test]
    fn recent_transactions_are_newest_first() {
        let transactions = SampleDashboardSource::new()
            .recent_transactions(date!(2024 - 10 - 19), 5)
            .unwrap();

        let descriptions: Vec<&str> = transactions
            .iter()
            .map(|transaction| transaction.description.as_str())
            .collect();
        assert_eq!(
            descriptions,
            vec![
                "Courses Carrefour",
                "Salaire",
                "Essence Total",
                "Netflix",
                "Virement épargne"
            ]
        );
        assert_eq!(transactions[1].kind, TransactionKind::Income);
        assert_eq!(transactions[4].account, "Livret A");
    }

    #[test]
    fn stats_come_from_the_history() {
        let source = SampleDashboardSource::new();
        let today = date!(2024 - 10 - 19);

        let stats = source.stats(today).unwrap();
        let history = source.balance_history(today).unwrap();

        assert_eq!(
            Some(stats.total_balance),
            history.last().map(|snapshot| snapshot.balance)
        );
        assert!(stats.monthly_income > 0.0);
    }
}
