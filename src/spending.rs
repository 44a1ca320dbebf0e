//! Spending by category: ranking, chart bucketing and aggregation of
//! transactions into per-category totals.
//!
//! Charts only have room for a handful of slices, so [to_chart_buckets] keeps
//! the largest categories and folds the long tail into a single "others"
//! entry. The full ranked list from [rank] is still used for tables.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    transaction::{Category, Transaction, TransactionKind},
};

/// The number of chart buckets used by the dashboard.
pub const DEFAULT_MAX_BUCKETS: usize = 5;

/// The reserved ID of the folded "others" bucket.
///
/// Real category IDs must never use this value.
pub const OTHERS_ID: &str = "others";
/// The display label of the folded "others" bucket.
pub const OTHERS_NAME: &str = "Autres";
const OTHERS_COLOR: &str = "#9CA3AF";
const OTHERS_ICON: &str = "📦";

/// The total spent in one category over a reporting period.
///
/// Across a complete set of records the percentages sum to 100, amounts are
/// non-negative and a record with no transactions has a zero amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpending {
    /// Unique key of the category.
    pub id: String,
    /// The display name.
    pub name: String,
    /// The total spent in this category.
    pub amount: f64,
    /// The share of total spending, from 0 to 100.
    pub percentage: f64,
    /// A CSS colour for the category's chart slice.
    pub color: String,
    /// An emoji shown next to the name.
    pub icon: String,
    /// The number of transactions that make up `amount`.
    pub transaction_count: u32,
}

impl CategorySpending {
    fn empty(category: &Category) -> Self {
        Self {
            id: category.id.clone(),
            name: category.name.clone(),
            amount: 0.0,
            percentage: 0.0,
            color: category.color.clone(),
            icon: category.icon.clone(),
            transaction_count: 0,
        }
    }

    /// Whether this record is the synthesised "others" bucket.
    pub fn is_others(&self) -> bool {
        self.id == OTHERS_ID
    }
}

/// Sort `records` by amount, largest first.
///
/// The sort is stable: records with equal amounts keep their input order.
/// A NaN amount ranks first rather than breaking the ordering.
pub fn rank(records: &[CategorySpending]) -> Vec<CategorySpending> {
    let mut ranked = records.to_vec();
    ranked.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    ranked
}

/// Reduce `records` to at most `max_buckets` entries for a chart.
///
/// If everything fits, this is the same as [rank]. Otherwise the largest
/// `max_buckets - 1` records are kept and the rest are summed into one
/// "others" record, so totals of amount, percentage and transaction count
/// are the same before and after.
///
/// # Errors
/// Returns [Error::InvalidBucketCount] if `max_buckets` is zero.
pub fn to_chart_buckets(
    records: &[CategorySpending],
    max_buckets: usize,
) -> Result<Vec<CategorySpending>, Error> {
    if max_buckets == 0 {
        return Err(Error::InvalidBucketCount(max_buckets));
    }

    let mut buckets = rank(records);
    if buckets.len() <= max_buckets {
        return Ok(buckets);
    }

    let folded = buckets.split_off(max_buckets - 1);
    tracing::debug!(
        "folding {} of {} categories into \"{OTHERS_NAME}\"",
        folded.len(),
        records.len()
    );
    buckets.push(fold_into_others(&folded));

    Ok(buckets)
}

fn fold_into_others(records: &[CategorySpending]) -> CategorySpending {
    CategorySpending {
        id: OTHERS_ID.to_owned(),
        name: OTHERS_NAME.to_owned(),
        amount: records.iter().map(|record| record.amount).sum(),
        percentage: records.iter().map(|record| record.percentage).sum(),
        color: OTHERS_COLOR.to_owned(),
        icon: OTHERS_ICON.to_owned(),
        transaction_count: records.iter().map(|record| record.transaction_count).sum(),
    }
}

/// Group expenses by category and work out each category's share.
///
/// Income and transfers are ignored. Categories appear in the order their
/// first expense appears; use [rank] to order them by amount. If nothing was
/// spent, every percentage is zero.
pub fn aggregate_by_category(transactions: &[Transaction]) -> Vec<CategorySpending> {
    let mut totals: Vec<CategorySpending> = Vec::new();
    let mut index_by_id: HashMap<&str, usize> = HashMap::new();

    for transaction in transactions
        .iter()
        .filter(|transaction| transaction.kind == TransactionKind::Expense)
    {
        let index = *index_by_id
            .entry(transaction.category.id.as_str())
            .or_insert_with(|| {
                totals.push(CategorySpending::empty(&transaction.category));
                totals.len() - 1
            });

        let total = &mut totals[index];
        total.amount += transaction.amount.abs();
        total.transaction_count += 1;
    }

    let total_spent: f64 = totals.iter().map(|total| total.amount).sum();
    if total_spent > 0.0 {
        for total in &mut totals {
            total.percentage = total.amount / total_spent * 100.0;
        }
    }

    totals
}

#[cfg(test)]
mod tests {
    use time::{Duration, macros::datetime};

    use crate::{
        Error,
        transaction::{Category, Transaction, TransactionKind},
    };

    use super::{
        CategorySpending, DEFAULT_MAX_BUCKETS, OTHERS_ID, OTHERS_NAME, aggregate_by_category,
        rank, to_chart_buckets,
    };

    fn create_test_record(id: &str, amount: f64, percentage: f64, count: u32) -> CategorySpending {
        CategorySpending {
            id: id.to_owned(),
            name: format!("Category {id}"),
            amount,
            percentage,
            color: "#000000".to_owned(),
            icon: "?".to_owned(),
            transaction_count: count,
        }
    }

    /// The five categories from the dashboard sample, in input order.
    fn sample_records() -> Vec<CategorySpending> {
        vec![
            create_test_record("1", 450.30, 35.2, 12),
            create_test_record("2", 280.50, 21.9, 8),
            create_test_record("3", 320.00, 25.0, 3),
            create_test_record("4", 125.75, 9.8, 7),
            create_test_record("5", 95.20, 7.4, 4),
        ]
    }

    /// Records of every length up to `max_len`, with repeated amounts so that
    /// ties are exercised.
    fn generated_record_sets(max_len: usize) -> Vec<Vec<CategorySpending>> {
        (0..=max_len)
            .map(|len| {
                let amounts: Vec<f64> = (0..len).map(|i| ((i * 7) % 5) as f64 * 10.0).collect();
                let total: f64 = amounts.iter().sum();

                amounts
                    .iter()
                    .enumerate()
                    .map(|(i, amount)| {
                        let percentage = if total > 0.0 {
                            amount / total * 100.0
                        } else {
                            0.0
                        };
                        create_test_record(&i.to_string(), *amount, percentage, i as u32)
                    })
                    .collect()
            })
            .collect()
    }

    fn amounts(records: &[CategorySpending]) -> Vec<f64> {
        records.iter().map(|record| record.amount).collect()
    }

    fn ids(records: &[CategorySpending]) -> Vec<&str> {
        records.iter().map(|record| record.id.as_str()).collect()
    }

    #[test]
    fn rank_sorts_by_amount_descending() {
        let ranked = rank(&sample_records());

        assert_eq!(amounts(&ranked), vec![450.30, 320.00, 280.50, 125.75, 95.20]);
    }

    #[test]
    fn rank_keeps_input_order_for_ties() {
        let records = vec![
            create_test_record("a", 10.0, 25.0, 1),
            create_test_record("b", 20.0, 50.0, 1),
            create_test_record("c", 10.0, 25.0, 1),
        ];

        let ranked = rank(&records);

        assert_eq!(ids(&ranked), vec!["b", "a", "c"]);
    }

    #[test]
    fn rank_orders_nan_amounts_consistently() {
        let mut records = sample_records();
        records.insert(2, create_test_record("nan", f64::NAN, 0.0, 1));
        records.push(create_test_record("nan-2", f64::NAN, 0.0, 1));

        let ranked = rank(&records);

        assert_eq!(ids(&ranked), vec!["nan", "nan-2", "1", "3", "2", "4", "5"]);
    }

    #[test]
    fn rank_of_empty_input_is_empty() {
        assert!(rank(&[]).is_empty());
    }

    #[test]
    fn buckets_equal_rank_when_everything_fits() {
        let records = sample_records();

        let buckets = to_chart_buckets(&records, DEFAULT_MAX_BUCKETS).unwrap();

        assert_eq!(buckets, rank(&records));
        assert_eq!(amounts(&buckets), vec![450.30, 320.00, 280.50, 125.75, 95.20]);
    }

    #[test]
    fn buckets_fold_the_tail_into_others() {
        let buckets = to_chart_buckets(&sample_records(), 4).unwrap();

        assert_eq!(buckets.len(), 4);
        assert_eq!(ids(&buckets[..3]), vec!["1", "3", "2"]);

        let others = &buckets[3];
        assert!(others.is_others());
        assert_eq!(others.id, OTHERS_ID);
        assert_eq!(others.name, OTHERS_NAME);
        assert!((others.amount - 220.95).abs() < 1e-9);
        assert!((others.percentage - 17.2).abs() < 1e-9);
        assert_eq!(others.transaction_count, 11);
    }

    #[test]
    fn single_bucket_holds_everything() {
        let buckets = to_chart_buckets(&sample_records(), 1).unwrap();

        assert_eq!(buckets.len(), 1);
        assert!(buckets[0].is_others());
        assert_eq!(buckets[0].transaction_count, 34);
    }

    #[test]
    fn zero_buckets_is_rejected() {
        let result = to_chart_buckets(&sample_records(), 0);

        assert_eq!(result, Err(Error::InvalidBucketCount(0)));
    }

    #[test]
    fn empty_input_gives_no_buckets() {
        assert_eq!(to_chart_buckets(&[], DEFAULT_MAX_BUCKETS), Ok(vec![]));
    }

    #[test]
    fn buckets_never_exceed_the_cap() {
        for records in generated_record_sets(9) {
            for max_buckets in 1..=10 {
                let buckets = to_chart_buckets(&records, max_buckets).unwrap();

                assert!(
                    buckets.len() <= max_buckets,
                    "got {} buckets for a cap of {max_buckets}",
                    buckets.len()
                );
            }
        }
    }

    #[test]
    fn buckets_conserve_totals() {
        for records in generated_record_sets(9) {
            let want_amount: f64 = records.iter().map(|record| record.amount).sum();
            let want_percentage: f64 = records.iter().map(|record| record.percentage).sum();
            let want_count: u32 = records.iter().map(|record| record.transaction_count).sum();

            for max_buckets in 1..=10 {
                let buckets = to_chart_buckets(&records, max_buckets).unwrap();

                let got_amount: f64 = buckets.iter().map(|bucket| bucket.amount).sum();
                let got_percentage: f64 = buckets.iter().map(|bucket| bucket.percentage).sum();
                let got_count: u32 = buckets.iter().map(|bucket| bucket.transaction_count).sum();

                assert!((got_amount - want_amount).abs() < 1e-6);
                assert!((got_percentage - want_percentage).abs() < 0.1);
                assert_eq!(got_count, want_count);
            }
        }
    }

    #[test]
    fn ranking_and_bucketing_are_idempotent_below_the_cap() {
        for records in generated_record_sets(5) {
            let ranked = rank(&records);
            assert_eq!(rank(&ranked), ranked);

            let buckets = to_chart_buckets(&records, DEFAULT_MAX_BUCKETS).unwrap();
            assert_eq!(
                to_chart_buckets(&buckets, DEFAULT_MAX_BUCKETS).unwrap(),
                buckets
            );
        }
    }

    fn create_test_transaction(
        id: &str,
        amount: f64,
        kind: TransactionKind,
        category: &Category,
    ) -> Transaction {
        let date = datetime!(2024-10-01 12:00 UTC) + Duration::hours(id.len() as i64);

        Transaction::build(id, amount, kind, category.clone(), date).finalise()
    }

    #[test]
    fn aggregates_expenses_per_category() {
        let food = Category::new("food", "Alimentation", "🛒", "#EF4444");
        let transport = Category::new("transport", "Transport", "⛽", "#F59E0B");
        let salary = Category::new("salary", "Salaire", "💼", "#10B981");

        let transactions = vec![
            create_test_transaction("1", 60.0, TransactionKind::Expense, &food),
            create_test_transaction("2", 3200.0, TransactionKind::Income, &salary),
            create_test_transaction("3", 20.0, TransactionKind::Expense, &transport),
            create_test_transaction("4", 20.0, TransactionKind::Expense, &food),
        ];

        let spending = aggregate_by_category(&transactions);

        assert_eq!(ids(&spending), vec!["food", "transport"]);
        assert_eq!(spending[0].amount, 80.0);
        assert_eq!(spending[0].transaction_count, 2);
        assert_eq!(spending[0].percentage, 80.0);
        assert_eq!(spending[1].amount, 20.0);
        assert_eq!(spending[1].percentage, 20.0);
        assert_eq!(spending[1].name, "Transport");
        assert_eq!(spending[1].color, "#F59E0B");
    }

    #[test]
    fn aggregated_percentages_sum_to_one_hundred() {
        let categories: Vec<Category> = (0..7)
            .map(|i| Category::new(&format!("c{i}"), "Name", "?", "#000000"))
            .collect();
        let transactions: Vec<Transaction> = (0..40)
            .map(|i| {
                create_test_transaction(
                    &i.to_string(),
                    1.0 + (i * 13 % 17) as f64 / 3.0,
                    TransactionKind::Expense,
                    &categories[i % categories.len()],
                )
            })
            .collect();

        let spending = aggregate_by_category(&transactions);

        let total: f64 = spending.iter().map(|record| record.percentage).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn transfers_and_income_are_not_spending() {
        let savings = Category::new("savings", "Épargne", "🏦", "#6366F1");
        let transactions = vec![create_test_transaction(
            "1",
            500.0,
            TransactionKind::Transfer,
            &savings,
        )];

        assert!(aggregate_by_category(&transactions).is_empty());
    }

    #[test]
    fn serialises_with_camel_case_fields() {
        let record = create_test_record("1", 450.30, 35.2, 12);

        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["transactionCount"], 12);
        assert_eq!(json["amount"], 450.30);
    }
}
