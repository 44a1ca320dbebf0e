//! The recent transactions list.

use maud::{Markup, html};
use time::OffsetDateTime;

use crate::{
    format::{CurrencyFormat, format_currency, format_relative_date},
    html::{MUTED_TEXT_STYLE, card, empty_state},
    transaction::{Transaction, TransactionKind},
};

/// The number of transactions shown on the dashboard.
pub(super) const RECENT_TRANSACTIONS: usize = 5;

/// The number of tags shown per transaction before collapsing the rest.
const VISIBLE_TAGS: usize = 2;

/// Renders the recent transactions card.
///
/// Dates are shown relative to `now` in `now`'s offset.
pub(super) fn recent_transactions_view(transactions: &[Transaction], now: OffsetDateTime) -> Markup {
    let body = if transactions.is_empty() {
        empty_state(
            "🧾",
            "Aucune transaction",
            "Vos transactions récentes apparaîtront ici.",
        )
    } else {
        html! {
            ul id="recent-transactions" class="space-y-1"
            {
                @for transaction in transactions {
                    (transaction_item(transaction, now))
                }
            }
        }
    };

    card("transactions-card", "Transactions récentes", None, body)
}

fn transaction_item(transaction: &Transaction, now: OffsetDateTime) -> Markup {
    let amount_style = match transaction.kind {
        TransactionKind::Income => "text-green-600 dark:text-green-400",
        TransactionKind::Expense => "text-red-600 dark:text-red-400",
        TransactionKind::Transfer => "text-gray-900 dark:text-white",
    };
    let amount = format!(
        "{}{}",
        transaction.kind.sign(),
        format_currency(transaction.amount, &CurrencyFormat::default())
    );
    let date = transaction.date.to_offset(now.offset()).date();
    let hidden_tags = transaction.tags.len().saturating_sub(VISIBLE_TAGS);

    html! {
        li class="flex items-center gap-4 p-3 rounded-xl hover:bg-gray-50 dark:hover:bg-gray-700"
        {
            span
                class="flex h-12 w-12 items-center justify-center rounded-xl text-lg"
                style={ "background-color: " (transaction.category.color) }
                aria-hidden="true"
            {
                (transaction.category.icon)
            }

            div class="flex-1 min-w-0"
            {
                p class="transaction-description text-sm font-medium truncate" { (transaction.description) }

                p class="text-xs text-gray-500 dark:text-gray-400 mt-1"
                {
                    (transaction.category.name) " • " (transaction.account)
                }

                @if !transaction.tags.is_empty() {
                    div class="flex items-center gap-1 mt-1"
                    {
                        @for tag in transaction.tags.iter().take(VISIBLE_TAGS) {
                            span
                                class="tag px-2 py-0.5 text-xs rounded-full bg-gray-100
                                    text-gray-700 dark:bg-gray-700 dark:text-gray-300"
                            {
                                "#" (tag)
                            }
                        }

                        @if hidden_tags > 0 {
                            span class="text-xs text-gray-400" { "+" (hidden_tags) }
                        }
                    }
                }
            }

            div class="text-right"
            {
                p class={ "transaction-amount text-sm font-semibold tabular-nums " (amount_style) } { (amount) }
                p class={ "transaction-date mt-1 " (MUTED_TEXT_STYLE) } { (format_relative_date(date, now.date())) }
            }
        }
    }
}
