//! HTML rendering for the transactions page.

use maud::{Markup, html};

use crate::{
    endpoints,
    html::{
        BUTTON_DELETE_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE,
        PAGE_CONTAINER_STYLE, SUMMARY_CARD_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, base, format_currency,
    },
    navigation::NavBar,
};

use super::{
    filter::{MonthFilter, TypeFilter},
    models::TransactionTableRow,
    store::TransactionKind,
    summary::Summary,
};

fn amount_class(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Expense => "text-red-700 dark:text-red-300",
        TransactionKind::Income => "text-green-700 dark:text-green-300",
    }
}

fn balance_class(balance: f64) -> &'static str {
    if balance > 0.0 {
        "text-green-700 dark:text-green-300"
    } else if balance < 0.0 {
        "text-red-700 dark:text-red-300"
    } else {
        "text-gray-900 dark:text-white"
    }
}

pub(crate) fn transactions_view(
    summary: &Summary,
    rows: &[TransactionTableRow],
    type_filter: TypeFilter,
    month_filter: Option<MonthFilter>,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-3xl lg:mx-auto"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Transactions" }

                    a href=(endpoints::NEW_TRANSACTION_VIEW) class=(LINK_STYLE)
                    {
                        "Create Transaction"
                    }
                }

                (summary_cards_view(summary))

                (filter_controls_view(type_filter, month_filter))

                section class="rounded bg-gray-50 dark:bg-gray-800 overflow-hidden"
                {
                    table class="w-full my-2 text-sm text-left rtl:text-right
                        text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Date"
                                }
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Description"
                                }
                                th scope="col" class="px-6 py-3 text-right"
                                {
                                    "Amount"
                                }
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Actions"
                                }
                            }
                        }

                        tbody
                        {
                            @for row in rows {
                                (transaction_row_view(row))
                            }

                            @if rows.is_empty() {
                                tr
                                {
                                    td
                                        colspan="4"
                                        data-empty-state="true"
                                        class="px-6 py-4 text-center"
                                    {
                                        "No transactions found for the selected filters"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    base("Transactions", &[], &content)
}

/// The three totals above the transaction list. The balance changes color
/// with its sign.
fn summary_cards_view(summary: &Summary) -> Markup {
    html! {
        section class="grid grid-cols-1 sm:grid-cols-3 gap-4"
        {
            div class=(SUMMARY_CARD_STYLE)
            {
                h2 class="text-sm font-medium text-gray-600 dark:text-gray-400" { "Balance" }
                p id="total-balance" class=(format!("text-2xl font-bold {}", balance_class(summary.balance)))
                {
                    (format_currency(summary.balance))
                }
            }

            div class=(SUMMARY_CARD_STYLE)
            {
                h2 class="text-sm font-medium text-gray-600 dark:text-gray-400" { "Income" }
                p id="total-income" class=(format!("text-2xl font-bold {}", amount_class(TransactionKind::Income)))
                {
                    (format_currency(summary.income))
                }
            }

            div class=(SUMMARY_CARD_STYLE)
            {
                h2 class="text-sm font-medium text-gray-600 dark:text-gray-400" { "Expenses" }
                p id="total-expense" class=(format!("text-2xl font-bold {}", amount_class(TransactionKind::Expense)))
                {
                    (format_currency(summary.expense))
                }
            }
        }
    }
}

/// The type and month selectors. Changing either control reloads the page
/// with the new query string.
fn filter_controls_view(type_filter: TypeFilter, month_filter: Option<MonthFilter>) -> Markup {
    let month_value = month_filter
        .map(|month| month.to_string())
        .unwrap_or_default();

    html! {
        form
            method="get"
            action=(endpoints::TRANSACTIONS_VIEW)
            hx-get=(endpoints::TRANSACTIONS_VIEW)
            hx-trigger="change"
            hx-target="body"
            hx-push-url="true"
            class="flex flex-wrap gap-4 items-end"
        {
            div
            {
                label for="filter-type" class=(FORM_LABEL_STYLE) { "Type" }

                select
                    name="type"
                    id="filter-type"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for option in [TypeFilter::All, TypeFilter::Income, TypeFilter::Expense] {
                        option
                            value=(option.as_query_value())
                            selected[option == type_filter]
                        {
                            @match option {
                                TypeFilter::All => "All",
                                TypeFilter::Income => "Income",
                                TypeFilter::Expense => "Expense",
                            }
                        }
                    }
                }
            }

            div
            {
                label for="filter-month" class=(FORM_LABEL_STYLE) { "Month" }

                input
                    type="month"
                    name="month"
                    id="filter-month"
                    value=(month_value)
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }
    }
}

fn transaction_row_view(row: &TransactionTableRow) -> Markup {
    html! {
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE)
            {
                (row.date_label)
            }

            td class=(TABLE_CELL_STYLE)
            {
                (row.description)
            }

            td class=(format!("px-6 py-4 text-right font-medium {}", amount_class(row.kind)))
            {
                (row.amount_label)
            }

            td class=(TABLE_CELL_STYLE)
            {
                button
                    type="button"
                    class=(BUTTON_DELETE_STYLE)
                    hx-delete=(row.delete_url)
                    hx-confirm="Are you sure you want to delete this transaction?"
                    hx-target="closest tr"
                    hx-swap="outerHTML"
                    hx-target-error="#alert-container"
                {
                    "Delete"
                }
            }
        }
    }
}
