//! Defines the route handler for the page that displays transactions as a table.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::{
    AppState, Error, endpoints, timezone::current_local_date, transaction::TransactionStore,
};

use super::{
    filter::{MonthFilter, TypeFilter, filter_transactions},
    models::TransactionTableRow,
    summary::summarize,
    view::transactions_view,
};

/// The raw query parameters of the transactions page.
#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
    /// The type filter: "all", "income", or "expense".
    #[serde(rename = "type")]
    kind: Option<String>,
    /// The month filter as "YYYY-MM", or the empty string for all months.
    month: Option<String>,
}

/// Internal, validated filter selection after normalization.
///
/// This is the source of truth for behavior: defaults applied, the month
/// either parsed or absent.
struct NormalizedFilters {
    type_filter: TypeFilter,
    month_filter: Option<MonthFilter>,
}

enum QueryDecision {
    Redirect(String),
    Normalized(NormalizedFilters),
}

/// Apply the filter defaults.
///
/// A request without a `month` parameter is the "just opened the app" case
/// and redirects to the current calendar month. An explicitly empty
/// `month=` means no month constraint. An unparseable month also redirects
/// to the current month rather than erroring.
fn normalize_query(params: FilterParams, current_month: MonthFilter) -> QueryDecision {
    let type_filter = params
        .kind
        .as_deref()
        .map(TypeFilter::from_query_value)
        .unwrap_or_default();

    match params.month.as_deref() {
        None => QueryDecision::Redirect(filters_url(type_filter, Some(current_month))),
        Some("") => QueryDecision::Normalized(NormalizedFilters {
            type_filter,
            month_filter: None,
        }),
        Some(text) => match text.parse() {
            Ok(month_filter) => QueryDecision::Normalized(NormalizedFilters {
                type_filter,
                month_filter: Some(month_filter),
            }),
            Err(_) => {
                tracing::warn!("Ignoring unparseable month filter {text:?}");
                QueryDecision::Redirect(filters_url(type_filter, Some(current_month)))
            }
        },
    }
}

/// Build a transactions page URL for the given filter selection.
fn filters_url(type_filter: TypeFilter, month_filter: Option<MonthFilter>) -> String {
    let month = month_filter
        .map(|month| month.to_string())
        .unwrap_or_default();

    let query = serde_urlencoded::to_string([
        ("type", type_filter.as_query_value()),
        ("month", month.as_str()),
    ])
    .inspect_err(|error| tracing::error!("Could not encode filter query string: {error}"))
    .unwrap_or_default();

    format!("{}?{query}", endpoints::TRANSACTIONS_VIEW)
}

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsViewState {
    /// The transaction store.
    store: Arc<Mutex<TransactionStore>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    local_timezone: String,
}

impl FromRef<AppState> for TransactionsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render an overview of the user's transactions.
///
/// The summary totals and the table rows are recomputed from the full
/// snapshot on every request, filtered by the query parameters.
pub async fn get_transactions_page(
    State(state): State<TransactionsViewState>,
    Query(params): Query<FilterParams>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;

    let filters = match normalize_query(params, MonthFilter::from_date(today)) {
        QueryDecision::Normalized(filters) => filters,
        QueryDecision::Redirect(redirect_url) => {
            return Ok(Redirect::to(&redirect_url).into_response());
        }
    };

    let store = state
        .store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire store lock: {error}"))
        .map_err(|_| Error::StoreLockError)?;

    let filtered = filter_transactions(store.all(), filters.type_filter, filters.month_filter);
    let summary = summarize(filtered.iter().copied());
    let rows: Vec<TransactionTableRow> = filtered
        .iter()
        .map(|transaction| TransactionTableRow::new_from_transaction(transaction))
        .collect();

    Ok(transactions_view(&summary, &rows, filters.type_filter, filters.month_filter)
        .into_response())
}


#[cfg(test)]
mod page_tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Query, State};
    use scraper::Selector;
    use time::macros::date;

    use crate::{
        test_utils::{assert_status_ok, get_header, parse_html_document},
        transaction::{TransactionKind, TransactionStore},
    };

    use super::{FilterParams, TransactionsViewState, get_transactions_page};

    fn get_test_state() -> TransactionsViewState {
        let mut store = TransactionStore::in_memory();
        store
            .add("Salary", 100.0, TransactionKind::Income, date!(2024 - 01 - 05))
            .unwrap();
        store
            .add(
                "Groceries",
                40.0,
                TransactionKind::Expense,
                date!(2024 - 01 - 10),
            )
            .unwrap();
        store
            .add("Refund", 20.0, TransactionKind::Income, date!(2024 - 02 - 01))
            .unwrap();

        TransactionsViewState {
            store: Arc::new(Mutex::new(store)),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    fn params(kind: Option<&str>, month: Option<&str>) -> Query<FilterParams> {
        Query(FilterParams {
            kind: kind.map(str::to_owned),
            month: month.map(str::to_owned),
        })
    }

    #[tokio::test]
    async fn missing_month_redirects_to_the_current_month() {
        let state = get_test_state();

        let response = get_transactions_page(State(state), params(None, None))
            .await
            .unwrap();

        let current_month = time::OffsetDateTime::now_utc().date();
        let want = format!(
            "/transactions?type=all&month={:04}-{:02}",
            current_month.year(),
            u8::from(current_month.month())
        );
        assert_eq!(get_header(&response, "location"), want);
    }

    #[tokio::test]
    async fn shows_all_transactions_without_filters() {
        let state = get_test_state();

        let response = get_transactions_page(State(state), params(None, Some("")))
            .await
            .unwrap();

        assert_status_ok(&response);
        let document = parse_html_document(response).await;
        let rows = document
            .select(&Selector::parse("tbody tr").unwrap())
            .collect::<Vec<_>>();
        assert_eq!(rows.len(), 3, "want 3 rows, got {}", rows.len());
    }

    #[tokio::test]
    async fn month_filter_limits_rows_and_totals() {
        let state = get_test_state();

        let response = get_transactions_page(State(state), params(Some("all"), Some("2024-01")))
            .await
            .unwrap();

        assert_status_ok(&response);
        let document = parse_html_document(response).await;

        let rows = document
            .select(&Selector::parse("tbody tr").unwrap())
            .collect::<Vec<_>>();
        assert_eq!(rows.len(), 2, "want 2 rows, got {}", rows.len());

        let balance = document
            .select(&Selector::parse("#total-balance").unwrap())
            .next()
            .expect("the balance total should exist");
        assert_eq!(balance.text().collect::<String>().trim(), "$60.00");
    }

    #[tokio::test]
    async fn type_filter_shows_only_matching_transactions() {
        let state = get_test_state();

        let response = get_transactions_page(State(state), params(Some("expense"), Some("")))
            .await
            .unwrap();

        let document = parse_html_document(response).await;
        let rows = document
            .select(&Selector::parse("tbody tr").unwrap())
            .collect::<Vec<_>>();

        assert_eq!(rows.len(), 1, "want 1 row, got {}", rows.len());
        let text = rows[0].text().collect::<String>();
        assert!(text.contains("Groceries"), "got row text {text:?}");
        assert!(text.contains("-$40.00"), "got row text {text:?}");
    }

    #[tokio::test]
    async fn empty_filter_result_shows_the_placeholder() {
        let state = get_test_state();

        let response = get_transactions_page(State(state), params(Some("all"), Some("1999-12")))
            .await
            .unwrap();

        let document = parse_html_document(response).await;
        let placeholders = document
            .select(&Selector::parse("td[data-empty-state]").unwrap())
            .collect::<Vec<_>>();

        assert_eq!(placeholders.len(), 1);
    }
}
