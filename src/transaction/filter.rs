//! Pure filtering of transaction snapshots by type and calendar month.
//!
//! These functions have no UI or storage dependencies so the transactions
//! page can be tested without rendering anything.

use std::{fmt, str::FromStr};

use time::{Date, Month};

use super::store::{Transaction, TransactionKind};

/// Which transaction types to keep when filtering the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    /// Keep every transaction regardless of type.
    #[default]
    All,
    /// Keep only income transactions.
    Income,
    /// Keep only expense transactions.
    Expense,
}

impl TypeFilter {
    /// The value used for this filter in query strings and the filter form.
    pub fn as_query_value(self) -> &'static str {
        match self {
            TypeFilter::All => "all",
            TypeFilter::Income => "income",
            TypeFilter::Expense => "expense",
        }
    }

    /// Parse a query string value, falling back to [TypeFilter::All] for
    /// anything unrecognised so hand-edited URLs degrade gracefully.
    pub fn from_query_value(value: &str) -> Self {
        match value {
            "income" => TypeFilter::Income,
            "expense" => TypeFilter::Expense,
            _ => TypeFilter::All,
        }
    }

    fn matches(self, kind: TransactionKind) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Income => kind == TransactionKind::Income,
            TypeFilter::Expense => kind == TransactionKind::Expense,
        }
    }
}

/// A calendar month filter, e.g. "2024-01".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthFilter {
    year: i32,
    month: Month,
}

impl MonthFilter {
    /// The month that contains `date`.
    pub fn from_date(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Whether `date` falls within this calendar month.
    pub fn contains(self, date: Date) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

/// The error returned when a month filter string is not of the form
/// "YYYY-MM".
#[derive(Debug, PartialEq, Eq)]
pub struct ParseMonthFilterError;

impl FromStr for MonthFilter {
    type Err = ParseMonthFilterError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let (year, month) = text.split_once('-').ok_or(ParseMonthFilterError)?;

        let year: i32 = year.parse().map_err(|_| ParseMonthFilterError)?;
        let month: u8 = month.parse().map_err(|_| ParseMonthFilterError)?;
        let month = Month::try_from(month).map_err(|_| ParseMonthFilterError)?;

        Ok(Self { year, month })
    }
}

impl fmt::Display for MonthFilter {
    /// Formats the filter as "YYYY-MM", the format used by query strings and
    /// HTML month inputs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, u8::from(self.month))
    }
}

/// Keep the transactions matching both the type filter and, when given, the
/// month filter. Order is preserved.
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    type_filter: TypeFilter,
    month_filter: Option<MonthFilter>,
) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|transaction| type_filter.matches(transaction.kind))
        .filter(|transaction| {
            month_filter
                .map(|month| month.contains(transaction.date))
                .unwrap_or(true)
        })
        .collect()
}
