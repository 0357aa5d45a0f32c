//! Pure aggregation of a transaction snapshot into income, expense, and
//! balance totals.

use super::store::{Transaction, TransactionKind};

/// The aggregate totals shown at the top of the transactions page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    /// The sum of all income amounts.
    pub income: f64,
    /// The sum of all expense amounts.
    pub expense: f64,
    /// `income - expense`.
    pub balance: f64,
}

/// Sum the given transactions per type tag.
///
/// Stateless and recomputed from scratch on every page render, there is no
/// caching to invalidate. Accepts any iterator of references so it can run
/// over either a full snapshot or a filtered view.
pub fn summarize<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Summary {
    let mut summary = Summary::default();

    for transaction in transactions {
        match transaction.kind {
            TransactionKind::Income => summary.income += transaction.amount,
            TransactionKind::Expense => summary.expense += transaction.amount,
        }
    }

    summary.balance = summary.income - summary.expense;

    summary
}

#[cfg(test)]
mod summary_tests {
    use time::macros::date;

    use crate::transaction::{Transaction, TransactionKind};

    use super::summarize;

    fn transaction(id: i64, amount: f64, kind: TransactionKind) -> Transaction {
        Transaction {
            id,
            description: format!("transaction #{id}"),
            amount,
            kind,
            date: date!(2024 - 01 - 05),
        }
    }

    #[test]
    fn empty_store_sums_to_zero() {
        let summary = summarize(&[]);

        assert_eq!(summary.income, 0.0);
        assert_eq!(summary.expense, 0.0);
        assert_eq!(summary.balance, 0.0);
    }

    #[test]
    fn partitions_by_type_and_balances() {
        let transactions = vec![
            transaction(1, 100.0, TransactionKind::Income),
            transaction(2, 40.0, TransactionKind::Expense),
            transaction(3, 20.0, TransactionKind::Income),
        ];

        let summary = summarize(&transactions);

        assert_eq!(summary.income, 120.0);
        assert_eq!(summary.expense, 40.0);
        assert_eq!(summary.balance, 80.0);
    }

    #[test]
    fn balance_is_income_minus_expense() {
        let transactions = vec![
            transaction(1, 12.34, TransactionKind::Income),
            transaction(2, 56.78, TransactionKind::Expense),
            transaction(3, 90.12, TransactionKind::Expense),
        ];

        let summary = summarize(&transactions);

        assert!((summary.balance - (summary.income - summary.expense)).abs() < f64::EPSILON);
    }
}
