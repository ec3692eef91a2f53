use crate::advisor::{AdviceError, Advisor};
use crate::error::Result;
use crate::models::{FinancialAdvice, Transaction};
use crate::store::TransactionStore;

/// The working transaction list, kept in step with its store.
///
/// Every mutation rewrites the whole collection. There is no edit operation;
/// records are only added, deleted, or replaced wholesale by an import.
pub struct Ledger<S: TransactionStore> {
    store: S,
    transactions: Vec<Transaction>,
}

impl<S: TransactionStore> Ledger<S> {
    pub fn open(mut store: S) -> Self {
        let transactions = store.load();
        tracing::debug!(count = transactions.len(), "opened ledger");
        Self { store, transactions }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Persist `next` and only then make it the working list.
    fn commit(&mut self, next: Vec<Transaction>) -> Result<()> {
        self.store.save(&next)?;
        self.transactions = next;
        Ok(())
    }

    /// Prepend `transaction` and persist. The caller supplies a fresh id and
    /// timestamp (see [`Transaction::new`]); nothing else is checked here.
    pub fn add(&mut self, transaction: Transaction) -> Result<&Transaction> {
        tracing::debug!(id = %transaction.id, "adding transaction");
        let mut next = Vec::with_capacity(self.transactions.len() + 1);
        next.push(transaction);
        next.extend(self.transactions.iter().cloned());
        self.commit(next)?;
        Ok(&self.transactions[0])
    }

    /// Remove the record with `id` if there is one. Returns whether a record
    /// was removed. The collection is persisted either way.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let next: Vec<Transaction> =
            self.transactions.iter().filter(|t| t.id != id).cloned().collect();
        let removed = next.len() != self.transactions.len();
        tracing::debug!(id, removed, "deleting transaction");
        self.commit(next)?;
        Ok(removed)
    }

    /// Swap in an already-validated collection and persist it.
    pub fn import_replace(&mut self, transactions: Vec<Transaction>) -> Result<()> {
        tracing::debug!(count = transactions.len(), "replacing collection");
        self.commit(transactions)
    }

    /// Ask `advisor` for a report on the current collection. An empty ledger
    /// never reaches the advisor.
    pub fn request_advice(
        &self,
        advisor: &dyn Advisor,
    ) -> std::result::Result<FinancialAdvice, AdviceError> {
        if self.transactions.is_empty() {
            return Err(AdviceError::EmptyCollection);
        }
        advisor.analyze(&self.transactions)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::error::FinancasError;
    use crate::models::{Category, PaymentMethod, TransactionType};
    use crate::store::JsonFileStore;

    #[derive(Default)]
    struct MemoryStore {
        saved: Vec<Transaction>,
        saves: usize,
        fail: bool,
    }

    impl TransactionStore for &mut MemoryStore {
        fn load(&mut self) -> Vec<Transaction> {
            self.saved.clone()
        }

        fn save(&mut self, transactions: &[Transaction]) -> Result<()> {
            if self.fail {
                return Err(FinancasError::StorageUnavailable("disk full".to_string()));
            }
            self.saved = transactions.to_vec();
            self.saves += 1;
            Ok(())
        }
    }

    struct StubAdvisor {
        calls: Cell<usize>,
    }

    impl Advisor for StubAdvisor {
        fn analyze(
            &self,
            transactions: &[Transaction],
        ) -> std::result::Result<FinancialAdvice, AdviceError> {
            self.calls.set(self.calls.get() + 1);
            Ok(FinancialAdvice {
                health_score: 64.0,
                summary: format!("{} transactions", transactions.len()),
                actionable_tips: vec![],
                budget_alerts: vec![],
            })
        }
    }

    fn expense(desc: &str, amount: f64) -> Transaction {
        Transaction::new(
            desc,
            amount,
            TransactionType::Expense,
            Category::Food,
            PaymentMethod::CashOrDebit,
        )
    }

    #[test]
    fn test_add_prepends_and_persists() {
        let mut store = MemoryStore::default();
        let mut ledger = Ledger::open(&mut store);
        ledger.add(expense("first", 10.0)).unwrap();
        let second = ledger.add(expense("second", 20.0)).unwrap().id.clone();
        assert_eq!(ledger.transactions()[0].id, second);
        assert_eq!(ledger.len(), 2);
        drop(ledger);
        assert_eq!(store.saves, 2);
        assert_eq!(store.saved[0].description, "second");
    }

    #[test]
    fn test_add_then_delete_restores_collection() {
        let mut store = MemoryStore::default();
        store.saved = vec![expense("kept", 5.0)];
        let mut ledger = Ledger::open(&mut store);
        let before = ledger.transactions().to_vec();
        let id = ledger.add(expense("temp", 1.0)).unwrap().id.clone();
        assert!(ledger.delete(&id).unwrap());
        assert_eq!(ledger.transactions(), before.as_slice());
        drop(ledger);
        assert_eq!(store.saved, before);
    }

    #[test]
    fn test_delete_missing_is_noop_but_persists() {
        let mut store = MemoryStore::default();
        store.saved = vec![expense("kept", 5.0)];
        let mut ledger = Ledger::open(&mut store);
        assert!(!ledger.delete("nope").unwrap());
        assert_eq!(ledger.len(), 1);
        drop(ledger);
        assert_eq!(store.saves, 1);
    }

    #[test]
    fn test_import_replace_swaps_everything() {
        let mut store = MemoryStore::default();
        store.saved = vec![expense("old", 5.0)];
        let mut ledger = Ledger::open(&mut store);
        let incoming = vec![expense("new a", 1.0), expense("new b", 2.0)];
        ledger.import_replace(incoming.clone()).unwrap();
        assert_eq!(ledger.transactions(), incoming.as_slice());
        drop(ledger);
        assert_eq!(store.saved, incoming);
    }

    #[test]
    fn test_save_failure_is_reported_and_keeps_memory() {
        let mut store = MemoryStore {
            saved: vec![expense("kept", 5.0)],
            fail: true,
            ..Default::default()
        };
        let mut ledger = Ledger::open(&mut store);
        let before = ledger.transactions().to_vec();

        let err = ledger.add(expense("x", 1.0)).unwrap_err();
        assert!(matches!(err, FinancasError::StorageUnavailable(_)));
        assert_eq!(ledger.len(), 1);

        let id = before[0].id.clone();
        assert!(ledger.delete(&id).is_err());
        assert!(ledger.find(&id).is_some());

        assert!(ledger.import_replace(vec![]).is_err());
        assert_eq!(ledger.transactions(), before.as_slice());
    }

    #[test]
    fn test_find() {
        let mut store = MemoryStore::default();
        let mut ledger = Ledger::open(&mut store);
        let id = ledger.add(expense("x", 1.0)).unwrap().id.clone();
        assert_eq!(ledger.find(&id).map(|t| t.amount), Some(1.0));
        assert!(ledger.find("missing").is_none());
    }

    #[test]
    fn test_empty_ledger_never_calls_advisor() {
        let mut store = MemoryStore::default();
        let ledger = Ledger::open(&mut store);
        let advisor = StubAdvisor { calls: Cell::new(0) };
        assert!(ledger.is_empty());
        assert!(matches!(ledger.request_advice(&advisor), Err(AdviceError::EmptyCollection)));
        assert_eq!(advisor.calls.get(), 0);
    }

    #[test]
    fn test_advice_does_not_mutate() {
        let mut store = MemoryStore::default();
        let mut ledger = Ledger::open(&mut store);
        ledger.add(expense("x", 1.0)).unwrap();
        let advisor = StubAdvisor { calls: Cell::new(0) };
        let advice = ledger.request_advice(&advisor).unwrap();
        assert_eq!(advice.summary, "1 transactions");
        assert_eq!(advisor.calls.get(), 1);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_reopen_from_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut ledger = Ledger::open(JsonFileStore::in_dir(dir.path()));
        let id = ledger.add(expense("persisted", 9.99)).unwrap().id.clone();
        let reopened = Ledger::open(JsonFileStore::in_dir(dir.path()));
        assert_eq!(reopened.transactions(), ledger.transactions());
        assert!(reopened.find(&id).is_some());
    }
}
