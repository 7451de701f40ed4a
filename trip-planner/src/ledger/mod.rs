//! Expense ledger for tracking trip spending by category.
//!
//! The persisted form is a bare JSON array of expenses whose ids are decimal
//! strings, e.g. `[{"id":"1","category":"food","amount":500000,...}]`.
//! Numeric ids are accepted on read.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::Money;

/// What an expense was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Food,
    Transport,
    Accommodation,
    Entertainment,
    #[serde(other)]
    Other,
}

impl ExpenseCategory {
    /// Every category, in display order.
    pub const ALL: [ExpenseCategory; 5] = [
        ExpenseCategory::Food,
        ExpenseCategory::Transport,
        ExpenseCategory::Accommodation,
        ExpenseCategory::Entertainment,
        ExpenseCategory::Other,
    ];

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Food => "Ăn uống",
            ExpenseCategory::Transport => "Di chuyển",
            ExpenseCategory::Accommodation => "Lưu trú",
            ExpenseCategory::Entertainment => "Giải trí",
            ExpenseCategory::Other => "Khác",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identifier of a ledger entry, unique within its ledger.
pub type ExpenseId = u64;

/// A single recorded expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(with = "id_text")]
    pub id: ExpenseId,
    pub category: ExpenseCategory,
    pub amount: Money,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
}

/// Fields of an expense before it has an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    pub category: ExpenseCategory,
    pub amount: Money,
    pub description: String,
    pub date: NaiveDate,
}

/// Ledger errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("no expense with id {0}")]
    UnknownExpense(ExpenseId),
}

/// Recorded expenses in insertion order.
///
/// Serialized as the expense array alone. The next id is re-derived from the
/// largest stored id when loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Expense>", into = "Vec<Expense>")]
pub struct ExpenseLedger {
    expenses: Vec<Expense>,
    next_id: ExpenseId,
}

impl Default for ExpenseLedger {
    fn default() -> Self {
        Self {
            expenses: Vec::new(),
            next_id: 1,
        }
    }
}

impl From<Vec<Expense>> for ExpenseLedger {
    fn from(expenses: Vec<Expense>) -> Self {
        let next_id = expenses
            .iter()
            .map(|e| e.id)
            .max()
            .map_or(1, |max| max.saturating_add(1));
        Self { expenses, next_id }
    }
}

impl From<ExpenseLedger> for Vec<Expense> {
    fn from(ledger: ExpenseLedger) -> Self {
        ledger.expenses
    }
}

impl ExpenseLedger {
    /// An empty ledger whose first id is 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// All expenses, oldest first.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// The expense with `id`, if recorded.
    pub fn get(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    /// Number of recorded expenses.
    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Record an expense and return its id.
    pub fn add(&mut self, expense: NewExpense) -> ExpenseId {
        let id = self.next_id;
        self.next_id += 1;
        self.expenses.push(Expense {
            id,
            category: expense.category,
            amount: expense.amount,
            description: expense.description,
            date: expense.date,
        });
        id
    }

    /// Replace the fields of an existing expense, keeping its id.
    pub fn update(&mut self, id: ExpenseId, expense: NewExpense) -> Result<(), LedgerError> {
        let entry = self
            .expenses
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(LedgerError::UnknownExpense(id))?;
        entry.category = expense.category;
        entry.amount = expense.amount;
        entry.description = expense.description;
        entry.date = expense.date;
        Ok(())
    }

    /// Delete an expense and return it.
    pub fn remove(&mut self, id: ExpenseId) -> Result<Expense, LedgerError> {
        let pos = self
            .expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or(LedgerError::UnknownExpense(id))?;
        Ok(self.expenses.remove(pos))
    }

    /// Sum of every expense.
    pub fn total(&self) -> Money {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    /// Total per category, every category present, in [`ExpenseCategory::ALL`]
    /// order.
    pub fn total_by_category(&self) -> Vec<(ExpenseCategory, Money)> {
        ExpenseCategory::ALL
            .iter()
            .map(|&c| {
                let sum = self
                    .expenses
                    .iter()
                    .filter(|e| e.category == c)
                    .map(|e| e.amount)
                    .sum();
                (c, sum)
            })
            .collect()
    }

    /// Ledger total as a percentage of `reference`, capped at 100.
    ///
    /// Zero when `reference` is zero.
    pub fn share_of(&self, reference: Money) -> f64 {
        if reference == Money::ZERO {
            return 0.0;
        }
        let pct = self.total().amount() as f64 / reference.amount() as f64 * 100.0;
        pct.min(100.0)
    }

    /// How far the ledger total exceeds `limit`, if it does.
    pub fn overrun(&self, limit: Money) -> Option<Money> {
        self.total()
            .checked_sub(limit)
            .filter(|over| *over > Money::ZERO)
    }
}

/// Ids are written as decimal strings and read from strings or numbers.
mod id_text {
    use serde::{Deserialize, Deserializer, Serializer, de};

    use super::ExpenseId;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(ExpenseId),
        Text(String),
    }

    pub fn serialize<S: Serializer>(id: &ExpenseId, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(id)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ExpenseId, D::Error> {
        match RawId::deserialize(deserializer)? {
            RawId::Number(id) => Ok(id),
            RawId::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| de::Error::custom(format!("expense id {text:?} is not a number"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()
    }

    fn expense(category: ExpenseCategory, amount: u64) -> NewExpense {
        NewExpense {
            category,
            amount: Money(amount),
            description: String::new(),
            date: date(),
        }
    }

    fn sample() -> ExpenseLedger {
        let mut ledger = ExpenseLedger::new();
        ledger.add(expense(ExpenseCategory::Food, 500_000));
        ledger.add(expense(ExpenseCategory::Transport, 300_000));
        ledger.add(expense(ExpenseCategory::Accommodation, 1_000_000));
        ledger.add(expense(ExpenseCategory::Food, 100_000));
        ledger
    }

    #[test]
    fn ids_are_unique_after_removal() {
        let mut ledger = sample();
        let removed = ledger.remove(4).unwrap();
        assert_eq!(removed.amount, Money(100_000));

        let id = ledger.add(expense(ExpenseCategory::Other, 1));
        assert_eq!(id, 5);
        assert_eq!(ledger.len(), 4);
    }

    #[test]
    fn totals() {
        let ledger = sample();
        assert_eq!(ledger.total(), Money(1_900_000));

        let by_category = ledger.total_by_category();
        assert_eq!(by_category.len(), 5);
        assert_eq!(by_category[0], (ExpenseCategory::Food, Money(600_000)));
        assert_eq!(by_category[1], (ExpenseCategory::Transport, Money(300_000)));
        assert_eq!(
            by_category[2],
            (ExpenseCategory::Accommodation, Money(1_000_000))
        );
        assert_eq!(by_category[3], (ExpenseCategory::Entertainment, Money::ZERO));
        assert_eq!(by_category[4], (ExpenseCategory::Other, Money::ZERO));
    }

    #[test]
    fn update_keeps_id() {
        let mut ledger = sample();
        let mut changed = expense(ExpenseCategory::Entertainment, 900_000);
        changed.description = "Đi công viên".into();

        ledger.update(1, changed).unwrap();

        let e = ledger.get(1).unwrap();
        assert_eq!(e.category, ExpenseCategory::Entertainment);
        assert_eq!(e.amount, Money(900_000));
        assert_eq!(e.description, "Đi công viên");
    }

    #[test]
    fn unknown_ids_rejected() {
        let mut ledger = sample();
        assert_eq!(
            ledger.update(42, expense(ExpenseCategory::Food, 1)),
            Err(LedgerError::UnknownExpense(42))
        );
        assert_eq!(ledger.remove(42), Err(LedgerError::UnknownExpense(42)));
        assert_eq!(ledger.len(), 4);
    }

    #[test]
    fn share_of_reference() {
        let ledger = sample();
        assert_eq!(ledger.share_of(Money::ZERO), 0.0);
        assert!((ledger.share_of(Money(3_800_000)) - 50.0).abs() < 1e-9);
        assert_eq!(ledger.share_of(Money(1_000_000)), 100.0);
    }

    #[test]
    fn category_labels_and_serde() {
        assert_eq!(ExpenseCategory::Accommodation.to_string(), "Lưu trú");
        assert_eq!(
            serde_json::to_string(&ExpenseCategory::Entertainment).unwrap(),
            "\"entertainment\""
        );
    }

    #[test]
    fn serialized_as_array_with_string_ids() {
        let mut ledger = ExpenseLedger::new();
        ledger.add(NewExpense {
            category: ExpenseCategory::Food,
            amount: Money(500_000),
            description: "Ăn tối tại nhà hàng".into(),
            date: date(),
        });

        let value = serde_json::to_value(&ledger).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "id": "1",
                "category": "food",
                "amount": 500000,
                "description": "Ăn tối tại nhà hàng",
                "date": "2024-03-20"
            }])
        );
    }

    #[test]
    fn reads_browser_saved_items() {
        let json = r#"[
            {"id": "1", "category": "food", "amount": 500000,
             "description": "Ăn tối tại nhà hàng", "date": "2024-03-20"},
            {"id": "1710921600000", "category": "transport", "amount": 300000,
             "date": "2024-03-20"},
            {"id": 7, "category": "souvenirs", "amount": 50000, "date": "2024-03-21"}
        ]"#;
        let mut ledger: ExpenseLedger = serde_json::from_str(json).unwrap();

        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.get(1).unwrap().category, ExpenseCategory::Food);
        assert_eq!(ledger.get(1_710_921_600_000).unwrap().description, "");
        assert_eq!(ledger.get(7).unwrap().category, ExpenseCategory::Other);
        assert_eq!(ledger.total(), Money(850_000));
        assert_eq!(
            ledger.add(expense(ExpenseCategory::Other, 1)),
            1_710_921_600_001
        );
    }

    #[test]
    fn non_numeric_id_rejected() {
        let json = r#"[{"id": "abc", "category": "food", "amount": 1, "date": "2024-03-20"}]"#;
        let err = serde_json::from_str::<ExpenseLedger>(json).unwrap_err();
        assert!(err.to_string().contains("not a number"));
    }

    #[test]
    fn serde_roundtrip_keeps_ids() {
        let mut ledger = sample();
        ledger.remove(2).unwrap();
        let json = serde_json::to_string(&ledger).unwrap();
        let mut restored: ExpenseLedger = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, ledger);
        assert_eq!(restored.add(expense(ExpenseCategory::Other, 1)), 5);
    }

    #[test]
    fn empty_ledger_ids_start_at_one() {
        let mut restored: ExpenseLedger = serde_json::from_str("[]").unwrap();
        assert_eq!(restored, ExpenseLedger::new());
        assert_eq!(restored.add(expense(ExpenseCategory::Food, 1)), 1);
    }

    #[test]
    fn overrun_against_limit() {
        let ledger = sample();
        assert_eq!(ledger.overrun(Money(1_900_000)), None);
        assert_eq!(ledger.overrun(Money(2_000_000)), None);
        assert_eq!(ledger.overrun(Money(1_000_000)), Some(Money(900_000)));
    }
}
