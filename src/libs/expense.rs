use chrono::NaiveDate;
use rust_decimal::Decimal;

/// A single recorded expense.
///
/// The id is assigned by whichever backend stored the record and never
/// changes afterwards; date, description and amount may be rewritten by an
/// update against the relational backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: i64,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
}

impl Expense {
    /// The expense as display cells, in ledger column order.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.date.format("%Y-%m-%d").to_string(),
            self.description.clone(),
            self.amount.to_string(),
        ]
    }
}

/// A partial update: only the present fields are written.
#[derive(Debug, Clone, Default)]
pub struct ExpensePatch {
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub amount: Option<Decimal>,
}

impl ExpensePatch {
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.description.is_none() && self.amount.is_none()
    }
}
