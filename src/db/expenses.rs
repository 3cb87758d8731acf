//! Relational expense storage.
//!
//! The preferred backend when a database target is configured. All expenses
//! live in a single `transactions` table; every logical operation opens its
//! own connection, runs one statement, and drops the connection with the
//! `Expenses` value. The ledger service treats any failure here as "backend
//! unavailable" and falls through to the text store.

use super::db::Db;
use crate::libs::expense::{Expense, ExpensePatch};
use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use std::path::Path;

const SCHEMA_TRANSACTIONS: &str = "CREATE TABLE IF NOT EXISTS transactions (
    id INTEGER NOT NULL PRIMARY KEY,
    date DATE NOT NULL,
    description TEXT NOT NULL,
    amount REAL NOT NULL
)";
const INSERT_EXPENSE: &str = "INSERT INTO transactions (date, description, amount) VALUES (?1, ?2, ?3)";
const SELECT_EXPENSES: &str = "SELECT id, date, description, amount FROM transactions ORDER BY date";
const SUM_EXPENSES: &str = "SELECT SUM(amount) FROM transactions";
const WHERE_MONTH: &str = "WHERE CAST(strftime('%m', date) AS INTEGER) = ?1";
const DELETE_EXPENSE: &str = "DELETE FROM transactions WHERE id = ?1";
const UPDATE_EXPENSE: &str = "UPDATE transactions SET";

pub struct Expenses {
    conn: Connection,
}

impl Expenses {
    /// Opens the backend, creating the table on first use.
    pub fn open(path: &Path) -> Result<Expenses> {
        let db = Db::open(path)?;
        db.conn.execute(SCHEMA_TRANSACTIONS, [])?;

        Ok(Expenses { conn: db.conn })
    }

    /// Inserts an expense; the table assigns the id. Returns the affected
    /// row count.
    pub fn insert(&self, date: NaiveDate, description: &str, amount: Decimal) -> Result<usize> {
        let affected = self
            .conn
            .execute(INSERT_EXPENSE, params![date, description, amount.to_f64().unwrap_or_default()])?;

        Ok(affected)
    }

    /// All expenses ordered by date ascending.
    pub fn fetch(&self) -> Result<Vec<Expense>> {
        let mut stmt = self.conn.prepare(SELECT_EXPENSES)?;
        let expense_iter = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, NaiveDate>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, f64>(3)?,
            ))
        })?;

        let mut expenses = Vec::new();
        for result in expense_iter {
            let (id, date, description, amount) = result?;
            expenses.push(Expense {
                id,
                date,
                description,
                amount: Decimal::from_f64(amount).unwrap_or_default(),
            });
        }

        Ok(expenses)
    }

    /// `SUM(amount)`, optionally filtered to one calendar month. An empty
    /// table yields `None`.
    pub fn sum(&self, month: Option<u32>) -> Result<Option<Decimal>> {
        let total: Option<f64> = match month {
            Some(month) => {
                self.conn
                    .query_row(&format!("{} {}", SUM_EXPENSES, WHERE_MONTH), params![month], |row| row.get(0))?
            }
            None => self.conn.query_row(SUM_EXPENSES, [], |row| row.get(0))?,
        };

        Ok(total.and_then(Decimal::from_f64))
    }

    /// Deletes by id, returning the affected row count.
    pub fn delete_by_id(&self, id: i64) -> Result<usize> {
        let affected = self.conn.execute(DELETE_EXPENSE, params![id])?;

        Ok(affected)
    }

    /// Rewrites only the fields present in the patch. The `SET` clause is
    /// assembled from the patch, so an empty patch is rejected rather than
    /// turned into malformed SQL.
    pub fn update_by_id(&self, id: i64, patch: &ExpensePatch) -> Result<usize> {
        let mut assignments: Vec<&str> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some(date) = patch.date {
            assignments.push("date = ?");
            values.push(Value::Text(date.format("%Y-%m-%d").to_string()));
        }
        if let Some(description) = &patch.description {
            assignments.push("description = ?");
            values.push(Value::Text(description.clone()));
        }
        if let Some(amount) = patch.amount {
            assignments.push("amount = ?");
            values.push(Value::Real(amount.to_f64().unwrap_or_default()));
        }

        if assignments.is_empty() {
            return Err(msg_error_anyhow!(Message::UpdateNeedsField));
        }

        values.push(Value::Integer(id));
        let query = format!("{} {} WHERE id = ?", UPDATE_EXPENSE, assignments.join(", "));
        let affected = self.conn.execute(&query, params_from_iter(values))?;

        Ok(affected)
    }
}
