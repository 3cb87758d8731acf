//! The ledger service: one CRUD surface over two storage backends.
//!
//! Operations prefer the relational backend and fall back to the text store
//! whenever the database is unconfigured, unreachable, or reports no effect.
//! The two backends are never merged into one dataset — whichever answers
//! first wins. All input validation happens here, once, before any backend
//! is touched, so both backends only ever see vetted values.

use crate::db::db::Db;
use crate::db::expenses::Expenses;
use crate::libs::csv::{CsvStore, StoreError, HEADER};
use crate::libs::expense::{Expense, ExpensePatch};
use crate::libs::messages::Message;
use crate::libs::view;
use crate::{msg_bail_anyhow, msg_debug};
use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;

/// What one backend made of a request.
///
/// `NotFound` (zero rows affected, empty result) and `Unavailable`
/// (unconfigured or unreachable) are distinct outcomes even though the
/// fallback policy reacts to both the same way.
#[derive(Debug)]
pub enum Outcome<T> {
    Done(T),
    NotFound,
    Unavailable,
}

impl<T> Outcome<T> {
    /// Reclassifies a "no effect" result (zero rows, empty set, null sum)
    /// as `NotFound`.
    fn no_effect(self, is_empty: impl FnOnce(&T) -> bool) -> Outcome<T> {
        match self {
            Outcome::Done(value) if is_empty(&value) => Outcome::NotFound,
            other => other,
        }
    }
}

/// The store context handed to every command.
///
/// Holds the (optional) relational target and the text store; constructed
/// once per invocation so tests can substitute either part.
pub struct Ledger {
    database: Option<PathBuf>,
    store: CsvStore,
}

impl Ledger {
    pub fn new(database: Option<PathBuf>, store: CsvStore) -> Self {
        Self { database, store }
    }

    /// Builds the context from the environment: `SPENT_DATABASE` selects the
    /// relational backend, the text store sits at its default location.
    pub fn from_env() -> Result<Self> {
        let database = Db::target();
        if database.is_none() {
            msg_debug!(Message::UsingTextStore);
        }
        Ok(Self {
            database,
            store: CsvStore::new()?,
        })
    }

    /// Records a new expense. Returns the assigned id when the text store
    /// took the write; the relational backend keeps its ids to itself.
    pub fn add(&self, description: Option<&str>, amount: Option<&str>, date: Option<&str>) -> Result<Option<i64>> {
        let description = vet_description(description)?;
        let amount = vet_amount(amount)?;
        let date = match date {
            Some(raw) => parse_date(raw)?,
            None => Local::now().date_naive(),
        };

        if let Outcome::Done(_) = self.backend(|db| db.insert(date, &description, amount)).no_effect(|affected| *affected == 0) {
            return Ok(None);
        }

        let id = self.store.append(date, &description, amount)?;
        Ok(Some(id))
    }

    /// Display lines for every expense, ordered by date ascending. An empty
    /// result means an empty ledger, wherever it lives.
    pub fn list(&self) -> Result<Vec<String>> {
        if let Outcome::Done(expenses) = self.backend(|db| db.fetch()).no_effect(Vec::is_empty) {
            let mut rows = vec![header_row()];
            rows.extend(expenses.iter().map(Expense::to_row));
            return Ok(view::align_rows(&rows));
        }

        match self.store.list_formatted() {
            Ok(lines) => Ok(lines),
            Err(StoreError::Missing) => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    /// Total amount, optionally restricted to one calendar month.
    pub fn summarize(&self, month: Option<u32>) -> Result<Decimal> {
        if let Some(month) = month {
            if !(1..=12).contains(&month) {
                msg_bail_anyhow!(Message::MonthOutOfRange);
            }
        }

        if let Outcome::Done(Some(total)) = self.backend(|db| db.sum(month)).no_effect(Option::is_none) {
            return Ok(total);
        }

        Ok(self.store.summarize(month)?)
    }

    /// Deletes by id. `Ok(false)` means no backend held that id.
    pub fn delete(&self, id: Option<i64>) -> Result<bool> {
        let id = vet_id(id)?;

        // zero rows affected reclassifies as NotFound and falls through
        if let Outcome::Done(_) = self.backend(|db| db.delete_by_id(id)).no_effect(|affected| *affected == 0) {
            return Ok(true);
        }

        match self.store.delete(id) {
            Ok(removed) => Ok(removed),
            Err(StoreError::Missing) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    /// Rewrites the given fields in place. In-place updates exist only on
    /// the relational backend; everywhere else the answer is `Ok(false)`.
    pub fn update(&self, id: Option<i64>, date: Option<&str>, description: Option<&str>, amount: Option<&str>) -> Result<bool> {
        let id = vet_id(id)?;
        let patch = ExpensePatch {
            date: date.map(parse_date).transpose()?,
            description: match description {
                Some(raw) => Some(vet_description(Some(raw))?),
                None => None,
            },
            amount: match amount {
                Some(raw) => Some(vet_amount(Some(raw))?),
                None => None,
            },
        };
        if patch.is_empty() {
            msg_bail_anyhow!(Message::UpdateNeedsField);
        }

        match self.backend(|db| db.update_by_id(id, &patch)).no_effect(|affected| *affected == 0) {
            Outcome::Done(_) => Ok(true),
            _ => Ok(false),
        }
    }

    /// Runs one operation against the relational backend, folding every
    /// failure mode into `Unavailable` so callers can fall through.
    fn backend<T>(&self, op: impl FnOnce(&Expenses) -> Result<T>) -> Outcome<T> {
        let Some(target) = self.database.as_ref() else {
            return Outcome::Unavailable;
        };

        let db = match Expenses::open(target) {
            Ok(db) => db,
            Err(err) => {
                msg_debug!(format!("database backend unavailable: {}", err));
                return Outcome::Unavailable;
            }
        };

        match op(&db) {
            Ok(value) => Outcome::Done(value),
            Err(err) => {
                msg_debug!(format!("database operation failed: {}", err));
                Outcome::Unavailable
            }
        }
    }
}

fn header_row() -> Vec<String> {
    HEADER.split(',').map(str::to_string).collect()
}

fn vet_description(description: Option<&str>) -> Result<String> {
    let Some(description) = description.map(str::trim).filter(|d| !d.is_empty()) else {
        msg_bail_anyhow!(Message::DescriptionAndAmountRequired);
    };
    if description.contains(',') {
        msg_bail_anyhow!(Message::DescriptionHasSeparator);
    }
    Ok(description.to_string())
}

fn vet_amount(amount: Option<&str>) -> Result<Decimal> {
    let Some(raw) = amount.map(str::trim).filter(|a| !a.is_empty()) else {
        msg_bail_anyhow!(Message::DescriptionAndAmountRequired);
    };
    match Decimal::from_str(raw) {
        Ok(amount) if amount > Decimal::ZERO => Ok(amount),
        _ => msg_bail_anyhow!(Message::AmountMustBePositive),
    }
}

fn vet_id(id: Option<i64>) -> Result<i64> {
    match id {
        Some(id) if id >= 1 => Ok(id),
        _ => msg_bail_anyhow!(Message::IdRequired),
    }
}

/// Accepts `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM`, keeping the date part only.
fn parse_date(raw: &str) -> Result<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(stamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M") {
        return Ok(stamp.date());
    }
    msg_bail_anyhow!(Message::DateFormatInvalid)
}
