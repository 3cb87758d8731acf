//! One-shot inbox reconciliation.
//!
//! Fetches expense candidates from unread reservation emails and records
//! each one through the ledger service, labeling the message only after its
//! expense has actually been stored. Candidates that fail validation are
//! reported and left unlabeled so they show up again on the next sync.

use crate::api::gmail::Gmail;
use crate::libs::config::Config;
use crate::libs::ledger::Ledger;
use crate::libs::messages::Message;
use crate::{msg_error, msg_print};
use anyhow::Result;

pub async fn cmd() -> Result<()> {
    run().await
}

/// The sync pass itself; also invoked by the watch scheduler.
pub async fn run() -> Result<()> {
    let config = Config::read()?;
    let Some(gmail_config) = config.gmail else {
        msg_error!(Message::GmailNotConfigured);
        return Ok(());
    };
    let gmail = Gmail::new(&gmail_config);
    let ledger = Ledger::from_env()?;

    msg_print!(Message::SyncSearching);
    let expenses = gmail.fetch_expenses().await?;
    if expenses.is_empty() {
        msg_print!(Message::SyncNoMessages);
        return Ok(());
    }

    let label_id = gmail.ensure_label().await?;
    for expense in expenses {
        match ledger.add(Some(&expense.description), expense.amount.as_deref(), expense.date.as_deref()) {
            Ok(_) => {
                msg_print!(Message::SyncImported(
                    expense.description.clone(),
                    expense.date.clone().unwrap_or_else(|| "today".to_string()),
                    expense.amount.clone().unwrap_or_default(),
                ));
                gmail.mark_synced(&expense.message_id, &label_id).await?;
            }
            Err(err) => msg_error!(Message::SyncSkipped(expense.message_id.clone(), err.to_string())),
        }
    }

    Ok(())
}
