use crate::libs::ledger::Ledger;
use crate::libs::messages::Message;
use crate::{msg_error, msg_success};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct UpdateArgs {
    #[arg(short, long, help = "ID of the expense")]
    id: Option<i64>,
    #[arg(short, long, help = "New description")]
    description: Option<String>,
    #[arg(short, long, help = "New amount")]
    amount: Option<String>,
    #[arg(long, help = "New date (YYYY-MM-DD or YYYY-MM-DDTHH:MM)")]
    date: Option<String>,
}

pub fn cmd(update_args: UpdateArgs) -> Result<()> {
    let ledger = Ledger::from_env()?;
    let updated = ledger.update(
        update_args.id,
        update_args.date.as_deref(),
        update_args.description.as_deref(),
        update_args.amount.as_deref(),
    )?;

    if updated {
        msg_success!(Message::ExpenseUpdated);
    } else {
        msg_error!(Message::ExpenseNotUpdated);
    }

    Ok(())
}
