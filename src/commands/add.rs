use crate::libs::ledger::Ledger;
use crate::libs::messages::Message;
use crate::msg_success;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(short, long, help = "Description of the expense")]
    description: Option<String>,
    #[arg(short, long, help = "Amount of the expense")]
    amount: Option<String>,
    #[arg(long, help = "Date of the expense (YYYY-MM-DD or YYYY-MM-DDTHH:MM)")]
    date: Option<String>,
}

pub fn cmd(add_args: AddArgs) -> Result<()> {
    let ledger = Ledger::from_env()?;
    match ledger.add(add_args.description.as_deref(), add_args.amount.as_deref(), add_args.date.as_deref())? {
        Some(id) => msg_success!(Message::ExpenseAddedWithId(id)),
        None => msg_success!(Message::ExpenseAdded),
    }

    Ok(())
}
