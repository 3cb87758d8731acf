use crate::libs::ledger::Ledger;
use crate::libs::messages::Message;
use crate::{msg_error, msg_success};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct DeleteArgs {
    #[arg(short, long, help = "ID of the expense")]
    id: Option<i64>,
}

pub fn cmd(delete_args: DeleteArgs) -> Result<()> {
    if Ledger::from_env()?.delete(delete_args.id)? {
        msg_success!(Message::ExpenseDeleted);
    } else {
        msg_error!(Message::ExpenseNotFound);
    }

    Ok(())
}
