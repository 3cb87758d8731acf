use crate::libs::ledger::Ledger;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;

pub fn cmd() -> Result<()> {
    let lines = Ledger::from_env()?.list()?;
    if lines.is_empty() {
        msg_print!(Message::NoExpenses);
        return Ok(());
    }

    for line in lines {
        println!("{}", line);
    }

    Ok(())
}
