use crate::libs::ledger::Ledger;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct SummaryArgs {
    #[arg(short, long, help = "Restrict the total to one month (1-12)")]
    month: Option<u32>,
}

pub fn cmd(summary_args: SummaryArgs) -> Result<()> {
    let total = Ledger::from_env()?.summarize(summary_args.month)?;
    let total = format!("{:.2}", total);

    match summary_args.month.and_then(month_name) {
        Some(name) => msg_print!(Message::TotalExpensesForMonth(name, total)),
        None => msg_print!(Message::TotalExpenses(total)),
    }

    Ok(())
}

fn month_name(month: u32) -> Option<String> {
    chrono::Month::try_from(month as u8).ok().map(|month| month.name().to_string())
}
