pub mod add;
pub mod delete;
pub mod init;
pub mod list;
pub mod summary;
pub mod sync;
pub mod update;
pub mod watch;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Add a new expense")]
    Add(add::AddArgs),
    #[command(about = "Show all expenses")]
    List,
    #[command(about = "Show a total of expenses")]
    Summary(summary::SummaryArgs),
    #[command(about = "Delete an expense")]
    Delete(delete::DeleteArgs),
    #[command(about = "Update an expense by ID")]
    Update(update::UpdateArgs),
    #[command(about = "Reconcile expenses against the email inbox")]
    Sync,
    #[command(about = "Keep the inbox reconciled on a recurring schedule")]
    Watch,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Add(args) => add::cmd(args),
            Commands::List => list::cmd(),
            Commands::Summary(args) => summary::cmd(args),
            Commands::Delete(args) => delete::cmd(args),
            Commands::Update(args) => update::cmd(args),
            Commands::Sync => sync::cmd().await,
            Commands::Watch => watch::cmd().await,
        }
    }
}
