//! Display implementation for application messages.
//!
//! All user-facing wording lives here, keeping the rest of the code free of
//! string literals and making the texts easy to review in one place.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === EXPENSE MESSAGES ===
            Message::ExpenseAdded => "Expense added successfully".to_string(),
            Message::ExpenseAddedWithId(id) => format!("Expense added successfully (ID: {})", id),
            Message::ExpenseDeleted => "Expense deleted successfully".to_string(),
            Message::ExpenseNotFound => "Expense with this ID does not exist".to_string(),
            Message::ExpenseUpdated => "Expense updated successfully".to_string(),
            Message::ExpenseNotUpdated => "Expense not found and not updated".to_string(),
            Message::NoExpenses => "No expenses recorded yet".to_string(),
            Message::TotalExpenses(total) => format!("Total expenses: ${}", total),
            Message::TotalExpensesForMonth(month, total) => format!("Total expenses for {}: ${}", month, total),

            // === VALIDATION MESSAGES ===
            Message::DescriptionAndAmountRequired => "description and amount must exist to continue".to_string(),
            Message::AmountMustBePositive => "Amount must be a positive number".to_string(),
            Message::DescriptionHasSeparator => "Description must not contain commas".to_string(),
            Message::DateFormatInvalid => "Date must be in the format YYYY-MM-DD or YYYY-MM-DDTHH:MM".to_string(),
            Message::IdRequired => "ID must be greater than 0".to_string(),
            Message::MonthOutOfRange => "Month must be between 1 and 12".to_string(),
            Message::UpdateNeedsField => "At least one field to update must be provided".to_string(),

            // === STORE MESSAGES ===
            Message::UsingTextStore => "SPENT_DATABASE is not set. Using the expense file instead of a database".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigModuleGmail => "Gmail configuration".to_string(),
            Message::ConfigModuleSync => "Sync configuration".to_string(),
            Message::PromptSelectModules => "Select modules to configure".to_string(),

            // === SYNC MESSAGES ===
            Message::GmailNotConfigured => "Gmail is not configured. Run 'spent init' first".to_string(),
            Message::SyncSearching => "Searching emails for expenses to sync".to_string(),
            Message::SyncNoMessages => "No emails found for sync".to_string(),
            Message::SyncImported(description, date, amount) => {
                format!("Added expense for {} on {} with amount {}", description, date, amount)
            }
            Message::SyncSkipped(id, reason) => format!("Skipped message {}: {}", id, reason),
            Message::SyncFailed(error) => format!("Sync failed: {}", error),
            Message::LabelCreated(name) => format!("Label created: {}", name),
            Message::LabelAlreadyExists => "Label already exists".to_string(),
            Message::MessageMarkedSynced(id) => format!("Message {} marked as synced", id),

            // === AUTHORIZATION MESSAGES ===
            Message::AuthorizeHint(url) => format!("Open this URL in your browser to authorize Gmail access:\n{}", url),
            Message::AuthCodeReceived => "Authorization code received".to_string(),
            Message::AuthDenied(error) => format!("Authorization was denied: {}", error),
            Message::AuthNoCode => "Authorization response did not contain a code".to_string(),

            // === WATCH MESSAGES ===
            Message::WatchStarted(hours) => format!("Watching inbox: syncing every {} hour(s). Press Ctrl-C to stop", hours),
            Message::WatchStopped => "Watch stopped".to_string(),
        };

        write!(f, "{}", text)
    }
}
