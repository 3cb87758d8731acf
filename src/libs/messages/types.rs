/// Every user-facing message the application can produce.
///
/// Variants carry their dynamic parts as typed fields; the text itself
/// lives in the `Display` implementation so all wording stays in one place.
#[derive(Debug, Clone)]
pub enum Message {
    // === EXPENSE MESSAGES ===
    ExpenseAdded,
    ExpenseAddedWithId(i64),
    ExpenseDeleted,
    ExpenseNotFound,
    ExpenseUpdated,
    ExpenseNotUpdated,
    NoExpenses,
    TotalExpenses(String),
    TotalExpensesForMonth(String, String), // month name, total

    // === VALIDATION MESSAGES ===
    DescriptionAndAmountRequired,
    AmountMustBePositive,
    DescriptionHasSeparator,
    DateFormatInvalid,
    IdRequired,
    MonthOutOfRange,
    UpdateNeedsField,

    // === STORE MESSAGES ===
    UsingTextStore,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleGmail,
    ConfigModuleSync,
    PromptSelectModules,

    // === SYNC MESSAGES ===
    GmailNotConfigured,
    SyncSearching,
    SyncNoMessages,
    SyncImported(String, String, String), // description, date, amount
    SyncSkipped(String, String),          // message id, reason
    SyncFailed(String),
    LabelCreated(String),
    LabelAlreadyExists,
    MessageMarkedSynced(String),

    // === AUTHORIZATION MESSAGES ===
    AuthorizeHint(String),
    AuthCodeReceived,
    AuthDenied(String),
    AuthNoCode,

    // === WATCH MESSAGES ===
    WatchStarted(u64),
    WatchStopped,
}
