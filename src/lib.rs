// Personal Finance Calculators - Core Library
// Exposes all modules for use in CLI, TUI, API server, and tests

pub mod error;
pub mod config;
pub mod logging;
pub mod notify;
pub mod input;
pub mod calculator;     // Basic four-function engine + key dispatch
pub mod savings;        // Compound savings projector
pub mod emi;            // Loan installment + amortization
pub mod split;          // Bill splitting with tax and tip
pub mod budget;         // Dashboard / report statistics
pub mod export;         // CSV export

// Re-export commonly used types
pub use error::{CalcError, CalcResult, finite_or_zero};
pub use config::{AppConfig, CalculatorConfig, LoggingConfig};
pub use notify::{Notice, NoticeLevel, NotificationSink, TracingSink};
pub use input::{parse_amount, parse_count, LoanForm, SavingsForm, SplitForm};
pub use calculator::{
    CalculatorState, Command, Mode, Operator, ERROR_DISPLAY,
    format_number, handle_key, reduce,
};
pub use savings::{
    CompoundingFrequency, ProjectionPoint, SavingsInput, SavingsResult,
    compute_future_value, monthly_projection,
};
pub use emi::{AmortizationRow, LoanInput, LoanResult, full_schedule};
pub use split::{SplitInput, SplitResult};
pub use budget::{BudgetLine, BudgetSummary, MonthlyFigures, ProgressLevel, summarize};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
