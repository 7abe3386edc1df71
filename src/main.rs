// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use fincalc::{
    budget, emi, export, savings, split, AppConfig, CalculatorState, CompoundingFrequency,
    LoanForm, SavingsForm, SplitForm, TracingSink,
};

#[derive(Parser)]
#[command(name = "fincalc", version, about = "Personal finance calculators")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true, env = "FINCALC_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive terminal UI (default)
    Tui,

    /// Replay key presses on the basic calculator, e.g. "12+7=" or "9 / 0 Enter"
    Keys {
        /// Single characters, or whitespace-separated key names
        input: String,
    },

    /// Compound savings projection
    Savings {
        #[arg(long)]
        principal: Option<String>,
        #[arg(long)]
        monthly: Option<String>,
        #[arg(long)]
        rate: Option<String>,
        #[arg(long)]
        years: Option<String>,
        /// Compounding periods per year: 1, 2, 4, 12 or 365
        #[arg(long)]
        periods: Option<u32>,
        /// Write the monthly projection to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Loan installment and first-year amortization
    Emi {
        #[arg(long)]
        amount: Option<String>,
        #[arg(long)]
        rate: Option<String>,
        #[arg(long)]
        years: Option<String>,
        #[arg(long)]
        down: Option<String>,
        #[arg(long)]
        fee: Option<String>,
        /// Write the full amortization schedule to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Split a bill after tax and tip
    Split {
        amount: String,
        #[arg(long)]
        people: Option<String>,
        #[arg(long)]
        tip: Option<String>,
        #[arg(long)]
        tax: Option<String>,
        #[arg(long)]
        round_up: bool,
    },

    /// Budget overview from the configured budgets
    Budget,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref())?;

    let command = cli.command.unwrap_or(Commands::Tui);
    if matches!(command, Commands::Tui) && config.logging.file.is_none() {
        // Nothing may write to the terminal while the TUI owns it
        config.logging.default = "off".to_string();
    }
    fincalc::logging::init_with_config(&config.logging);

    match command {
        Commands::Tui => run_ui_mode(&config)?,
        Commands::Keys { input } => run_keys(&config, &input),
        Commands::Savings { principal, monthly, rate, years, periods, csv } => {
            let mut form = SavingsForm::from_config(&config);
            override_field(&mut form.principal, principal);
            override_field(&mut form.monthly_contribution, monthly);
            override_field(&mut form.annual_rate_percent, rate);
            override_field(&mut form.years, years);
            if let Some(p) = periods {
                form.compounding = CompoundingFrequency::from_periods(p).unwrap_or_else(|| {
                    tracing::warn!(periods = p, "unsupported compounding frequency, using monthly");
                    CompoundingFrequency::Monthly
                });
            }
            run_savings(&config, &form, csv)?;
        }
        Commands::Emi { amount, rate, years, down, fee, csv } => {
            let mut form = LoanForm::from_config(&config);
            override_field(&mut form.loan_amount, amount);
            override_field(&mut form.annual_interest_rate_percent, rate);
            override_field(&mut form.term_years, years);
            override_field(&mut form.down_payment_percent, down);
            override_field(&mut form.processing_fee_percent, fee);
            run_emi(&config, &form, csv)?;
        }
        Commands::Split { amount, people, tip, tax, round_up } => {
            let mut form = SplitForm::from_config(&config);
            form.total_amount = amount;
            override_field(&mut form.number_of_people, people);
            override_field(&mut form.tip_percent, tip);
            override_field(&mut form.tax_percent, tax);
            form.round_up = form.round_up || round_up;
            run_split(&form);
        }
        Commands::Budget => run_budget(&config),
    }

    Ok(())
}

fn override_field(field: &mut String, value: Option<String>) {
    if let Some(v) = value {
        *field = v;
    }
}

/// Split the key script into key names: whitespace-separated tokens when
/// present, otherwise one key per character.
fn key_tokens(input: &str) -> Vec<String> {
    if input.trim().contains(char::is_whitespace) {
        input.split_whitespace().map(|s| s.to_string()).collect()
    } else {
        input.chars().map(|c| c.to_string()).collect()
    }
}

fn run_keys(config: &AppConfig, input: &str) {
    let mut state = CalculatorState::new(&config.calculator);
    let mut sink = TracingSink;

    for token in key_tokens(input) {
        let (key, ctrl) = match token.strip_prefix("Ctrl+") {
            Some(rest) => (rest.to_string(), true),
            None => (token, false),
        };
        state = fincalc::handle_key(&state, &key, ctrl, &mut sink);
    }

    if let Some(pending) = state.pending_expression() {
        println!("  {}", pending);
    }
    println!("= {}", state.display);
    if state.memory != 0.0 {
        println!("M: {}", fincalc::format_number(state.memory));
    }
    for record in &state.history {
        println!("  {}", record);
    }
}

fn run_savings(config: &AppConfig, form: &SavingsForm, csv: Option<PathBuf>) -> Result<()> {
    let input = form.to_input();
    let result = savings::project(&input);
    let projection = savings::monthly_projection(&input, config.projection_months);

    println!("💰 Savings Calculator");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Future value:      ${:.2}", result.future_value);
    println!("Total invested:    ${:.2}", result.total_invested);
    println!("Interest earned:   ${:.2}", result.interest_earned);
    println!("Return:            {:.1}%", result.return_on_investment_percent);
    println!("\nFirst year projection ({} compounding):", input.compounding.label());
    for point in &projection {
        println!("  Month {:>2}   ${:.2}", point.month, point.balance);
    }

    if let Some(path) = csv {
        export::export_projection_to_path(&projection, &path)?;
        println!("\n✓ Projection written to {:?}", path);
    }
    Ok(())
}

fn run_emi(config: &AppConfig, form: &LoanForm, csv: Option<PathBuf>) -> Result<()> {
    let input = form.to_input();
    let result = emi::calculate(&input, config.schedule_periods);

    println!("🏦 EMI Calculator");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Down payment:      ${:.2}", result.down_payment_amount);
    println!("Principal:         ${:.2}", result.principal_financed);
    println!("Processing fee:    ${:.2}", result.processing_fee_amount);
    println!("Monthly EMI:       ${:.2}", result.monthly_installment);
    println!("Total payment:     ${:.2}", result.total_payment);
    println!("Total interest:    ${:.2}", result.total_interest);
    println!("\n{:>5}  {:>12}  {:>12}  {:>14}", "Month", "Principal", "Interest", "Balance");
    for row in &result.schedule {
        println!(
            "{:>5}  {:>12.2}  {:>12.2}  {:>14.2}",
            row.period, row.principal_portion, row.interest_portion, row.remaining_balance
        );
    }

    if let Some(path) = csv {
        let rows = emi::full_schedule(&input, config.export_period_limit);
        export::export_schedule_to_path(&rows, &path)?;
        println!("\n✓ {} periods written to {:?}", rows.len(), path);
        if result.total_periods > config.export_period_limit {
            println!(
                "  ⚠️  Loan runs {} periods; export stops at export_period_limit",
                result.total_periods
            );
        }
    }
    Ok(())
}

fn run_split(form: &SplitForm) {
    let result = split::split(&form.to_input());

    println!("🧾 Expense Split");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Per person:        ${:.2}", result.per_person);
    if result.rounded {
        println!("                   (rounded from ${:.2})", result.unrounded_per_person);
    }
    println!("Total with tax+tip ${:.2}", result.total_with_tax_and_tip);
    println!("Tax:               ${:.2}", result.tax_amount);
    println!("Tip:               ${:.2}", result.tip_amount);
}

fn run_budget(config: &AppConfig) {
    let summary = budget::summarize(&config.budgets);

    println!("📊 Budget Overview");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Total budget:      ${:.2}", summary.total_budget);
    println!("Total spent:       ${:.2}", summary.total_spent);
    println!("Remaining:         ${:.2}", summary.remaining);
    println!("Utilization:       {:.1}%", summary.utilization_percent);
    println!("Saved:             {:.1}% of budget", summary.savings_percent);
    println!();
    for line in &config.budgets {
        let marker = match line.progress_level() {
            budget::ProgressLevel::OnTrack => "✓",
            budget::ProgressLevel::Warning => "!",
            budget::ProgressLevel::Critical => "✗",
        };
        println!(
            "  {} {:<18} ${:>9.2} / ${:>9.2}  ({:.0}%)",
            marker,
            line.category,
            line.spent,
            line.budget,
            line.used_percent()
        );
    }

    let open = budget::unbudgeted_categories(&config.categories, &config.budgets);
    if !open.is_empty() {
        println!("\nNo budget set: {}", open.join(", "));
    }
}

#[cfg(feature = "tui")]
fn run_ui_mode(config: &AppConfig) -> Result<()> {
    let mut app = ui::App::new(config);
    ui::run_ui(&mut app)?;
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_config: &AppConfig) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use a subcommand: fincalc keys \"2+3=\"");
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_tokens() {
        assert_eq!(key_tokens("12+3="), vec!["1", "2", "+", "3", "="]);
        assert_eq!(
            key_tokens("9 / 0 Enter"),
            vec!["9", "/", "0", "Enter"]
        );
    }
}
