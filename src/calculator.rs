// 🧮 Basic Calculator Engine - four-function state machine
// Display entry, one pending operation, a memory register and a short history log.
//
// The engine is a plain value: every action mutates the state it is called on and
// nothing else. `reduce` and `handle_key` wrap the actions as a pure reducer so a
// presentation layer (TUI, HTTP, tests) only ever swaps one state for the next.

use crate::config::CalculatorConfig;
use crate::error::{finite_or_zero, CalcError, CalcResult};
use crate::notify::{Notice, NotificationSink};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display text while the engine is in the error state
pub const ERROR_DISPLAY: &str = "Error";

// ============================================================================
// OPERATORS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "×",
            Operator::Divide => "÷",
        }
    }

    /// Accepts both the display symbols and the ASCII keyboard ones.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Subtract),
            "*" | "×" | "x" => Some(Operator::Multiply),
            "/" | "÷" => Some(Operator::Divide),
            _ => None,
        }
    }

    pub fn apply(&self, lhs: f64, rhs: f64) -> CalcResult<f64> {
        let result = match self {
            Operator::Add => lhs + rhs,
            Operator::Subtract => lhs - rhs,
            Operator::Multiply => lhs * rhs,
            Operator::Divide => {
                if rhs == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                lhs / rhs
            }
        };
        checked(result)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

fn checked(value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::Overflow)
    }
}

fn checked_sqrt(value: f64) -> CalcResult<f64> {
    if value < 0.0 {
        return Err(CalcError::InvalidDomain { value });
    }
    Ok(value.sqrt())
}

/// Render a number the way the display shows it: shortest round-trip decimal,
/// no trailing `.0`, and never `-0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

// ============================================================================
// STATE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Entering,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorState {
    /// Current entry as typed, or `ERROR_DISPLAY`
    pub display: String,

    /// Left operand held while an operator is pending
    pub previous_value: Option<f64>,

    /// Only ever set together with `previous_value`
    pub pending_operator: Option<Operator>,

    pub memory: f64,

    /// Completed calculations, newest first
    pub history: Vec<String>,

    pub mode: Mode,

    /// An operator was just applied and no digit has been typed since
    #[serde(default)]
    awaiting_operand: bool,

    /// Owned by configuration, never taken from serialized input
    #[serde(skip, default = "default_history_limit")]
    history_limit: usize,
}

fn default_history_limit() -> usize {
    CalculatorConfig::default().history_limit
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new(&CalculatorConfig::default())
    }
}

impl CalculatorState {
    pub fn new(config: &CalculatorConfig) -> Self {
        CalculatorState {
            display: "0".to_string(),
            previous_value: None,
            pending_operator: None,
            memory: 0.0,
            history: Vec::new(),
            mode: Mode::Entering,
            awaiting_operand: false,
            history_limit: config.history_limit,
        }
    }

    pub fn is_error(&self) -> bool {
        self.mode == Mode::Error
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    /// Apply a history bound, dropping the oldest records beyond it.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self.history.truncate(limit);
        self
    }

    /// Numeric value of the display. The error marker and partial entries read as 0.
    pub fn current_value(&self) -> f64 {
        self.display
            .parse::<f64>()
            .map(finite_or_zero)
            .unwrap_or(0.0)
    }

    /// The "{previous} {operator}" line shown above the display.
    pub fn pending_expression(&self) -> Option<String> {
        match (self.previous_value, self.pending_operator) {
            (Some(prev), Some(op)) => Some(format!("{} {}", format_number(prev), op)),
            _ => None,
        }
    }

    // ------------------------------------------------------------------------
    // Entry
    // ------------------------------------------------------------------------

    pub fn enter_digit(&mut self, digit: u8) {
        if digit > 9 {
            return;
        }
        let ch = char::from(b'0' + digit);

        if self.mode == Mode::Error {
            self.display = ch.to_string();
            self.mode = Mode::Entering;
        } else if self.display == "0" || self.awaiting_operand {
            self.display = ch.to_string();
        } else {
            self.display.push(ch);
            if matches!(self.display.parse::<f64>(), Ok(v) if !v.is_finite()) {
                self.fail(CalcError::Overflow);
                return;
            }
        }
        self.awaiting_operand = false;
    }

    pub fn enter_decimal_point(&mut self) {
        if self.mode == Mode::Error {
            return;
        }
        if self.awaiting_operand {
            self.display = "0.".to_string();
            self.awaiting_operand = false;
        } else if !self.display.contains('.') {
            self.display.push('.');
        }
    }

    pub fn apply_operator(&mut self, op: Operator) {
        if self.mode == Mode::Error {
            return;
        }

        if self.previous_value.is_some() {
            if self.awaiting_operand {
                // Nothing typed since the last operator: just replace it
                self.pending_operator = Some(op);
                return;
            }
            self.evaluate();
            if self.mode == Mode::Error {
                return;
            }
        }

        self.previous_value = Some(self.current_value());
        self.display = "0".to_string();
        self.pending_operator = Some(op);
        self.awaiting_operand = true;
    }

    pub fn evaluate(&mut self) {
        if self.mode == Mode::Error {
            return;
        }
        let (Some(prev), Some(op)) = (self.previous_value, self.pending_operator) else {
            return;
        };
        let current = self.current_value();

        match op.apply(prev, current) {
            Ok(result) => {
                let record = format!(
                    "{} {} {} = {}",
                    format_number(prev),
                    op,
                    format_number(current),
                    format_number(result)
                );
                tracing::debug!(%record, "calculation complete");
                self.push_history(record);

                self.display = format_number(result);
                self.previous_value = None;
                self.pending_operator = None;
                self.awaiting_operand = false;
            }
            Err(err) => self.fail(err),
        }
    }

    // ------------------------------------------------------------------------
    // Clearing
    // ------------------------------------------------------------------------

    /// Reset the entry and the pending operation. Memory and history are kept.
    pub fn clear_all(&mut self) {
        self.display = "0".to_string();
        self.previous_value = None;
        self.pending_operator = None;
        self.mode = Mode::Entering;
        self.awaiting_operand = false;
    }

    pub fn clear_entry(&mut self) {
        if self.mode == Mode::Error {
            return;
        }
        self.display = "0".to_string();
    }

    pub fn backspace(&mut self) {
        if self.mode == Mode::Error {
            return;
        }
        if self.display.chars().count() > 1 {
            self.display.pop();
            if self.display == "-" {
                self.display = "0".to_string();
            }
        } else {
            self.display = "0".to_string();
        }
    }

    pub fn clear_history(&mut self) -> Notice {
        self.history.clear();
        Notice::info("History cleared")
    }

    // ------------------------------------------------------------------------
    // Unary operations
    // ------------------------------------------------------------------------

    pub fn toggle_sign(&mut self) {
        self.apply_unary(|v| Ok(-v));
    }

    pub fn percent(&mut self) {
        self.apply_unary(|v| Ok(v / 100.0));
    }

    pub fn square(&mut self) {
        self.apply_unary(|v| checked(v * v));
    }

    pub fn square_root(&mut self) {
        self.apply_unary(checked_sqrt);
    }

    fn apply_unary(&mut self, f: impl FnOnce(f64) -> CalcResult<f64>) {
        if self.mode == Mode::Error {
            return;
        }
        match f(self.current_value()) {
            Ok(value) => self.display = format_number(value),
            Err(err) => self.fail(err),
        }
    }

    // ------------------------------------------------------------------------
    // Memory register
    // ------------------------------------------------------------------------

    pub fn memory_add(&mut self) -> Notice {
        let value = self.current_value();
        self.memory += value;
        Notice::success(format!("Added {} to memory", format_number(value)))
    }

    pub fn memory_subtract(&mut self) -> Notice {
        let value = self.current_value();
        self.memory -= value;
        Notice::success(format!("Subtracted {} from memory", format_number(value)))
    }

    pub fn memory_recall(&mut self) {
        if self.mode == Mode::Error {
            return;
        }
        self.display = format_number(self.memory);
        self.awaiting_operand = false;
    }

    pub fn memory_clear(&mut self) -> Notice {
        self.memory = 0.0;
        Notice::success("Memory cleared")
    }

    // ------------------------------------------------------------------------

    fn push_history(&mut self, record: String) {
        self.history.insert(0, record);
        self.history.truncate(self.history_limit);
    }

    fn fail(&mut self, err: CalcError) {
        tracing::debug!(error = %err, display = %self.display, "entering error state");
        self.display = ERROR_DISPLAY.to_string();
        self.mode = Mode::Error;
        self.previous_value = None;
        self.pending_operator = None;
        self.awaiting_operand = false;
    }

    /// Run one command. Memory mutations return the notice to show.
    pub fn apply(&mut self, command: Command) -> Option<Notice> {
        match command {
            Command::Digit(d) => self.enter_digit(d),
            Command::DecimalPoint => self.enter_decimal_point(),
            Command::Operator(op) => self.apply_operator(op),
            Command::Evaluate => self.evaluate(),
            Command::ClearAll => self.clear_all(),
            Command::ClearEntry => self.clear_entry(),
            Command::Backspace => self.backspace(),
            Command::ToggleSign => self.toggle_sign(),
            Command::Percent => self.percent(),
            Command::Square => self.square(),
            Command::SquareRoot => self.square_root(),
            Command::MemoryAdd => return Some(self.memory_add()),
            Command::MemorySubtract => return Some(self.memory_subtract()),
            Command::MemoryRecall => self.memory_recall(),
            Command::MemoryClear => return Some(self.memory_clear()),
            Command::ClearHistory => return Some(self.clear_history()),
        }
        None
    }
}

// ============================================================================
// COMMANDS & KEY DISPATCH
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Digit(u8),
    DecimalPoint,
    Operator(Operator),
    Evaluate,
    ClearAll,
    ClearEntry,
    Backspace,
    ToggleSign,
    Percent,
    Square,
    SquareRoot,
    MemoryAdd,
    MemorySubtract,
    MemoryRecall,
    MemoryClear,
    ClearHistory,
}

impl Command {
    /// Map a key name (browser `KeyboardEvent.key` style) to a command.
    pub fn from_key(key: &str, ctrl: bool) -> Option<Command> {
        let mut chars = key.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(d) = c.to_digit(10) {
                return Some(Command::Digit(d as u8));
            }
        }

        match key {
            "+" | "-" | "*" | "/" => Operator::from_symbol(key).map(Command::Operator),
            "." => Some(Command::DecimalPoint),
            "=" | "Enter" => Some(Command::Evaluate),
            "Escape" => Some(Command::ClearAll),
            "Backspace" => Some(Command::Backspace),
            "%" => Some(Command::Percent),
            "m" | "M" if ctrl => Some(Command::MemoryAdd),
            "r" | "R" if ctrl => Some(Command::MemoryRecall),
            _ => None,
        }
    }
}

/// Pure reducer: the next state plus any notice the command produced.
pub fn reduce(state: CalculatorState, command: Command) -> (CalculatorState, Option<Notice>) {
    let mut next = state;
    let notice = next.apply(command);
    (next, notice)
}

/// Dispatch one key press. Unmapped keys leave the state unchanged.
pub fn handle_key(
    state: &CalculatorState,
    key: &str,
    ctrl: bool,
    sink: &mut dyn NotificationSink,
) -> CalculatorState {
    let Some(command) = Command::from_key(key, ctrl) else {
        tracing::trace!(key, ctrl, "ignoring unmapped key");
        return state.clone();
    };

    let (next, notice) = reduce(state.clone(), command);
    if let Some(notice) = notice {
        sink.notify(notice);
    }
    next
}

// ============================================================================
// TESTS
// ============================================================================
