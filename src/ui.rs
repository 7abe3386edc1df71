use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use fincalc::{
    budget, emi, handle_key, savings, split, AppConfig, BudgetLine, CalculatorState, Command,
    LoanForm, Notice, NoticeLevel, NotificationSink, SavingsForm, SplitForm,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame, Terminal,
};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Basic,
    Split,
    Savings,
    Emi,
    Budget,
}

impl Page {
    const ALL: [Page; 5] = [Page::Basic, Page::Split, Page::Savings, Page::Emi, Page::Budget];

    pub fn next(&self) -> Self {
        match self {
            Page::Basic => Page::Split,
            Page::Split => Page::Savings,
            Page::Savings => Page::Emi,
            Page::Emi => Page::Budget,
            Page::Budget => Page::Basic,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Basic => Page::Budget,
            Page::Split => Page::Basic,
            Page::Savings => Page::Split,
            Page::Emi => Page::Savings,
            Page::Budget => Page::Emi,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Basic => "Calculator",
            Page::Split => "Expense Split",
            Page::Savings => "Savings",
            Page::Emi => "EMI",
            Page::Budget => "Budget",
        }
    }

    fn field_count(&self) -> usize {
        match self {
            Page::Split => 5,
            Page::Savings => 5,
            Page::Emi => 5,
            Page::Basic | Page::Budget => 0,
        }
    }
}

/// Keeps the latest notice for the status bar.
#[derive(Default)]
struct StatusLine(Option<Notice>);

impl NotificationSink for StatusLine {
    fn notify(&mut self, notice: Notice) {
        self.0 = Some(notice);
    }
}

pub struct App {
    pub current_page: Page,
    pub calculator: CalculatorState,
    pub split_form: SplitForm,
    pub savings_form: SavingsForm,
    pub loan_form: LoanForm,
    pub selected_field: usize,
    budgets: Vec<BudgetLine>,
    categories: Vec<String>,
    projection_months: u32,
    schedule_periods: u32,
    status: StatusLine,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            current_page: Page::Basic,
            calculator: CalculatorState::new(&config.calculator),
            split_form: SplitForm::from_config(config),
            savings_form: SavingsForm::from_config(config),
            loan_form: LoanForm::from_config(config),
            selected_field: 0,
            budgets: config.budgets.clone(),
            categories: config.categories.clone(),
            projection_months: config.projection_months,
            schedule_periods: config.schedule_periods,
            status: StatusLine::default(),
        }
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
        self.selected_field = 0;
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
        self.selected_field = 0;
    }

    fn next_field(&mut self) {
        let count = self.current_page.field_count();
        if count > 0 {
            self.selected_field = (self.selected_field + 1) % count;
        }
    }

    fn previous_field(&mut self) {
        let count = self.current_page.field_count();
        if count > 0 {
            self.selected_field = (self.selected_field + count - 1) % count;
        }
    }

    /// Text field under the cursor, or `None` for toggles.
    fn field_mut(&mut self) -> Option<&mut String> {
        match (self.current_page, self.selected_field) {
            (Page::Split, 0) => Some(&mut self.split_form.total_amount),
            (Page::Split, 1) => Some(&mut self.split_form.number_of_people),
            (Page::Split, 2) => Some(&mut self.split_form.tip_percent),
            (Page::Split, 3) => Some(&mut self.split_form.tax_percent),
            (Page::Savings, 0) => Some(&mut self.savings_form.principal),
            (Page::Savings, 1) => Some(&mut self.savings_form.monthly_contribution),
            (Page::Savings, 2) => Some(&mut self.savings_form.annual_rate_percent),
            (Page::Savings, 3) => Some(&mut self.savings_form.years),
            (Page::Emi, 0) => Some(&mut self.loan_form.loan_amount),
            (Page::Emi, 1) => Some(&mut self.loan_form.annual_interest_rate_percent),
            (Page::Emi, 2) => Some(&mut self.loan_form.term_years),
            (Page::Emi, 3) => Some(&mut self.loan_form.down_payment_percent),
            (Page::Emi, 4) => Some(&mut self.loan_form.processing_fee_percent),
            _ => None,
        }
    }

    fn toggle_field(&mut self) {
        match (self.current_page, self.selected_field) {
            (Page::Split, 4) => self.split_form.round_up = !self.split_form.round_up,
            (Page::Savings, 4) => {
                self.savings_form.compounding = self.savings_form.compounding.next()
            }
            _ => {}
        }
    }

    fn handle_calculator_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // On-screen buttons without a keyboard shortcut in the key map.
        // Terminals report Ctrl+M as Enter, so M+ also sits on plain 'm'.
        let extra = match key.code {
            KeyCode::Char('m') if !ctrl => Some(Command::MemoryAdd),
            KeyCode::Delete => Some(Command::ClearEntry),
            KeyCode::Char('n') if !ctrl => Some(Command::ToggleSign),
            KeyCode::Char('s') if !ctrl => Some(Command::Square),
            KeyCode::Char('r') if !ctrl => Some(Command::SquareRoot),
            KeyCode::Char('h') if !ctrl => Some(Command::ClearHistory),
            KeyCode::Char('d') if ctrl => Some(Command::MemorySubtract),
            KeyCode::Char('l') if ctrl => Some(Command::MemoryClear),
            _ => None,
        };
        if let Some(command) = extra {
            if let Some(notice) = self.calculator.apply(command) {
                self.status.notify(notice);
            }
            return;
        }

        let name = match key.code {
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Escape".to_string(),
            KeyCode::Backspace => "Backspace".to_string(),
            _ => return,
        };
        self.calculator = handle_key(&self.calculator, &name, ctrl, &mut self.status);
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down | KeyCode::Enter => self.next_field(),
            KeyCode::Up => self.previous_field(),
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => self.toggle_field(),
            KeyCode::Backspace => {
                if let Some(field) = self.field_mut() {
                    field.pop();
                }
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' || c == '-' => {
                if let Some(field) = self.field_mut() {
                    field.push(c);
                }
            }
            _ => {}
        }
    }

    /// Returns false when the app should exit.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => return false,
            KeyCode::Tab => self.next_page(),
            KeyCode::BackTab => self.previous_page(),
            KeyCode::Char('q') if self.current_page == Page::Budget => return false,
            _ => match self.current_page {
                Page::Basic => self.handle_calculator_key(key),
                Page::Split | Page::Savings | Page::Emi => self.handle_form_key(key),
                Page::Budget => {}
            },
        }
        true
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if !app.handle_key_event(key) {
                return Ok(());
            }
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Page tabs
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.current_page {
        Page::Basic => render_calculator(f, chunks[1], app),
        Page::Split => render_split(f, chunks[1], app),
        Page::Savings => render_savings(f, chunks[1], app),
        Page::Emi => render_emi(f, chunks[1], app),
        Page::Budget => render_budget(f, chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut tab_spans = vec![];
    for (i, page) in Page::ALL.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title(), style));
    }

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Financial Calculators "),
    );

    f.render_widget(header, area);
}

fn label_style() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

fn money_line(label: &str, value: f64) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<20}", label), label_style()),
        Span::raw(format!("${:.2}", value)),
    ])
}

fn render_calculator(f: &mut Frame, area: Rect, app: &App) {
    let calc = &app.calculator;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let display_style = if calc.is_error() {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", calc.pending_expression().unwrap_or_default()),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(format!("  {}", calc.display), display_style)),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Memory: ", label_style()),
            Span::raw(fincalc::format_number(calc.memory)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  0-9 . + - * / Enter  Esc clear  Del CE  ⌫ delete",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "  n ±  s x²  r √  % percent  h clear history",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "  m M+  Ctrl+D M-  Ctrl+R MR  Ctrl+L MC",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let display = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Calculator "),
    );
    f.render_widget(display, columns[0]);

    let history: Vec<Line> = if calc.history.is_empty() {
        vec![Line::from(Span::styled(
            "  Start calculating to see history here",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ))]
    } else {
        calc.history
            .iter()
            .map(|h| Line::from(format!("  {}", h)))
            .collect()
    };

    let history_panel = Paragraph::new(history).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" History "),
    );
    f.render_widget(history_panel, columns[1]);
}

fn form_line(label: &str, value: &str, selected: bool) -> Line<'static> {
    let marker = if selected {
        Span::styled("→ ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    } else {
        Span::raw("  ")
    };
    let value_style = if selected {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::UNDERLINED)
    } else {
        Style::default().fg(Color::White)
    };

    Line::from(vec![
        marker,
        Span::styled(format!("{:<26}", label), label_style()),
        Span::styled(value.to_string(), value_style),
    ])
}

fn panel(title: &str, lines: Vec<Line<'static>>) -> Paragraph<'static> {
    Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(format!(" {} ", title)),
    )
}

fn two_columns(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area)
}

fn render_split(f: &mut Frame, area: Rect, app: &App) {
    let form = &app.split_form;
    let result = split::split(&form.to_input());
    let columns = two_columns(area);
    let sel = app.selected_field;

    let inputs = vec![
        Line::from(""),
        form_line("Total Amount ($)", &form.total_amount, sel == 0),
        form_line("Number of People", &form.number_of_people, sel == 1),
        form_line("Tip Percentage (%)", &form.tip_percent, sel == 2),
        form_line("Tax Percentage (%)", &form.tax_percent, sel == 3),
        form_line(
            "Round up to whole unit",
            if form.round_up { "[x]" } else { "[ ]" },
            sel == 4,
        ),
    ];
    f.render_widget(panel("Expense Split", inputs), columns[0]);

    let mut results = vec![Line::from(""), money_line("Per person", result.per_person)];
    if result.rounded {
        results.push(Line::from(Span::styled(
            format!("  (Rounded from ${:.2})", result.unrounded_per_person),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }
    results.push(money_line("Total with tax & tip", result.total_with_tax_and_tip));
    results.push(money_line("Tax", result.tax_amount));
    results.push(money_line("Tip", result.tip_amount));
    f.render_widget(panel("Each Person Pays", results), columns[1]);
}

fn render_savings(f: &mut Frame, area: Rect, app: &App) {
    let form = &app.savings_form;
    let input = form.to_input();
    let result = savings::project(&input);
    let projection = savings::monthly_projection(&input, app.projection_months);
    let columns = two_columns(area);
    let sel = app.selected_field;

    let mut lines = vec![
        Line::from(""),
        form_line("Initial Amount ($)", &form.principal, sel == 0),
        form_line("Monthly Contribution ($)", &form.monthly_contribution, sel == 1),
        form_line("Annual Interest Rate (%)", &form.annual_rate_percent, sel == 2),
        form_line("Years to Save", &form.years, sel == 3),
        form_line("Compound Frequency", form.compounding.label(), sel == 4),
        Line::from(""),
        money_line("Future value", result.future_value),
        money_line("Total invested", result.total_invested),
        money_line("Interest earned", result.interest_earned),
    ];
    lines.push(Line::from(vec![
        Span::styled(format!("  {:<20}", "Return"), label_style()),
        Span::raw(format!("{:.1}%", result.return_on_investment_percent)),
    ]));
    f.render_widget(panel("Savings Calculator", lines), columns[0]);

    let rows = projection.iter().map(|p| {
        Row::new(vec![
            Cell::from(format!("Month {}", p.month)),
            Cell::from(format!("${:.2}", p.balance)).style(Style::default().fg(Color::Green)),
        ])
    });
    let table = Table::new(rows, [Constraint::Length(12), Constraint::Length(16)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" First Year Projection "),
    );
    f.render_widget(table, columns[1]);
}

fn render_emi(f: &mut Frame, area: Rect, app: &App) {
    let form = &app.loan_form;
    let result = emi::calculate(&form.to_input(), app.schedule_periods);
    let columns = two_columns(area);
    let sel = app.selected_field;

    let lines = vec![
        Line::from(""),
        form_line("Loan Amount ($)", &form.loan_amount, sel == 0),
        form_line("Interest Rate (%)", &form.annual_interest_rate_percent, sel == 1),
        form_line("Loan Term (years)", &form.term_years, sel == 2),
        form_line("Down Payment (%)", &form.down_payment_percent, sel == 3),
        form_line("Processing Fee (%)", &form.processing_fee_percent, sel == 4),
        Line::from(""),
        money_line("Monthly EMI", result.monthly_installment),
        money_line("Down payment", result.down_payment_amount),
        money_line("Processing fee", result.processing_fee_amount),
        money_line("Total payment", result.total_payment),
        money_line("Total interest", result.total_interest),
    ];
    f.render_widget(panel("EMI Calculator", lines), columns[0]);

    let header = Row::new(["Month", "Principal", "Interest", "Balance"].iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    }))
    .style(Style::default().bg(Color::DarkGray));

    let rows = result.schedule.iter().map(|r| {
        Row::new(vec![
            Cell::from(r.period.to_string()),
            Cell::from(format!("${:.2}", r.principal_portion)).style(Style::default().fg(Color::Green)),
            Cell::from(format!("${:.2}", r.interest_portion)).style(Style::default().fg(Color::Red)),
            Cell::from(format!("${:.2}", r.remaining_balance)),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(14),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" First Year Breakdown "),
    );
    f.render_widget(table, columns[1]);
}

fn render_budget(f: &mut Frame, area: Rect, app: &App) {
    let summary = budget::summarize(&app.budgets);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(0)])
        .split(area);

    let mut lines = vec![
        money_line("Total budget", summary.total_budget),
        money_line("Total spent", summary.total_spent),
        money_line("Remaining", summary.remaining),
        Line::from(vec![
            Span::styled(format!("  {:<20}", "Utilization"), label_style()),
            Span::raw(format!("{:.1}%", summary.utilization_percent)),
        ]),
        Line::from(vec![
            Span::styled(format!("  {:<20}", "Saved"), label_style()),
            Span::raw(format!("{:.1}% of budget", summary.savings_percent)),
        ]),
    ];
    let open = budget::unbudgeted_categories(&app.categories, &app.budgets);
    if !open.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  No budget set: {}", open.join(", ")),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }
    f.render_widget(panel("Budget Overview", lines), chunks[0]);

    let header = Row::new(["Category", "Spent", "Budget", "Used"].iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    }))
    .style(Style::default().bg(Color::DarkGray));

    let rows = app.budgets.iter().map(|line| {
        let color = match line.progress_level() {
            budget::ProgressLevel::OnTrack => Color::Green,
            budget::ProgressLevel::Warning => Color::Yellow,
            budget::ProgressLevel::Critical => Color::Red,
        };
        Row::new(vec![
            Cell::from(line.category.clone()),
            Cell::from(format!("${:.2}", line.spent)),
            Cell::from(format!("${:.2}", line.budget)),
            Cell::from(format!("{:.0}%", line.used_percent())).style(Style::default().fg(color)),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(20),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Budgets "),
    );
    f.render_widget(table, chunks[1]);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = vec![];

    if let Some(notice) = &app.status.0 {
        let (icon, color) = match notice.level {
            NoticeLevel::Success => ("✓", Color::Green),
            NoticeLevel::Info => ("ℹ", Color::Cyan),
        };
        status_spans.push(Span::styled(
            format!(" {} {} ", icon, notice.message),
            Style::default().fg(color),
        ));
        status_spans.push(Span::raw(" | "));
    }

    status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Page | "));
    if app.current_page.field_count() > 0 {
        status_spans.push(Span::styled("↑/↓", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Field | "));
        status_spans.push(Span::styled("Space", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Toggle | "));
    }
    status_spans.push(Span::styled("Ctrl+Q", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_calculator_page_dispatches_keys() {
        let mut app = App::new(&AppConfig::default());
        for c in "12*3".chars() {
            assert!(app.handle_key_event(key(KeyCode::Char(c))));
        }
        app.handle_key_event(key(KeyCode::Enter));

        assert_eq!(app.calculator.display, "36");
        assert_eq!(app.calculator.history[0], "12 × 3 = 36");
    }

    #[test]
    fn test_memory_notice_reaches_status_bar() {
        let mut app = App::new(&AppConfig::default());
        app.handle_key_event(key(KeyCode::Char('5')));
        app.handle_key_event(ctrl('m'));

        assert_eq!(app.calculator.memory, 5.0);
        assert_eq!(
            app.status.0.as_ref().map(|n| n.message.as_str()),
            Some("Added 5 to memory")
        );
    }

    #[test]
    fn test_plain_m_adds_to_memory() {
        let mut app = App::new(&AppConfig::default());
        app.handle_key_event(key(KeyCode::Char('8')));
        app.handle_key_event(key(KeyCode::Char('m')));
        app.handle_key_event(key(KeyCode::Char('m')));

        assert_eq!(app.calculator.memory, 16.0);
        assert_eq!(app.calculator.display, "8");

        app.handle_key_event(key(KeyCode::Char('h')));
        assert_eq!(
            app.status.0.as_ref().map(|n| n.level),
            Some(NoticeLevel::Info)
        );
    }

    #[test]
    fn test_page_cycle() {
        let mut app = App::new(&AppConfig::default());
        for _ in 0..Page::ALL.len() {
            app.handle_key_event(key(KeyCode::Tab));
        }
        assert_eq!(app.current_page, Page::Basic);

        app.handle_key_event(key(KeyCode::BackTab));
        assert_eq!(app.current_page, Page::Budget);
    }

    #[test]
    fn test_form_editing() {
        let mut app = App::new(&AppConfig::default());
        app.current_page = Page::Split;

        for c in "100".chars() {
            app.handle_key_event(key(KeyCode::Char(c)));
        }
        app.handle_key_event(key(KeyCode::Down));
        app.handle_key_event(key(KeyCode::Backspace));
        app.handle_key_event(key(KeyCode::Char('4')));
        app.handle_key_event(key(KeyCode::Up));
        app.handle_key_event(key(KeyCode::Up));
        app.handle_key_event(key(KeyCode::Char(' ')));

        assert_eq!(app.split_form.total_amount, "100");
        assert_eq!(app.split_form.number_of_people, "4");
        assert!(app.split_form.round_up);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new(&AppConfig::default());
        assert!(!app.handle_key_event(ctrl('q')));
        assert!(app.handle_key_event(key(KeyCode::Char('q'))));
    }
}
