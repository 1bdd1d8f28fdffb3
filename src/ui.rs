use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Sparkline, Table, TableState},
    Frame, Terminal,
};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};
use tokio::runtime::Handle;

use homehub::advisor::{Advisor, Sender as ChatSender};
use homehub::format::{format_currency, format_percent, group_thousands, round_dollars};
use homehub::maintenance::{Impact, TaskFilter};
use homehub::mortgage::MARKET_RATE_PCT;
use homehub::rental::{self, RentalField};
use homehub::selling::{self, AgentStatus};
use homehub::{home, HomeHub, View};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Where advisor replies come back from the runtime
struct AdvisorLink {
    advisor: Advisor,
    runtime: Handle,
    replies_tx: Sender<String>,
    replies_rx: Receiver<String>,
}

impl AdvisorLink {
    fn new(advisor: Advisor, runtime: Handle) -> Self {
        let (replies_tx, replies_rx) = mpsc::channel();
        Self {
            advisor,
            runtime,
            replies_tx,
            replies_rx,
        }
    }

    fn send(&self, question: String) {
        let advisor = self.advisor.clone();
        let tx = self.replies_tx.clone();
        self.runtime.spawn(async move {
            let reply = advisor.ask(&question).await;
            // Receiver is gone only when the UI has exited
            let _ = tx.send(reply);
        });
    }

    fn drain(&self, app: &mut HomeHub) {
        while let Ok(reply) = self.replies_rx.try_recv() {
            app.receive_reply(reply);
        }
    }
}

pub fn run_ui(app: &mut HomeHub, advisor: Advisor, runtime: Handle) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let link = AdvisorLink::new(advisor, runtime);

    // Run the app
    let res = run_app(&mut terminal, app, &link);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "ui loop failed");
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut HomeHub,
    link: &AdvisorLink,
) -> io::Result<()> {
    loop {
        app.tick(Instant::now());
        link.drain(app);

        terminal.draw(|f| ui(f, app))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if handle_key(app, link, key) == Flow::Quit {
                return Ok(());
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

fn handle_key(app: &mut HomeHub, link: &AdvisorLink, key: KeyEvent) -> Flow {
    // Global keys
    match key.code {
        KeyCode::Esc => return Flow::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Flow::Quit,
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.previous_view();
            } else {
                app.next_view();
            }
            return Flow::Continue;
        }
        KeyCode::BackTab => {
            app.previous_view();
            return Flow::Continue;
        }
        KeyCode::Down => {
            app.cursor_down();
            return Flow::Continue;
        }
        KeyCode::Up => {
            app.cursor_up();
            return Flow::Continue;
        }
        _ => {}
    }

    // Text-entry views take every character
    match app.view {
        View::Rental => {
            match key.code {
                KeyCode::Char(c) => app.rental_input_char(c),
                KeyCode::Backspace => app.rental_backspace(),
                _ => {}
            }
            return Flow::Continue;
        }
        View::Advisor => {
            match key.code {
                KeyCode::Char(c) => app.chat_input_char(c),
                KeyCode::Backspace => app.chat_backspace(),
                KeyCode::Enter => {
                    if let Some(question) = app.submit_question() {
                        tracing::info!(len = question.len(), "advisor question submitted");
                        link.send(question);
                    }
                }
                _ => {}
            }
            return Flow::Continue;
        }
        _ => {}
    }

    match key.code {
        KeyCode::Char('q') => return Flow::Quit,
        KeyCode::Char(c @ '1'..='7') => {
            if let Some(view) = c.to_digit(10).and_then(|d| View::from_index(d as usize)) {
                app.goto(view);
            }
        }
        KeyCode::Char('j') => app.cursor_down(),
        KeyCode::Char('k') => app.cursor_up(),
        _ => match app.view {
            View::Maintenance => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => {
                    app.toggle_selected_task();
                }
                KeyCode::Char('f') => app.cycle_filter(),
                _ => {}
            },
            View::Renovation => match key.code {
                KeyCode::Enter if app.estimate.is_none() => app.select_project(),
                KeyCode::Backspace | KeyCode::Char('b') => app.back_to_projects(),
                KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('+') => app.raise_budget(),
                KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('-') => app.lower_budget(),
                _ => {}
            },
            View::Selling => match key.code {
                KeyCode::Char('m') | KeyCode::Enter => app.start_agent_match(Instant::now()),
                KeyCode::Char('r') => app.reset_agent(),
                _ => {}
            },
            _ => {}
        },
    }

    Flow::Continue
}

fn ui(f: &mut Frame, app: &HomeHub) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Panel
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.view {
        View::Dashboard => render_dashboard(f, chunks[1], app),
        View::Maintenance => render_maintenance(f, chunks[1], app),
        View::Mortgage => render_mortgage(f, chunks[1], app),
        View::Renovation => render_renovation(f, chunks[1], app),
        View::Rental => render_rental(f, chunks[1], app),
        View::Selling => render_selling(f, chunks[1], app),
        View::Advisor => render_advisor(f, chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);
}

fn panel(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(format!(" {} ", title))
}

fn heading() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

fn label_value(label: &str, value: String, value_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {}: ", label), heading()),
        Span::styled(value, value_style),
    ])
}

fn render_header(f: &mut Frame, area: Rect, app: &HomeHub) {
    let mut tab_spans = vec![Span::styled(
        " HomeHub ",
        Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];

    for (i, view) in View::ALL.iter().enumerate() {
        tab_spans.push(Span::raw(if i == 0 { "  " } else { " │ " }));

        let style = if *view == app.view {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        tab_spans.push(Span::styled(format!("{} {}", i + 1, view.label()), style));
    }

    if app.agent_match.notification_visible(Instant::now()) {
        tab_spans.push(Span::raw("  "));
        tab_spans.push(Span::styled(
            " ✔ Agent Matched! Sarah Miller is ready to help you sell. ",
            Style::default().fg(Color::White).bg(Color::Green).add_modifier(Modifier::BOLD),
        ));
    }

    let header = Paragraph::new(vec![Line::from(tab_spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &HomeHub) {
    let key = |k: &str| Span::styled(k.to_string(), Style::default().fg(Color::Yellow));

    let mut spans = vec![Span::styled(format!(" {} ", app.view.title()), Style::default().fg(Color::Cyan))];
    spans.push(Span::raw(" | "));
    spans.push(key("Tab"));
    spans.push(Span::raw(" Panel | "));

    match app.view {
        View::Maintenance => {
            spans.extend([key("↑/↓"), Span::raw(" Nav | "), key("Space"), Span::raw(" Toggle | "), key("f"), Span::raw(" Filter | ")]);
        }
        View::Renovation if app.estimate.is_some() => {
            spans.extend([key("←/→"), Span::raw(" Budget | "), key("b"), Span::raw(" Back | ")]);
        }
        View::Renovation => {
            spans.extend([key("↑/↓"), Span::raw(" Nav | "), key("Enter"), Span::raw(" Select | ")]);
        }
        View::Rental => {
            spans.extend([key("↑/↓"), Span::raw(" Field | "), key("0-9"), Span::raw(" Edit | ")]);
        }
        View::Selling => {
            spans.extend([key("m"), Span::raw(" Match | "), key("r"), Span::raw(" Reset | ")]);
        }
        View::Advisor => {
            spans.extend([key("Enter"), Span::raw(" Send | ")]);
            if !app.advisor_online {
                spans.push(Span::styled("offline ", Style::default().fg(Color::Red)));
                spans.push(Span::raw("| "));
            }
        }
        View::Dashboard | View::Mortgage => {
            spans.extend([key("1-7"), Span::raw(" Jump | ")]);
        }
    }

    if app.view.captures_text() {
        spans.push(Span::styled("Esc", Style::default().fg(Color::Red)));
    } else {
        spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    }
    spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

// ============================================================================
// DASHBOARD
// ============================================================================

fn render_dashboard(f: &mut Frame, area: Rect, app: &HomeHub) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Min(0)])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(columns[1]);

    // Hero
    let home = &app.home;
    let (low, high) = home.value_range();
    let hero = vec![
        Line::from(Span::styled(
            format!("  {}", home.address),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(format!("  {}", home.summary_line()), Style::default().fg(Color::DarkGray))),
        Line::from(""),
        Line::from(vec![
            Span::styled("  ESTIMATED VALUE  ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format_currency(home.current_value),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!("↗ {} (1Y)", format_percent(home.one_year_change_pct())),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("  Low: {}", format_currency(low)), Style::default().fg(Color::DarkGray)),
            Span::raw("    "),
            Span::styled(format!("High: {}", format_currency(high)), Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(Span::styled(
            format!(
                "  Up {} since purchase · {}/sqft",
                format_currency(home.appreciation()),
                format_currency(home.price_per_sqft())
            ),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    f.render_widget(Paragraph::new(hero).block(panel("Dashboard")), left[0]);

    // Value trend
    let history = home::value_history();
    let floor = history.iter().map(|p| p.value).fold(f64::INFINITY, f64::min);
    let data: Vec<u64> = history.iter().map(|p| (p.value - floor + 1000.0).max(0.0) as u64).collect();
    let months: Vec<&str> = history.iter().map(|p| p.month.as_str()).collect();
    let sparkline = Sparkline::default()
        .block(panel(&format!("Value Trend · Last 12 Months ({})", months.join(" "))))
        .data(&data)
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(sparkline, left[1]);

    // Value drivers
    let drivers: Vec<Line> = home::value_drivers()
        .into_iter()
        .map(|d| {
            Line::from(vec![
                Span::styled(format!("  {:<16}", d.label), Style::default().fg(Color::DarkGray)),
                Span::styled(d.rating, Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(drivers).block(panel("Value Drivers")), right[0]);

    // Comps
    let rows = home::sample_comps().into_iter().map(|comp| {
        Row::new(vec![
            Cell::from(comp.address),
            Cell::from(format!("{} sqft • {}bd/{}ba", group_thousands(comp.sqft as i64), comp.beds, comp.baths)),
            Cell::from(format_currency(comp.sold_price)).style(Style::default().fg(Color::Cyan)),
            Cell::from(comp.sold_ago).style(Style::default().fg(Color::DarkGray)),
        ])
    });
    let table = Table::new(
        rows,
        [Constraint::Length(15), Constraint::Length(20), Constraint::Length(10), Constraint::Min(8)],
    )
    .block(panel("Neighborhood Comps"));
    f.render_widget(table, right[1]);
}

// ============================================================================
// MAINTENANCE
// ============================================================================

fn render_maintenance(f: &mut Frame, area: Rect, app: &HomeHub) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let score = app.checklist.health_score();
    let gauge = Gauge::default()
        .block(panel("Home Health Score · based on completed tasks"))
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(score.round().clamp(0.0, 100.0) as u16)
        .label(format!("{}% Optimized", score.round() as i64));
    f.render_widget(gauge, chunks[0]);

    let mut filter_spans = vec![Span::raw("  ")];
    for filter in [TaskFilter::All, TaskFilter::Pending, TaskFilter::Completed] {
        let style = if filter == app.task_filter {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        filter_spans.push(Span::styled(filter.as_str(), style));
        filter_spans.push(Span::raw("   "));
    }
    filter_spans.push(Span::styled(
        format!("pending cost {}", format_currency(app.checklist.pending_cost())),
        Style::default().fg(Color::DarkGray),
    ));
    f.render_widget(Paragraph::new(Line::from(filter_spans)), chunks[1]);

    let tasks = app.visible_tasks();
    if tasks.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled("  No tasks found.", Style::default().fg(Color::DarkGray))))
            .block(panel("Maintenance"));
        f.render_widget(empty, chunks[2]);
        return;
    }

    let header = Row::new(["", "Task", "Impact", "Due", "Category", "Est."].iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    }))
    .style(Style::default().bg(Color::DarkGray))
    .height(1);

    let rows = tasks.iter().map(|task| {
        let (mark, title_style) = if task.is_completed {
            ("✔", Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT))
        } else {
            ("○", Style::default().fg(Color::White))
        };
        let impact_color = match task.impact {
            Impact::High => Color::Red,
            Impact::Medium => Color::Yellow,
            Impact::Low => Color::Green,
        };
        let cost = if task.estimated_cost > 0.0 {
            format!("{} est.", format_currency(task.estimated_cost))
        } else {
            String::new()
        };

        Row::new(vec![
            Cell::from(mark).style(Style::default().fg(if task.is_completed { Color::Green } else { Color::DarkGray })),
            Cell::from(task.title.clone()).style(title_style),
            Cell::from(format!("{} Impact", task.impact.as_str())).style(Style::default().fg(impact_color)),
            Cell::from(task.due_date.to_string()),
            Cell::from(task.category.as_str()),
            Cell::from(cost).style(Style::default().fg(Color::DarkGray)),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(2),
            Constraint::Length(24),
            Constraint::Length(14),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Min(10),
        ],
    )
    .header(header)
    .block(panel("Maintenance"))
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("→ ");

    let mut state = TableState::default();
    state.select(Some(app.task_cursor));
    f.render_stateful_widget(table, chunks[2], &mut state);
}

// ============================================================================
// MORTGAGE
// ============================================================================

fn render_mortgage(f: &mut Frame, area: Rect, app: &HomeHub) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let mortgage = &app.mortgage;
    let breakdown = app.equity_breakdown();
    let white = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

    let stats = vec![
        Line::from(""),
        label_value("Balance", format_currency(mortgage.balance), white),
        label_value("Rate", format_percent(mortgage.interest_rate), white),
        label_value("Monthly", format!("{} (Principal & Interest)", format_currency(mortgage.monthly_payment)), white),
        label_value(
            "Equity",
            format_currency(breakdown.equity),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        label_value(
            "Loan",
            format!("{} · {} years from {}", mortgage.lender, mortgage.term_years, mortgage.start_date),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    f.render_widget(Paragraph::new(stats).block(panel("Mortgage")), chunks[0]);

    let ratio = (breakdown.equity_pct / 100.0).clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .block(panel(&format!("Equity Breakdown · Total Value {}", format_currency(breakdown.home_value))))
        .gauge_style(Style::default().fg(Color::Green).bg(Color::Red))
        .ratio(ratio)
        .label(format!(
            "Equity {} | Loan Balance {}",
            format_currency(breakdown.equity),
            format_currency(breakdown.balance)
        ));
    f.render_widget(gauge, chunks[1]);

    let outlook = mortgage.refinance_outlook(MARKET_RATE_PCT);
    let refi = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(format!("  {}", outlook.message()), Style::default().fg(Color::Blue))),
    ])
    .wrap(ratatui::widgets::Wrap { trim: false })
    .block(panel("Refinance Opportunity"));
    f.render_widget(refi, chunks[2]);
}

// ============================================================================
// RENOVATION
// ============================================================================

fn render_renovation(f: &mut Frame, area: Rect, app: &HomeHub) {
    let estimate = match &app.estimate {
        Some(estimate) => estimate,
        None => {
            let header = Row::new(["Project", "Est. Cost", "ROI", "Description"].iter().map(|h| {
                Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            }))
            .style(Style::default().bg(Color::DarkGray))
            .height(1);

            let rows = app.projects.iter().map(|p| {
                Row::new(vec![
                    Cell::from(p.name.clone()),
                    Cell::from(format!("{} - {}", format_currency(p.cost_min), format_currency(p.cost_max))),
                    Cell::from(format!("{} ROI", format_percent(p.roi_pct))).style(Style::default().fg(Color::Green)),
                    Cell::from(p.description.clone()).style(Style::default().fg(Color::DarkGray)),
                ])
            });

            let table = Table::new(
                rows,
                [Constraint::Length(30), Constraint::Length(20), Constraint::Length(9), Constraint::Min(20)],
            )
            .header(header)
            .block(panel("Renovation ROI · select a project to estimate costs and value impact"))
            .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
            .highlight_symbol("→ ");

            let mut state = TableState::default();
            state.select(Some(app.project_cursor));
            f.render_stateful_widget(table, area, &mut state);
            return;
        }
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Length(3), Constraint::Length(6), Constraint::Min(0)])
        .split(area);

    let project = &estimate.project;
    let intro = vec![
        Line::from(Span::styled(format!("  {}", project.name), Style::default().fg(Color::White).add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(format!("  {}", project.description), Style::default().fg(Color::DarkGray))),
        Line::from(Span::styled("  ← back with b", Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))),
    ];
    f.render_widget(Paragraph::new(intro).block(panel("Renovation ROI")), chunks[0]);

    let floor = project.budget_floor();
    let span = project.budget_max() - floor;
    let ratio = if span > 0.0 { ((estimate.budget() - floor) / span).clamp(0.0, 1.0) } else { 0.0 };
    let slider = Gauge::default()
        .block(panel(&format!("Your Planned Budget: {}", format_currency(estimate.budget()))))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(ratio)
        .label(format!("Low {}  ·  High {}", format_currency(floor), format_currency(project.budget_max())));
    f.render_widget(slider, chunks[1]);

    let result = vec![
        Line::from(""),
        label_value(
            "Est. Value Added",
            format!("+{}", format_currency(estimate.value_added())),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        label_value(
            "New Home Value",
            format_currency(estimate.new_home_value(app.home.current_value)),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
    ];
    f.render_widget(Paragraph::new(result).block(panel("Estimate")), chunks[2]);

    let tip = Paragraph::new(Line::from(Span::styled(format!("  {}", estimate.tip()), Style::default().fg(Color::Blue))))
        .wrap(ratatui::widgets::Wrap { trim: false })
        .block(panel("Tip"));
    f.render_widget(tip, chunks[3]);
}

// ============================================================================
// RENTAL
// ============================================================================

fn render_rental(f: &mut Frame, area: Rect, app: &HomeHub) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Length(7), Constraint::Min(0)])
        .split(area);

    let flow = app.cash_flow();
    let color = if flow.is_positive() { Color::Green } else { Color::Red };
    let hero = vec![
        Line::from(Span::styled("  Estimated Monthly Cash Flow", Style::default().fg(Color::DarkGray))),
        Line::from(Span::styled(
            format!("  {}", flow.monthly_display()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("  Based on current mortgage of ${}/mo", round_dollars(app.mortgage.monthly_payment)),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    f.render_widget(Paragraph::new(hero).block(panel("Rental Potential")), chunks[0]);

    let selected = app.selected_rental_field();
    let mut inputs = vec![Line::from("")];
    for field in RentalField::ALL {
        let is_selected = field == selected;
        let marker = if is_selected { "→ " } else { "  " };
        let value_style = if is_selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let cursor = if is_selected { "▏" } else { "" };
        inputs.push(Line::from(vec![
            Span::styled(format!("  {}{:<28}", marker, field.label()), heading()),
            Span::styled(format!("{}{}", app.rental_buffer(field), cursor), value_style),
        ]));
    }
    f.render_widget(Paragraph::new(inputs).block(panel("Calculator Inputs")), chunks[1]);

    let comps = rental::nearby_rentals();
    let nearby = vec![
        Line::from(""),
        label_value(&comps.label, format!("{}/mo", format_currency(comps.average_rent)), Style::default().fg(Color::White)),
        label_value("Occupancy Rate", format_percent(comps.occupancy_pct), Style::default().fg(Color::White)),
        Line::from(""),
        label_value(
            "Annual NOI",
            format_currency(flow.net_operating_income),
            Style::default().fg(Color::DarkGray),
        ),
        label_value(
            "Annual Cash Flow",
            format_currency(flow.annual_cash_flow),
            Style::default().fg(color),
        ),
    ];
    f.render_widget(Paragraph::new(nearby).block(panel("Nearby Rentals")), chunks[2]);
}

// ============================================================================
// SELLING
// ============================================================================

fn render_selling(f: &mut Frame, area: Rect, app: &HomeHub) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(64), Constraint::Percentage(36)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(3), Constraint::Length(4)])
        .split(columns[0]);

    let agent_lines = match app.agent_match.status() {
        AgentStatus::Unassigned => vec![
            Line::from(""),
            Line::from(Span::styled("  Find Your Perfect Selling Agent", Style::default().fg(Color::White).add_modifier(Modifier::BOLD))),
            Line::from(""),
            Line::from(Span::styled(
                "  We analyze local sales data to match you with top-performing agents",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled("  who specialize in properties like yours.", Style::default().fg(Color::DarkGray))),
            Line::from(""),
            Line::from(vec![
                Span::raw("  Press "),
                Span::styled("m", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
                Span::raw(" to match me with an agent"),
            ]),
        ],
        AgentStatus::Matching => vec![
            Line::from(""),
            Line::from(Span::styled("  ⟳ Matching with Local Experts...", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))),
            Line::from(""),
            Line::from(Span::styled(
                "  Analyzing recent sales to find the agent with the highest success rate for your home type.",
                Style::default().fg(Color::DarkGray),
            )),
        ],
        AgentStatus::Assigned => match app.agent_match.agent() {
            Some(agent) => vec![
                Line::from(Span::styled("  VERIFIED EXPERT", Style::default().fg(Color::Cyan))),
                Line::from(Span::styled(format!("  {} · {}", agent.name, agent.title), Style::default().fg(Color::White).add_modifier(Modifier::BOLD))),
                Line::from(Span::styled(
                    format!("  {} · ★ {} ({} reviews)", agent.company, agent.rating, agent.reviews),
                    Style::default().fg(Color::Yellow),
                )),
                label_value("Experience", agent.experience.clone(), Style::default().fg(Color::White)),
                label_value("Specialty", agent.specialty.clone(), Style::default().fg(Color::White)),
                label_value("Avg. Sale Price in Zip", agent.performance.avg_sale_price.clone(), Style::default().fg(Color::White)),
                label_value(
                    "Avg. Days on Market",
                    format!("{} Days", agent.performance.avg_days_on_market),
                    Style::default().fg(Color::Green),
                ),
                label_value("Final Sale vs List", agent.performance.above_list_price.clone(), Style::default().fg(Color::Cyan)),
                Line::from(Span::styled(
                    "  Next Step: Schedule a free in-home consultation. (r to start over)",
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
                )),
            ],
            None => Vec::new(),
        },
    };
    f.render_widget(Paragraph::new(agent_lines).block(panel("Selling Guide & Agent Match")), left[0]);

    let timing = selling::market_timing();
    let gauge = Gauge::default()
        .block(panel("Market Timing · Wait ◀ ▶ Sell"))
        .gauge_style(Style::default().fg(Color::Yellow))
        .ratio(timing.position.clamp(0.0, 1.0))
        .label(timing.label.clone());
    f.render_widget(gauge, left[1]);

    let summary = Paragraph::new(Line::from(Span::styled(format!("  {}", timing.summary), Style::default().fg(Color::DarkGray))))
        .wrap(ratatui::widgets::Wrap { trim: false });
    f.render_widget(summary, left[2]);

    let mut steps = vec![Line::from("")];
    for step in selling::presale_checklist() {
        let (mark, style) = if step.done {
            ("[✔]", Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT))
        } else {
            ("[ ]", Style::default().fg(Color::White))
        };
        steps.push(Line::from(vec![
            Span::styled(format!("  {} ", mark), Style::default().fg(Color::Green)),
            Span::styled(step.text, style),
        ]));
    }
    f.render_widget(Paragraph::new(steps).block(panel("Pre-Sale Checklist")), columns[1]);
}

// ============================================================================
// ADVISOR
// ============================================================================

fn render_advisor(f: &mut Frame, area: Rect, app: &HomeHub) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let width = chunks[0].width.saturating_sub(8).max(10) as usize;
    let mut lines: Vec<Line> = Vec::new();

    for message in app.transcript.messages() {
        let (tag, style) = match message.sender {
            ChatSender::User => ("You", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            ChatSender::Advisor => ("Advisor", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        };
        lines.push(Line::from(Span::styled(format!("  {}", tag), style)));
        for paragraph in message.text.lines() {
            for line in wrap_text(paragraph, width) {
                lines.push(Line::from(format!("    {}", line)));
            }
        }
        lines.push(Line::from(""));
    }

    if app.awaiting_reply {
        lines.push(Line::from(Span::styled(
            "  Advisor is thinking...",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    // Keep the newest message in view
    let visible = chunks[0].height.saturating_sub(2) as usize;
    let scroll = lines.len().saturating_sub(visible) as u16;

    let transcript = Paragraph::new(lines).block(panel("Home Advisor (AI)")).scroll((scroll, 0));
    f.render_widget(transcript, chunks[0]);

    let input_style = if app.awaiting_reply {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };
    let prompt = if app.chat_input.is_empty() {
        Span::styled("Ask about your home...", Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))
    } else {
        Span::styled(format!("{}▏", app.chat_input), input_style)
    };
    let mut input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    if let Some(notice) = app.advisor_notice() {
        input_block = input_block.title(Span::styled(
            format!(" ⚠ {} ", notice),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }
    let input = Paragraph::new(Line::from(vec![Span::raw(" "), prompt])).block(input_block);
    f.render_widget(input, chunks[1]);
}

/// Greedy word wrap into lines no longer than `width` characters.
/// The transcript wraps up front so the scroll offset can count real rows.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        let needed = if current_line.is_empty() { word.chars().count() } else { current_line.chars().count() + 1 + word.chars().count() };
        if needed <= width || current_line.is_empty() {
            if !current_line.is_empty() {
                current_line.push(' ');
            }
            current_line.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current_line));
            current_line.push_str(word);
        }
    }

    if !current_line.is_empty() || lines.is_empty() {
        lines.push(current_line);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_respects_width() {
        let lines = wrap_text("Clean the gutters before the first freeze of the season", 20);
        assert!(lines.iter().all(|l| l.chars().count() <= 20));
        assert_eq!(lines.join(" "), "Clean the gutters before the first freeze of the season");
    }

    #[test]
    fn test_wrap_text_keeps_long_words() {
        let lines = wrap_text("supercalifragilistic ok", 5);
        assert_eq!(lines, vec!["supercalifragilistic", "ok"]);
    }

    #[test]
    fn test_wrap_text_empty() {
        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }
}
