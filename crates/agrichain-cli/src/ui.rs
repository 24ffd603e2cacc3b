use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::{Frame, Terminal};

use agrichain_core::agents::{AgentId, AgentRegistry, AgentSpec};
use agrichain_core::state::{
    derive_card_phase, CardPhase, LogLevel, LogSource, RunState, Stage, TaskStatus, UiTheme,
};
use agrichain_driver::session::RunSession;

pub struct UiOptions {
    pub theme: UiTheme,
    pub request: String,
}

struct TuiGuard;

impl Drop for TuiGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
    }
}

pub fn run(session: RunSession, options: UiOptions) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, crossterm::cursor::Hide)?;
    let _guard = TuiGuard; // Ensures terminal is restored on exit or panic

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    run_app(&mut terminal, session, options).map_err(|e| e.into())
}

struct AppView {
    session: RunSession,
    theme: UiTheme,
    input: String,
    default_request: String,
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    session: RunSession,
    options: UiOptions,
) -> io::Result<()> {
    let mut app = AppView {
        session,
        theme: options.theme,
        input: options.request.clone(),
        default_request: options.request,
    };

    loop {
        app.session.drain();
        terminal.draw(|f| draw(f, &app))?;

        if event::poll(Duration::from_millis(16))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key(&mut app, key.code, key.modifiers) {
                    return Ok(());
                }
            }
        }
    }
}

fn is_processing(stage: Stage) -> bool {
    matches!(
        stage,
        Stage::Planning | Stage::Fetching | Stage::Analyzing | Stage::Monitoring | Stage::Reporting
    )
}

// Returns true to exit. While a run is live the printable keys act as
// commands; otherwise they edit the request line.
fn handle_key(app: &mut AppView, code: KeyCode, modifiers: KeyModifiers) -> bool {
    let stage = app.session.state().stage;
    match (code, modifiers) {
        (KeyCode::Esc, _) => return true,
        (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => return true,
        (KeyCode::Char('t'), m) if m.contains(KeyModifiers::CONTROL) => {
            app.theme = app.theme.next();
        }
        (KeyCode::Char('r'), m) if m.contains(KeyModifiers::CONTROL) => reset(app),
        (KeyCode::Char('y'), m) if m.contains(KeyModifiers::CONTROL) => copy_report(app),
        (KeyCode::Enter, _) if !is_processing(stage) => {
            let request = app.input.trim().to_string();
            if !request.is_empty() {
                app.session.start(request);
            }
        }
        (KeyCode::Backspace, _) if !is_processing(stage) => {
            app.input.pop();
        }
        (KeyCode::Char(c), m) if !is_processing(stage) && !m.contains(KeyModifiers::CONTROL) => {
            app.input.push(c);
        }
        (KeyCode::Char('p'), _) if stage == Stage::Monitoring => app.session.toggle_monitor(),
        (KeyCode::Char('g'), _) if stage == Stage::Monitoring => app.session.generate_report(),
        (KeyCode::Char('r'), _) if is_processing(stage) => reset(app),
        (KeyCode::Char('q'), _) if is_processing(stage) => return true,
        _ => {}
    }
    false
}

fn reset(app: &mut AppView) {
    app.session.reset();
    app.input = app.default_request.clone();
}

fn copy_report(app: &mut AppView) {
    let Some(report) = app.session.state().report.clone() else {
        return;
    };
    let Ok(text) = serde_json::to_string_pretty(&report) else {
        return;
    };
    if let Ok(mut clipboard) = arboard::Clipboard::new() {
        if clipboard.set_text(text).is_ok() {
            app.session.note(
                LogLevel::Info,
                LogSource::Ui,
                "report copied to clipboard".to_string(),
            );
        }
    }
}

fn theme_color(theme: UiTheme) -> Color {
    match theme {
        UiTheme::Classic => Color::Green,
        UiTheme::Harvest => Color::LightYellow,
        UiTheme::Monsoon => Color::LightBlue,
    }
}

fn draw(f: &mut Frame, app: &AppView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(14),
            Constraint::Length(6),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_header(f, chunks[0], app);
    draw_input(f, chunks[1], app);
    draw_cards(f, chunks[2], app);
    draw_logs(f, chunks[3], app);
    draw_footer(f, chunks[4], app);
}

fn draw_header(f: &mut Frame, area: Rect, app: &AppView) {
    let accent = theme_color(app.theme);
    let state = app.session.state();
    let lines = vec![
        Line::from(Span::styled(
            "AgriChain AI",
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(
                "Multi-Agent Agricultural Analysis System",
                Style::default().fg(Color::Gray),
            ),
            Span::raw("  ·  "),
            Span::styled(state.stage.label(), Style::default().fg(accent)),
        ]),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn draw_input(f: &mut Frame, area: Rect, app: &AppView) {
    let state = app.session.state();
    let processing = is_processing(state.stage);
    let (text, style) = if processing {
        (
            format!("{}  (processing)", state.request_text),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (app.input.clone(), Style::default())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title("Request");
    f.render_widget(Paragraph::new(Span::styled(text, style)).block(block), area);
}

fn draw_cards(f: &mut Frame, area: Rect, app: &AppView) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(34),
            Constraint::Percentage(33),
        ])
        .split(area);

    let pairs = [
        (AgentId::Planner, AgentId::DataFetcher),
        (AgentId::Analyzer, AgentId::RiskMonitor),
        (AgentId::ReportGenerator, AgentId::Memory),
    ];
    for (column, (top, bottom)) in columns.iter().zip(pairs) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(*column);
        draw_card(f, rows[0], app, AgentRegistry::get(top));
        draw_card(f, rows[1], app, AgentRegistry::get(bottom));
    }
}

fn draw_card(f: &mut Frame, area: Rect, app: &AppView, spec: &AgentSpec) {
    let state = app.session.state();
    let phase = derive_card_phase(spec.active_stages, state.stage);
    let border = match phase {
        CardPhase::Active => theme_color(app.theme),
        CardPhase::Done => Color::Green,
        CardPhase::Upcoming => Color::DarkGray,
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(
            spec.title,
            Style::default().add_modifier(Modifier::BOLD),
        ));
    let paragraph = Paragraph::new(card_lines(spec.id, state, app.theme))
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn placeholder(text: &str) -> Vec<Line<'static>> {
    vec![Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::DarkGray),
    ))]
}

fn status_span(status: TaskStatus, theme: UiTheme) -> Span<'static> {
    match status {
        TaskStatus::Complete => Span::styled("✔ ", Style::default().fg(Color::Green)),
        TaskStatus::Active => Span::styled("➤ ", Style::default().fg(theme_color(theme))),
        TaskStatus::Pending => Span::styled("… ", Style::default().fg(Color::DarkGray)),
    }
}

fn card_lines(id: AgentId, state: &RunState, theme: UiTheme) -> Vec<Line<'static>> {
    match id {
        AgentId::Planner => {
            if state.plan.is_empty() {
                return placeholder("Awaiting user request...");
            }
            state
                .plan
                .iter()
                .map(|task| {
                    Line::from(vec![
                        Span::styled("✔ ", Style::default().fg(Color::Green)),
                        Span::raw(task.clone()),
                    ])
                })
                .collect()
        }
        AgentId::DataFetcher => {
            if state.fetch_items.is_empty() {
                return placeholder("Waiting for plan...");
            }
            state
                .fetch_items
                .iter()
                .map(|item| {
                    Line::from(vec![status_span(item.status, theme), Span::raw(item.label.clone())])
                })
                .collect()
        }
        AgentId::Analyzer => {
            if state.analysis_items.is_empty() {
                return placeholder("Waiting for data...");
            }
            state
                .analysis_items
                .iter()
                .map(|item| {
                    Line::from(vec![status_span(item.status, theme), Span::raw(item.label.clone())])
                })
                .collect()
        }
        AgentId::RiskMonitor => {
            let mut lines = vec![Line::from(Span::styled(
                state.monitor_status.clone(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ))];
            if state.stage == Stage::Monitoring {
                if state.monitor_paused {
                    lines.push(Line::from(Span::styled(
                        "(paused)",
                        Style::default().fg(Color::DarkGray),
                    )));
                }
                lines.push(Line::from(Span::styled(
                    "p pause/resume · g generate report",
                    Style::default().fg(Color::DarkGray),
                )));
            }
            lines
        }
        AgentId::ReportGenerator => {
            let Some(report) = state.report.as_ref() else {
                return placeholder("Waiting for analysis completion...");
            };
            let mut lines = vec![
                Line::from(Span::styled(
                    format!("Location: {}", report.location),
                    Style::default().fg(Color::Green),
                )),
                Line::from(format!("Crop Health: {}", report.crop_health)),
                Line::from(format!("Pest Risk: {}", report.pest_risk)),
                Line::from(format!("Forecast: {}", report.rainfall_forecast)),
                Line::from(Span::styled(
                    "Recommendations:",
                    Style::default().add_modifier(Modifier::BOLD),
                )),
            ];
            for recommendation in &report.recommendations {
                lines.push(Line::from(format!("- {recommendation}")));
            }
            lines
        }
        AgentId::Memory => {
            if state.history.is_empty() {
                return placeholder("No completed analyses yet.");
            }
            // Most recent first; the stored order stays append order.
            state
                .history
                .iter()
                .rev()
                .map(|entry| Line::from(format!("• {}", entry.summary)))
                .collect()
        }
    }
}

fn draw_logs(f: &mut Frame, area: Rect, app: &AppView) {
    let logs = app.session.logs();
    let visible = area.height.saturating_sub(2) as usize;
    let skip = logs.len().saturating_sub(visible);
    let lines: Vec<Line> = logs
        .iter()
        .skip(skip)
        .map(|entry| {
            let level_color = match entry.level {
                LogLevel::Info => Color::DarkGray,
                LogLevel::Warn => Color::Yellow,
                LogLevel::Error => Color::Red,
            };
            Line::from(vec![
                Span::styled(
                    format!("[{}] ", entry.level.label()),
                    Style::default().fg(level_color),
                ),
                Span::raw(entry.message.clone()),
            ])
        })
        .collect();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title("Activity");
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_footer(f: &mut Frame, area: Rect, app: &AppView) {
    let state = app.session.state();
    let line = match state.stage {
        Stage::Error => Line::from(Span::styled(
            state
                .last_error
                .as_deref()
                .unwrap_or("Unknown error")
                .to_string(),
            Style::default().fg(Color::Red),
        )),
        Stage::Monitoring => Line::from(Span::styled(
            "p pause/resume · g report · r reset · q quit",
            Style::default().fg(Color::DarkGray),
        )),
        stage if is_processing(stage) => Line::from(Span::styled(
            "r reset · q quit",
            Style::default().fg(Color::DarkGray),
        )),
        Stage::Complete => Line::from(Span::styled(
            "type to edit · Enter start again · Ctrl-Y copy report · Esc quit",
            Style::default().fg(Color::DarkGray),
        )),
        _ => Line::from(Span::styled(
            "type to edit · Enter start · Ctrl-T theme · Esc quit",
            Style::default().fg(Color::DarkGray),
        )),
    };
    f.render_widget(Paragraph::new(line), area);
}
