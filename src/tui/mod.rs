//! Ratatui-based terminal UI.
//!
//! The TUI provides an input panel with the bank name and four ratio sliders,
//! a Calculate action, the metrics summary, the recommendation, and a
//! sensitivity chart for the selected ratio.

use std::fs::create_dir_all;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};
use tracing::{debug, info};

use crate::app::pipeline::{Adjustment, Assessment, assess};
use crate::domain::{DashboardConfig, MetricKind, StabilityStatus};
use crate::error::AppError;
use crate::report::Severity;
use crate::scoring::{AT_RISK_THRESHOLD, STABLE_THRESHOLD, sensitivity};

mod plotters_chart;

use plotters_chart::SensitivityChart;

/// Directory that `e` writes assessment files into.
const EXPORT_DIR: &str = "exports";

/// Field order in the input panel.
const FIELD_BANK_NAME: usize = 0;
const FIELD_CALCULATE: usize = 5;

/// Start the TUI.
///
/// `adjustments` are the start values that were clamped during validation;
/// they are reported in the status line since stderr isn't visible here.
pub fn run(config: DashboardConfig, chart_points: usize, adjustments: &[Adjustment]) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::runtime(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(config, chart_points);
    app.note_clamped_start(adjustments);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::runtime(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::runtime(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    config: DashboardConfig,
    name_input: String,
    selected_field: usize,
    editing_name: bool,
    /// Metric shown in the sensitivity chart; follows the selected slider.
    chart_metric: MetricKind,
    chart_points: usize,
    status: String,
    assessment: Option<Assessment>,
    /// Inputs changed since the last calculation.
    stale: bool,
}

impl App {
    /// `config` must already have passed `pipeline::validate_inputs`.
    fn new(config: DashboardConfig, chart_points: usize) -> Self {
        Self {
            name_input: config.bank_name.clone(),
            config,
            selected_field: 1,
            editing_name: false,
            chart_metric: MetricKind::CapitalAdequacy,
            chart_points,
            status: "Adjust the inputs, then press c to calculate stability.".to_string(),
            assessment: None,
            stale: false,
        }
    }

    fn note_clamped_start(&mut self, adjustments: &[Adjustment]) {
        if adjustments.is_empty() {
            return;
        }
        let parts: Vec<String> = adjustments
            .iter()
            .map(|a| format!("{} {} -> {}", a.metric.short_name(), a.requested, a.applied))
            .collect();
        self.status = format!("Clamped to slider range: {}", parts.join(", "));
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::runtime(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::runtime(format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::runtime(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the app should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing_name {
            self.handle_name_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => {
                if self.selected_field > 0 {
                    self.selected_field -= 1;
                }
                self.follow_selection();
            }
            KeyCode::Down => {
                if self.selected_field < FIELD_CALCULATE {
                    self.selected_field += 1;
                }
                self.follow_selection();
            }
            KeyCode::Left => self.adjust_selected(-1),
            KeyCode::Right => self.adjust_selected(1),
            KeyCode::PageDown => self.adjust_selected(-10),
            KeyCode::PageUp => self.adjust_selected(10),
            KeyCode::Enter => match self.selected_field {
                FIELD_BANK_NAME => {
                    self.editing_name = true;
                    self.status = "Editing bank name. Enter to apply, Esc to cancel.".to_string();
                }
                FIELD_CALCULATE => self.calculate(),
                _ => {}
            },
            KeyCode::Char('c') => self.calculate(),
            KeyCode::Char('x') => {
                self.config.metrics = Default::default();
                self.mark_stale();
                self.status = "Inputs reset to defaults.".to_string();
            }
            KeyCode::Char('e') => self.export(),
            _ => {}
        }

        false
    }

    fn handle_name_edit(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.editing_name = false;
                self.name_input = self.config.bank_name.clone();
                self.status = "Name edit canceled.".to_string();
            }
            KeyCode::Enter => {
                self.editing_name = false;
                self.config.bank_name = self.name_input.trim().to_string();
                self.mark_stale();
                self.status = format!("Bank name: {}", self.config.display_bank_name());
            }
            KeyCode::Backspace => {
                self.name_input.pop();
            }
            KeyCode::Char(c) => {
                if !c.is_control() {
                    self.name_input.push(c);
                }
            }
            _ => {}
        }
    }

    fn selected_metric(&self) -> Option<MetricKind> {
        match self.selected_field {
            1..=4 => Some(MetricKind::ALL[self.selected_field - 1]),
            _ => None,
        }
    }

    fn follow_selection(&mut self) {
        if let Some(metric) = self.selected_metric() {
            self.chart_metric = metric;
        }
    }

    fn adjust_selected(&mut self, steps: i32) {
        let Some(metric) = self.selected_metric() else {
            return;
        };
        let current = self.config.metrics.get(metric);
        let next = metric.bounds().nudge(current, steps);
        if next != current {
            self.config.metrics.set(metric, next);
            self.mark_stale();
        }
        self.status = format!("{}: {next:.1}%", metric.short_name());
    }

    fn mark_stale(&mut self) {
        if self.assessment.is_some() {
            self.stale = true;
        }
    }

    fn calculate(&mut self) {
        match assess(&self.config) {
            Ok(assessment) => {
                debug!(score = assessment.result.score, "recalculated");
                self.status = format!(
                    "Score {:.2} ({})",
                    assessment.result.score, assessment.result.status
                );
                self.assessment = Some(assessment);
                self.stale = false;
            }
            Err(err) => {
                self.status = format!("Error calculating stability: {err}");
            }
        }
    }

    fn export(&mut self) {
        let Some(assessment) = &self.assessment else {
            self.status = "Nothing to export yet; press c to calculate first.".to_string();
            return;
        };
        let dir = PathBuf::from(EXPORT_DIR);
        if let Err(e) = create_dir_all(&dir) {
            self.status = format!("Export failed: could not create {}: {e}", dir.display());
            return;
        }
        let ts = Local::now().format("%Y%m%d_%H%M%S");
        let path = dir.join(format!("bsd_{}_{ts}.json", slug(&assessment.bank_name)));
        match crate::io::write_assessment_json(&path, assessment) {
            Ok(()) => {
                info!(path = %path.display(), "exported from tui");
                self.status = format!("Wrote {}", path.display());
            }
            Err(err) => self.status = format!("Export failed: {err}"),
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let lines = vec![
            Line::from(vec![
                Span::styled(
                    "Bank Stability Dashboard",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(" | {}", self.config.display_bank_name())),
            ]),
            Line::from(Span::styled(
                "Track and assess your bank's stability using advanced metrics.",
                Style::default().fg(Color::Gray),
            )),
        ];
        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(44), Constraint::Min(0)])
            .split(area);

        self.draw_inputs(frame, columns[0]);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Length(6), Constraint::Min(0)])
            .split(columns[1]);

        self.draw_summary(frame, rows[0]);
        self.draw_result(frame, rows[1]);
        self.draw_chart(frame, rows[2]);
    }

    fn draw_inputs(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let name = if self.editing_name {
            format!("Bank Name: {}_", self.name_input)
        } else {
            format!("Bank Name: {}", self.config.display_bank_name())
        };

        let mut items = vec![ListItem::new(name)];
        for metric in MetricKind::ALL {
            let bounds = metric.bounds();
            let value = self.config.metrics.get(metric);
            items.push(ListItem::new(Text::from(vec![
                Line::from(metric.display_name()),
                Line::from(Span::styled(
                    format!("  {} {value:>5.1}", slider_bar(value, bounds.min, bounds.max, 20)),
                    Style::default().fg(Color::Cyan),
                )),
            ])));
        }
        items.push(ListItem::new(Span::styled(
            "[ Calculate Stability ]",
            Style::default().add_modifier(Modifier::BOLD),
        )));

        let list = List::new(items)
            .block(Block::default().title("Input Metrics").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_summary(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Metrics Summary").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(assessment) = &self.assessment else {
            frame.render_widget(
                Paragraph::new("Press c to calculate.").style(Style::default().fg(Color::Yellow)),
                inner,
            );
            return;
        };

        let tiles = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(inner);

        for (tile, rect) in assessment.summary.iter().zip(tiles.iter()) {
            let text = Text::from(vec![
                Line::from(Span::styled(
                    tile.metric.short_name(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(tile.value_label(), Style::default().fg(Color::Cyan))),
                Line::from(Span::styled(tile.hint, Style::default().fg(Color::Gray))),
            ]);
            frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), *rect);
        }
    }

    fn draw_result(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let title = if self.stale {
            "Recommendations (inputs changed; press c)"
        } else {
            "Recommendations"
        };
        let block = Block::default().title(title).borders(Borders::ALL);

        let Some(assessment) = &self.assessment else {
            frame.render_widget(Paragraph::new("").block(block), area);
            return;
        };

        let rec_color = match assessment.recommendation.severity {
            Severity::Success => Color::Green,
            Severity::Warning => Color::Yellow,
            Severity::Critical => Color::Red,
        };
        let lines = vec![
            Line::from(Span::styled(
                assessment.recommendation.message.clone(),
                Style::default().fg(rec_color),
            )),
            Line::from(""),
            Line::from(vec![
                Span::raw("Overall Stability Score: "),
                Span::styled(
                    format!("{:.2}", assessment.result.score),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::raw("Status: "),
                Span::styled(
                    assessment.result.status.label(),
                    Style::default().fg(status_color(assessment.result.status)),
                ),
            ]),
        ];
        let p = Paragraph::new(Text::from(lines))
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(p, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let title = format!("Score vs {}", self.chart_metric.short_name());
        let block = Block::default().title(title).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let sweep = sensitivity(&self.config.metrics, self.chart_metric, self.chart_points);
        let bounds = self.chart_metric.bounds();
        let (lo, hi) = sweep.score_bounds();
        let y_bounds = chart_y_bounds(lo, hi);

        let widget = SensitivityChart {
            curve: &sweep.curve,
            current: sweep.current,
            thresholds: [AT_RISK_THRESHOLD, STABLE_THRESHOLD],
            x_bounds: [bounds.min, bounds.max],
            y_bounds,
            x_label: self.chart_metric.short_name(),
            y_label: "score",
        };
        frame.render_widget(widget, inner);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  PgUp/PgDn ×10  Enter edit/calc  c calculate  x reset  e export  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn status_color(status: StabilityStatus) -> Color {
    match status {
        StabilityStatus::Stable => Color::Green,
        StabilityStatus::AtRisk => Color::Yellow,
        StabilityStatus::Unstable => Color::Red,
    }
}

/// Text slider: `[=====-----]` filled in proportion to `value` within `[min, max]`.
fn slider_bar(value: f64, min: f64, max: f64, width: usize) -> String {
    let u = if max > min { ((value - min) / (max - min)).clamp(0.0, 1.0) } else { 0.0 };
    let filled = (u * width as f64).round() as usize;
    format!("[{}{}]", "=".repeat(filled), "-".repeat(width - filled))
}

/// Y range for the chart: always includes both thresholds, padded by 5%.
fn chart_y_bounds(lo: f64, hi: f64) -> [f64; 2] {
    let mut y_min = lo.min(0.0);
    let mut y_max = hi.max(100.0);
    if !y_min.is_finite() || !y_max.is_finite() || y_max <= y_min {
        y_min = 0.0;
        y_max = 100.0;
    }
    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);
    [y_min - pad, y_max + pad]
}

/// Filesystem-friendly form of a bank name.
fn slug(name: &str) -> String {
    let s: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    let s = s.trim_matches('_').to_string();
    if s.is_empty() { "bank".to_string() } else { s }
}
