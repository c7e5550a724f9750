//! Drawing a session and remembering where its clickable parts landed.

use std::fmt;
use std::time::Instant;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
};
use survey_form::{
    AnswerValue, ClickTarget, DEFAULT_HINT, Focus, FormSession, InferenceStatus, NoticeLevel,
    ProbeReport, QuestionKind, ServiceStatus, SliderQuestion, format_number,
};

use crate::Theme;

/// Visible lines of the instruction field.
const INSTRUCTION_LINES: u16 = 4;
const QUESTION_COLUMN_PERCENT: u16 = 45;
const OPTION_GAP: u16 = 2;
const SLIDER_TRACK: usize = 20;

/// Per-frame inputs to [`draw_form`] that do not live in the session.
#[derive(Debug, Clone, Copy)]
pub struct FormView<'a> {
    /// Used when the form definition has no title of its own.
    pub title: &'a str,
    pub theme: &'a Theme,
    pub now: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OptionHit {
    area: Rect,
    row: usize,
    option: usize,
}

/// Screen areas of the last drawn frame, for resolving mouse presses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitMap {
    instruction: Option<Rect>,
    enhance: Option<Rect>,
    submit: Option<Rect>,
    options: Vec<OptionHit>,
}

impl HitMap {
    /// What a press at `(column, row)` landed on.
    pub fn hit(&self, column: u16, row: u16) -> ClickTarget {
        let position = Position::new(column, row);
        let inside = |area: Option<Rect>| area.is_some_and(|area| area.contains(position));

        if inside(self.instruction) {
            ClickTarget::Instruction
        } else if inside(self.enhance) {
            ClickTarget::Enhance
        } else if inside(self.submit) {
            ClickTarget::Submit
        } else {
            self.options
                .iter()
                .find(|hit| hit.area.contains(position))
                .map_or(ClickTarget::Background, |hit| ClickTarget::Option {
                    row: hit.row,
                    option: hit.option,
                })
        }
    }
}

/// Draw the whole form and return where its clickable parts are.
pub fn draw_form(frame: &mut Frame, session: &FormSession, view: &FormView<'_>) -> HitMap {
    let [header, instruction, enhance, table, submit, status, help] = Layout::vertical([
        Constraint::Length(4),                     // Title and hint
        Constraint::Length(INSTRUCTION_LINES + 2), // Instruction field
        Constraint::Length(1),                     // Enhance button
        Constraint::Min(3),                        // Questions
        Constraint::Length(3),                     // Submit button
        Constraint::Length(1),                     // Status bar
        Constraint::Length(1),                     // Help bar
    ])
    .areas(frame.area());

    let mut hits = HitMap::default();
    draw_header(frame, session, view, header);
    hits.instruction = Some(draw_instruction(frame, session, view.theme, instruction));
    hits.enhance = Some(draw_enhance(frame, session, view.theme, enhance));
    draw_questions(frame, session, view.theme, table, &mut hits.options);
    hits.submit = Some(draw_submit(frame, session, view, submit));
    draw_status(frame, session, view.theme, status);
    draw_help(frame, session, view.theme, help);
    hits
}

fn draw_header(frame: &mut Frame, session: &FormSession, view: &FormView<'_>, area: Rect) {
    let theme = view.theme;
    let definition = session.definition();
    let title = definition.title.as_deref().unwrap_or(view.title);
    let hint = definition.hint.as_deref().unwrap_or(DEFAULT_HINT);

    let header = Paragraph::new(vec![
        Line::styled(
            title.to_string(),
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Line::styled(hint.to_string(), Style::default().fg(theme.text)),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(theme.border)),
    );
    frame.render_widget(header, area);
}

fn draw_instruction(frame: &mut Frame, session: &FormSession, theme: &Theme, area: Rect) -> Rect {
    let active = session.instruction_active();
    let field = session.instruction();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if active { theme.primary } else { theme.border }))
        .title(" System instruction ")
        .title_style(Style::default().fg(if active { theme.highlight } else { theme.text }));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if field.text().is_empty() && !active {
        let placeholder = Paragraph::new("Press Tab or click here to write an instruction")
            .style(Style::default().fg(theme.border));
        frame.render_widget(placeholder, inner);
        return area;
    }

    // Scroll so the cursor stays inside the field
    let (line, col) = field.cursor_line_col();
    let (line, col) = (line as u16, col as u16);
    let scroll_y = line.saturating_sub(inner.height.saturating_sub(1));
    let scroll_x = col.saturating_sub(inner.width.saturating_sub(1));

    let text = Paragraph::new(field.text())
        .style(Style::default().fg(theme.text))
        .scroll((scroll_y, scroll_x));
    frame.render_widget(text, inner);

    if active && inner.width > 0 && inner.height > 0 {
        frame.set_cursor_position((
            inner.x + col.saturating_sub(scroll_x),
            inner.y + line.saturating_sub(scroll_y),
        ));
    }
    area
}

fn draw_enhance(frame: &mut Frame, session: &FormSession, theme: &Theme, area: Rect) -> Rect {
    let (label, style) = if session.enhancement_pending() {
        ("[ Enhancing... ]", Style::default().fg(theme.highlight))
    } else {
        (
            "[ Enhance prompt ]",
            Style::default()
                .fg(theme.secondary)
                .add_modifier(Modifier::BOLD),
        )
    };
    let button = Rect {
        width: (Span::raw(label).width() as u16).min(area.width),
        ..area
    };
    frame.render_widget(Paragraph::new(label).style(style), button);
    button
}

fn draw_questions(
    frame: &mut Frame,
    session: &FormSession,
    theme: &Theme,
    area: Rect,
    hits: &mut Vec<OptionHit>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(" Questions ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let questions = session.questions();
    if questions.is_empty() {
        let empty = Paragraph::new("No questions").style(Style::default().fg(theme.border));
        frame.render_widget(empty, inner);
        return;
    }

    let focused = match session.focus() {
        Focus::Row(row) => Some(row),
        Focus::Submit => None,
    };
    let height = inner.height as usize;
    let offset = scroll_offset(focused, questions.len(), height);

    let [text_column, control_column] = Layout::horizontal([
        Constraint::Percentage(QUESTION_COLUMN_PERCENT),
        Constraint::Fill(1),
    ])
    .spacing(1)
    .areas(inner);

    for (row, question) in questions.iter().enumerate().skip(offset).take(height) {
        let y = inner.y + (row - offset) as u16;
        let is_focused = focused == Some(row);
        let row_style = if is_focused {
            Style::default().bg(theme.selected_bg)
        } else {
            Style::default()
        };

        let marker = if is_focused { "> " } else { "  " };
        let text_style = if is_focused {
            Style::default()
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        };
        let text = Paragraph::new(Span::styled(
            format!("{marker}{}", question.text()),
            text_style,
        ))
        .style(row_style);
        frame.render_widget(text, row_of(text_column, y));

        let control_area = row_of(control_column, y);
        let answer = session.answer(question.id());
        let control = match question.kind() {
            QuestionKind::Radio(choice) => choice_line(
                row,
                &choice.options,
                answer.and_then(AnswerValue::as_label),
                false,
                control_area,
                theme,
                hits,
            ),
            QuestionKind::Toggle(choice) => choice_line(
                row,
                &choice.options,
                answer.and_then(AnswerValue::as_label),
                true,
                control_area,
                theme,
                hits,
            ),
            QuestionKind::Slider(slider) => {
                slider_line(slider, answer.and_then(AnswerValue::as_number), theme)
            }
        };
        frame.render_widget(Paragraph::new(control).style(row_style), control_area);
    }

    if questions.len() > height {
        let scrollbar_area = Rect {
            x: area.x + area.width.saturating_sub(1),
            y: inner.y,
            width: 1,
            height: inner.height,
        };
        let mut scrollbar_state = ScrollbarState::new(questions.len())
            .position(offset)
            .viewport_content_length(height);
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("▲"))
            .end_symbol(Some("▼"))
            .track_symbol(Some("│"))
            .thumb_symbol("█");
        frame.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
    }
}

/// First visible row, keeping the focused row (or the last row, while submit
/// is focused) on screen.
fn scroll_offset(focused: Option<usize>, len: usize, height: usize) -> usize {
    if height == 0 || len <= height {
        return 0;
    }
    let target = focused.unwrap_or(len - 1);
    target.saturating_sub(height - 1)
}

/// Options laid out left to right. Records a hit area for each visible option.
fn choice_line(
    row: usize,
    options: &[String],
    selected: Option<&str>,
    segmented: bool,
    area: Rect,
    theme: &Theme,
    hits: &mut Vec<OptionHit>,
) -> Line<'static> {
    let mut spans = Vec::with_capacity(options.len() * 2);
    let mut x = area.x;

    for (option, label) in options.iter().enumerate() {
        let is_selected = selected == Some(label.as_str());
        let span = match (segmented, is_selected) {
            (true, true) => Span::styled(
                format!("[{label}]"),
                Style::default()
                    .fg(theme.highlight)
                    .add_modifier(Modifier::BOLD),
            ),
            (true, false) => Span::styled(format!(" {label} "), Style::default().fg(theme.text)),
            (false, true) => {
                Span::styled(format!("(●) {label}"), Style::default().fg(theme.highlight))
            }
            (false, false) => Span::styled(format!("( ) {label}"), Style::default().fg(theme.text)),
        };

        let width = span.width() as u16;
        if x < area.right() {
            hits.push(OptionHit {
                area: Rect {
                    x,
                    y: area.y,
                    width: width.min(area.right() - x),
                    height: 1,
                },
                row,
                option,
            });
        }
        x = x.saturating_add(width + OPTION_GAP);

        spans.push(span);
        spans.push(Span::raw(" ".repeat(OPTION_GAP as usize)));
    }

    Line::from(spans)
}

fn slider_line(slider: &SliderQuestion, value: Option<f64>, theme: &Theme) -> Line<'static> {
    let value = value.unwrap_or(slider.min);
    let range = slider.max - slider.min;
    let fraction = if range > 0.0 {
        ((value - slider.min) / range).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let knob = (fraction * (SLIDER_TRACK - 1) as f64).round() as usize;

    Line::from(vec![
        Span::styled(format_number(slider.min), Style::default().fg(theme.border)),
        Span::raw(" "),
        Span::styled("━".repeat(knob), Style::default().fg(theme.primary)),
        Span::styled("●", Style::default().fg(theme.highlight)),
        Span::styled(
            "─".repeat(SLIDER_TRACK - 1 - knob),
            Style::default().fg(theme.border),
        ),
        Span::raw(" "),
        Span::styled(format_number(slider.max), Style::default().fg(theme.border)),
        Span::raw("  "),
        Span::styled(
            format!("[{}]", format_number(value)),
            Style::default()
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD),
        ),
    ])
}

fn draw_submit(frame: &mut Frame, session: &FormSession, view: &FormView<'_>, area: Rect) -> Rect {
    let theme = view.theme;
    let focused = session.focus() == Focus::Submit;

    let (text, style) = if session.submit_flash_active(view.now) {
        (
            "  ✓ Submitted  ",
            Style::default()
                .fg(theme.text)
                .bg(theme.success)
                .add_modifier(Modifier::BOLD),
        )
    } else if focused {
        (
            "  [ Submit ]  ",
            Style::default()
                .fg(theme.text)
                .bg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (
            "    Submit    ",
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )
    };

    let border = if focused { theme.primary } else { theme.border };
    let button = Paragraph::new(text)
        .style(style)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
    frame.render_widget(button, area);
    area
}

fn probe_span<S: fmt::Display>(
    report: Option<&ProbeReport<S>>,
    healthy: impl Fn(&S) -> bool,
    theme: &Theme,
) -> Span<'static> {
    let Some(report) = report else {
        return Span::styled("unknown", Style::default().fg(theme.border));
    };
    let color = if healthy(&report.status) {
        theme.success
    } else {
        theme.error
    };
    Span::styled(
        format!("{} ({})", report.status, report.checked_at.format("%H:%M:%S UTC")),
        Style::default().fg(color),
    )
}

/// One-line strip of `column` at row `y`.
fn row_of(column: Rect, y: u16) -> Rect {
    Rect {
        y,
        height: 1,
        ..column
    }
}

fn draw_status(frame: &mut Frame, session: &FormSession, theme: &Theme, area: Rect) {
    let label = Style::default().fg(theme.border);
    let mut spans = vec![
        Span::styled("Backend: ", label),
        probe_span(
            session.health(),
            |status| *status == ServiceStatus::Alive,
            theme,
        ),
        Span::styled("  Inference: ", label),
        probe_span(
            session.inference_health(),
            |status| *status == InferenceStatus::Healthy,
            theme,
        ),
    ];

    if session.enhancement_pending() {
        spans.push(Span::styled("  │ ", label));
        spans.push(Span::styled(
            "Enhancing prompt...",
            Style::default().fg(theme.highlight),
        ));
    }
    if let Some(notice) = session.notice() {
        let color = match notice.level {
            NoticeLevel::Info => theme.success,
            NoticeLevel::Error => theme.error,
        };
        spans.push(Span::styled("  │ ", label));
        spans.push(Span::styled(
            notice.message.clone(),
            Style::default().fg(color),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_help(frame: &mut Frame, session: &FormSession, theme: &Theme, area: Rect) {
    let help_text = if session.instruction_active() {
        "Type to edit  ←/→: Cursor  Enter: Newline  Tab/Esc: Done"
    } else {
        "↑/↓: Move  ←/→: Change  Enter: Submit  Tab: Instruction  Ctrl+E: Enhance  F5: Health  Esc: Quit"
    };
    let help = Paragraph::new(help_text).style(Style::default().fg(theme.border));
    frame.render_widget(help, area);
}
