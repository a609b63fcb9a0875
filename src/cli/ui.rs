//! Rendering
//!
//! Pure functions from `App` state to ratatui widgets.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::app::{App, Pane, Screen};
use super::config::{Palette, TerminalConfig};
use super::utils::{center_text, pad_right, wrap_text};
use crate::engine::boot::StageStatus;
use crate::engine::git::GitStep;
use crate::engine::lock::{LockPhase, UNLOCK_COMMAND};
use crate::engine::secret::{catalogue, OverlayState, KONAMI_LABEL};
use crate::engine::terminal::{Terminal, Workflow};

pub fn draw(f: &mut Frame, app: &App, config: &TerminalConfig) {
    let palette = config.palette(app.theme());
    let area = f.size();

    match app.screen() {
        Screen::Boot => draw_boot(f, app, palette, area),
        Screen::Lock => draw_lock(f, app, palette, area),
        Screen::Contact => draw_contact(f, app, palette, area),
    }

    if matches!(app.overlay().state(), OverlayState::Open | OverlayState::Closing) {
        draw_secret(f, app, palette, area);
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn draw_boot(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let boot = app.boot();
    let text = Style::default().fg(palette.text());

    let lines: Vec<Line> = boot
        .lines()
        .into_iter()
        .filter(|(status, _)| *status != StageStatus::Hidden)
        .map(|(status, stage)| {
            let status_style = match status {
                StageStatus::Ok => Style::default().fg(palette.accent()),
                _ => Style::default().fg(palette.frame()),
            };
            let dots = if status == StageStatus::Loading {
                boot.dots()
            } else {
                ""
            };
            Line::from(vec![
                Span::styled("[", text),
                Span::styled(format!("{:^4}", status.label()), status_style),
                Span::styled("] ", text),
                Span::styled(format!("{}{}", stage, dots), text),
            ])
        })
        .collect();

    let style = if boot.is_exiting() {
        text.add_modifier(Modifier::DIM)
    } else {
        text
    };
    let paragraph = Paragraph::new(lines).style(style);
    f.render_widget(paragraph, centered(area, 48, 3));
}

fn draw_lock(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let lock = app.lock();
    let workflow = lock.workflow();
    let frame_style = Style::default().fg(palette.frame());
    let text = Style::default().fg(palette.text());

    let mut block = Block::default()
        .title("portfolio.exe")
        .borders(Borders::ALL)
        .style(frame_style);
    if workflow.phase() == LockPhase::Flipping {
        block = block.style(frame_style.add_modifier(Modifier::REVERSED));
    }

    let prompt = Span::styled(format!("{} ", lock.profile().prompt), Style::default().fg(palette.accent()));
    let input_line = if workflow.is_transitioning() {
        let remaining = UNLOCK_COMMAND.chars().skip(workflow.consumed()).collect::<String>();
        Line::from(vec![prompt, Span::styled(remaining, text)])
    } else {
        Line::from(vec![
            prompt,
            Span::styled(lock.input().text().to_string(), text),
            Span::styled(
                lock.ghost_text(),
                Style::default().fg(palette.frame()).add_modifier(Modifier::DIM),
            ),
        ])
    };

    let mut lines = vec![
        Line::from(Span::styled("LOCKED", text.add_modifier(Modifier::BOLD))),
        Line::from(""),
        input_line,
        Line::from(""),
    ];
    let message = lock.presenter().visible_text();
    if !message.is_empty() {
        lines.push(Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(palette.error()),
        )));
    }

    let rect = centered(area, 60, 9);
    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, rect);

    if !workflow.is_transitioning() {
        let hint = center_text("type start or click anywhere", area.width as usize);
        let hint_rect = Rect {
            y: rect.y.saturating_add(rect.height),
            height: 1,
            ..area
        };
        f.render_widget(Paragraph::new(hint).style(frame_style), hint_rect);
    }
}

fn draw_contact(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(area);
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    draw_editor(f, app, palette, panes[0]);
    draw_git_terminal(f, app, palette, panes[1]);

    let mut footer = String::from("Tab switch pane · Ctrl+C quit");
    if app.theme_toggle_visible() {
        footer.push_str(&format!(" · Ctrl+T {} mode", app.theme().toggled()));
    }
    f.render_widget(
        Paragraph::new(footer).style(Style::default().fg(palette.frame())),
        rows[1],
    );
}

fn pane_block(title: String, focused: bool, palette: &Palette) -> Block<'static> {
    let color = if focused { palette.accent() } else { palette.frame() };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

fn draw_editor(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let focused = app.active_pane() == Some(Pane::Editor);
    let workflow = app.git().workflow();
    let title = format!("email.txt  {}", workflow.file_status().label());
    let block = pane_block(title, focused, palette);
    let inner = block.inner(area);

    let editor = app.editor();
    let (cursor_x, cursor_y) = editor.get_cursor_position();
    let scroll = (cursor_y as u16).saturating_sub(inner.height.saturating_sub(1));

    let lines: Vec<Line> = editor
        .lines()
        .iter()
        .map(|line| Line::from(Span::styled(line.clone(), Style::default().fg(palette.text()))))
        .collect();
    let paragraph = Paragraph::new(lines).block(block).scroll((scroll, 0));
    f.render_widget(paragraph, area);

    if focused && !app.overlay().is_visible() {
        f.set_cursor(
            inner.x + (cursor_x as u16).min(inner.width.saturating_sub(1)),
            inner.y + cursor_y as u16 - scroll,
        );
    }
}

fn draw_git_terminal(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let focused = app.active_pane() == Some(Pane::Terminal);
    let git = app.git();
    let workflow = git.workflow();
    let block = pane_block("terminal".to_string(), focused, palette);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let width = inner.width.max(1) as usize;
    let mut lines: Vec<Line> = Vec::new();

    let hint_style = match workflow.step() {
        GitStep::Complete => Style::default().fg(palette.accent()),
        _ => Style::default().fg(palette.frame()),
    };
    lines.push(Line::from(Span::styled(
        format!("# {}", workflow.hint().visible_text()),
        hint_style,
    )));
    if let Some(sent_at) = workflow.sent_at() {
        lines.push(Line::from(Span::styled(
            format!("# sent at {}", sent_at.format("%H:%M:%S")),
            hint_style,
        )));
    }

    let (transcript, input_lines) = terminal_body(git, palette, width);
    lines.extend(transcript);

    let body_height = inner.height as usize;
    let overflow = (lines.len() + input_lines.len()).saturating_sub(body_height);
    let visible: Vec<Line> = lines
        .into_iter()
        .skip(overflow)
        .chain(input_lines.into_iter())
        .collect();
    let input_row = visible.len().saturating_sub(1);
    f.render_widget(Paragraph::new(visible), inner);

    if focused && workflow.accepts_keys() && !app.overlay().is_visible() {
        let prompt_width = git.profile().prompt.chars().count() + 1;
        let x = prompt_width + git.input().cursor();
        f.set_cursor(
            inner.x + (x as u16).min(inner.width.saturating_sub(1)),
            inner.y + (input_row as u16).min(inner.height.saturating_sub(1)),
        );
    }
}

/// Transcript plus the presenter line, then the prompt and arrow hint
fn terminal_body<W: Workflow>(
    terminal: &Terminal<W>,
    palette: &Palette,
    width: usize,
) -> (Vec<Line<'static>>, Vec<Line<'static>>) {
    let text = Style::default().fg(palette.text());
    let mut body: Vec<Line> = terminal
        .transcript()
        .iter()
        .flat_map(|line| wrap_text(line, width))
        .map(|line| Line::from(Span::styled(line, text)))
        .collect();

    let message = terminal.presenter().visible_text();
    if !message.is_empty() {
        body.extend(
            wrap_text(message, width)
                .into_iter()
                .map(|line| Line::from(Span::styled(line, Style::default().fg(palette.error())))),
        );
    }

    let mut input = Vec::new();
    if let Some(hint) = terminal.arrow_hint() {
        input.push(Line::from(Span::styled(
            hint,
            Style::default().fg(palette.frame()).add_modifier(Modifier::DIM),
        )));
    }
    input.push(Line::from(vec![
        Span::styled(
            format!("{} ", terminal.profile().prompt),
            Style::default().fg(palette.accent()),
        ),
        Span::styled(terminal.input().text().to_string(), text),
    ]));
    (body, input)
}

fn draw_secret(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let rect = centered(area, 72, area.height.saturating_sub(2));
    f.render_widget(Clear, rect);

    let mut style = Style::default().fg(palette.text());
    if app.overlay().state() == OverlayState::Closing {
        style = style.add_modifier(Modifier::DIM);
    }
    let block = Block::default()
        .title("~/secrets (Esc to close)")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent()))
        .style(style);
    let inner = block.inner(rect);
    f.render_widget(block, rect);

    let entries = catalogue();
    let column = entries
        .iter()
        .map(|entry| entry.command.chars().count())
        .max()
        .unwrap_or(0)
        + 2;

    let mut lines: Vec<Line> = entries
        .iter()
        .map(|entry| {
            Line::from(vec![
                Span::styled(pad_right(&entry.command, column), Style::default().fg(palette.accent())),
                Span::styled(entry.description, style),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("unlocked via: ", Style::default().fg(palette.frame())),
        Span::styled(KONAMI_LABEL, style.add_modifier(Modifier::BOLD)),
    ]));

    let catalogue_height = lines.len() as u16 + 1;
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(catalogue_height), Constraint::Min(2)])
        .split(inner);
    f.render_widget(Paragraph::new(lines), parts[0]);

    if let Some(secret) = app.secret() {
        let width = parts[1].width.max(1) as usize;
        let (body, input) = terminal_body(secret, palette, width);
        let height = parts[1].height as usize;
        let overflow = (body.len() + input.len()).saturating_sub(height);
        let visible: Vec<Line> = body.into_iter().skip(overflow).chain(input).collect();
        let input_row = visible.len().saturating_sub(1) as u16;
        f.render_widget(Paragraph::new(visible), parts[1]);

        let x = secret.profile().prompt.chars().count() + 1 + secret.input().cursor();
        f.set_cursor(
            parts[1].x + (x as u16).min(parts[1].width.saturating_sub(1)),
            parts[1].y + input_row.min(parts[1].height.saturating_sub(1)),
        );
    }
}
