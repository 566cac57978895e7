//! Frame rendering over the computed layout plan.
//!
//! Translates a [`RenderPlan`] plus the modal state into ratatui widgets:
//! the entry list with relative line numbers, the status bar (key hints,
//! search prompt, command prompt or transient error), and the full-screen
//! help overlay.

use crate::core::entries::{Category, Row};
use crate::ui::help::{action_names, ACTION_A, ACTION_B, HELP_ENTRIES, REPEAT_HINT};
use crate::ui::layout::{self, PlanRow};
use crate::ui::state::{AppState, Mode};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const LINE_NUMBER_WIDTH: usize = 3;

fn category_color(category: Category) -> Color {
    match category {
        Category::Index => Color::Green,
        Category::Workspace => Color::Yellow,
        Category::Untracked => Color::Red,
    }
}

fn visual_select_style() -> Style {
    Style::default().fg(Color::Black).bg(Color::Cyan)
}

/// Draw one frame from the current application state
pub fn draw(frame: &mut Frame, state: &AppState) {
    if state.mode == Mode::Help {
        draw_help(frame, frame.area());
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(frame.area());

    draw_list(frame, state, chunks[0]);
    draw_status_bar(frame, state, chunks[2]);
}

fn draw_list(frame: &mut Frame, state: &AppState, area: Rect) {
    let plan = layout::compute(
        &state.store,
        &state.filtered,
        state.selection_ordinal(),
        area.height as usize,
    );

    let lines: Vec<Line> = plan
        .rows
        .iter()
        .map(|plan_row| {
            render_row(state, plan_row, plan.path_width, plan.description_width)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_row<'a>(
    state: &'a AppState,
    plan_row: &PlanRow,
    path_width: usize,
    description_width: usize,
) -> Line<'a> {
    let Some(row) = state.row_at_view(plan_row.view_index) else {
        return Line::default();
    };

    match row {
        Row::Header(category) => {
            let style = Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD);
            Line::from(vec![
                Span::raw(" ".repeat(LINE_NUMBER_WIDTH + 1)),
                Span::styled(category.title(), style),
            ])
        }
        Row::Item(entry) => {
            let mut style = Style::default().fg(category_color(entry.category));
            if state.visual_mode && (entry.marked || plan_row.selected) {
                style = visual_select_style();
            }
            if plan_row.selected {
                style = style.add_modifier(Modifier::REVERSED);
            }

            let number = match plan_row.relative {
                Some(n) => format!("{:>width$}", n, width = LINE_NUMBER_WIDTH),
                None => " ".repeat(LINE_NUMBER_WIDTH),
            };
            let mark = if entry.marked { '*' } else { ' ' };
            let content = format!(
                "{} {:<path_width$}  {:>description_width$}",
                mark,
                entry.path,
                entry.kind.description(),
            );

            Line::from(vec![
                Span::styled(number, Style::default().fg(Color::DarkGray)),
                Span::raw(" "),
                Span::styled(content, style),
            ])
        }
    }
}

fn draw_status_bar(frame: &mut Frame, state: &AppState, area: Rect) {
    let width = area.width as usize;
    let base = Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED);

    let content = if let Some(message) = &state.status_message {
        format!(" {message}")
    } else if state.mode == Mode::Command {
        format!(" :{}", state.command_buffer)
    } else if state.mode == Mode::Search || !state.search_term.is_empty() {
        search_bar_text(&state.search_term, width)
    } else {
        status_hints(
            state.selected_entry().map(|entry| entry.category),
            state.repeat_prefix(),
            width,
        )
    };

    let padded = format!("{content:<width$}");
    frame.render_widget(Paragraph::new(padded).style(base), area);
}

/// Search prompt with a right-aligned hint, shortened on narrow terminals
fn search_bar_text(term: &str, width: usize) -> String {
    let prompt = format!(" /{term}");
    let help = "[Enter: back to list] [Escape: Cancel]";
    let help_short = "[ENTER|ESC]";

    let hint = if prompt.len() + help.len() + 2 <= width {
        help
    } else {
        help_short
    };
    if prompt.len() + hint.len() + 1 > width {
        return prompt;
    }
    let padding = width - prompt.len() - hint.len() - 1;
    format!("{prompt}{}{hint} ", " ".repeat(padding))
}

/// As many key hints as fit, with the help key pinned to the right edge.
///
/// The `s`/`u` names depend on the selection category; entries whose
/// resolved name is empty are skipped.
fn status_hints(category: Option<Category>, repeat_prefix: &str, width: usize) -> String {
    let (action_a, action_b) = action_names(category);
    let help_tail = if repeat_prefix.is_empty() {
        "[h: HELP]".to_string()
    } else {
        format!("[h: HELP] {repeat_prefix}")
    };

    let mut out = String::from(" ");
    let budget = width.saturating_sub(help_tail.len() + 2);
    for entry in HELP_ENTRIES {
        let name = match entry.name {
            ACTION_A => action_a,
            ACTION_B => action_b,
            name => name,
        };
        if name.is_empty() {
            continue;
        }
        let fragment = format!("[{}: {}] ", entry.key, name);
        if out.len() + fragment.len() > budget {
            break;
        }
        out.push_str(&fragment);
    }

    if out.len() + help_tail.len() + 1 <= width {
        let padding = width - out.len() - help_tail.len() - 1;
        out.push_str(&" ".repeat(padding));
        out.push_str(&help_tail);
        out.push(' ');
    }
    out
}

fn draw_help(frame: &mut Frame, area: Rect) {
    let title_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled("  Help [Press any key to go back]", title_style)),
        Line::default(),
    ];
    for entry in HELP_ENTRIES {
        lines.push(Line::from(format!("  [{:<4}] {}", entry.key, entry.desc)));
    }
    lines.push(Line::default());
    lines.push(Line::from(format!("  {REPEAT_HINT}")));

    frame.render_widget(Paragraph::new(lines), area);
}
