//! Screen layout and per-pane rendering.

pub mod address;
pub mod form;
pub mod search;
pub mod table;

pub use address::{AddressFocus, AddressPanel};
pub use form::{FieldKey, RecordForm};
pub use search::{SearchField, SearchView};
pub use table::RecordTable;

use crate::app::{App, Modal};
use crate::nav::Pane;
use crate::theme::notification_color;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn render_view(f: &mut Frame<'_>, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    render_header(f, app, layout[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(layout[1]);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(columns[0]);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[1]);

    search::render(f, app, left[0]);
    form::render(f, app, left[1]);
    table::render(f, app, right[0]);
    address::render(f, app, right[1]);

    render_footer(f, app, layout[2]);

    if let Some(modal) = &app.modal {
        render_modal(f, app, modal);
    }
}

fn render_header(f: &mut Frame<'_>, app: &App, area: Rect) {
    let status = if app.state.is_loading() {
        "Cargando…"
    } else {
        "Listo"
    };
    let title = format!(
        "MiNegocio Clientes | API: {} | {}",
        app.config.api_base_url, status
    );
    let color = if app.state.is_loading() {
        app.theme.tertiary
    } else {
        app.theme.primary
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, Style::default().fg(color)));
    f.render_widget(block, area);
}

pub fn help_text(pane: Pane) -> &'static str {
    match pane {
        Pane::Search => "type to edit • ↑/↓ field • Enter search • Tab next pane • Ctrl-C quit",
        Pane::Form => {
            "type to edit • ↑/↓ field • ←/→ tipo • Enter save • Esc new client • Tab next pane"
        }
        Pane::Results => "j/k move • v addresses • e edit • d delete • n new • Tab next pane • q quit",
        Pane::Addresses => {
            "j/k move • r refresh • x delete • ↓ to form, Enter add • Esc list • Tab next • q quit"
        }
    }
}

fn render_footer(f: &mut Frame<'_>, app: &App, area: Rect) {
    let (text, style) = match app.state.notification.current() {
        Some(note) => (
            format!("{}: {}", note.level.label(), note.message),
            Style::default().fg(notification_color(note.level, &app.theme)),
        ),
        None => (
            help_text(app.pane).to_string(),
            Style::default().fg(app.theme.text_dim),
        ),
    };
    let footer = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .style(style);
    f.render_widget(footer, area);
}

fn render_modal(f: &mut Frame<'_>, app: &App, modal: &Modal) {
    let area = centered(f.size(), 60, 7);
    let (title, body, color) = match modal {
        Modal::Message { title, message } => (
            title.as_str(),
            format!("{}\n\n[Enter/Esc] cerrar", message),
            app.theme.warning,
        ),
        Modal::ConfirmDelete { prompt, .. } | Modal::ConfirmDeleteAddress { prompt, .. } => (
            "Confirmar",
            format!("{}\n\n[y] sí  [n] no", prompt),
            app.theme.error,
        ),
    };
    let widget = Paragraph::new(body)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(Span::styled(
                    title,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
    f.render_widget(Clear, area);
    f.render_widget(widget, area);
}

fn centered(area: Rect, width_percent: u16, height: u16) -> Rect {
    let width = (u32::from(area.width) * u32::from(width_percent.min(100)) / 100) as u16;
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
