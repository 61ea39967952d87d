//! Search results table.

use crate::app::App;
use crate::nav::Pane;
use minegocio_core::Cliente;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph, Row, Table, TableState},
    Frame,
};

pub const NO_RESULTS: &str = "Sin resultados";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordTable {
    pub cursor: usize,
}

impl RecordTable {
    /// Keep the cursor on a row after the result set shrinks.
    pub fn clamp(&mut self, len: usize) {
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    pub fn move_down(&mut self, len: usize) {
        if self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn selected<'a>(&self, results: &'a [Cliente]) -> Option<&'a Cliente> {
        results.get(self.cursor)
    }
}

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let focused = app.pane == Pane::Results;
    let block = Block::default()
        .title(Pane::Results.title())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border_for(focused)));

    let results = &app.state.results;
    if results.is_empty() {
        let placeholder = Paragraph::new(NO_RESULTS)
            .style(Style::default().fg(app.theme.text_dim))
            .block(block);
        f.render_widget(placeholder, area);
        return;
    }

    let viewing = app.state.viewing_id();
    let rows: Vec<Row> = results
        .iter()
        .map(|cliente| {
            let marker = if cliente.id.is_some() && cliente.id == viewing {
                "*"
            } else {
                ""
            };
            Row::new(vec![
                marker.to_string(),
                cliente.id.map(|id| id.to_string()).unwrap_or_default(),
                format!(
                    "{} {}",
                    cliente.tipo_identificacion, cliente.numero_identificacion
                ),
                cliente.nombres.clone(),
                cliente.correo.clone().unwrap_or_default(),
                cliente.celular.clone().unwrap_or_default(),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(1),
        Constraint::Length(6),
        Constraint::Percentage(25),
        Constraint::Percentage(30),
        Constraint::Percentage(25),
        Constraint::Percentage(15),
    ];
    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["", "id", "identificación", "nombres", "correo", "celular"])
                .style(Style::default().fg(app.theme.secondary)),
        )
        .block(block)
        .highlight_style(
            Style::default()
                .bg(app.theme.bg_highlight)
                .fg(app.theme.primary)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = TableState::default();
    state.select(Some(app.table.cursor));
    f.render_stateful_widget(table, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_clamps_when_results_shrink() {
        let mut table = RecordTable { cursor: 4 };
        table.clamp(2);
        assert_eq!(table.cursor, 1);
        table.clamp(0);
        assert_eq!(table.cursor, 0);
    }

    #[test]
    fn cursor_stops_at_last_row() {
        let mut table = RecordTable::default();
        table.move_down(2);
        table.move_down(2);
        assert_eq!(table.cursor, 1);
        table.move_up();
        table.move_up();
        assert_eq!(table.cursor, 0);
    }
}
