//! Labelled single-line inputs.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

#[derive(Debug, Clone)]
pub struct InputLine {
    pub label: &'static str,
    pub value: String,
    pub focused: bool,
}

/// A bordered column of `label: value` rows with a cursor on the focused one.
pub struct InputList<'a> {
    pub title: &'a str,
    pub rows: &'a [InputLine],
    pub label_style: Style,
    pub focus_style: Style,
    pub border_style: Style,
}

impl<'a> InputList<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let lines: Vec<Line> = self
            .rows
            .iter()
            .map(|row| {
                let marker = if row.focused { "> " } else { "  " };
                let value_style = if row.focused {
                    self.focus_style.add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let cursor = if row.focused { "_" } else { "" };
                Line::from(vec![
                    Span::styled(marker, self.focus_style),
                    Span::styled(format!("{}: ", row.label), self.label_style),
                    Span::styled(format!("{}{}", row.value, cursor), value_style),
                ])
            })
            .collect();

        let widget = Paragraph::new(lines).block(
            Block::default()
                .title(self.title)
                .borders(Borders::ALL)
                .border_style(self.border_style),
        );
        f.render_widget(widget, area);
    }
}
