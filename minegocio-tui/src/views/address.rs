//! Address panel for the viewed client.

use crate::app::App;
use crate::nav::Pane;
use crate::theme::address_color;
use crate::widgets::{DetailPanel, InputLine, InputList};
use minegocio_core::{validate_nueva_direccion, ClienteId, Direccion, NuevaDireccion, ValidationError};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

const FIELD_LABELS: [&str; 3] = ["provincia", "ciudad", "direccion"];

/// Which part of the panel receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressFocus {
    #[default]
    List,
    Field(usize),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressPanel {
    pub draft: NuevaDireccion,
    pub focus: AddressFocus,
    /// Row in the secondary address list.
    pub cursor: usize,
}

impl AddressPanel {
    /// Start over for a newly viewed client.
    pub fn reset_for(&mut self, cliente_id: Option<ClienteId>) {
        self.draft = NuevaDireccion::for_cliente(cliente_id);
        self.focus = AddressFocus::List;
        self.cursor = 0;
    }

    pub fn is_editing_field(&self) -> bool {
        matches!(self.focus, AddressFocus::Field(_))
    }

    pub fn clamp(&mut self, len: usize) {
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    pub fn move_down(&mut self, len: usize) {
        match self.focus {
            AddressFocus::List if self.cursor + 1 < len => self.cursor += 1,
            AddressFocus::List => self.focus = AddressFocus::Field(0),
            AddressFocus::Field(i) if i + 1 < FIELD_LABELS.len() => {
                self.focus = AddressFocus::Field(i + 1)
            }
            AddressFocus::Field(_) => {}
        }
    }

    pub fn move_up(&mut self) {
        match self.focus {
            AddressFocus::List => self.cursor = self.cursor.saturating_sub(1),
            AddressFocus::Field(0) => self.focus = AddressFocus::List,
            AddressFocus::Field(i) => self.focus = AddressFocus::Field(i - 1),
        }
    }

    pub fn focus_form(&mut self) {
        self.focus = AddressFocus::Field(0);
    }

    pub fn focus_list(&mut self) {
        self.focus = AddressFocus::List;
    }

    fn field_mut(&mut self, index: usize) -> Option<&mut String> {
        match index {
            0 => Some(&mut self.draft.provincia),
            1 => Some(&mut self.draft.ciudad),
            2 => Some(&mut self.draft.direccion),
            _ => None,
        }
    }

    pub fn input(&mut self, c: char) {
        if let AddressFocus::Field(i) = self.focus {
            if let Some(text) = self.field_mut(i) {
                text.push(c);
            }
        }
    }

    pub fn backspace(&mut self) {
        if let AddressFocus::Field(i) = self.focus {
            if let Some(text) = self.field_mut(i) {
                text.pop();
            }
        }
    }

    pub fn selected<'a>(&self, adicionales: &'a [Direccion]) -> Option<&'a Direccion> {
        adicionales.get(self.cursor)
    }

    /// Validate and hand out the draft. On success the text fields are cleared
    /// right away, whatever the remote outcome turns out to be.
    pub fn submit(&mut self) -> Result<NuevaDireccion, ValidationError> {
        validate_nueva_direccion(&self.draft)?;
        let draft = self.draft.clone();
        self.draft.reset_fields();
        Ok(draft)
    }
}

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let focused = app.pane == Pane::Addresses;
    let border_style = Style::default().fg(app.theme.border_for(focused));
    let panel = &app.address_panel;

    let Some(cliente) = app.state.viewing.as_ref() else {
        DetailPanel {
            title: Pane::Addresses.title(),
            fields: Vec::new(),
            style: Style::default().fg(app.theme.secondary),
            border_style,
            placeholder: "Selecciona un cliente con 'v' en Resultados",
        }
        .render(f, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(3),
            Constraint::Length(5),
        ])
        .split(area);

    let mut fields = Vec::new();
    if let Some(matriz) = &app.state.addresses.matriz {
        fields.push(("Provincia", matriz.provincia.clone()));
        fields.push(("Ciudad", matriz.ciudad.clone()));
        fields.push(("Dirección", matriz.direccion.clone()));
    }
    let title = format!("Matriz de {}", cliente.label());
    DetailPanel {
        title: &title,
        fields,
        style: Style::default().fg(address_color(true, &app.theme)),
        border_style,
        placeholder: "Sin dirección matriz",
    }
    .render(f, chunks[0]);

    let adicionales = &app.state.addresses.adicionales;
    let items: Vec<ListItem> = if adicionales.is_empty() {
        vec![ListItem::new("Sin direcciones adicionales")
            .style(Style::default().fg(app.theme.text_dim))]
    } else {
        adicionales
            .iter()
            .map(|d| {
                ListItem::new(d.summary())
                    .style(Style::default().fg(address_color(d.es_matriz, &app.theme)))
            })
            .collect()
    };
    let list_title = format!(
        "Adicionales ({} de {} en total)",
        adicionales.len(),
        app.state.addresses.todas.len()
    );
    let list = List::new(items)
        .block(
            Block::default()
                .title(list_title)
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .highlight_style(
            Style::default()
                .fg(app.theme.primary)
                .add_modifier(Modifier::BOLD),
        );
    let mut state = ListState::default();
    if focused && panel.focus == AddressFocus::List && !adicionales.is_empty() {
        state.select(Some(panel.cursor));
    }
    f.render_stateful_widget(list, chunks[1], &mut state);

    let values = [
        &panel.draft.provincia,
        &panel.draft.ciudad,
        &panel.draft.direccion,
    ];
    let rows: Vec<InputLine> = FIELD_LABELS
        .into_iter()
        .zip(values)
        .enumerate()
        .map(|(i, (label, value))| InputLine {
            label,
            value: value.clone(),
            focused: focused && panel.focus == AddressFocus::Field(i),
        })
        .collect();
    InputList {
        title: "Nueva dirección",
        rows: &rows,
        label_style: Style::default().fg(app.theme.secondary),
        focus_style: Style::default().fg(app.theme.primary),
        border_style,
    }
    .render(f, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_keeps_client_and_clears_fields() {
        let mut panel = AddressPanel::default();
        panel.reset_for(Some(ClienteId(5)));
        panel.focus_form();
        "Guayas".chars().for_each(|c| panel.input(c));
        panel.move_down(0);
        "Guayaquil".chars().for_each(|c| panel.input(c));
        panel.move_down(0);
        "Malecón 100".chars().for_each(|c| panel.input(c));

        let draft = panel.submit().unwrap();
        assert_eq!(draft.ciudad, "Guayaquil");
        assert_eq!(panel.draft, NuevaDireccion::for_cliente(Some(ClienteId(5))));
    }

    #[test]
    fn incomplete_draft_is_kept() {
        let mut panel = AddressPanel::default();
        panel.reset_for(Some(ClienteId(5)));
        panel.focus_form();
        panel.input('X');
        assert_eq!(panel.submit(), Err(ValidationError::required("ciudad")));
        assert_eq!(panel.draft.provincia, "X");
    }

    #[test]
    fn up_from_first_field_returns_to_list() {
        let mut panel = AddressPanel::default();
        panel.focus_form();
        panel.move_up();
        assert_eq!(panel.focus, AddressFocus::List);
    }
}
