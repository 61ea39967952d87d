//! Search inputs: tenant id and free text.

use crate::app::App;
use crate::nav::Pane;
use crate::widgets::{InputLine, InputList};
use minegocio_core::{validate_search, SearchContext, ValidationError};
use ratatui::{layout::Rect, style::Style, Frame};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchField {
    #[default]
    EmpresaId,
    Busqueda,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchView {
    pub empresa_id: String,
    pub busqueda: String,
    pub field: SearchField,
}

impl SearchView {
    pub fn from_context(context: &SearchContext) -> Self {
        Self {
            empresa_id: context.empresa_id.clone(),
            busqueda: context.busqueda.clone(),
            field: SearchField::default(),
        }
    }

    pub fn toggle_field(&mut self) {
        self.field = match self.field {
            SearchField::EmpresaId => SearchField::Busqueda,
            SearchField::Busqueda => SearchField::EmpresaId,
        };
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.field {
            SearchField::EmpresaId => &mut self.empresa_id,
            SearchField::Busqueda => &mut self.busqueda,
        }
    }

    pub fn input(&mut self, c: char) {
        self.focused_mut().push(c);
    }

    pub fn backspace(&mut self) {
        self.focused_mut().pop();
    }

    /// The criteria to search with, if the tenant id is present.
    pub fn submit(&self) -> Result<SearchContext, ValidationError> {
        validate_search(&self.empresa_id)?;
        Ok(SearchContext::new(self.empresa_id.trim(), self.busqueda.trim()))
    }
}

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let view = &app.search_view;
    let focused = app.pane == Pane::Search;
    let rows = [
        InputLine {
            label: "empresaId",
            value: view.empresa_id.clone(),
            focused: focused && view.field == SearchField::EmpresaId,
        },
        InputLine {
            label: "busqueda",
            value: view.busqueda.clone(),
            focused: focused && view.field == SearchField::Busqueda,
        },
    ];
    InputList {
        title: Pane::Search.title(),
        rows: &rows,
        label_style: Style::default().fg(app.theme.secondary),
        focus_style: Style::default().fg(app.theme.primary),
        border_style: Style::default().fg(app.theme.border_for(focused)),
    }
    .render(f, area);
}
