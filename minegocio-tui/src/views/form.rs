//! Client record form.
//!
//! Holds a draft copy of the record being edited, or the empty create draft.
//! The primary address fields exist only while creating.

use crate::app::App;
use crate::nav::Pane;
use crate::widgets::{InputLine, InputList};
use minegocio_core::{validate_cliente, Cliente, DireccionMatriz, ValidationError};
use ratatui::{layout::Rect, style::Style, Frame};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKey {
    EmpresaId,
    TipoIdentificacion,
    NumeroIdentificacion,
    Nombres,
    Correo,
    Celular,
    MatrizProvincia,
    MatrizCiudad,
    MatrizDireccion,
}

impl FieldKey {
    pub fn label(&self) -> &'static str {
        match self {
            FieldKey::EmpresaId => "empresaId",
            FieldKey::TipoIdentificacion => "tipoIdentificacion",
            FieldKey::NumeroIdentificacion => "numeroIdentificacion",
            FieldKey::Nombres => "nombres",
            FieldKey::Correo => "correo",
            FieldKey::Celular => "celular",
            FieldKey::MatrizProvincia => "matriz.provincia",
            FieldKey::MatrizCiudad => "matriz.ciudad",
            FieldKey::MatrizDireccion => "matriz.direccion",
        }
    }
}

const COMMON_FIELDS: [FieldKey; 6] = [
    FieldKey::EmpresaId,
    FieldKey::TipoIdentificacion,
    FieldKey::NumeroIdentificacion,
    FieldKey::Nombres,
    FieldKey::Correo,
    FieldKey::Celular,
];

const MATRIZ_FIELDS: [FieldKey; 3] = [
    FieldKey::MatrizProvincia,
    FieldKey::MatrizCiudad,
    FieldKey::MatrizDireccion,
];

#[derive(Debug, Clone, PartialEq)]
pub struct RecordForm {
    pub draft: Cliente,
    cursor: usize,
}

impl Default for RecordForm {
    fn default() -> Self {
        Self {
            draft: Cliente::draft(),
            cursor: 0,
        }
    }
}

impl RecordForm {
    /// Replace the draft wholesale from the record to edit, or the empty draft.
    pub fn reset(&mut self, editing: Option<&Cliente>) {
        self.draft = editing.cloned().unwrap_or_else(Cliente::draft);
        self.cursor = 0;
    }

    pub fn is_creating(&self) -> bool {
        self.draft.is_new()
    }

    pub fn fields(&self) -> Vec<FieldKey> {
        let mut fields = COMMON_FIELDS.to_vec();
        if self.is_creating() {
            fields.extend(MATRIZ_FIELDS);
        }
        fields
    }

    pub fn focused(&self) -> FieldKey {
        let fields = self.fields();
        fields[self.cursor.min(fields.len() - 1)]
    }

    pub fn next_field(&mut self) {
        self.cursor = (self.cursor + 1) % self.fields().len();
    }

    pub fn previous_field(&mut self) {
        let len = self.fields().len();
        self.cursor = (self.cursor + len - 1) % len;
    }

    pub fn value(&self, key: FieldKey) -> String {
        let matriz = self.draft.direccion_matriz.as_ref();
        match key {
            FieldKey::EmpresaId => self.draft.empresa_id.clone(),
            FieldKey::TipoIdentificacion => {
                let tipo = self.draft.tipo_identificacion;
                format!("{} ({})", tipo.as_code(), tipo.description())
            }
            FieldKey::NumeroIdentificacion => self.draft.numero_identificacion.clone(),
            FieldKey::Nombres => self.draft.nombres.clone(),
            FieldKey::Correo => self.draft.correo.clone().unwrap_or_default(),
            FieldKey::Celular => self.draft.celular.clone().unwrap_or_default(),
            FieldKey::MatrizProvincia => matriz.map(|m| m.provincia.clone()).unwrap_or_default(),
            FieldKey::MatrizCiudad => matriz.map(|m| m.ciudad.clone()).unwrap_or_default(),
            FieldKey::MatrizDireccion => matriz.map(|m| m.direccion.clone()).unwrap_or_default(),
        }
    }

    fn text_mut(&mut self, key: FieldKey) -> Option<&mut String> {
        let draft = &mut self.draft;
        match key {
            FieldKey::EmpresaId => Some(&mut draft.empresa_id),
            FieldKey::TipoIdentificacion => None,
            FieldKey::NumeroIdentificacion => Some(&mut draft.numero_identificacion),
            FieldKey::Nombres => Some(&mut draft.nombres),
            FieldKey::Correo => Some(draft.correo.get_or_insert_with(String::new)),
            FieldKey::Celular => Some(draft.celular.get_or_insert_with(String::new)),
            FieldKey::MatrizProvincia => Some(&mut matriz_mut(draft).provincia),
            FieldKey::MatrizCiudad => Some(&mut matriz_mut(draft).ciudad),
            FieldKey::MatrizDireccion => Some(&mut matriz_mut(draft).direccion),
        }
    }

    pub fn input(&mut self, c: char) {
        let key = self.focused();
        if let Some(text) = self.text_mut(key) {
            text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        let key = self.focused();
        if let Some(text) = self.text_mut(key) {
            text.pop();
        }
    }

    /// Cycle the identification type when it has focus.
    pub fn cycle(&mut self) {
        if self.focused() == FieldKey::TipoIdentificacion {
            self.draft.tipo_identificacion = self.draft.tipo_identificacion.next();
        }
    }

    /// The record to submit, if it passes local validation.
    pub fn submit(&self) -> Result<Cliente, ValidationError> {
        validate_cliente(&self.draft)?;
        Ok(self.draft.clone())
    }
}

fn matriz_mut(draft: &mut Cliente) -> &mut DireccionMatriz {
    draft
        .direccion_matriz
        .get_or_insert_with(DireccionMatriz::default)
}

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let form = &app.form;
    let focused = app.pane == Pane::Form;
    let current = form.focused();
    let rows: Vec<InputLine> = form
        .fields()
        .into_iter()
        .map(|key| InputLine {
            label: key.label(),
            value: form.value(key),
            focused: focused && key == current,
        })
        .collect();
    let title = match form.draft.id {
        Some(id) => format!("Editar cliente #{}", id),
        None => "Nuevo cliente".to_string(),
    };
    InputList {
        title: &title,
        rows: &rows,
        label_style: Style::default().fg(app.theme.secondary),
        focus_style: Style::default().fg(app.theme.primary),
        border_style: Style::default().fg(app.theme.border_for(focused)),
    }
    .render(f, area);
}
