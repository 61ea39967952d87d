//! Pane focus and cycling.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Pane {
    #[default]
    Search,
    Form,
    Results,
    Addresses,
}

impl Pane {
    pub fn title(&self) -> &'static str {
        match self {
            Pane::Search => "Buscar",
            Pane::Form => "Cliente",
            Pane::Results => "Resultados",
            Pane::Addresses => "Direcciones",
        }
    }

    pub fn all() -> &'static [Pane] {
        &[Pane::Search, Pane::Form, Pane::Results, Pane::Addresses]
    }

    pub fn index(&self) -> usize {
        Self::all().iter().position(|p| p == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Pane> {
        Self::all().get(index).copied()
    }

    pub fn next(&self) -> Pane {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn previous(&self) -> Pane {
        let all = Self::all();
        let idx = self.index();
        let prev = if idx == 0 { all.len() - 1 } else { idx - 1 };
        all[prev]
    }
}
