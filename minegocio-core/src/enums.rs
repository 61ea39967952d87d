//! Enum types for MiNegocio entities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of identity document a client is registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoIdentificacion {
    /// National identity card
    #[default]
    Cedula,
    /// Tax registry number
    Ruc,
    /// Passport
    Pasaporte,
}

impl TipoIdentificacion {
    pub fn all() -> &'static [TipoIdentificacion] {
        &[
            TipoIdentificacion::Cedula,
            TipoIdentificacion::Ruc,
            TipoIdentificacion::Pasaporte,
        ]
    }

    /// Wire code as accepted by the backend.
    pub fn as_code(&self) -> &'static str {
        match self {
            TipoIdentificacion::Cedula => "CEDULA",
            TipoIdentificacion::Ruc => "RUC",
            TipoIdentificacion::Pasaporte => "PASAPORTE",
        }
    }

    pub fn from_code(s: &str) -> Result<Self, TipoIdentificacionParseError> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CEDULA" => Ok(TipoIdentificacion::Cedula),
            "RUC" => Ok(TipoIdentificacion::Ruc),
            "PASAPORTE" => Ok(TipoIdentificacion::Pasaporte),
            _ => Err(TipoIdentificacionParseError(s.to_string())),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TipoIdentificacion::Cedula => "Cédula de Identidad",
            TipoIdentificacion::Ruc => "Registro Único de Contribuyentes",
            TipoIdentificacion::Pasaporte => "Pasaporte",
        }
    }

    /// Next variant in declaration order, wrapping around.
    pub fn next(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|t| t == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }
}

impl fmt::Display for TipoIdentificacion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_code())
    }
}

impl FromStr for TipoIdentificacion {
    type Err = TipoIdentificacionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipoIdentificacionParseError(pub String);

impl fmt::Display for TipoIdentificacionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid identification type: {}", self.0)
    }
}

impl std::error::Error for TipoIdentificacionParseError {}
