//! Entity and payload types exchanged with the clientes API.

use crate::enums::TipoIdentificacion;
use crate::identity::{ClienteId, DireccionId, Timestamp};
use crate::serde_helpers::{blank_as_none, lenient_timestamp, null_as_default, string_or_number};
use serde::{Deserialize, Serialize};

// ============================================================================
// CLIENT RECORD
// ============================================================================

/// A client record as held by the UI.
///
/// `id` absent means the record has not been created yet. Every field is
/// optional on decode so partial server payloads still produce a record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Cliente {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ClienteId>,
    #[serde(deserialize_with = "null_as_default")]
    pub tipo_identificacion: TipoIdentificacion,
    #[serde(deserialize_with = "null_as_default")]
    pub numero_identificacion: String,
    #[serde(deserialize_with = "null_as_default")]
    pub nombres: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub celular: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub empresa_id: String,
    /// Only sent when creating; populated on reads by the backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direccion_matriz: Option<DireccionMatriz>,
    #[serde(
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub direcciones_adicionales: Vec<Direccion>,
    #[serde(
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub creado_en: Option<Timestamp>,
}

impl Cliente {
    /// The empty draft shown by the creation form.
    pub fn draft() -> Self {
        Self {
            direccion_matriz: Some(DireccionMatriz::default()),
            ..Self::default()
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Short label for prompts and notifications.
    pub fn label(&self) -> String {
        match (self.nombres.trim(), self.id) {
            ("", Some(id)) => format!("#{}", id),
            ("", None) => "new client".to_string(),
            (nombres, _) => nombres.to_string(),
        }
    }

    pub fn create_request(&self) -> ClienteCreateRequest {
        ClienteCreateRequest {
            empresa_id: self.empresa_id.trim().to_string(),
            tipo_identificacion: self.tipo_identificacion,
            numero_identificacion: self.numero_identificacion.trim().to_string(),
            nombres: self.nombres.trim().to_string(),
            correo: blank_as_none(&self.correo),
            celular: blank_as_none(&self.celular),
            direccion_matriz: self.direccion_matriz.clone().unwrap_or_default(),
        }
    }

    /// Update payload. The primary address is managed separately once the client exists.
    pub fn update_request(&self) -> ClienteUpdateRequest {
        ClienteUpdateRequest {
            tipo_identificacion: self.tipo_identificacion,
            numero_identificacion: self.numero_identificacion.trim().to_string(),
            nombres: self.nombres.trim().to_string(),
            correo: blank_as_none(&self.correo),
            celular: blank_as_none(&self.celular),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClienteCreateRequest {
    pub empresa_id: String,
    pub tipo_identificacion: TipoIdentificacion,
    pub numero_identificacion: String,
    pub nombres: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub celular: Option<String>,
    pub direccion_matriz: DireccionMatriz,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClienteUpdateRequest {
    pub tipo_identificacion: TipoIdentificacion,
    pub numero_identificacion: String,
    pub nombres: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub celular: Option<String>,
}

// ============================================================================
// ADDRESSES
// ============================================================================

/// Primary address embedded in a client creation payload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DireccionMatriz {
    #[serde(deserialize_with = "null_as_default")]
    pub provincia: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ciudad: String,
    #[serde(deserialize_with = "null_as_default")]
    pub direccion: String,
}

/// An address as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Direccion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<DireccionId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cliente_id: Option<ClienteId>,
    #[serde(deserialize_with = "null_as_default")]
    pub provincia: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ciudad: String,
    #[serde(deserialize_with = "null_as_default")]
    pub direccion: String,
    #[serde(deserialize_with = "null_as_default")]
    pub es_matriz: bool,
    #[serde(
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub creado_en: Option<Timestamp>,
}

impl Direccion {
    pub fn summary(&self) -> String {
        format!("{} · {} · {}", self.provincia, self.ciudad, self.direccion)
    }
}

/// Payload for registering a secondary address.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NuevaDireccion {
    pub cliente_id: Option<ClienteId>,
    pub provincia: String,
    pub ciudad: String,
    pub direccion: String,
}

impl NuevaDireccion {
    pub fn for_cliente(cliente_id: Option<ClienteId>) -> Self {
        Self {
            cliente_id,
            ..Self::default()
        }
    }

    /// Clear the text fields, keeping the owning client.
    pub fn reset_fields(&mut self) {
        self.provincia.clear();
        self.ciudad.clear();
        self.direccion.clear();
    }
}

/// Address data for one client, loaded together by a refresh.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AddressSnapshot {
    pub todas: Vec<Direccion>,
    pub adicionales: Vec<Direccion>,
    pub matriz: Option<Direccion>,
}

// ============================================================================
// SEARCH
// ============================================================================

/// Tenant and free-text criteria of a client search.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchContext {
    pub empresa_id: String,
    #[serde(default)]
    pub busqueda: String,
}

impl SearchContext {
    pub fn new(empresa_id: impl Into<String>, busqueda: impl Into<String>) -> Self {
        Self {
            empresa_id: empresa_id.into(),
            busqueda: busqueda.into(),
        }
    }

    /// The free-text criterion, or `None` when blank.
    pub fn busqueda_param(&self) -> Option<&str> {
        let trimmed = self.busqueda.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}
