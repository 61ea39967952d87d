//! MiNegocio Core - Client Management Types
//!
//! Data structures and the remote API contract shared by every other crate.
//! This crate performs no I/O.

mod api;
mod entities;
mod enums;
mod envelope;
mod error;
mod identity;
mod serde_helpers;
mod validation;

pub use api::ClientesApi;
pub use entities::{
    AddressSnapshot, Cliente, ClienteCreateRequest, ClienteUpdateRequest, Direccion,
    DireccionMatriz, NuevaDireccion, SearchContext,
};
pub use enums::{TipoIdentificacion, TipoIdentificacionParseError};
pub use envelope::{ApiEnvelope, DecodedRows, Payload, RejectedRow};
pub use error::{ApiResult, RemoteOperationFailure, ValidationError};
pub use identity::{ClienteId, DireccionId, Timestamp};
pub use validation::{validate_cliente, validate_nueva_direccion, validate_search};
