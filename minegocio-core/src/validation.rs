//! Local, blocking checks run by the views before emitting an intent.
//!
//! Fields count as empty when they are blank after trimming.

use crate::entities::{Cliente, NuevaDireccion};
use crate::error::ValidationError;

fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::required(field))
    } else {
        Ok(())
    }
}

/// Checks a client draft. The primary address is only checked for new clients.
pub fn validate_cliente(cliente: &Cliente) -> Result<(), ValidationError> {
    require(&cliente.empresa_id, "empresaId")?;
    require(&cliente.numero_identificacion, "numeroIdentificacion")?;
    require(&cliente.nombres, "nombres")?;

    if cliente.is_new() {
        let matriz = cliente.direccion_matriz.clone().unwrap_or_default();
        require(&matriz.provincia, "direccionMatriz.provincia")?;
        require(&matriz.ciudad, "direccionMatriz.ciudad")?;
        require(&matriz.direccion, "direccionMatriz.direccion")?;
    }
    Ok(())
}

pub fn validate_nueva_direccion(draft: &NuevaDireccion) -> Result<(), ValidationError> {
    require(&draft.provincia, "provincia")?;
    require(&draft.ciudad, "ciudad")?;
    require(&draft.direccion, "direccion")?;
    if draft.cliente_id.is_none() {
        return Err(ValidationError::MissingIdentity { entity: "client" });
    }
    Ok(())
}

pub fn validate_search(empresa_id: &str) -> Result<(), ValidationError> {
    require(empresa_id, "empresaId")
}
