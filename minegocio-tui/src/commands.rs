//! Remote work queued by the orchestrator and its results.
//!
//! A [`Command`] is pure data; [`execute`] runs it against any [`ClientesApi`]
//! and folds the response into an [`Outcome`] for `ClientesState::apply`.

use minegocio_core::{
    AddressSnapshot, ApiResult, Cliente, ClienteId, ClientesApi, Direccion, DireccionId,
    NuevaDireccion, Payload, SearchContext,
};
use serde::de::DeserializeOwned;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveKind {
    Create,
    Update(ClienteId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Search { seq: u64, context: SearchContext },
    Save { kind: SaveKind, cliente: Cliente },
    DeleteClient { id: ClienteId },
    CreateAddress { draft: NuevaDireccion },
    DeleteAddress { id: DireccionId },
    LoadAddresses { seq: u64, cliente_id: ClienteId },
}

impl Command {
    /// Verb used in failure notifications.
    pub fn label(&self) -> &'static str {
        match self {
            Command::Search { .. } => "buscando",
            Command::Save { .. } => "guardando",
            Command::DeleteClient { .. } => "eliminando",
            Command::CreateAddress { .. } => "creando dirección",
            Command::DeleteAddress { .. } => "eliminando dirección",
            Command::LoadAddresses { .. } => "cargando direcciones",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Searched {
        seq: u64,
        result: ApiResult<Vec<Cliente>>,
    },
    Saved {
        kind: SaveKind,
        /// Id reported by the server, if the response carried the record.
        result: ApiResult<Option<ClienteId>>,
    },
    Deleted {
        id: ClienteId,
        result: ApiResult<()>,
    },
    AddressCreated {
        result: ApiResult<()>,
    },
    AddressDeleted {
        id: DireccionId,
        result: ApiResult<()>,
    },
    AddressesLoaded {
        seq: u64,
        cliente_id: ClienteId,
        snapshot: AddressSnapshot,
    },
}

pub async fn execute(api: &dyn ClientesApi, command: Command) -> Outcome {
    match command {
        Command::Search { seq, context } => {
            let result = api
                .search_clients(context.empresa_id.trim(), context.busqueda_param())
                .await
                .map(|payload| decode_list::<Cliente>(payload, "clientes"));
            Outcome::Searched { seq, result }
        }
        Command::Save { kind, cliente } => {
            let response = match kind {
                SaveKind::Create => api.create_client(&cliente.create_request()).await,
                SaveKind::Update(id) => api.update_client(id, &cliente.update_request()).await,
            };
            let result = response.map(|payload| {
                payload
                    .into_item::<Cliente>()
                    .and_then(|saved| saved.id)
            });
            Outcome::Saved { kind, result }
        }
        Command::DeleteClient { id } => Outcome::Deleted {
            id,
            result: api.delete_client(id).await.map(drop),
        },
        Command::CreateAddress { draft } => Outcome::AddressCreated {
            result: api.create_address(&draft).await.map(drop),
        },
        Command::DeleteAddress { id } => Outcome::AddressDeleted {
            id,
            result: api.delete_address(id).await.map(drop),
        },
        Command::LoadAddresses { seq, cliente_id } => {
            let snapshot = load_addresses(api, cliente_id).await;
            Outcome::AddressesLoaded {
                seq,
                cliente_id,
                snapshot,
            }
        }
    }
}

/// Decode a list response, logging every row that had to be skipped.
fn decode_list<T: DeserializeOwned>(payload: Payload, what: &'static str) -> Vec<T> {
    let decoded = payload.into_rows::<T>();
    for row in &decoded.rejected {
        tracing::warn!(list = what, index = row.index, reason = %row.reason, "skipping undecodable row");
    }
    decoded.rows
}

/// Issue the three address reads concurrently. Each one degrades on its own:
/// a failed list is empty, a failed primary lookup is absent.
async fn load_addresses(api: &dyn ClientesApi, cliente_id: ClienteId) -> AddressSnapshot {
    let (todas, adicionales, matriz) = tokio::join!(
        api.list_addresses(cliente_id),
        api.list_secondary_addresses(cliente_id),
        api.get_primary_address(cliente_id),
    );

    let todas = todas
        .map(|payload| decode_list::<Direccion>(payload, "direcciones"))
        .unwrap_or_else(|err| {
            tracing::warn!(%cliente_id, error = %err, "address list unavailable");
            Vec::new()
        });
    let adicionales = adicionales
        .map(|payload| decode_list::<Direccion>(payload, "direcciones adicionales"))
        .unwrap_or_else(|err| {
            tracing::warn!(%cliente_id, error = %err, "secondary address list unavailable");
            Vec::new()
        });
    let matriz = matriz
        .map(|payload| payload.into_item::<Direccion>())
        .unwrap_or_else(|err| {
            tracing::warn!(%cliente_id, error = %err, "primary address unavailable");
            None
        });

    AddressSnapshot {
        todas,
        adicionales,
        matriz,
    }
}
