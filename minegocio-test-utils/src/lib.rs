//! MiNegocio Test Utilities
//!
//! Shared test infrastructure for the workspace:
//! - A recording, scriptable mock of [`ClientesApi`]
//! - Fixtures for common records and envelopes
//! - Proptest generators for client records

pub use minegocio_core::{
    ApiResult, Cliente, ClienteCreateRequest, ClienteId, ClienteUpdateRequest, ClientesApi,
    Direccion, DireccionId, DireccionMatriz, NuevaDireccion, Payload, RemoteOperationFailure,
    TipoIdentificacion,
};

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

// ============================================================================
// MOCK API
// ============================================================================

/// Backend endpoint, used to script responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    SearchClients,
    GetClient,
    CreateClient,
    UpdateClient,
    DeleteClient,
    CreateAddress,
    DeleteAddress,
    ListAddresses,
    ListSecondaryAddresses,
    GetPrimaryAddress,
}

/// A call received by [`MockClientesApi`], with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    SearchClients {
        empresa_id: String,
        busqueda: Option<String>,
    },
    GetClient(ClienteId),
    CreateClient(ClienteCreateRequest),
    UpdateClient(ClienteId, ClienteUpdateRequest),
    DeleteClient(ClienteId),
    CreateAddress(NuevaDireccion),
    DeleteAddress(DireccionId),
    ListAddresses(ClienteId),
    ListSecondaryAddresses(ClienteId),
    GetPrimaryAddress(ClienteId),
}

impl ApiCall {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            ApiCall::SearchClients { .. } => Endpoint::SearchClients,
            ApiCall::GetClient(_) => Endpoint::GetClient,
            ApiCall::CreateClient(_) => Endpoint::CreateClient,
            ApiCall::UpdateClient(..) => Endpoint::UpdateClient,
            ApiCall::DeleteClient(_) => Endpoint::DeleteClient,
            ApiCall::CreateAddress(_) => Endpoint::CreateAddress,
            ApiCall::DeleteAddress(_) => Endpoint::DeleteAddress,
            ApiCall::ListAddresses(_) => Endpoint::ListAddresses,
            ApiCall::ListSecondaryAddresses(_) => Endpoint::ListSecondaryAddresses,
            ApiCall::GetPrimaryAddress(_) => Endpoint::GetPrimaryAddress,
        }
    }
}

/// In-memory [`ClientesApi`] that records every call.
///
/// Responses are queued per endpoint with [`MockClientesApi::respond`]. A
/// queued response is consumed by one call; once the queue is empty the
/// endpoint's sticky response from [`MockClientesApi::always`] is used, and
/// failing that an empty success.
#[derive(Debug, Default)]
pub struct MockClientesApi {
    calls: Mutex<Vec<ApiCall>>,
    queued: Mutex<HashMap<Endpoint, VecDeque<ApiResult<Payload>>>>,
    sticky: Mutex<HashMap<Endpoint, ApiResult<Payload>>>,
}

impl MockClientesApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one response for `endpoint`.
    pub fn respond(&self, endpoint: Endpoint, result: ApiResult<Payload>) -> &Self {
        lock(&self.queued)
            .entry(endpoint)
            .or_default()
            .push_back(result);
        self
    }

    /// Queue a successful response built from a raw body (envelope unwrapped).
    pub fn respond_json(&self, endpoint: Endpoint, body: Value) -> &Self {
        self.respond(endpoint, Ok(Payload::from_body(body)))
    }

    /// Queue an HTTP failure.
    pub fn fail(&self, endpoint: Endpoint, status: u16, body: &str) -> &Self {
        self.respond(
            endpoint,
            Err(RemoteOperationFailure::http(status, status_text(status), body)),
        )
    }

    /// Use `result` for every call to `endpoint` once its queue is drained.
    pub fn always(&self, endpoint: Endpoint, result: ApiResult<Payload>) -> &Self {
        lock(&self.sticky).insert(endpoint, result);
        self
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        lock(&self.calls).clone()
    }

    pub fn calls_to(&self, endpoint: Endpoint) -> Vec<ApiCall> {
        lock(&self.calls)
            .iter()
            .filter(|call| call.endpoint() == endpoint)
            .cloned()
            .collect()
    }

    pub fn count(&self, endpoint: Endpoint) -> usize {
        self.calls_to(endpoint).len()
    }

    pub fn clear_calls(&self) {
        lock(&self.calls).clear();
    }

    fn record(&self, call: ApiCall) -> ApiResult<Payload> {
        let endpoint = call.endpoint();
        lock(&self.calls).push(call);
        if let Some(result) = lock(&self.queued)
            .get_mut(&endpoint)
            .and_then(VecDeque::pop_front)
        {
            return result;
        }
        lock(&self.sticky)
            .get(&endpoint)
            .cloned()
            .unwrap_or_else(|| Ok(Payload::empty()))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn status_text(status: u16) -> &'static str {
    match status {
        400 => "Bad Request",
        404 => "Not Found",
        409 => "Conflict",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Error",
    }
}

#[async_trait]
impl ClientesApi for MockClientesApi {
    async fn search_clients(&self, empresa_id: &str, busqueda: Option<&str>) -> ApiResult<Payload> {
        self.record(ApiCall::SearchClients {
            empresa_id: empresa_id.to_string(),
            busqueda: busqueda.map(str::to_string),
        })
    }

    async fn get_client(&self, id: ClienteId) -> ApiResult<Payload> {
        self.record(ApiCall::GetClient(id))
    }

    async fn create_client(&self, request: &ClienteCreateRequest) -> ApiResult<Payload> {
        self.record(ApiCall::CreateClient(request.clone()))
    }

    async fn update_client(
        &self,
        id: ClienteId,
        request: &ClienteUpdateRequest,
    ) -> ApiResult<Payload> {
        self.record(ApiCall::UpdateClient(id, request.clone()))
    }

    async fn delete_client(&self, id: ClienteId) -> ApiResult<Payload> {
        self.record(ApiCall::DeleteClient(id))
    }

    async fn create_address(&self, request: &NuevaDireccion) -> ApiResult<Payload> {
        self.record(ApiCall::CreateAddress(request.clone()))
    }

    async fn delete_address(&self, id: DireccionId) -> ApiResult<Payload> {
        self.record(ApiCall::DeleteAddress(id))
    }

    async fn list_addresses(&self, cliente_id: ClienteId) -> ApiResult<Payload> {
        self.record(ApiCall::ListAddresses(cliente_id))
    }

    async fn list_secondary_addresses(&self, cliente_id: ClienteId) -> ApiResult<Payload> {
        self.record(ApiCall::ListSecondaryAddresses(cliente_id))
    }

    async fn get_primary_address(&self, cliente_id: ClienteId) -> ApiResult<Payload> {
        self.record(ApiCall::GetPrimaryAddress(cliente_id))
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

/// A persisted client with the given id and name.
pub fn cliente(id: i64, nombres: &str) -> Cliente {
    Cliente {
        id: Some(ClienteId(id)),
        empresa_id: "1".to_string(),
        numero_identificacion: format!("{:010}", id),
        nombres: nombres.to_string(),
        ..Cliente::default()
    }
}

/// A new-client draft that passes local validation.
pub fn valid_draft(nombres: &str) -> Cliente {
    Cliente {
        empresa_id: "1".to_string(),
        numero_identificacion: "0102030405".to_string(),
        nombres: nombres.to_string(),
        direccion_matriz: Some(DireccionMatriz {
            provincia: "Pichincha".to_string(),
            ciudad: "Quito".to_string(),
            direccion: "Av. Principal 123".to_string(),
        }),
        ..Cliente::draft()
    }
}

pub fn direccion(id: i64, cliente_id: i64, ciudad: &str, es_matriz: bool) -> Direccion {
    Direccion {
        id: Some(DireccionId(id)),
        cliente_id: Some(ClienteId(cliente_id)),
        provincia: "Pichincha".to_string(),
        ciudad: ciudad.to_string(),
        direccion: format!("Calle {}", id),
        es_matriz,
        creado_en: None,
    }
}

/// Wrap `data` in the backend's success envelope.
pub fn envelope(data: Value) -> Value {
    json!({
        "success": true,
        "message": "OK",
        "data": data,
        "timestamp": "2024-05-01T10:00:00"
    })
}

/// Successful payload carrying `items` as an enveloped list.
pub fn list_payload<T: serde::Serialize>(items: &[T]) -> ApiResult<Payload> {
    Ok(Payload::from_body(envelope(json!(items))))
}

/// Successful payload carrying one enveloped item.
pub fn item_payload<T: serde::Serialize>(item: &T) -> ApiResult<Payload> {
    Ok(Payload::from_body(envelope(json!(item))))
}

// ============================================================================
// GENERATORS
// ============================================================================

pub mod generators {
    use super::*;
    use proptest::prelude::*;

    pub fn arb_tipo() -> impl Strategy<Value = TipoIdentificacion> {
        prop_oneof![
            Just(TipoIdentificacion::Cedula),
            Just(TipoIdentificacion::Ruc),
            Just(TipoIdentificacion::Pasaporte),
        ]
    }

    /// Persisted client with an id in `1..10_000`.
    pub fn arb_cliente() -> impl Strategy<Value = Cliente> {
        (1i64..10_000, "[A-Za-z ]{1,30}", "[0-9]{10,13}", arb_tipo()).prop_map(
            |(id, nombres, numero, tipo)| Cliente {
                id: Some(ClienteId(id)),
                tipo_identificacion: tipo,
                numero_identificacion: numero,
                nombres,
                empresa_id: "1".to_string(),
                ..Cliente::default()
            },
        )
    }

    /// Clients with pairwise-distinct ids.
    pub fn arb_distinct_clientes(max: usize) -> impl Strategy<Value = Vec<Cliente>> {
        prop::collection::vec(arb_cliente(), 0..max).prop_map(|mut clientes| {
            let mut seen = std::collections::HashSet::new();
            clientes.retain(|c| seen.insert(c.id));
            clientes
        })
    }
}
