//! Remote API contract.

use crate::entities::{ClienteCreateRequest, ClienteUpdateRequest, NuevaDireccion};
use crate::envelope::Payload;
use crate::error::ApiResult;
use crate::identity::{ClienteId, DireccionId};
use async_trait::async_trait;

/// One method per logical backend operation.
///
/// Implementations return the unwrapped [`Payload`] on success and a
/// [`crate::RemoteOperationFailure`] on any failure. No retries, caching or
/// request deduplication.
#[async_trait]
pub trait ClientesApi: Send + Sync {
    async fn search_clients(&self, empresa_id: &str, busqueda: Option<&str>) -> ApiResult<Payload>;

    async fn get_client(&self, id: ClienteId) -> ApiResult<Payload>;

    async fn create_client(&self, request: &ClienteCreateRequest) -> ApiResult<Payload>;

    async fn update_client(&self, id: ClienteId, request: &ClienteUpdateRequest)
        -> ApiResult<Payload>;

    async fn delete_client(&self, id: ClienteId) -> ApiResult<Payload>;

    async fn create_address(&self, request: &NuevaDireccion) -> ApiResult<Payload>;

    async fn delete_address(&self, id: DireccionId) -> ApiResult<Payload>;

    async fn list_addresses(&self, cliente_id: ClienteId) -> ApiResult<Payload>;

    async fn list_secondary_addresses(&self, cliente_id: ClienteId) -> ApiResult<Payload>;

    async fn get_primary_address(&self, cliente_id: ClienteId) -> ApiResult<Payload>;
}
