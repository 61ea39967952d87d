//! REST client for the clientes backend.

use crate::config::TuiConfig;
use async_trait::async_trait;
use minegocio_core::{
    ApiResult, ClienteCreateRequest, ClienteId, ClienteUpdateRequest, ClientesApi, DireccionId,
    NuevaDireccion, Payload, RemoteOperationFailure,
};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
}

impl RestClient {
    pub fn new(config: &TuiConfig) -> Result<Self, ApiClientError> {
        Self::with_base_url(&config.api_base_url, config.request_timeout())
    }

    pub fn with_base_url(
        base_url: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, ApiClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "api request");
        self.client.request(method, url)
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Payload> {
        let response = request.send().await.map_err(|err| {
            tracing::warn!(error = %err, "api transport failure");
            RemoteOperationFailure::transport(err.to_string())
        })?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(Payload::empty());
        }

        // Body read failures are treated as an empty body.
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), body = %text, "api call failed");
            return Err(RemoteOperationFailure::http(
                status.as_u16(),
                status.canonical_reason().unwrap_or(""),
                text,
            ));
        }

        if text.trim().is_empty() {
            return Ok(Payload::empty());
        }
        match serde_json::from_str::<Value>(&text) {
            Ok(body) => Ok(Payload::from_body(body)),
            Err(err) => {
                tracing::warn!(status = status.as_u16(), error = %err, "undecodable api response");
                Err(RemoteOperationFailure::http(
                    status.as_u16(),
                    "Invalid JSON response",
                    text,
                ))
            }
        }
    }
}

#[async_trait]
impl ClientesApi for RestClient {
    async fn search_clients(&self, empresa_id: &str, busqueda: Option<&str>) -> ApiResult<Payload> {
        let mut query = vec![("empresaId", empresa_id)];
        if let Some(busqueda) = busqueda.filter(|b| !b.is_empty()) {
            query.push(("busqueda", busqueda));
        }
        let request = self
            .request(Method::GET, "/clientes/buscar")
            .query(&query);
        self.send(request).await
    }

    async fn get_client(&self, id: ClienteId) -> ApiResult<Payload> {
        let path = format!("/clientes/{}", id);
        self.send(self.request(Method::GET, &path)).await
    }

    async fn create_client(&self, request: &ClienteCreateRequest) -> ApiResult<Payload> {
        let builder = self.request(Method::POST, "/clientes").json(request);
        self.send(builder).await
    }

    async fn update_client(
        &self,
        id: ClienteId,
        request: &ClienteUpdateRequest,
    ) -> ApiResult<Payload> {
        let path = format!("/clientes/{}", id);
        let builder = self.request(Method::PUT, &path).json(request);
        self.send(builder).await
    }

    async fn delete_client(&self, id: ClienteId) -> ApiResult<Payload> {
        let path = format!("/clientes/{}", id);
        self.send(self.request(Method::DELETE, &path)).await
    }

    async fn create_address(&self, request: &NuevaDireccion) -> ApiResult<Payload> {
        let builder = self
            .request(Method::POST, "/clientes/direcciones")
            .json(request);
        self.send(builder).await
    }

    async fn delete_address(&self, id: DireccionId) -> ApiResult<Payload> {
        let path = format!("/clientes/direcciones/{}", id);
        self.send(self.request(Method::DELETE, &path)).await
    }

    async fn list_addresses(&self, cliente_id: ClienteId) -> ApiResult<Payload> {
        let path = format!("/clientes/{}/direcciones", cliente_id);
        self.send(self.request(Method::GET, &path)).await
    }

    async fn list_secondary_addresses(&self, cliente_id: ClienteId) -> ApiResult<Payload> {
        let path = format!("/clientes/{}/direcciones/adicionales", cliente_id);
        self.send(self.request(Method::GET, &path)).await
    }

    async fn get_primary_address(&self, cliente_id: ClienteId) -> ApiResult<Payload> {
        let path = format!("/clientes/{}/direcciones/matriz", cliente_id);
        self.send(self.request(Method::GET, &path)).await
    }
}
