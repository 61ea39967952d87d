//! REST client behaviour against an in-process axum backend.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use minegocio_core::{Cliente, ClienteId, ClientesApi, Direccion, DireccionId};
use minegocio_test_utils::{cliente, envelope, valid_draft};
use minegocio_tui::api_client::RestClient;
use minegocio_tui::runtime::run_inline;
use minegocio_tui::state::ClientesState;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

type Log = Arc<Mutex<Vec<Value>>>;

fn record(log: &Log, method: &str, path: String, query: Value, body: Value) {
    log.lock().unwrap().push(json!({
        "method": method,
        "path": path,
        "query": query,
        "body": body,
    }));
}

async fn buscar(State(log): State<Log>, Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    record(&log, "GET", "/clientes/buscar".into(), json!(query), Value::Null);
    Json(envelope(json!([
        {"id": 7, "nombres": "Ana", "empresaId": 1, "tipoIdentificacion": "CEDULA"}
    ])))
}

async fn crear(State(log): State<Log>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    record(&log, "POST", "/clientes".into(), Value::Null, body.clone());
    let mut created = body;
    created["id"] = json!(11);
    (StatusCode::CREATED, Json(envelope(created)))
}

async fn obtener(State(log): State<Log>, Path(id): Path<i64>) -> Json<Value> {
    record(&log, "GET", format!("/clientes/{}", id), Value::Null, Value::Null);
    Json(envelope(json!({"id": id, "nombres": "Ana", "empresaId": "1"})))
}

async fn actualizar(
    State(log): State<Log>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    record(&log, "PUT", format!("/clientes/{}", id), Value::Null, body.clone());
    let mut updated = body;
    updated["id"] = json!(id);
    Json(envelope(updated))
}

async fn eliminar(State(log): State<Log>, Path(id): Path<i64>) -> Response {
    record(&log, "DELETE", format!("/clientes/{}", id), Value::Null, Value::Null);
    if id == 7 {
        StatusCode::NO_CONTENT.into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({"success": false, "message": "Cliente no encontrado", "data": null})),
        )
            .into_response()
    }
}

async fn crear_direccion(State(log): State<Log>, Json(body): Json<Value>) -> Json<Value> {
    record(&log, "POST", "/clientes/direcciones".into(), Value::Null, body.clone());
    Json(envelope(body))
}

async fn eliminar_direccion(State(log): State<Log>, Path(id): Path<i64>) -> StatusCode {
    record(
        &log,
        "DELETE",
        format!("/clientes/direcciones/{}", id),
        Value::Null,
        Value::Null,
    );
    StatusCode::NO_CONTENT
}

async fn listar_direcciones(Path(_id): Path<i64>) -> (StatusCode, &'static str) {
    (StatusCode::OK, "<html>not json</html>")
}

async fn listar_adicionales(Path(id): Path<i64>) -> Json<Value> {
    Json(envelope(json!([
        {"id": 2, "provincia": "Azuay", "ciudad": "Cuenca", "direccion": "Calle Larga 4", "esMatriz": false, "clienteId": id}
    ])))
}

async fn matriz(Path(id): Path<i64>) -> Json<Value> {
    // Served without the envelope.
    Json(json!({
        "id": 1, "provincia": "Pichincha", "ciudad": "Quito", "direccion": "Av. Amazonas",
        "esMatriz": true, "clienteId": id, "creadoEn": "2024-05-01T10:00:00"
    }))
}

async fn spawn_backend() -> (RestClient, Log) {
    let log: Log = Arc::default();
    let app = Router::new()
        .route("/api/clientes", post(crear))
        .route("/api/clientes/buscar", get(buscar))
        .route("/api/clientes/direcciones", post(crear_direccion))
        .route("/api/clientes/direcciones/:id", delete(eliminar_direccion))
        .route(
            "/api/clientes/:id",
            get(obtener).put(actualizar).delete(eliminar),
        )
        .route("/api/clientes/:id/direcciones", get(listar_direcciones))
        .route(
            "/api/clientes/:id/direcciones/adicionales",
            get(listar_adicionales),
        )
        .route("/api/clientes/:id/direcciones/matriz", get(matriz))
        .with_state(log.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = RestClient::with_base_url(&format!("http://{}/api/", addr), None).unwrap();
    (client, log)
}

fn last(log: &Log) -> Value {
    log.lock().unwrap().last().cloned().unwrap_or(Value::Null)
}

#[tokio::test]
async fn base_url_trailing_slash_is_trimmed() {
    let client = RestClient::with_base_url("http://localhost:8080/api/", None).unwrap();
    assert_eq!(client.base_url(), "http://localhost:8080/api");
}

#[tokio::test]
async fn search_sends_query_and_unwraps_envelope() {
    let (client, log) = spawn_backend().await;

    let clientes = client
        .search_clients("1", None)
        .await
        .unwrap()
        .into_list::<Cliente>();
    assert_eq!(clientes.len(), 1);
    assert_eq!(clientes[0].id, Some(ClienteId(7)));
    assert_eq!(clientes[0].empresa_id, "1");
    assert_eq!(last(&log)["query"], json!({"empresaId": "1"}));

    client.search_clients("1", Some("")).await.unwrap();
    assert_eq!(last(&log)["query"], json!({"empresaId": "1"}));

    client.search_clients("1", Some("ana lu")).await.unwrap();
    assert_eq!(
        last(&log)["query"],
        json!({"empresaId": "1", "busqueda": "ana lu"})
    );
}

#[tokio::test]
async fn create_posts_camel_case_payload() {
    let (client, log) = spawn_backend().await;

    let created = client
        .create_client(&valid_draft("Ana").create_request())
        .await
        .unwrap()
        .into_item::<Cliente>()
        .unwrap();

    assert_eq!(created.id, Some(ClienteId(11)));
    let body = &last(&log)["body"];
    assert_eq!(body["empresaId"], json!("1"));
    assert_eq!(body["tipoIdentificacion"], json!("CEDULA"));
    assert_eq!(body["direccionMatriz"]["ciudad"], json!("Quito"));
    assert!(body.get("correo").map_or(true, Value::is_null));
}

#[tokio::test]
async fn update_puts_without_tenant_or_primary_address() {
    let (client, log) = spawn_backend().await;
    let mut existing = cliente(4, "Ana");
    existing.correo = Some("ana@example.test".to_string());

    client
        .update_client(ClienteId(4), &existing.update_request())
        .await
        .unwrap();

    let entry = last(&log);
    assert_eq!(entry["method"], json!("PUT"));
    assert_eq!(entry["path"], json!("/clientes/4"));
    assert!(entry["body"].get("empresaId").is_none());
    assert!(entry["body"].get("direccionMatriz").is_none());
    assert_eq!(entry["body"]["correo"], json!("ana@example.test"));
}

#[tokio::test]
async fn get_client_hits_item_path() {
    let (client, log) = spawn_backend().await;
    let found = client
        .get_client(ClienteId(3))
        .await
        .unwrap()
        .into_item::<Cliente>()
        .unwrap();
    assert_eq!(found.id, Some(ClienteId(3)));
    assert_eq!(last(&log)["path"], json!("/clientes/3"));
}

#[tokio::test]
async fn no_content_is_an_empty_result() {
    let (client, _log) = spawn_backend().await;
    let payload = client.delete_client(ClienteId(7)).await.unwrap();
    assert!(payload.is_empty());
}

#[tokio::test]
async fn non_success_status_maps_to_failure() {
    let (client, _log) = spawn_backend().await;

    let err = client.delete_client(ClienteId(8)).await.unwrap_err();

    assert_eq!(err.status, Some(404));
    assert_eq!(err.status_text, "Not Found");
    assert!(err.body.contains("Cliente no encontrado"));
    assert_eq!(err.to_string(), "404 Not Found - Cliente no encontrado");
}

#[tokio::test]
async fn unenveloped_body_is_the_result() {
    let (client, _log) = spawn_backend().await;
    let matriz = client
        .get_primary_address(ClienteId(5))
        .await
        .unwrap()
        .into_item::<Direccion>()
        .unwrap();
    assert!(matriz.es_matriz);
    assert_eq!(matriz.ciudad, "Quito");
    assert!(matriz.creado_en.is_some());
}

#[tokio::test]
async fn non_json_success_body_fails_with_status_and_body() {
    let (client, _log) = spawn_backend().await;
    let err = client.list_addresses(ClienteId(5)).await.unwrap_err();
    assert_eq!(err.status, Some(200));
    assert_eq!(err.body, "<html>not json</html>");
}

#[tokio::test]
async fn address_endpoints_use_documented_paths() {
    let (client, log) = spawn_backend().await;

    let adicionales = client
        .list_secondary_addresses(ClienteId(5))
        .await
        .unwrap()
        .into_list::<Direccion>();
    assert_eq!(adicionales.len(), 1);

    client.delete_address(DireccionId(2)).await.unwrap();
    assert_eq!(last(&log)["path"], json!("/clientes/direcciones/2"));

    let mut draft = minegocio_core::NuevaDireccion::for_cliente(Some(ClienteId(5)));
    draft.provincia = "Azuay".to_string();
    draft.ciudad = "Cuenca".to_string();
    draft.direccion = "Calle Larga 4".to_string();
    client.create_address(&draft).await.unwrap();
    let entry = last(&log);
    assert_eq!(entry["path"], json!("/clientes/direcciones"));
    assert_eq!(entry["body"]["clienteId"], json!(5));
    assert_eq!(entry["body"]["direccion"], json!("Calle Larga 4"));
}

#[tokio::test]
async fn transport_failure_has_no_status() {
    let client = RestClient::with_base_url("http://127.0.0.1:1/api", None).unwrap();
    let err = client.get_client(ClienteId(1)).await.unwrap_err();
    assert!(err.is_transport());
    assert!(err.status.is_none());
}

#[tokio::test]
async fn orchestrator_against_live_backend() {
    let (client, _log) = spawn_backend().await;
    let mut state = ClientesState::default();

    state.search("1", "").unwrap();
    run_inline(&mut state, &client).await;
    assert_eq!(state.results.len(), 1);

    state.select_for_addresses(state.results[0].clone());
    run_inline(&mut state, &client).await;
    // The full list endpoint serves garbage; the other two still land.
    assert!(state.addresses.todas.is_empty());
    assert_eq!(state.addresses.adicionales.len(), 1);
    assert!(state.addresses.matriz.is_some());

    let first = state.results[0].clone();
    state.delete(&first, &|_: &str| true).unwrap();
    run_inline(&mut state, &client).await;
    assert!(state.results.is_empty());
    assert!(state.viewing.is_none());
}
