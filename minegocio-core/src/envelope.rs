//! Response envelope handling.
//!
//! The backend wraps results as `{success, message, data, timestamp}`. Callers
//! see only the logical result as a [`Payload`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Standard backend response wrapper.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiEnvelope {
    pub success: Option<bool>,
    pub message: Option<String>,
    pub data: Option<Value>,
    pub timestamp: Option<String>,
}

impl ApiEnvelope {
    /// Parse `text` as an envelope. Only JSON objects carrying at least one
    /// envelope key qualify.
    pub fn parse(text: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(text).ok()?;
        let object = value.as_object()?;
        let is_envelope = ["success", "message", "data", "timestamp"]
            .iter()
            .any(|key| object.contains_key(*key));
        if !is_envelope {
            return None;
        }
        serde_json::from_value(value).ok()
    }
}

/// The logical result of a successful call. Empty for 204 responses and for
/// envelopes whose `data` is `null`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Payload(Option<Value>);

impl Payload {
    pub fn empty() -> Self {
        Self(None)
    }

    /// Build from a response body, unwrapping the envelope when present.
    ///
    /// A JSON object with a `data` key is an envelope; anything else is the
    /// result itself.
    pub fn from_body(body: Value) -> Self {
        let inner = match body {
            Value::Object(mut object) if object.contains_key("data") => {
                object.remove("data").unwrap_or(Value::Null)
            }
            other => other,
        };
        Self::raw(inner)
    }

    /// Wrap an already-unwrapped result.
    pub fn raw(value: Value) -> Self {
        match value {
            Value::Null => Self(None),
            value => Self(Some(value)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Decode as a sequence. Missing or non-sequence payloads decode to an
    /// empty list; rows that fail to decode are skipped.
    pub fn into_list<T: DeserializeOwned>(self) -> Vec<T> {
        self.into_rows().rows
    }

    /// Decode a sequence row by row, keeping the rows that failed to decode
    /// alongside the ones that succeeded.
    pub fn into_rows<T: DeserializeOwned>(self) -> DecodedRows<T> {
        let mut decoded = DecodedRows {
            rows: Vec::new(),
            rejected: Vec::new(),
        };
        if let Some(Value::Array(items)) = self.0 {
            for (index, item) in items.into_iter().enumerate() {
                match serde_json::from_value(item) {
                    Ok(row) => decoded.rows.push(row),
                    Err(err) => decoded.rejected.push(RejectedRow {
                        index,
                        reason: err.to_string(),
                    }),
                }
            }
        }
        decoded
    }

    /// Decode as a single object, or `None` when missing or malformed.
    pub fn into_item<T: DeserializeOwned>(self) -> Option<T> {
        match self.0 {
            Some(value @ Value::Object(_)) => serde_json::from_value(value).ok(),
            _ => None,
        }
    }
}

/// Result of decoding a sequence row by row.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedRows<T> {
    pub rows: Vec<T>,
    pub rejected: Vec<RejectedRow>,
}

/// A sequence element that did not decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    pub index: usize,
    pub reason: String,
}

impl From<Value> for Payload {
    fn from(body: Value) -> Self {
        Self::from_body(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cliente, ClienteId, Direccion};
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn unwraps_envelope_data() {
        let payload = Payload::from_body(json!({
            "success": true,
            "message": "Se encontraron 1 clientes en total",
            "data": [{"id": 7, "nombres": "Ana"}],
            "timestamp": "2024-05-01T10:00:00"
        }));
        let clientes: Vec<Cliente> = payload.into_list();
        assert_eq!(clientes.len(), 1);
        assert_eq!(clientes[0].id, Some(ClienteId(7)));
        assert_eq!(clientes[0].nombres, "Ana");
    }

    #[test]
    fn null_data_is_empty() {
        let payload = Payload::from_body(json!({"data": null}));
        assert!(payload.is_empty());
        assert!(payload.into_list::<Cliente>().is_empty());
    }

    #[test]
    fn bare_body_is_the_result() {
        let payload = Payload::from_body(json!({"id": 2, "provincia": "Loja"}));
        let direccion: Option<Direccion> = payload.into_item();
        assert_eq!(direccion.map(|d| d.provincia), Some("Loja".to_string()));
    }

    #[test]
    fn non_sequence_list_is_empty() {
        let payload = Payload::from_body(json!({"data": {"id": 1}}));
        assert!(payload.into_list::<Cliente>().is_empty());
    }

    #[test]
    fn malformed_rows_are_skipped_individually() {
        let payload = Payload::from_body(json!({"data": [
            {"id": 7, "nombres": "Ana"},
            {"id": "seven"},
            {"id": 9, "nombres": "Carla", "tipoIdentificacion": "LICENCIA"},
            {"id": 8, "nombres": "Beto", "creadoEn": "2024-05-01T10:15:30Z"}
        ]}));
        let decoded = payload.into_rows::<Cliente>();
        let ids: Vec<i64> = decoded.rows.iter().filter_map(|c| c.id.map(ClienteId::get)).collect();
        assert_eq!(ids, vec![7, 8]);
        assert!(decoded.rows[1].creado_en.is_some());
        let rejected: Vec<usize> = decoded.rejected.iter().map(|r| r.index).collect();
        assert_eq!(rejected, vec![1, 2]);
    }

    #[test]
    fn envelope_parse_requires_envelope_keys() {
        assert!(ApiEnvelope::parse(r#"{"success":false,"message":"No encontrado"}"#).is_some());
        assert!(ApiEnvelope::parse(r#"{"error":"x"}"#).is_none());
        assert!(ApiEnvelope::parse("not json").is_none());
    }

    proptest! {
        #[test]
        fn scalar_payloads_never_decode_to_lists(n in any::<i64>(), s in ".*") {
            prop_assert!(Payload::from_body(json!(n)).into_list::<Cliente>().is_empty());
            prop_assert!(Payload::from_body(json!(s)).into_list::<Cliente>().is_empty());
        }

        #[test]
        fn enveloped_id_lists_preserve_order(ids in prop::collection::vec(1i64..10_000, 0..20)) {
            let data: Vec<_> = ids.iter().map(|id| json!({"id": id})).collect();
            let clientes: Vec<Cliente> = Payload::from_body(json!({"data": data})).into_list();
            let decoded: Vec<i64> = clientes.iter().filter_map(|c| c.id.map(ClienteId::get)).collect();
            prop_assert_eq!(decoded, ids);
        }
    }
}
