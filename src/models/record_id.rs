//! Identificador de registro
//!
//! Los registros del store pueden tener ids numéricos o de texto. La
//! representación original se conserva al serializar, pero toda comparación
//! se hace sobre la forma de texto.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Str(String),
}

impl RecordId {
    /// Clave de comparación (equivalente a `String(id)`)
    pub fn key(&self) -> String {
        match self {
            RecordId::Int(n) => n.to_string(),
            RecordId::Str(s) => s.clone(),
        }
    }

    /// Extraer el id de un registro JSON crudo
    pub fn of_record(record: &serde_json::Value) -> Option<RecordId> {
        match record.get("id")? {
            serde_json::Value::Number(n) => n.as_i64().map(RecordId::Int),
            serde_json::Value::String(s) => Some(RecordId::Str(s.clone())),
            _ => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            RecordId::Int(n) => serde_json::Value::from(*n),
            RecordId::Str(s) => serde_json::Value::from(s.as_str()),
        }
    }
}

impl PartialEq for RecordId {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for RecordId {}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{}", n),
            RecordId::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Int(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Str(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_and_string_ids_compare_as_strings() {
        assert_eq!(RecordId::Int(1), RecordId::from("1"));
        assert_ne!(RecordId::Int(1), RecordId::from("01"));
    }

    #[test]
    fn test_representation_is_preserved() {
        let id: RecordId = serde_json::from_value(json!(7)).unwrap();
        assert_eq!(serde_json::to_value(&id).unwrap(), json!(7));

        let id: RecordId = serde_json::from_value(json!("abc")).unwrap();
        assert_eq!(serde_json::to_value(&id).unwrap(), json!("abc"));
    }

    #[test]
    fn test_of_record() {
        assert_eq!(RecordId::of_record(&json!({ "id": 3 })), Some(RecordId::Int(3)));
        assert_eq!(RecordId::of_record(&json!({ "name": "x" })), None);
    }
}
