//! Utilidades de validación
//!
//! Funciones helper para validar parámetros de entrada antes de tocar el store.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use validator::ValidationError;

use crate::utils::errors::AppError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const MISSING_DATE: &str = "Missing required query param 'date' (YYYY-MM-DD)";

/// Validar y convertir un string `YYYY-MM-DD` a fecha.
///
/// Sólo se acepta la forma canónica (`2024-05-01`, no `2024-5-1`), de modo que
/// la igualdad de fechas equivale a la igualdad de los textos almacenados.
pub fn parse_calendar_day(value: &str) -> Result<NaiveDate, ValidationError> {
    let bytes = value.as_bytes();
    let canonical = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });

    canonical
        .then(|| NaiveDate::parse_from_str(value, DATE_FORMAT).ok())
        .flatten()
        .ok_or_else(|| {
            let mut error = ValidationError::new("date");
            error.add_param("value".into(), &value.to_string());
            error.add_param("format".into(), &"YYYY-MM-DD".to_string());
            error
        })
}

/// Fecha obligatoria de una consulta: ausente o vacía y mal formada son
/// errores de entrada distintos
pub fn require_date(value: Option<&str>, param: &str) -> Result<NaiveDate, AppError> {
    let raw = value.map(str::trim).filter(|v| !v.is_empty());

    let Some(raw) = raw else {
        return Err(AppError::InvalidInput(if param == "date" {
            MISSING_DATE.to_string()
        } else {
            format!("Missing required query param '{}' (YYYY-MM-DD)", param)
        }));
    };

    parse_calendar_day(raw).map_err(|_| {
        AppError::InvalidInput(format!(
            "Invalid {} '{}': expected YYYY-MM-DD",
            param, raw
        ))
    })
}

/// Normalizar un filtro opcional: se recorta y un valor en blanco equivale
/// a no filtrar
pub fn normalize_filter(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub fn format_day(day: NaiveDate) -> String {
    day.format(DATE_FORMAT).to_string()
}

/// Número tolerante: acepta `8500`, `8500.0` o `"8500"`; cualquier otra
/// cosa se lee como ausente
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

/// Entero no negativo tolerante: `4`, `4.0` y `"4"` valen 4
pub fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(number_from_value)
        .filter(|n| n.fract() == 0.0 && *n >= 0.0 && *n <= f64::from(u32::MAX))
        .map(|n| n as u32))
}

fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}
