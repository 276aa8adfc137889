//! Request body parsing and field rules shared by the controllers.
//!
//! Request structs deserialize every field as optional so that a missing field
//! is reported with a French message like any other rule violation. Only
//! malformed JSON and wrong field types fall back to the entity-level message.

use crate::db::models::EntityId;
use crate::error::{Error, FieldError};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::Path;
use axum::Json;
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub const REQUIRED: &str = "Ce champ est obligatoire";
pub const NAME_TOO_SHORT: &str = "Le nom doit comporter au moins 3 caractères";
pub const INVALID_STREAM_URL: &str = "URL de flux invalide";
pub const INVALID_LOCATION: &str = "Position invalide, format attendu : latitude,longitude";
pub const INVALID_STATUS: &str = "Statut invalide";
pub const INVALID_SEVERITY: &str = "Niveau de gravité invalide";
pub const INVALID_PRIORITY: &str = "Niveau de priorité invalide";
pub const INVALID_CHANNEL_TYPE: &str = "Type de canal invalide";
pub const INVALID_CONTACT_VALUE: &str = "Veuillez entrer une valeur valide";
pub const INVALID_TIMESTAMP: &str = "Horodatage invalide, format attendu : RFC 3339";

pub const MIN_NAME_LENGTH: usize = 3;

static LOCATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(-?\d+(?:\.\d+)?)\s*,\s*(-?\d+(?:\.\d+)?)\s*$").expect("location regex")
});

/// Deserialize a JSON body, mapping any failure to `invalid_message`
pub fn parse_body<T: DeserializeOwned>(
    payload: Result<Json<Value>, JsonRejection>,
    invalid_message: &str,
) -> Result<T, Error> {
    let Json(value) = payload.map_err(|rejection| {
        warn!("Rejected request body: {}", rejection);
        Error::invalid(invalid_message)
    })?;

    serde_json::from_value(value).map_err(|err| {
        warn!("Request body has wrong field types: {}", err);
        Error::invalid(invalid_message)
    })
}

/// Extract a numeric id from the path. Anything else cannot name a record, so
/// it is reported as `not_found`.
pub fn parse_id(
    path: Result<Path<EntityId>, PathRejection>,
    not_found: &str,
) -> Result<EntityId, Error> {
    let Path(id) = path.map_err(|rejection| {
        warn!("Rejected path parameter: {}", rejection);
        Error::NotFound(not_found.to_string())
    })?;

    Ok(id)
}

/// Whether `location` is a "lat,lng" pair within coordinate bounds
pub fn is_valid_location(location: &str) -> bool {
    let Some(caps) = LOCATION_RE.captures(location) else {
        return false;
    };

    match (caps[1].parse::<f64>(), caps[2].parse::<f64>()) {
        (Ok(lat), Ok(lng)) => (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng),
        _ => false,
    }
}

/// Whether `value` is an absolute URL with a host (http, rtsp, ...)
pub fn is_valid_stream_url(value: &str) -> bool {
    url::Url::parse(value.trim()).map_or(false, |url| url.has_host())
}

/// Collects field errors while a request is converted into a store input
#[derive(Debug, Default)]
pub struct Validator {
    fields: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` against `field` unless `ok`
    pub fn check(&mut self, field: &str, ok: bool, message: &str) {
        if !ok {
            self.fields.push(FieldError::new(field, message));
        }
    }

    /// Trimmed value of a required text field, empty if missing
    pub fn required(&mut self, field: &str, value: Option<String>) -> String {
        match value.map(|v| v.trim().to_string()) {
            Some(v) if !v.is_empty() => v,
            _ => {
                self.fields.push(FieldError::new(field, REQUIRED));
                String::new()
            }
        }
    }

    /// Required text field of at least `min` characters
    pub fn min_length(
        &mut self,
        field: &str,
        value: Option<String>,
        min: usize,
        message: &str,
    ) -> String {
        match value.map(|v| v.trim().to_string()) {
            None => {
                self.fields.push(FieldError::new(field, REQUIRED));
                String::new()
            }
            Some(v) => {
                self.check(field, v.chars().count() >= min, message);
                v
            }
        }
    }

    /// Field restricted to `allowed`, or `default` when absent
    pub fn one_of(
        &mut self,
        field: &str,
        value: Option<String>,
        allowed: &[&str],
        default: Option<&str>,
        message: &str,
    ) -> String {
        match (value, default) {
            (Some(v), _) => {
                let v = v.trim().to_string();
                self.check(field, allowed.contains(&v.as_str()), message);
                v
            }
            (None, Some(default)) => default.to_string(),
            (None, None) => {
                self.fields.push(FieldError::new(field, REQUIRED));
                String::new()
            }
        }
    }

    /// Required numeric field
    pub fn required_id<T: Copy + Default>(&mut self, field: &str, value: Option<T>) -> T {
        match value {
            Some(v) => v,
            None => {
                self.fields.push(FieldError::new(field, REQUIRED));
                T::default()
            }
        }
    }

    /// Return `value` if no rule failed, otherwise a validation error
    pub fn finish<T>(self, message: &str, value: T) -> Result<T, Error> {
        if self.fields.is_empty() {
            Ok(value)
        } else {
            warn!("{}: {:?}", message, self.fields);
            Err(Error::Validation {
                message: message.to_string(),
                fields: self.fields,
            })
        }
    }
}
