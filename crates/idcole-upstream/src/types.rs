//! Raw and normalized school record shapes.
//!
//! The portal emits school objects with its own field names and
//! inconsistent value types (`pension` may be a number or a string,
//! coordinates likewise), so every raw field rides through as an optional
//! [`serde_json::Value`] and is copied verbatim into the output record —
//! no coercion beyond what JSON decoding already performs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One school object as the portal emits it. Fields may be absent or of
/// unexpected type; unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawSchool {
    pub cod_mod: Option<Value>,
    pub cen_edu: Option<Value>,
    pub dir_cen: Option<Value>,
    pub d_gestion: Option<Value>,
    pub pension: Option<Value>,
    pub estudiantes_x_aula: Option<Value>,
    pub d_nivel: Option<Value>,
    pub d_modalidad: Option<Value>,
    pub d_turno: Option<Value>,
    pub d_alumnado: Option<Value>,
    pub d_region: Option<Value>,
    pub d_prov: Option<Value>,
    pub d_dist: Option<Value>,
    pub nlat_ie: Option<Value>,
    pub nlong_ie: Option<Value>,
}

/// A school record with the renamed output keys. Fields that were absent
/// upstream stay absent in the serialized JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct School {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cod_modular: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direccion: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gestion: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pension: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estudiantes_por_aula: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nivel: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modalidad: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turno: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alumnado: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departamento: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provincia: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distrito: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<Value>,
}

impl School {
    /// Maps a raw record field-for-field onto the output keys. Coordinates
    /// pass through unmodified.
    #[must_use]
    pub fn from_raw(raw: RawSchool) -> Self {
        Self {
            cod_modular: raw.cod_mod,
            nombre: raw.cen_edu,
            direccion: raw.dir_cen,
            gestion: raw.d_gestion,
            pension: raw.pension,
            estudiantes_por_aula: raw.estudiantes_x_aula,
            nivel: raw.d_nivel,
            modalidad: raw.d_modalidad,
            turno: raw.d_turno,
            alumnado: raw.d_alumnado,
            departamento: raw.d_region,
            provincia: raw.d_prov,
            distrito: raw.d_dist,
            lat: raw.nlat_ie,
            lng: raw.nlong_ie,
        }
    }
}

/// Outcome of extracting a search response: the upstream-reported grand
/// total and the records parsed from this page. The two may legitimately
/// differ (the total spans all pages).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    pub total: u64,
    pub schools: Vec<School>,
}
