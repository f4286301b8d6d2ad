use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::core::error::AppError;
use crate::features::thefts::models::{NewTheftReport, TheftDetails, TheftReport};
use crate::shared::constants::DEFAULT_ZONE_LABEL;
use crate::shared::validation::is_external_url;

/// Request DTO for reporting a bicycle theft
///
/// Coordinates accept JSON numbers or numeric strings. Descriptive fields
/// accept strings; numbers and booleans are kept in their textual form.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SubmitTheftDto {
    /// Latitude of the theft, finite number (required)
    #[serde(default)]
    #[schema(value_type = f64)]
    pub lat: Option<Value>,

    /// Longitude of the theft, finite number (required)
    #[serde(default)]
    #[schema(value_type = f64)]
    pub lng: Option<Value>,

    /// Zone label, defaults to "Zona reportada"
    #[serde(default, deserialize_with = "lenient_text")]
    pub zona: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub hora: Option<String>,

    #[serde(default, rename = "tipoRobo", deserialize_with = "lenient_text")]
    pub tipo_robo: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub fecha: Option<String>,

    #[serde(default, rename = "tipoBici", deserialize_with = "lenient_text")]
    pub tipo_bici: Option<String>,

    #[serde(default, rename = "marcaBici", deserialize_with = "lenient_text")]
    pub marca_bici: Option<String>,

    #[serde(default, rename = "modeloBici", deserialize_with = "lenient_text")]
    pub modelo_bici: Option<String>,

    #[serde(default, rename = "anioBici", deserialize_with = "lenient_text")]
    pub anio_bici: Option<String>,

    #[serde(default, rename = "numeroSerie", deserialize_with = "lenient_text")]
    pub numero_serie: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub color: Option<String>,

    #[serde(default, rename = "descripcionBici", deserialize_with = "lenient_text")]
    pub descripcion_bici: Option<String>,

    #[serde(default, rename = "nombreReportante", deserialize_with = "lenient_text")]
    pub nombre_reportante: Option<String>,

    #[serde(default, rename = "emailReportante", deserialize_with = "lenient_text")]
    pub email_reportante: Option<String>,

    #[serde(default, rename = "telefonoReportante", deserialize_with = "lenient_text")]
    pub telefono_reportante: Option<String>,

    /// Photo URLs; entries that are not http(s) URLs are dropped
    #[serde(default, rename = "fotoUrls")]
    #[schema(value_type = Option<Vec<String>>)]
    pub foto_urls: Option<Value>,
}

/// Accept a string, number or boolean as text; anything else becomes `None`.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Read a coordinate from a JSON number or numeric string, finite values only
fn parse_coordinate(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Empty or whitespace-only text counts as absent
fn normalize_text(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Keep only string entries that are external URLs, in submission order
fn filter_photo_urls(value: Option<Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(url) if is_external_url(&url) => Some(url),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

impl TryFrom<SubmitTheftDto> for NewTheftReport {
    type Error = AppError;

    fn try_from(dto: SubmitTheftDto) -> Result<Self, Self::Error> {
        let latitude = parse_coordinate(dto.lat.as_ref());
        let longitude = parse_coordinate(dto.lng.as_ref());

        let (latitude, longitude) = match (latitude, longitude) {
            (Some(lat), Some(lng)) => (lat, lng),
            (lat, lng) => {
                let mut errors = Vec::new();
                if lat.is_none() {
                    errors.push("lat es requerido y debe ser un número finito".to_string());
                }
                if lng.is_none() {
                    errors.push("lng es requerido y debe ser un número finito".to_string());
                }
                return Err(AppError::Validation(errors));
            }
        };

        Ok(Self {
            latitude,
            longitude,
            zone: normalize_text(dto.zona).unwrap_or_else(|| DEFAULT_ZONE_LABEL.to_string()),
            details: TheftDetails {
                time_of_day: normalize_text(dto.hora),
                theft_type: normalize_text(dto.tipo_robo),
                theft_date: normalize_text(dto.fecha),
                bike_type: normalize_text(dto.tipo_bici),
                bike_brand: normalize_text(dto.marca_bici),
                bike_model: normalize_text(dto.modelo_bici),
                bike_year: normalize_text(dto.anio_bici),
                serial_number: normalize_text(dto.numero_serie),
                color: normalize_text(dto.color),
                bike_description: normalize_text(dto.descripcion_bici),
                reporter_name: normalize_text(dto.nombre_reportante),
                reporter_email: normalize_text(dto.email_reportante),
                reporter_phone: normalize_text(dto.telefono_reportante),
            },
            photo_urls: filter_photo_urls(dto.foto_urls),
        })
    }
}

/// Response DTO after a report is stored
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTheftResponseDto {
    pub mensaje: String,
    /// Instant after which the report leaves the active set
    pub expira: DateTime<Utc>,
    /// Number of photo URLs kept after filtering
    pub fotos_guardadas: usize,
}

/// Response DTO for an active theft report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TheftReportResponseDto {
    pub id: i64,
    pub lat: f64,
    pub lng: f64,
    pub zona: String,
    pub hora: Option<String>,
    pub tipo_robo: Option<String>,
    pub fecha: Option<String>,
    pub tipo_bici: Option<String>,
    pub marca_bici: Option<String>,
    pub modelo_bici: Option<String>,
    pub anio_bici: Option<String>,
    pub numero_serie: Option<String>,
    pub color: Option<String>,
    pub descripcion_bici: Option<String>,
    pub nombre_reportante: Option<String>,
    pub email_reportante: Option<String>,
    pub telefono_reportante: Option<String>,
    pub foto_urls: Vec<String>,
    pub creado_en: DateTime<Utc>,
    pub expira_en: DateTime<Utc>,
}

impl From<TheftReport> for TheftReportResponseDto {
    fn from(r: TheftReport) -> Self {
        let d = r.details;
        Self {
            id: r.id,
            lat: r.latitude,
            lng: r.longitude,
            zona: r.zone,
            hora: d.time_of_day,
            tipo_robo: d.theft_type,
            fecha: d.theft_date,
            tipo_bici: d.bike_type,
            marca_bici: d.bike_brand,
            modelo_bici: d.bike_model,
            anio_bici: d.bike_year,
            numero_serie: d.serial_number,
            color: d.color,
            descripcion_bici: d.bike_description,
            nombre_reportante: d.reporter_name,
            email_reportante: d.reporter_email,
            telefono_reportante: d.reporter_phone,
            foto_urls: r.photo_urls,
            creado_en: r.reported_at,
            expira_en: r.expires_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dto(value: Value) -> SubmitTheftDto {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_minimal_report_gets_defaults() {
        let report = NewTheftReport::try_from(dto(json!({"lat": 10.0, "lng": 20.0}))).unwrap();

        assert_eq!(report.latitude, 10.0);
        assert_eq!(report.longitude, 20.0);
        assert_eq!(report.zone, DEFAULT_ZONE_LABEL);
        assert_eq!(report.details, TheftDetails::default());
        assert!(report.photo_urls.is_empty());
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        let report =
            NewTheftReport::try_from(dto(json!({"lat": " -34.6037 ", "lng": "-58.3816"})))
                .unwrap();

        assert_eq!(report.latitude, -34.6037);
        assert_eq!(report.longitude, -58.3816);
    }

    #[test]
    fn test_invalid_latitude_is_rejected() {
        let err = NewTheftReport::try_from(dto(json!({"lat": "abc", "lng": 20.0}))).unwrap_err();

        match err {
            AppError::Validation(messages) => {
                assert_eq!(messages.len(), 1);
                assert!(messages[0].starts_with("lat"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_longitude_is_rejected() {
        let err = NewTheftReport::try_from(dto(json!({"lat": 10.0}))).unwrap_err();

        match err {
            AppError::Validation(messages) => assert!(messages[0].starts_with("lng")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_and_wrong_types_are_rejected() {
        let err =
            NewTheftReport::try_from(dto(json!({"lat": "NaN", "lng": true}))).unwrap_err();

        match err {
            AppError::Validation(messages) => assert_eq!(messages.len(), 2),
            other => panic!("expected validation error, got {:?}", other),
        }

        assert!(NewTheftReport::try_from(dto(json!({"lat": "inf", "lng": 1.0}))).is_err());
        assert!(NewTheftReport::try_from(dto(json!({"lat": null, "lng": 1.0}))).is_err());
    }

    #[test]
    fn test_photo_urls_keep_only_external_strings() {
        let report = NewTheftReport::try_from(dto(json!({
            "lat": 10.0,
            "lng": 20.0,
            "fotoUrls": ["http://x.com/a.jpg", "not-a-url", 42]
        })))
        .unwrap();

        assert_eq!(report.photo_urls, vec!["http://x.com/a.jpg".to_string()]);
    }

    #[test]
    fn test_photo_urls_non_array_is_ignored() {
        let report = NewTheftReport::try_from(dto(json!({
            "lat": 10.0,
            "lng": 20.0,
            "fotoUrls": "http://x.com/a.jpg"
        })))
        .unwrap();

        assert!(report.photo_urls.is_empty());
    }

    #[test]
    fn test_optional_fields_are_normalized() {
        let report = NewTheftReport::try_from(dto(json!({
            "lat": 10.0,
            "lng": 20.0,
            "zona": "   ",
            "tipoRobo": "",
            "marcaBici": "Trek",
            "anioBici": 2020,
            "descripcionBici": "  candado cortado  ",
            "color": {"primario": "rojo"}
        })))
        .unwrap();

        assert_eq!(report.zone, DEFAULT_ZONE_LABEL);
        assert_eq!(report.details.theft_type, None);
        assert_eq!(report.details.bike_brand.as_deref(), Some("Trek"));
        assert_eq!(report.details.bike_year.as_deref(), Some("2020"));
        // Non-empty text is stored verbatim
        assert_eq!(
            report.details.bike_description.as_deref(),
            Some("  candado cortado  ")
        );
        assert_eq!(report.details.color, None);
    }

    #[test]
    fn test_response_uses_camel_case_names() {
        let start = Utc::now();
        let stored = NewTheftReport::try_from(dto(json!({
            "lat": 10.0,
            "lng": 20.0,
            "tipoRobo": "Arrebato",
            "numeroSerie": "WTU123"
        })))
        .unwrap()
        .into_stored(7, start, start + chrono::TimeDelta::minutes(30));

        let body = serde_json::to_value(TheftReportResponseDto::from(stored)).unwrap();

        assert_eq!(body["id"], 7);
        assert_eq!(body["tipoRobo"], "Arrebato");
        assert_eq!(body["numeroSerie"], "WTU123");
        assert_eq!(body["zona"], DEFAULT_ZONE_LABEL);
        assert!(body["fotoUrls"].as_array().unwrap().is_empty());
        assert!(body.get("expiraEn").is_some());
        assert!(body.get("creadoEn").is_some());
    }
}
