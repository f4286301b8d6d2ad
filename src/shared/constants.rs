/// Zone label stored when a report arrives without `zona`
pub const DEFAULT_ZONE_LABEL: &str = "Zona reportada";

/// Confirmation message returned after a report is stored
pub const REPORT_STORED_MESSAGE: &str = "Robo registrado";

/// Body of the plain-text liveness endpoint
pub const HEALTH_MESSAGE: &str = "API de zonas rojas funcionando";
