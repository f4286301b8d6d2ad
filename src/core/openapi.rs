use utoipa::{Modify, OpenApi};

use crate::features::health;
use crate::features::thefts::{dtos as thefts_dtos, handlers as thefts_handlers};
use crate::shared::types::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::root,
        // Thefts
        thefts_handlers::submit_theft,
        thefts_handlers::list_active_zones,
    ),
    components(
        schemas(
            // Shared
            ErrorResponse,
            // Thefts
            thefts_dtos::SubmitTheftDto,
            thefts_dtos::SubmitTheftResponseDto,
            thefts_dtos::TheftReportResponseDto,
        )
    ),
    tags(
        (name = "health", description = "Liveness"),
        (name = "thefts", description = "Bicycle theft reports and active red zones"),
    ),
    info(
        title = "Zonas Rojas API",
        version = "0.1.0",
        description = "Reportes de robo de bicicletas y zonas rojas activas",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
