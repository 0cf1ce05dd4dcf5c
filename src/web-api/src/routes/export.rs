use actix_web::web;
use weather_core::{export, ExportFormat, WeatherRequestOutbound};

use crate::{
    error::{ErrorResponse, Result},
    response::Attachment,
    Database,
};

#[utoipa::path(
    get,
    path = "/api/weather/export/{format}",
    params(("format" = String, Path, description = "one of json, csv or md")),
    responses(
        (status = 200, description = "all records as a json, csv or markdown attachment", body = String),
        (status = 400, description = "unsupported format", body = ErrorResponse),
        (status = 500, description = "an internal error occured", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip(db))]
pub async fn export_weather_requests<T: Database>(
    db: web::Data<T>,
    format: web::Path<String>,
) -> Result<Attachment> {
    let format = ExportFormat::parse(&format)?;
    let records = db.weather_requests().await?;

    Ok(Attachment(export(format, &records)?))
}
