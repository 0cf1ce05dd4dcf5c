use actix_web::{web, HttpResponse, Scope};
use utoipa::OpenApi;

use crate::{ApiDoc, Database};

pub mod export;
pub mod lookup;
pub mod utils;
pub mod weather;

pub static WEATHER_SCOPE: &str = "/api/weather";

pub fn weather_scope<T: Database>() -> Scope {
    web::scope(WEATHER_SCOPE)
        .service(
            web::resource(["", "/"])
                .route(web::post().to(weather::create_weather_request::<T>))
                .route(web::get().to(weather::weather_requests::<T>)),
        )
        .route("/suggest", web::get().to(lookup::suggestions))
        .route("/current", web::post().to(lookup::current_weather))
        .route(
            "/export/{format}",
            web::get().to(export::export_weather_requests::<T>),
        )
        .service(
            web::resource("/{id}")
                .route(web::get().to(weather::weather_request::<T>))
                .route(web::put().to(weather::update_weather_request::<T>))
                .route(web::delete().to(weather::delete_weather_request::<T>)),
        )
}

pub async fn api_doc() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
