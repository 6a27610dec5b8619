use crate::{
    config::AppConfig,
    db::DbPool,
    services::catalog::{CatalogError, CatalogService},
};
use actix_web::{http::StatusCode, http::header::ContentType, web, HttpResponse};
use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;
use std::fmt::Display;

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `YYYY-MM-DD HH:MM:SS`, seconds precision.
pub fn display_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(DISPLAY_FORMAT).to_string()
}

pub fn display_timestamp_opt(ts: Option<&NaiveDateTime>) -> Option<String> {
    ts.map(display_timestamp)
}

/// ISO-8601 without offset. The fractional part is six digits and only
/// present when the value has sub-second microseconds.
pub fn iso_timestamp(ts: &NaiveDateTime) -> String {
    if ts.nanosecond() / 1_000 == 0 {
        ts.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        ts.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

/// Unwrap a timestamp the response shape requires.
pub fn required_timestamp(
    ts: Option<NaiveDateTime>,
    entity: &'static str,
    id: i32,
    field: &'static str,
) -> Result<NaiveDateTime, CatalogError> {
    ts.ok_or(CatalogError::MissingTimestamp { entity, id, field })
}

#[derive(Serialize, Debug, PartialEq)]
pub struct ErrorBody {
    pub error: &'static str,
}

/// Serialize `body` with object keys in sorted order. Going through
/// `serde_json::Value` sorts them, since its map is a `BTreeMap`.
pub fn json_response<T: Serialize>(status: StatusCode, body: &T, config: &AppConfig) -> HttpResponse {
    let encoded = serde_json::to_value(body).and_then(|value| {
        if config.pretty_json {
            serde_json::to_string_pretty(&value)
        } else {
            serde_json::to_string(&value)
        }
    });

    match encoded {
        Ok(json) => HttpResponse::build(status)
            .content_type(ContentType::json())
            .body(json),
        Err(e) => internal_error(&e),
    }
}

pub fn not_found(message: &'static str, config: &AppConfig) -> HttpResponse {
    json_response(StatusCode::NOT_FOUND, &ErrorBody { error: message }, config)
}

pub fn internal_error(err: &dyn Display) -> HttpResponse {
    log::error!("Request failed: {}", err);
    HttpResponse::InternalServerError().body("Internal Server Error")
}

/// Run a catalog query on the blocking pool. Any failure has already been
/// turned into a 500 response when this returns `Err`.
pub async fn query<T, F>(pool: &web::Data<DbPool>, f: F) -> Result<T, HttpResponse>
where
    F: FnOnce(&CatalogService) -> Result<T, CatalogError> + Send + 'static,
    T: Send + 'static,
{
    let service = CatalogService::new(pool.get_ref().clone());

    match web::block(move || f(&service)).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(internal_error(&e)),
        Err(e) => Err(internal_error(&e)),
    }
}
