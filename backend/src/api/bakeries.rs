use crate::{
    api::{
        baked_goods::BakedGoodRecord,
        response::{
            display_timestamp, display_timestamp_opt, json_response, not_found, query,
            required_timestamp,
        },
    },
    config::AppConfig,
    db::DbPool,
    models::{BakedGood, Bakery},
    services::catalog::CatalogError,
};
use actix_web::{get, http::StatusCode, web, Responder};
use serde::Serialize;

// ============================================================================
// Response DTOs
// ============================================================================

/// Entry of `GET /bakeries`, goods fully nested.
#[derive(Serialize, Debug, PartialEq)]
pub struct BakerySummary {
    pub id: i32,
    pub name: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub baked_goods: Vec<BakedGoodRecord>,
}

impl BakerySummary {
    pub fn new(bakery: Bakery, goods: Vec<BakedGood>) -> Self {
        Self {
            created_at: display_timestamp_opt(bakery.created_at.as_ref()),
            updated_at: display_timestamp_opt(bakery.updated_at.as_ref()),
            id: bakery.id,
            name: bakery.name,
            baked_goods: goods.into_iter().map(BakedGoodRecord::from).collect(),
        }
    }
}

/// Body of `GET /bakeries/{id}`. Unlike the listing, goods are names only
/// and `created_at` must be present.
#[derive(Serialize, Debug, PartialEq)]
pub struct BakeryDetail {
    pub id: i32,
    pub name: String,
    pub created_at: String,
    pub baked_goods: Vec<String>,
}

impl BakeryDetail {
    pub fn new(bakery: Bakery, goods: Vec<BakedGood>) -> Result<Self, CatalogError> {
        let created_at = required_timestamp(bakery.created_at, "bakery", bakery.id, "created_at")?;
        Ok(Self {
            id: bakery.id,
            name: bakery.name,
            created_at: display_timestamp(&created_at),
            baked_goods: goods.into_iter().map(|g| g.name).collect(),
        })
    }
}

// ============================================================================
// Endpoints
// ============================================================================

/// List all bakeries with their baked goods
#[get("")]
pub async fn list_bakeries(pool: web::Data<DbPool>, config: web::Data<AppConfig>) -> impl Responder {
    let bakeries = match query(&pool, |service| {
        Ok(service
            .list_bakeries()?
            .into_iter()
            .map(|(bakery, goods)| BakerySummary::new(bakery, goods))
            .collect::<Vec<_>>())
    })
    .await
    {
        Ok(b) => b,
        Err(resp) => return resp,
    };

    json_response(StatusCode::OK, &bakeries, &config)
}

/// Get a single bakery by id
#[get("/{id:\\d+}")]
pub async fn get_bakery(
    pool: web::Data<DbPool>,
    config: web::Data<AppConfig>,
    path: web::Path<String>,
) -> impl Responder {
    // The route only admits digits; anything past i32 cannot be a stored key.
    let id: i32 = match path.into_inner().parse() {
        Ok(id) => id,
        Err(_) => return not_found("Bakery not found", &config),
    };

    let bakery = match query(&pool, move |service| {
        service
            .find_bakery(id)?
            .map(|(bakery, goods)| BakeryDetail::new(bakery, goods))
            .transpose()
    })
    .await
    {
        Ok(b) => b,
        Err(resp) => return resp,
    };

    match bakery {
        Some(bakery) => json_response(StatusCode::OK, &bakery, &config),
        None => not_found("Bakery not found", &config),
    }
}

// ============================================================================
// Tests
// ============================================================================
