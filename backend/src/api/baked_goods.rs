use crate::{
    api::response::{
        display_timestamp, display_timestamp_opt, iso_timestamp, json_response, not_found, query,
        required_timestamp,
    },
    config::AppConfig,
    db::DbPool,
    models::BakedGood,
    services::catalog::CatalogError,
};
use actix_web::{get, http::StatusCode, web, Responder};
use serde::Serialize;

// ============================================================================
// Response DTOs
// ============================================================================

/// Full representation of a good, as nested under `GET /bakeries`.
#[derive(Serialize, Debug, PartialEq)]
pub struct BakedGoodRecord {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub bakery_id: i32,
}

impl From<BakedGood> for BakedGoodRecord {
    fn from(good: BakedGood) -> Self {
        Self {
            created_at: display_timestamp_opt(good.created_at.as_ref()),
            updated_at: display_timestamp_opt(good.updated_at.as_ref()),
            id: good.id,
            name: good.name,
            price: good.price,
            bakery_id: good.bakery_id,
        }
    }
}

/// Row of `GET /baked_goods/by_price`; timestamps are ISO-8601.
#[derive(Serialize, Debug, PartialEq)]
pub struct PricedBakedGood {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub created_at: String,
    pub updated_at: Option<String>,
    pub bakery_id: i32,
}

impl TryFrom<BakedGood> for PricedBakedGood {
    type Error = CatalogError;

    fn try_from(good: BakedGood) -> Result<Self, Self::Error> {
        let created_at = required_timestamp(good.created_at, "baked good", good.id, "created_at")?;
        Ok(Self {
            id: good.id,
            name: good.name,
            price: good.price,
            created_at: iso_timestamp(&created_at),
            updated_at: good.updated_at.as_ref().map(iso_timestamp),
            bakery_id: good.bakery_id,
        })
    }
}

/// Body of `GET /baked_goods/most_expensive`.
#[derive(Serialize, Debug, PartialEq)]
pub struct MostExpensiveBakedGood {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub created_at: String,
}

impl TryFrom<BakedGood> for MostExpensiveBakedGood {
    type Error = CatalogError;

    fn try_from(good: BakedGood) -> Result<Self, Self::Error> {
        let created_at = required_timestamp(good.created_at, "baked good", good.id, "created_at")?;
        Ok(Self {
            id: good.id,
            name: good.name,
            price: good.price,
            created_at: display_timestamp(&created_at),
        })
    }
}

// ============================================================================
// Endpoints
// ============================================================================

/// All baked goods, most expensive first
#[get("/by_price")]
pub async fn baked_goods_by_price(
    pool: web::Data<DbPool>,
    config: web::Data<AppConfig>,
) -> impl Responder {
    let goods = match query(&pool, |service| {
        service
            .baked_goods_by_price()?
            .into_iter()
            .map(PricedBakedGood::try_from)
            .collect::<Result<Vec<_>, _>>()
    })
    .await
    {
        Ok(goods) => goods,
        Err(resp) => return resp,
    };

    json_response(StatusCode::OK, &goods, &config)
}

/// The single most expensive baked good
#[get("/most_expensive")]
pub async fn most_expensive_baked_good(
    pool: web::Data<DbPool>,
    config: web::Data<AppConfig>,
) -> impl Responder {
    let good = match query(&pool, |service| {
        service
            .most_expensive_baked_good()?
            .map(MostExpensiveBakedGood::try_from)
            .transpose()
    })
    .await
    {
        Ok(good) => good,
        Err(resp) => return resp,
    };

    match good {
        Some(good) => json_response(StatusCode::OK, &good, &config),
        None => not_found("No baked goods found", &config),
    }
}

// ============================================================================
// Tests
// ============================================================================
