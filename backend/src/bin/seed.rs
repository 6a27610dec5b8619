//! Seed - fills the database with a small demo catalog
//!
//! Wipes both tables, then inserts a few bakeries and their baked goods so
//! the API has something to serve locally. Uses the same environment as the
//! server (DATABASE_URL, RUN_MIGRATIONS, ...).

use chrono::{Duration, Local, NaiveDateTime};
use diesel::prelude::*;

use bakery_api::config::AppConfig;
use bakery_api::db;
use bakery_api::models::{NewBakedGood, NewBakery};
use bakery_api::schema::{baked_goods, bakeries};

type Catalog<'a> = &'a [(&'a str, &'a [(&'a str, f64)])];

const CATALOG: Catalog<'static> = &[
    (
        "Sweet Tooth",
        &[("Croissant", 3.5), ("Pain au Chocolat", 4.0), ("Eclair", 4.25)],
    ),
    (
        "Crumbs & Co.",
        &[("Sourdough Loaf", 8.0), ("Bagel", 2.0), ("Cinnamon Roll", 3.75)],
    ),
    (
        "The Rolling Pin",
        &[("Baguette", 2.25), ("Lemon Tart", 5.5), ("Celebration Cake", 42.0)],
    ),
];

fn seed(
    conn: &mut SqliteConnection,
    catalog: Catalog<'_>,
    now: NaiveDateTime,
) -> QueryResult<(usize, usize)> {
    conn.transaction::<_, diesel::result::Error, _>(|conn| {
        diesel::delete(baked_goods::table).execute(conn)?;
        diesel::delete(bakeries::table).execute(conn)?;

        let mut goods_count = 0;
        for (offset, (bakery_name, goods)) in catalog.iter().enumerate() {
            let created_at = now - Duration::days(30 * (catalog.len() - offset) as i64);

            let bakery_id: i32 = diesel::insert_into(bakeries::table)
                .values(NewBakery {
                    name: *bakery_name,
                    created_at: Some(created_at),
                    updated_at: None,
                })
                .returning(bakeries::id)
                .get_result(conn)?;

            for (name, price) in goods.iter() {
                diesel::insert_into(baked_goods::table)
                    .values(NewBakedGood {
                        name: *name,
                        price: *price,
                        bakery_id,
                        created_at: Some(now),
                        updated_at: None,
                    })
                    .execute(conn)?;
                goods_count += 1;
            }
        }

        Ok((catalog.len(), goods_count))
    })
}

fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let pool = match db::init_pool(&config) {
        Ok(p) => p,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let mut conn = match pool.get() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to get database connection: {}", e);
            std::process::exit(1);
        }
    };

    log::info!("Seeding {}...", config.database_url);

    match seed(&mut conn, CATALOG, Local::now().naive_local()) {
        Ok((bakery_count, goods_count)) => log::info!(
            "Seeded {} bakeries and {} baked goods",
            bakery_count,
            goods_count
        ),
        Err(e) => {
            log::error!("Seeding failed: {}", e);
            std::process::exit(1);
        }
    }
}
