use crate::db::{DbConnection, DbPool};
use crate::models::{BakedGood, Bakery};
use crate::schema::{baked_goods, bakeries};
use diesel::prelude::*;
use diesel::r2d2::PoolError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("database connection error: {0}")]
    Pool(#[from] PoolError),

    #[error("database query error: {0}")]
    Query(#[from] diesel::result::Error),

    #[error("{entity} {id} has no {field}")]
    MissingTimestamp {
        entity: &'static str,
        id: i32,
        field: &'static str,
    },
}

/// Read-only queries over bakeries and their baked goods.
pub struct CatalogService {
    pool: DbPool,
}

impl CatalogService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<DbConnection, CatalogError> {
        Ok(self.pool.get()?)
    }

    /// Every bakery (ascending id) paired with its goods (ascending id).
    pub fn list_bakeries(&self) -> Result<Vec<(Bakery, Vec<BakedGood>)>, CatalogError> {
        let mut conn = self.conn()?;

        let all_bakeries = bakeries::table
            .order(bakeries::id.asc())
            .select(Bakery::as_select())
            .load(&mut conn)?;

        let goods = BakedGood::belonging_to(&all_bakeries)
            .order(baked_goods::id.asc())
            .select(BakedGood::as_select())
            .load(&mut conn)?;

        let grouped = goods.grouped_by(&all_bakeries);
        Ok(all_bakeries.into_iter().zip(grouped).collect())
    }

    pub fn find_bakery(&self, id: i32) -> Result<Option<(Bakery, Vec<BakedGood>)>, CatalogError> {
        let mut conn = self.conn()?;

        let bakery = match bakeries::table
            .find(id)
            .select(Bakery::as_select())
            .first(&mut conn)
            .optional()?
        {
            Some(b) => b,
            None => return Ok(None),
        };

        let goods = BakedGood::belonging_to(&bakery)
            .order(baked_goods::id.asc())
            .select(BakedGood::as_select())
            .load(&mut conn)?;

        Ok(Some((bakery, goods)))
    }

    /// All goods, most expensive first. Rows with equal prices come back in
    /// whatever order SQLite yields; there is no secondary key.
    pub fn baked_goods_by_price(&self) -> Result<Vec<BakedGood>, CatalogError> {
        let mut conn = self.conn()?;

        Ok(baked_goods::table
            .order(baked_goods::price.desc())
            .select(BakedGood::as_select())
            .load(&mut conn)?)
    }

    pub fn most_expensive_baked_good(&self) -> Result<Option<BakedGood>, CatalogError> {
        let mut conn = self.conn()?;

        Ok(baked_goods::table
            .order(baked_goods::price.desc())
            .select(BakedGood::as_select())
            .first(&mut conn)
            .optional()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{insert_baked_good, insert_bakery, memory_pool};

    const TS: &str = "2024-01-15 10:00:00";

    #[test]
    fn test_list_bakeries_empty_store() {
        let service = CatalogService::new(memory_pool());
        assert!(service.list_bakeries().unwrap().is_empty());
    }

    #[test]
    fn test_list_bakeries_groups_goods_by_owner() {
        let pool = memory_pool();
        let sweet = insert_bakery(&pool, "Sweet Tooth", TS);
        let crumbs = insert_bakery(&pool, "Crumbs", TS);
        let empty = insert_bakery(&pool, "Empty Shelf", TS);
        insert_baked_good(&pool, sweet, "Croissant", 3.5, TS);
        insert_baked_good(&pool, crumbs, "Bagel", 2.0, TS);
        insert_baked_good(&pool, sweet, "Eclair", 4.25, TS);

        let service = CatalogService::new(pool);
        let listed = service.list_bakeries().unwrap();

        assert_eq!(listed.len(), 3);
        let names = |goods: &Vec<BakedGood>| goods.iter().map(|g| g.name.clone()).collect::<Vec<_>>();

        assert_eq!(listed[0].0.id, sweet);
        assert_eq!(names(&listed[0].1), vec!["Croissant", "Eclair"]);
        assert_eq!(listed[1].0.id, crumbs);
        assert_eq!(names(&listed[1].1), vec!["Bagel"]);
        assert_eq!(listed[2].0.id, empty);
        assert!(listed[2].1.is_empty());
    }

    #[test]
    fn test_find_bakery() {
        let pool = memory_pool();
        let id = insert_bakery(&pool, "Sweet Tooth", TS);
        insert_baked_good(&pool, id, "Croissant", 3.5, TS);

        let service = CatalogService::new(pool);
        let (bakery, goods) = service.find_bakery(id).unwrap().unwrap();

        assert_eq!(bakery.name, "Sweet Tooth");
        assert_eq!(goods.len(), 1);
        assert_eq!(goods[0].bakery_id, id);
    }

    #[test]
    fn test_find_bakery_goods_in_id_order() {
        let pool = memory_pool();
        let id = insert_bakery(&pool, "Sweet Tooth", TS);
        let other = insert_bakery(&pool, "Crumbs", TS);
        let first = insert_baked_good(&pool, id, "Scone", 2.0, TS);
        insert_baked_good(&pool, other, "Bagel", 2.0, TS);
        let second = insert_baked_good(&pool, id, "Almond Croissant", 4.0, TS);

        let service = CatalogService::new(pool);
        let (_, goods) = service.find_bakery(id).unwrap().unwrap();

        let ids: Vec<i32> = goods.iter().map(|g| g.id).collect();
        let names: Vec<&str> = goods.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(ids, vec![first, second]);
        assert_eq!(names, vec!["Scone", "Almond Croissant"]);
    }

    #[test]
    fn test_find_bakery_missing() {
        let service = CatalogService::new(memory_pool());
        assert!(service.find_bakery(99).unwrap().is_none());
    }

    #[test]
    fn test_by_price_is_descending() {
        let pool = memory_pool();
        let id = insert_bakery(&pool, "Sweet Tooth", TS);
        for (name, price) in [("Roll", 0.75), ("Cake", 22.0), ("Tart", 5.5), ("Scone", 5.5)] {
            insert_baked_good(&pool, id, name, price, TS);
        }

        let service = CatalogService::new(pool);
        let goods = service.baked_goods_by_price().unwrap();

        assert_eq!(goods.len(), 4);
        assert!(goods.windows(2).all(|w| w[0].price >= w[1].price));
        assert_eq!(goods[0].name, "Cake");
        assert_eq!(goods[3].name, "Roll");
    }

    #[test]
    fn test_most_expensive() {
        let pool = memory_pool();
        let id = insert_bakery(&pool, "Sweet Tooth", TS);
        insert_baked_good(&pool, id, "Roll", 0.75, TS);
        insert_baked_good(&pool, id, "Cake", 22.0, TS);

        let service = CatalogService::new(pool);
        let good = service.most_expensive_baked_good().unwrap().unwrap();

        assert_eq!(good.name, "Cake");
        assert_eq!(good.price, 22.0);
    }

    #[test]
    fn test_most_expensive_empty_store() {
        let service = CatalogService::new(memory_pool());
        assert!(service.most_expensive_baked_good().unwrap().is_none());
    }
}
