use chrono::NaiveDateTime;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::bakeries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Bakery {
    pub id: i32,
    pub name: String,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq)]
#[diesel(belongs_to(Bakery))]
#[diesel(table_name = crate::schema::baked_goods)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BakedGood {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub bakery_id: i32,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// Insert form for `bakeries`. Only the seed tool and tests write rows;
/// a `None` timestamp leaves the column to its database default.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::bakeries)]
pub struct NewBakery<'a> {
    pub name: &'a str,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::baked_goods)]
pub struct NewBakedGood<'a> {
    pub name: &'a str,
    pub price: f64,
    pub bakery_id: i32,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}
