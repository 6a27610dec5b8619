use actix_web::{get, web, HttpResponse, Responder};

pub mod baked_goods;
pub mod bakeries;
pub mod response;

#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body("<h1>Bakery GET API</h1>")
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(index);

    cfg.service(
        web::scope("/bakeries")
            .service(bakeries::list_bakeries)
            .service(bakeries::get_bakery),
    );

    cfg.service(
        web::scope("/baked_goods")
            .service(baked_goods::baked_goods_by_price)
            .service(baked_goods::most_expensive_baked_good),
    );
}
