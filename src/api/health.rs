use actix_web::{HttpResponse, Responder, get};

use super::models::CheckResponse;

#[get("/check")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(CheckResponse { result: "OK" })
}
