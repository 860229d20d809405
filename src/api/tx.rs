use actix_web::{HttpResponse, Responder, post, web};
use log::{debug, warn};

use super::models::{AppState, MessageResponse, NewTxRequest};
use crate::error::LedgerError;

/// Queue a transaction for the next block. Fields are required but their
/// values are not checked.
#[post("/transactions/new")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    body: Result<web::Json<NewTxRequest>, actix_web::Error>,
) -> impl Responder {
    let body = match body {
        Ok(body) => body.into_inner(),
        Err(e) => {
            let err = LedgerError::MalformedTransaction(e.to_string());
            warn!("POST /transactions/new - rejected: {err}");
            return HttpResponse::BadRequest().json(MessageResponse {
                message: format!("Missing values: {err}"),
            });
        }
    };

    let index = {
        let mut ledger = state.ledger.lock().expect("mutex poisoned");
        ledger.add_transaction(body.sender, body.recipient, body.amount)
    };
    debug!("POST /transactions/new - queued for block #{index}");

    HttpResponse::Created().json(MessageResponse {
        message: format!("Transaction will be added to Block {index}"),
    })
}
