use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, BlockInfoResponse, ChainResponse, MessageResponse};

/// Get the full blockchain.
#[get("/chain")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(ChainResponse {
        blockchain: ledger.chain(),
        length: ledger.len(),
    })
}

/// Look up a single block by its 1-based index.
#[get("/getinfo/{index}")]
pub async fn get_block(state: web::Data<AppState>, path: web::Path<(u64,)>) -> impl Responder {
    let index = path.into_inner().0;
    let ledger = state.ledger.lock().expect("mutex poisoned");
    match ledger.block(index) {
        Some(block) => HttpResponse::Ok().json(BlockInfoResponse {
            message: format!("Block[{index}] information"),
            block: block.clone(),
        }),
        None => HttpResponse::NotFound().json(MessageResponse {
            message: format!("Block[{index}] not found"),
        }),
    }
}
