use actix_web::{HttpResponse, Responder, get, web};
use log::{debug, info, warn};

use super::models::{AppState, MessageResponse, MineResponse};
use crate::blockchain::{Block, MINING_REWARD, PowOutcome, REWARD_SENDER};
use crate::error::MineError;

/// Mine a block from the pending pool:
/// - Solve the puzzle against the current head on a blocking worker
/// - Reward this node with a transaction from `REWARD_SENDER`
/// - Seal the block, linking it to the head it was solved against
#[get("/mine")]
pub async fn mine_block(state: web::Data<AppState>) -> impl Responder {
    match mine(&state).await {
        Ok(block) => {
            info!(
                "MINER - sealed block #{} (proof={}, txs={})",
                block.index,
                block.proof,
                block.transactions.len()
            );
            HttpResponse::Ok().json(MineResponse {
                message: "New block created.",
                index: block.index,
                transactions: block.transactions,
                proof: block.proof,
                previous_hash: block.previous_hash,
            })
        }
        Err(e) => {
            warn!("MINER - no block: {e}");
            error_response(&e)
        }
    }
}

fn error_response(e: &MineError) -> HttpResponse {
    let body = MessageResponse {
        message: e.to_string(),
    };
    match e {
        MineError::StaleHead => HttpResponse::Conflict().json(body),
        MineError::Exhausted { .. } | MineError::Cancelled => {
            HttpResponse::ServiceUnavailable().json(body)
        }
        MineError::Worker(_) => HttpResponse::InternalServerError().json(body),
    }
}

async fn mine(state: &web::Data<AppState>) -> Result<Block, MineError> {
    // Snapshot the head; the lock is released before the search starts.
    let (last_proof, last_hash) = {
        let ledger = state.ledger.lock().expect("mutex poisoned");
        let last = ledger.last_block();
        (last.proof, last.compute_hash())
    };

    let worker = state.clone();
    let outcome = web::block(move || {
        worker
            .pow
            .solve_with(last_proof, worker.max_iterations, &worker.shutdown)
    })
    .await
    .map_err(|e| MineError::Worker(e.to_string()))?;

    let proof = match outcome {
        PowOutcome::Found(proof) => proof,
        PowOutcome::Exhausted { iterations } => return Err(MineError::Exhausted { iterations }),
        PowOutcome::Cancelled => return Err(MineError::Cancelled),
    };
    debug!("MINER - proof {proof} solves last proof {last_proof}");

    seal_solved(state, last_hash, proof)
}

/// Reward this node and seal `proof`, provided the head is still the block
/// whose hash is `last_hash`. Nothing is added to the pool otherwise.
fn seal_solved(state: &AppState, last_hash: String, proof: u64) -> Result<Block, MineError> {
    let mut ledger = state.ledger.lock().expect("mutex poisoned");
    if ledger.last_block().compute_hash() != last_hash {
        return Err(MineError::StaleHead);
    }
    ledger.add_transaction(REWARD_SENDER, state.node_id.as_str(), MINING_REWARD);
    Ok(ledger.seal_block(proof, Some(last_hash)).clone())
}
