use actix_web::{HttpResponse, Responder, get, post, web};
use log::{info, warn};

use super::models::{AppState, MessageResponse, NodesResponse, RegisterNodesRequest, ResolveResponse};
use crate::network::{adopt_longest, fetch_peer_chains};

/// Register peers from `{"nodes": ["http://host:port", ...]}`.
/// Either every address is accepted or none is.
#[post("/nodes/register")]
pub async fn register_nodes(
    state: web::Data<AppState>,
    body: web::Json<RegisterNodesRequest>,
) -> impl Responder {
    let Some(addresses) = body.into_inner().nodes else {
        return HttpResponse::BadRequest().json(MessageResponse {
            message: "Error: Please supply a valid list of nodes".to_string(),
        });
    };

    let mut nodes = state.nodes.lock().expect("mutex poisoned");
    let mut updated = nodes.clone();
    for address in &addresses {
        if let Err(e) = updated.register(address) {
            warn!("POST /nodes/register - rejected: {e}");
            return HttpResponse::BadRequest().json(MessageResponse {
                message: e.to_string(),
            });
        }
    }
    *nodes = updated;

    HttpResponse::Created().json(NodesResponse {
        message: "New nodes have been added.",
        total_nodes: nodes.list(),
    })
}

/// List registered peers.
#[get("/nodes/list")]
pub async fn list_nodes(state: web::Data<AppState>) -> impl Responder {
    let nodes = state.nodes.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(NodesResponse {
        message: "Total nodes list",
        total_nodes: nodes.list(),
    })
}

/// Run the longest-valid-chain rule against every registered peer.
/// Peer fetches block, so they run on a blocking worker with no ledger lock
/// held; the ledger is locked once afterwards to compare and replace.
#[get("/nodes/resolve")]
pub async fn resolve(state: web::Data<AppState>) -> impl Responder {
    let nodes = state.nodes.lock().expect("mutex poisoned").clone();
    let fetcher = state.fetcher.clone();
    let answers = web::block(move || fetch_peer_chains(&nodes, fetcher.as_ref())).await;

    let result = answers.map(|answers| {
        let mut ledger = state.ledger.lock().expect("mutex poisoned");
        let replaced = adopt_longest(&mut ledger, answers, &state.pow);
        (replaced, ledger.chain().to_vec())
    });

    match result {
        Ok((true, chain)) => {
            info!("GET /nodes/resolve - chain replaced ({} blocks)", chain.len());
            HttpResponse::Ok().json(ResolveResponse {
                message: "Our chain was replaced.",
                new_chain: Some(chain),
                chain: None,
            })
        }
        Ok((false, chain)) => HttpResponse::Ok().json(ResolveResponse {
            message: "Our chain is authoritative.",
            new_chain: None,
            chain: Some(chain),
        }),
        Err(e) => {
            warn!("GET /nodes/resolve - worker failed: {e}");
            HttpResponse::InternalServerError().json(MessageResponse {
                message: e.to_string(),
            })
        }
    }
}
