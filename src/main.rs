use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::{info, warn};
use std::future::Future;
use std::sync::Arc;

use pow_ledger::api::{self, AppState};
use pow_ledger::config::Config;
use pow_ledger::network::{ChainFetcher, HttpChainFetcher};
use pow_ledger::shutdown::cancel_then_stop;

fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let config = Config::from_env();

    // The blocking HTTP client has to be created and dropped outside the
    // async runtime; this handle outlives the server.
    let fetcher: Arc<dyn ChainFetcher> = Arc::new(
        HttpChainFetcher::new(config.peer_timeout).map_err(std::io::Error::other)?,
    );

    actix_web::rt::System::new().block_on(serve(config, fetcher.clone()))
}

async fn serve(config: Config, fetcher: Arc<dyn ChainFetcher>) -> std::io::Result<()> {
    println!(
        "⛓️ Starting ledger node {} at http://{}:{} (difficulty {})",
        config.node_id, config.host, config.port, config.difficulty
    );

    let state = web::Data::new(AppState::new(&config, fetcher));
    let shutdown = state.shutdown.clone();

    // Signals are handled here so mining is cancelled before the drain.
    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .disable_signals()
    .bind((config.host.as_str(), config.port))?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(cancel_then_stop(ctrl_c(), shutdown.clone(), {
        let handle = handle.clone();
        move || handle.stop(true)
    }));
    #[cfg(unix)]
    actix_web::rt::spawn(cancel_then_stop(terminate(), shutdown, move || handle.stop(true)));

    let result = server.await;
    info!("node {} stopped", config.node_id);
    result
}

fn ctrl_c() -> impl Future<Output = ()> {
    async {
        if let Err(e) = actix_web::rt::signal::ctrl_c().await {
            warn!("SHUTDOWN - cannot listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(unix)]
fn terminate() -> impl Future<Output = ()> {
    use actix_web::rt::signal::unix::{SignalKind, signal};

    async {
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("SHUTDOWN - cannot listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    }
}
