//! Stop order on a termination signal: in-flight proof searches are told to
//! give up before the server starts draining connections.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::info;

/// Wait for `signal`, raise `shutdown`, then run `stop`. The flag goes up
/// first so a graceful stop is never stuck behind a `/mine` search.
pub async fn cancel_then_stop<S, St, F>(signal: S, shutdown: Arc<AtomicBool>, stop: St)
where
    S: Future<Output = ()>,
    St: FnOnce() -> F,
    F: Future<Output = ()>,
{
    signal.await;
    info!("SHUTDOWN - signal received, cancelling mining");
    shutdown.store(true, Ordering::SeqCst);
    stop().await;
}

#[cfg(test)]
mod tests {
    use super::cancel_then_stop;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[actix_web::test]
    async fn flag_is_raised_before_stop() {
        let shutdown = Arc::new(AtomicBool::new(false));
        let seen = Arc::new(AtomicBool::new(false));

        let flag = shutdown.clone();
        let seen_in_stop = seen.clone();
        cancel_then_stop(std::future::ready(()), shutdown.clone(), move || async move {
            seen_in_stop.store(flag.load(Ordering::SeqCst), Ordering::SeqCst);
        })
        .await;

        assert!(shutdown.load(Ordering::SeqCst));
        assert!(seen.load(Ordering::SeqCst));
    }
}
