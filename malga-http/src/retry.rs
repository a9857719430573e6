//! Retry middleware for the reqwest client.
//!
//! A request is retried only when replaying it cannot duplicate a side
//! effect: idempotent methods, and POSTs carrying an idempotency key.

use std::time::Duration;

use http::{Extensions, Method};
use reqwest::{Request, Response};
use reqwest_middleware as rqm;

use crate::constants::{DEFAULT_RETRIES, DEFAULT_RETRY_DELAY, IDEMPOTENCY_KEY_HEADER};

/// Retries network failures and 5xx responses with a fixed delay.
#[derive(Debug, Clone, Copy)]
pub struct RetryMiddleware {
    retries: u32,
    delay: Duration,
}

impl Default for RetryMiddleware {
    fn default() -> Self {
        Self::new(DEFAULT_RETRIES, DEFAULT_RETRY_DELAY)
    }
}

impl RetryMiddleware {
    /// Creates a middleware making at most `retries` extra attempts.
    #[must_use]
    pub const fn new(retries: u32, delay: Duration) -> Self {
        Self { retries, delay }
    }

    /// Extra attempts allowed per request.
    #[must_use]
    pub const fn retries(&self) -> u32 {
        self.retries
    }
}

/// Returns `true` if replaying `req` is safe.
fn is_replayable(req: &Request) -> bool {
    match *req.method() {
        Method::GET | Method::HEAD | Method::OPTIONS | Method::PUT | Method::DELETE => true,
        Method::POST => req.headers().contains_key(IDEMPOTENCY_KEY_HEADER),
        _ => false,
    }
}

fn should_retry(result: &rqm::Result<Response>) -> bool {
    match result {
        Err(_) => true,
        Ok(res) => res.status().is_server_error(),
    }
}

/// Runs the next middleware or HTTP client in the chain.
async fn run_next(
    next: rqm::Next<'_>,
    req: Request,
    extensions: &mut Extensions,
) -> rqm::Result<Response> {
    next.run(req, extensions).await
}

#[async_trait::async_trait]
impl rqm::Middleware for RetryMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: rqm::Next<'_>,
    ) -> rqm::Result<Response> {
        let replayable = is_replayable(&req);
        let mut req = req;
        let mut attempt = 0;
        loop {
            // Bodies that cannot be cloned (streams) are sent once.
            let retry_req = if replayable && attempt < self.retries {
                req.try_clone()
            } else {
                None
            };
            let result = run_next(next.clone(), req, extensions).await;
            let Some(retry_req) = retry_req else {
                return result;
            };
            if !should_retry(&result) {
                return result;
            }
            attempt += 1;
            #[cfg(feature = "telemetry")]
            tracing::warn!(
                attempt,
                max = self.retries,
                delay = ?self.delay,
                status = ?result.as_ref().ok().map(Response::status),
                "retrying Malga API request"
            );
            drop(result);
            tokio::time::sleep(self.delay).await;
            req = retry_req;
        }
    }
}
