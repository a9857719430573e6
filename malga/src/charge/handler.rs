//! Handler chain driving charge normalization.
//!
//! Each [`ChargeHandler`] either rewrites the payload it owns or returns it
//! unchanged. [`HandlerChain`] runs them in order, feeding each handler's
//! output to the next and stopping at the first error.
//!
//! The chain is not transactional. When a later step fails, customers and
//! cards created by earlier steps remain on the remote side.

use super::payload::{ChargePayload, PaymentMethodState};
use crate::error::MalgaError;
use crate::service::BoxFuture;

/// One step of the charge normalization chain.
pub trait ChargeHandler: Send + Sync {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Transforms the payload, or returns it unchanged when the handler does
    /// not apply.
    fn handle(&self, payload: ChargePayload) -> BoxFuture<'_, Result<ChargePayload, MalgaError>>;
}

/// An ordered list of handlers.
#[derive(Default)]
pub struct HandlerChain<'a> {
    handlers: Vec<Box<dyn ChargeHandler + 'a>>,
}

impl std::fmt::Debug for HandlerChain<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.handlers.iter().map(|h| h.name()))
            .finish()
    }
}

impl<'a> HandlerChain<'a> {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Appends a handler.
    #[must_use]
    pub fn with_handler<H: ChargeHandler + 'a>(mut self, handler: H) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    /// Handler names, in execution order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    /// Runs the payload through every handler in order.
    ///
    /// A payment method that no handler claimed is forwarded unchanged.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a handler, unchanged.
    pub async fn run(&self, mut payload: ChargePayload) -> Result<ChargePayload, MalgaError> {
        for handler in &self.handlers {
            #[cfg(feature = "telemetry")]
            tracing::debug!(
                handler = handler.name(),
                payment_type = payload.payment_method.kind(),
                pending = payload.payment_method.is_pending(),
                "charge handler step"
            );
            payload = handler.handle(payload).await?;
        }
        if let PaymentMethodState::Pending(_method) = &payload.payment_method {
            #[cfg(feature = "telemetry")]
            tracing::warn!(
                payment_type = _method.kind(),
                "no handler normalized the payment method, forwarding unchanged"
            );
        }
        Ok(payload)
    }
}
