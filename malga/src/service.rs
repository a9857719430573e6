//! Remote collaborators consumed by the charge pipeline.
//!
//! The pipeline never talks HTTP itself. It issues card and customer side
//! effects through these dyn-compatible traits, which the transport crate
//! implements over the REST API and tests implement in memory.

use std::future::Future;
use std::pin::Pin;

use crate::card::{
    CardCreatePayload, CardResponse, CardTokenizationPayload, CardTokenizationResponse,
};
use crate::customer::{Customer, CustomerLinkCardPayload, CustomerResponse};
use crate::error::MalgaError;

/// Boxed future type for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Card operations used while resolving a payment source.
pub trait CardService: Send + Sync {
    /// Exchanges card data (or a CVV) for a short-lived token.
    fn tokenize<'a>(
        &'a self,
        payload: &'a CardTokenizationPayload,
    ) -> BoxFuture<'a, Result<CardTokenizationResponse, MalgaError>>;

    /// Stores a card from a token, optionally running zero-dollar verification.
    fn create<'a>(
        &'a self,
        payload: &'a CardCreatePayload,
    ) -> BoxFuture<'a, Result<CardResponse, MalgaError>>;
}

/// Customer operations used while resolving the charge's customer.
pub trait CustomerService: Send + Sync {
    /// Creates a customer and returns the stored record.
    fn create<'a>(
        &'a self,
        customer: &'a Customer,
    ) -> BoxFuture<'a, Result<CustomerResponse, MalgaError>>;

    /// Attaches a stored card to a customer.
    fn link_card<'a>(
        &'a self,
        customer_id: &'a str,
        payload: &'a CustomerLinkCardPayload,
    ) -> BoxFuture<'a, Result<(), MalgaError>>;
}
