//! Card vault endpoints.

use std::sync::Arc;

use malga::MalgaError;
use malga::card::{
    CardCreatePayload, CardListParams, CardResponse, CardTokenizationPayload,
    CardTokenizationResponse,
};
use malga::pagination::{Page, QueryPairs};
use malga::service::{BoxFuture, CardService};

use crate::api::{Api, RequestOptions};

/// Client for `/cards` and `/tokens`.
#[derive(Debug, Clone)]
pub struct Cards {
    api: Arc<Api>,
}

impl Cards {
    /// Creates a card client over a shared transport.
    #[must_use]
    pub const fn new(api: Arc<Api>) -> Self {
        Self { api }
    }

    /// Stores a card from a token.
    ///
    /// # Errors
    ///
    /// Returns [`MalgaError`] if the request fails or the API rejects it.
    pub async fn create(
        &self,
        payload: &CardCreatePayload,
        options: &RequestOptions,
    ) -> Result<CardResponse, MalgaError> {
        self.api
            .post("POST /cards", "cards", Vec::new(), payload, options, None)
            .await
    }

    /// Fetches a stored card.
    ///
    /// # Errors
    ///
    /// Returns [`MalgaError`] if the request fails or the API rejects it.
    pub async fn find(&self, id: &str) -> Result<CardResponse, MalgaError> {
        self.api
            .get("GET /cards/{id}", &format!("cards/{id}"), Vec::new())
            .await
    }

    /// Lists stored cards.
    ///
    /// # Errors
    ///
    /// Returns [`MalgaError`] if the request fails or the API rejects it.
    pub async fn list(&self, params: &CardListParams) -> Result<Page<CardResponse>, MalgaError> {
        self.api
            .get("GET /cards", "cards", params.query_pairs())
            .await
    }

    /// Exchanges card data for a token.
    ///
    /// Full card data is tokenized only when holder name, number, CVV and
    /// expiration date are all present; otherwise the CVV alone is sent as a
    /// CVV-update token.
    ///
    /// # Errors
    ///
    /// Returns [`MalgaError`] if the request fails or the API rejects it.
    pub async fn tokenization(
        &self,
        payload: &CardTokenizationPayload,
        options: &RequestOptions,
    ) -> Result<CardTokenizationResponse, MalgaError> {
        self.api
            .post("POST /tokens", "tokens", Vec::new(), &payload.to_body(), options, None)
            .await
    }
}

impl CardService for Cards {
    fn tokenize<'a>(
        &'a self,
        payload: &'a CardTokenizationPayload,
    ) -> BoxFuture<'a, Result<CardTokenizationResponse, MalgaError>> {
        Box::pin(async move { self.tokenization(payload, &RequestOptions::default()).await })
    }

    fn create<'a>(
        &'a self,
        payload: &'a CardCreatePayload,
    ) -> BoxFuture<'a, Result<CardResponse, MalgaError>> {
        Box::pin(async move { Cards::create(self, payload, &RequestOptions::default()).await })
    }
}
