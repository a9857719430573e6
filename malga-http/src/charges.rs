//! Charge endpoints.
//!
//! [`Charges::create`] normalizes the request through
//! [`ChargePayloadBuilder`] before sending it, so the customer and card calls
//! a credit or voucher charge needs go out first, through this same client.

use std::sync::Arc;

use malga::MalgaError;
use malga::charge::{
    Charge, ChargeCapturePayload, ChargeCreateRequest, ChargeListParams, ChargePayloadBuilder,
    ChargeRefundPayload,
};
use malga::pagination::{Page, QueryPairs};

use crate::api::{Api, RequestOptions};
use crate::cards::Cards;
use crate::customers::Customers;

/// Client for `/charges` and session charges.
#[derive(Debug, Clone)]
pub struct Charges {
    api: Arc<Api>,
    cards: Cards,
    customers: Customers,
}

impl Charges {
    /// Creates a charge client over a shared transport.
    #[must_use]
    pub fn new(api: Arc<Api>) -> Self {
        Self {
            cards: Cards::new(Arc::clone(&api)),
            customers: Customers::new(Arc::clone(&api)),
            api,
        }
    }

    /// Creates a charge.
    ///
    /// Merchant charges go to `POST /charges`. Session charges go to
    /// `POST /sessions/{id}/charge`, authorized by the session's public key.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing call. Customers and cards
    /// created while normalizing the request are kept when a later call fails.
    pub async fn create(
        &self,
        request: ChargeCreateRequest,
        options: &RequestOptions,
    ) -> Result<Charge, MalgaError> {
        let session = request.session_target().cloned();
        let payload = ChargePayloadBuilder::new(&self.cards, &self.customers)
            .build(request)
            .await?;

        match session {
            Some(session) => {
                #[cfg(feature = "telemetry")]
                tracing::debug!(session_id = %session.session_id, "creating session charge");
                self.api
                    .post(
                        "POST /sessions/{id}/charge",
                        &format!("sessions/{}/charge", session.session_id),
                        Vec::new(),
                        &payload,
                        options,
                        Some(&session.public_key),
                    )
                    .await
            }
            None => {
                self.api
                    .post("POST /charges", "charges", Vec::new(), &payload, options, None)
                    .await
            }
        }
    }

    /// Fetches a charge.
    ///
    /// # Errors
    ///
    /// Returns [`MalgaError`] if the request fails or the API rejects it.
    pub async fn find(&self, id: &str) -> Result<Charge, MalgaError> {
        self.api
            .get("GET /charges/{id}", &format!("charges/{id}"), Vec::new())
            .await
    }

    /// Lists charges matching the filters.
    ///
    /// # Errors
    ///
    /// Returns [`MalgaError`] if the request fails or the API rejects it.
    pub async fn list(&self, params: &ChargeListParams) -> Result<Page<Charge>, MalgaError> {
        self.api
            .get("GET /charges", "charges", params.query_pairs())
            .await
    }

    /// Captures a pre-authorized charge.
    ///
    /// # Errors
    ///
    /// Returns [`MalgaError`] if the request fails or the API rejects it.
    pub async fn capture(
        &self,
        id: &str,
        payload: &ChargeCapturePayload,
        options: &RequestOptions,
    ) -> Result<Charge, MalgaError> {
        self.api
            .post(
                "POST /charges/{id}/capture",
                &format!("charges/{id}/capture"),
                Vec::new(),
                payload,
                options,
                None,
            )
            .await
    }

    /// Refunds all or part of a charge.
    ///
    /// # Errors
    ///
    /// Returns [`MalgaError`] if the request fails or the API rejects it.
    pub async fn refund(
        &self,
        id: &str,
        payload: &ChargeRefundPayload,
        options: &RequestOptions,
    ) -> Result<Charge, MalgaError> {
        self.api
            .post(
                "POST /charges/{id}/void",
                &format!("charges/{id}/void"),
                Vec::new(),
                payload,
                options,
                None,
            )
            .await
    }
}
