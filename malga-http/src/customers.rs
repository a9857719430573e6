//! Customer endpoints.

use std::sync::Arc;

use malga::MalgaError;
use malga::card::CardResponse;
use malga::customer::{
    Customer, CustomerCreateOptions, CustomerLinkCardPayload, CustomerListParams,
    CustomerResponse, CustomerUpdatePayload, CustomerUpdateResponse,
};
use malga::pagination::{Page, QueryPairs};
use malga::service::{BoxFuture, CustomerService};
use serde::de::IgnoredAny;

use crate::api::{Api, RequestOptions};

/// Client for `/customers`.
#[derive(Debug, Clone)]
pub struct Customers {
    api: Arc<Api>,
}

impl Customers {
    /// Creates a customer client over a shared transport.
    #[must_use]
    pub const fn new(api: Arc<Api>) -> Self {
        Self { api }
    }

    /// Creates a customer.
    ///
    /// With `force`, the API skips its email and document duplication checks.
    ///
    /// # Errors
    ///
    /// Returns [`MalgaError`] if the request fails or the API rejects it.
    pub async fn create(
        &self,
        customer: &Customer,
        options: &CustomerCreateOptions,
    ) -> Result<CustomerResponse, MalgaError> {
        let query = if options.force {
            vec![("force", "true".to_owned())]
        } else {
            Vec::new()
        };
        let request_options = RequestOptions {
            idempotency_key: options.idempotency_key.clone(),
        };
        self.api
            .post("POST /customers", "customers", query, customer, &request_options, None)
            .await
    }

    /// Fetches a customer.
    ///
    /// # Errors
    ///
    /// Returns [`MalgaError`] if the request fails or the API rejects it.
    pub async fn find(&self, id: &str) -> Result<CustomerResponse, MalgaError> {
        self.api
            .get("GET /customers/{id}", &format!("customers/{id}"), Vec::new())
            .await
    }

    /// Lists customers, optionally filtered by document.
    ///
    /// # Errors
    ///
    /// Returns [`MalgaError`] if the request fails or the API rejects it.
    pub async fn list(
        &self,
        params: &CustomerListParams,
    ) -> Result<Page<CustomerResponse>, MalgaError> {
        self.api
            .get("GET /customers", "customers", params.query_pairs())
            .await
    }

    /// Updates name, phone number or address.
    ///
    /// # Errors
    ///
    /// Returns [`MalgaError`] if the request fails or the API rejects it.
    pub async fn update(
        &self,
        id: &str,
        payload: &CustomerUpdatePayload,
    ) -> Result<CustomerUpdateResponse, MalgaError> {
        self.api
            .patch("PATCH /customers/{id}", &format!("customers/{id}"), payload)
            .await
    }

    /// Deletes a customer.
    ///
    /// # Errors
    ///
    /// Returns [`MalgaError`] if the request fails or the API rejects it.
    pub async fn remove(&self, id: &str) -> Result<(), MalgaError> {
        self.api
            .delete::<IgnoredAny>("DELETE /customers/{id}", &format!("customers/{id}"))
            .await?;
        Ok(())
    }

    /// Lists the cards linked to a customer.
    ///
    /// # Errors
    ///
    /// Returns [`MalgaError`] if the request fails or the API rejects it.
    pub async fn cards(&self, id: &str) -> Result<Vec<CardResponse>, MalgaError> {
        self.api
            .get(
                "GET /customers/{id}/cards",
                &format!("customers/{id}/cards"),
                Vec::new(),
            )
            .await
    }

    /// Links a stored card to a customer.
    ///
    /// # Errors
    ///
    /// Returns [`MalgaError`] if the request fails or the API rejects it.
    pub async fn link_card(
        &self,
        id: &str,
        payload: &CustomerLinkCardPayload,
        options: &RequestOptions,
    ) -> Result<(), MalgaError> {
        self.api
            .post::<_, IgnoredAny>(
                "POST /customers/{id}/cards",
                &format!("customers/{id}/cards"),
                Vec::new(),
                payload,
                options,
                None,
            )
            .await?;
        Ok(())
    }
}

impl CustomerService for Customers {
    fn create<'a>(
        &'a self,
        customer: &'a Customer,
    ) -> BoxFuture<'a, Result<CustomerResponse, MalgaError>> {
        Box::pin(async move {
            Customers::create(self, customer, &CustomerCreateOptions::default()).await
        })
    }

    fn link_card<'a>(
        &'a self,
        customer_id: &'a str,
        payload: &'a CustomerLinkCardPayload,
    ) -> BoxFuture<'a, Result<(), MalgaError>> {
        Box::pin(async move {
            Customers::link_card(self, customer_id, payload, &RequestOptions::default()).await
        })
    }
}
