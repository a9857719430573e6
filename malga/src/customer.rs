//! Customer wire types.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::pagination::{ListParams, QueryPairs};

/// Identity document attached to a customer.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDocument {
    /// Document type (e.g. `"cpf"`).
    #[serde(rename = "type")]
    pub document_type: String,
    /// Document number.
    pub number: String,
    /// ISO country code of the issuing country.
    #[serde(default)]
    pub country: Option<String>,
}

/// Postal address of a customer.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerAddress {
    /// Street name.
    pub street: String,
    /// Street number.
    pub street_number: String,
    /// Postal code.
    pub zip_code: String,
    /// Country.
    pub country: String,
    /// State.
    pub state: String,
    /// City.
    pub city: String,
    /// District.
    pub district: String,
    /// Address complement.
    #[serde(default)]
    pub complement: Option<String>,
}

/// A customer as supplied by the caller.
///
/// Used both for `POST /customers` and as the inline ("one-shot") customer
/// of a charge.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone_number: String,
    /// Identity document.
    pub document: CustomerDocument,
    /// Postal address.
    #[serde(default)]
    pub address: Option<CustomerAddress>,
}

/// A customer record returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    /// Customer identifier.
    pub id: String,
    /// Creation timestamp (RFC 3339).
    #[serde(default)]
    pub created_at: Option<String>,
    /// The stored customer data.
    #[serde(flatten)]
    pub customer: Customer,
}

/// Options for `POST /customers`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerCreateOptions {
    /// Skips the API's email and document duplication checks.
    pub force: bool,
    /// Idempotency key sent as `X-Idempotency-Key`.
    pub idempotency_key: Option<String>,
}

/// Fields accepted by `PATCH /customers/{id}`.
///
/// Email and document cannot be changed.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdatePayload {
    /// New full name.
    pub name: Option<String>,
    /// New phone number.
    pub phone_number: Option<String>,
    /// New postal address.
    pub address: Option<CustomerAddress>,
}

/// Record returned by `PATCH /customers/{id}`.
///
/// Unlike [`CustomerResponse`], the document is flattened into
/// `documentType`/`documentNumber`/`documentCountry`.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdateResponse {
    /// Customer id.
    pub id: String,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Owning client.
    #[serde(default)]
    pub client_id: Option<String>,
    /// Card linked to the customer.
    #[serde(default)]
    pub card_id: Option<String>,
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone_number: String,
    /// Document type.
    #[serde(default)]
    pub document_type: Option<String>,
    /// Document number.
    #[serde(default)]
    pub document_number: Option<String>,
    /// Document issuing country.
    #[serde(default)]
    pub document_country: Option<String>,
    /// Stored address, including server-side bookkeeping fields.
    #[serde(default)]
    pub address: Option<serde_json::Value>,
}

/// Body of `POST /customers/{id}/cards`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerLinkCardPayload {
    /// Stored card to attach to the customer.
    pub card_id: String,
}

impl CustomerLinkCardPayload {
    /// Creates a link payload for the given card.
    #[must_use]
    pub fn new(card_id: impl Into<String>) -> Self {
        Self {
            card_id: card_id.into(),
        }
    }
}

/// Filters for `GET /customers`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerListParams {
    /// Page, limit and sort.
    pub page: ListParams,
    /// Filter by document type.
    pub document_type: Option<String>,
    /// Filter by document number.
    pub document_number: Option<String>,
}

impl QueryPairs for CustomerListParams {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = self.page.query_pairs();
        if let Some(t) = &self.document_type {
            pairs.push(("document.type", t.clone()));
        }
        if let Some(n) = &self.document_number {
            pairs.push(("document.number", n.clone()));
        }
        pairs
    }
}
