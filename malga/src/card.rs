//! Card and token wire types.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::pagination::{ListParams, QueryPairs};

/// Zero-dollar verification requested when storing a card.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZeroDollar {
    /// Merchant whose acquirer performs the verification.
    #[serde(default)]
    pub merchant_id: Option<String>,
    /// Whether the CVV must be checked too.
    #[serde(default)]
    pub cvv_check: Option<bool>,
}

/// Input of a tokenization call.
///
/// With all four fields set the API tokenizes a full card. With only
/// [`cvv`](Self::cvv) set it issues a CVV token for a stored card.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CardTokenizationPayload {
    /// Cardholder name.
    pub holder_name: Option<String>,
    /// Card number.
    pub number: Option<String>,
    /// Card verification value.
    pub cvv: String,
    /// Expiration, `MM/YYYY`.
    pub expiration_date: Option<String>,
}

impl fmt::Debug for CardTokenizationPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardTokenizationPayload")
            .field("holder_name", &self.holder_name)
            .field("number", &self.number.as_ref().map(|_| "[REDACTED]"))
            .field("cvv", &"[REDACTED]")
            .field("expiration_date", &self.expiration_date)
            .finish()
    }
}

impl CardTokenizationPayload {
    /// Payload tokenizing a full card.
    #[must_use]
    pub fn card(
        holder_name: impl Into<String>,
        number: impl Into<String>,
        cvv: impl Into<String>,
        expiration_date: impl Into<String>,
    ) -> Self {
        Self {
            holder_name: Some(holder_name.into()),
            number: Some(number.into()),
            cvv: cvv.into(),
            expiration_date: Some(expiration_date.into()),
        }
    }

    /// Payload tokenizing a CVV only.
    #[must_use]
    pub fn cvv(cvv: impl Into<String>) -> Self {
        Self {
            cvv: cvv.into(),
            ..Default::default()
        }
    }

    /// Builds the body sent to `POST /tokens`.
    ///
    /// Full card data is sent only when every field is present and
    /// non-empty. Anything less degrades to a CVV update.
    #[must_use]
    pub fn to_body(&self) -> TokenizationBody<'_> {
        fn filled(v: Option<&str>) -> Option<&str> {
            v.filter(|s| !s.is_empty())
        }

        match (
            filled(self.holder_name.as_deref()),
            filled(self.number.as_deref()),
            filled(self.expiration_date.as_deref()),
        ) {
            (Some(holder), Some(number), Some(expiration)) if !self.cvv.is_empty() => {
                TokenizationBody::Card {
                    card_number: number,
                    card_cvv: &self.cvv,
                    card_expiration_date: expiration,
                    card_holder_name: holder,
                }
            }
            _ => TokenizationBody::CvvUpdate {
                cvv_update: &self.cvv,
            },
        }
    }
}

/// Wire body of `POST /tokens`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TokenizationBody<'a> {
    /// Full card tokenization.
    #[serde(rename_all = "camelCase")]
    Card {
        card_number: &'a str,
        card_cvv: &'a str,
        card_expiration_date: &'a str,
        card_holder_name: &'a str,
    },
    /// CVV-only tokenization.
    #[serde(rename_all = "camelCase")]
    CvvUpdate { cvv_update: &'a str },
}

/// Result of a tokenization call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardTokenizationResponse {
    /// The short-lived token.
    pub token_id: String,
}

/// Body of `POST /cards`.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardCreatePayload {
    /// Token consumed to store the card.
    pub token_id: String,
    /// Optional zero-dollar verification.
    #[serde(default)]
    pub zero_dollar: Option<ZeroDollar>,
}

/// Lifecycle state of a stored card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardStatus {
    /// Verification failed.
    Failed,
    /// Verified and usable.
    Active,
    /// Verification in progress.
    Pending,
}

/// A stored card.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardResponse {
    /// Card id.
    pub id: String,
    /// Verification status.
    pub status: CardStatus,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Owning client.
    #[serde(default)]
    pub client_id: Option<String>,
    /// Linked customer.
    #[serde(default)]
    pub customer_id: Option<String>,
    /// Card brand.
    #[serde(default)]
    pub brand: Option<String>,
    /// Cardholder name.
    #[serde(default)]
    pub card_holder_name: Option<String>,
    /// Whether the CVV was verified.
    #[serde(default)]
    pub cvv_checked: bool,
    /// Card fingerprint.
    #[serde(default)]
    pub fingerprint: Option<String>,
    /// First six digits.
    #[serde(default, rename = "first6digits")]
    pub first6_digits: Option<String>,
    /// Last four digits.
    #[serde(default, rename = "last4digits")]
    pub last4_digits: Option<String>,
    /// Expiration month.
    #[serde(default)]
    pub expiration_month: Option<String>,
    /// Expiration year.
    #[serde(default)]
    pub expiration_year: Option<String>,
    /// Why the card is in its status.
    #[serde(default)]
    pub status_reason: Option<String>,
    /// Deletion time.
    #[serde(default)]
    pub deleted_at: Option<String>,
    /// Deletion reason.
    #[serde(default)]
    pub deleted_reason: Option<String>,
}

/// Parameters of `GET /cards`. The endpoint does not sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardListParams {
    /// Page number.
    pub page: Option<u32>,
    /// Items per page.
    pub limit: Option<u32>,
}

impl QueryPairs for CardListParams {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        ListParams {
            page: self.page,
            limit: self.limit,
            sort: None,
        }
        .query_pairs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_card_body() {
        let payload = CardTokenizationPayload::card("Homer Simpson", "5402502027127339", "391", "01/2025");
        let value = serde_json::to_value(payload.to_body()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "cardNumber": "5402502027127339",
                "cardCvv": "391",
                "cardExpirationDate": "01/2025",
                "cardHolderName": "Homer Simpson"
            })
        );
    }

    #[test]
    fn test_partial_card_degrades_to_cvv_update() {
        let mut payload = CardTokenizationPayload::card("Homer Simpson", "", "391", "01/2025");
        let value = serde_json::to_value(payload.to_body()).unwrap();
        assert_eq!(value, serde_json::json!({ "cvvUpdate": "391" }));

        payload.number = None;
        let value = serde_json::to_value(payload.to_body()).unwrap();
        assert_eq!(value, serde_json::json!({ "cvvUpdate": "391" }));

        let value = serde_json::to_value(CardTokenizationPayload::cvv("170").to_body()).unwrap();
        assert_eq!(value, serde_json::json!({ "cvvUpdate": "170" }));
    }

    #[test]
    fn test_debug_redacts_pan_and_cvv() {
        let payload = CardTokenizationPayload::card("Homer Simpson", "5402502027127339", "391", "01/2025");
        let debug = format!("{payload:?}");
        assert!(!debug.contains("5402502027127339"));
        assert!(!debug.contains("391"));
    }

    #[test]
    fn test_card_response_digit_fields() {
        let body = serde_json::json!({
            "id": "e917fc6d-c640-47a1-83eb-aa820dbd92fe",
            "status": "active",
            "cvvChecked": true,
            "first6digits": "540250",
            "last4digits": "7339",
            "customerId": null
        });
        let card: CardResponse = serde_json::from_value(body).unwrap();
        assert_eq!(card.status, CardStatus::Active);
        assert_eq!(card.first6_digits.as_deref(), Some("540250"));
        assert!(card.customer_id.is_none());
    }

    #[test]
    fn test_create_payload_omits_missing_zero_dollar() {
        let payload = CardCreatePayload {
            token_id: "tok".into(),
            zero_dollar: None,
        };
        assert_eq!(
            serde_json::to_value(payload).unwrap(),
            serde_json::json!({ "tokenId": "tok" })
        );
    }
}
