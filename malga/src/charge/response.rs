//! Charge resources returned by the API, and the follow-up operations on them.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{VecSkipError, serde_as, skip_serializing_none};

use super::request::{AppInfo, SplitRule};
use crate::pagination::{ListParams, QueryPairs};

/// Lifecycle state of a charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeStatus {
    /// Awaiting processing.
    Pending,
    /// Authorized, awaiting capture.
    PreAuthorized,
    /// Authorized and captured.
    Authorized,
    /// Declined or failed.
    Failed,
    /// Cancelled before capture.
    Canceled,
    /// Refunded.
    Voided,
    /// Disputed and charged back.
    ChargedBack,
    /// Capture in progress.
    CapturePending,
    /// Refund in progress.
    RefundPending,
    /// Created, awaiting payer action.
    Created,
}

impl ChargeStatus {
    /// Wire representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::PreAuthorized => "pre_authorized",
            Self::Authorized => "authorized",
            Self::Failed => "failed",
            Self::Canceled => "canceled",
            Self::Voided => "voided",
            Self::ChargedBack => "charged_back",
            Self::CapturePending => "capture_pending",
            Self::RefundPending => "refund_pending",
            Self::Created => "created",
        }
    }
}

/// Attempt of the charge against a provider.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    /// Transaction request id.
    pub id: String,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Idempotency key of the originating call.
    #[serde(default)]
    pub idempotency_key: Option<String>,
    /// Provider configuration id.
    #[serde(default)]
    pub provider_id: Option<String>,
    /// Acquirer or provider name.
    #[serde(default)]
    pub provider_type: Option<String>,
    /// Provider transaction id.
    #[serde(default)]
    pub transaction_id: Option<String>,
    /// Amount in cents.
    #[serde(default)]
    pub amount: Option<u64>,
    /// Acquirer authorization code.
    #[serde(default)]
    pub authorization_code: Option<String>,
    /// Acquirer NSU.
    #[serde(default)]
    pub authorization_nsu: Option<String>,
    /// e.g. `"success"`, `"failed"`, `"timeout"`.
    #[serde(default)]
    pub request_status: Option<String>,
    /// e.g. `"authorization"`, `"capture"`, `"void"`.
    #[serde(default)]
    pub request_type: Option<String>,
    /// Provider response time.
    #[serde(default)]
    pub response_ts: Option<String>,
    /// Failure reported by the provider.
    #[serde(default)]
    pub provider_error: Option<ProviderError>,
    /// Raw provider authorization data.
    #[serde(default)]
    pub provider_authorization: Option<Value>,
    /// Raw fraud-analysis result.
    #[serde(default)]
    pub fraud_analysis: Option<Value>,
}

/// Failure reported by a payment provider.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderError {
    /// Provider message.
    #[serde(default)]
    pub message: Option<String>,
    /// Issuer decline code.
    #[serde(default)]
    pub declined_code: Option<String>,
    /// Whether the attempt may be retried.
    #[serde(default)]
    pub retryable: Option<bool>,
    /// Card network denial reason.
    #[serde(default)]
    pub network_denied_reason: Option<String>,
    /// Card network denial message.
    #[serde(default)]
    pub network_denied_message: Option<String>,
}

/// A charge.
///
/// Payment method and source vary with the payment type and are kept as raw
/// JSON. Transaction requests that fail to parse are skipped.
#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Charge {
    /// Charge id.
    pub id: String,
    /// Owning client.
    #[serde(default)]
    pub client_id: Option<String>,
    /// Merchant charged for.
    #[serde(default)]
    pub merchant_id: Option<String>,
    /// Customer charged.
    #[serde(default)]
    pub customer_id: Option<String>,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Merchant-side order reference.
    #[serde(default)]
    pub order_id: Option<String>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Current amount in cents.
    pub amount: u64,
    /// Amount before captures and refunds.
    #[serde(default)]
    pub original_amount: Option<u64>,
    /// Currency code.
    #[serde(default)]
    pub currency: Option<String>,
    /// Text shown on the payer's statement.
    #[serde(default)]
    pub statement_descriptor: Option<String>,
    /// Whether the charge was captured on creation.
    #[serde(default)]
    pub capture: Option<bool>,
    /// Lifecycle status.
    pub status: ChargeStatus,
    /// Payment method as echoed by the API.
    #[serde(default)]
    pub payment_method: Option<Value>,
    /// Payment source as echoed by the API.
    #[serde(default, alias = "sourceType")]
    pub payment_source: Option<Value>,
    /// Provider attempts. Unknown shapes are skipped.
    #[serde_as(as = "VecSkipError<_>")]
    #[serde(default)]
    pub transaction_requests: Vec<TransactionRequest>,
    /// Marketplace split.
    #[serde(default)]
    pub split_rules: Option<Vec<SplitRule>>,
    /// Software that issued the charge.
    #[serde(default)]
    pub app_info: Option<AppInfo>,
}

impl Charge {
    /// Payment type reported in the charge's payment method.
    #[must_use]
    pub fn payment_type(&self) -> Option<&str> {
        self.payment_method.as_ref()?.get("paymentType")?.as_str()
    }
}

/// Body of `POST /charges/{id}/capture`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeCapturePayload {
    /// Amount to capture, in cents.
    pub amount: u64,
}

/// Body of `POST /charges/{id}/void`.
#[skip_serializing_none]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeRefundPayload {
    /// Amount to refund, in cents.
    pub amount: u64,
    /// Days to wait before composing the refund.
    #[serde(default)]
    pub delay_to_compose: Option<u32>,
}

/// Filters for `GET /charges`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChargeListParams {
    /// Paging and sort order.
    pub page: ListParams,
    /// Created after (RFC 3339).
    pub start_date: Option<String>,
    /// Created before (RFC 3339).
    pub end_date: Option<String>,
    /// Only charges of this merchant.
    pub merchant_id: Option<String>,
    /// Original amount, in cents.
    pub amount: Option<u64>,
    /// Only charges in any of these statuses.
    pub status: Vec<ChargeStatus>,
    /// Payment types, e.g. `"credit"`.
    pub payment_method: Vec<String>,
    /// Provider types, e.g. `"PAGARME"`.
    pub provider: Vec<String>,
    /// Only charges with this order reference.
    pub order_id: Option<String>,
    /// Only charges with split rules.
    pub has_split: bool,
    /// Only charges of this session.
    pub session_id: Option<String>,
}

impl QueryPairs for ChargeListParams {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = self.page.query_pairs();
        let mut push = |key: &'static str, value: Option<String>| {
            if let Some(v) = value.filter(|v| !v.is_empty()) {
                pairs.push((key, v));
            }
        };
        push("originalAmount", self.amount.filter(|a| *a > 0).map(|a| a.to_string()));
        push("splitRules", self.has_split.then(|| "true".to_owned()));
        push("paymentType", Some(self.payment_method.join(",")));
        push("providerType", Some(self.provider.join(",")));
        push("orderId", self.order_id.clone());
        push("sessionId", self.session_id.clone());
        push(
            "status",
            Some(
                self.status
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
        );
        push("merchantId", self.merchant_id.clone());
        push("created.gt", self.start_date.clone());
        push("created.lt", self.end_date.clone());
        pairs
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::pagination::Sort;

    #[test]
    fn test_list_params_flatten_in_order() {
        let params = ChargeListParams {
            page: ListParams::new().with_page(1).with_limit(15).with_sort(Sort::Desc),
            start_date: Some("2023-12-26T03:00:00.000Z".into()),
            end_date: Some("2023-12-27T03:00:00.000Z".into()),
            merchant_id: Some("m-1".into()),
            amount: Some(100),
            status: vec![ChargeStatus::Authorized, ChargeStatus::PreAuthorized],
            payment_method: vec!["credit".into(), "pix".into()],
            provider: vec!["PAGARME".into()],
            order_id: Some("o-1".into()),
            has_split: false,
            session_id: None,
        };
        let keys: Vec<_> = params.query_pairs().into_iter().collect();
        assert_eq!(
            keys,
            vec![
                ("page", "1".to_owned()),
                ("limit", "15".to_owned()),
                ("sort", "DESC".to_owned()),
                ("originalAmount", "100".to_owned()),
                ("paymentType", "credit,pix".to_owned()),
                ("providerType", "PAGARME".to_owned()),
                ("orderId", "o-1".to_owned()),
                ("status", "authorized,pre_authorized".to_owned()),
                ("merchantId", "m-1".to_owned()),
                ("created.gt", "2023-12-26T03:00:00.000Z".to_owned()),
                ("created.lt", "2023-12-27T03:00:00.000Z".to_owned()),
            ]
        );
    }

    #[test]
    fn test_default_list_params_empty() {
        assert!(ChargeListParams::default().query_pairs().is_empty());
        let split = ChargeListParams {
            has_split: true,
            ..Default::default()
        };
        assert_eq!(split.query_pairs(), vec![("splitRules", "true".to_owned())]);
    }

    #[test]
    fn test_charge_deserializes_and_skips_bad_transactions() {
        let body = json!({
            "id": "575f9a3c-6e40-4077-852e-c6781dc3c7c7",
            "clientId": "client",
            "merchantId": "m-1",
            "amount": 100,
            "originalAmount": 100,
            "currency": "BRL",
            "capture": true,
            "status": "authorized",
            "paymentMethod": { "paymentType": "credit", "installments": 1 },
            "paymentSource": { "sourceType": "card", "cardId": "X" },
            "transactionRequests": [
                { "id": "tr-1", "requestStatus": "success", "requestType": "authorization" },
                { "broken": true }
            ],
            "appInfo": null
        });
        let charge: Charge = serde_json::from_value(body).unwrap();
        assert_eq!(charge.status, ChargeStatus::Authorized);
        assert_eq!(charge.payment_type(), Some("credit"));
        assert_eq!(charge.transaction_requests.len(), 1);
    }

    #[test]
    fn test_refund_payload_omits_delay() {
        let payload = ChargeRefundPayload {
            amount: 50,
            delay_to_compose: None,
        };
        assert_eq!(serde_json::to_value(payload).unwrap(), json!({ "amount": 50 }));
    }
}
