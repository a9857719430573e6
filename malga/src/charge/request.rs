//! The polymorphic "create charge" request.
//!
//! A request targets either a merchant directly or an existing payment
//! session, names its customer inline, by id or not at all, and carries one
//! [`PaymentMethod`]. The customer choice is a single [`CustomerSource`], so
//! a request holding both an inline customer and a customer id cannot be
//! built, and is rejected when deserialized.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::skip_serializing_none;

use crate::card::{CardTokenizationPayload, ZeroDollar};
use crate::customer::Customer;

/// How the charge's customer is supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerSource {
    /// An existing customer, by id.
    Id(String),
    /// A one-shot customer, created or embedded as the method requires.
    Inline(Customer),
}

/// Who the charge is created against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChargeTarget {
    /// Charge bound to a pre-existing payment session.
    Session(SessionCharge),
    /// Direct charge on behalf of a merchant.
    Merchant(MerchantCharge),
}

impl ChargeTarget {
    /// Returns the session details for session-scoped charges.
    #[must_use]
    pub const fn as_session(&self) -> Option<&SessionCharge> {
        match self {
            Self::Session(s) => Some(s),
            Self::Merchant(_) => None,
        }
    }
}

/// Session-scoped charge envelope.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCharge {
    /// Payment session the charge belongs to.
    pub session_id: String,
    /// Public key authorizing the session charge.
    pub public_key: String,
}

impl fmt::Debug for SessionCharge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCharge")
            .field("session_id", &self.session_id)
            .field("public_key", &"[REDACTED]")
            .finish()
    }
}

/// Direct merchant charge envelope.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantCharge {
    /// Merchant the charge is created for.
    pub merchant_id: String,
    /// Amount in cents.
    pub amount: u64,
    /// Merchant-side order reference.
    #[serde(default)]
    pub order_id: Option<String>,
    /// ISO 4217 currency code. The API defaults to BRL.
    #[serde(default)]
    pub currency: Option<String>,
    /// `false` only pre-authorizes.
    #[serde(default)]
    pub capture: Option<bool>,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Text shown on the payer's statement.
    #[serde(default)]
    pub statement_descriptor: Option<String>,
    /// Marketplace split of the amount.
    #[serde(default)]
    pub split_rules: Option<Vec<SplitRule>>,
}

impl MerchantCharge {
    /// Creates a merchant envelope with only the required fields.
    #[must_use]
    pub fn new(merchant_id: impl Into<String>, amount: u64) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            amount,
            order_id: None,
            currency: None,
            capture: None,
            description: None,
            statement_descriptor: None,
            split_rules: None,
        }
    }
}

/// Marketplace split of a charge.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitRule {
    /// Seller receiving this share.
    pub seller_id: String,
    /// Share as a percentage.
    #[serde(default)]
    pub percentage: Option<f64>,
    /// Share as a fixed amount in cents.
    #[serde(default)]
    pub amount: Option<u64>,
    /// Whether this seller pays the processing fee.
    pub processing_fee: bool,
    /// Whether this seller is liable for chargebacks.
    pub liable: bool,
    /// Fees charged to this seller.
    #[serde(default)]
    pub fares: Option<SplitFares>,
}

/// Fees charged to a split seller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitFares {
    /// Merchant discount rate, as a percentage.
    pub mdr: f64,
    /// Fixed fee.
    pub fee: f64,
}

/// Payment method of a charge, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Credit card.
    Credit(CreditMethod),
    /// Meal or food voucher card.
    Voucher(VoucherMethod),
    /// Pix.
    Pix(PixMethod),
    /// Boleto bancário.
    Boleto(BoletoMethod),
    /// Drip (pix installments).
    Drip(DripMethod),
    /// NuPay.
    #[serde(rename = "nupay")]
    NuPay(NuPayMethod),
}

impl PaymentMethod {
    /// Canonical method name, as sent in `paymentType`.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Credit(_) => "credit",
            Self::Voucher(_) => "voucher",
            Self::Pix(_) => "pix",
            Self::Boleto(_) => "boleto",
            Self::Drip(_) => "drip",
            Self::NuPay(_) => "nupay",
        }
    }
}

/// Card reference shared by credit and voucher methods.
///
/// When several references are set, full card data wins over `cardId`, which
/// wins over `tokenId`.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardReference {
    /// Token from an earlier tokenization.
    #[serde(default)]
    pub token_id: Option<String>,
    /// Stored card id.
    #[serde(default)]
    pub card_id: Option<String>,
    /// CVV sent with a stored card.
    #[serde(default)]
    pub card_cvv: Option<String>,
    /// Tokenized CVV sent with a stored card.
    #[serde(default)]
    pub token_cvv: Option<String>,
    /// Full card data, tokenized during the charge.
    #[serde(default)]
    pub card: Option<CardData>,
    /// Attach the stored or referenced card to the resolved customer.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub link_card_to_customer: bool,
}

impl CardReference {
    /// Reference to a card that was tokenized earlier.
    #[must_use]
    pub fn token(token_id: impl Into<String>) -> Self {
        Self {
            token_id: Some(token_id.into()),
            ..Default::default()
        }
    }

    /// Reference to a stored card.
    #[must_use]
    pub fn stored(card_id: impl Into<String>) -> Self {
        Self {
            card_id: Some(card_id.into()),
            ..Default::default()
        }
    }

    /// Full card data, tokenized during the charge.
    #[must_use]
    pub fn card(card: CardData) -> Self {
        Self {
            card: Some(card),
            ..Default::default()
        }
    }

    /// Sets the CVV sent alongside a stored card.
    #[must_use]
    pub fn with_card_cvv(mut self, cvv: impl Into<String>) -> Self {
        self.card_cvv = Some(cvv.into());
        self
    }

    /// Sets the CVV token sent alongside a stored card.
    #[must_use]
    pub fn with_token_cvv(mut self, token: impl Into<String>) -> Self {
        self.token_cvv = Some(token.into());
        self
    }

    /// Requests linking the card to the charge's customer.
    #[must_use]
    pub const fn linked_to_customer(mut self) -> Self {
        self.link_card_to_customer = true;
        self
    }
}

/// Full card data supplied with a charge.
#[skip_serializing_none]
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardData {
    /// Cardholder name as printed on the card.
    pub holder_name: String,
    /// Card number.
    pub number: String,
    /// Card verification value.
    pub cvv: String,
    /// `MM/YYYY`.
    pub expiration_date: String,
    /// Store the card after a zero-dollar verification.
    #[serde(default)]
    pub zero_dollar: Option<ZeroDollar>,
}

impl fmt::Debug for CardData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardData")
            .field("holder_name", &self.holder_name)
            .field("number", &"[REDACTED]")
            .field("cvv", &"[REDACTED]")
            .field("expiration_date", &self.expiration_date)
            .field("zero_dollar", &self.zero_dollar)
            .finish()
    }
}

impl CardData {
    /// Tokenization input for this card.
    #[must_use]
    pub fn tokenization_payload(&self) -> CardTokenizationPayload {
        CardTokenizationPayload::card(
            self.holder_name.clone(),
            self.number.clone(),
            self.cvv.clone(),
            self.expiration_date.clone(),
        )
    }
}

/// Credit card method.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditMethod {
    /// Number of installments.
    #[serde(default)]
    pub installments: Option<u32>,
    /// Card reference.
    #[serde(flatten)]
    pub card: CardReference,
}

/// Meal or food voucher card method.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherMethod {
    /// Items paid with the voucher.
    #[serde(default)]
    pub items: Option<Vec<PaymentItem>>,
    /// Card reference.
    #[serde(flatten)]
    pub card: CardReference,
}

/// Line item of a pix, drip or voucher charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentItem {
    /// Item id.
    pub id: String,
    /// Item title.
    pub title: String,
    /// Unit price in cents.
    pub unit_price: u64,
    /// Units sold.
    pub quantity: u32,
}

/// Name/value pair shown to the pix payer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalInfo {
    /// Label.
    pub name: String,
    /// Shown value.
    pub value: String,
}

/// Pix method.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixMethod {
    /// QR code lifetime, in seconds.
    pub expires_in: u64,
    /// Extra name/value pairs shown to the payer.
    #[serde(default)]
    pub additional_info: Option<Vec<AdditionalInfo>>,
    /// Items listed on the QR code.
    #[serde(default)]
    pub items: Option<Vec<PaymentItem>>,
}

/// Interest or fine applied to a late boleto.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoletoCharge {
    /// Days after the due date before it applies.
    pub days: u32,
    /// Rate as a percentage.
    #[serde(default)]
    pub percentage: Option<f64>,
    /// Fixed amount in cents.
    #[serde(default)]
    pub amount: Option<u64>,
}

/// Boleto bancário method.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoletoMethod {
    /// Due date, `YYYY-MM-DD`.
    #[serde(default)]
    pub expires_date: Option<String>,
    /// Instructions printed on the boleto.
    #[serde(default)]
    pub instructions: Option<String>,
    /// Interest charged after the due date.
    #[serde(default)]
    pub interest: Option<BoletoCharge>,
    /// Fine charged after the due date.
    #[serde(default)]
    pub fine: Option<BoletoCharge>,
}

/// Payer browser for a Drip checkout.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DripBrowser {
    /// Payer IP address.
    #[serde(default)]
    pub ip_address: Option<String>,
    /// Browser fingerprint.
    #[serde(default)]
    pub browser_fingerprint: Option<String>,
}

/// Drip (pix installments) method.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DripMethod {
    /// Where the payer lands after paying.
    #[serde(default)]
    pub success_redirect_url: Option<String>,
    /// Where the payer lands after cancelling.
    #[serde(default)]
    pub cancel_redirect_url: Option<String>,
    /// Payer browser.
    #[serde(default)]
    pub browser: Option<DripBrowser>,
    /// Items financed.
    #[serde(default)]
    pub items: Option<Vec<PaymentItem>>,
}

/// NuPay fields forwarded in the normalized `paymentMethod`.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NuPayCheckout {
    /// Merchant order page.
    #[serde(default)]
    pub order_url: Option<String>,
    /// Where the payer returns after paying.
    #[serde(default)]
    pub return_url: Option<String>,
    /// Where the payer returns after cancelling.
    #[serde(default)]
    pub cancel_url: Option<String>,
    /// Tax included in the amount.
    #[serde(default)]
    pub tax_value: Option<f64>,
    /// Minutes before an unpaid order is cancelled.
    #[serde(default)]
    pub delay_to_auto_cancel: Option<u32>,
}

/// NuPay method. Its items end up in the fraud-analysis cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NuPayMethod {
    /// Fields forwarded as the normalized method.
    #[serde(flatten)]
    pub checkout: NuPayCheckout,
    /// Items, moved to the fraud-analysis cart.
    pub items: Vec<FraudAnalysisItem>,
}

/// Risk of a fraud-analysis item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Risk {
    /// Low risk.
    Low,
    /// High risk.
    High,
}

/// Street address used by fraud analysis.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudAnalysisAddress {
    /// Street name.
    pub street: String,
    /// Card number.
    pub number: String,
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

/// Ticketing details of an event item.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTickets {
    /// Tickets sold in the order.
    pub quantity_ticket_sale: Option<u32>,
    /// Capacity of the venue.
    pub quantity_event_house: Option<u32>,
    /// Convenience fee in cents.
    pub convenience_fee_value: Option<u64>,
    /// Full-price tickets.
    pub quantity_full: Option<u32>,
    /// Half-price tickets.
    pub quantity_half: Option<u32>,
    /// Sales batch.
    pub batch: Option<u32>,
}

/// Cart item reviewed by fraud analysis.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudAnalysisItem {
    /// Item name.
    pub name: String,
    /// Units in the order.
    pub quantity: u32,
    /// Stock keeping unit.
    pub sku: String,
    /// Unit price in cents.
    pub unit_price: u64,
    /// Merchant-assessed risk of the item.
    pub risk: Risk,
    /// Item description.
    #[serde(default)]
    pub description: Option<String>,
    /// Merchant category.
    #[serde(default)]
    pub category_id: Option<String>,
    /// Where the item is used or delivered.
    #[serde(default)]
    pub locality: Option<String>,
    /// Event or delivery date.
    #[serde(default)]
    pub date: Option<String>,
    /// Item type code.
    #[serde(default, rename = "type")]
    pub item_type: Option<u32>,
    /// Event genre.
    #[serde(default)]
    pub genre: Option<String>,
    /// Ticketing details for event items.
    #[serde(default)]
    pub tickets: Option<EventTickets>,
    /// Event address.
    #[serde(default)]
    pub location: Option<FraudAnalysisAddress>,
}

/// Browser session seen by fraud analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudAnalysisBrowser {
    /// Browser fingerprint.
    pub browser_fingerprint: String,
    /// Whether the payer accepted cookies.
    pub cookies_accepted: bool,
    /// Email entered in the browser session.
    pub email: String,
    /// Host name of the merchant site.
    pub host_name: String,
    /// Browser IP address.
    pub ip_address: String,
    /// Browser type.
    #[serde(rename = "type")]
    pub browser_type: String,
}

/// Customer data for fraud analysis.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudAnalysisCustomer {
    /// Customer name.
    pub name: Option<String>,
    /// Customer email.
    pub email: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Birth date, `YYYY-MM-DD`.
    pub birthdate: Option<String>,
    /// Document number.
    pub identity: Option<String>,
    /// Document type.
    pub identity_type: Option<String>,
    /// When the customer registered with the merchant.
    pub registration_date: Option<String>,
    /// Delivery address.
    pub delivery_address: Option<FraudAnalysisAddress>,
    /// Billing address.
    pub billing_address: Option<FraudAnalysisAddress>,
    /// Customer browser.
    pub browser: Option<FraudAnalysisBrowser>,
}

/// Order contents for fraud analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FraudAnalysisCart {
    /// Cart items.
    #[serde(default)]
    pub items: Vec<FraudAnalysisItem>,
}

/// Device operating system.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceOs {
    /// Operating system name.
    #[serde(rename = "type")]
    pub os_type: Option<String>,
    /// Operating system version.
    pub version: Option<String>,
}

/// Device fingerprint. Vendor attributes are passed through as-is.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudAnalysisDevice {
    /// Operating system.
    pub os: Option<DeviceOs>,
    /// Device model.
    pub model: Option<String>,
    /// RAM, in bytes.
    pub ram_capacity: Option<u64>,
    /// Disk size, in bytes.
    pub disk_capacity: Option<u64>,
    /// Free disk space, in bytes.
    pub free_disk_space: Option<u64>,
    /// Screen resolution.
    pub resolution: Option<u64>,
    /// Fingerprinting vendors, passed through.
    pub vendors: Option<Vec<Map<String, Value>>>,
    /// Vendor attributes, passed through.
    pub vendor_attributes: Option<Map<String, Value>>,
}

/// Anti-fraud data attached to a charge.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudAnalysis {
    /// Minutes the analysis may take.
    #[serde(default)]
    pub sla: Option<u32>,
    /// Customer as seen by fraud analysis.
    #[serde(default)]
    pub customer: Option<FraudAnalysisCustomer>,
    /// Items in the order.
    #[serde(default)]
    pub cart: Option<FraudAnalysisCart>,
    /// Payer device.
    #[serde(default)]
    pub device: Option<FraudAnalysisDevice>,
}

/// Address used by 3-D Secure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreeDSecureAddress {
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
}

/// Browser data required by 3-D Secure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreeDSecureBrowser {
    /// HTTP `Accept` header.
    pub accept_header: String,
    /// Screen color depth, in bits.
    pub color_depth: u32,
    /// Whether Java is enabled.
    pub java_enabled: bool,
    /// Whether JavaScript is enabled.
    pub java_script_enabled: bool,
    /// Browser language.
    pub language: String,
    /// Screen height, in pixels.
    pub screen_height: u32,
    /// Screen width, in pixels.
    pub screen_width: u32,
    /// Offset from UTC, in minutes.
    pub time_zone_offset: String,
    /// HTTP `User-Agent`.
    pub user_agent: String,
    /// Payer IP address.
    pub ip: String,
}

/// Cardholder contact data for 3-D Secure.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreeDSecureCardHolder {
    /// Cardholder email.
    pub email: String,
    /// Mobile phone.
    #[serde(default)]
    pub mobile_phone: Option<String>,
}

/// Data for 3-D Secure authentication.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreeDSecure {
    /// Where the payer returns after the challenge.
    #[serde(rename = "redirectURL")]
    pub redirect_url: String,
    /// Merchant site URL.
    #[serde(rename = "requestorURL")]
    pub requestor_url: String,
    /// Payer browser.
    pub browser: ThreeDSecureBrowser,
    /// Billing address.
    #[serde(default)]
    pub billing_address: Option<ThreeDSecureAddress>,
    /// Shipping address.
    #[serde(default)]
    pub shipping_address: Option<ThreeDSecureAddress>,
    /// Cardholder contact data.
    #[serde(default)]
    pub card_holder: Option<ThreeDSecureCardHolder>,
}

/// Name and version of one software component.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfoEntry {
    /// Name.
    pub name: String,
    /// Version.
    pub version: String,
    /// Integrator name.
    #[serde(default)]
    pub integrator: Option<String>,
}

/// Identifies the software issuing the charge.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfo {
    /// Platform (for example an e-commerce plugin).
    #[serde(default)]
    pub platform: Option<AppInfoEntry>,
    /// Device issuing the charge.
    #[serde(default)]
    pub device: Option<AppInfoEntry>,
    /// System the SDK runs on.
    #[serde(default)]
    pub system: Option<AppInfoEntry>,
}

/// Free-form metadata routed to payment-flow rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentFlow {
    /// Metadata keys and values.
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

/// A request to create a charge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawChargeCreateRequest", into = "RawChargeCreateRequest")]
pub struct ChargeCreateRequest {
    /// Merchant or session envelope.
    pub target: ChargeTarget,
    /// Customer, inline or by id.
    pub customer: Option<CustomerSource>,
    /// Payment method.
    pub payment_method: PaymentMethod,
    /// Anti-fraud data.
    pub fraud_analysis: Option<FraudAnalysis>,
    /// Payment-flow metadata.
    pub payment_flow: Option<PaymentFlow>,
    /// 3-D Secure data.
    pub three_d_secure: Option<ThreeDSecure>,
    /// Software issuing the charge.
    pub app_info: Option<AppInfo>,
}

impl ChargeCreateRequest {
    /// Direct charge on behalf of a merchant.
    #[must_use]
    pub const fn merchant(merchant: MerchantCharge, payment_method: PaymentMethod) -> Self {
        Self::new(ChargeTarget::Merchant(merchant), payment_method)
    }

    /// Charge bound to an existing payment session.
    #[must_use]
    pub fn session(
        session_id: impl Into<String>,
        public_key: impl Into<String>,
        payment_method: PaymentMethod,
    ) -> Self {
        Self::new(
            ChargeTarget::Session(SessionCharge {
                session_id: session_id.into(),
                public_key: public_key.into(),
            }),
            payment_method,
        )
    }

    const fn new(target: ChargeTarget, payment_method: PaymentMethod) -> Self {
        Self {
            target,
            customer: None,
            payment_method,
            fraud_analysis: None,
            payment_flow: None,
            three_d_secure: None,
            app_info: None,
        }
    }

    /// Sets a one-shot customer, replacing any customer id.
    #[must_use]
    pub fn with_customer(mut self, customer: Customer) -> Self {
        self.customer = Some(CustomerSource::Inline(customer));
        self
    }

    /// Sets an existing customer by id, replacing any inline customer.
    #[must_use]
    pub fn with_customer_id(mut self, id: impl Into<String>) -> Self {
        self.customer = Some(CustomerSource::Id(id.into()));
        self
    }

    /// Attaches anti-fraud data.
    #[must_use]
    pub fn with_fraud_analysis(mut self, fraud_analysis: FraudAnalysis) -> Self {
        self.fraud_analysis = Some(fraud_analysis);
        self
    }

    /// Attaches payment-flow metadata.
    #[must_use]
    pub fn with_payment_flow(mut self, payment_flow: PaymentFlow) -> Self {
        self.payment_flow = Some(payment_flow);
        self
    }

    /// Attaches 3-D Secure data.
    #[must_use]
    pub fn with_three_d_secure(mut self, three_d_secure: ThreeDSecure) -> Self {
        self.three_d_secure = Some(three_d_secure);
        self
    }

    /// Identifies the software issuing the charge.
    #[must_use]
    pub fn with_app_info(mut self, app_info: AppInfo) -> Self {
        self.app_info = Some(app_info);
        self
    }

    /// Session details, for session-scoped charges.
    #[must_use]
    pub const fn session_target(&self) -> Option<&SessionCharge> {
        self.target.as_session()
    }
}

/// Flat wire shape of [`ChargeCreateRequest`].
#[skip_serializing_none]
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawChargeCreateRequest {
    #[serde(flatten)]
    target: ChargeTarget,
    #[serde(default)]
    customer: Option<Customer>,
    #[serde(default)]
    customer_id: Option<String>,
    payment_method: PaymentMethod,
    #[serde(default)]
    fraud_analysis: Option<FraudAnalysis>,
    #[serde(default)]
    payment_flow: Option<PaymentFlow>,
    #[serde(default)]
    three_d_secure: Option<ThreeDSecure>,
    #[serde(default)]
    app_info: Option<AppInfo>,
}

impl TryFrom<RawChargeCreateRequest> for ChargeCreateRequest {
    type Error = String;

    fn try_from(raw: RawChargeCreateRequest) -> Result<Self, Self::Error> {
        let customer = match (raw.customer, raw.customer_id) {
            (Some(_), Some(_)) => {
                return Err("`customer` and `customerId` are mutually exclusive".to_owned());
            }
            (Some(customer), None) => Some(CustomerSource::Inline(customer)),
            (None, Some(id)) => Some(CustomerSource::Id(id)),
            (None, None) => None,
        };
        Ok(Self {
            target: raw.target,
            customer,
            payment_method: raw.payment_method,
            fraud_analysis: raw.fraud_analysis,
            payment_flow: raw.payment_flow,
            three_d_secure: raw.three_d_secure,
            app_info: raw.app_info,
        })
    }
}

impl From<ChargeCreateRequest> for RawChargeCreateRequest {
    fn from(request: ChargeCreateRequest) -> Self {
        let (customer, customer_id) = match request.customer {
            Some(CustomerSource::Inline(c)) => (Some(c), None),
            Some(CustomerSource::Id(id)) => (None, Some(id)),
            None => (None, None),
        };
        Self {
            target: request.target,
            customer,
            customer_id,
            payment_method: request.payment_method,
            fraud_analysis: request.fraud_analysis,
            payment_flow: request.payment_flow,
            three_d_secure: request.three_d_secure,
            app_info: request.app_info,
        }
    }
}
