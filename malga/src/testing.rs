//! In-memory collaborators and fixtures for unit tests.

use std::sync::Mutex;

use serde_json::json;

use crate::card::{
    CardCreatePayload, CardResponse, CardTokenizationPayload,
    CardTokenizationResponse,
};
use crate::customer::{Customer, CustomerDocument, CustomerLinkCardPayload, CustomerResponse};
use crate::error::{ApiError, MalgaError};
use crate::service::{BoxFuture, CardService, CustomerService};

pub(crate) fn homer() -> Customer {
    Customer {
        name: "Homer Simpson".into(),
        email: "homer@simpsons.com".into(),
        phone_number: "99999999999".into(),
        document: CustomerDocument {
            document_type: "cpf".into(),
            number: "99999999999".into(),
            country: Some("BR".into()),
        },
        address: None,
    }
}

pub(crate) fn homer_json() -> serde_json::Value {
    json!({
        "name": "Homer Simpson",
        "email": "homer@simpsons.com",
        "phoneNumber": "99999999999",
        "document": { "type": "cpf", "number": "99999999999", "country": "BR" }
    })
}

/// A remote call observed by a fake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    /// Card number tokenized.
    Tokenize(String),
    /// Token consumed to store a card.
    CreateCard(String),
    /// Name of the created customer.
    CreateCustomer(String),
    /// Customer id and card id.
    LinkCard(String, String),
}

#[derive(Default)]
pub(crate) struct FakeCards {
    calls: Mutex<Vec<Call>>,
    tokenize_error: Option<ApiError>,
    create_error: Option<ApiError>,
}

impl FakeCards {
    pub(crate) const TOKEN_ID: &'static str = "931e1028-68b2-47b8-a534-3a59d5b45361";
    pub(crate) const CARD_ID: &'static str = "e917fc6d-c640-47a1-83eb-aa820dbd92fe";

    pub(crate) fn failing_tokenize(error: ApiError) -> Self {
        Self {
            tokenize_error: Some(error),
            ..Self::default()
        }
    }

    pub(crate) fn failing_create(error: ApiError) -> Self {
        Self {
            create_error: Some(error),
            ..Self::default()
        }
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl CardService for FakeCards {
    fn tokenize<'a>(
        &'a self,
        payload: &'a CardTokenizationPayload,
    ) -> BoxFuture<'a, Result<CardTokenizationResponse, MalgaError>> {
        Box::pin(async move {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Tokenize(payload.number.clone().unwrap_or_default()));
            if let Some(error) = &self.tokenize_error {
                return Err(error.clone().into());
            }
            Ok(CardTokenizationResponse {
                token_id: Self::TOKEN_ID.into(),
            })
        })
    }

    fn create<'a>(
        &'a self,
        payload: &'a CardCreatePayload,
    ) -> BoxFuture<'a, Result<CardResponse, MalgaError>> {
        Box::pin(async move {
            self.calls
                .lock()
                .unwrap()
                .push(Call::CreateCard(payload.token_id.clone()));
            if let Some(error) = &self.create_error {
                return Err(error.clone().into());
            }
            Ok(serde_json::from_value::<CardResponse>(json!({
                "id": Self::CARD_ID,
                "status": "active",
                "cvvChecked": true
            }))
            .unwrap())
        })
    }
}

#[derive(Default)]
pub(crate) struct FakeCustomers {
    calls: Mutex<Vec<Call>>,
    create_error: Option<ApiError>,
    link_error: Option<ApiError>,
}

impl FakeCustomers {
    pub(crate) const CUSTOMER_ID: &'static str = "fa68fbab-8807-410f-ac9f-8994e566038f";

    pub(crate) fn failing_create(error: ApiError) -> Self {
        Self {
            create_error: Some(error),
            ..Self::default()
        }
    }

    pub(crate) fn failing_link(error: ApiError) -> Self {
        Self {
            link_error: Some(error),
            ..Self::default()
        }
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl CustomerService for FakeCustomers {
    fn create<'a>(
        &'a self,
        customer: &'a Customer,
    ) -> BoxFuture<'a, Result<CustomerResponse, MalgaError>> {
        Box::pin(async move {
            self.calls
                .lock()
                .unwrap()
                .push(Call::CreateCustomer(customer.name.clone()));
            if let Some(error) = &self.create_error {
                return Err(error.clone().into());
            }
            Ok(CustomerResponse {
                id: Self::CUSTOMER_ID.into(),
                created_at: None,
                customer: customer.clone(),
            })
        })
    }

    fn link_card<'a>(
        &'a self,
        customer_id: &'a str,
        payload: &'a CustomerLinkCardPayload,
    ) -> BoxFuture<'a, Result<(), MalgaError>> {
        Box::pin(async move {
            self.calls
                .lock()
                .unwrap()
                .push(Call::LinkCard(customer_id.to_owned(), payload.card_id.clone()));
            if let Some(error) = &self.link_error {
                return Err(error.clone().into());
            }
            Ok(())
        })
    }
}
