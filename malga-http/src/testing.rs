//! Fixtures shared by the wiremock tests.

use std::time::Duration;

use serde_json::{Value, json};
use wiremock::MockServer;

use crate::client::Malga;
use crate::config::MalgaConfig;

/// A client pointed at the mock server, retrying without delay.
pub(crate) fn client(server: &MockServer) -> Malga {
    let config = MalgaConfig::new("sk_test", "client-1")
        .with_base_url(server.uri().parse().unwrap())
        .with_retry_delay(Duration::ZERO);
    Malga::new(config).unwrap()
}

pub(crate) fn card_json() -> Value {
    json!({
        "id": "fafd9d72-b148-4a29-9528-f167f2dea972",
        "status": "active",
        "createdAt": "2023-09-20T18:30:22.344Z",
        "clientId": "client-1",
        "customerId": null,
        "brand": "Mastercard",
        "cardHolderName": "Homer Simpson",
        "cvvChecked": true,
        "fingerprint": null,
        "first6digits": "538957",
        "last4digits": "1603",
        "expirationMonth": "02",
        "expirationYear": "30"
    })
}

pub(crate) fn charge_json() -> Value {
    json!({
        "id": "575f9a3c-6e40-4077-852e-c6781dc3c7c7",
        "clientId": "client-1",
        "merchantId": "m-1",
        "amount": 100,
        "originalAmount": 100,
        "currency": "BRL",
        "capture": true,
        "status": "authorized",
        "paymentMethod": { "paymentType": "credit", "installments": 1 },
        "paymentSource": {
            "sourceType": "card",
            "cardId": "fafd9d72-b148-4a29-9528-f167f2dea972"
        },
        "transactionRequests": []
    })
}
