//! Scenario: HTTP backend speaks the documented wire format.
//!
//! GREEN when:
//! - Mutations send the documented PATCH bodies, with bearer token and request id.
//! - Reads decode `data` from the envelope (`success` or `status` key).
//! - `success: false` maps to `Rejected`, non-2xx to `Http`, bad bodies to `Decode`.
//! - An unreachable backend maps to `Transport`.

use std::time::Duration;

use httpmock::prelude::*;
use httpmock::Method::PATCH;
use serde_json::json;

use mkp_api::{ApiError, HttpBackend, MarketplaceBackend};
use mkp_schemas::{
    ContractAction, ContractActionRequest, LicenseAction, LicenseActionRequest,
    OrderStatusUpdate, PaymentSlipUpdate,
};
use mkp_status::{OrderStatus, PaymentSlipStatus, VerificationStatus};

fn backend(server: &MockServer, token: Option<&str>) -> HttpBackend {
    HttpBackend::new(
        &server.url("/v1"),
        Duration::from_secs(5),
        token.map(str::to_string),
    )
    .unwrap()
}

#[tokio::test]
async fn order_status_patch_sends_numeric_code_and_auth() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(PATCH)
                .path("/v1/orders/status")
                .header("authorization", "Bearer admin-tok")
                .header_exists("x-request-id")
                .json_body(json!({ "order_id": "o-1", "status": 3 }));
            then.status(200)
                .json_body(json!({ "success": true, "message": "Order status updated" }));
        })
        .await;

    let ack = backend(&server, Some("admin-tok"))
        .update_order_status(&OrderStatusUpdate {
            order_id: "o-1".to_string(),
            status: OrderStatus::Shipped,
        })
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(ack.message.as_deref(), Some("Order status updated"));
}

#[tokio::test]
async fn slip_contract_and_license_bodies() {
    let server = MockServer::start_async().await;
    let slip = server
        .mock_async(|when, then| {
            when.method(PATCH)
                .path("/v1/payment-slips/status")
                .json_body(json!({ "slip_id": "s-1", "status": 2 }));
            then.status(200).json_body(json!({ "success": true }));
        })
        .await;
    let contract = server
        .mock_async(|when, then| {
            when.method(PATCH)
                .path("/v1/won-bids/contract-action")
                .json_body(json!({ "won_bid_id": "wb-1", "action": "reject" }));
            then.status(200).json_body(json!({ "success": true }));
        })
        .await;
    let license = server
        .mock_async(|when, then| {
            when.method(PATCH)
                .path("/v1/users/license-action")
                .json_body(json!({ "user_id": "u-1", "action": "decline" }));
            then.status(200).json_body(json!({ "status": true }));
        })
        .await;

    let b = backend(&server, None);
    b.update_payment_slip(&PaymentSlipUpdate {
        slip_id: "s-1".to_string(),
        status: PaymentSlipStatus::Decline,
    })
    .await
    .unwrap();
    b.contract_action(&ContractActionRequest {
        won_bid_id: "wb-1".to_string(),
        action: ContractAction::Reject,
    })
    .await
    .unwrap();
    b.license_action(&LicenseActionRequest {
        user_id: "u-1".to_string(),
        action: LicenseAction::Decline,
    })
    .await
    .unwrap();

    slip.assert_async().await;
    contract.assert_async().await;
    license.assert_async().await;
}

#[tokio::test]
async fn fetch_decodes_envelope_data() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/users/u-7/license");
            then.status(200).json_body(json!({
                "status": true,
                "data": { "user_id": "u-7", "license_status": 0, "license_url": "https://cdn/l.png" }
            }));
        })
        .await;

    let lic = backend(&server, None).fetch_user_license("u-7").await.unwrap();
    assert_eq!(lic.user_id, "u-7");
    assert_eq!(lic.license_status, VerificationStatus::Pending);
}

#[tokio::test]
async fn fetch_accepts_envelope_with_both_outcome_keys() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/orders/o-5");
            then.status(200).json_body(json!({
                "success": true,
                "status": true,
                "data": { "id": "o-5", "order_status": 2 }
            }));
        })
        .await;

    let order = backend(&server, None).fetch_order("o-5").await.unwrap();
    assert_eq!(order.id, "o-5");
    assert_eq!(order.order_status, OrderStatus::Process);
}

#[tokio::test]
async fn success_false_maps_to_rejected() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(PATCH).path("/v1/orders/status");
            then.status(200)
                .json_body(json!({ "success": false, "message": "Order is locked" }));
        })
        .await;

    let err = backend(&server, None)
        .update_order_status(&OrderStatusUpdate {
            order_id: "o-1".to_string(),
            status: OrderStatus::Confirmed,
        })
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::Rejected {
            message: "Order is locked".to_string()
        }
    );
}

#[tokio::test]
async fn non_2xx_maps_to_http_with_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/orders/o-404");
            then.status(404)
                .json_body(json!({ "success": false, "message": "Order not found" }));
        })
        .await;

    let err = backend(&server, None).fetch_order("o-404").await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Http {
            status: 404,
            message: "Order not found".to_string()
        }
    );
}

#[tokio::test]
async fn fetch_without_data_or_with_garbage_is_decode_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/won-bids/wb-1");
            then.status(200).json_body(json!({ "success": true }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/payment-slips/s-1");
            then.status(200).body("<html>maintenance</html>");
        })
        .await;

    let b = backend(&server, None);
    assert!(matches!(
        b.fetch_won_bid("wb-1").await.unwrap_err(),
        ApiError::Decode(_)
    ));
    assert!(matches!(
        b.fetch_payment_slip("s-1").await.unwrap_err(),
        ApiError::Decode(_)
    ));
}

#[tokio::test]
async fn unreachable_backend_is_transport_error() {
    // Port 9 (discard) on loopback is not expected to accept HTTP.
    let b = HttpBackend::new("http://127.0.0.1:9", Duration::from_secs(2), None).unwrap();
    let err = b.fetch_order("o-1").await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)), "got: {err:?}");
}
