//! End-to-end view flows against a mocked backend and a real session file.
//!
//! Each test plays one view's control flow: gate, fetch, act, and apply
//! the read-failure policy, with wiremock standing in for the backend.

#![allow(clippy::unwrap_used)]

use medipos_client::ClientConfig;
use medipos_client::api::ApiClient;
use medipos_client::auth::{self, Credentials};
use medipos_client::inventory::{InventoryManager, NewItem};
use medipos_client::pos::{CheckoutError, PosSession};
use medipos_client::session::{SessionError, SessionStore};
use medipos_core::SessionToken;
use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Harness {
    api: ApiClient,
    store: SessionStore,
    _dir: tempfile::TempDir,
}

fn harness(server: &MockServer) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let config = ClientConfig {
        api_url: server.uri().parse().unwrap(),
        session_file: dir.path().join("session.json"),
        store_name: "Test Store".to_owned(),
        invoice_dir: dir.path().to_path_buf(),
    };
    let api = ApiClient::new(&config).unwrap();
    let store = SessionStore::new(config.session_file.clone());

    Harness {
        api,
        store,
        _dir: dir,
    }
}

fn product_json(id: i64, name: &str, quantity: u32, sell_price: f64) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "quantity": quantity,
        "batch_number": "B-1",
        "expiry_date": null,
        "buy_price": sell_price,
        "sell_price": sell_price,
        "supplier": "Acme Pharma"
    })
}

#[tokio::test]
async fn test_login_stores_token_and_remembered_email() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_partial_json(json!({"email": "owner@example.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "issued-jwt"
        })))
        .mount(&server)
        .await;

    let h = harness(&server);
    let credential = auth::login(
        &h.api,
        &h.store,
        &Credentials {
            email: "owner@example.com".to_owned(),
            password: "secret1".to_owned(),
            remember: true,
        },
    )
    .await
    .unwrap();

    assert_eq!(credential.token.as_str(), "issued-jwt");
    assert_eq!(h.store.require().unwrap().token.as_str(), "issued-jwt");
    assert_eq!(
        h.store.remembered_email().unwrap().as_deref(),
        Some("owner@example.com")
    );
}

#[tokio::test]
async fn test_rejected_read_clears_stored_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sales"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let h = harness(&server);
    h.store
        .store_token(SessionToken::new("jwt".to_owned()))
        .unwrap();
    let token = h.store.require().unwrap().token;

    let result = h.store.invalidate_on(h.api.list_sales(&token).await);

    assert!(matches!(result, Err(SessionError::AuthRequired)));
    assert!(h.store.load().unwrap().is_none());
}

#[tokio::test]
async fn test_inventory_create_submits_placeholders_and_single_price() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/products"))
        .and(body_partial_json(json!({
            "name": "Paracetamol 500mg",
            "quantity": 40,
            "batch_number": "AUTO",
            "supplier": "Default Supplier",
            "buy_price": 2.5,
            "sell_price": 2.5
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server);
    let manager = InventoryManager::new(h.api.clone());

    manager
        .create(
            &SessionToken::new("jwt".to_owned()),
            &NewItem {
                name: "Paracetamol 500mg".to_owned(),
                stock: 40,
                price: Decimal::new(25, 1),
                expiry: None,
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_checkout_submits_one_sale_per_line_in_cart_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            product_json(1, "Paracetamol", 10, 100.0),
            product_json(2, "Ibuprofen", 5, 50.0),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/sales"))
        .and(body_partial_json(json!({
            "customer_name": "Asha",
            "customer_phone": "9876543210"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(2)
        .mount(&server)
        .await;

    let h = harness(&server);
    let token = SessionToken::new("jwt".to_owned());
    let products = h.api.list_products(&token).await.unwrap();

    let mut pos = PosSession::new(&products);
    pos.add_to_cart(products.first().unwrap().id).unwrap();
    pos.set_quantity(products.first().unwrap().id, 2).unwrap();
    pos.add_to_cart(products.get(1).unwrap().id).unwrap();
    pos.set_customer("Asha", "9876543210");

    let receipt = pos.checkout(&h.api, &token).await.unwrap();

    assert_eq!(receipt.lines.len(), 2);
    assert_eq!(receipt.totals.subtotal, Decimal::new(250, 0));
    assert_eq!(receipt.totals.gst, Decimal::new(45, 0));
    assert_eq!(receipt.totals.total, Decimal::new(295, 0));
    assert!(pos.cart().is_empty());
    assert!(pos.customer().name.is_empty());

    // Sale lines went out in cart order.
    let requests = server.received_requests().await.unwrap();
    let sale_ids: Vec<i64> = requests
        .iter()
        .filter(|r| r.url.path() == "/sales")
        .map(|r| {
            r.body_json::<serde_json::Value>().unwrap()["product_id"]
                .as_i64()
                .unwrap()
        })
        .collect();
    assert_eq!(sale_ids, vec![1, 2]);
}

#[tokio::test]
async fn test_checkout_stops_at_first_rejected_line() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            product_json(1, "Paracetamol", 10, 100.0),
            product_json(2, "Ibuprofen", 5, 50.0),
            product_json(3, "Cetirizine", 8, 30.0),
        ])))
        .mount(&server)
        .await;
    // The second line is rejected; mounted first so it wins over the
    // catch-all success mock.
    Mock::given(method("POST"))
        .and(path("/sales"))
        .and(body_partial_json(json!({"product_id": 2})))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Insufficient stock"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/sales"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server);
    let token = SessionToken::new("jwt".to_owned());
    let products = h.api.list_products(&token).await.unwrap();

    let mut pos = PosSession::new(&products);
    for product in &products {
        pos.add_to_cart(product.id).unwrap();
    }
    pos.set_customer("Asha", "9876543210");

    let result = pos.checkout(&h.api, &token).await;

    match result {
        Err(CheckoutError::SaleFailed {
            committed, failed, ..
        }) => {
            assert_eq!(committed.len(), 1);
            assert_eq!(committed.first().unwrap().name, "Paracetamol");
            assert_eq!(failed.name, "Ibuprofen");
        }
        other => panic!("expected SaleFailed, got {other:?}"),
    }

    // The third line was never submitted, and the cart survives for the
    // operator to retry or amend.
    let sale_requests = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == "/sales")
        .count();
    assert_eq!(sale_requests, 2);
    assert_eq!(pos.cart().len(), 3);
}

#[tokio::test]
async fn test_refresh_picks_up_depleted_stock() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            product_json(1, "Paracetamol", 2, 100.0),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server);
    let token = SessionToken::new("jwt".to_owned());
    let mut pos = PosSession::new(&[]);

    pos.refresh(&h.api, &token).await.unwrap();

    assert_eq!(pos.items().len(), 1);
    assert_eq!(pos.items().first().unwrap().stock, 2);
}
