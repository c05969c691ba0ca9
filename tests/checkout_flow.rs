mod common;

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use screening_estore::checkout::{CheckoutError, Product, SeatToggle, Size};
use screening_estore::views::{tickets, ViewError};
use screening_estore::Route;

#[tokio::test]
async fn buys_the_selected_seat_and_skips_the_booked_one() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/orders"))
        .and(body_partial_json(json!({
            "screeningId": 11,
            "accountId": 5,
            "tickets": 1,
            "popcorn": [0, 1, 0],
            "soda": [0, 0, 0],
            "seats": ["A1"],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 99,
            "screeningId": 11,
            "accountId": 5,
            "tickets": 1,
            "popcorn": [0, 1, 0],
            "soda": [0, 0, 0],
            "seats": ["A1"],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let state = common::state_for(&server);
    common::sign_in_as(&state, 5, "sam");
    state
        .session
        .screening
        .set(common::screening(11, 3, json!([[false, false], [false, true]])));

    let mut checkout = tickets::begin(&state).unwrap();
    assert_eq!(checkout.toggle_seat(0, 0).unwrap(), SeatToggle::Selected);
    assert_eq!(checkout.tickets(), 1);
    assert_eq!(checkout.toggle_seat(1, 1).unwrap(), SeatToggle::Unavailable);
    assert_eq!(checkout.tickets(), 1);
    checkout.concessions_mut().add(Product::Popcorn, Size::Medium);

    let order = tickets::complete_purchase(&state, &checkout).await.unwrap();
    assert_eq!(order.id, 99);
    assert_eq!(order.tickets, 1);
    assert_eq!(state.navigator.current(), Route::Thanks);
}

#[tokio::test]
async fn no_seats_means_no_order_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let state = common::state_for(&server);
    common::sign_in_as(&state, 5, "sam");
    state.session.screening.set(common::screening(11, 3, json!([])));

    let checkout = tickets::begin(&state).unwrap();
    let err = tickets::complete_purchase(&state, &checkout).await.unwrap_err();
    assert!(matches!(err, ViewError::Checkout(CheckoutError::NoTickets)), "got {:?}", err);
    assert_eq!(err.to_string(), "Please select at least one seat.");
    assert_ne!(state.navigator.current(), Route::Thanks);
}

#[tokio::test]
async fn failed_order_post_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(500).set_body_string("db down"))
        .expect(1)
        .mount(&server)
        .await;

    let state = common::state_for(&server);
    common::sign_in_as(&state, 5, "sam");
    state.session.screening.set(common::screening(11, 3, json!([])));

    let mut checkout = tickets::begin(&state).unwrap();
    checkout.toggle_seat(4, 7).unwrap();
    let err = tickets::complete_purchase(&state, &checkout).await.unwrap_err();
    assert!(
        matches!(err, ViewError::Checkout(CheckoutError::Api(_))),
        "got {:?}",
        err
    );
}

#[tokio::test]
async fn purchase_needs_a_signed_in_account() {
    let server = MockServer::start().await;
    let state = common::state_for(&server);
    state.session.screening.set(common::screening(11, 3, json!([])));

    let mut checkout = tickets::begin(&state).unwrap();
    checkout.toggle_seat(0, 0).unwrap();
    let err = tickets::complete_purchase(&state, &checkout).await.unwrap_err();
    assert!(matches!(err, ViewError::NotLoggedIn));
}
