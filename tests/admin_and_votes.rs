mod common;

use chrono::{NaiveDate, NaiveTime};
use fake::faker::lorem::en::Words;
use fake::Fake;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use screening_estore::config::Config;
use screening_estore::views::admin::{self, AdminError, NewScreening, ScreeningPatch};
use screening_estore::views::vote_suggest::{self, SuggestOutcome};
use screening_estore::{ApiError, AppState};

#[tokio::test]
async fn update_keeps_blank_fields_and_refetches() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/screenings"))
        .and(body_partial_json(json!({
            "id": 4,
            "movieId": 2,
            "ticketsRemaining": 30,
            "date": "2023-01-10",
            "time": "21:00",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 4, "movieId": 2, "ticketsRemaining": 30, "date": "2023-01-10", "time": "21:00"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/screenings/"))
        .and(query_param("movieId", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 4, "movieId": 2, "ticketsRemaining": 30, "date": "2023-01-10", "time": "21:00"},
            {"id": 6, "movieId": 2, "ticketsRemaining": 12, "date": "2023-01-11", "time": "17:30"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let state = common::state_for(&server);
    let current = common::screening(4, 2, json!([]));
    let patch = ScreeningPatch {
        tickets_remaining: Some("  ".to_string()),
        time: Some("21:00".to_string()),
        ..ScreeningPatch::default()
    };

    let (saved, listing) = admin::update_screening(&state, &current, &patch).await.unwrap();
    assert_eq!(saved.time.format("%H:%M").to_string(), "21:00");
    assert_eq!(saved.tickets_remaining, 30);
    assert_eq!(listing.len(), 2);
}

#[tokio::test]
async fn delete_returns_what_is_left() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/screenings/4"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/screenings/"))
        .and(query_param("movieId", "2"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let state = common::state_for(&server);
    let left = admin::delete_screening(&state, &common::screening(4, 2, json!([])))
        .await
        .unwrap();
    assert!(left.is_empty());
}

#[tokio::test]
async fn invalid_new_screening_is_not_posted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/screenings"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let state = common::state_for(&server);
    let form = NewScreening {
        movie_id: 0,
        tickets_remaining: 10,
        date: NaiveDate::from_ymd_opt(2023, 2, 1).unwrap(),
        time: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
    };
    let err = admin::create_screening(&state, &form).await.unwrap_err();
    assert!(matches!(err, AdminError::Api(ApiError::InvalidInput(_))), "got {:?}", err);

    assert!(matches!(
        NewScreening::parse("2", "41", "2023-02-01", "20:00"),
        Err(AdminError::InvalidField { field: "tickets remaining", .. })
    ));
    assert!(matches!(
        NewScreening::parse("2", "10", "02/01/2023", "20:00"),
        Err(AdminError::InvalidField { field: "date", .. })
    ));
}

#[tokio::test]
async fn selecting_a_screening_loads_its_movie() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/screenings/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::screening_json(4, 2, json!([]))))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/movies/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 2, "title": "Alien", "poster": "alien.jpg", "runtime": 117, "mpaRating": "R", "year": 1979
        })))
        .mount(&server)
        .await;

    let state = common::state_for(&server);
    let selected = admin::select_screening(&state, 4).await.unwrap();
    assert_eq!(selected.movie.title, "Alien");
    assert_eq!(selected.screening.id, 4);
}

#[tokio::test]
async fn vote_adds_exactly_one() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/suggestions/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3, "movieTitle": "Heat", "votes": 7
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/suggestions"))
        .and(body_partial_json(json!({ "id": 3, "votes": 8 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3, "movieTitle": "Heat", "votes": 8
        })))
        .expect(1)
        .mount(&server)
        .await;

    let state = common::state_for(&server);
    let saved = vote_suggest::vote(&state, 3).await.unwrap();
    assert_eq!(saved.votes, 8);
}

#[tokio::test]
async fn suggesting_twice_reports_already_suggested() {
    let title: String = Words(2..4).fake::<Vec<String>>().join(" ");

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/suggestions"))
        .and(body_partial_json(json!({ "movieTitle": title, "votes": 1 })))
        .respond_with(ResponseTemplate::new(409))
        .expect(1)
        .mount(&server)
        .await;

    let state = common::state_for(&server);
    let outcome = vote_suggest::suggest(&state, &title).await.unwrap();
    assert_eq!(outcome, SuggestOutcome::AlreadySuggested);
    assert_eq!(outcome.to_string(), "Movie has already been suggested.");
}

#[tokio::test]
async fn suggestion_resource_name_is_configurable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/votes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "movieName": "Heat", "howManyVotes": 2}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = Config::default();
    config.api.base_url = server.uri();
    config.api.suggestions_resource = "votes".to_string();
    let state = AppState::new(config).unwrap();

    let list = vote_suggest::list(&state).await.unwrap();
    assert_eq!(list[0].movie_title, "Heat");
    assert_eq!(list[0].votes, 2);
}

#[tokio::test]
async fn admin_delete_suggestion_refetches() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/suggestions/1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/suggestions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 2, "movieTitle": "Ran", "votes": 1}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let state = common::state_for(&server);
    let left = admin::delete_suggestion(&state, 1).await.unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].id, 2);
}
