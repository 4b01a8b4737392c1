use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use serde_json::json;

use chow::dishes::{self, Dish};
use chow::error::ApiError;
use chow::state::{AppState, SharedState};
use chow::store::Store;

fn dish(id: &str, name: &str) -> Dish {
    Dish {
        id: id.to_string(),
        name: name.to_string(),
        description: "A test dish".to_string(),
        price: 900,
        image_url: "https://images.chow.test/dish.jpg".to_string(),
    }
}

fn state_with(dishes: Vec<Dish>) -> SharedState {
    let mut store = Store::new();
    for dish in dishes {
        store.dishes.append(dish);
    }
    AppState::with_store(store)
}

async fn dish_count(state: &SharedState) -> usize {
    let Json(body) = dishes::list(State(state.clone())).await.unwrap();
    body.data.len()
}

#[tokio::test]
async fn test_list_returns_all_dishes() {
    let state = state_with(vec![dish("d-1", "Falafel Wrap"), dish("d-2", "Miso Soup")]);

    let Json(body) = dishes::list(State(state)).await.unwrap();

    assert_eq!(body.data.len(), 2);
    assert_eq!(body.data[0].id, "d-1");
    assert_eq!(body.data[1].name, "Miso Soup");
}

#[tokio::test]
async fn test_read_returns_dish() {
    let state = state_with(vec![dish("d-1", "Falafel Wrap")]);

    let result = dishes::read(State(state), Path("d-1".to_string())).await;

    let Json(body) = result.unwrap();
    assert_eq!(body.data.name, "Falafel Wrap");
}

#[tokio::test]
async fn test_read_unknown_dish_is_not_found() {
    let state = state_with(vec![dish("d-1", "Falafel Wrap")]);

    let result = dishes::read(State(state), Path("nope".to_string())).await;

    assert_eq!(
        result.err(),
        Some(ApiError::NotFound("Dish id not found: nope".to_string()))
    );
}

#[tokio::test]
async fn test_create_appends_with_fresh_id() {
    let state = state_with(vec![dish("d-1", "Falafel Wrap")]);
    let body = json!({ "data": {
        "name": "Tonkotsu Ramen",
        "description": "Pork broth, chashu, soft egg",
        "price": 1500,
        "image_url": "https://images.chow.test/ramen.jpg"
    }});

    let result = dishes::create(State(state.clone()), Json(body)).await;

    let (status, Json(created)) = result.unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(created.data.id, "d-1");
    assert_eq!(created.data.price, 1500);
    assert_eq!(dish_count(&state).await, 2);
}

#[tokio::test]
async fn test_create_requires_each_field() {
    let state = state_with(vec![]);

    for (payload, message) in [
        (
            json!({ "data": { "description": "d", "price": 1, "image_url": "u" }}),
            "Dish must include a name",
        ),
        (
            json!({ "data": { "name": "n", "price": 1, "image_url": "u" }}),
            "Dish must include a description",
        ),
        (
            json!({ "data": { "name": "n", "description": "d", "price": 1 }}),
            "Dish must include a image_url",
        ),
        (json!({}), "Dish must include a name"),
    ] {
        let result = dishes::create(State(state.clone()), Json(payload)).await;
        assert_eq!(
            result.err(),
            Some(ApiError::Validation(message.to_string()))
        );
    }

    assert_eq!(dish_count(&state).await, 0);
}

#[tokio::test]
async fn test_create_rejects_invalid_price() {
    let state = state_with(vec![]);

    for price in [json!(0), json!(-5), json!(2.5), json!("4"), json!(null)] {
        let payload = json!({ "data": {
            "name": "n", "description": "d", "image_url": "u", "price": price
        }});

        let result = dishes::create(State(state.clone()), Json(payload)).await;

        assert_eq!(
            result.err(),
            Some(ApiError::Validation(
                "Dish must have a price that is an integer greater than 0".to_string()
            ))
        );
    }

    assert_eq!(dish_count(&state).await, 0);
}

#[tokio::test]
async fn test_failed_create_is_idempotent() {
    let state = state_with(vec![dish("d-1", "Falafel Wrap")]);
    let payload = json!({ "data": { "name": "n", "description": "d", "image_url": "u" }});

    let first = dishes::create(State(state.clone()), Json(payload.clone())).await;
    let second = dishes::create(State(state.clone()), Json(payload)).await;

    assert_eq!(first.err(), second.err());
    assert_eq!(dish_count(&state).await, 1);
}

#[tokio::test]
async fn test_update_overwrites_all_mutable_fields() {
    let state = state_with(vec![dish("d-1", "Falafel Wrap")]);
    let body = json!({ "data": {
        "name": "Falafel Plate",
        "description": "Now with extra pickles",
        "price": 1100,
        "image_url": "https://images.chow.test/falafel-plate.jpg"
    }});

    let result = dishes::update(State(state.clone()), Path("d-1".to_string()), Json(body)).await;

    let Json(updated) = result.unwrap();
    assert_eq!(updated.data.id, "d-1");
    assert_eq!(updated.data.name, "Falafel Plate");
    assert_eq!(updated.data.price, 1100);

    let Json(read_back) = dishes::read(State(state), Path("d-1".to_string()))
        .await
        .unwrap();
    assert_eq!(read_back.data.description, "Now with extra pickles");
}

#[tokio::test]
async fn test_update_accepts_matching_body_id() {
    let state = state_with(vec![dish("d-1", "Falafel Wrap")]);
    let body = json!({ "data": {
        "id": "d-1",
        "name": "n", "description": "d", "price": 1, "image_url": "u"
    }});

    let result = dishes::update(State(state), Path("d-1".to_string()), Json(body)).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_update_rejects_mismatched_body_id() {
    let state = state_with(vec![dish("d-1", "Falafel Wrap")]);
    let body = json!({ "data": {
        "id": "other",
        "name": "n", "description": "d", "price": 1, "image_url": "u"
    }});

    let result = dishes::update(State(state.clone()), Path("d-1".to_string()), Json(body)).await;

    assert_eq!(
        result.err(),
        Some(ApiError::Validation(
            "Dish id does not match other".to_string()
        ))
    );

    let Json(read_back) = dishes::read(State(state), Path("d-1".to_string()))
        .await
        .unwrap();
    assert_eq!(read_back.data.name, "Falafel Wrap");
}

#[tokio::test]
async fn test_update_unknown_dish_is_not_found() {
    let state = state_with(vec![]);

    let result = dishes::update(State(state), Path("ghost".to_string()), Json(json!({}))).await;

    assert_eq!(
        result.err(),
        Some(ApiError::NotFound("Dish id not found: ghost".to_string()))
    );
}
