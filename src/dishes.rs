//! Dish pipeline: the menu side of the API.
//!
//! Dishes are created and updated, never deleted. Each handler runs its
//! validators in a fixed order and the first failure is the only error a
//! request surfaces.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::{
    envelope::{self, Data},
    error::ApiError,
    state::SharedState,
    store::{Keyed, Store},
    validate,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub image_url: String,
}

impl Keyed for Dish {
    fn id(&self) -> &str {
        &self.id
    }
}

struct DishPayload {
    name: String,
    description: String,
    price: i64,
    image_url: String,
}

/// Field checks shared by create and update, in pipeline order.
fn dish_payload(body: &Value) -> Result<DishPayload, ApiError> {
    let data = envelope::data(body);

    let name = validate::required_str(data, "Dish", "name")?;
    let description = validate::required_str(data, "Dish", "description")?;
    let image_url = validate::required_str(data, "Dish", "image_url")?;
    let price = validate::positive_int(data.get("price")).ok_or_else(|| {
        ApiError::Validation("Dish must have a price that is an integer greater than 0".to_string())
    })?;

    Ok(DishPayload {
        name: name.to_string(),
        description: description.to_string(),
        price,
        image_url: image_url.to_string(),
    })
}

fn dish_not_found(dish_id: &str) -> ApiError {
    ApiError::NotFound(format!("Dish id not found: {dish_id}"))
}

fn find_dish<'a>(store: &'a Store, dish_id: &str) -> Result<&'a Dish, ApiError> {
    store
        .dishes
        .find(dish_id)
        .ok_or_else(|| dish_not_found(dish_id))
}

pub async fn list(State(state): State<SharedState>) -> Result<Json<Data<Vec<Dish>>>, ApiError> {
    let store = state.store()?;

    Ok(Json(Data {
        data: store.dishes.list().to_vec(),
    }))
}

pub async fn read(
    State(state): State<SharedState>,
    Path(dish_id): Path<String>,
) -> Result<Json<Data<Dish>>, ApiError> {
    let store = state.store()?;
    let dish = find_dish(&store, &dish_id)?.clone();

    Ok(Json(Data { data: dish }))
}

pub async fn create(
    State(state): State<SharedState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Data<Dish>>), ApiError> {
    let payload = dish_payload(&body)?;

    let mut store = state.store()?;
    let dish = Dish {
        id: store.next_id(),
        name: payload.name,
        description: payload.description,
        price: payload.price,
        image_url: payload.image_url,
    };
    store.dishes.append(dish.clone());

    info!("Created dish {}", dish.id);
    Ok((StatusCode::CREATED, Json(Data { data: dish })))
}

pub async fn update(
    State(state): State<SharedState>,
    Path(dish_id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Data<Dish>>, ApiError> {
    let mut store = state.store()?;
    find_dish(&store, &dish_id)?;

    let payload = dish_payload(&body)?;
    validate::matching_id(envelope::data(&body), "Dish", &dish_id)?;

    let Some(dish) = store.dishes.find_mut(&dish_id) else {
        return Err(dish_not_found(&dish_id));
    };
    dish.name = payload.name;
    dish.description = payload.description;
    dish.price = payload.price;
    dish.image_url = payload.image_url;
    let updated = dish.clone();

    info!("Updated dish {dish_id}");
    Ok(Json(Data { data: updated }))
}
