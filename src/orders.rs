//! Order pipeline: customer orders and their lifecycle.
//!
//! An order starts `pending`, moves through `preparing` and
//! `out-for-delivery`, and freezes once `delivered`. Only pending orders may
//! be removed.

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
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub deliver_to: String,
    pub mobile_number: String,
    pub status: OrderStatus,
    pub dishes: Vec<OrderDish>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,
    Preparing,
    OutForDelivery,
    Delivered,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDish {
    pub dish_id: String,
    pub quantity: i64,
}

impl Keyed for Order {
    fn id(&self) -> &str {
        &self.id
    }
}

struct OrderPayload {
    deliver_to: String,
    mobile_number: String,
    dishes: Vec<OrderDish>,
}

/// Presence and dish-entry checks shared by create and update, in pipeline
/// order.
fn order_payload(body: &Value) -> Result<OrderPayload, ApiError> {
    let data = envelope::data(body);

    let deliver_to = validate::required_str(data, "Order", "deliverTo")?;
    let mobile_number = validate::required_str(data, "Order", "mobileNumber")?;
    let dishes = order_dishes(data)?;

    Ok(OrderPayload {
        deliver_to: deliver_to.to_string(),
        mobile_number: mobile_number.to_string(),
        dishes,
    })
}

/// The dishes member must be a non-empty sequence whose entries all carry a
/// positive integer quantity. Only the first offending entry is reported.
fn order_dishes(data: &Value) -> Result<Vec<OrderDish>, ApiError> {
    let dishes = data
        .get("dishes")
        .filter(|value| !value.is_null())
        .ok_or_else(|| ApiError::Validation("Order must include a dish".to_string()))?;

    let entries = dishes
        .as_array()
        .filter(|entries| !entries.is_empty())
        .ok_or_else(|| ApiError::Validation("Order must include at least one dish".to_string()))?;

    let mut validated = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let quantity = validate::positive_int(entry.get("quantity")).ok_or_else(|| {
            ApiError::Validation(format!(
                "Dish {index} must have a quantity that is an integer greater than 0"
            ))
        })?;

        validated.push(OrderDish {
            dish_id: entry
                .get("dishId")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            quantity,
        });
    }

    Ok(validated)
}

/// A status supplied in the body must be one of the four lifecycle values.
/// An absent status is left to the handler.
fn body_status(data: &Value) -> Result<Option<OrderStatus>, ApiError> {
    match data.get("status") {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value.clone()).map(Some).map_err(|_| {
            ApiError::Validation(
                "Order must have a status of pending, preparing, out-for-delivery, delivered"
                    .to_string(),
            )
        }),
    }
}

fn order_not_found(order_id: &str) -> ApiError {
    ApiError::NotFound(format!("Order id not found: {order_id}"))
}

fn find_order<'a>(store: &'a Store, order_id: &str) -> Result<&'a Order, ApiError> {
    store
        .orders
        .find(order_id)
        .ok_or_else(|| order_not_found(order_id))
}

pub async fn list(State(state): State<SharedState>) -> Result<Json<Data<Vec<Order>>>, ApiError> {
    let store = state.store()?;

    Ok(Json(Data {
        data: store.orders.list().to_vec(),
    }))
}

pub async fn read(
    State(state): State<SharedState>,
    Path(order_id): Path<String>,
) -> Result<Json<Data<Order>>, ApiError> {
    let store = state.store()?;
    let order = find_order(&store, &order_id)?.clone();

    Ok(Json(Data { data: order }))
}

pub async fn create(
    State(state): State<SharedState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Data<Order>>), ApiError> {
    let payload = order_payload(&body)?;

    let mut store = state.store()?;
    let order = Order {
        id: store.next_id(),
        deliver_to: payload.deliver_to,
        mobile_number: payload.mobile_number,
        status: OrderStatus::Pending,
        dishes: payload.dishes,
    };
    store.orders.append(order.clone());

    info!("Created order {}", order.id);
    Ok((StatusCode::CREATED, Json(Data { data: order })))
}

pub async fn update(
    State(state): State<SharedState>,
    Path(order_id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Data<Order>>, ApiError> {
    let mut store = state.store()?;
    let current = find_order(&store, &order_id)?;
    if current.status == OrderStatus::Delivered {
        return Err(ApiError::Conflict(
            "A delivered order cannot be changed".to_string(),
        ));
    }

    let data = envelope::data(&body);
    let status = body_status(data)?;
    let payload = order_payload(&body)?;
    validate::matching_id(data, "Order", &order_id)?;

    let Some(order) = store.orders.find_mut(&order_id) else {
        return Err(order_not_found(&order_id));
    };
    order.deliver_to = payload.deliver_to;
    order.mobile_number = payload.mobile_number;
    if let Some(status) = status {
        order.status = status;
    }
    order.dishes = payload
        .dishes
        .into_iter()
        .filter(|dish| dish.quantity > 0)
        .collect();
    let updated = order.clone();

    info!("Updated order {order_id}");
    Ok(Json(Data { data: updated }))
}

pub async fn delete(
    State(state): State<SharedState>,
    Path(order_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store()?;
    let index = store
        .orders
        .position(&order_id)
        .ok_or_else(|| order_not_found(&order_id))?;

    if store.orders.list()[index].status != OrderStatus::Pending {
        return Err(ApiError::Conflict(
            "cannot delete a non-pending order".to_string(),
        ));
    }

    store.orders.remove_at(index);

    info!("Deleted order {order_id}");
    Ok(StatusCode::NO_CONTENT)
}
