//! Request handlers for the REST API

use crate::Result;
use crate::app::models::CountryHolidaysRequest;
use crate::app::services::holiday_service::HolidayService;
use crate::app::services::provider_client::HolidayProvider;
use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

/// Liveness probe
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `POST /holidays/`: holidays per requested country within the window
pub async fn get_holidays<P>(
    State(service): State<Arc<HolidayService<P>>>,
    payload: std::result::Result<Json<CountryHolidaysRequest>, JsonRejection>,
) -> Result<Json<Value>>
where
    P: HolidayProvider + 'static,
{
    let Json(request) = payload?;
    info!(
        "Holiday request for {:?} from {} to {}",
        request.countries, request.start, request.end
    );

    let listing = service.handle(&request).await?;
    Ok(Json(listing.rendered))
}
