use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Datelike, FixedOffset, Timelike};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::error::ApiError;
use crate::model::{Price, RateDocument, TimeOfDay};
use crate::observability;
use crate::store::{normalize, RateStore};

// ── Wire shapes ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateParams {
    start_date_time: String,
    end_date_time: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum RateStatus {
    Available,
    Unavailable,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateResponse {
    price: Option<Price>,
    status: RateStatus,
    start_date_time: String,
    end_date_time: String,
}

// ── Router ───────────────────────────────────────────────────────

pub fn router(store: Arc<RateStore>) -> Router {
    Router::new()
        .route("/rate", get(get_rate).post(update_rates))
        .route("/health", get(health))
        .with_state(store)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

// ── Handlers ─────────────────────────────────────────────────────

async fn get_rate(
    State(store): State<Arc<RateStore>>,
    Query(params): Query<RateParams>,
) -> Result<Json<RateResponse>, ApiError> {
    let started = Instant::now();
    let result = lookup_rate(&store, &params);
    observe("/rate:get", &result, started);
    result.map(Json)
}

async fn update_rates(
    State(store): State<Arc<RateStore>>,
    Json(doc): Json<RateDocument>,
) -> Result<Json<Value>, ApiError> {
    let started = Instant::now();
    let result = install_rates(&store, &doc);
    observe("/rate:post", &result, started);
    result.map(Json)
}

fn lookup_rate(store: &RateStore, params: &RateParams) -> Result<RateResponse, ApiError> {
    let start = parse_offset_date_time(&params.start_date_time, "startDateTime")?;
    let end = parse_offset_date_time(&params.end_date_time, "endDateTime")?;
    if start > end {
        return Err(ApiError::BadRequest(format!(
            "invalid time range: start '{start}' is after end '{end}'"
        )));
    }
    if start.ordinal() != end.ordinal() || start.year() != end.year() {
        return Err(ApiError::BadRequest(format!(
            "invalid date range: start '{start}' is not on the same day as '{end}'"
        )));
    }

    info!("retrieving rate for {start} to {end}");
    let price = store.query(start.weekday(), time_of_day(&start), time_of_day(&end));
    let status = match price {
        Some(_) => RateStatus::Available,
        None => RateStatus::Unavailable,
    };
    metrics::counter!(
        observability::RATE_QUERIES_TOTAL,
        "outcome" => if price.is_some() { "available" } else { "unavailable" }
    )
    .increment(1);

    Ok(RateResponse {
        price,
        status,
        start_date_time: start.to_rfc3339(),
        end_date_time: end.to_rfc3339(),
    })
}

fn install_rates(store: &RateStore, doc: &RateDocument) -> Result<Value, ApiError> {
    match normalize(&doc.rates) {
        Ok(table) => {
            store.replace(table);
            info!("installed new rate table from {} specs", doc.rates.len());
            metrics::counter!(observability::RATE_UPDATES_TOTAL).increment(1);
            Ok(json!({ "status": "updated", "rates": doc.rates.len() }))
        }
        Err(e) => {
            // The previously installed table stays in effect.
            metrics::counter!(observability::RATE_UPDATES_REJECTED_TOTAL).increment(1);
            Err(e.into())
        }
    }
}

// ── Helpers ──────────────────────────────────────────────────────

fn parse_offset_date_time(raw: &str, param: &str) -> Result<DateTime<FixedOffset>, ApiError> {
    DateTime::parse_from_rfc3339(raw)
        .map_err(|e| ApiError::BadRequest(format!("invalid {param} '{raw}': {e}")))
}

/// Weekday and time-of-day are taken in the request's own offset, matching how
/// the table's bounds were anchored at normalization time.
fn time_of_day(dt: &DateTime<FixedOffset>) -> TimeOfDay {
    TimeOfDay::from_hms(dt.hour(), dt.minute(), dt.second(), *dt.offset())
}

fn observe<T>(route: &'static str, result: &Result<T, ApiError>, started: Instant) {
    let status = match result {
        Ok(_) => "200",
        Err(ApiError::BadRequest(_)) => "400",
        Err(ApiError::Internal(_)) => "500",
    };
    metrics::counter!(observability::REQUESTS_TOTAL, "route" => route, "status" => status)
        .increment(1);
    metrics::histogram!(observability::REQUEST_DURATION_SECONDS, "route" => route)
        .record(started.elapsed().as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_response_serializes_with_camel_case_keys() {
        let resp = RateResponse {
            price: Some(1750),
            status: RateStatus::Available,
            start_date_time: "2015-07-01T07:00:00-05:00".into(),
            end_date_time: "2015-07-01T12:00:00-05:00".into(),
        };
        let v = serde_json::to_value(&resp).unwrap();
        assert_eq!(v["price"], 1750);
        assert_eq!(v["status"], "available");
        assert_eq!(v["startDateTime"], "2015-07-01T07:00:00-05:00");
        assert_eq!(v["endDateTime"], "2015-07-01T12:00:00-05:00");
    }

    #[test]
    fn unavailable_serializes_null_price() {
        let resp = RateResponse {
            price: None,
            status: RateStatus::Unavailable,
            start_date_time: String::new(),
            end_date_time: String::new(),
        };
        let v = serde_json::to_value(&resp).unwrap();
        assert!(v["price"].is_null());
        assert_eq!(v["status"], "unavailable");
    }

    #[test]
    fn time_of_day_conversion_keeps_offset() {
        let dt = DateTime::parse_from_rfc3339("2015-07-04T15:30:45+00:00").unwrap();
        let t = time_of_day(&dt);
        assert_eq!(t.second_of_day(), 15 * 3600 + 30 * 60 + 45);
        assert_eq!(t.offset_seconds(), 0);

        let dt = DateTime::parse_from_rfc3339("2015-07-01T07:00:00-05:00").unwrap();
        assert_eq!(time_of_day(&dt).offset_seconds(), -5 * 3600);
    }
}
