//! Car rental search over the transfer-offers endpoint
//! (`POST /v1/shopping/transfer-offers`), keyed by city code and pick-up /
//! drop-off dates.

use serde_json::{json, Value};
use tracing::{info, warn};
use wayfarer_core::domain::results::{CarOffer, CarQuery};

use crate::client::{AmadeusClient, AmadeusError};

const MAX_OFFERS: usize = 5;

/// Fail-soft adapter entry point: any provider error degrades to `None`.
pub(crate) async fn search(client: &AmadeusClient, query: &CarQuery) -> Option<Vec<CarOffer>> {
    match fetch(client, query).await {
        Ok(offers) if !offers.is_empty() => {
            info!(city = %query.city_code, count = offers.len(),
                "car rental search returned offers");
            Some(offers)
        }
        Ok(_) => {
            info!(city = %query.city_code, "car rental search returned no offers");
            None
        }
        Err(error) => {
            warn!(city = %query.city_code, error = %error,
                "car rental search degraded to no result");
            None
        }
    }
}

async fn fetch(client: &AmadeusClient, query: &CarQuery) -> Result<Vec<CarOffer>, AmadeusError> {
    let body = json!({
        "startLocationCode": query.city_code,
        "startDateTime": format!("{}T10:00:00", query.pick_up_date),
        "endDateTime": format!("{}T10:00:00", query.drop_off_date),
        "passengers": 1,
    });

    let payload = client.post_json("/v1/shopping/transfer-offers", &body).await?;
    Ok(normalize(&payload))
}

/// Normalize the raw payload, skipping offers without a quotation block and
/// substituting "N/A" for missing provider/vehicle sub-fields.
pub(crate) fn normalize(payload: &Value) -> Vec<CarOffer> {
    payload["data"]
        .as_array()
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
        .take(MAX_OFFERS)
        .filter_map(offer_from)
        .collect()
}

fn offer_from(raw: &Value) -> Option<CarOffer> {
    let amount = raw.pointer("/quotation/monetaryAmount").and_then(Value::as_str)?;
    let currency = raw.pointer("/quotation/currencyCode").and_then(Value::as_str).unwrap_or("N/A");

    Some(CarOffer {
        provider: raw
            .pointer("/serviceProvider/name")
            .and_then(Value::as_str)
            .unwrap_or("N/A")
            .to_string(),
        vehicle: raw
            .pointer("/vehicle/description")
            .and_then(Value::as_str)
            .unwrap_or("N/A")
            .to_string(),
        category: raw
            .pointer("/vehicle/category")
            .and_then(Value::as_str)
            .unwrap_or("N/A")
            .to_string(),
        price: format!("{amount} {currency}"),
    })
}
