//! Hotel offer search: a two-step lookup resolving the city code to hotel
//! ids (`GET /v1/reference-data/locations/hotels/by-city`) and then fetching
//! offers for those ids (`GET /v3/shopping/hotel-offers`).

use serde_json::Value;
use tracing::{info, warn};
use wayfarer_core::domain::results::{HotelOffer, HotelQuery, RoomOffer};

use crate::client::{AmadeusClient, AmadeusError};

const MAX_HOTELS: usize = 5;
const MAX_ROOM_OFFERS: usize = 2;

/// Fail-soft adapter entry point: any provider error degrades to `None`.
pub(crate) async fn search(client: &AmadeusClient, query: &HotelQuery) -> Option<Vec<HotelOffer>> {
    match fetch(client, query).await {
        Ok(hotels) if !hotels.is_empty() => {
            info!(city = %query.city_code, count = hotels.len(), "hotel search returned offers");
            Some(hotels)
        }
        Ok(_) => {
            info!(city = %query.city_code, "hotel search returned no offers");
            None
        }
        Err(error) => {
            warn!(city = %query.city_code, error = %error, "hotel search degraded to no result");
            None
        }
    }
}

async fn fetch(client: &AmadeusClient, query: &HotelQuery) -> Result<Vec<HotelOffer>, AmadeusError> {
    let listing = client
        .get_json(
            "/v1/reference-data/locations/hotels/by-city",
            &[("cityCode", query.city_code.as_str())],
        )
        .await?;

    let hotel_ids = hotel_ids(&listing);
    if hotel_ids.is_empty() {
        return Ok(Vec::new());
    }

    let offers = client
        .get_json(
            "/v3/shopping/hotel-offers",
            &[
                ("hotelIds", hotel_ids.join(",").as_str()),
                ("checkInDate", query.check_in_date.as_str()),
                ("checkOutDate", query.check_out_date.as_str()),
                ("adults", "1"),
            ],
        )
        .await?;

    Ok(normalize(&offers))
}

pub(crate) fn hotel_ids(listing: &Value) -> Vec<String> {
    listing["data"]
        .as_array()
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
        .filter_map(|hotel| hotel["hotelId"].as_str())
        .take(MAX_HOTELS)
        .map(str::to_string)
        .collect()
}

/// Normalize the offers payload. A hotel entry is skipped only when its
/// top-level `hotel` or `offers` block is absent; missing sub-fields fall
/// back to "N/A".
pub(crate) fn normalize(payload: &Value) -> Vec<HotelOffer> {
    payload["data"]
        .as_array()
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
        .take(MAX_HOTELS)
        .filter_map(hotel_from)
        .collect()
}

fn hotel_from(raw: &Value) -> Option<HotelOffer> {
    let name = raw.pointer("/hotel/name").and_then(Value::as_str)?;
    let offers = raw["offers"].as_array()?;

    let rooms = offers.iter().take(MAX_ROOM_OFFERS).map(room_from).collect();
    Some(HotelOffer { name: name.to_string(), offers: rooms })
}

fn room_from(raw: &Value) -> RoomOffer {
    let total = raw.pointer("/price/total").and_then(Value::as_str).unwrap_or("N/A");
    let currency = raw.pointer("/price/currency").and_then(Value::as_str).unwrap_or("");
    let price = if currency.is_empty() { total.to_string() } else { format!("{total} {currency}") };

    RoomOffer {
        price,
        room: raw
            .pointer("/room/typeEstimated/category")
            .and_then(Value::as_str)
            .unwrap_or("N/A")
            .to_string(),
    }
}
