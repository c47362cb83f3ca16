//! Flight offer search (`GET /v2/shopping/flight-offers`).

use serde_json::Value;
use tracing::{info, warn};
use wayfarer_core::domain::results::{FlightOffer, FlightQuery, FlightSegment, SegmentEndpoint};

use crate::client::{AmadeusClient, AmadeusError};

const MAX_OFFERS: usize = 5;

/// Fail-soft adapter entry point: any provider error degrades to `None`.
pub(crate) async fn search(client: &AmadeusClient, query: &FlightQuery) -> Option<Vec<FlightOffer>> {
    match fetch(client, query).await {
        Ok(offers) if !offers.is_empty() => {
            info!(
                origin = %query.origin,
                destination = %query.destination,
                count = offers.len(),
                "flight search returned offers"
            );
            Some(offers)
        }
        Ok(_) => {
            info!(origin = %query.origin, destination = %query.destination,
                "flight search returned no offers");
            None
        }
        Err(error) => {
            warn!(origin = %query.origin, destination = %query.destination, error = %error,
                "flight search degraded to no result");
            None
        }
    }
}

async fn fetch(
    client: &AmadeusClient,
    query: &FlightQuery,
) -> Result<Vec<FlightOffer>, AmadeusError> {
    let payload = client
        .get_json(
            "/v2/shopping/flight-offers",
            &[
                ("originLocationCode", query.origin.as_str()),
                ("destinationLocationCode", query.destination.as_str()),
                ("departureDate", query.departure_date.as_str()),
                ("adults", "1"),
                ("max", "5"),
            ],
        )
        .await?;

    Ok(normalize(&payload))
}

/// Normalize the raw payload, skipping any offer whose price block is absent
/// and substituting "N/A" for missing segment sub-fields.
pub(crate) fn normalize(payload: &Value) -> Vec<FlightOffer> {
    payload["data"]
        .as_array()
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
        .take(MAX_OFFERS)
        .filter_map(offer_from)
        .collect()
}

fn offer_from(raw: &Value) -> Option<FlightOffer> {
    let total = raw.pointer("/price/total").and_then(Value::as_str)?;
    let currency = raw.pointer("/price/currency").and_then(Value::as_str).unwrap_or("N/A");

    let mut segments = Vec::new();
    for itinerary in raw["itineraries"].as_array().map(Vec::as_slice).unwrap_or_default() {
        for segment in itinerary["segments"].as_array().map(Vec::as_slice).unwrap_or_default() {
            segments.push(segment_from(segment));
        }
    }

    Some(FlightOffer { price: format!("{total} {currency}"), segments })
}

fn segment_from(raw: &Value) -> FlightSegment {
    FlightSegment {
        departure: endpoint_from(&raw["departure"]),
        arrival: endpoint_from(&raw["arrival"]),
        airline: raw["carrierCode"].as_str().unwrap_or("N/A").to_string(),
        duration: raw["duration"].as_str().unwrap_or("N/A").to_string(),
    }
}

fn endpoint_from(raw: &Value) -> SegmentEndpoint {
    SegmentEndpoint {
        airport: raw["iataCode"].as_str().unwrap_or("N/A").to_string(),
        time: raw["at"].as_str().unwrap_or("").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::normalize;

    #[test]
    fn full_offer_normalizes_price_and_segments() {
        let payload = json!({
            "data": [{
                "price": { "total": "450.00", "currency": "USD" },
                "itineraries": [{
                    "segments": [{
                        "departure": { "iataCode": "BKK", "at": "2025-12-25T08:00:00" },
                        "arrival": { "iataCode": "NRT", "at": "2025-12-25T16:05:00" },
                        "carrierCode": "TG",
                        "duration": "PT6H5M"
                    }]
                }]
            }]
        });

        let offers = normalize(&payload);

        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].price, "450.00 USD");
        assert_eq!(offers[0].segments.len(), 1);
        assert_eq!(offers[0].segments[0].departure.airport, "BKK");
        assert_eq!(offers[0].segments[0].airline, "TG");
    }

    #[test]
    fn offer_without_price_block_is_skipped() {
        let payload = json!({
            "data": [
                { "itineraries": [] },
                { "price": { "total": "512.00", "currency": "USD" }, "itineraries": [] }
            ]
        });

        let offers = normalize(&payload);

        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].price, "512.00 USD");
    }

    #[test]
    fn missing_segment_sub_fields_fall_back_instead_of_failing() {
        let payload = json!({
            "data": [{
                "price": { "total": "450.00" },
                "itineraries": [{ "segments": [{ "departure": { "iataCode": "BKK" } }] }]
            }]
        });

        let offers = normalize(&payload);

        assert_eq!(offers[0].price, "450.00 N/A");
        assert_eq!(offers[0].segments[0].arrival.airport, "N/A");
        assert_eq!(offers[0].segments[0].departure.time, "");
        assert_eq!(offers[0].segments[0].duration, "N/A");
    }

    #[test]
    fn results_are_capped_at_five_offers() {
        let offer = json!({ "price": { "total": "100.00", "currency": "EUR" } });
        let payload = json!({ "data": vec![offer; 7] });

        assert_eq!(normalize(&payload).len(), 5);
    }

    #[test]
    fn payload_without_data_array_yields_nothing() {
        assert!(normalize(&json!({})).is_empty());
        assert!(normalize(&json!({ "data": "unexpected" })).is_empty());
    }
}
