use async_trait::async_trait;

use crate::domain::results::{CarOffer, CarQuery, FlightOffer, FlightQuery, HotelOffer, HotelQuery};

/// Port over the travel-data provider.
///
/// Implementations fail soft: any transport, auth, or query error is handled
/// behind this boundary and surfaces as `None`. Callers never see
/// provider-specific errors.
#[async_trait]
pub trait TravelProvider: Send + Sync {
    async fn search_flights(&self, query: &FlightQuery) -> Option<Vec<FlightOffer>>;
    async fn search_hotels(&self, query: &HotelQuery) -> Option<Vec<HotelOffer>>;
    async fn search_car_rentals(&self, query: &CarQuery) -> Option<Vec<CarOffer>>;
}
