use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// Query echoes
// ---------------------------------------------------------------------------

/// The flight query actually sent to the provider, defaults included.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightQuery {
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelQuery {
    pub city_code: String,
    pub check_in_date: String,
    pub check_out_date: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarQuery {
    pub city_code: String,
    pub pick_up_date: String,
    pub drop_off_date: String,
}

// ---------------------------------------------------------------------------
// Normalized offers
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentEndpoint {
    pub airport: String,
    pub time: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightSegment {
    pub departure: SegmentEndpoint,
    pub arrival: SegmentEndpoint,
    pub airline: String,
    pub duration: String,
}

/// One flight offer: a display price plus its segments in travel order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightOffer {
    pub price: String,
    pub segments: Vec<FlightSegment>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomOffer {
    pub price: String,
    pub room: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelOffer {
    pub name: String,
    pub offers: Vec<RoomOffer>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarOffer {
    pub provider: String,
    pub vehicle: String,
    pub category: String,
    pub price: String,
}

// ---------------------------------------------------------------------------
// Result bag
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightResults {
    pub query: FlightQuery,
    pub data: Vec<FlightOffer>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelResults {
    pub query: HotelQuery,
    pub data: Vec<HotelOffer>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarResults {
    pub query: CarQuery,
    pub data: Vec<CarOffer>,
}

/// The three-slot aggregate filled by the plan executor. A slot stays empty
/// when its tool was not in the plan or returned nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultBag {
    pub flights: Option<FlightResults>,
    pub hotels: Option<HotelResults>,
    pub cars: Option<CarResults>,
}

impl SearchResultBag {
    pub fn is_empty(&self) -> bool {
        self.flights.is_none() && self.hotels.is_none() && self.cars.is_none()
    }

    /// Query echoes of the populated slots, or `None` when the bag is empty.
    pub fn travel_data(&self) -> Option<Value> {
        if self.is_empty() {
            return None;
        }

        let mut data = json!({});
        if let Some(flights) = &self.flights {
            data["flights"] = json!(flights.query);
        }
        if let Some(hotels) = &self.hotels {
            data["hotels"] = json!(hotels.query);
        }
        if let Some(cars) = &self.cars {
            data["cars"] = json!(cars.query);
        }
        Some(data)
    }
}
