pub mod config;
pub mod dates;
pub mod domain;
pub mod provider;

pub use domain::chat::{ChatRequest, ChatResponse, ConversationTurn};
pub use domain::plan::{PlanStep, PlannerOutcome};
pub use domain::results::{
    CarOffer, CarQuery, CarResults, FlightOffer, FlightQuery, FlightResults, FlightSegment,
    HotelOffer, HotelQuery, HotelResults, RoomOffer, SearchResultBag, SegmentEndpoint,
};
pub use provider::TravelProvider;
