use chrono::NaiveDate;
use tracing::debug;
use wayfarer_core::dates;
use wayfarer_core::domain::plan::PlanStep;
use wayfarer_core::domain::results::{
    CarQuery, CarResults, FlightQuery, FlightResults, HotelQuery, HotelResults, SearchResultBag,
};
use wayfarer_core::provider::TravelProvider;

/// Runs the plan in order, one provider call at a time, and aggregates
/// populated results into the bag.
///
/// Steps are independent: a missing required field skips the step, an empty
/// provider result leaves the slot untouched, and neither stops later steps.
/// When a tool appears twice the later result wins, preserving plan order.
pub async fn execute_plan(
    provider: &dyn TravelProvider,
    plan: &[PlanStep],
    today: NaiveDate,
) -> SearchResultBag {
    let mut bag = SearchResultBag::default();

    for step in plan {
        match step {
            PlanStep::SearchFlights { origin, destination, departure_date } => {
                let (Some(origin), Some(destination)) = (required(origin), required(destination))
                else {
                    debug!("flight step skipped: origin or destination missing");
                    continue;
                };
                let query = FlightQuery {
                    origin: origin.to_string(),
                    destination: destination.to_string(),
                    departure_date: dates::resolve_start(departure_date.as_deref(), today),
                };
                if let Some(data) = provider.search_flights(&query).await {
                    if !data.is_empty() {
                        bag.flights = Some(FlightResults { query, data });
                    }
                }
            }
            PlanStep::SearchHotels { city, check_in, check_out } => {
                let Some(city) = required(city) else {
                    debug!("hotel step skipped: city missing");
                    continue;
                };
                let (check_in_date, check_out_date) =
                    dates::resolve_range(check_in.as_deref(), check_out.as_deref(), today);
                let query =
                    HotelQuery { city_code: city.to_string(), check_in_date, check_out_date };
                if let Some(data) = provider.search_hotels(&query).await {
                    if !data.is_empty() {
                        bag.hotels = Some(HotelResults { query, data });
                    }
                }
            }
            PlanStep::SearchCarRentals { city, pick_up, drop_off } => {
                let Some(city) = required(city) else {
                    debug!("car rental step skipped: city missing");
                    continue;
                };
                let (pick_up_date, drop_off_date) =
                    dates::resolve_range(pick_up.as_deref(), drop_off.as_deref(), today);
                let query =
                    CarQuery { city_code: city.to_string(), pick_up_date, drop_off_date };
                if let Some(data) = provider.search_car_rentals(&query).await {
                    if !data.is_empty() {
                        bag.cars = Some(CarResults { query, data });
                    }
                }
            }
        }
    }

    bag
}

fn required(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|value| !value.is_empty())
}
