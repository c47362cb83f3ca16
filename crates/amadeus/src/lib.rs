//! Amadeus travel-data adapters.
//!
//! One submodule per search capability (flights, hotels, car rentals), each
//! normalizing the provider's partial response shapes into the fixed offer
//! records and failing soft: transport or query errors degrade to "no
//! result" and never reach the caller.

mod cars;
mod client;
mod flights;
mod hotels;

pub use client::{AmadeusClient, AmadeusError};
