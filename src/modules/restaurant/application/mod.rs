pub mod dto;
pub mod service;

pub use dto::{
    AddressView, CuisinePatch, RatingInput, RestaurantDetail, RestaurantInput, RestaurantSummary,
    TopRatedEntry,
};
pub use service::{RestaurantService, UpdateOutcome};
