pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{RestaurantService, UpdateOutcome};
pub use domain::{
    Address, Cuisine, DeletionSummary, RankedRestaurant, Rating, RatingRepository, Restaurant,
    RestaurantId, RestaurantRepository, RestaurantStore, DEFAULT_TOP_RATED,
};
pub use infrastructure::{
    InMemoryRatingRepository, InMemoryRestaurantRepository, RatingRepositoryImpl,
    RestaurantRepositoryImpl,
};
