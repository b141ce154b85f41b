pub mod memory;
pub mod models;
pub mod persistence;

pub use memory::{InMemoryRatingRepository, InMemoryRestaurantRepository};
pub use persistence::{RatingRepositoryImpl, RestaurantRepositoryImpl};
