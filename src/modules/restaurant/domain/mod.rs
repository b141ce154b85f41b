pub mod entities;
pub mod repositories;
pub mod services;
pub mod value_objects;

pub use entities::{Restaurant, RestaurantId};
pub use repositories::{RatingAverage, RatingRepository, RestaurantRepository};
pub use services::{DeletionSummary, RankedRestaurant, RestaurantStore, DEFAULT_TOP_RATED};
pub use value_objects::{Address, Cuisine, Rating};
