pub mod restaurant_store;

pub use restaurant_store::{DeletionSummary, RankedRestaurant, RestaurantStore, DEFAULT_TOP_RATED};
