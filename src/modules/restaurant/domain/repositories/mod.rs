pub mod rating_repository;
pub mod restaurant_repository;

pub use rating_repository::{RatingAverage, RatingRepository};
pub use restaurant_repository::RestaurantRepository;

#[cfg(test)]
pub use rating_repository::MockRatingRepository;
#[cfg(test)]
pub use restaurant_repository::MockRestaurantRepository;
