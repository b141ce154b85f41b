pub mod rating_repository;
pub mod restaurant_repository;

pub use rating_repository::InMemoryRatingRepository;
pub use restaurant_repository::InMemoryRestaurantRepository;
