pub mod rating_repository_impl;
pub mod restaurant_repository_impl;

pub use rating_repository_impl::RatingRepositoryImpl;
pub use restaurant_repository_impl::RestaurantRepositoryImpl;
