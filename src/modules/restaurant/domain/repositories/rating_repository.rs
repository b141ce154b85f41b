use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::modules::restaurant::domain::entities::RestaurantId;
use crate::modules::restaurant::domain::value_objects::Rating;
use crate::shared::errors::AppResult;

/// One row of the group-by-restaurant aggregation over ratings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingAverage {
    pub restaurant_id: RestaurantId,
    pub average_stars: f64,
    pub rating_count: i64,
}

/// Persistence for rating records.
///
/// Each record carries a back-reference to its restaurant id; ratings are
/// stored and queried independently of the restaurant record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Store a rating for a restaurant, returning the rating's own id.
    /// A restaurant id that is not a UUID fails with `InvalidInput`.
    async fn insert(&self, restaurant_id: &str, rating: &Rating) -> AppResult<String>;

    /// Ratings for one restaurant in insertion order
    async fn find_by_restaurant(&self, restaurant_id: &str) -> AppResult<Vec<Rating>>;

    /// Ratings for several restaurants at once, keyed by restaurant id.
    /// Restaurants without ratings are absent from the map.
    async fn find_by_restaurants(
        &self,
        restaurant_ids: &[RestaurantId],
    ) -> AppResult<HashMap<RestaurantId, Vec<Rating>>>;

    /// Number of ratings removed
    async fn delete_by_restaurant(&self, restaurant_id: &str) -> AppResult<u64>;

    /// Mean stars per restaurant, highest first, ties broken by restaurant id
    /// ascending, at most `limit` rows
    async fn average_by_restaurant(&self, limit: usize) -> AppResult<Vec<RatingAverage>>;
}
