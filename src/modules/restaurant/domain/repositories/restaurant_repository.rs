use async_trait::async_trait;

use crate::modules::restaurant::domain::entities::{Restaurant, RestaurantId};
use crate::modules::restaurant::domain::value_objects::Cuisine;
use crate::shared::errors::AppResult;

/// Persistence for restaurant records.
///
/// Records hold the identifier, name, cuisine code and embedded address.
/// Restaurants come back without ratings; those live in the rating store.
/// Identifiers the backend cannot recognise simply match nothing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    /// Store a new record; the backend generates and returns the identifier
    async fn insert(&self, restaurant: &Restaurant) -> AppResult<RestaurantId>;

    /// Full collection, no ordering guarantee
    async fn find_all(&self) -> AppResult<Vec<Restaurant>>;

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Restaurant>>;

    /// Batch fetch; unknown ids are skipped
    async fn find_by_ids(&self, ids: &[RestaurantId]) -> AppResult<Vec<Restaurant>>;

    /// Case-insensitive substring match on the name
    async fn find_by_name(&self, fragment: &str) -> AppResult<Vec<Restaurant>>;

    /// Relevance-ranked full-text match on the name
    async fn text_search(&self, query: &str) -> AppResult<Vec<Restaurant>>;

    /// Overwrite every field of the record with the restaurant's id.
    /// `true` only when a record existed and something actually changed.
    async fn replace(&self, restaurant: &Restaurant) -> AppResult<bool>;

    /// Same modified-count semantics as [`replace`](Self::replace)
    async fn update_cuisine(&self, id: &str, cuisine: Cuisine) -> AppResult<bool>;

    /// Number of records removed (0 or 1)
    async fn delete(&self, id: &str) -> AppResult<u64>;
}
