use serde::Serialize;
use std::sync::Arc;

use super::dto::{
    CuisinePatch, RatingInput, RestaurantDetail, RestaurantInput, RestaurantSummary,
    TopRatedEntry,
};
use crate::modules::restaurant::domain::{
    Cuisine, DeletionSummary, Rating, Restaurant, RestaurantId, RestaurantStore,
    DEFAULT_TOP_RATED,
};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::validation::validate;
use crate::{log_debug, log_info, log_warn};

/// Result of a write that may legitimately change nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UpdateOutcome {
    Updated,
    /// The record already held these values
    Unchanged,
}

impl From<bool> for UpdateOutcome {
    fn from(modified: bool) -> Self {
        if modified {
            UpdateOutcome::Updated
        } else {
            UpdateOutcome::Unchanged
        }
    }
}

/// Use cases called by the request layer.
///
/// Every write validates first and reports all violations together;
/// writes addressed to an id check that the restaurant exists.
pub struct RestaurantService {
    store: Arc<RestaurantStore>,
}

impl RestaurantService {
    pub fn new(store: Arc<RestaurantStore>) -> Self {
        Self { store }
    }

    async fn require(&self, id: &str) -> AppResult<Restaurant> {
        self.store
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Restaurant with ID {} not found", id)))
    }

    pub async fn create_restaurant(&self, input: &RestaurantInput) -> AppResult<RestaurantId> {
        let restaurant = input.to_restaurant(None)?;
        validate(&restaurant)?;

        self.store.insert(&restaurant).await
    }

    pub async fn list_restaurants(&self) -> AppResult<Vec<RestaurantSummary>> {
        let restaurants = self.store.get_all().await?;
        Ok(restaurants.iter().map(RestaurantSummary::from).collect())
    }

    pub async fn get_restaurant(&self, id: &str) -> AppResult<RestaurantDetail> {
        let restaurant = self.require(id).await?;
        Ok(RestaurantDetail::from(&restaurant))
    }

    pub async fn search_by_name(&self, fragment: &str) -> AppResult<Vec<RestaurantSummary>> {
        let restaurants = self.store.get_by_name(fragment).await?;
        Ok(restaurants.iter().map(RestaurantSummary::from).collect())
    }

    pub async fn text_search(&self, query: &str) -> AppResult<Vec<RestaurantSummary>> {
        let restaurants = self.store.get_by_text_search(query).await?;
        Ok(restaurants.iter().map(RestaurantSummary::from).collect())
    }

    /// Overwrite name, cuisine and address of an existing restaurant
    pub async fn replace_restaurant(
        &self,
        id: &str,
        input: &RestaurantInput,
    ) -> AppResult<UpdateOutcome> {
        self.require(id).await?;

        let restaurant = input.to_restaurant(Some(id))?;
        validate(&restaurant)?;

        let outcome = UpdateOutcome::from(self.store.replace_full(&restaurant).await?);
        if outcome == UpdateOutcome::Unchanged {
            log_warn!("Replace of restaurant {} changed nothing", id);
        }
        Ok(outcome)
    }

    pub async fn change_cuisine(&self, id: &str, patch: CuisinePatch) -> AppResult<UpdateOutcome> {
        let mut restaurant = self.require(id).await?;
        let cuisine = Cuisine::try_from(patch.cuisine)?;

        restaurant.change_cuisine(cuisine);
        validate(&restaurant)?;

        let outcome = UpdateOutcome::from(self.store.update_cuisine(id, cuisine).await?);
        log_debug!("Cuisine patch on {}: {:?}", id, outcome);
        Ok(outcome)
    }

    /// Record a rating; returns the rating's id
    pub async fn rate_restaurant(&self, id: &str, input: &RatingInput) -> AppResult<String> {
        self.require(id).await?;

        let rating = Rating::from(input);
        validate(&rating)?;

        self.store.rate(id, &rating).await
    }

    /// Best `n` restaurants by mean stars, three when unspecified
    pub async fn top_rated(&self, n: Option<usize>) -> AppResult<Vec<TopRatedEntry>> {
        let ranked = self.store.top_rated(n.unwrap_or(DEFAULT_TOP_RATED)).await?;
        Ok(ranked.iter().map(TopRatedEntry::from).collect())
    }

    pub async fn remove_restaurant(&self, id: &str) -> AppResult<DeletionSummary> {
        self.require(id).await?;

        let summary = self.store.delete(id).await?;
        log_info!(
            "Total removed: {} restaurant with {} ratings",
            summary.restaurants_deleted,
            summary.ratings_deleted
        );
        Ok(summary)
    }
}
