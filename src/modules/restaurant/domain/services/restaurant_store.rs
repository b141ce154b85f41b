use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::modules::restaurant::domain::entities::{Restaurant, RestaurantId};
use crate::modules::restaurant::domain::repositories::{RatingRepository, RestaurantRepository};
use crate::modules::restaurant::domain::value_objects::{Cuisine, Rating};
use crate::shared::errors::AppResult;
use crate::shared::utils::logger::{LogContext, TimedOperation};
use crate::{log_debug, log_info, log_warn};

pub const DEFAULT_TOP_RATED: usize = 3;

fn logged<T>(result: AppResult<T>, context: &str) -> AppResult<T> {
    if let Err(e) = &result {
        LogContext::error_with_context(e, context);
    }
    result
}

/// Counts returned by a cascading delete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeletionSummary {
    pub restaurants_deleted: u64,
    pub ratings_deleted: u64,
}

/// A restaurant reconstructed with its ratings, paired with its mean stars
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRestaurant {
    pub restaurant: Restaurant,
    pub average_stars: f64,
}

/// Catalog operations that span both collections.
///
/// Single-collection calls pass straight through; the cascading delete and
/// the top-rated aggregation combine the restaurant and rating stores.
/// No locking and no retries: each call surfaces the backend's result.
pub struct RestaurantStore {
    restaurants: Arc<dyn RestaurantRepository>,
    ratings: Arc<dyn RatingRepository>,
}

impl RestaurantStore {
    pub fn new(
        restaurants: Arc<dyn RestaurantRepository>,
        ratings: Arc<dyn RatingRepository>,
    ) -> Self {
        Self {
            restaurants,
            ratings,
        }
    }

    pub async fn insert(&self, restaurant: &Restaurant) -> AppResult<RestaurantId> {
        let id = logged(
            self.restaurants.insert(restaurant).await,
            "Failed to store restaurant",
        )?;
        log_info!("Restaurant '{}' stored with id {}", restaurant.name(), id);
        Ok(id)
    }

    pub async fn get_all(&self) -> AppResult<Vec<Restaurant>> {
        self.restaurants.find_all().await
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Option<Restaurant>> {
        self.restaurants.find_by_id(id).await
    }

    pub async fn get_by_name(&self, fragment: &str) -> AppResult<Vec<Restaurant>> {
        LogContext::search_operation("name", fragment, None);
        let found = self.restaurants.find_by_name(fragment).await?;
        LogContext::search_operation("name", fragment, Some(found.len()));
        Ok(found)
    }

    pub async fn get_by_text_search(&self, query: &str) -> AppResult<Vec<Restaurant>> {
        LogContext::search_operation("text", query, None);
        let found = self.restaurants.text_search(query).await?;
        LogContext::search_operation("text", query, Some(found.len()));
        Ok(found)
    }

    pub async fn replace_full(&self, restaurant: &Restaurant) -> AppResult<bool> {
        let modified = logged(
            self.restaurants.replace(restaurant).await,
            "Failed to replace restaurant",
        )?;
        log_debug!(
            "Replace of restaurant {:?} modified: {}",
            restaurant.id(),
            modified
        );
        Ok(modified)
    }

    pub async fn update_cuisine(&self, id: &str, cuisine: Cuisine) -> AppResult<bool> {
        let modified = logged(
            self.restaurants.update_cuisine(id, cuisine).await,
            "Failed to update cuisine",
        )?;
        log_debug!("Cuisine of restaurant {} set to {}: {}", id, cuisine, modified);
        Ok(modified)
    }

    pub async fn rate(&self, restaurant_id: &str, rating: &Rating) -> AppResult<String> {
        let rating_id = logged(
            self.ratings.insert(restaurant_id, rating).await,
            "Failed to store rating",
        )?;
        log_debug!(
            "Rating {} ({} stars) stored for restaurant {}",
            rating_id,
            rating.stars(),
            restaurant_id
        );
        Ok(rating_id)
    }

    pub async fn ratings_for(&self, restaurant_id: &str) -> AppResult<Vec<Rating>> {
        self.ratings.find_by_restaurant(restaurant_id).await
    }

    /// Remove a restaurant and every rating pointing at it.
    ///
    /// Ratings go first: if the second step never runs, what is left behind
    /// is orphaned ratings, never a restaurant whose ratings vanished.
    pub async fn delete(&self, id: &str) -> AppResult<DeletionSummary> {
        let ratings_deleted = logged(
            self.ratings.delete_by_restaurant(id).await,
            "Failed to delete ratings",
        )?;
        let restaurants_deleted = logged(
            self.restaurants.delete(id).await,
            "Failed to delete restaurant",
        )?;

        log_info!(
            "Deleted restaurant {}: {} restaurant record(s), {} rating(s)",
            id,
            restaurants_deleted,
            ratings_deleted
        );

        Ok(DeletionSummary {
            restaurants_deleted,
            ratings_deleted,
        })
    }

    /// Top `n` restaurants by mean stars.
    ///
    /// Two phases: aggregate scores from the ratings collection, then batch
    /// load the winning restaurants and their ratings. Ratings whose
    /// restaurant no longer exists are skipped, and the aggregation window
    /// widens past them so that up to `n` live restaurants are returned.
    pub async fn top_rated(&self, n: usize) -> AppResult<Vec<RankedRestaurant>> {
        if n == 0 {
            return Ok(Vec::new());
        }

        let timer = TimedOperation::new("top_rated");

        let mut limit = n;
        let (averages, mut restaurants) = loop {
            let averages = self.ratings.average_by_restaurant(limit).await?;
            if averages.is_empty() {
                timer.finish_with_info("no ratings");
                return Ok(Vec::new());
            }

            let ids: Vec<RestaurantId> =
                averages.iter().map(|a| a.restaurant_id.clone()).collect();
            let restaurants = self.restaurants.find_by_ids(&ids).await?;

            let orphaned = averages.len().saturating_sub(restaurants.len());
            if restaurants.len() >= n || averages.len() < limit || orphaned == 0 {
                break (averages, restaurants);
            }

            log_warn!(
                "{} rated restaurants no longer exist, widening top-rated window",
                orphaned
            );
            limit = n.saturating_add(orphaned);
        };

        let live_ids: Vec<RestaurantId> = restaurants
            .iter()
            .filter_map(|r| r.id().map(str::to_string))
            .collect();
        let mut ratings = if live_ids.is_empty() {
            HashMap::new()
        } else {
            self.ratings.find_by_restaurants(&live_ids).await?
        };

        let mut ranked = Vec::with_capacity(n);
        for average in averages {
            if ranked.len() == n {
                break;
            }

            let position = restaurants
                .iter()
                .position(|r| r.id() == Some(average.restaurant_id.as_str()));

            let Some(position) = position else {
                log_warn!(
                    "Ratings reference missing restaurant {}, skipping",
                    average.restaurant_id
                );
                continue;
            };

            let mut restaurant = restaurants.swap_remove(position);
            for rating in ratings.remove(&average.restaurant_id).unwrap_or_default() {
                restaurant.add_rating(rating);
            }

            ranked.push(RankedRestaurant {
                restaurant,
                average_stars: average.average_stars,
            });
        }

        timer.finish_with_info(&format!("{} restaurants", ranked.len()));
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::restaurant::domain::repositories::{
        MockRatingRepository, MockRestaurantRepository, RatingAverage,
    };
    use crate::modules::restaurant::domain::value_objects::Address;
    use crate::shared::errors::AppError;
    use mockall::predicate::eq;
    use mockall::Sequence;

    fn stored(id: &str, name: &str) -> Restaurant {
        let mut restaurant = Restaurant::with_id(id, name, Cuisine::Brazilian);
        restaurant.attach_address(Address::new("Rua A", "1", "Recife", "PE", "50000000"));
        restaurant
    }

    #[tokio::test]
    async fn test_delete_removes_ratings_before_restaurant() {
        let mut seq = Sequence::new();
        let mut ratings = MockRatingRepository::new();
        let mut restaurants = MockRestaurantRepository::new();

        ratings
            .expect_delete_by_restaurant()
            .withf(|id: &str| id == "r1")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(2));
        restaurants
            .expect_delete()
            .withf(|id: &str| id == "r1")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(1));

        let store = RestaurantStore::new(Arc::new(restaurants), Arc::new(ratings));
        let summary = store.delete("r1").await.unwrap();

        assert_eq!(
            summary,
            DeletionSummary {
                restaurants_deleted: 1,
                ratings_deleted: 2
            }
        );
    }

    #[tokio::test]
    async fn test_delete_stops_when_rating_removal_fails() {
        let mut ratings = MockRatingRepository::new();
        let mut restaurants = MockRestaurantRepository::new();

        ratings
            .expect_delete_by_restaurant()
            .returning(|_| Err(AppError::DatabaseError("connection reset".to_string())));
        restaurants.expect_delete().never();

        let store = RestaurantStore::new(Arc::new(restaurants), Arc::new(ratings));
        let err = store.delete("r1").await.unwrap_err();
        assert!(matches!(err, AppError::DatabaseError(_)));
    }

    #[tokio::test]
    async fn test_top_rated_batches_and_keeps_aggregate_order() {
        let mut ratings = MockRatingRepository::new();
        let mut restaurants = MockRestaurantRepository::new();

        ratings.expect_average_by_restaurant().with(eq(3)).returning(|_| {
            Ok(vec![
                RatingAverage {
                    restaurant_id: "b".to_string(),
                    average_stars: 5.0,
                    rating_count: 1,
                },
                RatingAverage {
                    restaurant_id: "a".to_string(),
                    average_stars: 4.0,
                    rating_count: 2,
                },
            ])
        });
        // Batch fetch returns in arbitrary order
        restaurants
            .expect_find_by_ids()
            .times(1)
            .returning(|_| Ok(vec![stored("a", "Alpha"), stored("b", "Beta")]));
        restaurants.expect_find_by_id().never();
        ratings.expect_find_by_restaurants().times(1).returning(|_| {
            let mut map = HashMap::new();
            map.insert(
                "a".to_string(),
                vec![Rating::new(5, "great"), Rating::new(3, "fine")],
            );
            map.insert("b".to_string(), vec![Rating::new(5, "superb")]);
            Ok(map)
        });

        let store = RestaurantStore::new(Arc::new(restaurants), Arc::new(ratings));
        let top = store.top_rated(3).await.unwrap();

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].restaurant.id(), Some("b"));
        assert_eq!(top[0].average_stars, 5.0);
        assert_eq!(top[1].restaurant.id(), Some("a"));
        assert_eq!(top[1].restaurant.ratings().len(), 2);
        assert_eq!(top[1].average_stars, 4.0);
    }

    #[tokio::test]
    async fn test_top_rated_skips_orphaned_ratings() {
        let mut ratings = MockRatingRepository::new();
        let mut restaurants = MockRestaurantRepository::new();

        ratings.expect_average_by_restaurant().returning(|_| {
            Ok(vec![RatingAverage {
                restaurant_id: "gone".to_string(),
                average_stars: 5.0,
                rating_count: 1,
            }])
        });
        restaurants.expect_find_by_ids().returning(|_| Ok(vec![]));
        ratings
            .expect_find_by_restaurants()
            .returning(|_| Ok(HashMap::new()));

        let store = RestaurantStore::new(Arc::new(restaurants), Arc::new(ratings));
        assert!(store.top_rated(3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_top_rated_widens_window_past_orphaned_ratings() {
        let mut seq = Sequence::new();
        let mut ratings = MockRatingRepository::new();
        let mut restaurants = MockRestaurantRepository::new();

        let average = |id: &str, stars: f64| RatingAverage {
            restaurant_id: id.to_string(),
            average_stars: stars,
            rating_count: 1,
        };

        ratings
            .expect_average_by_restaurant()
            .with(eq(2))
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Ok(vec![average("gone", 5.0), average("a", 4.0)]));
        restaurants
            .expect_find_by_ids()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(vec![stored("a", "Alpha")]));
        ratings
            .expect_average_by_restaurant()
            .with(eq(3))
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| {
                Ok(vec![
                    average("gone", 5.0),
                    average("a", 4.0),
                    average("b", 3.0),
                ])
            });
        restaurants
            .expect_find_by_ids()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(vec![stored("b", "Beta"), stored("a", "Alpha")]));
        ratings
            .expect_find_by_restaurants()
            .times(1)
            .returning(|_| Ok(HashMap::new()));

        let store = RestaurantStore::new(Arc::new(restaurants), Arc::new(ratings));
        let top = store.top_rated(2).await.unwrap();

        let ids: Vec<Option<&str>> = top.iter().map(|r| r.restaurant.id()).collect();
        assert_eq!(ids, vec![Some("a"), Some("b")]);
    }

    #[tokio::test]
    async fn test_top_rated_zero_does_not_touch_storage() {
        let mut ratings = MockRatingRepository::new();
        ratings.expect_average_by_restaurant().never();

        let store = RestaurantStore::new(
            Arc::new(MockRestaurantRepository::new()),
            Arc::new(ratings),
        );
        assert!(store.top_rated(0).await.unwrap().is_empty());
    }
}
