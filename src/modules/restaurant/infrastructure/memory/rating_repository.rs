use async_trait::async_trait;
use dashmap::DashMap;
use std::cmp::Ordering as CmpOrdering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

use crate::modules::restaurant::domain::entities::RestaurantId;
use crate::modules::restaurant::domain::repositories::{RatingAverage, RatingRepository};
use crate::modules::restaurant::domain::value_objects::Rating;
use crate::shared::errors::{AppError, AppResult};

#[derive(Debug, Clone)]
struct StoredRating {
    sequence: u64,
    restaurant_id: RestaurantId,
    rating: Rating,
}

/// Process-local rating store, keyed by rating id
#[derive(Debug, Default)]
pub struct InMemoryRatingRepository {
    records: DashMap<String, StoredRating>,
    sequence: AtomicU64,
}

impl InMemoryRatingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn ordered<F>(&self, keep: F) -> Vec<StoredRating>
    where
        F: Fn(&StoredRating) -> bool,
    {
        let mut rows: Vec<StoredRating> = self
            .records
            .iter()
            .filter(|entry| keep(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        rows.sort_by_key(|row| row.sequence);
        rows
    }
}

#[async_trait]
impl RatingRepository for InMemoryRatingRepository {
    async fn insert(&self, restaurant_id: &str, rating: &Rating) -> AppResult<String> {
        if Uuid::parse_str(restaurant_id).is_err() {
            return Err(AppError::InvalidInput(format!(
                "Invalid restaurant id: {}",
                restaurant_id
            )));
        }
        let id = Uuid::new_v4().to_string();
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst);

        self.records.insert(
            id.clone(),
            StoredRating {
                sequence,
                restaurant_id: restaurant_id.to_string(),
                rating: rating.clone(),
            },
        );
        Ok(id)
    }

    async fn find_by_restaurant(&self, restaurant_id: &str) -> AppResult<Vec<Rating>> {
        Ok(self
            .ordered(|row| row.restaurant_id == restaurant_id)
            .into_iter()
            .map(|row| row.rating)
            .collect())
    }

    async fn find_by_restaurants(
        &self,
        restaurant_ids: &[RestaurantId],
    ) -> AppResult<HashMap<RestaurantId, Vec<Rating>>> {
        let mut grouped: HashMap<RestaurantId, Vec<Rating>> = HashMap::new();
        for row in self.ordered(|row| restaurant_ids.contains(&row.restaurant_id)) {
            grouped.entry(row.restaurant_id).or_default().push(row.rating);
        }
        Ok(grouped)
    }

    async fn delete_by_restaurant(&self, restaurant_id: &str) -> AppResult<u64> {
        let mut deleted = 0u64;
        self.records.retain(|_, row| {
            let keep = row.restaurant_id != restaurant_id;
            if !keep {
                deleted += 1;
            }
            keep
        });
        Ok(deleted)
    }

    async fn average_by_restaurant(&self, limit: usize) -> AppResult<Vec<RatingAverage>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut totals: HashMap<RestaurantId, (i64, i64)> = HashMap::new();
        for entry in self.records.iter() {
            let row = entry.value();
            let total = totals.entry(row.restaurant_id.clone()).or_insert((0, 0));
            total.0 += i64::from(row.rating.stars());
            total.1 += 1;
        }

        let mut averages: Vec<RatingAverage> = totals
            .into_iter()
            .map(|(restaurant_id, (sum, count))| RatingAverage {
                restaurant_id,
                average_stars: sum as f64 / count as f64,
                rating_count: count,
            })
            .collect();

        averages.sort_by(|a, b| {
            b.average_stars
                .partial_cmp(&a.average_stars)
                .unwrap_or(CmpOrdering::Equal)
                .then_with(|| a.restaurant_id.cmp(&b.restaurant_id))
        });
        averages.truncate(limit);
        Ok(averages)
    }
}
