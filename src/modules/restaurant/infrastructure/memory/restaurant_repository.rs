use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

use crate::modules::restaurant::domain::entities::{Restaurant, RestaurantId};
use crate::modules::restaurant::domain::repositories::RestaurantRepository;
use crate::modules::restaurant::domain::value_objects::Cuisine;
use crate::shared::errors::{AppError, AppResult};

#[derive(Debug, Clone)]
struct StoredRestaurant {
    sequence: u64,
    restaurant: Restaurant,
}

/// Process-local restaurant store backed by a concurrent map.
///
/// Mirrors the Postgres backend: generated UUID ids, ratings kept elsewhere,
/// modified-only update results. Listing order follows insertion.
#[derive(Debug, Default)]
pub struct InMemoryRestaurantRepository {
    records: DashMap<RestaurantId, StoredRestaurant>,
    sequence: AtomicU64,
}

impl InMemoryRestaurantRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Copy of the record as it would be persisted: given id, no ratings
    fn record_of(id: &str, restaurant: &Restaurant) -> AppResult<Restaurant> {
        let address = restaurant.address().cloned().ok_or_else(|| {
            AppError::InvalidInput(format!(
                "Restaurant '{}' has no address attached",
                restaurant.name()
            ))
        })?;

        let mut record = Restaurant::with_id(id, restaurant.name(), restaurant.cuisine());
        record.attach_address(address);
        Ok(record)
    }

    fn snapshot<F>(&self, keep: F) -> Vec<StoredRestaurant>
    where
        F: Fn(&Restaurant) -> bool,
    {
        let mut rows: Vec<StoredRestaurant> = self
            .records
            .iter()
            .filter(|entry| keep(&entry.value().restaurant))
            .map(|entry| entry.value().clone())
            .collect();
        rows.sort_by_key(|row| row.sequence);
        rows
    }
}

fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}

/// (distinct query terms found, total term occurrences) for a name
fn relevance(name: &str, terms: &HashSet<String>) -> (usize, usize) {
    let name_words = words(name);
    let distinct = terms
        .iter()
        .filter(|term| name_words.contains(term))
        .count();
    let occurrences = name_words.iter().filter(|w| terms.contains(*w)).count();
    (distinct, occurrences)
}

#[async_trait]
impl RestaurantRepository for InMemoryRestaurantRepository {
    async fn insert(&self, restaurant: &Restaurant) -> AppResult<RestaurantId> {
        let id = Uuid::new_v4().to_string();
        let record = Self::record_of(&id, restaurant)?;
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst);

        self.records.insert(
            id.clone(),
            StoredRestaurant {
                sequence,
                restaurant: record,
            },
        );
        Ok(id)
    }

    async fn find_all(&self) -> AppResult<Vec<Restaurant>> {
        Ok(self
            .snapshot(|_| true)
            .into_iter()
            .map(|row| row.restaurant)
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Restaurant>> {
        Ok(self.records.get(id).map(|row| row.restaurant.clone()))
    }

    async fn find_by_ids(&self, ids: &[RestaurantId]) -> AppResult<Vec<Restaurant>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.records.get(id).map(|row| row.restaurant.clone()))
            .collect())
    }

    async fn find_by_name(&self, fragment: &str) -> AppResult<Vec<Restaurant>> {
        let needle = fragment.to_lowercase();
        Ok(self
            .snapshot(|r| r.name().to_lowercase().contains(&needle))
            .into_iter()
            .map(|row| row.restaurant)
            .collect())
    }

    async fn text_search(&self, query: &str) -> AppResult<Vec<Restaurant>> {
        let terms: HashSet<String> = words(query).into_iter().collect();
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let mut scored: Vec<((usize, usize), StoredRestaurant)> = self
            .snapshot(|_| true)
            .into_iter()
            .map(|row| (relevance(row.restaurant.name(), &terms), row))
            .filter(|((distinct, _), _)| *distinct > 0)
            .collect();

        // Best match first; insertion order among equals
        scored.sort_by(|(a_score, a), (b_score, b)| {
            b_score.cmp(a_score).then(a.sequence.cmp(&b.sequence))
        });

        Ok(scored.into_iter().map(|(_, row)| row.restaurant).collect())
    }

    async fn replace(&self, restaurant: &Restaurant) -> AppResult<bool> {
        let id = restaurant.id().ok_or_else(|| {
            AppError::InvalidInput("Cannot replace a restaurant without an id".to_string())
        })?;
        let record = Self::record_of(id, restaurant)?;

        let Some(mut row) = self.records.get_mut(id) else {
            return Ok(false);
        };
        if row.restaurant == record {
            return Ok(false);
        }
        row.restaurant = record;
        Ok(true)
    }

    async fn update_cuisine(&self, id: &str, cuisine: Cuisine) -> AppResult<bool> {
        let Some(mut row) = self.records.get_mut(id) else {
            return Ok(false);
        };
        if row.restaurant.cuisine() == cuisine {
            return Ok(false);
        }
        row.restaurant.change_cuisine(cuisine);
        Ok(true)
    }

    async fn delete(&self, id: &str) -> AppResult<u64> {
        Ok(self.records.remove(id).map_or(0, |_| 1))
    }
}
