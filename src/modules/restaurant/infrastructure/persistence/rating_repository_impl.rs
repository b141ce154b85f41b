use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task;
use uuid::Uuid;

use crate::modules::restaurant::domain::entities::RestaurantId;
use crate::modules::restaurant::domain::repositories::{RatingAverage, RatingRepository};
use crate::modules::restaurant::domain::value_objects::Rating;
use crate::modules::restaurant::infrastructure::models::{
    parse_id, parse_ids, NewRating, RatingAverageRow, RatingModel,
};
use crate::schema::ratings;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::TimedOperation;
use crate::shared::Database;

const AVERAGE_BY_RESTAURANT_SQL: &str = "\
    SELECT restaurant_id, AVG(stars)::float8 AS average_stars, COUNT(*) AS rating_count \
    FROM ratings \
    WHERE restaurant_id IN (SELECT id FROM restaurants) \
    GROUP BY restaurant_id \
    ORDER BY average_stars DESC, restaurant_id ASC \
    LIMIT $1";

pub struct RatingRepositoryImpl {
    db: Arc<Database>,
}

impl RatingRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RatingRepository for RatingRepositoryImpl {
    async fn insert(&self, restaurant_id: &str, rating: &Rating) -> AppResult<String> {
        let restaurant_uuid = parse_id(restaurant_id).ok_or_else(|| {
            AppError::InvalidInput(format!("Invalid restaurant id: {}", restaurant_id))
        })?;
        let new_rating = NewRating {
            id: Uuid::new_v4(),
            restaurant_id: restaurant_uuid,
            stars: rating.stars(),
            comment: rating.comment().to_string(),
        };
        let db = Arc::clone(&self.db);

        let timer = TimedOperation::new("insert_rating");
        let inserted = task::spawn_blocking(move || -> AppResult<Uuid> {
            let mut conn = db.get_connection()?;

            let inserted = diesel::insert_into(ratings::table)
                .values(&new_rating)
                .returning(ratings::id)
                .get_result::<Uuid>(&mut conn)?;

            Ok(inserted)
        })
        .await??;
        timer.finish();

        Ok(inserted.to_string())
    }

    async fn find_by_restaurant(&self, restaurant_id: &str) -> AppResult<Vec<Rating>> {
        let Some(uuid) = parse_id(restaurant_id) else {
            return Ok(Vec::new());
        };
        let db = Arc::clone(&self.db);

        let models = task::spawn_blocking(move || -> AppResult<Vec<RatingModel>> {
            let mut conn = db.get_connection()?;

            let rows = ratings::table
                .filter(ratings::restaurant_id.eq(uuid))
                .order((ratings::created_at.asc(), ratings::id.asc()))
                .select(RatingModel::as_select())
                .load(&mut conn)?;

            Ok(rows)
        })
        .await??;

        Ok(models.into_iter().map(RatingModel::into_domain).collect())
    }

    async fn find_by_restaurants(
        &self,
        restaurant_ids: &[RestaurantId],
    ) -> AppResult<HashMap<RestaurantId, Vec<Rating>>> {
        let uuids = parse_ids(restaurant_ids);
        if uuids.is_empty() {
            return Ok(HashMap::new());
        }
        let db = Arc::clone(&self.db);

        let models = task::spawn_blocking(move || -> AppResult<Vec<RatingModel>> {
            let mut conn = db.get_connection()?;

            let rows = ratings::table
                .filter(ratings::restaurant_id.eq_any(uuids))
                .order((ratings::created_at.asc(), ratings::id.asc()))
                .select(RatingModel::as_select())
                .load(&mut conn)?;

            Ok(rows)
        })
        .await??;

        let mut grouped: HashMap<RestaurantId, Vec<Rating>> = HashMap::new();
        for model in models {
            grouped
                .entry(model.restaurant_id.to_string())
                .or_default()
                .push(model.into_domain());
        }
        Ok(grouped)
    }

    async fn delete_by_restaurant(&self, restaurant_id: &str) -> AppResult<u64> {
        let Some(uuid) = parse_id(restaurant_id) else {
            return Ok(0);
        };
        let db = Arc::clone(&self.db);

        let timer = TimedOperation::new("DELETE");
        let deleted = task::spawn_blocking(move || -> AppResult<u64> {
            let mut conn = db.get_connection()?;

            let deleted = diesel::delete(ratings::table.filter(ratings::restaurant_id.eq(uuid)))
                .execute(&mut conn)?;

            Ok(deleted as u64)
        })
        .await??;
        timer.finish_write("ratings", deleted);

        Ok(deleted)
    }

    async fn average_by_restaurant(&self, limit: usize) -> AppResult<Vec<RatingAverage>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let db = Arc::clone(&self.db);

        let timer = TimedOperation::new("ratings_average_by_restaurant");
        let rows = task::spawn_blocking(move || -> AppResult<Vec<RatingAverageRow>> {
            let mut conn = db.get_connection()?;

            let rows = diesel::sql_query(AVERAGE_BY_RESTAURANT_SQL)
                .bind::<BigInt, _>(limit)
                .load::<RatingAverageRow>(&mut conn)?;

            Ok(rows)
        })
        .await??;
        timer.finish();

        Ok(rows
            .into_iter()
            .map(|row| RatingAverage {
                restaurant_id: row.restaurant_id.to_string(),
                average_stars: row.average_stars,
                rating_count: row.rating_count,
            })
            .collect())
    }
}
