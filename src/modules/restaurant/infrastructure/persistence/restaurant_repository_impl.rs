use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::Text;
use std::sync::Arc;
use tokio::task;
use uuid::Uuid;

use crate::modules::restaurant::domain::entities::{Restaurant, RestaurantId};
use crate::modules::restaurant::domain::repositories::RestaurantRepository;
use crate::modules::restaurant::domain::value_objects::Cuisine;
use crate::modules::restaurant::infrastructure::models::{
    parse_id, parse_ids, NewRestaurant, RestaurantChangeset, RestaurantModel,
};
use crate::schema::restaurants;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::TimedOperation;
use crate::shared::Database;

// Any query term may match; rank by how well the name covers the query.
const TEXT_SEARCH_SQL: &str = "\
    WITH q AS ( \
        SELECT replace(plainto_tsquery('simple', $1)::text, '&', '|')::tsquery AS query \
    ) \
    SELECT r.* FROM restaurants r, q \
    WHERE to_tsvector('simple', r.name) @@ q.query \
    ORDER BY ts_rank(to_tsvector('simple', r.name), q.query) DESC, r.id ASC";

pub struct RestaurantRepositoryImpl {
    db: Arc<Database>,
}

impl RestaurantRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn into_domain_all(models: Vec<RestaurantModel>) -> AppResult<Vec<Restaurant>> {
        models.into_iter().map(RestaurantModel::into_domain).collect()
    }
}

/// Escape LIKE wildcards so the fragment is matched literally
fn like_pattern(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len() + 2);
    escaped.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[async_trait]
impl RestaurantRepository for RestaurantRepositoryImpl {
    async fn insert(&self, restaurant: &Restaurant) -> AppResult<RestaurantId> {
        let id = Uuid::new_v4();
        let new_restaurant = NewRestaurant::from_domain(id, restaurant)?;
        let db = Arc::clone(&self.db);

        let timer = TimedOperation::new("insert_restaurant");
        let inserted = task::spawn_blocking(move || -> AppResult<Uuid> {
            let mut conn = db.get_connection()?;

            let inserted = diesel::insert_into(restaurants::table)
                .values(&new_restaurant)
                .returning(restaurants::id)
                .get_result::<Uuid>(&mut conn)?;

            Ok(inserted)
        })
        .await??;
        timer.finish();

        Ok(inserted.to_string())
    }

    async fn find_all(&self) -> AppResult<Vec<Restaurant>> {
        let db = Arc::clone(&self.db);

        let models = task::spawn_blocking(move || -> AppResult<Vec<RestaurantModel>> {
            let mut conn = db.get_connection()?;

            let rows = restaurants::table
                .select(RestaurantModel::as_select())
                .load(&mut conn)?;

            Ok(rows)
        })
        .await??;

        Self::into_domain_all(models)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Restaurant>> {
        let Some(uuid) = parse_id(id) else {
            return Ok(None);
        };
        let db = Arc::clone(&self.db);

        let model = task::spawn_blocking(move || -> AppResult<Option<RestaurantModel>> {
            let mut conn = db.get_connection()?;

            let row = restaurants::table
                .find(uuid)
                .select(RestaurantModel::as_select())
                .first(&mut conn)
                .optional()?;

            Ok(row)
        })
        .await??;

        model.map(RestaurantModel::into_domain).transpose()
    }

    async fn find_by_ids(&self, ids: &[RestaurantId]) -> AppResult<Vec<Restaurant>> {
        let uuids = parse_ids(ids);
        if uuids.is_empty() {
            return Ok(Vec::new());
        }
        let db = Arc::clone(&self.db);

        let models = task::spawn_blocking(move || -> AppResult<Vec<RestaurantModel>> {
            let mut conn = db.get_connection()?;

            let rows = restaurants::table
                .filter(restaurants::id.eq_any(uuids))
                .select(RestaurantModel::as_select())
                .load(&mut conn)?;

            Ok(rows)
        })
        .await??;

        Self::into_domain_all(models)
    }

    async fn find_by_name(&self, fragment: &str) -> AppResult<Vec<Restaurant>> {
        let pattern = like_pattern(fragment);
        let db = Arc::clone(&self.db);

        let models = task::spawn_blocking(move || -> AppResult<Vec<RestaurantModel>> {
            let mut conn = db.get_connection()?;

            let rows = restaurants::table
                .filter(restaurants::name.ilike(pattern))
                .select(RestaurantModel::as_select())
                .load(&mut conn)?;

            Ok(rows)
        })
        .await??;

        Self::into_domain_all(models)
    }

    async fn text_search(&self, query: &str) -> AppResult<Vec<Restaurant>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let query = query.to_string();
        let db = Arc::clone(&self.db);

        let timer = TimedOperation::new("restaurant_text_search");
        let models = task::spawn_blocking(move || -> AppResult<Vec<RestaurantModel>> {
            let mut conn = db.get_connection()?;

            let rows = diesel::sql_query(TEXT_SEARCH_SQL)
                .bind::<Text, _>(query)
                .load::<RestaurantModel>(&mut conn)?;

            Ok(rows)
        })
        .await??;
        timer.finish_with_info(&format!("{} matches", models.len()));

        Self::into_domain_all(models)
    }

    async fn replace(&self, restaurant: &Restaurant) -> AppResult<bool> {
        let id = restaurant.id().ok_or_else(|| {
            AppError::InvalidInput("Cannot replace a restaurant without an id".to_string())
        })?;
        let Some(uuid) = parse_id(id) else {
            return Ok(false);
        };
        let changes = RestaurantChangeset::from_domain(restaurant)?;
        let db = Arc::clone(&self.db);

        let timer = TimedOperation::new("UPDATE (replace)");
        let affected = task::spawn_blocking(move || -> AppResult<usize> {
            let mut conn = db.get_connection()?;

            // Rows already holding every value are not counted as modified
            let unchanged = restaurants::name
                .eq(changes.name.clone())
                .and(restaurants::cuisine.eq(changes.cuisine))
                .and(restaurants::street.eq(changes.street.clone()))
                .and(restaurants::number.eq(changes.number.clone()))
                .and(restaurants::city.eq(changes.city.clone()))
                .and(restaurants::state.eq(changes.state.clone()))
                .and(restaurants::postal_code.eq(changes.postal_code.clone()));

            let affected = diesel::update(restaurants::table)
                .filter(restaurants::id.eq(uuid))
                .filter(diesel::dsl::not(unchanged))
                .set(&changes)
                .execute(&mut conn)?;

            Ok(affected)
        })
        .await??;
        timer.finish_write("restaurants", affected as u64);

        Ok(affected == 1)
    }

    async fn update_cuisine(&self, id: &str, cuisine: Cuisine) -> AppResult<bool> {
        let Some(uuid) = parse_id(id) else {
            return Ok(false);
        };
        let code = cuisine.code();
        let db = Arc::clone(&self.db);

        let timer = TimedOperation::new("UPDATE (cuisine)");
        let affected = task::spawn_blocking(move || -> AppResult<usize> {
            let mut conn = db.get_connection()?;

            let affected = diesel::update(restaurants::table)
                .filter(restaurants::id.eq(uuid))
                .filter(restaurants::cuisine.ne(code))
                .set(restaurants::cuisine.eq(code))
                .execute(&mut conn)?;

            Ok(affected)
        })
        .await??;
        timer.finish_write("restaurants", affected as u64);

        Ok(affected == 1)
    }

    async fn delete(&self, id: &str) -> AppResult<u64> {
        let Some(uuid) = parse_id(id) else {
            return Ok(0);
        };
        let db = Arc::clone(&self.db);

        let timer = TimedOperation::new("DELETE");
        let deleted = task::spawn_blocking(move || -> AppResult<u64> {
            let mut conn = db.get_connection()?;

            let deleted = diesel::delete(restaurants::table.find(uuid)).execute(&mut conn)?;

            Ok(deleted as u64)
        })
        .await??;
        timer.finish_write("restaurants", deleted);

        Ok(deleted)
    }
}
