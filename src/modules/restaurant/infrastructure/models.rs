use crate::modules::restaurant::domain::{Address, Cuisine, Rating, Restaurant};
use crate::schema::{ratings, restaurants};
use crate::shared::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

// ============= RESTAURANT MODELS =============

// For reading from database
#[derive(Queryable, Selectable, QueryableByName, Identifiable, Debug, Clone)]
#[diesel(table_name = restaurants)]
pub struct RestaurantModel {
    pub id: Uuid,
    pub name: String,
    pub cuisine: i32,
    pub street: String,
    pub number: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RestaurantModel {
    /// Convert to the domain aggregate (without ratings)
    pub fn into_domain(self) -> AppResult<Restaurant> {
        let cuisine = Cuisine::try_from(self.cuisine)?;
        let mut restaurant = Restaurant::with_id(self.id.to_string(), self.name, cuisine);
        restaurant.attach_address(Address::new(
            self.street,
            self.number,
            self.city,
            self.state,
            self.postal_code,
        ));
        Ok(restaurant)
    }
}

// For inserting new restaurants
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = restaurants)]
pub struct NewRestaurant {
    pub id: Uuid,
    pub name: String,
    pub cuisine: i32,
    pub street: String,
    pub number: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

impl NewRestaurant {
    pub fn from_domain(id: Uuid, restaurant: &Restaurant) -> AppResult<Self> {
        let address = required_address(restaurant)?;
        Ok(Self {
            id,
            name: restaurant.name().to_string(),
            cuisine: restaurant.cuisine().code(),
            street: address.street().to_string(),
            number: address.number().to_string(),
            city: address.city().to_string(),
            state: address.state().to_string(),
            postal_code: address.postal_code().to_string(),
        })
    }
}

// For full replacement (excludes id and created_at)
#[derive(AsChangeset, Debug, Clone, PartialEq)]
#[diesel(table_name = restaurants)]
pub struct RestaurantChangeset {
    pub name: String,
    pub cuisine: i32,
    pub street: String,
    pub number: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

impl RestaurantChangeset {
    pub fn from_domain(restaurant: &Restaurant) -> AppResult<Self> {
        let address = required_address(restaurant)?;
        Ok(Self {
            name: restaurant.name().to_string(),
            cuisine: restaurant.cuisine().code(),
            street: address.street().to_string(),
            number: address.number().to_string(),
            city: address.city().to_string(),
            state: address.state().to_string(),
            postal_code: address.postal_code().to_string(),
        })
    }
}

fn required_address(restaurant: &Restaurant) -> AppResult<&Address> {
    restaurant.address().ok_or_else(|| {
        AppError::InvalidInput(format!(
            "Restaurant '{}' has no address attached",
            restaurant.name()
        ))
    })
}

// ============= RATING MODELS =============

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = ratings)]
pub struct RatingModel {
    pub id: Uuid,
    pub restaurant_id: Uuid,
    pub stars: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl RatingModel {
    pub fn into_domain(self) -> Rating {
        Rating::new(self.stars, self.comment)
    }
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = ratings)]
pub struct NewRating {
    pub id: Uuid,
    pub restaurant_id: Uuid,
    pub stars: i32,
    pub comment: String,
}

/// Row produced by the group-by-restaurant aggregation
#[derive(QueryableByName, Debug, Clone)]
pub struct RatingAverageRow {
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub restaurant_id: Uuid,
    #[diesel(sql_type = diesel::sql_types::Double)]
    pub average_stars: f64,
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub rating_count: i64,
}

/// Parse an opaque id; anything that is not a UUID cannot match a record
pub fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id.trim()).ok()
}

pub fn parse_ids(ids: &[String]) -> Vec<Uuid> {
    ids.iter().filter_map(|id| parse_id(id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(cuisine: i32) -> RestaurantModel {
        RestaurantModel {
            id: Uuid::new_v4(),
            name: "Casa Nostra".to_string(),
            cuisine,
            street: "Rua Oscar Freire".to_string(),
            number: "12".to_string(),
            city: "São Paulo".to_string(),
            state: "SP".to_string(),
            postal_code: "01426000".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_model_to_domain_keeps_fields() {
        let m = model(2);
        let id = m.id.to_string();
        let restaurant = m.into_domain().unwrap();

        assert_eq!(restaurant.id(), Some(id.as_str()));
        assert_eq!(restaurant.cuisine(), Cuisine::Italian);
        assert_eq!(restaurant.address().unwrap().postal_code(), "01426000");
        assert!(restaurant.ratings().is_empty());
    }

    #[test]
    fn test_unknown_stored_cuisine_is_an_error() {
        assert!(matches!(
            model(99).into_domain(),
            Err(AppError::InvalidClassification(_))
        ));
    }

    #[test]
    fn test_insert_requires_address() {
        let restaurant = Restaurant::new("No Address", Cuisine::Arabic);
        assert!(NewRestaurant::from_domain(Uuid::new_v4(), &restaurant).is_err());
        assert!(RestaurantChangeset::from_domain(&restaurant).is_err());
    }

    #[test]
    fn test_parse_ids_skips_garbage() {
        let good = Uuid::new_v4();
        let ids = vec![good.to_string(), "not-a-uuid".to_string(), String::new()];
        assert_eq!(parse_ids(&ids), vec![good]);
    }
}
