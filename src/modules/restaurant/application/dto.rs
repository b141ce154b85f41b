use serde::{Deserialize, Serialize};

use crate::modules::restaurant::domain::{
    Address, Cuisine, RankedRestaurant, Rating, Restaurant, RestaurantId,
};
use crate::shared::errors::AppResult;

/// Request DTO for creating or fully replacing a restaurant
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RestaurantInput {
    pub name: String,
    /// Integer cuisine code (1 to 5)
    pub cuisine: i32,
    pub street: String,
    pub number: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

impl RestaurantInput {
    /// Build the aggregate; fails only on an unknown cuisine code
    pub fn to_restaurant(&self, id: Option<&str>) -> AppResult<Restaurant> {
        let cuisine = Cuisine::try_from(self.cuisine)?;
        let mut restaurant = match id {
            Some(id) => Restaurant::with_id(id, self.name.clone(), cuisine),
            None => Restaurant::new(self.name.clone(), cuisine),
        };
        restaurant.attach_address(Address::new(
            self.street.clone(),
            self.number.clone(),
            self.city.clone(),
            self.state.clone(),
            self.postal_code.clone(),
        ));
        Ok(restaurant)
    }
}

/// Request DTO for the partial cuisine update
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CuisinePatch {
    pub cuisine: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RatingInput {
    pub stars: i32,
    pub comment: String,
}

impl From<&RatingInput> for Rating {
    fn from(input: &RatingInput) -> Self {
        Rating::new(input.stars, input.comment.clone())
    }
}

/// Listing row: identity, cuisine code and city
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RestaurantSummary {
    pub id: RestaurantId,
    pub name: String,
    pub cuisine: i32,
    pub city: String,
}

impl From<&Restaurant> for RestaurantSummary {
    fn from(restaurant: &Restaurant) -> Self {
        Self {
            id: restaurant.id().unwrap_or_default().to_string(),
            name: restaurant.name().to_string(),
            cuisine: restaurant.cuisine().code(),
            city: restaurant
                .address()
                .map(|a| a.city().to_string())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AddressView {
    pub street: String,
    pub number: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

impl From<&Address> for AddressView {
    fn from(address: &Address) -> Self {
        Self {
            street: address.street().to_string(),
            number: address.number().to_string(),
            city: address.city().to_string(),
            state: address.state().to_string(),
            postal_code: address.postal_code().to_string(),
        }
    }
}

/// Single-restaurant view with the full address
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RestaurantDetail {
    pub id: RestaurantId,
    pub name: String,
    pub cuisine: i32,
    pub address: Option<AddressView>,
}

impl From<&Restaurant> for RestaurantDetail {
    fn from(restaurant: &Restaurant) -> Self {
        Self {
            id: restaurant.id().unwrap_or_default().to_string(),
            name: restaurant.name().to_string(),
            cuisine: restaurant.cuisine().code(),
            address: restaurant.address().map(AddressView::from),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TopRatedEntry {
    pub id: RestaurantId,
    pub name: String,
    pub cuisine: i32,
    pub city: String,
    pub stars: f64,
}

impl From<&RankedRestaurant> for TopRatedEntry {
    fn from(ranked: &RankedRestaurant) -> Self {
        let summary = RestaurantSummary::from(&ranked.restaurant);
        Self {
            id: summary.id,
            name: summary.name,
            cuisine: summary.cuisine,
            city: summary.city,
            stars: ranked.average_stars,
        }
    }
}
