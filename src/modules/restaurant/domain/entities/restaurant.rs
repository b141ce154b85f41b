use serde::{Deserialize, Serialize};

use crate::modules::restaurant::domain::value_objects::{Address, Cuisine, Rating};
use crate::shared::validation::{Rules, Validate, ValidationResult};

pub const NAME_MAX_LEN: usize = 30;

/// Opaque identifier assigned by the store on insert
pub type RestaurantId = String;

/// Restaurant aggregate root.
///
/// Owns exactly one address (required before it can validate) and an
/// in-memory list of ratings. The ratings list is only filled when an
/// aggregate is reconstructed for a read path such as the top-rated query;
/// new ratings are recorded through the rating repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    id: Option<RestaurantId>,
    name: String,
    cuisine: Cuisine,
    address: Option<Address>,
    ratings: Vec<Rating>,
}

impl Restaurant {
    /// A restaurant that has not been persisted yet
    pub fn new(name: impl Into<String>, cuisine: Cuisine) -> Self {
        Self {
            id: None,
            name: name.into(),
            cuisine,
            address: None,
            ratings: Vec::new(),
        }
    }

    /// Rebuild a restaurant that already has a store identifier
    pub fn with_id(id: impl Into<RestaurantId>, name: impl Into<String>, cuisine: Cuisine) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::new(name, cuisine)
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cuisine(&self) -> Cuisine {
        self.cuisine
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    /// Replace the current address. No validation happens here.
    pub fn attach_address(&mut self, address: Address) {
        self.address = Some(address);
    }

    pub fn add_rating(&mut self, rating: Rating) {
        self.ratings.push(rating);
    }

    pub fn change_cuisine(&mut self, cuisine: Cuisine) {
        self.cuisine = cuisine;
    }

    /// Mean stars over the ratings loaded into this aggregate
    pub fn average_stars(&self) -> Option<f64> {
        if self.ratings.is_empty() {
            return None;
        }
        let total: i64 = self.ratings.iter().map(|r| r.stars() as i64).sum();
        Some(total as f64 / self.ratings.len() as f64)
    }
}

impl Validate for Restaurant {
    /// Name rule first, then the address. Address errors are folded into
    /// this result rather than reported separately.
    fn validate(&self) -> ValidationResult {
        let result =
            Rules::required_max_len(ValidationResult::valid(), "name", "Name", &self.name, NAME_MAX_LEN);

        match &self.address {
            Some(address) => result.merge(address.validate()),
            None => result.with_error("address", "Address is required"),
        }
    }
}
