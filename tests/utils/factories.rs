/// Test data factories using builder pattern
///
/// Defaults produce a restaurant that passes validation.
use restaurant_catalog_lib::{Address, Cuisine, Rating, Restaurant, RestaurantInput};

pub struct RestaurantFactory {
    name: String,
    cuisine: Cuisine,
    street: String,
    number: String,
    city: String,
    state: String,
    postal_code: String,
}

impl Default for RestaurantFactory {
    fn default() -> Self {
        Self {
            name: "Test Restaurant".to_string(),
            cuisine: Cuisine::Brazilian,
            street: "Rua das Flores".to_string(),
            number: "100".to_string(),
            city: "Curitiba".to_string(),
            state: "PR".to_string(),
            postal_code: "80010000".to_string(),
        }
    }
}

impl RestaurantFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: &str) -> Self {
        Self::default().name(name)
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn cuisine(mut self, cuisine: Cuisine) -> Self {
        self.cuisine = cuisine;
        self
    }

    pub fn city(mut self, city: &str) -> Self {
        self.city = city.to_string();
        self
    }

    pub fn state(mut self, state: &str) -> Self {
        self.state = state.to_string();
        self
    }

    pub fn postal_code(mut self, postal_code: &str) -> Self {
        self.postal_code = postal_code.to_string();
        self
    }

    pub fn build(self) -> Restaurant {
        let restaurant = Restaurant::new(self.name.clone(), self.cuisine);
        self.finish(restaurant)
    }

    /// Restaurant carrying an existing store id, as a replacement payload
    pub fn build_with_id(self, id: &str) -> Restaurant {
        let restaurant = Restaurant::with_id(id, self.name.clone(), self.cuisine);
        self.finish(restaurant)
    }

    fn finish(self, mut restaurant: Restaurant) -> Restaurant {
        restaurant.attach_address(Address::new(
            self.street,
            self.number,
            self.city,
            self.state,
            self.postal_code,
        ));
        restaurant
    }

    /// Same data as the request-layer input
    pub fn input(self) -> RestaurantInput {
        RestaurantInput {
            name: self.name,
            cuisine: self.cuisine.code(),
            street: self.street,
            number: self.number,
            city: self.city,
            state: self.state,
            postal_code: self.postal_code,
        }
    }
}

pub fn rating(stars: i32) -> Rating {
    Rating::new(stars, format!("{} stars", stars))
}
