/// Store builders and seeding helpers
use super::factories::{rating, RestaurantFactory};
use restaurant_catalog_lib::{in_memory_store, RestaurantStore};

/// Fresh in-memory store with one restaurant per name; ids in the same order
pub async fn seeded_store(names: &[&str]) -> (RestaurantStore, Vec<String>) {
    let store = in_memory_store();
    let ids = seed(&store, names).await;
    (store, ids)
}

pub async fn seed(store: &RestaurantStore, names: &[&str]) -> Vec<String> {
    let mut ids = Vec::with_capacity(names.len());
    for name in names {
        let id = store
            .insert(&RestaurantFactory::named(name).build())
            .await
            .expect("insert failed");
        ids.push(id);
    }
    ids
}

pub async fn rate_all(store: &RestaurantStore, id: &str, stars: &[i32]) {
    for s in stars {
        store.rate(id, &rating(*s)).await.expect("rating failed");
    }
}
