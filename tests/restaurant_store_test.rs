/// Restaurant store tests over the in-memory backend
///
/// Tests cover:
/// - Top-rated aggregation and ordering
/// - Cascading delete
/// - Name and text search
/// - Full replacement and cuisine updates
/// - Concurrent writers
mod utils;

use futures::future::join_all;
use restaurant_catalog_lib::{in_memory_store, Cuisine};
use std::sync::Arc;
use utils::factories::{rating, RestaurantFactory};
use utils::helpers::{rate_all, seed, seeded_store};

#[tokio::test]
async fn top_rated_orders_by_mean_and_limits_to_three() {
    let (store, ids) = seeded_store(&["R1", "R2", "R3", "R4"]).await;
    rate_all(&store, &ids[0], &[5, 3]).await;
    rate_all(&store, &ids[1], &[4]).await;
    rate_all(&store, &ids[2], &[2]).await;
    rate_all(&store, &ids[3], &[5]).await;

    let top = store.top_rated(3).await.unwrap();

    assert_eq!(top.len(), 3);
    assert_eq!(top[0].restaurant.name(), "R4");
    assert_eq!(top[0].average_stars, 5.0);

    // R1 and R2 tie at 4.0; lower id first
    let mut tied = vec![ids[0].clone(), ids[1].clone()];
    tied.sort();
    assert_eq!(top[1].restaurant.id(), Some(tied[0].as_str()));
    assert_eq!(top[2].restaurant.id(), Some(tied[1].as_str()));
    assert!(top[1..].iter().all(|r| r.average_stars == 4.0));

    assert!(top.iter().all(|r| r.restaurant.name() != "R3"));
    assert!(top
        .windows(2)
        .all(|pair| pair[0].average_stars >= pair[1].average_stars));
}

#[tokio::test]
async fn top_rated_attaches_ratings_in_insertion_order() {
    let (store, ids) = seeded_store(&["Only"]).await;
    rate_all(&store, &ids[0], &[5, 3, 1]).await;

    let top = store.top_rated(3).await.unwrap();
    let stars: Vec<i32> = top[0].restaurant.ratings().iter().map(|r| r.stars()).collect();

    assert_eq!(stars, vec![5, 3, 1]);
    assert_eq!(top[0].restaurant.average_stars(), Some(3.0));
}

#[tokio::test]
async fn top_rated_with_no_ratings_is_empty() {
    let (store, _) = seeded_store(&["A", "B"]).await;
    assert!(store.top_rated(3).await.unwrap().is_empty());
}

#[tokio::test]
async fn top_rated_skips_ratings_of_removed_restaurant() {
    let store = in_memory_store();
    let ids = seed(&store, &["Kept", "Gone"]).await;
    rate_all(&store, &ids[0], &[3]).await;
    store.delete(&ids[1]).await.unwrap();
    // Rating that landed after its restaurant was removed
    store.rate(&ids[1], &rating(5)).await.unwrap();

    let top = store.top_rated(3).await.unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].restaurant.name(), "Kept");
}

#[tokio::test]
async fn top_rated_still_fills_n_when_best_rated_is_orphaned() {
    let store = in_memory_store();
    let ids = seed(&store, &["A", "B", "C", "Gone"]).await;
    rate_all(&store, &ids[0], &[4]).await;
    rate_all(&store, &ids[1], &[3]).await;
    rate_all(&store, &ids[2], &[2]).await;
    store.delete(&ids[3]).await.unwrap();
    store.rate(&ids[3], &rating(5)).await.unwrap();

    let top = store.top_rated(3).await.unwrap();

    let names: Vec<&str> = top.iter().map(|r| r.restaurant.name()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
}

#[tokio::test]
async fn delete_removes_restaurant_and_its_ratings() {
    let (store, ids) = seeded_store(&["Doomed", "Survivor"]).await;
    rate_all(&store, &ids[0], &[4, 2]).await;
    rate_all(&store, &ids[1], &[5]).await;

    let summary = store.delete(&ids[0]).await.unwrap();

    assert_eq!(summary.restaurants_deleted, 1);
    assert_eq!(summary.ratings_deleted, 2);
    assert!(store.get_by_id(&ids[0]).await.unwrap().is_none());
    assert!(store.ratings_for(&ids[0]).await.unwrap().is_empty());
    assert_eq!(store.ratings_for(&ids[1]).await.unwrap().len(), 1);
}

#[tokio::test]
async fn delete_unknown_id_removes_nothing() {
    let (store, _) = seeded_store(&["A"]).await;
    let summary = store.delete("does-not-exist").await.unwrap();

    assert_eq!(summary.restaurants_deleted, 0);
    assert_eq!(summary.ratings_deleted, 0);
    assert_eq!(store.get_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn get_by_name_is_case_insensitive_substring() {
    let (store, _) = seeded_store(&["ABC Diner", "xabcx", "xyz"]).await;

    let mut names: Vec<String> = store
        .get_by_name("abc")
        .await
        .unwrap()
        .iter()
        .map(|r| r.name().to_string())
        .collect();
    names.sort();

    assert_eq!(names, vec!["ABC Diner", "xabcx"]);
}

#[tokio::test]
async fn get_by_name_treats_wildcards_literally() {
    let (store, _) = seeded_store(&["100% Natural", "Pizza"]).await;

    let found = store.get_by_name("%").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name(), "100% Natural");
}

#[tokio::test]
async fn text_search_returns_best_match_first() {
    let (store, _) = seeded_store(&["Burger King", "Sushi Burger Bar", "Tacos"]).await;

    let found = store.get_by_text_search("sushi burger").await.unwrap();
    let names: Vec<&str> = found.iter().map(|r| r.name()).collect();

    assert_eq!(names, vec!["Sushi Burger Bar", "Burger King"]);
}

#[tokio::test]
async fn replace_full_reports_modification() {
    let (store, ids) = seeded_store(&["Old Name"]).await;

    let ghost = RestaurantFactory::named("Ghost").build_with_id("missing");
    assert!(!store.replace_full(&ghost).await.unwrap());

    let updated = RestaurantFactory::named("New Name")
        .cuisine(Cuisine::Italian)
        .city("Florianópolis")
        .state("SC")
        .build_with_id(&ids[0]);
    assert!(store.replace_full(&updated).await.unwrap());

    let stored = store.get_by_id(&ids[0]).await.unwrap().unwrap();
    assert_eq!(stored.name(), "New Name");
    assert_eq!(stored.cuisine(), Cuisine::Italian);
    assert_eq!(stored.address().unwrap().state(), "SC");

    // Same values again: nothing changes
    assert!(!store.replace_full(&updated).await.unwrap());
}

#[tokio::test]
async fn update_cuisine_on_existing_and_missing() {
    let (store, ids) = seeded_store(&["Cantina"]).await;

    assert!(store.update_cuisine(&ids[0], Cuisine::FastFood).await.unwrap());
    assert!(!store.update_cuisine("missing", Cuisine::FastFood).await.unwrap());
    assert_eq!(
        store.get_by_id(&ids[0]).await.unwrap().unwrap().cuisine(),
        Cuisine::FastFood
    );
}

#[tokio::test]
async fn concurrent_ratings_are_all_recorded() {
    let store = Arc::new(in_memory_store());
    let ids = seed(&store, &["Busy"]).await;
    let id = ids[0].clone();

    let writes = (1..=5).map(|stars| {
        let store = Arc::clone(&store);
        let id = id.clone();
        async move { store.rate(&id, &rating(stars)).await }
    });
    let results = join_all(writes).await;

    assert!(results.iter().all(|r| r.is_ok()));
    assert_eq!(store.ratings_for(&id).await.unwrap().len(), 5);

    let top = store.top_rated(1).await.unwrap();
    assert_eq!(top[0].average_stars, 3.0);
}

#[test]
fn store_is_usable_from_a_blocking_context() {
    let store = in_memory_store();
    let found = tokio_test::block_on(async {
        let ids = seed(&store, &["Blocking Bistro"]).await;
        store.get_by_id(&ids[0]).await
    })
    .unwrap();

    assert_eq!(found.unwrap().name(), "Blocking Bistro");
}
