pub mod modules;
pub mod schema;
pub mod shared;

use std::sync::Arc;

pub use modules::restaurant::{
    application::{CuisinePatch, RatingInput, RestaurantInput},
    Address, Cuisine, Rating, Restaurant, RestaurantService, RestaurantStore, UpdateOutcome,
};
pub use shared::{AppError, AppResult, Database, DatabaseConfig};

use modules::restaurant::{
    InMemoryRatingRepository, InMemoryRestaurantRepository, RatingRepository,
    RatingRepositoryImpl, RestaurantRepository, RestaurantRepositoryImpl,
};
use shared::utils::init_logger;

/// Store over the Diesel repositories sharing one pool
pub fn postgres_store(database: Arc<Database>) -> RestaurantStore {
    let restaurants: Arc<dyn RestaurantRepository> =
        Arc::new(RestaurantRepositoryImpl::new(Arc::clone(&database)));
    let ratings: Arc<dyn RatingRepository> = Arc::new(RatingRepositoryImpl::new(database));

    RestaurantStore::new(restaurants, ratings)
}

/// Store over process-local maps; nothing survives the process
pub fn in_memory_store() -> RestaurantStore {
    let restaurants: Arc<dyn RestaurantRepository> = Arc::new(InMemoryRestaurantRepository::new());
    let ratings: Arc<dyn RatingRepository> = Arc::new(InMemoryRatingRepository::new());

    RestaurantStore::new(restaurants, ratings)
}

pub fn in_memory_service() -> RestaurantService {
    RestaurantService::new(Arc::new(in_memory_store()))
}

/// Application startup: logger, pool from the environment, pending
/// migrations, then the service wired to PostgreSQL.
pub fn bootstrap() -> AppResult<RestaurantService> {
    init_logger();

    let database = Arc::new(Database::from_env()?);

    if let Err(e) = database.run_migrations() {
        log_error!("Failed to run database migrations: {}", e);
        return Err(e);
    }
    log_debug!("Connection pool after startup: {:?}", database.pool_status());

    Ok(RestaurantService::new(Arc::new(postgres_store(database))))
}
