use std::sync::Arc;

use crate::{auth::AuthManager, config::Config};
use attendance_core::{
    subjects::{SubjectService, SubjectServiceTrait},
    users::{UserService, UserServiceTrait},
};
use attendance_storage_sqlite::{
    create_pool, init, run_migrations, spawn_writer, DbPool, SubjectRepository, UserRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait + Send + Sync>,
    pub subject_service: Arc<dyn SubjectServiceTrait + Send + Sync>,
    pub auth: Arc<AuthManager>,
    pub pool: Arc<DbPool>,
}

pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = create_pool(&db_path)?;
    run_migrations(&pool)?;
    let writer = spawn_writer((*pool).clone());

    let user_repo = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let user_service = Arc::new(UserService::new(user_repo));

    let subject_repo = Arc::new(SubjectRepository::new(pool.clone(), writer));
    let subject_service = Arc::new(SubjectService::new(subject_repo));

    Ok(Arc::new(AppState {
        user_service,
        subject_service,
        auth: Arc::new(AuthManager::new(&config.auth)?),
        pool,
    }))
}
