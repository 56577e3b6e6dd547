//! # Diskuss Binary
//!
//! The entry point that assembles the application based on compile-time
//! features: the seeded board registry, a storage plugin, and the web layer.

mod seed;

use actix_files::Files;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use std::env;

use ds_api::handlers::AppState;
use ds_core::traits::BoardRepo;

#[cfg(feature = "db-sqlite")]
use ds_db_sqlite::SqliteBoardStore;

#[cfg(all(feature = "store-memory", not(feature = "db-sqlite")))]
use ds_store_memory::MemoryBoardStore;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let boards = seed::load_boards()?;
    log::info!(
        "seeded boards: {}",
        boards
            .iter()
            .map(|b| format!("/{}/", b.name))
            .collect::<Vec<_>>()
            .join(" ")
    );

    // Storage plugin selection; db-sqlite wins when both are compiled in.
    #[cfg(feature = "db-sqlite")]
    let repo: Box<dyn BoardRepo> = {
        let url =
            env::var("DISKUSS_DATABASE_URL").unwrap_or_else(|_| "sqlite:diskuss.db".to_string());
        Box::new(SqliteBoardStore::new(&url, boards).await?)
    };

    #[cfg(all(feature = "store-memory", not(feature = "db-sqlite")))]
    let repo: Box<dyn BoardRepo> = Box::new(MemoryBoardStore::new(boards)?);

    let state = web::Data::new(AppState { repo });

    let bind = env::var("DISKUSS_BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    let assets = env::var("DISKUSS_ASSETS").unwrap_or_else(|_| "./assets".to_string());

    log::info!("Diskuss starting on http://{bind}");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            // Static assets must be mounted before the `{board}` routes.
            .service(Files::new("/assets", assets.clone()))
            .configure(ds_api::configure_routes)
    })
    .bind(&bind)?
    .run()
    .await?;

    Ok(())
}
