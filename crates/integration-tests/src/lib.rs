//! Shared fixtures for the HTTP-level tests: a freshly seeded in-memory
//! store wrapped in the web layer's shared state.

use actix_web::web;

use ds_api::handlers::AppState;
use ds_core::models::Board;
use ds_store_memory::MemoryBoardStore;

pub fn seed_boards() -> Vec<Board> {
    vec![
        Board {
            name: "abc".to_string(),
            description: "General discussion".to_string(),
        },
        Board {
            name: "test".to_string(),
            description: "Testing grounds".to_string(),
        },
    ]
}

/// One isolated application state per test.
pub fn test_state() -> web::Data<AppState> {
    let store = MemoryBoardStore::new(seed_boards()).expect("seed is duplicate-free");
    web::Data::new(AppState {
        repo: Box::new(store),
    })
}
