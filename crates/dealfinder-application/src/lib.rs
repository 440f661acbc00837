//! Application layer for the dealfinder client.
//!
//! This crate owns the client-side state: the session slot, the current
//! search request, and the per-user favorites/history/recommendation
//! mirrors. Services coordinate the core ports without ever touching the
//! wire themselves.

pub mod app;
pub mod favorites_service;
pub mod history_service;
pub mod recommendation_service;
pub mod search_service;
pub mod session_service;

pub use app::App;
pub use favorites_service::FavoritesService;
pub use history_service::HistoryService;
pub use recommendation_service::RecommendationService;
pub use search_service::SearchService;
pub use session_service::SessionService;
