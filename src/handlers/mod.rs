pub mod api_handlers;
pub mod handlers;

pub use handlers::AppState;
