pub mod handlers;
pub mod routes;
pub mod session_cookie;
pub mod state;

pub use routes::create_router;
pub use session_cookie::{SessionCookie, SESSION_COOKIE};
pub use state::AppState;
