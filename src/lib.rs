pub mod api;
pub mod cli;
pub mod config;
pub mod nav;
pub mod session;

pub use api::ApiClient;
pub use nav::Role;
pub use session::{Session, SessionStore};
