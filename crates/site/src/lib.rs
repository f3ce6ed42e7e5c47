//! The spacetraveling blog site.
//!
//! Pre-renders post pages from the content API, serves them (rendering
//! missing posts on demand) and lets editors preview drafts through a signed
//! preview-mode cookie.

pub mod config;
pub mod error;
pub mod generate;
pub mod middleware;
pub mod pages;
pub mod render;
pub mod routes;
pub mod session;
pub mod state;

pub use config::{AppConfig, ConfigError};
pub use error::{SiteError, SiteResult};
pub use generate::{build_site, static_paths, static_props, BuildReport, PostLink, PostPageProps};
pub use routes::build_router;
pub use state::AppState;
