//! # lumen-adapter-http-axum
//!
//! HTTP adapter — exposes the application services as a JSON REST API.
//!
//! ## Responsibilities
//! - Assemble the axum router (`/health`, `/api/...`)
//! - Translate HTTP requests into service calls
//! - Map [`LumenError`](lumen_domain::error::LumenError) variants onto
//!   status codes
//!
//! ## Dependency rule
//! Depends on `lumen-app` (services and ports) and `lumen-domain` only.
//! Never constructs repositories or adapters — the binary injects them
//! through [`state::AppState`].

pub mod api;
pub mod error;
pub mod router;
pub mod state;
