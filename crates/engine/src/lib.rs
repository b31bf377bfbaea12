//! Sheetforge Engine library.
//!
//! This crate contains all server-side code for the character sheet generator.
//!
//! ## Structure
//!
//! - `use_cases/` - User story orchestration over the domain
//! - `stores/` - In-memory draft storage
//! - `infrastructure/` - Configuration and port implementations
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod stores;
pub mod use_cases;

pub use app::App;
