//! Core library for the `ph-weather` CLI.
//!
//! This crate defines:
//! - The place directory (remote registry with an embedded fallback)
//! - Resolution of free-text queries to a single place, plus suggestions
//! - Classification of WMO weather codes into icon categories
//! - The weather provider abstraction and the lookup pipeline
//! - Configuration handling
//!
//! It is used by `ph-weather-cli`, but can also be reused by other binaries or services.

pub mod classify;
pub mod config;
pub mod directory;
pub mod error;
pub mod model;
pub mod provider;
pub mod resolver;
pub mod service;

pub use classify::{Condition, IconCategory, classify};
pub use config::Config;
pub use directory::{Directory, DirectoryLoader, DirectoryStatus, strip_prefixes};
pub use error::LookupError;
pub use model::{Coordinates, MatchKind, PlaceRecord, ResolvedQuery, WeatherRequest, WeatherResponse};
pub use provider::WeatherProvider;
pub use resolver::{resolve_exact, suggest};
pub use service::{Observation, WeatherService};
