//! Core library for the weather relay service.
//!
//! This crate defines:
//! - Configuration for the downstream provider connection
//! - The mutual-TLS context and the authenticated downstream client
//! - Normalization of provider payloads into the internal report model
//! - The realtime weather retrieval service
//!
//! It is used by `relay-server`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod service;
pub mod tls;

pub use client::{DownstreamClient, WeatherTransport};
pub use config::{DownstreamConfig, RelayConfig};
pub use error::RelayError;
pub use model::{Condition, Coordinates, CurrentConditions, Location, ResponseCode, WeatherReport};
pub use normalize::{Observation, normalize};
pub use service::RealtimeWeatherService;
pub use tls::TlsContext;
