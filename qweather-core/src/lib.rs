//! Core library for the `qweather` reply pipeline.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The QWeather source (city lookup + current conditions)
//! - The orchestration that turns a city name into a chat reply
//! - The reply-channel abstraction the chat transport plugs into
//!
//! It is used by `qweather-cli`, but can also be embedded in a bot runtime.

pub mod bot;
pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod provider;
pub mod reply;

pub use bot::{get_weather, reply_weather};
pub use config::Config;
pub use error::{Error, Result};
pub use model::{CityRecord, NowConditions, WeatherReport};
pub use provider::{WeatherSource, qweather::QWeatherProvider, source_from_config};
pub use reply::{ReplyChannel, ReplyPayload};
