use crate::{
    error::Result,
    model::{CityRecord, WeatherReport},
    provider::qweather::QWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod qweather;

/// The two-step upstream the reply pipeline depends on: resolve a free-text
/// city name, then fetch current conditions for the resolved id.
///
/// [`QWeatherProvider`] is the HTTP implementation; tests substitute stubs.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    /// Resolve a city name to its first geocoding match.
    async fn lookup_city(&self, query: &str) -> Result<CityRecord>;

    /// Fetch current conditions for a resolved city id.
    async fn current_weather(&self, city_id: &str) -> Result<WeatherReport>;
}

/// Construct the HTTP-backed source from explicit config.
pub fn source_from_config(config: &crate::Config) -> anyhow::Result<QWeatherProvider> {
    if !config.has_api_key() {
        return Err(anyhow::anyhow!(
            "No API key configured.\n\
             Hint: run `qweather configure` and enter your QWeather API key."
        ));
    }

    QWeatherProvider::new(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;

    #[test]
    fn source_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = source_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
        assert!(err.to_string().contains("Hint: run `qweather configure`"));
    }

    #[test]
    fn source_from_config_works_when_key_is_set() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        assert!(source_from_config(&cfg).is_ok());
    }
}
