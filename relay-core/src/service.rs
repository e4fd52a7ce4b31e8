use crate::client::WeatherTransport;
use crate::error::RelayError;
use crate::model::{Coordinates, ResponseCode, WeatherReport};
use crate::normalize::normalize;

/// Orchestrates one realtime weather retrieval end to end: transport fetch,
/// normalization, then stamping of request metadata.
///
/// The correlation id is always an explicit parameter, never ambient request
/// state, so the service is independently testable.
#[derive(Debug)]
pub struct RealtimeWeatherService {
    transport: Box<dyn WeatherTransport>,
}

impl RealtimeWeatherService {
    pub fn new(transport: Box<dyn WeatherTransport>) -> Self {
        Self { transport }
    }

    /// Retrieve the current weather for the coordinates and return the
    /// report stamped with the correlation id and the success sentinel.
    ///
    /// Failures from the transport or the normalizer are logged with the
    /// request context and returned unchanged; no local recovery, no retry.
    pub async fn get_real_time_weather(
        &self,
        coords: Coordinates,
        correlation_id: &str,
    ) -> Result<WeatherReport, RelayError> {
        log::info!("requesting current weather for {coords}, correlation_id={correlation_id}");

        let raw = self.transport.fetch_current(coords).await.map_err(|err| {
            log::error!(
                "downstream call failed for {coords}, correlation_id={correlation_id}: {err}"
            );
            err
        })?;

        let observation = normalize(&raw).map_err(|err| {
            log::error!(
                "response normalization failed for {coords}, correlation_id={correlation_id}: {err}"
            );
            err
        })?;

        Ok(WeatherReport {
            correlation_id: correlation_id.to_owned(),
            location: observation.location,
            current: observation.current,
            response_code: ResponseCode::Success.code().to_owned(),
            response_msg: ResponseCode::Success.message().to_owned(),
        })
    }
}
