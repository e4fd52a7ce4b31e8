use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use uuid::Uuid;
use warp::http::StatusCode;
use warp::http::header::HeaderValue;
use warp::{Filter, Rejection, Reply};

use relay_core::{Coordinates, RealtimeWeatherService, RelayError, ResponseCode};

const CORRELATION_ID_HEADER: &str = "x-correlation-id";

pub async fn run(address: std::net::SocketAddr, service: Arc<RealtimeWeatherService>) {
    warp::serve(routes(service)).run(address).await
}

/// Inbound boundary: the report endpoint, its legacy variant, and the
/// correlation filter shared by both.
fn routes(
    service: Arc<RealtimeWeatherService>,
) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    let report_route = warp::path!("miscellaneous" / "checkWeatherReport")
        .and(warp::get())
        .and(warp::query::<WeatherQuery>())
        .and(correlation_id())
        .and(with_service(service.clone()))
        .and_then(check_weather_report);

    let legacy_route = warp::path!("miscellaneous" / "checkWeather")
        .and(warp::get())
        .and(warp::query::<WeatherQuery>())
        .and(correlation_id())
        .and(with_service(service))
        .and_then(check_weather_legacy);

    report_route.or(legacy_route).recover(rejection)
}

#[derive(Debug, Deserialize)]
struct WeatherQuery {
    lat: f32,
    lon: f32,
}

/// Read the inbound correlation header, generating a fresh v4 UUID when the
/// header is absent or empty. The value is echoed on every reply and becomes
/// `WeatherReport.correlationId`.
fn correlation_id() -> impl Filter<Extract = (String,), Error = Rejection> + Clone {
    warp::header::optional::<String>(CORRELATION_ID_HEADER).map(|header: Option<String>| {
        header.filter(|id| !id.is_empty()).unwrap_or_else(|| Uuid::new_v4().to_string())
    })
}

fn with_service(
    service: Arc<RealtimeWeatherService>,
) -> impl Filter<Extract = (Arc<RealtimeWeatherService>,), Error = Infallible> + Clone {
    warp::any().map(move || service.clone())
}

/// Error payload returned by the report endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorObject {
    service_id: String,
    code: String,
    message: String,
    timestamp: String,
}

impl ErrorObject {
    fn new(service_id: &str, code: ResponseCode) -> Self {
        Self {
            service_id: service_id.to_owned(),
            code: code.code().to_owned(),
            message: code.message().to_owned(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

async fn check_weather_report(
    query: WeatherQuery,
    correlation_id: String,
    service: Arc<RealtimeWeatherService>,
) -> Result<impl Reply, Rejection> {
    let coords = Coordinates { lat: query.lat, lon: query.lon };
    log::info!("inbound checkWeatherReport for {coords}, correlation_id={correlation_id}");

    let mut response = match service.get_real_time_weather(coords, &correlation_id).await {
        Ok(report) => {
            log::info!("checkWeatherReport succeeded, correlation_id={correlation_id}");
            warp::reply::with_status(warp::reply::json(&report), StatusCode::OK).into_response()
        }
        Err(RelayError::NotFound) => {
            log::warn!("no weather data for {coords}, correlation_id={correlation_id}");
            warp::reply::with_status(
                warp::reply::json(&ErrorObject::new(&correlation_id, ResponseCode::NotFound)),
                StatusCode::NOT_FOUND,
            )
            .into_response()
        }
        Err(err) => {
            log::error!("checkWeatherReport failed for {coords}, correlation_id={correlation_id}: {err}");
            warp::reply::with_status(
                warp::reply::json(&ErrorObject::new(&correlation_id, ResponseCode::ServerError)),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
            .into_response()
        }
    };

    attach_correlation(&mut response, &correlation_id);
    Ok(response)
}

/// Legacy variant: raw report JSON on success, empty body on failure.
async fn check_weather_legacy(
    query: WeatherQuery,
    correlation_id: String,
    service: Arc<RealtimeWeatherService>,
) -> Result<impl Reply, Rejection> {
    let coords = Coordinates { lat: query.lat, lon: query.lon };
    log::info!("inbound checkWeather for {coords}, correlation_id={correlation_id}");

    let mut response = match service.get_real_time_weather(coords, &correlation_id).await {
        Ok(report) => warp::reply::json(&report).into_response(),
        Err(err) => {
            log::error!("checkWeather failed for {coords}, correlation_id={correlation_id}: {err}");
            warp::reply().into_response()
        }
    };

    attach_correlation(&mut response, &correlation_id);
    Ok(response)
}

fn attach_correlation(response: &mut warp::reply::Response, correlation_id: &str) {
    if let Ok(value) = HeaderValue::from_str(correlation_id) {
        response.headers_mut().insert(CORRELATION_ID_HEADER, value);
    }
}

#[derive(Serialize)]
struct ErrorMessage {
    code: u16,
    message: String,
}

async fn rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (code, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found.")
    } else {
        (StatusCode::BAD_REQUEST, "Invalid request.")
    };

    log::debug!("request rejected: {err:?}");

    let json = warp::reply::json(&ErrorMessage { code: code.as_u16(), message: message.into() });

    Ok(warp::reply::with_status(json, code))
}
