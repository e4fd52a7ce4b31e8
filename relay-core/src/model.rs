use serde::{Deserialize, Serialize};

/// A latitude/longitude pair, passed to the provider as `{lat},{lon}`.
///
/// No range validation beyond what the provider itself accepts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f32,
    pub lon: f32,
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

/// Resolved location attached to a weather observation.
///
/// Field names mirror the provider wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub region: String,
    pub country: String,
    pub lat: f32,
    pub lon: f32,
    pub tz_id: String,
    pub localtime_epoch: i64,
    pub localtime: String,
}

/// Provider-defined weather condition. The code enumeration is the
/// provider's, not validated locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub text: String,
    pub icon: String,
    pub code: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub last_updated_epoch: i64,
    pub last_updated: String,
    pub temp_c: f32,
    pub temp_f: f32,
    pub is_day: i32,
    pub condition: Condition,
    pub wind_mph: f32,
    pub wind_kph: f32,
    pub wind_degree: i32,
    pub wind_dir: String,
    pub pressure_mb: f32,
    pub pressure_in: f32,
    pub precip_mm: f32,
    pub precip_in: f32,
    pub humidity: i32,
    pub cloud: i32,
    pub feelslike_c: f32,
    pub feelslike_f: f32,
    pub vis_km: f32,
    pub vis_miles: f32,
    pub uv: f32,
    pub gust_mph: f32,
    pub gust_kph: f32,
}

/// The aggregate returned to callers: location, current conditions, and
/// request metadata. Constructed per request and never mutated afterwards.
///
/// Report-level keys serialize as camelCase (`correlationId`, `responseCode`,
/// `responseMsg`); the nested structures keep the provider's snake_case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    pub correlation_id: String,
    pub location: Location,
    pub current: CurrentConditions,
    pub response_code: String,
    pub response_msg: String,
}

/// Stable response code/message pairs stamped onto reports and error
/// payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    Success,
    NotFound,
    ServerError,
}

impl ResponseCode {
    pub fn code(&self) -> &'static str {
        match self {
            ResponseCode::Success => "200",
            ResponseCode::NotFound => "404",
            ResponseCode::ServerError => "500",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ResponseCode::Success => "SUCCESS",
            ResponseCode::NotFound => "NOT_FOUND",
            ResponseCode::ServerError => "INTERNAL_SERVER_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> WeatherReport {
        WeatherReport {
            correlation_id: "abc-123".to_string(),
            location: Location {
                name: "London".to_string(),
                region: "City of London".to_string(),
                country: "UK".to_string(),
                lat: 51.52,
                lon: -0.11,
                tz_id: "Europe/London".to_string(),
                localtime_epoch: 1_700_000_000,
                localtime: "2023-11-14 22:00".to_string(),
            },
            current: CurrentConditions {
                last_updated_epoch: 1_700_000_000,
                last_updated: "2023-11-14 22:00".to_string(),
                temp_c: 15.0,
                temp_f: 59.0,
                is_day: 0,
                condition: Condition {
                    text: "Clear".to_string(),
                    icon: "//cdn/clear.png".to_string(),
                    code: 1000,
                },
                wind_mph: 5.0,
                wind_kph: 8.0,
                wind_degree: 180,
                wind_dir: "S".to_string(),
                pressure_mb: 1013.0,
                pressure_in: 29.9,
                precip_mm: 0.0,
                precip_in: 0.0,
                humidity: 80,
                cloud: 10,
                feelslike_c: 14.0,
                feelslike_f: 57.0,
                vis_km: 10.0,
                vis_miles: 6.0,
                uv: 1.0,
                gust_mph: 7.0,
                gust_kph: 11.0,
            },
            response_code: ResponseCode::Success.code().to_string(),
            response_msg: ResponseCode::Success.message().to_string(),
        }
    }

    #[test]
    fn coordinates_display_matches_provider_query_form() {
        let coords = Coordinates { lat: 51.5, lon: -0.12 };
        assert_eq!(coords.to_string(), "51.5,-0.12");
    }

    #[test]
    fn report_serializes_metadata_as_camel_case() {
        let json = serde_json::to_value(sample_report()).expect("report must serialize");

        assert_eq!(json["correlationId"], "abc-123");
        assert_eq!(json["responseCode"], "200");
        assert_eq!(json["responseMsg"], "SUCCESS");
        // nested structures keep the provider field names
        assert_eq!(json["location"]["tz_id"], "Europe/London");
        assert_eq!(json["current"]["condition"]["code"], 1000);
    }

    #[test]
    fn report_roundtrips_through_json() {
        let report = sample_report();
        let json = serde_json::to_string(&report).expect("report must serialize");
        let parsed: WeatherReport = serde_json::from_str(&json).expect("report must deserialize");

        assert_eq!(report, parsed);
    }

    #[test]
    fn response_codes_are_stable() {
        assert_eq!(ResponseCode::Success.code(), "200");
        assert_eq!(ResponseCode::NotFound.code(), "404");
        assert_eq!(ResponseCode::ServerError.message(), "INTERNAL_SERVER_ERROR");
    }
}
