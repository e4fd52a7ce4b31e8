use serde_json::Value;

use crate::error::RelayError;
use crate::model::{Condition, CurrentConditions, Location};

/// Location and current conditions decoded from the provider payload, before
/// request metadata is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub location: Location,
    pub current: CurrentConditions,
}

/// Parse the provider's current-weather JSON into the internal model.
///
/// Field-for-field copy with explicit coercions: strings verbatim, the two
/// epoch fields decoded from numeric strings into 64-bit integers, weather
/// measurements into 32-bit floats, and the counted fields (`is_day`,
/// `wind_degree`, `humidity`, `cloud`, `condition.code`) into 32-bit
/// integers. Unknown extra fields are ignored; any absent or mismatched
/// field fails with the dotted path of the first offender. Partial reports
/// are never produced.
pub fn normalize(raw: &str) -> Result<Observation, RelayError> {
    let root: Value = serde_json::from_str(raw).map_err(|_| malformed("$"))?;

    let location_node = member(&root, "location")?;
    let current_node = member(&root, "current")?;
    let condition_node = member(current_node, "current.condition")?;

    let location = Location {
        name: text(location_node, "location.name")?,
        region: text(location_node, "location.region")?,
        country: text(location_node, "location.country")?,
        lat: float32(location_node, "location.lat")?,
        lon: float32(location_node, "location.lon")?,
        tz_id: text(location_node, "location.tz_id")?,
        localtime_epoch: epoch(location_node, "location.localtime_epoch")?,
        localtime: text(location_node, "location.localtime")?,
    };

    let condition = Condition {
        text: text(condition_node, "current.condition.text")?,
        icon: text(condition_node, "current.condition.icon")?,
        code: int32(condition_node, "current.condition.code")?,
    };

    let current = CurrentConditions {
        last_updated_epoch: epoch(current_node, "current.last_updated_epoch")?,
        last_updated: text(current_node, "current.last_updated")?,
        temp_c: float32(current_node, "current.temp_c")?,
        temp_f: float32(current_node, "current.temp_f")?,
        is_day: int32(current_node, "current.is_day")?,
        condition,
        wind_mph: float32(current_node, "current.wind_mph")?,
        wind_kph: float32(current_node, "current.wind_kph")?,
        wind_degree: int32(current_node, "current.wind_degree")?,
        wind_dir: text(current_node, "current.wind_dir")?,
        pressure_mb: float32(current_node, "current.pressure_mb")?,
        pressure_in: float32(current_node, "current.pressure_in")?,
        precip_mm: float32(current_node, "current.precip_mm")?,
        precip_in: float32(current_node, "current.precip_in")?,
        humidity: int32(current_node, "current.humidity")?,
        cloud: int32(current_node, "current.cloud")?,
        feelslike_c: float32(current_node, "current.feelslike_c")?,
        feelslike_f: float32(current_node, "current.feelslike_f")?,
        vis_km: float32(current_node, "current.vis_km")?,
        vis_miles: float32(current_node, "current.vis_miles")?,
        uv: float32(current_node, "current.uv")?,
        gust_mph: float32(current_node, "current.gust_mph")?,
        gust_kph: float32(current_node, "current.gust_kph")?,
    };

    Ok(Observation { location, current })
}

/// Look up the last segment of `path` in `node`, failing with the full path.
fn member<'a>(node: &'a Value, path: &str) -> Result<&'a Value, RelayError> {
    let key = path.rsplit('.').next().unwrap_or(path);
    node.get(key).ok_or_else(|| malformed(path))
}

fn text(node: &Value, path: &str) -> Result<String, RelayError> {
    member(node, path)?.as_str().map(str::to_owned).ok_or_else(|| malformed(path))
}

fn float32(node: &Value, path: &str) -> Result<f32, RelayError> {
    member(node, path)?.as_f64().map(|n| n as f32).ok_or_else(|| malformed(path))
}

fn int32(node: &Value, path: &str) -> Result<i32, RelayError> {
    member(node, path)?
        .as_i64()
        .and_then(|n| i32::try_from(n).ok())
        .ok_or_else(|| malformed(path))
}

/// The provider delivers epoch fields as numeric strings; JSON integers are
/// accepted too. Floats are not: the value must decode losslessly as i64.
fn epoch(node: &Value, path: &str) -> Result<i64, RelayError> {
    match member(node, path)? {
        Value::String(s) => s.parse::<i64>().map_err(|_| malformed(path)),
        value @ Value::Number(_) => value.as_i64().ok_or_else(|| malformed(path)),
        _ => Err(malformed(path)),
    }
}

fn malformed(path: &str) -> RelayError {
    RelayError::MalformedResponse { path: path.to_owned() }
}
