use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Application-level success code used by both QWeather endpoints.
pub const SUCCESS_CODE: &str = "200";

/// QWeather documents `code` as a string but it is only required to be
/// "comparable to 200"; accept a bare number too and normalize to a string.
fn code_field<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Code::deserialize(de)? {
        Code::Text(s) => s,
        Code::Number(n) => n.to_string(),
    })
}

/// One match from the geocoding lookup. The pipeline only consumes `id` and
/// `name`; the administrative fields come along because the endpoint supplies
/// them and callers may want to disambiguate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub adm1: Option<String>,
    #[serde(default)]
    pub adm2: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Response body of `GET /v2/city/lookup`.
#[derive(Debug, Clone, Deserialize)]
pub struct CityLookupResponse {
    #[serde(default, deserialize_with = "code_field")]
    pub code: String,
    #[serde(default)]
    pub location: Vec<CityRecord>,
}

impl CityLookupResponse {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }
}

/// Current observation block of `GET /v7/weather/now`.
///
/// QWeather serializes every measurement as a JSON string; values are kept
/// verbatim so the formatter can echo them without numeric round-tripping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NowConditions {
    #[serde(default)]
    pub obs_time: Option<String>,
    pub text: String,
    pub temp: String,
    pub feels_like: String,
    pub wind_dir: String,
    pub wind_scale: String,
    pub wind_speed: String,
    pub humidity: String,
    pub precip: String,
    pub vis: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Response body of `GET /v7/weather/now`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    #[serde(default, deserialize_with = "code_field")]
    pub code: String,
    #[serde(default)]
    pub update_time: Option<String>,
    #[serde(default)]
    pub now: Option<NowConditions>,
    /// Full upstream payload, verbatim, including fields the struct does not
    /// model (`fxLink`, `refer`, ...). Attached by the provider after the
    /// code gate; `Null` for hand-built reports.
    #[serde(skip)]
    pub raw: Value,
}

impl WeatherReport {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOOKUP_BODY: &str = r#"{
        "code": "200",
        "location": [
            {"name": "北京", "id": "101010100", "adm1": "北京市", "adm2": "北京", "country": "中国"},
            {"name": "海淀", "id": "101010200", "adm1": "北京市", "adm2": "北京", "country": "中国"}
        ]
    }"#;

    const NOW_BODY: &str = r#"{
        "code": "200",
        "updateTime": "2021-02-16T16:21+08:00",
        "now": {
            "obsTime": "2021-02-16T16:00+08:00",
            "temp": "-4",
            "feelsLike": "-9",
            "icon": "100",
            "text": "晴",
            "windDir": "西北风",
            "windScale": "3",
            "windSpeed": "16",
            "humidity": "27",
            "precip": "0.0",
            "vis": "30"
        }
    }"#;

    #[test]
    fn lookup_body_deserializes_and_keeps_order() {
        let parsed: CityLookupResponse = serde_json::from_str(LOOKUP_BODY).unwrap();
        assert!(parsed.is_success());
        assert_eq!(parsed.location.len(), 2);
        assert_eq!(parsed.location[0].id, "101010100");
        assert_eq!(parsed.location[0].name, "北京");
    }

    #[test]
    fn now_body_deserializes_with_verbatim_strings() {
        let parsed: WeatherReport = serde_json::from_str(NOW_BODY).unwrap();
        assert!(parsed.is_success());
        assert_eq!(parsed.update_time.as_deref(), Some("2021-02-16T16:21+08:00"));

        let now = parsed.now.unwrap();
        assert_eq!(now.temp, "-4");
        assert_eq!(now.precip, "0.0");
        assert_eq!(now.wind_dir, "西北风");
    }

    #[test]
    fn non_success_code_without_now_block() {
        let parsed: WeatherReport = serde_json::from_str(r#"{"code": "402"}"#).unwrap();
        assert!(!parsed.is_success());
        assert!(parsed.now.is_none());
    }

    #[test]
    fn numeric_code_decodes_like_a_string() {
        let report: WeatherReport = serde_json::from_str(r#"{"code": 200}"#).unwrap();
        assert_eq!(report.code, "200");
        assert!(report.is_success());

        let lookup: CityLookupResponse =
            serde_json::from_str(r#"{"code": 200, "location": []}"#).unwrap();
        assert!(lookup.is_success());
    }

    #[test]
    fn decoded_report_starts_with_null_raw_payload() {
        let report: WeatherReport = serde_json::from_str(NOW_BODY).unwrap();
        assert!(report.raw.is_null());
    }

    #[test]
    fn lookup_with_missing_location_defaults_to_empty() {
        let parsed: CityLookupResponse = serde_json::from_str(r#"{"code": "404"}"#).unwrap();
        assert!(!parsed.is_success());
        assert!(parsed.location.is_empty());
    }
}
