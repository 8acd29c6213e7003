use chrono::DateTime;

use crate::model::NowConditions;

/// Render the current conditions as the fixed ten-line reply block.
///
/// Field order and unit suffixes are part of the contract: condition,
/// temperature, feels-like, wind direction, wind scale, wind speed,
/// humidity, precipitation, visibility, update time. Values are echoed
/// verbatim, no numeric conversion.
pub fn format_report(now: &NowConditions, update_time: Option<&str>) -> String {
    let update = update_time.map_or_else(|| "未知".to_string(), format_update_time);

    format!(
        "天气：{}\n\
         温度：{}℃\n\
         体感温度：{}℃\n\
         风向：{}\n\
         风力：{}级\n\
         风速：{}公里/小时\n\
         湿度：{}%\n\
         降水量：{}毫米\n\
         能见度：{}公里\n\
         更新时间：{}",
        now.text,
        now.temp,
        now.feels_like,
        now.wind_dir,
        now.wind_scale,
        now.wind_speed,
        now.humidity,
        now.precip,
        now.vis,
        update,
    )
}

/// Render the upstream update timestamp as `YYYY-MM-DD HH:mm` in the
/// timestamp's own offset. QWeather sends minute precision with an offset
/// (`2021-02-16T16:21+08:00`); full RFC 3339 is accepted too. An
/// unparseable value falls back to the raw string rather than erroring a
/// reply that is otherwise fine.
pub fn format_update_time(raw: &str) -> String {
    let parsed = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M%z")
        .or_else(|_| DateTime::parse_from_rfc3339(raw));

    match parsed {
        Ok(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_now() -> NowConditions {
        NowConditions {
            obs_time: Some("2021-02-16T16:00+08:00".into()),
            text: "晴".into(),
            temp: "-4".into(),
            feels_like: "-9".into(),
            wind_dir: "西北风".into(),
            wind_scale: "3".into(),
            wind_speed: "16".into(),
            humidity: "27".into(),
            precip: "0.0".into(),
            vis: "30".into(),
            icon: Some("100".into()),
        }
    }

    #[test]
    fn report_has_fixed_line_count_and_order() {
        let text = format_report(&sample_now(), Some("2021-02-16T16:21+08:00"));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 10);
        let labels = ["天气", "温度", "体感温度", "风向", "风力", "风速", "湿度", "降水量", "能见度", "更新时间"];
        for (line, label) in lines.iter().zip(labels) {
            assert!(line.starts_with(&format!("{label}：")), "line {line:?} should start with {label}");
        }
    }

    #[test]
    fn values_are_verbatim_with_unit_suffixes() {
        let text = format_report(&sample_now(), Some("2021-02-16T16:21+08:00"));

        assert!(text.contains("温度：-4℃"));
        assert!(text.contains("体感温度：-9℃"));
        assert!(text.contains("风向：西北风"));
        assert!(text.contains("风力：3级"));
        assert!(text.contains("风速：16公里/小时"));
        assert!(text.contains("湿度：27%"));
        assert!(text.contains("降水量：0.0毫米"));
        assert!(text.contains("能见度：30公里"));
        assert!(text.contains("更新时间：2021-02-16 16:21"));
    }

    #[test]
    fn update_time_renders_fixed_shape_for_offset_forms() {
        // Minute precision with explicit offset, as QWeather sends it.
        assert_eq!(format_update_time("2021-02-16T16:21+08:00"), "2021-02-16 16:21");
        // Full RFC 3339 with seconds.
        assert_eq!(format_update_time("2021-02-16T16:21:45+08:00"), "2021-02-16 16:21");
        // UTC designator: rendered in its own offset, not shifted.
        assert_eq!(format_update_time("2021-02-16T08:21:00Z"), "2021-02-16 08:21");
    }

    #[test]
    fn unparseable_update_time_falls_back_to_raw() {
        assert_eq!(format_update_time("soon-ish"), "soon-ish");
    }

    #[test]
    fn missing_update_time_renders_placeholder() {
        let text = format_report(&sample_now(), None);
        assert!(text.ends_with("更新时间：未知"));
    }
}
