use crate::{
    error::{Error, Result},
    format::format_report,
    model::WeatherReport,
    provider::WeatherSource,
    reply::{ReplyChannel, ReplyPayload},
};

/// Two-step fetch: resolve the city, acknowledge the match through the
/// channel, then fetch current conditions for the resolved id.
///
/// Every failure comes back as `Err`; there is no success-shaped error value
/// to sniff.
pub async fn get_weather(
    source: &dyn WeatherSource,
    city_name: &str,
    channel: &dyn ReplyChannel,
) -> Result<WeatherReport> {
    let city = source.lookup_city(city_name).await?;
    tracing::debug!(city = %city.name, id = %city.id, "resolved city");

    let ack = format!("正在搜索{}的天气", city.name);
    if let Err(err) = channel.send(ReplyPayload::Text(ack)).await {
        // The final reply may still go through; don't abort the fetch.
        tracing::warn!("failed to send acknowledgment: {err}");
    }

    source.current_weather(&city.id).await
}

/// Entry point of the reply pipeline: fetch, format, deliver.
///
/// Pipeline failures are turned into replies, not returned; the only `Err`
/// out of here is a failure of the reply channel itself.
pub async fn reply_weather(
    source: &dyn WeatherSource,
    city_name: &str,
    channel: &dyn ReplyChannel,
) -> anyhow::Result<()> {
    let payload = match get_weather(source, city_name, channel).await {
        Ok(report) => success_payload(report),
        Err(Error::Upstream { code, payload }) => {
            // HTTP 200 but the API said no; show the payload as-is.
            tracing::warn!(%code, %payload, "upstream returned non-success code");
            ReplyPayload::Raw(payload)
        }
        Err(err) => {
            tracing::warn!("weather pipeline failed: {err}");
            ReplyPayload::Text(err.to_string())
        }
    };

    channel.send(payload).await
}

fn success_payload(report: WeatherReport) -> ReplyPayload {
    match &report.now {
        Some(now) => ReplyPayload::Text(format_report(now, report.update_time.as_deref())),
        // Success code but no observation block: pass the retained upstream
        // payload through verbatim rather than inventing a reply.
        None => ReplyPayload::Raw(report.raw),
    }
}
