use axum::http::{header, HeaderMap};
use serde::Serialize;
use time::{Duration, OffsetDateTime, Time};

use super::repo::{NewVisit, VisitorStore};
use crate::greetings::services::STUDIO_OFFSET;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisitorStats {
    pub total: i64,
    pub today: i64,
    pub week: i64,
    pub month: i64,
}

/// Lower bounds of the today / week / month windows: studio-local midnights.
pub fn stat_windows(now: OffsetDateTime) -> (OffsetDateTime, OffsetDateTime, OffsetDateTime) {
    let midnight = now.to_offset(STUDIO_OFFSET).replace_time(Time::MIDNIGHT);
    (
        midnight,
        midnight - Duration::days(7),
        midnight - Duration::days(30),
    )
}

pub async fn collect_stats(
    store: &dyn VisitorStore,
    now: OffsetDateTime,
) -> anyhow::Result<VisitorStats> {
    let (today, week, month) = stat_windows(now);
    Ok(VisitorStats {
        total: store.count_since(None).await?,
        today: store.count_since(Some(today)).await?,
        week: store.count_since(Some(week)).await?,
        month: store.count_since(Some(month)).await?,
    })
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Build the visit row from request headers, falling back to the socket peer address.
pub fn visit_from_request(
    headers: &HeaderMap,
    peer_ip: Option<String>,
    now: OffsetDateTime,
) -> NewVisit {
    let forwarded = header_str(headers, "x-forwarded-for")
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());
    let ip_address = forwarded
        .or_else(|| header_str(headers, "x-real-ip"))
        .map(str::to_string)
        .or(peer_ip)
        .unwrap_or_else(|| "Unknown".into());

    NewVisit {
        ip_address,
        user_agent: header_str(headers, header::USER_AGENT.as_str())
            .unwrap_or("Unknown")
            .to_string(),
        referer: header_str(headers, header::REFERER.as_str())
            .unwrap_or("Direct")
            .to_string(),
        visited_at: now,
    }
}
