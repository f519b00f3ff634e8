//! `TrendsHttpClient` — the live implementation of [`TrendsApi`].
//!
//! Talks to the same endpoints the Trends web UI uses. Three transport
//! shapes are in play:
//! - plain JSON GET endpoints (`dailytrends`, `autocomplete`, `explore`),
//!   whose bodies carry the `)]}'` anti-XSSI prefix;
//! - the `batchexecute` RPC channel (real-time trends, trending articles),
//!   whose envelope wraps the payload as a JSON-encoded string inside a
//!   `wrb.fr` frame;
//! - the widget two-step (`explore` issues per-widget tokens, then
//!   `widgetdata/multiline` / `widgetdata/comparedgeo` redeem them).

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, Url};
use serde_json::{json, Value};
use tracing::debug;

use crate::client::TrendsApi;
use crate::error::TrendsError;
use crate::types::{
    DailyTrendsOptions, ExploreOptions, InterestByRegionOptions, InterestOverTimeOptions,
    RealTimeTrendsOptions, TrendingArticlesOptions,
};

const BASE_URL: &str = "https://trends.google.com";

/// The UI rejects clients without a browser user agent.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Anti-XSSI prefix Google prepends to JSON bodies.
const XSSI_PREFIX: &str = ")]}'";

/// RPC ids on the `batchexecute` channel.
const RPC_REAL_TIME_TRENDS: &str = "i0OFE";
const RPC_TRENDING_ARTICLES: &str = "w4opAf";

/// Applied when an operation does not expose its own language or timezone.
const DEFAULT_HL: &str = "en-US";
const DEFAULT_TZ: i64 = -240;

/// Time range used when a widget call is given no explicit window.
const DEFAULT_TIME_RANGE: &str = "today 12-m";

/// Earliest date the Trends corpus covers; used when only an end bound is
/// supplied.
const EARLIEST_DATE: &str = "2004-01-01";

pub struct TrendsHttpClient {
    http: Client,
    base_url: String,
}

impl TrendsHttpClient {
    /// Client against the production endpoints.
    pub fn new() -> Result<Self, TrendsError> {
        Self::with_base_url(BASE_URL)
    }

    /// Client against an alternate base URL (test servers).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, TrendsError> {
        // The consent cookie set on the first response must flow back on
        // follow-up requests or the widget endpoints answer 401.
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    fn url(&self, segments: &[&str]) -> Result<Url, TrendsError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| TrendsError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| TrendsError::InvalidUrl("base url cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json(
        &self,
        endpoint: &'static str,
        url: Url,
        query: &[(&str, String)],
    ) -> Result<Value, TrendsError> {
        debug!(%url, endpoint, "GET");
        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TrendsError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }
        let body = response.text().await?;
        parse_prefixed_json(endpoint, &body)
    }

    /// Issue one RPC over the `batchexecute` channel and unwrap its payload.
    async fn batch_execute(
        &self,
        endpoint: &'static str,
        rpc_id: &'static str,
        payload: Value,
    ) -> Result<Value, TrendsError> {
        let url = self.url(&["_", "TrendsUi", "data", "batchexecute"])?;
        // Envelope shape: [[[rpc_id, json-encoded payload, null, "generic"]]]
        let envelope = json!([[[rpc_id, payload.to_string(), null, "generic"]]]);
        let form = [("f.req", envelope.to_string())];

        debug!(%url, endpoint, rpc_id, "POST batchexecute");
        let response = self.http.post(url).form(&form).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TrendsError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }
        let body = response.text().await?;
        decode_batch_payload(endpoint, rpc_id, &body)
    }

    /// The raw explore call: returns the widget list for a request object.
    async fn explore_request(
        &self,
        req: &Value,
        hl: &str,
        tz: i64,
    ) -> Result<Value, TrendsError> {
        self.get_json(
            "explore",
            self.url(&["trends", "api", "explore"])?,
            &[
                ("hl", hl.to_string()),
                ("tz", tz.to_string()),
                ("req", req.to_string()),
            ],
        )
        .await
    }

    /// Redeem a widget token against a `widgetdata` endpoint.
    async fn widget_data(
        &self,
        endpoint: &'static str,
        request: &Value,
        token: &str,
        hl: &str,
        tz: i64,
    ) -> Result<Value, TrendsError> {
        self.get_json(
            endpoint,
            self.url(&["trends", "api", "widgetdata", endpoint])?,
            &[
                ("hl", hl.to_string()),
                ("tz", tz.to_string()),
                ("req", request.to_string()),
                ("token", token.to_string()),
            ],
        )
        .await
    }
}

#[async_trait]
impl TrendsApi for TrendsHttpClient {
    async fn daily_trends(&self, options: DailyTrendsOptions) -> Result<Value, TrendsError> {
        self.get_json(
            "dailytrends",
            self.url(&["trends", "api", "dailytrends"])?,
            &[
                ("hl", options.hl),
                ("geo", options.geo),
                ("tz", DEFAULT_TZ.to_string()),
                ("ns", "15".to_string()),
            ],
        )
        .await
    }

    async fn real_time_trends(
        &self,
        options: RealTimeTrendsOptions,
    ) -> Result<Value, TrendsError> {
        // Positional tuple the UI sends: [_, _, geo, category, hl, hours, 1]
        let payload = json!([null, null, options.geo, 0, "en", options.trending_hours, 1]);
        self.batch_execute("realtimetrends", RPC_REAL_TIME_TRENDS, payload)
            .await
    }

    async fn trending_articles(
        &self,
        options: TrendingArticlesOptions,
    ) -> Result<Value, TrendsError> {
        let payload = json!([options.article_keys, options.article_count]);
        self.batch_execute("trendingarticles", RPC_TRENDING_ARTICLES, payload)
            .await
    }

    async fn interest_over_time(
        &self,
        options: InterestOverTimeOptions,
    ) -> Result<Value, TrendsError> {
        let req = json!({
            "comparisonItem": [{
                "keyword": options.keyword,
                "geo": options.geo,
                "time": DEFAULT_TIME_RANGE,
            }],
            "category": 0,
            "property": "",
        });
        let widgets = self.explore_request(&req, DEFAULT_HL, DEFAULT_TZ).await?;
        let widget = find_widget(&widgets, "TIMESERIES")?;
        let (request, token) = widget_request(widget)?;
        self.widget_data("multiline", &request, token, DEFAULT_HL, DEFAULT_TZ)
            .await
    }

    async fn autocomplete(&self, keyword: &str, hl: &str) -> Result<Value, TrendsError> {
        self.get_json(
            "autocomplete",
            self.url(&["trends", "api", "autocomplete", keyword])?,
            &[("hl", hl.to_string()), ("tz", DEFAULT_TZ.to_string())],
        )
        .await
    }

    async fn explore(&self, options: ExploreOptions) -> Result<Value, TrendsError> {
        let req = json!({
            "comparisonItem": [{
                "keyword": options.keyword,
                "geo": options.geo,
                "time": options.time,
            }],
            "category": options.category,
            "property": options.property,
        });
        self.explore_request(&req, &options.hl, DEFAULT_TZ).await
    }

    async fn interest_by_region(
        &self,
        options: InterestByRegionOptions,
    ) -> Result<Value, TrendsError> {
        let time = region_time_range(&options);

        // N keywords compare against N geos; a short geo list repeats its
        // last entry, mirroring the upstream convention.
        let keywords = options.keyword.values();
        let geos = options.geo.values();
        let comparison: Vec<Value> = keywords
            .iter()
            .enumerate()
            .map(|(index, keyword)| {
                let geo = geos
                    .get(index)
                    .or_else(|| geos.last())
                    .copied()
                    .unwrap_or("");
                json!({ "keyword": keyword, "geo": geo, "time": time })
            })
            .collect();

        let req = json!({
            "comparisonItem": comparison,
            "category": options.category,
            "property": "",
        });

        let widgets = self
            .explore_request(&req, &options.hl, options.timezone)
            .await?;
        let widget = find_widget(&widgets, "GEO_MAP")?;
        let (mut request, token) = widget_request(widget)?;
        if let Some(map) = request.as_object_mut() {
            map.insert(
                "resolution".to_string(),
                serde_json::to_value(options.resolution).unwrap_or(Value::Null),
            );
        }
        self.widget_data("comparedgeo", &request, token, &options.hl, options.timezone)
            .await
    }
}

// ---------------------------------------------------------------------------
// Response decoding helpers
// ---------------------------------------------------------------------------

/// Strip the anti-XSSI prefix (and the separator after it) and parse JSON.
fn parse_prefixed_json(endpoint: &'static str, body: &str) -> Result<Value, TrendsError> {
    let trimmed = body
        .strip_prefix(XSSI_PREFIX)
        .map(|rest| rest.trim_start_matches(',').trim_start())
        .unwrap_or(body);
    serde_json::from_str(trimmed).map_err(|e| TrendsError::MalformedResponse {
        endpoint,
        message: e.to_string(),
    })
}

/// Pull one RPC's payload out of a `batchexecute` envelope.
///
/// The envelope is a sequence of length-prefixed line chunks; the frame of
/// interest is `["wrb.fr", <rpc id>, <json-encoded payload>, ...]`.
fn decode_batch_payload(
    endpoint: &'static str,
    rpc_id: &str,
    body: &str,
) -> Result<Value, TrendsError> {
    for line in body.lines() {
        let line = line.trim();
        if !line.starts_with('[') {
            continue;
        }
        let Ok(frame) = serde_json::from_str::<Value>(line) else {
            continue;
        };
        let Some(entries) = frame.as_array() else {
            continue;
        };
        for entry in entries {
            let Some(fields) = entry.as_array() else {
                continue;
            };
            if fields.first().and_then(Value::as_str) != Some("wrb.fr")
                || fields.get(1).and_then(Value::as_str) != Some(rpc_id)
            {
                continue;
            }
            let raw = fields
                .get(2)
                .and_then(Value::as_str)
                .ok_or(TrendsError::MalformedResponse {
                    endpoint,
                    message: "rpc frame carries no payload".to_string(),
                })?;
            return serde_json::from_str(raw).map_err(|e| TrendsError::MalformedResponse {
                endpoint,
                message: e.to_string(),
            });
        }
    }
    Err(TrendsError::MalformedResponse {
        endpoint,
        message: format!("no frame for rpc '{rpc_id}'"),
    })
}

/// Find a widget by id in an explore response.
fn find_widget<'a>(explore_response: &'a Value, id: &'static str) -> Result<&'a Value, TrendsError> {
    explore_response["widgets"]
        .as_array()
        .and_then(|widgets| widgets.iter().find(|w| w["id"].as_str() == Some(id)))
        .ok_or(TrendsError::MissingWidget(id))
}

/// Extract the request object and token a `widgetdata` call needs.
fn widget_request(widget: &Value) -> Result<(Value, &str), TrendsError> {
    let token = widget["token"]
        .as_str()
        .ok_or(TrendsError::MalformedResponse {
            endpoint: "explore",
            message: "widget carries no token".to_string(),
        })?;
    Ok((widget["request"].clone(), token))
}

/// Time range for an interest-by-region comparison. Bounds are optional
/// independently; only when neither is given does the default window apply.
fn region_time_range(options: &InterestByRegionOptions) -> String {
    match (options.start_time, options.end_time) {
        (None, None) => DEFAULT_TIME_RANGE.to_string(),
        (start, end) => {
            let start = start
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| EARLIEST_DATE.to_string());
            let end = end
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| Utc::now().format("%Y-%m-%d").to_string());
            format!("{start} {end}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ListOrScalar, Resolution};
    use chrono::TimeZone;

    #[test]
    fn xssi_prefix_is_stripped_before_parsing() {
        let body = ")]}',\n{\"default\":{\"topics\":[]}}";
        let parsed = parse_prefixed_json("autocomplete", body).unwrap();
        assert_eq!(parsed["default"]["topics"], json!([]));
    }

    #[test]
    fn unprefixed_json_still_parses() {
        let parsed = parse_prefixed_json("explore", "{\"widgets\":[]}").unwrap();
        assert_eq!(parsed["widgets"], json!([]));
    }

    #[test]
    fn garbage_body_is_a_malformed_response() {
        let err = parse_prefixed_json("dailytrends", "<html>consent</html>").unwrap_err();
        assert!(matches!(err, TrendsError::MalformedResponse { .. }));
    }

    #[test]
    fn batch_envelope_payload_is_unwrapped() {
        let body = ")]}'\n\n247\n[[\"wrb.fr\",\"i0OFE\",\"[[\\\"rust\\\",42]]\",null,null,null,\"generic\"]]\n25\n[[\"di\",17],[\"af.httprm\",17]]";
        let payload = decode_batch_payload("realtimetrends", "i0OFE", body).unwrap();
        assert_eq!(payload, json!([["rust", 42]]));
    }

    #[test]
    fn batch_envelope_without_the_rpc_is_rejected() {
        let body = ")]}'\n\n[[\"wrb.fr\",\"other\",\"[]\",null,null,null,\"generic\"]]";
        let err = decode_batch_payload("trendingarticles", "w4opAf", body).unwrap_err();
        assert!(matches!(err, TrendsError::MalformedResponse { .. }));
    }

    #[test]
    fn widget_lookup_finds_by_id() {
        let response = json!({
            "widgets": [
                { "id": "TIMESERIES", "token": "abc", "request": { "time": "today 12-m" } },
                { "id": "GEO_MAP", "token": "def", "request": {} },
            ]
        });
        let widget = find_widget(&response, "GEO_MAP").unwrap();
        let (request, token) = widget_request(widget).unwrap();
        assert_eq!(token, "def");
        assert_eq!(request, json!({}));

        let err = find_widget(&response, "RELATED_QUERIES").unwrap_err();
        assert!(matches!(err, TrendsError::MissingWidget("RELATED_QUERIES")));
    }

    fn region_options() -> InterestByRegionOptions {
        InterestByRegionOptions {
            keyword: ListOrScalar::Scalar("rust".into()),
            geo: ListOrScalar::Scalar("US".into()),
            resolution: Resolution::Region,
            hl: "en-US".into(),
            timezone: -240,
            category: 0,
            start_time: None,
            end_time: None,
        }
    }

    #[test]
    fn region_time_range_defaults_when_unbounded() {
        assert_eq!(region_time_range(&region_options()), DEFAULT_TIME_RANGE);
    }

    #[test]
    fn region_time_range_formats_explicit_bounds() {
        let mut options = region_options();
        options.start_time = Some(Utc.with_ymd_and_hms(2025, 6, 30, 0, 0, 0).unwrap());
        options.end_time = Some(Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap());
        assert_eq!(region_time_range(&options), "2025-06-30 2025-07-01");
    }

    #[test]
    fn region_time_range_backfills_a_missing_start() {
        let mut options = region_options();
        options.end_time = Some(Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap());
        assert_eq!(region_time_range(&options), "2004-01-01 2025-07-01");
    }
}
