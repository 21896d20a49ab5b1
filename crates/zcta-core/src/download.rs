//! Blocking HTTP GET of the source archive.
//!
//! The whole response body is buffered in memory before it is handed to the
//! archive reader. That is fine for a single national shapefile bundle (tens
//! of MiB); set `max_body_bytes` when pointing at something larger.

use crate::error::FetchError;
use std::time::Duration;

/// Transfer limits for the archive GET.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub connect_timeout: Duration,
    /// Hard wall-clock limit for the whole transfer (None = unbounded).
    pub timeout: Option<Duration>,
    /// Abort if throughput stays below this many bytes/s for `low_speed_time`.
    pub low_speed_limit: u32,
    pub low_speed_time: Duration,
    /// Reject bodies larger than this (None = no cap).
    pub max_body_bytes: Option<u64>,
    pub user_agent: String,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            timeout: Some(Duration::from_secs(3600)),
            low_speed_limit: 1024,
            low_speed_time: Duration::from_secs(60),
            max_body_bytes: None,
            user_agent: default_user_agent(),
        }
    }
}

pub fn default_user_agent() -> String {
    format!("zcta-fetch/{}", env!("CARGO_PKG_VERSION"))
}

/// GETs `url` and returns the complete response body.
///
/// Follows redirects. Fails on transport errors, on any non-2xx HTTP status,
/// and when the body outgrows `opts.max_body_bytes`. Non-HTTP schemes
/// (`file://`) have no status and are accepted as-is.
pub fn fetch_bytes(url: &str, opts: &HttpOptions) -> Result<Vec<u8>, FetchError> {
    let net = |source: curl::Error| FetchError::Network {
        url: url.to_string(),
        source,
    };

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(net)?;
    easy.follow_location(true).map_err(net)?;
    easy.max_redirections(10).map_err(net)?;
    easy.useragent(&opts.user_agent).map_err(net)?;
    easy.connect_timeout(opts.connect_timeout).map_err(net)?;
    easy.low_speed_limit(opts.low_speed_limit).map_err(net)?;
    easy.low_speed_time(opts.low_speed_time).map_err(net)?;
    if let Some(t) = opts.timeout {
        easy.timeout(t).map_err(net)?;
    }

    let mut body: Vec<u8> = Vec::new();
    let mut over_limit = false;
    {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| {
                if let Some(limit) = opts.max_body_bytes {
                    if (body.len() + data.len()) as u64 > limit {
                        over_limit = true;
                        return Ok(0); // abort transfer
                    }
                }
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(net)?;
        let performed = transfer.perform();
        drop(transfer);
        if let Err(e) = performed {
            if over_limit && e.is_write_error() {
                return Err(FetchError::BodyTooLarge {
                    url: url.to_string(),
                    limit: opts.max_body_bytes.unwrap_or_default(),
                });
            }
            return Err(net(e));
        }
    }

    let code = easy.response_code().map_err(net)?;
    if !status_ok(code) {
        return Err(FetchError::HttpStatus {
            url: url.to_string(),
            code,
        });
    }

    tracing::debug!("GET {} returned {} ({} bytes)", url, code, body.len());
    Ok(body)
}

/// 2xx, or 0 for transfers that carry no HTTP status (e.g. `file://`).
fn status_ok(code: u32) -> bool {
    code == 0 || (200..300).contains(&code)
}
