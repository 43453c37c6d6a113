//! Per-client message quota carried in a cookie.
//!
//! The counter lives entirely on the client: the gateway reads it from the
//! `Cookie` header, admits the request while `count < limit`, and hands back
//! `count + 1` in `Set-Cookie` after a successful completion. The cookie
//! expires after an hour, which is what resets the quota window. Clearing
//! cookies also resets it; this is a cost guard for a demo, not access control.

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use regex_lite::Regex;
use std::sync::LazyLock;
use tracing::warn;

pub const COOKIE_NAME: &str = "dawn_count";

/// Lifetime of the quota cookie, in seconds.
pub const WINDOW_SECS: u32 = 3600;

static COUNT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"dawn_count=(\d+)").expect("quota cookie pattern is valid")
});

/// Extract the counter from a `Cookie` header value.
///
/// Absent or non-numeric values count as 0. A digit run too large for `u32`
/// saturates, so it can never be used to sneak back under the limit.
pub fn read_count(cookie_header: &str) -> u32 {
    COUNT_PATTERN
        .captures(cookie_header)
        .and_then(|caps| caps.get(1))
        .map(|digits| digits.as_str().parse().unwrap_or(u32::MAX))
        .unwrap_or(0)
}

pub fn is_admitted(count: u32, limit: u32) -> bool {
    count < limit
}

/// `Set-Cookie` value recording one more message.
pub fn next_cookie(count: u32) -> String {
    format!(
        "{COOKIE_NAME}={}; Max-Age={WINDOW_SECS}; Path=/; SameSite=Lax",
        count.saturating_add(1)
    )
}

/// Where the quota counter is read from and written back to.
///
/// The gateway only talks to this trait, so the cookie can be swapped for a
/// server-side keyed store without touching the request handler.
pub trait QuotaStore: Send + Sync {
    /// Messages already used by the client behind `request`.
    fn read_count(&self, request: &HeaderMap) -> u32;

    /// Record one more message on top of `count`.
    fn commit(&self, count: u32, response: &mut HeaderMap);
}

/// Quota kept in the `dawn_count` cookie.
#[derive(Debug, Clone, Copy, Default)]
pub struct CookieQuota;

impl QuotaStore for CookieQuota {
    fn read_count(&self, request: &HeaderMap) -> u32 {
        let cookies = request
            .get_all(COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect::<Vec<_>>()
            .join("; ");
        read_count(&cookies)
    }

    fn commit(&self, count: u32, response: &mut HeaderMap) {
        match HeaderValue::from_str(&next_cookie(count)) {
            Ok(value) => {
                response.append(SET_COOKIE, value);
            }
            Err(e) => warn!(error = %e, "Could not encode quota cookie"),
        }
    }
}
