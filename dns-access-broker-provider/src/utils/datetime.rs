//! 时间工具
//!
//! - SigV4 时间戳格式化（`20150830T123600Z` / `20150830`）
//! - STS `Expiration` 字段解析（RFC3339，带或不带毫秒）

use chrono::{DateTime, Utc};

/// SigV4 `X-Amz-Date` 格式
pub fn amz_date(now: DateTime<Utc>) -> String {
    now.format("%Y%m%dT%H%M%SZ").to_string()
}

/// SigV4 credential scope 中的日期部分
pub fn scope_date(now: DateTime<Utc>) -> String {
    now.format("%Y%m%d").to_string()
}

/// 解析 STS 返回的过期时间（如 `2011-07-15T23:28:33.359Z`）
pub fn parse_expiration(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}
