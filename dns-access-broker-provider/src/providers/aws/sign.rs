//! AWS Signature Version 4
//!
//! Reference: <https://docs.aws.amazon.com/IAM/latest/UserGuide/create-signed-request.html>

use std::fmt::Write;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::providers::common::hmac_sha256;
use crate::types::AwsCredentials;
use crate::utils::datetime::{amz_date, scope_date};
use crate::utils::log_sanitizer::truncate_for_log;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Region + service a request is signed for.
pub(crate) struct SigningScope<'a> {
    pub region: &'a str,
    pub service: &'a str,
}

/// The parts of an HTTP request covered by the signature.
///
/// `headers` must already contain `host`, `x-amz-date` and, for temporary
/// credentials, `x-amz-security-token`.
pub(crate) struct SigningRequest<'a> {
    pub method: &'a str,
    pub path: &'a str,
    pub query: &'a [(String, String)],
    pub headers: &'a [(String, String)],
    pub payload: &'a str,
}

/// Percent-encode per SigV4 rules (RFC 3986 unreserved characters pass through).
pub(crate) fn uri_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Canonical URI: each path segment encoded, separators preserved.
pub(crate) fn canonical_uri(path: &str) -> String {
    if path.is_empty() || path == "/" {
        return "/".to_string();
    }
    path.split('/')
        .map(uri_encode)
        .collect::<Vec<_>>()
        .join("/")
}

/// Canonical query string: encoded pairs sorted by key, then value.
pub(crate) fn canonical_query(query: &[(String, String)]) -> String {
    let mut pairs: Vec<(String, String)> = query
        .iter()
        .map(|(k, v)| (uri_encode(k), uri_encode(v)))
        .collect();
    pairs.sort_unstable();
    pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Returns `(canonical_headers, signed_headers)`.
fn canonical_headers(headers: &[(String, String)]) -> (String, String) {
    let mut normalized: Vec<(String, String)> = headers
        .iter()
        .map(|(k, v)| {
            let value = v.split_whitespace().collect::<Vec<_>>().join(" ");
            (k.to_lowercase(), value)
        })
        .collect();
    normalized.sort_by(|a, b| a.0.cmp(&b.0));

    let canonical = normalized.iter().fold(String::new(), |mut acc, (k, v)| {
        let _ = writeln!(acc, "{k}:{v}");
        acc
    });
    let signed = normalized
        .iter()
        .map(|(k, _)| k.as_str())
        .collect::<Vec<_>>()
        .join(";");

    (canonical, signed)
}

/// Build the canonical request and return it together with the signed header list.
pub(crate) fn canonical_request(request: &SigningRequest<'_>) -> (String, String) {
    let (headers, signed_headers) = canonical_headers(request.headers);
    let hashed_payload = hex::encode(Sha256::digest(request.payload.as_bytes()));
    let canonical = format!(
        "{}\n{}\n{}\n{}\n{}\n{}",
        request.method,
        canonical_uri(request.path),
        canonical_query(request.query),
        headers,
        signed_headers,
        hashed_payload
    );
    (canonical, signed_headers)
}

/// Derive the signing key: `HMAC(HMAC(HMAC(HMAC("AWS4" + secret, date), region), service), "aws4_request")`.
pub(crate) fn signing_key(secret: &str, date: &str, scope: &SigningScope<'_>) -> Vec<u8> {
    let k_date = hmac_sha256(format!("AWS4{secret}").as_bytes(), date.as_bytes());
    let k_region = hmac_sha256(&k_date, scope.region.as_bytes());
    let k_service = hmac_sha256(&k_region, scope.service.as_bytes());
    hmac_sha256(&k_service, b"aws4_request")
}

/// Compute the `Authorization` header value for `request`.
pub(crate) fn sign(
    credentials: &AwsCredentials,
    scope: &SigningScope<'_>,
    request: &SigningRequest<'_>,
    now: DateTime<Utc>,
) -> String {
    let timestamp = amz_date(now);
    let date = scope_date(now);

    // 1. Canonical request
    let (canonical, signed_headers) = canonical_request(request);
    log::debug!("CanonicalRequest:\n{}", truncate_for_log(&canonical));

    // 2. String to sign
    let credential_scope = format!("{date}/{}/{}/aws4_request", scope.region, scope.service);
    let hashed_canonical = hex::encode(Sha256::digest(canonical.as_bytes()));
    let string_to_sign = format!("{ALGORITHM}\n{timestamp}\n{credential_scope}\n{hashed_canonical}");
    log::debug!("StringToSign:\n{string_to_sign}");

    // 3. Signature
    let key = signing_key(&credentials.secret_access_key, &date, scope);
    let signature = hex::encode(hmac_sha256(&key, string_to_sign.as_bytes()));

    format!(
        "{ALGORITHM} Credential={}/{credential_scope}, SignedHeaders={signed_headers}, Signature={signature}",
        credentials.access_key_id
    )
}
