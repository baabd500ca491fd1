use actix_web::{http::header::HeaderMap, HttpRequest};

use crate::constants::UNKNOWN_CLIENT;

/// Identify the client for rate limiting.
/// Order: first entry of X-Forwarded-For, then X-Real-IP, then the shared
/// `unknown` bucket. Blank or non-ASCII header values are skipped.
pub fn get_client_ip(req: &HttpRequest) -> String {
    client_id_from_headers(req.headers())
}

pub fn client_id_from_headers(headers: &HeaderMap) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let real_ip = || {
        headers
            .get("x-real-ip")
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    };

    forwarded
        .or_else(real_ip)
        .unwrap_or(UNKNOWN_CLIENT)
        .to_string()
}
