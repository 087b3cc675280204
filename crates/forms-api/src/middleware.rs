//! Request plumbing: CORS and the identity set by the upstream auth proxy.
use axum::{extract::FromRequestParts, http::request::Parts, http::HeaderMap};
use forms_core::{Identity, Role};
use std::convert::Infallible;
use tower_http::cors::CorsLayer;

pub const SUBMITTER_ID_HEADER: &str = "x-submitter-id";
pub const SUBMITTER_ROLE_HEADER: &str = "x-submitter-role";

pub fn cors() -> CorsLayer {
    CorsLayer::permissive()
}

/// Read the resolved identity from request headers. A missing or blank id
/// is anonymous; any role other than `admin` is a member.
pub fn identity_from_headers(headers: &HeaderMap) -> Identity {
    let submitter_id = headers
        .get(SUBMITTER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string);

    let role = match headers.get(SUBMITTER_ROLE_HEADER).and_then(|v| v.to_str().ok()) {
        Some(role) if role.trim().eq_ignore_ascii_case("admin") => Role::Admin,
        _ => Role::Member,
    };

    Identity { submitter_id, role }
}

/// Extractor for the caller's identity
pub struct Submitter(pub Identity);

impl<S> FromRequestParts<S> for Submitter
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Submitter(identity_from_headers(&parts.headers)))
    }
}
