/// Request extractors shared by the tenant-scoped routes

use crate::api::{error::ApiError, AppState};
use crate::contact::{types::client_ip, ClientMeta};
use crate::tenant::TenantKey;
use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{header::USER_AGENT, request::Parts},
};
use std::convert::Infallible;
use std::net::SocketAddr;

/// Resolves the tenant before the handler body runs, so a missing key never
/// reaches the database
impl FromRequestParts<AppState> for TenantKey {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        state.resolver.resolve(&parts.headers).ok_or_else(|| {
            tracing::debug!("🚫 Request without tenant header: {} {}", parts.method, parts.uri.path());
            ApiError::TenantMissing {
                header: state.resolver.header_name().to_string(),
            }
        })
    }
}

fn header_str<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|v| v.to_str().ok())
}

impl<S> FromRequestParts<S> for ClientMeta
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        Ok(ClientMeta {
            user_agent: header_str(parts, USER_AGENT.as_str()).map(str::to_string),
            ip: client_ip(header_str(parts, "x-forwarded-for"), peer),
        })
    }
}
