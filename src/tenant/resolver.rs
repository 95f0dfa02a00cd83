/// Tenant key resolution from inbound request headers

use anyhow::Result;
use axum::http::{HeaderMap, HeaderName};
use std::fmt;

/// Opaque client key naming a tenant, trimmed and never empty
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TenantKey(String);

impl TenantKey {
    /// Trim `raw`; blank input is no key at all
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reads the tenant key from a configurable header
#[derive(Debug, Clone)]
pub struct TenantResolver {
    header: HeaderName,
    /// Header name as configured, for client-facing messages
    display_name: String,
}

impl TenantResolver {
    /// Parse the configured header name (case-insensitive)
    pub fn new(header_name: &str) -> Result<Self> {
        let trimmed = header_name.trim();
        let header = HeaderName::from_bytes(trimmed.to_ascii_lowercase().as_bytes())
            .map_err(|e| anyhow::anyhow!("Invalid tenant header name '{}': {}", header_name, e))?;
        Ok(Self {
            header,
            display_name: trimmed.to_string(),
        })
    }

    pub fn header_name(&self) -> &str {
        &self.display_name
    }

    pub fn header(&self) -> &HeaderName {
        &self.header
    }

    /// First occurrence of the header wins; blank or non-UTF-8 values resolve to `None`
    pub fn resolve(&self, headers: &HeaderMap) -> Option<TenantKey> {
        let value = headers.get(&self.header)?;
        let raw = std::str::from_utf8(value.as_bytes()).ok()?;
        TenantKey::new(raw)
    }
}
