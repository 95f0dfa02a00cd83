/// Safe schema identifiers derived from client keys
///
/// Client keys are arbitrary strings. They are folded to `[a-z0-9_]` before they
/// ever reach SQL text, and quoted on top of that when interpolated.

use crate::tenant::resolver::TenantKey;
use serde::Serialize;
use std::fmt;

/// Prefix applied to every tenant schema
pub const TENANT_SCHEMA_PREFIX: &str = "c_";

/// Shared fallback schema, always last on the search path
pub const PUBLIC_SCHEMA: &str = "public";

/// Lowercase `raw` and replace every character outside `[a-z0-9_]` with `_`
///
/// Returns `None` when nothing is left, never an empty identifier.
pub fn normalize(raw: &str) -> Option<String> {
    let safe: String = raw
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '_' => c,
            _ => '_',
        })
        .collect();

    if safe.trim().is_empty() {
        None
    } else {
        Some(safe)
    }
}

/// Wrap an identifier in double quotes, doubling embedded quotes
///
/// Not a validator: anything derived from request input must go through
/// [`normalize`] first.
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// A schema name that has passed through [`normalize`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SchemaName(String);

impl SchemaName {
    /// Schema owning a tenant's tables: `c_` + normalized key
    ///
    /// Distinct keys can collide here ("Site A" and "site_a"); no detection is done.
    pub fn for_tenant(key: &TenantKey) -> Self {
        let safe = normalize(key.as_str()).unwrap_or_default();
        Self(format!("{}{}", TENANT_SCHEMA_PREFIX, safe))
    }

    /// Normalize an operator-supplied schema name
    pub fn parse(raw: &str) -> Option<Self> {
        normalize(raw.trim()).map(Self)
    }

    pub fn public() -> Self {
        Self(PUBLIC_SCHEMA.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Double-quoted form for interpolation into DDL
    pub fn quoted(&self) -> String {
        quote_ident(&self.0)
    }
}

impl fmt::Display for SchemaName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse a comma-separated schema list, dropping blank and invalid entries
pub fn parse_schema_list(raw: &str) -> Vec<SchemaName> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(SchemaName::parse)
        .collect()
}

/// Ordered schema list pinned for one transaction
///
/// Always `[tenant, extras.., public]` with later duplicates removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchPath(Vec<SchemaName>);

impl SearchPath {
    pub fn compose(tenant: &SchemaName, extras: &[SchemaName]) -> Self {
        let mut schemas: Vec<SchemaName> = Vec::with_capacity(extras.len() + 2);
        let candidates = std::iter::once(tenant)
            .chain(extras.iter())
            .cloned()
            .chain(std::iter::once(SchemaName::public()));

        for schema in candidates {
            if !schemas.contains(&schema) {
                schemas.push(schema);
            }
        }

        Self(schemas)
    }

    pub fn schemas(&self) -> &[SchemaName] {
        &self.0
    }

    pub fn tenant(&self) -> &SchemaName {
        &self.0[0]
    }

    /// Value for `search_path`: quoted names joined by ", "
    pub fn to_setting(&self) -> String {
        self.0
            .iter()
            .map(SchemaName::quoted)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(path: &SearchPath) -> Vec<&str> {
        path.schemas().iter().map(SchemaName::as_str).collect()
    }

    #[test]
    fn normalize_folds_case_and_replaces_unsafe_characters() {
        assert_eq!(normalize("Site A!").as_deref(), Some("site_a_"));
        assert_eq!(normalize("acme-shop.com").as_deref(), Some("acme_shop_com"));
        assert_eq!(normalize("x\"; DROP SCHEMA public; --").as_deref(), Some("x___drop_schema_public____"));
        assert_eq!(normalize("café").as_deref(), Some("caf_"));
    }

    #[test]
    fn normalize_treats_empty_input_as_absent() {
        assert_eq!(normalize(""), None);
        // Whitespace is replaced, so it survives as underscores
        assert_eq!(normalize("  ").as_deref(), Some("__"));
    }

    #[test]
    fn clean_keys_never_collide() {
        let keys = ["site_a", "site_b", "site_a_", "a", "0", "_", "abc123", "abc_123"];
        for (i, k1) in keys.iter().enumerate() {
            for k2 in keys.iter().skip(i + 1) {
                assert_ne!(normalize(k1), normalize(k2), "{} vs {}", k1, k2);
            }
            assert_eq!(normalize(k1).as_deref(), Some(*k1));
        }
    }

    #[test]
    fn normalize_is_idempotent_on_dirty_input() {
        for raw in ["Site A!", "ÀÉÎ", "a-b-c", "x\"y", "tab\there", "UPPER_lower-09"] {
            let once = normalize(raw).expect("non-empty input");
            assert_eq!(normalize(&once).as_deref(), Some(once.as_str()));
        }
    }

    #[test]
    fn quote_ident_doubles_embedded_quotes() {
        assert_eq!(quote_ident("c_site"), "\"c_site\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn tenant_schema_is_prefixed() {
        let key = TenantKey::new("Site A!").expect("key");
        assert_eq!(SchemaName::for_tenant(&key).as_str(), "c_site_a_");
    }

    #[test]
    fn keys_that_normalize_alike_share_a_schema() {
        let spaced = TenantKey::new("Site A").expect("key");
        let snake = TenantKey::new("site_a").expect("key");
        assert_eq!(SchemaName::for_tenant(&spaced), SchemaName::for_tenant(&snake));
    }

    #[test]
    fn schema_list_drops_blank_entries() {
        let parsed = parse_schema_list(" shared, ,Other-Schema,,");
        let parsed: Vec<&str> = parsed.iter().map(SchemaName::as_str).collect();
        assert_eq!(parsed, vec!["shared", "other_schema"]);
        assert!(parse_schema_list("").is_empty());
    }

    #[test]
    fn search_path_collapses_duplicates_in_order() {
        let key = TenantKey::new("Site A!").expect("key");
        let tenant = SchemaName::for_tenant(&key);
        let extras = parse_schema_list("shared, shared, other");

        let path = SearchPath::compose(&tenant, &extras);

        assert_eq!(names(&path), vec!["c_site_a_", "shared", "other", "public"]);
        assert_eq!(path.to_setting(), "\"c_site_a_\", \"shared\", \"other\", \"public\"");
    }

    #[test]
    fn search_path_keeps_first_public_occurrence() {
        let key = TenantKey::new("acme").expect("key");
        let tenant = SchemaName::for_tenant(&key);
        let extras = parse_schema_list("public,shared");

        let path = SearchPath::compose(&tenant, &extras);

        assert_eq!(names(&path), vec!["c_acme", "public", "shared"]);
        assert_eq!(path.tenant().as_str(), "c_acme");
    }
}
