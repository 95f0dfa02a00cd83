/// Tenant isolation layer
///
/// Maps a client key to its own Postgres schema and scopes every query to it:
/// - identifier: key normalization, identifier quoting, search path composition
/// - resolver: client key extraction from request headers
/// - executor: transaction wrapper that pins the search path

pub mod identifier;
pub mod resolver;
pub mod executor;

pub use executor::{TenantExecutor, TenantScope};
pub use identifier::{SchemaName, SearchPath};
pub use resolver::{TenantKey, TenantResolver};
