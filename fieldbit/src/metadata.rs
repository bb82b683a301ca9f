use crate::error::SchemaError;
use serde::{Deserialize, Serialize};

/// One table as reported by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@explain", skip_serializing_if = "Option::is_none", default)]
    pub explain: Option<String>,
}

/// One column as reported by a provider. The serde renames make it serialize as XML
/// attributes inside a schema document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@table")]
    pub table: String,
    #[serde(rename = "@type")]
    pub type_name: String,
    #[serde(rename = "@length", skip_serializing_if = "Option::is_none", default)]
    pub length: Option<String>,
    #[serde(rename = "@primary_key", default)]
    pub primary_key: bool,
    #[serde(rename = "@nullable", default)]
    pub nullable: bool,
    #[serde(rename = "@explain", skip_serializing_if = "Option::is_none", default)]
    pub explain: Option<String>,
}

/// Extracts table/column metadata out of an opened data source. Implementations are
/// per database product and typically registered as plugins via [`ProviderInfo`].
///
/// The accessor core has no dependency on this subsystem.
pub trait MetadataProvider: Send {
    fn version(&self) -> &str;
    fn explain(&self) -> &str;
    fn database_name(&self) -> String;

    /// Opens the data source. Blank connection strings are rejected; reopening with a
    /// different string closes the current connection first, reopening with the same
    /// string (case-insensitive) is a no-op.
    fn open(&mut self, connection_string: &str) -> Result<(), SchemaError>;

    /// Idempotent; closing a never-opened provider is not an error.
    fn close(&mut self) -> Result<(), SchemaError>;

    fn table_schemas(&mut self) -> Result<Vec<TableSchema>, SchemaError>;
    fn column_schemas(&mut self, table: &str) -> Result<Vec<ColumnSchema>, SchemaError>;
}

/// Trims the connection string and rejects blank input, shared by implementations.
pub fn normalize_connection_string(raw: &str) -> Result<String, SchemaError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SchemaError::InvalidArgument("connection string must not be empty".into()));
    }
    Ok(trimmed.to_string())
}

/// Whether an open provider must cycle its connection for the requested string.
pub fn should_reopen(current: Option<&str>, requested: &str) -> bool {
    !current.is_some_and(|c| c.eq_ignore_ascii_case(requested))
}

/// Link-time registration of a provider implementation under its guid tag, taking the
/// place of scanning a plugin directory for adapter assemblies.
pub struct ProviderInfo {
    pub guid: &'static str,
    pub name: &'static str,
    pub make: fn() -> Box<dyn MetadataProvider>,
}

inventory::collect!(ProviderInfo);

/// Instantiates the provider registered under the guid tag, case-insensitive.
pub fn export_provider(guid: &str) -> Result<Box<dyn MetadataProvider>, SchemaError> {
    let guid = guid.trim();
    if guid.is_empty() {
        return Err(SchemaError::InvalidArgument("provider guid must not be empty".into()));
    }
    inventory::iter::<ProviderInfo>
        .into_iter()
        .find(|info| info.guid.eq_ignore_ascii_case(guid))
        .map(|info| (info.make)())
        .ok_or_else(|| SchemaError::NotFound(format!("no metadata provider registered under guid {guid}")))
}

/// Instantiates every registered provider.
pub fn export_providers() -> Vec<Box<dyn MetadataProvider>> {
    inventory::iter::<ProviderInfo>.into_iter().map(|info| (info.make)()).collect()
}
