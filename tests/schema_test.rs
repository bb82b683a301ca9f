use fieldbit::inventory;
use fieldbit::metadata::{export_provider, export_providers, normalize_connection_string, should_reopen};
use fieldbit::{ColumnSchema, MetadataProvider, ProviderInfo, SchemaBuffer, SchemaDocument, SchemaError, TableNode, TableSchema};
use std::path::PathBuf;

const MEMORY_PROVIDER_GUID: &str = "f2a3c55e-8f24-4f07-9b2d-6a1f2f9e6c01";

/// Provider over a canned catalog, standing in for a real database adapter.
#[derive(Default)]
struct MemoryProvider {
    connection: Option<String>,
}

impl MemoryProvider {
    fn require_open(&self) -> Result<(), SchemaError> {
        if self.connection.is_none() {
            return Err(SchemaError::Connection("provider is not open".to_string()));
        }
        Ok(())
    }
}

impl MetadataProvider for MemoryProvider {
    fn version(&self) -> &str {
        "1.0"
    }

    fn explain(&self) -> &str {
        "in-memory catalog for tests"
    }

    fn database_name(&self) -> String {
        "memory".to_string()
    }

    fn open(&mut self, connection_string: &str) -> Result<(), SchemaError> {
        let normalized = normalize_connection_string(connection_string)?;
        if should_reopen(self.connection.as_deref(), &normalized) {
            self.close()?;
            self.connection = Some(normalized);
        }
        Ok(())
    }

    fn close(&mut self) -> Result<(), SchemaError> {
        self.connection = None;
        Ok(())
    }

    fn table_schemas(&mut self) -> Result<Vec<TableSchema>, SchemaError> {
        self.require_open()?;
        Ok(vec![TableSchema { name: "user".to_string(), explain: Some("application users".to_string()) }])
    }

    fn column_schemas(&mut self, table: &str) -> Result<Vec<ColumnSchema>, SchemaError> {
        self.require_open()?;
        if table != "user" {
            return Err(SchemaError::NotFound(format!("table {table} does not exist")));
        }
        Ok(vec![
            ColumnSchema {
                name: "id".to_string(),
                table: table.to_string(),
                type_name: "int".to_string(),
                length: None,
                primary_key: true,
                nullable: false,
                explain: None,
            },
            ColumnSchema {
                name: "email".to_string(),
                table: table.to_string(),
                type_name: "varchar".to_string(),
                length: Some("255".to_string()),
                primary_key: false,
                nullable: true,
                explain: Some("login address".to_string()),
            },
        ])
    }
}

fn make_memory_provider() -> Box<dyn MetadataProvider> {
    Box::new(MemoryProvider::default())
}

inventory::submit! {
    ProviderInfo { guid: MEMORY_PROVIDER_GUID, name: "memory", make: make_memory_provider }
}

fn temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join("fieldbit").join(format!("test_{}", rand::random::<u64>()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn it_should_export_a_registered_provider_by_guid() {
    let mut provider = export_provider(MEMORY_PROVIDER_GUID).expect("provider not registered");
    assert_eq!(provider.database_name(), "memory");
    provider.open("server=memory;").unwrap();
    let tables = provider.table_schemas().unwrap();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].name, "user");
}

#[test]
fn it_should_match_guids_case_insensitively() {
    assert!(export_provider(&MEMORY_PROVIDER_GUID.to_uppercase()).is_ok());
}

#[test]
fn it_should_refuse_blank_or_unknown_guids() {
    assert!(matches!(export_provider("   "), Err(SchemaError::InvalidArgument(_))));
    assert!(matches!(export_provider("00000000-0000-0000-0000-000000000000"), Err(SchemaError::NotFound(_))));
}

#[test]
fn it_should_list_all_registered_providers() {
    let providers = export_providers();
    assert!(providers.iter().any(|p| p.database_name() == "memory"));
}

#[test]
fn it_should_tag_columns_with_their_table() {
    let mut provider = export_provider(MEMORY_PROVIDER_GUID).unwrap();
    provider.open("server=memory;").unwrap();
    let columns = provider.column_schemas("user").unwrap();
    assert!(!columns.is_empty());
    assert!(columns.iter().all(|c| c.table == "user"));
}

#[test]
fn it_should_refuse_metadata_queries_before_open() {
    let mut provider = export_provider(MEMORY_PROVIDER_GUID).unwrap();
    assert!(matches!(provider.table_schemas(), Err(SchemaError::Connection(_))));
}

#[test]
fn it_should_reject_blank_connection_strings() {
    let mut provider = export_provider(MEMORY_PROVIDER_GUID).unwrap();
    assert!(matches!(provider.open("  "), Err(SchemaError::InvalidArgument(_))));
}

#[test]
fn it_should_persist_extracted_metadata_and_load_it_back() {
    let mut provider = export_provider(MEMORY_PROVIDER_GUID).unwrap();
    provider.open("server=memory;").unwrap();

    let tables = provider.table_schemas().unwrap();
    let doc = SchemaDocument {
        name: provider.database_name(),
        tables: tables
            .iter()
            .map(|t| {
                Ok(TableNode {
                    name: t.name.clone(),
                    explain: t.explain.clone(),
                    columns: provider.column_schemas(&t.name)?,
                })
            })
            .collect::<Result<Vec<_>, SchemaError>>()
            .unwrap(),
    };
    provider.close().unwrap();

    let dir = temp_dir();
    let files = SchemaBuffer::save(&dir, std::slice::from_ref(&doc)).unwrap();
    let buffer = SchemaBuffer::load(&files).unwrap();

    assert_eq!(buffer.documents(), &[doc]);
    let email = buffer.column_schema("email", Some("user"), Some("memory")).unwrap();
    assert_eq!(email.type_name, "varchar");
    assert_eq!(email.table, "user");
    assert!(!email.primary_key);
    assert!(buffer.column_schema("id", None, None).unwrap().primary_key);
}
