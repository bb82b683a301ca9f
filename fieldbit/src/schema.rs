use crate::error::SchemaError;
use crate::metadata::{ColumnSchema, TableSchema};
use crate::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk schema description, one XML document per data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "schema")]
pub struct SchemaDocument {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "table", default)]
    pub tables: Vec<TableNode>,
}

/// A table with its columns as persisted inside a schema document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableNode {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@explain", skip_serializing_if = "Option::is_none", default)]
    pub explain: Option<String>,
    #[serde(rename = "column", default)]
    pub columns: Vec<ColumnSchema>,
}

impl TableNode {
    pub fn table_schema(&self) -> TableSchema {
        TableSchema { name: self.name.clone(), explain: self.explain.clone() }
    }
}

/// Holds loaded schema documents in memory and answers column lookups over them.
pub struct SchemaBuffer {
    docs: Vec<SchemaDocument>,
}

impl SchemaBuffer {
    /// Reads the given XML files into memory. A missing file is skipped with a
    /// warning instead of aborting the load, the remaining files still contribute.
    pub fn load<P: AsRef<Path>>(files: &[P]) -> Result<Self, SchemaError> {
        let mut docs = Vec::with_capacity(files.len());
        for file in files {
            let path = file.as_ref();
            if !path.exists() {
                warn!("schema file {} does not exist, skipping", path.display());
                continue;
            }
            let text = fs::read_to_string(path)?;
            docs.push(quick_xml::de::from_str::<SchemaDocument>(&text)?);
        }
        Ok(SchemaBuffer { docs })
    }

    pub fn documents(&self) -> &[SchemaDocument] {
        &self.docs
    }

    /// Returns the first column matching the filters; when the optional table or
    /// document filters are absent, the first hit across everything loaded wins.
    pub fn column_schema(&self, column: &str, table: Option<&str>, document: Option<&str>) -> Option<&ColumnSchema> {
        self.docs
            .iter()
            .filter(|doc| document.is_none_or(|name| doc.name == name))
            .flat_map(|doc| &doc.tables)
            .filter(|node| table.is_none_or(|name| node.name == name))
            .flat_map(|node| &node.columns)
            .find(|col| col.name == column)
    }

    /// Writes one `{name}.xml` per document into the directory, truncating whatever
    /// was there before. Returns the written paths.
    pub fn save(dir: &Path, docs: &[SchemaDocument]) -> Result<Vec<PathBuf>, SchemaError> {
        fs::create_dir_all(dir)?;
        let mut written = Vec::with_capacity(docs.len());
        for doc in docs {
            let path = dir.join(format!("{}.xml", doc.name));
            let xml = quick_xml::se::to_string(doc)?;
            fs::write(&path, xml)?;
            info!("saved schema document {} ({} tables)", path.display(), doc.tables.len());
            written.push(path);
        }
        Ok(written)
    }
}
