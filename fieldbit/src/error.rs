use thiserror::Error;

/// Failures of the accessor core. Compilation failures are never cached, the next
/// access retries from scratch.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessorError {
    #[error("member '{member}' not found on {owner}")]
    MemberNotFound { owner: &'static str, member: String },

    #[error("type mismatch for {owner}.{member}: field is {expected}, requested {requested}")]
    TypeMismatch { owner: &'static str, member: String, expected: &'static str, requested: String },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Failures of the metadata/schema glue.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("xml read error: {0}")]
    XmlRead(#[from] quick_xml::DeError),

    #[error("xml write error: {0}")]
    XmlWrite(#[from] quick_xml::SeError),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("connection error: {0}")]
    Connection(String),
}
