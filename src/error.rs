//! Error types for reading an XML documentation export.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or parsing the documentation file.
#[derive(Error, Debug)]
pub enum DocError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("XML parsing error at byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("invalid attribute: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    #[error("malformed XML document: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, DocError>;
