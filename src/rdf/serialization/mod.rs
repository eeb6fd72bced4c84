//! RDF serialization formats
//!
//! Supports:
//! - N-Triples (NT), the datastream content format
//! - Turtle (TTL)

mod ntriples;
mod turtle;

use super::Triple;
use thiserror::Error;

pub use ntriples::{NTriplesParserWrapper, NTriplesSerializerWrapper};
pub use turtle::{TurtleParserWrapper, TurtleSerializerWrapper};

/// RDF serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    /// N-Triples format (.nt)
    NTriples,
    /// Turtle format (.ttl)
    Turtle,
}

impl RdfFormat {
    /// MIME type of the format
    pub fn mime_type(&self) -> &'static str {
        match self {
            RdfFormat::NTriples => "application/n-triples",
            RdfFormat::Turtle => "text/turtle",
        }
    }
}

/// Parse errors
#[derive(Error, Debug)]
pub enum ParseError {
    /// Syntax error reported by the parser
    #[error("Syntax error: {0}")]
    Syntax(#[from] rio_turtle::TurtleError),

    /// Content is not valid UTF-8
    #[error("Content is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    /// Well-formed syntax carrying an invalid term
    #[error("Parse error: {0}")]
    Parse(String),
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Serialization errors
#[derive(Error, Debug)]
pub enum SerializeError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),
}

pub type SerializeResult<T> = Result<T, SerializeError>;

/// RDF parser
pub struct RdfParser;

impl RdfParser {
    /// Parse RDF data from a string; the whole input is rejected on the first error
    pub fn parse(input: &str, format: RdfFormat) -> ParseResult<Vec<Triple>> {
        match format {
            RdfFormat::NTriples => NTriplesParserWrapper::parse(input),
            RdfFormat::Turtle => TurtleParserWrapper::parse(input),
        }
    }

    /// Parse raw datastream bytes
    pub fn parse_bytes(input: &[u8], format: RdfFormat) -> ParseResult<Vec<Triple>> {
        let text = std::str::from_utf8(input)?;
        Self::parse(text, format)
    }
}

/// RDF serializer
pub struct RdfSerializer;

impl RdfSerializer {
    /// Serialize triples to a string, in the order given
    pub fn serialize(triples: &[Triple], format: RdfFormat) -> SerializeResult<String> {
        match format {
            RdfFormat::NTriples => NTriplesSerializerWrapper::serialize(triples),
            RdfFormat::Turtle => TurtleSerializerWrapper::serialize(triples),
        }
    }
}
