//! Turtle format implementation

use super::ntriples::{convert_object, convert_predicate, convert_subject, to_rio_triple};
use super::{ParseError, ParseResult, SerializeError, SerializeResult};
use crate::rdf::Triple;
use rio_api::formatter::TriplesFormatter;
use rio_api::parser::TriplesParser;
use rio_turtle::{TurtleFormatter, TurtleParser};
use std::io::{BufReader, Cursor};

/// Turtle parser
pub struct TurtleParserWrapper;

impl TurtleParserWrapper {
    /// Parse Turtle string to Triples
    pub fn parse(input: &str) -> ParseResult<Vec<Triple>> {
        let cursor = Cursor::new(input);
        let mut reader = BufReader::new(cursor);
        let mut parser = TurtleParser::new(&mut reader, None);

        let mut triples = Vec::new();

        parser.parse_all(&mut |t| -> Result<(), ParseError> {
            let subject = convert_subject(t.subject)?;
            let predicate = convert_predicate(t.predicate)?;
            let object = convert_object(t.object)?;
            triples.push(Triple::new(subject, predicate, object));
            Ok(())
        })?;

        Ok(triples)
    }
}

/// Turtle serializer
pub struct TurtleSerializerWrapper;

impl TurtleSerializerWrapper {
    /// Serialize Triples to Turtle string
    pub fn serialize(triples: &[Triple]) -> SerializeResult<String> {
        let mut output = Vec::new();
        let mut formatter = TurtleFormatter::new(&mut output);

        for triple in triples {
            formatter
                .format(&to_rio_triple(triple))
                .map_err(|e| SerializeError::Serialize(e.to_string()))?;
        }

        formatter
            .finish()
            .map_err(|e| SerializeError::Serialize(e.to_string()))?;

        String::from_utf8(output).map_err(|e| SerializeError::Serialize(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turtle_roundtrip() {
        let input = r#"<info:fedora/test:1> <http://purl.org/dc/terms/title> "c" ."#;
        let triples = TurtleParserWrapper::parse(input).unwrap();
        assert_eq!(triples.len(), 1);
        let output = TurtleSerializerWrapper::serialize(&triples).unwrap();
        assert!(output.contains("info:fedora/test:1"));
        assert_eq!(TurtleParserWrapper::parse(&output).unwrap(), triples);
    }

    #[test]
    fn test_turtle_prefixes() {
        let input = r#"@prefix dc: <http://purl.org/dc/terms/> .
<info:fedora/test:1> dc:title "A", "B" ."#;
        let triples = TurtleParserWrapper::parse(input).unwrap();
        assert_eq!(triples.len(), 2);
        assert_eq!(triples[1].object.lexical(), "B");
    }
}
