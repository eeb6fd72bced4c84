//! N-Triples format implementation

use super::{ParseError, ParseResult, SerializeError, SerializeResult};
use crate::rdf::types::xsd;
use crate::rdf::{BlankNode, Literal, NamedNode, RdfObject, RdfPredicate, RdfSubject, Triple};
use rio_api::formatter::TriplesFormatter;
use rio_api::model;
use rio_api::parser::TriplesParser;
use rio_turtle::{NTriplesFormatter, NTriplesParser};
use std::io::Cursor;

/// N-Triples parser
pub struct NTriplesParserWrapper;

impl NTriplesParserWrapper {
    /// Parse an N-Triples document into triples, preserving document order
    pub fn parse(input: &str) -> ParseResult<Vec<Triple>> {
        let mut parser = NTriplesParser::new(Cursor::new(input.as_bytes()));
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

/// N-Triples serializer
pub struct NTriplesSerializerWrapper;

impl NTriplesSerializerWrapper {
    /// One line per statement, terminated by ` .` and a newline
    pub fn serialize(triples: &[Triple]) -> SerializeResult<String> {
        let mut formatter = NTriplesFormatter::new(Vec::new());
        for triple in triples {
            formatter.format(&to_rio_triple(triple))?;
        }
        let output = formatter.finish()?;
        String::from_utf8(output).map_err(|e| SerializeError::Serialize(e.to_string()))
    }
}

/// Borrowed rio view of a triple, for the formatters
pub(super) fn to_rio_triple(triple: &Triple) -> model::Triple<'_> {
    let subject = match &triple.subject {
        RdfSubject::NamedNode(n) => model::Subject::NamedNode(model::NamedNode { iri: n.as_str() }),
        RdfSubject::BlankNode(b) => model::Subject::BlankNode(model::BlankNode { id: b.as_str() }),
    };
    let object = match &triple.object {
        RdfObject::NamedNode(n) => model::Term::NamedNode(model::NamedNode { iri: n.as_str() }),
        RdfObject::BlankNode(b) => model::Term::BlankNode(model::BlankNode { id: b.as_str() }),
        RdfObject::Literal(l) => model::Term::Literal(match l.language() {
            Some(language) => model::Literal::LanguageTaggedString {
                value: l.value(),
                language,
            },
            None if l.datatype() == xsd::STRING => model::Literal::Simple { value: l.value() },
            None => model::Literal::Typed {
                value: l.value(),
                datatype: model::NamedNode { iri: l.datatype() },
            },
        }),
    };
    model::Triple {
        subject,
        predicate: model::NamedNode {
            iri: triple.predicate.as_str(),
        },
        object,
    }
}

pub(super) fn convert_subject(s: rio_api::model::Subject) -> Result<RdfSubject, ParseError> {
    match s {
        rio_api::model::Subject::NamedNode(n) => Ok(RdfSubject::NamedNode(
            NamedNode::new(n.iri).map_err(|e| ParseError::Parse(e.to_string()))?,
        )),
        rio_api::model::Subject::BlankNode(b) => Ok(RdfSubject::BlankNode(
            BlankNode::new(b.id).map_err(|e| ParseError::Parse(e.to_string()))?,
        )),
        #[allow(unreachable_patterns)]
        _ => Err(ParseError::Parse("Unsupported subject type".to_string())),
    }
}

pub(super) fn convert_predicate(p: rio_api::model::NamedNode) -> Result<RdfPredicate, ParseError> {
    RdfPredicate::new(p.iri).map_err(|e| ParseError::Parse(e.to_string()))
}

pub(super) fn convert_object(o: rio_api::model::Term) -> Result<RdfObject, ParseError> {
    match o {
        rio_api::model::Term::NamedNode(n) => Ok(RdfObject::NamedNode(
            NamedNode::new(n.iri).map_err(|e| ParseError::Parse(e.to_string()))?,
        )),
        rio_api::model::Term::BlankNode(b) => Ok(RdfObject::BlankNode(
            BlankNode::new(b.id).map_err(|e| ParseError::Parse(e.to_string()))?,
        )),
        rio_api::model::Term::Literal(l) => match l {
            rio_api::model::Literal::Simple { value } => {
                Ok(RdfObject::Literal(Literal::new_simple_literal(value)))
            }
            rio_api::model::Literal::LanguageTaggedString { value, language } => Ok(RdfObject::Literal(
                Literal::new_language_tagged_literal(value, language)
                    .map_err(|e| ParseError::Parse(e.to_string()))?,
            )),
            rio_api::model::Literal::Typed { value, datatype } => {
                let dt = NamedNode::new(datatype.iri).map_err(|e| ParseError::Parse(e.to_string()))?;
                Ok(RdfObject::Literal(Literal::new_typed_literal(value, dt)))
            }
        },
        #[allow(unreachable_patterns)]
        _ => Err(ParseError::Parse("Unsupported object type".to_string())),
    }
}
