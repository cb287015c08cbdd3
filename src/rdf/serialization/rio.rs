//! Turtle, N-Triples and RDF/XML through the rio parsers and formatters

use super::{ParseError, ParseResult, SerializeResult};
use crate::literal::XSD_STRING;
use crate::rdf::{BlankNode, Literal, NamedNode, RdfObject, RdfPredicate, RdfSubject, Triple};
use oxiri::Iri;
use rio_api::formatter::TriplesFormatter;
use rio_api::model;
use rio_api::parser::TriplesParser;
use rio_turtle::{NTriplesFormatter, NTriplesParser, TurtleError, TurtleFormatter, TurtleParser};
use rio_xml::{RdfXmlError, RdfXmlFormatter, RdfXmlParser};
use std::io::{self, BufRead, Write};

impl From<TurtleError> for ParseError {
    fn from(e: TurtleError) -> Self {
        ParseError::Parse(e.to_string())
    }
}

impl From<RdfXmlError> for ParseError {
    fn from(e: RdfXmlError) -> Self {
        ParseError::Parse(e.to_string())
    }
}

pub(super) fn parse_turtle(reader: impl BufRead, base_iri: Option<&str>) -> ParseResult<Vec<Triple>> {
    collect(TurtleParser::new(reader, parse_base(base_iri)?))
}

pub(super) fn parse_ntriples(reader: impl BufRead) -> ParseResult<Vec<Triple>> {
    collect(NTriplesParser::new(reader))
}

pub(super) fn parse_rdfxml(reader: impl BufRead, base_iri: Option<&str>) -> ParseResult<Vec<Triple>> {
    collect(RdfXmlParser::new(reader, parse_base(base_iri)?))
}

pub(super) fn write_turtle<'a, W: Write>(
    writer: W,
    triples: impl IntoIterator<Item = &'a Triple>,
) -> SerializeResult<W> {
    let mut formatter = TurtleFormatter::new(writer);
    format_all(&mut formatter, triples)?;
    Ok(formatter.finish()?)
}

pub(super) fn write_ntriples<'a, W: Write>(
    writer: W,
    triples: impl IntoIterator<Item = &'a Triple>,
) -> SerializeResult<W> {
    let mut formatter = NTriplesFormatter::new(writer);
    format_all(&mut formatter, triples)?;
    Ok(formatter.finish()?)
}

pub(super) fn write_rdfxml<'a, W: Write>(
    writer: W,
    triples: impl IntoIterator<Item = &'a Triple>,
) -> SerializeResult<W> {
    let mut formatter = RdfXmlFormatter::with_indentation(writer, 2)?;
    format_all(&mut formatter, triples)?;
    Ok(formatter.finish()?)
}

fn parse_base(base_iri: Option<&str>) -> ParseResult<Option<Iri<String>>> {
    base_iri
        .map(|iri| {
            Iri::parse(iri.to_string())
                .map_err(|e| ParseError::InvalidBaseIri(format!("{iri}: {e}")))
        })
        .transpose()
}

fn collect<P>(mut parser: P) -> ParseResult<Vec<Triple>>
where
    P: TriplesParser,
    ParseError: From<P::Error>,
{
    let mut triples = Vec::new();
    parser.parse_all(&mut |t| -> ParseResult<()> {
        triples.push(from_rio(t)?);
        Ok(())
    })?;
    Ok(triples)
}

fn format_all<'a, F>(formatter: &mut F, triples: impl IntoIterator<Item = &'a Triple>) -> io::Result<()>
where
    F: TriplesFormatter<Error = io::Error>,
{
    for triple in triples {
        formatter.format(&to_rio(triple))?;
    }
    Ok(())
}

fn to_rio(triple: &Triple) -> model::Triple<'_> {
    let subject = match &triple.subject {
        RdfSubject::NamedNode(n) => model::Subject::NamedNode(model::NamedNode { iri: n.as_str() }),
        RdfSubject::BlankNode(b) => model::Subject::BlankNode(model::BlankNode { id: b.as_str() }),
    };

    let object = match &triple.object {
        RdfObject::NamedNode(n) => model::Term::NamedNode(model::NamedNode { iri: n.as_str() }),
        RdfObject::BlankNode(b) => model::Term::BlankNode(model::BlankNode { id: b.as_str() }),
        RdfObject::Literal(l) => model::Term::Literal(literal_to_rio(l)),
    };

    model::Triple {
        subject,
        predicate: model::NamedNode {
            iri: triple.predicate.as_str(),
        },
        object,
    }
}

fn literal_to_rio(literal: &Literal) -> model::Literal<'_> {
    if let Some(language) = literal.language() {
        return model::Literal::LanguageTaggedString {
            value: literal.value(),
            language,
        };
    }
    match literal.datatype_iri() {
        XSD_STRING => model::Literal::Simple {
            value: literal.value(),
        },
        iri => model::Literal::Typed {
            value: literal.value(),
            datatype: model::NamedNode { iri },
        },
    }
}

fn from_rio(t: model::Triple<'_>) -> ParseResult<Triple> {
    Ok(Triple::new(
        convert_subject(t.subject)?,
        convert_predicate(t.predicate)?,
        convert_object(t.object)?,
    ))
}

fn named(iri: &str) -> ParseResult<NamedNode> {
    NamedNode::new(iri).map_err(|e| ParseError::Parse(e.to_string()))
}

fn blank(id: &str) -> ParseResult<BlankNode> {
    BlankNode::with_id(id).map_err(|e| ParseError::Parse(e.to_string()))
}

fn convert_subject(s: model::Subject<'_>) -> ParseResult<RdfSubject> {
    match s {
        model::Subject::NamedNode(n) => Ok(named(n.iri)?.into()),
        model::Subject::BlankNode(b) => Ok(blank(b.id)?.into()),
        _ => Err(ParseError::Parse("RDF-star subjects are not supported".to_string())),
    }
}

fn convert_predicate(p: model::NamedNode<'_>) -> ParseResult<RdfPredicate> {
    Ok(named(p.iri)?.into())
}

fn convert_object(o: model::Term<'_>) -> ParseResult<RdfObject> {
    match o {
        model::Term::NamedNode(n) => Ok(named(n.iri)?.into()),
        model::Term::BlankNode(b) => Ok(blank(b.id)?.into()),
        model::Term::Literal(model::Literal::Simple { value }) => {
            Ok(Literal::new_simple_literal(value).into())
        }
        model::Term::Literal(model::Literal::LanguageTaggedString { value, language }) => {
            Literal::new_language_tagged_literal(value, language)
                .map(RdfObject::from)
                .map_err(|e| ParseError::Parse(e.to_string()))
        }
        model::Term::Literal(model::Literal::Typed { value, datatype }) => {
            Ok(Literal::new_typed_literal(value, named(datatype.iri)?).into())
        }
        _ => Err(ParseError::Parse("RDF-star objects are not supported".to_string())),
    }
}
