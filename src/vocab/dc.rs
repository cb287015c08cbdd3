//! Dublin Core Metadata Element Set, version 1.1

use crate::model::{ModelResult, Resource};
use chrono::{DateTime, Utc};

pub const NS: &str = "http://purl.org/dc/elements/1.1/";

pub const TITLE: &str = "http://purl.org/dc/elements/1.1/title";
pub const CREATOR: &str = "http://purl.org/dc/elements/1.1/creator";
pub const SUBJECT: &str = "http://purl.org/dc/elements/1.1/subject";
pub const DESCRIPTION: &str = "http://purl.org/dc/elements/1.1/description";
pub const PUBLISHER: &str = "http://purl.org/dc/elements/1.1/publisher";
pub const CONTRIBUTOR: &str = "http://purl.org/dc/elements/1.1/contributor";
pub const DATE: &str = "http://purl.org/dc/elements/1.1/date";
pub const TYPE: &str = "http://purl.org/dc/elements/1.1/type";
pub const FORMAT: &str = "http://purl.org/dc/elements/1.1/format";
pub const IDENTIFIER: &str = "http://purl.org/dc/elements/1.1/identifier";
pub const SOURCE: &str = "http://purl.org/dc/elements/1.1/source";
pub const LANGUAGE: &str = "http://purl.org/dc/elements/1.1/language";
pub const RELATION: &str = "http://purl.org/dc/elements/1.1/relation";
pub const COVERAGE: &str = "http://purl.org/dc/elements/1.1/coverage";
pub const RIGHTS: &str = "http://purl.org/dc/elements/1.1/rights";

/// Every element, in the order the standard lists them
pub const ELEMENTS: [&str; 15] = [
    TITLE,
    CREATOR,
    SUBJECT,
    DESCRIPTION,
    PUBLISHER,
    CONTRIBUTOR,
    DATE,
    TYPE,
    FORMAT,
    IDENTIFIER,
    SOURCE,
    LANGUAGE,
    RELATION,
    COVERAGE,
    RIGHTS,
];

/// Dublin Core view over any resource
///
/// Elements are plain strings, except `date`, which is kept as an
/// `xsd:dateTime`. Creator, subject, contributor and relation may repeat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DublinCore(Resource);

impl DublinCore {
    pub fn new(resource: Resource) -> Self {
        Self(resource)
    }

    pub fn as_resource(&self) -> &Resource {
        &self.0
    }

    fn text(&self, element: &str) -> ModelResult<Option<String>> {
        self.0.get(element)
    }

    fn set_text(&self, element: &str, value: Option<&str>) -> ModelResult<()> {
        self.0.set_optional(element, value.map(str::to_string).as_ref())
    }

    fn texts(&self, element: &str) -> ModelResult<Vec<String>> {
        self.0.get_all(element)
    }

    fn add_text(&self, element: &str, value: &str) -> ModelResult<bool> {
        self.0.add(element, &value.to_string())
    }

    pub fn title(&self) -> ModelResult<Option<String>> {
        self.text(TITLE)
    }

    pub fn set_title(&self, title: Option<&str>) -> ModelResult<()> {
        self.set_text(TITLE, title)
    }

    pub fn creators(&self) -> ModelResult<Vec<String>> {
        self.texts(CREATOR)
    }

    pub fn add_creator(&self, creator: &str) -> ModelResult<bool> {
        self.add_text(CREATOR, creator)
    }

    pub fn subjects(&self) -> ModelResult<Vec<String>> {
        self.texts(SUBJECT)
    }

    pub fn add_subject(&self, subject: &str) -> ModelResult<bool> {
        self.add_text(SUBJECT, subject)
    }

    pub fn description(&self) -> ModelResult<Option<String>> {
        self.text(DESCRIPTION)
    }

    pub fn set_description(&self, description: Option<&str>) -> ModelResult<()> {
        self.set_text(DESCRIPTION, description)
    }

    pub fn publisher(&self) -> ModelResult<Option<String>> {
        self.text(PUBLISHER)
    }

    pub fn set_publisher(&self, publisher: Option<&str>) -> ModelResult<()> {
        self.set_text(PUBLISHER, publisher)
    }

    pub fn contributors(&self) -> ModelResult<Vec<String>> {
        self.texts(CONTRIBUTOR)
    }

    pub fn add_contributor(&self, contributor: &str) -> ModelResult<bool> {
        self.add_text(CONTRIBUTOR, contributor)
    }

    pub fn date(&self) -> ModelResult<Option<DateTime<Utc>>> {
        self.0.get(DATE)
    }

    pub fn set_date(&self, date: Option<&DateTime<Utc>>) -> ModelResult<()> {
        self.0.set_optional(DATE, date)
    }

    pub fn dc_type(&self) -> ModelResult<Option<String>> {
        self.text(TYPE)
    }

    pub fn set_dc_type(&self, dc_type: Option<&str>) -> ModelResult<()> {
        self.set_text(TYPE, dc_type)
    }

    pub fn format(&self) -> ModelResult<Option<String>> {
        self.text(FORMAT)
    }

    pub fn set_format(&self, format: Option<&str>) -> ModelResult<()> {
        self.set_text(FORMAT, format)
    }

    pub fn identifier(&self) -> ModelResult<Option<String>> {
        self.text(IDENTIFIER)
    }

    pub fn set_identifier(&self, identifier: Option<&str>) -> ModelResult<()> {
        self.set_text(IDENTIFIER, identifier)
    }

    pub fn source(&self) -> ModelResult<Option<String>> {
        self.text(SOURCE)
    }

    pub fn set_source(&self, source: Option<&str>) -> ModelResult<()> {
        self.set_text(SOURCE, source)
    }

    pub fn language(&self) -> ModelResult<Option<String>> {
        self.text(LANGUAGE)
    }

    pub fn set_language(&self, language: Option<&str>) -> ModelResult<()> {
        self.set_text(LANGUAGE, language)
    }

    pub fn relations(&self) -> ModelResult<Vec<String>> {
        self.texts(RELATION)
    }

    pub fn add_relation(&self, relation: &str) -> ModelResult<bool> {
        self.add_text(RELATION, relation)
    }

    pub fn coverage(&self) -> ModelResult<Option<String>> {
        self.text(COVERAGE)
    }

    pub fn set_coverage(&self, coverage: Option<&str>) -> ModelResult<()> {
        self.set_text(COVERAGE, coverage)
    }

    pub fn rights(&self) -> ModelResult<Option<String>> {
        self.text(RIGHTS)
    }

    pub fn set_rights(&self, rights: Option<&str>) -> ModelResult<()> {
        self.set_text(RIGHTS, rights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Model;
    use chrono::TimeZone;

    #[test]
    fn test_single_valued_elements() {
        let model = Model::new();
        let doc = DublinCore::new(model.resource("http://example.org/doc").unwrap());

        doc.set_title(Some("Report")).unwrap();
        doc.set_title(Some("Final report")).unwrap();
        doc.set_language(Some("en")).unwrap();
        doc.set_rights(Some("CC-BY")).unwrap();

        assert_eq!(doc.title().unwrap().as_deref(), Some("Final report"));
        assert_eq!(doc.language().unwrap().as_deref(), Some("en"));

        doc.set_rights(None).unwrap();
        assert_eq!(doc.rights().unwrap(), None);
        assert_eq!(model.len(), 2);
    }

    #[test]
    fn test_repeatable_elements() {
        let model = Model::new();
        let doc = DublinCore::new(model.resource("http://example.org/doc").unwrap());

        doc.add_creator("Ada").unwrap();
        doc.add_creator("Grace").unwrap();
        assert!(!doc.add_creator("Ada").unwrap());
        doc.add_subject("rdf").unwrap();

        assert_eq!(doc.creators().unwrap(), vec!["Ada", "Grace"]);
        assert_eq!(doc.subjects().unwrap(), vec!["rdf"]);
        assert!(doc.contributors().unwrap().is_empty());
    }

    #[test]
    fn test_date_is_typed() {
        let model = Model::new();
        let doc = DublinCore::new(model.resource("http://example.org/doc").unwrap());
        let when = Utc.with_ymd_and_hms(2023, 6, 1, 12, 0, 0).unwrap();

        doc.set_date(Some(&when)).unwrap();
        assert_eq!(doc.date().unwrap(), Some(when));

        let raw = doc.as_resource().property_value(DATE).unwrap().unwrap();
        assert_eq!(
            raw.as_literal().unwrap().datatype_iri(),
            crate::literal::XSD_DATE_TIME
        );
    }

    #[test]
    fn test_elements_share_namespace() {
        assert!(ELEMENTS.iter().all(|e| e.starts_with(NS)));
    }
}
