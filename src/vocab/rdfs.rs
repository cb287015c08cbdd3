//! RDF Schema: labels, comments, classes and property declarations

use crate::model::{ModelResult, Resource, TypedResource};
use crate::rdf::{Literal, RdfObject};
use crate::vocab::rdf;

pub const NS: &str = "http://www.w3.org/2000/01/rdf-schema#";

pub const RESOURCE: &str = "http://www.w3.org/2000/01/rdf-schema#Resource";
pub const CLASS: &str = "http://www.w3.org/2000/01/rdf-schema#Class";
pub const LITERAL: &str = "http://www.w3.org/2000/01/rdf-schema#Literal";
pub const DATATYPE: &str = "http://www.w3.org/2000/01/rdf-schema#Datatype";
pub const CONTAINER: &str = "http://www.w3.org/2000/01/rdf-schema#Container";
pub const CONTAINER_MEMBERSHIP_PROPERTY: &str =
    "http://www.w3.org/2000/01/rdf-schema#ContainerMembershipProperty";
pub const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
pub const COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
pub const SEE_ALSO: &str = "http://www.w3.org/2000/01/rdf-schema#seeAlso";
pub const IS_DEFINED_BY: &str = "http://www.w3.org/2000/01/rdf-schema#isDefinedBy";
pub const MEMBER: &str = "http://www.w3.org/2000/01/rdf-schema#member";
pub const SUB_CLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
pub const SUB_PROPERTY_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subPropertyOf";
pub const DOMAIN: &str = "http://www.w3.org/2000/01/rdf-schema#domain";
pub const RANGE: &str = "http://www.w3.org/2000/01/rdf-schema#range";

/// Human-readable annotations any resource can carry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Described(Resource);

impl Described {
    pub fn new(resource: Resource) -> Self {
        Self(resource)
    }

    pub fn as_resource(&self) -> &Resource {
        &self.0
    }

    /// First label, whatever its language
    pub fn label(&self) -> ModelResult<Option<String>> {
        self.0.get(LABEL)
    }

    /// Label in `lang`, falling back to an untagged label
    pub fn label_in(&self, lang: &str) -> ModelResult<Option<String>> {
        localized(&self.0.property_values(LABEL)?, lang)
    }

    pub fn set_label(&self, label: &str) -> ModelResult<()> {
        self.0.set(LABEL, &label.to_string())
    }

    /// Set the label for one language, leaving other languages alone
    pub fn set_label_in(&self, label: &str, lang: &str) -> ModelResult<()> {
        set_localized(&self.0, LABEL, label, lang)
    }

    pub fn comment(&self) -> ModelResult<Option<String>> {
        self.0.get(COMMENT)
    }

    pub fn set_comment(&self, comment: &str) -> ModelResult<()> {
        self.0.set(COMMENT, &comment.to_string())
    }

    pub fn see_also(&self) -> ModelResult<Vec<Resource>> {
        self.0.get_resources(SEE_ALSO)
    }

    pub fn add_see_also(&self, target: &Resource) -> ModelResult<bool> {
        self.0.add_resource(SEE_ALSO, target)
    }

    pub fn is_defined_by(&self) -> ModelResult<Option<Resource>> {
        self.0.get_resource(IS_DEFINED_BY)
    }

    pub fn set_is_defined_by(&self, target: &Resource) -> ModelResult<()> {
        self.0.set_resource(IS_DEFINED_BY, target)
    }
}

fn localized(values: &[RdfObject], lang: &str) -> ModelResult<Option<String>> {
    let literals = || values.iter().filter_map(RdfObject::as_literal);
    let tagged = literals().find(|l| {
        l.language()
            .is_some_and(|tag| tag.eq_ignore_ascii_case(lang))
    });
    let untagged = || literals().find(|l| l.language().is_none());
    Ok(tagged.or_else(untagged).map(|l| l.value().to_string()))
}

fn set_localized(resource: &Resource, predicate: &str, text: &str, lang: &str) -> ModelResult<()> {
    for value in resource.property_values(predicate)? {
        let same_lang = value
            .as_literal()
            .and_then(Literal::language)
            .is_some_and(|tag| tag.eq_ignore_ascii_case(lang));
        if same_lang {
            resource.remove_value(predicate, value)?;
        }
    }
    let literal = Literal::new_language_tagged_literal(text, lang)?;
    resource.add_property(predicate, literal)?;
    Ok(())
}

/// An `rdfs:Class`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RdfsClass(Resource);

impl TypedResource for RdfsClass {
    const TYPE: &'static str = CLASS;

    fn wrap(resource: Resource) -> Self {
        Self(resource)
    }

    fn as_resource(&self) -> &Resource {
        &self.0
    }
}

impl RdfsClass {
    pub fn describe(&self) -> Described {
        Described::new(self.0.clone())
    }

    pub fn sub_class_of(&self) -> ModelResult<Vec<Resource>> {
        self.0.get_resources(SUB_CLASS_OF)
    }

    pub fn add_super_class(&self, class: &Resource) -> ModelResult<bool> {
        self.0.add_resource(SUB_CLASS_OF, class)
    }
}

/// An `rdf:Property` with its schema declarations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RdfProperty(Resource);

impl TypedResource for RdfProperty {
    const TYPE: &'static str = rdf::PROPERTY;

    fn wrap(resource: Resource) -> Self {
        Self(resource)
    }

    fn as_resource(&self) -> &Resource {
        &self.0
    }
}

impl RdfProperty {
    pub fn describe(&self) -> Described {
        Described::new(self.0.clone())
    }

    pub fn domain(&self) -> ModelResult<Option<Resource>> {
        self.0.get_resource(DOMAIN)
    }

    pub fn set_domain(&self, class: &Resource) -> ModelResult<()> {
        self.0.set_resource(DOMAIN, class)
    }

    pub fn range(&self) -> ModelResult<Option<Resource>> {
        self.0.get_resource(RANGE)
    }

    pub fn set_range(&self, class: &Resource) -> ModelResult<()> {
        self.0.set_resource(RANGE, class)
    }

    pub fn sub_property_of(&self) -> ModelResult<Vec<Resource>> {
        self.0.get_resources(SUB_PROPERTY_OF)
    }
}
