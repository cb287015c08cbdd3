//! vCard in RDF (the 2001 W3C note)
//!
//! Structured properties (N, ADR, ORG) point at blank nodes that carry
//! the individual parts.

use crate::literal::AnyUri;
use crate::model::{ModelResult, Resource};
use chrono::NaiveDate;

pub const NS: &str = "http://www.w3.org/2001/vcard-rdf/3.0#";

pub const FN: &str = "http://www.w3.org/2001/vcard-rdf/3.0#FN";
pub const N: &str = "http://www.w3.org/2001/vcard-rdf/3.0#N";
pub const FAMILY: &str = "http://www.w3.org/2001/vcard-rdf/3.0#Family";
pub const GIVEN: &str = "http://www.w3.org/2001/vcard-rdf/3.0#Given";
pub const OTHER: &str = "http://www.w3.org/2001/vcard-rdf/3.0#Other";
pub const PREFIX: &str = "http://www.w3.org/2001/vcard-rdf/3.0#Prefix";
pub const SUFFIX: &str = "http://www.w3.org/2001/vcard-rdf/3.0#Suffix";
pub const NICKNAME: &str = "http://www.w3.org/2001/vcard-rdf/3.0#NICKNAME";
pub const EMAIL: &str = "http://www.w3.org/2001/vcard-rdf/3.0#EMAIL";
pub const TEL: &str = "http://www.w3.org/2001/vcard-rdf/3.0#TEL";
pub const ORG: &str = "http://www.w3.org/2001/vcard-rdf/3.0#ORG";
pub const ORGNAME: &str = "http://www.w3.org/2001/vcard-rdf/3.0#Orgname";
pub const ORGUNIT: &str = "http://www.w3.org/2001/vcard-rdf/3.0#Orgunit";
pub const ADR: &str = "http://www.w3.org/2001/vcard-rdf/3.0#ADR";
pub const POBOX: &str = "http://www.w3.org/2001/vcard-rdf/3.0#Pobox";
pub const EXTADD: &str = "http://www.w3.org/2001/vcard-rdf/3.0#Extadd";
pub const STREET: &str = "http://www.w3.org/2001/vcard-rdf/3.0#Street";
pub const LOCALITY: &str = "http://www.w3.org/2001/vcard-rdf/3.0#Locality";
pub const REGION: &str = "http://www.w3.org/2001/vcard-rdf/3.0#Region";
pub const PCODE: &str = "http://www.w3.org/2001/vcard-rdf/3.0#Pcode";
pub const COUNTRY: &str = "http://www.w3.org/2001/vcard-rdf/3.0#Country";
pub const URL: &str = "http://www.w3.org/2001/vcard-rdf/3.0#URL";
pub const TITLE: &str = "http://www.w3.org/2001/vcard-rdf/3.0#TITLE";
pub const ROLE: &str = "http://www.w3.org/2001/vcard-rdf/3.0#ROLE";
pub const NOTE: &str = "http://www.w3.org/2001/vcard-rdf/3.0#NOTE";
pub const BDAY: &str = "http://www.w3.org/2001/vcard-rdf/3.0#BDAY";

/// Structured name (vcard:N)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Name {
    pub family: Option<String>,
    pub given: Option<String>,
    pub other: Option<String>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
}

impl Name {
    fn parts(&self) -> [(&'static str, Option<&String>); 5] {
        [
            (FAMILY, self.family.as_ref()),
            (GIVEN, self.given.as_ref()),
            (OTHER, self.other.as_ref()),
            (PREFIX, self.prefix.as_ref()),
            (SUFFIX, self.suffix.as_ref()),
        ]
    }

    fn read(node: &Resource) -> ModelResult<Self> {
        Ok(Self {
            family: node.get(FAMILY)?,
            given: node.get(GIVEN)?,
            other: node.get(OTHER)?,
            prefix: node.get(PREFIX)?,
            suffix: node.get(SUFFIX)?,
        })
    }
}

/// Postal address (vcard:ADR)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub pobox: Option<String>,
    pub extended: Option<String>,
    pub street: Option<String>,
    pub locality: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl Address {
    fn parts(&self) -> [(&'static str, Option<&String>); 7] {
        [
            (POBOX, self.pobox.as_ref()),
            (EXTADD, self.extended.as_ref()),
            (STREET, self.street.as_ref()),
            (LOCALITY, self.locality.as_ref()),
            (REGION, self.region.as_ref()),
            (PCODE, self.postal_code.as_ref()),
            (COUNTRY, self.country.as_ref()),
        ]
    }

    fn read(node: &Resource) -> ModelResult<Self> {
        Ok(Self {
            pobox: node.get(POBOX)?,
            extended: node.get(EXTADD)?,
            street: node.get(STREET)?,
            locality: node.get(LOCALITY)?,
            region: node.get(REGION)?,
            postal_code: node.get(PCODE)?,
            country: node.get(COUNTRY)?,
        })
    }
}

/// Organization (vcard:ORG)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Organization {
    pub name: Option<String>,
    pub unit: Option<String>,
}

fn write_parts(node: &Resource, parts: &[(&'static str, Option<&String>)]) -> ModelResult<()> {
    for (predicate, value) in parts {
        node.set_optional(predicate, *value)?;
    }
    Ok(())
}

/// vCard view over a resource describing a person or organization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VCard(Resource);

impl VCard {
    pub fn new(resource: Resource) -> Self {
        Self(resource)
    }

    pub fn as_resource(&self) -> &Resource {
        &self.0
    }

    pub fn formatted_name(&self) -> ModelResult<Option<String>> {
        self.0.get(FN)
    }

    pub fn set_formatted_name(&self, name: &str) -> ModelResult<()> {
        self.0.set(FN, &name.to_string())
    }

    pub fn name(&self) -> ModelResult<Option<Name>> {
        self.0
            .get_resource(N)?
            .map(|node| Name::read(&node))
            .transpose()
    }

    /// Replace the structured name; the old name node is dropped
    pub fn set_name(&self, name: &Name) -> ModelResult<()> {
        let node = self.replace_structured(N)?;
        write_parts(&node, &name.parts())
    }

    pub fn nickname(&self) -> ModelResult<Option<String>> {
        self.0.get(NICKNAME)
    }

    pub fn set_nickname(&self, nickname: Option<&str>) -> ModelResult<()> {
        self.0.set_optional(NICKNAME, nickname.map(str::to_string).as_ref())
    }

    pub fn emails(&self) -> ModelResult<Vec<String>> {
        self.0.get_all(EMAIL)
    }

    pub fn add_email(&self, email: &str) -> ModelResult<bool> {
        self.0.add(EMAIL, &email.to_string())
    }

    pub fn telephones(&self) -> ModelResult<Vec<String>> {
        self.0.get_all(TEL)
    }

    pub fn add_telephone(&self, number: &str) -> ModelResult<bool> {
        self.0.add(TEL, &number.to_string())
    }

    pub fn organization(&self) -> ModelResult<Option<Organization>> {
        match self.0.get_resource(ORG)? {
            Some(node) => Ok(Some(Organization {
                name: node.get(ORGNAME)?,
                unit: node.get(ORGUNIT)?,
            })),
            None => Ok(None),
        }
    }

    pub fn set_organization(&self, org: &Organization) -> ModelResult<()> {
        let node = self.replace_structured(ORG)?;
        write_parts(&node, &[(ORGNAME, org.name.as_ref()), (ORGUNIT, org.unit.as_ref())])
    }

    pub fn addresses(&self) -> ModelResult<Vec<Address>> {
        self.0
            .get_resources(ADR)?
            .iter()
            .map(Address::read)
            .collect()
    }

    /// Add another address node
    pub fn add_address(&self, address: &Address) -> ModelResult<()> {
        let node = self.0.model().blank();
        write_parts(&node, &address.parts())?;
        self.0.add_resource(ADR, &node)?;
        Ok(())
    }

    pub fn url(&self) -> ModelResult<Option<AnyUri>> {
        self.0.get(URL)
    }

    pub fn set_url(&self, url: Option<&AnyUri>) -> ModelResult<()> {
        self.0.set_optional(URL, url)
    }

    pub fn title(&self) -> ModelResult<Option<String>> {
        self.0.get(TITLE)
    }

    pub fn set_title(&self, title: Option<&str>) -> ModelResult<()> {
        self.0.set_optional(TITLE, title.map(str::to_string).as_ref())
    }

    pub fn role(&self) -> ModelResult<Option<String>> {
        self.0.get(ROLE)
    }

    pub fn set_role(&self, role: Option<&str>) -> ModelResult<()> {
        self.0.set_optional(ROLE, role.map(str::to_string).as_ref())
    }

    pub fn note(&self) -> ModelResult<Option<String>> {
        self.0.get(NOTE)
    }

    pub fn set_note(&self, note: Option<&str>) -> ModelResult<()> {
        self.0.set_optional(NOTE, note.map(str::to_string).as_ref())
    }

    pub fn birthday(&self) -> ModelResult<Option<NaiveDate>> {
        self.0.get(BDAY)
    }

    pub fn set_birthday(&self, date: Option<&NaiveDate>) -> ModelResult<()> {
        self.0.set_optional(BDAY, date)
    }

    /// Drop the blank node behind `predicate` and link a fresh one
    fn replace_structured(&self, predicate: &str) -> ModelResult<Resource> {
        for old in self.0.get_resources(predicate)? {
            if old.node().is_blank_node() {
                old.clear();
            }
        }
        let node = self.0.model().blank();
        self.0.set_resource(predicate, &node)?;
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Model;

    fn card(model: &Model) -> VCard {
        VCard::new(model.resource("http://example.org/people/ada").unwrap())
    }

    #[test]
    fn test_simple_fields() {
        let model = Model::new();
        let ada = card(&model);
        ada.set_formatted_name("Ada Lovelace").unwrap();
        ada.add_email("ada@example.org").unwrap();
        ada.add_email("countess@example.org").unwrap();
        ada.set_url(Some(&AnyUri::new("http://example.org/ada"))).unwrap();
        ada.set_birthday(NaiveDate::from_ymd_opt(1815, 12, 10).as_ref()).unwrap();

        assert_eq!(ada.formatted_name().unwrap().as_deref(), Some("Ada Lovelace"));
        assert_eq!(ada.emails().unwrap().len(), 2);
        assert_eq!(ada.url().unwrap().unwrap().as_str(), "http://example.org/ada");
        assert_eq!(ada.birthday().unwrap(), NaiveDate::from_ymd_opt(1815, 12, 10));
    }

    #[test]
    fn test_structured_name_replaced_cleanly() {
        let model = Model::new();
        let ada = card(&model);
        ada.set_name(&Name {
            family: Some("Byron".into()),
            given: Some("Augusta Ada".into()),
            ..Default::default()
        })
        .unwrap();
        let before = model.len();

        ada.set_name(&Name {
            family: Some("King".into()),
            given: Some("Ada".into()),
            ..Default::default()
        })
        .unwrap();

        let name = ada.name().unwrap().unwrap();
        assert_eq!(name.family.as_deref(), Some("King"));
        assert_eq!(name.prefix, None);
        // the old name node is gone, not orphaned
        assert_eq!(model.len(), before);
    }

    #[test]
    fn test_addresses_and_org() {
        let model = Model::new();
        let ada = card(&model);
        ada.add_address(&Address {
            street: Some("12 St James's Square".into()),
            locality: Some("London".into()),
            country: Some("UK".into()),
            ..Default::default()
        })
        .unwrap();
        ada.set_organization(&Organization {
            name: Some("Analytical Engines".into()),
            unit: None,
        })
        .unwrap();

        let addresses = ada.addresses().unwrap();
        assert_eq!(addresses.len(), 1);
        assert_eq!(addresses[0].locality.as_deref(), Some("London"));
        assert_eq!(addresses[0].region, None);

        let org = ada.organization().unwrap().unwrap();
        assert_eq!(org.name.as_deref(), Some("Analytical Engines"));
        assert_eq!(org.unit, None);
    }
}
