use chrono::NaiveDate;
use ontobind::literal::{AnyUri, Base64Binary};
use ontobind::rdf::{RdfFormat, RdfParser, RdfSerializer, RdfStore};
use ontobind::vocab::{dc, rdfa, vcard};
use ontobind::vocab::{Address, Dictionary, Digest, DigestAlgorithm, DublinCore, Name, VCard};
use ontobind::{Directory, Model, TypedResource};

fn reparse(model: &Model, format: RdfFormat) -> Model {
    let snapshot = model.snapshot();
    let text = RdfSerializer::serialize(snapshot.iter(), format).unwrap();
    let triples = RdfParser::parse(&text, format, None).unwrap();
    Model::from_store(triples.into_iter().collect::<RdfStore>())
}

#[test]
fn test_dublin_core_from_turtle() {
    let turtle = r#"
        @prefix dc: <http://purl.org/dc/elements/1.1/> .
        <http://example.org/book> dc:title "Dune" ;
            dc:creator "Frank Herbert" ;
            dc:subject "science fiction", "ecology" ;
            dc:date "1965-08-01T00:00:00Z"^^<http://www.w3.org/2001/XMLSchema#dateTime> .
    "#;
    let triples = RdfParser::parse(turtle, RdfFormat::Turtle, None).unwrap();
    let model = Model::from_store(triples.into_iter().collect());
    let book = DublinCore::new(model.resource("http://example.org/book").unwrap());

    assert_eq!(book.title().unwrap().as_deref(), Some("Dune"));
    assert_eq!(book.creators().unwrap(), vec!["Frank Herbert"]);
    assert_eq!(book.subjects().unwrap().len(), 2);
    let date = book.date().unwrap().unwrap();
    assert_eq!(date.date_naive(), NaiveDate::from_ymd_opt(1965, 8, 1).unwrap());
    assert_eq!(book.publisher().unwrap(), None);
}

#[test]
fn test_vcard_survives_rdfxml() {
    let model = Model::new();
    let card = VCard::new(model.resource("http://example.org/people/grace").unwrap());
    card.set_formatted_name("Grace Hopper").unwrap();
    card.set_name(&Name {
        family: Some("Hopper".into()),
        given: Some("Grace".into()),
        prefix: Some("Rear Admiral".into()),
        ..Default::default()
    })
    .unwrap();
    card.add_address(&Address {
        locality: Some("Arlington".into()),
        country: Some("USA".into()),
        ..Default::default()
    })
    .unwrap();
    card.set_url(Some(&AnyUri::new("http://example.org/grace"))).unwrap();

    let copy = reparse(&model, RdfFormat::RdfXml);
    let card = VCard::new(copy.resource("http://example.org/people/grace").unwrap());
    assert_eq!(card.formatted_name().unwrap().as_deref(), Some("Grace Hopper"));
    let name = card.name().unwrap().unwrap();
    assert_eq!(name.prefix.as_deref(), Some("Rear Admiral"));
    assert_eq!(card.addresses().unwrap()[0].locality.as_deref(), Some("Arlington"));
    assert_eq!(card.url().unwrap().unwrap().as_str(), "http://example.org/grace");
    assert!(vcard::FN.starts_with(vcard::NS));
}

#[test]
fn test_digest_survives_turtle() {
    let model = Model::new();
    let doc = model.resource("http://example.org/doc").unwrap();
    Digest::attach(&doc, DigestAlgorithm::Sha512, b"payload").unwrap();

    let copy = reparse(&model, RdfFormat::Turtle);
    let doc = copy.resource("http://example.org/doc").unwrap();
    let digests = Digest::of(&doc).unwrap();
    assert_eq!(digests.len(), 1);
    assert_eq!(digests[0].algorithm().unwrap(), DigestAlgorithm::Sha512);
    assert!(digests[0].verify(b"payload").unwrap());
    assert!(!digests[0].verify(b"tampered").unwrap());
}

#[test]
fn test_dictionary_and_directory_together() {
    let model = Model::new();
    let root = Directory::create(&model, Some("http://example.org/fs"), "/").unwrap();
    let etc = root.mkdir("etc").unwrap();

    let settings = Dictionary::create(&model, Some("http://example.org/fs/etc/settings")).unwrap();
    settings
        .as_resource()
        .set(ontobind::vocab::rdfs::LABEL, &"settings".to_string())
        .unwrap();
    settings.put_literal("theme", &"dark".to_string()).unwrap();
    settings
        .put_literal("icon", &Base64Binary::from(&b"\x89PNG"[..]))
        .unwrap();
    etc.add_entry(settings.as_resource()).unwrap();

    let copy = reparse(&model, RdfFormat::NTriples);
    let root = Directory::expect(copy.resource("http://example.org/fs").unwrap()).unwrap();
    let found = root.lookup("etc/settings").unwrap().unwrap();
    let settings = Dictionary::expect(found).unwrap();

    assert_eq!(settings.keys().unwrap(), vec!["theme", "icon"]);
    assert_eq!(
        settings.get_literal::<Base64Binary>("icon").unwrap().unwrap().as_bytes(),
        b"\x89PNG"
    );
}

#[test]
fn test_rdfa_context_covers_bound_vocabularies() {
    let ctx = rdfa::initial_context();
    assert_eq!(ctx.compact(dc::TITLE).as_deref(), Some("dc11:title"));
    assert_eq!(
        rdfa::resolve("rdfs:label").as_deref(),
        Some(ontobind::vocab::rdfs::LABEL)
    );
}
