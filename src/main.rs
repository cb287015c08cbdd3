//! Ontobind CLI: inspect, sign and convert RDF files

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use ontobind::container::{Container, ContainerKind};
use ontobind::rdf::{node_object, NamespaceManager, RdfFormat};
use ontobind::vocab::{Digest, DigestAlgorithm};
use ontobind::{Config, FileStorage, RdfObject, StorageConfig};
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Parser)]
#[command(name = "ontobind", version, about = "Typed RDF vocabulary tool")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true, env = "ONTOBIND_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the properties of a resource, container members last
    Show {
        /// RDF file
        file: PathBuf,
        /// Resource IRI or CURIE
        iri: String,
    },
    /// List container members in order
    Members { file: PathBuf, iri: String },
    /// Hash a file and attach the digest to a resource
    Digest {
        file: PathBuf,
        iri: String,
        /// File to hash
        input: PathBuf,
        #[arg(long, default_value = "sha256")]
        algorithm: DigestAlgorithm,
    },
    /// Check every digest attached to a resource
    Verify { file: PathBuf, iri: String, input: PathBuf },
    /// Re-serialize a graph, format taken from the output extension
    Convert {
        input: PathBuf,
        output: PathBuf,
        /// Output format, overriding the extension
        #[arg(long)]
        to: Option<RdfFormat>,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let ns = config.namespaces();

    match cli.command {
        Commands::Show { file, iri } => run_show(&config, &ns, &file, &iri, &cli.format),
        Commands::Members { file, iri } => run_members(&config, &ns, &file, &iri, &cli.format),
        Commands::Digest {
            file,
            iri,
            input,
            algorithm,
        } => run_digest(&config, &ns, &file, &iri, &input, algorithm),
        Commands::Verify { file, iri, input } => run_verify(&config, &ns, &file, &iri, &input, &cli.format),
        Commands::Convert { input, output, to } => run_convert(&config, &input, &output, to),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = match path {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    config.apply_env_overrides()?;
    Ok(config)
}

fn open(config: &Config, file: &Path) -> anyhow::Result<FileStorage> {
    FileStorage::open(file, config.storage.clone()).with_context(|| format!("opening {}", file.display()))
}

/// Accept a full IRI, `<iri>` or a CURIE known to the namespace table
fn expand_iri(ns: &NamespaceManager, iri: &str) -> String {
    let trimmed = iri.trim_start_matches('<').trim_end_matches('>');
    if trimmed.contains("://") {
        return trimmed.to_string();
    }
    ns.expand(trimmed).unwrap_or_else(|_| trimmed.to_string())
}

fn display_object(ns: &NamespaceManager, object: &RdfObject) -> String {
    match object {
        RdfObject::NamedNode(n) => ns.display(n.as_str()),
        RdfObject::BlankNode(b) => format!("_:{}", b.as_str()),
        RdfObject::Literal(l) => match l.language() {
            Some(lang) => format!("\"{}\"@{}", l.value(), lang),
            None if l.is_plain() => format!("\"{}\"", l.value()),
            None => format!("\"{}\"^^{}", l.value(), ns.display(l.datatype_iri())),
        },
    }
}

fn run_show(
    config: &Config,
    ns: &NamespaceManager,
    file: &Path,
    iri: &str,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let storage = open(config, file)?;
    let resource = storage.model().resource(&expand_iri(ns, iri))?;
    let properties = resource.properties();

    match format {
        OutputFormat::Json => {
            let node = node_object(resource.node(), &properties);
            println!("{}", serde_json::to_string_pretty(&node)?);
        }
        OutputFormat::Table => {
            if properties.is_empty() {
                println!("(no properties)");
                return Ok(());
            }
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Property", "Value"]);
            for (predicate, object) in &properties {
                table.add_row(vec![ns.display(predicate.as_str()), display_object(ns, object)]);
            }
            println!("{}", table);
            println!("{} statement(s)", properties.len());
        }
    }
    Ok(())
}

fn run_members(
    config: &Config,
    ns: &NamespaceManager,
    file: &Path,
    iri: &str,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let storage = open(config, file)?;
    let resource = storage.model().resource(&expand_iri(ns, iri))?;
    // directories and untyped lists are read as bags
    let container = match Container::from_resource(resource.clone())? {
        Some(container) => container,
        None => Container::wrap(resource, ContainerKind::Bag),
    };
    let members = container.members();

    match format {
        OutputFormat::Json => {
            let values: Vec<String> = members.iter().map(|m| display_object(ns, m)).collect();
            println!("{}", serde_json::to_string_pretty(&values)?);
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["#", "Member"]);
            for (i, member) in members.iter().enumerate() {
                table.add_row(vec![(i + 1).to_string(), display_object(ns, member)]);
            }
            println!("{}", table);
            println!("{} member(s), {:?}", members.len(), container.kind());
        }
    }
    Ok(())
}

fn run_digest(
    config: &Config,
    ns: &NamespaceManager,
    file: &Path,
    iri: &str,
    input: &Path,
    algorithm: DigestAlgorithm,
) -> anyhow::Result<()> {
    let bytes = std::fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let storage = open(config, file)?;
    let iri = expand_iri(ns, iri);

    let value = storage.update(|model| {
        let resource = model.resource(&iri)?;
        Digest::attach(&resource, algorithm, &bytes)?.value()
    })?;

    println!("{} {}", algorithm, hex::encode(&value));
    Ok(())
}

fn run_verify(
    config: &Config,
    ns: &NamespaceManager,
    file: &Path,
    iri: &str,
    input: &Path,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let bytes = std::fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let storage = open(config, file)?;
    let resource = storage.model().resource(&expand_iri(ns, iri))?;

    let digests = Digest::of(&resource)?;
    if digests.is_empty() {
        bail!("{} has no digests", resource);
    }

    let mut results = Vec::new();
    for digest in &digests {
        results.push((digest.algorithm()?, digest.verify(&bytes)?));
    }

    match format {
        OutputFormat::Json => {
            let json: Vec<serde_json::Value> = results
                .iter()
                .map(|(algorithm, ok)| serde_json::json!({ "algorithm": algorithm.name(), "valid": ok }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Table => {
            for (algorithm, ok) in &results {
                println!("{}: {}", algorithm, if *ok { "OK" } else { "MISMATCH" });
            }
        }
    }

    if results.iter().any(|(_, ok)| !ok) {
        bail!("digest mismatch for {}", input.display());
    }
    Ok(())
}

fn run_convert(config: &Config, input: &Path, output: &Path, to: Option<RdfFormat>) -> anyhow::Result<()> {
    let source = open(config, input)?;
    let target_config = StorageConfig {
        format: to,
        ..config.storage.clone()
    };
    let target = FileStorage::create(output, target_config)
        .with_context(|| format!("preparing {}", output.display()))?;

    target.model().replace(source.model().snapshot());
    target.save()?;
    println!(
        "Wrote {} triples to {} ({:?})",
        target.model().len(),
        output.display(),
        target.format()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ontobind::{BlankNode, Literal, NamedNode};
    use std::fs;
    use tempfile::TempDir;

    const DATA: &str = r#"
@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
<http://example.org/list> a rdf:Seq ; rdf:_2 "second" ; rdf:_1 "first" .
"#;

    #[test]
    fn test_expand_iri() {
        let ns = Config::default().namespaces();
        assert_eq!(
            expand_iri(&ns, "rdf:type"),
            "http://www.w3.org/1999/02/22-rdf-syntax-ns#type"
        );
        assert_eq!(expand_iri(&ns, "<http://example.org/a>"), "http://example.org/a");
        assert_eq!(expand_iri(&ns, "http://example.org/a"), "http://example.org/a");
        // unknown prefix passes through untouched
        assert_eq!(expand_iri(&ns, "urn:isbn:0451450523"), "urn:isbn:0451450523");
    }

    #[test]
    fn test_display_object() {
        let ns = Config::default().namespaces();
        let iri = NamedNode::new("http://xmlns.com/foaf/0.1/Person").unwrap();
        assert_eq!(display_object(&ns, &iri.into()), "foaf:Person");

        let other = NamedNode::new("http://example.org/a").unwrap();
        assert_eq!(display_object(&ns, &other.into()), "<http://example.org/a>");

        let blank = BlankNode::with_id("b0").unwrap();
        assert_eq!(display_object(&ns, &blank.into()), "_:b0");

        let plain = Literal::new_simple_literal("hi");
        assert_eq!(display_object(&ns, &plain.into()), "\"hi\"");

        let tagged = Literal::new_language_tagged_literal("salut", "fr").unwrap();
        assert_eq!(display_object(&ns, &tagged.into()), "\"salut\"@fr");

        let int = NamedNode::new("http://www.w3.org/2001/XMLSchema#integer").unwrap();
        let typed = Literal::new_typed_literal("42", int);
        assert_eq!(display_object(&ns, &typed.into()), "\"42\"^^xsd:integer");
    }

    #[test]
    fn test_convert_turtle_to_ntriples() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("list.ttl");
        let output = temp_dir.path().join("list.nt");
        fs::write(&input, DATA).unwrap();

        let config = Config::default();
        run_convert(&config, &input, &output, None).unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert_eq!(written.lines().count(), 3);
        assert!(written.contains("<http://example.org/list>"));

        let reopened = open(&config, &output).unwrap();
        let list = reopened.model().resource("http://example.org/list").unwrap();
        let members: Vec<String> = Container::from_resource(list)
            .unwrap()
            .unwrap()
            .members()
            .iter()
            .map(|m| m.as_literal().unwrap().value().to_string())
            .collect();
        assert_eq!(members, vec!["first", "second"]);
    }

    #[test]
    fn test_convert_with_explicit_format() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("list.ttl");
        let output = temp_dir.path().join("list.out");
        fs::write(&input, DATA).unwrap();

        run_convert(&Config::default(), &input, &output, Some(RdfFormat::RdfXml)).unwrap();
        assert!(fs::read_to_string(&output).unwrap().contains("rdf:RDF"));
    }

    #[test]
    fn test_digest_then_verify() {
        let temp_dir = TempDir::new().unwrap();
        let graph = temp_dir.path().join("graph.ttl");
        let payload = temp_dir.path().join("payload.bin");
        let tampered = temp_dir.path().join("tampered.bin");
        fs::write(&payload, b"payload").unwrap();
        fs::write(&tampered, b"payload!").unwrap();

        let config = Config::default();
        let ns = config.namespaces();
        let iri = "http://example.org/payload";
        run_digest(&config, &ns, &graph, iri, &payload, DigestAlgorithm::Sha256).unwrap();
        assert!(graph.exists());

        run_verify(&config, &ns, &graph, iri, &payload, &OutputFormat::Json).unwrap();
        assert!(run_verify(&config, &ns, &graph, iri, &tampered, &OutputFormat::Table).is_err());
        assert!(run_verify(&config, &ns, &graph, "http://example.org/other", &payload, &OutputFormat::Table).is_err());
    }
}
