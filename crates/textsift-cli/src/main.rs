//! textsift CLI - Command-line interface
//!
//! Usage:
//!   textsift validate <file>
//!   textsift clean <file> -o cleaned.csv
//!   textsift extract <file>
//!   textsift insights <file> --topics 5

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use textsift_core::Table;
use textsift_extract::{
    clean_entities, clean_relationships, EntityExtractor, RelationExtractor, RuleBasedNer,
    SvoExtractor,
};
use textsift_insight::{entity_counts, relationship_counts, LdaConfig, LdaModel, RelationshipGraph};
use textsift_parser::csv_table::to_csv_string;
use textsift_validate::{Resolver, Validator};

#[derive(Parser)]
#[command(name = "textsift")]
#[command(about = "Spreadsheet text validation and analysis CLI")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report validation findings for a spreadsheet
    Validate {
        /// Path to the spreadsheet (xlsx, xls, csv)
        file: PathBuf,
    },
    /// Clean a spreadsheet and write the result as CSV
    Clean {
        /// Path to the spreadsheet (xlsx, xls, csv)
        file: PathBuf,
        /// Output path; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Extract entities and relationships from the cleaned text
    Extract {
        /// Path to the spreadsheet (xlsx, xls, csv)
        file: PathBuf,
        /// Emit JSON instead of a listing
        #[arg(long)]
        json: bool,
    },
    /// Aggregate insights: counts, network size, topics
    Insights {
        /// Path to the spreadsheet (xlsx, xls, csv)
        file: PathBuf,
        /// Number of topics to fit
        #[arg(long, default_value_t = 5)]
        topics: usize,
        /// Entries per frequency listing
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { file } => validate(&file),
        Commands::Clean { file, output } => clean(&file, output.as_deref()),
        Commands::Extract { file, json } => extract(&file, json),
        Commands::Insights { file, topics, top } => insights(&file, topics, top),
    }
}

fn load(file: &std::path::Path) -> anyhow::Result<Table> {
    textsift_parser::parse_path(file)
        .with_context(|| format!("failed to read {}", file.display()))
}

fn validate(file: &std::path::Path) -> anyhow::Result<()> {
    let table = load(file)?;
    let findings = Validator::new().validate(&table);

    for finding in &findings {
        let rows: Vec<String> = finding.rows.iter().map(|r| r.to_string()).collect();
        println!(
            "[{}] row {}: {}",
            finding.kind,
            rows.join(", "),
            finding.description
        );
    }
    println!("{} rows checked, {} findings", table.len(), findings.len());
    Ok(())
}

fn clean(file: &std::path::Path, output: Option<&std::path::Path>) -> anyhow::Result<()> {
    let table = load(file)?;
    let report = Resolver::new().resolve(&table);

    for action in &report.actions {
        eprintln!("{} ({} rows)", action.description, action.count);
    }

    let csv = to_csv_string(&report.table).context("failed to render CSV")?;
    match output {
        Some(path) => {
            std::fs::write(path, csv)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Wrote {} rows to {}", report.table.len(), path.display());
        }
        None => print!("{csv}"),
    }
    Ok(())
}

fn run_extractors(
    table: &Table,
) -> anyhow::Result<(Vec<textsift_core::Entity>, Vec<textsift_core::Relationship>)> {
    let ner = RuleBasedNer::new();
    let svo = SvoExtractor::new();

    let mut entities = Vec::new();
    let mut relationships = Vec::new();
    for record in &table.records {
        let Some(text) = &record.text else { continue };
        let row_entities = ner.extract(text)?;
        relationships.extend(svo.extract(text, &row_entities)?);
        entities.extend(row_entities);
    }

    Ok((clean_entities(entities), clean_relationships(relationships)))
}

fn extract(file: &std::path::Path, json: bool) -> anyhow::Result<()> {
    let table = load(file)?;
    let report = Resolver::new().resolve(&table);
    let (entities, relationships) = run_extractors(&report.table)?;

    if json {
        let out = serde_json::json!({
            "entities": entities,
            "relationships": relationships,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Entities ({}):", entities.len());
    for entity in &entities {
        println!("  {} [{}] ({:.2})", entity.text, entity.label, entity.confidence);
    }

    println!("Relationships ({}):", relationships.len());
    for rel in &relationships {
        println!(
            "  {} --{}--> {} ({:.2})",
            rel.subject, rel.predicate, rel.object, rel.confidence
        );
    }
    Ok(())
}

fn insights(file: &std::path::Path, topics: usize, top: usize) -> anyhow::Result<()> {
    let table = load(file)?;
    let report = Resolver::new().resolve(&table);
    let (entities, relationships) = run_extractors(&report.table)?;

    println!("Top entities:");
    for ((text, label), count) in entity_counts(&entities).most_common(top) {
        println!("  {count:>4}  {text} [{label}]");
    }

    println!("Top relationships:");
    for ((subject, predicate, object), count) in
        relationship_counts(&relationships).most_common(top)
    {
        println!("  {count:>4}  {subject} --{predicate}--> {object}");
    }

    let graph = RelationshipGraph::from_relationships(&relationships);
    println!(
        "Network: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    let documents: Vec<String> = report
        .table
        .records
        .iter()
        .filter_map(|r| r.text.clone())
        .collect();
    let config = LdaConfig {
        num_topics: topics,
        ..Default::default()
    };
    let model = LdaModel::fit(&documents, &config);

    println!("Topics:");
    for topic in model.topics() {
        println!("  #{}: {}", topic.index, topic.top_words.join(", "));
    }
    Ok(())
}
