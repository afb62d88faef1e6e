use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use phenograph::annotations::{parse_hpoa_path, AnnotationAnalysis, DateWindow};
use phenograph::common::hpo;
use phenograph::error::ParseIssue;
use phenograph::io::OntologyLoaderBuilder;
use phenograph::ontology::DefaultCsrOntology;
use phenograph::TermId;

#[derive(Parser)]
#[command(
    name = "phenograph",
    version,
    about = "Work with phenotype ontologies and disease-phenotype annotations"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Q/C and statistics of an OBO-graph JSON ontology file
    Hpo {
        /// Path to hp.json or another OBO-graph JSON ontology
        #[arg(long = "hp")]
        hp_json: PathBuf,
        /// Show descriptive statistics
        #[arg(short, long)]
        stats: bool,
        /// Show the quality-control report
        #[arg(short, long)]
        qc: bool,
        /// Target term id, e.g. HP:0001166
        #[arg(short, long)]
        term: Option<String>,
        /// Threshold date (e.g. 2018-09-23)
        #[arg(short, long)]
        date: Option<String>,
        /// End of the date window (e.g. 2020-07-23)
        #[arg(short, long)]
        enddate: Option<String>,
        /// Name/path of the output file
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Analyze a phenotype.hpoa annotation file against the ontology
    Annotations {
        /// Path to the phenotype.hpoa file
        #[arg(short, long)]
        annot: PathBuf,
        /// Path to hp.json or another OBO-graph JSON ontology
        #[arg(long = "hp")]
        hp_json: PathBuf,
        /// Threshold date (e.g. 2018-09-23)
        #[arg(short, long)]
        date: Option<String>,
        /// End of the date window (e.g. 2020-07-23)
        #[arg(short, long)]
        enddate: Option<String>,
        /// Target term id; without it the top-level categorization runs
        #[arg(short, long)]
        term: Option<String>,
        /// Name/path of the output file
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Print the annotation statistics sidecar
        #[arg(short, long)]
        stats: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match Cli::parse().command {
        Command::Hpo {
            hp_json,
            stats,
            qc,
            term,
            date,
            enddate,
            out,
        } => run_hpo(&hp_json, stats, qc, term, date, enddate, out),
        Command::Annotations {
            annot,
            hp_json,
            date,
            enddate,
            term,
            out,
            stats,
        } => run_annotations(&annot, &hp_json, date, enddate, term, out, stats),
    }
}

fn load_ontology(path: &Path) -> Result<DefaultCsrOntology> {
    let loader = OntologyLoaderBuilder::new().obographs_parser().build();
    loader
        .load_from_path(path)
        .with_context(|| format!("loading ontology from {}", path.display()))
}

fn open_output(out: Option<PathBuf>) -> Result<Box<dyn Write>> {
    match out {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("opening {} for writing", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout())),
    }
}

fn print_issues(issues: &[ParseIssue]) {
    if issues.is_empty() {
        println!("No errors encountered");
        return;
    }
    for issue in issues {
        println!("{issue}");
    }
}

fn run_hpo(
    hp_json: &Path,
    stats: bool,
    qc: bool,
    term: Option<String>,
    date: Option<String>,
    enddate: Option<String>,
    out: Option<PathBuf>,
) -> Result<()> {
    let ontology = load_ontology(hp_json)?;
    if qc {
        print_issues(ontology.parse_issues());
    }
    let mut out = open_output(out)?;
    if stats {
        ontology.write_statistics(&mut out)?;
    }
    if let Some(term) = term {
        let target: TermId = term.parse()?;
        let window = DateWindow::from_bounds(date.as_deref(), enddate.as_deref())?;
        write_descendant_report(&ontology, &target, window, &mut out)?;
    }
    Ok(())
}

/// List the descendants of `target` with their creation dates and whether the
/// date falls into the window.
fn write_descendant_report(
    ontology: &DefaultCsrOntology,
    target: &TermId,
    window: DateWindow,
    out: &mut dyn Write,
) -> Result<()> {
    let term = ontology
        .term_by_id(target)
        .with_context(|| format!("could not find term for {target}"))?;
    writeln!(out, "#Subontology: {} ({})", target, term.label())?;
    writeln!(out, "#hpo.id\thpo.label\tcreation.date\tincluded")?;

    let mut total = 0;
    let mut in_window = 0;
    for descendant_id in ontology.descendants_of(target) {
        let descendant = ontology
            .term_by_id(descendant_id)
            .with_context(|| format!("could not find term for {descendant_id}"))?;
        total += 1;
        let (date_label, included) = match descendant.creation_date() {
            Some(date) => (date.format("%Y-%m-%d").to_string(), window.contains(date)),
            None => ("n/a".to_string(), false),
        };
        if included {
            in_window += 1;
        }
        writeln!(
            out,
            "{}\t{}\t{}\t{}",
            descendant_id,
            descendant.label(),
            date_label,
            if included { "T" } else { "F" }
        )?;
    }
    writeln!(out, "#Created after {}: {in_window}", window.lower())?;
    writeln!(out, "#Total: {total}")?;
    Ok(())
}

fn run_annotations(
    annot: &Path,
    hp_json: &Path,
    date: Option<String>,
    enddate: Option<String>,
    term: Option<String>,
    out: Option<PathBuf>,
    stats: bool,
) -> Result<()> {
    let ontology = load_ontology(hp_json)?;
    let mut issues = Vec::new();
    let annotations = parse_hpoa_path(annot, &mut issues)
        .with_context(|| format!("parsing annotations from {}", annot.display()))?;
    eprintln!("[INFO] obtained {} annotations", annotations.len());

    let window = DateWindow::from_bounds(date.as_deref(), enddate.as_deref())?;
    let analysis = AnnotationAnalysis::new(&ontology, &annotations, window);

    let target = term.map(|t| t.parse::<TermId>()).transpose()?;
    let toplevel_root = target.is_none().then(|| hpo::PHENOTYPIC_ABNORMALITY.clone());

    let mut out = open_output(out)?;
    analysis.run(target.as_ref(), toplevel_root.as_ref(), &mut out, &mut issues)?;
    out.flush()?;

    for issue in &issues {
        eprintln!("{issue}");
    }
    if stats {
        analysis.write_statistics(&mut io::stdout())?;
    }
    Ok(())
}
