use super::load_database;
use crate::cli::ConstraintsArgs;
use crate::config::{Overrides, PartialAppConfig};
use crate::error::{CliError, Result};
use crate::input::load_target;
use isodesmic::core::features::constraints::{ConstraintSet, ConstraintSpace};
use std::io::Write;
use std::sync::Arc;
use tracing::info;

pub fn run(args: ConstraintsArgs) -> Result<()> {
    let config = PartialAppConfig::load(&args.source)?.merge_with_cli(
        &args.source,
        Overrides {
            no_bonds: args.no_bonds,
            no_rings: args.no_rings,
            unit: None,
        },
    )?;

    let target = load_target(&args.target)?;
    let level = args
        .level
        .clone()
        .unwrap_or_else(|| target.level_of_theory().to_string());

    let database = load_database(&config)?;
    let references = database.extract_level_of_theory(&level, config.reference_sets.as_deref())?;
    info!(
        "Vectorizing {} reference species at '{}' against target '{}'.",
        references.len(),
        level,
        target
    );

    let set = ConstraintSpace::new(Arc::clone(&target), config.rules).compute(&references);

    write_summary(&set, &target.to_string(), references.len(), &mut std::io::stdout().lock())?;

    if let Some(path) = &args.csv {
        let file = std::fs::File::create(path)?;
        set.write_csv(file).map_err(|e| CliError::FileParsing {
            path: path.clone(),
            source: e.into(),
        })?;
        println!("✓ Constraint set written to: {}", path.display());
    }
    Ok(())
}

fn write_summary<W: Write>(
    set: &ConstraintSet,
    target: &str,
    total_candidates: usize,
    out: &mut W,
) -> std::io::Result<()> {
    let labels: Vec<String> = set.labels.iter().map(ToString::to_string).collect();
    let target_vector: Vec<String> = set.target_vector.iter().map(ToString::to_string).collect();

    writeln!(out, "Target: {}", target)?;
    writeln!(out, "Labels: {}", labels.join(", "))?;
    writeln!(out, "Target vector: [{}]", target_vector.join(", "))?;
    writeln!(
        out,
        "Accepted {} of {} candidate(s):",
        set.len(),
        total_candidates
    )?;
    for i in 0..set.len() {
        if let Some((species, row)) = set.row(i) {
            let row: Vec<String> = row.iter().map(ToString::to_string).collect();
            writeln!(out, "  {:<24} [{}]", species.to_string(), row.join(", "))?;
        }
    }
    Ok(())
}
