use super::load_database;
use crate::cli::EstimateArgs;
use crate::config::{AppConfig, Overrides, PartialAppConfig};
use crate::error::{CliError, Result};
use crate::input::ReactionFile;
use crate::utils::progress::CliProgressHandler;
use isodesmic::core::features::label::FeatureLabel;
use isodesmic::core::reaction::Reaction;
use isodesmic::core::thermo::quantity::Enthalpy;
use isodesmic::core::thermo::units::EnergyUnit;
use isodesmic::reference::database::ReferenceDatabase;
use isodesmic::workflows::progress::{Progress, ProgressReporter};
use rayon::prelude::*;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// The evaluated form of one reaction file.
#[derive(Debug)]
struct ReactionReport {
    path: PathBuf,
    reaction: Reaction,
    low_level_reaction_enthalpy: Enthalpy,
    estimate: Enthalpy,
    unbalanced: Vec<(FeatureLabel, f64)>,
}

pub fn run(args: EstimateArgs) -> Result<()> {
    let config = PartialAppConfig::load(&args.source)?.merge_with_cli(
        &args.source,
        Overrides {
            no_bonds: args.no_bonds,
            no_rings: args.no_rings,
            unit: args.unit.as_deref(),
        },
    )?;
    let database = load_database(&config)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Evaluating {} reaction(s).", args.reactions.len());
    reporter.report(Progress::BatchStart {
        total_targets: args.reactions.len() as u64,
    });
    let results: Vec<Result<ReactionReport>> = args
        .reactions
        .par_iter()
        .map(|path| {
            let report = evaluate(path, &database, &config);
            if let Ok(report) = &report {
                reporter.report(Progress::TargetFinish {
                    label: report.reaction.target().to_string(),
                    accepted_candidates: report.reaction.companions().len(),
                });
            }
            report
        })
        .collect();
    reporter.report(Progress::BatchFinish);

    let mut out = std::io::stdout().lock();
    let mut failed = 0;
    for (path, result) in args.reactions.iter().zip(results) {
        match result {
            Ok(report) => write_report(&report, config.unit, &mut out)?,
            Err(e) => {
                failed += 1;
                error!("Reaction {:?} failed: {}", path, e);
                writeln!(out, "✗ {}: {}", path.display(), e)?;
            }
        }
    }

    if failed > 0 {
        return Err(CliError::Other(anyhow::anyhow!(
            "{} of {} reaction(s) could not be evaluated",
            failed,
            args.reactions.len()
        )));
    }
    Ok(())
}

fn evaluate(path: &Path, database: &ReferenceDatabase, config: &AppConfig) -> Result<ReactionReport> {
    let reaction =
        ReactionFile::load(path)?.to_reaction(path, database, config.reference_sets.as_deref())?;
    let unbalanced = reaction.balance_residual(config.rules);
    if !unbalanced.is_empty() {
        warn!(reaction = %reaction, "Reaction does not conserve every constrained feature.");
    }
    let estimate = reaction.estimated_high_level_enthalpy()?;
    Ok(ReactionReport {
        path: path.to_path_buf(),
        low_level_reaction_enthalpy: reaction.low_level_reaction_enthalpy(),
        estimate,
        unbalanced,
        reaction,
    })
}

fn write_report<W: Write>(report: &ReactionReport, unit: EnergyUnit, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "{}", report.path.display())?;
    writeln!(out, "  Reaction: {}", report.reaction)?;
    writeln!(
        out,
        "  Low-level reaction enthalpy: {}",
        report.low_level_reaction_enthalpy.display_in(unit)
    )?;
    if !report.unbalanced.is_empty() {
        let labels: Vec<String> = report
            .unbalanced
            .iter()
            .map(|(label, net)| format!("{}={:+}", label, net))
            .collect();
        writeln!(out, "  Warning: unbalanced features {}", labels.join(", "))?;
    }
    writeln!(
        out,
        "✓ Estimated H298 of {}: {}",
        report.reaction.target(),
        report.estimate.display_in(unit)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::tests::{alkane_references, propane_target};
    use isodesmic::core::features::label::ConservationRules;
    use std::fs;
    use tempfile::tempdir;

    fn setup(dir: &Path, companions: &str) -> (PathBuf, ReferenceDatabase) {
        fs::write(dir.join("propane.toml"), propane_target()).unwrap();
        let references = dir.join("main.toml");
        fs::write(&references, alkane_references()).unwrap();
        let reaction = dir.join("rxn.toml");
        fs::write(
            &reaction,
            format!("target = \"propane.toml\"\ncompanions = [{}]\n", companions),
        )
        .unwrap();

        let mut database = ReferenceDatabase::new();
        database.load(&[&references]).unwrap();
        (reaction, database)
    }

    fn config(reference_sets: Option<Vec<String>>) -> AppConfig {
        AppConfig {
            reference_paths: Vec::new(),
            reference_sets,
            rules: ConservationRules::default(),
            unit: EnergyUnit::KilojoulePerMole,
        }
    }

    #[test]
    fn evaluate_and_report_balanced_reaction() {
        let dir = tempdir().unwrap();
        let (reaction, database) = setup(
            dir.path(),
            "{ label = \"ethane\", coefficient = 2.0 }, { label = \"methane\", coefficient = -1.0 }",
        );

        let report = evaluate(&reaction, &database, &config(None)).unwrap();
        assert!(report.unbalanced.is_empty());
        assert!((report.low_level_reaction_enthalpy.value_si() - 25.0).abs() < 1e-9);
        assert!((report.estimate.value_si() - 18.0).abs() < 1e-9);

        let mut out = Vec::new();
        write_report(&report, EnergyUnit::JoulePerMole, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Reaction: 1*propane + 1*methane == 2*ethane"));
        assert!(text.contains("Estimated H298 of propane: 18.0000"));
        assert!(!text.contains("unbalanced"));
    }

    #[test]
    fn unbalanced_reaction_is_flagged() {
        let dir = tempdir().unwrap();
        let (reaction, database) = setup(dir.path(), "{ label = \"ethane\", coefficient = 1.0 }");

        let report = evaluate(&reaction, &database, &config(None)).unwrap();
        assert!(!report.unbalanced.is_empty());

        let mut out = Vec::new();
        write_report(&report, EnergyUnit::KilojoulePerMole, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("Warning: unbalanced features C=-1"));
    }

    #[test]
    fn companions_are_looked_up_in_configured_sets_only() {
        let dir = tempdir().unwrap();
        let (reaction, mut database) = setup(
            dir.path(),
            "{ label = \"ethane\", coefficient = 2.0 }, { label = \"methane\", coefficient = -1.0 }",
        );
        let extras = dir.path().join("extras.toml");
        fs::write(&extras, alkane_references().replace("name = \"main\"", "name = \"extras\"")).unwrap();
        database.load(&[&extras]).unwrap();

        assert!(evaluate(&reaction, &database, &config(Some(vec!["extras".to_string()]))).is_ok());
        assert!(matches!(
            evaluate(&reaction, &database, &config(Some(vec!["other".to_string()]))),
            Err(CliError::Reference(_))
        ));
    }
}
