use super::load_database;
use crate::cli::LevelsArgs;
use crate::config::{Overrides, PartialAppConfig};
use crate::error::Result;
use std::io::Write;
use tracing::info;

pub fn run(args: LevelsArgs) -> Result<()> {
    let config = PartialAppConfig::load(&args.source)?.merge_with_cli(&args.source, Overrides::default())?;
    let database = load_database(&config)?;

    let levels = database.list_available_levels();
    info!("Found {} level(s) of theory.", levels.len());
    write_levels(&levels, &mut std::io::stdout().lock())?;
    Ok(())
}

fn write_levels<W: Write>(levels: &[String], out: &mut W) -> std::io::Result<()> {
    if levels.is_empty() {
        writeln!(out, "No levels of theory found in the reference sets.")?;
    }
    for level in levels {
        writeln!(out, "{}", level)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_levels_prints_one_per_line() {
        let mut out = Vec::new();
        write_levels(&["a".to_string(), "b".to_string()], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a\nb\n");
    }

    #[test]
    fn write_levels_reports_empty_database() {
        let mut out = Vec::new();
        write_levels(&[], &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("No levels"));
    }
}
