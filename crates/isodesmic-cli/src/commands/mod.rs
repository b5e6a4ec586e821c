pub mod constraints;
pub mod estimate;
pub mod levels;

use crate::config::AppConfig;
use crate::error::{CliError, Result};
use isodesmic::reference::database::ReferenceDatabase;
use tracing::info;

/// Loads every reference set named in the merged configuration.
pub(crate) fn load_database(config: &AppConfig) -> Result<ReferenceDatabase> {
    if config.reference_paths.is_empty() {
        return Err(CliError::Config(
            "No reference sets given. Pass --references or set `references.paths` in the config file."
                .to_string(),
        ));
    }
    let mut database = ReferenceDatabase::new();
    database.load(&config.reference_paths)?;
    info!(
        sets = database.sets().len(),
        species = database.species().count(),
        "Reference database ready."
    );
    Ok(database)
}
