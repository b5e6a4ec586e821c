use super::error::{ReferenceError, ReferenceLoadError};
use super::records::ReferenceSetFile;
use super::species::ReferenceSpecies;
use crate::core::species::Species;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

const REFERENCE_FILE_EXTENSION: &str = "toml";

/// A named collection of reference species.
#[derive(Debug, Clone)]
pub struct ReferenceSet {
    name: String,
    species: Vec<ReferenceSpecies>,
}

impl ReferenceSet {
    pub fn new(name: &str, species: Vec<ReferenceSpecies>) -> Self {
        Self {
            name: name.to_string(),
            species,
        }
    }

    /// Loads a reference set from a TOML file or a directory of TOML files.
    ///
    /// A file set is named by its `name` key, or by the file stem when the key is
    /// absent. A directory set is named after the directory; its `*.toml` files are
    /// read in file-name order and their species concatenated.
    ///
    /// Species lacking either reference data or calculated data are skipped with a
    /// warning.
    ///
    /// # Errors
    ///
    /// Returns `ReferenceLoadError` if a file cannot be read or parsed, or if a
    /// usable species record is malformed.
    pub fn load(path: &Path) -> Result<Self, ReferenceLoadError> {
        let (name, files) = if path.is_dir() {
            (file_name(path), list_reference_files(path)?)
        } else {
            (String::new(), vec![path.to_path_buf()])
        };

        let mut set_name = name;
        let mut species = Vec::new();
        for file in &files {
            let parsed = read_set_file(file)?;
            if set_name.is_empty() {
                set_name = parsed.name.clone().unwrap_or_else(|| file_stem(file));
            }
            append_species(&set_name, file, parsed, &mut species)?;
        }

        info!(
            set = %set_name,
            path = %path.display(),
            species = species.len(),
            "Loaded reference set."
        );

        Ok(Self {
            name: set_name,
            species,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn species(&self) -> &[ReferenceSpecies] {
        &self.species
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

fn list_reference_files(dir: &Path) -> Result<Vec<PathBuf>, ReferenceLoadError> {
    let io_error = |e: std::io::Error| ReferenceLoadError::Io {
        path: dir.to_string_lossy().to_string(),
        source: e,
    };
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == REFERENCE_FILE_EXTENSION) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn read_set_file(path: &Path) -> Result<ReferenceSetFile, ReferenceLoadError> {
    let content = std::fs::read_to_string(path).map_err(|e| ReferenceLoadError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    toml::from_str(&content).map_err(|e| ReferenceLoadError::Toml {
        path: path.to_string_lossy().to_string(),
        source: e,
    })
}

fn append_species(
    set_name: &str,
    path: &Path,
    file: ReferenceSetFile,
    species: &mut Vec<ReferenceSpecies>,
) -> Result<(), ReferenceLoadError> {
    for record in file.species {
        if !record.is_usable() {
            warn!(
                species = %record.label,
                set = %set_name,
                "Species does not have any reference data and/or calculated data. This entry will not be added."
            );
            continue;
        }
        let converted = record
            .to_reference_species()
            .map_err(|e| ReferenceLoadError::Record {
                path: path.to_string_lossy().to_string(),
                species: record.label.clone(),
                source: e,
            })?;
        species.push(converted);
    }
    Ok(())
}

/// An ordered collection of reference sets.
///
/// Sets keep the order in which they were loaded, and so do the species they
/// yield. Structural duplicates across sets are not detected.
#[derive(Debug, Clone, Default)]
pub struct ReferenceDatabase {
    sets: Vec<ReferenceSet>,
}

impl ReferenceDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every path as a reference set and adds it to the database.
    ///
    /// # Errors
    ///
    /// Stops at the first set that fails to load; sets loaded before it stay in
    /// the database.
    pub fn load<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<(), ReferenceLoadError> {
        for path in paths {
            let set = ReferenceSet::load(path.as_ref())?;
            self.insert_set(set);
        }
        Ok(())
    }

    /// Adds a set, replacing any set of the same name in place.
    pub fn insert_set(&mut self, set: ReferenceSet) {
        match self.sets.iter_mut().find(|s| s.name == set.name) {
            Some(existing) => {
                debug!(set = %set.name, "Replacing previously loaded reference set.");
                *existing = set;
            }
            None => self.sets.push(set),
        }
    }

    pub fn sets(&self) -> &[ReferenceSet] {
        &self.sets
    }

    pub fn set(&self, name: &str) -> Option<&ReferenceSet> {
        self.sets.iter().find(|s| s.name == name)
    }

    /// Iterates over every species of every set, in load order.
    pub fn species(&self) -> impl Iterator<Item = &ReferenceSpecies> {
        self.sets.iter().flat_map(|s| s.species.iter())
    }

    /// Builds reaction participants for every species with data at `level_of_theory`.
    ///
    /// Only the named sets are searched when `sets` is given; otherwise all sets
    /// are. Species without calculated data at that level or without reference
    /// data are passed over.
    ///
    /// # Errors
    ///
    /// Returns `ReferenceError::UnknownSet` for a set name that is not loaded and
    /// propagates the errors of [`ReferenceSpecies::to_species`].
    pub fn extract_level_of_theory(
        &self,
        level_of_theory: &str,
        sets: Option<&[String]>,
    ) -> Result<Vec<Arc<Species>>, ReferenceError> {
        let mut references = Vec::new();
        for set in self.select_sets(sets)? {
            for species in &set.species {
                if !species.has_level_of_theory(level_of_theory) || species.reference_data.is_empty() {
                    continue;
                }
                references.push(Arc::new(species.to_species(level_of_theory, None)?));
            }
        }

        debug!(
            level = level_of_theory,
            references = references.len(),
            "Extracted reference species."
        );
        Ok(references)
    }

    /// Returns every level of theory with calculated data, sorted and unique.
    pub fn list_available_levels(&self) -> Vec<String> {
        self.species()
            .flat_map(|s| s.levels_of_theory())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Finds the first species whose set index equals `index`.
    pub fn species_by_index(&self, index: usize) -> Option<&ReferenceSpecies> {
        self.species().find(|s| s.index == Some(index))
    }

    /// Finds the first species with the given label.
    pub fn species_by_label(&self, label: &str) -> Option<&ReferenceSpecies> {
        self.species().find(|s| s.label == label)
    }

    /// Finds the first species with the given label, searching only the named
    /// sets when `sets` is given.
    ///
    /// # Errors
    ///
    /// Returns `ReferenceError::UnknownSet` for a set name that is not loaded.
    pub fn species_by_label_in(
        &self,
        label: &str,
        sets: Option<&[String]>,
    ) -> Result<Option<&ReferenceSpecies>, ReferenceError> {
        Ok(self
            .select_sets(sets)?
            .into_iter()
            .flat_map(|set| set.species.iter())
            .find(|s| s.label == label))
    }

    fn select_sets(&self, sets: Option<&[String]>) -> Result<Vec<&ReferenceSet>, ReferenceError> {
        match sets {
            Some(names) => names
                .iter()
                .map(|name| {
                    self.set(name)
                        .ok_or_else(|| ReferenceError::UnknownSet(name.clone()))
                })
                .collect(),
            None => Ok(self.sets.iter().collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const LEVEL: &str = "wb97m-v/def2-tzvpd";

    fn species_toml(label: &str, index: usize, with_reference: bool, levels: &[&str]) -> String {
        let mut text = format!(
            "[[species]]\nlabel = \"{label}\"\nindex = {index}\n\n[species.molecule]\natoms = [{{ serial = 1, element = \"C\", hydrogens = 4 }}]\n\n"
        );
        if with_reference {
            text.push_str(
                "[[species.reference-data]]\nsource = \"ATcT\"\nh298 = { value = -74.5, unit = \"kJ/mol\", uncertainty = 0.1 }\n\n",
            );
        }
        for level in levels {
            text.push_str(&format!(
                "[[species.calculated-data]]\nlevel-of-theory = \"{level}\"\nh298 = {{ value = -70.0, unit = \"kJ/mol\" }}\n\n"
            ));
        }
        text
    }

    #[test]
    fn load_file_skips_unusable_species_and_uses_name_key() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("small.toml");
        let content = format!(
            "name = \"main\"\n\n{}{}{}",
            species_toml("methane", 0, true, &[LEVEL]),
            species_toml("no-reference", 1, false, &[LEVEL]),
            species_toml("no-calculation", 2, true, &[]),
        );
        fs::write(&path, content).unwrap();

        let set = ReferenceSet::load(&path).unwrap();
        assert_eq!(set.name(), "main");
        assert_eq!(set.len(), 1);
        assert_eq!(set.species()[0].label, "methane");
    }

    #[test]
    fn load_file_without_name_uses_file_stem() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("extras.toml");
        fs::write(&path, species_toml("methane", 0, true, &[LEVEL])).unwrap();

        let set = ReferenceSet::load(&path).unwrap();
        assert_eq!(set.name(), "extras");
    }

    #[test]
    fn load_directory_reads_toml_files_in_name_order() {
        let dir = tempdir().unwrap();
        let set_dir = dir.path().join("curated");
        fs::create_dir(&set_dir).unwrap();
        fs::write(set_dir.join("1.toml"), species_toml("second", 1, true, &[LEVEL])).unwrap();
        fs::write(set_dir.join("0.toml"), species_toml("first", 0, true, &[LEVEL])).unwrap();
        fs::write(set_dir.join("notes.txt"), "not a reference file").unwrap();

        let set = ReferenceSet::load(&set_dir).unwrap();
        assert_eq!(set.name(), "curated");
        let labels: Vec<&str> = set.species().iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["first", "second"]);
    }

    #[test]
    fn load_reports_missing_and_malformed_files() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            ReferenceSet::load(&dir.path().join("missing.toml")),
            Err(ReferenceLoadError::Io { .. })
        ));

        let bad = dir.path().join("bad.toml");
        fs::write(&bad, "this is = = not toml").unwrap();
        assert!(matches!(
            ReferenceSet::load(&bad),
            Err(ReferenceLoadError::Toml { .. })
        ));

        let broken = dir.path().join("broken.toml");
        fs::write(
            &broken,
            species_toml("x", 0, true, &[LEVEL]).replace("\"C\"", "\"Qq\""),
        )
        .unwrap();
        assert!(matches!(
            ReferenceSet::load(&broken),
            Err(ReferenceLoadError::Record { species, .. }) if species == "x"
        ));
    }

    #[test]
    fn database_extracts_species_at_level_of_theory() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.toml");
        let b = dir.path().join("b.toml");
        fs::write(
            &a,
            format!(
                "{}{}",
                species_toml("methane", 0, true, &[LEVEL, "b3lyp/6-31g*"]),
                species_toml("ethane", 1, true, &["b3lyp/6-31g*"]),
            ),
        )
        .unwrap();
        fs::write(&b, species_toml("propane", 2, true, &[LEVEL])).unwrap();

        let mut database = ReferenceDatabase::new();
        database.load(&[&a, &b]).unwrap();
        assert_eq!(database.sets().len(), 2);

        let all = database.extract_level_of_theory(LEVEL, None).unwrap();
        let labels: Vec<String> = all.iter().map(|s| s.to_string()).collect();
        assert_eq!(labels, vec!["methane", "propane"]);
        assert!(all.iter().all(|s| s.is_reference()));
        assert_eq!(all[0].source(), Some("ATcT"));

        let only_b = database
            .extract_level_of_theory(LEVEL, Some(&["b".to_string()]))
            .unwrap();
        assert_eq!(only_b.len(), 1);

        assert_eq!(
            database
                .extract_level_of_theory(LEVEL, Some(&["c".to_string()]))
                .unwrap_err(),
            ReferenceError::UnknownSet("c".to_string())
        );
    }

    #[test]
    fn database_lookups_and_levels() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.toml");
        fs::write(
            &a,
            format!(
                "{}{}",
                species_toml("methane", 0, true, &[LEVEL, "b3lyp/6-31g*"]),
                species_toml("ethane", 1, true, &["b3lyp/6-31g*"]),
            ),
        )
        .unwrap();

        let mut database = ReferenceDatabase::new();
        database.load(&[&a]).unwrap();

        assert_eq!(
            database.list_available_levels(),
            vec!["b3lyp/6-31g*".to_string(), LEVEL.to_string()]
        );
        assert_eq!(database.species_by_index(1).unwrap().label, "ethane");
        assert_eq!(database.species_by_label("methane").unwrap().index, Some(0));
        assert!(database.species_by_label("butane").is_none());
    }

    #[test]
    fn loading_a_set_with_an_existing_name_replaces_it() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("first.toml");
        let second = dir.path().join("second.toml");
        fs::write(
            &first,
            format!("name = \"main\"\n{}", species_toml("methane", 0, true, &[LEVEL])),
        )
        .unwrap();
        fs::write(
            &second,
            format!("name = \"main\"\n{}", species_toml("ethane", 0, true, &[LEVEL])),
        )
        .unwrap();

        let mut database = ReferenceDatabase::new();
        database.load(&[&first, &second]).unwrap();
        assert_eq!(database.sets().len(), 1);
        assert_eq!(database.set("main").unwrap().species()[0].label, "ethane");
    }

    #[test]
    fn label_lookup_is_limited_to_selected_sets() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.toml");
        let b = dir.path().join("b.toml");
        fs::write(&a, species_toml("methane", 0, true, &[LEVEL])).unwrap();
        fs::write(&b, species_toml("propane", 1, true, &[LEVEL])).unwrap();

        let mut database = ReferenceDatabase::new();
        database.load(&[&a, &b]).unwrap();

        let only_a = Some(&["a".to_string()][..]);
        assert_eq!(
            database.species_by_label_in("methane", only_a).unwrap().map(|s| s.label.as_str()),
            Some("methane")
        );
        assert!(database.species_by_label_in("propane", only_a).unwrap().is_none());
        assert!(database.species_by_label_in("propane", None).unwrap().is_some());
        assert_eq!(
            database
                .species_by_label_in("methane", Some(&["c".to_string()]))
                .unwrap_err(),
            ReferenceError::UnknownSet("c".to_string())
        );
    }
}
