use crate::core::features::label::ConservationRules;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimateConfig {
    /// Level of theory of the low-level data; references are drawn at this level.
    pub level_of_theory: String,
    pub rules: ConservationRules,
    /// Reference sets to draw from; all loaded sets when `None`.
    pub reference_sets: Option<Vec<String>>,
}

#[derive(Default)]
pub struct EstimateConfigBuilder {
    level_of_theory: Option<String>,
    rules: Option<ConservationRules>,
    reference_sets: Option<Vec<String>>,
}

impl EstimateConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level_of_theory(mut self, level: &str) -> Self {
        self.level_of_theory = Some(level.to_string());
        self
    }
    pub fn rules(mut self, rules: ConservationRules) -> Self {
        self.rules = Some(rules);
        self
    }
    pub fn conserve_bonds(mut self, conserve: bool) -> Self {
        self.rules.get_or_insert_with(ConservationRules::default).bonds = conserve;
        self
    }
    pub fn conserve_ring_sizes(mut self, conserve: bool) -> Self {
        self.rules.get_or_insert_with(ConservationRules::default).ring_sizes = conserve;
        self
    }
    pub fn reference_sets(mut self, sets: Vec<String>) -> Self {
        self.reference_sets = Some(sets);
        self
    }

    pub fn build(self) -> Result<EstimateConfig, ConfigError> {
        let level_of_theory = self
            .level_of_theory
            .filter(|level| !level.trim().is_empty())
            .ok_or(ConfigError::MissingParameter("level_of_theory"))?;
        Ok(EstimateConfig {
            level_of_theory,
            rules: self.rules.unwrap_or_default(),
            reference_sets: self.reference_sets,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_requires_level_of_theory() {
        assert_eq!(
            EstimateConfigBuilder::new().build().unwrap_err(),
            ConfigError::MissingParameter("level_of_theory")
        );
        assert_eq!(
            EstimateConfigBuilder::new().level_of_theory(" ").build().unwrap_err(),
            ConfigError::MissingParameter("level_of_theory")
        );
    }

    #[test]
    fn build_defaults_to_full_conservation() {
        let config = EstimateConfigBuilder::new()
            .level_of_theory("b3lyp/6-31g*")
            .build()
            .unwrap();
        assert_eq!(config.rules, ConservationRules::default());
        assert!(config.reference_sets.is_none());
    }

    #[test]
    fn switches_override_individual_rules() {
        let config = EstimateConfigBuilder::new()
            .level_of_theory("b3lyp/6-31g*")
            .conserve_ring_sizes(false)
            .reference_sets(vec!["main".to_string()])
            .build()
            .unwrap();
        assert!(config.rules.bonds);
        assert!(!config.rules.ring_sizes);
        assert_eq!(config.reference_sets, Some(vec!["main".to_string()]));
    }
}
