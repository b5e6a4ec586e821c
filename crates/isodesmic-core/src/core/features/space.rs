use super::counts::FeatureCounts;
use super::label::FeatureLabel;
use std::collections::HashMap;

/// A frozen, ordered mapping from feature labels to vector indices.
///
/// A label space is built once from a target's features and never grows. Label
/// order follows the first-seen order of the counts it was built from, which
/// makes vector layouts reproducible across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSpace {
    labels: Vec<FeatureLabel>,
    index: HashMap<FeatureLabel, usize>,
}

impl LabelSpace {
    pub fn from_counts(counts: &FeatureCounts) -> Self {
        let labels: Vec<FeatureLabel> = counts.labels().collect();
        let index = labels
            .iter()
            .enumerate()
            .map(|(i, label)| (*label, i))
            .collect();
        Self { labels, index }
    }

    pub fn index_of(&self, label: &FeatureLabel) -> Option<usize> {
        self.index.get(label).copied()
    }

    pub fn contains(&self, label: &FeatureLabel) -> bool {
        self.index.contains_key(label)
    }

    pub fn labels(&self) -> &[FeatureLabel] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
