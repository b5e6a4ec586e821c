use super::counts::FeatureCounts;
use super::label::{ConservationRules, FeatureLabel};
use super::space::LabelSpace;
use super::vectorizer::{FeatureVectorizer, Vectorized};
use crate::core::species::Species;
use nalgebra::{DMatrix, DVector};
use std::io;
use std::sync::Arc;
use tracing::{debug, trace};

const TARGET_ROW_NAME: &str = "target";
const SPECIES_COLUMN_NAME: &str = "species";

/// The constraint space of one target species.
///
/// The label space is derived strictly from the target's own features when the
/// space is built, so the target always vectorizes. Candidates are vectorized
/// against that frozen space; any candidate with a feature the target lacks is
/// dropped. The space holds no mutable state, so [`ConstraintSpace::compute`]
/// can be called repeatedly, or concurrently, with identical results.
#[derive(Debug, Clone)]
pub struct ConstraintSpace {
    target: Arc<Species>,
    rules: ConservationRules,
    label_space: LabelSpace,
    target_vector: DVector<u32>,
}

impl ConstraintSpace {
    pub fn new(target: Arc<Species>, rules: ConservationRules) -> Self {
        let counts = FeatureCounts::extract(target.molecule(), rules);
        let label_space = LabelSpace::from_counts(&counts);
        // The space was built from these counts, so they line up index for index.
        let target_vector = DVector::from_iterator(label_space.len(), counts.iter().map(|(_, c)| c));

        debug!(
            target = %target,
            labels = label_space.len(),
            "Built constraint space."
        );

        Self {
            target,
            rules,
            label_space,
            target_vector,
        }
    }

    pub fn target(&self) -> &Arc<Species> {
        &self.target
    }

    pub fn rules(&self) -> ConservationRules {
        self.rules
    }

    pub fn label_space(&self) -> &LabelSpace {
        &self.label_space
    }

    pub fn target_vector(&self) -> &DVector<u32> {
        &self.target_vector
    }

    pub fn vectorizer(&self) -> FeatureVectorizer<'_> {
        FeatureVectorizer::new(&self.label_space, self.rules)
    }

    /// Vectorizes every candidate and keeps the compatible ones.
    ///
    /// Incompatible candidates are silently excluded. The accepted candidates and
    /// the rows of the candidate matrix follow the input order.
    pub fn compute(&self, candidates: &[Arc<Species>]) -> ConstraintSet {
        let vectorizer = self.vectorizer();
        let width = self.label_space.len();
        let mut accepted = Vec::new();
        let mut rows: Vec<u32> = Vec::with_capacity(candidates.len() * width);

        for candidate in candidates {
            match vectorizer.vectorize(candidate.molecule()) {
                Vectorized::Compatible(vector) => {
                    rows.extend(vector.iter());
                    accepted.push(Arc::clone(candidate));
                }
                Vectorized::Incompatible { label } => {
                    trace!(candidate = %candidate, %label, "Candidate has a feature outside the target's label space.");
                }
            }
        }

        debug!(
            target = %self.target,
            accepted = accepted.len(),
            dropped = candidates.len() - accepted.len(),
            "Filtered candidate species."
        );

        ConstraintSet {
            labels: self.label_space.labels().to_vec(),
            target_vector: self.target_vector.clone(),
            candidate_matrix: DMatrix::from_row_slice(accepted.len(), width, &rows),
            accepted,
        }
    }
}

/// The output of [`ConstraintSpace::compute`], ready to hand to a reaction solver.
///
/// Row `i` of `candidate_matrix` is the count vector of `accepted[i]`; columns
/// follow `labels`.
#[derive(Debug, Clone)]
pub struct ConstraintSet {
    pub labels: Vec<FeatureLabel>,
    pub target_vector: DVector<u32>,
    pub candidate_matrix: DMatrix<u32>,
    pub accepted: Vec<Arc<Species>>,
}

impl ConstraintSet {
    /// Number of accepted candidates.
    pub fn len(&self) -> usize {
        self.accepted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }

    /// Returns an accepted candidate with its count vector.
    pub fn row(&self, i: usize) -> Option<(&Arc<Species>, Vec<u32>)> {
        let species = self.accepted.get(i)?;
        Some((species, self.candidate_matrix.row(i).iter().copied().collect()))
    }

    /// Writes the set as a CSV table.
    ///
    /// The header is `species` followed by every label; the first data row holds
    /// the target vector, followed by one row per accepted candidate.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let header = std::iter::once(SPECIES_COLUMN_NAME.to_string())
            .chain(self.labels.iter().map(ToString::to_string));
        csv_writer.write_record(header)?;

        let target_row = std::iter::once(TARGET_ROW_NAME.to_string())
            .chain(self.target_vector.iter().map(ToString::to_string));
        csv_writer.write_record(target_row)?;

        for (i, species) in self.accepted.iter().enumerate() {
            let row = self.candidate_matrix.row(i);
            let record =
                std::iter::once(species.to_string()).chain(row.iter().map(ToString::to_string));
            csv_writer.write_record(record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
