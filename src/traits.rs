// src/traits.rs
use crate::core::{Dataset, NbError, Posterior, Prediction, Query, Result};

/// A classifier over categorical features that derives everything it needs
/// from the dataset handed to each call.
pub trait CategoricalClassifier {
    /// Posterior over every class observed in `dataset`.
    ///
    /// `query` should hold one value per feature. This is not checked here:
    /// surplus values are ignored and absent ones count as missing.
    fn predict_proba(&self, dataset: &Dataset, query: &Query) -> Posterior;

    /// Most probable class along with the full posterior. Never fails; an
    /// empty dataset gives an empty posterior and no label.
    fn predict(&self, dataset: &Dataset, query: &Query) -> Prediction {
        Prediction::from_posterior(self.predict_proba(dataset, query))
    }

    /// Like [`CategoricalClassifier::predict`], but reports an empty dataset
    /// or a query of the wrong length instead of returning a degenerate result.
    fn try_predict(&self, dataset: &Dataset, query: &Query) -> Result<Prediction> {
        if dataset.is_empty() {
            return Err(NbError::EmptyDataset);
        }
        if query.len() != dataset.n_features() {
            return Err(NbError::IncompatibleDimensions {
                context: "query length".to_string(),
                expected: dataset.n_features(),
                got: query.len(),
            });
        }
        Ok(self.predict(dataset, query))
    }
}
