// src/algorithms/categorical_nb.rs

use crate::core::{Dataset, NbError, Posterior, Prediction, Query, Result, MISSING};
use crate::traits::CategoricalClassifier;
use crate::utils::normalize;
use log::{debug, trace};
use ndarray::{Array1, Array2, Axis};
use std::collections::{BTreeMap, HashMap};

/// Configuration for the categorical Naive Bayes classifier.
#[derive(Debug, Clone)]
pub struct NaiveBayesConfig {
    /// Pseudo-count added to every prior and likelihood count.
    /// `1.0` is Laplace (add-one) smoothing; other positive values give Lidstone smoothing.
    pub alpha: f64,
}

impl Default for NaiveBayesConfig {
    fn default() -> Self {
        NaiveBayesConfig { alpha: 1.0 }
    }
}

impl NaiveBayesConfig {
    /// A non-positive or non-finite `alpha` would produce zero or negative
    /// probabilities.
    pub fn validate(&self) -> Result<()> {
        if !(self.alpha.is_finite() && self.alpha > 0.0) {
            return Err(NbError::InvalidInput(format!(
                "Smoothing alpha must be a positive finite number, got {}.",
                self.alpha
            )));
        }
        Ok(())
    }
}

/// Smoothed counts of one feature column.
#[derive(Debug, Clone)]
struct FeatureTable {
    /// Observed value -> column of `likelihoods`, in sorted value order.
    values: BTreeMap<String, usize>,
    /// `P(value | class)`, shape `(n_classes, |values|)`.
    likelihoods: Array2<f64>,
    /// `|V_i|` as used in the smoothing denominator; never below 1.
    domain_size: f64,
}

/// Priors and smoothed likelihoods materialized from one dataset.
///
/// Built at the start of a prediction and dropped after it, so a dataset that
/// grows between calls is always seen in full.
#[derive(Debug, Clone)]
pub struct LikelihoodTable {
    classes: Vec<String>,
    class_counts: Array1<f64>,
    priors: Array1<f64>,
    features: Vec<FeatureTable>,
    alpha: f64,
}

impl LikelihoodTable {
    pub fn fit(dataset: &Dataset, config: &NaiveBayesConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(dataset, config.alpha))
    }

    /// `alpha` must already be validated.
    pub(crate) fn build(dataset: &Dataset, alpha: f64) -> Self {
        let classes = dataset.classes();
        let class_index: HashMap<&str, usize> = classes
            .iter()
            .enumerate()
            .map(|(idx, c)| (c.as_str(), idx))
            .collect();
        let row_classes: Vec<usize> = dataset
            .labels()
            .iter()
            .map(|label| class_index[label.as_str()])
            .collect();

        let n_classes = classes.len();
        let mut class_counts = Array1::<f64>::zeros(n_classes);
        for &c in &row_classes {
            class_counts[c] += 1.0;
        }

        let n_rows = dataset.n_rows() as f64;
        let prior_denom = n_rows + alpha * n_classes as f64;
        let priors = class_counts.mapv(|count| (count + alpha) / prior_denom);

        let features = (0..dataset.n_features())
            .map(|feature| {
                let values: BTreeMap<String, usize> = dataset
                    .feature_domain(feature)
                    .into_iter()
                    .enumerate()
                    .map(|(idx, v)| (v, idx))
                    .collect();

                let mut counts = Array2::<f64>::zeros((n_classes, values.len()));
                if let Some(column) = dataset.feature_column(feature) {
                    for (value, &c) in column.iter().zip(&row_classes) {
                        counts[[c, values[value]]] += 1.0;
                    }
                }

                // Shared by every class so the per-class estimates stay comparable.
                let domain_size = values.len().max(1) as f64;
                let denom = class_counts
                    .mapv(|n_c| n_c + alpha * domain_size)
                    .insert_axis(Axis(1));
                let likelihoods = (counts + alpha) / &denom;

                FeatureTable {
                    values,
                    likelihoods,
                    domain_size,
                }
            })
            .collect::<Vec<_>>();

        debug!(
            "fitted likelihood table: {} rows, {} classes, domain sizes {:?}",
            dataset.n_rows(),
            n_classes,
            features.iter().map(|f| f.values.len()).collect::<Vec<_>>()
        );

        LikelihoodTable {
            classes,
            class_counts,
            priors,
            features,
            alpha,
        }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn n_features(&self) -> usize {
        self.features.len()
    }

    fn class_idx(&self, class: &str) -> Option<usize> {
        self.classes.binary_search_by(|c| c.as_str().cmp(class)).ok()
    }

    pub fn prior(&self, class: &str) -> Option<f64> {
        self.class_idx(class).map(|c| self.priors[c])
    }

    /// Number of training rows labelled `class`.
    pub fn class_count(&self, class: &str) -> Option<usize> {
        self.class_idx(class).map(|c| self.class_counts[c] as usize)
    }

    /// Observed values of `feature`, sorted.
    pub fn domain(&self, feature: usize) -> Option<Vec<&str>> {
        self.features
            .get(feature)
            .map(|f| f.values.keys().map(String::as_str).collect())
    }

    /// Smoothed `P(value | feature, class)`. `None` when `value` was never
    /// observed for `feature`; see [`LikelihoodTable::unseen_likelihood`].
    pub fn likelihood(&self, class: &str, feature: usize, value: &str) -> Option<f64> {
        let c = self.class_idx(class)?;
        let table = self.features.get(feature)?;
        let v = *table.values.get(value)?;
        Some(table.likelihoods[[c, v]])
    }

    /// Factor applied for a value outside the observed domain of `feature`:
    /// `alpha / (rows_in_class + alpha * |V_i|)`.
    pub fn unseen_likelihood(&self, class: &str, feature: usize) -> Option<f64> {
        let c = self.class_idx(class)?;
        let table = self.features.get(feature)?;
        Some(self.alpha / (self.class_counts[c] + self.alpha * table.domain_size))
    }

    /// Unnormalized class scores in class order: the prior times the
    /// likelihood of every provided feature value.
    pub fn scores(&self, query: &Query) -> Array1<f64> {
        let mut scores = self.priors.clone();
        for (table, value) in self.features.iter().zip(query.values()) {
            if value == MISSING {
                // Missing: no evidence either way.
                continue;
            }
            match table.values.get(value) {
                Some(&v) => scores *= &table.likelihoods.column(v),
                None => {
                    // Unseen: same denominator as an observed value with a zero count.
                    let fallback = self
                        .class_counts
                        .mapv(|n_c| self.alpha / (n_c + self.alpha * table.domain_size));
                    scores *= &fallback;
                }
            }
        }
        scores
    }

    pub fn posterior(&self, query: &Query) -> Posterior {
        let scores = self.scores(query);
        trace!("class scores {:?} for query {:?}", scores, query.values());
        let probabilities = normalize(scores.view());
        self.classes
            .iter()
            .cloned()
            .zip(probabilities.iter().copied())
            .collect()
    }

    pub fn predict(&self, query: &Query) -> Prediction {
        Prediction::from_posterior(self.posterior(query))
    }
}

/// Categorical Naive Bayes over string-valued features.
///
/// Holds only its configuration. Every call fits a fresh [`LikelihoodTable`]
/// from the dataset it is given.
#[derive(Debug, Clone, Default)]
pub struct NaiveBayesClassifier {
    config: NaiveBayesConfig,
}

impl NaiveBayesClassifier {
    pub fn new(config: Option<NaiveBayesConfig>) -> Result<Self> {
        let config = config.unwrap_or_default();
        config.validate()?;
        Ok(NaiveBayesClassifier { config })
    }

    pub fn config(&self) -> &NaiveBayesConfig {
        &self.config
    }

    pub fn fit(&self, dataset: &Dataset) -> LikelihoodTable {
        LikelihoodTable::build(dataset, self.config.alpha)
    }
}

impl CategoricalClassifier for NaiveBayesClassifier {
    fn predict_proba(&self, dataset: &Dataset, query: &Query) -> Posterior {
        self.fit(dataset).posterior(query)
    }

    fn predict(&self, dataset: &Dataset, query: &Query) -> Prediction {
        let prediction = self.fit(dataset).predict(query);
        debug!(
            "predicted {} = {:?} (confidence {:?})",
            dataset.label_name(),
            prediction.label,
            prediction.confidence()
        );
        prediction
    }
}
