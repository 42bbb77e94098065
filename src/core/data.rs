// src/core/data.rs
use crate::core::{NbError, Result};
use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Query value meaning "feature not provided".
pub const MISSING: &str = "";

/// A table of categorical values. The last column holds the class label,
/// every other column is a feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DatasetRecord", into = "DatasetRecord")]
pub struct Dataset {
    columns: Vec<String>,
    records: Array2<String>,
}

/// Wire shape of a dataset. Deserialization goes through `Dataset::new`
/// so a ragged table is rejected the same way as in code.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DatasetRecord {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TryFrom<DatasetRecord> for Dataset {
    type Error = NbError;

    fn try_from(record: DatasetRecord) -> Result<Self> {
        Dataset::new(record.columns, record.rows)
    }
}

impl From<Dataset> for DatasetRecord {
    fn from(dataset: Dataset) -> Self {
        let rows = dataset.rows().map(|row| row.to_vec()).collect();
        DatasetRecord {
            columns: dataset.columns,
            rows,
        }
    }
}

impl Dataset {
    /// Builds a dataset from column names (features first, label last) and rows.
    ///
    /// Every row must be non-empty and have exactly `columns.len()` values.
    /// Zero rows is allowed; predictions on such a dataset are degenerate.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        if columns.is_empty() {
            return Err(NbError::InvalidInput(
                "A dataset needs at least a label column.".to_string(),
            ));
        }
        let mut seen = BTreeSet::new();
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(NbError::InvalidInput(format!(
                    "Duplicate column name '{}'.",
                    name
                )));
            }
        }

        let width = columns.len();
        let n_rows = rows.len();
        let mut flat = Vec::with_capacity(n_rows * width);
        for (idx, row) in rows.into_iter().enumerate() {
            if row.is_empty() {
                return Err(NbError::EmptyRow(idx));
            }
            if row.len() != width {
                return Err(NbError::IncompatibleDimensions {
                    context: format!("column count of row {}", idx),
                    expected: width,
                    got: row.len(),
                });
            }
            flat.extend(row);
        }
        let records = Array2::from_shape_vec((n_rows, width), flat)?;

        Ok(Dataset { columns, records })
    }

    /// Borrowing variant of [`Dataset::new`], handy for literal tables.
    pub fn from_records<R, S>(columns: &[S], rows: &[R]) -> Result<Self>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let columns = columns.iter().map(|c| c.as_ref().to_string()).collect();
        let rows = rows
            .iter()
            .map(|row| row.as_ref().iter().map(|v| v.as_ref().to_string()).collect())
            .collect();
        Dataset::new(columns, rows)
    }

    /// Fixed-width tables are rectangular by construction.
    pub(crate) fn from_table<const W: usize>(columns: [&str; W], rows: &[[&str; W]]) -> Self {
        let records = Array2::from_shape_fn((rows.len(), W), |(r, c)| rows[r][c].to_string());
        Dataset {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            records,
        }
    }

    pub fn n_rows(&self) -> usize {
        self.records.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.columns.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn feature_names(&self) -> &[String] {
        &self.columns[..self.n_features()]
    }

    pub fn label_name(&self) -> &str {
        &self.columns[self.n_features()]
    }

    pub fn feature_index(&self, name: &str) -> Option<usize> {
        self.feature_names().iter().position(|f| f == name)
    }

    pub fn records(&self) -> &Array2<String> {
        &self.records
    }

    pub fn row(&self, idx: usize) -> Option<ArrayView1<'_, String>> {
        (idx < self.n_rows()).then(|| self.records.row(idx))
    }

    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, String>> + '_ {
        self.records.rows().into_iter()
    }

    /// The label column.
    pub fn labels(&self) -> ArrayView1<'_, String> {
        self.records.column(self.n_features())
    }

    pub fn feature_column(&self, feature: usize) -> Option<ArrayView1<'_, String>> {
        (feature < self.n_features()).then(|| self.records.column(feature))
    }

    /// Distinct labels in sorted order.
    pub fn classes(&self) -> Vec<String> {
        Self::distinct(self.labels())
    }

    /// Distinct values of one feature column in sorted order; empty for an
    /// out-of-range index.
    pub fn feature_domain(&self, feature: usize) -> Vec<String> {
        self.feature_column(feature)
            .map(Self::distinct)
            .unwrap_or_default()
    }

    fn distinct(column: ArrayView1<'_, String>) -> Vec<String> {
        column
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// One value per feature column, positionally aligned. [`MISSING`] leaves a
/// feature out of the prediction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Query {
    values: Vec<String>,
}

impl Query {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Query {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn all_missing(n_features: usize) -> Self {
        Query {
            values: vec![MISSING.to_string(); n_features],
        }
    }

    /// Starts an all-missing query sized for `dataset`, filled in by feature name.
    pub fn builder(dataset: &Dataset) -> QueryBuilder<'_> {
        QueryBuilder {
            dataset,
            query: Query::all_missing(dataset.n_features()),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn get(&self, feature: usize) -> Option<&str> {
        self.values.get(feature).map(String::as_str)
    }

    /// Out-of-range positions count as missing.
    pub fn is_missing(&self, feature: usize) -> bool {
        self.get(feature).map_or(true, |v| v == MISSING)
    }

    pub fn n_provided(&self) -> usize {
        self.values.iter().filter(|v| v.as_str() != MISSING).count()
    }
}

impl<S: Into<String>> FromIterator<S> for Query {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Query::new(iter)
    }
}

#[derive(Debug)]
pub struct QueryBuilder<'a> {
    dataset: &'a Dataset,
    query: Query,
}

impl<'a> QueryBuilder<'a> {
    pub fn set(mut self, feature: &str, value: impl Into<String>) -> Result<Self> {
        let idx = self.dataset.feature_index(feature).ok_or_else(|| {
            NbError::InvalidInput(format!(
                "Unknown feature '{}'. Expected one of {:?}.",
                feature,
                self.dataset.feature_names()
            ))
        })?;
        self.query.values[idx] = value.into();
        Ok(self)
    }

    pub fn build(self) -> Query {
        self.query
    }
}

/// Class -> probability, iterated in sorted class order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Posterior(BTreeMap<String, f64>);

impl Posterior {
    pub fn get(&self, class: &str) -> Option<f64> {
        self.0.get(class).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.0.iter().map(|(c, &p)| (c.as_str(), p))
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.keys().map(String::as_str)
    }

    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    /// Most probable class. On ties the first class in sorted order wins.
    pub fn argmax(&self) -> Option<(&str, f64)> {
        let mut best: Option<(&str, f64)> = None;
        for (class, p) in self.iter() {
            let better = match best {
                None => true,
                Some((_, best_p)) => p > best_p,
            };
            if better {
                best = Some((class, p));
            }
        }
        best
    }

    /// Classes by descending probability, ties kept in class order.
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }

    pub fn as_map(&self) -> &BTreeMap<String, f64> {
        &self.0
    }

    pub fn into_inner(self) -> BTreeMap<String, f64> {
        self.0
    }
}

impl FromIterator<(String, f64)> for Posterior {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Posterior(iter.into_iter().collect())
    }
}

/// The predicted label together with the full posterior it was picked from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PredictionRecord")]
pub struct Prediction {
    /// `None` only when the posterior is empty (no classes observed).
    pub label: Option<String>,
    pub posterior: Posterior,
}

/// Wire shape of a prediction; the label must be the one the posterior picks.
#[derive(Debug, Deserialize)]
struct PredictionRecord {
    label: Option<String>,
    posterior: Posterior,
}

impl TryFrom<PredictionRecord> for Prediction {
    type Error = NbError;

    fn try_from(record: PredictionRecord) -> Result<Self> {
        let prediction = Prediction::from_posterior(record.posterior);
        if prediction.label != record.label {
            return Err(NbError::InvalidInput(format!(
                "Label {:?} does not match the posterior, which picks {:?}.",
                record.label, prediction.label
            )));
        }
        Ok(prediction)
    }
}

impl Prediction {
    pub fn from_posterior(posterior: Posterior) -> Self {
        let label = posterior.argmax().map(|(class, _)| class.to_string());
        Prediction { label, posterior }
    }

    /// Posterior probability of the predicted label.
    pub fn confidence(&self) -> Option<f64> {
        self.label.as_deref().and_then(|l| self.posterior.get(l))
    }

    pub fn ranked(&self) -> Vec<(&str, f64)> {
        self.posterior.ranked()
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Prediction:")?;
        match (&self.label, self.confidence()) {
            (Some(label), Some(conf)) => {
                writeln!(f, "  Label:      {} ({:.1}%)", label, conf * 100.0)?
            }
            _ => writeln!(f, "  Label:      <none>")?,
        }
        writeln!(f, "  Posterior:")?;
        for (class, p) in self.ranked() {
            writeln!(f, "    {}: {:.4}", class, p)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pets() -> Dataset {
        Dataset::from_records(
            &["Animal", "Size", "Pettable"],
            &[
                ["Rat", "Small", "No"],
                ["Dog", "Big", "Yes"],
                ["Cow", "Big", "No"],
            ],
        )
        .unwrap()
    }

    #[test]
    fn shape_accessors() {
        let ds = pets();
        assert_eq!(ds.n_rows(), 3);
        assert_eq!(ds.n_features(), 2);
        assert_eq!(ds.feature_names(), ["Animal", "Size"]);
        assert_eq!(ds.label_name(), "Pettable");
        assert_eq!(ds.feature_index("Size"), Some(1));
        assert_eq!(ds.feature_index("Pettable"), None);
        assert_eq!(ds.labels().to_vec(), vec!["No", "Yes", "No"]);
        assert!(ds.row(3).is_none());
    }

    #[test]
    fn classes_and_domains_are_sorted_and_distinct() {
        let ds = pets();
        assert_eq!(ds.classes(), vec!["No", "Yes"]);
        assert_eq!(ds.feature_domain(0), vec!["Cow", "Dog", "Rat"]);
        assert_eq!(ds.feature_domain(1), vec!["Big", "Small"]);
        assert!(ds.feature_domain(2).is_empty());
    }

    #[test]
    fn ragged_row_is_rejected() {
        let err = Dataset::from_records(&["A", "L"], &[vec!["x", "y"], vec!["x"]]).unwrap_err();
        match err {
            NbError::IncompatibleDimensions { expected, got, .. } => {
                assert_eq!((expected, got), (2, 1));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn empty_row_is_rejected() {
        let rows: Vec<Vec<&str>> = vec![vec!["x", "y"], vec![]];
        let err = Dataset::from_records(&["A", "L"], &rows).unwrap_err();
        assert!(matches!(err, NbError::EmptyRow(1)));
    }

    #[test]
    fn label_column_is_required_and_names_unique() {
        let none: [&str; 0] = [];
        let rows: [[&str; 0]; 0] = [];
        assert!(matches!(
            Dataset::from_records(&none, &rows),
            Err(NbError::InvalidInput(_))
        ));
        let rows: [[&str; 2]; 0] = [];
        assert!(matches!(
            Dataset::from_records(&["A", "A"], &rows),
            Err(NbError::InvalidInput(_))
        ));
    }

    #[test]
    fn zero_rows_is_a_valid_dataset() {
        let rows: [[&str; 2]; 0] = [];
        let ds = Dataset::from_records(&["A", "L"], &rows).unwrap();
        assert!(ds.is_empty());
        assert!(ds.classes().is_empty());
        assert_eq!(ds.n_features(), 1);
    }

    #[test]
    fn ragged_json_is_rejected_on_deserialize() {
        let json = r#"{"columns":["A","L"],"rows":[["x","y"],["x"]]}"#;
        assert!(serde_json::from_str::<Dataset>(json).is_err());
    }

    #[test]
    fn builder_fills_by_name_and_leaves_the_rest_missing() {
        let ds = pets();
        let q = Query::builder(&ds).set("Size", "Big").unwrap().build();
        assert_eq!(q.values(), ["", "Big"]);
        assert!(q.is_missing(0));
        assert!(!q.is_missing(1));
        assert!(q.is_missing(7));
        assert_eq!(q.n_provided(), 1);

        let err = Query::builder(&ds).set("Colour", "Red").unwrap_err();
        assert!(err.to_string().contains("Colour"));
    }

    #[test]
    fn argmax_keeps_first_of_equal_maxima() {
        let posterior: Posterior = vec![
            ("b".to_string(), 0.4),
            ("a".to_string(), 0.4),
            ("c".to_string(), 0.2),
        ]
        .into_iter()
        .collect();
        assert_eq!(posterior.argmax(), Some(("a", 0.4)));
        assert_eq!(posterior.ranked(), vec![("a", 0.4), ("b", 0.4), ("c", 0.2)]);
    }

    #[test]
    fn all_zero_posterior_still_has_a_label() {
        let posterior: Posterior = vec![("x".to_string(), 0.0), ("y".to_string(), 0.0)]
            .into_iter()
            .collect();
        let prediction = Prediction::from_posterior(posterior);
        assert_eq!(prediction.label.as_deref(), Some("x"));
        assert_eq!(prediction.confidence(), Some(0.0));
    }

    #[test]
    fn empty_posterior_has_no_label() {
        let prediction = Prediction::from_posterior(Posterior::default());
        assert_eq!(prediction.label, None);
        assert_eq!(prediction.confidence(), None);
        assert!(prediction.to_string().contains("<none>"));
    }

    #[test]
    fn deserialized_label_must_agree_with_posterior() {
        let ok: Prediction =
            serde_json::from_str(r#"{"label":"B","posterior":{"A":0.1,"B":0.9}}"#).unwrap();
        assert_eq!(ok.label.as_deref(), Some("B"));

        for json in [
            r#"{"label":"Zzz","posterior":{"A":0.1,"B":0.9}}"#,
            r#"{"label":"A","posterior":{"A":0.1,"B":0.9}}"#,
            r#"{"label":null,"posterior":{"A":0.1,"B":0.9}}"#,
            r#"{"label":"A","posterior":{}}"#,
        ] {
            assert!(serde_json::from_str::<Prediction>(json).is_err(), "{}", json);
        }

        let empty: Prediction =
            serde_json::from_str(r#"{"label":null,"posterior":{}}"#).unwrap();
        assert_eq!(empty.label, None);
    }

    #[test]
    fn display_lists_classes_by_probability() {
        let posterior: Posterior = vec![("No".to_string(), 0.25), ("Yes".to_string(), 0.75)]
            .into_iter()
            .collect();
        let text = Prediction::from_posterior(posterior).to_string();
        assert!(text.contains("Label:      Yes (75.0%)"));
        let yes = text.find("Yes: 0.7500").unwrap();
        let no = text.find("No: 0.2500").unwrap();
        assert!(yes < no);
    }
}
