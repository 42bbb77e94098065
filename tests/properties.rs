use catnb_rs::{CategoricalClassifier, Dataset, NaiveBayesClassifier, Query};
use proptest::prelude::*;

/// Up to three features over `v0..v3` and labels over `c0..c2`.
fn dataset_strategy() -> impl Strategy<Value = Dataset> {
    (1usize..4).prop_flat_map(|n_features| {
        prop::collection::vec((prop::collection::vec(0u8..4, n_features), 0u8..3), 1..30).prop_map(
            move |rows| {
                let mut columns: Vec<String> = (0..n_features).map(|i| format!("f{}", i)).collect();
                columns.push("label".to_string());
                let rows = rows
                    .into_iter()
                    .map(|(features, label)| {
                        let mut row: Vec<String> =
                            features.into_iter().map(|v| format!("v{}", v)).collect();
                        row.push(format!("c{}", label));
                        row
                    })
                    .collect();
                Dataset::new(columns, rows).unwrap()
            },
        )
    })
}

/// Query values may be missing, observed, or never observed (`v4`).
fn dataset_and_query() -> impl Strategy<Value = (Dataset, Query)> {
    dataset_strategy().prop_flat_map(|dataset| {
        let value = prop_oneof![
            Just(String::new()),
            (0u8..5).prop_map(|v| format!("v{}", v)),
        ];
        let query = prop::collection::vec(value, dataset.n_features()).prop_map(Query::new);
        (Just(dataset), query)
    })
}

proptest! {
    #[test]
    fn posterior_is_a_distribution_over_every_class((dataset, query) in dataset_and_query()) {
        let posterior = NaiveBayesClassifier::default().predict_proba(&dataset, &query);
        prop_assert_eq!(
            posterior.classes().map(str::to_string).collect::<Vec<_>>(),
            dataset.classes()
        );
        prop_assert!((posterior.total() - 1.0).abs() < 1e-9);
        for (_, p) in posterior.iter() {
            prop_assert!(p > 0.0);
        }
    }

    #[test]
    fn label_is_the_first_maximum((dataset, query) in dataset_and_query()) {
        let prediction = NaiveBayesClassifier::default().predict(&dataset, &query);
        let label = prediction.label.clone().unwrap();
        let best = prediction.posterior.get(&label).unwrap();
        for (class, p) in prediction.posterior.iter() {
            if class < label.as_str() {
                prop_assert!(p < best);
            } else {
                prop_assert!(p <= best);
            }
        }
    }

    #[test]
    fn prediction_is_idempotent((dataset, query) in dataset_and_query()) {
        let classifier = NaiveBayesClassifier::default();
        prop_assert_eq!(
            classifier.predict(&dataset, &query),
            classifier.predict(&dataset, &query)
        );
    }

    #[test]
    fn all_missing_query_yields_the_smoothed_priors(dataset in dataset_strategy()) {
        let posterior = NaiveBayesClassifier::default()
            .predict_proba(&dataset, &Query::all_missing(dataset.n_features()));
        let n = dataset.n_rows() as f64;
        let k = dataset.classes().len() as f64;
        for class in dataset.classes() {
            let count = dataset.labels().iter().filter(|l| **l == class).count() as f64;
            let expected = (count + 1.0) / (n + k);
            prop_assert!((posterior.get(&class).unwrap() - expected).abs() < 1e-12);
        }
    }
}
