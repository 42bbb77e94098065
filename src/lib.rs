// src/lib.rs

//! `catnb_rs` is a Rust crate for categorical Naive Bayes classification.
//!
//! Feature domains and the class set are derived from the dataset on every
//! call; nothing is cached between predictions. Counts are smoothed with a
//! configurable pseudo-count (Laplace, add-one, by default) so no class ever
//! receives a zero probability.
//!
//! ```
//! use catnb_rs::{datasets, CategoricalClassifier, NaiveBayesClassifier, Query};
//!
//! let dataset = datasets::animals();
//! let query = Query::builder(&dataset)
//!     .set("Animal", "Dog")?
//!     .set("Size", "Big")?
//!     .build();
//! let prediction = NaiveBayesClassifier::default().predict(&dataset, &query);
//! assert!(prediction.label.is_some());
//! assert!((prediction.posterior.total() - 1.0).abs() < 1e-9);
//! # Ok::<(), catnb_rs::NbError>(())
//! ```

pub mod algorithms;
pub mod core;
pub mod datasets;
pub mod traits;
pub mod utils;

// Re-export key components for easier use by library consumers
pub use crate::algorithms::{LikelihoodTable, NaiveBayesClassifier, NaiveBayesConfig};
pub use crate::core::{Dataset, NbError, Posterior, Prediction, Query, QueryBuilder, Result, MISSING};
pub use crate::traits::CategoricalClassifier;
