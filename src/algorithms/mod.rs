pub mod categorical_nb;

pub use categorical_nb::{LikelihoodTable, NaiveBayesClassifier, NaiveBayesConfig};
