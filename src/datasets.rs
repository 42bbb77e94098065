// src/datasets.rs

//! Small labelled demo tables, usable out of the box with any
//! [`CategoricalClassifier`](crate::traits::CategoricalClassifier).

use crate::core::{Dataset, NbError, Result};

pub const ANIMALS: &str = "Animals Information";
pub const WEATHER_AND_ROAD: &str = "Weather and Road Condition";
pub const LOAN_APPROVAL: &str = "Loan Approval";
pub const EMAIL_SPAM: &str = "Email Spam Detection";

/// Display names of every built-in dataset.
pub const NAMES: [&str; 4] = [ANIMALS, WEATHER_AND_ROAD, LOAN_APPROVAL, EMAIL_SPAM];

pub fn animals() -> Dataset {
    Dataset::from_table(
        ["Animal", "Size", "Color", "Pettable"],
        &[
            ["Dog", "Medium", "Black", "Yes"],
            ["Dog", "Big", "White", "No"],
            ["Rat", "Small", "White", "Yes"],
            ["Cow", "Big", "White", "Yes"],
            ["Cow", "Small", "Brown", "No"],
            ["Cow", "Big", "Black", "Yes"],
            ["Rat", "Big", "Brown", "No"],
            ["Dog", "Small", "Brown", "Yes"],
            ["Dog", "Medium", "Brown", "Yes"],
            ["Cow", "Medium", "White", "No"],
            ["Dog", "Small", "Black", "Yes"],
            ["Rat", "Medium", "Black", "No"],
            ["Rat", "Small", "Brown", "No"],
            ["Cow", "Big", "White", "Yes"],
        ],
    )
}

pub fn weather_and_road() -> Dataset {
    Dataset::from_table(
        ["Weather", "Road", "Traffic", "Engine Problem", "Accident"],
        &[
            ["Rain", "Bad", "High", "No", "Yes"],
            ["Snow", "Average", "Normal", "Yes", "No"],
            ["Clear", "Bad", "Light", "No", "No"],
            ["Clear", "Good", "Light", "Yes", "Yes"],
            ["Snow", "Good", "Normal", "No", "No"],
            ["Rain", "Average", "Light", "No", "No"],
            ["Rain", "Good", "Normal", "No", "No"],
            ["Snow", "Bad", "High", "No", "Yes"],
            ["Clear", "Good", "High", "Yes", "No"],
            ["Clear", "Bad", "High", "Yes", "Yes"],
        ],
    )
}

pub fn loan_approval() -> Dataset {
    Dataset::from_table(
        ["Age", "Income", "Credit", "Employment", "Approved"],
        &[
            ["Young", "High", "Good", "Employed", "Yes"],
            ["Middle", "Low", "Poor", "Unemployed", "No"],
            ["Senior", "High", "Excellent", "Retired", "Yes"],
            ["Young", "Low", "Good", "Employed", "No"],
            ["Middle", "High", "Poor", "Employed", "Yes"],
            ["Senior", "Low", "Excellent", "Retired", "No"],
            ["Young", "High", "Poor", "Employed", "No"],
            ["Middle", "High", "Excellent", "Employed", "Yes"],
            ["Senior", "Low", "Good", "Retired", "No"],
            ["Young", "Low", "Excellent", "Employed", "Yes"],
        ],
    )
}

pub fn email_spam() -> Dataset {
    Dataset::from_table(
        ["Offer", "Link", "Greeting", "Sender Known", "Spam"],
        &[
            ["Yes", "Yes", "Yes", "No", "Yes"],
            ["No", "No", "Yes", "Yes", "No"],
            ["Yes", "Yes", "No", "No", "Yes"],
            ["No", "Yes", "Yes", "Yes", "No"],
            ["Yes", "No", "No", "No", "Yes"],
            ["No", "No", "Yes", "No", "No"],
            ["Yes", "Yes", "Yes", "Yes", "No"],
            ["No", "Yes", "No", "No", "Yes"],
            ["Yes", "No", "Yes", "Yes", "No"],
            ["No", "No", "No", "No", "Yes"],
        ],
    )
}

/// Every built-in dataset with its display name, in [`NAMES`] order.
pub fn all() -> Vec<(&'static str, Dataset)> {
    vec![
        (ANIMALS, animals()),
        (WEATHER_AND_ROAD, weather_and_road()),
        (LOAN_APPROVAL, loan_approval()),
        (EMAIL_SPAM, email_spam()),
    ]
}

pub fn by_name(name: &str) -> Result<Dataset> {
    match name {
        ANIMALS => Ok(animals()),
        WEATHER_AND_ROAD => Ok(weather_and_road()),
        LOAN_APPROVAL => Ok(loan_approval()),
        EMAIL_SPAM => Ok(email_spam()),
        _ => Err(NbError::UnknownDataset(format!(
            "'{}' is not one of {:?}",
            name, NAMES
        ))),
    }
}
