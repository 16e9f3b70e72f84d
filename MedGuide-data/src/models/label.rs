use serde::{Deserialize, Serialize};

/// Envelope returned by the openFDA `drug/label.json` endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabelResponse {
    /// Matching label documents. Absent when the upstream returns only metadata.
    #[serde(default)]
    pub results: Vec<RawLabel>,
}

/// Harmonized `openfda` block attached to each label
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawOpenFda {
    #[serde(default)]
    pub generic_name: Vec<String>,

    #[serde(default)]
    pub brand_name: Vec<String>,

    #[serde(default)]
    pub substance_name: Vec<String>,

    /// Established pharmacologic class
    #[serde(default)]
    pub pharm_class_epc: Vec<String>,

    #[serde(default)]
    pub route: Vec<String>,

    #[serde(default)]
    pub dosage_form: Vec<String>,

    /// e.g. "HUMAN PRESCRIPTION DRUG" or "HUMAN OTC DRUG"
    #[serde(default)]
    pub product_type: Vec<String>,
}

/// Storage model for a single drug label as delivered by openFDA.
///
/// Only the sections the reshaping layer reads are modelled; every other
/// key in the upstream document is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawLabel {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub set_id: Option<String>,

    #[serde(default)]
    pub effective_time: Option<String>,

    #[serde(default)]
    pub openfda: Option<RawOpenFda>,

    #[serde(default)]
    pub active_ingredient: Vec<String>,

    #[serde(default)]
    pub purpose: Vec<String>,

    #[serde(default)]
    pub description: Vec<String>,

    #[serde(default)]
    pub indications_and_usage: Vec<String>,

    #[serde(default)]
    pub warnings: Vec<String>,

    #[serde(default)]
    pub warnings_and_cautions: Vec<String>,

    #[serde(default)]
    pub boxed_warning: Vec<String>,

    #[serde(default)]
    pub do_not_use: Vec<String>,

    #[serde(default)]
    pub pregnancy_or_breastfeeding: Vec<String>,

    #[serde(default)]
    pub information_for_patients: Vec<String>,

    #[serde(default)]
    pub when_using: Vec<String>,

    #[serde(default)]
    pub dosage_and_administration: Vec<String>,

    #[serde(default)]
    pub drug_interactions: Vec<String>,

    #[serde(default)]
    pub stop_use: Vec<String>,

    #[serde(default)]
    pub adverse_reactions: Vec<String>,

    #[serde(default)]
    pub drug_abuse_and_dependence: Vec<String>,
}
