use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Generic name used when a label carries none
pub const UNKNOWN_GENERIC_NAME: &str = "Unknown";

/// One active ingredient with its labelled strength
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct ActiveIngredient {
    /// Ingredient name, e.g. "Ibuprofen"
    pub name: String,
    /// Strength token, e.g. "200" or "mg"
    pub strength: String,
}

/// Flattened view of one openFDA drug label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct MedicationRecord {
    /// First harmonized generic name, "Unknown" when absent
    pub generic_name: String,

    /// All brand names joined with ", "
    #[serde(default)]
    pub brand_name: String,

    #[serde(default)]
    pub active_ingredients: Vec<ActiveIngredient>,

    /// First established pharmacologic class
    #[serde(default)]
    pub drug_class: String,

    #[serde(default)]
    pub purpose: Vec<String>,

    #[serde(default)]
    pub description: String,

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

    /// Patient information section
    #[serde(default)]
    pub usage_information: Vec<String>,

    #[serde(default)]
    pub when_using: Vec<String>,

    #[serde(default)]
    pub dosage_and_administration: Vec<String>,

    #[serde(default)]
    pub drug_interactions: Vec<String>,

    #[serde(default)]
    pub stop_use: Vec<String>,

    /// Adverse reactions section
    #[serde(default)]
    pub side_effects: Vec<String>,

    #[serde(default)]
    pub route: Vec<String>,

    #[serde(default)]
    pub dosage_form: Vec<String>,

    /// Label document id
    pub id: Option<String>,

    pub set_id: Option<String>,

    /// Label effective date, YYYYMMDD
    pub effective_time: Option<String>,

    /// Product type, e.g. "HUMAN PRESCRIPTION DRUG"
    #[serde(default)]
    pub prescription_nonprescription: Vec<String>,

    #[serde(default)]
    pub adverse_reactions: Vec<String>,

    #[serde(default)]
    pub abuse_and_dependence: Vec<String>,
}

impl Default for MedicationRecord {
    fn default() -> Self {
        Self {
            generic_name: UNKNOWN_GENERIC_NAME.to_string(),
            brand_name: String::new(),
            active_ingredients: Vec::new(),
            drug_class: String::new(),
            purpose: Vec::new(),
            description: String::new(),
            indications_and_usage: Vec::new(),
            warnings: Vec::new(),
            warnings_and_cautions: Vec::new(),
            boxed_warning: Vec::new(),
            do_not_use: Vec::new(),
            pregnancy_or_breastfeeding: Vec::new(),
            usage_information: Vec::new(),
            when_using: Vec::new(),
            dosage_and_administration: Vec::new(),
            drug_interactions: Vec::new(),
            stop_use: Vec::new(),
            side_effects: Vec::new(),
            route: Vec::new(),
            dosage_form: Vec::new(),
            id: None,
            set_id: None,
            effective_time: None,
            prescription_nonprescription: Vec::new(),
            adverse_reactions: Vec::new(),
            abuse_and_dependence: Vec::new(),
        }
    }
}

impl MedicationRecord {
    /// True when the product type names a prescription (not OTC) drug
    pub fn is_prescription_only(&self) -> bool {
        self.prescription_nonprescription.iter().any(|kind| {
            let kind = kind.to_lowercase();
            kind.contains("prescription") && !kind.contains("nonprescription")
        })
    }

    /// Label effective date parsed from its `YYYYMMDD` form
    pub fn effective_date(&self) -> Option<NaiveDate> {
        self.effective_time
            .as_deref()
            .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y%m%d").ok())
    }

    /// One-line description for result cards
    pub fn summary_line(&self) -> String {
        if let Some(indication) = self.indications_and_usage.first() {
            let first_sentence = indication.split('.').next().unwrap_or_default().trim();
            if !first_sentence.is_empty() {
                return first_sentence.to_string();
            }
        }

        self.purpose
            .first()
            .filter(|p| !p.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| "Information not available".to_string())
    }
}

/// Lightweight autocomplete entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct MedicationSuggestion {
    pub id: Option<String>,

    /// First harmonized generic name, "Unknown" when absent
    pub generic_name: String,

    /// First brand name
    pub brand_name: String,

    /// First purpose entry, falling back to the first indication
    pub purpose: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prescription_flag() {
        let mut record = MedicationRecord {
            prescription_nonprescription: vec!["HUMAN PRESCRIPTION DRUG".to_string()],
            ..Default::default()
        };
        assert!(record.is_prescription_only());

        record.prescription_nonprescription = vec!["HUMAN OTC DRUG".to_string()];
        assert!(!record.is_prescription_only());

        record.prescription_nonprescription = vec!["Nonprescription".to_string()];
        assert!(!record.is_prescription_only());

        record.prescription_nonprescription.clear();
        assert!(!record.is_prescription_only());
    }

    #[test]
    fn test_summary_line_prefers_first_indication_sentence() {
        let record = MedicationRecord {
            indications_and_usage: vec!["Temporarily relieves minor aches. Also reduces fever.".to_string()],
            purpose: vec!["Pain reliever".to_string()],
            ..Default::default()
        };
        assert_eq!(record.summary_line(), "Temporarily relieves minor aches");

        let record = MedicationRecord {
            purpose: vec!["Pain reliever".to_string()],
            ..Default::default()
        };
        assert_eq!(record.summary_line(), "Pain reliever");

        assert_eq!(MedicationRecord::default().summary_line(), "Information not available");
    }

    #[test]
    fn test_effective_date() {
        let mut record = MedicationRecord {
            effective_time: Some("20231114".to_string()),
            ..Default::default()
        };
        assert_eq!(record.effective_date(), NaiveDate::from_ymd_opt(2023, 11, 14));

        record.effective_time = Some("2023-11-14".to_string());
        assert_eq!(record.effective_date(), None);

        record.effective_time = None;
        assert_eq!(record.effective_date(), None);
    }

    #[test]
    fn test_record_serializes_wire_field_names() {
        let value = serde_json::to_value(MedicationRecord::default()).unwrap();
        assert_eq!(value["generic_name"], "Unknown");
        assert!(value["usage_information"].is_array());
        assert!(value["prescription_nonprescription"].is_array());
        assert!(value["id"].is_null());
    }
}
