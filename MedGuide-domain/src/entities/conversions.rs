use med_guide_data::models::label::{RawLabel, RawOpenFda};

use crate::entities::medication::{
    ActiveIngredient, MedicationRecord, MedicationSuggestion, UNKNOWN_GENERIC_NAME,
};

/// Conversion functions from upstream label documents to domain entities.
/// These follow the pattern convert_to_[target]_[model_name].

/// Parse the first `active_ingredient` entry into name/strength pairs.
///
/// Entries are separated by `;`. Within an entry the last whitespace-separated
/// token is the strength and everything before it the name.
pub fn parse_active_ingredients(active_ingredient: &[String]) -> Vec<ActiveIngredient> {
    let Some(first) = active_ingredient.first() else {
        return Vec::new();
    };

    first
        .split(';')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut tokens: Vec<&str> = segment.split_whitespace().collect();
            let strength = tokens.pop().unwrap_or_default().to_string();
            ActiveIngredient {
                name: tokens.join(" "),
                strength,
            }
        })
        .collect()
}

fn first_or(values: &[String], fallback: &str) -> String {
    values
        .first()
        .cloned()
        .unwrap_or_else(|| fallback.to_string())
}

/// Convert an upstream label into the flattened medication record
pub fn convert_to_domain_record(label: RawLabel) -> MedicationRecord {
    let openfda = label.openfda.unwrap_or_default();
    let RawOpenFda {
        generic_name,
        brand_name,
        pharm_class_epc,
        route,
        dosage_form,
        product_type,
        ..
    } = openfda;

    MedicationRecord {
        generic_name: first_or(&generic_name, UNKNOWN_GENERIC_NAME),
        brand_name: brand_name.join(", "),
        active_ingredients: parse_active_ingredients(&label.active_ingredient),
        drug_class: first_or(&pharm_class_epc, ""),
        purpose: label.purpose,
        description: first_or(&label.description, ""),
        indications_and_usage: label.indications_and_usage,
        warnings: label.warnings,
        warnings_and_cautions: label.warnings_and_cautions,
        boxed_warning: label.boxed_warning,
        do_not_use: label.do_not_use,
        pregnancy_or_breastfeeding: label.pregnancy_or_breastfeeding,
        usage_information: label.information_for_patients,
        when_using: label.when_using,
        dosage_and_administration: label.dosage_and_administration,
        drug_interactions: label.drug_interactions,
        stop_use: label.stop_use,
        side_effects: label.adverse_reactions.clone(),
        route,
        dosage_form,
        id: label.id,
        set_id: label.set_id,
        effective_time: label.effective_time,
        prescription_nonprescription: product_type,
        adverse_reactions: label.adverse_reactions,
        abuse_and_dependence: label.drug_abuse_and_dependence,
    }
}

/// Convert an upstream label into an autocomplete suggestion
pub fn convert_to_domain_suggestion(label: RawLabel) -> MedicationSuggestion {
    let openfda = label.openfda.unwrap_or_default();

    let purpose = label
        .purpose
        .first()
        .or_else(|| label.indications_and_usage.first())
        .cloned()
        .unwrap_or_default();

    MedicationSuggestion {
        id: label.id,
        generic_name: first_or(&openfda.generic_name, UNKNOWN_GENERIC_NAME),
        brand_name: first_or(&openfda.brand_name, ""),
        purpose,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn full_label() -> RawLabel {
        RawLabel {
            id: Some("label-1".to_string()),
            set_id: Some("set-1".to_string()),
            effective_time: Some("20231114".to_string()),
            openfda: Some(RawOpenFda {
                generic_name: strings(&["IBUPROFEN", "IBUPROFEN SODIUM"]),
                brand_name: strings(&["Advil", "Advil Liqui-Gels"]),
                substance_name: strings(&["IBUPROFEN"]),
                pharm_class_epc: strings(&["Nonsteroidal Anti-inflammatory Drug [EPC]"]),
                route: strings(&["ORAL"]),
                dosage_form: strings(&["TABLET, COATED"]),
                product_type: strings(&["HUMAN OTC DRUG"]),
            }),
            active_ingredient: strings(&["Ibuprofen 200mg; Famotidine 10mg"]),
            purpose: strings(&["Pain reliever/fever reducer"]),
            description: strings(&["First description", "Second"]),
            information_for_patients: strings(&["Take with food"]),
            adverse_reactions: strings(&["Nausea may occur"]),
            drug_abuse_and_dependence: strings(&["None known"]),
            ..Default::default()
        }
    }

    #[test]
    fn test_convert_record_flattens_openfda_block() {
        let record = convert_to_domain_record(full_label());

        assert_eq!(record.generic_name, "IBUPROFEN");
        assert_eq!(record.brand_name, "Advil, Advil Liqui-Gels");
        assert_eq!(record.drug_class, "Nonsteroidal Anti-inflammatory Drug [EPC]");
        assert_eq!(record.description, "First description");
        assert_eq!(record.route, strings(&["ORAL"]));
        assert_eq!(record.prescription_nonprescription, strings(&["HUMAN OTC DRUG"]));
        assert_eq!(record.id.as_deref(), Some("label-1"));
        assert_eq!(record.effective_time.as_deref(), Some("20231114"));
    }

    #[test]
    fn test_convert_record_renames_sections() {
        let record = convert_to_domain_record(full_label());

        assert_eq!(record.usage_information, strings(&["Take with food"]));
        assert_eq!(record.side_effects, strings(&["Nausea may occur"]));
        assert_eq!(record.adverse_reactions, record.side_effects);
        assert_eq!(record.abuse_and_dependence, strings(&["None known"]));
        assert!(record.warnings.is_empty());
    }

    #[test]
    fn test_convert_record_defaults_for_bare_label() {
        let record = convert_to_domain_record(RawLabel::default());

        assert_eq!(record.generic_name, "Unknown");
        assert_eq!(record.brand_name, "");
        assert_eq!(record.drug_class, "");
        assert!(record.active_ingredients.is_empty());
        assert!(record.id.is_none());
    }

    #[test]
    fn test_parse_active_ingredients() {
        let parsed = parse_active_ingredients(&strings(&["Ibuprofen 200mg; Famotidine 10mg;"]));
        assert_eq!(
            parsed,
            vec![
                ActiveIngredient { name: "Ibuprofen".to_string(), strength: "200mg".to_string() },
                ActiveIngredient { name: "Famotidine".to_string(), strength: "10mg".to_string() },
            ]
        );

        let single = parse_active_ingredients(&strings(&["Menthol"]));
        assert_eq!(single[0].name, "");
        assert_eq!(single[0].strength, "Menthol");

        assert!(parse_active_ingredients(&[]).is_empty());
    }

    #[test]
    fn test_convert_suggestion_uses_first_values() {
        let suggestion = convert_to_domain_suggestion(full_label());
        assert_eq!(suggestion.id.as_deref(), Some("label-1"));
        assert_eq!(suggestion.generic_name, "IBUPROFEN");
        assert_eq!(suggestion.brand_name, "Advil");
        assert_eq!(suggestion.purpose, "Pain reliever/fever reducer");
    }

    #[test]
    fn test_convert_suggestion_purpose_falls_back_to_indications() {
        let label = RawLabel {
            indications_and_usage: strings(&["Used to treat hypertension"]),
            ..Default::default()
        };
        let suggestion = convert_to_domain_suggestion(label);
        assert_eq!(suggestion.purpose, "Used to treat hypertension");
        assert_eq!(suggestion.generic_name, "Unknown");
        assert_eq!(suggestion.brand_name, "");

        let empty = convert_to_domain_suggestion(RawLabel::default());
        assert_eq!(empty.purpose, "");
    }
}
