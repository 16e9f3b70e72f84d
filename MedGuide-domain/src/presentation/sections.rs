use serde::{Deserialize, Serialize};
#[cfg(feature = "with-api")]
use utoipa::ToSchema;

use crate::entities::MedicationRecord;
use crate::text::{
    first_present, first_text, format_paragraphs, sanitize_html, simplify_medical_terms,
    DosageGroup, InteractionCategory, SideEffectSeverity, UsageCategory, WarningCategory,
};

pub const UNKNOWN_MEDICATION: &str = "Unknown Medication";
pub const PURPOSE_UNAVAILABLE: &str =
    "Information about this medication's purpose is not available.";

pub const NO_WARNINGS_NOTICE: &str = "No specific warnings information is available for this medication. \
     Always consult your healthcare provider before use.";
pub const NO_USAGE_NOTICE: &str = "Detailed usage information is not available for this medication. \
     Follow your healthcare provider's instructions.";
pub const NO_DOSAGE_NOTICE: &str = "Specific dosage information is not available for this medication. \
     Follow your healthcare provider's instructions.";
pub const NO_SIDE_EFFECTS_NOTICE: &str = "Specific side effect information is not available for this medication. \
     Talk to your healthcare provider about possible side effects.";
pub const NO_INTERACTIONS_NOTICE: &str = "Specific drug interaction information is not available for this medication. \
     Tell your healthcare provider about all medications you take.";

/// First entry of a label section with markup removed
fn section_text(section: &[String]) -> String {
    sanitize_html(first_text(section))
}

fn simplified_or_none(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(simplify_medical_terms(text))
    }
}

/// Header card of the detail view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct OverviewSection {
    pub generic_name: String,
    pub brand_names: String,
    pub drug_class: String,
    /// Plain-language purpose, or a fallback message
    pub purpose: String,
    pub prescription_only: bool,
    pub summary: String,
    /// Label effective date, e.g. "November 14, 2023"
    pub label_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct WarningsSection {
    pub boxed_warning: Option<String>,
    pub pregnancy_warning: Option<String>,
    pub do_not_use: Option<String>,
    pub who_should_not_take: Vec<String>,
    pub talk_to_doctor: Vec<String>,
    /// Filled only when neither targeted list has entries
    pub general: Vec<String>,
    pub has_content: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl WarningsSection {
    fn from_record(record: &MedicationRecord) -> Self {
        let general_text = section_text(first_present(&[
            record.warnings.as_slice(),
            record.warnings_and_cautions.as_slice(),
        ]));
        let paragraphs = format_paragraphs(&general_text);

        let mut who_should_not_take = Vec::new();
        let mut talk_to_doctor = Vec::new();
        for paragraph in &paragraphs {
            match WarningCategory::classify(paragraph) {
                WarningCategory::WhoShouldNotTake => {
                    who_should_not_take.push(simplify_medical_terms(paragraph))
                }
                WarningCategory::TalkToDoctor => talk_to_doctor.push(simplify_medical_terms(paragraph)),
                WarningCategory::General => {}
            }
        }

        let general = if who_should_not_take.is_empty() && talk_to_doctor.is_empty() {
            paragraphs.iter().map(|p| simplify_medical_terms(p)).collect()
        } else {
            Vec::new()
        };

        let boxed_warning = simplified_or_none(&section_text(&record.boxed_warning));
        let pregnancy_warning = simplified_or_none(&section_text(&record.pregnancy_or_breastfeeding));
        let do_not_use = simplified_or_none(&section_text(&record.do_not_use));

        // The do-not-use callout alone does not count as warnings content
        let has_content =
            boxed_warning.is_some() || pregnancy_warning.is_some() || !paragraphs.is_empty();

        Self {
            boxed_warning,
            pregnancy_warning,
            do_not_use,
            who_should_not_take,
            talk_to_doctor,
            general,
            has_content,
            notice: (!has_content).then(|| NO_WARNINGS_NOTICE.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.has_content
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct UsageSection {
    pub how_to_take: Vec<String>,
    pub monitoring: Vec<String>,
    pub tips: Vec<String>,
    /// When to stop using and ask a doctor
    pub stop_use: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl UsageSection {
    fn from_record(record: &MedicationRecord) -> Self {
        let usage_text = section_text(first_present(&[
            record.usage_information.as_slice(),
            record.when_using.as_slice(),
        ]));

        let mut section = Self::default();
        for paragraph in format_paragraphs(&usage_text) {
            // Usage paragraphs are classified after simplification
            let simplified = simplify_medical_terms(&paragraph);
            match UsageCategory::classify(&simplified) {
                UsageCategory::HowToTake => section.how_to_take.push(simplified),
                UsageCategory::Monitoring => section.monitoring.push(simplified),
                UsageCategory::Tips => section.tips.push(simplified),
            }
        }

        section.stop_use = format_paragraphs(&section_text(&record.stop_use))
            .iter()
            .map(|p| simplify_medical_terms(p))
            .collect();

        if section.is_empty() {
            section.notice = Some(NO_USAGE_NOTICE.to_string());
        }
        section
    }

    pub fn is_empty(&self) -> bool {
        self.how_to_take.is_empty()
            && self.monitoring.is_empty()
            && self.tips.is_empty()
            && self.stop_use.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct DosageSection {
    pub adult: Vec<String>,
    pub pediatric: Vec<String>,
    /// Elderly patients and organ impairment
    pub special: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl DosageSection {
    fn from_record(record: &MedicationRecord) -> Self {
        let mut section = Self::default();
        for paragraph in format_paragraphs(&section_text(&record.dosage_and_administration)) {
            let simplified = simplify_medical_terms(&paragraph);
            match DosageGroup::classify(&simplified) {
                DosageGroup::Adult => section.adult.push(simplified),
                DosageGroup::Pediatric => section.pediatric.push(simplified),
                DosageGroup::Special => section.special.push(simplified),
            }
        }

        if section.is_empty() {
            section.notice = Some(NO_DOSAGE_NOTICE.to_string());
        }
        section
    }

    pub fn is_empty(&self) -> bool {
        self.adult.is_empty() && self.pediatric.is_empty() && self.special.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct SideEffectsSection {
    /// Seek medical help immediately
    pub severe: Vec<String>,
    pub common: Vec<String>,
    pub less_common: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl SideEffectsSection {
    fn push(&mut self, severity: SideEffectSeverity, text: &str) {
        let simplified = simplify_medical_terms(text);
        match severity {
            SideEffectSeverity::Severe => self.severe.push(simplified),
            SideEffectSeverity::Common => self.common.push(simplified),
            SideEffectSeverity::LessCommon => self.less_common.push(simplified),
        }
    }

    fn from_record(record: &MedicationRecord) -> Self {
        let text = section_text(first_present(&[
            record.side_effects.as_slice(),
            record.adverse_reactions.as_slice(),
        ]));

        let mut section = Self::default();
        for paragraph in format_paragraphs(&text) {
            section.push(SideEffectSeverity::classify(&paragraph), &paragraph);
        }

        // Paragraph splitting can discard everything; fall back to fragments
        if section.is_empty() && !text.is_empty() {
            for fragment in text.split(['.', ';', ':']).map(str::trim) {
                if !fragment.is_empty() {
                    section.push(SideEffectSeverity::classify_fragment(fragment), fragment);
                }
            }
        }

        if section.is_empty() {
            section.notice = Some(NO_SIDE_EFFECTS_NOTICE.to_string());
        }
        section
    }

    pub fn is_empty(&self) -> bool {
        self.severe.is_empty() && self.common.is_empty() && self.less_common.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct InteractionsSection {
    pub do_not_use_with: Vec<String>,
    pub use_with_caution: Vec<String>,
    pub monitor_when_using: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl InteractionsSection {
    fn from_record(record: &MedicationRecord) -> Self {
        let mut section = Self::default();
        for paragraph in format_paragraphs(&section_text(&record.drug_interactions)) {
            let simplified = simplify_medical_terms(&paragraph);
            match InteractionCategory::classify(&paragraph) {
                InteractionCategory::DoNotUse => section.do_not_use_with.push(simplified),
                InteractionCategory::UseWithCaution => section.use_with_caution.push(simplified),
                InteractionCategory::Monitor => section.monitor_when_using.push(simplified),
            }
        }

        if section.is_empty() {
            section.notice = Some(NO_INTERACTIONS_NOTICE.to_string());
        }
        section
    }

    pub fn is_empty(&self) -> bool {
        self.do_not_use_with.is_empty()
            && self.use_with_caution.is_empty()
            && self.monitor_when_using.is_empty()
    }
}

/// Tabbed, plain-language view of one label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct MedicationSections {
    pub id: Option<String>,
    pub overview: OverviewSection,
    pub warnings: WarningsSection,
    pub usage: UsageSection,
    pub dosage: DosageSection,
    pub side_effects: SideEffectsSection,
    pub interactions: InteractionsSection,
}

impl MedicationSections {
    pub fn from_record(record: &MedicationRecord) -> Self {
        let generic_name = if record.generic_name.trim().is_empty() {
            UNKNOWN_MEDICATION.to_string()
        } else {
            record.generic_name.clone()
        };

        let purpose_text = section_text(first_present(&[
            record.purpose.as_slice(),
            record.indications_and_usage.as_slice(),
        ]));
        let purpose = simplified_or_none(&purpose_text)
            .unwrap_or_else(|| PURPOSE_UNAVAILABLE.to_string());

        let overview = OverviewSection {
            generic_name,
            brand_names: record.brand_name.clone(),
            drug_class: record.drug_class.clone(),
            purpose,
            prescription_only: record.is_prescription_only(),
            summary: record.summary_line(),
            label_date: record
                .effective_date()
                .map(|date| date.format("%B %-d, %Y").to_string()),
        };

        Self {
            id: record.id.clone(),
            overview,
            warnings: WarningsSection::from_record(record),
            usage: UsageSection::from_record(record),
            dosage: DosageSection::from_record(record),
            side_effects: SideEffectsSection::from_record(record),
            interactions: InteractionsSection::from_record(record),
        }
    }
}
