use serde::{Deserialize, Serialize};

// Keyword classification of label paragraphs.
//
// Every classifier lowercases its input and checks the buckets in a fixed
// order; the first bucket with a matching keyword wins, otherwise the
// catch-all bucket is used.

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| haystack.contains(keyword))
}

const SEVERE_KEYWORDS: [&str; 5] = [
    "emergency",
    "severe",
    "serious",
    "call doctor immediately",
    "seek medical help",
];
const COMMON_KEYWORDS: [&str; 3] = ["common", "frequently", "most patients"];
const LESS_COMMON_KEYWORDS: [&str; 3] = ["less common", "rare", "infrequent"];

// Looser lists used when side-effect text is split on punctuation
const SEVERE_FRAGMENT_KEYWORDS: [&str; 6] =
    ["emergency", "severe", "serious", "immediately", "call", "stop"];
const COMMON_FRAGMENT_KEYWORDS: [&str; 2] = ["common", "frequent"];
const LESS_COMMON_FRAGMENT_KEYWORDS: [&str; 3] = ["less", "rare", "infrequent"];

/// Severity bucket for a side-effect paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SideEffectSeverity {
    /// Seek medical help immediately
    Severe,
    Common,
    LessCommon,
}

impl SideEffectSeverity {
    /// Classify a paragraph; unmatched text counts as common.
    ///
    /// "common" is tested before "less common", so "less common" paragraphs
    /// land in `Common`.
    pub fn classify(paragraph: &str) -> Self {
        let lower = paragraph.to_lowercase();
        if contains_any(&lower, &SEVERE_KEYWORDS) {
            SideEffectSeverity::Severe
        } else if contains_any(&lower, &COMMON_KEYWORDS) {
            SideEffectSeverity::Common
        } else if contains_any(&lower, &LESS_COMMON_KEYWORDS) {
            SideEffectSeverity::LessCommon
        } else {
            SideEffectSeverity::Common
        }
    }

    /// Classify a punctuation-delimited fragment with the looser keyword lists
    pub fn classify_fragment(fragment: &str) -> Self {
        let lower = fragment.to_lowercase();
        if contains_any(&lower, &SEVERE_FRAGMENT_KEYWORDS) {
            SideEffectSeverity::Severe
        } else if contains_any(&lower, &COMMON_FRAGMENT_KEYWORDS) {
            SideEffectSeverity::Common
        } else if contains_any(&lower, &LESS_COMMON_FRAGMENT_KEYWORDS) {
            SideEffectSeverity::LessCommon
        } else {
            SideEffectSeverity::Common
        }
    }
}

/// Bucket for a drug-interaction paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionCategory {
    DoNotUse,
    UseWithCaution,
    Monitor,
}

impl InteractionCategory {
    pub fn classify(paragraph: &str) -> Self {
        let lower = paragraph.to_lowercase();
        if contains_any(&lower, &["do not use", "avoid", "contraindicated"]) {
            InteractionCategory::DoNotUse
        } else if contains_any(&lower, &["caution", "careful", "may increase", "may decrease"]) {
            InteractionCategory::UseWithCaution
        } else {
            InteractionCategory::Monitor
        }
    }
}

/// Bucket for a general-warnings paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCategory {
    WhoShouldNotTake,
    TalkToDoctor,
    General,
}

impl WarningCategory {
    pub fn classify(paragraph: &str) -> Self {
        let lower = paragraph.to_lowercase();
        if contains_any(&lower, &["do not use", "should not take", "should not use"]) {
            WarningCategory::WhoShouldNotTake
        } else if contains_any(&lower, &["tell your doctor", "talk to your", "ask a doctor"]) {
            WarningCategory::TalkToDoctor
        } else {
            WarningCategory::General
        }
    }
}

/// Patient group a dosage paragraph addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DosageGroup {
    Adult,
    Pediatric,
    /// Elderly patients and kidney or liver impairment
    Special,
}

impl DosageGroup {
    pub fn classify(paragraph: &str) -> Self {
        let lower = paragraph.to_lowercase();
        if lower.contains("adult") || (lower.contains("dose") && !lower.contains("child")) {
            DosageGroup::Adult
        } else if contains_any(&lower, &["child", "pediatric", "infant"]) {
            DosageGroup::Pediatric
        } else if contains_any(
            &lower,
            &["elder", "senior", "geriatric", "renal", "kidney", "liver", "hepatic"],
        ) {
            DosageGroup::Special
        } else {
            DosageGroup::Adult
        }
    }
}

/// Bucket for a usage-instructions paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageCategory {
    HowToTake,
    Monitoring,
    Tips,
}

impl UsageCategory {
    pub fn classify(paragraph: &str) -> Self {
        let lower = paragraph.to_lowercase();
        if contains_any(&lower, &["take", "use", "swallow", "administer"]) {
            UsageCategory::HowToTake
        } else if contains_any(&lower, &["monitor", "check", "test"]) {
            UsageCategory::Monitoring
        } else {
            UsageCategory::Tips
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_effect_severity() {
        assert_eq!(
            SideEffectSeverity::classify("Stop use and seek medical help right away"),
            SideEffectSeverity::Severe
        );
        assert_eq!(
            SideEffectSeverity::classify("Most patients experience mild headache"),
            SideEffectSeverity::Common
        );
        assert_eq!(
            SideEffectSeverity::classify("Rare cases of rash were reported"),
            SideEffectSeverity::LessCommon
        );
        assert_eq!(SideEffectSeverity::classify("Dry mouth"), SideEffectSeverity::Common);
    }

    #[test]
    fn test_side_effect_first_match_wins() {
        // Severe keywords beat rare ones
        assert_eq!(
            SideEffectSeverity::classify("Rare but serious liver damage"),
            SideEffectSeverity::Severe
        );
        // "common" is checked before "less common"
        assert_eq!(
            SideEffectSeverity::classify("Less common reactions include rash"),
            SideEffectSeverity::Common
        );
    }

    #[test]
    fn test_side_effect_fragment_lists_are_looser() {
        assert_eq!(SideEffectSeverity::classify_fragment("call your doctor"), SideEffectSeverity::Severe);
        assert_eq!(SideEffectSeverity::classify("call your doctor"), SideEffectSeverity::Common);
        assert_eq!(SideEffectSeverity::classify_fragment("less often dizziness"), SideEffectSeverity::LessCommon);
    }

    #[test]
    fn test_interaction_avoid_is_do_not_use() {
        let paragraph = "Avoid alcohol while taking this product";
        assert_eq!(InteractionCategory::classify(paragraph), InteractionCategory::DoNotUse);
        assert_ne!(InteractionCategory::classify(paragraph), InteractionCategory::Monitor);

        // Even when caution keywords also appear
        assert_eq!(
            InteractionCategory::classify("Use caution; avoid combining with warfarin"),
            InteractionCategory::DoNotUse
        );
    }

    #[test]
    fn test_interaction_buckets() {
        assert_eq!(
            InteractionCategory::classify("Contraindicated with MAO inhibitors"),
            InteractionCategory::DoNotUse
        );
        assert_eq!(
            InteractionCategory::classify("Aspirin may increase the risk of bleeding"),
            InteractionCategory::UseWithCaution
        );
        assert_eq!(
            InteractionCategory::classify("Lithium levels should be checked"),
            InteractionCategory::Monitor
        );
    }

    #[test]
    fn test_warning_buckets() {
        assert_eq!(
            WarningCategory::classify("Do not use if you are allergic to ibuprofen"),
            WarningCategory::WhoShouldNotTake
        );
        assert_eq!(
            WarningCategory::classify("Ask a doctor before use if you have asthma"),
            WarningCategory::TalkToDoctor
        );
        assert_eq!(WarningCategory::classify("Keep out of reach of children"), WarningCategory::General);
    }

    #[test]
    fn test_dosage_groups() {
        assert_eq!(DosageGroup::classify("Adults: 1 tablet every 4 hours"), DosageGroup::Adult);
        assert_eq!(DosageGroup::classify("Usual dose is 200 mg"), DosageGroup::Adult);
        assert_eq!(DosageGroup::classify("Children under 12: ask a doctor"), DosageGroup::Pediatric);
        assert_eq!(DosageGroup::classify("Dose for children by weight"), DosageGroup::Pediatric);
        assert_eq!(DosageGroup::classify("Reduce in hepatic impairment"), DosageGroup::Special);
        assert_eq!(DosageGroup::classify("With food"), DosageGroup::Adult);
    }

    #[test]
    fn test_usage_buckets() {
        assert_eq!(UsageCategory::classify("Swallow whole with water"), UsageCategory::HowToTake);
        assert_eq!(UsageCategory::classify("Blood counts should be monitored"), UsageCategory::Monitoring);
        assert_eq!(UsageCategory::classify("Store at room temperature"), UsageCategory::Tips);
    }
}
