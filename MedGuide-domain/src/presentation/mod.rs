// Plain-language detail view built from a medication record
mod sections;

pub use sections::{
    DosageSection, InteractionsSection, MedicationSections, OverviewSection, SideEffectsSection,
    UsageSection, WarningsSection, NO_DOSAGE_NOTICE, NO_INTERACTIONS_NOTICE, NO_SIDE_EFFECTS_NOTICE,
    NO_USAGE_NOTICE, NO_WARNINGS_NOTICE, PURPOSE_UNAVAILABLE, UNKNOWN_MEDICATION,
};
