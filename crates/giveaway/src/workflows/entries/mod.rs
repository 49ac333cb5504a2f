//! Entry intake: feature extraction, eligibility validation, and deduplication.
//!
//! Every function here is a pure computation over the snapshot it is given. Callers
//! own the entry pool and the configuration.

mod dedupe;
pub mod domain;
pub mod eligibility;
pub mod features;
pub mod mentions;

#[cfg(test)]
mod tests;

pub use dedupe::dedupe;
pub use domain::{
    Conditions, Entry, EntryId, EntryStatus, ExternalFlags, RawEntry, TaggedFriend,
};
pub use eligibility::{
    extract_entry, validate_all, validate_entry, ConfigPatchError, EligibilityConfig,
    EligibilityConfigPatch, EligibilityEngine, FailReason, ValidationResult,
};
pub use features::{extract_features, TextFeatures};
