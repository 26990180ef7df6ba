use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Proposal-level fields, independent of any slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalForm {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub vote_by_council: bool,
}

/// Validates the form against its schema. Returns a field-name-keyed error
/// map; an empty map means the form is valid.
pub fn validate_form(form: &ProposalForm) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();
    if form.title.trim().is_empty() {
        errors.insert("title".to_string(), "Title is required".to_string());
    }
    errors
}
