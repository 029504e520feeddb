/*
[INPUT]:  Field definitions and the current FormState
[OUTPUT]: Ok, or the set of required field ids still missing
[POS]:    Form engine - required-field gate before test and save
[UPDATE]: When validation grows beyond presence checks
*/

use std::collections::BTreeSet;

use thiserror::Error;

use crate::form::{FieldValue, FormState};
use crate::schema::FieldDefinition;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} required field(s) missing", .missing.len())]
pub struct MissingRequiredFields {
    pub missing: BTreeSet<String>,
}

impl MissingRequiredFields {
    /// Labels of the missing fields in declaration order
    pub fn labels<'a>(&self, fields: &'a [FieldDefinition]) -> Vec<&'a str> {
        fields
            .iter()
            .filter(|field| self.missing.contains(&field.id))
            .map(|field| field.label.as_str())
            .collect()
    }
}

pub fn validate_required(
    fields: &[FieldDefinition],
    state: &FormState,
) -> Result<(), MissingRequiredFields> {
    let missing: BTreeSet<String> = fields
        .iter()
        .filter(|field| field.required)
        .filter(|field| state.get(&field.id).is_none_or(FieldValue::is_blank))
        .map(|field| field.id.clone())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(MissingRequiredFields { missing })
    }
}
