//! Loading the question list.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use survey_form::FormDefinition;

/// Read a TOML form definition, or fall back to the built-in questions.
pub fn load_definition(path: Option<&Path>) -> Result<FormDefinition> {
    let Some(path) = path else {
        return Ok(FormDefinition::builtin());
    };

    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read question file {}", path.display()))?;
    parse_definition(&raw).with_context(|| format!("Invalid question file {}", path.display()))
}

pub fn parse_definition(raw: &str) -> Result<FormDefinition> {
    let definition: FormDefinition = toml::from_str(raw)?;
    definition.validate()?;
    Ok(definition)
}
