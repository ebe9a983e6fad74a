use anyhow::Context as _;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fs;
use std::path::Path;

/// One animal as it appears in the input document. No key is required.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct AnimalRecord {
    entries: Map<String, Value>,
}

/// Card fields resolved from a record; `None` means absent.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Fields<'a> {
    pub name: Option<Cow<'a, str>>,
    pub diet: Option<Cow<'a, str>>,
    pub main_prey: Option<Cow<'a, str>>,
    pub location: Option<Cow<'a, str>>,
    pub habitat: Option<Cow<'a, str>>,
    pub animal_type: Option<Cow<'a, str>>,
    pub distinctive_feature: Option<Cow<'a, str>>,
}

// Strings count when non-blank; numbers and booleans always count, so a
// literal 0 or false is still rendered.
fn present(value: &Value) -> Option<Cow<'_, str>> {
    if let Some(text) = value.as_str() {
        let trimmed = text.trim();
        return (!trimmed.is_empty()).then_some(Cow::Borrowed(trimmed));
    }
    if value.is_number() || value.is_boolean() {
        return Some(Cow::Owned(value.to_string()));
    }
    None
}

impl AnimalRecord {
    pub fn name(&self) -> Option<Cow<'_, str>> {
        self.entries.get("name").and_then(present)
    }

    pub fn characteristic(&self, key: &str) -> Option<Cow<'_, str>> {
        self.entries
            .get("characteristics")
            .and_then(Value::as_object)
            .and_then(|characteristics| characteristics.get(key))
            .and_then(present)
    }

    pub fn first_location(&self) -> Option<Cow<'_, str>> {
        self.entries
            .get("locations")
            .and_then(Value::as_array)
            .and_then(|locations| locations.first())
            .and_then(present)
    }

    pub fn distinctive_feature(&self) -> Option<Cow<'_, str>> {
        self.characteristic("distinctive_feature")
            .or_else(|| self.characteristic("most_distinctive_feature"))
    }

    pub fn skin_type(&self) -> Option<Cow<'_, str>> {
        self.characteristic("skin_type")
    }

    pub fn fields(&self) -> Fields<'_> {
        Fields {
            name: self.name(),
            diet: self.characteristic("diet"),
            main_prey: self.characteristic("main_prey"),
            location: self.first_location(),
            habitat: self.characteristic("habitat"),
            animal_type: self.characteristic("type"),
            distinctive_feature: self.distinctive_feature(),
        }
    }
}

pub fn parse_records(json: &str) -> serde_json::Result<Vec<AnimalRecord>> {
    serde_json::from_str(json)
}

pub fn load_records(path: &Path) -> anyhow::Result<Vec<AnimalRecord>> {
    let file_content = fs::read_to_string(path).with_context(|| {
        format!("failed to read data file {}", path.display())
    })?;

    let records = parse_records(&file_content).with_context(|| {
        format!("failed to parse animal records from {}", path.display())
    })?;

    tracing::info!(
        count = records.len(),
        path = %path.display(),
        "loaded records"
    );
    Ok(records)
}
