use anyhow::Context as _;
use std::fs;
use std::path::Path;

pub const PLACEHOLDER: &str = "__REPLACE_ANIMALS_INFO__";

pub fn assemble(template: &str, cards: &str) -> String {
    if !template.contains(PLACEHOLDER) {
        tracing::warn!("template has no {PLACEHOLDER} placeholder");
    }
    template.replace(PLACEHOLDER, cards)
}

pub fn read_template(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| {
        format!("failed to read template file {}", path.display())
    })
}

pub fn write_page(path: &Path, page: &str) -> anyhow::Result<()> {
    fs::write(path, page).with_context(|| {
        format!("failed to write output file {}", path.display())
    })?;
    tracing::info!(path = %path.display(), bytes = page.len(), "page written");
    Ok(())
}
