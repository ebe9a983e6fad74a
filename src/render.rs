use crate::record::{AnimalRecord, Fields};
use std::fmt::Write as _;

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

// Card lines in display order; the name is rendered separately as the title.
fn details<'f>(fields: &'f Fields<'_>) -> Vec<(&'static str, &'f str)> {
    [
        ("Diet", fields.diet.as_deref()),
        ("Main prey", fields.main_prey.as_deref()),
        ("Location", fields.location.as_deref()),
        ("Habitat", fields.habitat.as_deref()),
        ("Type", fields.animal_type.as_deref()),
        ("Distinctive feature", fields.distinctive_feature.as_deref()),
    ]
    .into_iter()
    .filter_map(|(label, value)| value.map(|text| (label, text)))
    .collect()
}

/// Renders one record as a `<li>` card. A record without a name renders
/// as an empty string.
pub fn render_card(record: &AnimalRecord) -> String {
    let fields = record.fields();
    let Some(name) = fields.name.as_deref() else {
        tracing::debug!("skipping record without a name");
        return String::new();
    };

    let mut card = String::new();
    writeln!(&mut card, "<li class=\"cards__item\">").unwrap();
    writeln!(
        &mut card,
        "  <div class=\"card__title\">{}</div>",
        escape_html(name)
    )
    .unwrap();
    writeln!(&mut card, "  <div class=\"card__text\">").unwrap();
    writeln!(&mut card, "    <ul class=\"cards__list\">").unwrap();
    for (label, value) in details(&fields) {
        writeln!(
            &mut card,
            "      <li class=\"cards__list-item\"><strong>{label}:</strong> {}</li>",
            escape_html(value)
        )
        .unwrap();
    }
    writeln!(&mut card, "    </ul>").unwrap();
    writeln!(&mut card, "  </div>").unwrap();
    writeln!(&mut card, "</li>").unwrap();
    card
}

pub fn render_cards(records: &[&AnimalRecord]) -> String {
    let cards: String =
        records.iter().map(|record| render_card(record)).collect();
    tracing::info!(records = records.len(), "rendered cards");
    cards
}

/// Plain-text form of a record for console output, ending in a blank line.
/// Every present field gets a line, the name included.
pub fn render_text(record: &AnimalRecord) -> String {
    let fields = record.fields();

    let mut text = String::new();
    if let Some(name) = fields.name.as_deref() {
        writeln!(&mut text, "Name: {name}").unwrap();
    }
    for (label, value) in details(&fields) {
        writeln!(&mut text, "{label}: {value}").unwrap();
    }
    text.push('\n');
    text
}
