use crate::record::AnimalRecord;
use std::collections::HashSet;
use std::fmt;
use std::io::{self, BufRead, Write};

/// Synthetic label for records without a skin type.
pub const UNKNOWN_LABEL: &str = "Unknown";

pub const NO_DATA_MESSAGE: &str = "No skin types found in the data.";
const INVALID_CHOICE_MESSAGE: &str =
    "Invalid skin type. Please choose one from the list above.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Label(String),
    Unknown,
}

impl Choice {
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.to_lowercase() == UNKNOWN_LABEL.to_lowercase() {
            Self::Unknown
        } else {
            Self::Label(trimmed.to_owned())
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Label(ref label) => f.write_str(label),
            Self::Unknown => f.write_str(UNKNOWN_LABEL),
        }
    }
}

/// Distinct skin types in order of first appearance. Matching ignores case;
/// the casing seen first is the one kept.
pub fn collect_labels(records: &[AnimalRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut labels = Vec::new();

    for skin_type in records.iter().filter_map(AnimalRecord::skin_type) {
        if seen.insert(skin_type.to_lowercase()) {
            labels.push(skin_type.into_owned());
        }
    }

    labels
}

pub fn collect_unknown(records: &[AnimalRecord]) -> Vec<&AnimalRecord> {
    records
        .iter()
        .filter(|record| record.skin_type().is_none())
        .collect()
}

pub fn filter_by_label<'a>(
    records: &'a [AnimalRecord],
    label: &str,
) -> Vec<&'a AnimalRecord> {
    let wanted = label.trim().to_lowercase();
    records
        .iter()
        .filter(|record| {
            record
                .skin_type()
                .is_some_and(|skin_type| skin_type.to_lowercase() == wanted)
        })
        .collect()
}

pub fn select<'a>(
    records: &'a [AnimalRecord],
    choice: &Choice,
    unknown: &[&'a AnimalRecord],
) -> Vec<&'a AnimalRecord> {
    match *choice {
        Choice::Unknown => unknown.to_vec(),
        Choice::Label(ref label) => filter_by_label(records, label),
    }
}

/// The filter options offered to the user.
#[derive(Debug)]
pub struct Menu {
    labels: Vec<String>,
    show_unknown: bool,
}

impl Menu {
    pub const fn new(labels: Vec<String>, show_unknown: bool) -> Self {
        Self {
            labels,
            show_unknown,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.labels.is_empty() && !self.show_unknown
    }

    /// Real labels spelled `unknown` are hidden while the synthetic bucket
    /// is on offer, since that input always picks the bucket.
    pub fn options(&self) -> impl Iterator<Item = &str> {
        self.labels
            .iter()
            .map(String::as_str)
            .filter(|label| {
                !(self.show_unknown
                    && label.to_lowercase() == UNKNOWN_LABEL.to_lowercase())
            })
            .chain(self.show_unknown.then_some(UNKNOWN_LABEL))
    }

    /// Resolves one line of user input to a choice, or `None` if it names
    /// nothing on offer. `unknown` is always accepted.
    pub fn accept(&self, input: &str) -> Option<Choice> {
        let normalized = input.trim().to_lowercase();
        if normalized == UNKNOWN_LABEL.to_lowercase() {
            return Some(Choice::Unknown);
        }
        self.labels
            .iter()
            .find(|label| label.to_lowercase() == normalized)
            .map(|label| Choice::Label(label.clone()))
    }

    pub fn prompt<R, W>(
        &self,
        input: &mut R,
        output: &mut W,
    ) -> io::Result<Choice>
    where
        R: BufRead,
        W: Write,
    {
        writeln!(output, "Available skin types:")?;
        for option in self.options() {
            writeln!(output, "- {option}")?;
        }

        let mut line = String::new();
        loop {
            write!(output, "Enter a skin type: ")?;
            output.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "input closed before a skin type was chosen",
                ));
            }

            if let Some(choice) = self.accept(&line) {
                tracing::info!(%choice, "skin type selected");
                return Ok(choice);
            }
            tracing::debug!(input = line.trim(), "rejected skin type");
            writeln!(output, "{INVALID_CHOICE_MESSAGE}")?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::parse_records;
    use std::borrow::Cow;

    fn sample() -> Vec<AnimalRecord> {
        parse_records(
            r#"[
                {"name": "Python", "characteristics": {"skin_type": "Scales"}},
                {"name": "Fox", "characteristics": {"skin_type": "Fur"}},
                {"name": "Cobra", "characteristics": {"skin_type": "scales"}},
                {"name": "Jellyfish"},
                {"name": "Viper", "characteristics": {"skin_type": " SCALES "}},
                {"name": "Slug", "characteristics": {"skin_type": ""}}
            ]"#,
        )
        .unwrap()
    }

    fn names(records: &[&AnimalRecord]) -> Vec<String> {
        records
            .iter()
            .filter_map(|record| record.name().map(Cow::into_owned))
            .collect()
    }

    #[test]
    fn test_collect_labels_first_casing_wins() {
        assert_eq!(collect_labels(&sample()), vec!["Scales", "Fur"]);
    }

    #[test]
    fn test_collect_labels_single_casing() {
        let records = parse_records(
            r#"[
                {"characteristics": {"skin_type": "Scales"}},
                {"characteristics": {"skin_type": "scales"}},
                {"characteristics": {"skin_type": "SCALES"}}
            ]"#,
        )
        .unwrap();

        assert_eq!(collect_labels(&records), vec!["Scales"]);
    }

    #[test]
    fn test_collect_unknown() {
        let records = sample();
        assert_eq!(
            names(&collect_unknown(&records)),
            vec!["Jellyfish", "Slug"]
        );
    }

    #[test]
    fn test_filter_by_label_ignores_case() {
        let records = sample();
        let lower = names(&filter_by_label(&records, "scales"));
        let upper = names(&filter_by_label(&records, "SCALES"));

        assert_eq!(lower, vec!["Python", "Cobra", "Viper"]);
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_filter_by_label_is_exact() {
        let records = sample();
        assert!(filter_by_label(&records, "Scale").is_empty());
        assert!(filter_by_label(&records, "Feathers").is_empty());
        assert_eq!(names(&filter_by_label(&records, "  fur ")), vec!["Fox"]);
    }

    #[test]
    fn test_select() {
        let records = sample();
        let unknown = collect_unknown(&records);

        assert_eq!(
            names(&select(&records, &Choice::Unknown, &unknown)),
            vec!["Jellyfish", "Slug"]
        );
        assert_eq!(
            names(&select(&records, &Choice::parse("Fur"), &unknown)),
            vec!["Fox"]
        );
    }

    #[test]
    fn test_choice_parse() {
        assert_eq!(Choice::parse(" UNKNOWN\n"), Choice::Unknown);
        assert_eq!(Choice::parse(" Fur "), Choice::Label("Fur".to_owned()));
        assert_eq!(Choice::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn test_menu_options() {
        let with_unknown = Menu::new(vec!["Fur".to_owned()], true);
        let without_unknown = Menu::new(vec!["Fur".to_owned()], false);

        assert_eq!(
            with_unknown.options().collect::<Vec<_>>(),
            vec!["Fur", "Unknown"]
        );
        assert_eq!(without_unknown.options().collect::<Vec<_>>(), vec!["Fur"]);
        assert!(Menu::new(Vec::new(), false).is_empty());
        assert!(!Menu::new(Vec::new(), true).is_empty());
    }

    #[test]
    fn test_menu_hides_label_spelled_unknown() {
        let records = parse_records(
            r#"[
                {"name": "A", "characteristics": {"skin_type": "unknown"}},
                {"name": "B"}
            ]"#,
        )
        .unwrap();
        let unknown = collect_unknown(&records);
        let menu = Menu::new(collect_labels(&records), !unknown.is_empty());

        assert_eq!(menu.options().collect::<Vec<_>>(), vec!["Unknown"]);

        let choice = menu.accept("unknown").unwrap();
        assert_eq!(names(&select(&records, &choice, &unknown)), vec!["B"]);

        let without_bucket = Menu::new(vec!["unknown".to_owned()], false);
        assert_eq!(
            without_bucket.options().collect::<Vec<_>>(),
            vec!["unknown"]
        );
    }

    #[test]
    fn test_menu_accept() {
        let menu = Menu::new(vec!["Scales".to_owned(), "Fur".to_owned()], true);

        assert_eq!(
            menu.accept("  sCaLeS\n"),
            Some(Choice::Label("Scales".to_owned()))
        );
        assert_eq!(menu.accept("unknown"), Some(Choice::Unknown));
        assert_eq!(menu.accept("feathers"), None);
        assert_eq!(menu.accept(""), None);
    }

    #[test]
    fn test_prompt_retries_until_valid() {
        let menu = Menu::new(vec!["Scales".to_owned(), "Fur".to_owned()], true);
        let mut input = "feathers\n\nFUR\n".as_bytes();
        let mut output = Vec::new();

        let choice = menu.prompt(&mut input, &mut output).unwrap();
        assert_eq!(choice, Choice::Label("Fur".to_owned()));

        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("- Scales\n- Fur\n- Unknown\n"));
        assert_eq!(shown.matches(INVALID_CHOICE_MESSAGE).count(), 2);
    }

    #[test]
    fn test_prompt_fails_on_closed_input() {
        let menu = Menu::new(vec!["Fur".to_owned()], false);
        let mut input = "scales\n".as_bytes();
        let mut output = Vec::new();

        let error = menu.prompt(&mut input, &mut output).unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::UnexpectedEof);
    }
}
