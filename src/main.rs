mod page;
mod record;
mod render;
mod select;

use clap::Parser;
use page::{assemble, read_template, write_page};
use record::{AnimalRecord, load_records};
use render::{render_cards, render_text};
use select::{Choice, Menu, NO_DATA_MESSAGE, collect_labels, collect_unknown};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{
    EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the JSON file with the animal records
    #[arg(long, default_value = "animals_data.json")]
    data: PathBuf,

    /// Path to the HTML template containing the placeholder
    #[arg(long, default_value = "animals_template.html")]
    template: PathBuf,

    /// Path to the generated HTML page
    #[arg(long, default_value = "animals.html")]
    output: PathBuf,

    /// Skin type to filter by instead of asking interactively
    #[arg(long, conflicts_with = "all")]
    skin_type: Option<String>,

    /// Render every animal without filtering
    #[arg(long)]
    all: bool,

    /// Print the selected animals as text instead of writing the page
    #[arg(long)]
    text: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "animals_web=info".into()),
        )
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();

    let stdin = io::stdin();
    run(&args, &mut stdin.lock(), &mut io::stdout())
}

fn run<R, W>(args: &Args, input: &mut R, output: &mut W) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
{
    let records = load_records(&args.data)?;

    let Some(selected) = choose_records(args, &records, input, output)? else {
        return Ok(());
    };

    if args.text {
        for record in &selected {
            output.write_all(render_text(record).as_bytes())?;
        }
        return Ok(());
    }

    let template = read_template(&args.template)?;
    let page = assemble(&template, &render_cards(&selected));
    write_page(&args.output, &page)?;

    writeln!(
        output,
        "Website was successfully generated to the file {}.",
        args.output.display()
    )?;
    Ok(())
}

// `None` means the run ends early after telling the user why.
fn choose_records<'a, R, W>(
    args: &Args,
    records: &'a [AnimalRecord],
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<Option<Vec<&'a AnimalRecord>>>
where
    R: BufRead,
    W: Write,
{
    if args.all {
        return Ok(Some(records.iter().collect()));
    }

    let unknown = collect_unknown(records);
    let labels = collect_labels(records);
    tracing::info!(
        labels = labels.len(),
        unknown = unknown.len(),
        "collected skin types"
    );

    let choice = if let Some(label) = args.skin_type.as_deref() {
        Choice::parse(label)
    } else {
        let menu = Menu::new(labels, !unknown.is_empty());
        if menu.is_empty() {
            writeln!(output, "{NO_DATA_MESSAGE}")?;
            return Ok(None);
        }
        menu.prompt(input, output)?
    };

    let matches = select::select(records, &choice, &unknown);
    if matches.is_empty() {
        writeln!(output, "No animals found with skin type '{choice}'.")?;
        return Ok(None);
    }

    tracing::info!(%choice, matches = matches.len(), "records selected");
    Ok(Some(matches))
}
