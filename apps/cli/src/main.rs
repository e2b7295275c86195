use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use client_core::{
    load_settings,
    presets::{find_example, ExampleSequence},
    view::SUBMIT_BUSY_LABEL,
    FormController, FormEvent, FormView, PageState, PredictionClient, RenderedResults,
    ResultRow, EXAMPLE_SEQUENCES,
};
use shared::{domain::TopN, protocol::PredictionResponse};
use tracing::info;
use tracing_subscriber::EnvFilter;

const BAR_CELLS: usize = 20;

/// Predict molecular functions of a protein sequence.
#[derive(Parser, Debug)]
#[command(name = "venomics", version)]
struct Args {
    /// Base URL of the prediction service.
    #[arg(long)]
    server_url: Option<String>,
    /// Amino-acid sequence, or `-` to read it from stdin.
    #[arg(long, conflicts_with = "example")]
    sequence: Option<String>,
    /// Submit a built-in example by label.
    #[arg(long)]
    example: Option<String>,
    #[arg(long)]
    list_examples: bool,
    /// Number of predictions to request, or `all`.
    #[arg(long)]
    top_n: Option<TopN>,
    /// Write the rendered page to this file.
    #[arg(long)]
    html: Option<PathBuf>,
    /// Print the raw service response as JSON.
    #[arg(long)]
    json: bool,
}

struct TerminalView {
    page: PageState,
    json: bool,
}

impl TerminalView {
    fn new(top_n: TopN, json: bool) -> Self {
        Self {
            page: PageState::new(top_n),
            json,
        }
    }
}

impl FormView for TerminalView {
    fn bind_examples(&mut self, examples: &[ExampleSequence]) {
        self.page.bind_examples(examples);
    }

    fn sequence_input(&self) -> String {
        self.page.sequence_input()
    }

    fn set_sequence_input(&mut self, value: &str) {
        self.page.set_sequence_input(value);
    }

    fn top_n(&self) -> TopN {
        self.page.top_n()
    }

    fn set_top_n(&mut self, top_n: TopN) {
        self.page.set_top_n(top_n);
    }

    fn set_busy(&mut self, busy: bool) {
        if busy {
            eprintln!("{SUBMIT_BUSY_LABEL}");
        }
        self.page.set_busy(busy);
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("error: {message}");
        self.page.show_error(message);
    }

    fn hide_error(&mut self) {
        self.page.hide_error();
    }

    fn show_results(&mut self, response: &PredictionResponse, rendered: RenderedResults) {
        if self.json {
            match serde_json::to_string_pretty(response) {
                Ok(text) => println!("{text}"),
                Err(err) => eprintln!("error: failed to encode response: {err}"),
            }
        } else {
            print_results(&rendered);
        }
        self.page.show_results(response, rendered);
    }
}

fn print_results(rendered: &RenderedResults) {
    println!("Sequence ({} amino acids):", rendered.sequence_length);
    println!("  {}", rendered.sequence);
    println!();
    if rendered.rows.is_empty() {
        println!("No predictions returned.");
        return;
    }
    println!("{:>4}  {:<12} {:>8}  {:<width$}  Function", "Rank", "GO term", "Conf.", "", width = BAR_CELLS);
    for row in &rendered.rows {
        println!(
            "{:>4}  {:<12} {:>7}%  {}  {}",
            row.rank,
            row.go_term,
            row.confidence_percent,
            confidence_bar(row),
            row.name
        );
        if !row.definition.is_empty() {
            println!("{:>28}{}", "", row.definition);
        }
    }
}

fn confidence_bar(row: &ResultRow) -> String {
    let filled = ((row.bar_width() / 100.0) * BAR_CELLS as f64).round() as usize;
    let filled = filled.min(BAR_CELLS);
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_CELLS - filled))
}

fn read_sequence_arg(raw: String) -> Result<String> {
    if raw != "-" {
        return Ok(raw);
    }
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read sequence from stdin")?;
    Ok(buf)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    if args.list_examples {
        for example in EXAMPLE_SEQUENCES {
            println!("{:<20} {}", example.label, example.sequence);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let mut settings = load_settings();
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    let top_n = args.top_n.unwrap_or(settings.top_n);
    let client = PredictionClient::from_settings(&settings)?;
    info!(endpoint = %client.predict_url(), %top_n, "using prediction service");

    let controller =
        FormController::initialize(TerminalView::new(top_n, args.json), client, EXAMPLE_SEQUENCES);

    if let Some(label) = args.example {
        let (index, _) = find_example(&label)
            .ok_or_else(|| anyhow!("unknown example '{label}', see --list-examples"))?;
        controller.handle(FormEvent::ExampleClicked(index)).await;
    } else if let Some(sequence) = args.sequence {
        let raw = read_sequence_arg(sequence)?;
        controller.fill_form(&raw, top_n).await;
    } else {
        bail!("provide --sequence or --example");
    }

    let outcome = controller.handle(FormEvent::Submit).await;

    if let Some(path) = args.html {
        let html = controller.with_view(|view| view.page.to_html()).await;
        fs::write(&path, html)
            .with_context(|| format!("failed to write page to '{}'", path.display()))?;
        info!(path = %path.display(), "wrote rendered page");
    }

    Ok(if outcome.is_rendered() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use shared::protocol::Prediction;

    fn row(confidence_percent: f64) -> ResultRow {
        client_core::render_results(&PredictionResponse {
            sequence: "MKWVTF".to_string(),
            sequence_length: 6,
            predictions: vec![Prediction {
                go_term: "GO:0090729".to_string(),
                name: "toxin activity".to_string(),
                definition: String::new(),
                confidence: confidence_percent / 100.0,
                confidence_percent,
            }],
        })
        .rows
        .remove(0)
    }

    #[test]
    fn args_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_top_n_all_and_example() {
        let args = Args::try_parse_from(["venomics", "--example", "melittin", "--top-n", "all"])
            .expect("args");
        assert_eq!(args.top_n, Some(TopN::All));
        assert_eq!(args.example.as_deref(), Some("melittin"));
    }

    #[test]
    fn rejects_sequence_together_with_example() {
        assert!(
            Args::try_parse_from(["venomics", "--example", "apamin", "--sequence", "MKV"]).is_err()
        );
    }

    #[test]
    fn bar_scales_with_confidence() {
        assert_eq!(confidence_bar(&row(100.0)), "#".repeat(BAR_CELLS));
        assert_eq!(confidence_bar(&row(0.0)), ".".repeat(BAR_CELLS));
        assert_eq!(confidence_bar(&row(50.0)), format!("{}{}", "#".repeat(10), ".".repeat(10)));
    }

    #[test]
    fn terminal_view_tracks_page_state() {
        let mut view = TerminalView::new(TopN::Count(5), false);
        view.set_busy(true);
        assert!(view.page.submit.disabled);
        view.show_error("Prediction failed");
        view.set_busy(false);
        assert!(!view.page.submit.disabled);
        assert!(view.page.to_html().contains("Prediction failed"));
    }
}
