use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::io::AsyncReadExt;

use codescore::banner;
use codescore::client::HttpEvaluationClient;
use codescore::config::{ClientConfig, TestCaseFile};
use codescore::controller::{FormController, Outcome};
use codescore::errors::ClientError;
use codescore::form::{FormState, InputMode, TestCaseList};
use codescore::models::Language;
use codescore::view::{self, text::render_text};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Html,
    Json,
}

/// Submit code to an automated evaluation service and show the scored report.
///
/// Code comes from --code, --file (uploaded to the service first), --github,
/// or stdin when none of them is given.
#[derive(Parser, Debug)]
#[command(name = "codescore", version, about)]
#[command(group(ArgGroup::new("source").args(["code", "file", "github"])))]
struct Cli {
    /// Code to evaluate.
    #[arg(long)]
    code: Option<String>,

    /// File to upload and evaluate.
    #[arg(long)]
    file: Option<PathBuf>,

    /// GitHub URL of the code to evaluate.
    #[arg(long)]
    github: Option<String>,

    /// Language of the code (python, java, cpp, c, javascript).
    #[arg(short, long)]
    language: Option<Language>,

    /// What the code is supposed to do.
    #[arg(short, long, default_value = "")]
    problem: String,

    /// A test case; may be repeated.
    #[arg(long = "test", num_args = 2, value_names = ["CALL", "EXPECTED"], action = clap::ArgAction::Append)]
    tests: Vec<String>,

    /// TOML file with [[test_cases]] tables, submitted before any --test.
    #[arg(long)]
    cases: Option<PathBuf>,

    /// Output format of the report.
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Base URL of the evaluation service.
    #[arg(long)]
    api_base: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(filter));
}

fn test_cases(cli: &Cli) -> Result<TestCaseList> {
    let mut pairs = Vec::new();
    if let Some(path) = &cli.cases {
        let file = TestCaseFile::load(path)
            .with_context(|| format!("failed to load test cases from {}", path.display()))?;
        pairs.extend(file.test_cases.into_iter().map(|tc| (tc.function_call, tc.expected)));
    }
    pairs.extend(
        cli.tests
            .chunks(2)
            .map(|pair| (pair[0].clone(), pair.get(1).cloned().unwrap_or_default())),
    );
    Ok(TestCaseList::from_pairs(pairs))
}

async fn build_form(cli: &Cli, config: &ClientConfig) -> Result<FormState> {
    let mut form = FormState::with_language(cli.language.unwrap_or(config.default_language));
    form.problem_description = cli.problem.clone();
    form.test_cases = test_cases(cli)?;

    if let Some(code) = &cli.code {
        form.code_text = code.clone();
    } else if cli.file.is_some() {
        form.select_mode(InputMode::File);
    } else if let Some(url) = &cli.github {
        form.github_url = url.clone();
        form.select_mode(InputMode::Github);
    } else {
        let mut code = String::new();
        tokio::io::stdin()
            .read_to_string(&mut code)
            .await
            .context("failed to read code from stdin")?;
        form.code_text = code;
    }
    Ok(form)
}

/// Exit status when an alert (empty code, failed upload) stops the run.
const ALERT_EXIT: u8 = 1;
/// Exit status when the service reports a failed evaluation.
const FAILURE_EXIT: u8 = 2;

fn alert(err: &ClientError) -> ExitCode {
    eprintln!("{}", err);
    ExitCode::from(ALERT_EXIT)
}

fn exit_status(outcome: &Outcome) -> u8 {
    match outcome {
        Outcome::Report(_) => 0,
        Outcome::Failed(_) => FAILURE_EXIT,
        // One submission per run, so nothing can supersede it.
        Outcome::Superseded => 0,
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let dotenv = dotenvy::dotenv();
    init_logging(cli.verbose);
    if let Err(e) = dotenv {
        log::debug!("No .env file loaded: {}", e);
    }

    let mut config = ClientConfig::load().context("failed to load configuration")?;
    if let Some(api_base) = &cli.api_base {
        config.api_base = api_base.clone();
    }
    log::info!("Using evaluation service at {}", config.api_base);

    if cli.format == Format::Text {
        banner::print_banner();
    }

    let form = build_form(&cli, &config).await?;
    let client = HttpEvaluationClient::new(reqwest::Client::new(), config);
    let mut controller = FormController::new(client, form);

    if let Some(path) = &cli.file {
        if let Err(e) = controller.upload_file(path).await {
            return Ok(alert(&e));
        }
    }

    let outcome = match controller.submit().await {
        Ok(outcome) => outcome,
        Err(e) => return Ok(alert(&e)),
    };

    let status = exit_status(&outcome);
    match outcome {
        Outcome::Report(result) => {
            match cli.format {
                Format::Text => print!("{}", render_text(&result)),
                Format::Html => println!("{}", view::render_report(&result).to_html()),
                Format::Json => println!("{}", serde_json::to_string_pretty(&result)?),
            }
        }
        Outcome::Failed(message) => {
            match cli.format {
                Format::Text => eprintln!("Error: {}", message),
                Format::Html => println!("{}", view::render_error(&message).to_html()),
                Format::Json => println!(
                    "{}",
                    serde_json::json!({ "success": false, "error": message })
                ),
            }
        }
        Outcome::Superseded => {}
    }
    Ok(ExitCode::from(status))
}
