//! VaultClip CLI - clip a web article into a Markdown note

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vaultclip::{Pipeline, Profile, RunOutcome, RunRequest, Stage};

/// Site profile for the filename date suffix
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ProfileArg {
    /// Title only
    #[default]
    Default,
    /// Append the "on <Month> <Day>, <Year>" date from the first paragraph
    BylineDate,
}

impl From<ProfileArg> for Profile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Default => Profile::Default,
            ProfileArg::BylineDate => Profile::BylineDate,
        }
    }
}

/// VaultClip - save the main content of a web article as a Markdown note
#[derive(Parser, Debug)]
#[command(name = "vaultclip")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Article URL
    url: String,

    /// Folder to write the note into
    #[arg(long, short)]
    folder: PathBuf,

    /// Site profile
    #[arg(long, short, value_enum, default_value_t = ProfileArg::Default)]
    profile: ProfileArg,

    /// Filter paragraphs and convert to Markdown with the local LLM
    #[arg(long)]
    llm: bool,

    /// Ollama server URL
    #[arg(long, default_value = vaultclip::DEFAULT_OLLAMA_URL)]
    ollama_url: String,

    /// Model used for filtering and conversion
    #[arg(long, default_value = vaultclip::DEFAULT_MODEL)]
    model: String,

    /// Custom User-Agent
    #[arg(long)]
    user_agent: Option<String>,
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    let mut builder = Pipeline::builder()
        .ollama_url(cli.ollama_url)
        .model(cli.model);
    if let Some(ua) = cli.user_agent {
        builder = builder.user_agent(ua);
    }
    let pipeline = builder.build();

    let request = RunRequest::new(cli.url, cli.folder)
        .profile(cli.profile.into())
        .use_llm(cli.llm);

    let mut stage = Stage::default();
    let result = pipeline
        .run_with_status(request, |next| {
            if next != Stage::Failed {
                stage = next;
            }
            eprintln!("[{}]", next);
        })
        .await;

    match result {
        Ok(outcome) => print_outcome(&outcome),
        Err(e) => {
            eprintln!("Error while {}: {}", stage, e);
            if e.is_network() {
                eprintln!("Check the URL and that the site is reachable.");
            }
            std::process::exit(1);
        }
    }
}

fn print_outcome(outcome: &RunOutcome) {
    for warning in &outcome.warnings {
        eprintln!("Warning: {}", warning);
    }
    println!("Markdown saved to: {}", outcome.path.display());
}

/// Log to stderr, `vaultclip=info` unless RUST_LOG says otherwise
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vaultclip=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let cli = Cli::parse_from(["vaultclip", "https://example.com/post", "-f", "/vault"]);
        assert_eq!(cli.url, "https://example.com/post");
        assert_eq!(cli.folder, PathBuf::from("/vault"));
        assert!(matches!(cli.profile, ProfileArg::Default));
        assert!(!cli.llm);
        assert_eq!(cli.ollama_url, "http://localhost:11434");
        assert_eq!(cli.model, "phi");
        assert!(cli.user_agent.is_none());
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::parse_from([
            "vaultclip",
            "https://example.com/post",
            "--folder",
            "notes",
            "--profile",
            "byline-date",
            "--llm",
            "--ollama-url",
            "http://gpu-box:11434",
            "--model",
            "llama3",
            "--user-agent",
            "Clipper/1.0",
        ]);
        assert_eq!(Profile::from(cli.profile), Profile::BylineDate);
        assert!(cli.llm);
        assert_eq!(cli.ollama_url, "http://gpu-box:11434");
        assert_eq!(cli.model, "llama3");
        assert_eq!(cli.user_agent.as_deref(), Some("Clipper/1.0"));
    }

    #[test]
    fn test_folder_required() {
        assert!(Cli::try_parse_from(["vaultclip", "https://example.com"]).is_err());
    }
}
