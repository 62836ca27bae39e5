mod serve;
mod submit;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use dfguard_engine::{AnalysisRequest, AnalysisResult, LatencyPolicy, MediaKind};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// DFGuard deepfake screening demo.
#[derive(Parser)]
#[command(name = "dfguard", version, about = "DFGuard deepfake screening demo")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a local file with the mock verdict engine
    Analyze {
        /// Path to the file to analyze
        file: PathBuf,
        /// Artificial analysis delay in milliseconds (default: 2500, 0 disables)
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Submit a file to a running DFGuard server
    Submit {
        /// Path to the file to submit
        file: PathBuf,
        /// Base URL of the server
        #[arg(long, default_value = submit::DEFAULT_BASE_URL)]
        url: String,
        /// Media kind route segment (image, audio or video)
        #[arg(long, default_value = "image")]
        kind: String,
    },

    /// Start the DFGuard HTTP API server
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "8787")]
        port: u16,
        /// Artificial analysis delay in milliseconds (default: 2500, 0 disables)
        #[arg(long)]
        delay_ms: Option<u64>,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { file, delay_ms } => {
            cmd_analyze(&file, delay_ms, cli.output, cli.quiet);
        }
        Commands::Submit { file, url, kind } => {
            cmd_submit(&file, &url, &kind, cli.output, cli.quiet);
        }
        Commands::Serve { port, delay_ms } => {
            let rt = tokio::runtime::Runtime::new().expect("failed to create tokio runtime");
            if let Err(e) = rt.block_on(serve::start_server(port, delay_ms)) {
                eprintln!("Server error: {}", e);
                process::exit(1);
            }
        }
    }
}

fn cmd_analyze(file: &Path, delay_ms: Option<u64>, output: OutputFormat, quiet: bool) {
    let content = match std::fs::read(file) {
        Ok(content) => content,
        Err(e) => {
            let msg = format!("error: no file selected: {}: {}", file.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let file_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let request = AnalysisRequest::new(file_name, content);

    let latency = match delay_ms {
        Some(ms) => LatencyPolicy::fixed(ms),
        None => LatencyPolicy::default(),
    };

    let rt = tokio::runtime::Runtime::new().expect("failed to create tokio runtime");
    let result = rt.block_on(dfguard_engine::evaluate_with(request.file_name(), &latency));

    print_result(&result, output, quiet);
}

fn cmd_submit(file: &Path, url: &str, kind: &str, output: OutputFormat, quiet: bool) {
    let kind: MediaKind = match kind.parse() {
        Ok(kind) => kind,
        Err(e) => {
            let msg = format!("error: {}", e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    match submit::submit(url, kind, file) {
        Ok(response) => {
            if quiet {
                return;
            }
            match output {
                OutputFormat::Json => {
                    let pretty = serde_json::to_string_pretty(&response)
                        .unwrap_or_else(|e| format!("serialization error: {}", e));
                    println!("{}", pretty);
                }
                OutputFormat::Text => {
                    println!("Verdict: {}", response.result);
                    if let Some(confidence) = response.confidence {
                        println!("Confidence: {:.1}%", confidence);
                    }
                    if let Some(details) = &response.details {
                        println!("Details: {}", details);
                    }
                }
            }
        }
        Err(e) => {
            let msg = format!("error: {}", e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    }
}

/// Print an analysis result in the selected output format.
fn print_result(result: &AnalysisResult, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Json => {
            let pretty = serde_json::to_string_pretty(result)
                .unwrap_or_else(|e| format!("serialization error: {}", e));
            println!("{}", pretty);
        }
        OutputFormat::Text => {
            println!("Verdict: {}", result.status());
            println!("Confidence: {:.1}%", result.confidence());
            println!("Details: {}", result.details());
        }
    }
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{{\"error\": \"{}\"}}", msg.replace('"', "\\\""));
        }
    }
}
