use clap::{Args, Parser, Subcommand};
use console::Term;
use log_json_bridge::{
    convert, convert_and_upload, convert_back, upload, BulkSummary, Credentials, Endpoint,
    UploadConfig,
};
use main_error::MainError;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "log-json-bridge",
    version,
    about = "Convert space delimited logs to json and upload them to elasticsearch"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a log file into a json array of tokenized lines
    Convert { log: PathBuf, json: PathBuf },
    /// Convert a json array of tokenized lines back into a log file
    ConvertBack { json: PathBuf, log: PathBuf },
    /// Upload a converted json file
    Upload {
        json: PathBuf,
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Convert a log file and upload the result
    Run {
        log: PathBuf,
        json: PathBuf,
        #[command(flatten)]
        target: TargetArgs,
    },
}

/// Connection options, anything missing is asked for on the terminal
#[derive(Args, Debug)]
struct TargetArgs {
    /// Index to write the records to
    #[arg(long)]
    index: String,
    /// Elastic cloud id of the deployment
    #[arg(long, conflicts_with = "url")]
    cloud_id: Option<String>,
    /// Base url of the elasticsearch instance, instead of a cloud id
    #[arg(long)]
    url: Option<String>,
    #[arg(long)]
    username: Option<String>,
    #[arg(long)]
    password: Option<String>,
}

impl TargetArgs {
    fn into_config(self, term: &Term) -> io::Result<UploadConfig> {
        let endpoint = match (self.cloud_id, self.url) {
            (Some(cloud_id), _) => Endpoint::CloudId(cloud_id),
            (None, Some(url)) => Endpoint::Url(url),
            (None, None) => Endpoint::CloudId(prompt(term, "Enter your Elasticsearch Cloud ID")?),
        };
        let username = match self.username {
            Some(username) => username,
            None => prompt(term, "Enter your Elasticsearch username")?,
        };
        let password = match self.password {
            Some(password) => password,
            None => {
                term.write_str("Enter your Elasticsearch password: ")?;
                term.read_secure_line()?
            }
        };
        Ok(UploadConfig {
            endpoint,
            index: self.index,
            credentials: Credentials::new(username, password),
        })
    }
}

fn prompt(term: &Term, message: &str) -> io::Result<String> {
    term.write_str(&format!("{}: ", message))?;
    Ok(term.read_line()?.trim().to_string())
}

/// Destination for converted records, `.json` is added when no extension was given
fn json_destination(mut path: PathBuf) -> PathBuf {
    if path.extension().is_none() {
        path.set_extension("json");
    }
    path
}

fn summary_message(summary: BulkSummary) -> String {
    if summary.failed > 0 {
        format!(
            "Uploaded {} documents, {} rejected",
            summary.documents.saturating_sub(summary.failed),
            summary.failed
        )
    } else {
        format!("Uploaded {} documents", summary.documents)
    }
}

fn main() -> Result<(), MainError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let term = Term::stderr();

    match cli.command {
        Command::Convert { log, json } => {
            let json = json_destination(json);
            let records = convert(&log, &json)?;
            println!("Wrote {} records to {}", records, json.display());
        }
        Command::ConvertBack { json, log } => {
            let lines = convert_back(&json, &log)?;
            println!("Wrote {} lines to {}", lines, log.display());
        }
        Command::Upload { json, target } => {
            let config = target.into_config(&term)?;
            println!("{}", summary_message(upload(&json, &config)?));
        }
        Command::Run { log, json, target } => {
            let json = json_destination(json);
            let config = target.into_config(&term)?;
            println!(
                "{}",
                summary_message(convert_and_upload(&log, &json, &config)?)
            );
        }
    }

    Ok(())
}
