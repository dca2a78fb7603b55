use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use object_tiering::adapters::inbound::http::dto::ClassifyRequestDto;
use reqwest::{Client, Response};

#[derive(Parser, Debug)]
#[command(name = "object-tiering-cli")]
#[command(about = "CLI for the object tiering server", long_about = None)]
struct Cli {
    /// Server URL
    #[arg(short, long, env = "OBJECT_TIERING_URL", default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tag every object under a prefix with its tier
    Classify {
        /// Bucket name
        bucket: String,
        /// Only objects whose key starts with this prefix
        #[arg(short, long, default_value = "")]
        prefix: String,
        /// Override the server's warm threshold, in days
        #[arg(long)]
        warm_after_days: Option<u32>,
        /// Override the server's archive threshold, in days
        #[arg(long)]
        archive_after_days: Option<u32>,
    },

    /// Show current and projected monthly cost for a prefix
    Report {
        /// Bucket name
        bucket: String,
        /// Only objects whose key starts with this prefix
        #[arg(short, long, default_value = "")]
        prefix: String,
    },
}

impl Cli {
    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.url.trim_end_matches('/'), path)
    }
}

async fn print_json(response: Response) -> Result<()> {
    let status = response.status();
    let body: serde_json::Value = response
        .json()
        .await
        .context("Server returned a non-JSON body")?;

    println!("{}", serde_json::to_string_pretty(&body)?);

    if !status.is_success() {
        anyhow::bail!("Request failed with status {}", status);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = Client::new();

    let response = match &cli.command {
        Commands::Classify {
            bucket,
            prefix,
            warm_after_days,
            archive_after_days,
        } => {
            let request = ClassifyRequestDto {
                bucket: bucket.clone(),
                prefix: prefix.clone(),
                warm_after_days: *warm_after_days,
                archive_after_days: *archive_after_days,
            };
            client
                .post(cli.endpoint("/storage/classify"))
                .json(&request)
                .send()
                .await
        }
        Commands::Report { bucket, prefix } => {
            client
                .get(cli.endpoint("/storage/reports/s3-savings"))
                .query(&[("bucket", bucket.as_str()), ("prefix", prefix.as_str())])
                .send()
                .await
        }
    }
    .with_context(|| format!("Failed to reach {}", cli.url))?;

    print_json(response).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_parsing() {
        let cli = Cli::parse_from([
            "object-tiering-cli",
            "--url",
            "http://tiering:8080/",
            "classify",
            "media",
            "--prefix",
            "logs/",
            "--archive-after-days",
            "180",
        ]);

        assert_eq!(cli.endpoint("/health"), "http://tiering:8080/health");
        match cli.command {
            Commands::Classify {
                bucket,
                prefix,
                warm_after_days,
                archive_after_days,
            } => {
                assert_eq!(bucket, "media");
                assert_eq!(prefix, "logs/");
                assert_eq!(warm_after_days, None);
                assert_eq!(archive_after_days, Some(180));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_report_defaults_to_whole_bucket() {
        let cli = Cli::parse_from(["object-tiering-cli", "report", "media"]);
        match cli.command {
            Commands::Report { prefix, .. } => assert_eq!(prefix, ""),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
