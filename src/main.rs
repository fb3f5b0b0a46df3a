use std::io::{self, BufRead};
use std::path::PathBuf;

use eyre::Result;
use log::info;

mod cli;

use cli::{Cli, Command, OutputFormat};
use ytq::completions::{CompletionClient, DEFAULT_QA_MODEL, DEFAULT_SUMMARY_MODEL, Language};
use ytq::config::{self, Config};
use ytq::pipeline::TranscriptPipeline;
use ytq::search::SearchClient;

/// Preferred caption language passed to the transcript sources
const CAPTION_LANG: &str = "en";

fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("ytq.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ytq")
        .join("logs")
}

fn collect_urls(url: Option<String>) -> Result<Vec<String>> {
    let lines = if let Some(url) = url {
        vec![url]
    } else {
        let stdin = io::stdin();
        stdin.lock().lines().collect::<Result<Vec<_>, _>>()?
    };

    let urls: Vec<String> = lines
        .into_iter()
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .collect();

    if urls.is_empty() {
        eyre::bail!("no URL or video ID provided\n\nUsage: ytq transcript <URL>\n       echo <URL> | ytq transcript");
    }

    Ok(urls)
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;

    let cli = <Cli as clap::Parser>::parse();
    let config = Config::load().unwrap_or_default();
    let client = reqwest::Client::new();

    match cli.command {
        Command::Transcript { url, output } => {
            let urls = collect_urls(url)?;
            let pipeline = TranscriptPipeline::new(client.clone(), CAPTION_LANG);

            for url in &urls {
                let transcript = pipeline.fetch(url).await?;

                if cli.verbose {
                    eprintln!("Transcript: {} chars from {url}", transcript.len());
                }

                match &output {
                    Some(path) => {
                        std::fs::write(path, &transcript)?;
                        if cli.verbose {
                            eprintln!("Output written to: {}", path.display());
                        }
                    }
                    None => println!("{transcript}"),
                }
            }
        }

        Command::Summarize { url, language, model } => {
            // Credential check happens before any transcript fetch
            let completions = CompletionClient::new(client.clone(), config::openrouter_api_key()?);

            let language = language.unwrap_or_else(|| {
                config
                    .default_language
                    .as_deref()
                    .map(Language::from_name)
                    .unwrap_or_default()
            });
            let model = model
                .or_else(|| config.summary_model.clone())
                .unwrap_or_else(|| DEFAULT_SUMMARY_MODEL.to_string());

            let transcript = TranscriptPipeline::new(client.clone(), CAPTION_LANG).fetch(&url).await?;

            if cli.verbose {
                eprintln!("Transcript: {} chars\nModel: {model}", transcript.len());
            }

            let summary = completions.summarize(&transcript, language, &model).await?;
            println!("{summary}");
        }

        Command::Ask { url, question, model } => {
            let completions = CompletionClient::new(client.clone(), config::openrouter_api_key()?);

            let model = model
                .or_else(|| config.qa_model.clone())
                .unwrap_or_else(|| DEFAULT_QA_MODEL.to_string());

            let transcript = TranscriptPipeline::new(client.clone(), CAPTION_LANG).fetch(&url).await?;

            if cli.verbose {
                eprintln!("Transcript: {} chars\nModel: {model}", transcript.len());
            }

            let answer = completions.answer(&transcript, &question, &model).await?;
            println!("{answer}");
        }

        Command::Search { query, format } => {
            let search = SearchClient::new(client.clone(), config::youtube_api_key()?);
            let results = search.search_captioned(&query).await?;

            if cli.verbose {
                eprintln!("{} captioned videos", results.len());
            }

            let rendered = match format {
                OutputFormat::Text => ytq::output::render_results_text(&results),
                OutputFormat::Json => ytq::output::render_results_json(&results),
            };
            println!("{rendered}");
        }
    }

    Ok(())
}
