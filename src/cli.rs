use clap::{Parser, Subcommand};
use std::path::PathBuf;

use ytq::completions::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(
    name = "ytq",
    about = "Summarize, question, and search YouTube videos through their captions",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Show request metadata on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch a video's transcript and print it
    Transcript {
        /// YouTube video URL or video ID (reads from stdin if omitted)
        url: Option<String>,

        /// Write transcript to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Summarize a video from its transcript
    Summarize {
        /// YouTube video URL or video ID
        url: String,

        /// Summary language
        #[arg(short, long, value_enum)]
        language: Option<Language>,

        /// Completion model
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Answer a question about a video's content
    Ask {
        /// YouTube video URL or video ID
        url: String,

        /// Question about the video
        question: String,

        /// Completion model
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Find videos matching a query that carry captions
    Search {
        /// Keyword query
        query: String,

        /// Output format: text (default), json
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}
