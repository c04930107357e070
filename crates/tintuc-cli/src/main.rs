//! Tin Tuc dashboard
//!
//! Terminal front end for the news API: browse hot and latest articles,
//! read one, post a new one, or summarize a piece of text.

mod api;
mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tintuc_types::{NewArticle, Page, DEFAULT_LIMIT};
use tracing::{debug, error};

#[derive(Parser)]
#[command(name = "tintuc")]
#[command(author, version, about = "Tin Tuc - news dashboard in the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API base URL
    #[arg(long, global = true, env = "API_BASE", default_value = api::DEFAULT_API_BASE)]
    api_base: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args, Debug, Clone, Copy)]
struct PageArgs {
    /// Number of articles to skip
    #[arg(long, default_value_t = 0)]
    skip: u32,

    /// Maximum number of articles to show
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    limit: u32,
}

impl From<PageArgs> for Page {
    fn from(args: PageArgs) -> Self {
        Page::new(args.skip, args.limit)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Newest articles first
    Latest {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Featured articles
    Hot {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Read one article (counts as a view)
    Show {
        /// Article id
        id: i64,
    },

    /// Articles in a category
    Category {
        /// Category id
        id: i64,

        #[command(flatten)]
        page: PageArgs,
    },

    /// List categories
    Categories,

    /// Publish a new article
    Create {
        /// Title
        #[arg(short, long)]
        title: String,

        /// Body text
        #[arg(short, long)]
        body: String,

        /// Category id
        #[arg(short, long)]
        category: i64,

        /// Short description
        #[arg(short, long)]
        description: Option<String>,

        /// Image URL
        #[arg(short, long)]
        image: Option<String>,

        /// Mark as featured
        #[arg(long)]
        hot: bool,
    },

    /// Summarize text with the server's model
    Summarize {
        /// Text to summarize
        text: Option<String>,

        /// Read the text from a file instead
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(if cli.verbose {
            "tintuc_cli=debug"
        } else {
            "tintuc_cli=warn"
        })
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let client = api::Client::new(&cli.api_base);
    debug!("Using API at {}", client.base_url());

    let result = match cli.command {
        Commands::Latest { page } => commands::news::latest(&client, page.into()).await,
        Commands::Hot { page } => commands::news::hot(&client, page.into()).await,
        Commands::Show { id } => commands::news::show(&client, id).await,
        Commands::Category { id, page } => {
            commands::news::category(&client, id, page.into()).await
        }
        Commands::Categories => commands::news::categories(&client).await,
        Commands::Create {
            title,
            body,
            category,
            description,
            image,
            hot,
        } => {
            let mut article = NewArticle::new(title, body, category).featured(hot);
            if let Some(description) = description {
                article = article.with_description(description);
            }
            if let Some(image) = image {
                article = article.with_image_url(image);
            }
            commands::news::create(&client, article).await
        }
        Commands::Summarize { text, file } => {
            commands::summarize::execute(&client, text, file).await
        }
    };

    if let Err(ref e) = result {
        error!("Command failed: {:#}", e);
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    result
}
