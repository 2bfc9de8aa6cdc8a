use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use leafmark::Config;

#[derive(Parser)]
#[command(name = "leafmark")]
#[command(about = "Build a static site from Markdown files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the site: copy static files and render every content page
    Build {
        /// Site root containing the static and content directories
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        /// Config file (defaults to leafmark.toml in the site root)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the HTML for a single Markdown file
    Render {
        /// Input Markdown file
        input: PathBuf,
    },
    /// Print the title (first `# ` heading) of a Markdown file
    Title {
        /// Input Markdown file
        input: PathBuf,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Build { root, config } => {
            let config_path = config.unwrap_or_else(|| root.join("leafmark.toml"));
            log::debug!("Using config from: {}", config_path.display());
            let config = Config::load(&config_path)?;

            let summary = leafmark::site::build_site(&config, &root)?;
            log::info!(
                "Built {} pages and copied {} static files",
                summary.pages,
                summary.static_files
            );
        }
        Command::Render { input } => {
            let markdown = read_input(&input)?;
            println!("{}", leafmark::markdown_to_html(&markdown)?);
        }
        Command::Title { input } => {
            let markdown = read_input(&input)?;
            println!("{}", leafmark::extract_title(&markdown)?);
        }
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("reading {}: {}", path.display(), e))
}
