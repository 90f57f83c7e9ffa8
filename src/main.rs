use clap::{Parser, Subcommand};
use std::path::PathBuf;
use travelbook::{export, generate, output, pipeline, settings, types};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "travelbook")]
#[command(about = "Print-ready travel book generator")]
#[command(long_about = "\
Print-ready travel book generator

Turns normalized travel records (JSON) into a themed, paginated HTML book
for browser print-to-PDF, or renders a single article as a standalone
printable page.

Input files:

  travels.json    # array of normalized travel records
  article.json    # one article (for the article command)
  settings.toml   # optional export settings (see gen-settings)

Run 'travelbook gen-settings' to print a documented settings.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Export settings file
    #[arg(long, default_value = "settings.toml", global = true)]
    settings: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the full book from a travels JSON file
    Build {
        /// Normalized travel records (JSON array)
        travels: PathBuf,
        /// Output HTML file
        #[arg(long, default_value = "book.html")]
        output: PathBuf,
        /// Book title shown in the browser tab
        #[arg(long, default_value = "Travel Book")]
        title: String,
    },
    /// Render one article as a standalone printable page
    Article {
        /// Article record (JSON)
        article: PathBuf,
        /// Output HTML file
        #[arg(long, default_value = "article.html")]
        output: PathBuf,
    },
    /// Validate inputs without writing output
    Check {
        /// Normalized travel records (JSON array)
        travels: PathBuf,
    },
    /// Print a stock settings.toml with all options documented
    GenSettings,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Build {
            travels,
            output,
            title,
        } => {
            let settings = settings::load_settings(&cli.settings)?;
            let records: Vec<types::Travel> =
                serde_json::from_str(&std::fs::read_to_string(&travels)?)?;
            let book = pipeline::generate_book(&records, &settings)?;
            let theme = travelbook::theme::resolve_theme(&settings.theme);
            let wrapped = export::wrap_for_print(
                &book,
                &title,
                &theme,
                settings.page_format,
                settings.orientation,
                settings.language.code(),
            )?;
            std::fs::write(&output, &wrapped)?;
            for line in output::format_build_summary(
                &records,
                &wrapped,
                &output.display().to_string(),
            ) {
                println!("{line}");
            }
        }
        Command::Article { article, output } => {
            let settings = settings::load_settings(&cli.settings)?;
            let record: types::Article =
                serde_json::from_str(&std::fs::read_to_string(&article)?)?;
            let theme = travelbook::theme::resolve_theme(&settings.theme);
            let html = generate::article::render_article(&record, &settings, &theme);
            std::fs::write(&output, &html)?;
            println!("Generated {} ({} bytes)", output.display(), html.len());
        }
        Command::Check { travels } => {
            let settings = settings::load_settings(&cli.settings)?;
            let records: Vec<types::Travel> =
                serde_json::from_str(&std::fs::read_to_string(&travels)?)?;
            println!(
                "OK: {} travels, theme '{}', format {:?}",
                records.len(),
                settings.theme,
                settings.page_format
            );
        }
        Command::GenSettings => {
            print!("{}", settings::stock_settings_toml());
        }
    }

    Ok(())
}
