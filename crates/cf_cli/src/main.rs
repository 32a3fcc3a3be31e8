use clap::Parser;
use cf_core::SubmitPayload;
use cf_render::ThemeSet;
use cf_web::AppState;
use cf_webhook::{create_client, ClientKind, WebhookConfig};
use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;

mod batch;
mod commands;
mod logging;

/// Stand-in endpoint for dry runs, which never contact the workflow.
const DRY_RUN_URL: &str = "http://localhost/dry-run";

#[derive(Parser, Debug)]
#[command(author, version, about = "Queue articles, send them to the study-material workflow, and collect the results", long_about = None)]
pub struct Cli {
    /// Workflow webhook that generates the study material
    #[arg(long, env = "N8N_WEBHOOK_URL", hide_env_values = true)]
    webhook_url: Option<String>,
    /// Sent as the x-api-key header when set
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    /// Seconds to wait for the workflow (1-600)
    #[arg(long, env = "CF_TIMEOUT_SECS", default_value_t = 300)]
    timeout: u64,
    /// Directory holding classic.css, modern.css and print.css
    #[arg(long, env = "CF_THEMES_DIR", default_value = "themes")]
    themes_dir: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the web front end
    Serve {
        #[arg(long, default_value = "127.0.0.1:8501")]
        addr: SocketAddr,
        /// Answer locally instead of calling the workflow
        #[arg(long)]
        dry_run: bool,
    },
    /// Submit a JSON batch file and write the returned documents to disk
    Submit {
        #[arg(long)]
        batch: PathBuf,
        #[arg(long, default_value = "output")]
        out_dir: PathBuf,
        /// Custom CSS sent with the batch and used for an extra styled download
        #[arg(long)]
        css: Option<PathBuf>,
        #[arg(long)]
        dry_run: bool,
    },
    /// List the available themes and where each was loaded from
    Themes,
}

impl Cli {
    fn webhook_config(&self, dry_run: bool) -> cf_core::Result<WebhookConfig> {
        let url = match (&self.webhook_url, dry_run) {
            (None, true) => Some(DRY_RUN_URL),
            (url, _) => url.as_deref(),
        };
        let kind = if dry_run { ClientKind::Dummy } else { ClientKind::Http };
        Ok(WebhookConfig::new(url, self.api_key.clone())?
            .with_timeout_secs(self.timeout)?
            .with_client(kind))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging();
    let cli = Cli::parse();

    let themes = ThemeSet::load(&cli.themes_dir);

    match &cli.command {
        Commands::Themes => {
            commands::list_themes(&themes);
        }
        Commands::Serve { addr, dry_run } => {
            let config = cli.webhook_config(*dry_run)?;
            let client = create_client(&config)?;
            let state = AppState::new(client, themes, config.connection_label());
            cf_web::serve(*addr, state).await?;
        }
        Commands::Submit { batch, out_dir, css, dry_run } => {
            let config = cli.webhook_config(*dry_run)?;
            let client = create_client(&config)?;

            let articles = batch::load_batch(batch)?;
            if articles.is_empty() {
                anyhow::bail!("{} contains no articles", batch.display());
            }
            info!("📋 Loaded {} article(s) from {}", articles.len(), batch.display());

            let custom_css = match css {
                Some(path) => Some(fs::read_to_string(path)?),
                None => None,
            };
            let payload = SubmitPayload::new(articles, custom_css.clone());

            let result = match commands::submit_with_spinner(client.as_ref(), &payload).await {
                Ok(result) => result,
                Err(e) => {
                    commands::report_error(&e);
                    return Err(e.into());
                }
            };
            commands::report_result(&result);

            let themes = themes.with_custom(custom_css.as_deref());
            let written = commands::write_outputs(&result, &themes, out_dir)?;
            info!("📥 Wrote {} file(s) to {}", written.len(), out_dir.display());
        }
    }

    Ok(())
}
