//! CLI command definitions, routing, and tracing setup.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use url::Url;

use autocrumb_core::site::{ProgressReporter, SiteJob, SiteSummary};
use autocrumb_core::{TrailBuilder, render_html};
use autocrumb_shared::{AppConfig, BreadcrumbOptions, init_config, load_config};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// autocrumb - breadcrumb trails from page URLs.
#[derive(Parser)]
#[command(
    name = "autocrumb",
    version,
    about = "Fill breadcrumb markup in HTML pages from their URLs.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Config file (defaults to ./autocrumb.toml, then ~/.autocrumb/autocrumb.toml).
    #[arg(long, global = true, env = "AUTOCRUMB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Print the breadcrumb trail for a URL.
    Trail {
        /// Page URL.
        url: String,

        /// Document title used for the last crumb.
        #[arg(short, long, default_value = "")]
        title: String,

        /// Home crumb label.
        #[arg(long)]
        home: Option<String>,

        /// Print JSON instead of one crumb per line.
        #[arg(long)]
        json: bool,
    },

    /// Fill the breadcrumb in a single HTML file.
    Render {
        /// HTML file to read.
        file: PathBuf,

        /// URL the page is served at.
        #[arg(short, long)]
        url: String,

        /// Output file (defaults to stdout).
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Fill breadcrumbs in every HTML file of a built site.
    Site {
        /// Site output directory.
        dir: PathBuf,

        /// URL the site root is served at (overrides site.origin).
        #[arg(long)]
        origin: Option<String>,

        /// Write into this directory instead of in place.
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Keep `.html` and `index.html` in derived URLs.
        #[arg(long)]
        no_clean_urls: bool,

        /// Files rendered at once (overrides site.concurrency).
        #[arg(short = 'j', long)]
        concurrency: Option<u32>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Write a default config file to ~/.autocrumb/.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "autocrumb=warn,autocrumb_core=warn",
        1 => "autocrumb=debug,autocrumb_core=debug,autocrumb_dom=debug,autocrumb_shared=debug",
        _ => "autocrumb=trace,autocrumb_core=trace,autocrumb_dom=trace,autocrumb_shared=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so rendered HTML on stdout stays clean.
    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Trail {
            url,
            title,
            home,
            json,
        } => cmd_trail(&config, &url, &title, home.as_deref(), json),
        Command::Render { file, url, out } => cmd_render(&config, &file, &url, out.as_deref()).await,
        Command::Site {
            dir,
            origin,
            out,
            no_clean_urls,
            concurrency,
        } => {
            cmd_site(
                &config,
                dir,
                origin.as_deref(),
                out,
                no_clean_urls,
                concurrency,
            )
            .await
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(&config),
        },
    }
}

fn parse_url(input: &str) -> Result<Url> {
    Url::parse(input).map_err(|e| eyre!("invalid URL '{input}': {e}"))
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_trail(
    config: &AppConfig,
    url: &str,
    title: &str,
    home: Option<&str>,
    json: bool,
) -> Result<()> {
    let url = parse_url(url)?;
    let options = BreadcrumbOptions::from(config);

    let mut builder = TrailBuilder::from(&options);
    if let Some(home) = home {
        builder = builder.home_label(home);
    }
    let trail = builder.build(&url, title);

    if json {
        println!("{}", serde_json::to_string_pretty(&trail)?);
    } else {
        for (i, crumb) in trail.iter().enumerate() {
            println!("{}. {}  {}", i + 1, crumb.label(), crumb.url());
        }
    }
    Ok(())
}

async fn cmd_render(config: &AppConfig, file: &Path, url: &str, out: Option<&Path>) -> Result<()> {
    let url = parse_url(url)?;
    let options = BreadcrumbOptions::from(config);

    let html = tokio::fs::read_to_string(file)
        .await
        .wrap_err_with(|| format!("failed to read {}", file.display()))?;

    let output = render_html(&html, &url, &options);
    if !output.touched() {
        info!(
            file = %file.display(),
            attribute = %options.attribute,
            "no breadcrumb root found, output unchanged"
        );
    }

    match out {
        Some(path) => {
            tokio::fs::write(path, &output.html)
                .await
                .wrap_err_with(|| format!("failed to write {}", path.display()))?;
            let report = output.generated.report;
            eprintln!(
                "  {} -> {} ({} filled, {} removed)",
                file.display(),
                path.display(),
                report.filled,
                report.removed
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(output.html.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

async fn cmd_site(
    config: &AppConfig,
    dir: PathBuf,
    origin: Option<&str>,
    out: Option<PathBuf>,
    no_clean_urls: bool,
    concurrency: Option<u32>,
) -> Result<()> {
    let origin = origin
        .or(config.site.origin.as_deref())
        .ok_or_else(|| eyre!("no site origin: pass --origin or set site.origin in the config"))?;

    let job = SiteJob {
        root: dir,
        out_dir: out,
        base_url: parse_url(origin)?,
        clean_urls: config.site.clean_urls && !no_clean_urls,
        concurrency: concurrency.unwrap_or(config.site.concurrency) as usize,
        options: BreadcrumbOptions::from(config),
    };

    info!(
        root = %job.root.display(),
        base_url = %job.base_url,
        clean_urls = job.clean_urls,
        "rendering site"
    );

    let reporter = CliProgress::new();
    let summary = autocrumb_core::render_site(&job, &reporter).await?;

    println!();
    println!("  Breadcrumbs rendered!");
    println!("  Files:     {}", summary.files);
    println!("  Rewritten: {}", summary.rewritten);
    println!("  Unchanged: {}", summary.unchanged);
    println!("  Errors:    {}", summary.errors.len());
    println!("  Time:      {:.1}s", summary.elapsed.as_secs_f64());
    for (path, error) in &summary.errors {
        println!("    {}: {error}", path.display());
    }
    println!();

    if summary.errors.is_empty() {
        Ok(())
    } else {
        Err(eyre!("{} file(s) failed to render", summary.errors.len()))
    }
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Created config file at {}", path.display());
    Ok(())
}

fn cmd_config_show(config: &AppConfig) -> Result<()> {
    let rendered = toml::to_string_pretty(config)?;
    print!("{rendered}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif bar.
struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::with_template("{spinner:.cyan} [{pos}/{len}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        bar.set_style(style);
        Self { bar }
    }
}

impl ProgressReporter for CliProgress {
    fn started(&self, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_message("Rendering");
    }

    fn file_done(&self, path: &Path, current: usize, _total: usize) {
        self.bar.set_position(current as u64);
        self.bar.set_message(path.display().to_string());
    }

    fn done(&self, _summary: &SiteSummary) {
        self.bar.finish_and_clear();
    }
}
