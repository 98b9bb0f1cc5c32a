//! Command-line front end: renders the gallery into a host page and writes it out.

use anyhow::Context;
use artgallery::page::HostPage;
use artgallery::{GalleryConfig, RenderOutcome, StyleRegistry};
use clap::Parser;
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;

/// Render a static art gallery page from a JSON artwork list
#[derive(Parser, Debug)]
#[command(name = "artgallery", version, about)]
struct Args {
    /// Site base: a local directory or an http(s) URL
    #[arg(long, default_value = ".")]
    base: String,

    /// Artwork document path relative to the base
    #[arg(long, default_value = artgallery::DEFAULT_DATA_LOCATION)]
    data: String,

    /// Host HTML page (uses the built-in page when omitted)
    #[arg(long)]
    page: Option<PathBuf>,

    /// JSON file with extra or overriding style labels
    #[arg(long)]
    styles: Option<PathBuf>,

    /// Write the page here instead of stdout
    #[arg(long, short)]
    out: Option<PathBuf>,

    /// Cards shown in the featured section
    #[arg(long, default_value_t = artgallery::render::FEATURED_MAX)]
    featured_max: usize,

    /// Visible fraction at which a style section becomes active
    #[arg(long, default_value_t = artgallery::observer::DEFAULT_THRESHOLD)]
    threshold: f64,

    /// Do not embed the scroll observer script
    #[arg(long)]
    no_observer: bool,

    /// Override the footer year
    #[arg(long)]
    year: Option<i32>,

    /// Override the User-Agent header
    #[arg(long)]
    user_agent: Option<String>,

    /// Extra request header, `Name: value` (repeatable)
    #[arg(long = "header", value_parser = parse_header)]
    headers: Vec<(String, String)>,

    /// Verbose logging
    #[arg(long, short)]
    verbose: bool,
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected `Name: value`, got {:?}", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty header name in {:?}", raw));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

impl Args {
    fn config(&self) -> GalleryConfig {
        let defaults = GalleryConfig::default();
        GalleryConfig {
            base: self.base.clone(),
            data_location: self.data.clone(),
            featured_max: self.featured_max,
            observer_threshold: self.threshold,
            emit_observer_script: !self.no_observer,
            footer_year: self.year,
            user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent),
            headers: self.headers.iter().cloned().collect::<HashMap<_, _>>(),
            ..defaults
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = args.config();

    let mut registry = StyleRegistry::default();
    if let Some(path) = &args.styles {
        registry.extend_from_file(path)?;
    }

    let page = match &args.page {
        Some(path) => HostPage::from_file(path)?,
        None => HostPage::default(),
    };

    let site = artgallery::render_site(&config, &registry, page).await?;
    match &site.outcome {
        RenderOutcome::Rendered { sections, artworks } => {
            log::debug!("{} sections, {} artworks", sections, artworks)
        }
        RenderOutcome::LoadFailed => log::warn!("Gallery data unavailable; wrote fallback page"),
        RenderOutcome::NoRoot => log::warn!("Host page has no #{}", config.root_id),
    }

    match &args.out {
        Some(path) => {
            std::fs::write(path, site.page.as_str())
                .with_context(|| format!("failed to write {}", path.display()))?;
            log::info!("Wrote {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            out.write_all(site.page.as_str().as_bytes())?;
            out.flush()?;
        }
    }
    Ok(())
}
