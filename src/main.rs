use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use legible::browse::{random_text_count, BrowseState};
use legible::catalog::Catalog;
use legible::cli::Args;
use legible::pipeline::select::ForegroundSelector;
use legible::report::PreviewReport;
use legible::tui::{self, App};

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    info!("legible v{}", env!("CARGO_PKG_VERSION"));

    if !(1.0..=21.0).contains(&args.min_contrast) {
        bail!(
            "--min-contrast must be between 1 and 21, got {}",
            args.min_contrast
        );
    }
    let selector = ForegroundSelector::new(args.min_contrast);
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    if args.tui {
        // An unreadable catalog shows the loading placeholder instead of failing
        let catalog = Catalog::load_or_empty(args.palettes.as_deref());
        if args.strict {
            catalog.validate()?;
        }
        let state = if catalog.is_empty() {
            BrowseState::default()
        } else {
            initial_state(&args, &catalog, &mut rng)?
        };
        return tui::run(App::new(catalog, state, selector, args.text, rng));
    }

    let catalog = match &args.palettes {
        Some(path) => Catalog::load(path)?,
        None => Catalog::bundled()?,
    };
    if args.strict {
        catalog.validate()?;
    }
    let state = initial_state(&args, &catalog, &mut rng)?;
    let preview = state
        .preview(&catalog, &selector)
        .context("selected palette has no colors")?;
    let report = PreviewReport::new(state, &preview, &args.text)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.serialize());
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Build the starting selection from the command-line indices, rejecting
/// ones the catalog cannot satisfy.
fn initial_state(args: &Args, catalog: &Catalog, rng: &mut StdRng) -> Result<BrowseState> {
    let Some(category) = catalog.category(args.category) else {
        bail!(
            "category {} out of range: catalog has {} categories",
            args.category,
            catalog.categories.len()
        );
    };
    let Some(palette) = category.palettes.get(args.palette) else {
        bail!(
            "palette {} out of range: {} has {} palettes",
            args.palette,
            category.name,
            category.palettes.len()
        );
    };
    if args.color >= palette.colors.len() {
        bail!(
            "color {} out of range: {} has {} colors",
            args.color,
            palette.name,
            palette.colors.len()
        );
    }
    Ok(BrowseState {
        category: args.category,
        palette: args.palette,
        color_index: args.color,
        text_count: args.lines.unwrap_or_else(|| random_text_count(rng)),
    })
}
