use anyhow::{bail, Context, Result};
use clap::Args;
use fitsview_core::config::AppConfig;
use fitsview_core::search::{Facet, QuickRange, SearchController, SortKey};
use tracing::info;
use url::Url;

use crate::summary::print_search_results;

#[derive(Args)]
pub struct SearchArgs {
    /// Start from the filters encoded in a search page URL
    #[arg(long)]
    pub from_url: Option<String>,

    /// Free-text query
    #[arg(long)]
    pub q: Option<String>,

    /// Lower bound, `YYYY-MM-DD HH:MM:SS`
    #[arg(long)]
    pub date_from: Option<String>,

    /// Upper bound, `YYYY-MM-DD HH:MM:SS`
    #[arg(long)]
    pub date_to: Option<String>,

    /// Quick range: last24h, today, yesterday, last7days
    #[arg(long, conflicts_with_all = ["date_from", "date_to"])]
    pub range: Option<String>,

    /// Instruments (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub instrument: Vec<String>,

    /// Quality flags (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub flags: Vec<String>,

    #[arg(long)]
    pub exp_min: Option<f64>,

    #[arg(long)]
    pub exp_max: Option<f64>,

    #[arg(long)]
    pub frames_min: Option<u32>,

    #[arg(long)]
    pub frames_max: Option<u32>,

    /// Sort key: -observed_at, observed_at, object, exptime, -exptime
    #[arg(long, allow_hyphen_values = true)]
    pub sort: Option<String>,

    /// Result page
    #[arg(long)]
    pub page: Option<u32>,
}

pub fn run(args: &SearchArgs, config: &AppConfig) -> Result<()> {
    let location = match args.from_url {
        Some(ref raw) => Url::parse(raw).with_context(|| format!("Invalid URL {raw:?}"))?,
        None => config.search_page()?,
    };
    let mut controller = SearchController::new(location);
    apply_args(&mut controller, args)?;

    let backend = super::backend(config)?;
    let pb = super::spinner("Searching")?;
    controller.execute_search(&backend, true);
    pb.finish_and_clear();
    info!(location = %controller.location(), total = controller.total(), "search done");

    let chips = controller.chips();
    let cards = controller.cards(&config.placeholder_thumb);
    print_search_results(&controller, &chips, &cards);
    Ok(())
}

fn apply_args(controller: &mut SearchController, args: &SearchArgs) -> Result<()> {
    if let Some(ref range) = args.range {
        let Some(range) = QuickRange::from_slug(range) else {
            bail!("Unknown range {range:?} (expected last24h, today, yesterday or last7days)");
        };
        controller.apply_quick_range(range, chrono::Local::now().naive_local());
    }

    let state = controller.state_mut();
    if let Some(ref q) = args.q {
        state.set_query(q);
    }
    if args.date_from.is_some() || args.date_to.is_some() {
        let from = args.date_from.clone().or_else(|| state.date_from().map(str::to_string));
        let to = args.date_to.clone().or_else(|| state.date_to().map(str::to_string));
        state.set_date_range(from, to);
    }
    for value in &args.instrument {
        if !state.is_active(Facet::Instrument, value) {
            state.toggle_facet(Facet::Instrument, value);
        }
    }
    for value in &args.flags {
        if !state.is_active(Facet::Flag, value) {
            state.toggle_facet(Facet::Flag, value);
        }
    }
    if args.exp_min.is_some() || args.exp_max.is_some() {
        let mut range = state.exposure();
        range.min = args.exp_min.or(range.min);
        range.max = args.exp_max.or(range.max);
        state.set_exposure(range);
    }
    if args.frames_min.is_some() || args.frames_max.is_some() {
        let mut range = state.frames();
        range.min = args.frames_min.or(range.min);
        range.max = args.frames_max.or(range.max);
        state.set_frames(range);
    }
    if let Some(ref sort) = args.sort {
        state.set_sort(SortKey::from_param(sort));
    }
    if let Some(page) = args.page {
        state.set_page(page);
    }
    Ok(())
}
