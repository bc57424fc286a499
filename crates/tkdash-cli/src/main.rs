mod filters;
mod render;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tkdash_core::{build_view, load_tag_combinations, DashboardState, DateNormalizer, TagCombinations};
use tkdash_ingest::{load_dataset, DatasetLoader};

use crate::filters::FilterArgs;

#[derive(Debug, Parser)]
#[command(name = "tkdash")]
#[command(about = "TikTok analytics dashboard over the Overview and Content exports")]
struct Cli {
    #[command(flatten)]
    filters: FilterArgs,

    /// Override the Overview export location (path or http(s) URL)
    #[arg(long, global = true)]
    overview: Option<String>,

    /// Override the Content export location (path or http(s) URL)
    #[arg(long, global = true)]
    content: Option<String>,

    /// Print JSON instead of aligned text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
enum Commands {
    /// Overview time series for the visible metrics
    Trend,
    /// Video duration against total views
    Scatter,
    /// Engagement rate against watch-time rate per video
    Engagement,
    /// Videos grouped by tag combination
    Tags,
    /// Box-plot summary of engagement per tag combination
    Boxplot,
    /// The content table (ignores the filters)
    Table,
    /// Rows rejected while loading
    Errors,
    /// Tags that can be combined
    Vocab,
    /// Filter state and dataset counts (default)
    Summary,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = tkdash_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(overview) = &cli.overview {
        config.overview_source.clone_from(overview);
    }
    if let Some(content) = &cli.content {
        config.content_source.clone_from(content);
    }

    run(&cli, &config).await
}

async fn run(cli: &Cli, config: &tkdash_core::AppConfig) -> anyhow::Result<()> {
    let command = cli.command.unwrap_or(Commands::Summary);

    if command == Commands::Vocab {
        return render::print_vocab(cli.json);
    }

    let combinations = if cli.filters.no_presets {
        TagCombinations::empty()
    } else {
        load_tag_combinations(&config.tag_presets_path)?
    };
    let initial = DashboardState::from_config(config, combinations);
    let dates = DateNormalizer::new(config.century);
    let state = filters::filter_events(&cli.filters, &initial, &dates)?
        .into_iter()
        .fold(initial, |state, event| state.apply(event));

    let loader = DatasetLoader::from_config(config)?;
    let load = load_dataset(&loader).await;
    render::print_load_warnings(&load);

    if command == Commands::Errors {
        return render::print_errors(&load, cli.json);
    }

    let view = build_view(&load.dataset, &state);
    match command {
        Commands::Trend => render::print_trend(&view, &state, cli.json),
        Commands::Scatter => render::print_scatter(&view, cli.json),
        Commands::Engagement => render::print_engagement(&view, cli.json),
        Commands::Tags => render::print_tags(&view, cli.json),
        Commands::Boxplot => render::print_boxplots(&view, cli.json),
        Commands::Table => render::print_table(&view, cli.json),
        Commands::Summary | Commands::Errors | Commands::Vocab => {
            render::print_summary(&view, &state, &load, cli.json)
        }
    }
}
