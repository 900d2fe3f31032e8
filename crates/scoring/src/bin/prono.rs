use clap::{Parser, Subcommand};
use scoring::{
    BaseAthleSource, CompetitionConfig, CompetitionId, CompetitionRegistry, PodiumTable,
    ResultsSource, build_podiums, compute_coefficients, filter_club, leaderboard, parse, score,
};
use sqlx::postgres::PgPoolOptions;
use storage::PredictionRepository;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "prono")]
#[command(about = "Interclubs prediction game - results ingestion and scoring", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the registered competitions
    List,
    /// Fetch and parse a competition's results, print the podiums
    Results {
        #[arg(short, long, default_value = "interclubs")]
        competition: String,
    },
    /// Print the popularity coefficient table from the stored predictions
    Coefficients,
    /// Compute and print the leaderboard
    Score {
        #[arg(short, long, default_value = "interclubs")]
        competition: String,

        /// Actual team total, enables total-points predictions and tie-breaks
        #[arg(long)]
        total_points: Option<i64>,

        /// Emit the leaderboard as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("prono={},scoring={}", log_level, log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::List => {
            list_competitions();
        }
        Commands::Results { competition } => {
            let config = resolve_config(&competition)?;
            let podiums = fetch_podiums(config).await?;
            print_podiums(&podiums);
        }
        Commands::Coefficients => {
            handle_coefficients(&cli.database_url).await?;
        }
        Commands::Score {
            competition,
            total_points,
            json,
        } => {
            let config = resolve_config(&competition)?;
            handle_score(config, &cli.database_url, total_points, json).await?;
        }
    }

    Ok(())
}

fn list_competitions() {
    let registry = CompetitionRegistry::new();
    tracing::info!("Registered competitions:");
    for id in registry.list_competitions() {
        if let Some(config) = registry.get_config(id) {
            tracing::info!("  - {} ({} pages)", id, config.page_count);
        }
    }
}

fn resolve_config(competition: &str) -> Result<CompetitionConfig, Box<dyn std::error::Error>> {
    let registry = CompetitionRegistry::new();
    let id: CompetitionId = competition.parse()?;
    let config = registry
        .get_config(id)
        .ok_or_else(|| format!("Competition '{}' not found in registry", id))?;
    Ok(config.clone())
}

async fn fetch_podiums(config: CompetitionConfig) -> Result<PodiumTable, Box<dyn std::error::Error>> {
    let club_prefix = config.club_prefix.clone();
    let source = BaseAthleSource::new(config);

    tracing::info!("Fetching results from {}", source.name());
    let pages = source.fetch_pages().await?;

    let results = parse(&pages);
    tracing::info!("Parsed {} result rows", results.len());

    let club_rows = filter_club(&results, &club_prefix)?;
    tracing::info!("{} rows for club '{}'", club_rows.len(), club_prefix);

    Ok(build_podiums(club_rows)?)
}

fn print_podiums(podiums: &PodiumTable) {
    println!("Podiums by discipline:");
    for (discipline, podium) in podiums.disciplines() {
        println!("  {}", discipline.label);
        for (place, row) in podium.entries().iter().enumerate() {
            println!("    {}. {} ({} pts)", place + 1, row.athlete, row.points);
        }
    }

    println!("\nPodiums by family:");
    for ((gender, family), podium) in podiums.by_family() {
        println!("  {} {}", family, gender);
        for (place, row) in podium.entries().iter().enumerate() {
            println!(
                "    {}. {} - {} ({} pts)",
                place + 1,
                row.athlete,
                row.discipline,
                row.points
            );
        }
    }
}

async fn handle_coefficients(database_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let pool = connect(database_url).await?;
    let predictions = PredictionRepository::new(&pool).list_all().await?;
    tracing::info!("Loaded {} predictions", predictions.len());

    let coefficients = compute_coefficients(&predictions);
    let mut entries: Vec<_> = coefficients.iter().collect();
    entries.sort();

    println!("Popularity coefficients ({} entries):", coefficients.len());
    for (category, athlete, coefficient) in entries {
        println!("  {} / {} -> x{}", category, athlete, coefficient);
    }

    Ok(())
}

async fn handle_score(
    config: CompetitionConfig,
    database_url: &str,
    total_points: Option<i64>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let podiums = fetch_podiums(config).await?;

    let pool = connect(database_url).await?;
    let predictions = PredictionRepository::new(&pool).list_all().await?;
    tracing::info!("Loaded {} predictions", predictions.len());

    let coefficients = compute_coefficients(&predictions);
    let scores = score(&predictions, &podiums, &coefficients, total_points);
    let ranked = leaderboard(&scores, &predictions, total_points);

    if json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
    } else {
        println!("Leaderboard ({} players):", ranked.len());
        for (rank, entry) in ranked.iter().enumerate() {
            println!("  {:>3}. {:<40} {:>5}", rank + 1, entry.user_id, entry.score);
        }
    }

    Ok(())
}

async fn connect(database_url: &str) -> Result<sqlx::PgPool, Box<dyn std::error::Error>> {
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;
    Ok(pool)
}
