mod api;
mod server;

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use std::path::Path;
use tracing_subscriber::EnvFilter;

use impact_engine::config::EngineConfig;
use impact_engine::remote::RemoteAnalysisClient;
use impact_engine::scoring::{ImpactScorer, SeededRandom};
use impact_engine::store::PostStore;
use impact_engine::synthetic::generate_sample_posts;
use impact_engine::{aggregate, derive_post_id, format_float, ImpactAnalysis, Post};

#[derive(Parser)]
#[command(name = "impact-engine", about = "Impact scoring and metrics for social posts")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    Analyze(AnalyzeArgs),
    Post(PostArgs),
    Metrics(MetricsArgs),
    Seed(SeedArgs),
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone, Default)]
struct AnalyzeArgs {
    #[arg(long)]
    caption: Option<String>,
    #[arg(long = "tag")]
    tags: Vec<String>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    remote: bool,
    #[arg(long)]
    details: bool,
}

#[derive(Args, Debug, Clone)]
struct PostArgs {
    #[arg(long)]
    caption: Option<String>,
    #[arg(long = "tag")]
    tags: Vec<String>,
    #[arg(long, default_value = "anonymous")]
    author: String,
    #[arg(long, default_value = "")]
    image: String,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    remote: bool,
}

#[derive(Args, Debug, Clone)]
struct MetricsArgs {
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
struct SeedArgs {
    #[arg(long, default_value_t = 12)]
    count: usize,
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8787)]
    port: u16,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or(Command::Analyze(AnalyzeArgs::default()));

    match command {
        Command::Analyze(args) => run_analyze(args).await,
        Command::Post(args) => run_post(args).await,
        Command::Metrics(args) => run_metrics(args).await,
        Command::Seed(args) => run_seed(args).await,
        Command::Serve(args) => {
            let (config, _) = EngineConfig::load(None)?;
            server::serve(args, config).await
        }
    }
}

async fn run_analyze(args: AnalyzeArgs) -> Result<(), String> {
    let (config, _) = EngineConfig::load(None)?;
    let analysis = run_scoring(
        &config,
        args.caption.as_deref(),
        &args.tags,
        args.seed,
        args.remote,
    )
    .await?;

    print_analysis(&analysis, args.details);
    Ok(())
}

async fn run_post(args: PostArgs) -> Result<(), String> {
    let (config, _) = EngineConfig::load(None)?;
    let store = PostStore::load(config.store.path.clone()).await?;
    let analysis = run_scoring(
        &config,
        args.caption.as_deref(),
        &args.tags,
        args.seed,
        args.remote,
    )
    .await?;

    let created_at = Utc::now();
    let post = Post {
        id: derive_post_id(&args.author, args.caption.as_deref(), created_at),
        author_id: args.author,
        image_ref: args.image,
        caption: args.caption,
        tags: args.tags,
        category: analysis.category,
        impact_score: analysis.score,
        created_at,
        likes: 0,
        comments: 0,
        shares: 0,
    };

    let stored = store.add(post).await?;
    println!(
        "Stored post {} with impact score {} ({})",
        stored.id,
        format_float(stored.impact_score, 0),
        stored.category.label()
    );

    if !analysis.suggestions.is_empty() {
        println!("\nSuggestions:");
        for suggestion in &analysis.suggestions {
            println!("- {}", suggestion);
        }
    }

    Ok(())
}

async fn run_metrics(args: MetricsArgs) -> Result<(), String> {
    let (config, _) = EngineConfig::load(None)?;
    let store = PostStore::load(config.store.path.clone()).await?;
    let posts = store.list().await;
    let metrics = aggregate(&posts, Utc::now());

    if args.json {
        let payload = serde_json::to_string_pretty(&metrics)
            .map_err(|err| format!("failed to serialize metrics: {}", err))?;
        println!("{}", payload);
        return Ok(());
    }

    println!("Posts tracked: {}", metrics.total_posts);
    println!(
        "Weekly average: {}",
        format_float(metrics.weekly_average, 1)
    );
    println!(
        "Monthly average: {}",
        format_float(metrics.monthly_average, 1)
    );
    println!("Week over week growth: {}%", metrics.impact_growth);

    if !metrics.category_performance.is_empty() {
        println!("\nCategory performance:");
        for (category, average) in &metrics.category_performance {
            println!("  {}: {}", category.label(), format_float(*average, 1));
        }
    }

    println!("\nWeekly trend:");
    for point in &metrics.weekly_trend {
        println!("  {}: {}", point.date, format_float(point.score, 1));
    }

    if !metrics.top_performing_posts.is_empty() {
        println!("\nTop performing:");
        for post in &metrics.top_performing_posts {
            println!(
                "  {} ({}): {}",
                post.id,
                post.category.label(),
                format_float(post.impact_score, 0)
            );
        }
    }

    Ok(())
}

async fn run_seed(args: SeedArgs) -> Result<(), String> {
    let (config, _) = EngineConfig::load(None)?;
    let store = PostStore::load(config.store.path.clone()).await?;
    let posts = generate_sample_posts(args.seed, args.count, Utc::now());

    let mut stored = 0;
    for post in posts {
        match store.add(post).await {
            Ok(_) => stored += 1,
            Err(err) => eprintln!("skipping sample: {}", err),
        }
    }

    println!(
        "Seeded {} sample posts into {}",
        stored,
        config.store.path.display()
    );
    Ok(())
}

async fn run_scoring(
    config: &EngineConfig,
    caption: Option<&str>,
    tags: &[String],
    seed: Option<u64>,
    remote: bool,
) -> Result<ImpactAnalysis, String> {
    if remote {
        let client = RemoteAnalysisClient::from_config(config)?
            .ok_or_else(|| "IMPACT_API_URL is not set".to_string())?;
        return client.analyze(caption, tags, Utc::now()).await;
    }

    let scorer = ImpactScorer::new(config.scorer.clone());
    let mut rng = match seed {
        Some(seed) => SeededRandom::new(seed),
        None => SeededRandom::from_entropy(),
    };
    Ok(scorer.analyze(caption, tags, &mut rng))
}

fn print_analysis(analysis: &ImpactAnalysis, details: bool) {
    println!(
        "Impact score: {} ({})",
        format_float(analysis.score, 0),
        analysis.category.label()
    );

    if details {
        println!("\nFactors:");
        println!(
            "  content relevance: {}",
            format_float(analysis.factors.content_relevance, 0)
        );
        println!(
            "  engagement prediction: {}",
            format_float(analysis.factors.engagement_prediction, 0)
        );
        println!(
            "  emotional resonance: {}",
            format_float(analysis.factors.emotional_resonance, 0)
        );
        println!(
            "  visual clarity: {}",
            format_float(analysis.factors.visual_clarity, 0)
        );
    }

    if !analysis.suggestions.is_empty() {
        println!("\nSuggestions:");
        for suggestion in &analysis.suggestions {
            println!("- {}", suggestion);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
