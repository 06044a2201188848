pub mod config;
pub mod metrics;
pub mod remote;
pub mod scoring;
pub mod store;
pub mod synthetic;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::EngineConfig;
use crate::scoring::{ImpactScorer, SeededRandom};

pub use crate::metrics::aggregate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Travel,
    Fitness,
    Nature,
    Art,
    Technology,
    General,
}

impl Category {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "food" => Some(Category::Food),
            "travel" => Some(Category::Travel),
            "fitness" => Some(Category::Fitness),
            "nature" => Some(Category::Nature),
            "art" => Some(Category::Art),
            "technology" | "tech" => Some(Category::Technology),
            "general" => Some(Category::General),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Travel => "travel",
            Category::Fitness => "fitness",
            Category::Nature => "nature",
            Category::Art => "art",
            Category::Technology => "technology",
            Category::General => "general",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub author_id: String,
    pub image_ref: String,
    pub caption: Option<String>,
    pub tags: Vec<String>,
    pub category: Category,
    pub impact_score: f64,
    pub created_at: DateTime<Utc>,
    pub likes: u32,
    pub comments: u32,
    pub shares: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactFactors {
    pub content_relevance: f64,
    pub engagement_prediction: f64,
    pub emotional_resonance: f64,
    pub visual_clarity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactAnalysis {
    pub score: f64,
    pub factors: ImpactFactors,
    pub suggestions: Vec<String>,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactMetrics {
    pub weekly_average: f64,
    pub monthly_average: f64,
    pub category_performance: BTreeMap<Category, f64>,
    pub weekly_trend: Vec<TrendPoint>,
    pub top_performing_posts: Vec<Post>,
    pub total_posts: usize,
    pub impact_growth: i64,
}

fn load_engine_config() -> EngineConfig {
    EngineConfig::load(None)
        .map(|(config, _)| config)
        .unwrap_or_default()
}

pub fn analyze(caption: Option<&str>, tags: &[String]) -> ImpactAnalysis {
    let config = load_engine_config();
    let scorer = ImpactScorer::new(config.scorer);
    let mut rng = SeededRandom::from_entropy();
    scorer.analyze(caption, tags, &mut rng)
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}

pub fn derive_post_id(author_id: &str, caption: Option<&str>, created_at: DateTime<Utc>) -> String {
    let payload = format!(
        "{}:{}:{}",
        author_id,
        caption.unwrap_or(""),
        created_at.timestamp_millis()
    );
    let hash = stable_hash64(&payload);
    format!("post_{:x}", hash)
}

fn stable_hash64(value: &str) -> u64 {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}
