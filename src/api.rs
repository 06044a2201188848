use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use impact_engine::{Category, ImpactAnalysis, ImpactFactors, ImpactMetrics, Post};

pub const MAX_CAPTION_CHARS: usize = 280;

#[derive(Debug, Deserialize)]
pub struct ApiAnalyzeRequest {
    pub caption: Option<String>,
    pub tags: Option<Vec<String>>,
    pub seed: Option<u64>,
    pub use_remote: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct AnalyzeInput {
    pub caption: Option<String>,
    pub tags: Vec<String>,
    pub seed: Option<u64>,
    pub use_remote: bool,
}

impl ApiAnalyzeRequest {
    pub fn into_input(self) -> Result<AnalyzeInput, String> {
        let caption = validate_caption(self.caption)?;
        Ok(AnalyzeInput {
            caption,
            tags: normalize_tags(self.tags),
            seed: self.seed,
            use_remote: self.use_remote.unwrap_or(false),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiPostRequest {
    pub caption: Option<String>,
    pub tags: Option<Vec<String>>,
    pub author_id: Option<String>,
    pub image_ref: Option<String>,
    pub seed: Option<u64>,
    pub use_remote: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct PostInput {
    pub caption: Option<String>,
    pub tags: Vec<String>,
    pub author_id: String,
    pub image_ref: String,
    pub seed: Option<u64>,
    pub use_remote: bool,
}

impl ApiPostRequest {
    pub fn into_input(self) -> Result<PostInput, String> {
        let caption = validate_caption(self.caption)?;
        let author_id = self
            .author_id
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| "anonymous".to_string());

        Ok(PostInput {
            caption,
            tags: normalize_tags(self.tags),
            author_id,
            image_ref: self.image_ref.unwrap_or_default(),
            seed: self.seed,
            use_remote: self.use_remote.unwrap_or(false),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ApiAnalyzeResponse {
    pub score: f64,
    pub factors: ImpactFactors,
    pub suggestions: Vec<String>,
    pub category: Category,
    pub source: String,
    pub warnings: Vec<String>,
}

impl ApiAnalyzeResponse {
    pub fn from_analysis(analysis: ImpactAnalysis, source: &str, warnings: Vec<String>) -> Self {
        Self {
            score: analysis.score,
            factors: analysis.factors,
            suggestions: analysis.suggestions,
            category: analysis.category,
            source: source.to_string(),
            warnings,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiPostResponse {
    pub post: Post,
    pub suggestions: Vec<String>,
    pub source: String,
    pub warnings: Vec<String>,
}

impl ApiPostResponse {
    pub fn from_post(
        post: Post,
        analysis: ImpactAnalysis,
        source: &str,
        warnings: Vec<String>,
    ) -> Self {
        Self {
            post,
            suggestions: analysis.suggestions,
            source: source.to_string(),
            warnings,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiPostsResponse {
    pub posts: Vec<Post>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct ApiMetricsResponse {
    pub generated_at: DateTime<Utc>,
    pub metrics: ImpactMetrics,
}

impl ApiMetricsResponse {
    pub fn from_metrics(metrics: ImpactMetrics, generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            metrics,
        }
    }
}

fn validate_caption(caption: Option<String>) -> Result<Option<String>, String> {
    if let Some(caption) = caption.as_ref() {
        if caption.chars().count() > MAX_CAPTION_CHARS {
            return Err(format!("caption exceeds {} characters", MAX_CAPTION_CHARS));
        }
    }
    Ok(caption)
}

fn normalize_tags(tags: Option<Vec<String>>) -> Vec<String> {
    tags.unwrap_or_default()
        .into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}
