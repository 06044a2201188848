use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::config::EngineConfig;
use crate::{Category, ImpactAnalysis, ImpactFactors};

#[derive(Clone)]
pub struct RemoteAnalysisClient {
    endpoint: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisRequest {
    pub caption: Option<String>,
    pub tags: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteAnalysis {
    pub score: Option<f64>,
    pub factors: Option<RemoteFactors>,
    pub suggestions: Option<Vec<String>>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteFactors {
    pub content_relevance: Option<f64>,
    pub engagement_prediction: Option<f64>,
    pub emotional_resonance: Option<f64>,
    pub visual_clarity: Option<f64>,
}

impl RemoteAnalysisClient {
    // An empty endpoint means no remote analysis is configured.
    pub fn from_config(config: &EngineConfig) -> Result<Option<Self>, String> {
        if config.remote.endpoint.trim().is_empty() {
            return Ok(None);
        }
        let api_key = env::var("IMPACT_API_KEY")
            .ok()
            .filter(|value| !value.trim().is_empty());
        let timeout = Duration::from_millis(config.remote.timeout_ms);
        RemoteAnalysisClient::new(config.remote.endpoint.clone(), api_key, timeout).map(Some)
    }

    pub fn new(
        endpoint: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| format!("failed to build impact api client: {}", err))?;
        Ok(Self {
            endpoint,
            api_key,
            client,
        })
    }

    pub async fn analyze(
        &self,
        caption: Option<&str>,
        tags: &[String],
        timestamp: DateTime<Utc>,
    ) -> Result<ImpactAnalysis, String> {
        let url = format!("{}/analyze", self.endpoint.trim_end_matches('/'));
        let request = AnalysisRequest {
            caption: caption.map(str::to_string),
            tags: tags.to_vec(),
            timestamp,
        };

        let mut builder = self.client.post(url).json(&request);
        if let Some(key) = self.api_key.as_ref() {
            builder = builder.bearer_auth(key);
        }
        let response = builder
            .send()
            .await
            .map_err(|err| format!("impact api request failed: {}", err))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(format!("impact api error {}: {}", status, body));
        }

        let remote = response
            .json::<RemoteAnalysis>()
            .await
            .map_err(|err| format!("impact api response parse failed: {}", err))?;
        Ok(remote.into_analysis())
    }
}

impl RemoteAnalysis {
    pub fn into_analysis(self) -> ImpactAnalysis {
        let factors = self.factors.unwrap_or_default();
        ImpactAnalysis {
            score: normalize_score(self.score),
            factors: ImpactFactors {
                content_relevance: normalize_score(factors.content_relevance),
                engagement_prediction: normalize_score(factors.engagement_prediction),
                emotional_resonance: normalize_score(factors.emotional_resonance),
                visual_clarity: normalize_score(factors.visual_clarity),
            },
            suggestions: self.suggestions.unwrap_or_default(),
            category: self
                .category
                .as_deref()
                .and_then(Category::from_str)
                .unwrap_or(Category::General),
        }
    }
}

fn normalize_score(value: Option<f64>) -> f64 {
    let value = value.unwrap_or(0.0);
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}
