use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use crate::Post;

pub struct PostStore {
    path: PathBuf,
    posts: RwLock<Vec<Post>>,
}

impl PostStore {
    pub async fn load(path: PathBuf) -> Result<Self, String> {
        let posts = if path.exists() {
            let data = tokio::fs::read_to_string(&path)
                .await
                .map_err(|err| format!("failed to read posts: {}", err))?;
            if data.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&data)
                    .map_err(|err| format!("failed to parse posts: {}", err))?
            }
        } else {
            Vec::new()
        };

        Ok(Self {
            path,
            posts: RwLock::new(posts),
        })
    }

    pub async fn list(&self) -> Vec<Post> {
        let guard = self.posts.read().await;
        guard.clone()
    }

    pub async fn get(&self, id: &str) -> Option<Post> {
        let guard = self.posts.read().await;
        guard.iter().find(|post| post.id == id).cloned()
    }

    pub async fn count(&self) -> usize {
        let guard = self.posts.read().await;
        guard.len()
    }

    pub async fn add(&self, mut post: Post) -> Result<Post, String> {
        let mut guard = self.posts.write().await;
        if guard.iter().any(|existing| existing.id == post.id) {
            return Err(format!("post already exists: {}", post.id));
        }
        post.impact_score = normalize_score(post.impact_score);
        guard.insert(0, post.clone());
        self.persist(&guard).await?;
        Ok(post)
    }

    pub async fn backfill_score(&self, id: &str, score: f64) -> Result<Post, String> {
        let mut guard = self.posts.write().await;
        let post = guard
            .iter_mut()
            .find(|post| post.id == id)
            .ok_or_else(|| format!("post not found: {}", id))?;
        post.impact_score = normalize_score(score);
        let updated = post.clone();
        self.persist(&guard).await?;
        Ok(updated)
    }

    pub async fn total_impact_score(&self) -> f64 {
        let guard = self.posts.read().await;
        guard.iter().map(|post| post.impact_score).sum()
    }

    pub async fn average_impact_score(&self) -> f64 {
        let guard = self.posts.read().await;
        if guard.is_empty() {
            return 0.0;
        }
        let total: f64 = guard.iter().map(|post| post.impact_score).sum();
        total / guard.len() as f64
    }

    pub async fn top_performing(&self, limit: usize) -> Vec<Post> {
        let guard = self.posts.read().await;
        let mut ranked = guard.clone();
        ranked.sort_by(|a, b| {
            b.impact_score
                .partial_cmp(&a.impact_score)
                .unwrap_or(Ordering::Equal)
        });
        ranked.truncate(limit);
        ranked
    }

    async fn persist(&self, posts: &[Post]) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent).await?;
        }
        let payload = serde_json::to_string_pretty(posts)
            .map_err(|err| format!("failed to serialize posts: {}", err))?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, payload)
            .await
            .map_err(|err| format!("failed to write posts: {}", err))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|err| format!("failed to finalize posts: {}", err))?;
        Ok(())
    }
}

fn normalize_score(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 100.0)
}

async fn ensure_dir(path: &Path) -> Result<(), String> {
    if path.exists() {
        return Ok(());
    }
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|err| format!("failed to create store dir: {}", err))
}
