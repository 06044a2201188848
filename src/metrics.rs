use chrono::{DateTime, Duration, Utc};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::{Category, ImpactMetrics, Post, TrendPoint};

pub fn aggregate(posts: &[Post], now: DateTime<Utc>) -> ImpactMetrics {
    if posts.is_empty() {
        return ImpactMetrics {
            weekly_average: 0.0,
            monthly_average: 0.0,
            category_performance: BTreeMap::new(),
            weekly_trend: weekly_trend(posts, now),
            top_performing_posts: Vec::new(),
            total_posts: 0,
            impact_growth: 0,
        };
    }

    let one_week_ago = now - Duration::days(7);
    let one_month_ago = now - Duration::days(30);

    let weekly_scores: Vec<f64> = posts
        .iter()
        .filter(|post| post.created_at >= one_week_ago)
        .map(|post| post.impact_score)
        .collect();
    let monthly_scores: Vec<f64> = posts
        .iter()
        .filter(|post| post.created_at >= one_month_ago)
        .map(|post| post.impact_score)
        .collect();

    ImpactMetrics {
        weekly_average: round_tenths(mean(&weekly_scores)),
        monthly_average: round_tenths(mean(&monthly_scores)),
        category_performance: category_performance(posts),
        weekly_trend: weekly_trend(posts, now),
        top_performing_posts: top_performing(posts, 3),
        total_posts: posts.len(),
        impact_growth: impact_growth(posts, now),
    }
}

fn category_performance(posts: &[Post]) -> BTreeMap<Category, f64> {
    let mut grouped: BTreeMap<Category, Vec<f64>> = BTreeMap::new();
    for post in posts {
        grouped.entry(post.category).or_default().push(post.impact_score);
    }

    grouped
        .into_iter()
        .map(|(category, scores)| (category, mean(&scores)))
        .collect()
}

fn weekly_trend(posts: &[Post], now: DateTime<Utc>) -> Vec<TrendPoint> {
    let mut trend = Vec::with_capacity(7);

    for offset in (0..=6).rev() {
        let day = (now - Duration::days(offset)).date_naive();
        let day_scores: Vec<f64> = posts
            .iter()
            .filter(|post| post.created_at.date_naive() == day)
            .map(|post| post.impact_score)
            .collect();

        trend.push(TrendPoint {
            date: day,
            score: round_tenths(mean(&day_scores)),
        });
    }

    trend
}

fn top_performing(posts: &[Post], limit: usize) -> Vec<Post> {
    let mut ranked = posts.to_vec();
    ranked.sort_by(|a, b| {
        b.impact_score
            .partial_cmp(&a.impact_score)
            .unwrap_or(Ordering::Equal)
    });
    ranked.truncate(limit);
    ranked
}

fn impact_growth(posts: &[Post], now: DateTime<Utc>) -> i64 {
    let one_week_ago = now - Duration::days(7);
    let two_weeks_ago = now - Duration::days(14);

    let last_week: Vec<f64> = posts
        .iter()
        .filter(|post| post.created_at >= one_week_ago)
        .map(|post| post.impact_score)
        .collect();
    let previous_week: Vec<f64> = posts
        .iter()
        .filter(|post| post.created_at >= two_weeks_ago && post.created_at < one_week_ago)
        .map(|post| post.impact_score)
        .collect();

    let previous_average = mean(&previous_week);
    if previous_week.is_empty() || previous_average == 0.0 {
        return 0;
    }

    (((mean(&last_week) - previous_average) / previous_average) * 100.0).round() as i64
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
