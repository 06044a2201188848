use chrono::{DateTime, Duration, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::scoring::{ImpactScorer, ScorerWeights, SeededRandom};
use crate::Post;

const SAMPLE_CONTENT: [(&str, &[&str]); 10] = [
    (
        "Community cleanup along the river, volunteers welcome",
        &["#community", "#volunteer"],
    ),
    (
        "Sharing my favorite recipe for slow roasted vegetables",
        &["#food", "#homemade"],
    ),
    (
        "Vacation notes from the coast, travel light and stay curious",
        &["#travel"],
    ),
    (
        "Morning workout done, small steps every day",
        &["#fitness", "#workout"],
    ),
    (
        "Landscape shots from the ridge at sunrise",
        &["#nature", "#hiking"],
    ),
    ("New creative piece for the gallery wall", &["#art"]),
    (
        "Prototyping a little innovation for the local repair cafe",
        &["#tech"],
    ),
    (
        "How we can support and improve our neighborhood garden",
        &["#garden", "#community"],
    ),
    ("Quick update", &[]),
    (
        "Donate what you can, every bit helps the shelter",
        &["#donate", "#support"],
    ),
];

pub fn generate_sample_posts(seed: u64, count: usize, now: DateTime<Utc>) -> Vec<Post> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut scoring_rng = SeededRandom::new(seed);
    let scorer = ImpactScorer::new(ScorerWeights::default());

    let mut posts = Vec::with_capacity(count);
    for idx in 0..count {
        let (caption, tags) = SAMPLE_CONTENT[idx % SAMPLE_CONTENT.len()];
        let tags: Vec<String> = tags.iter().map(|tag| tag.to_string()).collect();
        let analysis = scorer.analyze(Some(caption), &tags, &mut scoring_rng);

        let created_at = now
            - Duration::hours(idx as i64 * 30)
            - Duration::minutes(rng.gen_range(0..60));

        posts.push(Post {
            id: format!("sample_{}", idx),
            author_id: format!("author_{}", rng.gen_range(0..20)),
            image_ref: format!("samples/{}.jpg", idx),
            caption: Some(caption.to_string()),
            tags,
            category: analysis.category,
            impact_score: analysis.score,
            created_at,
            likes: rng.gen_range(0..250),
            comments: rng.gen_range(0..40),
            shares: rng.gen_range(0..25),
        });
    }

    posts
}
