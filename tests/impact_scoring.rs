use impact_engine::scoring::{
    categorize, suggestions, ImpactScorer, RandomSource, ScorerWeights, SeededRandom,
};
use impact_engine::Category;

struct MinRandom;

impl RandomSource for MinRandom {
    fn next(&mut self, min: f64, _max: f64) -> f64 {
        min
    }
}

struct NanRandom;

impl RandomSource for NanRandom {
    fn next(&mut self, _min: f64, _max: f64) -> f64 {
        f64::NAN
    }
}

struct InfiniteRandom;

impl RandomSource for InfiniteRandom {
    fn next(&mut self, _min: f64, _max: f64) -> f64 {
        f64::INFINITY
    }
}

fn scorer() -> ImpactScorer {
    ImpactScorer::new(ScorerWeights::default())
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[test]
fn pinned_minimum_randomness_hits_score_cap() {
    let caption = "I want to help my community volunteer for sustainable change";
    let tags = tags(&["#impact", "#change"]);

    let analysis = scorer().analyze(Some(caption), &tags, &mut MinRandom);

    assert!((analysis.score - 95.0).abs() < 1e-6);
    assert!((analysis.factors.content_relevance - 87.0).abs() < 1e-6);
    assert!((analysis.factors.engagement_prediction - 84.0).abs() < 1e-6);
    assert!((analysis.factors.emotional_resonance - 86.0).abs() < 1e-6);
    assert!((analysis.factors.visual_clarity - 90.0).abs() < 1e-6);
    assert_eq!(analysis.category, Category::General);
    assert_eq!(analysis.suggestions.len(), 2);
    assert!(analysis.suggestions[0].contains("Great content"));
}

#[test]
fn missing_caption_scores_baseline() {
    let empty = scorer().analyze(None, &[], &mut MinRandom);
    let blank = scorer().analyze(Some("   "), &[], &mut MinRandom);

    assert!((empty.score - 69.0).abs() < 1e-6);
    assert!((blank.score - 69.0).abs() < 1e-6);
    assert_eq!(empty.category, Category::General);
}

#[test]
fn caption_word_count_tiers() {
    let one = scorer().analyze(Some("one"), &[], &mut MinRandom);
    assert!((one.score - 74.0).abs() < 1e-6);

    let four = scorer().analyze(Some("one two one two"), &[], &mut MinRandom);
    assert!((four.score - 80.0).abs() < 1e-6);

    let five = scorer().analyze(Some("one two one two one"), &[], &mut MinRandom);
    assert!((five.score - 87.0).abs() < 1e-6);

    let thirty = "word ".repeat(30);
    let at_limit = scorer().analyze(Some(&thirty), &[], &mut MinRandom);
    assert!((at_limit.score - 87.0).abs() < 1e-6);

    let thirty_one = "word ".repeat(31);
    let over_limit = scorer().analyze(Some(&thirty_one), &[], &mut MinRandom);
    assert!((over_limit.score - 75.0).abs() < 1e-6);
}

#[test]
fn caption_hashtag_adds_bonus() {
    let analysis = scorer().analyze(Some("hello #world"), &[], &mut MinRandom);
    assert!((analysis.score - 88.0).abs() < 1e-6);
}

#[test]
fn impact_keywords_add_bonus() {
    let with_keyword = scorer().analyze(Some("we help"), &[], &mut MinRandom);
    let without_keyword = scorer().analyze(Some("we act"), &[], &mut MinRandom);

    assert!((with_keyword.score - 89.0).abs() < 1e-6);
    assert!((without_keyword.score - 74.0).abs() < 1e-6);
    assert!((with_keyword.score - without_keyword.score - 15.0).abs() < 1e-6);
}

#[test]
fn tag_bonuses_cap_at_limit() {
    let single = scorer().analyze(None, &tags(&["a"]), &mut MinRandom);
    assert!((single.score - 72.0).abs() < 1e-6);

    let descriptive = scorer().analyze(None, &tags(&["abcd"]), &mut MinRandom);
    assert!((descriptive.score - 74.0).abs() < 1e-6);

    let many = tags(&["a", "b", "c", "d", "e", "f", "g"]);
    let capped = scorer().analyze(None, &many, &mut MinRandom);
    assert!((capped.score - 87.0).abs() < 1e-6);
}

#[test]
fn scores_and_factors_stay_in_bounds() {
    let scorer = scorer();
    let tags = tags(&["#community", "#volunteer"]);

    for seed in 0..32 {
        let mut rng = SeededRandom::new(seed);
        let rich = scorer.analyze(
            Some("Volunteers improve the environment #support"),
            &tags,
            &mut rng,
        );
        let bare = scorer.analyze(None, &[], &mut rng);

        for analysis in [rich, bare] {
            assert!(analysis.score >= 35.0 && analysis.score <= 95.0);
            assert!(analysis.score.fract().abs() < 1e-9);
            for factor in [
                analysis.factors.content_relevance,
                analysis.factors.engagement_prediction,
                analysis.factors.emotional_resonance,
                analysis.factors.visual_clarity,
            ] {
                assert!((0.0..=100.0).contains(&factor));
            }
            assert!(analysis.suggestions.len() >= 2);
        }
    }
}

#[test]
fn misbehaving_random_sources_stay_clamped() {
    let scorer = scorer();
    let tags = tags(&["#volunteer"]);

    let nan = scorer.analyze(Some("we help the community"), &tags, &mut NanRandom);
    assert!((nan.score - 35.0).abs() < 1e-6);
    assert_eq!(nan.suggestions.len(), 3);

    let infinite = scorer.analyze(Some("we help the community"), &tags, &mut InfiniteRandom);
    assert!((infinite.score - 95.0).abs() < 1e-6);
    assert_eq!(infinite.suggestions.len(), 2);

    for analysis in [nan, infinite] {
        assert!(analysis.score >= 35.0 && analysis.score <= 95.0);
        for factor in [
            analysis.factors.content_relevance,
            analysis.factors.engagement_prediction,
            analysis.factors.emotional_resonance,
            analysis.factors.visual_clarity,
        ] {
            assert!((0.0..=100.0).contains(&factor));
        }
    }
}

#[test]
fn degenerate_random_ranges_return_the_lower_bound() {
    let mut rng = SeededRandom::new(1);

    assert!((rng.next(5.0, 5.0) - 5.0).abs() < 1e-9);
    assert!((rng.next(10.0, 2.0) - 10.0).abs() < 1e-9);

    let drawn = rng.next(2.0, 10.0);
    assert!((2.0..10.0).contains(&drawn));
}

#[test]
fn seeded_analysis_is_deterministic() {
    let scorer = scorer();
    let tags = tags(&["#nature"]);

    let mut first_rng = SeededRandom::new(7);
    let mut second_rng = SeededRandom::new(7);
    let first = scorer.analyze(Some("landscape at dawn"), &tags, &mut first_rng);
    let second = scorer.analyze(Some("landscape at dawn"), &tags, &mut second_rng);

    assert_eq!(first, second);
}

#[test]
fn category_keyword_table_order() {
    assert_eq!(categorize(Some("Best recipe ever"), &[]), Category::Food);
    assert_eq!(categorize(None, &tags(&["#travel"])), Category::Travel);
    assert_eq!(categorize(Some("workout log"), &[]), Category::Fitness);
    assert_eq!(categorize(Some("landscape at dusk"), &[]), Category::Nature);
    assert_eq!(categorize(Some("creative process"), &[]), Category::Art);
    assert_eq!(categorize(Some("new tech drop"), &[]), Category::Technology);
    assert_eq!(categorize(Some("hello there"), &[]), Category::General);
    assert_eq!(categorize(None, &[]), Category::General);

    // Earlier table rows win when several keywords appear.
    assert_eq!(categorize(Some("food and travel"), &[]), Category::Food);
    assert_eq!(categorize(Some("RECIPE night"), &[]), Category::Food);
}

#[test]
fn suggestion_tiers_by_score() {
    let low = suggestions::for_score(10.0);
    assert_eq!(low.len(), 3);
    assert!(low[0].contains("descriptive caption"));

    let below_cutoff = suggestions::for_score(39.9);
    assert_eq!(below_cutoff.len(), 3);

    let mid = suggestions::for_score(40.0);
    assert_eq!(mid.len(), 2);
    assert!(mid[0].contains("engaging questions"));

    let upper_mid = suggestions::for_score(69.9);
    assert!(upper_mid[0].contains("engaging questions"));

    let high = suggestions::for_score(70.0);
    assert_eq!(high.len(), 2);
    assert!(high[0].contains("Great content"));
}
