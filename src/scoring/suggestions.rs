const LOW_SCORE_CUTOFF: f64 = 40.0;
const HIGH_SCORE_CUTOFF: f64 = 70.0;

pub fn for_score(score: f64) -> Vec<String> {
    let mut suggestions = Vec::new();

    if score < LOW_SCORE_CUTOFF {
        suggestions.push("Consider adding a more descriptive caption".to_string());
        suggestions.push("Try using relevant hashtags to increase discoverability".to_string());
        suggestions.push("Ensure good lighting and image quality".to_string());
    } else if score < HIGH_SCORE_CUTOFF {
        suggestions.push("Add engaging questions to encourage comments".to_string());
        suggestions.push("Share at optimal times when your audience is active".to_string());
    } else {
        suggestions.push("Great content! Consider cross-posting to other platforms".to_string());
        suggestions.push("Engage with comments to boost interaction".to_string());
    }

    suggestions
}
