use crate::Category;

const CATEGORY_KEYWORDS: [(Category, [&str; 2]); 6] = [
    (Category::Food, ["food", "recipe"]),
    (Category::Travel, ["travel", "vacation"]),
    (Category::Fitness, ["fitness", "workout"]),
    (Category::Nature, ["nature", "landscape"]),
    (Category::Art, ["art", "creative"]),
    (Category::Technology, ["tech", "innovation"]),
];

pub fn categorize(caption: Option<&str>, tags: &[String]) -> Category {
    let combined = format!("{} {}", caption.unwrap_or(""), tags.join(" ")).to_lowercase();

    for (category, keywords) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|keyword| combined.contains(keyword)) {
            return category;
        }
    }

    Category::General
}
