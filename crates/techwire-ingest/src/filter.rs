//! Topic filter keeping ingestion focused on computer/tech stories.

/// Keyword vocabulary matched as lowercase substrings against
/// title + description. The domain allow-list in [`crate::fetch`] is the
/// first guard; this is the stronger second one.
pub(crate) const KEYWORDS: &[&str] = &[
    "ai",
    "machine learning",
    "neural",
    "gpu",
    "cpu",
    "chip",
    "semiconductor",
    "programming",
    "developer",
    "devops",
    "framework",
    "python",
    "javascript",
    "cybersecurity",
    "malware",
    "exploit",
    "vulnerability",
    "zero-day",
    "cloud",
    "kubernetes",
    "docker",
    "linux",
    "windows",
    "mac",
    "game dev",
    "game engine",
    "unreal",
    "unity",
    "robotics",
    "automation",
    "nlp",
    "computer vision",
    "data center",
    "datacenter",
];

/// Returns `true` if the story is computer/tech relevant.
///
/// Pure predicate: lowercases `title` and `description`, concatenates them,
/// and accepts when any vocabulary term appears as a substring.
#[must_use]
pub fn matches_topic(title: &str, description: &str) -> bool {
    let text = format!("{} {}", title.to_lowercase(), description.to_lowercase());
    KEYWORDS.iter().any(|k| text.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_keyword_in_title() {
        assert!(matches_topic("New GPU benchmarks leak", ""));
    }

    #[test]
    fn accepts_keyword_in_description() {
        assert!(matches_topic(
            "Industry news roundup",
            "A kubernetes operator for everything"
        ));
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert!(matches_topic("KUBERNETES Goes Mainstream", ""));
        assert!(matches_topic("", "Lessons from a Zero-Day"));
    }

    #[test]
    fn rejects_unrelated_story() {
        assert!(!matches_topic(
            "Local bakery wins award",
            "The sourdough was exceptional this year"
        ));
    }

    #[test]
    fn rejects_empty_inputs() {
        assert!(!matches_topic("", ""));
    }

    #[test]
    fn multiword_terms_match_as_substrings() {
        assert!(matches_topic("", "advances in machine learning research"));
        assert!(matches_topic("inside a hyperscale data center", ""));
    }
}
