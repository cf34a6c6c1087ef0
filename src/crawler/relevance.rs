//! Keyword relevance classification
//!
//! A page is relevant when any keyword occurs, case-insensitively, anywhere
//! in its raw content. Markup is not stripped, so a keyword inside an
//! attribute value or an href counts as a match.

/// An ordered set of case-insensitive keywords
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    /// Keywords as supplied, used for display
    original: Vec<String>,

    /// Lowercased keywords, used for matching
    folded: Vec<String>,
}

impl KeywordSet {
    /// Builds a keyword set, preserving the given order
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let original: Vec<String> = keywords.into_iter().map(Into::into).collect();
        let folded = original.iter().map(|k| k.to_lowercase()).collect();
        Self { original, folded }
    }

    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }

    pub fn len(&self) -> usize {
        self.original.len()
    }

    /// Iterates over the keywords as supplied
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.original.iter().map(String::as_str)
    }

    /// Keywords joined with ", " for display
    pub fn joined(&self) -> String {
        self.original.join(", ")
    }

    /// Returns the first keyword (as supplied) found in `content`
    pub fn first_match(&self, content: &str) -> Option<&str> {
        let content = content.to_lowercase();
        self.folded
            .iter()
            .position(|keyword| content.contains(keyword.as_str()))
            .map(|index| self.original[index].as_str())
    }
}

/// Returns true iff at least one keyword occurs in `content`, ignoring case
///
/// An empty keyword set never matches. An empty-string keyword matches any
/// content, including the empty string.
///
/// # Examples
///
/// ```
/// use focused_crawler::{is_relevant, KeywordSet};
///
/// let keywords = KeywordSet::new(["education", "course"]);
/// assert!(is_relevant("<h1>Online COURSES</h1>", &keywords));
/// assert!(!is_relevant("<h1>Sports</h1>", &keywords));
/// ```
pub fn is_relevant(content: &str, keywords: &KeywordSet) -> bool {
    keywords.first_match(content).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_case_insensitive() {
        let keywords = KeywordSet::new(["Course"]);
        assert!(is_relevant("our COURSE catalogue", &keywords));
        assert!(is_relevant("our course catalogue", &keywords));
    }

    #[test]
    fn test_any_keyword_matches() {
        let keywords = KeywordSet::new(["education", "learning", "course"]);
        assert!(is_relevant("lifelong learning", &keywords));
    }

    #[test]
    fn test_no_match() {
        let keywords = KeywordSet::new(["education", "learning"]);
        assert!(!is_relevant("<p>football scores</p>", &keywords));
    }

    #[test]
    fn test_empty_keyword_set_never_matches() {
        let keywords = KeywordSet::default();
        assert!(!is_relevant("anything at all", &keywords));
        assert!(!is_relevant("", &keywords));
    }

    #[test]
    fn test_empty_content_does_not_match() {
        let keywords = KeywordSet::new(["course"]);
        assert!(!is_relevant("", &keywords));
    }

    #[test]
    fn test_empty_string_keyword_matches_everything() {
        let keywords = KeywordSet::new([""]);
        assert!(is_relevant("", &keywords));
        assert!(is_relevant("whatever", &keywords));
    }

    #[test]
    fn test_matches_inside_markup() {
        let keywords = KeywordSet::new(["course"]);
        assert!(is_relevant(
            r#"<a href="/course-list">Catalogue</a>"#,
            &keywords
        ));
    }

    #[test]
    fn test_deterministic() {
        let keywords = KeywordSet::new(["learning"]);
        let content = "Machine Learning 101";
        let first = is_relevant(content, &keywords);
        for _ in 0..10 {
            assert_eq!(is_relevant(content, &keywords), first);
        }
    }

    #[test]
    fn test_first_match_reports_original_spelling() {
        let keywords = KeywordSet::new(["Education", "Course"]);
        assert_eq!(keywords.first_match("a course"), Some("Course"));
        assert_eq!(keywords.first_match("nothing"), None);
    }

    #[test]
    fn test_joined() {
        let keywords = KeywordSet::new(["education", "learning", "course"]);
        assert_eq!(keywords.joined(), "education, learning, course");
        assert_eq!(keywords.len(), 3);
    }
}
