use once_cell::sync::Lazy;
use regex::Regex;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>?").expect("valid tag pattern"));
static BLANK_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").expect("valid paragraph pattern"));
static SENTENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.\s+").expect("valid sentence pattern"));

/// Texts at most this long are never split into sentences
const SENTENCE_SPLIT_MIN_CHARS: usize = 100;

/// Sentence fragments at most this long are dropped
const MIN_SENTENCE_CHARS: usize = 4;

/// Strip markup and decode the handful of entities labels use
pub fn sanitize_html(html: &str) -> String {
    TAG.replace_all(html, "")
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}

/// First entry of a label section, or "" when the section is empty
pub fn first_text(section: &[String]) -> &str {
    section.first().map(String::as_str).unwrap_or_default()
}

/// First non-empty section among `sections`, in order
pub fn first_present<'a>(sections: &[&'a [String]]) -> &'a [String] {
    sections
        .iter()
        .copied()
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

fn non_empty_trimmed<'a>(parts: impl Iterator<Item = &'a str>) -> Vec<String> {
    parts
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

/// Break a label section into displayable paragraphs.
///
/// Tries blank-line paragraphs, then single lines, then (for long text)
/// sentences; the first strategy yielding more than one piece wins.
pub fn format_paragraphs(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let paragraphs = non_empty_trimmed(BLANK_LINE.split(text));
    if paragraphs.len() > 1 {
        return paragraphs;
    }

    let lines = non_empty_trimmed(text.split('\n'));
    if lines.len() > 1 {
        return lines;
    }

    if text.chars().count() > SENTENCE_SPLIT_MIN_CHARS && text.contains(". ") {
        return SENTENCE_END
            .split(text)
            .map(|sentence| {
                let sentence = sentence.trim();
                if sentence.ends_with('.') {
                    sentence.to_string()
                } else {
                    format!("{}.", sentence)
                }
            })
            .filter(|sentence| sentence.chars().count() > MIN_SENTENCE_CHARS)
            .collect();
    }

    vec![text.to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_html() {
        assert_eq!(
            sanitize_html("<p>Take&nbsp;1 tablet &amp; rest &lt;daily&gt;</p>"),
            "Take 1 tablet & rest <daily>"
        );
        assert_eq!(sanitize_html("&quot;Tylenol&quot; &#39;PM&#39;"), "\"Tylenol\" 'PM'");
        assert_eq!(sanitize_html("plain text"), "plain text");
    }

    #[test]
    fn test_first_text_and_first_present() {
        let warnings = vec!["one".to_string(), "two".to_string()];
        let empty: Vec<String> = Vec::new();

        assert_eq!(first_text(&warnings), "one");
        assert_eq!(first_text(&empty), "");
        assert_eq!(first_present(&[empty.as_slice(), warnings.as_slice()]), warnings.as_slice());
        assert!(first_present(&[empty.as_slice()]).is_empty());
    }

    #[test]
    fn test_paragraphs_split_on_blank_lines() {
        let text = "First paragraph\nstill first.\n\n  Second paragraph.  \n\n";
        assert_eq!(
            format_paragraphs(text),
            vec!["First paragraph\nstill first.", "Second paragraph."]
        );
    }

    #[test]
    fn test_paragraphs_split_on_lines() {
        assert_eq!(format_paragraphs("line one\n line two \n"), vec!["line one", "line two"]);
    }

    #[test]
    fn test_paragraphs_split_long_text_into_sentences() {
        let text = "Adults and children 12 years and over take one tablet every 4 to 6 hours. \
                    Do not exceed six tablets in 24 hours. Ok. Ask a doctor for children under 12.";
        assert_eq!(
            format_paragraphs(text),
            vec![
                "Adults and children 12 years and over take one tablet every 4 to 6 hours.",
                "Do not exceed six tablets in 24 hours.",
                "Ask a doctor for children under 12.",
            ]
        );
    }

    #[test]
    fn test_short_text_is_kept_whole() {
        assert_eq!(format_paragraphs("Take daily. With food."), vec!["Take daily. With food."]);
        assert!(format_paragraphs("").is_empty());
        assert!(format_paragraphs("  \n ").is_empty());
    }
}
