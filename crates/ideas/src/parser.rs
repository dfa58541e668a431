//! Response parser.
//!
//! Turns a raw completion into exactly `expected_count` strings. Models do
//! not reliably return the JSON they were asked for, so several strategies
//! are tried in order and the first one yielding exactly the expected
//! number of items wins:
//!
//! 1. the text as a JSON object, reading the first candidate key holding an
//!    array of the right length
//! 2. the same after replacing control characters with spaces (and dropping
//!    markdown code fences)
//! 3. lines starting with a bullet marker (`-`, `•`, `*`)
//! 4. fragments between `<digits>. ` markers
//! 5. numbered placeholders `Default idea {i}`
//!
//! The last strategy always succeeds, so [`parse`] never fails.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Markers recognised at the start of a bullet line.
const BULLET_MARKERS: [char; 3] = ['-', '•', '*'];

static NUMBERED_MARKER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\d+\.\s+").ok());

/// Which strategy produced the parsed items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseTier {
    Structured,
    Sanitized,
    Bullets,
    Numbered,
    Placeholder,
}

/// Parser output together with the strategy that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedItems {
    pub items: Vec<String>,
    pub tier: ParseTier,
}

/// Extract exactly `expected_count` items from raw model output.
///
/// # Example
/// ```
/// use vertical_ideas::parser::parse;
///
/// let items = parse(r#"{"captions": ["A", "B", "C"]}"#, &["captions"], 3);
/// assert_eq!(items, vec!["A", "B", "C"]);
/// ```
pub fn parse<K: AsRef<str>>(raw: &str, candidate_keys: &[K], expected_count: usize) -> Vec<String> {
    parse_items(raw, candidate_keys, expected_count).items
}

/// Like [`parse`], also reporting which tier matched.
pub fn parse_items<K: AsRef<str>>(
    raw: &str,
    candidate_keys: &[K],
    expected_count: usize,
) -> ParsedItems {
    if let Some(items) = from_structured(raw, candidate_keys, expected_count) {
        return ParsedItems {
            items,
            tier: ParseTier::Structured,
        };
    }

    let cleaned = strip_control_chars(raw);
    if let Some(items) = from_structured(&cleaned, candidate_keys, expected_count)
        .or_else(|| from_structured(strip_code_fences(&cleaned), candidate_keys, expected_count))
    {
        tracing::debug!("Parsed completion after sanitizing");
        return ParsedItems {
            items,
            tier: ParseTier::Sanitized,
        };
    }

    if let Some(items) = from_bullets(raw, expected_count) {
        tracing::debug!("Parsed completion as a bullet list");
        return ParsedItems {
            items,
            tier: ParseTier::Bullets,
        };
    }

    if let Some(items) = from_numbered(raw, expected_count) {
        tracing::debug!("Parsed completion as a numbered list");
        return ParsedItems {
            items,
            tier: ParseTier::Numbered,
        };
    }

    tracing::warn!(
        "Could not extract {} items from completion, using placeholders",
        expected_count
    );
    ParsedItems {
        items: placeholders(expected_count),
        tier: ParseTier::Placeholder,
    }
}

/// `Default idea 1` .. `Default idea {count}`.
pub fn placeholders(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("Default idea {}", i)).collect()
}

/// Clean up a single-item completion.
///
/// The text is trimmed. When the model wrapped it in a JSON object anyway,
/// the first of `keys` holding a string (or a non-empty array) is used;
/// a bare JSON string is unquoted. Returns `None` for empty output.
pub fn parse_single<K: AsRef<str>>(raw: &str, keys: &[K]) -> Option<String> {
    let trimmed = raw.trim();

    let text = match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(object)) => keys
            .iter()
            .find_map(|key| match object.get(key.as_ref()) {
                Some(Value::String(s)) => Some(s.clone()),
                Some(Value::Array(items)) => items.first().map(value_text),
                _ => None,
            })
            .unwrap_or_else(|| trimmed.to_string()),
        Ok(Value::String(s)) => s,
        _ => trimmed.to_string(),
    };

    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn from_structured<K: AsRef<str>>(text: &str, keys: &[K], expected: usize) -> Option<Vec<String>> {
    let value: Value = serde_json::from_str(text).ok()?;
    let object = value.as_object()?;

    keys.iter().find_map(|key| match object.get(key.as_ref()) {
        Some(Value::Array(items)) if items.len() == expected => {
            Some(items.iter().map(value_text).collect())
        }
        _ => None,
    })
}

/// Strings are taken verbatim; any other JSON value keeps its JSON text.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Replace U+0000..=U+001F and U+007F with spaces, then trim.
fn strip_control_chars(raw: &str) -> String {
    raw.chars()
        .map(|c| if c <= '\u{1f}' || c == '\u{7f}' { ' ' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Strips ```json ... ``` or ``` ... ``` fences around a completion.
fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));

    match inner {
        Some(stripped) => {
            let stripped = stripped.trim_start();
            stripped
                .strip_suffix("```")
                .map(str::trim)
                .unwrap_or(stripped)
        }
        None => text,
    }
}

fn from_bullets(raw: &str, expected: usize) -> Option<Vec<String>> {
    let items: Vec<String> = raw
        .lines()
        .filter_map(|line| {
            let rest = line
                .trim_start()
                .strip_prefix(|c: char| BULLET_MARKERS.contains(&c))?
                .trim();
            (!rest.is_empty()).then(|| rest.to_string())
        })
        .collect();

    (items.len() == expected).then_some(items)
}

fn from_numbered(raw: &str, expected: usize) -> Option<Vec<String>> {
    let marker = NUMBERED_MARKER.as_ref()?;
    let items: Vec<String> = marker
        .split(raw)
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .map(str::to_string)
        .collect();

    (items.len() == expected).then_some(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAPTION_KEYS: [&str; 2] = ["captions", "caption_ideas"];
    const CONTENT_KEYS: [&str; 3] = ["content_ideas", "contents", "content"];

    fn defaults() -> Vec<String> {
        vec![
            "Default idea 1".to_string(),
            "Default idea 2".to_string(),
            "Default idea 3".to_string(),
        ]
    }

    #[test]
    fn test_structured_object() {
        let parsed = parse_items(r#"{"captions": ["A", "B", "C"]}"#, &["captions"], 3);
        assert_eq!(parsed.items, vec!["A", "B", "C"]);
        assert_eq!(parsed.tier, ParseTier::Structured);
    }

    #[test]
    fn test_candidate_key_order() {
        let raw = r#"{"contents": ["x", "y", "z"], "content_ideas": ["a", "b", "c"]}"#;
        assert_eq!(parse(raw, &CONTENT_KEYS, 3), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_falls_through_to_later_key_when_length_wrong() {
        let raw = r#"{"captions": ["only", "two"], "caption_ideas": ["a", "b", "c"]}"#;
        assert_eq!(parse(raw, &CAPTION_KEYS, 3), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_non_string_elements_keep_json_text() {
        let raw = r#"{"captions": ["A", 2, {"t": "C"}]}"#;
        assert_eq!(parse(raw, &CAPTION_KEYS, 3), vec!["A", "2", r#"{"t":"C"}"#]);
    }

    #[test]
    fn test_raw_newline_inside_string_is_sanitized() {
        let raw = "{\"captions\": [\"Line\none\", \"two\", \"three\"]}";
        let parsed = parse_items(raw, &CAPTION_KEYS, 3);
        assert_eq!(parsed.items, vec!["Line one", "two", "three"]);
        assert_eq!(parsed.tier, ParseTier::Sanitized);
    }

    #[test]
    fn test_code_fenced_json() {
        let raw = "```json\n{\"content_ideas\": [\"a\", \"b\", \"c\"]}\n```";
        let parsed = parse_items(raw, &CONTENT_KEYS, 3);
        assert_eq!(parsed.items, vec!["a", "b", "c"]);
        assert_eq!(parsed.tier, ParseTier::Sanitized);
    }

    #[test]
    fn test_bullet_list() {
        let parsed = parse_items("- one\n- two\n- three", &["captions"], 3);
        assert_eq!(parsed.items, vec!["one", "two", "three"]);
        assert_eq!(parsed.tier, ParseTier::Bullets);
    }

    #[test]
    fn test_mixed_bullet_markers_with_preamble() {
        let raw = "Here you go:\n  • Gym selfie Sunday\n* Protein pancake reel \n- Rest day meme";
        assert_eq!(
            parse(raw, &CAPTION_KEYS, 3),
            vec!["Gym selfie Sunday", "Protein pancake reel", "Rest day meme"]
        );
    }

    #[test]
    fn test_numbered_list() {
        let parsed = parse_items("1. First idea\n2. Second idea\n3. Third idea", &CAPTION_KEYS, 3);
        assert_eq!(parsed.items, vec!["First idea", "Second idea", "Third idea"]);
        assert_eq!(parsed.tier, ParseTier::Numbered);
    }

    #[test]
    fn test_wrong_bullet_count_falls_to_numbered() {
        let raw = "1. Alpha - with a dash\n2. Beta\n3. Gamma";
        assert_eq!(
            parse(raw, &CAPTION_KEYS, 3),
            vec!["Alpha - with a dash", "Beta", "Gamma"]
        );
    }

    #[test]
    fn test_prose_yields_placeholders() {
        let parsed = parse_items("I cannot help with that.", &CAPTION_KEYS, 3);
        assert_eq!(parsed.items, defaults());
        assert_eq!(parsed.tier, ParseTier::Placeholder);
    }

    #[test]
    fn test_wrong_structured_length_yields_placeholders() {
        let raw = r#"{"captions": ["A", "B"]}"#;
        assert_eq!(parse(raw, &CAPTION_KEYS, 3), defaults());
    }

    #[test]
    fn test_total_on_degenerate_inputs() {
        for raw in ["", "   ", "\u{0}\u{7f}", "{", "[1, 2, 3]", "null", "1.", "-\n-\n-"] {
            assert_eq!(parse(raw, &CAPTION_KEYS, 3).len(), 3, "input {:?}", raw);
        }
    }

    #[test]
    fn test_top_level_array_is_not_structured() {
        assert_eq!(parse(r#"["a", "b", "c"]"#, &CAPTION_KEYS, 3), defaults());
    }

    #[test]
    fn test_repeated_parse_is_stable() {
        let raw = r#"{"captions": ["A", "B", "C"]}"#;
        let first = parse(raw, &CAPTION_KEYS, 3);
        for _ in 0..5 {
            assert_eq!(parse(raw, &CAPTION_KEYS, 3), first);
        }
    }

    #[test]
    fn test_other_expected_counts() {
        assert_eq!(parse("- a\n- b", &CAPTION_KEYS, 2), vec!["a", "b"]);
        assert_eq!(placeholders(1), vec!["Default idea 1"]);
    }

    #[test]
    fn test_parse_single_plain_text() {
        assert_eq!(
            parse_single("  Fuel your fitness journey  \n", &["caption"]),
            Some("Fuel your fitness journey".to_string())
        );
        assert_eq!(parse_single("   ", &["caption"]), None);
    }

    #[test]
    fn test_parse_single_json_wrappers() {
        let keys = ["content_idea", "content"];
        assert_eq!(
            parse_single(r#"{"content_idea": "Behind the scenes tour"}"#, &keys),
            Some("Behind the scenes tour".to_string())
        );
        assert_eq!(
            parse_single(r#"{"content": ["First", "Second"]}"#, &keys),
            Some("First".to_string())
        );
        assert_eq!(
            parse_single(r#""Quoted caption""#, &keys),
            Some("Quoted caption".to_string())
        );
        assert_eq!(
            parse_single(r#"{"other": "x"}"#, &keys),
            Some(r#"{"other": "x"}"#.to_string())
        );
    }

    #[test]
    fn test_strip_code_fences_variants() {
        assert_eq!(strip_code_fences("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("```json {} ```"), "{}");
        assert_eq!(strip_code_fences("{}"), "{}");
    }
}
