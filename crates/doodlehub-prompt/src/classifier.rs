//! Ordered-rule classification of tracing prompts.

use std::sync::LazyLock;

use regex::Regex;

use crate::spec::{TraceStyle, TracingSpec};

/// "letter b" / "alphabet B" with the letter captured.
static LETTER_PHRASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:letter|alphabet)\s+([a-zA-Z])").expect("valid pattern"));

/// "number 7" with the digits captured.
static NUMBER_PHRASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)number\s+(\d+)").expect("valid pattern"));

/// "spelling of cat" / "word of cat" with the word captured.
static WORD_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:spelling|word)\s+of\s+([a-zA-Z]+)").expect("valid pattern")
});

/// Any standalone single letter token.
static BARE_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([a-zA-Z])\b").expect("valid pattern"));

/// Any standalone integer token.
static BARE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d+)\b").expect("valid pattern"));

/// Map a free-text prompt to a tracing specification.
///
/// Ordered pattern attempts, first match wins. No scoring and no
/// backtracking. The order matters: "trace the letter B in lowercase"
/// must resolve via the letter-phrase rule, whose style detection reads
/// the surrounding text, and not fall through to the bare-letter rule.
///
/// Total function: unclassifiable input degrades to an uppercase "A".
pub fn classify(prompt: &str) -> TracingSpec {
    let lowered = prompt.to_lowercase();

    // 1. "letter X" / "alphabet X", with style cues from the whole prompt.
    if let Some(caps) = LETTER_PHRASE.captures(prompt) {
        let content = caps[1].to_string();
        let style = if lowered.contains("cursive") {
            TraceStyle::Cursive
        } else if lowered.contains("lowercase") || caps[1].chars().all(|c| c.is_lowercase()) {
            TraceStyle::Lowercase
        } else {
            TraceStyle::Uppercase
        };
        return TracingSpec::letter(content, style);
    }

    // 2. "number N".
    if let Some(caps) = NUMBER_PHRASE.captures(prompt) {
        return TracingSpec::number(caps[1].to_string());
    }

    // 3. "spelling of W" / "word of W".
    if let Some(caps) = WORD_PHRASE.captures(prompt) {
        return TracingSpec::word(caps[1].to_string());
    }

    // 4. Any standalone letter token.
    if let Some(caps) = BARE_LETTER.captures(prompt) {
        let content = caps[1].to_string();
        let style = if caps[1].chars().all(|c| c.is_lowercase()) {
            TraceStyle::Lowercase
        } else {
            TraceStyle::Uppercase
        };
        return TracingSpec::letter(content, style);
    }

    // 5. Any standalone integer token.
    if let Some(caps) = BARE_NUMBER.captures(prompt) {
        return TracingSpec::number(caps[1].to_string());
    }

    // 6. A one-character alphabetic first token.
    if let Some(first) = prompt.split_whitespace().next() {
        let mut chars = first.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_ascii_alphabetic() {
                return TracingSpec::letter(
                    c.to_ascii_uppercase().to_string(),
                    TraceStyle::Uppercase,
                );
            }
        }
    }

    // 7. Fallback.
    TracingSpec::letter("A", TraceStyle::Uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::TraceKind;

    #[test]
    fn test_letter_with_explicit_lowercase() {
        let spec = classify("trace the letter b in lowercase");
        assert_eq!(spec.kind, TraceKind::Letter);
        assert_eq!(spec.content, "b");
        assert_eq!(spec.style, TraceStyle::Lowercase);
    }

    #[test]
    fn test_letter_uppercase_by_default() {
        let spec = classify("the letter B");
        assert_eq!(spec.kind, TraceKind::Letter);
        assert_eq!(spec.content, "B");
        assert_eq!(spec.style, TraceStyle::Uppercase);
    }

    #[test]
    fn test_lowercase_inferred_from_captured_char() {
        let spec = classify("alphabet m");
        assert_eq!(spec.style, TraceStyle::Lowercase);
        assert_eq!(spec.content, "m");
    }

    #[test]
    fn test_cursive_wins_over_lowercase_cue() {
        let spec = classify("the letter b in cursive");
        assert_eq!(spec.kind, TraceKind::Letter);
        assert_eq!(spec.content, "b");
        assert_eq!(spec.style, TraceStyle::Cursive);
    }

    #[test]
    fn test_number_phrase() {
        let spec = classify("number 7");
        assert_eq!(spec.kind, TraceKind::Number);
        assert_eq!(spec.content, "7");
        assert_eq!(spec.style, TraceStyle::Uppercase);
    }

    #[test]
    fn test_spelling_of_word() {
        let spec = classify("spelling of cat");
        assert_eq!(spec.kind, TraceKind::Word);
        assert_eq!(spec.content, "cat");
        assert_eq!(spec.style, TraceStyle::Uppercase);
    }

    #[test]
    fn test_word_of_variant() {
        let spec = classify("word of dog");
        assert_eq!(spec.kind, TraceKind::Word);
        assert_eq!(spec.content, "dog");
    }

    #[test]
    fn test_letter_phrase_shadows_bare_letter() {
        // "a" appears as a bare token before "letter Q"; the phrase rule
        // must still win because it runs first.
        let spec = classify("make a letter Q sheet");
        assert_eq!(spec.content, "Q");
    }

    #[test]
    fn test_bare_letter_token() {
        let spec = classify("just k thanks");
        assert_eq!(spec.kind, TraceKind::Letter);
        assert_eq!(spec.content, "k");
        assert_eq!(spec.style, TraceStyle::Lowercase);
    }

    #[test]
    fn test_bare_number_token() {
        let spec = classify("maybe 42?");
        assert_eq!(spec.kind, TraceKind::Number);
        assert_eq!(spec.content, "42");
    }

    #[test]
    fn test_unclassifiable_falls_back_to_default() {
        let spec = classify("xyz123");
        assert_eq!(spec.kind, TraceKind::Letter);
        assert_eq!(spec.content, "A");
        assert_eq!(spec.style, TraceStyle::Uppercase);
    }

    #[test]
    fn test_empty_prompt_falls_back_to_default() {
        let spec = classify("");
        assert_eq!(spec.content, "A");
        assert_eq!(spec.style, TraceStyle::Uppercase);
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(classify("number 3"), classify("number 3"));
    }
}
