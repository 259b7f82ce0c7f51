use eol_guard::{
    LineEnding, LineEndingStats, NormalizeOptions, NormalizeOutcome, Normalizer,
    normalize_line_endings,
};
use pretty_assertions::assert_eq;

fn trim() -> NormalizeOptions {
    NormalizeOptions {
        trim_trailing_whitespace: true,
    }
}

#[test]
fn test_uniform_text_is_a_no_op() {
    for text in ["a\nb\nc\n", "a\r\nb\r\n", "a\rb\rc", "\n\n\n"] {
        let outcome = normalize_line_endings(text, NormalizeOptions::default());
        assert!(!outcome.is_changed(), "{text:?} should be unchanged");
    }
}

#[test]
fn test_crlf_first_wins() {
    let outcome = normalize_line_endings("a\r\nb\nc", NormalizeOptions::default());
    assert_eq!(
        outcome,
        NormalizeOutcome::Changed {
            text: "a\r\nb\r\nc".to_string(),
            line_ending: LineEnding::Crlf,
        }
    );
}

#[test]
fn test_lf_first_wins() {
    let outcome = normalize_line_endings("x\ny\r\nz", NormalizeOptions::default());
    assert_eq!(outcome.into_text().as_deref(), Some("x\ny\nz"));
}

#[test]
fn test_lone_cr_text() {
    assert_eq!(
        normalize_line_endings("a\rb\rc", NormalizeOptions::default()),
        NormalizeOutcome::Unchanged {
            line_ending: LineEnding::Cr
        }
    );
}

#[test]
fn test_text_without_line_ending() {
    assert_eq!(
        normalize_line_endings("abc", NormalizeOptions::default()),
        NormalizeOutcome::NoLineEnding
    );
    assert_eq!(
        normalize_line_endings("", trim()),
        NormalizeOutcome::NoLineEnding
    );
}

#[test]
fn test_trim_option() {
    let outcome = normalize_line_endings("a \t\nb\n", trim());
    assert_eq!(outcome.into_text().as_deref(), Some("a\nb\n"));

    let outcome = normalize_line_endings("a \t\nb\n", NormalizeOptions::default());
    assert!(!outcome.is_changed());
}

#[test]
fn test_normalized_text_has_a_single_style() {
    let text = "one\r\ntwo\nthree\rfour\r\n\rfive\n";
    let normalized = Normalizer::default().normalize(text).into_text().unwrap();
    let stats = LineEndingStats::scan(&normalized);
    assert!(!stats.is_mixed());
    assert_eq!(stats.crlf, LineEndingStats::scan(text).total());
}

#[test]
fn test_line_count_is_preserved() {
    let text = "a\r\n\n\r\rb\nc\r";
    let normalized = Normalizer::default().normalize(text).into_text().unwrap();
    assert_eq!(normalized, "a\r\n\r\n\r\n\r\nb\r\nc\r\n");
    assert_eq!(
        LineEndingStats::scan(&normalized).total(),
        LineEndingStats::scan(text).total()
    );
}
