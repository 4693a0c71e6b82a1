//! Helpers for building located AST fixtures in unit tests

use crate::ast::{Position, SourceLocation};

/// Location of the first occurrence of `needle` in `source`
pub fn span(source: &str, needle: &str) -> SourceLocation {
    span_nth(source, needle, 0)
}

/// Location of the `nth` (0-based) occurrence of `needle` in `source`
pub fn span_nth(source: &str, needle: &str, nth: usize) -> SourceLocation {
    let (start, _) = source
        .match_indices(needle)
        .nth(nth)
        .unwrap_or_else(|| panic!("{:?} not found in {:?}", needle, source));
    SourceLocation::new(
        position_at(source, start),
        position_at(source, start + needle.len()),
    )
}

fn position_at(source: &str, offset: usize) -> Position {
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    Position::new(line, before[line_start..].chars().count())
}

#[test]
fn test_span_positions() {
    let source = "{{#a}}\n  <B @c=\"d\" />\n{{/a}}";
    let loc = span(source, "@c=\"d\"");
    assert_eq!(loc.start, Position::new(2, 5));
    assert_eq!(loc.end, Position::new(2, 11));
    assert_eq!(span_nth(source, "a", 1).start, Position::new(3, 3));
}
