use super::*;

#[test]
fn test_span_basic() {
    let span = Span::new(10, 20);
    assert_eq!(span.len(), 10);
    assert!(!span.is_empty());
    assert!(Span::point(4).is_empty());
}

#[test]
fn test_span_merge() {
    let merged = Span::new(10, 20).merge(Span::new(15, 30));
    assert_eq!(merged, Span::new(10, 30));
}

#[test]
fn test_span_from_range() {
    assert_eq!(Span::from_range(3..9), Span::new(3, 9));
}

#[test]
fn test_line_index_first_line() {
    let index = LineIndex::new("local a = 1\nprint(a)\n");
    assert_eq!(index.line_col(0), (1, 1));
    assert_eq!(index.line_col(6), (1, 7));
}

#[test]
fn test_line_index_later_lines() {
    let index = LineIndex::new("a = 1\nb = 2\n\nc = 3");
    assert_eq!(index.line_col(6), (2, 1));
    assert_eq!(index.line_col(13), (4, 1));
    assert_eq!(index.line_count(), 4);
}
