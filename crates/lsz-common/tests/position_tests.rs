use super::*;

#[test]
fn test_location_display_is_one_based() {
    let loc = Location::new(Position::new(0, 4), Position::new(2, 10));
    assert_eq!(loc.to_string(), "(1,5) - (3,11)");
}

#[test]
fn test_with_length_spans_columns() {
    let loc = Location::with_length(Position::new(3, 2), 5);
    assert_eq!(loc.end, Position::new(3, 7));
    assert!(loc.contains(Position::new(3, 2)));
    assert!(loc.contains(Position::new(3, 6)));
    assert!(!loc.contains(Position::new(3, 7)));
}

#[test]
fn test_encloses() {
    let outer = Location::new(Position::new(1, 0), Position::new(5, 0));
    let inner = Location::new(Position::new(2, 3), Position::new(2, 9));
    assert!(outer.encloses(&inner));
    assert!(!inner.encloses(&outer));
    assert!(outer.encloses(&outer));
}

#[test]
fn test_positions_order_by_line_then_column() {
    assert!(Position::new(1, 50) < Position::new(2, 0));
    assert!(Position::new(2, 1) < Position::new(2, 3));
}
