use super::*;

#[test]
fn fraction_lists_and_bare_numbers_parse() {
    assert_eq!(parse_track_list("1fr 2fr").unwrap(), vec![1.0, 2.0]);
    assert_eq!(parse_track_list("  3 0.5fr ").unwrap(), vec![3.0, 0.5]);
    assert_eq!(parse_track_list("auto 1fr").unwrap(), vec![1.0, 1.0]);
}

#[test]
fn repeat_shorthand_expands() {
    assert_eq!(parse_track_list("repeat(3)").unwrap(), vec![1.0; 3]);
    assert_eq!(
        parse_track_list("repeat(2, 1fr 2fr)").unwrap(),
        vec![1.0, 2.0, 1.0, 2.0]
    );
    assert_eq!(
        parse_track_list("2fr repeat(2, 1fr)").unwrap(),
        vec![2.0, 1.0, 1.0]
    );
}

#[test]
fn non_positive_weights_coerce_to_one() {
    assert_eq!(parse_track_list("0fr -2 1fr").unwrap(), vec![1.0, 1.0, 1.0]);
    let t = GridTemplate::from_weights(vec![0.0, f64::NAN, 2.0], vec![-1.0]);
    assert_eq!(t.column_sizes, vec![1.0, 1.0, 2.0]);
    assert_eq!(t.row_sizes, vec![1.0]);
}

#[test]
fn malformed_track_lists_are_errors() {
    assert!(parse_track_list("").is_err());
    assert!(parse_track_list("wide 1fr").is_err());
    assert!(parse_track_list("repeat(0, 1fr)").is_err());
    assert!(parse_track_list("repeat(x)").is_err());
    assert!(parse_track_list("repeat(2, 1fr").is_err());
    assert!(parse_track_list("1fr)").is_err());
}

#[test]
fn area_matrix_scan_finds_spans() {
    let desc = TemplateDescriptor::with_areas("1fr 1fr", "1fr 1fr", &["main main", "left right"]);
    let t = GridTemplate::parse(&desc).unwrap();
    let map = t.area_map.as_ref().unwrap();
    assert_eq!(
        map["main"],
        GridArea {
            row_start: 0,
            row_end: 1,
            col_start: 0,
            col_end: 2
        }
    );
    assert_eq!(
        map["right"],
        GridArea {
            row_start: 1,
            row_end: 2,
            col_start: 1,
            col_end: 2
        }
    );
    assert_eq!(
        t.area_order.as_deref().unwrap(),
        &["main".to_string(), "left".to_string(), "right".to_string()]
    );
    assert_eq!(t.declared_panels(), 3);
}

#[test]
fn area_matrix_skips_dots_and_adds_implicit_tracks() {
    let desc = TemplateDescriptor::with_areas("1fr", "1fr", &["a . b", "a c c"]);
    let t = GridTemplate::parse(&desc).unwrap();
    assert_eq!(t.column_sizes.len(), 3);
    assert_eq!(t.row_sizes.len(), 2);
    assert_eq!(t.area_map.as_ref().unwrap()["a"].row_end, 2);
}

#[test]
fn non_rectangular_areas_are_rejected() {
    let crossed = TemplateDescriptor::with_areas("1fr 1fr", "1fr 1fr", &["a b", "b a"]);
    assert!(GridTemplate::parse(&crossed).is_err());
    let ell = TemplateDescriptor::with_areas("1fr 1fr", "1fr 1fr", &["a a", "a b"]);
    assert!(GridTemplate::parse(&ell).is_err());
}

#[test]
fn duplicate_area_order_is_rejected() {
    let mut desc = TemplateDescriptor::with_areas("1fr 1fr", "1fr", &["a b"]);
    desc.area_order = Some(vec!["a".to_string(), "a".to_string()]);
    assert!(GridTemplate::parse(&desc).is_err());
}

#[test]
fn track_count_is_bounded() {
    assert_eq!(parse_track_list("repeat(1024)").unwrap().len(), MAX_TRACKS);
    assert!(parse_track_list("repeat(1025)").is_err());
    assert!(parse_track_list("repeat(4000000000)").is_err());
    assert!(parse_track_list("1fr repeat(1024)").is_err());
    assert!(parse_track_list("repeat(600, 1fr 1fr)").is_err());
}

#[test]
fn ordered_area_names_default_to_row_major() {
    let mut desc = TemplateDescriptor::with_areas("1fr 1fr", "1fr 1fr", &["z y", "x x"]);
    desc.area_order = None;
    let mut t = GridTemplate::parse(&desc).unwrap();
    t.area_order = None;
    assert_eq!(
        t.ordered_area_names().unwrap(),
        vec!["z".to_string(), "y".to_string(), "x".to_string()]
    );
    assert!(GridTemplate::uniform(2, 2).ordered_area_names().is_none());
}

#[test]
fn ragged_area_rows_are_rejected() {
    let desc = TemplateDescriptor::with_areas("1fr 1fr", "1fr 1fr", &["a b", "c"]);
    assert!(GridTemplate::parse(&desc).is_err());
}

#[test]
fn explicit_area_order_is_kept() {
    let mut desc = TemplateDescriptor::with_areas("1fr 1fr", "1fr", &["a b"]);
    desc.area_order = Some(vec!["b".to_string(), "a".to_string()]);
    let t = GridTemplate::parse(&desc).unwrap();
    assert_eq!(
        t.area_order.unwrap(),
        vec!["b".to_string(), "a".to_string()]
    );
}

#[test]
fn sqrt_heuristic_shapes() {
    let t = GridTemplate::sqrt_heuristic(5);
    assert_eq!(t.column_sizes.len(), 3);
    assert_eq!(t.row_sizes.len(), 2);
    let t = GridTemplate::sqrt_heuristic(4);
    assert_eq!((t.column_sizes.len(), t.row_sizes.len()), (2, 2));
    let t = GridTemplate::sqrt_heuristic(0);
    assert_eq!((t.column_sizes.len(), t.row_sizes.len()), (1, 1));
}
