use super::*;
use crate::text::measure::ApproxMeasure;

fn chars(text: &str, font: &FontQuery<'_>) -> f64 {
    // One pixel per character per pixel of size keeps the arithmetic obvious.
    text.chars().count() as f64 * font.size_px
}

#[test]
fn wrap_packs_words_greedily() {
    let mut m = chars;
    let font = FontQuery::new("x", 1.0);
    let lines = wrap_text("aa bb cc dd", 5.0, &font, &mut m);
    assert_eq!(lines, vec!["aa bb", "cc dd"]);
}

#[test]
fn wrap_keeps_forced_and_empty_lines() {
    let mut m = chars;
    let font = FontQuery::new("x", 1.0);
    let lines = wrap_text("top\n\nbottom text", 100.0, &font, &mut m);
    assert_eq!(lines, vec!["top", "", "bottom text"]);
}

#[test]
fn overlong_word_gets_its_own_line() {
    let mut m = chars;
    let font = FontQuery::new("x", 1.0);
    let lines = wrap_text("a enormousword b", 4.0, &font, &mut m);
    assert_eq!(lines, vec!["a", "enormousword", "b"]);
}

#[test]
fn auto_fit_stays_within_bounds_for_200px_panel() {
    let mut m = ApproxMeasure::default();
    let font = FontQuery::new("Impact", 0.0);
    let fitted = fit_font_size("WHEN THE CODE COMPILES", 300.0, 200.0, 10.0, &font, &mut m);
    assert!(fitted.size_px >= MIN_AUTO_SIZE && fitted.size_px <= MAX_AUTO_SIZE);
    // Start is 0.12 * 200 = 24.
    assert!(fitted.size_px <= 24.0);
    assert!(fitted.block_height() <= 200.0 * MAX_BLOCK_FRACTION);
}

#[test]
fn auto_fit_caps_start_on_tall_panels() {
    let mut m = ApproxMeasure::default();
    let font = FontQuery::new("Impact", 0.0);
    let fitted = fit_font_size("hi", 2000.0, 2000.0, 10.0, &font, &mut m);
    assert_eq!(fitted.size_px, MAX_AUTO_SIZE);
    assert_eq!(fitted.lines, vec!["hi"]);
}

#[test]
fn auto_fit_falls_back_to_floor_size() {
    let mut m = chars;
    let font = FontQuery::new("x", 0.0);
    let text = "a b c d e f g h i j k l m n o p";
    let fitted = fit_font_size(text, 30.0, 60.0, 0.0, &font, &mut m);
    assert_eq!(fitted.size_px, MIN_AUTO_SIZE);
    assert!(fitted.block_height() > 60.0 * MAX_BLOCK_FRACTION);
}
