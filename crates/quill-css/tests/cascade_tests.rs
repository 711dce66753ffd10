//! End-to-end tests for the cascade: sheet text in, resolved styles out.

use quill_css::default_sheet::DEFAULT_SHEET;
use quill_css::geometry::Insets;
use quill_css::resolver::StyleResolver;
use quill_css::style::{Color, Display, FontWeight, TextAlign, TextDecoration};

#[test]
fn test_document_sheet_overrides_default_sheet() {
    let mut resolver = StyleResolver::new(DEFAULT_SHEET, 16.0, 1.0);
    resolver.append_sheet("a { color: crimson; } span { display: block; }");

    assert_eq!(resolver.lookup_text_style("a").color, Color::new("crimson"));
    assert_eq!(resolver.lookup_block_style("span").display, Display::Block);
    // Untouched defaults survive.
    assert_eq!(resolver.lookup_block_style("head").display, Display::None);
    assert_eq!(
        resolver.lookup_text_style("b").font_weight,
        FontWeight::Bold
    );
    assert_eq!(
        resolver.lookup_text_style("a").text_decoration,
        TextDecoration::Underline
    );
}

#[test]
fn test_wildcard_appended_last_wins_over_exact_match() {
    let mut resolver = StyleResolver::new("", 16.0, 1.0);
    resolver.append_sheet("p { text-align: right; } * { text-align: center; }");
    assert_eq!(
        resolver.lookup_block_style("p").text_align,
        TextAlign::Center
    );
}

#[test]
fn test_properties_accumulate_across_rules() {
    let mut resolver = StyleResolver::new("", 16.0, 1.0);
    resolver.append_sheet("p { margin: 4; } p { padding: 2; }");
    let style = resolver.lookup_block_style("p");
    assert_eq!(style.margin, Insets::uniform(4.0));
    assert_eq!(style.padding, Insets::uniform(2.0));
    assert_eq!(style.inset(), Insets::uniform(6.0));
}

#[test]
fn test_unknown_property_does_not_poison_rule() {
    let mut resolver = StyleResolver::new("", 16.0, 1.0);
    resolver.append_sheet("p { z-index: 4; color: teal; }");
    assert_eq!(resolver.lookup_text_style("p").color, Color::new("teal"));
}

#[test]
fn test_heading_sizes_track_the_base_font_size() {
    let resolver = StyleResolver::new(DEFAULT_SHEET, 12.0, 1.0);
    let h1 = resolver.lookup_text_style("h1");
    let h2 = resolver.lookup_text_style("h2");
    assert!((h1.font_size - 24.0).abs() < f32::EPSILON);
    assert!((h2.font_size - 18.0).abs() < f32::EPSILON);
}
