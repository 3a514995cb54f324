use css_sprite_core::config::{Arrange, GeneratorConfig};
use css_sprite_core::css::{CssRule, stylesheet};
use css_sprite_core::generator::SpriteSheetGenerator;
use image::RgbaImage;

#[test]
fn rule_renders_the_exact_block_shape() {
    let mut rule = CssRule::new();
    rule.selectors.push("icon".into());
    rule.declarations
        .push(("background-position".into(), "1px 2px".into()));
    rule.declarations.push(("width".into(), "3px".into()));
    rule.declarations.push(("height".into(), "4px".into()));

    let expected = ".icon\n{\n    background-position: 1px 2px;\n    width: 3px;\n    height: 4px;\n}\n";
    assert_eq!(rule.to_string(), expected);
}

#[test]
fn selectors_join_with_commas() {
    let mut rule = CssRule::new();
    rule.selectors.push("a".into());
    rule.selectors.push("b".into());
    rule.declarations.push(("width".into(), "1px".into()));

    assert_eq!(rule.to_string(), ".a, .b\n{\n    width: 1px;\n}\n");
}

#[test]
fn rules_are_separated_by_a_blank_line() {
    let mut first = CssRule::new();
    first.selectors.push("a".into());
    first.declarations.push(("width".into(), "1px".into()));
    let mut second = CssRule::new();
    second.selectors.push("b".into());
    second.declarations.push(("height".into(), "2px".into()));

    let sheet = stylesheet(&[first, second]);
    assert_eq!(
        sheet,
        ".a\n{\n    width: 1px;\n}\n\n.b\n{\n    height: 2px;\n}\n"
    );
}

#[test]
fn empty_stylesheet_is_an_empty_string() {
    assert_eq!(stylesheet(&[]), "");

    let g = SpriteSheetGenerator::new(GeneratorConfig::default());
    assert_eq!(g.css(), "");
}

#[test]
fn generator_emits_absolute_positions_after_build() {
    let mut g =
        SpriteSheetGenerator::new(GeneratorConfig::builder().arrange(Arrange::Horizontal).build());
    let a = g.add_sheet_from_image(RgbaImage::new(10, 10), 0, 0);
    let b = g.add_sheet_from_image(RgbaImage::new(10, 10), 0, 0);
    g.add_sprite_in(a, "left", 1, 2, 3, 4).expect("add");
    g.add_sprite_in(b, "right", 1, 2, 3, 4).expect("add");

    g.build();
    let css = g.css();

    let expected = ".left\n{\n    background-position: 1px 2px;\n    width: 3px;\n    height: 4px;\n}\n\n.right\n{\n    background-position: 11px 2px;\n    width: 3px;\n    height: 4px;\n}\n";
    assert_eq!(css, expected);
}

#[test]
fn rules_follow_sheet_order_then_insertion_order() {
    let mut g = SpriteSheetGenerator::new(GeneratorConfig::default());
    let a = g.add_sheet_from_image(RgbaImage::new(20, 20), 0, 0);
    let b = g.add_sheet_from_image(RgbaImage::new(20, 20), 0, 0);
    // Interleave insertions across the two sheets.
    g.add_sprite_in(b, "b1", 0, 0, 1, 1).expect("add");
    g.add_sprite_in(a, "a1", 0, 0, 1, 1).expect("add");
    g.add_sprite_in(b, "b2", 1, 0, 1, 1).expect("add");
    g.add_sprite_in(a, "a2", 1, 0, 1, 1).expect("add");

    let css = g.css();
    let order: Vec<usize> = ["a1", "a2", "b1", "b2"]
        .iter()
        .map(|name| css.find(&format!(".{}\n", name)).expect("rule present"))
        .collect();
    assert!(order.windows(2).all(|w| w[0] < w[1]));
}
