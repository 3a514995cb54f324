use css_sprite_core::config::{Arrange, GeneratorConfig};
use css_sprite_core::error::SpriteError;
use css_sprite_core::generator::SpriteSheetGenerator;
use css_sprite_core::model::Rect;
use image::RgbaImage;

fn generator(arrange: Arrange) -> SpriteSheetGenerator {
    SpriteSheetGenerator::new(GeneratorConfig::builder().arrange(arrange).build())
}

#[test]
fn build_moves_sheets_to_their_mapped_positions() {
    let mut g = generator(Arrange::Horizontal);
    g.add_sheet_from_image(RgbaImage::new(100, 50), 10, 10);
    g.add_sheet_from_image(RgbaImage::new(50, 100), 30, 40);

    let mapping = g.build();

    assert_eq!((g.sheets()[0].x, g.sheets()[0].y), (0, 0));
    assert_eq!((g.sheets()[1].x, g.sheets()[1].y), (100, 0));
    assert_eq!((mapping.width, mapping.height), (150, 100));
}

#[test]
fn offsets_inflate_spacing_but_not_sheet_sizes() {
    let cfg = GeneratorConfig::builder()
        .arrange(Arrange::Horizontal)
        .horizontal_offset(5)
        .vertical_offset(3)
        .build();
    let mut g = SpriteSheetGenerator::new(cfg);
    g.add_sheet_from_image(RgbaImage::new(10, 10), 0, 0);
    g.add_sheet_from_image(RgbaImage::new(10, 10), 0, 0);

    let mapping = g.build();

    assert_eq!((g.sheets()[0].x, g.sheets()[0].y), (0, 0));
    assert_eq!((g.sheets()[1].x, g.sheets()[1].y), (15, 0));
    assert_eq!((mapping.width, mapping.height), (30, 13));
    assert_eq!(g.sheets()[0].width, 10);
    assert_eq!(g.sheets()[0].height, 10);
}

#[test]
fn build_with_nothing_added_is_empty() {
    let mut g = generator(Arrange::Optimal);
    let mapping = g.build();
    assert!(mapping.placements.is_empty());
    assert_eq!(mapping.area(), 0);
    assert!(matches!(g.flattened_image(), Err(SpriteError::Empty)));
}

#[test]
fn image_sheets_get_generated_class_names() {
    let mut g = generator(Arrange::Horizontal);
    let a = g.add_sheet_from_image(RgbaImage::new(4, 4), 0, 0);
    let b = g.add_sheet_from_image(RgbaImage::new(4, 4), 0, 0);

    assert_eq!(g.sheet(a).map(|s| s.class_name.as_str()), Some("cssg-1"));
    assert_eq!(g.sheet(b).map(|s| s.class_name.as_str()), Some("cssg-2"));
    assert!(g.sheet(a).map(|s| s.image_file.is_none()).unwrap_or(false));
}

#[test]
fn taken_class_names_are_suffixed() {
    let mut g = generator(Arrange::Horizontal);
    let id = g.add_sheet_from_image(RgbaImage::new(20, 20), 0, 0);

    let first = g.add_sprite_in(id, "icon", 0, 0, 5, 5).expect("add icon");
    let second = g.add_sprite_in(id, "icon", 5, 0, 5, 5).expect("add icon again");
    let third = g.add_sprite_in(id, "icon", 10, 0, 5, 5).expect("add icon thrice");

    assert_eq!(first, "icon");
    assert_eq!(second, "icon-2");
    assert_eq!(third, "icon-3");
    assert!(g.find_sprite("icon-2").is_some());
}

#[test]
fn sprites_store_coordinates_relative_to_their_sheet() {
    let mut g = generator(Arrange::Horizontal);
    let id = g.add_sheet_from_image(RgbaImage::new(40, 40), 100, 200);

    let name = g
        .add_sprite("badge", Rect::new(110, 220, 8, 8))
        .expect("sprite inside the sheet");
    assert_eq!(name, "badge");

    let sprite = g.find_sprite("badge").expect("registered");
    assert_eq!(sprite.sheet, id);
    assert_eq!((sprite.x, sprite.y), (10, 20));
    assert_eq!((sprite.width, sprite.height), (8, 8));
}

#[test]
fn sprites_outside_every_sheet_are_rejected() {
    let mut g = generator(Arrange::Horizontal);
    g.add_sheet_from_image(RgbaImage::new(10, 10), 0, 0);

    let err = g.add_sprite("stray", Rect::new(5, 5, 10, 10)).unwrap_err();
    assert!(matches!(err, SpriteError::InvalidInput(_)));

    let id = g.sheets()[0].id;
    let err = g.add_sprite_in(id, "stray", 5, 5, 10, 10).unwrap_err();
    assert!(matches!(err, SpriteError::InvalidInput(_)));
}

#[test]
fn removing_a_sheet_cascades_to_its_sprites() {
    let mut g = generator(Arrange::Horizontal);
    let a = g.add_sheet_from_image(RgbaImage::new(10, 10), 0, 0);
    let b = g.add_sheet_from_image(RgbaImage::new(10, 10), 0, 0);
    g.add_sprite_in(a, "kept", 0, 0, 2, 2).expect("add");
    g.add_sprite_in(b, "dropped", 0, 0, 2, 2).expect("add");

    let class = g.sheet(b).map(|s| s.class_name.clone()).expect("exists");
    g.remove_sheet(&class).expect("remove sheet");

    assert_eq!(g.sheets().len(), 1);
    assert!(g.find_sprite("kept").is_some());
    assert!(g.find_sprite("dropped").is_none());
    assert!(g.sheet_image(b).is_none());
}

#[test]
fn removal_checks_the_kind_of_the_class_name() {
    let mut g = generator(Arrange::Horizontal);
    let id = g.add_sheet_from_image(RgbaImage::new(10, 10), 0, 0);
    g.add_sprite_in(id, "dot", 0, 0, 1, 1).expect("add");

    assert!(matches!(
        g.remove_sheet("dot"),
        Err(SpriteError::NotASpriteSheet(_))
    ));
    assert!(matches!(
        g.remove_sprite("cssg-1"),
        Err(SpriteError::NotASprite(_))
    ));
    assert!(matches!(
        g.remove_sheet("missing"),
        Err(SpriteError::UnknownClassName(_))
    ));
    assert!(matches!(
        g.remove_sprite("missing"),
        Err(SpriteError::UnknownClassName(_))
    ));
}

#[test]
fn flattened_image_covers_raw_sheet_bounds() {
    let mut g = generator(Arrange::Vertical);
    let mut red = RgbaImage::new(2, 2);
    for p in red.pixels_mut() {
        *p = image::Rgba([255, 0, 0, 255]);
    }
    let mut blue = RgbaImage::new(3, 1);
    for p in blue.pixels_mut() {
        *p = image::Rgba([0, 0, 255, 255]);
    }
    g.add_sheet_from_image(red, 0, 0);
    g.add_sheet_from_image(blue, 0, 0);
    g.build();

    let flat = g.flattened_image().expect("non-empty");
    assert_eq!(flat.dimensions(), (3, 3));
    assert_eq!(flat.get_pixel(0, 0), &image::Rgba([255, 0, 0, 255]));
    assert_eq!(flat.get_pixel(1, 1), &image::Rgba([255, 0, 0, 255]));
    assert_eq!(flat.get_pixel(0, 2), &image::Rgba([0, 0, 255, 255]));
    assert_eq!(flat.get_pixel(2, 2), &image::Rgba([0, 0, 255, 255]));
    // Uncovered corner stays transparent.
    assert_eq!(flat.get_pixel(2, 0), &image::Rgba([0, 0, 0, 0]));
}

#[test]
fn rebuild_after_config_change_rearranges() {
    let mut g = generator(Arrange::Horizontal);
    g.add_sheet_from_image(RgbaImage::new(10, 10), 0, 0);
    g.add_sheet_from_image(RgbaImage::new(10, 10), 0, 0);

    g.build();
    assert_eq!((g.sheets()[1].x, g.sheets()[1].y), (10, 0));

    g.config_mut().arrange = Arrange::Vertical;
    g.build();
    assert_eq!((g.sheets()[1].x, g.sheets()[1].y), (0, 10));
}
