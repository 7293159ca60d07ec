// Content invariants for the built-in packs, coloring pages and palette.
// Native-friendly: no wasm or browser APIs.

use std::collections::HashSet;

use lil_kids::catalog::{COLORING_PAGES, ItemDisplay, PALETTE, PackId};

#[test]
fn pack_item_names_are_unique_within_each_pack() {
    for pack in PackId::ALL {
        let mut seen = HashSet::new();
        for item in pack.items() {
            assert!(seen.insert(item.name), "duplicate '{}' in {}", item.name, pack.name());
        }
    }
}

#[test]
fn swatches_are_hex_colors() {
    for item in PackId::Colors.items() {
        let ItemDisplay::Swatch { hex, text_color } = item.display else {
            panic!("{} is not a swatch", item.name);
        };
        for c in [hex, text_color] {
            assert_eq!(c.len(), 7, "bad color '{c}' on {}", item.name);
            assert!(c.starts_with('#'));
            assert!(c[1..].chars().all(|ch| ch.is_ascii_hexdigit()));
        }
    }
}

#[test]
fn numbers_count_one_to_twenty_in_order() {
    let values: Vec<u32> = PackId::Numbers
        .items()
        .iter()
        .filter_map(|i| match i.display {
            ItemDisplay::Text { value } => value,
            _ => None,
        })
        .collect();
    assert_eq!(values, (1..=20).collect::<Vec<_>>());
}

#[test]
fn image_packs_point_at_png_assets() {
    for pack in [PackId::Animals, PackId::Shapes, PackId::Fruits, PackId::Seasons] {
        for item in pack.items() {
            let ItemDisplay::Image(src) = item.display else {
                panic!("{} in {} has no image", item.name, pack.name());
            };
            assert!(src.ends_with(".png"), "unexpected asset '{src}'");
        }
    }
}

#[test]
fn coloring_pages_and_palette_are_distinct() {
    assert_eq!(COLORING_PAGES.len(), 5);
    let pages: HashSet<_> = COLORING_PAGES.iter().collect();
    assert_eq!(pages.len(), COLORING_PAGES.len());

    assert_eq!(PALETTE[0], "#000000", "black must be the default swatch");
    let colors: HashSet<_> = PALETTE.iter().collect();
    assert_eq!(colors.len(), PALETTE.len());
}
