//! Static content catalog: every learning pack and its items, plus the
//! coloring pages and palette shared by the Color and Draw screens.
//!
//! Nothing here is mutated after load. Packs whose items are generated
//! (letters, numbers) are built once and leaked into `'static` slices.

use std::sync::OnceLock;

/// How an item is presented in the viewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ItemDisplay {
    /// Solid colored tile with the name written on it.
    Swatch {
        hex: &'static str,
        text_color: &'static str,
    },
    /// Picture with a name label underneath.
    Image(&'static str),
    /// Large text: the numeric value when present, else the name.
    Text { value: Option<u32> },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Item {
    pub name: &'static str,
    pub display: ItemDisplay,
    pub sound: Option<&'static str>,
}

impl Item {
    const fn swatch(name: &'static str, hex: &'static str, text_color: &'static str) -> Self {
        Self {
            name,
            display: ItemDisplay::Swatch { hex, text_color },
            sound: None,
        }
    }

    const fn image(name: &'static str, image: &'static str) -> Self {
        Self {
            name,
            display: ItemDisplay::Image(image),
            sound: None,
        }
    }

    const fn animal(name: &'static str, image: &'static str, sound: &'static str) -> Self {
        Self {
            name,
            display: ItemDisplay::Image(image),
            sound: Some(sound),
        }
    }

    const fn text(name: &'static str, value: Option<u32>) -> Self {
        Self {
            name,
            display: ItemDisplay::Text { value },
            sound: None,
        }
    }

    /// Big text shown for text-mode items.
    pub fn large_text(&self) -> Option<String> {
        match self.display {
            ItemDisplay::Text { value: Some(v) } => Some(v.to_string()),
            ItemDisplay::Text { value: None } => Some(self.name.to_string()),
            _ => None,
        }
    }
}

/// Identifier of a content pack. Declaration order is the order the packs
/// are listed on the Learn screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PackId {
    Colors,
    Animals,
    Letters,
    Numbers,
    Shapes,
    Fruits,
    Seasons,
}

/// Preview shown on a pack's card in the pack selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PackPreview {
    Image(&'static str),
    Swatch(&'static str),
    Placeholder,
}

impl PackId {
    pub const ALL: [PackId; 7] = [
        PackId::Colors,
        PackId::Animals,
        PackId::Letters,
        PackId::Numbers,
        PackId::Shapes,
        PackId::Fruits,
        PackId::Seasons,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PackId::Colors => "Colors",
            PackId::Animals => "Animals",
            PackId::Letters => "Letters",
            PackId::Numbers => "Numbers",
            PackId::Shapes => "Shapes",
            PackId::Fruits => "Fruits",
            PackId::Seasons => "Seasons",
        }
    }

    pub fn from_name(name: &str) -> Option<PackId> {
        PackId::ALL.into_iter().find(|p| p.name() == name)
    }

    pub fn items(self) -> &'static [Item] {
        match self {
            PackId::Colors => COLORS,
            PackId::Animals => ANIMALS,
            PackId::Letters => letters(),
            PackId::Numbers => numbers(),
            PackId::Shapes => SHAPES,
            PackId::Fruits => FRUITS,
            PackId::Seasons => SEASONS,
        }
    }

    /// Colors and Seasons are narrated as "This is X" instead of the bare name.
    pub fn narrates_with_prefix(self) -> bool {
        matches!(self, PackId::Colors | PackId::Seasons)
    }

    pub fn preview(self) -> PackPreview {
        match self {
            PackId::Letters => return PackPreview::Image("letters_icon.png"),
            PackId::Numbers => return PackPreview::Image("numbers_icon.png"),
            _ => {}
        }
        let items = self.items();
        if let Some(img) = items.iter().find_map(|i| match i.display {
            ItemDisplay::Image(src) => Some(src),
            _ => None,
        }) {
            return PackPreview::Image(img);
        }
        match items.first().map(|i| i.display) {
            Some(ItemDisplay::Swatch { hex, .. }) if self == PackId::Colors => {
                PackPreview::Swatch(hex)
            }
            _ => PackPreview::Placeholder,
        }
    }
}

pub static COLORS: &[Item] = &[
    Item::swatch("Red", "#E74C3C", "#FFFFFF"),
    Item::swatch("Blue", "#3498DB", "#FFFFFF"),
    Item::swatch("Green", "#27AE60", "#FFFFFF"),
    Item::swatch("Yellow", "#F1C40F", "#333333"),
    Item::swatch("Orange", "#E67E22", "#FFFFFF"),
    Item::swatch("Purple", "#9B59B6", "#FFFFFF"),
];

pub static ANIMALS: &[Item] = &[
    Item::animal("Dog", "dog.png", "dog.mp3"),
    Item::animal("Cat", "cat.png", "cat.mp3"),
    Item::animal("Rabbit", "rabbit.png", "rabbit.wav"),
    Item::animal("Lion", "lion.png", "lion.mp3"),
    Item::animal("Cow", "cow.png", "cow.mp3"),
    Item::animal("Monkey", "monkey.png", "monkey.mp3"),
];

pub static SHAPES: &[Item] = &[
    Item::image("Circle", "circle.png"),
    Item::image("Square", "square.png"),
    Item::image("Triangle", "triangle.png"),
    Item::image("Rectangle", "rectangle.png"),
    Item::image("Star", "star.png"),
    Item::image("Heart", "heart.png"),
];

pub static FRUITS: &[Item] = &[
    Item::image("Apple", "apple.png"),
    Item::image("Banana", "banana.png"),
    Item::image("Grapes", "grapes.png"),
    Item::image("Orange", "orange.png"),
    Item::image("Strawberry", "strawberry.png"),
    Item::image("Pineapple", "pineapple.png"),
];

pub static SEASONS: &[Item] = &[
    Item::image("Spring", "spring.png"),
    Item::image("Summer", "summer.png"),
    Item::image("Autumn", "autumn.png"),
    Item::image("Winter", "winter.png"),
];

const LETTER_NAMES: [&str; 26] = [
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R", "S",
    "T", "U", "V", "W", "X", "Y", "Z",
];

const NUMBER_NAMES: [&str; 20] = [
    "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
    "Twenty",
];

fn letters() -> &'static [Item] {
    static LETTERS: OnceLock<&'static [Item]> = OnceLock::new();
    LETTERS.get_or_init(|| {
        let items: Vec<Item> = LETTER_NAMES.iter().map(|&n| Item::text(n, None)).collect();
        Box::leak(items.into_boxed_slice())
    })
}

fn numbers() -> &'static [Item] {
    static NUMBERS: OnceLock<&'static [Item]> = OnceLock::new();
    NUMBERS.get_or_init(|| {
        let items: Vec<Item> = NUMBER_NAMES
            .iter()
            .zip(1u32..)
            .map(|(&n, v)| Item::text(n, Some(v)))
            .collect();
        Box::leak(items.into_boxed_slice())
    })
}

/// Pages offered in the coloring gallery.
pub const COLORING_PAGES: &[&str] = &[
    "castle_detail.png",
    "cat_fun.png",
    "monster_truck_detail.png",
    "dog_detail.png",
    "dino_unicorn_fun.png",
];

/// Stroke colors for the Color and Draw palettes. White doubles as an eraser
/// on the white canvas.
pub const PALETTE: [&str; 12] = [
    "#000000", // black
    "#FFFFFF", // white
    "#E74C3C", // red
    "#E67E22", // orange
    "#F1C40F", // yellow
    "#27AE60", // green
    "#3498DB", // blue
    "#9B59B6", // purple
    "#FF66CC", // pink
    "#8E44AD", // deep violet
    "#1ABC9C", // turquoise
    "#F39C12", // amber
];

/// Serializable view of the whole catalog for the presentation layer.
#[cfg(feature = "serde")]
#[derive(serde::Serialize)]
pub struct CatalogView {
    pub packs: Vec<PackView>,
    pub coloring_pages: &'static [&'static str],
    pub palette: &'static [&'static str],
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize)]
pub struct PackView {
    pub name: &'static str,
    pub items: &'static [Item],
}

#[cfg(feature = "serde")]
pub fn catalog_view() -> CatalogView {
    CatalogView {
        packs: PackId::ALL
            .iter()
            .map(|p| PackView {
                name: p.name(),
                items: p.items(),
            })
            .collect(),
        coloring_pages: COLORING_PAGES,
        palette: &PALETTE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_names_round_trip() {
        for p in PackId::ALL {
            assert_eq!(PackId::from_name(p.name()), Some(p));
        }
        assert_eq!(PackId::from_name("Colours"), None);
    }

    #[test]
    fn every_pack_is_non_empty() {
        for p in PackId::ALL {
            assert!(!p.items().is_empty(), "{} is empty", p.name());
        }
    }

    #[test]
    fn letters_cover_alphabet() {
        let items = PackId::Letters.items();
        assert_eq!(items.len(), 26);
        assert_eq!(items[0].name, "A");
        assert_eq!(items[25].name, "Z");
        assert_eq!(items[2].large_text().as_deref(), Some("C"));
    }

    #[test]
    fn numbers_show_value_not_name() {
        let items = PackId::Numbers.items();
        assert_eq!(items.len(), 20);
        assert_eq!(items[0].name, "One");
        assert_eq!(items[19].large_text().as_deref(), Some("20"));
    }

    #[test]
    fn only_animals_carry_sounds() {
        for p in PackId::ALL {
            let with_sound = p.items().iter().filter(|i| i.sound.is_some()).count();
            if p == PackId::Animals {
                assert_eq!(with_sound, p.items().len());
            } else {
                assert_eq!(with_sound, 0, "{} has sounds", p.name());
            }
        }
    }

    #[test]
    fn previews_follow_pack_content() {
        assert_eq!(PackId::Colors.preview(), PackPreview::Swatch("#E74C3C"));
        assert_eq!(PackId::Animals.preview(), PackPreview::Image("dog.png"));
        assert_eq!(PackId::Letters.preview(), PackPreview::Image("letters_icon.png"));
        assert_eq!(PackId::Numbers.preview(), PackPreview::Image("numbers_icon.png"));
        assert_eq!(PackId::Seasons.preview(), PackPreview::Image("spring.png"));
    }

    #[test]
    fn prefix_narration_is_limited_to_colors_and_seasons() {
        let prefixed: Vec<_> = PackId::ALL
            .into_iter()
            .filter(|p| p.narrates_with_prefix())
            .collect();
        assert_eq!(prefixed, vec![PackId::Colors, PackId::Seasons]);
    }
}
