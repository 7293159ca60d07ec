//! Pack viewer: one item of one pack at a time.

use crate::catalog::{Item, ItemDisplay, PackId};

/// Minimum horizontal travel, in CSS pixels, for a drag to count as a swipe.
pub const SWIPE_THRESHOLD_PX: f64 = 40.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Swipe {
    /// Finger moved left: show the next item.
    Next,
    /// Finger moved right: show the previous item.
    Previous,
}

impl Swipe {
    /// Classify a drag by its start-to-end delta. Short or mostly vertical
    /// drags are not swipes.
    pub fn from_delta(dx: f64, dy: f64) -> Option<Swipe> {
        if dx.abs() <= SWIPE_THRESHOLD_PX || dx.abs() <= dy.abs() {
            return None;
        }
        Some(if dx < 0.0 { Swipe::Next } else { Swipe::Previous })
    }
}

/// How the current item should be laid out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Presentation {
    ColorTile {
        hex: &'static str,
        text_color: &'static str,
        label: &'static str,
    },
    Picture {
        src: &'static str,
        label: &'static str,
    },
    LargeText {
        text: String,
        label: &'static str,
    },
}

impl Presentation {
    pub fn of(item: &Item) -> Self {
        match item.display {
            ItemDisplay::Swatch { hex, text_color } => Presentation::ColorTile {
                hex,
                text_color,
                label: item.name,
            },
            ItemDisplay::Image(src) => Presentation::Picture {
                src,
                label: item.name,
            },
            ItemDisplay::Text { .. } => Presentation::LargeText {
                text: item.large_text().unwrap_or_else(|| item.name.to_string()),
                label: item.name,
            },
        }
    }
}

/// Active pack and position. Packs are never empty, so `index` is always
/// a valid position in `pack.items()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewerState {
    pack: PackId,
    index: usize,
}

impl ViewerState {
    pub fn enter(pack: PackId) -> Self {
        log::info!("entering pack {}", pack.name());
        Self { pack, index: 0 }
    }

    pub fn pack(&self) -> PackId {
        self.pack
    }

    pub fn index(&self) -> usize {
        self.index
    }

    fn len(&self) -> usize {
        self.pack.items().len()
    }

    pub fn item(&self) -> &'static Item {
        &self.pack.items()[self.index]
    }

    pub fn next(&mut self) -> &'static Item {
        self.index = (self.index + 1) % self.len();
        self.item()
    }

    pub fn previous(&mut self) -> &'static Item {
        let len = self.len();
        self.index = (self.index + len - 1) % len;
        self.item()
    }

    pub fn swipe(&mut self, swipe: Swipe) -> &'static Item {
        match swipe {
            Swipe::Next => self.next(),
            Swipe::Previous => self.previous(),
        }
    }

    pub fn presentation(&self) -> Presentation {
        Presentation::of(self.item())
    }
}
