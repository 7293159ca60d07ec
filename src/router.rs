//! Top-level screen switching between the menu and the four sections.

/// How long the loading indicator stays up before a section appears.
pub const LOADER_DELAY_MS: f64 = 600.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Learn,
    Color,
    Draw,
    Games,
}

/// One-off setup a section needs when it is revealed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetupStep {
    ShowPackList,
    BuildGallery,
    BuildPalette,
    PrepareCanvas,
    RefreshUnlockGate,
    ShowGameMenu,
}

impl Section {
    pub const ALL: [Section; 4] = [Section::Learn, Section::Color, Section::Draw, Section::Games];

    /// Key used by the menu cards' `data-section` attribute.
    pub fn key(self) -> &'static str {
        match self {
            Section::Learn => "learn",
            Section::Color => "color",
            Section::Draw => "draw",
            Section::Games => "games",
        }
    }

    pub fn from_key(key: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|s| s.key() == key)
    }

    /// DOM id of the section's container.
    pub fn container_id(self) -> &'static str {
        match self {
            Section::Learn => "learn-section",
            Section::Color => "color-section",
            Section::Draw => "draw-section",
            Section::Games => "games-section",
        }
    }

    pub fn setup(self) -> &'static [SetupStep] {
        match self {
            Section::Learn => &[SetupStep::ShowPackList],
            Section::Color => &[SetupStep::BuildGallery, SetupStep::BuildPalette],
            Section::Draw => &[SetupStep::BuildPalette, SetupStep::PrepareCanvas],
            Section::Games => &[SetupStep::RefreshUnlockGate, SetupStep::ShowGameMenu],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Screen {
    Menu,
    Loading { target: Section, ready_at: f64 },
    Section(Section),
}

/// Exactly one screen is visible at a time; the loader is a screen of its own.
#[derive(Debug)]
pub struct Router {
    screen: Screen,
}

impl Default for Router {
    fn default() -> Self {
        Self { screen: Screen::Menu }
    }
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn loading(&self) -> bool {
        matches!(self.screen, Screen::Loading { .. })
    }

    pub fn visible_section(&self) -> Option<Section> {
        match self.screen {
            Screen::Section(s) => Some(s),
            _ => None,
        }
    }

    /// Hide everything and put up the loader. A second call while loading
    /// retargets and restarts the delay.
    pub fn enter_section(&mut self, target: Section, now: f64) {
        log::info!("entering section {}", target.key());
        self.screen = Screen::Loading {
            target,
            ready_at: now + LOADER_DELAY_MS,
        };
    }

    /// Reveal the pending section once its delay has elapsed. Returns the
    /// section on the tick it appears so its setup runs exactly once.
    pub fn advance(&mut self, now: f64) -> Option<Section> {
        match self.screen {
            Screen::Loading { target, ready_at } if now >= ready_at => {
                self.screen = Screen::Section(target);
                Some(target)
            }
            _ => None,
        }
    }

    /// Back to the menu from anywhere, dropping a pending reveal.
    pub fn return_to_menu(&mut self) {
        self.screen = Screen::Menu;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_keys_round_trip() {
        for s in Section::ALL {
            assert_eq!(Section::from_key(s.key()), Some(s));
        }
        assert_eq!(Section::from_key("settings"), None);
    }

    #[test]
    fn section_appears_after_loader_delay() {
        let mut r = Router::new();
        r.enter_section(Section::Draw, 1_000.0);
        assert!(r.loading());
        assert_eq!(r.visible_section(), None);
        assert_eq!(r.advance(1_599.0), None);
        assert_eq!(r.advance(1_600.0), Some(Section::Draw));
        assert_eq!(r.visible_section(), Some(Section::Draw));
        // Setup is reported once only.
        assert_eq!(r.advance(5_000.0), None);
    }

    #[test]
    fn return_to_menu_cancels_pending_reveal() {
        let mut r = Router::new();
        r.enter_section(Section::Games, 0.0);
        r.return_to_menu();
        assert_eq!(r.advance(10_000.0), None);
        assert_eq!(r.screen(), Screen::Menu);
    }

    #[test]
    fn games_setup_rechecks_gate() {
        for s in Section::ALL {
            let reads = s.setup().iter().filter(|&&step| step == SetupStep::RefreshUnlockGate).count();
            assert_eq!(reads, usize::from(s == Section::Games), "{}", s.key());
        }
        assert_eq!(
            Section::Draw.setup(),
            &[SetupStep::BuildPalette, SetupStep::PrepareCanvas]
        );
    }
}
