//! Browser side of the app: owns the DOM handles, wires every control once
//! at boot and runs a single `requestAnimationFrame` loop that drives the
//! router's loader delay and the active game's timers.
//!
//! All mutable state lives in one `AppState` behind a `thread_local!`.
//! Listeners borrow it for the duration of one event.

mod dom;
mod draw;
mod learn;
mod play;

use std::cell::RefCell;
use std::rc::Rc;

use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlAudioElement, HtmlInputElement, MouseEvent};

use crate::audio::{BrowserAudio, SoundBoard};
use crate::canvas::{Palette, Point};
use crate::error::{AppError, AppResult};
use crate::games::GameSession;
use crate::router::{Router, Section, SetupStep};
use crate::settings::{
    LocalStorage, MusicSetting, PURCHASE_PROMPT, PURCHASE_THANKS, UnlockGate,
};
use crate::viewer::ViewerState;

/// Splash time before the menu appears.
pub const STARTUP_DELAY_MS: i32 = 1500;
const BACKGROUND_MUSIC: &str = "background.mp3";

pub(crate) struct AppState {
    router: Router,
    viewer: Option<ViewerState>,
    sounds: SoundBoard<BrowserAudio>,
    gate: UnlockGate<LocalStorage>,
    music: MusicSetting<LocalStorage>,
    background: Option<HtmlAudioElement>,
    swipe_start: Option<Point>,
    palette: Palette,
    surfaces: draw::Surfaces,
    coloring_page: Option<&'static str>,
    session: Option<GameSession>,
    rng: StdRng,
}

impl AppState {
    fn new() -> Self {
        let background = HtmlAudioElement::new_with_src(BACKGROUND_MUSIC)
            .map(|a| {
                a.set_loop(true);
                a
            })
            .map_err(|e| warn!("background music unavailable: {e:?}"))
            .ok();
        Self {
            router: Router::new(),
            viewer: None,
            sounds: SoundBoard::new(BrowserAudio),
            gate: UnlockGate::new(LocalStorage),
            music: MusicSetting::new(LocalStorage),
            background,
            swipe_start: None,
            palette: Palette::default(),
            surfaces: draw::Surfaces::default(),
            coloring_page: None,
            session: None,
            rng: StdRng::from_entropy(),
        }
    }

    /// Hide every screen, show the loader, and queue the section reveal.
    fn enter_section(&mut self, section: Section) -> AppResult<()> {
        learn::exit_pack(self)?;
        play::end_session(self);
        dom::set_display_by_id("loading-screen", "flex")?;
        hide_screens()?;
        self.router.enter_section(section, dom::now());
        Ok(())
    }

    fn return_to_menu(&mut self) -> AppResult<()> {
        learn::exit_pack(self)?;
        play::end_session(self);
        self.router.return_to_menu();
        dom::set_display_by_id("loading-screen", "none")?;
        hide_screens()?;
        dom::set_hidden("section-menu", false)
    }

    fn reveal(&mut self, section: Section) -> AppResult<()> {
        dom::set_display_by_id("loading-screen", "none")?;
        dom::set_hidden(section.container_id(), false)?;
        for step in section.setup() {
            match step {
                SetupStep::ShowPackList => learn::show_pack_list()?,
                SetupStep::BuildGallery => draw::build_gallery()?,
                SetupStep::BuildPalette => draw::build_palette(self, section)?,
                SetupStep::PrepareCanvas => draw::prepare_canvas(draw::DRAW_CANVAS)?,
                SetupStep::RefreshUnlockGate => {
                    self.gate.refresh();
                }
                SetupStep::ShowGameMenu => play::show_menu(self)?,
            }
        }
        Ok(())
    }

    fn tick(&mut self, now: f64) {
        if let Some(section) = self.router.advance(now) {
            dom::report(self.reveal(section));
        }
        play::tick(self, now);
    }

    fn set_music(&mut self, on: bool) {
        self.music.set(on);
        let Some(bg) = &self.background else {
            return;
        };
        if on {
            bg.set_current_time(0.0);
            // Autoplay refusals are fine here: the toggle itself is the user gesture.
            let _ = bg.play();
        } else {
            let _ = bg.pause();
        }
    }

    /// Confirm-dialog stand-in for a real store purchase.
    fn prompt_purchase(&mut self) -> AppResult<()> {
        let win = dom::window()?;
        if win.confirm_with_message(PURCHASE_PROMPT)? {
            self.gate.purchase();
            win.alert_with_message(PURCHASE_THANKS)?;
        }
        Ok(())
    }
}

fn hide_screens() -> AppResult<()> {
    dom::set_hidden("section-menu", true)?;
    for section in Section::ALL {
        dom::set_hidden(section.container_id(), true)?;
    }
    dom::set_hidden("viewer", true)
}

thread_local! {
    static APP: RefCell<Option<AppState>> = const { RefCell::new(None) };
}

/// Borrow the app state for one event. Re-entrant calls are dropped rather
/// than panicking.
pub(crate) fn with_app<R>(f: impl FnOnce(&mut AppState) -> R) -> Option<R> {
    APP.with(|cell| match cell.try_borrow_mut() {
        Ok(mut guard) => guard.as_mut().map(f),
        Err(_) => {
            warn!("app state busy, event dropped");
            None
        }
    })
}

/// Entry point; call once the page's DOM has been parsed.
pub fn start() -> Result<(), JsValue> {
    dom::after(STARTUP_DELAY_MS, || dom::report(boot()))?;
    Ok(())
}

fn boot() -> AppResult<()> {
    dom::set_display_by_id("loading-screen", "none")?;
    dom::set_hidden("app", false)?;
    APP.with(|cell| cell.replace(Some(AppState::new())));

    learn::build_pack_cards()?;
    learn::wire()?;
    draw::wire()?;
    play::wire()?;
    wire_navigation()?;
    wire_settings()?;

    with_app(|app| app.return_to_menu()).unwrap_or(Ok(()))?;
    start_loop();
    info!("app ready");
    Ok(())
}

fn wire_navigation() -> AppResult<()> {
    dom::on_id("section-menu", "click", |evt: MouseEvent| {
        let Some((_, key)) = dom::closest_data(evt.target(), "section") else {
            return;
        };
        let result = match Section::from_key(&key) {
            Some(section) => with_app(|app| app.enter_section(section)),
            None => {
                warn!("{}", AppError::UnknownSection(key));
                with_app(|app| app.return_to_menu())
            }
        };
        dom::report(result.unwrap_or(Ok(())));
    })?;
    dom::on_id("home-btn", "click", |_: MouseEvent| {
        dom::report(with_app(|app| app.return_to_menu()).unwrap_or(Ok(())));
    })
}

fn wire_settings() -> AppResult<()> {
    dom::on_id("settings-btn", "click", |_: MouseEvent| {
        dom::report(dom::set_hidden("settings-modal", false));
    })?;
    dom::on_id("close-settings-btn", "click", |_: MouseEvent| {
        dom::report(dom::set_hidden("settings-modal", true));
    })?;

    let toggle: HtmlInputElement = dom::typed("music-toggle", "HtmlInputElement")?;
    if with_app(|app| app.music.enabled()).unwrap_or(false) {
        toggle.set_checked(true);
    }
    let toggle_in_handler = toggle.clone();
    dom::on(&toggle, "change", move |_: Event| {
        let on = toggle_in_handler.checked();
        with_app(|app| app.set_music(on));
    })
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        with_app(|app| app.tick(ts));
        if let (Some(w), Some(cb)) = (web_sys::window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (web_sys::window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
