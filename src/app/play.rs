//! Games section: the game menu and the DOM mirror of the active
//! `GameSession`. Every board is redrawn from game state after an input;
//! only falling fruit is updated in place each frame.

use wasm_bindgen::JsCast;
use web_sys::{Document, DragEvent, HtmlElement, HtmlImageElement, MouseEvent, PointerEvent};

use super::{AppState, dom, with_app};
use crate::error::{AppError, AppResult};
use crate::games::fruit::{CatchOutcome, Fruit, FruitCatch};
use crate::games::habitat::{self, HabitatGame};
use crate::games::memory::{Face, MemoryGame};
use crate::games::puzzle::NumberPuzzle;
use crate::games::slots::DropOutcome;
use crate::games::sort::ShapeSort;
use crate::games::{GameKind, GameSession, PlayArea, Shape};

/// DOM ids shared by every game screen.
struct GameView {
    kind: GameKind,
    container: &'static str,
    success: &'static str,
    reset: &'static str,
}

static VIEWS: [GameView; 5] = [
    GameView {
        kind: GameKind::Sort,
        container: "sort-game",
        success: "game-success-message",
        reset: "game-reset-btn",
    },
    GameView {
        kind: GameKind::Memory,
        container: "memory-game",
        success: "memory-success-message",
        reset: "memory-reset-btn",
    },
    GameView {
        kind: GameKind::Fruit,
        container: "fruit-game",
        success: "fruit-success-message",
        reset: "fruit-reset-btn",
    },
    GameView {
        kind: GameKind::Habitat,
        container: "habitat-game",
        success: "habitat-success-message",
        reset: "habitat-reset-btn",
    },
    GameView {
        kind: GameKind::Puzzle,
        container: "puzzle-game",
        success: "puzzle-success-message",
        reset: "puzzle-reset-btn",
    },
];

fn view(kind: GameKind) -> &'static GameView {
    // VIEWS covers every kind.
    VIEWS.iter().find(|v| v.kind == kind).unwrap_or(&VIEWS[0])
}

const FRUIT_AREA: &str = "fruit-area";
const FRUIT_SCORE: &str = "fruit-scoreboard";

/// Drop the active game; its pending timers go with it.
pub fn end_session(app: &mut AppState) {
    if let Some(session) = app.session.take() {
        log::debug!("ending {} game", session.kind().key());
    }
}

pub fn show_menu(app: &mut AppState) -> AppResult<()> {
    end_session(app);
    dom::set_hidden("game-menu", false)?;
    dom::set_hidden("game-back-btn", true)?;
    for v in &VIEWS {
        dom::set_hidden(v.container, true)?;
        dom::set_shown(v.reset, false, "inline-block")?;
        dom::set_display_by_id(v.success, "none")?;
    }
    dom::set_display_by_id(FRUIT_SCORE, "none")
}

fn choose_game(app: &mut AppState, kind: GameKind) -> AppResult<()> {
    if !app.gate.is_unlocked() {
        return app.prompt_purchase();
    }
    dom::set_hidden("game-menu", true)?;
    dom::set_hidden("game-back-btn", false)?;
    for v in &VIEWS {
        dom::set_hidden(v.container, v.kind != kind)?;
    }
    start(app, kind)
}

fn play_area() -> AppResult<PlayArea> {
    let area = dom::element(FRUIT_AREA)?;
    Ok(PlayArea {
        width: area.client_width() as f64,
        height: area.client_height() as f64,
    })
}

fn start(app: &mut AppState, kind: GameKind) -> AppResult<()> {
    let area = play_area()?;
    let now = dom::now();
    let session = match &app.session {
        Some(old) if old.kind() == kind => old.restarted(now, area, &mut app.rng),
        _ => GameSession::start(kind, now, area, &mut app.rng),
    };
    let v = view(kind);
    dom::set_shown(v.reset, session.restart_visible(), "inline-block")?;
    dom::set_display_by_id(v.success, "none")?;
    app.session = Some(session);
    render(app)
}

fn restart(app: &mut AppState, kind: GameKind) -> AppResult<()> {
    let active = app.session.as_ref().map(GameSession::kind);
    if active == Some(kind) {
        start(app, kind)
    } else {
        Ok(())
    }
}

fn render(app: &AppState) -> AppResult<()> {
    let Some(session) = &app.session else {
        return Ok(());
    };
    let doc = dom::document()?;
    match session {
        GameSession::Memory(g) => render_memory(&doc, g)?,
        GameSession::Sort(g) => render_sort(&doc, g)?,
        GameSession::Fruit(g) => render_fruit(&doc, g)?,
        GameSession::Habitat(g) => render_habitat(&doc, g)?,
        GameSession::Puzzle(g) => render_puzzle(&doc, g)?,
    }
    let success = if session.is_complete() { "block" } else { "none" };
    dom::set_display_by_id(view(session.kind()).success, success)
}

fn image(doc: &Document, src: &str, alt: &str) -> AppResult<HtmlImageElement> {
    let img: HtmlImageElement = dom::create(doc, "img", "")?.unchecked_into();
    img.set_src(src);
    img.set_alt(alt);
    Ok(img)
}

fn slot(doc: &Document, class: &str, index: usize, filled: bool) -> AppResult<HtmlElement> {
    let el = dom::create(doc, "div", class)?;
    el.set_attribute("data-slot", &index.to_string())?;
    if filled {
        el.class_list().add_1("correct")?;
    }
    Ok(el)
}

fn piece(doc: &Document, class: &str, key: &str) -> AppResult<HtmlElement> {
    let el = dom::create(doc, "div", class)?;
    el.set_attribute("data-key", key)?;
    el.set_draggable(true);
    Ok(el)
}

fn render_memory(doc: &Document, game: &MemoryGame) -> AppResult<()> {
    let board = dom::cleared("memory-board")?;
    for (i, card) in game.cards().iter().enumerate() {
        let el = dom::create(doc, "div", "memory-card")?;
        el.set_attribute("data-card", &i.to_string())?;
        if card.face == Face::Matched {
            el.class_list().add_1("matched")?;
        }
        let img = image(doc, &card.shape.image(), card.shape.key())?;
        let visibility = if card.face == Face::Hidden { "hidden" } else { "visible" };
        img.style().set_property("visibility", visibility)?;
        el.append_child(&img)?;
        board.append_child(&el)?;
    }
    Ok(())
}

fn render_sort(doc: &Document, game: &ShapeSort) -> AppResult<()> {
    let drop = dom::cleared("drop-area")?;
    for (i, s) in game.board().slots().iter().enumerate() {
        let key = s.target.key();
        let el = slot(doc, &format!("drop-slot {key}-slot"), i, s.filled)?;
        if s.filled {
            let img = image(doc, &s.target.image(), key)?;
            el.append_child(&img)?;
        } else {
            // Faint silhouette of the expected shape.
            let style = el.style();
            style.set_property("background-image", &format!("url({})", s.target.image()))?;
            style.set_property("background-repeat", "no-repeat")?;
            style.set_property("background-position", "center")?;
            style.set_property("background-size", "60%")?;
            style.set_property("opacity", "0.4")?;
        }
        drop.append_child(&el)?;
    }
    let tray = dom::cleared("draggable-area")?;
    for shape in game.board().pieces() {
        let el = piece(doc, "draggable-item", shape.key())?;
        let img = image(doc, &shape.image(), shape.key())?;
        el.append_child(&img)?;
        tray.append_child(&el)?;
    }
    Ok(())
}

fn render_puzzle(doc: &Document, game: &NumberPuzzle) -> AppResult<()> {
    let drop = dom::cleared("puzzle-drop")?;
    for (i, s) in game.board().slots().iter().enumerate() {
        let el = slot(doc, "puzzle-slot", i, s.filled)?;
        el.set_text_content(Some(&s.target.to_string()));
        drop.append_child(&el)?;
    }
    let tray = dom::cleared("puzzle-drag")?;
    for n in game.board().pieces() {
        let label = n.to_string();
        let el = piece(doc, "puzzle-piece", &label)?;
        el.set_text_content(Some(&label));
        tray.append_child(&el)?;
    }
    Ok(())
}

fn render_habitat(doc: &Document, game: &HabitatGame) -> AppResult<()> {
    let drop = dom::cleared("habitat-drop")?;
    for (i, (s, pair)) in game.board().slots().iter().zip(game.round()).enumerate() {
        let el = slot(doc, "habitat-slot", i, s.filled)?;
        let icon = if s.filled { pair.animal } else { pair.habitat };
        el.set_text_content(Some(icon));
        drop.append_child(&el)?;
    }
    let tray = dom::cleared("habitat-drag")?;
    for key in game.board().pieces() {
        let Some(pair) = habitat::pair(key) else {
            continue;
        };
        let el = piece(doc, "habitat-item", pair.key)?;
        el.set_text_content(Some(pair.animal));
        tray.append_child(&el)?;
    }
    Ok(())
}

fn fruit_node(doc: &Document, fruit: &Fruit) -> AppResult<HtmlElement> {
    let el = dom::create(doc, "div", "fruit")?;
    el.set_attribute("data-fruit", &fruit.id.to_string())?;
    el.set_text_content(Some(fruit.emoji));
    let style = el.style();
    style.set_property("background-color", fruit.color)?;
    style.set_property("left", &format!("{}px", fruit.x))?;
    style.set_property("top", &format!("{}px", fruit.y))?;
    Ok(el)
}

fn find_fruit(doc: &Document, id: u32) -> AppResult<Option<HtmlElement>> {
    let found = doc.query_selector(&format!("#{FRUIT_AREA} [data-fruit=\"{id}\"]"))?;
    Ok(found.and_then(|el| el.dyn_into::<HtmlElement>().ok()))
}

fn set_score(score: u32) -> AppResult<()> {
    let board = dom::element(FRUIT_SCORE)?;
    board.set_text_content(Some(&format!("Score: {score}")));
    Ok(())
}

fn render_fruit(doc: &Document, game: &FruitCatch) -> AppResult<()> {
    let area = dom::cleared(FRUIT_AREA)?;
    for fruit in game.fruits() {
        let node = fruit_node(doc, fruit)?;
        area.append_child(&node)?;
    }
    set_score(game.score())?;
    dom::set_display_by_id(FRUIT_SCORE, "block")
}

/// Move live fruit and add or drop nodes for this frame's spawns and misses.
fn sync_fruit(game: &FruitCatch, spawned: &[u32], missed: &[u32]) -> AppResult<()> {
    let doc = dom::document()?;
    for id in missed {
        if let Some(el) = find_fruit(&doc, *id)? {
            el.remove();
        }
    }
    let area = dom::element(FRUIT_AREA)?;
    for fruit in game.fruits() {
        if spawned.contains(&fruit.id) {
            let node = fruit_node(&doc, fruit)?;
            area.append_child(&node)?;
        } else if let Some(el) = find_fruit(&doc, fruit.id)? {
            el.style().set_property("top", &format!("{}px", fruit.y))?;
        }
    }
    Ok(())
}

/// Frame hook: apply every timer that came due.
pub fn tick(app: &mut AppState, now: f64) {
    let redraw = match &mut app.session {
        Some(GameSession::Memory(g)) => g.advance(now),
        Some(GameSession::Habitat(g)) => g.advance(now, &mut app.rng),
        Some(GameSession::Fruit(g)) => {
            let frame = g.advance(now, &mut app.rng);
            dom::report(sync_fruit(g, &frame.spawned, &frame.missed));
            false
        }
        _ => false,
    };
    if redraw {
        dom::report(render(app));
    }
}

fn tap_card(app: &mut AppState, index: usize) -> AppResult<()> {
    let Some(GameSession::Memory(g)) = &mut app.session else {
        return Ok(());
    };
    let outcome = g.tap(index, dom::now());
    log::debug!("memory tap {index}: {outcome:?}");
    render(app)
}

fn tap_fruit(app: &mut AppState, id: u32) -> AppResult<()> {
    let Some(GameSession::Fruit(g)) = &mut app.session else {
        return Ok(());
    };
    let score = match g.tap(id) {
        CatchOutcome::Ignored => return Ok(()),
        CatchOutcome::Caught { score } => score,
        CatchOutcome::Won { score } => {
            dom::set_display_by_id(view(GameKind::Fruit).success, "block")?;
            score
        }
    };
    if let Some(el) = find_fruit(&dom::document()?, id)? {
        el.remove();
    }
    set_score(score)
}

fn drop_on_slot(app: &mut AppState, key: &str, slot: usize) -> AppResult<()> {
    let outcome = match &mut app.session {
        Some(GameSession::Sort(g)) => match Shape::from_key(key) {
            Some(shape) => g.drop_shape(shape, slot),
            None => DropOutcome::Rejected,
        },
        Some(GameSession::Puzzle(g)) => match key.parse::<u8>() {
            Ok(n) => g.drop_number(n, slot),
            Err(_) => DropOutcome::Rejected,
        },
        Some(GameSession::Habitat(g)) => g.drop_animal(key, slot, dom::now()),
        _ => return Ok(()),
    };
    match outcome {
        DropOutcome::Rejected => Ok(()),
        DropOutcome::Placed | DropOutcome::Completed => render(app),
    }
}

fn on_drop(evt: &DragEvent) -> AppResult<()> {
    evt.prevent_default();
    let Some((_, slot)) = dom::closest_data(evt.target(), "slot") else {
        return Ok(());
    };
    let Ok(slot) = slot.parse::<usize>() else {
        return Ok(());
    };
    let Some(transfer) = evt.data_transfer() else {
        return Ok(());
    };
    let key = transfer.get_data("text/plain")?;
    with_app(|app| drop_on_slot(app, &key, slot)).unwrap_or(Ok(()))
}

pub fn wire() -> AppResult<()> {
    dom::on_id("game-menu", "click", |evt: MouseEvent| {
        let Some((_, key)) = dom::closest_data(evt.target(), "game") else {
            return;
        };
        let Some(kind) = GameKind::from_key(&key) else {
            log::warn!("{}", AppError::UnknownGame(key));
            return;
        };
        dom::report(with_app(|app| choose_game(app, kind)).unwrap_or(Ok(())));
    })?;
    dom::on_id("game-back-btn", "click", |_: MouseEvent| {
        dom::report(with_app(show_menu).unwrap_or(Ok(())));
    })?;
    for v in &VIEWS {
        let kind = v.kind;
        dom::on_id(v.reset, "click", move |_: MouseEvent| {
            dom::report(with_app(|app| restart(app, kind)).unwrap_or(Ok(())));
        })?;
    }

    dom::on_id("memory-board", "click", |evt: MouseEvent| {
        let Some((_, index)) = dom::closest_data(evt.target(), "card") else {
            return;
        };
        if let Ok(index) = index.parse::<usize>() {
            dom::report(with_app(|app| tap_card(app, index)).unwrap_or(Ok(())));
        }
    })?;
    dom::on_id(FRUIT_AREA, "pointerdown", |evt: PointerEvent| {
        let Some((_, id)) = dom::closest_data(evt.target(), "fruit") else {
            return;
        };
        if let Ok(id) = id.parse::<u32>() {
            dom::report(with_app(|app| tap_fruit(app, id)).unwrap_or(Ok(())));
        }
    })?;

    for tray in ["draggable-area", "puzzle-drag", "habitat-drag"] {
        dom::on_id(tray, "dragstart", |evt: DragEvent| {
            let Some((_, key)) = dom::closest_data(evt.target(), "key") else {
                return;
            };
            if let Some(transfer) = evt.data_transfer() {
                dom::report(transfer.set_data("text/plain", &key).map_err(AppError::from));
            }
        })?;
    }
    for area in ["drop-area", "puzzle-drop", "habitat-drop"] {
        dom::on_id(area, "dragover", |evt: DragEvent| evt.prevent_default())?;
        dom::on_id(area, "drop", |evt: DragEvent| dom::report(on_drop(&evt)))?;
    }
    Ok(())
}
