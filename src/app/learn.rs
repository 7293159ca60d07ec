//! Learn section: pack cards and the item viewer.

use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlImageElement, MouseEvent, PointerEvent, TouchEvent};

use super::{AppState, dom, with_app};
use crate::audio::Narration;
use crate::canvas::Point;
use crate::catalog::{PackId, PackPreview};
use crate::error::{AppError, AppResult};
use crate::viewer::{Presentation, Swipe, ViewerState};

const PLACEHOLDER_BACKGROUND: &str = "linear-gradient(135deg,#ffeef7,#eafafc)";

pub fn build_pack_cards() -> AppResult<()> {
    let doc = dom::document()?;
    let selector = dom::cleared("pack-selector")?;
    for pack in PackId::ALL {
        let card = dom::create(&doc, "div", "pack-card")?;
        card.set_attribute("data-pack", pack.name())?;

        let preview = dom::create(&doc, "div", "pack-preview")?;
        match pack.preview() {
            PackPreview::Image(src) => {
                let img: HtmlImageElement = dom::create(&doc, "img", "")?.unchecked_into();
                img.set_src(src);
                img.set_alt(&format!("{} preview", pack.name()));
                preview.append_child(&img)?;
            }
            PackPreview::Swatch(hex) => {
                preview.style().set_property("background-color", hex)?;
            }
            PackPreview::Placeholder => {
                preview.style().set_property("background", PLACEHOLDER_BACKGROUND)?;
            }
        }
        card.append_child(&preview)?;

        let label = dom::create(&doc, "div", "pack-label")?;
        label.set_text_content(Some(pack.name()));
        card.append_child(&label)?;
        selector.append_child(&card)?;
    }
    Ok(())
}

pub fn show_pack_list() -> AppResult<()> {
    dom::set_display_by_id("pack-selector", "")?;
    set_subtitle_display("")
}

fn set_subtitle_display(value: &str) -> AppResult<()> {
    if let Some(el) = dom::document()?.query_selector("#learn-section .subtitle")? {
        if let Ok(el) = el.dyn_into::<HtmlElement>() {
            dom::set_display(&el, value);
        }
    }
    Ok(())
}

fn enter_pack(app: &mut AppState, pack: PackId) -> AppResult<()> {
    app.viewer = Some(ViewerState::enter(pack));
    dom::set_display_by_id("pack-selector", "none")?;
    set_subtitle_display("none")?;
    dom::set_hidden("viewer", false)?;
    render_item(app)
}

/// Close the viewer, if open, and silence anything still playing.
pub fn exit_pack(app: &mut AppState) -> AppResult<()> {
    if app.viewer.take().is_none() {
        return Ok(());
    }
    app.sounds.pause_all();
    app.swipe_start = None;
    dom::set_hidden("viewer", true)?;
    show_pack_list()
}

fn render_item(app: &mut AppState) -> AppResult<()> {
    let Some(viewer) = app.viewer else {
        return Ok(());
    };
    app.sounds.pause_all();

    let doc = dom::document()?;
    let container = dom::cleared("viewer-content")?;
    let wrapper = dom::create(&doc, "div", "item-view")?;
    match viewer.presentation() {
        Presentation::ColorTile {
            hex,
            text_color,
            label,
        } => {
            wrapper.class_list().add_1("colour-view")?;
            let style = wrapper.style();
            style.set_property("background-color", hex)?;
            style.set_property("color", text_color)?;
            let name = dom::create(&doc, "span", "colour-name")?;
            name.set_text_content(Some(label));
            wrapper.append_child(&name)?;
        }
        Presentation::Picture { src, label } => {
            let img: HtmlImageElement = dom::create(&doc, "img", "item-image")?.unchecked_into();
            img.set_src(src);
            img.set_alt(label);
            wrapper.append_child(&img)?;
            let name = large_label(&doc, label)?;
            wrapper.append_child(&name)?;
        }
        Presentation::LargeText { text, label } => {
            let big = dom::create(&doc, "div", "text-large")?;
            big.set_text_content(Some(&text));
            wrapper.append_child(&big)?;
            let name = large_label(&doc, label)?;
            wrapper.append_child(&name)?;
        }
    }
    container.append_child(&wrapper)?;
    Ok(())
}

fn large_label(doc: &web_sys::Document, text: &str) -> AppResult<HtmlElement> {
    let label = dom::create(doc, "div", "label-large")?;
    label.set_text_content(Some(text));
    Ok(label)
}

fn step(app: &mut AppState, swipe: Swipe) -> AppResult<()> {
    let Some(viewer) = app.viewer.as_mut() else {
        return Ok(());
    };
    viewer.swipe(swipe);
    render_item(app)
}

fn narrate_current(app: &mut AppState) {
    let Some(viewer) = app.viewer else {
        return;
    };
    let narration = Narration::for_item(viewer.pack(), viewer.item());
    app.sounds.narrate(&narration);
}

fn touch_point(evt: &TouchEvent) -> Option<Point> {
    let touch = evt.changed_touches().get(0)?;
    Some(Point::new(touch.client_x() as f64, touch.client_y() as f64))
}

pub fn wire() -> AppResult<()> {
    dom::on_id("pack-selector", "click", |evt: MouseEvent| {
        let Some((_, name)) = dom::closest_data(evt.target(), "pack") else {
            return;
        };
        let Some(pack) = PackId::from_name(&name) else {
            log::warn!("{}", AppError::UnknownPack(name));
            return;
        };
        dom::report(with_app(|app| enter_pack(app, pack)).unwrap_or(Ok(())));
    })?;

    dom::on_id("prev-btn", "click", |_: MouseEvent| {
        dom::report(with_app(|app| step(app, Swipe::Previous)).unwrap_or(Ok(())));
    })?;
    dom::on_id("next-btn", "click", |_: MouseEvent| {
        dom::report(with_app(|app| step(app, Swipe::Next)).unwrap_or(Ok(())));
    })?;
    dom::on_id("exit-btn", "click", |_: MouseEvent| {
        dom::report(with_app(exit_pack).unwrap_or(Ok(())));
    })?;

    // The item view is rebuilt on every step, so taps are caught on its container.
    dom::on_id("viewer-content", "pointerdown", |evt: PointerEvent| {
        if dom::closest(evt.target(), ".item-view").is_some() {
            with_app(narrate_current);
        }
    })?;
    dom::on_id("viewer-content", "touchstart", |evt: TouchEvent| {
        let start = touch_point(&evt);
        with_app(|app| app.swipe_start = start);
    })?;
    dom::on_id("viewer-content", "touchend", |evt: TouchEvent| {
        let end = touch_point(&evt);
        dom::report(
            with_app(|app| {
                let (Some(start), Some(end)) = (app.swipe_start.take(), end) else {
                    return Ok(());
                };
                match Swipe::from_delta(end.x - start.x, end.y - start.y) {
                    Some(swipe) => step(app, swipe),
                    None => Ok(()),
                }
            })
            .unwrap_or(Ok(())),
        );
    })
}
