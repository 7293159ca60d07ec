//! Color and Draw sections: the coloring-page gallery, palettes and the two
//! freehand canvases.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Event, HtmlCanvasElement, HtmlImageElement, MouseEvent, TouchEvent,
};

use super::{AppState, dom, with_app};
use crate::canvas::{
    self, LINE_CAP, LINE_JOIN, LINE_WIDTH, PAGE_ALPHA, PAGE_FILTER, PinchZoom, Point, Segment,
    Stroke,
};
use crate::catalog::{COLORING_PAGES, PALETTE};
use crate::error::{AppError, AppResult};
use crate::router::Section;

pub const COLOR_CANVAS: &str = "color-canvas";
pub const DRAW_CANVAS: &str = "draw-canvas";

/// Pen and zoom state of one canvas.
#[derive(Debug, Default)]
pub struct Surface {
    stroke: Stroke,
    zoom: PinchZoom,
}

#[derive(Debug, Default)]
pub struct Surfaces {
    color: Surface,
    draw: Surface,
}

impl Surfaces {
    fn get(&mut self, canvas_id: &str) -> &mut Surface {
        if canvas_id == COLOR_CANVAS {
            &mut self.color
        } else {
            &mut self.draw
        }
    }
}

fn canvas_el(id: &str) -> AppResult<HtmlCanvasElement> {
    dom::typed(id, "HtmlCanvasElement")
}

fn context(canvas: &HtmlCanvasElement) -> AppResult<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| AppError::Js("2d context unavailable".into()))?
        .dyn_into()
        .map_err(|_| AppError::WrongElement {
            id: canvas.id(),
            expected: "CanvasRenderingContext2d",
        })
}

fn palette_id(section: Section) -> &'static str {
    match section {
        Section::Draw => "draw-palette",
        _ => "color-palette",
    }
}

/// Rebuild the palette row, resetting the selection to the first swatch.
pub fn build_palette(app: &mut AppState, section: Section) -> AppResult<()> {
    let doc = dom::document()?;
    let row = dom::cleared(palette_id(section))?;
    app.palette.select(0);
    for (i, hex) in PALETTE.iter().enumerate() {
        let swatch = dom::create(&doc, "div", "swatch")?;
        swatch.set_attribute("data-swatch", &i.to_string())?;
        swatch.style().set_property("background-color", hex)?;
        if i == app.palette.selected() {
            swatch.class_list().add_1("selected")?;
        }
        row.append_child(&swatch)?;
    }
    Ok(())
}

fn select_swatch(app: &mut AppState, evt: &MouseEvent) -> AppResult<()> {
    let Some((swatch, index)) = dom::closest_data(evt.target(), "swatch") else {
        return Ok(());
    };
    let Ok(index) = index.parse::<usize>() else {
        return Ok(());
    };
    let color = app.palette.select(index);
    log::debug!("palette color {color}");
    if let Some(row) = swatch.parent_element() {
        let all = row.query_selector_all(".swatch")?;
        for i in 0..all.length() {
            if let Some(el) = all.item(i).and_then(|n| n.dyn_into::<web_sys::Element>().ok()) {
                el.class_list().remove_1("selected")?;
            }
        }
    }
    swatch.class_list().add_1("selected")?;
    Ok(())
}

pub fn build_gallery() -> AppResult<()> {
    let doc = dom::document()?;
    let gallery = dom::cleared("color-gallery")?;
    for page in COLORING_PAGES {
        let thumb = dom::create(&doc, "div", "color-thumb")?;
        let img: HtmlImageElement = dom::create(&doc, "img", "")?.unchecked_into();
        img.set_src(page);
        img.set_alt(page);
        img.set_attribute("data-page", page)?;
        thumb.append_child(&img)?;
        gallery.append_child(&thumb)?;
    }
    gallery.set_hidden(false);
    dom::set_hidden("color-canvas-container", true)
}

fn show_coloring_page(app: &mut AppState, page: &'static str) -> AppResult<()> {
    app.coloring_page = Some(page);
    dom::set_hidden("color-gallery", true)?;
    dom::set_hidden("color-canvas-container", false)?;
    prepare_canvas(COLOR_CANVAS)?;

    let el = canvas_el(COLOR_CANVAS)?;
    let ctx = context(&el)?;
    let img = HtmlImageElement::new()?;
    let loaded = img.clone();
    let onload = Closure::once_into_js(move || {
        let w = el.client_width() as f64;
        let h = el.client_height() as f64;
        ctx.clear_rect(0.0, 0.0, el.width() as f64, el.height() as f64);
        let at = canvas::fit_centered(
            loaded.natural_width() as f64,
            loaded.natural_height() as f64,
            w,
            h,
        );
        ctx.save();
        ctx.set_filter(PAGE_FILTER);
        ctx.set_global_alpha(PAGE_ALPHA);
        if let Err(e) = ctx.draw_image_with_html_image_element_and_dw_and_dh(
            &loaded, at.x, at.y, at.width, at.height,
        ) {
            log::warn!("coloring page draw failed: {e:?}");
        }
        ctx.restore();
    });
    img.set_onload(Some(onload.unchecked_ref()));
    img.set_src(page);
    log::info!("coloring page {page}");
    Ok(())
}

/// Match the backing store to the canvas's on-screen size at the device
/// pixel ratio. A canvas that is not laid out yet is left alone.
pub fn prepare_canvas(id: &str) -> AppResult<()> {
    let el = canvas_el(id)?;
    let css_w = el.client_width() as f64;
    let css_h = el.client_height() as f64;
    if css_w <= 0.0 || css_h <= 0.0 {
        return Ok(());
    }
    let dpr = dom::window()?.device_pixel_ratio();
    let ctx = context(&el)?;
    if let Some((w, h)) = canvas::backing_size(css_w, css_h, dpr, el.width(), el.height()) {
        el.set_width(w);
        el.set_height(h);
        ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
        ctx.scale(dpr, dpr)?;
        log::debug!("{id} backing store {w}x{h}");
    }
    ctx.set_line_cap(LINE_CAP);
    ctx.set_line_join(LINE_JOIN);
    ctx.set_line_width(LINE_WIDTH);
    Ok(())
}

fn clear_canvas(id: &str) -> AppResult<()> {
    let el = canvas_el(id)?;
    context(&el)?.clear_rect(0.0, 0.0, el.width() as f64, el.height() as f64);
    Ok(())
}

fn stroke_segment(id: &str, segment: Segment, color: &str) -> AppResult<()> {
    let ctx = context(&canvas_el(id)?)?;
    ctx.set_stroke_style_str(color);
    ctx.begin_path();
    ctx.move_to(segment.from.x, segment.from.y);
    ctx.line_to(segment.to.x, segment.to.y);
    ctx.stroke();
    Ok(())
}

/// Client coordinates to drawing coordinates, undoing the pinch scale.
fn canvas_point(id: &str, client: Point, zoom: f64) -> AppResult<Point> {
    let rect = canvas_el(id)?.get_bounding_client_rect();
    Ok(canvas::to_canvas_point(client, rect.left(), rect.top(), zoom))
}

/// Every current touch, relative to the canvas's top-left corner.
fn touches(id: &str, evt: &TouchEvent) -> AppResult<Vec<Point>> {
    let rect = canvas_el(id)?.get_bounding_client_rect();
    let list = evt.touches();
    Ok((0..list.length())
        .filter_map(|i| list.get(i))
        .map(|t| Point::new(t.client_x() as f64 - rect.left(), t.client_y() as f64 - rect.top()))
        .collect())
}

fn first_touch(evt: &TouchEvent) -> Option<Point> {
    let t = evt.touches().get(0)?;
    Some(Point::new(t.client_x() as f64, t.client_y() as f64))
}

fn pen_down(app: &mut AppState, id: &str, client: Point) -> AppResult<()> {
    let surface = app.surfaces.get(id);
    let at = canvas_point(id, client, surface.zoom.scale())?;
    surface.stroke.press(at);
    Ok(())
}

fn pen_move(app: &mut AppState, id: &str, client: Point) -> AppResult<()> {
    let color = app.palette.color();
    let surface = app.surfaces.get(id);
    if !surface.stroke.drawing() {
        return Ok(());
    }
    let at = canvas_point(id, client, surface.zoom.scale())?;
    match surface.stroke.drag(at) {
        Some(segment) => stroke_segment(id, segment, color),
        None => Ok(()),
    }
}

fn pen_up(app: &mut AppState, id: &str) {
    app.surfaces.get(id).stroke.release();
}

fn touch_start(app: &mut AppState, id: &str, evt: &TouchEvent) -> AppResult<()> {
    let points = touches(id, evt)?;
    if points.len() >= 2 {
        let surface = app.surfaces.get(id);
        surface.stroke.release();
        surface.zoom.touch_start(&points);
        return Ok(());
    }
    match first_touch(evt) {
        Some(client) => pen_down(app, id, client),
        None => Ok(()),
    }
}

fn touch_move(app: &mut AppState, id: &str, evt: &TouchEvent) -> AppResult<()> {
    if app.surfaces.get(id).zoom.active() {
        let points = touches(id, evt)?;
        if let Some(t) = app.surfaces.get(id).zoom.touch_move(&points) {
            let style = canvas_el(id)?.style();
            style.set_property("transform-origin", &t.css_origin())?;
            style.set_property("transform", &t.css_transform())?;
        }
        return Ok(());
    }
    match first_touch(evt) {
        Some(client) => pen_move(app, id, client),
        None => Ok(()),
    }
}

fn touch_end(app: &mut AppState, id: &str, evt: &TouchEvent) {
    let surface = app.surfaces.get(id);
    surface.zoom.touch_end(evt.touches().length() as usize);
    surface.stroke.release();
}

fn wire_canvas(id: &'static str) -> AppResult<()> {
    let target = canvas_el(id)?;
    let origin = if id == COLOR_CANVAS { "top left" } else { "center center" };
    target.style().set_property("transform-origin", origin)?;

    let client = |evt: &MouseEvent| Point::new(evt.client_x() as f64, evt.client_y() as f64);
    dom::on(&target, "mousedown", move |evt: MouseEvent| {
        let at = client(&evt);
        dom::report(with_app(|app| pen_down(app, id, at)).unwrap_or(Ok(())));
    })?;
    dom::on(&target, "mousemove", move |evt: MouseEvent| {
        let at = client(&evt);
        dom::report(with_app(|app| pen_move(app, id, at)).unwrap_or(Ok(())));
    })?;
    for event in ["mouseup", "mouseleave"] {
        dom::on(&target, event, move |_: MouseEvent| {
            with_app(|app| pen_up(app, id));
        })?;
    }

    dom::on(&target, "touchstart", move |evt: TouchEvent| {
        evt.prevent_default();
        dom::report(with_app(|app| touch_start(app, id, &evt)).unwrap_or(Ok(())));
    })?;
    dom::on(&target, "touchmove", move |evt: TouchEvent| {
        evt.prevent_default();
        dom::report(with_app(|app| touch_move(app, id, &evt)).unwrap_or(Ok(())));
    })?;
    dom::on(&target, "touchend", move |evt: TouchEvent| {
        evt.prevent_default();
        with_app(|app| touch_end(app, id, &evt));
    })
}

pub fn wire() -> AppResult<()> {
    wire_canvas(COLOR_CANVAS)?;
    wire_canvas(DRAW_CANVAS)?;

    for row in ["color-palette", "draw-palette"] {
        dom::on_id(row, "click", |evt: MouseEvent| {
            dom::report(with_app(|app| select_swatch(app, &evt)).unwrap_or(Ok(())));
        })?;
    }

    dom::on_id("color-gallery", "click", |evt: MouseEvent| {
        let Some((_, page)) = dom::closest_data(evt.target(), "page") else {
            return;
        };
        let Some(page) = COLORING_PAGES.iter().copied().find(|p| *p == page) else {
            return;
        };
        dom::report(with_app(|app| show_coloring_page(app, page)).unwrap_or(Ok(())));
    })?;

    dom::on_id("color-back-btn", "click", |_: MouseEvent| {
        let result = with_app(|app| {
            app.coloring_page = None;
            clear_canvas(COLOR_CANVAS)?;
            dom::set_hidden("color-canvas-container", true)?;
            dom::set_hidden("color-gallery", false)
        });
        dom::report(result.unwrap_or(Ok(())));
    })?;
    dom::on_id("color-clear-btn", "click", |_: MouseEvent| {
        let result = with_app(|app| {
            clear_canvas(COLOR_CANVAS)?;
            match app.coloring_page {
                Some(page) => show_coloring_page(app, page),
                None => Ok(()),
            }
        });
        dom::report(result.unwrap_or(Ok(())));
    })?;
    dom::on_id("draw-clear-btn", "click", |_: MouseEvent| {
        dom::report(clear_canvas(DRAW_CANVAS));
    })?;

    let win = dom::window()?;
    dom::on(&win, "resize", |_: Event| {
        for id in [COLOR_CANVAS, DRAW_CANVAS] {
            dom::report(prepare_canvas(id));
        }
    })
}
