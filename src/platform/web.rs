//! Browser host: draws frame snapshots into absolutely positioned `<img>`s
//!
//! Pointer listeners only queue events; the animation-frame callback drains
//! the queue while it holds the simulation, so nothing re-enters the
//! `RefCell` from inside a listener.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, HtmlImageElement, MouseEvent};

use crate::app::FloatingLogos;
use crate::error::FieldError;
use crate::field::asset_path;
use crate::renderer::FrameSnapshot;
use crate::settings::Settings;

/// Pointer input collected between frames
#[derive(Debug, Clone, Copy, PartialEq)]
enum PointerInput {
    Enter(u32),
    Leave(u32),
    Click(u32),
}

type PointerQueue = Rc<RefCell<Vec<PointerInput>>>;

/// Logo filter at rest and under the pointer
const IDLE_FILTER: &str = "saturate(0.3)";
const HOVER_FILTER: &str = "saturate(0.6)";

/// One sprite's element plus the listeners that must live as long as it does
struct SpriteNode {
    img: HtmlImageElement,
    _listeners: Vec<Closure<dyn FnMut(MouseEvent)>>,
}

/// DOM side of the field
struct DomView {
    document: Document,
    layer: HtmlElement,
    particle_layer: HtmlElement,
    sprites: HashMap<u32, SpriteNode>,
    /// Reused particle dots
    dots: Vec<HtmlElement>,
    input: PointerQueue,
}

fn set_styles(el: &HtmlElement, styles: &[(&str, &str)]) {
    let style = el.style();
    for (name, value) in styles {
        let _ = style.set_property(name, value);
    }
}

fn create_html(document: &Document, tag: &str) -> Result<HtmlElement, FieldError> {
    document
        .create_element(tag)
        .map_err(|_| FieldError::Dom(format!("cannot create <{}>", tag)))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| FieldError::Dom(format!("<{}> is not an HtmlElement", tag)))
}

impl DomView {
    fn mount(document: Document) -> Result<Self, FieldError> {
        let body = document
            .body()
            .ok_or_else(|| FieldError::Dom("no body".into()))?;

        let layer = create_html(&document, "div")?;
        set_styles(
            &layer,
            &[
                ("position", "fixed"),
                ("inset", "0"),
                ("pointer-events", "none"),
                ("z-index", "2"),
                ("overflow", "hidden"),
            ],
        );
        let particle_layer = create_html(&document, "div")?;
        set_styles(
            &particle_layer,
            &[
                ("position", "fixed"),
                ("inset", "0"),
                ("pointer-events", "none"),
                ("z-index", "3"),
            ],
        );

        body.append_child(&layer)
            .map_err(|_| FieldError::Dom("cannot attach sprite layer".into()))?;
        body.append_child(&particle_layer)
            .map_err(|_| FieldError::Dom("cannot attach particle layer".into()))?;

        Ok(Self {
            document,
            layer,
            particle_layer,
            sprites: HashMap::new(),
            dots: Vec::new(),
            input: Rc::new(RefCell::new(Vec::new())),
        })
    }

    fn create_sprite(&mut self, id: u32, name: &str) -> Option<HtmlImageElement> {
        let img = self
            .document
            .create_element("img")
            .ok()?
            .dyn_into::<HtmlImageElement>()
            .ok()?;
        img.set_src(&asset_path(name));
        img.set_alt("");
        let _ = img.set_attribute("loading", "lazy");
        set_styles(
            &img,
            &[
                ("position", "absolute"),
                ("left", "0"),
                ("top", "0"),
                ("clip-path", "url(#squircle)"),
                ("filter", IDLE_FILTER),
                ("transition", "filter 0.2s"),
                ("cursor", "pointer"),
                ("will-change", "transform, opacity"),
            ],
        );

        let mut listeners = Vec::new();
        for (event, input) in [
            ("mouseenter", PointerInput::Enter(id)),
            ("mouseleave", PointerInput::Leave(id)),
            ("click", PointerInput::Click(id)),
        ] {
            let queue = self.input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                queue.borrow_mut().push(input);
            });
            let _ = img.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            listeners.push(closure);
        }

        let _ = self.layer.append_child(&img);
        self.sprites.insert(
            id,
            SpriteNode {
                img: img.clone(),
                _listeners: listeners,
            },
        );
        Some(img)
    }

    fn draw(&mut self, snapshot: &FrameSnapshot) {
        // Drop elements for sprites that left the field
        let live: Vec<u32> = snapshot.sprites.iter().map(|s| s.id).collect();
        self.sprites.retain(|id, node| {
            let keep = live.contains(id);
            if !keep {
                node.img.remove();
            }
            keep
        });

        for view in &snapshot.sprites {
            let img = match self.sprites.get(&view.id) {
                Some(node) => node.img.clone(),
                None => match self.create_sprite(view.id, &view.name) {
                    Some(img) => img,
                    None => continue,
                },
            };
            let size = format!("{}px", view.size);
            let transform = format!("translate({}px, {}px) scale({})", view.x, view.y, view.scale);
            let opacity = view.opacity.to_string();
            set_styles(
                &img,
                &[
                    ("width", size.as_str()),
                    ("height", size.as_str()),
                    ("transform", transform.as_str()),
                    ("opacity", opacity.as_str()),
                    ("pointer-events", if view.interactive { "auto" } else { "none" }),
                    ("filter", if view.hovered { HOVER_FILTER } else { IDLE_FILTER }),
                ],
            );
        }

        let mut used = 0;
        for burst in &snapshot.bursts {
            for p in &burst.particles {
                if used == self.dots.len() {
                    let Ok(dot) = create_html(&self.document, "div") else {
                        return;
                    };
                    set_styles(
                        &dot,
                        &[("position", "absolute"), ("left", "0"), ("top", "0"), ("border-radius", "50%")],
                    );
                    let _ = self.particle_layer.append_child(&dot);
                    self.dots.push(dot);
                }
                let dot = &self.dots[used];
                let half = p.size / 2.0;
                let size = format!("{}px", p.size);
                let transform = format!(
                    "translate({}px, {}px) scale({})",
                    p.x - half,
                    p.y - half,
                    p.scale
                );
                let opacity = p.opacity.to_string();
                set_styles(
                    dot,
                    &[
                        ("display", "block"),
                        ("width", size.as_str()),
                        ("height", size.as_str()),
                        ("background", p.color.as_str()),
                        ("transform", transform.as_str()),
                        ("opacity", opacity.as_str()),
                    ],
                );
                used += 1;
            }
        }
        for dot in &self.dots[used..] {
            set_styles(dot, &[("display", "none")]);
        }
    }

    fn unmount(&mut self) {
        for node in self.sprites.values() {
            node.img.remove();
        }
        self.sprites.clear();
        self.layer.remove();
        self.particle_layer.remove();
        self.dots.clear();
    }
}

type WindowCallback = Closure<dyn FnMut(web_sys::Event)>;

/// Window-level listeners; they hold the host weakly and are detached on stop
struct WindowListeners {
    resize: WindowCallback,
    pagehide: WindowCallback,
}

impl WindowListeners {
    fn attach(window: &web_sys::Window, host: &Rc<RefCell<Host>>) -> Self {
        // Resize only rescales on real dimension changes
        let weak = Rc::downgrade(host);
        let resize = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (w, h) = viewport_size(&window);
            with_host(&weak, |host| host.logos.resize(w, h));
        });
        let _ = window.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref());

        // Page going away: cancel timers before the document is disposed
        let weak = Rc::downgrade(host);
        let pagehide = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            with_host(&weak, Host::stop);
        });
        let _ =
            window.add_event_listener_with_callback("pagehide", pagehide.as_ref().unchecked_ref());

        Self { resize, pagehide }
    }

    fn detach(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let _ = window
            .remove_event_listener_with_callback("resize", self.resize.as_ref().unchecked_ref());
        let _ = window
            .remove_event_listener_with_callback("pagehide", self.pagehide.as_ref().unchecked_ref());
    }
}

fn with_host(weak: &Weak<RefCell<Host>>, f: impl FnOnce(&mut Host)) {
    if let Some(host) = weak.upgrade() {
        if let Ok(mut host) = host.try_borrow_mut() {
            f(&mut host);
        }
    }
}

/// Simulation + view for one page
struct Host {
    logos: FloatingLogos,
    view: DomView,
    running: Rc<Cell<bool>>,
    /// Kept alive (not dropped) after detach: `stop` may run inside one of them
    listeners: Option<WindowListeners>,
}

impl Host {
    fn apply_input(&mut self, now: f64) {
        let inputs: Vec<PointerInput> = self.view.input.borrow_mut().drain(..).collect();
        for input in inputs {
            match input {
                PointerInput::Enter(id) => self.logos.set_hovered(Some(id)),
                PointerInput::Leave(id) => {
                    if self.logos.hovered() == Some(id) {
                        self.logos.set_hovered(None);
                    }
                }
                PointerInput::Click(id) => {
                    self.logos.click(id, now);
                }
            }
        }
    }

    fn stop(&mut self) {
        if !self.running.get() {
            return;
        }
        self.running.set(false);
        if let Some(listeners) = &self.listeners {
            listeners.detach();
        }
        self.logos.stop();
        self.view.unmount();
    }
}

fn viewport_size(window: &web_sys::Window) -> (f32, f32) {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (w as f32, h as f32)
}

fn request_animation_frame(host: Rc<RefCell<Host>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::once(move |time: f64| {
        frame_loop(host, time);
    });
    let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    closure.forget();
}

fn frame_loop(host: Rc<RefCell<Host>>, time: f64) {
    let Some(window) = web_sys::window() else {
        return;
    };
    {
        let mut h = host.borrow_mut();
        if !h.running.get() {
            return;
        }
        let (w, ht) = viewport_size(&window);
        // First frame: the rAF clock is the simulation clock from here on
        if h.logos.lifecycle() == crate::app::Lifecycle::Idle {
            h.logos.start(time, w, ht);
        }
        h.apply_input(time);
        let snapshot = h.logos.frame(time, w, ht);
        h.view.draw(&snapshot);
    }
    request_animation_frame(host);
}

/// Handle kept by the page; dropping it does not stop the field, `stop` does
pub struct WebHandle {
    host: Rc<RefCell<Host>>,
}

impl WebHandle {
    pub fn stop(&self) {
        self.host.borrow_mut().stop();
    }
}

/// Mount the field over the page and start animating
pub fn mount(settings: Settings) -> Result<WebHandle, FieldError> {
    let window = web_sys::window().ok_or_else(|| FieldError::Dom("no window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| FieldError::Dom("no document".into()))?;

    let view = DomView::mount(document)?;
    let host = Rc::new(RefCell::new(Host {
        logos: FloatingLogos::new(settings),
        view,
        running: Rc::new(Cell::new(true)),
        listeners: None,
    }));
    let listeners = WindowListeners::attach(&window, &host);
    host.borrow_mut().listeners = Some(listeners);

    request_animation_frame(host.clone());
    log::info!("Floating logos mounted");
    Ok(WebHandle { host })
}
