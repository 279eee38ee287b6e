//! Shell: winit event loop, softbuffer surface, event translation.
//!
//! The core tree never touches the platform directly. Everything it sees
//! is an [`Event`], dispatched one at a time on this thread; the tick
//! thread is the only other producer and it goes through the event-loop
//! proxy, so dispatch order is arrival order.

use std::num::NonZeroU32;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{anyhow, Context as _, Result};
use clap::Parser;
use softbuffer::{Context, Surface};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy};
use winit::window::{Window, WindowId};

use muntin::cli::CliArgs;
use muntin::config::Style;
use muntin::event::Event;
use muntin::geom::Point;
use muntin::input;
use muntin::render::{FontGlyphs, Frame, GlyphSource};
use muntin::sched::Ticker;
use muntin::ui::Win;

struct App {
    style: Rc<Style>,
    paths: Vec<PathBuf>,
    proxy: EventLoopProxy<Event>,
    window: Option<Rc<Window>>,
    context: Option<Context<Rc<Window>>>,
    surface: Option<Surface<Rc<Window>, Rc<Window>>>,
    glyphs: Option<FontGlyphs>,
    win: Option<Win>,
    ticker: Option<Ticker>,
    /// Persistent back buffer; grows by doubling, never shrinks.
    back: Vec<u32>,
    size: Point,
    dirty: bool,
    mods: [bool; 4],
    cursor: Point,
}

impl App {
    fn new(style: Rc<Style>, paths: Vec<PathBuf>, proxy: EventLoopProxy<Event>) -> Self {
        Self {
            style,
            paths,
            proxy,
            window: None,
            context: None,
            surface: None,
            glyphs: None,
            win: None,
            ticker: None,
            back: Vec::new(),
            size: Point::ZERO,
            dirty: true,
            mods: [false; 4],
            cursor: Point::ZERO,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title("muntin")
            .with_inner_size(LogicalSize::new(1024, 768));
        let window =
            Rc::new(event_loop.create_window(attrs).context("failed to create window")?);
        let context = Context::new(Rc::clone(&window))
            .map_err(|e| anyhow!("failed to create draw context: {e}"))?;
        let surface = Surface::new(&context, Rc::clone(&window))
            .map_err(|e| anyhow!("failed to create surface: {e}"))?;

        let scale = window.scale_factor() as f32;
        let glyphs = FontGlyphs::new(&self.style, scale)?;
        let mut win = Win::new(Rc::clone(&self.style), glyphs.metrics(), scale);
        let inner = window.inner_size();
        self.size = Point::new(inner.width as i32, inner.height as i32);
        win.resize(self.size);

        for path in &self.paths {
            match std::fs::read_to_string(path) {
                Ok(contents) => {
                    let tag = format!("{} | Del", path.display());
                    win.add_sheet(&tag, &contents);
                }
                Err(e) => tracing::warn!(path = %path.display(), "could not open: {e}"),
            }
        }
        if self.paths.is_empty() {
            let tag = self.style.sheet_tag_text.clone();
            win.add_sheet(&tag, "");
        }

        tracing::info!(scale, x = self.size.x, y = self.size.y, "window created");
        self.ticker = Some(Ticker::spawn(self.proxy.clone()));
        self.window = Some(window);
        self.context = Some(context);
        self.surface = Some(surface);
        self.glyphs = Some(glyphs);
        self.win = Some(win);
        self.dirty = true;
        Ok(())
    }

    /// Feed one serialized event to the core; request a repaint when the
    /// tree reports it needs one.
    fn dispatch(&mut self, event: Event, event_loop: &ActiveEventLoop) {
        let Some(win) = self.win.as_mut() else { return };
        let needs_redraw = match event {
            Event::Resize { size, dpi } => {
                if size == Point::ZERO {
                    // zero-area surface: the platform is tearing us down
                    self.shutdown(event_loop);
                    return;
                }
                self.size = size;
                win.set_scale(dpi);
                win.resize(size);
                self.dirty = true;
                true
            }
            Event::Focus(focused) => {
                win.focus(focused);
                false
            }
            Event::Move(pt) => win.pointer_move(pt),
            Event::Click { pos, button } => win.click(pos, button),
            Event::Wheel { pos, x, y } => win.wheel(pos, x, y),
            Event::Dir { x, y } => win.dir(x, y),
            Event::Mod(m) => win.modifier(m),
            Event::Rune(r) => win.rune(r),
            Event::Tick => win.tick(),
            Event::Shutdown => {
                self.shutdown(event_loop);
                return;
            }
        };
        if needs_redraw {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(ticker) = self.ticker.as_mut() {
            ticker.stop();
        }
        // surface, buffer and window are released by drop when the loop
        // unwinds
        event_loop.exit();
    }

    fn paint(&mut self) {
        let (Some(surface), Some(glyphs), Some(win)) =
            (self.surface.as_mut(), self.glyphs.as_mut(), self.win.as_mut())
        else {
            return;
        };
        let (w, h) = (self.size.x.max(1) as u32, self.size.y.max(1) as u32);
        let px = (w * h) as usize;
        if self.back.len() < px {
            self.back = vec![0; px * 2];
        }
        let (Some(nw), Some(nh)) = (NonZeroU32::new(w), NonZeroU32::new(h)) else { return };
        if let Err(e) = surface.resize(nw, nh) {
            tracing::error!("surface resize failed: {e}");
            return;
        }
        {
            let mut frame =
                Frame::new(&mut self.back[..px], Point::new(w as i32, h as i32), glyphs);
            win.draw(self.dirty, &mut frame);
        }
        self.dirty = false;
        match surface.buffer_mut() {
            Ok(mut buffer) => {
                buffer.copy_from_slice(&self.back[..px]);
                if let Err(e) = buffer.present() {
                    tracing::error!("present failed: {e}");
                }
            }
            Err(e) => tracing::error!("surface buffer unavailable: {e}"),
        }
    }
}

impl ApplicationHandler<Event> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            // no sensible partial-UI state exists; halt startup
            tracing::error!("startup failed: {e:#}");
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.clone() else { return };
        if window.id() != window_id {
            return;
        }
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                self.dispatch(Event::Shutdown, event_loop);
            }
            WindowEvent::Focused(focused) => {
                self.dispatch(Event::Focus(focused), event_loop);
            }
            WindowEvent::Resized(size) => {
                let dpi = window.scale_factor() as f32;
                let size = Point::new(size.width as i32, size.height as i32);
                self.dispatch(Event::Resize { size, dpi }, event_loop);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                let inner = window.inner_size();
                let size = Point::new(inner.width as i32, inner.height as i32);
                self.dispatch(Event::Resize { size, dpi: scale_factor as f32 }, event_loop);
            }
            WindowEvent::RedrawRequested => self.paint(),
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Point::new(position.x as i32, position.y as i32);
                self.dispatch(Event::Move(self.cursor), event_loop);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(ev) = input::click_event(self.cursor, button, state) {
                    self.dispatch(ev, event_loop);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lh = self.glyphs.as_ref().map_or(16, |g| g.metrics().line_height);
                if let Some(ev) = input::wheel_event(self.cursor, delta, lh) {
                    self.dispatch(ev, event_loop);
                }
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                let new = input::modifier_flags(modifiers.state());
                let edge = input::modifier_edge(self.mods, new);
                self.mods = new;
                if let Some(m) = edge {
                    self.dispatch(Event::Mod(m), event_loop);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                // only presses reach the tree; key-repeat presses do
                if event.state != ElementState::Pressed {
                    return;
                }
                if let Some((x, y)) = input::dir_for_key(&event.logical_key) {
                    self.dispatch(Event::Dir { x, y }, event_loop);
                } else if let Some(r) = input::rune_for_key(&event.logical_key) {
                    self.dispatch(Event::Rune(r), event_loop);
                }
            }
            _ => {}
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: Event) {
        self.dispatch(event, event_loop);
    }
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    muntin::tracing::init();
    let style = Rc::new(Style::load(args.style.as_deref())?);

    let event_loop = EventLoop::<Event>::with_user_event()
        .build()
        .context("failed to create event loop")?;
    let proxy = event_loop.create_proxy();
    let mut app = App::new(style, args.paths, proxy);
    event_loop.run_app(&mut app).context("event loop failed")?;
    Ok(())
}
