//! Frameless window chrome demo.
//!
//! Opens one window, strips its native frame and lets `chromeless`
//! re-create the chrome behavior:
//!
//! - Drag the top strip to move the window
//! - Drag any edge or corner to resize, with native resize cursors
//! - Double-click the strip to toggle maximize
//! - The top-right corner of the strip is carved out for a faux caption
//!   button; clicks there reach the application instead of starting a drag
//!
//! Run with: cargo run -p chromeless --example frameless
//!
//! Press keys to test:
//!   N: Toggle between the stripped and the native frame
//!   Escape: Quit

use std::sync::Arc;

use chromeless::{handle_window_event, ChromeConfig, ChromeRegistry, Point, Rect, BASE_DPI};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

/// Title bar strip height, logical pixels.
const TITLE_BAR_HEIGHT: i32 = 40;
/// Faux caption button carved out of the strip, logical pixels.
const CAPTION_BUTTON: Rect = Rect::new(752, 0, 48, TITLE_BAR_HEIGHT);

/// Application state
struct App {
    registry: ChromeRegistry,
    window: Option<Arc<Window>>,
    /// Last cursor position in physical pixels.
    cursor: Point,
}

impl App {
    fn new() -> Self {
        Self {
            registry: ChromeRegistry::new(),
            window: None,
            cursor: Point::ZERO,
        }
    }

    fn chrome_config() -> ChromeConfig {
        ChromeConfig::new()
            .with_title_bar_height(TITLE_BAR_HEIGHT)
            .with_exempt_region(CAPTION_BUTTON)
    }

    /// Flip the window between managed (frameless) and native framing.
    fn toggle_native(&mut self) {
        let Some(window) = &self.window else {
            return;
        };
        let id = window.id();
        if self.registry.contains(id) {
            self.registry.unmanage(id);
            println!("Native frame restored");
        } else {
            match self.registry.manage_with(Arc::clone(window), Self::chrome_config()) {
                Ok(_) => println!("Frame stripped"),
                Err(error) => eprintln!("Failed to manage window: {error}"),
            }
        }
    }

    /// Whether the cursor sits inside the caption button carve-out.
    fn over_caption_button(&self) -> bool {
        let Some(managed) = self
            .window
            .as_ref()
            .and_then(|window| self.registry.get(window.id()))
        else {
            return false;
        };
        let dpi = (managed.window().scale_factor() * f64::from(BASE_DPI)).round() as u32;
        managed.config().is_exempt(self.cursor, dpi)
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("chromeless frameless demo")
            .with_inner_size(LogicalSize::new(800, 600));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .expect("Failed to create window"),
        );

        self.registry
            .manage_with(Arc::clone(&window), Self::chrome_config())
            .expect("Failed to manage window");
        self.window = Some(window);

        println!("\n=== Frameless Chrome Demo ===");
        println!("Drag the top strip to move the window.");
        println!("Drag any edge or corner to resize.");
        println!("Double-click the strip to toggle maximize.");
        println!("Click the top-right corner of the strip (caption button");
        println!("carve-out) and watch the console.");
        println!();
        println!("  N: Toggle native frame");
        println!("  Escape: Quit");
        println!("=============================\n");
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        // The chrome sees every event first; consumed events were a drag,
        // a resize or a double click on the strip.
        if handle_window_event(&self.registry, window_id, &event) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                self.registry.unmanage_all();
                event_loop.exit();
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Point::new(position.x as i32, position.y as i32);
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                if self.over_caption_button() {
                    println!("Caption button clicked");
                }
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                match event.logical_key {
                    Key::Named(NamedKey::Escape) => {
                        self.registry.unmanage_all();
                        event_loop.exit();
                    }
                    Key::Character(ref c) if c == "n" || c == "N" => self.toggle_native(),
                    _ => {}
                }
            }
            _ => {}
        }
    }
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("Chromeless Frameless Demo");
    println!("=========================");

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    let mut app = App::new();

    event_loop.run_app(&mut app).expect("Event loop error");
}
