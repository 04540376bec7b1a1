mod block;
mod camera;
mod collision;
mod config;
mod error;
mod game;
mod gfx;
mod input;
mod logging;
mod mesh;
mod physics;
mod player;
mod render;
mod texture;
mod world;

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use config::Settings;
use game::{FrameClock, Game};
use gfx::Gfx;
use input::InputState;
use log::{error, info, warn};

use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{CursorGrabMode, Window, WindowBuilder};

fn main() {
    logging::init();

    if let Err(e) = run() {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let settings = Settings::default();

    let event_loop = EventLoop::new().context("create event loop")?;

    let inner_size = PhysicalSize::new(settings.window_width, settings.window_height);
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(settings.window_title)
            .with_inner_size(inner_size)
            .build(&event_loop)
            .context("create window")?,
    );
    lock_cursor(&window);

    let mut gfx = pollster::block_on(Gfx::new(window.clone()))?;

    // Nicht fatal: ohne Textur wird mit Einheit 0 weitergezeichnet
    let texture = texture::or_placeholder(gfx.load_texture(Path::new(settings.texture_path)));

    let size = window.inner_size();
    let mut game = Game::new(settings);
    game.set_viewport(size.width, size.height);

    let mut input = InputState::default();
    let mut clock = FrameClock::new(Instant::now());

    info!("entering frame loop");

    event_loop
        .run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Poll);

            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => elwt.exit(),

                    WindowEvent::Resized(size) => {
                        gfx.resize(size);
                        game.set_viewport(size.width, size.height);
                    }

                    WindowEvent::KeyboardInput { event, .. } => {
                        if let PhysicalKey::Code(code) = event.physical_key {
                            input.handle_key(code, event.state == ElementState::Pressed);
                        }
                    }

                    WindowEvent::MouseWheel { delta, .. } => input.add_scroll(delta),

                    _ => {}
                },

                Event::DeviceEvent {
                    event: DeviceEvent::MouseMotion { delta },
                    ..
                } => input.add_mouse_motion(delta.0, delta.1),

                Event::AboutToWait => {
                    // Quit aus dem letzten Frame
                    if game.quit_requested() {
                        info!("quit requested");
                        elwt.exit();
                        return;
                    }

                    let dt = clock.tick(Instant::now());
                    if let Err(e) = game.run_frame(&input, dt, &mut gfx, texture) {
                        error!("{}", e);
                        elwt.exit();
                    }

                    // one-shot inputs zurücksetzen
                    input.clear_one_shots();
                }

                _ => {}
            }
        })
        .context("run event loop")?;

    Ok(())
}

fn lock_cursor(window: &Window) {
    let grabbed = window
        .set_cursor_grab(CursorGrabMode::Locked)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
    if let Err(e) = grabbed {
        warn!("cursor grab not available: {}", e);
    }
    window.set_cursor_visible(false);
}
