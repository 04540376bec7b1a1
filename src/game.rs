use crate::camera::{Camera, block_transform};
use crate::collision::resolve;
use crate::config::Settings;
use crate::error::RenderError;
use crate::input::{InputSampler, InputState};
use crate::physics::integrate;
use crate::player::Player;
use crate::render::{CubeRenderer, TextureId};
use crate::world::World;
use log::{debug, info};
use std::time::{Duration, Instant};

// Längere Hänger (Debugger, Fenster verschoben) nicht als einen Riesenschritt rechnen
const MAX_FRAME_DT: Duration = Duration::from_millis(250);
// Debug-Ausgabe alle N Frames
const LOG_EVERY: u64 = 60;

/// Misst die Zeit zwischen zwei Frames.
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    pub fn new(now: Instant) -> Self {
        Self { last: now }
    }

    /// Sekunden seit dem letzten Aufruf.
    pub fn tick(&mut self, now: Instant) -> f32 {
        let dt = now.saturating_duration_since(self.last).min(MAX_FRAME_DT);
        self.last = now;
        dt.as_secs_f32()
    }
}

/// Gesamter Spielzustand; gehört dem Event-Loop-Thread.
pub struct Game {
    frame: u64,
    settings: Settings,
    world: World,
    player: Player,
    sampler: InputSampler,
    camera: Camera,
    viewport: (u32, u32),
    quit_requested: bool,
}

impl Game {
    pub fn new(settings: Settings) -> Self {
        Self::with_world(settings, World::new())
    }

    pub fn with_world(settings: Settings, world: World) -> Self {
        info!(
            "world: {} blocks, collision {:?}, projection {:?}",
            world.len(),
            settings.collision,
            settings.projection
        );
        let player = Player::new(&settings);
        info!(
            "player at {:?}, hitbox {}x{}x{}",
            player.position, player.width, player.height, player.depth
        );
        Self {
            frame: 0,
            player,
            sampler: InputSampler::new(&settings),
            camera: Camera::new(&settings),
            viewport: (settings.window_width, settings.window_height),
            world,
            settings,
            quit_requested: false,
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }

    /// Ein Simulationsschritt: Eingabe → Kamera → Integration → Kollision.
    pub fn update(&mut self, input: &InputState, dt: f32) {
        self.frame += 1;

        // Blick/Zoom werden im Sampler direkt auf den Spieler angewendet
        let intent = self.sampler.sample(input, dt, &mut self.player);
        if intent.quit {
            // greift erst beim nächsten Durchlauf
            self.quit_requested = true;
        }

        self.player.horizontal_displacement = intent.displacement;
        if let Some(vy) = intent.vertical {
            self.player.vertical_velocity = vy;
        }

        let predicted = integrate(&mut self.player, self.settings.gravity, dt);
        resolve(
            &mut self.player,
            predicted,
            self.world.blocks(),
            self.settings.collision,
        );

        if self.frame % LOG_EVERY == 0 {
            let p = self.player();
            debug!(
                "POS x={:.2} y={:.2} z={:.2} vy={:.3} ground={} yaw={:.1} pitch={:.1} zoom={:.1}",
                p.position.x,
                p.position.y,
                p.position.z,
                p.vertical_velocity,
                p.grounded,
                p.yaw,
                p.pitch,
                p.zoom
            );
        }
    }

    /// Jeden Block als Einheitswürfel mit der gemeinsamen Textur zeichnen.
    pub fn draw<R: CubeRenderer>(&self, renderer: &mut R, texture: TextureId) {
        let (width, height) = self.viewport;
        let view_proj = self.camera.view_proj(&self.player, width, height);
        for block in self.world.blocks() {
            renderer.draw_unit_cube(block_transform(view_proj, block), texture);
        }
    }

    /// Kompletter Frame inklusive Präsentation.
    pub fn run_frame<R: CubeRenderer>(
        &mut self,
        input: &InputState,
        dt: f32,
        renderer: &mut R,
        texture: TextureId,
    ) -> Result<(), RenderError> {
        self.update(input, dt);
        self.draw(renderer, texture);
        renderer.present()
    }
}
