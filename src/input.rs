use crate::config::Settings;
use crate::player::Player;
use glam::{DVec2, Vec2, Vec3};
use winit::event::MouseScrollDelta;
use winit::keyboard::KeyCode;

// Pixel-Scroll (Touchpad) auf "Zeilen" umrechnen
const PIXELS_PER_LINE: f64 = 20.0;

/// Eingabe-Schnappschuss, einmal pro Frame aus den Fenster-Events gebaut.
#[derive(Debug, Default, Clone, Copy)]
pub struct InputState {
    // --- Held keys (bleiben true solange gedrückt) ---
    pub move_fwd: bool,
    pub move_back: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub sprint: bool,
    pub ascend: bool,

    /// Virtuelle Cursorposition (Summe aller Mausbewegungen), None bis zum ersten Event.
    pub cursor: Option<DVec2>,

    // --- One-shot (werden nach dem Frame zurückgesetzt) ---
    pub scroll: f32,
    pub quit: bool,
}

impl InputState {
    pub fn handle_key(&mut self, key: KeyCode, down: bool) {
        match key {
            KeyCode::KeyW => self.move_fwd = down,
            KeyCode::KeyS => self.move_back = down,
            KeyCode::KeyA => self.move_left = down,
            KeyCode::KeyD => self.move_right = down,
            KeyCode::ShiftLeft => self.sprint = down,
            KeyCode::Space => self.ascend = down,
            KeyCode::Escape if down => self.quit = true,
            _ => {}
        }
    }

    pub fn add_mouse_motion(&mut self, dx: f64, dy: f64) {
        let pos = self.cursor.unwrap_or(DVec2::ZERO);
        self.cursor = Some(pos + DVec2::new(dx, dy));
    }

    pub fn add_scroll(&mut self, delta: MouseScrollDelta) {
        self.scroll += match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(p) => (p.y / PIXELS_PER_LINE) as f32,
        };
    }

    /// Nach jedem Frame aufrufen: setzt nur One-shot Aktionen zurück.
    pub fn clear_one_shots(&mut self) {
        self.scroll = 0.0;
        self.quit = false;
    }
}

/// Ergebnis eines Samples, wird von `Game` auf den Spieler übertragen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intent {
    /// Schon mit dt skaliert, y immer 0
    pub displacement: Vec3,
    /// Some(v): vertikale Geschwindigkeit wird auf v gesetzt
    pub vertical: Option<f32>,
    pub quit: bool,
}

pub struct InputSampler {
    last_cursor: Option<DVec2>,
    sensitivity: f32,
    move_speed: f32,
    sprint_factor: f32,
    ascend_velocity: f32,
}

impl InputSampler {
    pub fn new(settings: &Settings) -> Self {
        Self {
            last_cursor: None,
            sensitivity: settings.mouse_sensitivity,
            move_speed: settings.move_speed,
            sprint_factor: settings.sprint_factor,
            ascend_velocity: settings.ascend_velocity,
        }
    }

    /// Blick und Zoom direkt am Spieler anwenden, danach Bewegung relativ zur neuen Blickrichtung.
    pub fn sample(&mut self, input: &InputState, dt: f32, player: &mut Player) -> Intent {
        let look = self.look_delta(input.cursor);
        player.add_look(look.x, look.y);
        player.add_zoom(input.scroll);

        Intent {
            displacement: self.displacement(input, player.forward, dt),
            vertical: input.ascend.then_some(self.ascend_velocity),
            quit: input.quit,
        }
    }

    /// (yaw, pitch) in Grad seit dem letzten Sample.
    pub fn look_delta(&mut self, cursor: Option<DVec2>) -> Vec2 {
        let Some(pos) = cursor else {
            return Vec2::ZERO;
        };
        // erstes Sample: nur merken, sonst springt die Kamera
        let Some(last) = self.last_cursor.replace(pos) else {
            return Vec2::ZERO;
        };

        // Bildschirm-y wächst nach unten
        let dx = (pos.x - last.x) as f32;
        let dy = (last.y - pos.y) as f32;
        Vec2::new(dx, dy) * self.sensitivity
    }

    pub fn displacement(&self, input: &InputState, forward: Vec3, dt: f32) -> Vec3 {
        // world_up × forward, bei Blick nach -Z ist das -X (links)
        let side = Vec3::Y.cross(forward).normalize_or_zero();

        let mut dir = Vec3::ZERO;
        if input.move_fwd {
            dir += forward;
        } else if input.move_back {
            dir -= forward;
        }
        if input.move_left {
            dir += side;
        }
        if input.move_right {
            dir -= side;
        }

        let speed = if input.sprint {
            self.move_speed * self.sprint_factor
        } else {
            self.move_speed
        };

        let mut step = dir.normalize_or_zero() * speed * dt;
        step.y = 0.0;
        step
    }
}
