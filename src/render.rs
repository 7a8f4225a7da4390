//! Canvas 2D render adapter
//!
//! Reads a `RunState` after the frame step and draws it. Sprites that have
//! not loaded (or failed to) fall back to solid placeholder shapes; asset
//! problems never reach the simulation.

use std::f32::consts::FRAC_PI_2;

use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{CollectibleKind, EnemyKind, RunState};

const PLAYER_SIZE: f64 = 40.0;
const ENTITY_SIZE: f64 = 30.0;
const HUD_Y: f64 = 20.0;
const HUD_START_X: f64 = ARENA_WIDTH as f64 - 600.0;
const HUD_SPACING: f64 = 120.0;
const GAUGE_WIDTH: f64 = 100.0;

/// An image that may or may not be ready to draw
struct Sprite {
    image: Option<HtmlImageElement>,
}

impl Sprite {
    fn load(src: &str) -> Self {
        let image = HtmlImageElement::new().ok().inspect(|img| img.set_src(src));
        if image.is_none() {
            log::warn!("Could not create image for {src}");
        }
        Self { image }
    }

    /// The image, if fully decoded
    fn ready(&self) -> Option<&HtmlImageElement> {
        self.image
            .as_ref()
            .filter(|img| img.complete() && img.natural_width() != 0)
    }
}

struct Sprites {
    dog: Sprite,
    rabbit: Sprite,
    bird: Sprite,
    squirrel: Sprite,
    pig: Sprite,
    poo: Sprite,
    bone: Sprite,
    treat: Sprite,
}

impl Sprites {
    fn load() -> Self {
        Self {
            dog: Sprite::load("dog.png"),
            rabbit: Sprite::load("rabbit.png"),
            bird: Sprite::load("bird.png"),
            squirrel: Sprite::load("squirrel.png"),
            pig: Sprite::load("pig.png"),
            poo: Sprite::load("poo.png"),
            bone: Sprite::load("bone.png"),
            treat: Sprite::load("treat.png"),
        }
    }

    fn enemy(&self, kind: EnemyKind) -> &Sprite {
        match kind {
            EnemyKind::Rabbit => &self.rabbit,
            EnemyKind::Bird => &self.bird,
            EnemyKind::Squirrel => &self.squirrel,
            EnemyKind::Pig => &self.pig,
        }
    }
}

fn enemy_color(kind: EnemyKind) -> &'static str {
    match kind {
        EnemyKind::Rabbit => "brown",
        EnemyKind::Bird => "gray",
        EnemyKind::Squirrel => "orange",
        EnemyKind::Pig => "pink",
    }
}

pub struct Renderer {
    ctx: CanvasRenderingContext2d,
    sprites: Sprites,
}

impl Renderer {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self {
            ctx,
            sprites: Sprites::load(),
        }
    }

    pub fn clear(&self) {
        self.ctx
            .clear_rect(0.0, 0.0, ARENA_WIDTH as f64, ARENA_HEIGHT as f64);
    }

    /// Draw one frame of `state`
    pub fn draw(&self, state: &RunState, settings: &Settings, time_ms: f64) {
        self.clear();
        self.draw_player(state);
        self.draw_enemies(state);
        self.draw_collectibles(state);
        self.draw_orbit(state);
        self.draw_hud(state, settings);
        if state.level_up_flash.is_active() {
            self.draw_banner(state, settings, time_ms);
        }
    }

    /// Draw a sprite centred on (x, y), or return false if it is unavailable
    fn blit(&self, sprite: &Sprite, x: f64, y: f64, size: f64) -> bool {
        let Some(img) = sprite.ready() else {
            return false;
        };
        self.ctx
            .draw_image_with_html_image_element_and_dw_and_dh(
                img,
                x - size / 2.0,
                y - size / 2.0,
                size,
                size,
            )
            .is_ok()
    }

    fn draw_player(&self, state: &RunState) {
        let (x, y) = (state.player.pos.x as f64, state.player.pos.y as f64);
        if self.blit(&self.sprites.dog, x, y, PLAYER_SIZE) {
            return;
        }
        self.ctx.set_fill_style_str("blue");
        self.ctx
            .fill_rect(x - 20.0, y - 20.0, PLAYER_SIZE, PLAYER_SIZE);
        self.ctx.set_fill_style_str("white");
        self.ctx.fill_rect(x - 8.0, y - 14.0, 6.0, 6.0);
        self.ctx.fill_rect(x + 2.0, y - 14.0, 6.0, 6.0);
    }

    fn draw_enemies(&self, state: &RunState) {
        for enemy in &state.enemies {
            let (x, y) = (enemy.pos.x as f64, enemy.pos.y as f64);
            if self.blit(self.sprites.enemy(enemy.kind), x, y, ENTITY_SIZE) {
                continue;
            }
            self.ctx.set_fill_style_str(enemy_color(enemy.kind));
            self.ctx.fill_rect(x - 15.0, y - 15.0, ENTITY_SIZE, ENTITY_SIZE);
            // Ears, beak or tail so the placeholders are told apart
            self.ctx.set_fill_style_str("white");
            match enemy.kind {
                EnemyKind::Rabbit => self.ctx.fill_rect(x - 3.0, y - 18.0, 6.0, 9.0),
                EnemyKind::Bird => self.ctx.fill_rect(x - 18.0, y - 3.0, 6.0, 6.0),
                EnemyKind::Squirrel => self.ctx.fill_rect(x + 15.0, y + 3.0, 9.0, 6.0),
                EnemyKind::Pig => {}
            }
        }
    }

    fn draw_collectibles(&self, state: &RunState) {
        for c in &state.collectibles {
            let (x, y) = (c.pos.x as f64, c.pos.y as f64);
            let (sprite, color) = match c.kind {
                CollectibleKind::Bone => (&self.sprites.bone, "white"),
                CollectibleKind::Treat => (&self.sprites.treat, "yellow"),
            };
            if !self.blit(sprite, x, y, ENTITY_SIZE) {
                self.ctx.set_fill_style_str(color);
                self.ctx.fill_rect(x - 15.0, y - 15.0, ENTITY_SIZE, ENTITY_SIZE);
            }
        }
    }

    /// Four markers circling a sick dog
    fn draw_orbit(&self, state: &RunState) {
        let player = &state.player;
        if !player.is_sick() {
            return;
        }
        for i in 0..4 {
            let angle = player.orbit_angle + i as f32 * FRAC_PI_2;
            let x = (player.pos.x + SICKNESS_ORBIT_RADIUS * angle.cos()) as f64;
            let y = (player.pos.y + SICKNESS_ORBIT_RADIUS * angle.sin()) as f64;
            if !self.blit(&self.sprites.poo, x, y, ENTITY_SIZE) {
                self.ctx.set_fill_style_str("brown");
                self.ctx.fill_rect(x - 10.0, y - 10.0, 20.0, 20.0);
            }
        }
    }

    fn draw_hud(&self, state: &RunState, settings: &Settings) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str("black");
        ctx.set_font("16px Arial");
        ctx.set_text_align("left");
        let lines = [
            format!("Level: {}", state.level),
            format!("Bones: {}", state.bones),
            format!("Treats: {}", state.treats),
            format!("Score: {}", state.score),
        ];
        for (i, text) in lines.iter().enumerate() {
            let _ = ctx.fill_text(text, HUD_START_X + HUD_SPACING * i as f64, HUD_Y);
        }

        if !settings.show_sprint_gauge {
            return;
        }
        let gauge_x = HUD_START_X + HUD_SPACING * 4.0;
        let ready = state.player.sprint_ready();
        ctx.set_fill_style_str(if ready { "green" } else { "red" });
        let fill = GAUGE_WIDTH * state.player.sprint_gauge() as f64;
        ctx.fill_rect(gauge_x, HUD_Y - 10.0, fill, 10.0);
        ctx.set_stroke_style_str("black");
        ctx.stroke_rect(gauge_x, HUD_Y - 10.0, GAUGE_WIDTH, 10.0);
    }

    fn draw_banner(&self, state: &RunState, settings: &Settings, time_ms: f64) {
        let alpha = settings.banner_alpha(time_ms);
        self.ctx
            .set_fill_style_str(&format!("rgba(255, 215, 0, {alpha})"));
        self.ctx.set_font("20px Arial");
        self.ctx.set_text_align("right");
        let _ = self.ctx.fill_text(
            &format!("Level {}!", state.level),
            ARENA_WIDTH as f64 - 20.0,
            HUD_Y + 30.0,
        );
    }
}
