//! Canvas2D presenter for the browser
//!
//! Each entity draws its sprite once the texture has loaded and falls back to
//! glowing vector shapes until then (or forever, if the asset is missing).

use std::f64::consts::TAU;

use glam::IVec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::{FrameSnapshot, Presenter};
use crate::consts::CELL_SIZE;

const SERPENT_GLOW: &str = "rgba(28, 227, 168, 0.9)";
const SERPENT_INNER: &str = "#1ce3a8";
const SERPENT_OUTER: &str = "#00d4ff";
const DEMON_GLOW: &str = "rgba(255, 40, 77, 0.9)";
const DEMON_INNER: &str = "#ff284d";
const DEMON_OUTER: &str = "#9b2cff";
const BOSS_GLOW: &str = "#ff0066";
const ORB_GLOW: &str = "#ffcb45";
const ORB_CORE: &str = "#fff7d6";
const EMBER_COLOR: &str = "#ff8a33";

/// A texture that may or may not have finished loading
struct Sprite {
    image: Option<HtmlImageElement>,
}

impl Sprite {
    fn load(src: &str) -> Self {
        let image = HtmlImageElement::new().ok();
        match &image {
            Some(img) => img.set_src(src),
            None => log::warn!("Could not create image for {src}"),
        }
        Self { image }
    }

    fn ready(&self) -> Option<&HtmlImageElement> {
        self.image
            .as_ref()
            .filter(|img| img.complete() && img.natural_width() > 0)
    }
}

pub struct CanvasPresenter {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    serpent: Sprite,
    demon: Sprite,
    boss: Sprite,
    orb: Sprite,
}

impl CanvasPresenter {
    /// Wrap a canvas; sprites are fetched from `asset_root`
    pub fn new(canvas: &HtmlCanvasElement, asset_root: &str) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
            serpent: Sprite::load(&format!("{asset_root}/snake.png")),
            demon: Sprite::load(&format!("{asset_root}/demon_entity.png")),
            boss: Sprite::load(&format!("{asset_root}/boss_demon.png")),
            orb: Sprite::load(&format!("{asset_root}/orb.png")),
        })
    }

    fn cell_origin(pos: IVec2) -> (f64, f64) {
        let size = CELL_SIZE as f64;
        (pos.x as f64 * size, pos.y as f64 * size)
    }

    fn circle(&self, x: f64, y: f64, r: f64) {
        self.ctx.begin_path();
        self.ctx.arc(x, y, r.max(0.0), 0.0, TAU).ok();
        self.ctx.fill();
    }

    /// Fill a circle with a two-stop radial gradient
    fn gradient_circle(&self, cx: f64, cy: f64, r: f64, inner: &str, outer: &str) {
        match self.ctx.create_radial_gradient(cx, cy, 0.0, cx, cy, r.max(0.1)) {
            Ok(grad) => {
                grad.add_color_stop(0.0, inner).ok();
                grad.add_color_stop(1.0, outer).ok();
                self.ctx.set_fill_style_canvas_gradient(&grad);
            }
            Err(_) => self.ctx.set_fill_style_str(inner),
        }
        self.circle(cx, cy, r - 1.0);
    }

    fn draw_background(&self, now: f64) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
        self.ctx.set_global_composite_operation("source-over").ok();
        let alpha = 0.1 + 0.05 * (now / 1000.0).sin();
        self.ctx
            .set_fill_style_str(&format!("rgba(255, 0, 0, {alpha:.3})"));
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
    }

    fn draw_effects(&self, frame: &FrameSnapshot) {
        self.ctx.set_global_composite_operation("lighter").ok();
        self.ctx.set_shadow_blur(5.0);
        self.ctx.set_shadow_color(EMBER_COLOR);
        self.ctx.set_fill_style_str(EMBER_COLOR);
        for ember in &frame.embers {
            self.circle(ember.pos.x as f64, ember.pos.y as f64, 2.0);
        }
        self.ctx.set_shadow_blur(10.0);
        self.ctx.set_shadow_color(ORB_CORE);
        self.ctx.set_fill_style_str(ORB_CORE);
        for p in &frame.particles {
            self.circle(p.pos.x as f64, p.pos.y as f64, 3.0);
        }
    }

    fn draw_orb(&self, orb: IVec2) {
        let size = CELL_SIZE as f64;
        let (x, y) = Self::cell_origin(orb);
        self.ctx.set_shadow_blur(20.0);
        self.ctx.set_shadow_color(ORB_GLOW);
        if let Some(img) = self.orb.ready() {
            self.ctx
                .draw_image_with_html_image_element_and_dw_and_dh(img, x, y, size, size)
                .ok();
            return;
        }
        self.ctx.set_fill_style_str(ORB_CORE);
        self.circle(x + size / 2.0, y + size / 2.0, size / 2.0 - 2.0);
        self.ctx.set_fill_style_str(ORB_GLOW);
        self.circle(x + size / 2.0, y + size / 2.0, size / 4.0);
    }

    fn draw_serpent(&self, segments: &[IVec2], now: f64) {
        let cell = CELL_SIZE as f64;
        let count = segments.len().max(1) as f64;
        self.ctx.set_shadow_blur(20.0);
        self.ctx.set_shadow_color(SERPENT_GLOW);
        for (i, &seg) in segments.iter().enumerate() {
            let (x, y) = Self::cell_origin(seg);
            // Taper toward the tail, shimmer over time
            let taper = 1.0 - (i as f64 / count) * 0.5;
            let shimmer = 0.8 + 0.2 * (now / 300.0 + i as f64 * 0.5).sin();
            let size = cell * taper * shimmer;
            match self.serpent.ready() {
                Some(img) => {
                    self.ctx
                        .draw_image_with_html_image_element_and_dw_and_dh(img, x, y, size, size)
                        .ok();
                }
                None => self.gradient_circle(
                    x + cell / 2.0,
                    y + cell / 2.0,
                    size / 2.0,
                    SERPENT_INNER,
                    SERPENT_OUTER,
                ),
            }
        }
    }

    fn draw_demons(&self, demons: &[IVec2], now: f64) {
        let cell = CELL_SIZE as f64;
        self.ctx.set_shadow_color(DEMON_GLOW);
        for (i, &pos) in demons.iter().enumerate() {
            let phase = i as f64;
            let flicker = 0.7 + 0.3 * (now / 100.0 + phase).sin();
            let hover = 2.0 * (now / 500.0 + phase).sin();
            let (x, y) = Self::cell_origin(pos);
            let y = y + hover;
            self.ctx.set_global_alpha(flicker);
            match self.demon.ready() {
                Some(img) => {
                    self.ctx
                        .draw_image_with_html_image_element_and_dw_and_dh(img, x, y, cell, cell)
                        .ok();
                }
                None => self.gradient_circle(
                    x + cell / 2.0,
                    y + cell / 2.0,
                    cell / 2.0,
                    DEMON_INNER,
                    DEMON_OUTER,
                ),
            }
            self.ctx.set_global_alpha(1.0);
        }
    }

    fn draw_boss(&self, boss: IVec2, now: f64) {
        let cell = CELL_SIZE as f64;
        let (x, y) = Self::cell_origin(boss);
        let pulse = 0.5 + 0.5 * (now / 200.0).sin();
        let flicker = 0.8 + 0.2 * (now / 150.0).sin();
        self.ctx.set_shadow_blur(30.0);
        self.ctx.set_shadow_color(BOSS_GLOW);
        match self.boss.ready() {
            Some(img) => {
                self.ctx.set_global_alpha(pulse * flicker);
                self.ctx
                    .draw_image_with_html_image_element_and_dw_and_dh(
                        img,
                        x,
                        y,
                        cell * 2.0,
                        cell * 2.0,
                    )
                    .ok();
                self.ctx.set_global_alpha(1.0);
            }
            None => {
                self.ctx
                    .set_fill_style_str(&format!("rgba(255, 0, 102, {:.3})", pulse * flicker));
                self.circle(x + cell / 2.0, y + cell / 2.0, cell - 2.0);
            }
        }
    }

    /// Pause banner, or the final score and best on game over
    fn draw_overlay(&self, frame: &FrameSnapshot) {
        let Some(lines) = frame.hud().overlay() else {
            return;
        };
        self.ctx.set_fill_style_str("rgba(0, 0, 0, 0.5)");
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
        self.ctx.set_fill_style_str(ORB_CORE);
        self.ctx.set_text_align("center");

        let line_height = 32.0;
        let top = self.height / 2.0 - line_height * (lines.len() as f64 - 1.0) / 2.0;
        for (i, line) in lines.iter().enumerate() {
            self.ctx.set_font(if i == 0 {
                "bold 28px monospace"
            } else {
                "18px monospace"
            });
            self.ctx
                .fill_text(line, self.width / 2.0, top + i as f64 * line_height)
                .ok();
        }
    }
}

impl Presenter for CanvasPresenter {
    fn present(&mut self, frame: &FrameSnapshot, now_ms: f64) {
        self.draw_background(now_ms);
        self.draw_effects(frame);
        if let Some(orb) = frame.orb {
            self.draw_orb(orb);
        }
        self.draw_serpent(&frame.segments, now_ms);
        self.draw_demons(&frame.demons, now_ms);
        if let Some(boss) = frame.boss {
            self.draw_boss(boss, now_ms);
        }
        self.ctx.set_shadow_blur(0.0);
        self.ctx.set_global_composite_operation("source-over").ok();
        self.draw_overlay(frame);
    }
}
