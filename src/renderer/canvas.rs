//! Canvas 2D painter

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{GRID_SPACING, mouth_arc, palette};
use crate::sim::{CollectibleKind, GameState};

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            ctx,
            width: f64::from(canvas.width()),
            height: f64::from(canvas.height()),
        })
    }

    /// Paint one frame
    pub fn render(&self, state: &GameState) {
        self.draw_background();
        self.draw_obstacles(state);
        self.draw_contaminants(state);
        self.draw_collectibles(state);
        self.draw_avatar(state);
        self.draw_hud(state);
    }

    fn circle(&self, x: f32, y: f32, r: f64, color: &str) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(color);
        ctx.begin_path();
        ctx.arc(f64::from(x), f64::from(y), r, 0.0, TAU).ok();
        ctx.fill();
    }

    fn draw_background(&self) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(palette::BACKGROUND);
        ctx.fill_rect(0.0, 0.0, self.width, self.height);

        ctx.set_stroke_style_str(palette::GRID);
        ctx.set_line_width(1.0);
        let mut x = 0.0;
        while x < self.width {
            ctx.begin_path();
            ctx.move_to(x, 0.0);
            ctx.line_to(x, self.height);
            ctx.stroke();
            x += GRID_SPACING;
        }
        let mut y = 0.0;
        while y < self.height {
            ctx.begin_path();
            ctx.move_to(0.0, y);
            ctx.line_to(self.width, y);
            ctx.stroke();
            y += GRID_SPACING;
        }
    }

    fn draw_obstacles(&self, state: &GameState) {
        let ctx = &self.ctx;
        ctx.set_line_width(2.0);
        for o in &state.obstacles {
            let (x, y) = (f64::from(o.pos.x), f64::from(o.pos.y));
            let (w, h) = (f64::from(o.size.x), f64::from(o.size.y));
            ctx.set_fill_style_str(palette::OBSTACLE);
            ctx.fill_rect(x, y, w, h);
            ctx.set_stroke_style_str(palette::OBSTACLE_EDGE);
            ctx.stroke_rect(x, y, w, h);
        }
    }

    fn draw_contaminants(&self, state: &GameState) {
        let ctx = &self.ctx;
        for c in state.contaminants.iter().filter(|c| !c.is_collected()) {
            let r = f64::from(c.radius * c.pulse_scale());
            self.circle(c.pos.x, c.pos.y, r + 5.0, palette::CONTAMINANT_GLOW);
            self.circle(c.pos.x, c.pos.y, r, palette::CONTAMINANT);

            ctx.set_fill_style_str(palette::SPARKLE);
            ctx.set_font("12px Arial");
            ctx.set_text_align("center");
            ctx.fill_text("⚠️", f64::from(c.pos.x), f64::from(c.pos.y) + 4.0).ok();
        }
    }

    fn draw_collectibles(&self, state: &GameState) {
        let ctx = &self.ctx;
        for c in state.collectibles.iter().filter(|c| !c.is_collected()) {
            match c.kind {
                CollectibleKind::CleanWater => {
                    self.circle(c.pos.x, c.pos.y, f64::from(c.radius), palette::WATER);
                    self.circle(c.pos.x - 3.0, c.pos.y - 3.0, 2.0, palette::SPARKLE);
                }
                CollectibleKind::ToolPack => {
                    self.circle(c.pos.x, c.pos.y, f64::from(c.radius), palette::TOOL_PACK);
                    ctx.set_font("16px Arial");
                    ctx.set_text_align("center");
                    ctx.fill_text("🔧", f64::from(c.pos.x), f64::from(c.pos.y) + 5.0).ok();
                }
            }
        }
    }

    fn draw_avatar(&self, state: &GameState) {
        let ctx = &self.ctx;
        let a = &state.avatar;
        let (x, y, r) = (f64::from(a.pos.x), f64::from(a.pos.y), f64::from(a.radius));

        ctx.set_fill_style_str(palette::AVATAR);
        ctx.begin_path();
        if a.mouth_open {
            let (start, end) = mouth_arc(a.direction);
            ctx.move_to(x, y);
            ctx.arc(x, y, r, start, end).ok();
        } else {
            ctx.arc(x, y, r, 0.0, TAU).ok();
        }
        ctx.close_path();
        ctx.fill();
    }

    fn draw_hud(&self, state: &GameState) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(palette::HUD_TEXT);
        ctx.set_font("20px Arial");
        ctx.set_text_align("left");
        ctx.fill_text(&format!("Score: {}", state.display_score()), 10.0, 30.0).ok();
        ctx.fill_text(&format!("Lives: {}", state.lives), 10.0, 55.0).ok();

        ctx.set_fill_style_str(palette::HINT_TEXT);
        ctx.set_font("14px Arial");
        ctx.fill_text(
            "Avoid red contaminated water! Use arrow keys to move",
            10.0,
            self.height - 10.0,
        )
        .ok();
    }
}
