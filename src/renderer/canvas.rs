//! 2D canvas backend

use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use super::palette;
use super::scene::Scene;
use crate::sim::RunPhase;

pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
    /// Obstacle sprite sheet, once decoded
    sprites: Option<HtmlImageElement>,
    pub high_contrast: bool,
}

impl CanvasPainter {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self {
            ctx,
            sprites: None,
            high_contrast: false,
        }
    }

    pub fn set_sprite_sheet(&mut self, image: HtmlImageElement) {
        self.sprites = Some(image);
    }

    pub fn draw(&self, scene: &Scene) {
        let ctx = &self.ctx;
        let colors = palette::background(&scene.theme.background, self.high_contrast);
        let skin = palette::skin(&scene.theme.skin);
        let (w, h) = (scene.width as f64, scene.height as f64);

        ctx.clear_rect(0.0, 0.0, w, h);
        ctx.set_fill_style_str(colors.sky);
        ctx.fill_rect(0.0, 0.0, w, h);

        if scene.phase == RunPhase::Idle {
            self.draw_caption(scene, colors.text, "PRESS SPACE TO START");
            return;
        }

        // Ground
        ctx.begin_path();
        ctx.move_to(0.0, scene.ground_y as f64);
        ctx.line_to(w, scene.ground_y as f64);
        ctx.set_stroke_style_str(colors.ground);
        ctx.set_line_width(2.0);
        ctx.stroke();

        // Actor
        let a = scene.actor;
        ctx.set_fill_style_str(skin.body);
        ctx.fill_rect(a.x as f64, a.y as f64, a.w as f64, a.h as f64);
        ctx.set_fill_style_str(skin.eye);
        ctx.fill_rect((a.x + 25.0) as f64, (a.y + 5.0) as f64, 8.0, 8.0);

        // Obstacles
        ctx.set_fill_style_str(colors.obstacle);
        for obstacle in &scene.obstacles {
            let r = obstacle.rect;
            let drawn = match (&self.sprites, obstacle.sprite) {
                (Some(sheet), Some(src)) => ctx
                    .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                        sheet,
                        src.x as f64,
                        src.y as f64,
                        src.w as f64,
                        src.h as f64,
                        r.x as f64,
                        r.y as f64,
                        r.w as f64,
                        r.h as f64,
                    )
                    .is_ok(),
                _ => false,
            };
            if !drawn {
                ctx.fill_rect(r.x as f64, r.y as f64, r.w as f64, r.h as f64);
            }
        }

        if scene.phase == RunPhase::Terminated {
            ctx.set_fill_style_str("rgba(0, 0, 0, 0.6)");
            ctx.fill_rect(0.0, 0.0, w, h);
            self.draw_caption(scene, "#ef4444", "GAME OVER - TAP TO RETRY");
        }
    }

    fn draw_caption(&self, scene: &Scene, color: &str, text: &str) {
        self.ctx.set_font("20px \"Press Start 2P\"");
        self.ctx.set_fill_style_str(color);
        self.ctx.set_text_align("center");
        let _ = self
            .ctx
            .fill_text(text, scene.width as f64 / 2.0, scene.height as f64 / 2.0);
    }
}
