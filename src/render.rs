use macroquad::prelude::*;

use crate::assets::Sprites;
use crate::game::{Cell, Grid};
use crate::session::Session;

/// Snake sprites are drawn larger than a cell so neighbours overlap.
pub const SNAKE_SCALE: f32 = 1.5;
pub const FOOD_PULSE: f32 = 0.2;
pub const FOOD_PULSE_PERIOD_MS: f32 = 400.0;

const FALLBACK_BOARD: Color = Color::new(0.12, 0.2, 0.14, 1.0);
const FALLBACK_FINISH: Color = Color::new(1.0, 0.95, 0.7, 0.55);
const FALLBACK_HEAD: Color = Color::new(1.0, 0.78, 0.1, 1.0);
const FALLBACK_FOOD: Color = Color::new(0.95, 0.95, 1.0, 1.0);
const OVERLAY_DIM: Color = Color::new(0.0, 0.0, 0.0, 0.45);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sprite {
    Board,
    Finish,
    Head,
    Food,
    /// Index into the segment palette, 0 = most intense
    Segment(usize),
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DrawCall {
    pub sprite: Sprite,
    pub rect: Rect,
}

/// Board placement on screen: square cells, centered.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Layout {
    pub cell: f32,
    pub off_x: f32,
    pub off_y: f32,
    pub grid: Grid,
}

impl Layout {
    pub fn fit(screen_w: f32, screen_h: f32, grid: Grid) -> Self {
        let cell = (screen_w / grid.cols as f32).min(screen_h / grid.rows as f32);
        let off_x = (screen_w - cell * grid.cols as f32) * 0.5;
        let off_y = (screen_h - cell * grid.rows as f32) * 0.5;
        Self { cell, off_x, off_y, grid }
    }

    pub fn board(&self) -> Rect {
        Rect::new(
            self.off_x,
            self.off_y,
            self.cell * self.grid.cols as f32,
            self.cell * self.grid.rows as f32,
        )
    }

    /// Square of side `size` centered on the (fractional) cell position.
    fn centered(&self, pos: Vec2, size: f32) -> Rect {
        let x = self.off_x + pos.x * self.cell + (self.cell - size) * 0.5;
        let y = self.off_y + pos.y * self.cell + (self.cell - size) * 0.5;
        Rect::new(x, y, size, size)
    }
}

fn cell_pos(c: Cell) -> Vec2 {
    vec2(c.x as f32, c.y as f32)
}

fn lerp_cell(from: Cell, to: Cell, t: f32) -> Vec2 {
    cell_pos(from).lerp(cell_pos(to), t)
}

/// Palette level for body segment `index` of a snake of length `len`. The
/// tail always gets the palest level; brighter levels appear as it grows.
pub fn segment_level(index: usize, len: usize, palette_len: usize) -> usize {
    palette_len.saturating_sub(len - index)
}

pub fn food_scale(elapsed: f32) -> f32 {
    1.0 + FOOD_PULSE * (elapsed * 1000.0 / FOOD_PULSE_PERIOD_MS).sin()
}

/// Builds the draw list for one frame without touching the GPU.
pub fn plan(session: &Session, t: f32, elapsed: f32, layout: &Layout, palette_len: usize) -> Vec<DrawCall> {
    let game = session.game();
    let snake = game.snake();
    let previous = session.previous();
    let body_size = layout.cell * SNAKE_SCALE;
    let mut calls = vec![DrawCall { sprite: Sprite::Board, rect: layout.board() }];

    if game.is_finished() {
        calls.push(DrawCall { sprite: Sprite::Finish, rect: layout.board() });
        let head = snake[0];
        let from = previous.first().copied().unwrap_or(head);
        calls.push(DrawCall {
            sprite: Sprite::Head,
            rect: layout.centered(lerp_cell(from, head, t), body_size),
        });
        return calls;
    }

    for (i, &cur) in snake.iter().enumerate() {
        let sprite = if i == 0 {
            Sprite::Head
        } else {
            Sprite::Segment(segment_level(i, snake.len(), palette_len))
        };
        let from = previous.get(i).copied().unwrap_or(cur);
        calls.push(DrawCall {
            sprite,
            rect: layout.centered(lerp_cell(from, cur, t), body_size),
        });
    }

    let food_size = layout.cell * food_scale(elapsed);
    calls.push(DrawCall {
        sprite: Sprite::Food,
        rect: layout.centered(cell_pos(game.food()), food_size),
    });
    calls
}

fn fallback_segment_color(level: usize, palette_len: usize) -> Color {
    let fade = if palette_len > 1 { level as f32 / (palette_len - 1) as f32 } else { 0.0 };
    Color::new(1.0, 0.9 - 0.35 * fade, 0.2 + 0.5 * fade, 1.0)
}

pub fn paint(calls: &[DrawCall], sprites: &Sprites) {
    for call in calls {
        let r = call.rect;
        if let Some(texture) = sprites.get(call.sprite) {
            draw_texture_ex(
                texture,
                r.x,
                r.y,
                WHITE,
                DrawTextureParams { dest_size: Some(vec2(r.w, r.h)), ..Default::default() },
            );
            continue;
        }
        match call.sprite {
            Sprite::Board => draw_rectangle(r.x, r.y, r.w, r.h, FALLBACK_BOARD),
            Sprite::Finish => draw_rectangle(r.x, r.y, r.w, r.h, FALLBACK_FINISH),
            Sprite::Head => draw_circle(r.center().x, r.center().y, r.w * 0.4, FALLBACK_HEAD),
            Sprite::Food => draw_circle(r.center().x, r.center().y, r.w * 0.3, FALLBACK_FOOD),
            Sprite::Segment(level) => draw_circle(
                r.center().x,
                r.center().y,
                r.w * 0.3,
                fallback_segment_color(level, sprites.palette_len()),
            ),
        }
    }
}

pub fn draw_intro_overlay(layout: &Layout) {
    let board = layout.board();
    draw_rectangle(board.x, board.y, board.w, board.h, OVERLAY_DIM);
    let title = "Lucia Snake";
    let hint = "Tap or press a key to play";
    let title_size = (layout.cell * 0.6).max(18.0);
    let hint_size = (layout.cell * 0.3).max(14.0);
    let tm = measure_text(title, None, title_size as u16, 1.0);
    let hm = measure_text(hint, None, hint_size as u16, 1.0);
    let cx = board.x + board.w * 0.5;
    let cy = board.y + board.h * 0.45;
    draw_text(title, cx - tm.width * 0.5, cy, title_size, FALLBACK_HEAD);
    draw_text(hint, cx - hm.width * 0.5, cy + title_size, hint_size, WHITE);
}
