use macroquad::prelude::*;

use crate::game::Direction;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Steer(Direction),
    Restart,
    Quit,
    None,
}

pub fn key_action(key: KeyCode) -> KeyAction {
    match key {
        KeyCode::W | KeyCode::Up => KeyAction::Steer(Direction::Up),
        KeyCode::S | KeyCode::Down => KeyAction::Steer(Direction::Down),
        KeyCode::A | KeyCode::Left => KeyAction::Steer(Direction::Left),
        KeyCode::D | KeyCode::Right => KeyAction::Steer(Direction::Right),
        KeyCode::R => KeyAction::Restart,
        KeyCode::Q | KeyCode::Escape => KeyAction::Quit,
        _ => KeyAction::None,
    }
}

/// Maps a swipe delta to a direction along its dominant axis, or nothing when
/// the swipe is shorter than `threshold`.
pub fn classify_swipe(delta: Vec2, threshold: f32) -> Option<Direction> {
    if delta.x.abs() > delta.y.abs() {
        if delta.x > threshold {
            Some(Direction::Right)
        } else if delta.x < -threshold {
            Some(Direction::Left)
        } else {
            None
        }
    } else if delta.y > threshold {
        Some(Direction::Down)
    } else if delta.y < -threshold {
        Some(Direction::Up)
    } else {
        None
    }
}

/// Tracks a single-finger swipe from touch start to touch end.
#[derive(Default)]
pub struct SwipeTracker {
    start: Option<(u64, Vec2)>,
}

impl SwipeTracker {
    pub fn begin(&mut self, id: u64, pos: Vec2) {
        self.start = Some((id, pos));
    }

    pub fn end(&mut self, id: u64, pos: Vec2, threshold: f32) -> Option<Direction> {
        match self.start {
            Some((start_id, start)) if start_id == id => {
                self.start = None;
                classify_swipe(pos - start, threshold)
            }
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.start = None;
    }
}

/// Everything the player asked for during one frame.
#[derive(Default, Debug)]
pub struct FrameInput {
    pub steer: Vec<Direction>,
    pub restart: bool,
    pub quit: bool,
    pub interacted: bool,
}

const POLLED_KEYS: [KeyCode; 11] = [
    KeyCode::W,
    KeyCode::A,
    KeyCode::S,
    KeyCode::D,
    KeyCode::Up,
    KeyCode::Down,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::R,
    KeyCode::Q,
    KeyCode::Escape,
];

/// Per-frame reader of macroquad's keyboard, touch and mouse state.
pub struct Controls {
    swipe: SwipeTracker,
    threshold: f32,
}

impl Controls {
    pub fn new(swipe_threshold: f32) -> Self {
        Self { swipe: SwipeTracker::default(), threshold: swipe_threshold }
    }

    pub fn poll(&mut self) -> FrameInput {
        let mut out = FrameInput::default();

        if get_last_key_pressed().is_some() {
            out.interacted = true;
        }
        for key in POLLED_KEYS {
            if !is_key_pressed(key) {
                continue;
            }
            match key_action(key) {
                KeyAction::Steer(dir) => out.steer.push(dir),
                KeyAction::Restart => out.restart = true,
                KeyAction::Quit => out.quit = cfg!(not(target_arch = "wasm32")),
                KeyAction::None => {}
            }
        }

        let ts = touches();
        for t in &ts {
            match t.phase {
                TouchPhase::Started => {
                    out.interacted = true;
                    if ts.len() == 1 {
                        self.swipe.begin(t.id, t.position);
                    }
                }
                TouchPhase::Ended => {
                    if let Some(dir) = self.swipe.end(t.id, t.position, self.threshold) {
                        out.steer.push(dir);
                    }
                }
                TouchPhase::Cancelled => self.swipe.cancel(),
                TouchPhase::Moved | TouchPhase::Stationary => {}
            }
        }

        if is_mouse_button_pressed(MouseButton::Left) {
            out.interacted = true;
        }
        out
    }
}
