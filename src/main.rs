use macroquad::logging::{info, warn};
use macroquad::prelude::*;

mod assets;
mod config;
mod game;
mod input;
mod render;
mod session;
mod timer;

use assets::{Music, Sprites};
use config::{CONFIG_PATH, Config};
use game::GlobalRng;
use input::Controls;
use render::Layout;
use session::Session;

// Window default: 8 x 12 cells of 64px
const WINDOW_WIDTH: i32 = 512;
const WINDOW_HEIGHT: i32 = 768;

const BACKDROP: Color = Color::new(0.05, 0.08, 0.06, 1.0);

enum Screen {
    /// Game runs behind a "tap to play" veil until the first interaction.
    Intro,
    Playing,
}

async fn load_config() -> Config {
    match Config::load(CONFIG_PATH).await {
        Ok(config) => config,
        Err(err) => {
            warn!("{:#}, using defaults", err);
            Config::default()
        }
    }
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Lucia Snake".to_owned(),
        window_width: WINDOW_WIDTH,
        window_height: WINDOW_HEIGHT,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = load_config().await;
    info!(
        "grid {}x{}, tick {}ms, {} segment levels",
        config.cols,
        config.rows,
        config.tick_interval_ms,
        config.palette_len()
    );

    macroquad::rand::srand((macroquad::miniquad::date::now() * 1000.0) as u64);
    let mut rng = GlobalRng;

    let sprites = Sprites::load(&config).await;
    let mut music = Music::load(&config).await;
    let mut controls = Controls::new(config.swipe_threshold);
    let mut session = Session::new(config.grid(), config.palette_len(), config.tick_interval(), &mut rng);
    let mut screen = Screen::Intro;
    let mut last_time = get_time() as f32;

    loop {
        let now = get_time() as f32;
        let dt = (now - last_time).max(0.0);
        last_time = now;

        let frame_input = controls.poll();
        if frame_input.quit {
            break;
        }
        if frame_input.interacted {
            music.start_once();
            if let Screen::Intro = screen {
                screen = Screen::Playing;
            }
        }
        for dir in frame_input.steer {
            session.game_mut().steer(dir);
        }
        if frame_input.restart {
            session.restart(&mut rng);
        }

        session.frame(dt, &mut rng);

        clear_background(BACKDROP);
        let layout = Layout::fit(screen_width(), screen_height(), config.grid());
        let calls = render::plan(
            &session,
            session.interpolation(),
            session.elapsed(),
            &layout,
            config.palette_len(),
        );
        render::paint(&calls, &sprites);
        if let Screen::Intro = screen {
            render::draw_intro_overlay(&layout);
        }

        next_frame().await;
    }
}
