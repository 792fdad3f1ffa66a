use anyhow::Result;
use glam::Vec2;
use log::{debug, info};
use winit::{
    event::{ElementState, Event, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::camera::Camera;
use engine::game_loop::FrameClock;
use engine::input::InputManager;
use game::{GameConfig, GameSession};

const WINDOW_WIDTH: u32 = 1280;
const WINDOW_HEIGHT: u32 = 720;

/// Camera offset from the player it follows
const CAMERA_BOOM: Vec2 = Vec2::new(0.0, 2.5);

/// Build the demo level: one long floor, a ledge, the player and a few stones
fn build_level(session: &mut GameSession) {
    session.add_platform(0.0, 0.0, 40.0, 1.0);
    session.add_platform(8.0, 4.0, 6.0, 0.5);

    session.spawn_character("Player", Some(0), 0.0, 2.0);
    session.spawn_character("Dummy", None, 6.0, 2.0);

    for x in [-6.0, -3.0, 3.0] {
        session.spawn_loose_stone(x, 1.0);
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Stone Thrower...");

    let mut session = GameSession::new(GameConfig::standard())?;
    build_level(&mut session);

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Stone Thrower")
        .with_inner_size(winit::dpi::LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    let size = window.inner_size();
    let mut camera = Camera::new(
        Vec2::new(0.0, 2.0) + CAMERA_BOOM,
        size.width as f32,
        size.height as f32,
    );
    let mut input = InputManager::new();
    let mut clock = FrameClock::new();

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("Close requested, shutting down...");
                    elwt.exit();
                }
                WindowEvent::Resized(physical_size) => {
                    camera.resize(physical_size.width as f32, physical_size.height as f32);
                    debug!("Window resized to {:?}", physical_size);
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    if event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                        && event.state == ElementState::Pressed
                        && !event.repeat
                    {
                        clock.toggle_pause();
                    } else {
                        input.process_keyboard_event(&event);
                    }
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    input.process_mouse_button(button, state);
                }
                WindowEvent::CursorMoved { position, .. } => {
                    input.process_cursor(Some(Vec2::new(position.x as f32, position.y as f32)));
                }
                WindowEvent::CursorLeft { .. } => input.process_cursor(None),
                WindowEvent::Focused(false) => {
                    input.player_mut().reset();
                    session.cancel_aim(0);
                }
                WindowEvent::RedrawRequested => {
                    let steps = clock.begin_frame();
                    if steps == 0 {
                        return;
                    }

                    if let Some(motion) = session
                        .character_for_player(0)
                        .and_then(|player| session.motion(player.id))
                    {
                        camera.follow(motion.position, CAMERA_BOOM);
                    }

                    // Edges stay in the input state until a step consumed them
                    let cursor = input.player().cursor().map(|p| camera.screen_to_world(p));
                    session.apply_input(0, input.player(), cursor);
                    for _ in 0..steps {
                        for hit in session.update(clock.fixed_timestep()) {
                            info!(
                                "Stone {} from {:?} hit {:?}",
                                hit.stone, hit.instigator, hit.target
                            );
                        }
                    }
                    input.update();

                    if let Some(player) = session.character_for_player(0) {
                        debug!(
                            "{}: {:?}, ammo {}",
                            player.name,
                            player.animation_state(),
                            player.ammo()
                        );
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
