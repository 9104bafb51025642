mod burger;
mod fonts;
mod game;

use crate::game::{Game, WINDOW_HEIGHT, WINDOW_WIDTH};
use pixels::{Pixels, SurfaceTexture};
use std::time::{Duration, Instant};
use winit::{
    dpi::LogicalSize,
    event::*,
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

const FRAME_DELAY: Duration = Duration::from_millis(16);

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Assets load before any window exists; a bad file aborts here.
    let mut game = Game::new()?;

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("Burger Bounce - ange delfin")
        .with_inner_size(LogicalSize::new(WINDOW_WIDTH as f64, WINDOW_HEIGHT as f64))
        .with_resizable(false)
        .build(&event_loop)?;

    let window_size = window.inner_size();
    let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
    let mut pixels = Pixels::new(WINDOW_WIDTH as u32, WINDOW_HEIGHT as u32, surface_texture)?;

    let mut next_tick = Instant::now() + FRAME_DELAY;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::WaitUntil(next_tick);

        match event {
            Event::WindowEvent { event, window_id } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => *control_flow = ControlFlow::Exit,
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            state,
                            virtual_keycode: Some(keycode),
                            ..
                        },
                    ..
                } => {
                    game.on_key(keycode, state == ElementState::Pressed);
                }
                _ => {}
            },
            Event::NewEvents(StartCause::ResumeTimeReached { .. }) => {
                // The timer re-arms every frame, paused or not
                next_tick += FRAME_DELAY;
                *control_flow = ControlFlow::WaitUntil(next_tick);

                game.tick();
                window.request_redraw();
            }
            Event::RedrawRequested(_) => {
                let frame = pixels.frame_mut();
                game.render(frame, WINDOW_WIDTH, WINDOW_HEIGHT);

                if pixels.render().is_err() {
                    *control_flow = ControlFlow::Exit;
                }
            }
            _ => {}
        }
    });
}
