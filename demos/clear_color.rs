//! Opens a window, clears it every frame and prints controller input.
//!
//! Run with `RUST_LOG=info cargo run --example clear_color`; Escape or
//! closing the window ends the loop.

use glcontext::{Context, GlWindow};
use glow::HasContext;

fn main() {
    env_logger::init();

    let mut context = Context::init("Test", 800, 600);
    if !context.is_initialized() {
        eprintln!("Could not open a GL context, see the log for details");
        return;
    }

    match context.controller() {
        Some(controller) => println!("Using game controller: {}", controller.name()),
        None => println!("No game controller attached"),
    }

    let mut frame: u64 = 0;
    loop {
        if let Some(backend) = context.backend() {
            clear(backend, frame);
            if let Some(gamepad) = backend.gamepad() {
                if gamepad.is_pressed(gilrs::Button::South) {
                    println!("South button held on frame {}", frame);
                }
            }
        }

        if !context.flip_and_poll_events() {
            break;
        }
        frame += 1;
    }

    let size = context.size();
    println!("Exiting after {} frames at {}x{}", frame, size.width, size.height);
    context.terminate();
}

fn clear(backend: &GlWindow, frame: u64) {
    let t = (frame % 240) as f32 / 240.0;
    unsafe {
        let gl = backend.gl();
        gl.clear_color(0.1, 0.2 + 0.3 * t, 0.3, 1.0);
        gl.clear(glow::COLOR_BUFFER_BIT);
    }
}
