//=========================================================================
// Pong — Entry Point
//
// Opens the window, centers `Images/table_tennis.bmp` (if present) and
// runs the frame loop until the window is closed.
//
// Exit codes:
//   0  clean shutdown
//   1  graphics device could not be initialized
//   2  window could not be created
//   3  drawing surface could not be acquired
//
//=========================================================================

use std::process::ExitCode;

use pong_engine::prelude::*;

const PADDLE_IMAGE: &str = "table_tennis.bmp";

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::from(err.exit_code())
        }
    }
}

fn run() -> Result<(), PlatformInitError> {
    let platform = PlatformConfig::new().build()?;
    let mut engine = FrameEngine::new(platform);
    engine.init()?;

    let image_path = engine.platform().image_path().join(PADDLE_IMAGE);
    let paddle_image = engine.load_media(&image_path);

    match paddle_image.into_inner() {
        Some(bitmap) => {
            engine.add_draw_callback(move |canvas: &mut Framebuffer| {
                canvas.show_centered_image(Some(&bitmap));
            });
        }
        None => log::warn!("Running without {}", image_path.display()),
    }

    engine.run_event_loop();
    engine.shutdown();
    Ok(())
}
