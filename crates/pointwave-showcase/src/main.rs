use anyhow::Result;

use pointwave_engine::core::{App, AppControl, FrameCtx};
use pointwave_engine::device::GpuInit;
use pointwave_engine::input::Key;
use pointwave_engine::logging::{init_logging, LoggingConfig};
use pointwave_engine::scene::{Scene, SceneConfig};
use pointwave_engine::window::{Runtime, RuntimeConfig};

/// Point-wave showcase: orbit around a rippling, color-shifting point grid.
///
/// Left drag orbits, right drag pans, wheel zooms. `R` puts the camera back,
/// `Escape` quits.
struct Showcase {
    scene: Scene,
}

impl Showcase {
    fn new() -> Self {
        Self {
            scene: Scene::new(SceneConfig::default()),
        }
    }
}

impl App for Showcase {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.key_pressed(Key::Escape) {
            log::info!("escape pressed, exiting");
            return AppControl::Exit;
        }
        if ctx.input_frame.key_pressed(Key::R) {
            self.scene.reset_camera();
        }

        let (_, logical_height) = ctx.window.logical_size();
        self.scene.resize(ctx.viewport());
        self.scene
            .frame(ctx.time.dt, ctx.input, ctx.input_frame, logical_height);

        let scene = &mut self.scene;
        let clear = scene.clear_color();
        ctx.render(clear, |rctx, target| scene.draw(rctx, target))
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig::default().title("pointwave").size(1280.0, 720.0);
    // Shader output is display-referred; keep the surface linear so it is
    // shown as written.
    let gpu_init = GpuInit::default().prefer_srgb(false);

    Runtime::run(config, gpu_init, Showcase::new())
}
