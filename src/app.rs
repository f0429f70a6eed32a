use crate::core::framebuffer::FrameBuffer;
use crate::error::Result;
use crate::io::config::Config;
use crate::io::image::save_image;
use crate::pipeline::renderer::Renderer;
use crate::scene::loader::init_scene;
use log::info;
use nalgebra::Vector4;
use std::time::Instant;

/// Renders one frame of the configured scene and returns the finished buffer.
pub fn render(config: &Config) -> Result<FrameBuffer> {
    config.validate()?;
    let context = init_scene(config);

    let mut renderer = Renderer::new(config.render.width, config.render.height);
    renderer.clear(Vector4::from(config.render.background));
    renderer.rasterizer.set_blending(config.render.blend_enabled);

    let stats = renderer.draw_mesh(&context.mesh, &context.mvp())?;
    info!(
        "Rasterized {} triangles ({} empty, {} skipped, {} pixels written).",
        stats.triangles_drawn, stats.triangles_empty, stats.triangles_skipped, stats.pixels_written
    );

    Ok(renderer.framebuffer)
}

/// Runs a single headless render and writes the configured output file.
pub fn run_cli(config: Config) -> Result<()> {
    info!(
        "Rendering {}x{} (blending {})...",
        config.render.width,
        config.render.height,
        if config.render.blend_enabled { "on" } else { "off" }
    );
    let start_time = Instant::now();

    let framebuffer = render(&config)?;
    info!("Render completed in {:.2?}", start_time.elapsed());

    info!("Saving output to '{}'...", config.render.output);
    save_image(&config.render.output, &framebuffer)?;
    info!("Done.");
    Ok(())
}
