use nalgebra::Vector4;
use tri_raster::app::{render, run_cli};
use tri_raster::core::color::background;
use tri_raster::error::RenderError;
use tri_raster::io::config::Config;
use tri_raster::io::image::write_ppm;

fn ppm_bytes(config: &Config) -> Vec<u8> {
    let framebuffer = render(config).unwrap();
    let mut out = Vec::new();
    write_ppm(&mut out, &framebuffer).unwrap();
    out
}

#[test_log::test]
fn center_pixel_of_default_scene_is_covered() {
    let framebuffer = render(&Config::default()).unwrap();
    assert_eq!((framebuffer.width, framebuffer.height), (800, 600));

    let center = framebuffer.get_color(400, 300).unwrap();
    assert_ne!(center, background());

    // Both triangles cover the center with weights (0.25, 0.25, 0.5):
    // first (0.25, 0.25, 0.5, 0.875) over black, then (0.25, 0.25, 0.5, 0.75) on top.
    let expected = Vector4::new(0.2421875, 0.2421875, 0.484375, 0.78515625);
    assert!(
        (center - expected).norm() < 1e-9,
        "center = {:?}",
        center
    );
}

#[test_log::test]
fn default_scene_ppm_layout() {
    let bytes = ppm_bytes(&Config::default());
    let text = String::from_utf8(bytes).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(&lines[..3], &["P3", "800 600", "255"]);
    assert_eq!(lines.len(), 3 + 800 * 600);
    // Corners are outside both triangles.
    assert_eq!(lines[3], "0 0 0");
    assert_eq!(lines[lines.len() - 1], "0 0 0");
    assert_eq!(lines[3 + 300 * 800 + 400], "61 61 123");
}

#[test_log::test]
fn rendering_is_deterministic() {
    let config = Config::default();
    assert_eq!(ppm_bytes(&config), ppm_bytes(&config));
}

#[test_log::test]
fn disabling_blend_changes_translucent_regions_only() {
    let blended = render(&Config::default()).unwrap();
    let mut config = Config::default();
    config.render.blend_enabled = false;
    let replaced = render(&config).unwrap();

    // Outside the geometry both stay on the background.
    assert_eq!(blended.get_color(0, 0), replaced.get_color(0, 0));
    // At the center the second triangle's color is written as-is.
    let center = replaced.get_color(400, 300).unwrap();
    assert!((center - Vector4::new(0.25, 0.25, 0.5, 0.75)).norm() < 1e-9);
    assert_ne!(blended.get_color(400, 300), replaced.get_color(400, 300));
}

#[test_log::test]
fn run_cli_writes_output_file() {
    let path = std::env::temp_dir().join(format!("tri_raster_cli_{}.ppm", std::process::id()));
    let mut config = Config::default();
    config.render.width = 80;
    config.render.height = 60;
    config.render.output = path.display().to_string();

    run_cli(config.clone()).unwrap();
    let written = std::fs::read(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(written, ppm_bytes(&config));
    assert!(written.starts_with(b"P3\n80 60\n255\n"));
}

#[test_log::test]
fn invalid_config_is_rejected_before_rendering() {
    let mut config = Config::default();
    config.mesh.indices.push(0);
    assert!(render(&config).is_err());
}

#[test_log::test]
fn degenerate_camera_is_rejected_before_rendering() {
    let mut config = Config::default();
    config.camera.up = [0.0, 0.0, -1.0];
    assert!(matches!(render(&config), Err(RenderError::InvalidCamera { .. })));

    let mut config = Config::default();
    config.camera.near_plane = config.camera.far_plane;
    assert!(matches!(render(&config), Err(RenderError::InvalidCamera { .. })));
}
