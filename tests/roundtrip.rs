use mandelbrot::{write_image, BandRenderer, RenderConfig, Viewport};
use tempfile::tempdir;

#[test]
fn full_size_render_survives_the_encoder() {
    let config = RenderConfig::default();
    assert_eq!(
        config.viewport,
        Viewport::new(-2.0, 1.0, -0.85, 0.8375).unwrap()
    );
    let renderer = BandRenderer::new(&config).unwrap();
    let pixels = renderer.render().unwrap();
    assert_eq!(pixels.len(), 1920 * 1080 * 3);

    let dir = tempdir().unwrap();
    let path = dir.path().join("mandelbrot_set.png");
    write_image(&path, &pixels, config.width, config.height).unwrap();

    let decoded = image::open(&path).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (1920, 1080));
    assert_eq!(decoded.into_raw(), pixels);
}

#[test]
fn workers_one_and_eight_agree() {
    let one = RenderConfig {
        width: 64,
        height: 64,
        workers: 1,
        ..RenderConfig::default()
    };
    let eight = RenderConfig {
        workers: 8,
        ..one.clone()
    };
    let a = BandRenderer::new(&one).unwrap().render().unwrap();
    let b = BandRenderer::new(&eight).unwrap().render().unwrap();
    assert_eq!(a, b);
}
