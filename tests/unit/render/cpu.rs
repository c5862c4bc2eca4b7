use super::*;

fn temp_dir(tag: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "imgshow_cpu_{tag}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn solid_png(dir: &Path, name: &str, rgba: [u8; 4]) -> PathBuf {
    let path = dir.join(name);
    image::RgbaImage::from_pixel(4, 4, image::Rgba(rgba))
        .save(&path)
        .unwrap();
    path
}

fn pixel(frame: &[u8], width: usize, x: usize, y: usize) -> [u8; 4] {
    let i = (y * width + x) * 4;
    [frame[i], frame[i + 1], frame[i + 2], frame[i + 3]]
}

fn assert_near(got: [u8; 4], want: [u8; 4]) {
    let close = got.iter().zip(want).all(|(g, w)| g.abs_diff(w) <= 2);
    assert!(close, "got {got:?}, want {want:?}");
}

#[test]
fn zero_surface_is_rejected() {
    assert!(CpuBackend::new(Size::new(0, 10), CpuBackendOpts::default()).is_err());
    assert!(CpuBackend::new(Size::new(10, -1), CpuBackendOpts::default()).is_err());
}

#[test]
fn empty_frame_is_clear_colour() {
    let mut backend = CpuBackend::new(
        Size::new(8, 8),
        CpuBackendOpts {
            clear_rgba: Rgba8::rgb(10, 20, 30),
            output: None,
        },
    )
    .unwrap();
    backend.begin_frame();
    backend.present().unwrap();
    assert_eq!(pixel(&backend.frame_rgba8(), 8, 3, 3), [10, 20, 30, 255]);
}

#[test]
fn image_is_scaled_into_its_rect() {
    let dir = temp_dir("draw");
    let red = solid_png(&dir, "red.png", [255, 0, 0, 255]);

    let mut backend = CpuBackend::new(Size::new(16, 16), CpuBackendOpts::default()).unwrap();
    let tex = backend.load_image(&red).unwrap();
    assert_eq!(tex.size, Size::new(4, 4));

    backend.begin_frame();
    backend.draw(tex.id, Rect::new(0, 0, 8, 16), Rgba8::WHITE);
    backend.present().unwrap();

    let frame = backend.frame_rgba8();
    assert_near(pixel(&frame, 16, 4, 8), [255, 0, 0, 255]);
    assert_eq!(pixel(&frame, 16, 12, 8), [255, 255, 255, 255]);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn tint_modulates_colour() {
    let dir = temp_dir("tint");
    let white = solid_png(&dir, "white.png", [255, 255, 255, 255]);

    let mut backend = CpuBackend::new(Size::new(8, 8), CpuBackendOpts::default()).unwrap();
    let tex = backend.load_image(&white).unwrap();
    backend.begin_frame();
    backend.draw(tex.id, Rect::new(0, 0, 8, 8), Rgba8::rgb(0, 0, 255));
    backend.present().unwrap();

    assert_near(pixel(&backend.frame_rgba8(), 8, 4, 4), [0, 0, 255, 255]);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn modulate_keeps_premultiplied_alpha() {
    let out = modulate_premul(&[200, 100, 50, 255], Rgba8::rgb(255, 0, 255));
    assert_eq!(out, vec![200, 0, 50, 255]);

    let faded = modulate_premul(
        &[255, 255, 255, 255],
        Rgba8 {
            r: 255,
            g: 255,
            b: 255,
            a: 0,
        },
    );
    assert_eq!(faded, vec![0, 0, 0, 0]);
}

#[test]
fn present_writes_png_when_output_is_set() {
    let dir = temp_dir("out");
    let out = dir.join("frame.png");
    let mut backend = CpuBackend::new(
        Size::new(5, 3),
        CpuBackendOpts {
            clear_rgba: Rgba8::BLACK,
            output: Some(out.clone()),
        },
    )
    .unwrap();
    backend.begin_frame();
    backend.present().unwrap();

    let written = image::open(&out).unwrap().to_rgba8();
    assert_eq!(written.dimensions(), (5, 3));
    assert_eq!(written.get_pixel(2, 1).0, [0, 0, 0, 255]);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn unknown_font_and_missing_files_error() {
    let mut backend = CpuBackend::new(Size::new(8, 8), CpuBackendOpts::default()).unwrap();
    assert!(backend.measure_text(FontId(3), "x").is_err());
    assert!(backend.load_font(Path::new("/nonexistent/font.ttf"), 12).is_err());
    assert!(backend.load_image(Path::new("/nonexistent/a.png")).is_err());
}

#[test]
fn non_font_bytes_are_rejected() {
    let dir = temp_dir("font");
    let path = dir.join("bogus.ttf");
    std::fs::write(&path, b"not a font").unwrap();

    let mut backend = CpuBackend::new(Size::new(8, 8), CpuBackendOpts::default()).unwrap();
    assert!(backend.load_font(&path, 12).is_err());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn each_frame_starts_from_the_clear_colour() {
    let dir = temp_dir("reuse");
    let red = solid_png(&dir, "red.png", [255, 0, 0, 255]);

    let mut backend = CpuBackend::new(Size::new(8, 8), CpuBackendOpts::default()).unwrap();
    let tex = backend.load_image(&red).unwrap();
    backend.begin_frame();
    backend.draw(tex.id, Rect::new(0, 0, 8, 8), Rgba8::WHITE);
    backend.present().unwrap();
    assert_near(pixel(&backend.frame_rgba8(), 8, 4, 4), [255, 0, 0, 255]);

    for _ in 0..3 {
        backend.begin_frame();
        backend.present().unwrap();
        assert_eq!(pixel(&backend.frame_rgba8(), 8, 4, 4), [255, 255, 255, 255]);
    }

    std::fs::remove_dir_all(&dir).ok();
}
