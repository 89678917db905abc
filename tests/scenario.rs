use graffiti::config::Config;
use graffiti::draw::{FontDescriptor, TextMeasure, WHITE};
use graffiti::export::ExportFormat;
use graffiti::{GestureEvent, GestureHandler, Graffiti, Tool};
use tempfile::TempDir;

/// Fixed advance per character so layouts do not depend on installed fonts.
struct FixedAdvance;

impl TextMeasure for FixedAdvance {
    fn line_width(&self, line: &str, _font: &FontDescriptor, size_px: f64) -> f64 {
        line.chars().count() as f64 * size_px * 0.6
    }
}

fn make_engine() -> Graffiti {
    let _ = env_logger::builder().is_test(true).try_init();
    Graffiti::new(&Config::default())
        .unwrap()
        .with_measure(FixedAdvance)
}

fn decode(bytes: &[u8]) -> image::RgbaImage {
    image::load_from_memory(bytes).unwrap().to_rgba8()
}

fn surface_rgba(surface: &cairo::ImageSurface, x: i32, y: i32) -> [u8; 4] {
    let mut copy =
        cairo::ImageSurface::create(cairo::Format::ARgb32, surface.width(), surface.height())
            .unwrap();
    {
        let ctx = cairo::Context::new(&copy).unwrap();
        ctx.set_operator(cairo::Operator::Source);
        ctx.set_source_surface(surface, 0.0, 0.0).unwrap();
        ctx.paint().unwrap();
    }
    let stride = copy.stride() as usize;
    let data = copy.data().unwrap();
    let offset = y as usize * stride + x as usize * 4;
    let argb = u32::from_ne_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ]);
    [
        (argb >> 16) as u8,
        (argb >> 8) as u8,
        argb as u8,
        (argb >> 24) as u8,
    ]
}

fn drive(engine: &mut Graffiti, events: &[GestureEvent]) {
    for event in events {
        engine.handle_gesture(event);
    }
}

#[test]
fn curve_then_undo_redo_round_trip() {
    let mut engine = make_engine();
    engine.set_mode(Some(Tool::Curve));
    engine.set_size(4.0);

    drive(
        &mut engine,
        &[
            GestureEvent::pan_start(100.0, 100.0),
            GestureEvent::pan_move(200.0, 100.0, 100.0, 0.0),
            GestureEvent::pan_end(300.0, 100.0, 200.0, 0.0),
        ],
    );
    assert_eq!(engine.current().len(), 1);
    assert_eq!(surface_rgba(engine.surface(), 250, 100), [255, 255, 255, 255]);

    assert!(engine.undo());
    assert_eq!(surface_rgba(engine.surface(), 250, 100), [0, 0, 0, 255]);

    assert!(engine.redo());
    let png = engine.export_image("image/png", None).unwrap();
    assert_eq!((png.width, png.height), (800, 600));
    let decoded = decode(&png.bytes);
    assert_eq!(decoded.dimensions(), (800, 600));
    assert_eq!(decoded.get_pixel(250, 100).0, [255, 255, 255, 255]);
}

#[test]
fn export_leaves_out_selection_handles() {
    let mut engine = make_engine();
    engine.add_text("A", WHITE, 40.0);
    let (x, y) = {
        let text = engine.selected_text().unwrap();
        (text.x.round() as i32, text.y.round() as i32)
    };

    // Cross of the delete handle is drawn on screen
    assert_ne!(surface_rgba(engine.surface(), x, y), [0, 0, 0, 255]);

    let exported = decode(&engine.export_image("image/png", None).unwrap().bytes);
    assert_eq!(exported.get_pixel(x as u32, y as u32).0, [0, 0, 0, 255]);
    // Selection survives export
    assert!(engine.selected_text().is_some());
}

#[test]
fn jpeg_export_produces_data_url() {
    let mut engine = make_engine();
    engine.add_text("hello", WHITE, 30.0);

    let jpeg = engine.export_image("image/jpeg", Some(0.5)).unwrap();
    assert_eq!(jpeg.format, ExportFormat::Jpeg { quality: 0.5 });

    let url = jpeg.to_data_url();
    assert!(url.starts_with("data:image/jpeg;base64,"));
    assert_eq!(decode(&jpeg.bytes).dimensions(), (800, 600));
}

#[test]
fn unknown_export_type_falls_back_to_png() {
    let engine = make_engine();
    let exported = engine.export_image("image/gif", None).unwrap();
    assert_eq!(exported.mime(), "image/png");
    assert_eq!(&exported.bytes[1..4], b"PNG");
}

#[test]
fn save_export_writes_into_configured_directory() {
    let dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.export.save_directory = dir.path().join("shots").to_string_lossy().into_owned();
    config.export.filename_template = "shot".to_string();
    config.export.mime = "image/jpeg".to_string();

    let engine = Graffiti::new(&config).unwrap();
    let path = engine.save_export().unwrap();

    assert_eq!(path.file_name().unwrap(), "shot.jpg");
    assert!(dir.path().join("shots").join("shot.jpg").exists());
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(decode(&bytes).dimensions(), (800, 600));
}

#[test]
fn rotated_background_exports_swapped_size() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("photo.png");
    image::RgbaImage::from_pixel(300, 100, image::Rgba([255, 0, 0, 255]))
        .save(&path)
        .unwrap();

    let mut engine = make_engine();
    let dims = engine.load_background(path.to_str().unwrap()).unwrap();
    assert_eq!((dims.width, dims.height), (300.0, 100.0));

    engine.rotate(1).unwrap();
    let exported = decode(&engine.export_default().unwrap().bytes);
    assert_eq!(exported.dimensions(), (100, 300));
    assert_eq!(exported.get_pixel(50, 150).0, [255, 0, 0, 255]);
}

#[test]
fn configured_background_color_fills_canvas() {
    let config = Config::from_toml_str(
        r#"
[drawing]
background_color = [0, 0, 255]

[canvas]
viewport_width = 320.0
viewport_height = 240.0
"#,
    )
    .unwrap();

    let engine = Graffiti::new(&config).unwrap();
    assert_eq!(engine.canvas_size(), (320, 240));
    assert_eq!(surface_rgba(engine.surface(), 5, 5), [0, 0, 255, 255]);
}
