//! Raster export of the composited canvas.
//!
//! Export redraws the background and the current annotations into a fresh
//! off-screen surface at native canvas size, with selection decorations
//! suppressed, and encodes it as PNG or JPEG.

use crate::background::BackgroundImage;
use crate::draw::{Annotation, RenderStyle, render_scene};
use base64::Engine;
use chrono::Local;
use chrono::format::{Item, StrftimeItems};
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// JPEG quality used when the caller gives none.
pub const DEFAULT_JPEG_QUALITY: f64 = 0.92;

/// Errors that can occur while exporting.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to render export surface: {0}")]
    Render(#[from] cairo::Error),

    #[error("Export surface is still in use: {0}")]
    SurfaceData(#[from] cairo::BorrowError),

    #[error("Failed to encode PNG: {0}")]
    Png(#[from] cairo::IoError),

    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to save export: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid filename template '{0}'")]
    InvalidTemplate(String),
}

/// Output encoding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExportFormat {
    Png,
    /// Quality in `0.0..=1.0`
    Jpeg { quality: f64 },
}

impl ExportFormat {
    /// Picks the format for a MIME type. Anything but JPEG falls back to PNG.
    pub fn from_mime(mime: &str, quality: Option<f64>) -> Self {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => ExportFormat::Jpeg {
                quality: quality.unwrap_or(DEFAULT_JPEG_QUALITY).clamp(0.0, 1.0),
            },
            "image/png" | "" => ExportFormat::Png,
            other => {
                log::debug!("Unsupported export type '{}', using PNG", other);
                ExportFormat::Png
            }
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg { .. } => "image/jpeg",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg { .. } => "jpg",
        }
    }
}

/// Encoded export result.
#[derive(Debug, Clone)]
pub struct ExportedImage {
    pub format: ExportFormat,
    pub width: i32,
    pub height: i32,
    pub bytes: Vec<u8>,
}

impl ExportedImage {
    pub fn mime(&self) -> &'static str {
        self.format.mime()
    }

    /// `data:<mime>;base64,<payload>` form of the image.
    pub fn to_data_url(&self) -> String {
        let payload = base64::engine::general_purpose::STANDARD.encode(&self.bytes);
        format!("data:{};base64,{}", self.mime(), payload)
    }
}

/// Renders and encodes the scene without selection outlines or handles.
pub fn export_scene(
    width: i32,
    height: i32,
    background: Option<&BackgroundImage>,
    annotations: &[Annotation],
    style: &RenderStyle,
    format: ExportFormat,
) -> Result<ExportedImage, ExportError> {
    let mut surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)?;
    {
        let ctx = cairo::Context::new(&surface)?;
        render_scene(
            &ctx,
            width as f64,
            height as f64,
            background,
            annotations,
            &style.without_selection(),
        );
    }
    surface.flush();

    let bytes = encode_surface(&mut surface, format)?;
    log::info!(
        "Exported {}x{} {} ({} bytes)",
        width,
        height,
        format.mime(),
        bytes.len()
    );

    Ok(ExportedImage {
        format,
        width,
        height,
        bytes,
    })
}

/// Encodes an ARGB32 surface. JPEG output is composited over black.
pub fn encode_surface(
    surface: &mut cairo::ImageSurface,
    format: ExportFormat,
) -> Result<Vec<u8>, ExportError> {
    match format {
        ExportFormat::Png => {
            let mut out = Vec::new();
            surface.write_to_png(&mut out)?;
            Ok(out)
        }
        ExportFormat::Jpeg { quality } => {
            let width = surface.width() as u32;
            let height = surface.height() as u32;
            let stride = surface.stride() as usize;
            let data = surface.data()?;

            // Premultiplied channels already equal the color over black
            let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
            for row in data.chunks(stride).take(height as usize) {
                for pixel in row[..width as usize * 4].chunks_exact(4) {
                    let argb = u32::from_ne_bytes([pixel[0], pixel[1], pixel[2], pixel[3]]);
                    rgb.push((argb >> 16) as u8);
                    rgb.push((argb >> 8) as u8);
                    rgb.push(argb as u8);
                }
            }

            let quality = ((quality * 100.0).round() as u8).clamp(1, 100);
            let mut out = Vec::new();
            let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, quality);
            encoder.encode(&rgb, width, height, image::ExtendedColorType::Rgb8)?;
            Ok(out)
        }
    }
}

/// Configuration for saving exports to disk.
#[derive(Debug, Clone)]
pub struct ExportSaveConfig {
    /// Directory to save exports to.
    pub save_directory: PathBuf,
    /// Filename template (supports chrono format specifiers).
    pub filename_template: String,
}

impl Default for ExportSaveConfig {
    fn default() -> Self {
        Self {
            save_directory: dirs::picture_dir()
                .unwrap_or_else(|| PathBuf::from("~"))
                .join("Graffiti"),
            filename_template: "graffiti_%Y-%m-%d_%H%M%S".to_string(),
        }
    }
}

/// True when every specifier in `template` is one chrono understands.
pub fn is_valid_filename_template(template: &str) -> bool {
    !StrftimeItems::new(template).any(|item| matches!(item, Item::Error))
}

/// Generate a filename based on the template and current time.
///
/// # Errors
/// Returns [`ExportError::InvalidTemplate`] for unknown format specifiers.
pub fn generate_filename(template: &str, extension: &str) -> Result<String, ExportError> {
    let mut filename = String::new();
    write!(filename, "{}", Local::now().format(template))
        .map_err(|_| ExportError::InvalidTemplate(template.to_string()))?;
    Ok(format!("{}.{}", filename, extension))
}

/// Ensure the save directory exists, creating it if necessary.
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, ExportError> {
    if !directory.exists() {
        log::info!("Creating export directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Writes an exported image into the configured directory and returns its path.
pub fn save_export(image: &ExportedImage, config: &ExportSaveConfig) -> Result<PathBuf, ExportError> {
    let directory = ensure_directory_exists(&config.save_directory)?;
    let filename = generate_filename(&config.filename_template, image.format.extension())?;
    let file_path = directory.join(&filename);

    log::info!(
        "Saving export to: {} ({} bytes)",
        file_path.display(),
        image.bytes.len()
    );
    fs::write(&file_path, &image.bytes)?;

    Ok(file_path)
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::RED;

    #[test]
    fn unknown_mime_falls_back_to_png() {
        assert_eq!(ExportFormat::from_mime("image/gif", None), ExportFormat::Png);
        assert_eq!(ExportFormat::from_mime("", Some(0.3)), ExportFormat::Png);
        assert_eq!(
            ExportFormat::from_mime("IMAGE/JPEG", Some(1.5)),
            ExportFormat::Jpeg { quality: 1.0 }
        );
        assert_eq!(
            ExportFormat::from_mime("image/jpeg", None),
            ExportFormat::Jpeg {
                quality: DEFAULT_JPEG_QUALITY
            }
        );
    }

    #[test]
    fn png_export_has_png_signature() {
        let mut style = RenderStyle::default();
        style.background_color = RED;
        let image = export_scene(8, 6, None, &[], &style, ExportFormat::Png).unwrap();
        assert_eq!(&image.bytes[..8], b"\x89PNG\r\n\x1a\n");
        assert!(image.to_data_url().starts_with("data:image/png;base64,iVBOR"));
    }

    #[test]
    fn jpeg_export_decodes_to_background_color() {
        let mut style = RenderStyle::default();
        style.background_color = RED;
        let image = export_scene(16, 16, None, &[], &style, ExportFormat::Jpeg { quality: 0.9 })
            .unwrap();
        assert_eq!(image.mime(), "image/jpeg");

        let decoded = image::load_from_memory(&image.bytes).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (16, 16));
        let pixel = decoded.get_pixel(8, 8).0;
        assert!(pixel[0] > 240 && pixel[1] < 16 && pixel[2] < 16, "{pixel:?}");
    }

    #[test]
    fn save_export_writes_templated_file() {
        let dir = tempfile::tempdir().unwrap();
        let image = ExportedImage {
            format: ExportFormat::Png,
            width: 1,
            height: 1,
            bytes: vec![1, 2, 3],
        };
        let config = ExportSaveConfig {
            save_directory: dir.path().join("nested"),
            filename_template: "shot_%Y".to_string(),
        };

        let path = save_export(&image, &config).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("shot_") && name.ends_with(".png"));
        assert_eq!(fs::read(&path).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn unknown_template_specifier_is_an_error() {
        assert!(!is_valid_filename_template("shot_%Q"));
        assert!(is_valid_filename_template("shot_%Y-%m-%d"));
        assert!(matches!(
            generate_filename("shot_%Q", "png"),
            Err(ExportError::InvalidTemplate(ref t)) if t == "shot_%Q"
        ));

        let dir = tempfile::tempdir().unwrap();
        let image = ExportedImage {
            format: ExportFormat::Png,
            width: 1,
            height: 1,
            bytes: vec![0],
        };
        let config = ExportSaveConfig {
            save_directory: dir.path().to_path_buf(),
            filename_template: "shot_%Q".to_string(),
        };
        assert!(save_export(&image, &config).is_err());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_expand_tilde() {
        let expanded = expand_tilde("~/Pictures");
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert_eq!(expand_tilde("/absolute/path"), PathBuf::from("/absolute/path"));
    }
}
