use std::path::{Path, PathBuf};
use std::sync::Arc;

use pixelsmith_core::{
    decode_any, generate, ChannelMask, ColorSpace, DitheringConverter, DitheringType, ImageEditor,
    ImageFormat, PixelBuffer, PixelFormat, ScalingType,
};
use serde::Serialize;

use crate::error::AppError;
use crate::models::AppConfig;

/// Summary of a decoded image, as printed by `pixelsmith info`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageInfo {
    pub format: ImageFormat,
    pub width: usize,
    pub height: usize,
    pub pixel_format: PixelFormat,
    pub gamma: Option<f32>,
}

/// One conversion. Unset fields fall back to the configuration.
#[derive(Debug, Clone, Default)]
pub struct ConvertRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub color_space: Option<ColorSpace>,
    pub channels: Option<ChannelMask>,
    /// Re-encode the working image at this gamma before rendering
    pub gamma: Option<f32>,
    /// Render at this gamma
    pub output_gamma: Option<f32>,
    pub dithering: Option<DitheringType>,
    pub depth: Option<u8>,
    pub resize: Option<(usize, usize)>,
    pub scaling: Option<ScalingType>,
    pub b: Option<f32>,
    pub c: Option<f32>,
}

/// What a conversion produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertReport {
    pub output: PathBuf,
    pub format: ImageFormat,
    pub width: usize,
    pub height: usize,
    pub pixel_format: PixelFormat,
    pub bytes: usize,
}

/// Parse `WIDTHxHEIGHT`.
pub fn parse_size(s: &str) -> Result<(usize, usize), AppError> {
    let invalid = || AppError::InvalidSize(s.to_string());
    let (w, h) = s.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
    let width = w.trim().parse().map_err(|_| invalid())?;
    let height = h.trim().parse().map_err(|_| invalid())?;
    Ok((width, height))
}

/// Output container and the pixel format it forces, from the file
/// extension: `.pgm` forces gray, `.ppm` forces rgb, `.png` and `.pnm`
/// keep the image's format.
fn output_target(path: &Path) -> Result<(ImageFormat, Option<PixelFormat>), AppError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let format = ImageFormat::from_extension(&ext)
        .ok_or_else(|| AppError::UnsupportedExtension(ext.clone()))?;
    let forced = match ext.as_str() {
        "pgm" => Some(PixelFormat::Gray),
        "ppm" => Some(PixelFormat::Rgb),
        _ => None,
    };
    Ok((format, forced))
}

/// Encode `buffer` for `path`, converting the pixel format if the
/// extension demands it.
fn encode_for(path: &Path, buffer: &PixelBuffer) -> Result<(ImageFormat, PixelBuffer, Vec<u8>), AppError> {
    let (format, forced) = output_target(path)?;
    let buffer = match forced {
        Some(pixel_format) => buffer.to_format(pixel_format),
        None => buffer.clone(),
    };
    let bytes = format.codec().encode(&buffer)?;
    Ok((format, buffer, bytes))
}

/// Opens, converts and saves images
///
/// File reads and writes are async; decoding, encoding and pixel
/// transforms run on the blocking thread pool.
#[derive(Clone)]
pub struct ImageService {
    config: Arc<AppConfig>,
}

impl ImageService {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Read and decode an image file
    pub async fn open(&self, path: &Path) -> Result<(ImageFormat, PixelBuffer), AppError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| AppError::io(path, e))?;
        let (format, buffer) = tokio::task::spawn_blocking(move || decode_any(&bytes)).await??;

        tracing::info!(
            path = %path.display(),
            %format,
            width = buffer.width(),
            height = buffer.height(),
            pixel_format = %buffer.format(),
            "Opened image"
        );
        Ok((format, buffer))
    }

    pub async fn info(&self, path: &Path) -> Result<ImageInfo, AppError> {
        let (format, buffer) = self.open(path).await?;
        Ok(ImageInfo {
            format,
            width: buffer.width(),
            height: buffer.height(),
            pixel_format: buffer.format(),
            gamma: buffer.gamma(),
        })
    }

    /// Encode `buffer` according to the extension of `path` and write it
    ///
    /// Returns the number of bytes written.
    pub async fn save(&self, path: &Path, buffer: PixelBuffer) -> Result<usize, AppError> {
        let target = path.to_path_buf();
        let (format, _, bytes) =
            tokio::task::spawn_blocking(move || encode_for(&target, &buffer)).await??;
        self.write(path, format, bytes).await
    }

    async fn write(&self, path: &Path, format: ImageFormat, bytes: Vec<u8>) -> Result<usize, AppError> {
        tokio::fs::write(path, &bytes)
            .await
            .map_err(|e| AppError::io(path, e))?;
        tracing::info!(path = %path.display(), %format, bytes = bytes.len(), "Saved image");
        Ok(bytes.len())
    }

    /// Open `request.input`, run it through the editor and save the
    /// rendered result to `request.output`.
    pub async fn convert(&self, request: ConvertRequest) -> Result<ConvertReport, AppError> {
        let (_, buffer) = self.open(&request.input).await?;

        let config = self.config.clone();
        let output = request.output.clone();
        let (format, rendered, bytes) =
            tokio::task::spawn_blocking(move || -> Result<_, AppError> {
                let rendered = render(&config, &request, buffer)?;
                encode_for(&request.output, &rendered)
            })
            .await??;

        let written = self.write(&output, format, bytes).await?;
        Ok(ConvertReport {
            output,
            format,
            width: rendered.width(),
            height: rendered.height(),
            pixel_format: rendered.format(),
            bytes: written,
        })
    }

    /// Write the synthetic horizontal gradient
    pub async fn write_gradient(
        &self,
        path: &Path,
        width: usize,
        height: usize,
        pixel_format: PixelFormat,
    ) -> Result<usize, AppError> {
        let buffer = generate::gradient(width, height, pixel_format)?;
        self.save(path, buffer).await
    }
}

/// Editor pipeline for one conversion: resize, switch color space,
/// re-gamma, then render with mask, output gamma and dithering.
fn render(
    config: &AppConfig,
    request: &ConvertRequest,
    buffer: PixelBuffer,
) -> Result<PixelBuffer, AppError> {
    let editor_config = config.editor_config(buffer.gamma());
    let mut editor = ImageEditor::new(buffer, editor_config)?;
    if let Some(seed) = config.dithering.seed {
        editor = editor.with_dithering(DitheringConverter::with_seed(seed));
    }

    if let Some((width, height)) = request.resize {
        let mut scaler = config.scaling.converter();
        if let Some(b) = request.b {
            scaler.set_b(b);
        }
        if let Some(c) = request.c {
            scaler.set_c(c);
        }
        let scaling = request.scaling.unwrap_or(config.scaling.algorithm);
        editor.resize(&scaler, scaling, width, height)?;
    }

    let color_space = request.color_space.unwrap_or(config.editor.color_space);
    editor.set_color_space(color_space)?;

    if let Some(gamma) = request.gamma {
        editor.set_gamma(gamma)?;
    }

    let output_gamma = request
        .output_gamma
        .or(config.output.gamma)
        .unwrap_or(editor.gamma());
    let dithering = request.dithering.unwrap_or(config.dithering.algorithm);
    let depth = request.depth.unwrap_or(config.dithering.depth);

    tracing::debug!(
        %color_space,
        working_gamma = editor.gamma(),
        output_gamma,
        %dithering,
        depth,
        "Rendering"
    );
    Ok(editor.get_rgb_data(output_gamma, dithering, depth, request.channels)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("640x480").unwrap(), (640, 480));
        assert_eq!(parse_size(" 3 X 2 ").unwrap(), (3, 2));
        assert!(matches!(parse_size("640"), Err(AppError::InvalidSize(_))));
        assert!(matches!(parse_size("ax4"), Err(AppError::InvalidSize(_))));
    }

    #[test]
    fn test_output_target() {
        assert_eq!(
            output_target(Path::new("out.PNG")).unwrap(),
            (ImageFormat::Png, None)
        );
        assert_eq!(
            output_target(Path::new("out.pgm")).unwrap(),
            (ImageFormat::Pnm, Some(PixelFormat::Gray))
        );
        assert_eq!(
            output_target(Path::new("out.ppm")).unwrap(),
            (ImageFormat::Pnm, Some(PixelFormat::Rgb))
        );
        assert_eq!(
            output_target(Path::new("out.pnm")).unwrap(),
            (ImageFormat::Pnm, None)
        );
        assert!(matches!(
            output_target(Path::new("out.jpg")),
            Err(AppError::UnsupportedExtension(ext)) if ext == "jpg"
        ));
        assert!(output_target(Path::new("noext")).is_err());
    }

    #[test]
    fn test_render_without_options_is_lossless() {
        let buffer =
            PixelBuffer::from_bytes(&[10, 20, 30, 40, 50, 60], PixelFormat::Rgb, 2, 1).unwrap();
        let request = ConvertRequest::default();
        let out = render(&AppConfig::default(), &request, buffer.clone()).unwrap();
        assert_eq!(out.samples(), buffer.samples());
    }

    #[test]
    fn test_render_applies_request_over_config() {
        let buffer = generate::gradient(16, 4, PixelFormat::Gray).unwrap();
        let request = ConvertRequest {
            dithering: Some(DitheringType::Ordered),
            depth: Some(1),
            resize: Some((8, 2)),
            ..Default::default()
        };
        let out = render(&AppConfig::default(), &request, buffer).unwrap();
        assert_eq!((out.width(), out.height()), (8, 2));
        assert!(out.samples().iter().all(|&v| v == 0.0 || v == 255.0));
    }

    #[test]
    fn test_render_rejects_color_space_on_gray() {
        let buffer = generate::gradient(4, 4, PixelFormat::Gray).unwrap();
        let request = ConvertRequest {
            color_space: Some(ColorSpace::Hsv),
            ..Default::default()
        };
        assert!(matches!(
            render(&AppConfig::default(), &request, buffer),
            Err(AppError::Image(pixelsmith_core::ImageError::ColorSpaceOnGray(ColorSpace::Hsv)))
        ));
    }
}
