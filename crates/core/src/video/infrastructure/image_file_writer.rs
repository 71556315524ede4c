use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;

use crate::shared::constants::DEFAULT_JPEG_QUALITY;
use crate::shared::frame::Frame;
use crate::video::domain::image_writer::ImageWriter;

/// Writes a single frame to an image file using the `image` crate.
///
/// JPEG output uses the configured quality; other extensions go through
/// the crate's format detection.
pub struct ImageFileWriter {
    jpeg_quality: u8,
}

impl ImageFileWriter {
    pub fn new(jpeg_quality: u8) -> Self {
        Self {
            jpeg_quality: jpeg_quality.clamp(1, 100),
        }
    }
}

impl Default for ImageFileWriter {
    fn default() -> Self {
        Self::new(DEFAULT_JPEG_QUALITY)
    }
}

impl ImageWriter for ImageFileWriter {
    fn write(&self, path: &Path, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        if frame.channels() != 3 {
            return Err(format!("expected a BGR frame, got {} channels", frame.channels()).into());
        }

        let mut rgb = frame.data().to_vec();
        for px in rgb.chunks_exact_mut(3) {
            px.swap(0, 2);
        }
        let img = RgbImage::from_raw(frame.width(), frame.height(), rgb)
            .ok_or("Failed to create image from frame data")?;

        let is_jpeg = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg"));

        if is_jpeg {
            let out = BufWriter::new(File::create(path)?);
            img.write_with_encoder(JpegEncoder::new_with_quality(out, self.jpeg_quality))?;
        } else {
            img.save(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_frame(width: u32, height: u32, b: u8, g: u8, r: u8) -> Frame {
        let data = [b, g, r].repeat((width * height) as usize);
        Frame::new(data, width, height, 3, 0)
    }

    #[test]
    fn test_write_creates_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot.jpg");
        let writer = ImageFileWriter::default();
        writer.write(&path, &make_frame(100, 80, 50, 100, 200)).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        assert_eq!(
            image::guess_format(&bytes).unwrap(),
            image::ImageFormat::Jpeg
        );
    }

    #[test]
    fn test_png_roundtrip_swaps_bgr_to_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let writer = ImageFileWriter::default();
        writer.write(&path, &make_frame(50, 50, 50, 100, 200)).unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!((img.width(), img.height()), (50, 50));
        assert_eq!(img.get_pixel(0, 0).0, [200, 100, 50]);
    }

    #[test]
    fn test_lower_quality_gives_smaller_file() {
        let dir = tempfile::tempdir().unwrap();
        // Noise compresses badly, so quality has a visible effect on size.
        let data: Vec<u8> = (0..64 * 64 * 3).map(|i| (i * 7919 % 251) as u8).collect();
        let frame = Frame::new(data, 64, 64, 3, 0);

        let high = dir.path().join("high.jpg");
        let low = dir.path().join("low.jpg");
        ImageFileWriter::new(95).write(&high, &frame).unwrap();
        ImageFileWriter::new(10).write(&low, &frame).unwrap();

        let size = |p: &Path| std::fs::metadata(p).unwrap().len();
        assert!(size(&low) < size(&high));
    }

    #[test]
    fn test_gray_frame_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let frame = Frame::new(vec![0u8; 16], 4, 4, 1, 0);
        let writer = ImageFileWriter::default();
        assert!(writer.write(&dir.path().join("g.jpg"), &frame).is_err());
    }

    #[test]
    fn test_write_invalid_path_returns_error() {
        let writer = ImageFileWriter::default();
        assert!(writer
            .write(
                Path::new("/nonexistent/dir/out.jpg"),
                &make_frame(10, 10, 0, 0, 0)
            )
            .is_err());
    }
}
