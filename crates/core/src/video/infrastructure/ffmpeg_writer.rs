use std::path::Path;

use ffmpeg_next::format::Pixel;
use ffmpeg_next::software::scaling;
use ffmpeg_next::util::frame::video::Video;
use ffmpeg_next::{codec, encoder, format, Dictionary, Packet, Rational};

use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::video_writer::VideoWriter;

/// `MKTAG('X','V','I','D')`: lets AVI players pick an MPEG-4 Part 2 decoder.
const XVID_TAG: u32 = u32::from_le_bytes(*b"XVID");

const STREAM_INDEX: usize = 0;

/// Encodes BGR frames to MPEG-4 Part 2 via ffmpeg-next.
///
/// The container follows the output extension (`.avi` for recordings).
pub struct FfmpegWriter {
    stream: Option<OpenStream>,
}

struct OpenStream {
    octx: format::context::Output,
    encoder: encoder::video::Encoder,
    scaler: scaling::Context,
    width: u32,
    height: u32,
    /// Encoder time base: one tick per frame.
    time_base: Rational,
    pts: i64,
}

impl FfmpegWriter {
    pub fn new() -> Self {
        Self { stream: None }
    }
}

impl Default for FfmpegWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoWriter for FfmpegWriter {
    fn open(
        &mut self,
        path: &Path,
        metadata: &VideoMetadata,
    ) -> Result<(), Box<dyn std::error::Error>> {
        ffmpeg_next::init()?;

        if metadata.width == 0 || metadata.height == 0 {
            return Err(format!(
                "cannot record a {}x{} stream",
                metadata.width, metadata.height
            )
            .into());
        }

        let mut octx = format::output(path)?;
        let global_header = octx.format().flags().contains(format::Flags::GLOBAL_HEADER);

        let codec = encoder::find(codec::Id::MPEG4).ok_or("MPEG4 encoder not found")?;
        let mut ost = octx.add_stream(Some(codec))?;

        let mut encoder_ctx = codec::context::Context::new_with_codec(codec)
            .encoder()
            .video()?;

        let fps = metadata.fps.round() as i32;
        let fps = if fps <= 0 { 20 } else { fps };
        let time_base = Rational(1, fps);

        encoder_ctx.set_width(metadata.width);
        encoder_ctx.set_height(metadata.height);
        encoder_ctx.set_format(Pixel::YUV420P);
        encoder_ctx.set_time_base(time_base);
        encoder_ctx.set_frame_rate(Some(Rational(fps, 1)));
        if global_header {
            encoder_ctx.set_flags(codec::Flags::GLOBAL_HEADER);
        }

        let encoder = encoder_ctx.open_with(Dictionary::new())?;
        ost.set_parameters(&encoder);
        // Safety: the stream's codecpar is owned by `octx`, which outlives this write.
        unsafe {
            (*ost.parameters().as_mut_ptr()).codec_tag = XVID_TAG;
        }

        octx.write_header()?;

        let scaler = scaling::Context::get(
            Pixel::BGR24,
            metadata.width,
            metadata.height,
            Pixel::YUV420P,
            metadata.width,
            metadata.height,
            scaling::Flags::BILINEAR,
        )?;

        self.stream = Some(OpenStream {
            octx,
            encoder,
            scaler,
            width: metadata.width,
            height: metadata.height,
            time_base,
            pts: 0,
        });
        Ok(())
    }

    fn write(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        let stream = self.stream.as_mut().ok_or("FfmpegWriter: not opened")?;

        if frame.width() != stream.width || frame.height() != stream.height {
            return Err(format!(
                "frame is {}x{}, recording is {}x{}",
                frame.width(),
                frame.height(),
                stream.width,
                stream.height
            )
            .into());
        }

        let mut bgr = Video::new(Pixel::BGR24, stream.width, stream.height);
        let row_bytes = stream.width as usize * 3;
        let stride = bgr.stride(0);
        let dst = bgr.data_mut(0);
        for (row, src) in frame.data().chunks_exact(row_bytes).enumerate() {
            let start = row * stride;
            dst[start..start + row_bytes].copy_from_slice(src);
        }

        let mut yuv = Video::empty();
        stream.scaler.run(&bgr, &mut yuv)?;
        yuv.set_pts(Some(stream.pts));

        stream.encoder.send_frame(&yuv)?;
        stream.drain()?;

        stream.pts += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let Some(mut stream) = self.stream.take() else {
            return Ok(());
        };
        stream.encoder.send_eof()?;
        stream.drain()?;
        stream.octx.write_trailer()?;
        Ok(())
    }
}

impl OpenStream {
    /// Moves every packet the encoder has ready into the container.
    fn drain(&mut self) -> Result<(), ffmpeg_next::Error> {
        let ost_time_base = self
            .octx
            .stream(STREAM_INDEX)
            .ok_or(ffmpeg_next::Error::StreamNotFound)?
            .time_base();

        let mut packet = Packet::empty();
        while self.encoder.receive_packet(&mut packet).is_ok() {
            packet.set_stream(STREAM_INDEX);
            packet.rescale_ts(self.time_base, ost_time_base);
            packet.write_interleaved(&mut self.octx)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn metadata(w: u32, h: u32, fps: f64) -> VideoMetadata {
        VideoMetadata {
            width: w,
            height: h,
            fps,
        }
    }

    fn solid_frame(index: usize, w: u32, h: u32, value: u8) -> Frame {
        Frame::new(vec![value; (w * h * 3) as usize], w, h, 3, index)
    }

    fn record(path: &Path, frames: usize) {
        record_at(path, frames, 20.0);
    }

    fn record_at(path: &Path, frames: usize, fps: f64) {
        let mut writer = FfmpegWriter::new();
        writer.open(path, &metadata(160, 120, fps)).unwrap();
        for i in 0..frames {
            writer.write(&solid_frame(i, 160, 120, 128)).unwrap();
        }
        writer.close().unwrap();
    }

    #[test]
    fn test_write_creates_avi() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.avi");
        record(&path, 3);

        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_avi_stream_is_xvid_tagged_mpeg4() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.avi");
        record(&path, 2);

        let ictx = format::input(&path).unwrap();
        let stream = ictx.streams().best(ffmpeg_next::media::Type::Video).unwrap();
        let params = stream.parameters();
        assert_eq!(params.id(), codec::Id::MPEG4);
        let tag = unsafe { (*params.as_ptr()).codec_tag };
        assert_eq!(tag, XVID_TAG);

        let decoder = codec::context::Context::from_parameters(params)
            .unwrap()
            .decoder()
            .video()
            .unwrap();
        assert_eq!((decoder.width(), decoder.height()), (160, 120));
    }

    #[test]
    fn test_written_frame_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("count.avi");
        record(&path, 5);

        let mut ictx = format::input(&path).unwrap();
        let index = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .unwrap()
            .index();
        let packets = ictx.packets().filter(|(s, _)| s.index() == index).count();
        assert_eq!(packets, 5);
    }

    #[test]
    fn test_packet_timestamps_follow_frame_rate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timed.avi");
        record_at(&path, 6, 10.0);

        let mut ictx = format::input(&path).unwrap();
        let stream = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .unwrap();
        let (index, tb) = (stream.index(), stream.time_base());
        let last = ictx
            .packets()
            .filter(|(s, _)| s.index() == index)
            .filter_map(|(_, p)| p.dts().or(p.pts()))
            .max()
            .unwrap();

        // frame 5 of a 10 fps stream sits at 0.5s
        let seconds = last as f64 * f64::from(tb);
        assert_relative_eq!(seconds, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_write_without_open_returns_error() {
        let mut writer = FfmpegWriter::new();
        assert!(writer.write(&solid_frame(0, 160, 120, 128)).is_err());
    }

    #[test]
    fn test_mismatched_frame_size_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = FfmpegWriter::new();
        writer
            .open(&dir.path().join("out.avi"), &metadata(160, 120, 20.0))
            .unwrap();
        assert!(writer.write(&solid_frame(0, 80, 60, 0)).is_err());
        writer.close().unwrap();
    }

    #[test]
    fn test_close_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = FfmpegWriter::new();
        writer
            .open(&dir.path().join("out.avi"), &metadata(160, 120, 20.0))
            .unwrap();
        writer.close().unwrap();
        assert!(writer.close().is_ok());
    }

    #[test]
    fn test_open_in_missing_directory_fails() {
        let mut writer = FfmpegWriter::new();
        let result = writer.open(
            Path::new("/nonexistent/dir/out.avi"),
            &metadata(160, 120, 20.0),
        );
        assert!(result.is_err());
    }
}
