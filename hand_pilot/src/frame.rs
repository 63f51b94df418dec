//! Frames and where they come from.
//!
//! A [`Frame`] is a packed `0x00RRGGBB` buffer, the format the preview
//! window takes directly.  The detector gets an RGB byte copy.
//!
//! Sources:
//!
//! * [`TestPatternSource`] — always available; a slowly drifting gradient.
//! * `V4l2Source` — a real webcam, with the `v4l2` feature.

use crate::error::PilotError;

// ════════════════════════════════════════════════════════════════════════════
// Frame
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub width:  u32,
    pub height: u32,
    pub pixels: Vec<u32>,
}

impl Frame {
    /// An all-black frame.
    pub fn new(width: u32, height: u32) -> Self {
        Frame { width, height, pixels: vec![0; width as usize * height as usize] }
    }

    /// Pack interleaved RGB bytes.  `None` if `rgb` is too short.
    pub fn from_rgb(width: u32, height: u32, rgb: &[u8]) -> Option<Self> {
        let n = width as usize * height as usize;
        if rgb.len() < n * 3 {
            return None;
        }
        let pixels = rgb[..n * 3]
            .chunks_exact(3)
            .map(|p| (p[0] as u32) << 16 | (p[1] as u32) << 8 | p[2] as u32)
            .collect();
        Some(Frame { width, height, pixels })
    }

    /// Interleaved RGB bytes, row-major.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 3);
        for &p in &self.pixels {
            out.extend_from_slice(&[(p >> 16) as u8, (p >> 8) as u8, p as u8]);
        }
        out
    }

    /// Flip left↔right in place, so the preview behaves like a mirror.
    pub fn mirror(&mut self) {
        let w = self.width as usize;
        if w == 0 {
            return;
        }
        for row in self.pixels.chunks_exact_mut(w) {
            row.reverse();
        }
    }

    /// Nearest-neighbour shrink by an integer factor.
    pub fn downscale(&self, factor: u32) -> Frame {
        let factor = factor.max(1);
        let (w, h) = (self.width / factor, self.height / factor);
        let mut out = Frame::new(w, h);
        for y in 0..h as usize {
            let src_row = y * factor as usize * self.width as usize;
            for x in 0..w as usize {
                out.pixels[y * w as usize + x] = self.pixels[src_row + x * factor as usize];
            }
        }
        out
    }

    /// Write one pixel; anything off-frame is ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height {
            self.pixels[y as usize * self.width as usize + x as usize] = color;
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// FrameSource
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can hand out camera frames, one at a time, blocking.
pub trait FrameSource {
    /// `Ok(None)` is an empty read: no frame this time, try again.
    fn read(&mut self) -> Result<Option<Frame>, PilotError>;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn read(&mut self) -> Result<Option<Frame>, PilotError> { (**self).read() }
}

// ── Test pattern ──────────────────────────────────────────────────────────

/// Synthetic frames for running without a camera.
pub struct TestPatternSource {
    width:  u32,
    height: u32,
    tick:   u32,
}

impl TestPatternSource {
    pub fn new(width: u32, height: u32) -> Self {
        TestPatternSource { width, height, tick: 0 }
    }
}

impl FrameSource for TestPatternSource {
    fn read(&mut self) -> Result<Option<Frame>, PilotError> {
        let mut f = Frame::new(self.width, self.height);
        let w = u64::from(self.width.max(1));
        let h = u64::from(self.height.max(1));
        let tick = u64::from(self.tick) % w;
        for y in 0..self.height {
            let g = (24 + u64::from(y) * 40 / h) as u32;
            for x in 0..self.width {
                let b = (40 + (u64::from(x) + tick) % w * 50 / w) as u32;
                f.pixels[(y * self.width + x) as usize] = (16 << 16) | (g << 8) | b;
            }
        }
        // stripes scroll two columns per frame
        self.tick = ((tick + 2) % w) as u32;
        Ok(Some(f))
    }
}

// ── YUYV → RGB ────────────────────────────────────────────────────────────

/// Convert packed YUYV 4:2:2 to interleaved RGB with BT.601 coefficients.
///
/// `None` if `data` holds fewer than `width * height * 2` bytes.
#[cfg(any(feature = "v4l2", test))]
pub fn yuyv_to_rgb(data: &[u8], width: u32, height: u32) -> Option<Vec<u8>> {
    let pixel_count = width as usize * height as usize;
    let expected = pixel_count * 2;
    if data.len() < expected {
        return None;
    }
    let mut rgb = Vec::with_capacity(pixel_count * 3);
    for chunk in data[..expected].chunks_exact(4) {
        let u = chunk[1] as f32 - 128.0;
        let v = chunk[3] as f32 - 128.0;
        for y in [chunk[0] as f32, chunk[2] as f32] {
            let r = (y + 1.402 * v).clamp(0.0, 255.0) as u8;
            let g = (y - 0.344 * u - 0.714 * v).clamp(0.0, 255.0) as u8;
            let b = (y + 1.772 * u).clamp(0.0, 255.0) as u8;
            rgb.extend_from_slice(&[r, g, b]);
        }
    }
    Some(rgb)
}

// ── V4L2 webcam ───────────────────────────────────────────────────────────

#[cfg(feature = "v4l2")]
pub use self::v4l2::V4l2Source;

#[cfg(feature = "v4l2")]
mod v4l2 {
    use super::{yuyv_to_rgb, Frame, FrameSource};
    use crate::error::PilotError;
    use v4l::buffer::Type;
    use v4l::io::mmap::Stream as MmapStream;
    use v4l::io::traits::CaptureStream;
    use v4l::video::Capture;
    use v4l::{Device, Format, FourCC};

    const BUFFER_COUNT: u32 = 4;

    /// Webcam capture through Video4Linux, YUYV at the requested size.
    ///
    /// The device is released when the source is dropped.
    pub struct V4l2Source {
        stream: MmapStream<'static>,
        width:  u32,
        height: u32,
        path:   String,
        _device: Device,
    }

    fn camera_err(e: std::io::Error) -> PilotError {
        PilotError::Camera(e.to_string())
    }

    impl V4l2Source {
        pub fn open(path: &str, width: u32, height: u32) -> Result<Self, PilotError> {
            let device = Device::with_path(path).map_err(camera_err)?;
            let wanted = Format::new(width, height, FourCC::new(b"YUYV"));
            let format = Capture::set_format(&device, &wanted).map_err(camera_err)?;
            if format.fourcc != FourCC::new(b"YUYV") {
                return Err(PilotError::Camera(format!("{path}: YUYV not supported")));
            }
            if (format.width, format.height) != (width, height) {
                log::warn!(
                    "camera gave {}x{} instead of {}x{}",
                    format.width, format.height, width, height
                );
            }
            let stream = MmapStream::with_buffers(&device, Type::VideoCapture, BUFFER_COUNT)
                .map_err(camera_err)?;
            log::info!("camera {} open at {}x{}", path, format.width, format.height);
            Ok(V4l2Source {
                stream,
                width:  format.width,
                height: format.height,
                path:   path.to_string(),
                _device: device,
            })
        }
    }

    impl FrameSource for V4l2Source {
        fn read(&mut self) -> Result<Option<Frame>, PilotError> {
            let (data, _meta) = CaptureStream::next(&mut self.stream).map_err(camera_err)?;
            let frame = yuyv_to_rgb(data, self.width, self.height)
                .and_then(|rgb| Frame::from_rgb(self.width, self.height, &rgb));
            Ok(frame)
        }
    }

    impl Drop for V4l2Source {
        fn drop(&mut self) {
            log::info!("camera {} released", self.path);
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(w: u32, h: u32) -> Frame {
        Frame { width: w, height: h, pixels: (0..w * h).collect() }
    }

    #[test]
    fn mirror_reverses_each_row() {
        let mut f = numbered(3, 2);
        f.mirror();
        assert_eq!(f.pixels, vec![2, 1, 0, 5, 4, 3]);
    }

    #[test]
    fn downscale_halves_dimensions() {
        let f = numbered(4, 4).downscale(2);
        assert_eq!((f.width, f.height), (2, 2));
        assert_eq!(f.pixels, vec![0, 2, 8, 10]);
    }

    #[test]
    fn full_preview_size() {
        let f = Frame::new(1280, 720).downscale(2);
        assert_eq!((f.width, f.height), (640, 360));
    }

    #[test]
    fn rgb_packing() {
        let f = Frame::from_rgb(2, 1, &[255, 0, 0, 1, 2, 3]).unwrap();
        assert_eq!(f.pixels, vec![0xFF0000, 0x010203]);
        assert_eq!(f.to_rgb_bytes(), vec![255, 0, 0, 1, 2, 3]);
        assert!(Frame::from_rgb(2, 2, &[0; 6]).is_none());
    }

    #[test]
    fn set_pixel_clips() {
        let mut f = Frame::new(2, 2);
        f.set_pixel(-1, 0, 7);
        f.set_pixel(2, 1, 7);
        f.set_pixel(1, 1, 7);
        assert_eq!(f.pixels, vec![0, 0, 0, 7]);
    }

    #[test]
    fn test_pattern_has_requested_size() {
        let mut src = TestPatternSource::new(64, 36);
        let f = src.read().unwrap().unwrap();
        assert_eq!((f.width, f.height, f.pixels.len()), (64, 36, 64 * 36));
    }

    #[test]
    fn test_pattern_scrolls_and_wraps() {
        let mut src = TestPatternSource::new(4, 1);
        let a = src.read().unwrap().unwrap();
        let b = src.read().unwrap().unwrap();
        assert_eq!(b.pixels[0], a.pixels[2]);

        let mut src = TestPatternSource { width: 4, height: 1, tick: u32::MAX - 1 };
        let c = src.read().unwrap().unwrap();
        let d = src.read().unwrap().unwrap();
        assert_eq!(c.pixels[0] & 0xFF, 65);
        assert_eq!(d.pixels[0] & 0xFF, 40);
    }

    #[test]
    fn yuyv_grey_maps_to_grey() {
        let rgb = yuyv_to_rgb(&[100, 128, 200, 128], 2, 1).unwrap();
        assert_eq!(rgb, vec![100, 100, 100, 200, 200, 200]);
    }

    #[test]
    fn yuyv_short_buffer() {
        assert!(yuyv_to_rgb(&[0; 3], 2, 1).is_none());
    }
}
