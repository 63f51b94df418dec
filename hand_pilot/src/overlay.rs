//! Debug overlay drawn onto the full-resolution frame before preview.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                                                              │
//! │        ┌──┐                               Throttle : 0.48    │
//! │        └──┘ ← reference box      ◯ ← left knuckle ring       │
//! │                                                              │
//! │   Elevator -0.12 | Aileron 0.27 | Throttle 0.48              │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use hand_geometry::{AxisReading, ControlVector, HandReport, HandState, PixelPoint};

use crate::frame::Frame;

pub const RED:   u32 = 0x00FF0000;
pub const BLUE:  u32 = 0x000000FF;
pub const GREY:  u32 = 0x00AAAAAA;

/// Half-size of the reference box.
const REFERENCE_BOX: i32 = 20;
const KNUCKLE_RING_RADIUS: i32 = 30;
/// Glyph scale for overlay text on a 1280×720 frame.
const TEXT_SCALE: i32 = 4;
const STATUS_POS: (i32, i32) = (100, 650);

// ════════════════════════════════════════════════════════════════════════════
// Per-frame overlay
// ════════════════════════════════════════════════════════════════════════════

/// Draw everything the current frame's report and controls call for.
///
/// `controls` is `None` when nothing was sent this frame.
pub fn draw_report(frame: &mut Frame, report: &HandReport, controls: Option<&ControlVector>) {
    if report.left == Some(HandState::Open) {
        let r = report.reference;
        draw_rect(
            frame,
            PixelPoint::new(r.x.saturating_sub(REFERENCE_BOX), r.y.saturating_sub(REFERENCE_BOX)),
            PixelPoint::new(r.x.saturating_add(REFERENCE_BOX), r.y.saturating_add(REFERENCE_BOX)),
            BLUE, 2,
        );
        if let AxisReading::Value(a) = report.attitude {
            draw_ring(frame, a.point, KNUCKLE_RING_RADIUS, BLUE, 3);
        }
    }

    if let (AxisReading::Value(t), Some(anchor)) = (report.throttle, report.throttle_anchor) {
        let (x, y) = (anchor.x.saturating_sub(50), anchor.y.saturating_add(50));
        draw_text(frame, &format!("Throttle : {:.2}", t), x, y, RED, TEXT_SCALE);
    }

    if let Some(c) = controls {
        draw_text(frame, &status_line(c), STATUS_POS.0, STATUS_POS.1, RED, TEXT_SCALE);
    }
}

pub fn status_line(c: &ControlVector) -> String {
    format!("Elevator {:.2} | Aileron {:.2} | Throttle {:.2}", c.elevator, c.aileron, c.throttle)
}

// ════════════════════════════════════════════════════════════════════════════
// Primitives
// ════════════════════════════════════════════════════════════════════════════

/// Axis-aligned rectangle outline between two corners, `thickness` px
/// inward.  Edges are walked only across the visible part of the frame.
pub fn draw_rect(frame: &mut Frame, a: PixelPoint, b: PixelPoint, color: u32, thickness: i32) {
    let (x0, x1) = (a.x.min(b.x), a.x.max(b.x));
    let (y0, y1) = (a.y.min(b.y), a.y.max(b.y));
    let (w, h) = (frame.width as i32, frame.height as i32);
    for t in 0..thickness.max(1) {
        for x in x0.max(0)..=x1.min(w - 1) {
            frame.set_pixel(x, y0.saturating_add(t), color);
            frame.set_pixel(x, y1.saturating_sub(t), color);
        }
        for y in y0.max(0)..=y1.min(h - 1) {
            frame.set_pixel(x0.saturating_add(t), y, color);
            frame.set_pixel(x1.saturating_sub(t), y, color);
        }
    }
}

/// Circle outline of the given radius, `thickness` px wide, centred on the
/// nominal radius.
pub fn draw_ring(frame: &mut Frame, c: PixelPoint, radius: i32, color: u32, thickness: i32) {
    let half = thickness.max(1) as f32 / 2.0;
    let inner = (radius as f32 - half).max(0.0);
    let outer = radius as f32 + half;
    let (inner2, outer2) = (inner * inner, outer * outer);
    let r = outer.ceil() as i32;
    for dy in -r..=r {
        for dx in -r..=r {
            let d2 = (dx * dx + dy * dy) as f32;
            if d2 >= inner2 && d2 <= outer2 {
                frame.set_pixel(c.x.saturating_add(dx), c.y.saturating_add(dy), color);
            }
        }
    }
}

/// Bitmap text with its baseline at `y`.  Each glyph is 3×5 cells of
/// `scale` px with a one-cell gap.
pub fn draw_text(frame: &mut Frame, text: &str, x: i32, y: i32, color: u32, scale: i32) {
    let scale = scale.max(1);
    let top = y.saturating_sub(5 * scale);
    let mut cx = x;
    for ch in text.chars() {
        let glyph = char_glyph(ch);
        for (row, &bits) in glyph.iter().enumerate() {
            for col in 0..3i32 {
                if bits & (1 << (2 - col)) != 0 {
                    let (px, py) = (cx.saturating_add(col * scale), top.saturating_add(row as i32 * scale));
                    fill_cell(frame, px, py, scale, color);
                }
            }
        }
        cx = cx.saturating_add(4 * scale);
        if cx >= frame.width as i32 { break; }
    }
}

fn fill_cell(frame: &mut Frame, x: i32, y: i32, size: i32, color: u32) {
    for yy in y..y.saturating_add(size) {
        for xx in x..x.saturating_add(size) {
            frame.set_pixel(xx, yy, color);
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        '|' => [0b010, 0b010, 0b010, 0b010, 0b010],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
