use tridot_core::{PixelLayout, RgbImage};

pub const BACKGROUND: [u8; 3] = [40, 40, 40];
pub const RED: [u8; 3] = [225, 25, 30];
pub const PINK: [u8; 3] = [235, 60, 110];
pub const GREEN: [u8; 3] = [25, 200, 40];

/// Paints a filled disk of radius `r` centered on `(cx, cy)`.
pub fn paint_dot(img: &mut RgbImage, cx: f32, cy: f32, r: f32, rgb: [u8; 3]) {
    assert!(r > 0.0, "dot radius must be positive");
    let x0 = (cx - r).floor().max(0.0) as usize;
    let y0 = (cy - r).floor().max(0.0) as usize;
    let x1 = (cx + r).ceil() as usize;
    let y1 = (cy + r).ceil() as usize;
    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            if dx * dx + dy * dy <= r * r {
                img.put_rgb(x, y, rgb);
            }
        }
    }
}

/// Red is drawn this much larger than the other dots. Pink pixels also pass
/// the red test, so the red marker must be the bigger red blob.
pub const RED_EXTRA_RADIUS: f32 = 3.0;

/// Background frame with the three markers painted at the given centers.
pub fn three_dot_frame(
    width: usize,
    height: usize,
    red: (f32, f32),
    pink: (f32, f32),
    green: (f32, f32),
    r: f32,
) -> RgbImage {
    let mut img = RgbImage::filled(width, height, BACKGROUND);
    paint_dot(&mut img, red.0, red.1, r + RED_EXTRA_RADIUS, RED);
    paint_dot(&mut img, pink.0, pink.1, r, PINK);
    paint_dot(&mut img, green.0, green.1, r, GREEN);
    img
}

/// Same pixels with an opaque alpha channel appended.
pub fn to_rgba(img: &RgbImage) -> RgbImage {
    let mut data = Vec::with_capacity(img.width * img.height * 4);
    for px in img.data.chunks_exact(3) {
        data.extend_from_slice(px);
        data.push(255);
    }
    RgbImage {
        width: img.width,
        height: img.height,
        layout: PixelLayout::Rgba,
        data,
    }
}
