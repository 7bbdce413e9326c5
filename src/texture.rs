//! Procedural surface and ring textures.
//!
//! A small RGBA canvas with just enough drawing primitives (gradients,
//! ellipses, polygons, alpha blending) to paint each body's look. Textures are
//! 2:1 equirectangular so they wrap a UV sphere; shape sizes are authored for a
//! 1024-pixel-wide canvas and scaled to the configured size.

use bevy::{
    asset::RenderAssetUsages,
    prelude::*,
    render::render_resource::{Extent3d, TextureDimension, TextureFormat},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::content::{RingStyle, TextureStyle};

/// Canvas width the shape sizes below are authored for.
const REFERENCE_WIDTH: f32 = 1024.0;

pub const RING_TEXTURE_WIDTH: u32 = 512;
pub const RING_TEXTURE_HEIGHT: u32 = 64;

/// Range body texture widths are clamped to.
pub const MIN_TEXTURE_SIZE: u32 = 8;
pub const MAX_TEXTURE_SIZE: u32 = 4096;

/// `0xRRGGBB` plus an opacity in `[0, 1]`.
pub fn rgba(hex: u32, alpha: f32) -> [u8; 4] {
    [
        ((hex >> 16) & 0xFF) as u8,
        ((hex >> 8) & 0xFF) as u8,
        (hex & 0xFF) as u8,
        (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
    ]
}

/// A gradient stop: offset in `[0, 1]` and colour.
pub type Stop = (f32, [u8; 4]);

/// Colour of a multi-stop gradient at `t`. Clamps outside the first and last stop.
pub fn sample_gradient(stops: &[Stop], t: f32) -> [u8; 4] {
    let Some(&(first_t, first)) = stops.first() else {
        return [0, 0, 0, 0];
    };
    if t <= first_t {
        return first;
    }
    for pair in stops.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if t <= t1 {
            let span = (t1 - t0).max(f32::EPSILON);
            let f = (t - t0) / span;
            let mut out = [0u8; 4];
            for i in 0..4 {
                out[i] = (c0[i] as f32 + (c1[i] as f32 - c0[i] as f32) * f).round() as u8;
            }
            return out;
        }
    }
    stops[stops.len() - 1].1
}

/// RGBA8 pixel buffer with source-over blending.
#[derive(Clone, Debug)]
pub struct TextureBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl TextureBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Overwrite every pixel.
    pub fn fill(&mut self, color: [u8; 4]) {
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&color);
        }
    }

    /// Blend `color` over the pixel at `(x, y)`; out-of-bounds is ignored.
    pub fn blend(&mut self, x: i32, y: i32, color: [u8; 4]) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let i = self.offset(x as u32, y as u32);
        let a = color[3] as f32 / 255.0;
        if a >= 1.0 {
            self.data[i..i + 4].copy_from_slice(&color);
            return;
        }
        // Straight-alpha "over".
        let dst_a = self.data[i + 3] as f32 / 255.0;
        let out_a = a + dst_a * (1.0 - a);
        if out_a <= 0.0 {
            return;
        }
        for c in 0..3 {
            let dst = self.data[i + c] as f32;
            let mixed = (color[c] as f32 * a + dst * dst_a * (1.0 - a)) / out_a;
            self.data[i + c] = mixed.round().clamp(0.0, 255.0) as u8;
        }
        self.data[i + 3] = (out_a * 255.0).round() as u8;
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: [u8; 4]) {
        let x0 = x.floor() as i32;
        let y0 = y.floor() as i32;
        let x1 = (x + w).ceil() as i32;
        let y1 = (y + h).ceil() as i32;
        for py in y0.max(0)..y1.min(self.height as i32) {
            for px in x0.max(0)..x1.min(self.width as i32) {
                self.blend(px, py, color);
            }
        }
    }

    /// Gradient along the x axis, left edge `0`, right edge `1`.
    pub fn horizontal_gradient(&mut self, stops: &[Stop]) {
        let w = self.width.max(2) as f32 - 1.0;
        for x in 0..self.width {
            let color = sample_gradient(stops, x as f32 / w);
            for y in 0..self.height {
                self.blend(x as i32, y as i32, color);
            }
        }
    }

    /// Gradient along the y axis, top edge `0`, bottom edge `1`.
    pub fn vertical_gradient(&mut self, stops: &[Stop]) {
        let h = self.height.max(2) as f32 - 1.0;
        for y in 0..self.height {
            let color = sample_gradient(stops, y as f32 / h);
            for x in 0..self.width {
                self.blend(x as i32, y as i32, color);
            }
        }
    }

    /// Gradient by distance from `(cx, cy)`, reaching `1` at `radius`.
    pub fn radial_gradient(&mut self, cx: f32, cy: f32, radius: f32, stops: &[Stop]) {
        let radius = radius.max(f32::EPSILON);
        for y in 0..self.height {
            for x in 0..self.width {
                let d = Vec2::new(x as f32 + 0.5 - cx, y as f32 + 0.5 - cy).length();
                self.blend(x as i32, y as i32, sample_gradient(stops, d / radius));
            }
        }
    }

    /// Filled ellipse with radii `rx`, `ry`, rotated by `angle` radians.
    pub fn fill_ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32, angle: f32, color: [u8; 4]) {
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        let (sin, cos) = angle.sin_cos();
        let reach = rx.max(ry);
        let y0 = (cy - reach).floor() as i32;
        let y1 = (cy + reach).ceil() as i32;
        let x0 = (cx - reach).floor() as i32;
        let x1 = (cx + reach).ceil() as i32;
        for py in y0.max(0)..y1.min(self.height as i32) {
            for px in x0.max(0)..x1.min(self.width as i32) {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                let u = (dx * cos + dy * sin) / rx;
                let v = (-dx * sin + dy * cos) / ry;
                if u * u + v * v <= 1.0 {
                    self.blend(px, py, color);
                }
            }
        }
    }

    pub fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, color: [u8; 4]) {
        self.fill_ellipse(cx, cy, r, r, 0.0, color);
    }

    /// Even-odd scanline fill of a closed polygon.
    pub fn fill_polygon(&mut self, points: &[Vec2], color: [u8; 4]) {
        if points.len() < 3 {
            return;
        }
        let min_y = points.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
        let max_y = points.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);
        let y0 = (min_y.floor() as i32).max(0);
        let y1 = (max_y.ceil() as i32).min(self.height as i32);

        let mut crossings: Vec<f32> = Vec::new();
        for py in y0..y1 {
            let sy = py as f32 + 0.5;
            crossings.clear();
            for (i, a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                if (a.y <= sy) != (b.y <= sy) {
                    crossings.push(a.x + (sy - a.y) / (b.y - a.y) * (b.x - a.x));
                }
            }
            crossings.sort_by(f32::total_cmp);
            for span in crossings.chunks_exact(2) {
                let start = (span[0] - 0.5).ceil() as i32;
                let end = (span[1] - 0.5).floor() as i32;
                for px in start.max(0)..=end.min(self.width as i32 - 1) {
                    self.blend(px, py, color);
                }
            }
        }
    }

    /// Blob of `segments` points whose radius varies by up to `roughness`.
    pub fn fill_blob(
        &mut self,
        rng: &mut impl Rng,
        center: Vec2,
        radius: f32,
        roughness: f32,
        color: [u8; 4],
    ) {
        const SEGMENTS: usize = 12;
        let points: Vec<Vec2> = (0..SEGMENTS)
            .map(|i| {
                let angle = i as f32 / SEGMENTS as f32 * std::f32::consts::TAU;
                let r = radius * (1.0 - roughness / 2.0 + rng.gen_range(0.0..1.0) * roughness);
                center + Vec2::new(angle.cos(), angle.sin()) * r
            })
            .collect();
        self.fill_polygon(&points, color);
    }

    /// Convert to a Bevy image asset.
    pub fn into_image(self) -> Image {
        Image::new(
            Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            self.data,
            TextureFormat::Rgba8UnormSrgb,
            RenderAssetUsages::RENDER_WORLD,
        )
    }
}

/// Width and height of a body texture asked to be `size` pixels wide.
pub fn body_texture_extent(size: u32) -> (u32, u32) {
    let width = size.clamp(MIN_TEXTURE_SIZE, MAX_TEXTURE_SIZE);
    (width, width / 2)
}

/// Surface texture for a body, `size` pixels wide and `size / 2` tall.
pub fn body_texture(style: TextureStyle, base: [u8; 3], seed: u64, size: u32) -> TextureBuffer {
    let (width, height) = body_texture_extent(size);
    let mut tex = TextureBuffer::new(width, height);
    let mut rng = StdRng::seed_from_u64(seed);
    let s = width as f32 / REFERENCE_WIDTH;
    let (w, h) = (width as f32, height as f32);

    tex.fill([base[0], base[1], base[2], 255]);

    match style {
        TextureStyle::Plain => {}
        TextureStyle::Plasma => {
            tex.radial_gradient(
                w / 2.0,
                h / 2.0,
                w,
                &[
                    (0.0, rgba(0xFFF176, 1.0)),
                    (0.2, rgba(0xF57F17, 1.0)),
                    (0.8, rgba(0xBF360C, 1.0)),
                ],
            );
            for _ in 0..200 {
                let alpha = rng.gen_range(0.0..0.4);
                let r = rng.gen_range(10.0..90.0) * s;
                let (x, y) = (rng.gen_range(0.0..w), rng.gen_range(0.0..h));
                tex.fill_circle(x, y, r, [255, 200, 0, (alpha * 255.0) as u8]);
            }
        }
        TextureStyle::Bands => {
            let bands = [
                (0.1, 0x6D4C41, 40.0),
                (0.3, 0xD7CCC8, 60.0),
                (0.45, 0x8D6E63, 50.0),
                (0.6, 0xEFEBE9, 40.0),
                (0.8, 0x5D4037, 50.0),
            ];
            let step = (20.0 * s).max(1.0);
            for (y, color, thickness) in bands {
                let top = y * h;
                let bottom = top + thickness * s;
                let mut outline = Vec::new();
                let mut x = 0.0;
                while x <= w {
                    let wave = (x / s * 0.02).sin() * 15.0 * s + rng.gen_range(-5.0..5.0) * s;
                    outline.push(Vec2::new(x, top + wave));
                    x += step;
                }
                let mut x = w;
                while x >= 0.0 {
                    let wave = (x / s * 0.02).sin() * 15.0 * s + rng.gen_range(-5.0..5.0) * s;
                    outline.push(Vec2::new(x, bottom + wave));
                    x -= step;
                }
                tex.fill_polygon(&outline, rgba(color, 1.0));
            }
            // Great Red Spot with a darker rim.
            tex.fill_ellipse(w * 0.7, h * 0.6, 84.0 * s, 54.0 * s, 0.0, rgba(0x5D4037, 1.0));
            tex.fill_ellipse(w * 0.7, h * 0.6, 80.0 * s, 50.0 * s, 0.0, rgba(0x8D6E63, 1.0));
        }
        TextureStyle::GoldGradient => {
            tex.vertical_gradient(&[
                (0.0, rgba(0xC8A355, 1.0)),
                (0.2, rgba(0xF4D03F, 1.0)),
                (0.5, rgba(0xFCF3CF, 1.0)),
                (0.8, rgba(0xF4D03F, 1.0)),
                (1.0, rgba(0xC8A355, 1.0)),
            ]);
            let spacing = (10.0 * s).max(1.0);
            let mut y = 0.0;
            while y < h {
                if rng.gen_bool(0.5) {
                    tex.fill_rect(0.0, y, w, (2.0 * s).max(1.0), rgba(0xFFFFFF, 0.1));
                }
                y += spacing;
            }
        }
        TextureStyle::Continents => {
            tex.fill(rgba(0x1565C0, 1.0));
            for _ in 0..6 {
                let center = Vec2::new(rng.gen_range(0.0..w), h * 0.2 + rng.gen_range(0.0..h * 0.6));
                let radius = rng.gen_range(50.0..170.0) * s;
                tex.fill_blob(&mut rng, center, radius, 0.8, rgba(0x4CAF50, 1.0));
                if rng.gen_bool(0.5) {
                    tex.fill_blob(&mut rng, center, radius * 0.4, 0.5, rgba(0xD4E157, 1.0));
                }
            }
            let cap = 40.0 * s;
            tex.fill_rect(0.0, 0.0, w, cap, rgba(0xFFFFFF, 1.0));
            tex.fill_rect(0.0, h - cap, w, cap, rgba(0xFFFFFF, 1.0));
        }
        TextureStyle::Clouds => {
            tex.fill(rgba(0xFBC02D, 1.0));
            for _ in 0..100 {
                let (x, y) = (rng.gen_range(0.0..w), rng.gen_range(0.0..h));
                let r = rng.gen_range(100.0..300.0) * s;
                let angle = rng.gen_range(0.0..std::f32::consts::PI);
                tex.fill_ellipse(x, y, r, r / 2.0, angle, rgba(0xFFFFFF, 0.2));
            }
        }
        TextureStyle::RustPatches => {
            tex.fill(rgba(0xD84315, 1.0));
            for _ in 0..20 {
                let center = Vec2::new(rng.gen_range(0.0..w), rng.gen_range(0.0..h));
                let radius = rng.gen_range(30.0..80.0) * s;
                tex.fill_blob(&mut rng, center, radius, 0.5, [62, 39, 35, 153]);
            }
            tex.fill_ellipse(w / 2.0, 20.0 * s, 150.0 * s, 30.0 * s, 0.0, rgba(0xFFFFFF, 1.0));
            tex.fill_ellipse(w / 2.0, h - 20.0 * s, 150.0 * s, 30.0 * s, 0.0, rgba(0xFFFFFF, 1.0));
        }
        TextureStyle::IceGiant => {
            tex.vertical_gradient(&[
                (0.0, rgba(0x1A237E, 1.0)),
                (0.5, rgba(0x2979FF, 1.0)),
                (1.0, rgba(0x1A237E, 1.0)),
            ]);
            tex.fill_ellipse(w * 0.7, h * 0.5, 80.0 * s, 50.0 * s, 0.0, [0, 0, 50, 77]);
            for _ in 0..10 {
                let (x, y) = (rng.gen_range(0.0..w), rng.gen_range(0.0..h));
                tex.fill_rect(x, y, 60.0 * s, (5.0 * s).max(1.0), rgba(0xFFFFFF, 0.2));
            }
        }
    }

    tex
}

/// Ring texture. `u` runs from the inner edge (left) to the outer edge (right),
/// which is how Bevy's annulus mesh lays out its UVs.
pub fn ring_texture(style: RingStyle, seed: u64) -> TextureBuffer {
    let mut tex = TextureBuffer::new(RING_TEXTURE_WIDTH, RING_TEXTURE_HEIGHT);
    let mut rng = StdRng::seed_from_u64(seed);

    let stops: &[Stop] = match style {
        RingStyle::Saturn => &[
            (0.0, rgba(0xF4D03F, 0.0)),
            (0.1, rgba(0xF4D03F, 0.6)),
            (0.3, rgba(0xF4D03F, 0.8)),
            // Cassini division
            (0.5, rgba(0xF4D03F, 0.1)),
            (0.55, rgba(0xD4AC0D, 0.7)),
            (1.0, rgba(0xB7950B, 0.0)),
        ],
        RingStyle::Uranus => &[
            (0.0, rgba(0xC8E6FF, 0.0)),
            (0.4, rgba(0xC8E6FF, 0.2)),
            (0.5, rgba(0xC8E6FF, 0.1)),
            (0.6, rgba(0xC8E6FF, 0.2)),
            (1.0, rgba(0xC8E6FF, 0.0)),
        ],
    };
    tex.horizontal_gradient(stops);

    // Dust streaks only brighten rings that are already there.
    let h = RING_TEXTURE_HEIGHT as f32;
    for _ in 0..500 {
        let column = rng.gen_range(0..RING_TEXTURE_WIDTH);
        let alpha = rng.gen_range(0.0..0.2);
        if tex.pixel(column, 0)[3] == 0 {
            continue;
        }
        tex.fill_rect(column as f32, 0.0, 1.0, h, rgba(0xFFFFFF, alpha));
    }

    tex
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_texture_size_is_clamped() {
        assert_eq!(body_texture_extent(0), (8, 4));
        assert_eq!(body_texture_extent(512), (512, 256));
        assert_eq!(body_texture_extent(u32::MAX), (MAX_TEXTURE_SIZE, MAX_TEXTURE_SIZE / 2));
    }

    #[test]
    fn test_largest_buffer_is_sized_without_overflow() {
        let tex = TextureBuffer::new(MAX_TEXTURE_SIZE, MAX_TEXTURE_SIZE / 2);
        assert_eq!(tex.data().len(), 4096 * 2048 * 4);
        assert_eq!(tex.pixel(MAX_TEXTURE_SIZE - 1, MAX_TEXTURE_SIZE / 2 - 1), [0, 0, 0, 0]);
    }

    #[test]
    fn test_body_texture_is_two_to_one() {
        let tex = body_texture(TextureStyle::Plain, [10, 20, 30], 1, 128);
        assert_eq!((tex.width(), tex.height()), (128, 64));
        assert_eq!(tex.data().len(), 128 * 64 * 4);
        assert_eq!(tex.pixel(5, 5), [10, 20, 30, 255]);
    }

    #[test]
    fn test_same_seed_same_texture() {
        let a = body_texture(TextureStyle::Continents, [0, 0, 0], 42, 128);
        let b = body_texture(TextureStyle::Continents, [0, 0, 0], 42, 128);
        let c = body_texture(TextureStyle::Continents, [0, 0, 0], 43, 128);
        assert_eq!(a.data(), b.data());
        assert_ne!(a.data(), c.data());
    }

    #[test]
    fn test_earth_has_polar_caps() {
        let tex = body_texture(TextureStyle::Continents, [0, 0, 0], 3, 256);
        assert_eq!(tex.pixel(10, 0), [255, 255, 255, 255]);
        assert_eq!(tex.pixel(10, tex.height() - 1), [255, 255, 255, 255]);
    }

    #[test]
    fn test_sun_is_bright_in_the_middle() {
        let tex = body_texture(TextureStyle::Plasma, [0, 0, 0], 9, 256);
        let centre = tex.pixel(128, 64);
        let corner = tex.pixel(0, 0);
        let brightness = |p: [u8; 4]| p[0] as u32 + p[1] as u32 + p[2] as u32;
        assert!(brightness(centre) > brightness(corner));
    }

    #[test]
    fn test_ring_edges_transparent() {
        for style in [RingStyle::Saturn, RingStyle::Uranus] {
            let tex = ring_texture(style, 5);
            assert_eq!(tex.pixel(0, 10)[3], 0);
            assert_eq!(tex.pixel(RING_TEXTURE_WIDTH - 1, 10)[3], 0);
            assert!(tex.pixel(RING_TEXTURE_WIDTH / 4, 10)[3] > 0);
        }
    }

    #[test]
    fn test_polygon_fill_covers_square() {
        let mut tex = TextureBuffer::new(10, 10);
        let square = [
            Vec2::new(2.0, 2.0),
            Vec2::new(8.0, 2.0),
            Vec2::new(8.0, 8.0),
            Vec2::new(2.0, 8.0),
        ];
        tex.fill_polygon(&square, [255, 0, 0, 255]);
        assert_eq!(tex.pixel(5, 5), [255, 0, 0, 255]);
        assert_eq!(tex.pixel(2, 2), [255, 0, 0, 255]);
        assert_eq!(tex.pixel(1, 5), [0, 0, 0, 0]);
        assert_eq!(tex.pixel(8, 5), [0, 0, 0, 0]);
    }

    #[test]
    fn test_blend_half_alpha() {
        let mut tex = TextureBuffer::new(1, 1);
        tex.fill([0, 0, 0, 255]);
        tex.blend(0, 0, [255, 255, 255, 128]);
        let p = tex.pixel(0, 0);
        assert!((127..=129).contains(&p[0]));
        assert_eq!(p[3], 255);
        // Out of bounds is a no-op.
        tex.blend(4, -1, [1, 2, 3, 255]);
    }

    #[test]
    fn test_gradient_clamps() {
        let stops = [(0.2, [0, 0, 0, 255]), (0.8, [200, 100, 50, 255])];
        assert_eq!(sample_gradient(&stops, 0.0), [0, 0, 0, 255]);
        assert_eq!(sample_gradient(&stops, 1.0), [200, 100, 50, 255]);
        assert_eq!(sample_gradient(&stops, 0.5), [100, 50, 25, 255]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn prop_gradient_channels_between_stops(t in -1.0f32..2.0) {
            let stops = [(0.0, [10, 20, 30, 40]), (1.0, [110, 120, 130, 140])];
            let c = sample_gradient(&stops, t);
            for (i, channel) in c.iter().enumerate() {
                prop_assert!(*channel >= stops[0].1[i] && *channel <= stops[1].1[i]);
            }
        }
    }
}
