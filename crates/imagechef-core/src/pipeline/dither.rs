//! Palette reduction with Riemersma dithering.
//!
//! The palette is chosen by weighted median cut over the image's RGB
//! histogram. Pixels are then visited along a Hilbert curve and each one is
//! nudged by a weighted sum of the quantization errors of the last
//! [`QUEUE_LEN`] pixels before being mapped to its nearest palette entry.
//! Following the curve keeps the diffused error spatially local without the
//! directional artifacts of scanline error diffusion.

use image::{DynamicImage, Rgba, RgbaImage};
use std::collections::HashMap;

/// Number of past errors that contribute to the current pixel.
const QUEUE_LEN: usize = 16;

/// Weight of the newest error relative to the oldest.
const WEIGHT_RATIO: f32 = 16.0;

/// Quantize `image` to at most `colors` colors using Riemersma dithering.
///
/// Alpha is carried through untouched. Images without an alpha channel come
/// back as RGB8, all others as RGBA8. The palette is built from 8-bit
/// samples, so 16-bit and float inputs are quantized to 8 bits per channel
/// first; the result never holds more than 256 levels per channel anyway.
pub fn riemersma_dither(image: &DynamicImage, colors: u32) -> DynamicImage {
    let had_alpha = image.color().has_alpha();
    let mut rgba = image.to_rgba8();

    let palette = median_cut_palette(&rgba, colors.max(1) as usize);
    tracing::trace!(
        "Dithering {}x{} to {} palette entries",
        rgba.width(),
        rgba.height(),
        palette.len()
    );
    dither_in_place(&mut rgba, &palette);

    if had_alpha {
        DynamicImage::ImageRgba8(rgba)
    } else {
        DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(rgba).to_rgb8())
    }
}

/// Build a palette of at most `max_colors` entries by weighted median cut.
pub fn median_cut_palette(image: &RgbaImage, max_colors: usize) -> Vec<[u8; 3]> {
    let mut histogram: HashMap<[u8; 3], u32> = HashMap::new();
    for Rgba([r, g, b, _]) in image.pixels() {
        *histogram.entry([*r, *g, *b]).or_insert(0) += 1;
    }
    if histogram.is_empty() {
        return vec![[0, 0, 0]];
    }

    let mut boxes: Vec<ColorBox> = vec![ColorBox::new(histogram.into_iter().collect())];

    while boxes.len() < max_colors {
        // Split the box with the widest channel range that can still be split
        let Some((index, _)) = boxes
            .iter()
            .enumerate()
            .filter(|(_, b)| b.colors.len() > 1)
            .max_by_key(|(_, b)| b.widest_channel().1)
        else {
            break;
        };
        let target = boxes.swap_remove(index);
        let (low, high) = target.split();
        boxes.push(low);
        boxes.push(high);
    }

    boxes.iter().map(ColorBox::average).collect()
}

/// A set of histogram entries that maps to one palette color.
struct ColorBox {
    colors: Vec<([u8; 3], u32)>,
}

impl ColorBox {
    fn new(colors: Vec<([u8; 3], u32)>) -> Self {
        Self { colors }
    }

    /// Channel with the largest spread, and that spread.
    fn widest_channel(&self) -> (usize, u8) {
        (0..3)
            .map(|c| {
                let (min, max) = self
                    .colors
                    .iter()
                    .fold((u8::MAX, u8::MIN), |(lo, hi), (rgb, _)| {
                        (lo.min(rgb[c]), hi.max(rgb[c]))
                    });
                (c, max - min)
            })
            .max_by_key(|&(_, range)| range)
            .unwrap_or((0, 0))
    }

    /// Split at the pixel-weighted median of the widest channel.
    ///
    /// Both halves are non-empty; callers only split boxes with 2+ colors.
    fn split(mut self) -> (ColorBox, ColorBox) {
        let (channel, _) = self.widest_channel();
        self.colors.sort_unstable_by_key(|(rgb, _)| rgb[channel]);

        let total: u64 = self.colors.iter().map(|(_, n)| u64::from(*n)).sum();
        let mut running = 0u64;
        let mut cut = self.colors.len() / 2;
        for (i, (_, n)) in self.colors.iter().enumerate() {
            running += u64::from(*n);
            if running * 2 >= total {
                cut = i + 1;
                break;
            }
        }
        let cut = cut.clamp(1, self.colors.len() - 1);

        let high = self.colors.split_off(cut);
        (ColorBox::new(self.colors), ColorBox::new(high))
    }

    fn average(&self) -> [u8; 3] {
        let mut sums = [0u64; 3];
        let mut count = 0u64;
        for (rgb, n) in &self.colors {
            for c in 0..3 {
                sums[c] += u64::from(rgb[c]) * u64::from(*n);
            }
            count += u64::from(*n);
        }
        let count = count.max(1);
        [
            ((sums[0] + count / 2) / count) as u8,
            ((sums[1] + count / 2) / count) as u8,
            ((sums[2] + count / 2) / count) as u8,
        ]
    }
}

/// Error queue weights, oldest first, normalised to sum to 1.
fn queue_weights() -> [f32; QUEUE_LEN] {
    let step = (WEIGHT_RATIO.ln() / (QUEUE_LEN as f32 - 1.0)).exp();
    let mut weights = [0.0f32; QUEUE_LEN];
    let mut w = 1.0f32;
    for slot in weights.iter_mut() {
        *slot = w;
        w *= step;
    }
    let sum: f32 = weights.iter().sum();
    for slot in weights.iter_mut() {
        *slot /= sum;
    }
    weights
}

fn dither_in_place(image: &mut RgbaImage, palette: &[[u8; 3]]) {
    let (width, height) = image.dimensions();
    let weights = queue_weights();
    let mut errors = [[0.0f32; 3]; QUEUE_LEN];
    let mut head = 0usize;
    let mut nearest_cache: HashMap<[u8; 3], [u8; 3]> = HashMap::new();

    for (x, y) in HilbertCurve::covering(width, height) {
        let pixel = image.get_pixel_mut(x, y);

        // errors[head] is the oldest entry; walk forward to the newest
        let mut diffused = [0.0f32; 3];
        for (age, weight) in weights.iter().enumerate() {
            let err = &errors[(head + age) % QUEUE_LEN];
            for c in 0..3 {
                diffused[c] += err[c] * weight;
            }
        }

        let wanted = [
            f32::from(pixel[0]) + diffused[0],
            f32::from(pixel[1]) + diffused[1],
            f32::from(pixel[2]) + diffused[2],
        ];
        let key = [
            wanted[0].round().clamp(0.0, 255.0) as u8,
            wanted[1].round().clamp(0.0, 255.0) as u8,
            wanted[2].round().clamp(0.0, 255.0) as u8,
        ];
        let chosen = *nearest_cache
            .entry(key)
            .or_insert_with(|| nearest(palette, key));

        // Overwrite the oldest error with the newest one
        errors[head] = [
            wanted[0] - f32::from(chosen[0]),
            wanted[1] - f32::from(chosen[1]),
            wanted[2] - f32::from(chosen[2]),
        ];
        head = (head + 1) % QUEUE_LEN;

        pixel[0] = chosen[0];
        pixel[1] = chosen[1];
        pixel[2] = chosen[2];
    }
}

fn nearest(palette: &[[u8; 3]], color: [u8; 3]) -> [u8; 3] {
    palette
        .iter()
        .copied()
        .min_by_key(|p| {
            (0..3)
                .map(|c| {
                    let d = i32::from(p[c]) - i32::from(color[c]);
                    (d * d) as u32
                })
                .sum::<u32>()
        })
        .unwrap_or(color)
}

/// Iterator over the cells of a `width` x `height` grid in Hilbert order.
///
/// Uses the generalized Hilbert curve, which fills rectangles of any size
/// directly so every step lands on a cell of the grid. Consecutive cells are
/// always neighbours; on grids with an odd side one step may be diagonal.
pub struct HilbertCurve {
    pending: Vec<Region>,
    run: Run,
}

/// A rectangle still to be walked, spanned by a major axis `a` and a minor
/// axis `b` from the corner at (`x`, `y`).
#[derive(Debug, Clone, Copy)]
struct Region {
    x: i64,
    y: i64,
    ax: i64,
    ay: i64,
    bx: i64,
    by: i64,
}

/// A straight line of cells being emitted.
#[derive(Debug, Clone, Copy, Default)]
struct Run {
    x: i64,
    y: i64,
    dx: i64,
    dy: i64,
    remaining: i64,
}

impl HilbertCurve {
    pub fn covering(width: u32, height: u32) -> Self {
        let (w, h) = (i64::from(width), i64::from(height));
        let pending = if w == 0 || h == 0 {
            Vec::new()
        } else if w >= h {
            vec![Region { x: 0, y: 0, ax: w, ay: 0, bx: 0, by: h }]
        } else {
            vec![Region { x: 0, y: 0, ax: 0, ay: h, bx: w, by: 0 }]
        };
        Self {
            pending,
            run: Run::default(),
        }
    }

    /// Split `r` into lines or smaller regions, pushed so they pop in walk
    /// order.
    fn expand(&mut self, r: Region) {
        let w = (r.ax + r.ay).abs();
        let h = (r.bx + r.by).abs();
        let (dax, day) = (r.ax.signum(), r.ay.signum());
        let (dbx, dby) = (r.bx.signum(), r.by.signum());

        if h == 1 {
            self.run = Run { x: r.x, y: r.y, dx: dax, dy: day, remaining: w };
            return;
        }
        if w == 1 {
            self.run = Run { x: r.x, y: r.y, dx: dbx, dy: dby, remaining: h };
            return;
        }

        let (mut ax2, mut ay2) = (r.ax.div_euclid(2), r.ay.div_euclid(2));
        let (mut bx2, mut by2) = (r.bx.div_euclid(2), r.by.div_euclid(2));
        let w2 = (ax2 + ay2).abs();
        let h2 = (bx2 + by2).abs();

        if 2 * w > 3 * h {
            // Long region: cut across the major axis, keeping halves even
            if w2 % 2 == 1 && w > 2 {
                ax2 += dax;
                ay2 += day;
            }
            self.pending.push(Region {
                x: r.x + ax2,
                y: r.y + ay2,
                ax: r.ax - ax2,
                ay: r.ay - ay2,
                bx: r.bx,
                by: r.by,
            });
            self.pending.push(Region { x: r.x, y: r.y, ax: ax2, ay: ay2, bx: r.bx, by: r.by });
        } else {
            if h2 % 2 == 1 && h > 2 {
                bx2 += dbx;
                by2 += dby;
            }
            self.pending.push(Region {
                x: r.x + (r.ax - dax) + (bx2 - dbx),
                y: r.y + (r.ay - day) + (by2 - dby),
                ax: -bx2,
                ay: -by2,
                bx: -(r.ax - ax2),
                by: -(r.ay - ay2),
            });
            self.pending.push(Region {
                x: r.x + bx2,
                y: r.y + by2,
                ax: r.ax,
                ay: r.ay,
                bx: r.bx - bx2,
                by: r.by - by2,
            });
            self.pending.push(Region { x: r.x, y: r.y, ax: bx2, ay: by2, bx: ax2, by: ay2 });
        }
    }
}

impl Iterator for HilbertCurve {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        while self.run.remaining == 0 {
            let region = self.pending.pop()?;
            self.expand(region);
        }
        let run = &mut self.run;
        let cell = (run.x as u32, run.y as u32);
        run.x += run.dx;
        run.y += run.dy;
        run.remaining -= 1;
        Some(cell)
    }
}
