//! Pure bitmap algorithms used to replay draw commands.

use std::collections::VecDeque;

use egui::Color32;

use crate::bitmap::Bitmap;
use crate::command::PixelPos;

/// Two colors are equal when all four channels match exactly
pub fn colors_equal(a: Color32, b: Color32) -> bool {
    a.to_array() == b.to_array()
}

/// Paints every pixel with the background color
pub fn initialize(bitmap: &mut Bitmap, background: Color32) {
    bitmap.fill(background);
}

/// Strokes a line from `from` to `to` by stamping a filled disc of radius
/// `thickness / 2` (truncated) at every Bresenham point. Pixels outside the
/// bitmap are clipped.
pub fn stroke_line(bitmap: &mut Bitmap, from: PixelPos, to: PixelPos, color: Color32, thickness: f32) {
    let radius = (thickness / 2.0) as i32;
    for point in BresenhamLine::new(from, to) {
        stamp_disc(bitmap, point, radius, color);
    }
}

/// Recolors the 4-connected region of same-colored pixels around `seed`.
///
/// No-op when the seed lies outside the bitmap or already has `target`.
pub fn flood_fill(bitmap: &mut Bitmap, target: Color32, seed: PixelPos) {
    let Some(original) = bitmap.get(seed) else {
        return;
    };
    if colors_equal(original, target) {
        return;
    }

    // Pixels are recolored when queued, so each one is visited once.
    bitmap.set(seed, target);
    let mut queue = VecDeque::from([seed]);

    while let Some(PixelPos { x, y }) = queue.pop_front() {
        let neighbors = [
            PixelPos::new(x + 1, y),
            PixelPos::new(x - 1, y),
            PixelPos::new(x, y + 1),
            PixelPos::new(x, y - 1),
        ];
        for neighbor in neighbors {
            if bitmap.get(neighbor).is_some_and(|c| colors_equal(c, original)) {
                bitmap.set(neighbor, target);
                queue.push_back(neighbor);
            }
        }
    }
}

fn stamp_disc(bitmap: &mut Bitmap, center: PixelPos, radius: i32, color: Color32) {
    if radius < 0 {
        return;
    }
    let r2 = i64::from(radius) * i64::from(radius);

    // Clip the bounding square to the bitmap before testing pixels.
    let max_x = bitmap.width() as i64 - 1;
    let max_y = bitmap.height() as i64 - 1;
    let (cx, cy) = (i64::from(center.x), i64::from(center.y));
    let x_range = (cx - i64::from(radius)).max(0)..=(cx + i64::from(radius)).min(max_x);
    let y_range = (cy - i64::from(radius)).max(0)..=(cy + i64::from(radius)).min(max_y);

    for y in y_range {
        for x in x_range.clone() {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= r2 {
                bitmap.set(PixelPos::new(x as i32, y as i32), color);
            }
        }
    }
}

/// Integer points from one end of a segment to the other, both included
struct BresenhamLine {
    x: i64,
    y: i64,
    end_x: i64,
    end_y: i64,
    dx: i64,
    dy: i64,
    sx: i64,
    sy: i64,
    err: i64,
    done: bool,
}

impl BresenhamLine {
    fn new(from: PixelPos, to: PixelPos) -> Self {
        let (x, y) = (i64::from(from.x), i64::from(from.y));
        let (end_x, end_y) = (i64::from(to.x), i64::from(to.y));
        let dx = (end_x - x).abs();
        let dy = (end_y - y).abs();
        Self {
            x,
            y,
            end_x,
            end_y,
            dx,
            dy,
            sx: if x < end_x { 1 } else { -1 },
            sy: if y < end_y { 1 } else { -1 },
            err: dx - dy,
            done: false,
        }
    }
}

impl Iterator for BresenhamLine {
    type Item = PixelPos;

    fn next(&mut self) -> Option<PixelPos> {
        if self.done {
            return None;
        }
        let point = PixelPos::new(self.x as i32, self.y as i32);

        if self.x == self.end_x && self.y == self.end_y {
            self.done = true;
            return Some(point);
        }

        let e2 = 2 * self.err;
        if e2 > -self.dy {
            self.err -= self.dy;
            self.x += self.sx;
        }
        if e2 < self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }
        Some(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white(size: [usize; 2]) -> Bitmap {
        Bitmap::new(size, Color32::WHITE)
    }

    #[test]
    fn test_bresenham_endpoints_and_continuity() {
        let points: Vec<_> = BresenhamLine::new(PixelPos::new(0, 0), PixelPos::new(5, 2)).collect();
        assert_eq!(points.first(), Some(&PixelPos::new(0, 0)));
        assert_eq!(points.last(), Some(&PixelPos::new(5, 2)));
        assert_eq!(points.len(), 6);
        for pair in points.windows(2) {
            assert!((pair[1].x - pair[0].x).abs() <= 1);
            assert!((pair[1].y - pair[0].y).abs() <= 1);
        }
    }

    #[test]
    fn test_bresenham_reverse_direction() {
        let points: Vec<_> = BresenhamLine::new(PixelPos::new(3, 3), PixelPos::new(0, 3)).collect();
        assert_eq!(
            points,
            vec![
                PixelPos::new(3, 3),
                PixelPos::new(2, 3),
                PixelPos::new(1, 3),
                PixelPos::new(0, 3)
            ]
        );
    }

    #[test]
    fn test_degenerate_stroke_paints_one_disc() {
        let mut bitmap = white([20, 20]);
        let center = PixelPos::new(10, 10);
        stroke_line(&mut bitmap, center, center, Color32::RED, 4.0);

        // Radius 2: 13 pixels satisfy dx^2 + dy^2 <= 4.
        assert_eq!(bitmap.count(Color32::RED), 13);
        for y in 0..20 {
            for x in 0..20 {
                let (dx, dy) = (x - 10, y - 10);
                let expected = if dx * dx + dy * dy <= 4 { Color32::RED } else { Color32::WHITE };
                assert_eq!(bitmap.get(PixelPos::new(x, y)), Some(expected), "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_thin_stroke_covers_every_point() {
        let mut bitmap = white([10, 10]);
        stroke_line(&mut bitmap, PixelPos::new(1, 1), PixelPos::new(8, 1), Color32::BLACK, 1.0);
        assert_eq!(bitmap.count(Color32::BLACK), 8);
        assert_eq!(bitmap.get(PixelPos::new(0, 1)), Some(Color32::WHITE));
        assert_eq!(bitmap.get(PixelPos::new(9, 1)), Some(Color32::WHITE));
    }

    #[test]
    fn test_stroke_is_clipped_at_edges() {
        let mut bitmap = white([8, 8]);
        stroke_line(&mut bitmap, PixelPos::new(-5, -5), PixelPos::new(0, 0), Color32::BLUE, 6.0);
        stroke_line(&mut bitmap, PixelPos::new(100, 100), PixelPos::new(100, 100), Color32::BLUE, 6.0);
        assert_eq!(bitmap.get(PixelPos::new(0, 0)), Some(Color32::BLUE));
        assert_eq!(bitmap.get(PixelPos::new(7, 7)), Some(Color32::WHITE));
    }

    #[test]
    fn test_flood_fill_whole_bitmap() {
        let mut bitmap = white([20, 20]);
        flood_fill(&mut bitmap, Color32::BLUE, PixelPos::new(5, 5));
        assert_eq!(bitmap.count(Color32::BLUE), 400);
    }

    #[test]
    fn test_flood_fill_stops_at_color_boundary() {
        let mut bitmap = white([10, 10]);
        // Vertical wall at x = 4
        stroke_line(&mut bitmap, PixelPos::new(4, 0), PixelPos::new(4, 9), Color32::BLACK, 1.0);
        flood_fill(&mut bitmap, Color32::RED, PixelPos::new(0, 0));

        assert_eq!(bitmap.count(Color32::RED), 40);
        assert_eq!(bitmap.count(Color32::BLACK), 10);
        assert_eq!(bitmap.get(PixelPos::new(5, 5)), Some(Color32::WHITE));
    }

    #[test]
    fn test_flood_fill_is_four_connected() {
        let mut bitmap = white([3, 3]);
        // Diagonal black line leaves the corners touching only diagonally.
        for i in 0..3 {
            bitmap.set(PixelPos::new(i, i), Color32::BLACK);
        }
        flood_fill(&mut bitmap, Color32::RED, PixelPos::new(1, 0));
        assert_eq!(bitmap.get(PixelPos::new(2, 0)), Some(Color32::RED));
        assert_eq!(bitmap.get(PixelPos::new(2, 1)), Some(Color32::RED));
        assert_eq!(bitmap.get(PixelPos::new(0, 1)), Some(Color32::WHITE));
        assert_eq!(bitmap.get(PixelPos::new(0, 2)), Some(Color32::WHITE));
    }

    #[test]
    fn test_flood_fill_noop_and_idempotent() {
        let mut bitmap = white([6, 6]);
        let before = bitmap.clone();
        flood_fill(&mut bitmap, Color32::WHITE, PixelPos::new(2, 2));
        assert_eq!(bitmap, before);

        flood_fill(&mut bitmap, Color32::GREEN, PixelPos::new(2, 2));
        let once = bitmap.clone();
        flood_fill(&mut bitmap, Color32::GREEN, PixelPos::new(2, 2));
        assert_eq!(bitmap, once);
    }

    #[test]
    fn test_flood_fill_outside_bitmap_is_noop() {
        let mut bitmap = white([4, 4]);
        flood_fill(&mut bitmap, Color32::RED, PixelPos::new(-1, 2));
        flood_fill(&mut bitmap, Color32::RED, PixelPos::new(4, 0));
        assert_eq!(bitmap.count(Color32::WHITE), 16);
    }

    #[test]
    fn test_colors_equal_compares_all_channels() {
        assert!(colors_equal(Color32::from_rgb(1, 2, 3), Color32::from_rgb(1, 2, 3)));
        assert!(!colors_equal(Color32::from_rgb(255, 255, 254), Color32::WHITE));
        assert!(!colors_equal(
            Color32::from_rgba_premultiplied(0, 0, 0, 255),
            Color32::from_rgba_premultiplied(0, 0, 0, 254)
        ));
    }
}
