//! Shape generation for 2D primitives

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// One colored triangle corner. Built in world units, mapped to NDC at upload.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// 3x5 block glyphs for 0-9, row-major
const DIGITS: [[u8; 15]; 10] = [
    [1, 1, 1, 1, 0, 1, 1, 0, 1, 1, 0, 1, 1, 1, 1], // 0
    [0, 1, 0, 1, 1, 0, 0, 1, 0, 0, 1, 0, 1, 1, 1], // 1
    [1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 0, 0, 1, 1, 1], // 2
    [1, 1, 1, 0, 0, 1, 0, 1, 1, 0, 0, 1, 1, 1, 1], // 3
    [1, 0, 1, 1, 0, 1, 1, 1, 1, 0, 0, 1, 0, 0, 1], // 4
    [1, 1, 1, 1, 0, 0, 1, 1, 1, 0, 0, 1, 1, 1, 1], // 5
    [1, 1, 1, 1, 0, 0, 1, 1, 1, 1, 0, 1, 1, 1, 1], // 6
    [1, 1, 1, 0, 0, 1, 0, 1, 0, 0, 1, 0, 0, 1, 0], // 7
    [1, 1, 1, 1, 0, 1, 1, 1, 1, 1, 0, 1, 1, 1, 1], // 8
    [1, 1, 1, 1, 0, 1, 1, 1, 1, 0, 0, 1, 1, 1, 1], // 9
];

/// Glyph width in cells, plus one cell of spacing
const DIGIT_ADVANCE: f32 = 4.0;

/// Axis-aligned filled rectangle (two triangles). Y grows downward.
pub fn rect(min: Vec2, max: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// One digit with its top-left corner at `origin`
pub fn digit(origin: Vec2, d: u8, cell: f32, color: [f32; 4]) -> Vec<Vertex> {
    let Some(glyph) = DIGITS.get(d as usize) else {
        return Vec::new();
    };
    let mut vertices = Vec::new();
    for row in 0..5 {
        for col in 0..3 {
            if glyph[row * 3 + col] == 1 {
                let min = origin + Vec2::new(col as f32, row as f32) * cell;
                vertices.extend(rect(min, min + Vec2::splat(cell), color));
            }
        }
    }
    vertices
}

/// Decimal number, left-aligned at `origin`
pub fn number(origin: Vec2, n: u64, cell: f32, color: [f32; 4]) -> Vec<Vertex> {
    n.to_string()
        .bytes()
        .enumerate()
        .flat_map(|(i, ch)| {
            let x = origin.x + i as f32 * DIGIT_ADVANCE * cell;
            digit(Vec2::new(x, origin.y), ch - b'0', cell, color)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit_cells(d: u8) -> usize {
        digit(Vec2::ZERO, d, 1.0, [1.0; 4]).len() / 6
    }

    #[test]
    fn test_rect_is_two_triangles() {
        let v = rect(Vec2::new(1.0, 2.0), Vec2::new(3.0, 5.0), [1.0; 4]);
        assert_eq!(v.len(), 6);
        let xs: Vec<f32> = v.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = v.iter().map(|v| v.position[1]).collect();
        assert!(xs.iter().all(|&x| x == 1.0 || x == 3.0));
        assert!(ys.iter().all(|&y| y == 2.0 || y == 5.0));
    }

    #[test]
    fn test_digit_cells() {
        let expected = [12, 8, 11, 10, 9, 11, 12, 7, 13, 12];
        for (d, &cells) in expected.iter().enumerate() {
            assert_eq!(lit_cells(d as u8), cells, "digit {d}");
        }
        assert_eq!(lit_cells(42), 0);
    }

    #[test]
    fn test_number_layout() {
        let v = number(Vec2::new(10.0, 10.0), 10, 2.0, [1.0; 4]);
        assert_eq!(v.len(), (lit_cells(1) + lit_cells(0)) * 6);
        let max_x = v.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        // Two glyphs 3 cells wide with one cell between them
        assert_eq!(max_x, 10.0 + 7.0 * 2.0);
    }
}
