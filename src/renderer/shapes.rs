//! Shape generation for 2D primitives

use glam::Vec2;

use super::vertex::Vertex;

/// Axis-aligned rectangle from its top-left corner, as two triangles
pub fn rect(out: &mut Vec<Vertex>, pos: Vec2, size: Vec2, color: [f32; 4]) {
    let (x0, y0) = (pos.x, pos.y);
    let (x1, y1) = (pos.x + size.x, pos.y + size.y);

    out.push(Vertex::new(x0, y0, color));
    out.push(Vertex::new(x1, y0, color));
    out.push(Vertex::new(x0, y1, color));

    out.push(Vertex::new(x1, y0, color));
    out.push(Vertex::new(x1, y1, color));
    out.push(Vertex::new(x0, y1, color));
}

/// Square of side `size` centered on `center`
pub fn square_centered(out: &mut Vec<Vertex>, center: Vec2, size: f32, color: [f32; 4]) {
    let half = Vec2::splat(size / 2.0);
    rect(out, center - half, Vec2::splat(size), color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_covers_corners() {
        let mut out = Vec::new();
        rect(&mut out, Vec2::new(10.0, 20.0), Vec2::new(4.0, 8.0), [1.0; 4]);
        assert_eq!(out.len(), 6);

        let xs: Vec<f32> = out.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = out.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 14.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 28.0);
    }

    #[test]
    fn test_square_centered() {
        let mut out = Vec::new();
        square_centered(&mut out, Vec2::new(50.0, 50.0), 4.0, [1.0; 4]);
        assert_eq!(out[0].position, [48.0, 48.0]);
        assert_eq!(out[4].position, [52.0, 52.0]);
    }
}
