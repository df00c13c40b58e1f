use bytemuck::{Pod, Zeroable};

/// One vertex of a point grid: local position and texture coordinate.
///
/// Layout matches the renderer's per-instance vertex buffer (20 bytes):
///
///  offset  0  position [f32; 3]
///  offset 12  uv       [f32; 2]
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GridVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// Regular lattice on the local XY plane, centered at the origin.
///
/// Produces `(width_segments + 1) * (height_segments + 1)` vertices. Rows run
/// from `+height/2` down to `-height/2`; `u` grows left to right and `v`
/// grows bottom to top, so the top-left vertex has `uv = (0, 1)`.
#[derive(Debug, Clone)]
pub struct PlaneGeometry {
    width: f32,
    height: f32,
    width_segments: u32,
    height_segments: u32,
    vertices: Vec<GridVertex>,
}

impl PlaneGeometry {
    /// Builds the lattice. Segment counts below one are raised to one.
    pub fn new(width: f32, height: f32, width_segments: u32, height_segments: u32) -> Self {
        let grid_x = width_segments.max(1);
        let grid_y = height_segments.max(1);

        let half_w = width * 0.5;
        let half_h = height * 0.5;
        let seg_w = width / grid_x as f32;
        let seg_h = height / grid_y as f32;

        let mut vertices = Vec::with_capacity(((grid_x + 1) * (grid_y + 1)) as usize);
        for iy in 0..=grid_y {
            let y = iy as f32 * seg_h - half_h;
            for ix in 0..=grid_x {
                let x = ix as f32 * seg_w - half_w;
                vertices.push(GridVertex {
                    position: [x, -y, 0.0],
                    uv: [ix as f32 / grid_x as f32, 1.0 - iy as f32 / grid_y as f32],
                });
            }
        }

        Self {
            width,
            height,
            width_segments: grid_x,
            height_segments: grid_y,
            vertices,
        }
    }

    #[inline]
    pub fn vertices(&self) -> &[GridVertex] {
        &self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn segments(&self) -> (u32, u32) {
        (self.width_segments, self.height_segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn showcase_grid_has_16641_points() {
        let g = PlaneGeometry::new(20.0, 20.0, 128, 128);
        assert_eq!(g.len(), 129 * 129);
        assert_eq!(g.len(), 16641);
    }

    #[test]
    fn corners_span_the_extent() {
        let g = PlaneGeometry::new(20.0, 10.0, 4, 2);
        let v = g.vertices();
        assert_eq!(v[0].position, [-10.0, 5.0, 0.0]);
        assert_eq!(v[v.len() - 1].position, [10.0, -5.0, 0.0]);
    }

    #[test]
    fn corner_uvs() {
        let g = PlaneGeometry::new(2.0, 2.0, 8, 8);
        let v = g.vertices();
        assert_eq!(v[0].uv, [0.0, 1.0]);
        assert_eq!(v[8].uv, [1.0, 1.0]);
        assert_eq!(v[v.len() - 1].uv, [1.0, 0.0]);
    }

    #[test]
    fn grid_is_flat_and_regular() {
        let g = PlaneGeometry::new(20.0, 20.0, 10, 10);
        let v = g.vertices();
        assert!(v.iter().all(|p| p.position[2] == 0.0));
        let step = v[1].position[0] - v[0].position[0];
        assert!((step - 2.0).abs() < 1e-6);
    }

    #[test]
    fn zero_segments_are_raised_to_one() {
        let g = PlaneGeometry::new(1.0, 1.0, 0, 0);
        assert_eq!(g.segments(), (1, 1));
        assert_eq!(g.len(), 4);
    }
}
