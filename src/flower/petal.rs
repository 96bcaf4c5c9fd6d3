use std::f32::consts::PI;

use bevy::{
    asset::RenderAssetUsages,
    prelude::*,
    render::mesh::{Indices, PrimitiveTopology},
};
use thiserror::Error;

/// Used to build the lens-shaped 2d petal [`Mesh`], base at the origin and
/// pointing +Y.
pub struct PetalMeshBuilder {
    size: Vec2,
    segments: usize,
}

impl PetalMeshBuilder {
    /// The minimum number of outline segments that can form a surface.
    pub const MIN_SEGMENTS: usize = 2;

    /// Create a new petal mesh builder. `size.x` is the petal's widest span,
    /// `size.y` its length from base to tip.
    pub fn new(size: Vec2) -> Result<Self, PetalMeshError> {
        if !(size.is_finite() && size.x > 0.0 && size.y > 0.0) {
            return Err(PetalMeshError::InvalidSize(size));
        }

        Ok(Self { size, segments: 16 })
    }

    /// Overrides the outline resolution along the petal's length.
    pub fn with_segments(mut self, segments: usize) -> Result<Self, PetalMeshError> {
        if segments < Self::MIN_SEGMENTS {
            return Err(PetalMeshError::TooFewSegments(segments));
        }

        self.segments = segments;
        Ok(self)
    }

    /// Returns the final petal [`Mesh`].
    pub fn build(self) -> Mesh {
        let rows = self.segments + 1;
        let mut positions = Vec::with_capacity(rows * 2);
        let mut uvs = Vec::with_capacity(rows * 2);

        for row in 0..rows {
            let s = row as f32 / self.segments as f32;
            let y = s * self.size.y;
            // Lens profile: pointed at the base and the tip, widest midway.
            let half = 0.5 * self.size.x * (PI * s).sin();

            positions.push([-half, y, 0.0]);
            positions.push([half, y, 0.0]);
            uvs.push([0.5 - half / self.size.x, s]);
            uvs.push([0.5 + half / self.size.x, s]);
        }

        let normals = vec![[0.0, 0.0, 1.0]; rows * 2];

        let mut indices = Vec::with_capacity(self.segments * 6);
        for row in 0..self.segments as u32 {
            let [a, b, c, d] = [2 * row, 2 * row + 1, 2 * row + 2, 2 * row + 3];
            indices.extend_from_slice(&[a, b, c, b, d, c]);
        }

        info!("Built petal mesh with {} vertices", positions.len());

        Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::default(),
        )
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
        .with_inserted_indices(Indices::U32(indices))
    }
}

/// Errors returned by [`PetalMeshBuilder`].
#[derive(Debug, Error)]
pub enum PetalMeshError {
    /// The requested dimensions were not strictly positive and finite.
    #[error("petal size must be positive and finite, got {0}")]
    InvalidSize(Vec2),
    /// The requested outline resolution cannot form a surface.
    #[error("petal outline needs at least 2 segments, got {0}")]
    TooFewSegments(usize),
}

#[cfg(test)]
mod tests {
    use bevy::render::mesh::VertexAttributeValues;

    use super::*;

    #[test]
    fn builds_expected_layout() {
        let segments = 24;
        let mesh = PetalMeshBuilder::new(Vec2::new(34.0, 56.0))
            .and_then(|builder| builder.with_segments(segments))
            .map(PetalMeshBuilder::build)
            .unwrap();

        let positions = mesh.attribute(Mesh::ATTRIBUTE_POSITION).unwrap();
        assert_eq!(positions.len(), 2 * (segments + 1));
        assert_eq!(mesh.attribute(Mesh::ATTRIBUTE_NORMAL).unwrap().len(), positions.len());
        assert_eq!(mesh.attribute(Mesh::ATTRIBUTE_UV_0).unwrap().len(), positions.len());
        assert_eq!(mesh.indices().unwrap().len(), 6 * segments);
    }

    #[test]
    fn outline_is_mirrored_and_bounded() {
        let size = Vec2::new(30.0, 60.0);
        let mesh = PetalMeshBuilder::new(size).map(PetalMeshBuilder::build).unwrap();

        let Some(VertexAttributeValues::Float32x3(positions)) =
            mesh.attribute(Mesh::ATTRIBUTE_POSITION)
        else {
            panic!("petal mesh positions missing");
        };

        for pair in positions.chunks_exact(2) {
            let [left, right] = [pair[0], pair[1]];
            assert_eq!(left[0], -right[0]);
            assert_eq!(left[1], right[1]);
            assert!(right[0] <= size.x / 2.0);
            assert!((0.0..=size.y).contains(&left[1]));
        }
    }

    #[test]
    fn rejects_degenerate_parameters() {
        assert!(matches!(
            PetalMeshBuilder::new(Vec2::new(0.0, 56.0)),
            Err(PetalMeshError::InvalidSize(_))
        ));
        assert!(matches!(
            PetalMeshBuilder::new(Vec2::new(34.0, f32::NAN)),
            Err(PetalMeshError::InvalidSize(_))
        ));
        assert!(matches!(
            PetalMeshBuilder::new(Vec2::splat(10.0)).unwrap().with_segments(1),
            Err(PetalMeshError::TooFewSegments(1))
        ));
    }
}
