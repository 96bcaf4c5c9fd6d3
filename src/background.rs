use bevy::{
    asset::RenderAssetUsages,
    prelude::*,
    render::mesh::{Indices, PrimitiveTopology},
    window::PrimaryWindow,
};

use crate::theme::palette;

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<BackgroundAssets>()
        .add_systems(Startup, spawn_background)
        .add_systems(
            PostUpdate,
            update_background_scale.before(TransformSystems::Propagate),
        );
}

#[derive(Resource, Asset, Reflect, Clone)]
#[reflect(Resource)]
struct BackgroundAssets {
    mesh: Handle<Mesh>,
    material: Handle<ColorMaterial>,
}

impl FromWorld for BackgroundAssets {
    fn from_world(world: &mut World) -> Self {
        let mesh = world.resource_mut::<Assets<Mesh>>().add(gradient_mesh(
            palette::PAGE_TOP,
            palette::PAGE_MIDDLE,
            palette::PAGE_BOTTOM,
        ));

        // Vertex colors carry the gradient.
        let material = world
            .resource_mut::<Assets<ColorMaterial>>()
            .add(Color::WHITE);

        Self { mesh, material }
    }
}

#[derive(Component, Reflect)]
struct Background;

/// A unit quad with three vertex-color bands, top to bottom.
fn gradient_mesh(top: Color, middle: Color, bottom: Color) -> Mesh {
    let bands = [(0.5, top), (0.0, middle), (-0.5, bottom)];

    let mut positions = Vec::with_capacity(6);
    let mut colors = Vec::with_capacity(6);
    for (y, color) in bands {
        for x in [-0.5, 0.5] {
            positions.push([x, y, 0.0]);
            colors.push(color.to_linear().to_f32_array());
        }
    }

    let uvs: Vec<[f32; 2]> = positions
        .iter()
        .map(|&[x, y, _]| [x + 0.5, 0.5 - y])
        .collect();
    let normals = vec![[0.0, 0.0, 1.0]; positions.len()];
    let indices = vec![0, 2, 1, 1, 2, 3, 2, 4, 3, 3, 4, 5];

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
    .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colors)
    .with_inserted_indices(Indices::U32(indices))
}

fn spawn_background(assets: Res<BackgroundAssets>, mut commands: Commands) {
    commands.spawn((
        Name::new("Background"),
        Background,
        Transform::from_translation(Vec3::Z * -10.0),
        Mesh2d(assets.mesh.clone()),
        MeshMaterial2d(assets.material.clone()),
    ));
}

fn update_background_scale(
    window: Single<&Window, With<PrimaryWindow>>,
    mut background: Single<&mut Transform, With<Background>>,
) {
    let size = Vec2::new(window.width(), window.height()).max(Vec2::ONE);
    background.scale = size.extend(background.scale.z);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_mesh_has_three_bands() {
        let mesh = gradient_mesh(Color::WHITE, Color::BLACK, Color::WHITE);

        assert_eq!(mesh.attribute(Mesh::ATTRIBUTE_POSITION).unwrap().len(), 6);
        assert_eq!(mesh.attribute(Mesh::ATTRIBUTE_COLOR).unwrap().len(), 6);
        assert_eq!(mesh.indices().unwrap().len(), 12);
    }
}
