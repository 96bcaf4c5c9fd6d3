//! Spawns the flower and drives it between its closed and bloomed poses.

use bevy::{
    prelude::*,
    render::render_resource::{AsBindGroup, encase::private::ShaderType},
    sprite_render::{AlphaMode2d, Material2d, Material2dPlugin},
};

use crate::{
    AppSystems,
    animation::{Transition, TransitionCurve, TransitionState},
    flower::{
        bloom::{CARD_SIZE, Flower},
        petal::PetalMeshBuilder,
    },
    theme::palette,
};

pub(super) fn plugin(app: &mut App) {
    app.add_plugins(Material2dPlugin::<CenterGlowMaterial>::default());

    app.init_resource::<FlowerAssets>()
        .add_systems(Startup, spawn_flower)
        .add_systems(
            Update,
            (
                retarget_bloom_transitions.after(super::bloom::apply_bloom_commands),
                apply_petal_motion,
                apply_leaf_motion,
            )
                .in_set(AppSystems::Update),
        );
}

const PETAL_COUNT: usize = 8;
/// Per-petal transition start offset, making the bloom ripple outward.
const PETAL_STAGGER_MILLIS: u64 = 40;
const BLOOM_MILLIS: u64 = 650;
const PETAL_SIZE: Vec2 = Vec2::new(34.0, 56.0);
/// Scale of a fully closed petal.
const CLOSED_SCALE: f32 = 0.18;
/// How far a closed petal is pulled in toward the flower's center.
const CLOSED_PULL: f32 = 24.0;
/// Distance from the flower's center to a petal's base when bloomed.
const PETAL_RADIUS: f32 = 14.0;
/// How far a leaf leans outward while bloomed.
const LEAF_SHIFT: f32 = 6.0;

/// Position of the flower head relative to the card.
const HEAD: Vec2 = Vec2::new(0.0, 22.0);

#[derive(Resource, Asset, Reflect, Clone)]
#[reflect(Resource)]
struct FlowerAssets {
    petal_mesh: Handle<Mesh>,
    stem_mesh: Handle<Mesh>,
    leaf_mesh: Handle<Mesh>,
    center_mesh: Handle<Mesh>,
    ring_mesh: Handle<Mesh>,
    card_mesh: Handle<Mesh>,
    stem_material: Handle<ColorMaterial>,
    leaf_material: Handle<ColorMaterial>,
    ring_material: Handle<ColorMaterial>,
    card_material: Handle<ColorMaterial>,
    center_material: Handle<CenterGlowMaterial>,
    petal_curves: Vec<Handle<TransitionCurve>>,
    leaf_curve: Handle<TransitionCurve>,
}

impl FromWorld for FlowerAssets {
    fn from_world(world: &mut World) -> Self {
        let petal = PetalMeshBuilder::new(PETAL_SIZE)
            .and_then(|builder| builder.with_segments(24))
            .map(PetalMeshBuilder::build)
            .unwrap();

        let mut meshes = world.resource_mut::<Assets<Mesh>>();
        let petal_mesh = meshes.add(petal);
        let stem_mesh = meshes.add(Capsule2d::new(3.0, 64.0));
        let leaf_mesh = meshes.add(Ellipse::new(17.0, 7.5));
        let center_mesh = meshes.add(Circle::new(20.0));
        let ring_mesh = meshes.add(Circle::new(23.0));
        let card_mesh = meshes.add(Rectangle::from_length(CARD_SIZE));

        let mut materials = world.resource_mut::<Assets<ColorMaterial>>();
        let stem_material = materials.add(palette::STEM);
        let leaf_material = materials.add(ColorMaterial {
            color: palette::STEM.with_alpha(0.95),
            alpha_mode: AlphaMode2d::Blend,
            ..default()
        });
        let ring_material = materials.add(palette::CENTER_RING);
        let card_material = materials.add(ColorMaterial {
            color: palette::CARD,
            alpha_mode: AlphaMode2d::Blend,
            ..default()
        });

        let center_material = world
            .resource_mut::<Assets<CenterGlowMaterial>>()
            .add(CenterGlowMaterial {
                inner: palette::CENTER_INNER.into(),
                outer: palette::CENTER_OUTER.into(),
                focus: Vec2::new(0.5, 0.4),
            });

        let mut curves = world.resource_mut::<Assets<TransitionCurve>>();
        let petal_curves = (0..PETAL_COUNT)
            .map(|index| {
                curves.add(
                    TransitionCurve::from_millis(BLOOM_MILLIS, EaseFunction::CubicOut)
                        .with_delay_millis(index as u64 * PETAL_STAGGER_MILLIS),
                )
            })
            .collect();
        let leaf_curve = curves.add(TransitionCurve::from_millis(
            BLOOM_MILLIS,
            EaseFunction::SineInOut,
        ));

        Self {
            petal_mesh,
            stem_mesh,
            leaf_mesh,
            center_mesh,
            ring_mesh,
            card_mesh,
            stem_material,
            leaf_material,
            ring_material,
            card_material,
            center_material,
            petal_curves,
            leaf_curve,
        }
    }
}

/// One of the flower's evenly rotated petals.
#[derive(Component, Reflect)]
#[reflect(Component)]
pub struct Petal {
    /// Unit vector from the flower's center out through this petal.
    direction: Vec2,
}

/// One translucent mesh layer of a petal. `peak_alpha` is the layer's opacity
/// when fully bloomed.
#[derive(Component, Reflect)]
#[reflect(Component)]
struct PetalLayer {
    peak_alpha: f32,
}

#[derive(Component, Reflect)]
#[reflect(Component)]
struct Leaf {
    /// Resting position relative to the card.
    rest: Vec2,
    /// Which way the leaf leans while bloomed; -1 for left, 1 for right.
    lean: f32,
}

fn spawn_flower(
    assets: Res<FlowerAssets>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut commands: Commands,
) {
    commands
        .spawn((
            Name::new("Flower"),
            Flower::default(),
            Transform::default(),
            Visibility::default(),
            children![
                (
                    Name::new("Card"),
                    Mesh2d(assets.card_mesh.clone()),
                    MeshMaterial2d(assets.card_material.clone()),
                    Transform::from_translation(Vec3::Z * -0.5),
                ),
                (
                    Name::new("Stem"),
                    Mesh2d(assets.stem_mesh.clone()),
                    MeshMaterial2d(assets.stem_material.clone()),
                    Transform::from_translation(Vec3::new(0.0, -13.0, 0.2)),
                ),
                leaf(&assets, Vec2::new(-18.0, -50.0), 12f32.to_radians(), -1.0),
                leaf(&assets, Vec2::new(18.0, -62.0), -18f32.to_radians(), 1.0),
                (
                    Name::new("Center Ring"),
                    Mesh2d(assets.ring_mesh.clone()),
                    MeshMaterial2d(assets.ring_material.clone()),
                    Transform::from_translation(HEAD.extend(0.6)),
                ),
                (
                    Name::new("Center"),
                    Mesh2d(assets.center_mesh.clone()),
                    MeshMaterial2d(assets.center_material.clone()),
                    Transform::from_translation(HEAD.extend(0.7)),
                ),
            ],
        ))
        .with_children(|children| {
            for index in 0..PETAL_COUNT {
                children.spawn(petal(&assets, &mut materials, index));
            }
        });
}

fn leaf(assets: &FlowerAssets, rest: Vec2, angle: f32, lean: f32) -> impl Bundle {
    (
        Name::new("Leaf"),
        Leaf { rest, lean },
        Mesh2d(assets.leaf_mesh.clone()),
        MeshMaterial2d(assets.leaf_material.clone()),
        Transform::from_translation(rest.extend(0.3)).with_rotation(Quat::from_rotation_z(angle)),
        Transition::from(assets.leaf_curve.clone()),
    )
}

fn petal(
    assets: &FlowerAssets,
    materials: &mut Assets<ColorMaterial>,
    index: usize,
) -> impl Bundle {
    let angle = std::f32::consts::TAU * index as f32 / PETAL_COUNT as f32;
    let rotation = Quat::from_rotation_z(angle);
    let direction = (rotation * Vec3::Y).truncate();

    // Per-petal materials; their alpha animates with the bloom.
    let body = materials.add(ColorMaterial {
        color: palette::PETAL.with_alpha(0.0),
        alpha_mode: AlphaMode2d::Blend,
        ..default()
    });
    let highlight = materials.add(ColorMaterial {
        color: palette::PETAL_HIGHLIGHT.with_alpha(0.0),
        alpha_mode: AlphaMode2d::Blend,
        ..default()
    });

    (
        Name::new(format!("Petal {index}")),
        Petal { direction },
        Transition::from(assets.petal_curves[index].clone()),
        Transform::from_translation(
            (HEAD + direction * (PETAL_RADIUS - CLOSED_PULL)).extend(0.4 + index as f32 * 0.01),
        )
        .with_rotation(rotation)
        .with_scale(Vec3::new(CLOSED_SCALE, CLOSED_SCALE, 1.0)),
        Visibility::default(),
        children![
            (
                Name::new("Petal Body"),
                PetalLayer { peak_alpha: 1.0 },
                Mesh2d(assets.petal_mesh.clone()),
                MeshMaterial2d(body),
            ),
            (
                Name::new("Petal Highlight"),
                PetalLayer { peak_alpha: 0.9 },
                Mesh2d(assets.petal_mesh.clone()),
                MeshMaterial2d(highlight),
                Transform::from_translation(Vec3::new(-3.0, 4.0, 0.01))
                    .with_scale(Vec3::new(0.66, 0.72, 1.0)),
            ),
        ],
    )
}

fn retarget_bloom_transitions(
    flower: Single<&Flower, Changed<Flower>>,
    mut transitions: Query<&mut Transition, Or<(With<Petal>, With<Leaf>)>>,
) {
    let target = if flower.bloomed { 1.0 } else { 0.0 };
    for mut transition in &mut transitions {
        if transition.target != target {
            transition.target = target;
        }
    }
}

fn apply_petal_motion(
    mut petals: Query<
        (&Petal, &TransitionState, &mut Transform, &Children),
        Changed<TransitionState>,
    >,
    layers: Query<(&PetalLayer, &MeshMaterial2d<ColorMaterial>)>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for (petal, state, mut transform, children) in &mut petals {
        let eased = state.eased();
        let scale = CLOSED_SCALE + (1.0 - CLOSED_SCALE) * eased;
        let radius = PETAL_RADIUS - CLOSED_PULL * (1.0 - eased);

        transform.translation =
            (HEAD + petal.direction * radius).extend(transform.translation.z);
        transform.scale = Vec3::new(scale, scale, 1.0);

        for child in children.iter() {
            let Ok((layer, material)) = layers.get(child) else {
                continue;
            };
            if let Some(material) = materials.get_mut(&material.0) {
                material.color.set_alpha(layer.peak_alpha * eased);
            }
        }
    }
}

fn apply_leaf_motion(
    mut leaves: Query<(&Leaf, &TransitionState, &mut Transform), Changed<TransitionState>>,
) {
    for (leaf, state, mut transform) in &mut leaves {
        let offset = leaf.rest + Vec2::X * leaf.lean * LEAF_SHIFT * state.eased();
        transform.translation = offset.extend(transform.translation.z);
    }
}

/// Radial falloff between two colors, shading the flower's center disc.
#[derive(AsBindGroup, Asset, Reflect, Clone)]
#[uniform(0, CenterGlowUniforms)]
struct CenterGlowMaterial {
    inner: LinearRgba,
    outer: LinearRgba,
    /// Falloff origin in UV space.
    focus: Vec2,
}

impl Material2d for CenterGlowMaterial {
    fn fragment_shader() -> bevy::shader::ShaderRef {
        "shaders/center_glow.wgsl".into()
    }
}

#[derive(ShaderType)]
struct CenterGlowUniforms {
    inner: Vec4,
    outer: Vec4,
    focus: Vec2,
}

impl From<&CenterGlowMaterial> for CenterGlowUniforms {
    fn from(value: &CenterGlowMaterial) -> Self {
        Self {
            inner: Vec4::from(value.inner),
            outer: Vec4::from(value.outer),
            focus: value.focus,
        }
    }
}
