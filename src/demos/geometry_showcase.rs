use std::sync::Arc;

use glam::{Vec2, Vec3};

use crate::errors::Result;
use crate::host::{
    FrameState, HostConfig, LightConfig, ModelBuilder, OrbitConfig, SceneBuilder, SceneHost, SurfaceStyle,
};
use crate::resources::PhongMaterial;
use crate::resources::primitives::{
    BoxOptions, CircleOptions, ConeOptions, CylinderOptions, ExtrudeOptions, LatheOptions, PlaneOptions, Primitive,
    RingOptions, Shape, ShapeOptions, SinCurve, SphereOptions, TorusKnotOptions, TorusOptions, TubeOptions,
};

/// Heart outline about one unit tall, shared by the shape and extrude slots.
#[must_use]
pub fn heart_shape() -> Shape {
    let (x, y) = (-0.25_f32, -0.5_f32);
    let mut shape = Shape::new();
    shape
        .move_to(x + 0.25, y + 0.25)
        .bezier_curve_to(x + 0.25, y + 0.25, x + 0.2, y, x, y)
        .bezier_curve_to(x - 0.3, y, x - 0.3, y + 0.35, x - 0.3, y + 0.35)
        .bezier_curve_to(x - 0.3, y + 0.55, x - 0.15, y + 0.77, x + 0.25, y + 0.95)
        .bezier_curve_to(x + 0.6, y + 0.77, x + 0.8, y + 0.45, x + 0.8, y + 0.35)
        .bezier_curve_to(x + 0.8, y + 0.35, x + 0.8, y, x + 0.5, y)
        .bezier_curve_to(x + 0.35, y, x + 0.25, y + 0.25, x + 0.25, y + 0.25);
    shape
}

/// Every primitive generator laid out on a 5 x 3 grid, spinning.
#[derive(Debug, Default)]
pub struct GeometryShowcase;

impl GeometryShowcase {
    #[must_use]
    pub fn config() -> HostConfig {
        HostConfig::new()
            .with_camera_position(Vec3::new(0.0, 0.0, 5.0))
            .with_light(LightConfig::white_at(Vec3::new(-4.0, 4.0, 4.0)))
            .with_orbit(OrbitConfig::default())
    }

    /// The primitives in grid order, each with its position.
    #[must_use]
    pub fn primitives() -> Vec<(Primitive, Vec3)> {
        let lathe_profile = (0..10)
            .map(|i| {
                let i = i as f32;
                Vec2::new((i * 0.2).sin() * 0.3 + 0.3, (i - 5.0) * 0.08)
            })
            .collect();

        vec![
            // 第一行
            (
                Primitive::Box(BoxOptions::new(0.7, 0.7, 0.7).with_segments(3, 3, 3)),
                Vec3::new(-4.0, 2.0, 0.0),
            ),
            (
                Primitive::Circle(CircleOptions {
                    radius: 0.6,
                    segments: 12,
                    ..Default::default()
                }),
                Vec3::new(-2.0, 2.0, 0.0),
            ),
            (
                Primitive::Cone(ConeOptions {
                    radius: 0.6,
                    height: 1.0,
                    radial_segments: 8,
                    height_segments: 2,
                    ..Default::default()
                }),
                Vec3::new(0.0, 2.0, 0.0),
            ),
            (
                Primitive::Cylinder(CylinderOptions {
                    radius_top: 0.5,
                    radius_bottom: 0.5,
                    height: 1.0,
                    radial_segments: 16,
                    height_segments: 2,
                    ..Default::default()
                }),
                Vec3::new(2.0, 2.0, 0.0),
            ),
            (
                Primitive::Sphere(SphereOptions::new(0.6, 32, 16)),
                Vec3::new(4.0, 2.0, 0.0),
            ),
            // 第二行
            (
                Primitive::Ring(RingOptions {
                    inner_radius: 0.4,
                    outer_radius: 0.8,
                    theta_segments: 8,
                    phi_segments: 2,
                    ..Default::default()
                }),
                Vec3::new(-4.0, 0.0, 0.0),
            ),
            (
                Primitive::Plane(PlaneOptions {
                    width: 1.0,
                    height: 1.0,
                    width_segments: 4,
                    height_segments: 4,
                }),
                Vec3::new(-2.0, 0.0, 0.0),
            ),
            (
                Primitive::Torus(TorusOptions {
                    radius: 0.6,
                    tube: 0.2,
                    radial_segments: 8,
                    tubular_segments: 6,
                    ..Default::default()
                }),
                Vec3::ZERO,
            ),
            (
                Primitive::TorusKnot(TorusKnotOptions {
                    radius: 0.6,
                    tube: 0.1,
                    tubular_segments: 64,
                    radial_segments: 32,
                    p: 3,
                    q: 4,
                }),
                Vec3::new(2.0, 0.0, 0.0),
            ),
            (
                Primitive::Shape(ShapeOptions::new(heart_shape())),
                Vec3::new(4.0, 0.0, 0.0),
            ),
            // 第三行
            (
                Primitive::Tube(TubeOptions {
                    tubular_segments: 20,
                    radius: 0.1,
                    radial_segments: 8,
                    closed: false,
                    ..TubeOptions::new(Arc::new(SinCurve::new(0.4)))
                }),
                Vec3::new(-4.0, -2.0, 0.0),
            ),
            (
                Primitive::Lathe(LatheOptions::new(lathe_profile, 32)),
                Vec3::new(-2.0, -2.0, 0.0),
            ),
            (
                Primitive::Extrude(ExtrudeOptions {
                    depth: 0.2,
                    steps: 2,
                    bevel_enabled: true,
                    bevel_segments: 1,
                    bevel_size: 0.1,
                    bevel_thickness: 0.1,
                    ..ExtrudeOptions::new(heart_shape())
                }),
                Vec3::new(0.0, -2.0, 0.0),
            ),
        ]
    }
}

impl SceneBuilder for GeometryShowcase {
    fn build(&mut self, builder: &mut ModelBuilder<'_>) -> Result<()> {
        let style = SurfaceStyle::new(PhongMaterial::new(0x51_51_51)).with_wireframe(0xff_ff_00);
        for (primitive, position) in Self::primitives() {
            builder.build_primitive(&primitive, &style, position)?;
        }
        Ok(())
    }

    fn update(&mut self, host: &mut SceneHost, frame: &FrameState) -> Result<()> {
        host.spin_renderables(frame.elapsed_ms);
        Ok(())
    }
}
