//! Scenes compiled into the binary.

use std::f32::consts::PI;
use std::sync::Arc;

use lux_math::{Point, Transformation, Vec3};
use lux_renderer::{
    CheckeredPigment, Color, Csg, Cube, Cylinder, DiffuseBrdf, HdrImage, ImagePigment, Material,
    Plane, PointLight, Primitive, SpecularBrdf, Sphere, UniformPigment, World,
};

use crate::cli::SceneKind;

pub struct Scene {
    pub world: World,
    /// Places the camera frame in the world
    pub camera: Transformation,
}

/// Build a scene; `texture`, when given, is painted on the demo's central
/// sphere.
pub fn build(kind: SceneKind, texture: Option<Arc<HdrImage>>) -> Scene {
    match kind {
        SceneKind::Demo => demo(texture),
        SceneKind::Furnace => furnace(),
        SceneKind::Csg => csg(),
    }
}

fn diffuse(color: Color) -> Arc<Material> {
    Arc::new(Material::diffuse(color))
}

fn translate(x: f32, y: f32, z: f32) -> Transformation {
    Transformation::translation(Vec3::new(x, y, z))
}

/// A huge emissive dome and a checkered floor, shared by the lit scenes.
fn environment(world: &mut World) {
    let sky = Material::new(
        DiffuseBrdf::new(UniformPigment::new(Color::ZERO)),
        UniformPigment::new(Color::new(1.0, 0.9, 0.5)),
    );
    world.add(Primitive::new(
        Sphere,
        Transformation::uniform_scaling(200.0) * translate(0.0, 0.0, 0.4),
        Arc::new(sky),
    ));

    let floor = Material::from_brdf(DiffuseBrdf::new(CheckeredPigment::new(
        Color::new(0.3, 0.5, 0.1),
        Color::new(0.1, 0.2, 0.5),
        4,
    )));
    world.add(Primitive::new(Plane, Transformation::IDENTITY, Arc::new(floor)));

    world.add_light(PointLight::new(Point::new(-30.0, 30.0, 30.0), Color::ONE));
}

fn demo(texture: Option<Arc<HdrImage>>) -> Scene {
    let mut world = World::new();
    environment(&mut world);

    let centre = match texture {
        Some(image) => Arc::new(Material::from_brdf(DiffuseBrdf::new(ImagePigment::new(image)))),
        None => diffuse(Color::new(0.3, 0.4, 0.8)),
    };
    world.add(Primitive::new(Sphere, translate(0.0, 0.0, 1.0), centre));

    let mirror = Material::from_brdf(SpecularBrdf::new(UniformPigment::new(Color::new(0.6, 0.2, 0.3))));
    world.add(Primitive::new(Sphere, translate(1.0, 2.5, 0.0), Arc::new(mirror)));

    // A cube with a spherical bite taken out of its top corner
    let carved = Csg::difference(
        Primitive::new(
            Cube::new(),
            translate(2.0, -2.0, 0.6) * Transformation::rotation_z(PI / 6.0) * Transformation::uniform_scaling(1.2),
            diffuse(Color::new(0.8, 0.6, 0.2)),
        ),
        Primitive::new(
            Sphere,
            translate(1.6, -1.6, 1.2) * Transformation::uniform_scaling(0.6),
            diffuse(Color::new(0.9, 0.9, 0.9)),
        ),
    );
    world.add(carved);

    world.add(Primitive::new(
        Cylinder,
        translate(3.0, 1.0, 0.75) * Transformation::scaling(Vec3::new(1.0, 1.0, 1.5)),
        diffuse(Color::new(0.7, 0.2, 0.2)),
    ));

    Scene {
        world,
        camera: translate(-1.0, 0.0, 1.0),
    }
}

fn furnace() -> Scene {
    let mut world = World::new();
    let material = Material::new(
        DiffuseBrdf::new(UniformPigment::new(Color::splat(0.5))),
        UniformPigment::new(Color::splat(0.5)),
    );
    world.add(Primitive::new(
        Sphere,
        Transformation::uniform_scaling(10.0),
        Arc::new(material),
    ));

    Scene {
        world,
        camera: Transformation::IDENTITY,
    }
}

fn csg() -> Scene {
    let mut world = World::new();
    environment(&mut world);

    let sphere = |y: f32| {
        Primitive::new(
            Sphere,
            translate(0.0, y + 0.3, 0.8) * Transformation::uniform_scaling(0.65),
            diffuse(Color::new(0.8, 0.3, 0.2)),
        )
    };
    let cube = |y: f32| {
        Primitive::new(
            Cube::new(),
            translate(0.0, y, 0.6) * Transformation::rotation_z(PI / 4.0),
            diffuse(Color::new(0.2, 0.6, 0.8)),
        )
    };

    let ys = [3.0, 1.0, -1.0, -3.0];
    world.add(Csg::union(cube(ys[0]), sphere(ys[0])));
    world.add(Csg::intersection(cube(ys[1]), sphere(ys[1])));
    world.add(Csg::difference(cube(ys[2]), sphere(ys[2])));
    world.add(Csg::fusion(cube(ys[3]), sphere(ys[3])));

    Scene {
        world,
        camera: translate(-6.0, 0.0, 1.5),
    }
}
