use polysphere::{
    config::DemoConfig,
    geometry::{faceted_sphere, smooth_sphere, Primitive, FACETED_LAYOUT, SMOOTH_LAYOUT},
};

#[test]
fn default_config_builds_both_spheres() {
    let config = DemoConfig::default();

    let faceted = faceted_sphere(config.segments).unwrap();
    assert_eq!(faceted.layout(), &FACETED_LAYOUT);
    assert_eq!(faceted.primitive(), Primitive::Triangles);
    assert_eq!(faceted.vertex_count(), 2 * 128 * 127 * 3);

    let smooth = smooth_sphere(config.segments).unwrap();
    assert_eq!(smooth.layout(), &SMOOTH_LAYOUT);
    assert_eq!(smooth.vertex_count(), 6 * 127 * 127);
}

#[test]
fn faceted_sphere_is_closed() {
    // A closed triangulated surface uses every edge exactly twice.
    use std::collections::HashMap;

    let mesh = faceted_sphere(12).unwrap();
    let key = |v: &[f32]| {
        (
            (v[0] * 1e4).round() as i32,
            (v[1] * 1e4).round() as i32,
            (v[2] * 1e4).round() as i32,
        )
    };

    let vertices: Vec<_> = mesh.vertices().map(key).collect();
    let mut edges = HashMap::new();
    for tri in vertices.chunks_exact(3) {
        for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
            let edge = if a < b { (a, b) } else { (b, a) };
            *edges.entry(edge).or_insert(0) += 1;
        }
    }
    assert!(edges.values().all(|&n| n == 2));
}

#[test]
fn smooth_sphere_covers_both_poles() {
    let mesh = smooth_sphere(16).unwrap();
    let ys: Vec<f32> = mesh.vertices().map(|v| v[1]).collect();
    assert!(ys.iter().any(|&y| (y - 1.0).abs() < 1e-6));
    assert!(ys.iter().any(|&y| (y + 1.0).abs() < 1e-6));
}
