use polysphere::viewport::{aspect_ratio, backing_size, project};

// Clip space to device pixels.
fn to_pixels(p: [f32; 2], res: (u32, u32)) -> (f32, f32) {
    (p[0] * res.0 as f32 / 2.0, p[1] * res.1 as f32 / 2.0)
}

fn approx_eq2(a: (f32, f32), b: (f32, f32), eps: f32) -> bool {
    (a.0 - b.0).abs() < eps && (a.1 - b.1).abs() < eps
}

#[test]
fn sphere_stays_round_in_any_aspect() {
    let wide = backing_size(960.0, 540.0, 2.0); // 1920x1080
    let tall = backing_size(540.0, 960.0, 2.0);

    // Points on the sphere's silhouette.
    let samples = [
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.6, 0.8, 0.0],
        [-0.8, 0.6, 0.0],
    ];

    for res in [wide, tall] {
        let ratio = aspect_ratio(res.0, res.1);
        let radius = 0.8 * res.0.min(res.1) as f32 / 2.0;
        for point in samples {
            let (x, y) = to_pixels(project(point, ratio, 0.8), res);
            assert!(
                ((x * x + y * y).sqrt() - radius).abs() < 1e-2,
                "res={res:?} point={point:?}"
            );
        }
    }
}

#[test]
fn orientation_swaps_axes() {
    let wide = (1920, 1080);
    let tall = (1080, 1920);
    let p = [0.6, 0.8, 0.0];
    let q = [0.8, 0.6, 0.0];

    let a = to_pixels(project(p, aspect_ratio(wide.0, wide.1), 0.8), wide);
    let b = to_pixels(project(q, aspect_ratio(tall.0, tall.1), 0.8), tall);
    assert!(approx_eq2(a, (b.1, b.0), 1e-3), "a={a:?} b={b:?}");
}
