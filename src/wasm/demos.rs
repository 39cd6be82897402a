use web_sys::{WebGlProgram, WebGlUniformLocation};

use super::{
    gl::{create_program, get_uniform_location, Gl, MeshBuffer},
    render::{Frame, Scene},
};
use crate::{
    config::{Demo, DemoConfig},
    geometry::{self, Mesh},
    shaders,
    stage::SeedMorph,
    viewport::pixel_size,
};

fn setup_context(gl: &Gl, config: &DemoConfig) {
    let [r, g, b, a] = config.clear_color;
    gl.enable(Gl::BLEND);
    gl.blend_func(Gl::SRC_ALPHA, Gl::ONE_MINUS_SRC_ALPHA);
    gl.clear_color(r, g, b, a);
}

pub fn create(gl: &Gl, config: &DemoConfig) -> anyhow::Result<Box<dyn Scene>> {
    setup_context(gl, config);

    Ok(match config.demo {
        Demo::Faceted => Box::new(LitSphere::new(
            gl,
            config,
            shaders::FACETED_VERT,
            shaders::LIT_FRAG,
            &geometry::faceted_sphere(config.segments)?,
        )?),
        Demo::Bumped => Box::new(LitSphere::new(
            gl,
            config,
            shaders::SMOOTH_VERT,
            shaders::BUMPED_FRAG,
            &geometry::smooth_sphere(config.segments)?,
        )?),
        Demo::Blob => Box::new(Blob::new(gl)?),
    })
}

/// A sphere lit by a fixed point light, drawn as a single triangle list.
pub struct LitSphere {
    program: WebGlProgram,
    ratio_location: WebGlUniformLocation,
    mesh: MeshBuffer,
}

impl LitSphere {
    pub fn new(
        gl: &Gl,
        config: &DemoConfig,
        vert: &str,
        frag: &str,
        mesh: &Mesh,
    ) -> anyhow::Result<Self> {
        let program = create_program(gl, vert, frag)?;
        let ratio_location = get_uniform_location(gl, &program, shaders::U_RATIO)?;
        let scale_location = get_uniform_location(gl, &program, shaders::U_SCALE)?;
        let light_location = get_uniform_location(gl, &program, shaders::U_LIGHT)?;
        let mesh = MeshBuffer::new(gl, &program, mesh)?;

        gl.use_program(Some(&program));
        gl.uniform1f(Some(&scale_location), config.scale);
        gl.uniform3fv_with_f32_array(Some(&light_location), &config.light);

        Ok(LitSphere {
            program,
            ratio_location,
            mesh,
        })
    }
}

impl Scene for LitSphere {
    fn draw(&mut self, gl: &Gl, frame: &Frame) {
        gl.clear(Gl::COLOR_BUFFER_BIT);
        gl.use_program(Some(&self.program));
        gl.uniform1f(Some(&self.ratio_location), frame.ratio);
        self.mesh.draw(gl);
    }
}

struct QuadProgram {
    program: WebGlProgram,
    ratio_location: WebGlUniformLocation,
    quad: MeshBuffer,
}

impl QuadProgram {
    fn new(gl: &Gl, frag: &str) -> anyhow::Result<Self> {
        let program = create_program(gl, shaders::QUAD_VERT, frag)?;
        let ratio_location = get_uniform_location(gl, &program, shaders::U_RATIO)?;
        let quad = MeshBuffer::new(gl, &program, &geometry::full_screen_quad())?;
        Ok(QuadProgram {
            program,
            ratio_location,
            quad,
        })
    }

    fn prepare(&self, gl: &Gl, ratio: f32) {
        gl.use_program(Some(&self.program));
        gl.uniform1f(Some(&self.ratio_location), ratio);
    }
}

/// Morphing blob over a radial gradient. The blob outline blends between
/// two random seeds, rolling to a new target every stage.
pub struct Blob {
    background: QuadProgram,
    ball: QuadProgram,
    pixel_size_location: WebGlUniformLocation,
    time_location: WebGlUniformLocation,
    seed_location: WebGlUniformLocation,
    morph: Option<SeedMorph>,
    start_ms: f64,
}

impl Blob {
    pub fn new(gl: &Gl) -> anyhow::Result<Self> {
        let background = QuadProgram::new(gl, shaders::BACKGROUND_FRAG)?;
        let ball = QuadProgram::new(gl, shaders::BLOB_FRAG)?;
        let pixel_size_location = get_uniform_location(gl, &ball.program, shaders::U_PIXEL_SIZE)?;
        let time_location = get_uniform_location(gl, &ball.program, shaders::U_TIME)?;
        let seed_location = get_uniform_location(gl, &ball.program, shaders::U_SEED)?;

        Ok(Blob {
            background,
            ball,
            pixel_size_location,
            time_location,
            seed_location,
            morph: None,
            start_ms: 0.0,
        })
    }
}

impl Scene for Blob {
    fn draw(&mut self, gl: &Gl, frame: &Frame) {
        let now = frame.time_ms;
        // The animation clock starts at the first frame.
        let morph = self.morph.get_or_insert_with(|| {
            self.start_ms = now;
            SeedMorph::new(now, js_sys::Math::random)
        });
        if morph.advance(now, js_sys::Math::random) {
            log::debug!("Blob stage rolled over at {now:.0}ms.");
        }
        let seed = morph.current(now);

        gl.clear(Gl::COLOR_BUFFER_BIT);

        self.background.prepare(gl, frame.ratio);
        self.background.quad.draw(gl);

        self.ball.prepare(gl, frame.ratio);
        gl.uniform1f(
            Some(&self.pixel_size_location),
            pixel_size(frame.width, frame.height),
        );
        gl.uniform1f(Some(&self.time_location), (now - self.start_ms) as f32);
        gl.uniform1fv_with_f32_array(Some(&self.seed_location), &seed);
        self.ball.quad.draw(gl);
    }
}
