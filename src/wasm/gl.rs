use anyhow::anyhow;
use js_sys::{Float32Array, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext, WebGlBuffer, WebGlProgram, WebGlShader,
    WebGlUniformLocation,
};

use crate::geometry::{Mesh, Primitive, VertexAttribute};

pub type Gl = WebGl2RenderingContext;

pub fn js_err(e: JsValue) -> anyhow::Error {
    match e.as_string() {
        Some(s) => anyhow!(s),
        None => anyhow!("{e:?}"),
    }
}

/// WebGL2 context without a depth buffer and with straight alpha.
pub fn context(canvas: &HtmlCanvasElement, antialias: bool) -> anyhow::Result<Gl> {
    let options = Object::new();
    for (key, value) in [
        ("antialias", antialias),
        ("depth", false),
        ("premultipliedAlpha", false),
    ] {
        Reflect::set(&options, &JsValue::from_str(key), &JsValue::from_bool(value))
            .map_err(js_err)?;
    }

    let context = canvas
        .get_context_with_context_options("webgl2", &options)
        .map_err(js_err)?
        .ok_or_else(|| anyhow!("WebGL2 not supported."))?;

    context
        .dyn_into::<Gl>()
        .map_err(|_| anyhow!("Canvas context is not a WebGL2RenderingContext."))
}

pub fn get_uniform_location(
    gl: &Gl,
    program: &WebGlProgram,
    location: &str,
) -> anyhow::Result<WebGlUniformLocation> {
    match gl.get_uniform_location(program, location) {
        Some(l) => Ok(l),
        None => Err(anyhow!("Failed to get WebGlUniformLocation {location}.")),
    }
}

pub fn get_attrib_location(gl: &Gl, program: &WebGlProgram, name: &str) -> anyhow::Result<u32> {
    match gl.get_attrib_location(program, name) {
        -1 => Err(anyhow!("Program has no active attribute {name}.")),
        l => Ok(l as u32),
    }
}

pub fn create_buffer(gl: &Gl, data: &[f32]) -> anyhow::Result<WebGlBuffer> {
    let buffer = match gl.create_buffer() {
        Some(b) => b,
        None => return Err(anyhow!("Failed to create WebGL buffer.")),
    };

    let array = Float32Array::new_with_length(data.len() as u32);
    array.copy_from(data);

    gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&buffer));
    gl.buffer_data_with_opt_array_buffer(
        Gl::ARRAY_BUFFER,
        Some(&array.buffer()),
        Gl::STATIC_DRAW,
    );

    Ok(buffer)
}

pub fn create_shader(gl: &Gl, src: &str, stype: u32) -> anyhow::Result<WebGlShader> {
    let shader = match gl.create_shader(stype) {
        Some(s) => s,
        None => return Err(anyhow!("Failed to create shader.")),
    };

    gl.shader_source(&shader, src);
    gl.compile_shader(&shader);

    if gl
        .get_shader_parameter(&shader, Gl::COMPILE_STATUS)
        .is_falsy()
    {
        let kind = if stype == Gl::VERTEX_SHADER {
            "vertex"
        } else {
            "fragment"
        };
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        return Err(anyhow!("Error compiling {kind} shader: {log}\n{src}"));
    }

    Ok(shader)
}

pub fn create_program(gl: &Gl, vert: &str, frag: &str) -> anyhow::Result<WebGlProgram> {
    let vshader = create_shader(gl, vert, Gl::VERTEX_SHADER)?;
    let fshader = match create_shader(gl, frag, Gl::FRAGMENT_SHADER) {
        Ok(s) => s,
        Err(e) => {
            gl.delete_shader(Some(&vshader));
            return Err(e);
        }
    };

    let program = match gl.create_program() {
        Some(p) => p,
        None => {
            gl.delete_shader(Some(&vshader));
            gl.delete_shader(Some(&fshader));
            return Err(anyhow!("WebGL program creation failed."));
        }
    };

    gl.attach_shader(&program, &vshader);
    gl.attach_shader(&program, &fshader);
    gl.link_program(&program);

    // Shaders are kept alive by the program from here on.
    gl.delete_shader(Some(&vshader));
    gl.delete_shader(Some(&fshader));

    if gl
        .get_program_parameter(&program, Gl::LINK_STATUS)
        .is_falsy()
    {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        return Err(anyhow!(
            "Error linking shaders: {log}\n{vert}\n---\n{frag}"
        ));
    }

    Ok(program)
}

/// A mesh uploaded to the GPU, with its attributes resolved against one
/// program.
pub struct MeshBuffer {
    buffer: WebGlBuffer,
    attributes: Vec<(u32, VertexAttribute)>,
    stride: i32,
    vertex_count: i32,
    mode: u32,
}

impl MeshBuffer {
    pub fn new(gl: &Gl, program: &WebGlProgram, mesh: &Mesh) -> anyhow::Result<Self> {
        let layout = mesh.layout();
        let attributes = layout
            .attributes
            .iter()
            .map(|a| Ok((get_attrib_location(gl, program, a.name)?, *a)))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let mode = match mesh.primitive() {
            Primitive::Triangles => Gl::TRIANGLES,
            Primitive::TriangleStrip => Gl::TRIANGLE_STRIP,
        };

        Ok(MeshBuffer {
            buffer: create_buffer(gl, mesh.as_slice())?,
            attributes,
            stride: layout.stride(),
            vertex_count: mesh.vertex_count(),
            mode,
        })
    }

    pub fn vertex_count(&self) -> i32 {
        self.vertex_count
    }

    // Should be called after using the program the buffer was created for.
    pub fn draw(&self, gl: &Gl) {
        gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&self.buffer));
        for (location, attr) in &self.attributes {
            gl.enable_vertex_attrib_array(*location);
            gl.vertex_attrib_pointer_with_i32(
                *location,
                attr.size,
                Gl::FLOAT,
                false,
                self.stride,
                attr.offset,
            );
        }
        gl.draw_arrays(self.mode, 0, self.vertex_count);
    }
}
