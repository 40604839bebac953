// ShaderBG Program
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderbg
// SPDX-License-Identifier: GPL-3.0-or-later

use gl::types::*;
use std::{ffi::CStr, fmt};

/// Pipeline stage a shader object is compiled for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Geometry,
    TessControl,
    TessEvaluation,
    Compute,
}

impl ShaderStage {
    pub fn gl_enum(self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
            ShaderStage::Geometry => gl::GEOMETRY_SHADER,
            ShaderStage::TessControl => gl::TESS_CONTROL_SHADER,
            ShaderStage::TessEvaluation => gl::TESS_EVALUATION_SHADER,
            ShaderStage::Compute => gl::COMPUTE_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
            ShaderStage::Geometry => "geometry",
            ShaderStage::TessControl => "tessellation control",
            ShaderStage::TessEvaluation => "tessellation evaluation",
            ShaderStage::Compute => "compute",
        };
        f.write_str(name)
    }
}

/// One uniform write.
///
/// Matrix and array variants borrow tightly packed `f32` data. The element
/// count passed to the driver is derived from the slice length, so partial
/// trailing matrices are never read.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum UniformValue<'a> {
    Float(GLfloat),
    Int(GLint),
    Vec2([GLfloat; 2]),
    Vec3([GLfloat; 3]),
    Vec4([GLfloat; 4]),
    IVec4([GLint; 4]),
    FloatArray(&'a [GLfloat]),
    Mat2 { values: &'a [GLfloat], transpose: bool },
    Mat3 { values: &'a [GLfloat], transpose: bool },
    Mat4 { values: &'a [GLfloat], transpose: bool },
}

impl UniformValue<'_> {
    /// Number of array elements (or matrices) the write covers.
    pub fn count(&self) -> GLsizei {
        match self {
            UniformValue::FloatArray(values) => values.len() as GLsizei,
            UniformValue::Mat2 { values, .. } => (values.len() / 4) as GLsizei,
            UniformValue::Mat3 { values, .. } => (values.len() / 9) as GLsizei,
            UniformValue::Mat4 { values, .. } => (values.len() / 16) as GLsizei,
            _ => 1,
        }
    }
}

impl From<GLfloat> for UniformValue<'_> {
    fn from(value: GLfloat) -> Self {
        UniformValue::Float(value)
    }
}

impl From<GLint> for UniformValue<'_> {
    fn from(value: GLint) -> Self {
        UniformValue::Int(value)
    }
}

impl From<[GLfloat; 2]> for UniformValue<'_> {
    fn from(value: [GLfloat; 2]) -> Self {
        UniformValue::Vec2(value)
    }
}

impl From<[GLfloat; 3]> for UniformValue<'_> {
    fn from(value: [GLfloat; 3]) -> Self {
        UniformValue::Vec3(value)
    }
}

impl From<[GLfloat; 4]> for UniformValue<'_> {
    fn from(value: [GLfloat; 4]) -> Self {
        UniformValue::Vec4(value)
    }
}

impl From<[GLint; 4]> for UniformValue<'_> {
    fn from(value: [GLint; 4]) -> Self {
        UniformValue::IVec4(value)
    }
}

impl<'a> From<&'a [GLfloat]> for UniformValue<'a> {
    fn from(values: &'a [GLfloat]) -> Self {
        UniformValue::FloatArray(values)
    }
}

/// The native shading pipeline.
///
/// Methods mirror the driver entry points one to one. Implementations may
/// assume the owning context is current on the calling thread.
pub trait ShadingApi {
    fn create_program(&self) -> GLuint;
    fn delete_program(&self, program: GLuint);
    fn create_shader(&self, stage: ShaderStage) -> GLuint;
    fn delete_shader(&self, shader: GLuint);
    fn shader_source(&self, shader: GLuint, source: &CStr);
    fn compile_shader(&self, shader: GLuint);
    fn compile_status(&self, shader: GLuint) -> bool;
    /// At most `max_len` bytes of the shader info log.
    fn shader_info_log(&self, shader: GLuint, max_len: usize) -> Vec<u8>;
    fn attach_shader(&self, program: GLuint, shader: GLuint);
    fn link_program(&self, program: GLuint);
    fn link_status(&self, program: GLuint) -> bool;
    /// At most `max_len` bytes of the program info log.
    fn program_info_log(&self, program: GLuint, max_len: usize) -> Vec<u8>;
    fn use_program(&self, program: GLuint);
    fn uniform_location(&self, program: GLuint, name: &CStr) -> GLint;
    fn attrib_location(&self, program: GLuint, name: &CStr) -> GLint;
    fn shading_language_version(&self) -> String;
    fn uniform(&self, location: GLint, value: UniformValue<'_>);
    /// Pops one code off the driver error queue (`gl::NO_ERROR` when empty).
    fn get_error(&self) -> GLenum;
}

/// A rendering context that shader programs are bound to.
///
/// Thread affinity is the context's responsibility: at most one thread may
/// have it active at a time, and every driver call made through
/// [`GraphicsContext::api`] assumes the caller holds it.
pub trait GraphicsContext {
    type Api: ShadingApi;

    /// Whether this context is current on the calling thread.
    fn is_active(&self) -> bool;

    fn api(&self) -> &Self::Api;
}
