// ShaderBG Program
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderbg
// SPDX-License-Identifier: GPL-3.0-or-later

//! [`ShadingApi`] and [`GraphicsContext`] implementations over the `gl`
//! crate.
//!
//! This module never creates a context. The host makes one current, then
//! loads entry points into it with [`GlApi::load_with`] (or
//! [`GlApi::load_from_epoxy`]) and describes how to tell whether it is
//! current with a [`ContextProbe`].

#[cfg(debug_assertions)]
pub(crate) mod debug_output;

use gl::types::*;
use libloading::{Library, Symbol};
use std::{
    ffi::{c_char, c_void, CStr},
    fmt,
};
use thiserror::Error;

use crate::context::*;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to load {0}: {1}")]
    Library(&'static str, #[source] libloading::Error),
    #[error("Symbol {0} not found: {1}")]
    Symbol(&'static str, #[source] libloading::Error),
    #[error("GL function {0} not loaded")]
    MissingFunction(&'static str),
}

/// Handle proving GL entry points have been loaded.
#[derive(Debug)]
pub struct GlApi {
    _private: (),
}

impl GlApi {
    /// Loads GL entry points through `loader` and verifies that the
    /// functions this crate calls resolved.
    pub fn load_with<F>(loader: F) -> Result<Self, LoadError>
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        gl::load_with(loader);
        Self::verify()
    }

    /// Loads GL entry points via libepoxy.
    #[cfg(feature = "epoxy")]
    pub fn load_from_epoxy() -> Result<Self, LoadError> {
        use std::sync::OnceLock;

        const EPOXY: &str = "libepoxy.so.0";
        static LIBRARY: OnceLock<Library> = OnceLock::new();

        let library = match LIBRARY.get() {
            Some(library) => library,
            None => {
                let library =
                    unsafe { Library::new(EPOXY) }.map_err(|err| LoadError::Library(EPOXY, err))?;
                LIBRARY.get_or_init(|| library)
            }
        };

        epoxy::load_with(|name| {
            unsafe { library.get::<*const c_void>(name.as_bytes()) }
                .map(|symbol| *symbol)
                .unwrap_or(std::ptr::null())
        });

        Self::load_with(epoxy::get_proc_addr)
    }

    fn verify() -> Result<Self, LoadError> {
        let required = [
            ("glCreateProgram", gl::CreateProgram::is_loaded()),
            ("glDeleteProgram", gl::DeleteProgram::is_loaded()),
            ("glCreateShader", gl::CreateShader::is_loaded()),
            ("glCompileShader", gl::CompileShader::is_loaded()),
            ("glAttachShader", gl::AttachShader::is_loaded()),
            ("glLinkProgram", gl::LinkProgram::is_loaded()),
            ("glUseProgram", gl::UseProgram::is_loaded()),
            ("glGetUniformLocation", gl::GetUniformLocation::is_loaded()),
            ("glGetAttribLocation", gl::GetAttribLocation::is_loaded()),
            ("glGetString", gl::GetString::is_loaded()),
        ];

        match required.iter().find(|(_, loaded)| !loaded) {
            Some((name, _)) => Err(LoadError::MissingFunction(*name)),
            None => Ok(Self { _private: () }),
        }
    }

    /// Routes `KHR_debug` driver messages into the log. Debug builds only.
    #[cfg(debug_assertions)]
    pub fn enable_debug_output(&self) -> bool {
        debug_output::setup_opengl_debugging()
    }
}

impl ShadingApi for GlApi {
    fn create_program(&self) -> GLuint {
        unsafe { gl::CreateProgram() }
    }

    fn delete_program(&self, program: GLuint) {
        unsafe { gl::DeleteProgram(program) };
    }

    fn create_shader(&self, stage: ShaderStage) -> GLuint {
        unsafe { gl::CreateShader(stage.gl_enum()) }
    }

    fn delete_shader(&self, shader: GLuint) {
        unsafe { gl::DeleteShader(shader) };
    }

    fn shader_source(&self, shader: GLuint, source: &CStr) {
        unsafe { gl::ShaderSource(shader, 1, &source.as_ptr(), std::ptr::null()) };
    }

    fn compile_shader(&self, shader: GLuint) {
        unsafe { gl::CompileShader(shader) };
    }

    fn compile_status(&self, shader: GLuint) -> bool {
        let mut success = 0;
        unsafe { gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success) };
        success != 0
    }

    fn shader_info_log(&self, shader: GLuint, max_len: usize) -> Vec<u8> {
        let mut log_len = 0;
        unsafe { gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut log_len) };
        read_info_log(log_len, max_len, |capacity, written, buffer| unsafe {
            gl::GetShaderInfoLog(shader, capacity, written, buffer)
        })
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        unsafe { gl::AttachShader(program, shader) };
    }

    fn link_program(&self, program: GLuint) {
        unsafe { gl::LinkProgram(program) };
    }

    fn link_status(&self, program: GLuint) -> bool {
        let mut success = 0;
        unsafe { gl::GetProgramiv(program, gl::LINK_STATUS, &mut success) };
        success != 0
    }

    fn program_info_log(&self, program: GLuint, max_len: usize) -> Vec<u8> {
        let mut log_len = 0;
        unsafe { gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut log_len) };
        read_info_log(log_len, max_len, |capacity, written, buffer| unsafe {
            gl::GetProgramInfoLog(program, capacity, written, buffer)
        })
    }

    fn use_program(&self, program: GLuint) {
        unsafe { gl::UseProgram(program) };
    }

    fn uniform_location(&self, program: GLuint, name: &CStr) -> GLint {
        unsafe { gl::GetUniformLocation(program, name.as_ptr()) }
    }

    fn attrib_location(&self, program: GLuint, name: &CStr) -> GLint {
        unsafe { gl::GetAttribLocation(program, name.as_ptr()) }
    }

    fn shading_language_version(&self) -> String {
        let ptr = unsafe { gl::GetString(gl::SHADING_LANGUAGE_VERSION) };
        if ptr.is_null() {
            return String::new();
        }
        unsafe { CStr::from_ptr(ptr as *const c_char) }
            .to_string_lossy()
            .into_owned()
    }

    fn uniform(&self, location: GLint, value: UniformValue<'_>) {
        let count = value.count();
        unsafe {
            match value {
                UniformValue::Float(x) => gl::Uniform1f(location, x),
                UniformValue::Int(x) => gl::Uniform1i(location, x),
                UniformValue::Vec2([x, y]) => gl::Uniform2f(location, x, y),
                UniformValue::Vec3([x, y, z]) => gl::Uniform3f(location, x, y, z),
                UniformValue::Vec4([x, y, z, w]) => gl::Uniform4f(location, x, y, z, w),
                UniformValue::IVec4([x, y, z, w]) => gl::Uniform4i(location, x, y, z, w),
                UniformValue::FloatArray(values) => {
                    gl::Uniform1fv(location, count, values.as_ptr())
                }
                UniformValue::Mat2 { values, transpose } => {
                    gl::UniformMatrix2fv(location, count, gl_bool(transpose), values.as_ptr())
                }
                UniformValue::Mat3 { values, transpose } => {
                    gl::UniformMatrix3fv(location, count, gl_bool(transpose), values.as_ptr())
                }
                UniformValue::Mat4 { values, transpose } => {
                    gl::UniformMatrix4fv(location, count, gl_bool(transpose), values.as_ptr())
                }
            }
        }
    }

    fn get_error(&self) -> GLenum {
        unsafe { gl::GetError() }
    }
}

fn gl_bool(value: bool) -> GLboolean {
    if value {
        gl::TRUE
    } else {
        gl::FALSE
    }
}

/// Reads an info log of `log_len` bytes (as reported by the driver), capped
/// at `max_len`.
fn read_info_log<F>(log_len: GLint, max_len: usize, read: F) -> Vec<u8>
where
    F: FnOnce(GLsizei, *mut GLsizei, *mut GLchar),
{
    let capacity = (log_len.max(0) as usize).min(max_len);
    let mut log = Vec::with_capacity(capacity);
    let mut written: GLsizei = 0;
    read(capacity as GLsizei, &mut written, log.as_mut_ptr() as *mut GLchar);
    unsafe { log.set_len((written.max(0) as usize).min(capacity)) };
    log
}

/// Answers "is this context current on the calling thread?".
pub struct ContextProbe {
    is_current: Box<dyn Fn() -> bool>,
}

impl ContextProbe {
    pub fn new<F>(is_current: F) -> Self
    where
        F: Fn() -> bool + 'static,
    {
        Self {
            is_current: Box::new(is_current),
        }
    }

    /// Probe for hosts that guarantee the context is always current.
    pub fn always() -> Self {
        Self::new(|| true)
    }

    /// Probe backed by `eglGetCurrentContext`.
    pub fn egl() -> Result<Self, LoadError> {
        Self::from_library("libEGL.so.1", "eglGetCurrentContext")
    }

    /// Probe backed by `glXGetCurrentContext`.
    pub fn glx() -> Result<Self, LoadError> {
        Self::from_library("libGL.so.1", "glXGetCurrentContext")
    }

    fn from_library(library: &'static str, symbol: &'static str) -> Result<Self, LoadError> {
        type GetCurrentContextFn = unsafe extern "C" fn() -> *mut c_void;

        let handle =
            unsafe { Library::new(library) }.map_err(|err| LoadError::Library(library, err))?;
        let get_current: GetCurrentContextFn = {
            let function: Symbol<GetCurrentContextFn> = unsafe { handle.get(symbol.as_bytes()) }
                .map_err(|err| LoadError::Symbol(symbol, err))?;
            *function
        };

        Ok(Self::new(move || {
            // Keeps the library mapped for as long as the probe lives.
            let _library = &handle;
            !unsafe { get_current() }.is_null()
        }))
    }

    pub fn is_current(&self) -> bool {
        (self.is_current)()
    }
}

impl fmt::Debug for ContextProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextProbe").finish_non_exhaustive()
    }
}

/// A host-created GL context.
#[derive(Debug)]
pub struct GlContext {
    api: GlApi,
    probe: ContextProbe,
}

impl GlContext {
    pub fn new(api: GlApi, probe: ContextProbe) -> Self {
        Self { api, probe }
    }
}

impl GraphicsContext for GlContext {
    type Api = GlApi;

    fn is_active(&self) -> bool {
        self.probe.is_current()
    }

    fn api(&self) -> &GlApi {
        &self.api
    }
}
