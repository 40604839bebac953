// ShaderBG Program
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderbg
// SPDX-License-Identifier: GPL-3.0-or-later

use gl::types::*;
use owo_colors::OwoColorize;

/// Installs the driver debug callback. Returns `false` if neither
/// `GL_KHR_debug` nor `GL_ARB_debug_output` is available.
pub fn setup_opengl_debugging() -> bool {
    if !supports_debug_extension() || !gl::DebugMessageCallback::is_loaded() {
        return false;
    }

    unsafe {
        gl::Enable(gl::DEBUG_OUTPUT);
        gl::Enable(gl::DEBUG_OUTPUT_SYNCHRONOUS);
        gl::DebugMessageCallback(Some(gl_debug_callback), std::ptr::null());
        // Shader compiler chatter is reported through the info logs already.
        gl::DebugMessageControl(
            gl::DEBUG_SOURCE_SHADER_COMPILER,
            gl::DONT_CARE,
            gl::DEBUG_SEVERITY_NOTIFICATION,
            0,
            std::ptr::null(),
            gl::FALSE,
        );
    }
    true
}

fn supports_debug_extension() -> bool {
    if !gl::GetStringi::is_loaded() {
        return false;
    }

    let mut num_extensions = 0;
    unsafe { gl::GetIntegerv(gl::NUM_EXTENSIONS, &mut num_extensions) };

    (0..num_extensions.max(0) as GLuint).any(|i| {
        let ptr = unsafe { gl::GetStringi(gl::EXTENSIONS, i) };
        if ptr.is_null() {
            return false;
        }
        let extension = unsafe { std::ffi::CStr::from_ptr(ptr as *const _) }.to_string_lossy();
        extension == "GL_KHR_debug" || extension == "GL_ARB_debug_output"
    })
}

pub(crate) fn source_name(source: GLenum) -> &'static str {
    match source {
        gl::DEBUG_SOURCE_API => "API",
        gl::DEBUG_SOURCE_WINDOW_SYSTEM => "WINDOW_SYSTEM",
        gl::DEBUG_SOURCE_SHADER_COMPILER => "SHADER_COMPILER",
        gl::DEBUG_SOURCE_THIRD_PARTY => "THIRD_PARTY",
        gl::DEBUG_SOURCE_APPLICATION => "APPLICATION",
        gl::DEBUG_SOURCE_OTHER => "OTHER",
        _ => "UNKNOWN",
    }
}

pub(crate) fn type_name(type_: GLenum) -> &'static str {
    match type_ {
        gl::DEBUG_TYPE_ERROR => "ERROR",
        gl::DEBUG_TYPE_DEPRECATED_BEHAVIOR => "DEPRECATED_BEHAVIOR",
        gl::DEBUG_TYPE_UNDEFINED_BEHAVIOR => "UNDEFINED_BEHAVIOR",
        gl::DEBUG_TYPE_PORTABILITY => "PORTABILITY",
        gl::DEBUG_TYPE_PERFORMANCE => "PERFORMANCE",
        gl::DEBUG_TYPE_MARKER => "MARKER",
        gl::DEBUG_TYPE_PUSH_GROUP => "PUSH_GROUP",
        gl::DEBUG_TYPE_POP_GROUP => "POP_GROUP",
        gl::DEBUG_TYPE_OTHER => "OTHER",
        _ => "UNKNOWN",
    }
}

pub(crate) fn severity_level(severity: GLenum) -> log::Level {
    match severity {
        gl::DEBUG_SEVERITY_HIGH => log::Level::Error,
        gl::DEBUG_SEVERITY_MEDIUM => log::Level::Warn,
        gl::DEBUG_SEVERITY_LOW => log::Level::Info,
        _ => log::Level::Debug,
    }
}

extern "system" fn gl_debug_callback(
    source: GLenum,
    type_: GLenum,
    id: GLuint,
    severity: GLenum,
    _length: GLsizei,
    message: *const GLchar,
    _user_param: *mut std::ffi::c_void,
) {
    if message.is_null() {
        return;
    }

    let msg = unsafe { std::ffi::CStr::from_ptr(message).to_string_lossy() };
    log::log!(
        severity_level(severity),
        "{} source={}, type={}, id={id}, message={msg}",
        "[GL DEBUG]".white().bold(),
        source_name(source),
        type_name(type_),
    );
}
