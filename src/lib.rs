// ShaderBG Program
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderbg
// SPDX-License-Identifier: GPL-3.0-or-later

//! OpenGL shader program lifecycle and uniform binding.
//!
//! A [`ShaderProgram`] owns one native program handle and walks it through
//! the usual pipeline:
//!
//! 1. Shaders are compiled and attached with [`ShaderProgram::add_shader`].
//! 2. [`ShaderProgram::link`] finalizes the program or records a link log.
//! 3. [`ShaderProgram::use_program`] activates it for draw calls.
//! 4. [`ShaderProgram::release`] (or `Drop`) deletes the handle.
//!
//! Uniform writes come in two layers: the name-based
//! [`ShaderProgram::set_uniform`] family looks the name up on every call,
//! while [`Uniform`] and [`Attribute`] resolve once and are written many
//! times.
//!
//! All driver calls go through the [`ShadingApi`] trait, reached from a
//! [`GraphicsContext`]. The `gl`-backed implementation lives in
//! [`gl_backend`].

#[cfg(test)]
mod tests {
    mod binding;
    mod config;
    mod fake_context;
    mod gl_backend;
    mod program;
    mod version;
}
mod binding;
mod check_gl_error;
mod config;
mod context;
mod diagnostics;
pub mod gl_backend;
mod program;
mod shader;
mod version;

pub use binding::{Attribute, Uniform};
pub use config::{ConfigError, ProgramConfig, UnresolvedNamePolicy};
pub use context::{GraphicsContext, ShaderStage, ShadingApi, UniformValue};
pub use diagnostics::{BindingKind, Diagnostic, DiagnosticHook, Diagnostics};
pub use program::{LinkState, ShaderProgram};
pub use shader::ShaderError;
pub use version::parse_language_version;

/// Location reported by the driver for names absent from a linked program.
pub const NOT_FOUND: gl::types::GLint = -1;
