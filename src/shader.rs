// ShaderBG Program
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderbg
// SPDX-License-Identifier: GPL-3.0-or-later

use gl::types::*;

use crate::{context::*, diagnostics::BindingKind};

#[allow(clippy::enum_variant_names)]
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ShaderError {
    #[error("Shader compile error: {0}")]
    CompileError(String),
    #[error("Shader link error: {0}")]
    LinkError(String),
    #[error("Unresolved {kind} name: {name}")]
    UnresolvedName { kind: BindingKind, name: String },
    #[error{"{0}"}]
    NulError(#[from] std::ffi::NulError),
}

/// Intermediate shader object, deleted when dropped.
///
/// Once attached, the program keeps what it needs, so the object can go
/// out of scope right after [`ShaderObject::compile`] succeeds.
pub struct ShaderObject<'a, A: ShadingApi> {
    api: &'a A,
    pub id: GLuint,
}

impl<'a, A: ShadingApi> ShaderObject<'a, A> {
    /// Compiles `source` for `stage`.
    ///
    /// On failure returns the driver's info log, truncated to
    /// `info_log_limit` bytes.
    pub fn compile(
        api: &'a A,
        source: &str,
        stage: ShaderStage,
        info_log_limit: usize,
    ) -> Result<Self, ShaderError> {
        let source = std::ffi::CString::new(source)?;
        let shader = Self {
            api,
            id: api.create_shader(stage),
        };
        api.shader_source(shader.id, &source);
        api.compile_shader(shader.id);

        if api.compile_status(shader.id) {
            Ok(shader)
        } else {
            let log = api.shader_info_log(shader.id, info_log_limit);
            Err(ShaderError::CompileError(decode_info_log(&log)))
        }
    }
}

impl<A: ShadingApi> Drop for ShaderObject<'_, A> {
    fn drop(&mut self) {
        self.api.delete_shader(self.id);
    }
}

/// Decodes a driver info log, dropping trailing NULs and whitespace.
pub fn decode_info_log(log: &[u8]) -> String {
    String::from_utf8_lossy(log)
        .trim_end_matches(['\0', '\n', '\r', ' '])
        .to_string()
}
