// ShaderBG Program
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderbg
// SPDX-License-Identifier: GPL-3.0-or-later

use gl::types::*;

use crate::{
    context::ShadingApi,
    diagnostics::{Diagnostic, Diagnostics},
};

/// Upper bound on codes popped per check. A lost context can keep
/// returning errors forever.
const MAX_DRAINED_ERRORS: usize = 32;

pub fn error_name(code: GLenum) -> &'static str {
    match code {
        gl::NO_ERROR => "NO_ERROR",
        gl::INVALID_ENUM => "INVALID_ENUM",
        gl::INVALID_VALUE => "INVALID_VALUE",
        gl::INVALID_OPERATION => "INVALID_OPERATION",
        gl::INVALID_FRAMEBUFFER_OPERATION => "INVALID_FRAMEBUFFER_OPERATION",
        gl::OUT_OF_MEMORY => "OUT_OF_MEMORY",
        gl::STACK_UNDERFLOW => "STACK_UNDERFLOW",
        gl::STACK_OVERFLOW => "STACK_OVERFLOW",
        _ => "UNKNOWN",
    }
}

/// Drains the driver error queue, reporting each code. Returns the number
/// of errors seen.
pub fn check_gl_error<A: ShadingApi>(
    api: &A,
    diagnostics: &Diagnostics,
    operation: &'static str,
) -> usize {
    let mut count = 0;
    while count < MAX_DRAINED_ERRORS {
        let code = api.get_error();
        if code == gl::NO_ERROR {
            break;
        }
        log::debug!("GL error {} after {operation}", error_name(code));
        diagnostics.report(Diagnostic::DriverError { code, operation });
        count += 1;
    }
    count
}
