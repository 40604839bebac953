// ShaderBG Program
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderbg
// SPDX-License-Identifier: GPL-3.0-or-later

//! Uniform reporting channel for build and binding problems.
//!
//! Every [`Diagnostic`] is logged, handed to an optional user hook, and,
//! when `assert_on_error` is configured, turned into a panic. The behavior
//! is identical in debug and release builds; only the configuration
//! decides how loud a failure is.

use gl::types::*;
use owo_colors::OwoColorize;
use std::{fmt, rc::Rc};
use thiserror::Error;

use crate::{config::ProgramConfig, context::ShaderStage};

/// Callback receiving every reported diagnostic.
pub type DiagnosticHook = Rc<dyn Fn(&Diagnostic)>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BindingKind {
    Attribute,
    Uniform,
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingKind::Attribute => f.write_str("attribute"),
            BindingKind::Uniform => f.write_str("uniform"),
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum Diagnostic {
    #[error("{stage} shader failed to compile: {log}")]
    CompileFailed { stage: ShaderStage, log: String },
    #[error("program failed to link: {log}")]
    LinkFailed { log: String },
    #[error("{kind} '{name}' not found in program")]
    UnresolvedName { kind: BindingKind, name: String },
    #[error("{operation} called without an active graphics context")]
    ContextInactive { operation: &'static str },
    #[error("driver reported error {code:#06x} after {operation}")]
    DriverError { code: GLenum, operation: &'static str },
}

impl Diagnostic {
    /// Whether the diagnostic describes a failed operation rather than a
    /// suspicious one.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Diagnostic::CompileFailed { .. }
                | Diagnostic::LinkFailed { .. }
                | Diagnostic::DriverError { .. }
        )
    }
}

#[derive(Clone, Default)]
pub struct Diagnostics {
    hook: Option<DiagnosticHook>,
    assert_on_error: bool,
    check_context: bool,
}

impl Diagnostics {
    pub fn new(config: &ProgramConfig, hook: Option<DiagnosticHook>) -> Self {
        Self {
            hook,
            assert_on_error: config.assert_on_error,
            check_context: config.check_context,
        }
    }

    pub fn report(&self, diagnostic: Diagnostic) {
        if diagnostic.is_error() {
            log::error!("{} {diagnostic}", "[SHADER]".red().bold());
        } else {
            log::warn!("{} {diagnostic}", "[SHADER]".yellow().bold());
        }

        if let Some(hook) = &self.hook {
            hook(&diagnostic);
        }

        if self.assert_on_error && diagnostic.is_error() {
            panic!("{diagnostic}");
        }
    }

    /// Reports [`Diagnostic::ContextInactive`] when checking is enabled and
    /// `active` is false. Execution continues either way.
    pub fn check_context(&self, active: bool, operation: &'static str) {
        if self.check_context && !active {
            self.report(Diagnostic::ContextInactive { operation });
        }
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("hook", &self.hook.is_some())
            .field("assert_on_error", &self.assert_on_error)
            .field("check_context", &self.check_context)
            .finish()
    }
}
