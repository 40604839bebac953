// ShaderBG Program
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderbg
// SPDX-License-Identifier: GPL-3.0-or-later

use function_name::named;
use gl::types::*;
use owo_colors::OwoColorize;
use std::{cell::Cell, ffi::CString};

use crate::{
    check_gl_error::check_gl_error,
    config::{ProgramConfig, UnresolvedNamePolicy},
    context::*,
    diagnostics::*,
    shader::*,
    version::parse_language_version,
    NOT_FOUND,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LinkState {
    /// No native handle has been allocated.
    Uncreated,
    /// A handle exists but has not been linked yet.
    Unlinked,
    Linked,
    LinkFailed,
}

/// A shader program bound to one graphics context.
///
/// The native handle is allocated lazily by the first successful
/// [`ShaderProgram::add_shader`] (or by [`ShaderProgram::program_id`]) and
/// deleted by [`ShaderProgram::release`] or on drop.
pub struct ShaderProgram<'ctx, C: GraphicsContext> {
    context: &'ctx C,

    /// Native handle, `0` while uncreated.
    id: Cell<GLuint>,

    state: Cell<LinkState>,

    /// Bumped on every link attempt and every release, so bindings can
    /// tell when their locations went stale.
    generation: Cell<u64>,

    /// Log of the last failed compile or link.
    error_log: String,

    config: ProgramConfig,

    diagnostics: Diagnostics,
}

impl<'ctx, C: GraphicsContext> ShaderProgram<'ctx, C> {
    pub fn new(context: &'ctx C) -> Self {
        Self::with_config(context, ProgramConfig::default())
    }

    pub fn with_config(context: &'ctx C, config: ProgramConfig) -> Self {
        let diagnostics = Diagnostics::new(&config, None);
        Self {
            context,
            id: Cell::new(0),
            state: Cell::new(LinkState::Uncreated),
            generation: Cell::new(0),
            error_log: String::new(),
            config,
            diagnostics,
        }
    }

    /// Installs a hook receiving every diagnostic this program reports.
    pub fn with_diagnostic_hook(mut self, hook: DiagnosticHook) -> Self {
        self.diagnostics = Diagnostics::new(&self.config, Some(hook));
        self
    }

    pub fn context(&self) -> &'ctx C {
        self.context
    }

    pub fn config(&self) -> &ProgramConfig {
        &self.config
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Returns the native handle, allocating it on first use.
    pub fn program_id(&self) -> GLuint {
        self.diagnostics
            .check_context(self.context.is_active(), "program_id");
        self.ensure_created()
    }

    /// Allocates the handle if needed. Callers run their own context check.
    pub(crate) fn ensure_created(&self) -> GLuint {
        if self.id.get() == 0 {
            let id = self.context.api().create_program();
            log::debug!("Created program {id}");
            self.id.set(id);
            self.state.set(LinkState::Unlinked);
        }
        self.id.get()
    }

    /// Current handle without allocating, `0` while uncreated.
    pub(crate) fn raw_id(&self) -> GLuint {
        self.id.get()
    }

    pub fn is_created(&self) -> bool {
        self.id.get() != 0
    }

    pub fn is_linked(&self) -> bool {
        self.link_state() == LinkState::Linked
    }

    pub fn link_state(&self) -> LinkState {
        self.state.get()
    }

    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    /// Diagnostic text of the last failed compile or link. Successful steps
    /// leave it untouched.
    pub fn error_log(&self) -> &str {
        &self.error_log
    }

    /// Compiles `source` and attaches it to the program.
    ///
    /// A failed compile stores the driver log in [`ShaderProgram::error_log`]
    /// and leaves the program without that stage.
    #[named]
    pub fn add_shader(&mut self, source: &str, stage: ShaderStage) -> Result<(), ShaderError> {
        log::debug!("{} ({stage})", function_name!().white().bold());
        self.diagnostics
            .check_context(self.context.is_active(), "add_shader");

        let context = self.context;
        let api = context.api();
        let shader = match ShaderObject::compile(api, source, stage, self.config.info_log_limit) {
            Ok(shader) => shader,
            Err(ShaderError::CompileError(log)) => {
                self.error_log = log.clone();
                self.diagnostics.report(Diagnostic::CompileFailed {
                    stage,
                    log: log.clone(),
                });
                return Err(ShaderError::CompileError(log));
            }
            Err(err) => return Err(err),
        };

        api.attach_shader(self.ensure_created(), shader.id);
        drop(shader);

        if self.config.check_driver_errors {
            check_gl_error(api, &self.diagnostics, "add_shader");
        }
        Ok(())
    }

    pub fn add_vertex_shader(&mut self, source: &str) -> Result<(), ShaderError> {
        self.add_shader(source, ShaderStage::Vertex)
    }

    pub fn add_fragment_shader(&mut self, source: &str) -> Result<(), ShaderError> {
        self.add_shader(source, ShaderStage::Fragment)
    }

    /// Links the attached shaders.
    ///
    /// On failure the handle stays allocated but unusable, and the link log
    /// replaces [`ShaderProgram::error_log`].
    #[named]
    pub fn link(&mut self) -> Result<(), ShaderError> {
        log::debug!("{}", function_name!().white().bold());
        self.diagnostics.check_context(self.context.is_active(), "link");

        let context = self.context;
        let api = context.api();
        let id = self.ensure_created();
        api.link_program(id);
        // Relinking invalidates locations whether or not it succeeds.
        self.generation.set(self.generation.get() + 1);

        let result = if api.link_status(id) {
            self.state.set(LinkState::Linked);
            Ok(())
        } else {
            let log = decode_info_log(&api.program_info_log(id, self.config.info_log_limit));
            self.state.set(LinkState::LinkFailed);
            self.error_log = log.clone();
            self.diagnostics
                .report(Diagnostic::LinkFailed { log: log.clone() });
            Err(ShaderError::LinkError(log))
        };

        if self.config.check_driver_errors {
            check_gl_error(api, &self.diagnostics, "link");
        }
        result
    }

    /// Releases any previous handle, then compiles and links a
    /// vertex/fragment pair. Stops at the first failing step.
    pub fn rebuild(&mut self, vertex: &str, fragment: &str) -> Result<(), ShaderError> {
        self.release();
        self.add_vertex_shader(vertex)?;
        self.add_fragment_shader(fragment)?;
        self.link()
    }

    /// Makes this program current for subsequent draw calls.
    ///
    /// # Panics
    ///
    /// Panics if the program was never created. Using an unlinked program
    /// is a programming error.
    pub fn use_program(&self) {
        assert!(
            self.is_created(),
            "The shader program must be successfully linked before it is used"
        );
        debug_assert!(self.is_linked(), "Using a program that is not linked");

        self.context.api().use_program(self.id.get());
    }

    /// Looks up a uniform location, returning [`NOT_FOUND`] for unknown
    /// names.
    pub fn uniform_location(&self, name: &str) -> Result<GLint, ShaderError> {
        debug_assert!(self.is_created(), "Uniform lookup on an uncreated program");
        let name = CString::new(name)?;
        Ok(self.context.api().uniform_location(self.id.get(), &name))
    }

    /// Looks up `name` and writes `value` to it.
    ///
    /// Each call performs a fresh lookup. Hot paths should resolve a
    /// [`crate::Uniform`] once instead.
    pub fn set_uniform<'v>(
        &self,
        name: &str,
        value: impl Into<UniformValue<'v>>,
    ) -> Result<(), ShaderError> {
        let location = self.uniform_location(name)?;
        let location = self.check_resolved(BindingKind::Uniform, name, location)?;
        if location != NOT_FOUND {
            self.context.api().uniform(location, value.into());
        }
        Ok(())
    }

    pub fn set_uniform_matrix2(
        &self,
        name: &str,
        values: &[GLfloat],
        transpose: bool,
    ) -> Result<(), ShaderError> {
        self.set_uniform(name, UniformValue::Mat2 { values, transpose })
    }

    pub fn set_uniform_matrix3(
        &self,
        name: &str,
        values: &[GLfloat],
        transpose: bool,
    ) -> Result<(), ShaderError> {
        self.set_uniform(name, UniformValue::Mat3 { values, transpose })
    }

    pub fn set_uniform_matrix4(
        &self,
        name: &str,
        values: &[GLfloat],
        transpose: bool,
    ) -> Result<(), ShaderError> {
        self.set_uniform(name, UniformValue::Mat4 { values, transpose })
    }

    /// Shading language version reported by the driver, `0.0` if unknown.
    pub fn language_version(&self) -> f64 {
        parse_language_version(&self.context.api().shading_language_version())
    }

    /// Deletes the native handle, if any. Safe to call repeatedly.
    #[named]
    pub fn release(&mut self) {
        let id = self.id.replace(0);
        if id != 0 {
            log::debug!("{} {id}", function_name!().white().bold());
            self.context.api().delete_program(id);
            self.state.set(LinkState::Uncreated);
            self.generation.set(self.generation.get() + 1);
        }
    }

    /// Applies the unresolved-name policy to a lookup result.
    pub(crate) fn check_resolved(
        &self,
        kind: BindingKind,
        name: &str,
        location: GLint,
    ) -> Result<GLint, ShaderError> {
        if location >= 0 {
            return Ok(location);
        }

        match self.config.unresolved_names {
            UnresolvedNamePolicy::Ignore => Ok(NOT_FOUND),
            UnresolvedNamePolicy::Warn => {
                self.report_unresolved(kind, name);
                Ok(NOT_FOUND)
            }
            UnresolvedNamePolicy::Error => {
                self.report_unresolved(kind, name);
                Err(ShaderError::UnresolvedName {
                    kind,
                    name: name.to_string(),
                })
            }
        }
    }

    fn report_unresolved(&self, kind: BindingKind, name: &str) {
        self.diagnostics.report(Diagnostic::UnresolvedName {
            kind,
            name: name.to_string(),
        });
    }
}

impl<C: GraphicsContext> Drop for ShaderProgram<'_, C> {
    fn drop(&mut self) {
        self.release();
    }
}
