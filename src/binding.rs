// ShaderBG Program
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderbg
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pre-resolved attribute and uniform bindings.
//!
//! Names are resolved once, at construction, against the program's current
//! handle. A binding goes stale when the program is relinked or released;
//! [`Uniform::is_stale`] and [`Attribute::is_stale`] detect that.

use gl::types::*;
use std::ffi::CString;

use crate::{
    context::*,
    diagnostics::{BindingKind, Diagnostics},
    program::ShaderProgram,
    shader::ShaderError,
    NOT_FOUND,
};

/// A vertex attribute slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    name: String,
    location: GLint,
    program: GLuint,
    generation: u64,
}

impl Attribute {
    pub fn new<C: GraphicsContext>(
        program: &ShaderProgram<'_, C>,
        name: &str,
    ) -> Result<Self, ShaderError> {
        let c_name = CString::new(name)?;
        program
            .diagnostics()
            .check_context(program.context().is_active(), "Attribute::new");
        let id = program.ensure_created();
        let location = program.context().api().attrib_location(id, &c_name);
        let location = program.check_resolved(BindingKind::Attribute, name, location)?;

        Ok(Self {
            name: name.to_string(),
            location,
            program: id,
            generation: program.generation(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw location, [`NOT_FOUND`] if unresolved.
    pub fn location(&self) -> GLint {
        self.location
    }

    /// Slot index for `glVertexAttribPointer` and friends.
    pub fn index(&self) -> Option<GLuint> {
        GLuint::try_from(self.location).ok()
    }

    pub fn is_resolved(&self) -> bool {
        self.location != NOT_FOUND
    }

    pub fn is_stale<C: GraphicsContext>(&self, program: &ShaderProgram<'_, C>) -> bool {
        program.generation() != self.generation || program.raw_id() != self.program
    }
}

/// A uniform location with a handle on the context it must be written in.
pub struct Uniform<'ctx, C: GraphicsContext> {
    context: &'ctx C,
    name: String,
    location: GLint,
    program: GLuint,
    generation: u64,
    diagnostics: Diagnostics,
}

impl<'ctx, C: GraphicsContext> Uniform<'ctx, C> {
    pub fn new(program: &ShaderProgram<'ctx, C>, name: &str) -> Result<Self, ShaderError> {
        let c_name = CString::new(name)?;
        program
            .diagnostics()
            .check_context(program.context().is_active(), "Uniform::new");
        let id = program.ensure_created();
        let location = program.context().api().uniform_location(id, &c_name);
        let location = program.check_resolved(BindingKind::Uniform, name, location)?;

        Ok(Self {
            context: program.context(),
            name: name.to_string(),
            location,
            program: id,
            generation: program.generation(),
            diagnostics: program.diagnostics().clone(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw location, [`NOT_FOUND`] if unresolved.
    pub fn location(&self) -> GLint {
        self.location
    }

    pub fn is_resolved(&self) -> bool {
        self.location != NOT_FOUND
    }

    pub fn is_stale(&self, program: &ShaderProgram<'ctx, C>) -> bool {
        program.generation() != self.generation || program.raw_id() != self.program
    }

    /// Writes `value`. Writes to an unresolved location are dropped.
    ///
    /// The program must be current (see [`ShaderProgram::use_program`]).
    pub fn set<'v>(&self, value: impl Into<UniformValue<'v>>) {
        self.diagnostics
            .check_context(self.context.is_active(), "Uniform::set");
        if self.is_resolved() {
            self.context.api().uniform(self.location, value.into());
        }
    }

    pub fn set_matrix2(&self, values: &[GLfloat], transpose: bool) {
        self.set(UniformValue::Mat2 { values, transpose });
    }

    pub fn set_matrix3(&self, values: &[GLfloat], transpose: bool) {
        self.set(UniformValue::Mat3 { values, transpose });
    }

    pub fn set_matrix4(&self, values: &[GLfloat], transpose: bool) {
        self.set(UniformValue::Mat4 { values, transpose });
    }
}

impl<C: GraphicsContext> std::fmt::Debug for Uniform<'_, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Uniform")
            .field("name", &self.name)
            .field("location", &self.location)
            .field("program", &self.program)
            .field("generation", &self.generation)
            .finish()
    }
}
