use pretty_assertions::assert_eq;

use super::super::*;
use super::fake_context::*;

fn linked<'a>(ctx: &'a FakeContext, config: ProgramConfig) -> ShaderProgram<'a, FakeContext> {
    let mut program = ShaderProgram::with_config(ctx, config);
    program.rebuild(VERTEX_SHADER, FRAGMENT_SHADER).unwrap();
    program
}

#[test]
fn test_attribute_resolves_slot_index() {
    let ctx = FakeContext::new();
    let program = linked(&ctx, ProgramConfig::default());

    let position = Attribute::new(&program, "position").unwrap();
    let tex_coord = Attribute::new(&program, "texCoord").unwrap();

    assert_eq!(position.name(), "position");
    assert_eq!(position.index(), Some(0));
    assert_eq!(tex_coord.index(), Some(1));
    assert!(tex_coord.is_resolved());
    assert!(!tex_coord.is_stale(&program));
}

#[test]
fn test_unknown_attribute_yields_sentinel() {
    let ctx = FakeContext::new();
    let (hook, seen) = recording_hook();
    let program = linked(&ctx, ProgramConfig::default()).with_diagnostic_hook(hook);

    let normal = Attribute::new(&program, "normal").unwrap();

    assert_eq!(normal.location(), NOT_FOUND);
    assert_eq!(normal.index(), None);
    assert!(!normal.is_resolved());
    assert_eq!(
        *seen.borrow(),
        vec![Diagnostic::UnresolvedName {
            kind: BindingKind::Attribute,
            name: "normal".to_string(),
        }]
    );
}

#[test]
fn test_uniform_writes_to_resolved_location() {
    let ctx = FakeContext::new();
    let program = linked(&ctx, ProgramConfig::default());
    program.use_program();

    let time = Uniform::new(&program, "iTime").unwrap();
    let mouse = Uniform::new(&program, "iMouse").unwrap();
    let transform = Uniform::new(&program, "iTransform").unwrap();

    time.set(0.25f32);
    time.set(0.5f32);
    mouse.set([10.0f32, 20.0, 0.0, 0.0]);
    transform.set_matrix4(&[1.0; 16], true);

    assert_eq!(time.location(), program.uniform_location("iTime").unwrap());
    assert_eq!(
        ctx.writes(),
        vec![
            Write {
                location: time.location(),
                value: Written::Float(vec![0.25]),
            },
            Write {
                location: time.location(),
                value: Written::Float(vec![0.5]),
            },
            Write {
                location: mouse.location(),
                value: Written::Float(vec![10.0, 20.0, 0.0, 0.0]),
            },
            Write {
                location: transform.location(),
                value: Written::Matrix {
                    size: 4,
                    count: 1,
                    transpose: true,
                    values: vec![1.0; 16],
                },
            },
        ]
    );
}

#[test]
fn test_uniform_vector_and_matrix_variants() {
    let ctx = FakeContext::new();
    let program = linked(&ctx, ProgramConfig::default());

    let rotation = Uniform::new(&program, "iRotation").unwrap();
    let basis = Uniform::new(&program, "iBasis").unwrap();
    let frame = Uniform::new(&program, "iFrame").unwrap();

    rotation.set_matrix2(&[0.0, 1.0, -1.0, 0.0], false);
    basis.set_matrix3(&[0.0; 18], false);
    frame.set(3i32);
    frame.set([1.0f32, 2.0]);
    frame.set([1.0f32, 2.0, 3.0]);

    let values: Vec<_> = ctx.writes().into_iter().map(|w| w.value).collect();
    assert_eq!(
        values,
        vec![
            Written::Matrix {
                size: 2,
                count: 1,
                transpose: false,
                values: vec![0.0, 1.0, -1.0, 0.0],
            },
            Written::Matrix {
                size: 3,
                count: 2,
                transpose: false,
                values: vec![0.0; 18],
            },
            Written::Int(vec![3]),
            Written::Float(vec![1.0, 2.0]),
            Written::Float(vec![1.0, 2.0, 3.0]),
        ]
    );
}

#[test]
fn test_unresolved_uniform_writes_are_dropped() {
    let ctx = FakeContext::new();
    let program = linked(&ctx, ProgramConfig::default());

    let missing = Uniform::new(&program, "iMissing").unwrap();
    missing.set(1.0f32);
    missing.set_matrix4(&[0.0; 16], false);

    assert!(!missing.is_resolved());
    assert!(ctx.writes().is_empty());
}

#[test]
fn test_unresolved_uniform_with_error_policy() {
    let ctx = FakeContext::new();
    let config = ProgramConfig {
        unresolved_names: UnresolvedNamePolicy::Error,
        ..ProgramConfig::default()
    };
    let program = linked(&ctx, config);

    let result = Uniform::new(&program, "iMissing");
    assert_eq!(
        result.map(|u| u.location()),
        Err(ShaderError::UnresolvedName {
            kind: BindingKind::Uniform,
            name: "iMissing".to_string(),
        })
    );
    assert_eq!(
        Attribute::new(&program, "normal"),
        Err(ShaderError::UnresolvedName {
            kind: BindingKind::Attribute,
            name: "normal".to_string(),
        })
    );
}

#[test]
fn test_bindings_go_stale_after_relink() {
    let ctx = FakeContext::new();
    let mut program = linked(&ctx, ProgramConfig::default());

    let time = Uniform::new(&program, "iTime").unwrap();
    let position = Attribute::new(&program, "position").unwrap();
    assert!(!time.is_stale(&program));

    program.link().unwrap();
    assert!(time.is_stale(&program));
    assert!(position.is_stale(&program));

    let time = Uniform::new(&program, "iTime").unwrap();
    assert!(!time.is_stale(&program));

    program.release();
    assert!(time.is_stale(&program));
}

#[test]
fn test_uniform_set_reports_inactive_context() {
    let ctx = FakeContext::new();
    let (hook, seen) = recording_hook();
    let program = linked(&ctx, ProgramConfig::default()).with_diagnostic_hook(hook);
    let time = Uniform::new(&program, "iTime").unwrap();

    ctx.set_active(false);
    time.set(1.0f32);

    assert_eq!(
        *seen.borrow(),
        vec![Diagnostic::ContextInactive {
            operation: "Uniform::set"
        }]
    );
    assert_eq!(ctx.writes().len(), 1);
}

#[test]
fn test_bindings_go_stale_after_failed_relink() {
    let ctx = FakeContext::new();
    let mut program = linked(&ctx, ProgramConfig::default());

    let time = Uniform::new(&program, "iTime").unwrap();
    let position = Attribute::new(&program, "position").unwrap();
    assert!(time.is_resolved());

    ctx.fail_next_link();
    assert!(program.link().is_err());

    assert_eq!(program.link_state(), LinkState::LinkFailed);
    assert!(time.is_stale(&program));
    assert!(position.is_stale(&program));
    assert_eq!(program.uniform_location("iTime"), Ok(NOT_FOUND));
}

#[test]
fn test_binding_reports_inactive_context_once() {
    let ctx = FakeContext::new();
    let (hook, seen) = recording_hook();
    let program = linked(&ctx, ProgramConfig::default()).with_diagnostic_hook(hook);

    ctx.set_active(false);
    Uniform::new(&program, "iTime").unwrap();
    Attribute::new(&program, "position").unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![
            Diagnostic::ContextInactive {
                operation: "Uniform::new"
            },
            Diagnostic::ContextInactive {
                operation: "Attribute::new"
            },
        ]
    );
}
