//! Pipeline orchestrator.

use eyre::Result;
use langs_manifest::{Group, Manifest};
use tracing::debug;

use super::{
    CompilationContext, Phase, PhaseInfo,
    phases::{RenderPhase, ValidatePhase},
};
use crate::hooks::HookRegistry;

/// The generation pipeline orchestrator.
///
/// Runs the built-in phases (validate, render) followed by any user
/// phases. Execution stops after a phase that leaves an error diagnostic;
/// the context is still returned so callers can report it.
///
/// # Example
///
/// ```ignore
/// let ctx = Pipeline::new()
///     .select(vec![Group::Cpp, Group::Golang])
///     .strict(true)
///     .run(manifest)?;
/// ```
pub struct Pipeline {
    validate: ValidatePhase,
    render: bool,
    phases: Vec<Box<dyn Phase>>,
    groups: Vec<Group>,
    strict: bool,
    hooks: HookRegistry,
}

impl Pipeline {
    /// Create a pipeline with the built-in phases and hooks.
    pub fn new() -> Self {
        Self {
            validate: ValidatePhase::new(),
            render: true,
            phases: Vec::new(),
            groups: Vec::new(),
            strict: false,
            hooks: HookRegistry::builtin(),
        }
    }

    /// Only validate; skip rendering.
    pub fn validate_only(mut self) -> Self {
        self.render = false;
        self
    }

    /// Replace the validate phase (e.g. to add lints).
    pub fn validate(mut self, validate: ValidatePhase) -> Self {
        self.validate = validate;
        self
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Render only these groups, in this order.
    pub fn select(mut self, groups: Vec<Group>) -> Self {
        self.groups = groups;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn hooks(mut self, hooks: HookRegistry) -> Self {
        self.hooks = hooks;
        self
    }

    /// Phases that [`Pipeline::run`] will execute, in order.
    pub fn phase_info(&self) -> Vec<PhaseInfo> {
        self.phases_in_order().iter().map(|p| p.info()).collect()
    }

    /// Run the pipeline on a manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if any phase fails fatally.
    pub fn run(&self, manifest: Manifest) -> Result<CompilationContext> {
        let mut ctx = CompilationContext::new(manifest);
        ctx.groups = self.groups.clone();
        ctx.strict = self.strict;
        ctx.hooks = self.hooks.clone();

        for phase in self.phases_in_order() {
            debug!(phase = phase.name(), "running phase");
            phase.run(&mut ctx)?;

            if ctx.has_errors() {
                debug!(
                    phase = phase.name(),
                    errors = ctx.error_count(),
                    "stopping pipeline"
                );
                break;
            }
        }

        Ok(ctx)
    }

    fn phases_in_order(&self) -> Vec<&dyn Phase> {
        let mut phases: Vec<&dyn Phase> = vec![&self.validate];
        if self.render {
            phases.push(&RenderPhase);
        }
        phases.extend(self.phases.iter().map(|p| p.as_ref() as &dyn Phase));
        phases
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        str::FromStr,
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
    };

    use super::*;

    struct CountingPhase(Arc<AtomicUsize>);

    impl Phase for CountingPhase {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn description(&self) -> &'static str {
            "Counts how often it runs"
        }

        fn run(&self, _ctx: &mut CompilationContext) -> Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn parse_manifest(content: &str) -> Manifest {
        Manifest::from_str(content).expect("Failed to parse test manifest")
    }

    #[test]
    fn test_pipeline_renders_script() {
        let manifest = parse_manifest(
            r#"
            [packages.vim]
            group = "common"
            install = "package-manager"
        "#,
        );

        let ctx = Pipeline::new().run(manifest).expect("pipeline should succeed");

        assert!(!ctx.has_errors());
        let script = ctx.script.expect("script should be rendered");
        assert!(script.text().contains("yum install -y vim\n"));
    }

    #[test]
    fn test_errors_stop_before_render() {
        let count = Arc::new(AtomicUsize::new(0));
        let manifest = parse_manifest(
            r#"
            [packages.cmake]
            group = "cpp"
            install = "http-archive"
        "#,
        );

        let ctx = Pipeline::new()
            .phase(CountingPhase(count.clone()))
            .run(manifest)
            .expect("pipeline should return diagnostics");

        assert!(ctx.has_errors());
        assert!(ctx.script.is_none());
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_validate_only() {
        let manifest = parse_manifest(
            r#"
            [packages.vim]
            group = "common"
            install = "package-manager"
        "#,
        );

        let pipeline = Pipeline::new().validate_only();
        let names: Vec<_> = pipeline.phase_info().iter().map(|p| p.name).collect();
        assert_eq!(names, ["validate"]);

        let ctx = pipeline.run(manifest).unwrap();
        assert!(ctx.script.is_none());
    }

    #[test]
    fn test_user_phases_run_last() {
        let count = Arc::new(AtomicUsize::new(0));
        let pipeline = Pipeline::new().phase(CountingPhase(count.clone()));

        let names: Vec<_> = pipeline.phase_info().iter().map(|p| p.name).collect();
        assert_eq!(names, ["validate", "render", "counting"]);

        pipeline.run(Manifest::default()).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
