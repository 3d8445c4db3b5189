//! Render phase - assembles the provisioning script.

use eyre::{Result, WrapErr};

use crate::{
    pipeline::{CompilationContext, Phase},
    script::ProvisionScript,
};

/// Phase that renders the selected groups into a [`ProvisionScript`].
pub struct RenderPhase;

impl Phase for RenderPhase {
    fn name(&self) -> &'static str {
        "render"
    }

    fn description(&self) -> &'static str {
        "Render the selected groups into the provisioning script"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let selection = ctx.selection();
        let script = ProvisionScript::assemble(
            &ctx.manifest.generator,
            &ctx.manifest.image,
            &ctx.hooks,
            &selection,
        )
        .wrap_err("failed to render the provisioning script")?;

        ctx.script = Some(script);
        Ok(())
    }
}
