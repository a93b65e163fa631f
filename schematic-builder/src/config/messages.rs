//! Stage message templates.
//!
//! Templates may reference `{tsConfig}` and `{outputDir}`; every rendered
//! line is prefixed with the stage tag, e.g. `[CLEANING]`.

use crate::core::StageKind;
use std::collections::HashMap;
use std::path::Path;

/// Start, success and failure templates for one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageMessages {
    /// Logged on the info channel before the stage runs.
    pub start: String,
    /// Logged on the info channel after the stage succeeds.
    pub success: String,
    /// Logged on the error channel when the stage fails.
    pub failure: String,
}

impl StageMessages {
    /// Creates a set of stage templates.
    pub fn new(
        start: impl Into<String>,
        success: impl Into<String>,
        failure: impl Into<String>,
    ) -> Self {
        Self {
            start: start.into(),
            success: success.into(),
            failure: failure.into(),
        }
    }
}

/// Values substituted into templates.
#[derive(Debug, Clone, Copy)]
pub struct MessageVars<'a> {
    /// The configured compiler configuration path.
    pub ts_config: &'a str,
    /// The resolved output directory, once known.
    pub output_dir: Option<&'a Path>,
}

impl<'a> MessageVars<'a> {
    /// Creates vars before the output directory is known.
    #[must_use]
    pub fn new(ts_config: &'a str) -> Self {
        Self {
            ts_config,
            output_dir: None,
        }
    }

    /// Sets the output directory.
    #[must_use]
    pub fn with_output_dir(mut self, output_dir: &'a Path) -> Self {
        self.output_dir = Some(output_dir);
        self
    }
}

/// Immutable table of stage messages owned by a builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTable {
    stages: HashMap<StageKind, StageMessages>,
    compile_only: String,
}

impl Default for MessageTable {
    fn default() -> Self {
        let mut stages = HashMap::new();
        stages.insert(
            StageKind::ResolveOutputDir,
            StageMessages::new(
                "ℹ️ Getting output directory from \"{tsConfig}\"...",
                "✔ Output directory determined as: {outputDir}",
                "❌ Failed to get output directory",
            ),
        );
        stages.insert(
            StageKind::Clean,
            StageMessages::new(
                "⏳ Cleaning output directory \"{outputDir}\"...",
                "✔ Directory {outputDir} cleaned successfully.",
                "❌ Failed to clean output directory",
            ),
        );
        stages.insert(
            StageKind::Compile,
            StageMessages::new(
                "⏳ Compiling TypeScript ({tsConfig})...",
                "✔ TypeScript compilation ({tsConfig}) - completed successfully.",
                "❌ TypeScript compilation failed",
            ),
        );
        stages.insert(
            StageKind::Copy,
            StageMessages::new(
                "⏳ Copying project files to {outputDir}...",
                "✔ Project files copied to {outputDir} successfully.",
                "❌ Failed to copy project files",
            ),
        );
        stages.insert(
            StageKind::Rewrite,
            StageMessages::new(
                "⏳ Updating package.json in {outputDir}...",
                "✔ package.json in {outputDir} updated successfully.",
                "❌ Failed to update package.json",
            ),
        );
        stages.insert(
            StageKind::Verify,
            StageMessages::new(
                "⏳ Verifying schematics entry in {outputDir}...",
                "✔ Schematics entry found in {outputDir}.",
                "❌ Schematics entry is missing from the build output",
            ),
        );
        stages.insert(
            StageKind::Build,
            StageMessages::new(
                "⏳ Building schematics ({tsConfig})...",
                "✅ Build process completed successfully!",
                "❌ Build failed",
            ),
        );

        Self {
            stages,
            compile_only: "ℹ️ No outDir set in \"{tsConfig}\", only compiling TypeScript.".to_string(),
        }
    }
}

impl MessageTable {
    /// Creates the default table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the templates of one stage.
    #[must_use]
    pub fn with_stage(mut self, stage: StageKind, messages: StageMessages) -> Self {
        self.stages.insert(stage, messages);
        self
    }

    /// Replaces the compile-only notice.
    #[must_use]
    pub fn with_compile_only(mut self, template: impl Into<String>) -> Self {
        self.compile_only = template.into();
        self
    }

    /// Returns the templates of a stage, if any.
    #[must_use]
    pub fn get(&self, stage: StageKind) -> Option<&StageMessages> {
        self.stages.get(&stage)
    }

    /// Renders the start line of a stage.
    #[must_use]
    pub fn start(&self, stage: StageKind, vars: &MessageVars<'_>) -> String {
        self.line(stage, |m| &m.start, vars)
    }

    /// Renders the success line of a stage.
    #[must_use]
    pub fn success(&self, stage: StageKind, vars: &MessageVars<'_>) -> String {
        self.line(stage, |m| &m.success, vars)
    }

    /// Renders the failure line of a stage.
    #[must_use]
    pub fn failure(&self, stage: StageKind, vars: &MessageVars<'_>) -> String {
        self.line(stage, |m| &m.failure, vars)
    }

    /// Renders the compile-only notice.
    #[must_use]
    pub fn compile_only(&self, vars: &MessageVars<'_>) -> String {
        tagged(StageKind::ResolveOutputDir, &render(&self.compile_only, vars))
    }

    fn line(
        &self,
        stage: StageKind,
        pick: impl Fn(&StageMessages) -> &String,
        vars: &MessageVars<'_>,
    ) -> String {
        let body = self
            .stages
            .get(&stage)
            .map_or_else(|| stage.to_string(), |m| render(pick(m), vars));
        tagged(stage, &body)
    }
}

fn tagged(stage: StageKind, body: &str) -> String {
    format!("[{}] {}", stage.tag(), body)
}

fn render(template: &str, vars: &MessageVars<'_>) -> String {
    let output_dir = vars
        .output_dir
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    template
        .replace("{tsConfig}", vars.ts_config)
        .replace("{outputDir}", &output_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_table_covers_all_stages() {
        let table = MessageTable::default();
        for stage in StageKind::ALL {
            assert!(table.get(stage).is_some(), "missing messages for {stage}");
        }
    }

    #[test]
    fn test_render_substitutes_vars() {
        let table = MessageTable::default();
        let vars = MessageVars::new("tsconfig.json").with_output_dir(Path::new("/ws/dist"));

        assert_eq!(
            table.start(StageKind::Clean, &vars),
            "[CLEANING] ⏳ Cleaning output directory \"/ws/dist\"..."
        );
        assert_eq!(
            table.success(StageKind::Compile, &vars),
            "[COMPILING] ✔ TypeScript compilation (tsconfig.json) - completed successfully."
        );
        assert_eq!(
            table.failure(StageKind::Rewrite, &vars),
            "[UPDATING] ❌ Failed to update package.json"
        );
    }

    #[test]
    fn test_compile_only_notice() {
        let table = MessageTable::default();
        let line = table.compile_only(&MessageVars::new("tsconfig.json"));
        assert!(line.starts_with("[GENERAL]"));
        assert!(line.contains("tsconfig.json"));
    }

    #[test]
    fn test_override_stage() {
        let table = MessageTable::default().with_stage(
            StageKind::Copy,
            StageMessages::new("copy {outputDir}", "copied", "copy failed"),
        );
        let vars = MessageVars::new("tsconfig.json").with_output_dir(Path::new("out"));
        assert_eq!(table.start(StageKind::Copy, &vars), "[COPYING] copy out");
    }
}
