//! Check command report data structures.

use std::path::PathBuf;

use hookgen_pipeline::StageHookSummary;

use super::output::{Output, Report};

/// Report data from manifest validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the config file.
    pub config_path: PathBuf,
    pub service_name: String,
    pub service_version: String,
    pub entity_count: usize,
    /// Length of the stage sequence for this manifest.
    pub stage_count: usize,
    /// Enabled plugins as `name version`, in load order.
    pub plugins: Vec<String>,
    /// Hooks registered per stage.
    pub hooks: Vec<StageHookSummary>,
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
        out.newline();
        out.preformatted(&format!("  {} v{}", self.service_name, self.service_version));
        out.preformatted(&format!(
            "  {} entit{}, {} stage{}",
            self.entity_count,
            if self.entity_count == 1 { "y" } else { "ies" },
            self.stage_count,
            plural(self.stage_count)
        ));

        if self.plugins.is_empty() {
            return;
        }
        out.newline();
        out.section(&format!("Plugins ({})", self.plugins.len()));
        for plugin in &self.plugins {
            out.list_item(plugin);
        }

        out.newline();
        out.section("Hooks");
        for summary in &self.hooks {
            out.preformatted(&format!("  {}", summary.stage));
            if !summary.before.is_empty() {
                out.preformatted(&format!("    before: {}", summary.before.join(", ")));
            }
            if !summary.after.is_empty() {
                out.preformatted(&format!("    after: {}", summary.after.join(", ")));
            }
        }
    }
}
