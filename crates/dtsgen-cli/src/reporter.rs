use colored::Colorize;
use std::path::Path;

use dtsgen_core::PipelineReport;

/// Formats the run report for the terminal.
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    pub fn render(&self, report: &PipelineReport, output_dir: &Path) -> String {
        let mut out = String::new();

        for failure in &report.render_failures {
            out.push_str(&format!(
                "{}: {} {}: {}\n",
                self.error_label(),
                failure.kind,
                self.name(&failure.name),
                failure.message
            ));
        }
        for unresolved in &report.unresolved_base_classes {
            out.push_str(&format!(
                "{}: base class {} of {} was not found\n",
                self.warning_label(),
                self.name(&unresolved.extends),
                self.name(&unresolved.class)
            ));
        }
        if report.unresolved_types > 0 {
            out.push_str(&format!(
                "{}: {} type reference(s) rendered as any\n",
                self.warning_label(),
                report.unresolved_types
            ));
        }

        out.push_str(&format!(
            "Generated {} declaration file(s) into {}\n",
            self.count(report.rendered),
            output_dir.display()
        ));
        out.push_str(&format!(
            "  {} source(s), {} enum(s), {} namespace(s), {} interface(s), {} class(es)\n",
            report.sources, report.enums, report.namespaces, report.interfaces, report.classes
        ));
        out.push_str(&format!(
            "  {} base class(es) linked, {} inherited overload(s)\n",
            report.linked_base_classes, report.inherited_overloads
        ));

        let failures = report.failure_count();
        if failures > 0 {
            let line = format!("{failures} declaration(s) failed to render");
            if self.color {
                out.push_str(&line.red().bold().to_string());
            } else {
                out.push_str(&line);
            }
            out.push('\n');
        }

        out
    }

    fn error_label(&self) -> String {
        if self.color {
            "error".red().bold().to_string()
        } else {
            "error".to_string()
        }
    }

    fn warning_label(&self) -> String {
        if self.color {
            "warning".yellow().bold().to_string()
        } else {
            "warning".to_string()
        }
    }

    fn name(&self, name: &str) -> String {
        if self.color {
            name.cyan().to_string()
        } else {
            name.to_string()
        }
    }

    fn count(&self, count: usize) -> String {
        if self.color {
            count.to_string().green().bold().to_string()
        } else {
            count.to_string()
        }
    }
}
