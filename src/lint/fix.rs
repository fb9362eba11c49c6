use crate::config::{LintConfig, TracerStyle};

/// Source text of the synthesized span-opening block: the start-call
/// assignment, a deferred end, and a trailing blank line.
pub fn span_call_src(cfg: &LintConfig, context_in: &str, context_out: &str, func_name: &str) -> String {
	match cfg.tracer_style {
		TracerStyle::Func => format!(
			"{context_out}, span := {tracer}().Start({context_in}, \"{func_name}\")\ndefer span.End()\n\n",
			tracer = cfg.tracer_name
		),
		TracerStyle::Const => format!(
			"{context_out}, span := otel.Tracer({tracer}).Start({context_in}, \"{func_name}\")\ndefer span.End()\n\n",
			tracer = cfg.tracer_name
		),
	}
}
