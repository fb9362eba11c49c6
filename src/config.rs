use clap::ValueEnum;
use color_eyre::eyre::{Result, bail};
use smart_default::SmartDefault;

/// How the tracer-obtaining expression in a synthesized span statement is shaped.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum TracerStyle {
	/// `tracer().Start(ctx, "...")`
	#[default]
	Func,
	/// `otel.Tracer(tracerName).Start(ctx, "...")`
	Const,
}

/// Read-only lint configuration, constructed once and passed into the pass.
#[derive(Clone, Debug, SmartDefault)]
pub struct LintConfig {
	/// How the otel.Tracer should be invoked (default: func)
	pub tracer_style: TracerStyle,
	/// The name of the function or const that should be invoked to get an otel.Tracer (default: "tracer")
	#[default(String::from("tracer"))]
	pub tracer_name: String,
}

impl LintConfig {
	/// Validated eagerly, before any file is visited.
	pub fn validate(&self) -> Result<()> {
		if self.tracer_name.is_empty() {
			bail!("tracer-name is empty");
		}
		Ok(())
	}
}
