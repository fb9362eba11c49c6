use std::path::PathBuf;

use clap::{Parser, Subcommand};
use spanlint::{
	config::{LintConfig, TracerStyle},
	lint,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Run the lint and assert it passes (exit 1 on violations)
	Assert {
		/// Target directory with Go sources
		target_dir: PathBuf,

		/// How the otel.Tracer should be invoked
		#[arg(long, value_enum, default_value = "func")]
		tracer_style: TracerStyle,

		/// The name of the function or const that should be invoked to get an otel.Tracer
		#[arg(long, default_value = "tracer")]
		tracer_name: String,
	},
	/// Apply suggested fixes in place
	Format {
		/// Target directory with Go sources
		target_dir: PathBuf,

		/// How the otel.Tracer should be invoked
		#[arg(long, value_enum, default_value = "func")]
		tracer_style: TracerStyle,

		/// The name of the function or const that should be invoked to get an otel.Tracer
		#[arg(long, default_value = "tracer")]
		tracer_name: String,
	},
}

fn main() -> color_eyre::Result<()> {
	v_utils::clientside!();
	let cli = Cli::parse();

	let code = match cli.command {
		Commands::Assert {
			target_dir,
			tracer_style,
			tracer_name,
		} => lint::run_assert(&target_dir, &LintConfig { tracer_style, tracer_name })?,
		Commands::Format {
			target_dir,
			tracer_style,
			tracer_name,
		} => lint::run_format(&target_dir, &LintConfig { tracer_style, tracer_name })?,
	};
	std::process::exit(code);
}
