#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "avm-abi", about = "ARC-4 ABI type and value tools")]
struct Cli {
	/// Log codec decisions at debug level.
	#[arg(long, global = true)]
	verbose: bool,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Show the canonical form and layout of a type.
	Type(cmd::types::Args),
	/// Encode a JSON value against a type.
	Encode(cmd::encode::Args),
	/// Decode hex bytes against a type.
	Decode(cmd::decode::Args),
	/// Show a method's signature and selector.
	Method(cmd::method::Args),
	/// Encode application arguments for a method call.
	Call(cmd::call::Args),
	/// Decode a method's return log entry.
	Return(cmd::returns::Args),
}

fn main() {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	if let Err(err) = run(cli.command) {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn init_tracing(verbose: bool) {
	let filter = if verbose {
		EnvFilter::new("avm_abi=debug")
	} else {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
	};

	tracing_subscriber::fmt().with_env_filter(filter).with_target(false).with_writer(std::io::stderr).init();
}

fn run(command: Commands) -> cmd::Result<()> {
	match command {
		Commands::Type(args) => cmd::types::run(args),
		Commands::Encode(args) => cmd::encode::run(args),
		Commands::Decode(args) => cmd::decode::run(args),
		Commands::Method(args) => cmd::method::run(args),
		Commands::Call(args) => cmd::call::run(args),
		Commands::Return(args) => cmd::returns::run(args),
	}
}
