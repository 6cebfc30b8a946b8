use std::path::PathBuf;
use std::process;

use clap::Parser;

use bitasm::app::{self, Config, Outcome};

#[derive(Parser, Debug)]
#[command(name = "bitasm")]
#[command(author, version, about = "Assembles a VM program into packed little-endian bytecode", long_about = None)]
struct Cli {
  /// Program to assemble: YAML records, or assembly text if the extension is `.asm` or `.s`
  #[arg(value_name = "INPUT_FILE")]
  input_file: PathBuf,

  /// Binary file to write
  #[arg(value_name = "OUTPUT_FILE")]
  output_file: PathBuf,

  /// Print every instruction next to its encoded bytes
  #[arg(long)]
  test: bool,

  /// Enable debug logging
  #[arg(short, long)]
  verbose: bool,
}

fn main() {
  let cli = Cli::parse();

  let filter = match cli.verbose {
    true  => "debug",
    false => "warn"
  };
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
    )
    .init();

  let config = Config {
    input_file : cli.input_file,
    output_file: cli.output_file,
    test       : cli.test,
  };

  let result = app::run(&config);
  match &result {
    Ok(Outcome::Empty) => {
      println!("The program in `{}` is empty. Nothing was written.", config.input_file.display());
    }
    Ok(Outcome::Written { .. }) => {}
    Err(error) => eprintln!("{}", app::describe(error)),
  }
  process::exit(app::exit_code(&result));
}
