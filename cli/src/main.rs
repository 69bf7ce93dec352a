use clap::{ArgGroup, Parser};
use std::io::Read;
use std::process;

use msg_schema_compiler::error::SchemaError;
use msg_schema_compiler::{compile_schema, generate_descriptors, generate_layout};

#[derive(Parser)]
#[command(name = "msgschema")]
#[command(about = "Generate C record layouts and schema descriptors from msg definitions", long_about = None)]
#[command(group(ArgGroup::new("mode").required(true).multiple(false)))]
struct Cli {
    /// Emit the layout header: structs, presence-bit macros, accessors
    #[arg(long, group = "mode")]
    header: bool,

    /// Emit the descriptor source: defaults, field tables, schema records,
    /// array accessor implementations
    #[arg(long, group = "mode")]
    source: bool,
}

fn run(cli: &Cli) -> Result<(), SchemaError> {
    // Schema text comes in on stdin, the selected artifact goes to stdout.
    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;

    let schema = compile_schema(&text)?;
    let artifact = if cli.header {
        generate_layout(&schema)
    } else {
        generate_descriptors(&schema)
    };
    print!("{}", artifact);
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("msgschema: {}", err);
        process::exit(1);
    }
}
