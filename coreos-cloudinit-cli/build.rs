//! Build script for coreos-cloudinit-cli.
//!
//! This script generates a man page at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

fn input_arg() -> Arg {
    Arg::new("input")
        .long("input")
        .short('i')
        .help("Configuration tree to read (YAML); `-` reads stdin")
        .value_name("PATH")
        .env("CLOUDINIT_INPUT")
}

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
fn build_cli() -> Command {
    Command::new("coreos-cloudinit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render CoreOS cloud-config documents")
        .long_about(
            "Render CoreOS cloud-config documents from YAML configuration trees, \
             reporting validation warnings on stderr",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress warnings and other non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommands(vec![
            Command::new("render")
                .about("Render a configuration tree to a cloud-config document")
                .arg(input_arg())
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Write the document to a file instead of stdout")
                        .value_name("PATH"),
                )
                .arg(
                    Arg::new("shebang")
                        .long("shebang")
                        .help("Start the document with #!cloud-config")
                        .action(ArgAction::SetTrue)
                        .env("CLOUDINIT_USE_SHEBANG"),
                )
                .arg(
                    Arg::new("print-id")
                        .long("print-id")
                        .help("Print the content id (SHA-256 of the document)")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .help("Output format")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                ),
            Command::new("validate")
                .about("Check a configuration tree without printing the document")
                .arg(input_arg()),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(Arg::new("shell").required(true)),
        ])
}

fn main() -> std::io::Result<()> {
    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").unwrap_or_default());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer)?;
    fs::write(man_dir.join("coreos-cloudinit.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
