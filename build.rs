// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

fn format_arg() -> Arg {
    Arg::new("format")
        .short('f')
        .long("format")
        .value_parser(["csv", "xlsx", "json"])
        .value_delimiter(',')
        .action(ArgAction::Append)
        .default_values(["csv", "xlsx"])
        .help("Output formats, comma separated")
}

fn build_cli() -> Command {
    Command::new("licman")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Licman Contributors")
        .about("License manifest listing and change tracking")
        .subcommand_required(false)
        .arg(
            Arg::new("force")
                .long("force")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Overwrite existing output files"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Require version, recipe name and license in every stanza"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Verbose diagnostics"),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Extra diagnostic output"),
        )
        .subcommand(
            Command::new("list")
                .about("Convert a license manifest into a table")
                .arg(Arg::new("manifest").required(true).help("License manifest file (input)"))
                .arg(
                    Arg::new("output")
                        .required(true)
                        .help("Output name base, the extension is appended"),
                )
                .arg(format_arg()),
        )
        .subcommand(
            Command::new("changes")
                .about("Compare two license manifests and highlight the changes")
                .arg(Arg::new("previous").required(true).help("Previous license manifest file"))
                .arg(Arg::new("current").required(true).help("Current license manifest file"))
                .arg(
                    Arg::new("output")
                        .required(true)
                        .help("Output name base, the extension is appended"),
                )
                .arg(format_arg()),
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .required(true)
                        .value_parser(["bash", "elvish", "fish", "powershell", "zsh"])
                        .help("Shell type"),
                ),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Create man directory
    let out_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).expect("Failed to create man directory");

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).expect("Failed to render man page");

    let man_path = man_dir.join("licman.1");
    fs::write(&man_path, buffer).expect("Failed to write man page");

    println!("cargo:warning=Man page generated at {}", man_path.display());
}
