use std::io::IsTerminal;
use std::path::Path;

use clap::{Arg, ArgAction, ArgMatches, Command};
use owo_colors::OwoColorize;
use tracing::{debug, warn, Level};

use otf::formatting::{render, Identity, Terminal};
use otf::language::{Flags, REGISTRY};
use otf::parsing::{self, Workspace};
use otf::validation::{validate_blocks, Severity};

mod problem;

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let matches = Command::new("otf")
        .version(VERSION)
        .propagate_version(true)
        .about("Build On-the-Fly roll formulas out of blocks.")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("debug")
                .long("debug")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit debug logging to standard error."),
        )
        .subcommand(
            Command::new("generate")
                .about("Generate the formula for the given workspace")
                .arg(
                    Arg::new("blind")
                        .long("blind")
                        .action(ArgAction::SetTrue)
                        .help("Roll blind, hiding the result from the player. Ignored in formula mode."),
                )
                .arg(
                    Arg::new("formula")
                        .long("formula")
                        .action(ArgAction::SetTrue)
                        .help("Bracket each block individually and enable the conditional blocks."),
                )
                .arg(
                    Arg::new("raw-control-chars")
                        .short('R')
                        .long("raw-control-chars")
                        .action(ArgAction::SetTrue)
                        .help("Emit ANSI escape codes for syntax highlighting even if output is redirected to a pipe or file."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The workspace file listing the blocks in order, or '-' to read standard input."),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Look for suspicious block arrangements in the given workspace")
                .arg(
                    Arg::new("concise")
                        .long("concise")
                        .action(ArgAction::SetTrue)
                        .help("Report each problem on a single line."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The workspace file listing the blocks in order, or '-' to read standard input."),
                ),
        )
        .subcommand(
            Command::new("blocks")
                .about("List the kinds of block available")
                .arg(
                    Arg::new("formula")
                        .long("formula")
                        .action(ArgAction::SetTrue)
                        .help("Include the blocks only available in formula mode."),
                ),
        )
        .get_matches();

    let level = if matches.get_flag("debug") {
        Level::DEBUG
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    match matches.subcommand() {
        Some(("generate", submatches)) => generate(submatches),
        Some(("check", submatches)) => check(submatches),
        Some(("blocks", submatches)) => blocks(submatches),
        Some(_) => {
            println!("No valid subcommand was used")
        }
        None => {
            println!("usage: otf [COMMAND] ...");
            println!("Try '--help' for more information.");
        }
    }
}

fn generate(submatches: &ArgMatches) {
    let filename = filename(submatches);
    let content = load(filename);
    let workspace = parse(filename, &content);

    let requested = Flags::new(
        workspace
            .flags
            .blind
            || submatches.get_flag("blind"),
        workspace
            .flags
            .formula
            || submatches.get_flag("formula"),
    );
    let flags = requested.effective();
    if flags != requested {
        warn!("Blind rolls are not available in formula mode; ignoring blind");
    }
    debug!(?flags);

    let output = if submatches.get_flag("raw-control-chars") || std::io::stdout().is_terminal() {
        render(&Terminal, &workspace.blocks, flags)
    } else {
        render(&Identity, &workspace.blocks, flags)
    };

    if !output.is_empty() {
        println!("{}", output);
    }

    for issue in validate_blocks(&workspace.blocks) {
        eprintln!(
            "{}",
            problem::concise_issue(&issue, &workspace, filename, &content)
        );
    }
}

fn check(submatches: &ArgMatches) {
    let filename = filename(submatches);
    let content = load(filename);
    let workspace = parse(filename, &content);

    let issues = validate_blocks(&workspace.blocks);
    debug!("{} issues", issues.len());

    let concise = submatches.get_flag("concise");
    for (i, issue) in issues
        .iter()
        .enumerate()
    {
        if concise {
            eprintln!(
                "{}",
                problem::concise_issue(issue, &workspace, filename, &content)
            );
        } else {
            if i > 0 {
                eprintln!();
            }
            eprintln!(
                "{}",
                problem::full_issue(issue, &workspace, filename, &content)
            );
        }
    }

    if issues
        .iter()
        .any(|issue| issue.severity == Severity::Error)
    {
        std::process::exit(1);
    }
}

fn blocks(submatches: &ArgMatches) {
    let formula = submatches.get_flag("formula");

    for entry in REGISTRY
        .iter()
        .filter(|entry| formula || !entry.kind.is_formula_only())
    {
        println!(
            "{:<12} {:<14} {:<6} {}",
            entry.tag,
            entry.label,
            entry
                .fixed
                .unwrap_or(""),
            entry.description
        );
    }
}

fn filename(submatches: &ArgMatches) -> &Path {
    match submatches.get_one::<String>("filename") {
        Some(filename) => Path::new(filename),
        None => {
            eprintln!("{}: a workspace filename is required", "error".bright_red());
            std::process::exit(1);
        }
    }
}

fn load(filename: &Path) -> String {
    match parsing::load(filename) {
        Ok(content) => content,
        Err(error) => {
            eprintln!("{}", problem::concise_loading_error(&error));
            std::process::exit(1);
        }
    }
}

fn parse(filename: &Path, content: &str) -> Workspace {
    match parsing::parse(filename, content) {
        Ok(workspace) => workspace,
        Err(errors) => {
            for error in &errors {
                eprintln!(
                    "{}",
                    problem::full_parsing_error(error, filename, content)
                );
            }
            std::process::exit(1);
        }
    }
}
