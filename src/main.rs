mod report;

use dommod::{ApplyResult, RuleSet, apply};
use std::fs;
use std::io::IsTerminal;
use std::path::PathBuf;

const DEFAULT_TARGET_DIR: &str = "modify";

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    match run(&config) {
        Ok((target, res)) => report::print_run(&target, &res, config.verbose, config.color),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

struct CliConfig {
    source: PathBuf,
    rule_file: Option<PathBuf>,
    target_dir: PathBuf,
    overwrite: bool,
    verbose: bool,
    color: bool,
}

fn run(config: &CliConfig) -> Result<(PathBuf, ApplyResult), String> {
    let document = fs::read_to_string(&config.source)
        .map_err(|err| format!("failed to read source {}: {err}", config.source.display()))?;

    let rules = match &config.rule_file {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read rule file {}: {err}", path.display()))?;
            RuleSet::parse(&raw).map_err(|err| format!("{}: {err}", path.display()))?
        }
        None => RuleSet::builtin().clone(),
    };

    // The target directory is not created on the fly; pointing the tool at a
    // missing directory is treated as a mistake.
    if !config.target_dir.is_dir() {
        return Err(format!("target directory {} does not exist", config.target_dir.display()));
    }

    let file_name = config
        .source
        .file_name()
        .ok_or_else(|| format!("source {} has no file name", config.source.display()))?;
    let target = config.target_dir.join(file_name);
    if target.exists() && !config.overwrite {
        return Err(format!("target {} already exists (pass --overwrite to replace it)", target.display()));
    }

    let res = apply(&document, &rules);

    fs::write(&target, res.output.as_bytes())
        .map_err(|err| format!("failed to write {}: {err}", target.display()))?;

    Ok((target, res))
}

fn parse_args() -> Result<CliConfig, String> {
    let mut source: Option<PathBuf> = None;
    let mut rule_file: Option<PathBuf> = None;
    let mut target_dir = PathBuf::from(DEFAULT_TARGET_DIR);
    let mut overwrite = false;
    let mut verbose = false;
    let mut color = std::io::stdout().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{}", help_text());
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("dommod {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "-o" | "--overwrite" => overwrite = true,
            "-v" | "--verbose" => verbose = true,
            "-c" | "--config" => {
                let value = args.next().ok_or_else(|| "error: --config expects a value".to_string())?;
                rule_file = Some(PathBuf::from(value));
            }
            "-t" | "--target-dir" => {
                let value = args.next().ok_or_else(|| "error: --target-dir expects a value".to_string())?;
                target_dir = PathBuf::from(value);
            }
            _ if arg.starts_with("--config=") => {
                rule_file = Some(PathBuf::from(arg.trim_start_matches("--config=")));
            }
            _ if arg.starts_with("--target-dir=") => {
                target_dir = PathBuf::from(arg.trim_start_matches("--target-dir="));
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                if source.is_some() {
                    return Err("error: source provided multiple times".to_string());
                }
                source = Some(PathBuf::from(arg));
            }
        }
    }

    let source = match source {
        Some(value) => value,
        None => return Err(format!("error: no source file provided\n\n{}", help_text())),
    };

    Ok(CliConfig { source, rule_file, target_dir, overwrite, verbose, color })
}

fn help_text() -> String {
    format!(
        "dommod {version}

Rewrites a KVM domain XML with an ordered set of regex substitution rules.

Usage:
  dommod [OPTIONS] <source>

Arguments:
  <source>                   Domain XML file to rewrite.

Options:
  -c, --config <file>        YAML rule file. Defaults to the built-in rules
                             for a CentOS-exported domain.
  -t, --target-dir <dir>     Existing directory the rewritten file is placed
                             in, under the source's file name.
                             Default: {default_target}
  -o, --overwrite            Replace the target file if it already exists.
  -v, --verbose              Print the outcome of every rule.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Exit codes:
  0  Success.
  1  Runtime or I/O error.
  2  Invalid arguments or missing source.
",
        version = env!("CARGO_PKG_VERSION"),
        default_target = DEFAULT_TARGET_DIR
    )
}
