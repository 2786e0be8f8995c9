//! `whence` — trace React components and hooks to their declarations.
//!
//! For every JSX component and hook used in a file (or a selected line
//! range), resolves the name through its import specifier — relative,
//! index-file, or path-aliased — and follows default re-export chains to
//! the file and line where the symbol is physically declared, recursing
//! into each resolved file.

mod error;
mod extract;
mod graph;
mod locate;
mod model;
mod output;
mod parser;
mod resolve;
mod util;

use std::path::Path;

use error::WhenceError;
use resolve::{AliasMap, DEFAULT_ALIAS_ROOT};

struct CliArgs {
    json: bool,
    lines: Option<(usize, usize)>,
    alias_root: String,
    files: Vec<String>,
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut json = false;
    let mut lines: Option<(usize, usize)> = None;
    let mut alias_root = DEFAULT_ALIAS_ROOT.to_string();
    let mut files = Vec::new();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--json" => json = true,
            "--lines" | "-l" => {
                i += 1;
                if i >= args.len() {
                    return Err("--lines requires a START:END argument".to_string());
                }
                lines = Some(parse_line_range(&args[i])?);
            }
            "--alias-root" => {
                i += 1;
                if i >= args.len() {
                    return Err("--alias-root requires a path argument".to_string());
                }
                alias_root = args[i].clone();
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}"));
            }
            _ => files.push(args[i].clone()),
        }
        i += 1;
    }

    if lines.is_some() && files.len() > 1 {
        return Err("--lines accepts a single file".to_string());
    }

    Ok(CliArgs {
        json,
        lines,
        alias_root,
        files,
    })
}

fn parse_line_range(arg: &str) -> Result<(usize, usize), String> {
    let err = || format!("--lines: invalid range '{arg}' (expected START:END)");
    let (start, end) = arg.split_once(':').ok_or_else(err)?;
    let start: usize = start.parse().map_err(|_| err())?;
    let end: usize = end.parse().map_err(|_| err())?;
    if start == 0 || end < start {
        return Err(err());
    }
    Ok((start, end))
}

fn main() {
    let raw: Vec<String> = std::env::args().skip(1).collect();

    if raw.is_empty() || raw[0] == "-h" || raw[0] == "--help" {
        print_help();
        std::process::exit(0);
    }

    let args = match parse_args(&raw) {
        Ok(a) => a,
        Err(msg) => {
            eprintln!("whence: {msg}");
            std::process::exit(1);
        }
    };

    if args.files.is_empty() {
        eprintln!("whence: no files specified");
        std::process::exit(1);
    }

    let multi = args.files.len() > 1;
    for (i, path_str) in args.files.iter().enumerate() {
        if i > 0 && multi {
            println!("\n---\n");
        }
        if let Err(e) = process_file(path_str, &args) {
            eprintln!("whence: {e}");
        }
    }
}

fn process_file(path_str: &str, args: &CliArgs) -> Result<(), WhenceError> {
    let entry = std::fs::canonicalize(Path::new(path_str)).map_err(|e| WhenceError::Io {
        path: path_str.to_string(),
        source: e,
    })?;

    let selection = match args.lines {
        Some(range) => Some(read_line_range(&entry, range)?),
        None => None,
    };

    let aliases = AliasMap::load(&entry, &args.alias_root)?;
    let records = graph::analyze(&aliases, &entry, selection.as_deref())?;

    if args.json {
        match serde_json::to_string_pretty(&output::to_json(&records)) {
            Ok(text) => println!("{text}"),
            Err(e) => eprintln!("whence: {e}"),
        }
    } else {
        print!("{}", output::render(&records));
    }

    Ok(())
}

/// Slice a 1-based inclusive line range out of the entry file, standing in
/// for an editor selection.
fn read_line_range(path: &Path, (start, end): (usize, usize)) -> Result<String, WhenceError> {
    let content = std::fs::read_to_string(path).map_err(|e| WhenceError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    let selected: Vec<&str> = content
        .lines()
        .skip(start - 1)
        .take(end - start + 1)
        .collect();

    Ok(selected.join("\n"))
}

fn print_help() {
    eprintln!("whence — trace React components and hooks to their declarations");
    eprintln!("Usage: whence [options] <file> [file2 ...]");
    eprintln!();
    eprintln!("Resolves every component and hook used in the file to the");
    eprintln!("file:line where it is declared, following index files, path");
    eprintln!("aliases, and default re-export chains.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --lines N:M, -l N:M   Analyze only the selected line range");
    eprintln!("                        (imports are still read from the whole file)");
    eprintln!("  --alias-root PATH     Root segment for '@/' imports when no");
    eprintln!("                        tsconfig is found (default /src)");
    eprintln!("  --json                Emit the resolution tree as JSON");
    eprintln!("  -h, --help            Show help");
}
