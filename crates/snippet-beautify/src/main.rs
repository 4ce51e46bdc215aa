//! Snippet beautifier
//!
//! Re-indents a script snippet with one tab per open bracket and prints the result.
//!
//! # Usage
//!
//! ```bash
//! snippet-beautify [--config <config.json>] [--check | --write] [<file_path>]
//! ```
//!
//! Without a file path the snippet is read from stdin. `--check` prints nothing and exits with
//! status 1 if the file would change; `--write` rewrites the file in place.
//!
//! Set `RUST_LOG=snippet_editor=debug` to see engine logs on stderr.

use clap::Parser;
use snippet_editor::{EditorConfig, beautify};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::{fs, process};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "snippet-beautify")]
#[command(version, about = "Re-indent a script snippet by bracket depth", long_about = None)]
struct Cli {
    /// Snippet to beautify (reads stdin when omitted)
    input: Option<PathBuf>,
    /// JSON editor configuration
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Print nothing; exit with status 1 if the snippet would change
    #[arg(long)]
    check: bool,
    /// Rewrite the input file in place
    #[arg(short, long, conflicts_with = "check", requires = "input")]
    write: bool,
}

fn load_config(path: Option<&PathBuf>) -> io::Result<EditorConfig> {
    let Some(path) = path else {
        return Ok(EditorConfig::default());
    };
    let json = fs::read_to_string(path)?;
    EditorConfig::from_json(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn run(options: &Cli) -> io::Result<bool> {
    let config = load_config(options.config.as_ref())?;

    let text = match &options.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let out = beautify(&text, &config.language);
    let changed = out != text;
    debug!(changed, lines = out.lines().count(), "beautified");

    if options.check {
        return Ok(changed);
    }
    match (&options.input, options.write) {
        (Some(path), true) => {
            if changed {
                fs::write(path, &out)?;
                info!(path = %path.display(), "rewrote");
            }
        }
        _ => io::stdout().lock().write_all(out.as_bytes())?,
    }
    Ok(changed)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let options = Cli::parse();

    match run(&options) {
        Ok(changed) if options.check && changed => process::exit(1),
        Ok(_) => {}
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(2);
        }
    }
}
