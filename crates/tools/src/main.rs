use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use runtime::AtlasOptions;

mod shell;
use shell::{Command, HELP, build_atlas, execute};

/// Debug shell for the folding map: builds an atlas on in-memory elements and
/// drives it with line commands.
#[derive(Debug, Parser)]
#[command(name = "atlas", after_help = HELP)]
struct Args {
    /// JSON options file (camelCase fields, all optional).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Face width in pixels.
    #[arg(long)]
    width: Option<f64>,

    /// Face height as a multiple of the width.
    #[arg(long)]
    ratio: Option<f64>,

    /// Number of folding pairs.
    #[arg(long)]
    panels: Option<usize>,

    /// Command to run instead of reading stdin; repeatable.
    #[arg(short = 'c', long = "exec")]
    exec: Vec<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    let args = Args::parse();
    let options = load_options(&args)?;
    let mut atlas = build_atlas(options).map_err(|e| e.to_string())?;

    if !args.exec.is_empty() {
        for line in &args.exec {
            if !run_line(&mut atlas, line)? {
                break;
            }
        }
        return Ok(());
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        write!(stdout, "atlas> ").map_err(|e| e.to_string())?;
        stdout.flush().map_err(|e| e.to_string())?;

        let mut line = String::new();
        let read = stdin.lock().read_line(&mut line).map_err(|e| e.to_string())?;
        if read == 0 {
            break;
        }
        // Interactive mistakes are reported and the shell keeps going.
        match run_line(&mut atlas, &line) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => eprintln!("error: {e}"),
        }
    }
    Ok(())
}

/// Returns `false` once the shell should stop.
fn run_line(atlas: &mut shell::ShellAtlas, line: &str) -> Result<bool, String> {
    let Some(command) = Command::parse(line)? else {
        return Ok(true);
    };
    if command == Command::Quit {
        return Ok(false);
    }
    if let Some(output) = execute(atlas, &command)? {
        println!("{output}");
    }
    Ok(true)
}

fn load_options(args: &Args) -> Result<AtlasOptions, String> {
    let mut options = match &args.config {
        Some(path) => {
            let payload =
                fs::read_to_string(path).map_err(|e| format!("read {}: {e}", path.display()))?;
            AtlasOptions::from_json(&payload).map_err(|e| e.to_string())?
        }
        None => AtlasOptions::default(),
    };

    if let Some(width) = args.width {
        options.width = width;
    }
    if let Some(ratio) = args.ratio {
        options.ratio = ratio;
    }
    if let Some(panels) = args.panels {
        options.panels = panels;
    }
    options.validate().map_err(|e| e.to_string())?;
    Ok(options)
}
