//! ansicolor - command line front end
//!
//! Annotates raw console output, renders annotated logs as HTML, or does
//! both in one go.

use std::env;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use tracing::{debug, error, info};

use ansicolor::config::loader::CONFIG_ENV;
use ansicolor::{
    AnsiTranscoder, ColorPalette, Config, ConfigLoader, ConsoleLog, ConsoleNoteCodec,
    ConsoleWriter,
};

/// What to do with the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Raw output to annotated log
    Encode,
    /// Annotated log to HTML
    Render,
    /// Raw output straight to HTML
    Html,
}

/// Command line arguments
#[derive(Debug, Default)]
struct AppArgs {
    command: Option<Command>,
    /// Input file, stdin when absent
    input: Option<PathBuf>,
    /// Configuration file path
    config_path: Option<PathBuf>,
    /// Palette override
    palette: Option<String>,
    /// Enable debug logging
    debug: bool,
    list_palettes: bool,
}

impl AppArgs {
    /// Parse command line arguments
    fn parse() -> Result<Self> {
        Self::parse_from(env::args().skip(1))
    }

    fn parse_from(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut app_args = AppArgs::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    let path = args.next().ok_or_else(|| anyhow!("Missing config file path"))?;
                    app_args.config_path = Some(PathBuf::from(path));
                }
                "--palette" | "-p" => {
                    let name = args.next().ok_or_else(|| anyhow!("Missing palette name"))?;
                    app_args.palette = Some(name);
                }
                "--debug" | "-d" => app_args.debug = true,
                "--list-palettes" => app_args.list_palettes = true,
                "--help" | "-h" => {
                    print_help();
                    process::exit(0);
                }
                "--version" | "-V" => {
                    println!("ansicolor v{}", ansicolor::VERSION);
                    process::exit(0);
                }
                "encode" if app_args.command.is_none() => app_args.command = Some(Command::Encode),
                "render" if app_args.command.is_none() => app_args.command = Some(Command::Render),
                "html" if app_args.command.is_none() => app_args.command = Some(Command::Html),
                opt if opt.starts_with('-') && opt != "-" => bail!("Unknown option: {}", opt),
                path => {
                    if app_args.command.is_none() {
                        bail!("Unknown command: {}", path);
                    }
                    if app_args.input.is_some() {
                        bail!("Only one input file may be given");
                    }
                    if path != "-" {
                        app_args.input = Some(PathBuf::from(path));
                    }
                }
            }
        }

        Ok(app_args)
    }
}

/// Print help information
fn print_help() {
    println!("ansicolor - render ANSI-colored console output as HTML");
    println!();
    println!("USAGE:");
    println!("    ansicolor [OPTIONS] <COMMAND> [FILE]");
    println!();
    println!("COMMANDS:");
    println!("    encode    Annotate raw output, writing an annotated log");
    println!("    render    Render an annotated log as HTML");
    println!("    html      Render raw output as HTML directly");
    println!();
    println!("    FILE defaults to standard input; output goes to standard output.");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <PATH>    Path to configuration file");
    println!("    -p, --palette <NAME>   Palette to use (xterm, vga, css, gnome-terminal, ...)");
    println!("    -d, --debug            Enable debug logging");
    println!("        --list-palettes    List available palettes and exit");
    println!("    -h, --help             Print this help message");
    println!("    -V, --version          Print version information");
    println!();
    println!("ENVIRONMENT:");
    println!("    {:<22}Path to configuration file", CONFIG_ENV);
    println!("    {:<22}Set logging level (error, warn, info, debug, trace)", "RUST_LOG");
}

fn main() {
    let args = match AppArgs::parse() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!();
            print_help();
            process::exit(2);
        }
    };

    // Logs go to stderr so they never mix with the output
    let log_level = if args.debug { "debug" } else { "warn" };
    let env_filter = env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from(env_filter))
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();

    if let Err(e) = run(&args) {
        match e.downcast_ref::<ansicolor::Error>() {
            Some(err) => error!("{}", ansicolor::describe_error(err)),
            None => error!("{:#}", e),
        }
        process::exit(1);
    }
}

fn run(args: &AppArgs) -> Result<()> {
    let config = load_configuration(args)?;

    if args.list_palettes {
        let registry = config.registry()?;
        let mut stdout = io::stdout().lock();
        for name in registry.list() {
            let marker = if name == config.palette { "*" } else { " " };
            writeln!(stdout, "{} {}", marker, name)?;
        }
        return Ok(());
    }

    let command = args
        .command
        .ok_or_else(|| anyhow!("No command given (expected encode, render or html)"))?;
    let palette = config.resolve_palette()?;
    let input = read_input(args)?;
    debug!("Read {} bytes of input", input.len());

    let output = match command {
        Command::Encode => encode(&input, args.palette.as_ref().map(|_| palette))?,
        Command::Render => ConsoleLog::parse(&input, &ConsoleNoteCodec).render_html(&palette),
        Command::Html => html(&input, &palette),
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    info!("Wrote {} bytes", output.len());
    Ok(())
}

/// Load configuration from file or the search paths, then apply overrides
fn load_configuration(args: &AppArgs) -> Result<Config> {
    let mut config = match &args.config_path {
        Some(path) => {
            debug!("Loading config from: {}", path.display());
            ConfigLoader::new()
                .load_from_path(path)
                .with_context(|| format!("Failed to load {}", path.display()))?
        }
        None => ConfigLoader::load()?,
    };

    if let Some(name) = &args.palette {
        debug!("Applying palette override: {}", name);
        config.palette = name.clone();
    }

    Ok(config)
}

fn read_input(args: &AppArgs) -> Result<String> {
    let bytes = match &args.input {
        Some(path) => fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buffer = Vec::new();
            io::stdin().lock().read_to_end(&mut buffer)?;
            buffer
        }
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Annotate raw output. The palette is recorded in each note only when one
/// was chosen explicitly.
fn encode(input: &str, palette: Option<Arc<ColorPalette>>) -> Result<String> {
    let writer = ConsoleWriter::new(Vec::new(), ConsoleNoteCodec);
    let mut writer = match palette {
        Some(palette) => writer.with_palette(palette),
        None => writer,
    };
    writer.write_lines(input)?;
    debug!("Annotated {} chunks", writer.notes_written());
    Ok(String::from_utf8(writer.into_inner())?)
}

fn html(input: &str, palette: &ColorPalette) -> String {
    let transcoded = AnsiTranscoder::new(palette).transcode(input);
    let body = if transcoded.is_changed() {
        transcoded.into_string()
    } else {
        ansicolor::ansi::escape_html(input)
    };
    format!("<pre>{}</pre>", ansicolor::linkify(&body))
}
