use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::Parser;
use rayon::prelude::*;

use tagdown::{EngineError, Renderer};

mod cli;
use cli::{Cli, Commands};

fn read_all(path: Option<&PathBuf>) -> io::Result<String> {
    match path {
        Some(p) => fs::read_to_string(p),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn start_dir_for(input_path: Option<&PathBuf>) -> io::Result<PathBuf> {
    if let Some(p) = input_path {
        Ok(p.parent().unwrap_or(Path::new(".")).to_path_buf())
    } else {
        std::env::current_dir()
    }
}

fn engine_error(e: EngineError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, e)
}

fn load_renderer(explicit: Option<&Path>, start_dir: &Path) -> io::Result<Renderer> {
    let (cfg, cfg_path) = tagdown::config::load(explicit, start_dir)?;

    if let Some(path) = &cfg_path {
        log::debug!("Using config from: {}", path.display());
    } else {
        log::debug!("Using default config");
    }

    Renderer::from_config(&cfg).map_err(engine_error)
}

/// `notes.md` -> `notes.html`, optionally moved into `out_dir`
fn output_path(input: &Path, out_dir: Option<&Path>) -> PathBuf {
    let html = input.with_extension("html");
    match (out_dir, html.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => html,
    }
}

fn is_same_file(a: &Path, b: &Path) -> io::Result<bool> {
    if a == b {
        return Ok(true);
    }
    if !a.exists() || !b.exists() {
        return Ok(false);
    }
    Ok(fs::canonicalize(a)? == fs::canonicalize(b)?)
}

fn render_file(renderer: &Renderer, input: &Path, out_dir: Option<&Path>) -> io::Result<PathBuf> {
    let dest = output_path(input, out_dir);
    if is_same_file(input, &dest)? {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("output {} would overwrite the input", dest.display()),
        ));
    }

    let text = fs::read_to_string(input)?;
    let html = renderer.render(&text).map_err(engine_error)?;
    fs::write(&dest, html)?;
    Ok(dest)
}

fn main() -> io::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render { file, output } => {
            let start_dir = start_dir_for(file.as_ref())?;
            let renderer = load_renderer(cli.config.as_deref(), &start_dir)?;

            let input = read_all(file.as_ref())?;
            let html = renderer.render(&input).map_err(engine_error)?;

            if let Some(path) = &output {
                fs::write(path, &html)?;
                println!("Rendered {}", path.display());
            } else {
                print!("{html}");
            }

            Ok(())
        }
        Commands::Batch { files, out_dir } => {
            let start_dir = std::env::current_dir()?;
            let renderer = load_renderer(cli.config.as_deref(), &start_dir)?;

            if let Some(dir) = &out_dir {
                fs::create_dir_all(dir)?;
            }

            let results: Vec<(&PathBuf, io::Result<PathBuf>)> = files
                .par_iter()
                .map(|file| (file, render_file(&renderer, file, out_dir.as_deref())))
                .collect();

            let mut failed = 0;
            for (file, result) in results {
                match result {
                    Ok(dest) => println!("Rendered {} -> {}", file.display(), dest.display()),
                    Err(e) => {
                        eprintln!("Error: {}: {}", file.display(), e);
                        failed += 1;
                    }
                }
            }

            if failed > 0 {
                eprintln!("\n{} of {} file(s) failed", failed, files.len());
                std::process::exit(1);
            }

            Ok(())
        }
        Commands::Tokens { file } => {
            let start_dir = start_dir_for(file.as_ref())?;
            let renderer = load_renderer(cli.config.as_deref(), &start_dir)?;

            let input = read_all(file.as_ref())?;
            let listing = renderer.describe_tokens(&input).map_err(engine_error)?;
            if !listing.is_empty() {
                println!("{listing}");
            }

            Ok(())
        }
    }
}
