use std::path::{Path, PathBuf};
use std::process::ExitCode;

use lib_tga::{Color, DecodeError, EncodingError, Format, Image, ImageError};
use log::{error, info};
use thiserror::Error;

use tinyrender::model::{Model, ModelError};
use tinyrender::render;

const USAGE: &str = "\
usage: tinyrender <command>

commands:
  lines [OUT]                  draw the triangle demo (default framebuffer.tga)
  wireframe OBJ [OUT] [SIZE]   draw the edges of a mesh (default wireframe.tga, 800)
  stats OBJ                    print vertex and edge counts of a mesh
  info TGA                     print the dimensions and format of an image";

const PREVIEW_COUNT: usize = 5;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}\n\n{usage}", usage = USAGE)]
    Usage(String),
    #[error("Image error: {0}")]
    Image(#[from] ImageError),
    #[error("Failed to write image: {0}")]
    Encoding(#[from] EncodingError),
    #[error("Failed to read image: {0}")]
    Decoding(#[from] DecodeError),
    #[error("Failed to load mesh: {0}")]
    Model(#[from] ModelError),
}

#[derive(Debug, PartialEq)]
enum Command {
    Lines { out: PathBuf },
    Wireframe { obj: PathBuf, out: PathBuf, size: u16 },
    Stats { obj: PathBuf },
    Info { path: PathBuf },
}

fn parse_args(args: &[String]) -> Result<Command, AppError> {
    let missing = |what: &str| AppError::Usage(format!("missing {}", what));
    let path_or = |index: usize, default: &str| {
        PathBuf::from(args.get(index).map(String::as_str).unwrap_or(default))
    };

    match args.first().map(String::as_str) {
        Some("lines") => Ok(Command::Lines {
            out: path_or(1, "framebuffer.tga"),
        }),
        Some("wireframe") => {
            let obj = args.get(1).ok_or_else(|| missing("OBJ path"))?;
            let size = match args.get(3) {
                Some(size) => size
                    .parse()
                    .ok()
                    .filter(|&s: &u16| s > 0)
                    .ok_or_else(|| AppError::Usage(format!("invalid size '{}'", size)))?,
                None => 800,
            };
            Ok(Command::Wireframe {
                obj: PathBuf::from(obj),
                out: path_or(2, "wireframe.tga"),
                size,
            })
        }
        Some("stats") => Ok(Command::Stats {
            obj: PathBuf::from(args.get(1).ok_or_else(|| missing("OBJ path"))?),
        }),
        Some("info") => Ok(Command::Info {
            path: PathBuf::from(args.get(1).ok_or_else(|| missing("image path"))?),
        }),
        Some(other) => Err(AppError::Usage(format!("unknown command '{}'", other))),
        None => Err(missing("command")),
    }
}

fn draw_lines(out: &Path) -> Result<(), AppError> {
    let framebuffer = render::triangle_demo()?;
    framebuffer.write_tga_file(out, true, true)?;
    println!("Wrote {}", out.display());
    Ok(())
}

fn draw_wireframe(obj: &Path, out: &Path, size: u16) -> Result<(), AppError> {
    let model = Model::load_obj(obj)?;
    let mut framebuffer = Image::new(size, size, Format::Rgb)?;

    let drawn = render::wireframe(&model, &mut framebuffer, &Color::WHITE);
    framebuffer.write_tga_file(out, true, true)?;
    println!("Drew {} edges into {}", drawn, out.display());
    Ok(())
}

fn print_stats(obj: &Path) -> Result<(), AppError> {
    let model = Model::load_obj(obj)?;

    println!("Loaded model statistics:");
    println!("Number of vertices: {}", model.vertex_count());
    println!("Number of edges: {}", model.edge_count());

    println!("\nFirst few vertices:");
    for (i, vertex) in model.vertices().iter().take(PREVIEW_COUNT).enumerate() {
        println!("Vertex {}: {}", i, vertex);
    }

    println!("\nFirst few edges:");
    for (i, (from, to)) in model.edges().iter().take(PREVIEW_COUNT).enumerate() {
        println!("Edge {}: {} -> {}", i, from, to);
    }
    Ok(())
}

fn print_info(path: &Path) -> Result<(), AppError> {
    let image = Image::read_tga_file(path)?;
    println!(
        "{}: {}x{} {:?} ({} bits per pixel)",
        path.display(),
        image.width(),
        image.height(),
        image.format(),
        image.format().bits_per_pixel()
    );
    Ok(())
}

fn run(command: Command) -> Result<(), AppError> {
    info!("Running {:?}", command);
    match command {
        Command::Lines { out } => draw_lines(&out),
        Command::Wireframe { obj, out, size } => draw_wireframe(&obj, &out, size),
        Command::Stats { obj } => print_stats(&obj),
        Command::Info { path } => print_info(&path),
    }
}

fn main() -> ExitCode {
    let log_file = std::env::var_os("TINYRENDER_LOG").map(PathBuf::from);
    if let Err(e) = lib_tga::init_logging(log_file.as_deref()) {
        eprintln!("Can't open log file: {}", e);
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    match parse_args(&args).and_then(run) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
