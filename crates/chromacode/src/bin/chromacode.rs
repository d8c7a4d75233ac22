use std::error::Error;
use std::path::PathBuf;

use chromacode::detect;
use chromacode::frame::{bytes_to_chunks, chunks_to_bytes, render_grid};
use chromacode::Resolution;
use clap::{Parser, Subcommand};
use image::ImageReader;
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "chromacode", version, about = "Decode and render color-matrix-code markers")]
struct Cli {
    /// Increase log verbosity (repeat for trace output).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode every marker found in an image.
    Decode {
        /// Input image (PNG, JPEG, ...).
        image: PathBuf,
        /// Print the full report as JSON.
        #[arg(long)]
        json: bool,
        /// Unpack the chunks into bytes and print them as text.
        #[arg(long)]
        text: bool,
    },
    /// Render a marker carrying the given text payload.
    Render {
        /// Payload text to embed.
        text: String,
        /// Output image path.
        #[arg(short, long)]
        output: PathBuf,
        /// Grid resolution (data cells per edge).
        #[arg(long, default_value_t = 16)]
        resolution: usize,
        /// Pixels per cell.
        #[arg(long, default_value_t = 24)]
        cell_px: usize,
        /// White quiet-zone width in cells.
        #[arg(long, default_value_t = 2)]
        margin: usize,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = chromacode::core::init_with_level(level);

    match cli.command {
        Command::Decode { image, json, text } => decode(&image, json, text),
        Command::Render {
            text,
            output,
            resolution,
            cell_px,
            margin,
        } => render(&text, &output, resolution, cell_px, margin),
    }
}

fn decode(path: &PathBuf, json: bool, text: bool) -> Result<(), Box<dyn Error>> {
    let img = ImageReader::open(path)?.decode()?.to_rgb8();
    let mut decoder = detect::decoder_for(&img)?;
    let report = decoder.process(&detect::rgb_view(&img))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.decoded.is_empty() {
        eprintln!(
            "no markers decoded ({} candidates, {} border rejects, {} template rejects)",
            report.candidates, report.rejected_border, report.rejected_template
        );
        return Ok(());
    }

    for frame in &report.decoded {
        println!("resolution {}", frame.resolution.value());
        if text {
            let bytes = chunks_to_bytes(&frame.chunks);
            let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
            println!("{}", String::from_utf8_lossy(&bytes[..end]));
        } else {
            println!("{:?}", frame.chunks);
        }
    }
    Ok(())
}

fn render(
    text: &str,
    output: &PathBuf,
    resolution: usize,
    cell_px: usize,
    margin: usize,
) -> Result<(), Box<dyn Error>> {
    let resolution = Resolution::from_value(resolution)
        .ok_or_else(|| format!("unsupported resolution {resolution}"))?;

    let mut chunks = bytes_to_chunks(text.as_bytes());
    let capacity = resolution.content_chunks();
    if chunks.len() > capacity {
        return Err(format!(
            "payload needs {} chunks but resolution {} only holds {}",
            chunks.len(),
            resolution.value(),
            capacity
        )
        .into());
    }
    chunks.resize(capacity, 0);

    let grid = render_grid(&chunks, resolution)?;
    let marker = detect::marker_image(&grid, resolution, cell_px.max(1), margin);
    marker.save(output)?;
    println!("wrote marker to {}", output.display());
    Ok(())
}
