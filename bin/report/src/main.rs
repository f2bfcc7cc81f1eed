//! Render a PNG showing what a palette can mix.
//!
//! From top to bottom the image holds the palette, a sweep of hues and
//! lightnesses with each input color above its projected match, and a slice
//! through the RGB cube at a fixed blue where unachievable colors are grayed
//! out.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chromorph::{math::lerp, Component, GamutLibrary, Settings, Srgb};
use clap::Parser;
use image::{Rgb, RgbImage};
use imageproc::{drawing::draw_filled_rect_mut, rect::Rect};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chromorph-report")]
#[command(author, version, about = "Render the mixable gamut of a palette to a PNG")]
struct Cli {
    /// Settings file (JSON). Defaults are used when omitted.
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Where to write the image.
    #[arg(short, long, default_value = "report.png")]
    output: PathBuf,

    /// Hues across the sweep.
    #[arg(long, default_value = "24")]
    columns: u32,

    /// Lightness rows in the sweep.
    #[arg(long, default_value = "8")]
    rows: u32,

    /// Width and height of a sweep cell in pixels.
    #[arg(long, default_value = "32")]
    cell: u32,

    /// Blue value of the achievability slice.
    #[arg(long, default_value = "0.5")]
    blue: Component,
}

const UNACHIEVABLE: Rgb<u8> = Rgb([40, 40, 40]);

fn to_pixel(color: &Srgb) -> Rgb<u8> {
    let color = color.clip();
    Rgb([
        (color.red * 255.0).round() as u8,
        (color.green * 255.0).round() as u8,
        (color.blue * 255.0).round() as u8,
    ])
}

/// A fully saturated color at `hue` in [0..1], darkened towards black below
/// half `lightness` and washed towards white above it.
fn sweep_color(hue: Component, lightness: Component) -> Srgb {
    let channel = |offset: Component| {
        let h = (hue + offset).rem_euclid(1.0) * 6.0;
        ((h - 3.0).abs() - 1.0).clamp(0.0, 1.0)
    };
    let (r, g, b) = (channel(0.0), channel(2.0 / 3.0), channel(1.0 / 3.0));

    let tone = |v: Component| {
        if lightness < 0.5 {
            v * lightness * 2.0
        } else {
            lerp(v, 1.0, lightness * 2.0 - 1.0)
        }
    };
    Srgb::new(tone(r), tone(g), tone(b))
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let Some(path) = &cli.settings else {
        return Ok(Settings::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("could not read settings from {}", path.display()))?;
    Settings::from_json_str(&json)
        .with_context(|| format!("invalid settings in {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    anyhow::ensure!(cli.columns > 0 && cli.rows > 0 && cli.cell > 1, "empty sweep");

    let settings = load_settings(&cli)?;
    let mut library = GamutLibrary::from_settings(&settings);
    library.refresh().context("could not build the gamut")?;
    let gamut = library.snapshot()?;

    let width = cli.columns * cli.cell;
    let palette_height = cli.cell;
    let sweep_height = cli.rows * cli.cell;
    let slice_height = width / 2;
    let mut img = RgbImage::new(width, palette_height + sweep_height + slice_height);

    // Palette strip.
    let pigments = gamut.palette().len().max(1) as u32;
    for (i, pigment) in gamut.palette().iter().enumerate() {
        let x = i as u32 * width / pigments;
        let w = (i as u32 + 1) * width / pigments - x;
        draw_filled_rect_mut(
            &mut img,
            Rect::at(x as i32, 0).of_size(w.max(1), palette_height),
            to_pixel(&pigment.color()),
        );
    }

    // Sweep: each cell shows the input over its projection.
    let mut total_distance = 0.0;
    let mut matches = 0_usize;
    let half = cli.cell / 2;
    for row in 0..cli.rows {
        let lightness = (row as Component + 0.5) / cli.rows as Component;
        let inputs: Vec<Srgb> = (0..cli.columns)
            .map(|column| sweep_color(column as Component / cli.columns as Component, lightness))
            .collect();

        let projections = library.project_all(&inputs)?;
        let y = palette_height + row * cli.cell;
        for (column, (input, projection)) in inputs.iter().zip(&projections).enumerate() {
            let x = (column as u32 * cli.cell) as i32;
            let upper = Rect::at(x, y as i32).of_size(cli.cell, half);
            draw_filled_rect_mut(&mut img, upper, to_pixel(input));

            let lower = Rect::at(x, (y + half) as i32).of_size(cli.cell, cli.cell - half);
            if projection.is_match() {
                draw_filled_rect_mut(&mut img, lower, to_pixel(&projection.achieved));
                total_distance += projection.distance;
                matches += 1;
            } else {
                draw_filled_rect_mut(&mut img, lower, UNACHIEVABLE);
            }
        }
    }

    // Achievability slice: red across, green down.
    let top = palette_height + sweep_height;
    let mut achievable = 0_usize;
    for py in 0..slice_height {
        for px in 0..width {
            let color = Srgb::new(
                px as Component / (width - 1).max(1) as Component,
                py as Component / (slice_height - 1).max(1) as Component,
                cli.blue,
            );
            let pixel = if gamut.is_achievable(&color, settings.occupancy_tolerance)? {
                achievable += 1;
                to_pixel(&color)
            } else {
                UNACHIEVABLE
            };
            img.put_pixel(px, top + py, pixel);
        }
    }

    let mean_distance = if matches > 0 {
        total_distance / matches as Component
    } else {
        Component::INFINITY
    };
    tracing::info!(
        samples = gamut.table().len(),
        matched = matches,
        mean_distance,
        achievable_fraction = achievable as f64 / (width * slice_height).max(1) as f64,
        "rendered report"
    );

    img.save(&cli.output)
        .with_context(|| format!("could not write image to {}", cli.output.display()))?;

    Ok(())
}
