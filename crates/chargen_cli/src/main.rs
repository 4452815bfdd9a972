use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use flexi_logger::Logger;

use chargen_engine::{
    formats, recognize, resolve_chip_config, resolve_system_config, system_preset, BitOrder, BitPadding, Glyph, GlyphSet, GlyphSetConfig, PixelBuffer,
    ReadingOrder, RecognitionConfig, SetMetadata, SYSTEM_PRESETS,
};

#[derive(Parser)]
#[command(name = "chargen", about = "Character ROM glyph set tools", version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct GeometryArgs {
    #[arg(help = "System preset supplying the binary geometry (see `chargen systems`).", long)]
    system: Option<String>,

    #[arg(help = "Chip preset supplying the binary geometry.", long, conflicts_with = "system")]
    chip: Option<String>,

    #[arg(help = "Glyph width in pixels.", long, default_value_t = 8)]
    width: usize,

    #[arg(help = "Glyph height in pixels.", long, default_value_t = 8)]
    height: usize,

    #[arg(help = "Leftmost pixel in the lowest-order bit instead of the highest.", long, default_value_t = false)]
    lsb: bool,

    #[arg(help = "Unused bits sit before the data bits in the last byte of a row.", long, default_value_t = false)]
    pad_left: bool,
}

impl GeometryArgs {
    fn resolve(&self) -> anyhow::Result<GlyphSetConfig> {
        if let Some(system) = &self.system {
            let (config, _) = resolve_system_config(system)?;
            return Ok(config);
        }
        if let Some(chip) = &self.chip {
            let (config, _) = resolve_chip_config(chip)?;
            return Ok(config);
        }
        let mut config = GlyphSetConfig::new(self.width, self.height);
        if self.lsb {
            config.bit_order = BitOrder::Lsb;
        }
        if self.pad_left {
            config.padding = BitPadding::Left;
        }
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "List the known system and chip presets")]
    Systems,

    #[command(about = "Print geometry and glyph count of a ROM dump")]
    Info {
        path: PathBuf,
        #[command(flatten)]
        geometry: GeometryArgs,
    },

    #[command(about = "Print one glyph of a ROM dump as ASCII art")]
    Show {
        path: PathBuf,
        #[arg(help = "Glyph index within the set.", long, default_value_t = 0)]
        index: usize,
        #[command(flatten)]
        geometry: GeometryArgs,
    },

    #[command(about = "Convert between ROM dumps and JSON set envelopes")]
    Convert {
        input: PathBuf,
        output: PathBuf,
        #[command(flatten)]
        geometry: GeometryArgs,
    },

    #[command(about = "Extract a glyph set from a scanned or rendered image")]
    Extract {
        image: PathBuf,
        output: PathBuf,
        #[command(flatten)]
        geometry: GeometryArgs,
        #[arg(help = "Source-pixel x origin of the first glyph cell.", long, default_value_t = 0)]
        offset_x: usize,
        #[arg(help = "Source-pixel y origin of the first glyph cell.", long, default_value_t = 0)]
        offset_y: usize,
        #[arg(help = "Source pixels per logical pixel, horizontally.", long, default_value_t = 1)]
        pixel_width: usize,
        #[arg(help = "Source pixels per logical pixel, vertically.", long, default_value_t = 1)]
        pixel_height: usize,
        #[arg(help = "Horizontal gap between glyph cells in source pixels.", long, default_value_t = 0)]
        gap_x: usize,
        #[arg(help = "Vertical gap between glyph cells in source pixels.", long, default_value_t = 0)]
        gap_y: usize,
        #[arg(help = "Forced column count, 0 auto-detects.", long, default_value_t = 0)]
        columns: usize,
        #[arg(help = "Forced row count, 0 auto-detects.", long, default_value_t = 0)]
        rows: usize,
        #[arg(help = "Luminance cutoff 0-255, darker pixels are foreground.", long, default_value_t = 128)]
        threshold: u8,
        #[arg(help = "Flip foreground/background polarity.", long, default_value_t = false)]
        invert: bool,
        #[arg(help = "Deskew rotation in degrees, clamped to [-2, 2].", long, default_value_t = 0.0)]
        rotate: f32,
        #[arg(help = "Reading order used to assign glyph indices.", long, default_value = "ltr-ttb")]
        reading_order: ReadingOrder,
    },
}

fn main() -> anyhow::Result<()> {
    // handle must stay alive for the duration of the process
    let _logger = Logger::try_with_env_or_str("warn")
        .and_then(Logger::start)
        .map_err(|err| eprintln!("Failed to initialize logger: {err}"))
        .ok();

    let args = Cli::parse();
    match args.command {
        Commands::Systems => list_systems(),
        Commands::Info { path, geometry } => info(&path, &geometry),
        Commands::Show { path, index, geometry } => show(&path, index, &geometry),
        Commands::Convert { input, output, geometry } => convert(&input, &output, &geometry),
        Commands::Extract {
            image,
            output,
            geometry,
            offset_x,
            offset_y,
            pixel_width,
            pixel_height,
            gap_x,
            gap_y,
            columns,
            rows,
            threshold,
            invert,
            rotate,
            reading_order,
        } => {
            let config = geometry.resolve()?;
            let recognition = RecognitionConfig {
                offset_x,
                offset_y,
                pixel_width,
                pixel_height,
                gap_x,
                gap_y,
                char_width: config.width,
                char_height: config.height,
                force_columns: columns,
                force_rows: rows,
                threshold,
                invert,
                rotation_degrees: rotate,
                reading_order,
            };
            extract(&image, &output, config, geometry.system.as_deref(), &recognition)
        }
    }
}

fn list_systems() -> anyhow::Result<()> {
    for system in SYSTEM_PRESETS {
        let (config, count) = resolve_system_config(system.id)?;
        println!(
            "{:<20} {:<28} {:>2}x{:<2} {:>3} glyphs  ({})",
            system.id, system.name, config.width, config.height, count, system.manufacturer
        );
    }
    Ok(())
}

fn load_set(path: &Path, geometry: &GeometryArgs) -> anyhow::Result<GlyphSet> {
    Ok(formats::load_from(path, geometry.resolve()?).with_context(|| format!("loading {}", path.display()))?)
}

fn info(path: &Path, geometry: &GeometryArgs) -> anyhow::Result<()> {
    let set = load_set(path, geometry)?;
    let config = set.config;
    println!("{}", path.display());
    println!("  geometry : {}x{} ({} bytes per glyph)", config.width, config.height, config.bytes_per_glyph());
    println!("  bit order: {:?}, padding: {:?}, byte order: {:?}", config.bit_order, config.padding, config.effective_byte_order());
    println!("  glyphs   : {}", set.len());
    if !set.metadata.name.is_empty() {
        println!("  name     : {}", set.metadata.name);
    }
    Ok(())
}

fn show(path: &Path, index: usize, geometry: &GeometryArgs) -> anyhow::Result<()> {
    let set = load_set(path, geometry)?;
    let Some(glyph) = set.get_glyph(index) else {
        bail!("glyph index {index} out of range, the set has {} glyphs", set.len());
    };
    print!("{glyph}");
    Ok(())
}

fn convert(input: &Path, output: &Path, geometry: &GeometryArgs) -> anyhow::Result<()> {
    let mut set = load_set(input, geometry)?;
    set.metadata.touch();
    formats::save_as(output, &set).with_context(|| format!("writing {}", output.display()))?;
    println!("Wrote {} glyphs to {}", set.len(), output.display());
    Ok(())
}

fn extract(image_path: &Path, output: &Path, config: GlyphSetConfig, system: Option<&str>, recognition: &RecognitionConfig) -> anyhow::Result<()> {
    let buffer = PixelBuffer::load(image_path).with_context(|| format!("decoding image {}", image_path.display()))?;

    let result = recognize(&buffer, recognition);
    if result.glyphs.is_empty() {
        bail!("no glyph cells fit the image under the given grid parameters");
    }
    log::info!("recognized a {}x{} glyph grid", result.columns, result.rows);

    // reassign raster positions to logical indices per the reading order
    let order = recognition.reading_order;
    let mut glyphs = vec![Glyph::default(); result.glyphs.len()];
    for row in 0..result.rows {
        for col in 0..result.columns {
            let logical = order.to_logical_index(row, col, result.rows, result.columns);
            glyphs[logical] = result.glyphs[row * result.columns + col].clone();
        }
    }

    let mut set = GlyphSet {
        metadata: SetMetadata::named(image_path.file_stem().map(|stem| stem.to_string_lossy().to_string()).unwrap_or_default()),
        config,
        glyphs,
    };
    if let Some(preset) = system.and_then(system_preset) {
        set.metadata.system = preset.name.to_string();
        set.metadata.manufacturer = preset.manufacturer.to_string();
    }
    set.metadata.source = image_path.to_string_lossy().to_string();
    set.metadata.origin = Some("recognition".to_string());

    formats::save_as(output, &set).with_context(|| format!("writing {}", output.display()))?;
    println!("Wrote {}x{} = {} glyphs to {}", result.columns, result.rows, set.len(), output.display());
    Ok(())
}
