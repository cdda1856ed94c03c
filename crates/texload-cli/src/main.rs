//! Inspect a KTX2 texture from disk or HTTP.
//!
//! Decodes the texture and prints its shape, format, and texel layout.

use std::{fmt::Write as _, path::PathBuf, process::ExitCode};

use clap::Parser;
use texload::{ImageData, KtxReader, ReadOptions, RemoteReader, fetch::contains_server_address};

#[derive(Parser, Debug)]
#[command(about = "Inspect KTX2 textures from disk or HTTP")]
struct CliArgs {
    /// Path or http(s) URL of the texture.
    location: String,

    /// Extra directory to search for relative paths (repeatable). Directories
    /// from TEXLOAD_FILE_PATH are searched after these.
    #[arg(long = "search-path", value_name = "DIR")]
    search_paths: Vec<PathBuf>,

    /// Give this reader a private HTTP client instead of the shared one.
    #[arg(long)]
    no_shared_client: bool,
}

impl CliArgs {
    fn read_options(&self) -> ReadOptions {
        let env = ReadOptions::from_env();
        self.search_paths
            .iter()
            .chain(env.search_paths())
            .fold(ReadOptions::new(), |options, path| {
                options.with_search_path(path)
            })
    }
}

/// Render a human-readable summary of a decoded texture.
fn describe(image: &ImageData) -> String {
    let layout = image.layout();
    let extent = image.extent();
    let mut out = String::new();

    let _ = writeln!(out, "view type:   {:?}", layout.view_type);
    let _ = writeln!(out, "format:      {}", layout.format.0);
    let _ = writeln!(
        out,
        "extent:      {}x{}x{} ({:?})",
        extent.width,
        extent.height,
        extent.depth,
        image.dimensions()
    );
    let _ = writeln!(
        out,
        "block:       {}x{}x{}",
        layout.block_width, layout.block_height, layout.block_depth
    );
    let _ = writeln!(out, "mip levels:  {}", layout.max_mip_levels);
    let _ = writeln!(
        out,
        "origin:      flip x={} y={} z={}",
        layout.origin.flips_x(),
        layout.origin.flips_y(),
        layout.origin.flips_z()
    );
    let texels = image.texels();
    let unit = if texels.kind().is_block() {
        "blocks:"
    } else {
        "texels:"
    };
    let _ = writeln!(
        out,
        "{unit:<13}{} x {:?} ({} bytes)",
        texels.len(),
        texels.kind(),
        texels.as_bytes().len()
    );
    if !image.is_complete() {
        let _ = writeln!(out, "missing:     {} images zero-filled", image.missing_images());
    }
    out
}

fn main() -> ExitCode {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = CliArgs::parse();
    if args.no_shared_client {
        texload::set_manage_shared_client(false);
    }
    let options = args.read_options();

    let image = if contains_server_address(&args.location) {
        RemoteReader::new(KtxReader::new()).read(&args.location, &options)
    } else {
        KtxReader::new().read_file(&args.location, &options)
    };

    let Some(image) = image else {
        tracing::error!(location = %args.location, "could not read texture");
        return ExitCode::FAILURE;
    };

    print!("{}", describe(&image));
    ExitCode::SUCCESS
}
