//! Derive command: compute variant sizes for one image
//!
//! Only dimensions are computed; no image files are read or written.

use anyhow::{Context, Result};
use sizemap_core::{parse_scaling, Dimensions, SizeCatalog, SizeMapBuilder};

use crate::cli::DeriveArgs;
use crate::commands::list::{print_rows, variant_rows};
use crate::utils::load_settings;

pub fn run(args: DeriveArgs) -> Result<()> {
    let scale = match args.scale {
        Some(scale) => scale,
        None => load_settings()?.default_scaling,
    };

    let catalog = derive(&args.image, Dimensions::new(args.width, args.height), &scale)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
    } else {
        print_rows(variant_rows(&catalog, None));
    }

    Ok(())
}

fn derive(image: &str, original: Dimensions, scale: &str) -> Result<SizeCatalog> {
    let scaling = parse_scaling(scale)?;
    SizeMapBuilder::new(scaling)
        .image(image, original)
        .build()
        .with_context(|| format!("Cannot derive variants for {} from {}", image, original))
}
