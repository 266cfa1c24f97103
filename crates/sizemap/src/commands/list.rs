//! List command

use anyhow::Result;
use camino::Utf8Path;
use sizemap_core::SizeCatalog;
use tabled::{settings::Style, Table, Tabled};

use crate::cli::ListArgs;
use crate::output;
use crate::utils::load_catalog;

#[derive(Debug, Tabled)]
pub(crate) struct VariantRow {
    pub image: String,
    pub variant: String,
    pub width: u32,
    pub height: u32,
}

pub fn run(args: ListArgs, catalog: Option<&Utf8Path>) -> Result<()> {
    let file = load_catalog(catalog)?;
    let catalog = file.catalog();

    if let Some(image) = &args.image {
        if !catalog.contains_image(image) {
            output::warning(&format!("No variants for image '{}'", image));
            if !args.json {
                return Ok(());
            }
        }
    }

    if args.json {
        match &args.image {
            Some(image) => {
                let names: Vec<&str> = catalog.list_variants(image).into_iter().collect();
                println!("{}", serde_json::to_string_pretty(&names)?);
            }
            None => println!("{}", serde_json::to_string_pretty(catalog)?),
        }
        return Ok(());
    }

    let rows = variant_rows(catalog, args.image.as_deref());
    if rows.is_empty() {
        output::info("Catalog is empty");
        return Ok(());
    }

    output::header(&format!("{} ({} images)", file.name(), catalog.len()));
    print_rows(rows);

    Ok(())
}

/// One row per variant, optionally limited to one image
pub(crate) fn variant_rows(catalog: &SizeCatalog, image: Option<&str>) -> Vec<VariantRow> {
    catalog
        .iter()
        .filter(|(id, _)| image.is_none_or(|wanted| wanted == *id))
        .flat_map(|(id, variants)| {
            variants.iter().map(move |(name, dims)| VariantRow {
                image: id.to_string(),
                variant: name.clone(),
                width: dims.width,
                height: dims.height,
            })
        })
        .collect()
}

pub(crate) fn print_rows(rows: Vec<VariantRow>) {
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{}", table);
}
