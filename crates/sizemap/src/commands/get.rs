//! Get command: resolve one variant's dimensions

use anyhow::Result;
use camino::Utf8Path;
use serde::Serialize;
use sizemap_core::types::ORIGINAL;
use sizemap_core::{Dimensions, SizeCatalog};

use crate::cli::GetArgs;
use crate::output;
use crate::utils::load_catalog;

#[derive(Debug, Serialize, PartialEq, Eq)]
struct ResolvedVariant<'a> {
    image: &'a str,
    variant: &'a str,
    width: u32,
    height: u32,
}

pub fn run(args: GetArgs, catalog: Option<&Utf8Path>) -> Result<()> {
    let file = load_catalog(catalog)?;
    let resolved = resolve(file.catalog(), &args.image, &args.variant, args.fallback)?;

    if resolved.variant != args.variant {
        output::warning(&format!(
            "Variant {}/{} not found, using {}",
            args.image, args.variant, resolved.variant
        ));
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&resolved)?);
    } else {
        println!("{}", Dimensions::new(resolved.width, resolved.height));
    }

    Ok(())
}

fn resolve<'a>(
    catalog: &SizeCatalog,
    image: &'a str,
    variant: &'a str,
    fallback: bool,
) -> Result<ResolvedVariant<'a>> {
    let dimensions = if fallback {
        catalog.get_variant_or_original(image, variant)?
    } else {
        catalog.get_variant(image, variant)?
    };

    let variant = if catalog.list_variants(image).contains(variant) {
        variant
    } else {
        ORIGINAL
    };

    Ok(ResolvedVariant {
        image,
        variant,
        width: dimensions.width,
        height: dimensions.height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sizemap_core::SizeMapBuilder;

    fn sample() -> SizeCatalog {
        SizeMapBuilder::new(sizemap_core::parse_scaling("15 30 60").unwrap())
            .image("god", Dimensions::new(2912, 2047))
            .variant("thumb_only", "small", Dimensions::new(64, 64))
            .build()
            .unwrap()
    }

    #[test]
    fn test_resolve_existing_variant() {
        let catalog = sample();
        let resolved = resolve(&catalog, "god", "large", false).unwrap();
        assert_eq!(
            resolved,
            ResolvedVariant {
                image: "god",
                variant: "large",
                width: 1747,
                height: 1228,
            }
        );
    }

    #[test]
    fn test_resolve_missing_variant_without_fallback() {
        let catalog = sample();
        assert!(resolve(&catalog, "god", "nonexistent", false).is_err());
    }

    #[test]
    fn test_resolve_missing_variant_with_fallback() {
        let catalog = sample();
        let resolved = resolve(&catalog, "god", "xlarge", true).unwrap();
        assert_eq!(resolved.variant, ORIGINAL);
        assert_eq!((resolved.width, resolved.height), (2912, 2047));
    }

    #[test]
    fn test_resolve_fallback_keeps_existing_variant() {
        let catalog = sample();
        let resolved = resolve(&catalog, "god", "medium", true).unwrap();
        assert_eq!(resolved.variant, "medium");
        assert_eq!((resolved.width, resolved.height), (873, 614));
    }

    #[test]
    fn test_resolve_fallback_needs_image_and_original() {
        let catalog = sample();
        assert!(resolve(&catalog, "missing_image", "small", true).is_err());
        assert!(resolve(&catalog, "thumb_only", "large", true).is_err());
    }
}
