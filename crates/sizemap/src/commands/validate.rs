//! Validate command

use anyhow::{anyhow, Result};
use camino::{Utf8Path, Utf8PathBuf};
use sizemap_core::LoadOptions;

use crate::cli::ValidateArgs;
use crate::output;
use crate::utils::{load_catalog_file, load_settings, resolve_catalog_path};

pub fn run(args: ValidateArgs, catalog: Option<&Utf8Path>) -> Result<()> {
    let settings = load_settings()?;
    let options = LoadOptions {
        strict_original_bounds: args.strict || settings.strict_original_bounds,
    };

    let files: Vec<Utf8PathBuf> = if args.files.is_empty() {
        vec![resolve_catalog_path(catalog)?]
    } else {
        args.files
    };

    let mut failed = 0;
    for path in &files {
        let spinner = output::spinner(&format!("Validating {}...", path));
        let result = load_catalog_file(path, &options);
        spinner.finish_and_clear();

        match result {
            Ok(file) => {
                let catalog = file.catalog();
                output::success(&format!("Catalog is valid: {}", path));
                output::kv("Images", &catalog.len().to_string());
                output::kv("Variants", &catalog.variant_count().to_string());

                // Each violation was already logged while loading
                let violations = catalog.bounds_violations().len();
                if violations > 0 {
                    output::kv("Variants larger than original", &violations.to_string());
                }
            }
            Err(e) => {
                failed += 1;
                output::error(&format!("{:#}", e));
            }
        }
    }

    if failed > 0 {
        return Err(anyhow!(
            "{} of {} catalog files failed validation",
            failed,
            files.len()
        ));
    }

    Ok(())
}
