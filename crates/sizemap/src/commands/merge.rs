//! Merge command

use anyhow::{anyhow, Context, Result};
use camino::Utf8PathBuf;
use sizemap_core::config::save_catalog;
use sizemap_core::{CatalogSet, LoadOptions, MergePolicy, SizeCatalog};

use crate::cli::MergeArgs;
use crate::output;
use crate::utils::load_settings;

pub fn run(args: MergeArgs) -> Result<()> {
    if args.output.exists() && !args.force {
        return Err(anyhow!(
            "File {} already exists. Use --force to overwrite.",
            args.output
        ));
    }

    let settings = load_settings()?;
    let policy = args.policy.unwrap_or(settings.merge_policy);
    let options = LoadOptions::from(&settings);

    let merged = merge_files(&args.files, policy, &options)?;

    save_catalog(&merged, &args.output)
        .with_context(|| format!("Failed to write {}", args.output))?;

    output::success(&format!(
        "Merged {} catalogs into {}",
        args.files.len(),
        args.output
    ));
    output::kv("Policy", &policy.to_string());
    output::kv("Images", &merged.len().to_string());

    Ok(())
}

fn merge_files(
    files: &[Utf8PathBuf],
    policy: MergePolicy,
    options: &LoadOptions,
) -> Result<SizeCatalog> {
    let set = CatalogSet::load_files(files, options).context("Failed to load catalogs")?;
    tracing::info!("Merging catalogs {:?} with {}", set.names(), policy);
    set.merged(policy)
        .with_context(|| format!("Failed to merge catalogs with policy {}", policy))
}
