use std::path::Path;

use crate::{
    config::Config,
    error::ConfigError,
    storage::{GlobalStorage, StorageFormat},
    ui,
};

/// Shows the resulting choices, then writes the global storage to `output`,
/// or prints it to stdout when no output file is given.
pub fn run(
    config: &Config,
    gs: &GlobalStorage,
    output: Option<&Path>,
    format: StorageFormat,
    dry_run: bool,
) -> Result<(), ConfigError> {
    print_summary(config);

    match output {
        Some(path) if dry_run => {
            ui::print_warning(&format!("Dry run — {} was not written.", path.display()));
            print_storage(gs, format)
        }
        Some(path) => {
            gs.save(path)?;
            ui::print_success(&format!(
                "Wrote {} global storage entries to {}.",
                gs.len(),
                path.display()
            ));
            Ok(())
        }
        None => print_storage(gs, format),
    }
}

fn print_summary(config: &Config) {
    let swap_choices = config
        .swap_choices()
        .iter()
        .map(|c| c.name())
        .collect::<Vec<_>>()
        .join(", ");
    let storage = config
        .required_storage_gib()
        .map(|g| format!("{} GiB", g))
        .unwrap_or_else(|| "—".to_string());
    let efi_size = config
        .efi_partition_size()
        .map(|size| size.describe())
        .unwrap_or_else(|| "—".to_string());
    let filesystem = if config.erase_fs_type_choice().is_empty() {
        "—"
    } else {
        config.erase_fs_type_choice()
    };

    eprintln!();
    ui::print_kv_box(
        "Partitioning",
        &[
            ("Firmware", config.firmware().as_str()),
            ("EFI size", efi_size.as_str()),
            ("Install", config.install_choice().name()),
            ("Swap", config.swap_choice().name()),
            ("Swap options", swap_choices.as_str()),
            ("Filesystem", filesystem),
            ("Manual", if config.allow_manual_partitioning() { "allowed" } else { "disabled" }),
            ("Min. storage", storage.as_str()),
        ],
    );
}

fn print_storage(gs: &GlobalStorage, format: StorageFormat) -> Result<(), ConfigError> {
    let text = match format {
        StorageFormat::Json => gs.to_json_string()?,
        StorageFormat::Yaml => gs.to_yaml_string()?,
    };
    println!("{}", text.trim_end());
    Ok(())
}
