use std::{path::Path, rc::Rc};

use tracing::info;

use crate::{
    config::Config, error::ConfigError, firmware::FirmwareType, settings, storage::GlobalStorage,
    ui,
};

/// Reads the module configuration and applies it to a fresh [`Config`]
/// bound to a new global storage.
///
/// `preload` is a storage file written by an earlier stage; its values are
/// in place before the configuration is applied.
pub fn run(
    config_path: &Path,
    preload: Option<&Path>,
    firmware: FirmwareType,
) -> Result<(Config, Rc<GlobalStorage>), ConfigError> {
    let gs = Rc::new(GlobalStorage::new());

    if let Some(path) = preload {
        gs.load(path)?;
        ui::print_info(&format!(
            "Loaded {} global storage entries from {}.",
            gs.len(),
            path.display()
        ));
    }

    let map = settings::load_file(config_path)?;
    info!(path = %config_path.display(), %firmware, "applying partition configuration");

    let mut config = Config::new(firmware).with_storage(Rc::clone(&gs));
    config.set_configuration_map(&map);
    config.fill_gs_secondary_configuration();

    if config.warnings().is_empty() {
        ui::print_success(&format!("{} is valid.", config_path.display()));
    } else {
        for w in config.warnings() {
            if w.is_error() {
                ui::print_error(&w.to_string());
            } else {
                ui::print_warning(&w.to_string());
            }
        }
        ui::print_info(&format!(
            "{} loaded with {} warning(s).",
            config_path.display(),
            config.warnings().len()
        ));
    }

    Ok((config, gs))
}
