use dialoguer::{Confirm, Select};

use crate::{
    choices::{InstallChoice, SwapChoice},
    config::Config,
    error::ConfigError,
    ui,
};

/// Lets the user override the configured initial choices with arrow-key
/// selection. Only choices the configuration allows are offered.
pub fn run(config: &mut Config) -> Result<(), ConfigError> {
    select_install(config)?;
    select_swap(config)?;

    if config.install_choice() == InstallChoice::Erase {
        select_filesystem(config)?;
    }

    if !Confirm::new()
        .with_prompt("Keep these partitioning choices?")
        .default(true)
        .interact()?
    {
        return Err(ConfigError::Cancelled);
    }

    Ok(())
}

// ── Selections ────────────────────────────────────────────────────────────────

fn select_install(config: &mut Config) -> Result<(), ConfigError> {
    let options = config.available_install_choices();
    let labels: Vec<&str> = options.iter().map(|c| c.display_name()).collect();
    let current = options
        .iter()
        .position(|c| *c == config.install_choice())
        .unwrap_or(0);

    if !config.allow_manual_partitioning() {
        ui::print_info("Manual partitioning is disabled by the configuration.");
    }

    let idx = Select::new()
        .with_prompt("Partitioning")
        .items(&labels)
        .default(current)
        .interact()?;

    config.set_install_choice(options[idx]);
    Ok(())
}

fn select_swap(config: &mut Config) -> Result<(), ConfigError> {
    let options: Vec<SwapChoice> = config.swap_choices().iter().copied().collect();

    match options.as_slice() {
        [] => {
            ui::print_warning("No supported swap choice is configured; no swap will be created.");
            config.set_swap_choice(SwapChoice::NoSwap);
            return Ok(());
        }
        [only] => {
            ui::print_info(&format!("Swap: {} (only option).", only.display_name()));
            config.set_swap_choice(*only);
            return Ok(());
        }
        _ => {}
    }

    let labels: Vec<&str> = options.iter().map(|c| c.display_name()).collect();
    let current = options
        .iter()
        .position(|c| *c == config.swap_choice())
        .unwrap_or(0);

    let idx = Select::new()
        .with_prompt("Swap")
        .items(&labels)
        .default(current)
        .interact()?;

    config.set_swap_choice(options[idx]);
    Ok(())
}

fn select_filesystem(config: &mut Config) -> Result<(), ConfigError> {
    let options = config.erase_fs_types().to_vec();
    if options.len() < 2 {
        return Ok(());
    }

    let current = options
        .iter()
        .position(|fs| fs == config.erase_fs_type_choice())
        .unwrap_or(0);

    let idx = Select::new()
        .with_prompt("Filesystem for the erased disk")
        .items(&options)
        .default(current)
        .interact()?;

    config.set_erase_fs_type_choice(&options[idx]);
    Ok(())
}
