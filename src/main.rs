use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use partition_config::{
    error::ConfigError, firmware::FirmwareType, steps, storage::StorageFormat, ui,
};

// ── Command line ──────────────────────────────────────────────────────────────

/// Loads a partition-module configuration, reports problems with it and
/// writes the resulting global storage for later installer stages.
#[derive(Debug, Parser)]
#[command(name = "partition-config", version)]
struct Args {
    /// Partition module configuration (YAML).
    config: PathBuf,

    /// Global storage written by earlier stages (.json / .yaml).
    #[arg(long)]
    storage: Option<PathBuf>,

    /// Where to write the resulting global storage (.json / .yaml).
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Format used when printing the storage to stdout.
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Firmware type to publish; `auto` probes the running system.
    #[arg(long, value_enum, default_value_t = Firmware::Auto)]
    firmware: Firmware,

    /// Pick install and swap choices interactively.
    #[arg(long, short)]
    interactive: bool,

    /// Do not write the output file.
    #[arg(long)]
    dry_run: bool,

    /// Log debug output to stderr.
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Firmware {
    Auto,
    #[value(alias = "uefi")]
    Efi,
    #[value(alias = "legacy")]
    Bios,
}

impl Firmware {
    fn resolve(self) -> FirmwareType {
        match self {
            Firmware::Auto => FirmwareType::detect(),
            Firmware::Efi => FirmwareType::Efi,
            Firmware::Bios => FirmwareType::Bios,
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!();
        ui::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), ConfigError> {
    ui::print_banner();

    if args.dry_run {
        ui::print_warning("DRY-RUN MODE — no file will be written.");
    }

    let total = if args.interactive { 3 } else { 2 };

    // ── Step 1: Load the module configuration ────────────────────────────────
    ui::print_step(1, total, "Module Configuration");
    let (mut config, gs) =
        steps::load::run(&args.config, args.storage.as_deref(), args.firmware.resolve())?;

    // ── Step 2: Let the user adjust the choices ──────────────────────────────
    if args.interactive {
        ui::print_step(2, total, "Partitioning Choices");
        steps::choose::run(&mut config)?;
    }

    // ── Final step: Publish global storage ───────────────────────────────────
    ui::print_step(total, total, "Global Storage");
    let format = match args.format {
        Format::Json => StorageFormat::Json,
        Format::Yaml => StorageFormat::Yaml,
    };
    steps::publish::run(&config, &gs, args.output.as_deref(), format, args.dry_run)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn firmware_flag_accepts_aliases() {
        let args = Args::try_parse_from(["partition-config", "p.conf", "--firmware", "uefi"]).unwrap();
        assert_eq!(args.firmware, Firmware::Efi);
        assert_eq!(args.firmware.resolve(), FirmwareType::Efi);

        let args =
            Args::try_parse_from(["partition-config", "p.conf", "--firmware", "legacy"]).unwrap();
        assert_eq!(args.firmware.resolve(), FirmwareType::Bios);

        let args = Args::try_parse_from(["partition-config", "p.conf"]).unwrap();
        assert_eq!(args.firmware, Firmware::Auto);

        assert!(Args::try_parse_from(["partition-config", "p.conf", "--firmware", "coreboot"]).is_err());
    }
}
