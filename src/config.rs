//! Partition-step configuration.
//!
//! [`Config`] turns the module's loosely-typed settings into install and swap
//! choices, keeps track of what the user picked since, and republishes the
//! values later stages need into [`GlobalStorage`].

use std::rc::Rc;

use serde_json::json;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::{
    choices::{pick_one, InstallChoice, SwapChoice, SwapChoiceSet},
    filesystem,
    firmware::FirmwareType,
    settings::{self, SettingsMap},
    size::PartitionSize,
    storage::GlobalStorage,
};

/// Default mount point of the EFI system partition.
pub const DEFAULT_EFI_MOUNT_POINT: &str = "/boot/efi";

/// Partition-table types the partitioning engine can create.
const KNOWN_TABLE_TYPES: &[&str] = &["msdos", "gpt"];

// ── Events & warnings ─────────────────────────────────────────────────────────

/// Change notification delivered to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigEvent {
    InstallChoiceChanged(InstallChoice),
    SwapChoiceChanged(SwapChoice),
    EraseFilesystemChanged(String),
}

/// A problem with the configuration that does not stop it from loading.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigWarning {
    /// `userSwapChoices` used together with the legacy swap keys.
    #[error("Partition-module configuration mixes old- and new-style swap settings.")]
    MixedSwapSettings,

    #[error("Partition-module setting *{0}* is deprecated.")]
    DeprecatedSetting(&'static str),

    #[error("Partition-module configuration for *userSwapChoices* is empty: {0:?}")]
    EmptySwapChoices(Vec<String>),

    #[error("Partition-module does not support *userSwapChoices* setting {}", .0.name())]
    UnsupportedSwapChoice(SwapChoice),

    #[error("Configuration for *initialSwapChoice* ({}) is not one of the *userSwapChoices*", .0.name())]
    InitialSwapNotAvailable(SwapChoice),

    #[error("Invalid install choice (int) {0}")]
    InvalidInstallChoice(i64),

    #[error("Invalid swap choice (int) {0}")]
    InvalidSwapChoice(i64),

    #[error("Filesystem type '{0}' in *availableFileSystemTypes* is not known")]
    UnknownFilesystem(String),

    #[error("Partition table type '{0}' in *requiredPartitionTableType* is not known")]
    UnknownPartitionTableType(String),

    #[error("Setting *efiSystemPartitionSize* '{0}' is not a valid size")]
    InvalidEfiPartitionSize(String),
}

impl ConfigWarning {
    /// Warnings that indicate a broken configuration rather than a stale one.
    pub fn is_error(&self) -> bool {
        matches!(self, ConfigWarning::MixedSwapSettings)
    }
}

fn report(warnings: &mut Vec<ConfigWarning>, warning: ConfigWarning) {
    if warning.is_error() {
        error!("{}", warning);
    } else {
        warn!("{}", warning);
    }
    warnings.push(warning);
}

// ── Config ────────────────────────────────────────────────────────────────────

type Observer = Box<dyn FnMut(&ConfigEvent)>;

/// Partitioning choices and the settings that constrain them.
pub struct Config {
    install_choice: InstallChoice,
    swap_choice: SwapChoice,
    initial_install_choice: InstallChoice,
    initial_swap_choice: SwapChoice,
    swap_choices: SwapChoiceSet,
    allow_manual_partitioning: bool,
    erase_fs_types: Vec<String>,
    erase_fs_type_choice: String,
    /// Negative when the configuration does not set it.
    required_storage_gib: f64,
    required_partition_table_type: Vec<String>,
    efi_partition_size: Option<PartitionSize>,
    firmware: FirmwareType,
    storage: Option<Rc<GlobalStorage>>,
    observers: Vec<Observer>,
    warnings: Vec<ConfigWarning>,
}

impl Config {
    pub fn new(firmware: FirmwareType) -> Self {
        Config {
            install_choice: InstallChoice::NoChoice,
            swap_choice: SwapChoice::NoSwap,
            initial_install_choice: InstallChoice::NoChoice,
            initial_swap_choice: SwapChoice::NoSwap,
            swap_choices: SwapChoiceSet::new(),
            allow_manual_partitioning: true,
            erase_fs_types: vec![],
            erase_fs_type_choice: String::new(),
            required_storage_gib: -1.0,
            required_partition_table_type: vec![],
            efi_partition_size: None,
            firmware,
            storage: None,
            observers: vec![],
            warnings: vec![],
        }
    }

    /// Attaches the store that choices and settings are published into.
    pub fn with_storage(mut self, storage: Rc<GlobalStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Registers a callback invoked on every choice change.
    pub fn subscribe(&mut self, observer: impl FnMut(&ConfigEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    // ── Loading ───────────────────────────────────────────────────────────────

    /// Applies the module configuration. Problems are collected as
    /// [`warnings`](Self::warnings); loading itself never fails.
    pub fn set_configuration_map(&mut self, map: &SettingsMap) {
        // Overlaps with the welcome stage's storage check.
        self.required_storage_gib = settings::get_double(map, "requiredStorage", -1.0);
        self.swap_choices = swap_choices_from(map, &mut self.warnings);

        self.initial_install_choice =
            InstallChoice::find_or_default(&settings::get_string(map, "initialPartitioningChoice", ""));
        self.set_install_choice(self.initial_install_choice);

        self.initial_swap_choice =
            SwapChoice::find_or_default(&settings::get_string(map, "initialSwapChoice", ""));
        if !self.swap_choices.contains(&self.initial_swap_choice) {
            report(
                &mut self.warnings,
                ConfigWarning::InitialSwapNotAvailable(self.initial_swap_choice),
            );
            self.initial_swap_choice = pick_one(&self.swap_choices);
        }
        self.set_swap_choice(self.initial_swap_choice);

        self.allow_manual_partitioning = settings::get_bool(map, "allowManualPartitioning", true);

        if map.contains_key("availableFileSystemTypes") {
            self.erase_fs_types = settings::get_string_list(map, "availableFileSystemTypes")
                .iter()
                .map(|fs| {
                    filesystem::lookup(fs).unwrap_or_else(|| {
                        report(&mut self.warnings, ConfigWarning::UnknownFilesystem(fs.clone()));
                        fs.trim().to_string()
                    })
                })
                .collect();

            if let Some(first) = self.erase_fs_types.first().cloned() {
                self.erase_fs_type_choice = first.clone();
                self.emit(ConfigEvent::EraseFilesystemChanged(first));
            }
        }

        self.required_partition_table_type =
            settings::get_string_list(map, "requiredPartitionTableType");
        for table in &self.required_partition_table_type {
            if !KNOWN_TABLE_TYPES.contains(&table.to_ascii_lowercase().as_str()) {
                report(
                    &mut self.warnings,
                    ConfigWarning::UnknownPartitionTableType(table.clone()),
                );
            }
        }
        if let Some(gs) = &self.storage {
            gs.insert(
                "requiredPartitionTableType",
                self.required_partition_table_type.clone(),
            );
        }

        self.fill_efi_configuration(map);
    }

    /// Publishes the firmware type and EFI system partition settings,
    /// used e.g. by the bootloader stage.
    fn fill_efi_configuration(&mut self, map: &SettingsMap) {
        if let Some(size) = map
            .contains_key("efiSystemPartitionSize")
            .then(|| settings::get_string(map, "efiSystemPartitionSize", ""))
        {
            match PartitionSize::parse(&size) {
                Ok(parsed) => self.efi_partition_size = Some(parsed),
                Err(_) => report(&mut self.warnings, ConfigWarning::InvalidEfiPartitionSize(size)),
            }
        }

        let Some(gs) = &self.storage else { return };

        gs.insert("firmwareType", self.firmware.as_str());
        gs.insert(
            "efiSystemPartition",
            settings::get_string(map, "efiSystemPartition", DEFAULT_EFI_MOUNT_POINT),
        );
        for key in ["efiSystemPartitionSize", "efiSystemPartitionName"] {
            if map.contains_key(key) {
                gs.insert(key, settings::get_string(map, key, ""));
            }
        }
    }

    /// Publishes the required storage size, unless an earlier stage
    /// already did.
    pub fn fill_gs_secondary_configuration(&self) {
        let Some(gs) = &self.storage else { return };
        if self.required_storage_gib >= 0.0 && !gs.contains("requiredStorageGiB") {
            gs.insert("requiredStorageGiB", self.required_storage_gib);
        }
    }

    // ── Setters ───────────────────────────────────────────────────────────────

    pub fn set_install_choice(&mut self, choice: InstallChoice) {
        if choice != self.install_choice {
            self.install_choice = choice;
            self.emit(ConfigEvent::InstallChoiceChanged(choice));
            self.publish_choices();
        }
    }

    /// Integer form used by front-ends; out-of-range values become `NoChoice`.
    pub fn set_install_choice_index(&mut self, index: i64) {
        let choice = InstallChoice::from_index(index).unwrap_or_else(|| {
            report(&mut self.warnings, ConfigWarning::InvalidInstallChoice(index));
            InstallChoice::NoChoice
        });
        self.set_install_choice(choice);
    }

    pub fn set_swap_choice(&mut self, choice: SwapChoice) {
        if choice != self.swap_choice {
            self.swap_choice = choice;
            self.emit(ConfigEvent::SwapChoiceChanged(choice));
            self.publish_choices();
        }
    }

    /// Integer form used by front-ends; out-of-range values become `NoSwap`.
    pub fn set_swap_choice_index(&mut self, index: i64) {
        let choice = SwapChoice::from_index(index).unwrap_or_else(|| {
            report(&mut self.warnings, ConfigWarning::InvalidSwapChoice(index));
            SwapChoice::NoSwap
        });
        self.set_swap_choice(choice);
    }

    pub fn set_erase_fs_type_choice(&mut self, name: &str) {
        let canonical = filesystem::canonical_filesystem_name(name);
        if canonical != self.erase_fs_type_choice {
            self.erase_fs_type_choice = canonical.clone();
            self.emit(ConfigEvent::EraseFilesystemChanged(canonical));
        }
    }

    fn publish_choices(&self) {
        if let Some(gs) = &self.storage {
            debug!(
                install = self.install_choice.name(),
                swap = self.swap_choice.name(),
                "publishing partition choices"
            );
            gs.insert(
                "partitionChoices",
                json!({
                    "install": self.install_choice.name(),
                    "swap": self.swap_choice.name(),
                }),
            );
        }
    }

    fn emit(&mut self, event: ConfigEvent) {
        for observer in &mut self.observers {
            observer(&event);
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn install_choice(&self) -> InstallChoice {
        self.install_choice
    }

    pub fn swap_choice(&self) -> SwapChoice {
        self.swap_choice
    }

    pub fn initial_install_choice(&self) -> InstallChoice {
        self.initial_install_choice
    }

    pub fn initial_swap_choice(&self) -> SwapChoice {
        self.initial_swap_choice
    }

    pub fn swap_choices(&self) -> &SwapChoiceSet {
        &self.swap_choices
    }

    pub fn allow_manual_partitioning(&self) -> bool {
        self.allow_manual_partitioning
    }

    /// Install choices a front-end should offer.
    pub fn available_install_choices(&self) -> Vec<InstallChoice> {
        InstallChoice::ALL
            .into_iter()
            .filter(|c| *c != InstallChoice::NoChoice)
            .filter(|c| *c != InstallChoice::Manual || self.allow_manual_partitioning)
            .collect()
    }

    pub fn erase_fs_types(&self) -> &[String] {
        &self.erase_fs_types
    }

    pub fn erase_fs_type_choice(&self) -> &str {
        &self.erase_fs_type_choice
    }

    /// `None` when the configuration does not require a minimum size.
    pub fn required_storage_gib(&self) -> Option<f64> {
        (self.required_storage_gib >= 0.0).then_some(self.required_storage_gib)
    }

    pub fn required_partition_table_type(&self) -> &[String] {
        &self.required_partition_table_type
    }

    /// Parsed `efiSystemPartitionSize`, if set and valid.
    pub fn efi_partition_size(&self) -> Option<PartitionSize> {
        self.efi_partition_size
    }

    pub fn firmware(&self) -> FirmwareType {
        self.firmware
    }

    pub fn warnings(&self) -> &[ConfigWarning] {
        &self.warnings
    }
}

// ── Swap resolution ───────────────────────────────────────────────────────────

/// Works out the available swap choices from either the new-style
/// `userSwapChoices` list or the legacy `ensureSuspendToDisk` /
/// `neverCreateSwap` flags.
fn swap_choices_from(map: &SettingsMap, warnings: &mut Vec<ConfigWarning>) -> SwapChoiceSet {
    let has_new_style = map.contains_key("userSwapChoices");
    let has_suspend = map.contains_key("ensureSuspendToDisk");
    let has_never = map.contains_key("neverCreateSwap");

    if has_new_style && (has_suspend || has_never) {
        report(warnings, ConfigWarning::MixedSwapSettings);
    }
    if has_suspend {
        report(warnings, ConfigWarning::DeprecatedSetting("ensureSuspendToDisk"));
    }
    if has_never {
        report(warnings, ConfigWarning::DeprecatedSetting("neverCreateSwap"));
    }

    let mut choices = SwapChoiceSet::new();
    if has_new_style {
        let listed = settings::get_string_list(map, "userSwapChoices");
        choices.extend(listed.iter().filter_map(|name| SwapChoice::find(name)));

        if choices.is_empty() {
            report(warnings, ConfigWarning::EmptySwapChoices(listed));
            choices.insert(SwapChoice::FullSwap);
        }
    } else if settings::get_bool(map, "neverCreateSwap", false) {
        choices.insert(SwapChoice::NoSwap);
    } else if settings::get_bool(map, "ensureSuspendToDisk", true) {
        choices.insert(SwapChoice::FullSwap);
    } else {
        choices.insert(SwapChoice::SmallSwap);
    }

    if choices.remove(&SwapChoice::ReuseSwap) {
        report(warnings, ConfigWarning::UnsupportedSwapChoice(SwapChoice::ReuseSwap));
    }

    choices
}
