use std::{cell::RefCell, fs, rc::Rc};

use partition_config::{
    choices::{InstallChoice, SwapChoice},
    config::{Config, ConfigEvent, ConfigWarning},
    firmware::FirmwareType,
    settings,
    steps,
    storage::GlobalStorage,
};
use serde_json::json;

const SAMPLE: &str = include_str!("../data/partition.conf");

#[test]
fn sample_configuration_loads_cleanly() {
    let map = settings::from_yaml_str(SAMPLE).unwrap();
    let gs = Rc::new(GlobalStorage::new());
    let mut config = Config::new(FirmwareType::Efi).with_storage(Rc::clone(&gs));
    config.set_configuration_map(&map);
    config.fill_gs_secondary_configuration();

    assert!(config.warnings().is_empty(), "{:?}", config.warnings());
    assert_eq!(config.install_choice(), InstallChoice::Erase);
    assert_eq!(config.swap_choice(), SwapChoice::SmallSwap);
    assert_eq!(config.swap_choices().len(), 4);
    assert_eq!(config.erase_fs_type_choice(), "ext4");
    assert_eq!(config.erase_fs_types(), ["ext4", "btrfs", "xfs"]);

    assert_eq!(
        gs.get("partitionChoices"),
        Some(json!({ "install": "erase", "swap": "small" }))
    );
    assert_eq!(gs.get("firmwareType"), Some(json!("efi")));
    assert_eq!(gs.get("efiSystemPartition"), Some(json!("/boot/efi")));
    assert_eq!(gs.get("efiSystemPartitionSize"), Some(json!("300MiB")));
    assert_eq!(gs.get("efiSystemPartitionName"), Some(json!("EFI")));
    assert_eq!(gs.get("requiredPartitionTableType"), Some(json!(["gpt"])));
    assert_eq!(gs.get("requiredStorageGiB"), Some(json!(9.5)));
}

#[test]
fn legacy_configuration_is_translated() {
    let map = settings::from_yaml_str(
        "\
ensureSuspendToDisk: false
neverCreateSwap: false
initialPartitioningChoice: replace
",
    )
    .unwrap();

    let events = Rc::new(RefCell::new(vec![]));
    let sink = Rc::clone(&events);
    let mut config = Config::new(FirmwareType::Bios);
    config.subscribe(move |e| sink.borrow_mut().push(e.clone()));
    config.set_configuration_map(&map);

    assert_eq!(config.swap_choices().iter().copied().collect::<Vec<_>>(), [SwapChoice::SmallSwap]);
    assert_eq!(config.swap_choice(), SwapChoice::SmallSwap);
    assert_eq!(
        *events.borrow(),
        vec![
            ConfigEvent::InstallChoiceChanged(InstallChoice::Replace),
            ConfigEvent::SwapChoiceChanged(SwapChoice::SmallSwap),
        ]
    );
    assert!(config
        .warnings()
        .contains(&ConfigWarning::DeprecatedSetting("ensureSuspendToDisk")));
    assert!(config
        .warnings()
        .contains(&ConfigWarning::DeprecatedSetting("neverCreateSwap")));
}

#[test]
fn storage_written_by_publish_step_can_be_read_back() {
    let dir = tempfile::tempdir().unwrap();
    let conf = dir.path().join("partition.conf");
    fs::write(&conf, SAMPLE).unwrap();
    let out = dir.path().join("gs.yaml");

    let (config, gs) = steps::load::run(&conf, None, FirmwareType::Efi).unwrap();
    steps::publish::run(
        &config,
        &gs,
        Some(&out),
        partition_config::storage::StorageFormat::Json,
        false,
    )
    .unwrap();

    let reread = GlobalStorage::new();
    reread.load(&out).unwrap();
    assert_eq!(reread.get("partitionChoices"), gs.get("partitionChoices"));
    assert_eq!(reread.len(), gs.len());
}

#[test]
fn dry_run_leaves_output_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let conf = dir.path().join("partition.conf");
    fs::write(&conf, "neverCreateSwap: true\n").unwrap();
    let out = dir.path().join("gs.json");

    let (config, gs) = steps::load::run(&conf, None, FirmwareType::Bios).unwrap();
    steps::publish::run(
        &config,
        &gs,
        Some(&out),
        partition_config::storage::StorageFormat::Json,
        true,
    )
    .unwrap();
    assert!(!out.exists());
}
