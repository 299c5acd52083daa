use std::{fmt, path::Path};

/// Presence of this directory means the system booted through UEFI.
const EFIVARS: &str = "/sys/firmware/efi/efivars";

/// Boot firmware of the running system, published as `firmwareType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirmwareType {
    Efi,
    Bios,
}

impl FirmwareType {
    /// Detects whether the system booted in UEFI or BIOS/Legacy mode.
    pub fn detect() -> Self {
        Self::detect_at(Path::new(EFIVARS))
    }

    fn detect_at(efivars: &Path) -> Self {
        if efivars.exists() {
            FirmwareType::Efi
        } else {
            FirmwareType::Bios
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FirmwareType::Efi => "efi",
            FirmwareType::Bios => "bios",
        }
    }
}

impl fmt::Display for FirmwareType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detection_follows_efivars_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(FirmwareType::detect_at(dir.path()), FirmwareType::Efi);
        assert_eq!(
            FirmwareType::detect_at(&dir.path().join("missing")),
            FirmwareType::Bios
        );
    }

    #[test]
    fn displays_published_name() {
        assert_eq!(FirmwareType::Efi.to_string(), "efi");
        assert_eq!(FirmwareType::Bios.to_string(), "bios");
    }
}
