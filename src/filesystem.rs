use tracing::warn;

/// Known filesystem names. The first column is the canonical spelling,
/// the rest are accepted aliases.
const FILESYSTEMS: &[(&str, &[&str])] = &[
    ("ext2", &[]),
    ("ext3", &[]),
    ("ext4", &[]),
    ("btrfs", &[]),
    ("xfs", &[]),
    ("jfs", &[]),
    ("reiserfs", &[]),
    ("reiser4", &[]),
    ("f2fs", &[]),
    ("fat12", &[]),
    ("fat16", &[]),
    ("fat32", &["vfat", "fat"]),
    ("exfat", &[]),
    ("ntfs", &[]),
    ("hfsplus", &["hfs+"]),
    ("zfs", &[]),
    ("linuxswap", &["swap", "linux-swap"]),
];

/// Filesystem created when nothing else is configured.
pub const DEFAULT_FILESYSTEM: &str = "ext4";

/// Maps a user-supplied filesystem name onto its canonical spelling.
///
/// Empty names mean the default filesystem. Unknown names are kept as given.
pub fn canonical_filesystem_name(name: &str) -> String {
    lookup(name).unwrap_or_else(|| {
        warn!(filesystem = name.trim(), "filesystem type is not known");
        name.trim().to_string()
    })
}

/// Canonical spelling of `name`, or `None` when it is not a known
/// filesystem. Does not log.
pub fn lookup(name: &str) -> Option<String> {
    let name = name.trim();
    if name.is_empty() {
        return Some(DEFAULT_FILESYSTEM.to_string());
    }
    find(name).map(str::to_string)
}

fn find(name: &str) -> Option<&'static str> {
    FILESYSTEMS
        .iter()
        .find(|(canonical, aliases)| {
            canonical.eq_ignore_ascii_case(name)
                || aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
        })
        .map(|&(canonical, _)| canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalises_case_and_aliases() {
        assert_eq!(canonical_filesystem_name("EXT4"), "ext4");
        assert_eq!(canonical_filesystem_name(" Btrfs "), "btrfs");
        assert_eq!(canonical_filesystem_name("vfat"), "fat32");
        assert_eq!(canonical_filesystem_name("swap"), "linuxswap");
    }

    #[test]
    fn empty_means_default_and_unknown_is_kept() {
        assert_eq!(canonical_filesystem_name(""), "ext4");
        assert_eq!(canonical_filesystem_name("bcachefs"), "bcachefs");
        assert_eq!(lookup("bcachefs"), None);
        assert_eq!(lookup("XFS").as_deref(), Some("xfs"));
        assert_eq!(lookup("").as_deref(), Some("ext4"));
    }
}
