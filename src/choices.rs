use std::collections::BTreeSet;

// ── Install choice ────────────────────────────────────────────────────────────

/// Top-level partitioning strategy offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum InstallChoice {
    #[default]
    NoChoice,
    Alongside,
    Erase,
    Replace,
    Manual,
}

/// Name table for [`InstallChoice`]. The first entry for a value is its
/// canonical name; the first entry overall is the fallback.
const INSTALL_CHOICE_NAMES: &[(&str, InstallChoice)] = &[
    ("none", InstallChoice::NoChoice),
    ("nochoice", InstallChoice::NoChoice),
    ("alongside", InstallChoice::Alongside),
    ("erase", InstallChoice::Erase),
    ("replace", InstallChoice::Replace),
    ("manual", InstallChoice::Manual),
];

impl InstallChoice {
    pub const ALL: [InstallChoice; 5] = [
        InstallChoice::NoChoice,
        InstallChoice::Alongside,
        InstallChoice::Erase,
        InstallChoice::Replace,
        InstallChoice::Manual,
    ];

    /// Looks up a configuration name, ignoring case.
    pub fn find(name: &str) -> Option<Self> {
        lookup(INSTALL_CHOICE_NAMES, name)
    }

    /// Like [`find`](Self::find), but unknown names map to `NoChoice`.
    pub fn find_or_default(name: &str) -> Self {
        Self::find(name).unwrap_or(INSTALL_CHOICE_NAMES[0].1)
    }

    /// Canonical configuration name, as published to global storage.
    pub fn name(self) -> &'static str {
        reverse_lookup(INSTALL_CHOICE_NAMES, self)
    }

    pub fn from_index(index: i64) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    /// Human-readable label shown in interactive mode.
    pub fn display_name(self) -> &'static str {
        match self {
            InstallChoice::NoChoice => "No choice yet",
            InstallChoice::Alongside => "Install alongside existing systems",
            InstallChoice::Erase => "Erase disk",
            InstallChoice::Replace => "Replace a partition",
            InstallChoice::Manual => "Manual partitioning",
        }
    }
}

// ── Swap choice ───────────────────────────────────────────────────────────────

/// How swap space is provisioned for the new system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum SwapChoice {
    #[default]
    NoSwap,
    SmallSwap,
    /// Large enough for suspend-to-disk.
    FullSwap,
    ReuseSwap,
    SwapFile,
}

const SWAP_CHOICE_NAMES: &[(&str, SwapChoice)] = &[
    ("none", SwapChoice::NoSwap),
    ("small", SwapChoice::SmallSwap),
    ("suspend", SwapChoice::FullSwap),
    ("reuse", SwapChoice::ReuseSwap),
    ("file", SwapChoice::SwapFile),
];

impl SwapChoice {
    pub const ALL: [SwapChoice; 5] = [
        SwapChoice::NoSwap,
        SwapChoice::SmallSwap,
        SwapChoice::FullSwap,
        SwapChoice::ReuseSwap,
        SwapChoice::SwapFile,
    ];

    pub fn find(name: &str) -> Option<Self> {
        lookup(SWAP_CHOICE_NAMES, name)
    }

    pub fn find_or_default(name: &str) -> Self {
        Self::find(name).unwrap_or(SWAP_CHOICE_NAMES[0].1)
    }

    pub fn name(self) -> &'static str {
        reverse_lookup(SWAP_CHOICE_NAMES, self)
    }

    pub fn from_index(index: i64) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn display_name(self) -> &'static str {
        match self {
            SwapChoice::NoSwap => "No swap",
            SwapChoice::SmallSwap => "Swap (no hibernate)",
            SwapChoice::FullSwap => "Swap (with hibernate)",
            SwapChoice::ReuseSwap => "Reuse existing swap",
            SwapChoice::SwapFile => "Swap to file",
        }
    }
}

/// Available swap choices, iterated in declaration order.
pub type SwapChoiceSet = BTreeSet<SwapChoice>;

/// Picks a single swap choice out of a set of allowed ones.
///
/// `NoSwap` wins whenever it is allowed and there is more than one option;
/// an empty set also yields `NoSwap`.
pub fn pick_one(choices: &SwapChoiceSet) -> SwapChoice {
    match choices.len() {
        0 => SwapChoice::NoSwap,
        _ if choices.contains(&SwapChoice::NoSwap) => SwapChoice::NoSwap,
        _ => choices.iter().next().copied().unwrap_or_default(),
    }
}

// ── Table helpers ─────────────────────────────────────────────────────────────

fn lookup<T: Copy>(table: &[(&str, T)], name: &str) -> Option<T> {
    let name = name.trim();
    table
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, v)| v)
}

fn reverse_lookup<T: Copy + PartialEq>(table: &[(&'static str, T)], value: T) -> &'static str {
    table
        .iter()
        .find(|(_, v)| *v == value)
        .map(|&(n, _)| n)
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_names_are_case_insensitive_with_aliases() {
        assert_eq!(InstallChoice::find("Erase"), Some(InstallChoice::Erase));
        assert_eq!(InstallChoice::find("nochoice"), Some(InstallChoice::NoChoice));
        assert_eq!(InstallChoice::find("NONE"), Some(InstallChoice::NoChoice));
        assert_eq!(InstallChoice::find("wipe"), None);
    }

    #[test]
    fn unknown_names_fall_back_to_first_entry() {
        assert_eq!(InstallChoice::find_or_default(""), InstallChoice::NoChoice);
        assert_eq!(InstallChoice::find_or_default("bogus"), InstallChoice::NoChoice);
        assert_eq!(SwapChoice::find_or_default("hibernate"), SwapChoice::NoSwap);
    }

    #[test]
    fn canonical_names_use_first_table_entry() {
        assert_eq!(InstallChoice::NoChoice.name(), "none");
        assert_eq!(InstallChoice::Manual.name(), "manual");
        assert_eq!(SwapChoice::FullSwap.name(), "suspend");
        assert_eq!(SwapChoice::SwapFile.name(), "file");
    }

    #[test]
    fn index_mapping_rejects_out_of_range() {
        assert_eq!(InstallChoice::from_index(4), Some(InstallChoice::Manual));
        assert_eq!(InstallChoice::from_index(5), None);
        assert_eq!(InstallChoice::from_index(-1), None);
        assert_eq!(SwapChoice::from_index(2), Some(SwapChoice::FullSwap));
        assert_eq!(SwapChoice::from_index(7), None);
    }

    #[test]
    fn pick_one_prefers_no_swap() {
        let empty = SwapChoiceSet::new();
        assert_eq!(pick_one(&empty), SwapChoice::NoSwap);

        let single: SwapChoiceSet = [SwapChoice::SwapFile].into_iter().collect();
        assert_eq!(pick_one(&single), SwapChoice::SwapFile);

        let with_none: SwapChoiceSet = [SwapChoice::SwapFile, SwapChoice::NoSwap, SwapChoice::FullSwap]
            .into_iter()
            .collect();
        assert_eq!(pick_one(&with_none), SwapChoice::NoSwap);

        let without_none: SwapChoiceSet = [SwapChoice::SwapFile, SwapChoice::FullSwap]
            .into_iter()
            .collect();
        assert_eq!(pick_one(&without_none), SwapChoice::FullSwap);
    }
}
