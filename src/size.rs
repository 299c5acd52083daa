use thiserror::Error;

// ── Partition size ────────────────────────────────────────────────────────────

/// A partition size as written in the module configuration,
/// e.g. `300MiB`, `1G`, `500MB`, `50%`. Bare numbers are MiB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionSize {
    Percent(u8),
    Bytes(u64),
}

const KIB: u64 = 1024;
const MIB: u64 = KIB * 1024;
const GIB: u64 = MIB * 1024;

const KB: u64 = 1000;
const MB: u64 = KB * 1000;
const GB: u64 = MB * 1000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid partition size '{0}'")]
pub struct ParseSizeError(String);

impl PartitionSize {
    pub fn parse(text: &str) -> Result<Self, ParseSizeError> {
        let err = || ParseSizeError(text.to_string());
        let s = text.trim();

        let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
        let (number, unit) = s.split_at(split);
        let value: u64 = number.parse().map_err(|_| err())?;

        let multiplier = match unit.trim().to_ascii_lowercase().as_str() {
            "%" => {
                return match u8::try_from(value) {
                    Ok(p) if (1..=100).contains(&p) => Ok(PartitionSize::Percent(p)),
                    _ => Err(err()),
                }
            }
            "b" => 1,
            "k" | "kib" => KIB,
            "" | "m" | "mib" => MIB,
            "g" | "gib" => GIB,
            "kb" => KB,
            "mb" => MB,
            "gb" => GB,
            _ => return Err(err()),
        };

        value
            .checked_mul(multiplier)
            .map(PartitionSize::Bytes)
            .ok_or_else(err)
    }

    /// Size in MiB, rounded down. `None` for relative sizes.
    pub fn to_mib(self) -> Option<u64> {
        match self {
            PartitionSize::Bytes(b) => Some(b / MIB),
            PartitionSize::Percent(_) => None,
        }
    }

    /// Short form for the summary box, e.g. `300 MiB` or `50%`.
    pub fn describe(self) -> String {
        match (self, self.to_mib()) {
            (PartitionSize::Percent(p), _) => format!("{}%", p),
            (_, Some(mib)) if mib > 0 => format!("{} MiB", mib),
            (PartitionSize::Bytes(b), _) => format!("{} B", b),
        }
    }
}
