//! Normal-user UID bounds from `login.defs`.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

/// Matches a `UID_MIN` or `UID_MAX` assignment at the start of a line.
static UID_BOUND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^UID_(MIN|MAX)\s+(\d+)").expect("static regex"));

/// Which UIDs count as "normal" (non-system) users.
///
/// Loading never fails fatally: a file that cannot be read or that lacks
/// either bound degrades to [`UidRange::Unknown`], under which every
/// account is treated as normal. Refusing to list any users is worse than
/// listing all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UidRange {
    /// Both bounds were found; `min <= max` always holds.
    Bounded { min: u32, max: u32 },
    /// The bounds could not be determined (fail-open).
    Unknown,
}

impl UidRange {
    /// Creates a bounded range, swapping the bounds if given in reverse.
    #[must_use]
    pub const fn bounded(a: u32, b: u32) -> Self {
        if a <= b {
            Self::Bounded { min: a, max: b }
        } else {
            Self::Bounded { min: b, max: a }
        }
    }

    /// Whether the UID belongs to a normal user. `Unknown` is fail-open.
    #[must_use]
    pub const fn contains(self, uid: u32) -> bool {
        match self {
            Self::Bounded { min, max } => min <= uid && uid <= max,
            Self::Unknown => true,
        }
    }

    /// Reads the range from a `login.defs`-style file.
    pub fn load(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "cannot read UID bounds; every account will be treated as a normal user"
                );
                return Self::Unknown;
            }
        };
        Self::from_login_defs(&content).unwrap_or_else(|| {
            tracing::warn!(
                path = %path.display(),
                "UID_MIN / UID_MAX not found; every account will be treated as a normal user"
            );
            Self::Unknown
        })
    }

    /// Extracts the first `UID_MIN` and `UID_MAX` values from file content.
    ///
    /// The two variables may appear in any order. Returns `None` unless
    /// both are present with a value that fits a `u32`.
    fn from_login_defs(content: &str) -> Option<Self> {
        let mut min = None;
        let mut max = None;
        for caps in UID_BOUND.captures_iter(content) {
            let Ok(value) = caps[2].parse::<u32>() else {
                continue;
            };
            let slot = if &caps[1] == "MIN" { &mut min } else { &mut max };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        Some(Self::bounded(min?, max?))
    }
}
