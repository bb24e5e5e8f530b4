//! Electron configuration parsing
//!
//! A configuration is a space-separated list of subshell tokens such as
//! `1s2 2s2 2p6 3s2 3p6 4s2 3d10`. Each token is `<shell><subshell><count>`.

use std::fmt;
use std::str::FromStr;

/// Highest principal shell present in any known element
pub const MAX_SHELLS: usize = 7;

/// Angular momentum label of a subshell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subshell {
    S,
    P,
    D,
    F,
}

impl Subshell {
    fn from_char(c: char) -> Option<Self> {
        match c {
            's' => Some(Self::S),
            'p' => Some(Self::P),
            'd' => Some(Self::D),
            'f' => Some(Self::F),
            _ => None,
        }
    }

    /// Maximum number of electrons the subshell can hold
    pub fn capacity(self) -> u32 {
        match self {
            Self::S => 2,
            Self::P => 6,
            Self::D => 10,
            Self::F => 14,
        }
    }

    pub fn label(self) -> char {
        match self {
            Self::S => 's',
            Self::P => 'p',
            Self::D => 'd',
            Self::F => 'f',
        }
    }
}

/// A configuration token that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedToken {
    pub token: String,
    pub reason: &'static str,
}

impl MalformedToken {
    fn new(token: &str, reason: &'static str) -> Self {
        Self {
            token: token.to_string(),
            reason,
        }
    }
}

impl fmt::Display for MalformedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed configuration token '{}': {}", self.token, self.reason)
    }
}

impl std::error::Error for MalformedToken {}

/// Electrons occupying one subshell, e.g. `3d10`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupancy {
    /// Principal quantum number (1-based)
    pub shell: u8,
    pub subshell: Subshell,
    pub electrons: u32,
}

impl Occupancy {
    /// Zero-based shell index used for ring layout
    ///
    /// `None` for a shell outside `1..=MAX_SHELLS`, which parsing never yields
    /// but a hand-built value can hold.
    pub fn shell_index(&self) -> Option<usize> {
        (self.shell as usize)
            .checked_sub(1)
            .filter(|&index| index < MAX_SHELLS)
    }
}

impl FromStr for Occupancy {
    type Err = MalformedToken;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let letter_at = token
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| MalformedToken::new(token, "missing subshell letter"))?;

        let (shell_digits, rest) = token.split_at(letter_at);
        if shell_digits.is_empty() {
            return Err(MalformedToken::new(token, "missing shell number"));
        }
        let shell: u8 = shell_digits
            .parse()
            .map_err(|_| MalformedToken::new(token, "shell number out of range"))?;
        if shell == 0 || shell as usize > MAX_SHELLS {
            return Err(MalformedToken::new(token, "shell number out of range"));
        }

        let mut chars = rest.chars();
        let subshell = chars
            .next()
            .and_then(Subshell::from_char)
            .ok_or_else(|| MalformedToken::new(token, "unknown subshell letter"))?;

        // The whole numeric suffix is the count: "3d10" holds ten electrons.
        let count_digits = chars.as_str();
        if count_digits.is_empty() || !count_digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(MalformedToken::new(token, "missing or non-numeric electron count"));
        }
        let electrons: u32 = count_digits
            .parse()
            .map_err(|_| MalformedToken::new(token, "electron count out of range"))?;
        if electrons > subshell.capacity() {
            return Err(MalformedToken::new(token, "electron count exceeds subshell capacity"));
        }

        Ok(Self {
            shell,
            subshell,
            electrons,
        })
    }
}

impl fmt::Display for Occupancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.shell, self.subshell.label(), self.electrons)
    }
}

/// Parsed electron configuration, in dataset order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ElectronConfiguration {
    occupancies: Vec<Occupancy>,
}

impl ElectronConfiguration {
    pub fn occupancies(&self) -> &[Occupancy] {
        &self.occupancies
    }

    /// Total number of electrons across all subshells
    pub fn electron_count(&self) -> u32 {
        self.occupancies.iter().map(|o| o.electrons).sum()
    }

    /// Electron count per principal shell, indexed from zero
    pub fn shell_distribution(&self) -> [u32; MAX_SHELLS] {
        let mut shells = [0; MAX_SHELLS];
        for occupancy in &self.occupancies {
            if let Some(index) = occupancy.shell_index() {
                shells[index] += occupancy.electrons;
            }
        }
        shells
    }
}

impl FromStr for ElectronConfiguration {
    type Err = MalformedToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let occupancies = s
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<Occupancy>, _>>()?;
        Ok(Self { occupancies })
    }
}

impl fmt::Display for ElectronConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, occupancy) in self.occupancies.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{occupancy}")?;
        }
        Ok(())
    }
}
