use serde::{Deserialize, Serialize};

/// A board coordinate. `file` and `rank` are zero-based (a1 = (0, 0)).
///
/// Serialized in algebraic form (`"e4"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Returns `None` unless both coordinates are in `0..8`.
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Self { file, rank })
        } else {
            None
        }
    }

    pub fn file(self) -> u8 {
        self.file
    }

    pub fn rank(self) -> u8 {
        self.rank
    }

    /// Index into a 64-entry board, a1 = 0, h8 = 63.
    pub fn index(self) -> usize {
        self.rank as usize * 8 + self.file as usize
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        if idx < 64 {
            Some(Self {
                file: (idx % 8) as u8,
                rank: (idx / 8) as u8,
            })
        } else {
            None
        }
    }

    /// Same rank, different file.
    pub fn with_file(self, file: u8) -> Option<Self> {
        Self::new(file, self.rank)
    }

    pub fn parse(s: &str) -> Result<Self, SquareParseError> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(SquareParseError {
                input: s.to_string(),
            });
        }
        let file = bytes[0].to_ascii_lowercase().wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        Self::new(file, rank).ok_or_else(|| SquareParseError {
            input: s.to_string(),
        })
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, self.rank + 1)
    }
}

impl std::str::FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Square::parse(s)
    }
}

impl TryFrom<String> for Square {
    type Error = SquareParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Square::parse(&s)
    }
}

impl From<Square> for String {
    fn from(sq: Square) -> Self {
        sq.to_string()
    }
}

/// Returned when a string is not an algebraic square name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquareParseError {
    pub input: String,
}

impl std::fmt::Display for SquareParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid square '{}': expected a file a-h and a rank 1-8", self.input)
    }
}

impl std::error::Error for SquareParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_corners() {
        assert_eq!(Square::parse("a1").unwrap().index(), 0);
        assert_eq!(Square::parse("h8").unwrap().index(), 63);
        assert_eq!(Square::parse("E4").unwrap().to_string(), "e4");
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in ["", "e", "e9", "i1", "e44", "4e"] {
            assert!(Square::parse(bad).is_err(), "{bad} must not parse");
        }
    }

    #[test]
    fn index_round_trips() {
        let sq = Square::new(3, 6).unwrap();
        assert_eq!(Square::from_index(sq.index()), Some(sq));
        assert_eq!(Square::from_index(64), None);
    }
}
