use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Categorical columns the ratio and ranking views can group by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryColumn {
    Speaker,
    Subject,
    Context,
}

impl CategoryColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryColumn::Speaker => "speaker",
            CategoryColumn::Subject => "subject",
            CategoryColumn::Context => "context",
        }
    }
}

impl fmt::Display for CategoryColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for CategoryColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "speaker" => Ok(CategoryColumn::Speaker),
            "subject" | "topic" => Ok(CategoryColumn::Subject),
            "context" | "venue" => Ok(CategoryColumn::Context),
            other => Err(format!(
                "unknown column '{}', expected speaker, subject or context",
                other
            )),
        }
    }
}

/// Binary disinformation indicator derived from the truthfulness label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisinfoFlag {
    Disinformation,
    Truth,
}

impl DisinfoFlag {
    pub fn from_label(label: u8, false_range: &RangeInclusive<u8>) -> Self {
        if false_range.contains(&label) {
            DisinfoFlag::Disinformation
        } else {
            DisinfoFlag::Truth
        }
    }

    pub fn as_code(&self) -> u8 {
        match self {
            DisinfoFlag::Disinformation => 1,
            DisinfoFlag::Truth => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DisinfoFlag::Disinformation => "disinformation",
            DisinfoFlag::Truth => "truth",
        }
    }
}

impl fmt::Display for DisinfoFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_from_label() {
        let range = 0..=2;
        assert_eq!(DisinfoFlag::from_label(0, &range), DisinfoFlag::Disinformation);
        assert_eq!(DisinfoFlag::from_label(2, &range), DisinfoFlag::Disinformation);
        assert_eq!(DisinfoFlag::from_label(3, &range), DisinfoFlag::Truth);
        assert_eq!(DisinfoFlag::from_label(5, &range).as_code(), 0);
    }

    #[test]
    fn test_column_parsing() {
        assert_eq!("Speaker".parse::<CategoryColumn>(), Ok(CategoryColumn::Speaker));
        assert_eq!("topic".parse::<CategoryColumn>(), Ok(CategoryColumn::Subject));
        assert!("label".parse::<CategoryColumn>().is_err());
    }
}
