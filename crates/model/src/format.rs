//! Paper sizes and page layouts.
//!
//! The serialized tokens appear in filename suffixes of built artifacts,
//! so they are part of the on-disk contract.

use serde::{Deserialize, Serialize};

/// Output paper size for a rendered storybook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaperSize {
    #[serde(rename = "LETTER")]
    Letter,
    #[serde(rename = "A4")]
    A4,
    #[serde(rename = "B5")]
    B5,
    #[serde(rename = "A5")]
    A5,
}

impl PaperSize {
    /// The filename-suffix token.
    pub fn code(&self) -> &'static str {
        match self {
            PaperSize::Letter => "LETTER",
            PaperSize::A4 => "A4",
            PaperSize::B5 => "B5",
            PaperSize::A5 => "A5",
        }
    }

    /// All paper sizes, in build order.
    pub fn all() -> [PaperSize; 4] {
        [PaperSize::Letter, PaperSize::A4, PaperSize::B5, PaperSize::A5]
    }
}

impl Default for PaperSize {
    fn default() -> Self {
        PaperSize::Letter
    }
}

impl std::fmt::Display for PaperSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Page layout for a rendered storybook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layout {
    /// One lead per page, single-sided (for reading on screen).
    #[serde(rename = "SOLOSCR")]
    SoloScreen,
    /// One lead per page, double-sided (for printing).
    #[serde(rename = "SOLOPRN")]
    SoloPrint,
    /// One column per page, double-sided.
    #[serde(rename = "ONECOL")]
    OneColumn,
    /// Two columns per page, double-sided.
    #[serde(rename = "TWOCOL")]
    TwoColumn,
}

impl Layout {
    /// The filename-suffix token.
    pub fn code(&self) -> &'static str {
        match self {
            Layout::SoloScreen => "SOLOSCR",
            Layout::SoloPrint => "SOLOPRN",
            Layout::OneColumn => "ONECOL",
            Layout::TwoColumn => "TWOCOL",
        }
    }

    /// All layouts, in build order.
    pub fn all() -> [Layout; 4] {
        [
            Layout::SoloScreen,
            Layout::SoloPrint,
            Layout::OneColumn,
            Layout::TwoColumn,
        ]
    }
}

impl Default for Layout {
    fn default() -> Self {
        Layout::SoloScreen
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
