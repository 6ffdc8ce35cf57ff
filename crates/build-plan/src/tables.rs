//! Typesetting derivation tables.
//!
//! These are the canonical source for every derived build-task field.
//! The values are part of the output contract (they appear in rendered
//! artifacts), so changes here change what authors publish.

use storypress_model::{Layout, PaperSize};

/// Body font size for a paper size.
pub fn font_size_for(paper: PaperSize) -> &'static str {
    match paper {
        PaperSize::Letter => "10pt",
        PaperSize::A4 => "10pt",
        PaperSize::B5 => "8pt",
        PaperSize::A5 => "8pt",
    }
}

/// The typesetting engine's paper-size code.
pub fn paper_code_for(paper: PaperSize) -> &'static str {
    match paper {
        PaperSize::Letter => "letter",
        PaperSize::A4 => "a4",
        PaperSize::B5 => "b5",
        PaperSize::A5 => "a5",
    }
}

/// Whether a layout prints double-sided.
pub fn double_sided_for(layout: Layout) -> bool {
    match layout {
        Layout::SoloScreen => false,
        Layout::SoloPrint => true,
        Layout::OneColumn => true,
        Layout::TwoColumn => true,
    }
}

/// Column count for a layout.
pub fn columns_for(layout: Layout) -> u32 {
    match layout {
        Layout::SoloScreen => 1,
        Layout::SoloPrint => 1,
        Layout::OneColumn => 1,
        Layout::TwoColumn => 2,
    }
}

/// Whether a layout puts one lead per page.
pub fn solo_for(layout: Layout) -> bool {
    match layout {
        Layout::SoloScreen => true,
        Layout::SoloPrint => true,
        Layout::OneColumn => false,
        Layout::TwoColumn => false,
    }
}

/// The most columns a paper size can carry.
pub fn max_columns_for(paper: PaperSize) -> u32 {
    match paper {
        PaperSize::Letter => 2,
        PaperSize::A4 => 2,
        PaperSize::B5 => 2,
        PaperSize::A5 => 1,
    }
}
