//! Ordered sections concatenated into one printer job.

use thermal_image::PrinterImage;

use crate::Result;
use crate::command::{ESC, GS, image_raster_command};

/// Initialize printer (`ESC @`).
const INIT: [u8; 2] = [ESC, 0x40];

/// One piece of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    /// A complete raster command, as built by [`crate::raster_command`].
    Raster(Vec<u8>),
    /// Print and feed `n` lines (`ESC d n`).
    Feed(u8),
    /// Full cut (`GS V 0`).
    Cut,
}

impl Section {
    fn write_to(&self, buf: &mut Vec<u8>) {
        match self {
            Section::Raster(cmd) => buf.extend_from_slice(cmd),
            Section::Feed(lines) => buf.extend_from_slice(&[ESC, 0x64, *lines]),
            Section::Cut => buf.extend_from_slice(&[GS, 0x56, 0x00]),
        }
    }
}

/// A printer job built from sections.
#[derive(Debug, Clone, Default)]
pub struct Document {
    sections: Vec<Section>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, section: Section) -> &mut Self {
        self.sections.push(section);
        self
    }

    /// Append the raster command for an image's current state.
    pub fn push_image(&mut self, image: &PrinterImage) -> Result<&mut Self> {
        let cmd = image_raster_command(image)?;
        Ok(self.push(Section::Raster(cmd)))
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Concatenate everything, prefixed with a printer reset.
    pub fn build(&self) -> Vec<u8> {
        let mut buf = INIT.to_vec();
        for section in &self.sections {
            section.write_to(&mut buf);
        }
        buf
    }
}
