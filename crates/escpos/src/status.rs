//! Real-time status requests (`DLE EOT n`) and their decoded report.
//!
//! Each request makes the printer answer with a single status byte. A
//! [`StatusKind`] groups the requests needed for one report; the answers are
//! folded into a [`StatusReport`] whose flags stay `None` until some response
//! says otherwise.

use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::{EscPosError, Result};

const DLE: u8 = 0x10;
const EOT: u8 = 0x04;

/// Argument `n` of `DLE EOT n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum StatusRequest {
    Printer = 1,
    Offline = 2,
    Error = 3,
    PaperRoll = 4,
}

impl StatusRequest {
    /// Command bytes to send for this request.
    pub fn command(self) -> [u8; 3] {
        [DLE, EOT, self as u8]
    }
}

/// What the caller wants to know.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    PrinterStatus,
    OfflineStatus,
    ErrorStatus,
    PaperStatus,
    MovementStatus,
    FullStatus,
}

impl StatusKind {
    /// Requests to send, in order, for this kind of report.
    ///
    /// Error and movement reports are not available on generic printers.
    pub fn requests(self) -> Result<&'static [StatusRequest]> {
        use StatusRequest::*;
        match self {
            StatusKind::PrinterStatus => Ok(&[Printer]),
            StatusKind::OfflineStatus => Ok(&[Offline]),
            StatusKind::PaperStatus => Ok(&[PaperRoll]),
            StatusKind::FullStatus => Ok(&[Printer, PaperRoll, Offline]),
            StatusKind::ErrorStatus | StatusKind::MovementStatus => {
                Err(EscPosError::UnsupportedStatusRequest)
            }
        }
    }

    /// Concatenated command bytes for every request of this kind.
    pub fn commands(self) -> Result<Vec<u8>> {
        Ok(self
            .requests()?
            .iter()
            .flat_map(|r| r.command())
            .collect())
    }
}

/// Decoded printer status.
///
/// `None` means the printer was not asked, or the answer did not cover
/// that flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub is_invalid_report: bool,
    pub is_online: Option<bool>,
    pub is_paper_present: Option<bool>,
    pub is_paper_level_okay: Option<bool>,
    pub is_ticket_present_at_output: Option<bool>,
    pub is_cover_closed: Option<bool>,
    pub is_paper_motor_off: Option<bool>,
    pub is_diag_button_released: Option<bool>,
    pub is_head_temperature_okay: Option<bool>,
    pub is_comms_okay: Option<bool>,
    pub is_power_supply_voltage_okay: Option<bool>,
    pub is_paper_path_clear: Option<bool>,
    pub is_cutter_okay: Option<bool>,
    pub is_normal_feed: Option<bool>,
    pub has_error: Option<bool>,
    pub has_fatal_error: Option<bool>,
    pub has_recoverable_error: Option<bool>,
}

fn bit(byte: u8, n: u8) -> bool {
    byte & (1 << n) != 0
}

impl StatusReport {
    /// A report for a missing, malformed or unsupported response.
    pub fn invalid() -> Self {
        Self {
            is_invalid_report: true,
            ..Self::default()
        }
    }

    /// Decode the answers for `kind`, one byte per request in
    /// [`StatusKind::requests`] order.
    ///
    /// Unsupported kinds yield an invalid report rather than an error.
    pub fn decode(kind: StatusKind, response: &[u8]) -> Result<Self> {
        let requests = match kind.requests() {
            Ok(r) => r,
            Err(EscPosError::UnsupportedStatusRequest) => {
                warn!(?kind, "Status kind not supported");
                return Ok(Self::invalid());
            }
            Err(e) => return Err(e),
        };
        if response.len() != requests.len() {
            return Err(EscPosError::InvalidStatusResponse(response.len()));
        }

        let mut report = Self::default();
        for (request, byte) in requests.iter().zip(response) {
            report.apply(*request, std::slice::from_ref(byte))?;
        }
        debug!(?kind, "Decoded status report");
        Ok(report)
    }

    /// Fold a single request's response into this report.
    pub fn apply(&mut self, request: StatusRequest, response: &[u8]) -> Result<()> {
        let [byte] = response else {
            return Err(EscPosError::InvalidStatusResponse(response.len()));
        };
        let byte = *byte;
        match request {
            StatusRequest::Printer => {
                self.is_online = Some(!bit(byte, 3));
            }
            StatusRequest::Offline => {
                self.has_error = Some(bit(byte, 6));
            }
            StatusRequest::Error => {
                let fatal = bit(byte, 5);
                let recoverable = bit(byte, 6);
                self.is_cutter_okay = Some(!bit(byte, 3));
                self.has_fatal_error = Some(fatal);
                self.has_recoverable_error = Some(recoverable);
                self.has_error = Some(fatal || recoverable);
            }
            StatusRequest::PaperRoll => {
                self.is_paper_present = Some(byte & 0x60 == 0);
            }
        }
        Ok(())
    }

    /// Serialize as JSON, optionally indented.
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }

    fn flags(&self) -> [(&'static str, Option<bool>); 16] {
        [
            ("is_online", self.is_online),
            ("is_paper_present", self.is_paper_present),
            ("is_paper_level_okay", self.is_paper_level_okay),
            ("is_ticket_present_at_output", self.is_ticket_present_at_output),
            ("is_cover_closed", self.is_cover_closed),
            ("is_paper_motor_off", self.is_paper_motor_off),
            ("is_diag_button_released", self.is_diag_button_released),
            ("is_head_temperature_okay", self.is_head_temperature_okay),
            ("is_comms_okay", self.is_comms_okay),
            ("is_power_supply_voltage_okay", self.is_power_supply_voltage_okay),
            ("is_paper_path_clear", self.is_paper_path_clear),
            ("is_cutter_okay", self.is_cutter_okay),
            ("is_normal_feed", self.is_normal_feed),
            ("has_error", self.has_error),
            ("has_fatal_error", self.has_fatal_error),
            ("has_recoverable_error", self.has_recoverable_error),
        ]
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "is_invalid_report: {}", self.is_invalid_report)?;
        for (name, value) in self.flags() {
            match value {
                Some(v) => writeln!(f, "{name}: {v}")?,
                None => writeln!(f, "{name}: unknown")?,
            }
        }
        Ok(())
    }
}
