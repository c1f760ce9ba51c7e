//! Raw HID command channel.
//!
//! The host sends null-terminated ASCII commands in fixed-size reports. A recognized command
//! switches layers and is acknowledged with a report starting with `X`. Anything else is
//! dropped without an answer.
use log::{debug, info};
use usbd_hid::descriptor::generator_prelude::*;

use crate::host::KeyboardHost;
use crate::layer::Layer;

/// Size of a raw HID report
pub const RAW_EPSIZE: usize = 32;

/// First byte of an acknowledgment
pub const RAW_HID_ACK: u8 = b'X';

#[gen_hid_descriptor(
    (collection = APPLICATION, usage_page = 0xFF60, usage = 0x61) = {
        (usage = 0x62, logical_min = 0x0) = {
            #[item_settings(data,variable,absolute)] input_data=input;
        };
        (usage = 0x63, logical_min = 0x0) = {
            #[item_settings(data,variable,absolute)] output_data=output;
        };
    }
)]
pub struct RawHidReport {
    pub input_data: [u8; 32],
    pub output_data: [u8; 32],
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RawCommand {
    ToLayerGame,
    ToLayerDefault,
    ToLayerNumpadLh,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RawCommandError {
    /// Zero-length buffer
    Empty,
    /// The last byte is not `\0`
    NotTerminated,
    /// Terminated, but no such command
    Unknown,
}

impl RawCommand {
    const ALL: [RawCommand; 3] = [
        RawCommand::ToLayerGame,
        RawCommand::ToLayerDefault,
        RawCommand::ToLayerNumpadLh,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RawCommand::ToLayerGame => "to_layer_game",
            RawCommand::ToLayerDefault => "to_layer_default",
            RawCommand::ToLayerNumpadLh => "to_layer_numpad_lh",
        }
    }

    pub fn target_layer(self) -> Layer {
        match self {
            RawCommand::ToLayerGame => Layer::Game,
            RawCommand::ToLayerDefault => Layer::DEFAULT,
            RawCommand::ToLayerNumpadLh => Layer::NumLh,
        }
    }

    /// Parse a command buffer.
    ///
    /// The buffer must end with `\0`. The command is the text before the first `\0`, so
    /// trailing padding after the terminator is ignored.
    pub fn parse(data: &[u8]) -> Result<Self, RawCommandError> {
        let (&last, _) = data.split_last().ok_or(RawCommandError::Empty)?;
        if last != 0 {
            return Err(RawCommandError::NotTerminated);
        }
        let end = data.iter().position(|&b| b == 0).unwrap_or(data.len());
        let text = &data[..end];
        Self::ALL
            .into_iter()
            .find(|command| command.as_str().as_bytes() == text)
            .ok_or(RawCommandError::Unknown)
    }
}

/// Acknowledgment of `N` bytes: `X` followed by zeros
pub fn ack_report<const N: usize>() -> [u8; N] {
    let mut response = [0u8; N];
    if let Some(first) = response.first_mut() {
        *first = RAW_HID_ACK;
    }
    response
}

/// Run a command buffer. Returns the acknowledgment to send back, or `None` if the buffer was
/// dropped.
pub fn process_raw_hid<H: KeyboardHost, const N: usize>(data: &[u8; N], host: &mut H) -> Option<[u8; N]> {
    match RawCommand::parse(data) {
        Ok(command) => {
            info!("Raw HID command {}, moving to {:?}", command.as_str(), command.target_layer());
            host.layer_move(command.target_layer());
            Some(ack_report())
        }
        Err(e) => {
            debug!("Raw HID buffer dropped: {:?}", e);
            None
        }
    }
}
