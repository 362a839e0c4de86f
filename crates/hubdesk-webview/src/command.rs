//! Typed renderer → host commands.

use hubdesk_common::IpcError;
use serde_json::Value;

use crate::ipc::{Channel, IpcMessage};

/// A validated message from a renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCommand {
    Minimize,
    ToggleMaximize,
    CloseMain,
    HideFloating,
    Pin(bool),
    Search(String),
    SearchFocus(bool),
    ThemeChanged(bool),
    OpenPdf,
    OpenLink,
}

fn expect_bool(channel: Channel, payload: &Value) -> Result<bool, IpcError> {
    payload.as_bool().ok_or_else(|| IpcError::InvalidPayload {
        channel: channel.as_str().to_string(),
        expected: "boolean",
    })
}

impl HostCommand {
    /// Decode a raw message. Payloads of no-argument channels are ignored.
    pub fn decode(msg: &IpcMessage) -> Result<Self, IpcError> {
        let channel = msg.host_channel()?;
        let payload = &msg.payload;

        let command = match channel {
            Channel::WindowMinimize => Self::Minimize,
            Channel::WindowMaximize => Self::ToggleMaximize,
            Channel::WindowClose => Self::CloseMain,
            Channel::FloatingClose => Self::HideFloating,
            Channel::FloatingPin => Self::Pin(expect_bool(channel, payload)?),
            Channel::SearchTerm => match payload {
                Value::String(term) => Self::Search(term.clone()),
                _ => {
                    return Err(IpcError::InvalidPayload {
                        channel: channel.as_str().to_string(),
                        expected: "string",
                    })
                }
            },
            Channel::SearchFocus => Self::SearchFocus(expect_bool(channel, payload)?),
            Channel::ThemeChanged => Self::ThemeChanged(expect_bool(channel, payload)?),
            Channel::OpenPdf => Self::OpenPdf,
            Channel::OpenLink => Self::OpenLink,
            // host_channel() already rejected renderer-bound channels
            Channel::MakeDraggable
            | Channel::UpdateUi
            | Channel::WindowMaximizedState
            | Channel::PerformSearch => {
                return Err(IpcError::WrongDirection(msg.channel.clone()));
            }
        };
        Ok(command)
    }

    /// Parse and decode in one step.
    pub fn from_json(raw: &str) -> Result<Self, IpcError> {
        Self::decode(&IpcMessage::from_json(raw)?)
    }
}
