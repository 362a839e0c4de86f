//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the event
//! loop. Owns the window shell, the tray icon, and the tokio runtime that
//! probes page loads; wry callbacks feed a shared queue drained here.

mod core;
mod event_handler;
mod platform;
mod polling;
mod shutdown;
mod types;
mod webview;
mod window;

pub use core::HubdeskApp;
