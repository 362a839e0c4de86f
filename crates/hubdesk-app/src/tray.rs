//! System tray icon and menu.
//!
//! Menu entries carry the [`TrayAction`] id, so a `MenuEvent` maps straight
//! back to an action with [`TrayAction::from_id`].

use std::path::Path;

use hubdesk_config::schema::TrayConfig;
use hubdesk_webview::TrayAction;
use tray_icon::menu::{Menu, MenuItem, PredefinedMenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};
use tracing::{debug, warn};

/// Side length of the fallback icon.
const FALLBACK_ICON_SIZE: u32 = 22;

/// Decode a PNG into 8-bit RGBA pixels.
pub fn decode_png_rgba(bytes: &[u8]) -> Result<(Vec<u8>, u32, u32), String> {
    let mut decoder = png::Decoder::new(bytes);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info().map_err(|e| e.to_string())?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).map_err(|e| e.to_string())?;
    buf.truncate(info.buffer_size());

    let rgba = match info.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => buf
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        png::ColorType::Grayscale => buf.iter().flat_map(|&g| [g, g, g, 255]).collect(),
        other => return Err(format!("unsupported PNG color type {other:?}")),
    };
    Ok((rgba, info.width, info.height))
}

/// A plain gray square, used when the icon file is missing or unreadable.
pub fn fallback_icon_rgba() -> (Vec<u8>, u32, u32) {
    let size = FALLBACK_ICON_SIZE;
    let rgba = [128u8, 128, 128, 255].repeat((size * size) as usize);
    (rgba, size, size)
}

fn load_icon(path: &Path) -> Option<Icon> {
    let (rgba, width, height) = match std::fs::read(path)
        .map_err(|e| e.to_string())
        .and_then(|bytes| decode_png_rgba(&bytes))
    {
        Ok(decoded) => decoded,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "tray icon unreadable, using fallback");
            fallback_icon_rgba()
        }
    };
    match Icon::from_rgba(rgba, width, height) {
        Ok(icon) => Some(icon),
        Err(e) => {
            warn!(error = %e, "invalid tray icon");
            None
        }
    }
}

fn build_menu() -> Menu {
    let menu = Menu::new();
    for action in TrayAction::ALL {
        if action.separated() {
            if let Err(e) = menu.append(&PredefinedMenuItem::separator()) {
                warn!(error = %e, "failed to add tray separator");
            }
        }
        let item = MenuItem::with_id(action.id(), action.label(), true, None);
        if let Err(e) = menu.append(&item) {
            warn!(%action, error = %e, "failed to add tray menu item");
        }
    }
    menu
}

/// Create the tray icon. `None` when disabled or when the platform refuses.
///
/// The returned handle must stay alive for the icon to remain visible.
pub fn create_tray(config: &TrayConfig, assets_dir: &Path) -> Option<TrayIcon> {
    if !config.enabled {
        debug!("tray disabled");
        return None;
    }

    let mut builder = TrayIconBuilder::new()
        .with_tooltip(&config.tooltip)
        .with_menu(Box::new(build_menu()));
    if let Some(icon) = load_icon(&assets_dir.join(&config.icon)) {
        builder = builder.with_icon(icon);
    }

    match builder.build() {
        Ok(tray) => {
            debug!("tray icon created");
            Some(tray)
        }
        Err(e) => {
            warn!(error = %e, "failed to create tray icon");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(color: png::ColorType, width: u32, height: u32, data: &[u8]) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, width, height);
            encoder.set_color(color);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        buf
    }

    #[test]
    fn decodes_rgba_unchanged() {
        let pixels = [10, 20, 30, 40, 50, 60, 70, 80];
        let png = encode(png::ColorType::Rgba, 2, 1, &pixels);
        let (rgba, w, h) = decode_png_rgba(&png).unwrap();
        assert_eq!((w, h), (2, 1));
        assert_eq!(rgba, pixels);
    }

    #[test]
    fn expands_rgb_with_opaque_alpha() {
        let png = encode(png::ColorType::Rgb, 1, 2, &[1, 2, 3, 4, 5, 6]);
        let (rgba, _, _) = decode_png_rgba(&png).unwrap();
        assert_eq!(rgba, vec![1, 2, 3, 255, 4, 5, 6, 255]);
    }

    #[test]
    fn expands_grayscale() {
        let png = encode(png::ColorType::Grayscale, 2, 1, &[0, 200]);
        let (rgba, _, _) = decode_png_rgba(&png).unwrap();
        assert_eq!(rgba, vec![0, 0, 0, 255, 200, 200, 200, 255]);
    }

    #[test]
    fn rejects_garbage() {
        assert!(decode_png_rgba(b"not a png").is_err());
    }

    #[test]
    fn bundled_icon_decodes() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../assets/icon.png");
        let bytes = std::fs::read(path).unwrap();
        let (rgba, w, h) = decode_png_rgba(&bytes).unwrap();
        assert_eq!(rgba.len(), (w * h * 4) as usize);
    }

    #[test]
    fn fallback_icon_is_square_and_opaque() {
        let (rgba, w, h) = fallback_icon_rgba();
        assert_eq!((w, h), (22, 22));
        assert_eq!(rgba.len(), 22 * 22 * 4);
        assert!(rgba.chunks_exact(4).all(|p| p == [128, 128, 128, 255]));
    }
}
