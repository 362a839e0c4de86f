//! wry webview construction and its JS → Rust handlers.

use hubdesk_common::WindowRole;
use hubdesk_webview::ipc::{bridge_init_script, IpcMessage};
use hubdesk_webview::ShellEvent;
use tracing::{debug, warn};
use winit::window::Window;
use wry::{PageLoadEvent, WebView, WebViewBuilder};

use super::types::{WebEvent, WindowContext};

/// Build the child webview for `window`, sized to its client area.
pub(super) fn build_webview(
    window: &Window,
    role: WindowRole,
    devtools: bool,
    ctx: &WindowContext,
) -> Result<WebView, wry::Error> {
    let size = window.inner_size().to_logical::<f64>(window.scale_factor());
    let bounds = wry::Rect {
        position: wry::dpi::Position::Logical(wry::dpi::LogicalPosition::new(0.0, 0.0)),
        size: wry::dpi::Size::Logical(wry::dpi::LogicalSize::new(size.width, size.height)),
    };

    let builder = WebViewBuilder::new()
        .with_bounds(bounds)
        .with_devtools(devtools)
        .with_initialization_script(&bridge_init_script());
    let builder = attach_ipc_handler(builder, ctx.clone(), role);
    let builder = attach_page_load_handler(builder, ctx.clone(), role);
    let builder = attach_navigation_handler(builder, ctx.clone(), role);

    let webview = builder.build_as_child(window)?;
    debug!(%role, "webview created");
    Ok(webview)
}

/// Queue renderer messages that parse as `{channel, payload}`. Anything
/// else is dropped here so the shell only sees well-formed envelopes.
fn attach_ipc_handler(
    builder: WebViewBuilder<'_>,
    ctx: WindowContext,
    role: WindowRole,
) -> WebViewBuilder<'_> {
    builder.with_ipc_handler(move |request| {
        let body = request.body();
        if let Err(e) = IpcMessage::from_json(body) {
            warn!(%role, error = %e, "dropping malformed IPC message");
            return;
        }
        debug!(%role, body = %body, "IPC message from renderer");
        ctx.push_shell(ShellEvent::Ipc {
            role,
            body: body.clone(),
        });
    })
}

fn attach_page_load_handler(
    builder: WebViewBuilder<'_>,
    ctx: WindowContext,
    role: WindowRole,
) -> WebViewBuilder<'_> {
    builder.with_on_page_load_handler(move |event, url| match event {
        PageLoadEvent::Started => debug!(%role, url = %url, "page load started"),
        PageLoadEvent::Finished => {
            debug!(%role, url = %url, "page load finished");
            ctx.push(WebEvent::PageFinished(role));
        }
    })
}

fn attach_navigation_handler(
    builder: WebViewBuilder<'_>,
    ctx: WindowContext,
    role: WindowRole,
) -> WebViewBuilder<'_> {
    builder.with_navigation_handler(move |url| {
        if !ctx.navigation.is_allowed(&url) {
            warn!(%role, url = %url, "navigation blocked: URL not in allowlist");
            return false;
        }
        debug!(%role, url = %url, "navigation allowed");
        true
    })
}
