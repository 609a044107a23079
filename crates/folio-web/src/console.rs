//! Browser console plumbing: panic hook and `tracing` subscriber.

use std::io;

use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::prelude::*;

fn panic_message(info: &std::panic::PanicHookInfo<'_>) -> String {
    match info.location() {
        Some(loc) => format!("folio panicked ({}:{}): {info}", loc.file(), loc.line()),
        None => format!("folio panicked: {info}"),
    }
}

/// Install the panic hook and the console subscriber, once per page.
pub(crate) fn install() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            web_sys::console::error_1(&JsValue::from_str(&panic_message(info)));
        }));

        // No clock on wasm32-unknown-unknown, so no timestamps.
        let _ = tracing_subscriber::fmt()
            .with_writer(ConsoleMakeWriter)
            .without_time()
            .with_target(false)
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter { buf: Vec::new() }
    }
}

/// Buffers one formatted event and logs it when dropped.
struct ConsoleWriter {
    buf: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buf);
        let line = line.trim_end();
        if !line.is_empty() {
            web_sys::console::log_1(&JsValue::from_str(line));
        }
    }
}
