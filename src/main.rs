//! Floating logos entry point
//!
//! On the web this mounts the field over the page. Natively it runs the
//! headless driver and prints a summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_host {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;

    use floating_logos::Settings;
    use floating_logos::platform::web::{self, WebHandle};

    thread_local! {
        static HANDLE: RefCell<Option<WebHandle>> = const { RefCell::new(None) };
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Floating logos starting...");

        let settings = Settings::load();
        match web::mount(settings) {
            Ok(handle) => HANDLE.with(|h| *h.borrow_mut() = Some(handle)),
            Err(e) => log::error!("Failed to mount floating logos: {}", e),
        }
    }

    /// Unmount from page script (route change, theme toggle)
    #[wasm_bindgen]
    pub fn floating_logos_stop() {
        HANDLE.with(|h| {
            if let Some(handle) = h.borrow_mut().take() {
                handle.stop();
            }
        });
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_host::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;
    use floating_logos::Settings;
    use floating_logos::platform::headless::{self, RunConfig};

    env_logger::init();

    let config = RunConfig::parse();
    log::info!(
        "Floating logos (native) running {} frames at {}x{}",
        config.frames,
        config.width,
        config.height
    );

    let report = headless::run(&config, Settings::load());
    println!(
        "frames={} final={} min={} pops={} out_of_bounds={}",
        report.frames, report.final_count, report.min_count, report.pops, report.out_of_bounds
    );
    if report.out_of_bounds > 0 {
        log::warn!("{} sprite-frames ended outside the viewport", report.out_of_bounds);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
