//! Console logging macros
//!
//! On wasm32 messages go straight to the browser console through `web_sys`.
//! Native builds (tests, tools) emit `tracing` events instead, because the
//! JS console imports panic outside of a wasm host.
//!
//! Usage:
//! ```rust
//! use sandfall_engine::{sand_log, sand_warn};
//!
//! sand_log!("grid is {}x{}", 120, 80);
//! sand_warn!("falling back to placeholder image");
//! ```

/// Informational message (`console.log` / `tracing::info!`)
#[macro_export]
macro_rules! sand_log {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        #[cfg(target_arch = "wasm32")]
        {
            $crate::__private::web_sys::console::log_1(&message.as_str().into());
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            $crate::__private::tracing::info!(target: "sandfall", "{}", message);
        }
    }};
}

/// Recoverable problem (`console.warn` / `tracing::warn!`)
#[macro_export]
macro_rules! sand_warn {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        #[cfg(target_arch = "wasm32")]
        {
            $crate::__private::web_sys::console::warn_1(&message.as_str().into());
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            $crate::__private::tracing::warn!(target: "sandfall", "{}", message);
        }
    }};
}
