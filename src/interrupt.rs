//! Cooperative Ctrl-C handling.
//!
//! Blocking subprocess calls cannot be aborted mid-flight; instead the
//! handler records the interrupt in a shared flag, and each step is
//! classified against that flag once it returns.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared interruption flag, set from the Ctrl-C handler.
pub type InterruptFlag = Arc<AtomicBool>;

/// Install the process-wide Ctrl-C handler and return its flag.
///
/// Call once at startup. If the handler cannot be installed (e.g. another
/// handler owns the signal), provisioning still works; interruption then
/// falls back to signal-death classification of the child process.
pub fn install() -> InterruptFlag {
    let flag = Arc::new(AtomicBool::new(false));
    let handler_flag = flag.clone();

    if let Err(e) = ctrlc::set_handler(move || {
        handler_flag.store(true, Ordering::SeqCst);
    }) {
        tracing::warn!("Could not install Ctrl-C handler: {}", e);
    }

    flag
}

/// Check whether the flag has been raised.
pub fn is_raised(flag: &InterruptFlag) -> bool {
    flag.load(Ordering::SeqCst)
}
