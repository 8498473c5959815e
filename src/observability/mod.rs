//! Crash reporting and per-thread analysis context.
//!
//! Install the hook once at startup, then mark phases and files as the
//! pipeline moves through them:
//!
//! ```ignore
//! use archmap::observability::{install_panic_hook, set_phase, AnalysisPhase};
//!
//! install_panic_hook();
//! let _phase = set_phase(AnalysisPhase::Extraction);
//! ```

pub mod context;
pub mod panic_hook;

pub use context::{
    enter_recoverable, get_current_context, get_progress, increment_processed, reset_context,
    set_current_file, set_phase, set_progress, AnalysisContext, AnalysisPhase, ContextGuard,
};
pub use panic_hook::install_panic_hook;
