//! Thread-local context tracking for crash reports.
//!
//! Records the current pipeline phase and corpus file per thread (so it
//! works inside rayon workers) plus global atomic progress counters. Guards
//! restore the previous context on drop.

use std::cell::RefCell;
use std::sync::atomic::{AtomicUsize, Ordering};

static FILES_PROCESSED: AtomicUsize = AtomicUsize::new(0);
static FILES_TOTAL: AtomicUsize = AtomicUsize::new(0);

thread_local! {
    static CURRENT_CONTEXT: RefCell<AnalysisContext> = const { RefCell::new(AnalysisContext::new()) };
}

/// What the current thread was doing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisContext {
    pub phase: Option<AnalysisPhase>,
    /// Corpus path of the file being processed
    pub current_file: Option<String>,
    /// Set while a panic would be caught and degraded instead of aborting
    pub recoverable: bool,
}

impl AnalysisContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: None,
            current_file: None,
            recoverable: false,
        }
    }
}

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisPhase {
    CorpusLoading,
    Extraction,
    GraphBuilding,
    ComplexityScoring,
    InsightGeneration,
    QualityScoring,
    OutputGeneration,
}

impl std::fmt::Display for AnalysisPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CorpusLoading => write!(f, "corpus_loading"),
            Self::Extraction => write!(f, "extraction"),
            Self::GraphBuilding => write!(f, "graph_building"),
            Self::ComplexityScoring => write!(f, "complexity_scoring"),
            Self::InsightGeneration => write!(f, "insight_generation"),
            Self::QualityScoring => write!(f, "quality_scoring"),
            Self::OutputGeneration => write!(f, "output_generation"),
        }
    }
}

/// Restores the previous context when dropped, so guards nest.
pub struct ContextGuard {
    previous: AnalysisContext,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        CURRENT_CONTEXT.with(|ctx| {
            *ctx.borrow_mut() = self.previous.clone();
        });
    }
}

fn update(apply: impl FnOnce(&mut AnalysisContext)) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        apply(&mut ctx.borrow_mut());
        ContextGuard { previous }
    })
}

/// Set the current phase until the guard drops.
///
/// ```ignore
/// let _phase = set_phase(AnalysisPhase::GraphBuilding);
/// ```
#[must_use]
pub fn set_phase(phase: AnalysisPhase) -> ContextGuard {
    update(|ctx| ctx.phase = Some(phase))
}

#[must_use]
pub fn set_current_file(path: impl Into<String>) -> ContextGuard {
    let path = path.into();
    update(|ctx| ctx.current_file = Some(path))
}

/// Mark the enclosed work as guarded by `catch_unwind`.
///
/// The panic hook reports a one-line warning instead of a crash report
/// while this guard is alive.
#[must_use]
pub fn enter_recoverable() -> ContextGuard {
    update(|ctx| ctx.recoverable = true)
}

pub fn set_progress(processed: usize, total: usize) {
    FILES_PROCESSED.store(processed, Ordering::Relaxed);
    FILES_TOTAL.store(total, Ordering::Relaxed);
}

pub fn increment_processed() {
    FILES_PROCESSED.fetch_add(1, Ordering::Relaxed);
}

#[must_use]
pub fn get_current_context() -> AnalysisContext {
    CURRENT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

/// `(processed, total)` files
#[must_use]
pub fn get_progress() -> (usize, usize) {
    (
        FILES_PROCESSED.load(Ordering::Relaxed),
        FILES_TOTAL.load(Ordering::Relaxed),
    )
}

pub fn reset_context() {
    CURRENT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = AnalysisContext::new();
    });
}
