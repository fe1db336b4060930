//! Origin tokens naming the AST node that produced a value.

use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter so every minted token is distinct for the process lifetime
static ORIGIN_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Opaque identity of the AST node that produced a value.
///
/// The front-end mints one token per parse node. Two declarations of the
/// same argument count as "the same declaration" exactly when their tokens
/// are equal, which is how re-evaluating an imported file under a second
/// toolchain avoids tripping the duplicate check. Tokens carry no source
/// text; turning one back into a file/line is the front-end's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Origin(u64);

impl Origin {
    /// Mint a token distinct from every token minted before it.
    pub fn fresh() -> Origin {
        Origin(ORIGIN_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}
