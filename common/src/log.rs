/// Target used by [`success!`](crate::success) so the terminal formatter can
/// tell a completed milestone apart from ordinary progress output.
pub const SUCCESS_TARGET: &str = "subrecon::success";

/// Target used for raw terminal output that bypasses the level symbols.
pub const PRINT_TARGET: &str = "subrecon::print";

#[doc(hidden)]
pub use tracing as __tracing;

/// Logs a completed milestone. Rendered with the success symbol by the CLI.
#[macro_export]
macro_rules! success {
    ($($arg:tt)+) => {
        $crate::log::__tracing::info!(target: $crate::log::SUCCESS_TARGET, $($arg)+)
    };
}
