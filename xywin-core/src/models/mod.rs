pub mod metrics;
pub mod window;

// re-export for cleaner imports
pub use self::metrics::{MetricsTable, WindowMetrics};
pub use self::window::Window;
