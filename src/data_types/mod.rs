pub mod annotations;
pub mod axis;
pub mod datasource;
pub mod geometry;
pub mod plot_configs;
pub mod range;
pub mod state;

// Re-export everything for compatibility
pub use annotations::*;
pub use axis::*;
pub use datasource::*;
pub use geometry::*;
pub use plot_configs::*;
pub use range::*;
pub use state::*;
