//! Chart section catalogue, eligibility evaluation, and render requests.

/// Structured render requests handed to the chart renderer.
pub mod render;
/// The fixed chart sections and their required-column predicates.
pub mod sections;
/// Ordered eligibility evaluation producing one render pass.
pub mod selector;

// Re-export the main types for convenience
pub use render::RenderRequest;
pub use sections::ChartSection;
pub use selector::RenderPass;
pub use selector::ViewOptions;
pub use selector::build_render_pass;
