//! Repository layer
//!
//! Thin seams over the two external collaborators: the job controller and
//! the workflow-status event channel. Both are trait-based so the services
//! can be exercised against fakes.

mod events;
mod jobs;

// Re-export traits
pub use events::EventChannel;
pub use jobs::JobControllerRepository;

// Re-export implementations
pub use events::MpscEventChannel;
