//! Rendering system
//!
//! The renderer owns projection and draw scheduling and talks to an
//! abstract [`backend::RenderBackend`] collaborator for buffer upload,
//! uniform binding, and draw submission. The per-vertex streak computation
//! lives in [`streak`] and is executed by the software backend in
//! [`headless`]; a GPU backend running the same stage as shader code would
//! bind the identical uniform names.

pub mod backend;
pub mod headless;
pub mod mesh;
pub mod renderer;
pub mod scheduler;
pub mod streak;

pub use backend::{BackendResult, Program, RenderBackend, Topology};
pub use mesh::{Mesh, Vertex};
pub use renderer::Renderer;
pub use scheduler::PassScheduler;

use thiserror::Error;

/// Rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    /// Renderer initialization failed during setup
    #[error("Renderer initialization failed: {0}")]
    InitializationFailed(String),

    /// A rendering operation failed during execution
    #[error("Rendering failed: {0}")]
    RenderingFailed(String),

    /// Resource creation or management failed
    #[error("Resource creation failed: {0}")]
    ResourceCreationFailed(String),

    /// Backend-specific error occurred
    #[error("Backend error: {0}")]
    BackendError(String),
}

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;
