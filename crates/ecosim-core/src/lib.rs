//! EcoSim Core - stateful engine for the ecosystem teaching page
//!
//! Wraps the pure models from `ecosim-logic` in owned state machines that a
//! host drives by reporting elapsed time and user actions. Nothing here
//! touches a real clock or a UI toolkit.
//!
//! # Architecture
//!
//! - **[`timer::StepTimer`]**: fixed-cadence trigger fed with elapsed time
//! - **[`simulator::PredatorPreySimulator`]**: `Stopped`/`Running` machine
//!   owning the population series and its timer
//! - **[`render::Renderer`]**: the seam to whatever draws the charts
//! - **[`session::PageSession`]**: one page's worth of components, redrawing
//!   after every mutation
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use ecosim_core::prelude::*;
//!
//! let mut session = PageSession::new(RecordingRenderer::default());
//!
//! // Host loop: report elapsed wall-clock time
//! session.advance(Duration::from_millis(1500));
//! assert_eq!(session.simulator().clock(), 3);
//!
//! session.add_predators().unwrap();
//! ```

pub mod render;
pub mod session;
pub mod simulator;
pub mod timer;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::render::{RecordingRenderer, Renderer};
    pub use crate::session::PageSession;
    pub use crate::simulator::{PredatorPreySimulator, SimulationError, SimulatorState};
    pub use crate::timer::StepTimer;
}
