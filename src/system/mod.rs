//! # System Interaction Layer
//!
//! Boundary between the core logic and the operating system.
//!
//! ## Modules
//!
//! - **`executor`**: spawns external tools (`npm install`, the UI build) in a
//!   working directory and waits for them, handling the Windows `.cmd` shim case.

pub mod executor;
