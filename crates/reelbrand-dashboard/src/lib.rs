/*
[INPUT]:  Public API exports for reelbrand-dashboard crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod accounts;
pub mod config;
pub mod connection;
pub mod edit;
pub mod form;
pub mod notify;
pub mod render;
pub mod schema;
pub mod session;
pub mod submission;
pub mod validation;

// Re-export main types for convenience
pub use config::DashboardConfig;
pub use connection::{ConnectionStatus, ConnectionTester, SimulatedConnectionTester};
pub use schema::{FieldDefinition, FieldKind, PlatformDefinition, Platforms};
pub use session::OnboardingSession;
