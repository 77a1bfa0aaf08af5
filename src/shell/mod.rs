// Composition root for the event registrations service.
//
// Responsibilities
// - Read config from the environment.
// - Instantiate the simulated gateways and the in-memory projections.
// - Wire them into the dialog handlers behind an HTTP router.

pub mod config;
pub mod http;
pub mod state;
