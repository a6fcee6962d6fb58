//! Client for the lectern e-learning backend: session handling, route
//! gating, a normalizing REST transport and one controller per screen.

pub mod account_state;
pub mod app;
pub mod guard;
pub mod logging;
pub mod model;
pub mod remote;
pub mod routes;
pub mod session;
pub mod store;
pub mod views;
