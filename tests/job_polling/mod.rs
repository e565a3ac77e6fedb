//! Behaviour-driven tests for async job polling through the client.

mod bdd_steps;
mod scenarios;
mod test_helpers;
