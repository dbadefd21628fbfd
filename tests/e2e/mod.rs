// End-to-end tests for the reminder caller HTTP API
//
// Each test starts the real axum router on an ephemeral port. Outbound calls go
// through the real Twilio adapter to an in-process fake Twilio server;
// synthesis and translation use in-memory fakes. Every test gets its own
// campaign, so tests run in parallel.

mod helpers;
mod test_dispatch;
mod test_health;
