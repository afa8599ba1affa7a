// End-to-end tests for the news aggregation API
//
// Each test gets its own application instance bound to an ephemeral port,
// plus a fake feed server that serves canned RSS/Atom documents, slow
// responses, HTTP errors and malformed XML. Sources are pointed at the fake
// server per test, so tests run in parallel without sharing state.

mod helpers;
mod test_sources;
