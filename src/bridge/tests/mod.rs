//! Unit tests for the bridge module.

mod correlator_tests;
