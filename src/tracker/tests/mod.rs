//! Unit tests for the tracker domain and in-memory adapters.
