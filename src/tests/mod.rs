//! Integration-style test suite for the full recommendation pipeline.
