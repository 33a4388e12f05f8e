//! # Dispatcher Test Suite
//!
//! Scenario tests for the duty rotation and the interactive menu. Unit tests
//! for individual modules live beside them in the library.

mod menu_tests;
