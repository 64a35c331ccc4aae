//! CLI infrastructure for the prowl simulator
//!
//! This module provides the command-line interface for running hunts and
//! inspecting one-shot Q-learning plans.

pub mod commands;
pub mod output;
