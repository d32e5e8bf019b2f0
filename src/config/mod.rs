// ABOUTME: Configuration module aggregating environment-based server settings
// ABOUTME: Re-exports ServerConfig and its sub-structs for convenient imports
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 AppUnite

//! Server configuration loaded from environment variables

pub mod environment;

pub use environment::{AuthConfig, DocumentsConfig, RecruiteeConfig, ServerConfig};
