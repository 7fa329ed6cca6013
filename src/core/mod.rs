// src/core/mod.rs

/// Wire payloads and the validated result types built from them.
pub mod models;

/// Error enums for payloads, transport, configuration and dates.
pub mod error;

/// The result renderer: HTML result cards and the container they live in.
pub mod results;

/// The chat widget controller and the transport seam it sends through.
pub mod chat;

/// HTTP implementation of the chat transport.
pub mod client;

/// Server connection settings.
pub mod config;

/// Maskable input, loading spinner, clipboard and date helpers.
pub mod controls;
