//! atunc - audio input device lister and recorder
//!
//! This crate lists the audio devices that can capture sound and records
//! one of them into a 16-bit PCM WAV file until the process is interrupted.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Device ids and descriptors, PCM format, recording lifecycle, config
//! - **Application**: Use cases and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (cpal, hound WAV, XDG config)
//! - **CLI**: Command-line interface, argument parsing, signal handling and logging

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
