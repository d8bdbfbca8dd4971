//! ClipStack - clipboard history agent
//!
//! This crate provides the core functionality for watching the system
//! clipboard, keeping bounded in-memory history, and coordinating the
//! popup / focus-restoration / paste sequence behind a global hotkey.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Core business logic, value objects, state machines, and errors
//! - **Application**: The engine (coordinator, monitor) and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (arboard, enigo, global-hotkey, NSWorkspace, etc.)
//! - **CLI**: Command-line interface, the agent loop, and control-socket handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
