//! rpresence: publish or clear a chat application's rich presence from the command line.
//!
//! Layers, outermost first: [`cli`] → [`infrastructure`] → [`application`] → [`domain`].
//! The local IPC protocol itself is delegated to `discord-rich-presence`.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
