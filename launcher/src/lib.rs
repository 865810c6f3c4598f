//! Launcher lookup and execution inside a Wine prefix.
//!
//! Installed builds live under the prefix's `Versions` directory, one
//! directory per build. [`locate`] finds the editor and player launchers
//! there, [`prefix::WinePrefix`] runs them through Wine, and
//! [`launch::Launcher`] ties the two together.

pub mod cli;
pub mod dirs;
pub mod error;
pub mod launch;
pub mod locate;
pub mod prefix;

#[cfg(test)]
mod test_helpers;
