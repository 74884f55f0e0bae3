//! Code signing and disk-image packaging for the EAR Production Suite
//! macOS distribution.
//!
//! Takes the build artifact produced by CI, signs every binary in it, and
//! packages the result as a signed, compressed disk image:
//!
//! - **Extractor** - unpacks the artifact into a clean working directory
//! - **Signer** - hardened-runtime signatures on plugins, apps, the
//!   REAPER extension dylib, and the project upgrade tool
//! - **Image builder** - `hdiutil` UDZO image of the working directory
//! - **Image signer** - plain signature on the finished image
//!
//! All external tools (`tar`, `xcrun codesign`, `hdiutil`) are invoked
//! through [`process::Cmd`], which fails fast on the first nonzero exit.

pub mod layout;
pub mod pipeline;
pub mod preflight;
pub mod process;

pub use layout::SuiteLayout;
