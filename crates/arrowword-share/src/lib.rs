//! Sharing and persistence for arrowword grids.
//!
//! Everything that leaves the process goes through the same JSON cell shape
//! ([`WireCell`]):
//!
//! - share links: the grid compressed with a [`Codec`] into a URL fragment
//!   (`p=<payload>`, plus `&lock=1` for solve-only links)
//! - export files: versioned pretty JSON with a creation timestamp
//! - drafts: the latest unlocked grid in a [`DraftStore`], written by a
//!   debounced [`Autosave`]
//!
//! # Example
//!
//! ```
//! use arrowword_core::{Variant, testing::GridBuilder};
//! use arrowword_share::{LzStringCodec, decode_fragment, encode_fragment};
//!
//! let grid = GridBuilder::new()
//!     .clue((0, 0), "Capital of France", Variant::LeftThenRight, "PARIS")
//!     .build();
//!
//! let fragment = encode_fragment(&grid, true, &LzStringCodec).unwrap();
//! assert!(fragment.starts_with("p="));
//! assert!(fragment.ends_with("&lock=1"));
//!
//! let link = decode_fragment(&fragment, &LzStringCodec).unwrap().unwrap();
//! assert!(link.locked);
//! assert_eq!(link.grid, grid);
//! ```

pub use self::{autosave::*, codec::*, draft::*, file::*, link::*, wire::*};

mod autosave;
mod codec;
mod draft;
mod file;
mod link;
mod wire;
