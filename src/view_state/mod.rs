//! View-state layer: graph layout, scrolling and hit-testing.
//!
//! Everything here is independent of the terminal backend and testable
//! without rendering.
//!
//! # Module Structure
//!
//! - `layout`: GraphLayout trait with the static table and computed chain
//! - `scroll`: cursor-following viewport offsets
//! - `hit_test`: HitMap - clickable regions of the last frame

pub mod layout;
pub mod scroll;

pub use hit_test::{HitMap, HitTarget};
pub use layout::{ChainLayout, Extent, GraphLayout, LayoutKind, Point, StaticLayout, UnknownLayout};
pub use scroll::offset_for_cursor;
