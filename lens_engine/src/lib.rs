//! # Lens Engine
//!
//! Turns a text and a set of cognitive lenses into one narrative per lens,
//! blends narratives into a synthesis, and keeps a per-session observer that
//! narrates the user's interaction pattern. Reference data comes from
//! `lens_catalog`.
//!
//! ## Core Components
//!
//! - **lens**: Lens processors, the key registry and the fan-out manager
//! - **custom_lens**: User-authored lenses and archetypal validation
//! - **observer**: Interaction counting, insights and the periodic pulse
//! - **session**: In-memory session store
//! - **service**: `LensService`, the facade over all of the above
//!
//! ## Design Philosophy
//!
//! - **Shared, not global**: Components receive their collaborators as `Arc`s
//! - **Quiet fallbacks**: Unknown lenses and sessions yield empty results, not errors
//! - **Deterministic**: Narratives depend only on the lens and the knowledge base

pub mod config;
pub mod custom_lens;
pub mod error;
pub mod lens;
pub mod observer;
pub mod service;
pub mod session;

pub use config::*;
pub use custom_lens::*;
pub use error::*;
pub use lens::*;
pub use observer::*;
pub use service::*;
pub use session::*;
