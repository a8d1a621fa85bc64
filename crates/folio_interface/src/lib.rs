//! Trait definitions for the Folio client.
//!
//! These traits are the seams between the editor core and its collaborators:
//! the REST record store and the duplex generation service.

mod traits;
mod types;

pub use traits::{GenerationConnector, GenerationTransport, RecordStore};
pub use types::{GenerationEvent, GenerationResult, Termination};
