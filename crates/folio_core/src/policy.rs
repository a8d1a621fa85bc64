//! How manual edits interact with a running generation.

use serde::{Deserialize, Serialize};

/// Policy for manual edits to a field that a generation is writing to.
///
/// With `LastWriterWins` both writers mutate the same text in event order and
/// nothing is merged. `LockWhileGenerating` rejects manual edits to the
/// generating field until the session ends.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum EditPolicy {
    /// Edits and deltas interleave; last writer wins
    #[default]
    LastWriterWins,
    /// Edits to the generating field are refused while it runs
    LockWhileGenerating,
}
