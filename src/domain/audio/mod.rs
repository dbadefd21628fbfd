pub mod cache;

pub use cache::{ArtifactKey, AudioArtifact, AudioArtifactCache};
