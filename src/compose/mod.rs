// Composite lab synthesis
//
// Combines several catalog entries into one integrated lab: inferred
// architecture, synthesized instructions, merged prerequisites, and an
// aggregate responsible-AI disclaimer.

pub mod architecture;
pub mod instructions;
pub mod lab;
pub mod synthesizer;

// Re-export key types
pub use lab::{CompositeLab, DataFlow, DeploymentStep, IntegratedArchitecture, LabComponent};
pub use synthesizer::CompositeSynthesizer;
