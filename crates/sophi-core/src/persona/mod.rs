//! Persona registry and DNA augmentation.

pub mod dna;
pub mod model;
pub mod preset;

pub use dna::baked_in_dna;
pub use model::{CustomPersona, PersonaCategory, PersonaConfig, PersonaResolution, PersonaSource};
pub use preset::{
    BuiltinPersona, DEFAULT_PERSONA_ID, builtin_personas, default_persona, find_builtin,
    personas_in_category, resolve_persona,
};
