//! Geteilte Typen und Laufzeit-Optionen.

pub mod options;

pub use options::AnnotatorOptions;
