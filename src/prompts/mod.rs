// src/prompts/mod.rs
pub mod catalog;
pub mod composer;
pub mod dictionary;
pub mod intensity;
pub mod plan;

pub use composer::{ComposedInstruction, build_instruction, compose, frame_instruction};
