//! Alien Invaders simulation core.
//!
//! A ship defends a line against a marching grid of aliens. [`wave::Wave`]
//! runs one level frame by frame; [`invaders::Invaders`] is the state machine
//! that creates, pauses, resumes and finishes waves. Rendering and keyboard
//! polling live in the binary.

pub mod config;
pub mod constants;
pub mod entities;
pub mod error;
pub mod formation;
pub mod input;
pub mod invaders;
pub mod wave;
