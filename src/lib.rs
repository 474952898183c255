//! Interactive terminal code blocks.
//!
//! Pipeline: [`source`] → [`tokenizer`] → [`layout`] → [`controller`], with
//! [`palette`] resolving colors at draw time. [`app`], [`document`] and
//! [`renderer`] make up the ratatui host that stacks blocks into a page.

pub mod app;
pub mod clipboard;
pub mod controller;
pub mod demo;
pub mod document;
pub mod host;
pub mod layout;
pub mod lazy;
pub mod palette;
pub mod parser;
pub mod renderer;
pub mod source;
pub mod tokenizer;
