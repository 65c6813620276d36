#![allow(dead_code)]

pub mod loader;
pub mod model;
