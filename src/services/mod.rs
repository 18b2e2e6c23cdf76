pub mod backend;
pub mod composer;
pub mod controller;
