pub mod component;
pub mod delegation;
pub mod entity;
pub mod error;
pub mod local_world;
pub mod subscription;
