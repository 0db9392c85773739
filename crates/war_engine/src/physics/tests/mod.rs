//! Collision scenarios exercised through the system and world APIs

mod grid_properties;
