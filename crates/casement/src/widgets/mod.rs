//! The minimal concrete controls the core ships with.
//!
//! Casement deliberately stops short of a widget gallery: buttons,
//! checkboxes, text inputs and friends are consumers of the render/event
//! contract, built outside the core. What lives here is the one control
//! every tree needs - a [`Panel`] container - serving as the reference for
//! how concrete controls embed [`ControlBase`](crate::ControlBase).

mod panel;

pub use panel::Panel;
