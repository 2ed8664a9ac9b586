//! Render target: the `GalleryView` contract, the retained `Screen`
//! that implements it, and the iced widgets that draw a `Screen`.

pub mod screen;
pub mod view;
pub mod widgets;
