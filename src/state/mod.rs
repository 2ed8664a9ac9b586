//! Gallery state
//!
//! This module holds everything that is not drawing:
//! - The portfolio document and its entities (store.rs, data.rs)
//! - Ordering, likes and lightbox navigation (sort.rs, likes.rs, lightbox.rs)
//! - The contact form and page routes (contact.rs, route.rs)
//! - The controller tying them to a render target (gallery.rs)

pub mod contact;
pub mod data;
pub mod gallery;
pub mod lightbox;
pub mod likes;
pub mod route;
pub mod sort;
pub mod store;
