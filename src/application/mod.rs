//! Application layer: the view state machine, the backend gateway seam,
//! and the route table.

pub mod error;
pub mod gateway;
pub mod list_view;
pub mod router;
