//! Activity board: a Yew front-end over the school activities API.
//!
//! Lists activities with their participants, signs students up through a
//! form, and lets an organizer unregister a participant. See [`board`] for the
//! controller and [`app`] for the page that hosts it.

pub mod api;
pub mod app;
pub mod board;
pub mod card;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod state;
pub mod status;

pub use app::App;
