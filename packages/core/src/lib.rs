//! FunLe Admin Core
//!
//! Content-management core for the FunLe admin panel: the nested
//! ordered-level editor shared by the course and tutorial editors, and a
//! typed client for the admin backend.
//!
//! # Architecture
//!
//! - **Owned editor state**: one [`editor::TreeEditorStore`] per editing
//!   session, mutated only through its methods or [`editor::EditIntent`]s
//! - **Dense levels**: level indices are always `0..n-1` after a structural
//!   change; node positions are never reused within a level
//! - **Backend behind a trait**: sessions talk to [`client::AdminApi`], served
//!   by reqwest in production and an in-memory mock in tests
//! - **Non-blocking submits**: a submit is a ticket that can be in flight
//!   while editing continues
//!
//! # Modules
//!
//! - [`models`] - wire types (Content, CourseNode, Info, Course, Test, User)
//! - [`editor`] - levels, the tree store, intents and the wire codec
//! - [`client`] - backend API trait, HTTP client, mock and configuration
//! - [`services`] - editor sessions and the test service

pub mod client;
pub mod editor;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use client::{AdminApi, AdminConfig, ApiError, HttpAdminClient, MockAdminApi};
pub use editor::{CourseStore, EditIntent, EditorError, NodeHandle, TreeEditorStore, TutorialStore};
pub use services::{CourseSession, EditorSession, SessionError, SubmitStatus, TutorialSession};
