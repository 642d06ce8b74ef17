//! Exam results dashboard: load a table of exam scores, pick a subject,
//! and see that subject's scores as a grouped bar chart and a mark list.

pub mod app;
pub mod color;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod ui;
