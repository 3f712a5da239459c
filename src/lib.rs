pub mod application;
pub mod bot;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
pub mod web;
