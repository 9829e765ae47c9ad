// Dashboard layout and metric chart service
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
