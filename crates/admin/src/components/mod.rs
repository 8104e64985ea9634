//! Reusable view components shared by several screens.

pub mod data_table;
