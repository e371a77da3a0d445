/// State management module
/// 
/// This module handles all application state, including:
/// - The course value type (data.rs)
/// - The observable course collection and its fetch (catalog.rs)

pub mod data;
pub mod catalog;
