/// State management module
///
/// This module handles all application state, including:
/// - The persistent cart database (cart.rs)
/// - Shared data structures (data.rs)

pub mod cart;
pub mod data;
