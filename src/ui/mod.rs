/// User interface module
///
/// - `cart_view.rs` - pure cart view model: projection, totals, click handlers
/// - `table.rs` - iced widgets for the cart view model

pub mod cart_view;
pub mod table;
