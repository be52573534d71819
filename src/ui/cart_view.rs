/// Cart view model
///
/// Turns a borrowed snapshot of cart items into a toolkit-independent render
/// tree, and maps clicks on that tree to calls into a `CartActions` store.
/// Rendering is pure: the same items and formatter always produce the same
/// tree. The only side effects are the store calls made by the handlers.

use tracing::debug;

use crate::format::PriceFormatter;
use crate::state::data::CartItem;

/// Semantic identifiers carried by rendered nodes
pub mod test_id {
    pub const PRODUCT: &str = "product";
    pub const DECREMENT: &str = "decrement-product";
    pub const AMOUNT: &str = "product-amount";
    pub const INCREMENT: &str = "increment-product";
    pub const REMOVE: &str = "remove-product";
    pub const FINALIZE: &str = "finalize-order";
    pub const EMPTY: &str = "empty-cart";
}

pub const EMPTY_MESSAGE: &str = "Carrinho vazio";
pub const FINALIZE_LABEL: &str = "Finalizar pedido";
pub const TOTAL_LABEL: &str = "TOTAL";

/// Column captions: image, product, quantity, subtotal, delete
pub const HEADERS: [&str; 5] = ["", "PRODUTO", "QTD", "SUBTOTAL", ""];

/// Mutation requests the cart view can make
pub trait CartActions {
    fn remove_item(&mut self, id: i64);
    fn update_quantity(&mut self, id: i64, amount: u32);
}

/// A cart item plus its formatted prices, rebuilt on every render
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow {
    pub id: i64,
    pub title: String,
    pub price: f64,
    pub image: String,
    pub amount: u32,
    pub price_formatted: String,
    pub subtotal: String,
}

/// A click, carrying the item as it was when the tree was rendered.
///
/// Increment and decrement compute the new amount from this captured
/// snapshot, not from a fresh store lookup. Two clicks delivered before
/// the next render both start from the same amount.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    Increment(CartItem),
    Decrement(CartItem),
    Remove(i64),
}

/// An interactive element. `action` is None when the control is disabled.
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    pub test_id: &'static str,
    pub action: Option<CartAction>,
}

impl Control {
    pub fn is_enabled(&self) -> bool {
        self.action.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowNode {
    /// Stable key, the item id
    pub key: i64,
    pub test_id: &'static str,
    pub row: DisplayRow,
    pub decrement: Control,
    /// Read-only quantity field: (test id, displayed value)
    pub amount_field: (&'static str, String),
    pub increment: Control,
    pub remove: Control,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Footer {
    /// Checkout button; never wired to an action
    pub finalize: Control,
    pub finalize_label: &'static str,
    pub total_label: &'static str,
    pub total: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartTable {
    pub headers: [&'static str; 5],
    pub rows: Vec<RowNode>,
    pub footer: Footer,
}

/// What the cart screen shows
#[derive(Debug, Clone, PartialEq)]
pub enum CartScreen {
    Empty {
        test_id: &'static str,
        message: &'static str,
    },
    Populated(CartTable),
}

/// Map each item to a display row, preserving order
pub fn project(items: &[CartItem], formatter: &impl PriceFormatter) -> Vec<DisplayRow> {
    items
        .iter()
        .map(|item| DisplayRow {
            id: item.id,
            title: item.title.clone(),
            price: item.price,
            image: item.image.clone(),
            amount: item.amount,
            price_formatted: formatter.format(item.price),
            subtotal: formatter.format(item.price * f64::from(item.amount)),
        })
        .collect()
}

/// Formatted sum of price × amount over all items
pub fn compute_total(items: &[CartItem], formatter: &impl PriceFormatter) -> String {
    let total = items
        .iter()
        .fold(0.0, |sum, item| sum + item.price * f64::from(item.amount));
    formatter.format(total)
}

pub fn on_increment(item: &CartItem, actions: &mut impl CartActions) {
    let amount = item.amount.saturating_add(1);
    debug!(product_id = item.id, amount, "Increment clicked");
    actions.update_quantity(item.id, amount);
}

/// Never requests an amount below 1; the control is disabled at 1.
pub fn on_decrement(item: &CartItem, actions: &mut impl CartActions) {
    if item.amount <= 1 {
        debug!(product_id = item.id, "Decrement ignored at minimum amount");
        return;
    }
    let amount = item.amount - 1;
    debug!(product_id = item.id, amount, "Decrement clicked");
    actions.update_quantity(item.id, amount);
}

pub fn on_remove(id: i64, actions: &mut impl CartActions) {
    debug!(product_id = id, "Remove clicked");
    actions.remove_item(id);
}

/// Route a click to its handler
pub fn dispatch(action: &CartAction, actions: &mut impl CartActions) {
    match action {
        CartAction::Increment(item) => on_increment(item, actions),
        CartAction::Decrement(item) => on_decrement(item, actions),
        CartAction::Remove(id) => on_remove(*id, actions),
    }
}

/// Build the cart screen for the current items
pub fn render(items: &[CartItem], formatter: &impl PriceFormatter) -> CartScreen {
    if items.is_empty() {
        return CartScreen::Empty {
            test_id: test_id::EMPTY,
            message: EMPTY_MESSAGE,
        };
    }

    let rows = items
        .iter()
        .zip(project(items, formatter))
        .map(|(item, row)| RowNode {
            key: row.id,
            test_id: test_id::PRODUCT,
            decrement: Control {
                test_id: test_id::DECREMENT,
                action: (item.amount > 1).then(|| CartAction::Decrement(item.clone())),
            },
            amount_field: (test_id::AMOUNT, row.amount.to_string()),
            increment: Control {
                test_id: test_id::INCREMENT,
                action: Some(CartAction::Increment(item.clone())),
            },
            remove: Control {
                test_id: test_id::REMOVE,
                action: Some(CartAction::Remove(item.id)),
            },
            row,
        })
        .collect();

    CartScreen::Populated(CartTable {
        headers: HEADERS,
        rows,
        footer: Footer {
            finalize: Control {
                test_id: test_id::FINALIZE,
                action: None,
            },
            finalize_label: FINALIZE_LABEL,
            total_label: TOTAL_LABEL,
            total: compute_total(items, formatter),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Formats like `20.0`, so expectations read plainly
    struct Plain;

    impl PriceFormatter for Plain {
        fn format(&self, value: f64) -> String {
            format!("{value:.1}")
        }
    }

    #[derive(Debug, PartialEq)]
    enum Call {
        Remove(i64),
        Update(i64, u32),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl CartActions for Recorder {
        fn remove_item(&mut self, id: i64) {
            self.calls.push(Call::Remove(id));
        }

        fn update_quantity(&mut self, id: i64, amount: u32) {
            self.calls.push(Call::Update(id, amount));
        }
    }

    fn item(id: i64, price: f64, amount: u32) -> CartItem {
        CartItem {
            id,
            title: format!("Item {id}"),
            price,
            image: format!("products/{id}.jpg"),
            amount,
        }
    }

    fn table(screen: CartScreen) -> CartTable {
        match screen {
            CartScreen::Populated(table) => table,
            CartScreen::Empty { .. } => panic!("expected a populated cart"),
        }
    }

    fn click(control: &Control, actions: &mut impl CartActions) {
        let action = control.action.as_ref().expect("control is disabled");
        dispatch(action, actions);
    }

    #[test]
    fn test_single_item_total_and_subtotal() {
        let mut a = item(1, 10.0, 2);
        a.title = "A".to_string();
        let items = vec![a];

        assert_eq!(compute_total(&items, &Plain), "20.0");

        let table = table(render(&items, &Plain));
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].row.title, "A");
        assert_eq!(table.rows[0].row.price_formatted, "10.0");
        assert_eq!(table.rows[0].row.subtotal, "20.0");
        assert_eq!(table.footer.total, "20.0");
    }

    #[test]
    fn test_projection_preserves_order_and_length() {
        let items = vec![item(3, 1.5, 2), item(1, 4.0, 1), item(2, 0.0, 7)];
        let rows = project(&items, &Plain);

        assert_eq!(rows.len(), items.len());
        for (row, item) in rows.iter().zip(&items) {
            assert_eq!(row.id, item.id);
            assert_eq!(row.amount, item.amount);
            assert_eq!(row.subtotal, Plain.format(item.price * f64::from(item.amount)));
        }
        assert!(project(&[], &Plain).is_empty());
    }

    #[test]
    fn test_total_is_order_independent() {
        let items = vec![item(1, 5.0, 3), item(2, 2.0, 1), item(3, 0.25, 4)];
        let reversed: Vec<_> = items.iter().rev().cloned().collect();

        assert_eq!(compute_total(&items, &Plain), "18.0");
        assert_eq!(compute_total(&reversed, &Plain), "18.0");
        assert_eq!(compute_total(&[], &Plain), "0.0");
    }

    #[test]
    fn test_decrement_disabled_only_at_one() {
        let items = vec![item(1, 5.0, 1), item(2, 5.0, 2)];
        let table = table(render(&items, &Plain));

        assert!(!table.rows[0].decrement.is_enabled());
        assert!(table.rows[1].decrement.is_enabled());
        assert!(table.rows.iter().all(|r| r.increment.is_enabled()));
        assert!(table.rows.iter().all(|r| r.remove.is_enabled()));
    }

    #[test]
    fn test_increment_requests_next_amount_once() {
        let items = vec![item(1, 5.0, 3)];
        let table = table(render(&items, &Plain));
        let mut store = Recorder::default();

        click(&table.rows[0].increment, &mut store);

        assert_eq!(store.calls, vec![Call::Update(1, 4)]);
    }

    #[test]
    fn test_decrement_requests_previous_amount() {
        let items = vec![item(1, 5.0, 3)];
        let table = table(render(&items, &Plain));
        let mut store = Recorder::default();

        click(&table.rows[0].decrement, &mut store);

        assert_eq!(store.calls, vec![Call::Update(1, 2)]);
    }

    #[test]
    fn test_decrement_never_requests_zero() {
        let mut store = Recorder::default();
        on_decrement(&item(1, 5.0, 1), &mut store);
        assert!(store.calls.is_empty());
    }

    #[test]
    fn test_remove_second_item() {
        let items = vec![item(1, 5.0, 3), item(2, 2.0, 1)];
        let table = table(render(&items, &Plain));
        let mut store = Recorder::default();

        assert_eq!(table.footer.total, "17.0");
        click(&table.rows[1].remove, &mut store);

        assert_eq!(store.calls, vec![Call::Remove(2)]);
    }

    #[test]
    fn test_stale_snapshot_repeats_same_request() {
        let items = vec![item(1, 5.0, 3)];
        let table = table(render(&items, &Plain));
        let mut store = Recorder::default();

        // Both clicks land before a re-render
        click(&table.rows[0].increment, &mut store);
        click(&table.rows[0].increment, &mut store);

        assert_eq!(store.calls, vec![Call::Update(1, 4), Call::Update(1, 4)]);
    }

    #[test]
    fn test_empty_cart() {
        let screen = render(&[], &Plain);
        assert_eq!(
            screen,
            CartScreen::Empty {
                test_id: test_id::EMPTY,
                message: EMPTY_MESSAGE,
            }
        );
    }

    #[test]
    fn test_row_identifiers_and_inert_footer() {
        let items = vec![item(4, 1.0, 2), item(9, 3.0, 1)];
        let table = table(render(&items, &Plain));

        let keys: Vec<i64> = table.rows.iter().map(|r| r.key).collect();
        assert_eq!(keys, vec![4, 9]);

        let row = &table.rows[0];
        assert_eq!(row.test_id, test_id::PRODUCT);
        assert_eq!(row.decrement.test_id, test_id::DECREMENT);
        assert_eq!(row.amount_field, (test_id::AMOUNT, "2".to_string()));
        assert_eq!(row.increment.test_id, test_id::INCREMENT);
        assert_eq!(row.remove.test_id, test_id::REMOVE);

        assert_eq!(table.headers, HEADERS);
        assert_eq!(table.footer.finalize.test_id, test_id::FINALIZE);
        assert!(!table.footer.finalize.is_enabled());
        assert_eq!(table.footer.total_label, TOTAL_LABEL);
    }

    #[test]
    fn test_render_is_repeatable() {
        let items = vec![item(1, 5.0, 3), item(2, 2.0, 1)];
        assert_eq!(render(&items, &Plain), render(&items, &Plain));
    }
}
