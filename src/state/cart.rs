use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::data::{CartItem, Seed};
use crate::error::{CartError, Result};
use crate::ui::cart_view::CartActions;

/// Shown when a quantity change exceeds the available stock
pub const OUT_OF_STOCK_NOTICE: &str = "Quantidade solicitada fora de estoque";
/// Shown when any other quantity change fails
pub const UPDATE_FAILED_NOTICE: &str = "Erro na alteração de quantidade do produto";
/// Shown when a removal fails
pub const REMOVE_FAILED_NOTICE: &str = "Erro na remoção do produto";

/// The CartStore owns the SQLite cart database.
/// It holds the product catalog, stock levels and the current cart lines.
pub struct CartStore {
    conn: Connection,
    db_path: Option<PathBuf>,
    /// Latest user-facing failure message, cleared when read
    notice: Option<String>,
}

impl CartStore {
    /// Open (or create) the cart database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure the parent directory exists
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        info!("📁 Cart database opened at: {}", path.display());

        let store = CartStore {
            conn,
            db_path: Some(path.to_path_buf()),
            notice: None,
        };
        store.init_schema()?;

        Ok(store)
    }

    /// A throwaway store, used by tests
    pub fn in_memory() -> Result<Self> {
        let store = CartStore {
            conn: Connection::open_in_memory()?,
            db_path: None,
            notice: None,
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create all tables and indexes if they don't exist.
    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS products (
                id              INTEGER PRIMARY KEY,
                title           TEXT NOT NULL,
                price           REAL NOT NULL CHECK (price >= 0),
                image           TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS stock (
                product_id      INTEGER PRIMARY KEY,
                amount          INTEGER NOT NULL CHECK (amount >= 0),
                FOREIGN KEY(product_id) REFERENCES products(id) ON DELETE CASCADE
            );

            CREATE TABLE IF NOT EXISTS cart_items (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                product_id      INTEGER NOT NULL UNIQUE,
                amount          INTEGER NOT NULL CHECK (amount >= 1),
                added_at        INTEGER NOT NULL,
                FOREIGN KEY(product_id) REFERENCES products(id) ON DELETE CASCADE
            );",
        )?;

        debug!("Cart schema initialized");
        Ok(())
    }

    /// Get the path to the database file (None for in-memory stores)
    pub fn path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Number of products in the catalog
    pub fn product_count(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))?;
        Ok(count)
    }

    /// The cart contents, in the order products were first added
    pub fn items(&self) -> Result<Vec<CartItem>> {
        let mut stmt = self.conn.prepare(
            "SELECT p.id, p.title, p.price, p.image, c.amount
             FROM cart_items c
             JOIN products p ON p.id = c.product_id
             ORDER BY c.id",
        )?;

        let items = stmt
            .query_map([], |row| {
                Ok(CartItem {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    price: row.get(2)?,
                    image: row.get(3)?,
                    amount: row.get(4)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(items)
    }

    /// Take a product out of the cart
    pub fn remove_product(&self, product_id: i64) -> Result<()> {
        let removed = self.conn.execute(
            "DELETE FROM cart_items WHERE product_id = ?1",
            params![product_id],
        )?;
        if removed == 0 {
            return Err(CartError::NotInCart(product_id));
        }

        debug!(product_id, "Product removed from cart");
        Ok(())
    }

    /// Set the quantity of a product already in the cart.
    /// A zero amount is ignored and leaves the cart untouched.
    pub fn update_product_amount(&self, product_id: i64, amount: u32) -> Result<()> {
        if amount == 0 {
            debug!(product_id, "Ignoring zero amount update");
            return Ok(());
        }

        if cart_amount(&self.conn, product_id)?.is_none() {
            return Err(CartError::NotInCart(product_id));
        }
        check_stock(&self.conn, product_id, amount)?;

        self.conn.execute(
            "UPDATE cart_items SET amount = ?1 WHERE product_id = ?2",
            params![amount, product_id],
        )?;

        debug!(product_id, amount, "Cart amount updated");
        Ok(())
    }

    /// Load catalog, stock and initial cart lines in one transaction
    pub fn apply_seed(&mut self, seed: &Seed) -> Result<()> {
        let tx = self.conn.transaction()?;

        for product in &seed.products {
            tx.execute(
                "INSERT INTO products (id, title, price, image) VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(id) DO UPDATE SET
                    title = excluded.title,
                    price = excluded.price,
                    image = excluded.image",
                params![product.id, product.title, product.price, product.image],
            )?;
        }

        for stock in &seed.stock {
            tx.execute(
                "INSERT INTO stock (product_id, amount) VALUES (?1, ?2)
                 ON CONFLICT(product_id) DO UPDATE SET amount = excluded.amount",
                params![stock.id, stock.amount],
            )?;
        }

        for line in &seed.cart {
            for _ in 0..line.amount {
                add_to_cart(&tx, line.id)?;
            }
        }

        tx.commit()?;

        info!(
            "🌱 Seed applied: {} products, {} cart lines",
            seed.products.len(),
            seed.cart.len()
        );
        Ok(())
    }

    /// Take the pending user-facing notice, if any
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }
}

impl CartActions for CartStore {
    fn remove_item(&mut self, id: i64) {
        if let Err(err) = self.remove_product(id) {
            warn!(product_id = id, error = %err, "Failed to remove product");
            self.notice = Some(REMOVE_FAILED_NOTICE.to_string());
        }
    }

    fn update_quantity(&mut self, id: i64, amount: u32) {
        match self.update_product_amount(id, amount) {
            Ok(()) => {}
            Err(err @ CartError::OutOfStock { .. }) => {
                warn!(product_id = id, error = %err, "Quantity rejected");
                self.notice = Some(OUT_OF_STOCK_NOTICE.to_string());
            }
            Err(err) => {
                warn!(product_id = id, error = %err, "Failed to update quantity");
                self.notice = Some(UPDATE_FAILED_NOTICE.to_string());
            }
        }
    }
}

fn stock_of(conn: &Connection, product_id: i64) -> Result<u32> {
    let amount = conn
        .query_row(
            "SELECT amount FROM stock WHERE product_id = ?1",
            params![product_id],
            |row| row.get(0),
        )
        .optional()?;
    Ok(amount.unwrap_or(0))
}

fn cart_amount(conn: &Connection, product_id: i64) -> Result<Option<u32>> {
    let amount = conn
        .query_row(
            "SELECT amount FROM cart_items WHERE product_id = ?1",
            params![product_id],
            |row| row.get(0),
        )
        .optional()?;
    Ok(amount)
}

fn check_stock(conn: &Connection, product_id: i64, requested: u32) -> Result<()> {
    let available = stock_of(conn, product_id)?;
    if requested > available {
        return Err(CartError::OutOfStock {
            product_id,
            requested,
            available,
        });
    }
    Ok(())
}

/// Returns the new amount of the product in the cart
fn add_to_cart(conn: &Connection, product_id: i64) -> Result<u32> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM products WHERE id = ?1)",
        params![product_id],
        |row| row.get(0),
    )?;
    if !exists {
        return Err(CartError::ProductNotFound(product_id));
    }

    let current = cart_amount(conn, product_id)?;
    let requested = current.map_or(1, |amount| amount + 1);
    check_stock(conn, product_id, requested)?;

    if current.is_some() {
        conn.execute(
            "UPDATE cart_items SET amount = ?1 WHERE product_id = ?2",
            params![requested, product_id],
        )?;
    } else {
        conn.execute(
            "INSERT INTO cart_items (product_id, amount, added_at) VALUES (?1, ?2, ?3)",
            params![product_id, requested, chrono::Utc::now().timestamp()],
        )?;
    }

    Ok(requested)
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("db_path", &self.db_path)
            .field("notice", &self.notice)
            .finish()
    }
}
