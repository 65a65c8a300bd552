//! Cart building command.

use std::str::FromStr;

use vitrine_storefront::catalog::CatalogListing;
use vitrine_storefront::error::{AppError, Result};
use vitrine_storefront::presentation::{OrderPresenter, format_currency};
use vitrine_storefront::state::AppState;

/// One `--add` argument: listing index, size label and quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOrder {
    pub index: usize,
    pub size: String,
    pub quantity: u32,
}

impl FromStr for AddOrder {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split(':');
        let bad = || AppError::BadRequest(format!("expected <index>:<size>[:<quantity>], got {s:?}"));

        let index = parts
            .next()
            .and_then(|p| p.trim().parse::<usize>().ok())
            .ok_or_else(bad)?;
        let size = parts
            .next()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or_else(bad)?
            .to_string();
        let quantity = match parts.next() {
            Some(p) => p
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|q| *q > 0)
                .ok_or_else(bad)?,
            None => 1,
        };

        if parts.next().is_some() {
            return Err(bad());
        }

        Ok(Self {
            index,
            size,
            quantity,
        })
    }
}

/// Fetch the listing, add each requested order and print the cart.
pub async fn run(state: &AppState, on_sale_only: bool, adds: &[AddOrder]) -> Result<()> {
    let mut listing = state.listing();
    listing.fetch(on_sale_only).await?;

    add_orders(&listing, adds)?;

    print_cart(state);
    Ok(())
}

/// Add each order to the listing's cart, stopping at the first one that
/// names a missing product or size, or a sold-out size.
pub fn add_orders<S>(listing: &CatalogListing<S>, adds: &[AddOrder]) -> Result<()> {
    for add in adds {
        if listing.get(add.index).is_none() {
            return Err(AppError::NotFound(format!("product {}", add.index)));
        }
        let presenter = listing.product_at(add.index);

        let size = presenter
            .product()
            .size(&add.size)
            .cloned()
            .ok_or_else(|| {
                AppError::NotFound(format!("size {} of {}", add.size, presenter.name()))
            })?;
        if !presenter.size_available(&size) {
            return Err(AppError::BadRequest(format!(
                "size {} of {} is unavailable",
                size.size,
                presenter.name()
            )));
        }

        if presenter.check_in_cart(&size) {
            tracing::info!(product = %presenter.name(), size = %size.size, "Already in cart, adding another line");
        }
        presenter.add_to_cart(&size, add.quantity);
    }

    Ok(())
}

fn print_cart(state: &AppState) {
    let cart = state.cart();

    if cart.is_empty() {
        println!("Cart is empty.");
        return;
    }

    for index in 0..cart.order_count() {
        let line = OrderPresenter::at(cart, index);
        println!(
            "{:>3} x {}  {}  {}  {}",
            line.quantity(),
            line.product().name.to_lowercase(),
            line.size().size,
            line.unit_price_formatted(),
            line.price_total_formatted()
        );
    }

    println!("Total: {}", format_currency(cart.total(), cart.currency()));
}
