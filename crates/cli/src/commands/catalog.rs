//! Catalog listing command.

use tokio::sync::oneshot;
use vitrine_core::Size;
use vitrine_storefront::error::Result;
use vitrine_storefront::presentation::{ImageLoadError, ImageLoader, ProductPresenter, StyledText};
use vitrine_storefront::state::AppState;

/// Fetch the listing and print one line per product.
///
/// With `check_images`, every product image is requested and failures are
/// printed under the product line.
pub async fn run(state: &AppState, on_sale_only: bool, check_images: bool) -> Result<()> {
    let mut listing = state.listing();
    listing.fetch(on_sale_only).await?;

    if listing.item_count() == 0 {
        println!("No products.");
        return Ok(());
    }

    let loader = state.image_loader();
    for index in 0..listing.item_count() {
        let product = listing.product_at(index);
        println!("{}", describe(index, &product));

        if check_images {
            if let Err(e) = check_image(&product, &loader).await {
                println!("     {e}");
            }
        }
    }

    Ok(())
}

/// One listing line: index, name, price, sizes.
pub fn describe(index: usize, product: &ProductPresenter) -> String {
    let price = if product.has_discount() {
        format!(
            "{} {}",
            render(&product.regular_price_strike()),
            product.actual_price()
        )
    } else {
        product.actual_price().to_string()
    };

    let sizes = product
        .sizes()
        .iter()
        .map(|size| render_size(product, size))
        .collect::<Vec<_>>()
        .join(" ");

    format!("{index:>3}  {}  {price}  [{sizes}]", product.name())
}

/// Load the product image and wait for the loader's answer.
pub async fn check_image<L: ImageLoader>(
    product: &ProductPresenter,
    loader: &L,
) -> std::result::Result<(), ImageLoadError> {
    let (tx, rx) = oneshot::channel();
    product.load_image(
        loader,
        Box::new(move |result| {
            let _ = tx.send(result);
        }),
    );
    rx.await
        .unwrap_or_else(|_| Err(ImageLoadError::Failed("loader dropped the request".to_string())))
}

/// Render styled text for a terminal.
pub fn render(text: &StyledText) -> String {
    if text.strikethrough {
        format!("~~{}~~", text.text)
    } else {
        text.text.clone()
    }
}

fn render_size(product: &ProductPresenter, size: &Size) -> String {
    if product.size_available(size) {
        size.size.clone()
    } else {
        format!("({})", size.size)
    }
}
