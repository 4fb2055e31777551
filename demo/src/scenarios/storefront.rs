//! Storefront scenarios: catalogue listing, checkout and cancellation.
//!
//! The catalogue load can fail by injected fault. When it does, the session
//! posts the error notice and the scenario reports an empty store instead of
//! aborting.

use medicall_contracts::{error::MedicallResult, order::Order};
use medicall_core::tracking::OrderStatusView;
use medicall_notify::InMemoryNotifier;
use medicall_services::StoreSession;

use super::{print_notices, DemoEnv};

/// Run the catalogue listing.
pub fn run_catalog(env: &DemoEnv) -> MedicallResult<()> {
    println!("=== Scenario: Product Catalogue ===");
    println!();

    let notifier = InMemoryNotifier::new("catalog");
    let mut session = env.session(&notifier)?;
    let products = session.load_products();

    if products.is_empty() {
        println!("  No products available.");
    } else {
        println!("  {} product(s) available:", products.len());
        for product in products {
            println!(
                "    {:<8} {:<36} {:>10}  {}",
                product.id.as_str(),
                product.name,
                env.money(product.price),
                product.category.as_deref().unwrap_or("-")
            );
        }
    }

    println!();
    print_notices(&notifier);
    println!();
    Ok(())
}

/// Fill a cart with the first two products and check out.
pub fn run_checkout(env: &DemoEnv) -> MedicallResult<()> {
    println!("=== Scenario: Cart and Checkout ===");
    println!();

    let notifier = InMemoryNotifier::new("checkout");
    let mut session = env.session(&notifier)?;

    if fill_cart(&mut session)? {
        print_cart(env, &session);
        match session.checkout() {
            Ok(order) => print_order(env, order),
            Err(e) => println!("  Checkout failed: {}", e),
        }
    }

    println!();
    print_notices(&notifier);
    println!();
    Ok(())
}

/// Place an order, cancel it, and show that a second cancel is refused.
pub fn run_cancel(env: &DemoEnv) -> MedicallResult<()> {
    println!("=== Scenario: Order Cancellation ===");
    println!();

    let notifier = InMemoryNotifier::new("cancel");
    let mut session = env.session(&notifier)?;

    if fill_cart(&mut session)? {
        match session.checkout() {
            Ok(order) => println!("  Placed order {}", order.order_id),
            Err(e) => println!("  Checkout failed: {}", e),
        }

        if session.order_view().is_some() {
            match session.cancel_order() {
                Ok(()) => println!("  First cancel:  accepted"),
                Err(e) => println!("  First cancel:  {}", e),
            }
            match session.cancel_order() {
                Ok(()) => println!("  Second cancel: accepted"),
                Err(e) => println!("  Second cancel: {}", e),
            }
            if let Some(view) = session.order_view() {
                print_steps(view);
            }
        }
    }

    println!();
    print_notices(&notifier);
    println!();
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Load products and add two of the first and one of the second.
/// Returns false when the store came back empty.
fn fill_cart(session: &mut StoreSession) -> MedicallResult<bool> {
    let picks: Vec<_> = session.load_products().iter().take(2).cloned().collect();
    if picks.is_empty() {
        println!("  The store is empty; nothing to buy.");
        return Ok(false);
    }
    for (index, product) in picks.iter().enumerate() {
        let quantity = if index == 0 { 2 } else { 1 };
        session.add_product(product, quantity)?;
    }
    Ok(true)
}

fn print_cart(env: &DemoEnv, session: &StoreSession) {
    let cart = session.cart();
    println!("  Cart:");
    for item in cart.items() {
        println!(
            "    {} x {:<36} {:>10}",
            item.quantity,
            item.product.name,
            env.money(item.line_total())
        );
    }
    println!(
        "  Total: {} item(s), {}",
        cart.total_items(),
        env.money(cart.total_price())
    );
    println!();
}

fn print_order(env: &DemoEnv, order: &Order) {
    println!("  Order placed:        {}", order.order_id);
    println!("  Items:               {}", order.total_items());
    println!("  Total:               {}", env.money(order.total_price()));
    println!("  Estimated delivery:  {}", order.estimated_delivery_date);
    println!();
}

fn print_steps(view: &OrderStatusView) {
    println!();
    println!("  Tracking:");
    for step in view.tracking_steps() {
        let date = step
            .date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("    {:<18} {:<10} {}", step.name.name(), step.status.to_string(), date);
    }
}
